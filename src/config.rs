use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Limite de dépense par défaut, en dollars.
pub const DEFAULT_DOLLAR_LIMIT: u32 = 50;

/// Fournisseur SMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageService {
    Twilio,
}

impl MessageService {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageService::Twilio => "twilio",
        }
    }
}

impl fmt::Display for MessageService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageService {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "twilio" => Ok(MessageService::Twilio),
            other => Err(format!("message service not supported: {other}")),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no config file provided")]
    MissingConfigFile,
    #[error("no message service provided and not a dry run")]
    MissingMessageService,
    #[error("no 'from' number provided and not a dry run")]
    MissingFromNumber,
    #[error("twilio requires sid and api_key")]
    MissingTwilioCredentials,
}

/// Identifiants du compte chez le fournisseur.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub account_sid: String,
    pub auth_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"***")
            .finish()
    }
}

/// Mode de livraison validé.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryMode {
    DryRun,
    Sms {
        service: MessageService,
        from: String,
        credentials: Credentials,
    },
}

/// Paramètres bruts d'une exécution, tels que fournis par la ligne de commande.
#[derive(Debug, Clone, Default)]
pub struct RunSettings {
    pub config_file: Option<PathBuf>,
    pub dry_run: bool,
    pub message_service: Option<MessageService>,
    pub from_number: Option<String>,
    pub twilio_sid: Option<String>,
    pub twilio_api_key: Option<String>,
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl RunSettings {
    /// Vérifie les paramètres obligatoires, avant toute lecture ou tirage.
    pub fn validate(&self) -> Result<(PathBuf, DeliveryMode), ConfigError> {
        let config_file = self
            .config_file
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ConfigError::MissingConfigFile)?;

        if self.dry_run {
            return Ok((config_file, DeliveryMode::DryRun));
        }

        let service = self
            .message_service
            .ok_or(ConfigError::MissingMessageService)?;
        let from = present(&self.from_number).ok_or(ConfigError::MissingFromNumber)?;
        let credentials = match service {
            MessageService::Twilio => {
                match (present(&self.twilio_sid), present(&self.twilio_api_key)) {
                    (Some(account_sid), Some(auth_token)) => Credentials {
                        account_sid,
                        auth_token,
                    },
                    _ => return Err(ConfigError::MissingTwilioCredentials),
                }
            }
        };

        Ok((
            config_file,
            DeliveryMode::Sms {
                service,
                from,
                credentials,
            },
        ))
    }
}
