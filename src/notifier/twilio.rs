use super::{MessageId, Notifier, NotifyError};
use crate::model::Participant;
use anyhow::Context;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

pub const TWILIO_API_BASE: &str = "https://api.twilio.com";

/// Paramètres du compte Twilio.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Numéro expéditeur (`From`).
    pub from: String,
    pub base_url: String,
}

impl TwilioConfig {
    pub fn new<S: Into<String>, T: Into<String>, F: Into<String>>(
        account_sid: S,
        auth_token: T,
        from: F,
    ) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            from: from.into(),
            base_url: TWILIO_API_BASE.to_string(),
        }
    }

    pub fn with_base_url<U: Into<String>>(mut self, base_url: U) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// `POST {base}/2010-04-01/Accounts/{sid}/Messages.json`
    pub fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url.trim_end_matches('/'),
            self.account_sid
        )
    }
}

#[derive(Debug, Deserialize)]
struct CreatedMessage {
    sid: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    #[serde(default)]
    code: Option<u32>,
}

/// Envoi SMS via l'API REST Twilio (client bloquant).
pub struct TwilioNotifier {
    client: Client,
    config: TwilioConfig,
}

impl TwilioNotifier {
    pub fn new(config: TwilioConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &TwilioConfig {
        &self.config
    }
}

impl Notifier for TwilioNotifier {
    fn name(&self) -> &str {
        "twilio"
    }

    fn notify(&mut self, participant: &Participant, message: &str) -> Result<MessageId, NotifyError> {
        if participant.contact.trim().is_empty() {
            return Err(NotifyError::MissingContact(participant.display_name.clone()));
        }

        let resp = self
            .client
            .post(self.config.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[
                ("To", participant.contact.as_str()),
                ("From", self.config.from.as_str()),
                ("Body", message),
            ])
            .send()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        if !status.is_success() {
            let parsed = serde_json::from_str::<ApiError>(&body);
            let message = match parsed {
                Ok(ApiError {
                    message,
                    code: Some(code),
                }) => format!("{message} (code {code})"),
                Ok(ApiError { message, .. }) => message,
                Err(_) => body,
            };
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let created: CreatedMessage =
            serde_json::from_str(&body).map_err(|e| NotifyError::InvalidResponse(e.to_string()))?;
        Ok(MessageId::new(created.sid))
    }
}
