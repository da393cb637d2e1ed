#![forbid(unsafe_code)]
use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use secret_santa::{
    config::{DeliveryMode, MessageService, RunSettings, DEFAULT_DOLLAR_LIMIT},
    dispatch::{notify_all, DeliveryOutcome},
    io,
    message::{HolidayMessage, MessageRenderer},
    notifier::{ConsoleNotifier, Notifier},
    template::load_template_from_file,
    AssignOptions, AssignmentEngine, Strategy,
};
use std::path::PathBuf;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Tirage Secret Santa : chacun reçoit un destinataire, puis un SMS (ou un
/// affichage console en dry run).
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs sur stderr (feature `logging`)
    #[arg(long)]
    log: bool,

    /// Fichier des participants (JSON, ou CSV `full_name,ph_number`)
    #[arg(long)]
    config_file: Option<PathBuf>,

    /// Affiche les messages au lieu de les envoyer
    #[arg(long)]
    dry_run: bool,

    /// Limite de dépense en dollars
    #[arg(long, default_value_t = DEFAULT_DOLLAR_LIMIT)]
    dollar_limit: u32,

    /// Fournisseur SMS (seul `twilio` est supporté)
    #[arg(long)]
    message_service: Option<MessageService>,

    /// Numéro expéditeur
    #[arg(long, env = "SECRET_SANTA_FROM")]
    from_num: Option<String>,

    /// SID du compte Twilio
    #[arg(long, env = "TWILIO_ACCOUNT_SID", hide_env_values = true)]
    twilio_sid: Option<String>,

    /// Jeton d'API Twilio
    #[arg(long, env = "TWILIO_AUTH_TOKEN", hide_env_values = true)]
    twilio_api_key: Option<String>,

    /// URL de base de l'API Twilio (tests, bac à sable)
    #[arg(long, env = "TWILIO_API_BASE_URL", hide = true)]
    twilio_base_url: Option<String>,

    /// Gabarit de message ({giver}, {giver_contact}, {receiver}, {limit})
    #[arg(long)]
    template: Option<PathBuf>,

    /// Graine pour un tirage reproductible
    #[arg(long)]
    seed: Option<u64>,

    /// Stratégie de tirage : permutation, cycle ou greedy
    #[arg(long, default_value = "permutation")]
    strategy: Strategy,

    /// Nombre maximal de tentatives de tirage
    #[arg(long, default_value_t = 1000)]
    max_attempts: u32,

    /// Rapport de livraison (JSON, ou CSV si extension `.csv`)
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let settings = RunSettings {
        config_file: cli.config_file.clone(),
        dry_run: cli.dry_run,
        message_service: cli.message_service,
        from_number: cli.from_num.clone(),
        twilio_sid: cli.twilio_sid.clone(),
        twilio_api_key: cli.twilio_api_key.clone(),
    };
    // Erreur d'usage = code 2, avant toute lecture du fichier
    let (config_file, mode) = match settings.validate() {
        Ok(validated) => validated,
        Err(err) => Cli::command()
            .error(ErrorKind::MissingRequiredArgument, err)
            .exit(),
    };

    let renderer: Box<dyn MessageRenderer> = match &cli.template {
        Some(path) => Box::new(load_template_from_file(path)?),
        None => Box::new(HolidayMessage),
    };
    let mut notifier = build_notifier(&mode, cli.twilio_base_url.as_deref())?;

    let registry = io::load_participants(&config_file)?;
    let opts = AssignOptions {
        strategy: cli.strategy,
        max_attempts: cli.max_attempts,
    };
    let mut engine = match cli.seed {
        Some(seed) => AssignmentEngine::seeded(seed, opts),
        None => AssignmentEngine::from_entropy(opts),
    };
    let assignment = engine.assign(&registry)?;

    let report = notify_all(
        &assignment,
        renderer.as_ref(),
        notifier.as_mut(),
        cli.dollar_limit,
    );

    for d in &report.deliveries {
        match &d.outcome {
            DeliveryOutcome::Sent { message_id, .. } if mode != DeliveryMode::DryRun => {
                println!(
                    "successfully sent message to {} {}: {}",
                    d.contact, d.display_name, message_id
                );
            }
            DeliveryOutcome::Sent { .. } => {}
            DeliveryOutcome::Failed { error } => {
                eprintln!(
                    "failed to send message to {} {}: {}",
                    d.contact, d.display_name, error
                );
            }
        }
    }

    // Code 3 = tirage fait, livraison INCOMPLETE
    let mut code = if report.is_complete() {
        0
    } else {
        eprintln!(
            "{} of {} message(s) could not be delivered",
            report.failed().count(),
            report.deliveries.len()
        );
        3
    };

    // Les résultats sont déjà affichés : un rapport illisible ne masque pas le code 3
    if let Some(path) = &cli.report {
        if let Err(err) = io::export_report(path, &report) {
            eprintln!("Error: {err:#}");
            if code == 0 {
                code = 1;
            }
        }
    }

    std::process::exit(code);
}

fn build_notifier(mode: &DeliveryMode, base_url: Option<&str>) -> Result<Box<dyn Notifier>> {
    match mode {
        DeliveryMode::DryRun => Ok(Box::new(ConsoleNotifier::stdout())),
        DeliveryMode::Sms {
            service: MessageService::Twilio,
            from,
            credentials,
        } => {
            #[cfg(feature = "twilio")]
            {
                use secret_santa::notifier::{TwilioConfig, TwilioNotifier};
                let mut config = TwilioConfig::new(
                    credentials.account_sid.clone(),
                    credentials.auth_token.clone(),
                    from.clone(),
                );
                if let Some(base_url) = base_url {
                    config = config.with_base_url(base_url);
                }
                Ok(Box::new(TwilioNotifier::new(config)?))
            }
            #[cfg(not(feature = "twilio"))]
            {
                let _ = (from, credentials, base_url);
                anyhow::bail!("message service not supported: built without the `twilio` feature")
            }
        }
    }
}
