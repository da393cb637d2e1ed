#![forbid(unsafe_code)]
use secret_santa::{ConfigError, Credentials, DeliveryMode, MessageService, RunSettings};
use std::path::PathBuf;

fn base() -> RunSettings {
    RunSettings {
        config_file: Some(PathBuf::from("family.json")),
        ..RunSettings::default()
    }
}

#[test]
fn dry_run_needs_only_a_config_file() {
    let settings = RunSettings {
        dry_run: true,
        ..base()
    };
    let (path, mode) = settings.validate().unwrap();
    assert_eq!(path, PathBuf::from("family.json"));
    assert_eq!(mode, DeliveryMode::DryRun);

    let err = RunSettings {
        dry_run: true,
        ..RunSettings::default()
    }
    .validate()
    .unwrap_err();
    assert_eq!(err, ConfigError::MissingConfigFile);
}

#[test]
fn sending_checks_service_then_sender_then_credentials() {
    assert_eq!(base().validate().unwrap_err(), ConfigError::MissingMessageService);

    let with_service = RunSettings {
        message_service: Some(MessageService::Twilio),
        ..base()
    };
    assert_eq!(
        with_service.clone().validate().unwrap_err(),
        ConfigError::MissingFromNumber
    );

    let with_sender = RunSettings {
        from_number: Some("+15559999".into()),
        twilio_sid: Some("AC123".into()),
        twilio_api_key: Some("   ".into()),
        ..with_service
    };
    assert_eq!(
        with_sender.clone().validate().unwrap_err(),
        ConfigError::MissingTwilioCredentials
    );

    let complete = RunSettings {
        twilio_api_key: Some("secret".into()),
        ..with_sender
    };
    let (_, mode) = complete.validate().unwrap();
    assert_eq!(
        mode,
        DeliveryMode::Sms {
            service: MessageService::Twilio,
            from: "+15559999".into(),
            credentials: Credentials {
                account_sid: "AC123".into(),
                auth_token: "secret".into(),
            },
        }
    );
}

#[test]
fn credentials_debug_hides_the_token() {
    let creds = Credentials {
        account_sid: "AC123".into(),
        auth_token: "super-secret".into(),
    };
    let shown = format!("{creds:?}");
    assert!(shown.contains("AC123"));
    assert!(!shown.contains("super-secret"));
}

#[test]
fn message_service_names() {
    assert_eq!("Twilio".parse::<MessageService>().unwrap(), MessageService::Twilio);
    assert!("pigeon".parse::<MessageService>().is_err());
    assert_eq!(MessageService::Twilio.to_string(), "twilio");
}
