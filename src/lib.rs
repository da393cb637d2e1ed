#![forbid(unsafe_code)]
//! Secret Santa : tirage au sort des destinataires de cadeaux.
//!
//! - Participants chargés depuis JSON/CSV, identité = empreinte nom + numéro.
//! - Tirage sans point fixe (dérangement), reproductible avec une graine.
//! - Rendu du message puis livraison (console ou SMS) derrière un trait.
//! - Un échec de livraison n'interrompt pas les autres ; rapport exportable.

pub mod assignment;
pub mod config;
pub mod dispatch;
pub mod io;
pub mod message;
pub mod model;
pub mod notifier;
pub mod template;

pub use assignment::{assign, AssignError, AssignOptions, Assignment, AssignmentEngine, Strategy};
pub use config::{
    ConfigError, Credentials, DeliveryMode, MessageService, RunSettings, DEFAULT_DOLLAR_LIMIT,
};
pub use dispatch::{notify_all, Delivery, DeliveryOutcome, DeliveryReport};
pub use io::{export_report, load_participants};
pub use message::{render, HolidayMessage, MessageRenderer};
pub use model::{Participant, ParticipantId, ParticipantRecord, Registry};
pub use notifier::{ConsoleNotifier, MessageId, Notifier, NotifyError};
#[cfg(feature = "twilio")]
pub use notifier::{TwilioConfig, TwilioNotifier};
pub use template::{load_template_from_file, MessageTemplate, TemplateError};
