//! Livraison des messages : une implémentation console (dry run) et un
//! fournisseur SMS. Le tirage et le rendu ne dépendent que de [`Notifier`].

mod console;
#[cfg(feature = "twilio")]
mod twilio;

pub use console::ConsoleNotifier;
#[cfg(feature = "twilio")]
pub use twilio::{TwilioConfig, TwilioNotifier, TWILIO_API_BASE};

use crate::model::Participant;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Identifiant renvoyé par le fournisseur pour un message accepté.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(String);

impl MessageId {
    pub fn new<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("participant {0} has no contact address")]
    MissingContact(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("provider rejected the message (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Canal de livraison d'un message à un participant.
pub trait Notifier {
    /// Nom court du canal (`console`, `twilio`...), repris dans le rapport.
    fn name(&self) -> &str;

    fn notify(&mut self, participant: &Participant, message: &str) -> Result<MessageId, NotifyError>;
}
