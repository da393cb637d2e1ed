use super::{MessageId, Notifier, NotifyError};
use crate::model::Participant;
use std::io::{self, Stdout, Write};

/// Dry run : écrit les messages au lieu de les envoyer.
#[derive(Debug)]
pub struct ConsoleNotifier<W = Stdout> {
    out: W,
    sent: usize,
}

impl ConsoleNotifier<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self { out, sent: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Notifier for ConsoleNotifier<W> {
    fn name(&self) -> &str {
        "console"
    }

    fn notify(&mut self, _participant: &Participant, message: &str) -> Result<MessageId, NotifyError> {
        writeln!(self.out, "{message}")?;
        self.out.flush()?;
        self.sent += 1;
        Ok(MessageId::new(format!("console-{}", self.sent)))
    }
}
