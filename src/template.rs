use crate::message::MessageRenderer;
use crate::model::Participant;
use anyhow::Context;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template is empty")]
    Empty,
    #[error("unknown placeholder {{{0}}}")]
    UnknownPlaceholder(String),
    #[error("unclosed placeholder starting at byte {0}")]
    Unclosed(usize),
    #[error("unmatched '}}' at byte {0}")]
    UnmatchedClose(usize),
    #[error("template must mention {{receiver}}")]
    MissingReceiver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    Giver,
    GiverContact,
    Receiver,
    Limit,
}

impl Placeholder {
    fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "giver" => Some(Placeholder::Giver),
            "giver_contact" => Some(Placeholder::GiverContact),
            "receiver" => Some(Placeholder::Receiver),
            "limit" => Some(Placeholder::Limit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Field(Placeholder),
}

/// Gabarit de message fourni par l'utilisateur.
///
/// Champs disponibles : `{giver}`, `{giver_contact}`, `{receiver}`, `{limit}`.
/// `{{` et `}}` produisent des accolades littérales.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    segments: Vec<Segment>,
}

impl MessageTemplate {
    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        if raw.trim().is_empty() {
            return Err(TemplateError::Empty);
        }

        let mut segments = Vec::new();
        let mut text = String::new();
        let mut chars = raw.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    text.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    text.push('}');
                }
                '}' => return Err(TemplateError::UnmatchedClose(pos)),
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(TemplateError::Unclosed(pos));
                    }
                    let field = Placeholder::parse(&name)
                        .ok_or_else(|| TemplateError::UnknownPlaceholder(name.clone()))?;
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::Field(field));
                }
                other => text.push(other),
            }
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        if !segments
            .iter()
            .any(|s| *s == Segment::Field(Placeholder::Receiver))
        {
            return Err(TemplateError::MissingReceiver);
        }
        Ok(Self { segments })
    }
}

impl FromStr for MessageTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl MessageRenderer for MessageTemplate {
    fn render(&self, giver: &Participant, receiver: &Participant, limit: u32) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Field(Placeholder::Giver) => out.push_str(&giver.display_name),
                Segment::Field(Placeholder::GiverContact) => out.push_str(&giver.contact),
                Segment::Field(Placeholder::Receiver) => out.push_str(&receiver.display_name),
                Segment::Field(Placeholder::Limit) => out.push_str(&limit.to_string()),
            }
        }
        out
    }
}

pub fn load_template_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<MessageTemplate> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading template {}", path.display()))?;
    let template = MessageTemplate::parse(&raw)
        .with_context(|| format!("parsing template {}", path.display()))?;
    Ok(template)
}
