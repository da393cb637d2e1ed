use crate::assignment::Assignment;
use crate::message::MessageRenderer;
use crate::model::ParticipantId;
use crate::notifier::{MessageId, Notifier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Résultat de la livraison pour un participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliveryOutcome {
    Sent {
        message_id: MessageId,
        sent_at: DateTime<Utc>,
    },
    Failed {
        error: String,
    },
}

/// Une ligne du rapport. Ne mentionne jamais le receveur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub participant_id: ParticipantId,
    pub display_name: String,
    pub contact: String,
    #[serde(flatten)]
    pub outcome: DeliveryOutcome,
}

impl Delivery {
    pub fn is_sent(&self) -> bool {
        matches!(self.outcome, DeliveryOutcome::Sent { .. })
    }
}

/// Rapport d'une campagne de notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryReport {
    pub provider: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub deliveries: Vec<Delivery>,
}

impl DeliveryReport {
    pub fn sent(&self) -> impl Iterator<Item = &Delivery> {
        self.deliveries.iter().filter(|d| d.is_sent())
    }
    pub fn failed(&self) -> impl Iterator<Item = &Delivery> {
        self.deliveries.iter().filter(|d| !d.is_sent())
    }
    /// Tous les participants ont-ils été notifiés ?
    pub fn is_complete(&self) -> bool {
        self.deliveries.iter().all(Delivery::is_sent)
    }
}

/// Notifie chaque donneur, dans l'ordre du registre.
///
/// Un échec de livraison est journalisé puis consigné dans le rapport ; les
/// participants suivants sont notifiés quand même.
pub fn notify_all(
    assignment: &Assignment<'_>,
    renderer: &dyn MessageRenderer,
    notifier: &mut dyn Notifier,
    limit: u32,
) -> DeliveryReport {
    let started_at = Utc::now();
    let mut deliveries = Vec::with_capacity(assignment.len());

    for (giver, receiver) in assignment.pairs() {
        let message = renderer.render(giver, receiver, limit);
        let outcome = match notifier.notify(giver, &message) {
            Ok(message_id) => {
                tracing::info!(
                    provider = notifier.name(),
                    contact = %giver.contact,
                    message_id = %message_id,
                    "notified {}",
                    giver.display_name
                );
                DeliveryOutcome::Sent {
                    message_id,
                    sent_at: Utc::now(),
                }
            }
            Err(err) => {
                tracing::warn!(
                    provider = notifier.name(),
                    contact = %giver.contact,
                    error = %err,
                    "could not notify {}",
                    giver.display_name
                );
                DeliveryOutcome::Failed {
                    error: err.to_string(),
                }
            }
        };
        deliveries.push(Delivery {
            participant_id: giver.id.clone(),
            display_name: giver.display_name.clone(),
            contact: giver.contact.clone(),
            outcome,
        });
    }

    DeliveryReport {
        provider: notifier.name().to_string(),
        started_at,
        finished_at: Utc::now(),
        deliveries,
    }
}
