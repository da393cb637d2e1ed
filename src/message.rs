use crate::model::Participant;

/// Permet de customiser le rendu du message (SMS, console, etc.).
pub trait MessageRenderer {
    fn render(&self, giver: &Participant, receiver: &Participant, limit: u32) -> String;
}

/// Message de fête par défaut.
#[derive(Debug, Default, Clone, Copy)]
pub struct HolidayMessage;

impl MessageRenderer for HolidayMessage {
    fn render(&self, giver: &Participant, receiver: &Participant, limit: u32) -> String {
        format!(
            "HoHoHo {giver}, you have received your Secret Santa giftee!\nYou will be finding a gift for {receiver} with a limit of ${limit}. Christmas is\nright around the corner, so get creative!\n",
            giver = giver.display_name,
            receiver = receiver.display_name,
        )
    }
}

/// Rendu avec le gabarit par défaut.
pub fn render(giver: &Participant, receiver: &Participant, limit: u32) -> String {
    HolidayMessage.render(giver, receiver, limit)
}
