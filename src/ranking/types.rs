//! Ranked ticket values.

use crate::scoring::PriorityScore;
use crate::ticket::Ticket;

/// A copy of a ticket with its computed priority attached.
///
/// Serializes as the ticket's own fields plus a `priority` field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrioritizedTicket {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub ticket: Ticket,
    pub priority: PriorityScore,
}

impl PrioritizedTicket {
    /// Pairs a ticket with its score.
    pub fn new(ticket: Ticket, priority: PriorityScore) -> Self {
        Self { ticket, priority }
    }
}

impl AsRef<Ticket> for PrioritizedTicket {
    fn as_ref(&self) -> &Ticket {
        &self.ticket
    }
}
