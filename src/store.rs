//! Ticket repository capability.
//!
//! The kitchen system owns ticket state. Callers of the ranker inject a
//! [`TicketStore`] rather than reaching for a global map.

use crate::ticket::Ticket;

/// Read access to the tickets currently in flight.
pub trait TicketStore: Send + Sync {
    /// Returns the active tickets in the store's natural order.
    fn active_tickets(&self) -> Vec<Ticket>;
}

/// Insertion-ordered in-memory store.
///
/// Not synchronized; wrap in a lock to share between writers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTicketStore {
    tickets: Vec<Ticket>,
}

impl InMemoryTicketStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `ticket`, replacing any ticket with the same id in place.
    ///
    /// Returns the replaced ticket.
    pub fn upsert(&mut self, ticket: Ticket) -> Option<Ticket> {
        match self.tickets.iter_mut().find(|t| t.id == ticket.id) {
            Some(slot) => Some(std::mem::replace(slot, ticket)),
            None => {
                self.tickets.push(ticket);
                None
            }
        }
    }

    /// Removes the ticket with `id`, e.g. once it is bumped from the line.
    pub fn remove(&mut self, id: &str) -> Option<Ticket> {
        let pos = self.tickets.iter().position(|t| t.id == id)?;
        Some(self.tickets.remove(pos))
    }

    /// Looks up a ticket by id.
    pub fn get(&self, id: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    /// Number of stored tickets.
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

impl FromIterator<Ticket> for InMemoryTicketStore {
    fn from_iter<I: IntoIterator<Item = Ticket>>(iter: I) -> Self {
        let mut store = Self::new();
        for ticket in iter {
            store.upsert(ticket);
        }
        store
    }
}

impl TicketStore for InMemoryTicketStore {
    fn active_tickets(&self) -> Vec<Ticket> {
        self.tickets.clone()
    }
}
