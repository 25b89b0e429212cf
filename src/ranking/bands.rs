//! Urgency bands for display grouping.

use super::types::PrioritizedTicket;
use crate::scoring::PriorityLevel;

/// A ranked queue split by [`PriorityLevel`].
///
/// Queue order is preserved within each band.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UrgencyBands {
    pub high: Vec<PrioritizedTicket>,
    pub medium: Vec<PrioritizedTicket>,
    pub low: Vec<PrioritizedTicket>,
}

impl UrgencyBands {
    /// Splits `ranked` into bands.
    pub fn from_ranked(ranked: impl IntoIterator<Item = PrioritizedTicket>) -> Self {
        let mut bands = Self::default();
        for ticket in ranked {
            match ticket.priority.level {
                PriorityLevel::High => bands.high.push(ticket),
                PriorityLevel::Medium => bands.medium.push(ticket),
                PriorityLevel::Low => bands.low.push(ticket),
            }
        }
        bands
    }

    /// Returns the band for `level`.
    pub fn band(&self, level: PriorityLevel) -> &[PrioritizedTicket] {
        match level {
            PriorityLevel::High => &self.high,
            PriorityLevel::Medium => &self.medium,
            PriorityLevel::Low => &self.low,
        }
    }

    /// Total tickets across all bands.
    pub fn len(&self) -> usize {
        self.high.len() + self.medium.len() + self.low.len()
    }

    /// Whether every band is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
