//! Station bottleneck detection.
//!
//! A station is a bottleneck when too many of the tickets waiting on it
//! are under pressure, either close to (or past) their promise or spread
//! across many stations. Only the factor breakdown is consulted.

use super::types::PrioritizedTicket;
use crate::error::{PrioritizerError, Result};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Thresholds for [`detect_bottlenecks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct BottleneckConfig {
    /// `factors.time_to_promise` at or above which a ticket is pressured.
    pub time_pressure_threshold: u8,

    /// `factors.coordination` at or above which a ticket is pressured.
    pub coordination_threshold: u8,

    /// Pressured tickets needed to flag a station.
    pub min_pressured_tickets: usize,
}

impl Default for BottleneckConfig {
    fn default() -> Self {
        Self {
            time_pressure_threshold: 70,
            coordination_threshold: 75,
            min_pressured_tickets: 3,
        }
    }
}

impl BottleneckConfig {
    /// Sets the pressured-ticket count that flags a station.
    pub fn with_min_pressured_tickets(mut self, n: usize) -> Self {
        self.min_pressured_tickets = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.min_pressured_tickets == 0 {
            return Err(PrioritizerError::InvalidConfig(
                "min_pressured_tickets must be at least 1".into(),
            ));
        }
        if self.time_pressure_threshold > 100 || self.coordination_threshold > 100 {
            return Err(PrioritizerError::InvalidConfig(
                "factor thresholds must be at most 100".into(),
            ));
        }
        Ok(())
    }
}

/// A station with too many pressured tickets.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct StationBottleneck {
    pub station: String,
    pub pressured_tickets: usize,
    /// Pressured ticket ids in queue order.
    pub ticket_ids: Vec<String>,
}

/// Flags stations whose pressured-ticket count reaches the configured
/// minimum.
///
/// Results are ordered by pressured count, descending, then station id.
/// A ticket assigned to the same station twice counts once for it.
///
/// Fails with [`PrioritizerError::InvalidConfig`] before looking at the
/// queue when `config` does not validate.
pub fn detect_bottlenecks(
    ranked: &[PrioritizedTicket],
    config: &BottleneckConfig,
) -> Result<Vec<StationBottleneck>> {
    if let Err(e) = config.validate() {
        warn!(error = %e, "rejected bottleneck configuration");
        return Err(e);
    }

    let mut by_station: BTreeMap<&str, Vec<String>> = BTreeMap::new();

    for entry in ranked {
        let factors = &entry.priority.factors;
        let pressured = factors.time_to_promise >= config.time_pressure_threshold
            || factors.coordination >= config.coordination_threshold;
        if !pressured {
            continue;
        }
        let stations: BTreeSet<&str> = entry
            .ticket
            .station_assignments
            .iter()
            .map(String::as_str)
            .collect();
        for station in stations {
            by_station
                .entry(station)
                .or_default()
                .push(entry.ticket.id.clone());
        }
    }

    let mut flagged: Vec<StationBottleneck> = by_station
        .into_iter()
        .filter(|(_, ids)| ids.len() >= config.min_pressured_tickets)
        .map(|(station, ticket_ids)| StationBottleneck {
            station: station.to_string(),
            pressured_tickets: ticket_ids.len(),
            ticket_ids,
        })
        .collect();

    // stable: ties stay in station-id order from the BTreeMap
    flagged.sort_by(|a, b| b.pressured_tickets.cmp(&a.pressured_tickets));
    Ok(flagged)
}
