//! Ticket and line-item records.

use chrono::{DateTime, Utc};

/// One line on a kitchen ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct LineItem {
    /// Reference into the menu-item catalog.
    pub menu_item_id: String,

    /// Number of portions. Expected to be positive.
    pub quantity: u32,

    /// Free-text modifiers ("no onion", "well done").
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Vec<String>,

    /// Paid add-ons attached to the line.
    #[cfg_attr(feature = "serde", serde(default))]
    pub add_ons: Vec<String>,
}

impl LineItem {
    /// Creates a line with no modifiers or add-ons.
    pub fn new(menu_item_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            menu_item_id: menu_item_id.into(),
            quantity,
            modifiers: Vec::new(),
            add_ons: Vec::new(),
        }
    }

    /// Adds a modifier.
    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.push(modifier.into());
        self
    }

    /// Adds an add-on.
    pub fn with_add_on(mut self, add_on: impl Into<String>) -> Self {
        self.add_ons.push(add_on.into());
        self
    }

    /// Modifiers plus add-ons on this line.
    pub fn modifier_count(&self) -> usize {
        self.modifiers.len() + self.add_ons.len()
    }
}

/// A kitchen order awaiting or in preparation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Ticket {
    /// Identifier assigned by the order system.
    pub id: String,

    /// When the kitchen promised the food would be ready.
    pub promised_at: DateTime<Utc>,

    /// Line items in order-entry order.
    pub items: Vec<LineItem>,

    /// Stations that must act on this ticket. Not deduplicated.
    pub station_assignments: Vec<String>,

    /// Fields the order system attaches that scoring does not read
    /// (`tableNumber`, `status`, ...). Carried through ranking untouched.
    #[cfg(feature = "serde")]
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Ticket {
    /// Creates an empty ticket promised at `promised_at`.
    pub fn new(id: impl Into<String>, promised_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            promised_at,
            items: Vec::new(),
            station_assignments: Vec::new(),
            #[cfg(feature = "serde")]
            extra: serde_json::Map::new(),
        }
    }

    /// Appends a line item.
    pub fn with_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    /// Appends a station assignment.
    pub fn with_station(mut self, station: impl Into<String>) -> Self {
        self.station_assignments.push(station.into());
        self
    }

    /// Sum of quantities across all lines.
    ///
    /// Summed in `u64` so no realistic record can overflow it.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of modifiers and add-ons across all lines.
    pub fn total_modifiers(&self) -> usize {
        self.items.iter().map(LineItem::modifier_count).sum()
    }

    /// Number of station assignments as recorded on the ticket.
    pub fn station_count(&self) -> usize {
        self.station_assignments.len()
    }
}

#[cfg(feature = "serde")]
impl Ticket {
    /// Decodes a single ticket from JSON.
    ///
    /// Missing `promisedAt`, `items` or `stationAssignments` fails fast
    /// with [`PrioritizerError::InvalidTicket`](crate::PrioritizerError::InvalidTicket).
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| crate::PrioritizerError::InvalidTicket {
            reason: e.to_string(),
        })
    }

    /// Decodes a JSON array of tickets. One bad record rejects the batch.
    pub fn list_from_json(json: &str) -> crate::Result<Vec<Self>> {
        serde_json::from_str(json).map_err(|e| crate::PrioritizerError::InvalidTicket {
            reason: e.to_string(),
        })
    }
}
