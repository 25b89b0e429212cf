//! Priority values and the factor rule trait.

use super::config::ScoringConfig;
use std::fmt;

/// Urgency band derived from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
}

impl PriorityLevel {
    /// Uppercase label used in explanations.
    pub fn label(&self) -> &'static str {
        match self {
            PriorityLevel::Low => "LOW",
            PriorityLevel::Medium => "MEDIUM",
            PriorityLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PriorityLevel::Low => "low",
            PriorityLevel::Medium => "medium",
            PriorityLevel::High => "high",
        };
        f.write_str(s)
    }
}

/// Per-factor breakdown, before the kitchen-load multiplier.
///
/// Each value is rounded independently and lies in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct PriorityFactors {
    pub time_to_promise: u8,
    pub complexity: u8,
    pub coordination: u8,
}

/// Computed urgency of a ticket. Replaced on every ranking pass.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct PriorityScore {
    /// Band derived from `score` alone.
    pub level: PriorityLevel,
    /// Final score in `[0, 100]`.
    pub score: u8,
    /// Human-readable summary, e.g. `"MEDIUM: 20min late"`.
    pub explanation: String,
    /// Unweighted factor scores.
    pub factors: PriorityFactors,
}

/// Kitchen utilization estimate, as a percentage.
///
/// Nominally in `[0, 100]` but deliberately unvalidated: out-of-range
/// values just scale the multiplier further. Defaults to 50.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KitchenLoad(pub i32);

impl KitchenLoad {
    /// Load assumed when the caller has no estimate.
    pub const DEFAULT: KitchenLoad = KitchenLoad(50);

    /// Returns `1 + load / divisor`.
    pub fn multiplier(&self, divisor: f64) -> f64 {
        1.0 + f64::from(self.0) / divisor
    }
}

impl Default for KitchenLoad {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<i32> for KitchenLoad {
    fn from(load: i32) -> Self {
        Self(load)
    }
}

/// Raw measurements of a ticket at one clock reading.
///
/// Factor rules and the explanation builder read from this instead of
/// re-walking the ticket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TicketMetrics {
    /// Signed minutes until the promise, floored; negative once late.
    pub mins_to_promise: i64,
    /// Sum of line quantities.
    pub total_items: u64,
    /// Quantity-weighted mean complexity; 0 for an empty ticket.
    pub avg_complexity: f64,
    /// Modifiers plus add-ons across all lines.
    pub total_modifiers: usize,
    /// Number of station assignments.
    pub station_count: usize,
}

impl TicketMetrics {
    /// Whether the promise time has passed.
    pub fn is_late(&self) -> bool {
        self.mins_to_promise < 0
    }
}

/// A single urgency factor.
///
/// Returns a score in `[0, 100]` where **higher is more urgent**. The
/// scorer weights and combines the factors it is configured with.
pub trait PriorityFactor: Send + Sync {
    /// Returns the name of this factor.
    fn name(&self) -> &str;

    /// Computes the unweighted factor score.
    fn score(&self, metrics: &TicketMetrics, config: &ScoringConfig) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(PriorityLevel::High > PriorityLevel::Medium);
        assert!(PriorityLevel::Medium > PriorityLevel::Low);
    }

    #[test]
    fn test_level_labels() {
        assert_eq!(PriorityLevel::High.label(), "HIGH");
        assert_eq!(PriorityLevel::Medium.to_string(), "medium");
    }

    #[test]
    fn test_load_multiplier_range() {
        assert_eq!(KitchenLoad(0).multiplier(200.0), 1.0);
        assert_eq!(KitchenLoad::default().multiplier(200.0), 1.25);
        assert_eq!(KitchenLoad(100).multiplier(200.0), 1.5);
        assert_eq!(KitchenLoad(300).multiplier(200.0), 2.5);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_score_serializes_camel_case() {
        let score = PriorityScore {
            level: PriorityLevel::High,
            score: 88,
            explanation: "HIGH: 3min late".into(),
            factors: PriorityFactors {
                time_to_promise: 100,
                complexity: 20,
                coordination: 50,
            },
        };
        let json = serde_json::to_value(&score).unwrap();
        assert_eq!(json["level"], "high");
        assert_eq!(json["factors"]["timeToPromise"], 100);
    }
}
