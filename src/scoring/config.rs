//! Scoring configuration.
//!
//! [`ScoringConfig`] holds every constant the scorer uses. The defaults
//! are the product-tuned values the kitchen display depends on; change
//! them only when the ranking contract itself changes.

use super::types::PriorityLevel;
use crate::error::{PrioritizerError, Result};

/// One step of the time-to-promise step function.
///
/// A ticket due in at most `max_minutes` minutes receives `score`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct TimeStep {
    /// Inclusive upper bound in minutes.
    pub max_minutes: i64,
    /// Factor score for tickets within this bound.
    pub score: f64,
}

impl TimeStep {
    /// Creates a step.
    pub const fn new(max_minutes: i64, score: f64) -> Self {
        Self { max_minutes, score }
    }
}

/// Configuration for [`PriorityScorer`](super::PriorityScorer).
///
/// # Defaults
///
/// ```
/// use kds_priority::scoring::ScoringConfig;
///
/// let config = ScoringConfig::default();
/// assert_eq!(config.time_weight, 0.4);
/// assert_eq!(config.high_threshold, 70);
/// assert!(config.validate().is_ok());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use kds_priority::scoring::ScoringConfig;
///
/// let config = ScoringConfig::default()
///     .with_weights(0.5, 0.25, 0.25)
///     .with_level_thresholds(75, 45);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct ScoringConfig {
    /// Time factor for tickets already past their promise.
    pub late_score: f64,

    /// Ascending step function for tickets not yet late.
    ///
    /// Evaluated in order; the first step whose bound covers the ticket wins.
    pub time_steps: Vec<TimeStep>,

    /// Time factor for tickets beyond the last step.
    pub far_score: f64,

    /// Weight of the time-to-promise factor.
    pub time_weight: f64,

    /// Weight of the complexity factor.
    pub complexity_weight: f64,

    /// Weight of the coordination factor.
    pub coordination_weight: f64,

    /// Average complexity that earns the full `avg_complexity_points`.
    ///
    /// Not capped: a richer average overshoots and the factor clamps at 100.
    pub max_avg_complexity: f64,

    /// Points contributed by average complexity.
    pub avg_complexity_points: f64,

    /// Item count at which the item-count term saturates.
    pub item_cap: u32,

    /// Points contributed by item count.
    pub item_points: f64,

    /// Modifier count at which the modifier term saturates.
    pub modifier_cap: usize,

    /// Points contributed by modifiers and add-ons.
    pub modifier_points: f64,

    /// Coordination points per assigned station.
    pub points_per_station: f64,

    /// Load multiplier is `1 + load / load_divisor`.
    pub load_divisor: f64,

    /// Minimum final score for [`PriorityLevel::High`].
    pub high_threshold: u8,

    /// Minimum final score for [`PriorityLevel::Medium`].
    pub medium_threshold: u8,

    /// Tickets due within this many minutes get a "promised in" clause.
    pub soon_minutes: i64,

    /// Average complexity that triggers the "complex items" clause.
    pub complex_avg_trigger: f64,

    /// Item count that triggers the "complex items" clause.
    pub complex_items_trigger: u32,

    /// Station count that triggers the "stations coordinating" clause.
    pub stations_trigger: usize,

    /// Modifier count that triggers the "modifiers" clause.
    pub modifiers_trigger: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            late_score: 100.0,
            time_steps: vec![
                TimeStep::new(5, 90.0),
                TimeStep::new(10, 70.0),
                TimeStep::new(15, 50.0),
                TimeStep::new(20, 30.0),
            ],
            far_score: 10.0,
            time_weight: 0.4,
            complexity_weight: 0.3,
            coordination_weight: 0.3,
            max_avg_complexity: 5.0,
            avg_complexity_points: 40.0,
            item_cap: 8,
            item_points: 30.0,
            modifier_cap: 10,
            modifier_points: 30.0,
            points_per_station: 25.0,
            load_divisor: 200.0,
            high_threshold: 70,
            medium_threshold: 40,
            soon_minutes: 10,
            complex_avg_trigger: 3.0,
            complex_items_trigger: 4,
            stations_trigger: 3,
            modifiers_trigger: 4,
        }
    }
}

impl ScoringConfig {
    /// Sets the three factor weights (time, complexity, coordination).
    pub fn with_weights(mut self, time: f64, complexity: f64, coordination: f64) -> Self {
        self.time_weight = time;
        self.complexity_weight = complexity;
        self.coordination_weight = coordination;
        self
    }

    /// Replaces the time step function.
    pub fn with_time_steps(mut self, steps: Vec<TimeStep>) -> Self {
        self.time_steps = steps;
        self
    }

    /// Sets the high/medium level thresholds.
    pub fn with_level_thresholds(mut self, high: u8, medium: u8) -> Self {
        self.high_threshold = high;
        self.medium_threshold = medium;
        self
    }

    /// Sets the load divisor.
    pub fn with_load_divisor(mut self, divisor: f64) -> Self {
        self.load_divisor = divisor;
        self
    }

    /// Sets the coordination points per station.
    pub fn with_points_per_station(mut self, points: f64) -> Self {
        self.points_per_station = points;
        self
    }

    /// Maps a final score to its urgency level.
    pub fn level_for(&self, score: u8) -> PriorityLevel {
        if score >= self.high_threshold {
            PriorityLevel::High
        } else if score >= self.medium_threshold {
            PriorityLevel::Medium
        } else {
            PriorityLevel::Low
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(PrioritizerError::InvalidConfig(msg.into()));

        if !(0.0..=100.0).contains(&self.late_score) || !(0.0..=100.0).contains(&self.far_score) {
            return invalid("late_score and far_score must be in [0, 100]");
        }
        if self
            .time_steps
            .iter()
            .any(|step| !(0.0..=100.0).contains(&step.score))
        {
            return invalid("time step scores must be in [0, 100]");
        }
        if self
            .time_steps
            .windows(2)
            .any(|w| w[0].max_minutes >= w[1].max_minutes)
        {
            return invalid("time steps must have strictly ascending bounds");
        }
        if self.time_steps.first().is_some_and(|s| s.max_minutes < 0) {
            return invalid("time step bounds must be non-negative");
        }
        let weights = [
            self.time_weight,
            self.complexity_weight,
            self.coordination_weight,
        ];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return invalid("weights must be finite and non-negative");
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return invalid("at least one weight must be positive");
        }
        if self.max_avg_complexity <= 0.0 {
            return invalid("max_avg_complexity must be positive");
        }
        if self.item_cap == 0 || self.modifier_cap == 0 {
            return invalid("item_cap and modifier_cap must be at least 1");
        }
        if self.load_divisor <= 0.0 || !self.load_divisor.is_finite() {
            return invalid("load_divisor must be positive");
        }
        if self.high_threshold > 100 {
            return invalid("high_threshold must be at most 100");
        }
        if self.medium_threshold > self.high_threshold {
            return invalid("medium_threshold must not exceed high_threshold");
        }
        Ok(())
    }
}
