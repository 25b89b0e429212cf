//! The three urgency factors.

use super::config::ScoringConfig;
use super::types::{PriorityFactor, TicketMetrics};

/// Time pressure: step function over minutes to the promise.
///
/// Late tickets saturate at `late_score`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeToPromise;

impl PriorityFactor for TimeToPromise {
    fn name(&self) -> &str {
        "TimeToPromise"
    }

    fn score(&self, metrics: &TicketMetrics, config: &ScoringConfig) -> f64 {
        if metrics.is_late() {
            return config.late_score;
        }
        config
            .time_steps
            .iter()
            .find(|step| metrics.mins_to_promise <= step.max_minutes)
            .map(|step| step.score)
            .unwrap_or(config.far_score)
    }
}

/// Order complexity: average item difficulty, item count, modifiers.
///
/// Item count and modifier count saturate independently at their caps.
#[derive(Debug, Clone, Copy, Default)]
pub struct Complexity;

impl PriorityFactor for Complexity {
    fn name(&self) -> &str {
        "Complexity"
    }

    fn score(&self, metrics: &TicketMetrics, config: &ScoringConfig) -> f64 {
        let avg_term =
            metrics.avg_complexity / config.max_avg_complexity * config.avg_complexity_points;
        let item_term = metrics.total_items.min(u64::from(config.item_cap)) as f64
            / f64::from(config.item_cap)
            * config.item_points;
        let modifier_term = metrics.total_modifiers.min(config.modifier_cap) as f64
            / config.modifier_cap as f64
            * config.modifier_points;

        (avg_term + item_term + modifier_term).clamp(0.0, 100.0)
    }
}

/// Cross-station load: fixed points per assigned station.
#[derive(Debug, Clone, Copy, Default)]
pub struct Coordination;

impl PriorityFactor for Coordination {
    fn name(&self) -> &str {
        "Coordination"
    }

    fn score(&self, metrics: &TicketMetrics, config: &ScoringConfig) -> f64 {
        (metrics.station_count as f64 * config.points_per_station).clamp(0.0, 100.0)
    }
}
