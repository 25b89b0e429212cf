//! Ticket priority scorer.

use super::config::ScoringConfig;
use super::factors::{Complexity, Coordination, TimeToPromise};
use super::types::{
    KitchenLoad, PriorityFactor, PriorityFactors, PriorityLevel, PriorityScore, TicketMetrics,
};
use crate::catalog::ComplexityLookup;
use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::ticket::Ticket;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// Computes [`PriorityScore`]s for kitchen tickets.
///
/// The score blends three factors, then scales by kitchen load:
///
/// ```text
/// raw   = (time * 0.4 + complexity * 0.3 + coordination * 0.3) * (1 + load / 200)
/// score = min(round(raw), 100)
/// ```
///
/// The scorer holds no mutable state and may be shared across threads.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use kds_priority::catalog::MenuCatalog;
/// use kds_priority::clock::FixedClock;
/// use kds_priority::scoring::{KitchenLoad, PriorityLevel, PriorityScorer};
/// use kds_priority::ticket::{LineItem, Ticket};
///
/// let now = Utc.with_ymd_and_hms(2024, 5, 1, 19, 0, 0).unwrap();
/// let scorer = PriorityScorer::new(MenuCatalog::new()).with_clock(FixedClock::at(now));
///
/// let ticket = Ticket::new("T1", now - Duration::minutes(20))
///     .with_item(LineItem::new("burger", 1))
///     .with_station("grill");
///
/// let priority = scorer.calculate_priority(&ticket, KitchenLoad::default());
/// assert_eq!(priority.score, 67);
/// assert_eq!(priority.level, PriorityLevel::Medium);
/// assert_eq!(priority.explanation, "MEDIUM: 20min late");
/// ```
#[derive(Debug, Clone)]
pub struct PriorityScorer<L, C = SystemClock> {
    config: ScoringConfig,
    catalog: L,
    clock: C,
}

impl<L: ComplexityLookup> PriorityScorer<L, SystemClock> {
    /// Creates a scorer with the default configuration and system clock.
    pub fn new(catalog: L) -> Self {
        Self {
            config: ScoringConfig::default(),
            catalog,
            clock: SystemClock,
        }
    }
}

impl<L: ComplexityLookup, C: Clock> PriorityScorer<L, C> {
    /// Creates a scorer after validating `config`.
    pub fn try_new(config: ScoringConfig, catalog: L, clock: C) -> Result<Self> {
        if let Err(e) = config.validate() {
            warn!(error = %e, "rejected scoring configuration");
            return Err(e);
        }
        Ok(Self {
            config,
            catalog,
            clock,
        })
    }

    /// Replaces the clock.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> PriorityScorer<L, C2> {
        PriorityScorer {
            config: self.config,
            catalog: self.catalog,
            clock,
        }
    }

    /// Replaces the configuration without validation.
    ///
    /// Use [`try_new`](Self::try_new) for untrusted configurations.
    pub fn with_config(mut self, config: ScoringConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Returns the clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Scores `ticket` against the current clock reading.
    pub fn calculate_priority(&self, ticket: &Ticket, kitchen_load: KitchenLoad) -> PriorityScore {
        self.score_at(ticket, kitchen_load, self.clock.now())
    }

    /// Scores `ticket` as of `now`.
    ///
    /// Batch callers pass one reading for the whole batch so every ticket
    /// is judged against the same instant.
    pub fn score_at(
        &self,
        ticket: &Ticket,
        kitchen_load: KitchenLoad,
        now: DateTime<Utc>,
    ) -> PriorityScore {
        let metrics = self.measure(ticket, now);
        let config = &self.config;

        let time_score = TimeToPromise.score(&metrics, config);
        let complexity_score = Complexity.score(&metrics, config);
        let coordination_score = Coordination.score(&metrics, config);

        let weighted = time_score * config.time_weight
            + complexity_score * config.complexity_weight
            + coordination_score * config.coordination_weight;
        let raw = weighted * kitchen_load.multiplier(config.load_divisor);
        let score = to_percent(raw);
        let level = config.level_for(score);

        debug!(
            ticket_id = %ticket.id,
            score,
            %level,
            mins_to_promise = metrics.mins_to_promise,
            "scored ticket"
        );

        PriorityScore {
            level,
            score,
            explanation: explain(level, &metrics, config),
            factors: PriorityFactors {
                time_to_promise: to_percent(time_score),
                complexity: to_percent(complexity_score),
                coordination: to_percent(coordination_score),
            },
        }
    }

    /// Measures `ticket` as of `now`.
    pub fn measure(&self, ticket: &Ticket, now: DateTime<Utc>) -> TicketMetrics {
        let total_items = ticket.total_items();
        let complexity_sum: f64 = ticket
            .items
            .iter()
            .map(|item| {
                self.catalog.lookup_complexity(&item.menu_item_id) * f64::from(item.quantity)
            })
            .sum();

        TicketMetrics {
            // floor, so any time past the promise reads as late
            mins_to_promise: (ticket.promised_at - now).num_milliseconds().div_euclid(60_000),
            total_items,
            avg_complexity: complexity_sum / total_items.max(1) as f64,
            total_modifiers: ticket.total_modifiers(),
            station_count: ticket.station_count(),
        }
    }
}

/// Rounds half up, then clamps into `[0, 100]`.
fn to_percent(value: f64) -> u8 {
    let rounded = (value + 0.5).floor();
    if rounded.is_nan() {
        return 0;
    }
    rounded.clamp(0.0, 100.0) as u8
}

fn explain(level: PriorityLevel, m: &TicketMetrics, config: &ScoringConfig) -> String {
    let mut clauses = Vec::new();

    if m.is_late() {
        clauses.push(format!("{}min late", m.mins_to_promise.abs()));
    } else if m.mins_to_promise <= config.soon_minutes {
        clauses.push(format!("promised in {}min", m.mins_to_promise));
    }
    if m.avg_complexity >= config.complex_avg_trigger
        || m.total_items >= u64::from(config.complex_items_trigger)
    {
        clauses.push(format!("{} complex items", m.total_items));
    }
    if m.station_count >= config.stations_trigger {
        clauses.push(format!("{} stations coordinating", m.station_count));
    }
    if m.total_modifiers >= config.modifiers_trigger {
        clauses.push(format!("{} modifiers", m.total_modifiers));
    }

    if clauses.is_empty() {
        format!("{} priority", level.label())
    } else {
        format!("{}: {}", level.label(), clauses.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MenuCatalog;
    use crate::clock::FixedClock;
    use crate::ticket::LineItem;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 19, 0, 0).unwrap()
    }

    fn catalog() -> MenuCatalog {
        MenuCatalog::new()
            .with_item("burger", 2.0)
            .with_item("steak", 4.0)
            .with_item("souffle", 5.0)
            .with_item("salad", 1.0)
    }

    fn scorer() -> PriorityScorer<MenuCatalog, FixedClock> {
        PriorityScorer::new(catalog()).with_clock(FixedClock::at(now()))
    }

    fn due_in(mins: i64) -> Ticket {
        Ticket::new("T", now() + Duration::minutes(mins))
    }

    #[test]
    fn test_late_single_item_scenario() {
        let ticket = due_in(-20)
            .with_item(LineItem::new("burger", 1))
            .with_station("grill");
        let p = scorer().calculate_priority(&ticket, KitchenLoad(50));

        assert_eq!(p.score, 67);
        assert_eq!(p.level, PriorityLevel::Medium);
        assert_eq!(p.explanation, "MEDIUM: 20min late");
        assert_eq!(
            p.factors,
            PriorityFactors {
                time_to_promise: 100,
                complexity: 20,
                coordination: 25,
            }
        );
    }

    #[test]
    fn test_empty_items_do_not_divide_by_zero() {
        let ticket = due_in(30);
        let s = scorer();
        let m = s.measure(&ticket, now());
        assert_eq!(m.total_items, 0);
        assert_eq!(m.avg_complexity, 0.0);

        let p = s.calculate_priority(&ticket, KitchenLoad(50));
        // 10 * 0.4 * 1.25
        assert_eq!(p.score, 5);
        assert_eq!(p.factors.complexity, 0);
        assert_eq!(p.explanation, "LOW priority");
    }

    #[test]
    fn test_unknown_item_defaults_to_two() {
        let known = due_in(30).with_item(LineItem::new("burger", 3));
        let unknown = due_in(30).with_item(LineItem::new("mystery", 3));
        let s = scorer();
        assert_eq!(
            s.calculate_priority(&known, KitchenLoad(50)),
            s.calculate_priority(&unknown, KitchenLoad(50)),
        );
    }

    #[test]
    fn test_avg_complexity_is_quantity_weighted() {
        let ticket = due_in(30)
            .with_item(LineItem::new("souffle", 1))
            .with_item(LineItem::new("salad", 3));
        let m = scorer().measure(&ticket, now());
        // (5 + 3) / 4
        assert!((m.avg_complexity - 2.0).abs() < 1e-10);
        assert_eq!(m.total_items, 4);
    }

    #[test]
    fn test_high_priority_full_explanation() {
        let ticket = due_in(-3)
            .with_item(
                LineItem::new("steak", 2)
                    .with_modifier("rare")
                    .with_modifier("no salt"),
            )
            .with_item(
                LineItem::new("souffle", 2)
                    .with_add_on("cream")
                    .with_add_on("berries"),
            )
            .with_station("grill")
            .with_station("pastry")
            .with_station("expo");
        let p = scorer().calculate_priority(&ticket, KitchenLoad(100));

        // time 100, complexity 4.5/5*40 + 4/8*30 + 4/10*30 = 36+15+12 = 63,
        // coordination 75; (40 + 18.9 + 22.5) * 1.5 = 122.1
        assert_eq!(p.score, 100);
        assert_eq!(p.level, PriorityLevel::High);
        assert_eq!(p.factors.complexity, 63);
        assert_eq!(p.factors.coordination, 75);
        assert_eq!(
            p.explanation,
            "HIGH: 3min late, 4 complex items, 3 stations coordinating, 4 modifiers"
        );
    }

    #[test]
    fn test_promised_soon_clause() {
        let ticket = due_in(8).with_item(LineItem::new("salad", 1));
        let p = scorer().calculate_priority(&ticket, KitchenLoad(0));
        // 70*0.4 + (8 + 3.75)*0.3 = 31.525
        assert_eq!(p.score, 32);
        assert_eq!(p.explanation, "LOW: promised in 8min");
    }

    #[test]
    fn test_no_time_clause_beyond_ten_minutes() {
        let ticket = due_in(11).with_item(LineItem::new("salad", 1));
        let p = scorer().calculate_priority(&ticket, KitchenLoad(0));
        assert!(!p.explanation.contains("promised"));
    }

    #[test]
    fn test_complex_clause_from_average_alone() {
        let ticket = due_in(60).with_item(LineItem::new("steak", 1));
        let p = scorer().calculate_priority(&ticket, KitchenLoad(0));
        assert!(p.explanation.ends_with(": 1 complex items"));
    }

    #[test]
    fn test_sub_minute_lateness_is_late() {
        let ticket = Ticket::new("T", now() - Duration::seconds(45)).with_station("grill");
        let p = scorer().calculate_priority(&ticket, KitchenLoad(50));
        assert_eq!(p.factors.time_to_promise, 100);
        assert!(p.explanation.contains(": 1min late"));
    }

    #[test]
    fn test_partial_minutes_round_down() {
        let s = scorer();
        let late = Ticket::new("T", now() - Duration::seconds(61));
        assert_eq!(s.measure(&late, now()).mins_to_promise, -2);
        let early = Ticket::new("T", now() + Duration::seconds(59));
        assert_eq!(s.measure(&early, now()).mins_to_promise, 0);
        let just_late = Ticket::new("T", now() - Duration::milliseconds(1));
        assert_eq!(s.measure(&just_late, now()).mins_to_promise, -1);
        let exact = Ticket::new("T", now());
        assert_eq!(s.measure(&exact, now()).mins_to_promise, 0);
    }

    #[test]
    fn test_huge_quantities_do_not_overflow() {
        let ticket = due_in(30)
            .with_item(LineItem::new("burger", u32::MAX))
            .with_item(LineItem::new("salad", 1));
        let s = scorer();
        let m = s.measure(&ticket, now());
        assert_eq!(m.total_items, u64::from(u32::MAX) + 1);

        let p = s.calculate_priority(&ticket, KitchenLoad(50));
        assert!(p.score <= 100);
        assert!(p.explanation.contains(&format!("{} complex items", m.total_items)));
    }

    #[test]
    fn test_negative_load_clamps_at_zero() {
        let ticket = due_in(60);
        let p = scorer().calculate_priority(&ticket, KitchenLoad(-1000));
        assert_eq!(p.score, 0);
        assert_eq!(p.level, PriorityLevel::Low);
    }

    #[test]
    fn test_clock_drives_time_factor() {
        let ticket = due_in(12);
        let early = scorer();
        let later = scorer().with_clock(FixedClock::at(now() + Duration::minutes(15)));
        assert_eq!(early.calculate_priority(&ticket, KitchenLoad(50)).factors.time_to_promise, 50);
        assert_eq!(later.calculate_priority(&ticket, KitchenLoad(50)).factors.time_to_promise, 100);
    }

    #[test]
    fn test_try_new_rejects_invalid_config() {
        let bad = ScoringConfig::default().with_load_divisor(-1.0);
        assert!(PriorityScorer::try_new(bad, catalog(), FixedClock::at(now())).is_err());
        assert!(
            PriorityScorer::try_new(ScoringConfig::default(), catalog(), FixedClock::at(now()))
                .is_ok()
        );
    }

    #[test]
    fn test_to_percent_rounds_half_up() {
        assert_eq!(to_percent(66.5), 67);
        assert_eq!(to_percent(66.49), 66);
        assert_eq!(to_percent(140.0), 100);
        assert_eq!(to_percent(-3.0), 0);
        assert_eq!(to_percent(f64::NAN), 0);
    }

    fn arb_ticket() -> impl Strategy<Value = Ticket> {
        let item = (
            prop::sample::select(vec!["burger", "steak", "souffle", "salad", "mystery"]),
            1u32..6,
            0usize..4,
            0usize..4,
        )
            .prop_map(|(id, qty, mods, adds)| {
                let mut line = LineItem::new(id, qty);
                line.modifiers = vec!["m".to_string(); mods];
                line.add_ons = vec!["a".to_string(); adds];
                line
            });
        (
            -120i64..120,
            prop::collection::vec(item, 0..8),
            prop::collection::vec(
                prop::sample::select(vec!["grill", "fry", "cold", "pastry", "expo"]),
                0..6,
            ),
        )
            .prop_map(|(mins, items, stations)| {
                let mut t = due_in(mins);
                t.items = items;
                t.station_assignments = stations.into_iter().map(String::from).collect();
                t
            })
    }

    proptest! {
        #[test]
        fn prop_score_and_factors_in_range(ticket in arb_ticket(), load in -50i32..400) {
            let p = scorer().calculate_priority(&ticket, KitchenLoad(load));
            prop_assert!(p.score <= 100);
            prop_assert!(p.factors.time_to_promise <= 100);
            prop_assert!(p.factors.complexity <= 100);
            prop_assert!(p.factors.coordination <= 100);
        }

        #[test]
        fn prop_level_matches_score(ticket in arb_ticket(), load in 0i32..=100) {
            let p = scorer().calculate_priority(&ticket, KitchenLoad(load));
            let expected = if p.score >= 70 {
                PriorityLevel::High
            } else if p.score >= 40 {
                PriorityLevel::Medium
            } else {
                PriorityLevel::Low
            };
            prop_assert_eq!(p.level, expected);
            prop_assert!(p.explanation.starts_with(p.level.label()));
        }

        #[test]
        fn prop_score_monotonic_in_load(ticket in arb_ticket(), a in 0i32..=100, b in 0i32..=100) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let s = scorer();
            let p_lo = s.calculate_priority(&ticket, KitchenLoad(lo));
            let p_hi = s.calculate_priority(&ticket, KitchenLoad(hi));
            prop_assert!(p_lo.score <= p_hi.score);
        }

        #[test]
        fn prop_late_tickets_saturate_time(ticket in arb_ticket(), late_secs in 1i64..36_000) {
            let mut t = ticket;
            t.promised_at = now() - Duration::seconds(late_secs);
            let p = scorer().calculate_priority(&t, KitchenLoad::default());
            prop_assert_eq!(p.factors.time_to_promise, 100);
        }

        #[test]
        fn prop_same_instant_same_output(ticket in arb_ticket(), load in 0i32..=100) {
            let s = scorer();
            prop_assert_eq!(
                s.calculate_priority(&ticket, KitchenLoad(load)),
                s.calculate_priority(&ticket, KitchenLoad(load))
            );
        }
    }
}
