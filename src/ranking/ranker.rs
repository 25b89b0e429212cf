//! Kitchen work-queue ranking.

use super::types::PrioritizedTicket;
use crate::catalog::ComplexityLookup;
use crate::clock::{Clock, SystemClock};
use crate::scoring::{KitchenLoad, PriorityScore, PriorityScorer};
use crate::store::TicketStore;
use crate::ticket::Ticket;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Batches smaller than this are scored sequentially even when parallel
/// scoring is enabled.
#[cfg(feature = "parallel")]
const PARALLEL_MIN_BATCH: usize = 64;

/// Orders tickets by descending urgency.
///
/// Every ticket in a batch is scored against the same kitchen-load
/// snapshot and the same clock reading. Tickets with equal scores keep
/// their original relative order.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use kds_priority::catalog::MenuCatalog;
/// use kds_priority::clock::FixedClock;
/// use kds_priority::ranking::QueueRanker;
/// use kds_priority::scoring::{KitchenLoad, PriorityScorer};
/// use kds_priority::ticket::Ticket;
///
/// let now = Utc.with_ymd_and_hms(2024, 5, 1, 19, 0, 0).unwrap();
/// let scorer = PriorityScorer::new(MenuCatalog::new()).with_clock(FixedClock::at(now));
/// let ranker = QueueRanker::new(scorer);
///
/// let tickets = vec![
///     Ticket::new("relaxed", now + Duration::minutes(45)),
///     Ticket::new("late", now - Duration::minutes(5)),
/// ];
/// let ranked = ranker.sort_tickets_by_priority(&tickets, KitchenLoad::default());
/// assert_eq!(ranked[0].ticket.id, "late");
/// assert_eq!(ranked[1].ticket.id, "relaxed");
/// ```
#[derive(Debug, Clone)]
pub struct QueueRanker<L, C = SystemClock> {
    scorer: PriorityScorer<L, C>,
    parallel: bool,
}

impl<L: ComplexityLookup, C: Clock> QueueRanker<L, C> {
    /// Creates a ranker around `scorer`. Parallel scoring is on when the
    /// `parallel` feature is enabled.
    pub fn new(scorer: PriorityScorer<L, C>) -> Self {
        Self {
            scorer,
            parallel: cfg!(feature = "parallel"),
        }
    }

    /// Enables or disables parallel scoring of large batches.
    ///
    /// Has no effect without the `parallel` feature. Output is identical
    /// either way.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the underlying scorer.
    pub fn scorer(&self) -> &PriorityScorer<L, C> {
        &self.scorer
    }

    /// Scores every ticket and returns annotated copies, most urgent first.
    ///
    /// `tickets` is not modified.
    #[instrument(skip(self, tickets), fields(count = tickets.len(), kitchen_load = kitchen_load.0))]
    pub fn sort_tickets_by_priority(
        &self,
        tickets: &[Ticket],
        kitchen_load: KitchenLoad,
    ) -> Vec<PrioritizedTicket> {
        let scores = self.score_all(tickets, kitchen_load, self.scorer.clock().now());

        let mut ranked: Vec<PrioritizedTicket> = tickets
            .iter()
            .cloned()
            .zip(scores)
            .map(|(ticket, priority)| PrioritizedTicket::new(ticket, priority))
            .collect();

        // Vec::sort_by is stable: equal scores keep their input order.
        ranked.sort_by(|a, b| b.priority.score.cmp(&a.priority.score));

        if let Some(top) = ranked.first() {
            debug!(
                top_ticket = %top.ticket.id,
                top_score = top.priority.score,
                "ranked queue"
            );
        }
        ranked
    }

    /// Returns indices into `tickets`, most urgent first.
    ///
    /// Same ordering as [`sort_tickets_by_priority`](Self::sort_tickets_by_priority)
    /// without cloning tickets.
    pub fn rank_indices(&self, tickets: &[Ticket], kitchen_load: KitchenLoad) -> Vec<usize> {
        let scores = self.score_all(tickets, kitchen_load, self.scorer.clock().now());
        let mut indices: Vec<usize> = (0..tickets.len()).collect();
        indices.sort_by(|&a, &b| scores[b].score.cmp(&scores[a].score));
        indices
    }

    /// Ranks the store's active tickets.
    pub fn rank_store(
        &self,
        store: &dyn TicketStore,
        kitchen_load: KitchenLoad,
    ) -> Vec<PrioritizedTicket> {
        let tickets = store.active_tickets();
        self.sort_tickets_by_priority(&tickets, kitchen_load)
    }

    fn score_all(
        &self,
        tickets: &[Ticket],
        kitchen_load: KitchenLoad,
        now: DateTime<Utc>,
    ) -> Vec<PriorityScore> {
        #[cfg(feature = "parallel")]
        if self.parallel && tickets.len() >= PARALLEL_MIN_BATCH {
            return tickets
                .par_iter()
                .map(|ticket| self.scorer.score_at(ticket, kitchen_load, now))
                .collect();
        }

        tickets
            .iter()
            .map(|ticket| self.scorer.score_at(ticket, kitchen_load, now))
            .collect()
    }
}
