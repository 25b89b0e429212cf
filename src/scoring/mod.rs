//! Ticket urgency scoring.
//!
//! Combines three factors into a single 0–100 urgency score:
//!
//! - **Time to promise** (weight 0.4): step function over minutes until
//!   the promised ready time; late tickets saturate at 100.
//! - **Complexity** (weight 0.3): quantity-weighted menu complexity plus
//!   item and modifier counts, each term capped independently.
//! - **Coordination** (weight 0.3): 25 points per assigned station.
//!
//! The weighted sum is scaled by a kitchen-load multiplier in
//! `[1.0, 1.5]` for loads in `[0, 100]`, rounded, and clamped to 100.

mod config;
mod factors;
mod scorer;
mod types;

pub use config::{ScoringConfig, TimeStep};
pub use factors::{Complexity, Coordination, TimeToPromise};
pub use scorer::PriorityScorer;
pub use types::{
    KitchenLoad, PriorityFactor, PriorityFactors, PriorityLevel, PriorityScore, TicketMetrics,
};
