//! Kitchen work-queue ranking.
//!
//! [`QueueRanker`] scores a batch of tickets against one kitchen-load
//! snapshot and returns them most urgent first. Ties keep their original
//! relative order: the sort is stable.
//!
//! Two consumers of a ranked queue live here as well:
//!
//! - [`UrgencyBands`] groups the queue by level for display.
//! - [`detect_bottlenecks`] flags stations carrying too many pressured
//!   tickets, reading only the per-factor breakdown.

mod bands;
mod bottleneck;
mod ranker;
mod types;

pub use bands::UrgencyBands;
pub use bottleneck::{detect_bottlenecks, BottleneckConfig, StationBottleneck};
pub use ranker::QueueRanker;
pub use types::PrioritizedTicket;
