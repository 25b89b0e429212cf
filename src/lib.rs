//! Kitchen-ticket prioritization engine.
//!
//! Ranks in-flight kitchen tickets by urgency for a kitchen display:
//!
//! - **Scoring**: [`scoring::PriorityScorer`] blends time pressure, order
//!   complexity and cross-station coordination into a 0–100 score, scaled
//!   by current kitchen load, with a level and a readable explanation.
//! - **Ranking**: [`ranking::QueueRanker`] scores a batch against one
//!   load snapshot and orders it most urgent first, keeping ties stable.
//! - **Display helpers**: urgency bands and station bottleneck detection
//!   over a ranked queue.
//!
//! # Capabilities
//!
//! Everything the engine reads from outside is injected: menu complexity
//! through [`catalog::ComplexityLookup`], the current time through
//! [`clock::Clock`], and active tickets through [`store::TicketStore`].
//! Scoring is pure given those inputs and safe to share across threads.
//!
//! # Features
//!
//! - `parallel` (default): rayon scoring of large batches.
//! - `serde`: serde derives and JSON ticket decoding.
//! - `wasm`: wasm-bindgen bindings for browser front-ends.

pub mod catalog;
pub mod clock;
pub mod error;
pub mod ranking;
pub mod scoring;
pub mod store;
pub mod ticket;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{PrioritizerError, Result};
