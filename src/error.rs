//! Error types.

use thiserror::Error;

/// Errors raised at the edges of the prioritizer.
///
/// Scoring and ranking themselves are infallible: a [`Ticket`](crate::ticket::Ticket)
/// value always carries every field the scorer reads. Errors only arise
/// when decoding external ticket records or validating a configuration.
#[derive(Debug, Error)]
pub enum PrioritizerError {
    /// A ticket record is missing a required field or has an ill-typed one.
    #[error("invalid ticket: {reason}")]
    InvalidTicket { reason: String },

    /// A scoring or bottleneck configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, PrioritizerError>;
