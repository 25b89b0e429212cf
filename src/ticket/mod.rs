//! Kitchen tickets as read by the prioritizer.
//!
//! Tickets are owned by the external order/kitchen system. This crate only
//! reads them; ranking returns annotated copies and never mutates the
//! caller's values.

mod types;

pub use types::{LineItem, Ticket};
