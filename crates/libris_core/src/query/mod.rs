//! Read-only transforms over the collection.
//!
//! # Responsibility
//! - Produce display orderings without touching collection order.
//! - Summarize a collection into counts and most-frequent values.

pub mod sort;
pub mod stats;
