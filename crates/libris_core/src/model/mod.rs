//! Domain model for the personal library.
//!
//! # Responsibility
//! - Define the book record and its construction rules.
//! - Define the in-memory collection the session mutates.
//!
//! # Invariants
//! - Books carry no identity; equal attributes mean equal books.
//! - Collection order is insertion order.

pub mod book;
pub mod library;
