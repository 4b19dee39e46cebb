//! Core use-case services.
//!
//! # Responsibility
//! - Own the collection for the length of one session.
//! - Keep the CLI decoupled from storage and query details.

pub mod removal;
pub mod session;
