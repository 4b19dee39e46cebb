//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for the `books` table.
//! - Isolate SQLite query details from the storage adapter and services.
//!
//! # Invariants
//! - Repositories only accept connections whose schema is in place.

pub mod book_repo;
