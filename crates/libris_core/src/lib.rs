//! Core domain logic for the Libris personal library.
//! This crate is the single source of truth for book rules and persistence.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod store;

pub use config::LibraryConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{
    current_year, parse_publication_year, parse_yes_no, require_text, Book, BookField,
    BookValidationError, MIN_PUBLICATION_YEAR,
};
pub use model::library::{Library, SearchField};
pub use query::sort::{sort_books, SortDirection, SortKey};
pub use query::stats::{statistics, LibraryStatistics, ValueCount};
pub use repo::book_repo::{BookRepository, RepoError, RepoResult, SqliteBookRepository};
pub use service::removal::{remove_selected, RemovalCandidates, RemovalError, Selection};
pub use service::session::LibrarySession;
pub use store::{LibraryStorage, SqliteLibraryStore, StoreError, StoreOperation, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
