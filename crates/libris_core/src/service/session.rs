//! Session-scoped owner of the in-memory library.
//!
//! # Responsibility
//! - Load the collection once at open and save it once at close.
//! - Route add/search/list/stats/remove calls to the collection and queries.
//!
//! # Invariants
//! - `close` consumes the session, so a session saves at most once.
//! - Storage is only touched by `open` and `close`.

use crate::model::book::Book;
use crate::model::library::{Library, SearchField};
use crate::query::sort::{sort_books, SortDirection, SortKey};
use crate::query::stats::{statistics, LibraryStatistics};
use crate::service::removal::{remove_selected, RemovalCandidates, RemovalError};
use crate::store::{LibraryStorage, StoreResult};
use log::info;

/// One interactive session over a storage backend.
pub struct LibrarySession<S: LibraryStorage> {
    storage: S,
    library: Library,
}

impl<S: LibraryStorage> LibrarySession<S> {
    /// Initializes storage and loads every persisted book.
    ///
    /// # Errors
    /// - Returns the storage error from `initialize` or `load`; the session
    ///   cannot run without a usable store.
    pub fn open(storage: S) -> StoreResult<Self> {
        storage.initialize()?;
        let library = Library::from(storage.load()?);
        info!(
            "event=session_open module=session status=ok count={}",
            library.len()
        );
        Ok(Self { storage, library })
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Appends a validated book.
    pub fn add_book(&mut self, book: Book) {
        self.library.add(book);
        info!(
            "event=book_add module=session status=ok count={}",
            self.library.len()
        );
    }

    pub fn search(&self, field: SearchField, term: &str) -> Vec<&Book> {
        self.library.find_by_substring(field, term)
    }

    /// Display ordering; never changes collection order.
    pub fn listing(&self, key: SortKey, direction: Option<SortDirection>) -> Vec<Book> {
        sort_books(&self.library, key, direction)
    }

    pub fn statistics(&self) -> LibraryStatistics {
        statistics(&self.library)
    }

    /// First step of the removal protocol.
    pub fn removal_candidates(&self, term: &str) -> Result<RemovalCandidates, RemovalError> {
        RemovalCandidates::search(&self.library, term)
    }

    /// Removes one instance of a confirmed candidate.
    pub fn remove_book(&mut self, selected: &Book) -> Option<Book> {
        let removed = remove_selected(&mut self.library, selected);
        if removed.is_some() {
            info!(
                "event=book_remove module=session status=ok count={}",
                self.library.len()
            );
        }
        removed
    }

    /// Saves the whole collection and ends the session.
    pub fn close(self) -> StoreResult<usize> {
        let written = self.storage.save(self.library.books())?;
        info!("event=session_close module=session status=ok count={written}");
        Ok(written)
    }
}
