//! Storage adapter between the session and the SQLite file.
//!
//! # Responsibility
//! - Ensure the persisted table exists (`initialize`).
//! - Load the full collection at startup (`load`).
//! - Overwrite the full collection on exit (`save`).
//!
//! # Invariants
//! - Each call opens its own connection and drops it before returning.
//! - `save` is the only mutating call; it replaces every persisted row.
//! - Only counts and status are logged, never book contents.

use crate::db::open_db;
use crate::model::book::Book;
use crate::repo::book_repo::{BookRepository, RepoError, SqliteBookRepository};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage adapter call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    Initialize,
    Load,
    Save,
}

impl StoreOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::Load => "load",
            Self::Save => "save",
        }
    }
}

/// Persisted medium is unreachable or holds malformed data.
#[derive(Debug)]
pub struct StoreError {
    operation: StoreOperation,
    cause: RepoError,
}

impl StoreError {
    pub fn new(operation: StoreOperation, cause: impl Into<RepoError>) -> Self {
        Self {
            operation,
            cause: cause.into(),
        }
    }

    pub fn operation(&self) -> StoreOperation {
        self.operation
    }

    pub fn cause(&self) -> &RepoError {
        &self.cause
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "library {} failed: {}", self.operation.as_str(), self.cause)
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.cause)
    }
}

/// Whole-collection persistence boundary.
pub trait LibraryStorage {
    /// Ensures the persisted table exists. Safe to call on every startup.
    fn initialize(&self) -> StoreResult<()>;
    /// Returns every persisted book. Order is not guaranteed.
    fn load(&self) -> StoreResult<Vec<Book>>;
    /// Replaces all persisted books with `books`. Returns rows written.
    fn save(&self, books: &[Book]) -> StoreResult<usize>;
}

/// SQLite file-backed storage adapter.
#[derive(Debug, Clone)]
pub struct SqliteLibraryStore {
    db_path: PathBuf,
}

impl SqliteLibraryStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    fn run<T>(
        &self,
        operation: StoreOperation,
        call: impl FnOnce(&mut SqliteBookRepository<'_>) -> Result<T, RepoError>,
    ) -> StoreResult<T> {
        let started_at = Instant::now();
        let result = open_db(&self.db_path)
            .map_err(RepoError::from)
            .and_then(|mut conn| {
                let mut repo = SqliteBookRepository::try_new(&mut conn)?;
                call(&mut repo)
            });

        match result {
            Ok(value) => Ok(value),
            Err(err) => {
                error!(
                    "event=store_{} module=store status=error duration_ms={} error={}",
                    operation.as_str(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(StoreError::new(operation, err))
            }
        }
    }
}

impl LibraryStorage for SqliteLibraryStore {
    fn initialize(&self) -> StoreResult<()> {
        let started_at = Instant::now();
        self.run(StoreOperation::Initialize, |_| Ok(()))?;
        info!(
            "event=store_initialize module=store status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn load(&self) -> StoreResult<Vec<Book>> {
        let started_at = Instant::now();
        let books = self.run(StoreOperation::Load, |repo| repo.list_books())?;
        info!(
            "event=store_load module=store status=ok count={} duration_ms={}",
            books.len(),
            started_at.elapsed().as_millis()
        );
        Ok(books)
    }

    fn save(&self, books: &[Book]) -> StoreResult<usize> {
        let started_at = Instant::now();
        let written = self.run(StoreOperation::Save, |repo| repo.replace_all(books))?;
        info!(
            "event=store_save module=store status=ok count={} duration_ms={}",
            written,
            started_at.elapsed().as_millis()
        );
        Ok(written)
    }
}
