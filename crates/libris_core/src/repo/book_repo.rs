//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Read every persisted book row.
//! - Replace the whole `books` table with a given sequence.
//!
//! # Invariants
//! - Read paths reject malformed `read_status` values instead of masking them.
//! - `replace_all` deletes and re-inserts inside one transaction.
//! - Row ids never leave this module.

use crate::db::schema::{user_version, SCHEMA_VERSION};
use crate::db::DbError;
use crate::model::book::Book;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOOKS_TABLE: &str = "books";
const REQUIRED_BOOK_COLUMNS: &[&str] = &[
    "id",
    "title",
    "author",
    "publication_year",
    "genre",
    "read_status",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for book persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
    /// Connection was not opened through `db::open_db*`.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted book data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is not initialized (expected {expected_version})"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for whole-table book persistence.
pub trait BookRepository {
    /// Returns every persisted book in row-id order.
    fn list_books(&self) -> RepoResult<Vec<Book>>;
    /// Deletes all rows, then inserts `books` in order. Returns rows written.
    fn replace_all(&mut self, books: &[Book]) -> RepoResult<usize>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Constructs a repository from a connection with the books schema applied.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn list_books(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(
            "SELECT title, author, publication_year, genre, read_status
             FROM books
             ORDER BY id ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }

        Ok(books)
    }

    fn replace_all(&mut self, books: &[Book]) -> RepoResult<usize> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM books;", [])?;

        {
            let mut insert = tx.prepare(
                "INSERT INTO books (title, author, publication_year, genre, read_status)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
            )?;
            for book in books {
                insert.execute(params![
                    book.title.as_str(),
                    book.author.as_str(),
                    book.publication_year,
                    book.genre.as_str(),
                    bool_to_int(book.read_status),
                ])?;
            }
        }

        tx.commit()?;
        Ok(books.len())
    }
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let read_status = match row.get::<_, i64>("read_status")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid read_status value `{other}` in books.read_status"
            )));
        }
    };

    Ok(Book {
        title: row.get("title")?,
        author: row.get("author")?,
        publication_year: row.get("publication_year")?,
        genre: row.get("genre")?,
        read_status,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version = user_version(conn)?;
    if actual_version < SCHEMA_VERSION {
        return Err(RepoError::UninitializedConnection {
            expected_version: SCHEMA_VERSION,
            actual_version,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [BOOKS_TABLE],
        |row| row.get(0),
    )?;
    if table_exists == 0 {
        return Err(RepoError::MissingRequiredTable(BOOKS_TABLE));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([BOOKS_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    for &column in REQUIRED_BOOK_COLUMNS {
        if !columns.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: BOOKS_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
