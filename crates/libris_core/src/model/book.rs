//! Book domain model.
//!
//! # Responsibility
//! - Define the single record type managed by the library.
//! - Validate user-provided fields at construction time.
//! - Parse raw prompt input (year, yes/no) into typed values.
//!
//! # Invariants
//! - `Book::new` never returns a book with blank title/author/genre.
//! - `Book::new` never returns a year outside `[MIN_PUBLICATION_YEAR, current_year]`.
//! - Books read back from storage are not re-validated.

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Oldest publication year accepted for new books.
pub const MIN_PUBLICATION_YEAR: i32 = 1800;

/// Text fields that must be non-empty on a new book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Title,
    Author,
    Genre,
}

impl BookField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Genre => "genre",
        }
    }
}

/// Construction-time validation failure for book input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    /// Field is empty after trimming surrounding whitespace.
    EmptyField(BookField),
    /// Year input is not an integer.
    InvalidYearFormat(String),
    /// Year is outside the inclusive accepted range.
    YearOutOfRange { year: i32, min: i32, max: i32 },
    /// Answer is not one of `yes|y|no|n`.
    InvalidYesNo(String),
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{} cannot be empty", field.as_str()),
            Self::InvalidYearFormat(value) => write!(f, "invalid year format `{value}`"),
            Self::YearOutOfRange { year, min, max } => {
                write!(f, "year {year} must be between {min} and {max}")
            }
            Self::InvalidYesNo(value) => write!(f, "expected yes/no, got `{value}`"),
        }
    }
}

impl Error for BookValidationError {}

/// One entry of the personal library.
///
/// Two books with the same attributes are equal but still count as two
/// separate entries in a [`crate::Library`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub genre: String,
    pub read_status: bool,
}

impl Book {
    /// Validates input against the current calendar year and builds a book.
    ///
    /// Text fields are stored trimmed.
    ///
    /// # Errors
    /// - `EmptyField` when title, author or genre is blank.
    /// - `YearOutOfRange` when the year is outside `[1800, current_year]`.
    pub fn new(
        title: &str,
        author: &str,
        publication_year: i32,
        genre: &str,
        read_status: bool,
    ) -> Result<Self, BookValidationError> {
        Self::new_as_of(
            title,
            author,
            publication_year,
            genre,
            read_status,
            current_year(),
        )
    }

    /// Same as [`Book::new`] with an explicit upper bound for the year.
    pub fn new_as_of(
        title: &str,
        author: &str,
        publication_year: i32,
        genre: &str,
        read_status: bool,
        current_year: i32,
    ) -> Result<Self, BookValidationError> {
        let title = require_text(title, BookField::Title)?;
        let author = require_text(author, BookField::Author)?;
        check_year(publication_year, current_year)?;
        let genre = require_text(genre, BookField::Genre)?;

        Ok(Self {
            title,
            author,
            publication_year,
            genre,
            read_status,
        })
    }

    /// Display label for `read_status`.
    pub fn status_label(&self) -> &'static str {
        if self.read_status {
            "Read"
        } else {
            "Unread"
        }
    }
}

/// Returns the local calendar year.
pub fn current_year() -> i32 {
    Local::now().year()
}

/// Trims and checks one required text field.
pub fn require_text(value: &str, field: BookField) -> Result<String, BookValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BookValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

/// Parses a year typed by the user and checks the accepted range.
pub fn parse_publication_year(input: &str, current_year: i32) -> Result<i32, BookValidationError> {
    let trimmed = input.trim();
    let year = trimmed
        .parse::<i32>()
        .map_err(|_| BookValidationError::InvalidYearFormat(trimmed.to_string()))?;
    check_year(year, current_year)?;
    Ok(year)
}

/// Resolves `yes|y|no|n` (any case) to a boolean.
pub fn parse_yes_no(input: &str) -> Result<bool, BookValidationError> {
    match input.trim().to_lowercase().as_str() {
        "yes" | "y" => Ok(true),
        "no" | "n" => Ok(false),
        other => Err(BookValidationError::InvalidYesNo(other.to_string())),
    }
}

fn check_year(year: i32, current_year: i32) -> Result<(), BookValidationError> {
    if (MIN_PUBLICATION_YEAR..=current_year).contains(&year) {
        return Ok(());
    }
    Err(BookValidationError::YearOutOfRange {
        year,
        min: MIN_PUBLICATION_YEAR,
        max: current_year,
    })
}
