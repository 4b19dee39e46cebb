//! Display ordering for book listings.
//!
//! # Invariants
//! - Sorting returns a new vector; the source slice is untouched.
//! - Sorting is stable in both directions.

use crate::model::book::Book;
use std::cmp::Ordering;

/// Attribute used to order a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Author,
    PublicationYear,
    Genre,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortKey {
    /// Newest-first for years, A-Z for text keys.
    pub fn default_direction(self) -> SortDirection {
        match self {
            Self::PublicationYear => SortDirection::Descending,
            Self::Title | Self::Author | Self::Genre => SortDirection::Ascending,
        }
    }

    /// Maps the listing sub-menu answer to a key.
    ///
    /// Blank and unknown answers fall back to `Title`.
    pub fn from_menu_choice(choice: &str) -> Self {
        match choice.trim() {
            "2" => Self::Author,
            "3" => Self::PublicationYear,
            "4" => Self::Genre,
            _ => Self::Title,
        }
    }

    fn compare(self, left: &Book, right: &Book) -> Ordering {
        match self {
            Self::Title => left.title.cmp(&right.title),
            Self::Author => left.author.cmp(&right.author),
            Self::PublicationYear => left.publication_year.cmp(&right.publication_year),
            Self::Genre => left.genre.cmp(&right.genre),
        }
    }
}

/// Returns `books` ordered by `key`.
///
/// `direction = None` uses [`SortKey::default_direction`]. Text keys compare
/// lexicographically and case-sensitively.
pub fn sort_books<'a>(
    books: impl IntoIterator<Item = &'a Book>,
    key: SortKey,
    direction: Option<SortDirection>,
) -> Vec<Book> {
    let mut sorted = books.into_iter().cloned().collect::<Vec<_>>();
    match direction.unwrap_or_else(|| key.default_direction()) {
        SortDirection::Ascending => sorted.sort_by(|a, b| key.compare(a, b)),
        SortDirection::Descending => sorted.sort_by(|a, b| key.compare(b, a)),
    }
    sorted
}
