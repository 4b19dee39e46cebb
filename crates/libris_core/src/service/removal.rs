//! Removal protocol: search, pick, confirm, remove.
//!
//! # Responsibility
//! - Resolve a title search into an explicit candidate list.
//! - Turn a numbered pick into exactly one candidate, or a cancel.
//!
//! # Invariants
//! - Nothing here mutates the library except [`remove_selected`].
//! - A zero-match search is reported as `NotFound` and changes nothing.

use crate::model::book::Book;
use crate::model::library::{Library, SearchField};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalError {
    /// No title contains the search term.
    NotFound { term: String },
    /// Pick is not a number in `0..=len`.
    InvalidSelection { input: String, len: usize },
}

impl Display for RemovalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { term } => write!(f, "no matching books found for `{term}`"),
            Self::InvalidSelection { input, len } => {
                write!(f, "invalid selection `{input}`; expected 0..={len}")
            }
        }
    }
}

impl Error for RemovalError {}

/// Outcome of a numbered pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Cancel,
    /// Zero-based index into the candidate list.
    Pick(usize),
}

/// Books matching a removal search, in collection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalCandidates {
    books: Vec<Book>,
}

impl RemovalCandidates {
    /// Searches titles for `term` (trimmed, case-insensitive).
    ///
    /// # Errors
    /// - `NotFound` when no title matches.
    pub fn search(library: &Library, term: &str) -> Result<Self, RemovalError> {
        let term = term.trim().to_lowercase();
        let books = library
            .find_by_substring(SearchField::Title, &term)
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();

        if books.is_empty() {
            return Err(RemovalError::NotFound { term });
        }

        Ok(Self { books })
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Parses a 1-based pick; `0` cancels.
    pub fn parse_selection(&self, input: &str) -> Result<Selection, RemovalError> {
        let trimmed = input.trim();
        let invalid = || RemovalError::InvalidSelection {
            input: trimmed.to_string(),
            len: self.books.len(),
        };

        let number = trimmed.parse::<usize>().map_err(|_| invalid())?;
        match number {
            0 => Ok(Selection::Cancel),
            n if n <= self.books.len() => Ok(Selection::Pick(n - 1)),
            _ => Err(invalid()),
        }
    }

    /// Returns the candidate for a zero-based pick.
    pub fn get(&self, index: usize) -> Option<&Book> {
        self.books.get(index)
    }
}

/// Removes one instance of the picked candidate from `library`.
pub fn remove_selected(library: &mut Library, selected: &Book) -> Option<Book> {
    library.remove(selected)
}

#[cfg(test)]
mod tests {
    use super::{remove_selected, RemovalCandidates, RemovalError, Selection};
    use crate::model::book::Book;
    use crate::model::library::Library;

    fn library() -> Library {
        let mut library = Library::new();
        for title in ["The Hobbit", "The Silmarillion", "Beowulf"] {
            let book = Book::new_as_of(title, "Tolkien", 1937, "Fantasy", true, 2026);
            library.add(book.expect("valid book"));
        }
        library
    }

    #[test]
    fn zero_matches_reports_not_found_without_changes() {
        let library = library();
        let err = RemovalCandidates::search(&library, "  Dune ").expect_err("no match expected");
        assert!(matches!(&err, RemovalError::NotFound { term } if term == "dune"));
        assert_eq!(library.len(), 3);
    }

    #[test]
    fn selection_parses_cancel_pick_and_rejects_out_of_range() {
        let library = library();
        let candidates = RemovalCandidates::search(&library, "THE").expect("two matches");
        assert_eq!(candidates.len(), 2);

        assert_eq!(candidates.parse_selection("0"), Ok(Selection::Cancel));
        assert_eq!(candidates.parse_selection(" 2 "), Ok(Selection::Pick(1)));
        assert!(matches!(
            candidates.parse_selection("3"),
            Err(RemovalError::InvalidSelection { len: 2, .. })
        ));
        assert!(candidates.parse_selection("two").is_err());
        assert!(candidates.parse_selection("-1").is_err());
    }

    #[test]
    fn remove_selected_drops_the_chosen_candidate() {
        let mut library = library();
        let candidates = RemovalCandidates::search(&library, "the").expect("matches");
        let picked = candidates.get(1).expect("second candidate").clone();

        let removed = remove_selected(&mut library, &picked).expect("removed");
        assert_eq!(removed.title, "The Silmarillion");
        assert_eq!(library.len(), 2);
        assert!(library.iter().all(|book| book.title != "The Silmarillion"));
    }
}
