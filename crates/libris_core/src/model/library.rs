//! In-memory book collection for one session.
//!
//! # Responsibility
//! - Hold books in insertion order.
//! - Provide append, substring lookup and single-instance removal.
//!
//! # Invariants
//! - Order only changes through `add` (append) and `remove`.
//! - `remove` drops at most one book per call.

use crate::model::book::Book;

/// Field used by substring lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Author,
}

impl SearchField {
    fn value(self, book: &Book) -> &str {
        match self {
            Self::Title => &book.title,
            Self::Author => &book.author,
        }
    }
}

/// Ordered collection of books owned by a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    books: Vec<Book>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a validated book at the end.
    pub fn add(&mut self, book: Book) {
        self.books.push(book);
    }

    /// Returns books whose `field` contains `term`, ignoring case.
    ///
    /// An empty term matches every book. Result follows collection order.
    pub fn find_by_substring(&self, field: SearchField, term: &str) -> Vec<&Book> {
        let needle = term.to_lowercase();
        self.books
            .iter()
            .filter(|book| field.value(book).to_lowercase().contains(&needle))
            .collect()
    }

    /// Removes the first book equal to `book`.
    ///
    /// Returns the removed book, or `None` when nothing matched.
    pub fn remove(&mut self, book: &Book) -> Option<Book> {
        let position = self.books.iter().position(|candidate| candidate == book)?;
        Some(self.books.remove(position))
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Book> {
        self.books.iter()
    }
}

impl From<Vec<Book>> for Library {
    fn from(books: Vec<Book>) -> Self {
        Self { books }
    }
}

impl<'a> IntoIterator for &'a Library {
    type Item = &'a Book;
    type IntoIter = std::slice::Iter<'a, Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{Library, SearchField};
    use crate::model::book::Book;

    fn book(title: &str, author: &str) -> Book {
        Book::new_as_of(title, author, 1990, "Fiction", false, 2026).expect("valid book")
    }

    #[test]
    fn remove_drops_only_first_equal_instance() {
        let twin = book("Twin", "Same");
        let mut library = Library::from(vec![twin.clone(), book("Other", "X"), twin.clone()]);

        let removed = library.remove(&twin).expect("twin should be removed");
        assert_eq!(removed, twin);
        assert_eq!(library.len(), 2);
        assert_eq!(library.books()[0].title, "Other");
        assert_eq!(library.books()[1], twin);
    }

    #[test]
    fn remove_missing_book_returns_none() {
        let mut library = Library::from(vec![book("Kept", "A")]);
        assert!(library.remove(&book("Missing", "B")).is_none());
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn find_by_author_is_case_insensitive() {
        let library = Library::from(vec![
            book("Emma", "Jane Austen"),
            book("Ulysses", "James Joyce"),
        ]);

        let hits = library.find_by_substring(SearchField::Author, "AUSTEN");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Emma");
    }

    #[test]
    fn empty_term_matches_everything() {
        let library = Library::from(vec![book("A", "x"), book("B", "y")]);
        assert_eq!(library.find_by_substring(SearchField::Title, "").len(), 2);
    }
}
