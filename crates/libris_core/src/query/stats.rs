//! Aggregate statistics over the collection.
//!
//! # Invariants
//! - An empty input never divides by zero; the percentage is `None`.
//! - On equal counts the value seen first in iteration order wins.

use crate::model::book::Book;
use serde::Serialize;
use std::collections::HashMap;

/// A value and how many books carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Summary of one collection snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryStatistics {
    pub total: usize,
    pub read_count: usize,
    /// `100 * read_count / total`, absent for an empty collection.
    pub read_percentage: Option<f64>,
    pub top_genre: Option<ValueCount>,
    pub top_author: Option<ValueCount>,
}

/// Computes totals, read share and most frequent genre/author.
pub fn statistics<'a>(books: impl IntoIterator<Item = &'a Book>) -> LibraryStatistics {
    let books = books.into_iter().collect::<Vec<_>>();
    let total = books.len();
    let read_count = books.iter().filter(|book| book.read_status).count();
    let read_percentage = if total == 0 {
        None
    } else {
        Some(100.0 * read_count as f64 / total as f64)
    };

    LibraryStatistics {
        total,
        read_count,
        read_percentage,
        top_genre: most_frequent(books.iter().map(|book| book.genre.as_str())),
        top_author: most_frequent(books.iter().map(|book| book.author.as_str())),
    }
}

/// Returns the most frequent value; ties go to the first-seen value.
pub fn most_frequent<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<ValueCount> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for value in values {
        match slots.get(value) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }

    best.map(|(value, count)| ValueCount {
        value: value.to_string(),
        count,
    })
}

#[cfg(test)]
mod tests {
    use super::most_frequent;

    #[test]
    fn tie_goes_to_first_seen_value() {
        let top = most_frequent(["b", "a", "a", "b", "c"]).expect("non-empty input");
        assert_eq!(top.value, "b");
        assert_eq!(top.count, 2);
    }

    #[test]
    fn later_value_wins_only_with_strictly_higher_count() {
        let top = most_frequent(["x", "y", "y"]).expect("non-empty input");
        assert_eq!(top.value, "y");
        assert_eq!(top.count, 2);
    }

    #[test]
    fn empty_input_has_no_winner() {
        assert!(most_frequent(Vec::<&str>::new()).is_none());
    }
}
