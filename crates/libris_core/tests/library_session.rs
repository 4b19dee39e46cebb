use libris_core::{
    Book, LibrarySession, LibraryStorage, RemovalError, SearchField, Selection, SortKey,
    SqliteLibraryStore, StoreError, StoreOperation, StoreResult,
};
use std::cell::{Cell, RefCell};

fn book(title: &str, author: &str, year: i32, genre: &str, read: bool) -> Book {
    Book::new_as_of(title, author, year, genre, read, 2026).unwrap()
}

/// In-memory storage that counts calls.
#[derive(Default)]
struct RecordingStorage {
    rows: RefCell<Vec<Book>>,
    initialize_calls: Cell<usize>,
    save_calls: Cell<usize>,
}

impl LibraryStorage for &RecordingStorage {
    fn initialize(&self) -> StoreResult<()> {
        self.initialize_calls.set(self.initialize_calls.get() + 1);
        Ok(())
    }

    fn load(&self) -> StoreResult<Vec<Book>> {
        Ok(self.rows.borrow().clone())
    }

    fn save(&self, books: &[Book]) -> StoreResult<usize> {
        self.save_calls.set(self.save_calls.get() + 1);
        *self.rows.borrow_mut() = books.to_vec();
        Ok(books.len())
    }
}

#[test]
fn open_initializes_and_loads_then_close_saves_once() {
    let storage = RecordingStorage::default();
    storage
        .rows
        .borrow_mut()
        .push(book("Dune", "Herbert", 1965, "Sci-Fi", true));

    let mut session = LibrarySession::open(&storage).unwrap();
    assert_eq!(storage.initialize_calls.get(), 1);
    assert_eq!(session.library().len(), 1);

    session.add_book(book("Emma", "Austen", 1815, "Classic", false));
    assert_eq!(storage.save_calls.get(), 0);

    assert_eq!(session.close().unwrap(), 2);
    assert_eq!(storage.save_calls.get(), 1);
    assert_eq!(storage.rows.borrow().len(), 2);
}

#[test]
fn removal_with_no_match_leaves_collection_unchanged() {
    let storage = RecordingStorage::default();
    let mut session = LibrarySession::open(&storage).unwrap();
    session.add_book(book("Dune", "Herbert", 1965, "Sci-Fi", true));

    let err = session.removal_candidates("neuromancer").unwrap_err();
    assert!(matches!(err, RemovalError::NotFound { .. }));
    assert_eq!(session.library().len(), 1);
}

#[test]
fn removal_protocol_removes_only_the_picked_instance() {
    let storage = RecordingStorage::default();
    let mut session = LibrarySession::open(&storage).unwrap();
    let twin = book("Dune", "Herbert", 1965, "Sci-Fi", true);
    session.add_book(twin.clone());
    session.add_book(book("Dune Messiah", "Herbert", 1969, "Sci-Fi", false));
    session.add_book(twin.clone());

    let candidates = session.removal_candidates("dune").unwrap();
    assert_eq!(candidates.len(), 3);

    let Selection::Pick(index) = candidates.parse_selection("3").unwrap() else {
        panic!("expected a pick");
    };
    let picked = candidates.get(index).unwrap().clone();
    assert_eq!(session.remove_book(&picked), Some(twin.clone()));

    let titles = session
        .library()
        .iter()
        .map(|b| b.title.as_str())
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["Dune Messiah", "Dune"]);
}

#[test]
fn listing_and_search_do_not_mutate() {
    let storage = RecordingStorage::default();
    let mut session = LibrarySession::open(&storage).unwrap();
    session.add_book(book("B", "Zed", 2000, "G", true));
    session.add_book(book("A", "Amy", 2010, "G", false));

    let listing = session.listing(SortKey::Title, None);
    assert_eq!(listing[0].title, "A");
    assert_eq!(session.search(SearchField::Author, "zed").len(), 1);
    assert_eq!(session.library().books()[0].title, "B");
    assert_eq!(session.statistics().total, 2);
}

#[test]
fn sqlite_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.db");

    let mut first = LibrarySession::open(SqliteLibraryStore::new(&path)).unwrap();
    first.add_book(book("Dune", "Herbert", 1965, "Sci-Fi", true));
    first.add_book(book("Dune Messiah", "Herbert", 1969, "Sci-Fi", false));
    first.close().unwrap();

    let second = LibrarySession::open(SqliteLibraryStore::new(&path)).unwrap();
    assert_eq!(second.library().len(), 2);
    assert_eq!(second.statistics().read_percentage, Some(50.0));
}

struct FailingSave;

impl LibraryStorage for FailingSave {
    fn initialize(&self) -> StoreResult<()> {
        Ok(())
    }

    fn load(&self) -> StoreResult<Vec<Book>> {
        Ok(Vec::new())
    }

    fn save(&self, _books: &[Book]) -> StoreResult<usize> {
        Err(StoreError::new(
            StoreOperation::Save,
            libris_core::RepoError::InvalidData("disk full".to_string()),
        ))
    }
}

#[test]
fn close_surfaces_save_failure() {
    let mut session = LibrarySession::open(FailingSave).unwrap();
    session.add_book(book("Dune", "Herbert", 1965, "Sci-Fi", true));

    let err = session.close().unwrap_err();
    assert_eq!(err.operation(), StoreOperation::Save);
}
