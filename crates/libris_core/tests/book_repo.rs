use libris_core::db::open_db_in_memory;
use libris_core::db::schema::SCHEMA_VERSION;
use libris_core::{Book, BookRepository, RepoError, SqliteBookRepository};
use rusqlite::Connection;

fn book(title: &str, author: &str, year: i32, genre: &str, read: bool) -> Book {
    Book::new_as_of(title, author, year, genre, read, 2026).unwrap()
}

#[test]
fn replace_all_then_list_roundtrip_keeps_order() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteBookRepository::try_new(&mut conn).unwrap();

    let books = vec![
        book("Dune", "Herbert", 1965, "Sci-Fi", true),
        book("Emma", "Austen", 1815, "Classic", false),
    ];
    assert_eq!(repo.replace_all(&books).unwrap(), 2);

    assert_eq!(repo.list_books().unwrap(), books);
}

#[test]
fn replace_all_overwrites_previous_rows() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteBookRepository::try_new(&mut conn).unwrap();

    repo.replace_all(&[book("Old", "A", 1900, "G", false)]).unwrap();
    repo.replace_all(&[book("New", "B", 2000, "H", true)]).unwrap();

    let loaded = repo.list_books().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].title, "New");

    repo.replace_all(&[]).unwrap();
    assert!(repo.list_books().unwrap().is_empty());
}

#[test]
fn duplicate_books_are_stored_as_separate_rows() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteBookRepository::try_new(&mut conn).unwrap();

    let twin = book("Twin", "Same", 1999, "Mystery", false);
    repo.replace_all(&[twin.clone(), twin.clone()]).unwrap();

    assert_eq!(repo.list_books().unwrap(), vec![twin.clone(), twin]);
}

#[test]
fn list_rejects_malformed_read_status() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO books (title, author, publication_year, genre, read_status)
         VALUES ('Bad', 'Row', 1999, 'X', 7);",
        [],
    )
    .unwrap();

    let repo = SqliteBookRepository::try_new(&mut conn).unwrap();
    let err = repo.list_books().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
    assert!(err.to_string().contains("read_status"));
}

#[test]
fn loaded_rows_are_not_revalidated() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO books (title, author, publication_year, genre, read_status)
         VALUES ('', 'Anon', 1500, '', 0);",
        [],
    )
    .unwrap();

    let repo = SqliteBookRepository::try_new(&mut conn).unwrap();
    let loaded = repo.list_books().unwrap();
    assert_eq!(loaded[0].publication_year, 1500);
    assert!(loaded[0].title.is_empty());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let mut conn = Connection::open_in_memory().unwrap();

    let result = SqliteBookRepository::try_new(&mut conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, SCHEMA_VERSION),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_books_table() {
    let mut conn = Connection::open_in_memory().unwrap();
    let stamp = format!("PRAGMA user_version = {SCHEMA_VERSION};");
    conn.execute_batch(&stamp).unwrap();

    let result = SqliteBookRepository::try_new(&mut conn);
    assert!(matches!(result, Err(RepoError::MissingRequiredTable("books"))));
}

#[test]
fn repository_rejects_books_table_missing_a_column() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            publication_year INTEGER NOT NULL,
            genre TEXT NOT NULL
        );",
    )
    .unwrap();
    let stamp = format!("PRAGMA user_version = {SCHEMA_VERSION};");
    conn.execute_batch(&stamp).unwrap();

    match SqliteBookRepository::try_new(&mut conn) {
        Err(RepoError::MissingRequiredColumn { table, column }) => {
            assert_eq!((table, column), ("books", "read_status"));
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected missing column error"),
    }
}
