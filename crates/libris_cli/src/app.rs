//! Interactive menu loop over a [`LibrarySession`].
//!
//! Choice `6`, end of input or a terminal error ends the loop; the session
//! is then saved exactly once.

use crate::prompt::Prompter;
use crate::style::{BLUE, GREEN, RED, RESET, YELLOW};
use libris_core::{
    current_year, parse_publication_year, parse_yes_no, require_text, Book, BookField,
    LibrarySession, LibraryStorage, RemovalError, SearchField, Selection, SortKey, StoreError,
};
use log::{error, info, warn};
use std::io::{self, BufRead, ErrorKind, Write};

/// How the session ended.
#[derive(Debug)]
pub struct Outcome {
    /// Rows written by the exit save, or why it failed.
    pub save: Result<usize, StoreError>,
    /// Terminal error that ended the loop before choice `6`.
    pub io_error: Option<io::Error>,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.save.is_ok() && self.io_error.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Add,
    Remove,
    Search,
    Display,
    Statistics,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::Remove),
            "3" => Some(Self::Search),
            "4" => Some(Self::Display),
            "5" => Some(Self::Statistics),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Runs the menu until exit, then saves the session.
///
/// Any terminal error ends the loop early; the save still runs once.
pub fn run<S, R, W>(mut session: LibrarySession<S>, prompter: &mut Prompter<R, W>) -> Outcome
where
    S: LibraryStorage,
    R: BufRead,
    W: Write,
{
    let mut io_error = prompter
        .line(format!("\n{YELLOW}Welcome to your Personal Library Manager!{RESET}"))
        .err();

    while io_error.is_none() {
        match step(&mut session, prompter) {
            Ok(true) => continue,
            Ok(false) => break,
            Err(err) if err.kind() == ErrorKind::UnexpectedEof => {
                info!("event=input_closed module=cli status=ok");
                break;
            }
            Err(err) => {
                error!("event=input_failed module=cli status=error error={err}");
                io_error = Some(err);
            }
        }
    }

    finish(session, prompter, io_error)
}

fn step<S, R, W>(
    session: &mut LibrarySession<S>,
    prompter: &mut Prompter<R, W>,
) -> io::Result<bool>
where
    S: LibraryStorage,
    R: BufRead,
    W: Write,
{
    print_menu(prompter)?;
    let answer = prompter.ask(&format!("{BLUE}Enter your choice (1-6): {RESET}"))?;

    match MenuChoice::parse(&answer) {
        Some(MenuChoice::Add) => add_book(session, prompter)?,
        Some(MenuChoice::Remove) => remove_book(session, prompter)?,
        Some(MenuChoice::Search) => search_books(session, prompter)?,
        Some(MenuChoice::Display) => display_books(session, prompter)?,
        Some(MenuChoice::Statistics) => display_statistics(session, prompter)?,
        Some(MenuChoice::Exit) => return Ok(false),
        None => prompter.error("Invalid choice! Please enter 1-6")?,
    }
    Ok(true)
}

fn finish<S, R, W>(
    session: LibrarySession<S>,
    prompter: &mut Prompter<R, W>,
    mut io_error: Option<io::Error>,
) -> Outcome
where
    S: LibraryStorage,
    R: BufRead,
    W: Write,
{
    let save = session.close();
    if let Err(err) = report_save(&save, prompter) {
        io_error.get_or_insert(err);
    }
    Outcome { save, io_error }
}

fn report_save<R: BufRead, W: Write>(
    save: &Result<usize, StoreError>,
    prompter: &mut Prompter<R, W>,
) -> io::Result<()> {
    match save {
        Ok(_) => {
            prompter.line(format!("{GREEN}Library saved successfully!{RESET}"))?;
            prompter.line(format!("{YELLOW}Goodbye!{RESET}"))
        }
        Err(err) => {
            warn!("event=session_close module=cli status=error error={err}");
            prompter.error(format!("Warning: your changes were not saved ({err})"))
        }
    }
}

fn print_menu<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> io::Result<()> {
    prompter.line(format!("\n{YELLOW}Personal Library Manager{RESET}"))?;
    for (number, label) in [
        (1, "Add a book"),
        (2, "Remove a book"),
        (3, "Search for books"),
        (4, "Display all books"),
        (5, "Show statistics"),
        (6, "Exit"),
    ] {
        prompter.line(format!("{BLUE}{number}.{RESET} {label}"))?;
    }
    prompter.line("-------------------------")
}

fn add_book<S, R, W>(
    session: &mut LibrarySession<S>,
    prompter: &mut Prompter<R, W>,
) -> io::Result<()>
where
    S: LibraryStorage,
    R: BufRead,
    W: Write,
{
    prompter.line(format!("\n{YELLOW}Add New Book{RESET}"))?;
    let year_ceiling = current_year();

    let title = prompter.ask_until("Title: ", |v| require_text(v, BookField::Title))?;
    let author = prompter.ask_until("Author: ", |v| require_text(v, BookField::Author))?;
    let year = prompter.ask_until("Publication Year: ", |v| {
        parse_publication_year(v, year_ceiling)
    })?;
    let genre = prompter.ask_until("Genre: ", |v| require_text(v, BookField::Genre))?;
    let read_status = prompter.ask_until("Have you read this book? (yes/no): ", parse_yes_no)?;

    match Book::new_as_of(&title, &author, year, &genre, read_status, year_ceiling) {
        Ok(book) => {
            session.add_book(book);
            prompter.line(format!("{GREEN}Book added successfully!{RESET}"))
        }
        Err(err) => prompter.error(err),
    }
}

fn remove_book<S, R, W>(
    session: &mut LibrarySession<S>,
    prompter: &mut Prompter<R, W>,
) -> io::Result<()>
where
    S: LibraryStorage,
    R: BufRead,
    W: Write,
{
    prompter.line(format!("\n{YELLOW}Remove Book{RESET}"))?;
    let term = prompter.ask("Enter title to remove: ")?;

    let candidates = match session.removal_candidates(&term) {
        Ok(candidates) => candidates,
        Err(RemovalError::NotFound { .. }) => return prompter.error("No matching books found"),
        Err(err) => return prompter.error(err),
    };

    prompter.line(format!("\n{BLUE}Found {} matches:{RESET}", candidates.len()))?;
    for (number, book) in candidates.books().iter().enumerate() {
        prompter.line(format!(
            "{}. {} by {} ({}) - {}",
            number + 1,
            book.title,
            book.author,
            book.genre,
            book.status_label()
        ))?;
    }

    loop {
        let answer = prompter.ask("Enter number to remove (0 to cancel): ")?;
        let picked = match candidates.parse_selection(&answer) {
            Ok(Selection::Cancel) => {
                return prompter.line(format!("{YELLOW}Removal cancelled{RESET}"));
            }
            Ok(Selection::Pick(index)) => candidates.get(index),
            Err(_) => None,
        };
        let Some(picked) = picked else {
            prompter.error("Invalid selection!")?;
            continue;
        };

        let confirm = prompter.ask(&format!("Remove '{}'? (yes/no): ", picked.title))?;
        if parse_yes_no(&confirm).unwrap_or(false) && session.remove_book(picked).is_some() {
            return prompter.line(format!("{GREEN}Book removed successfully!{RESET}"));
        }
        return prompter.line(format!("{YELLOW}Removal cancelled{RESET}"));
    }
}

fn search_books<S, R, W>(
    session: &LibrarySession<S>,
    prompter: &mut Prompter<R, W>,
) -> io::Result<()>
where
    S: LibraryStorage,
    R: BufRead,
    W: Write,
{
    prompter.line(format!("\n{YELLOW}Search Options{RESET}"))?;
    prompter.line(format!("{BLUE}1.{RESET} Search by Title"))?;
    prompter.line(format!("{BLUE}2.{RESET} Search by Author"))?;

    let field = match prompter.ask("Choose search type: ")?.trim() {
        "1" => SearchField::Title,
        "2" => SearchField::Author,
        _ => return prompter.error("Invalid choice!"),
    };

    let term = prompter.ask("Enter search term: ")?;
    let results = session.search(field, &term);
    if results.is_empty() {
        return prompter.error("No matches found");
    }

    prompter.line(format!("\n{BLUE}Found {} matches:{RESET}", results.len()))?;
    for (number, book) in results.iter().enumerate() {
        prompter.line(format!(
            "{}. {} by {} ({})",
            number + 1,
            book.title,
            book.author,
            book.publication_year
        ))?;
        prompter.line(format!(
            "   Genre: {} | Status: {}",
            book.genre,
            book.status_label()
        ))?;
    }
    Ok(())
}

fn display_books<S, R, W>(
    session: &LibrarySession<S>,
    prompter: &mut Prompter<R, W>,
) -> io::Result<()>
where
    S: LibraryStorage,
    R: BufRead,
    W: Write,
{
    if session.library().is_empty() {
        return prompter.line(format!("{YELLOW}Your library is empty{RESET}"));
    }

    prompter.line(format!("\n{YELLOW}Sort Options{RESET}"))?;
    prompter.line(format!("{BLUE}1.{RESET} Title (A-Z)"))?;
    prompter.line(format!("{BLUE}2.{RESET} Author (A-Z)"))?;
    prompter.line(format!("{BLUE}3.{RESET} Year (Newest)"))?;
    prompter.line(format!("{BLUE}4.{RESET} Genre (A-Z)"))?;
    let key = SortKey::from_menu_choice(&prompter.ask("Choose sort method: ")?);

    let books = session.listing(key, None);
    prompter.line(format!("\n{BLUE}Your Library ({} books):{RESET}", books.len()))?;
    for (number, book) in books.iter().enumerate() {
        let status_color = if book.read_status { GREEN } else { RED };
        prompter.line(format!(
            "{}. {YELLOW}{}{RESET} by {}",
            number + 1,
            book.title,
            book.author
        ))?;
        prompter.line(format!(
            "   Published: {} | Genre: {}",
            book.publication_year, book.genre
        ))?;
        prompter.line(format!(
            "   Status: {status_color}{}{RESET}\n",
            book.status_label()
        ))?;
    }
    Ok(())
}

fn display_statistics<S, R, W>(
    session: &LibrarySession<S>,
    prompter: &mut Prompter<R, W>,
) -> io::Result<()>
where
    S: LibraryStorage,
    R: BufRead,
    W: Write,
{
    let stats = session.statistics();
    prompter.line(format!("\n{YELLOW}Library Statistics{RESET}"))?;
    prompter.line(format!("{BLUE}Total Books:{RESET} {}", stats.total))?;

    let Some(percentage) = stats.read_percentage else {
        return Ok(());
    };
    prompter.line(format!("{BLUE}Read Percentage:{RESET} {percentage:.1}%"))?;

    if let Some(genre) = &stats.top_genre {
        prompter.line(format!(
            "\n{BLUE}Most Popular Genre:{RESET} {} ({} books)",
            genre.value, genre.count
        ))?;
    }
    if let Some(author) = &stats.top_author {
        prompter.line(format!(
            "{BLUE}Most Prolific Author:{RESET} {} ({} books)",
            author.value, author.count
        ))?;
    }
    Ok(())
}
