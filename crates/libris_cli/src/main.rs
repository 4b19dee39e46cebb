//! Interactive entry point for the personal library.
//!
//! # Responsibility
//! - Resolve configuration from the working directory and start logging.
//! - Open the library session and hand stdin/stdout to the menu loop.
//! - Map the session outcome to the process exit status.

mod app;
mod prompt;
mod style;

use anyhow::{Context, Result};
use app::Outcome;
use libris_core::{init_logging, LibraryConfig, LibrarySession, SqliteLibraryStore};
use log::{error, info};
use prompt::Prompter;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(outcome) => exit_code(&outcome),
        Err(err) => {
            error!("event=app_exit module=cli status=error error={err:#}");
            eprintln!("{}error:{} {err:#}", style::RED, style::RESET);
            ExitCode::FAILURE
        }
    }
}

fn exit_code(outcome: &Outcome) -> ExitCode {
    match &outcome.save {
        Ok(written) => info!("event=app_exit module=cli status=ok count={written}"),
        Err(err) => error!("event=app_exit module=cli status=error error={err}"),
    }
    if let Some(err) = &outcome.io_error {
        eprintln!("{}error:{} terminal i/o failed: {err}", style::RED, style::RESET);
    }

    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run() -> Result<Outcome> {
    let base_dir = std::env::current_dir().context("failed to resolve working directory")?;
    let config = LibraryConfig::in_dir(&base_dir);

    // Logging is diagnostic only; the library stays usable without it.
    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    let store = SqliteLibraryStore::new(&config.db_path);
    let session = LibrarySession::open(store)
        .with_context(|| format!("cannot open library at `{}`", config.db_path.display()))?;

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    Ok(app::run(session, &mut prompter))
}
