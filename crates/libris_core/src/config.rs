//! Runtime configuration for a library session.
//!
//! # Invariants
//! - All paths are derived from one base directory; nothing is read from
//!   the environment or command line.

use crate::logging::default_log_level;
use std::path::{Path, PathBuf};

pub const DB_FILE_NAME: &str = "library.db";
pub const LOG_DIR_NAME: &str = "logs";

/// Where the library lives and how it logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: PathBuf,
}

impl LibraryConfig {
    /// Places the database and log directory under `base`.
    pub fn in_dir(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            db_path: base.join(DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: base.join(LOG_DIR_NAME),
        }
    }
}
