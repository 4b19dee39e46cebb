//! ANSI colors used by the menu output.

pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const RED: &str = "\x1b[31m";
pub const RESET: &str = "\x1b[0m";
