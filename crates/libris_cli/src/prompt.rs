//! Line-oriented prompt over any reader/writer pair.

use crate::style::{RED, RESET};
use libris_core::BookValidationError;
use std::fmt::Display;
use std::io::{self, BufRead, ErrorKind, Write};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `label`, reads one line and strips the line ending.
    ///
    /// End of input is reported as `ErrorKind::UnexpectedEof`.
    pub fn ask(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Re-asks until `parse` accepts the answer, printing each rejection.
    pub fn ask_until<T>(
        &mut self,
        label: &str,
        mut parse: impl FnMut(&str) -> Result<T, BookValidationError>,
    ) -> io::Result<T> {
        loop {
            let answer = self.ask(label)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(err) => self.error(capitalize(&err.to_string()))?,
            }
        }
    }

    pub fn line(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    pub fn error(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{RED}{text}{RESET}")
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
