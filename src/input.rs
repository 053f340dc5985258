//! Shared plumbing for reading whitespace-delimited simulator files.
//!
//! Every input format handled by this crate is a flat text table: one record
//! per line, fields separated by tabs or spaces. Parse failures carry the file
//! and the 1-based line number so a bad trace can be fixed by hand.

use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Errors that can occur while reading or writing a text table
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{origin}: file is empty, expected {expected}")]
    Empty { origin: String, expected: &'static str },

    #[error("{origin}:{line}: missing field '{field}'")]
    MissingField {
        origin: String,
        line: usize,
        field: &'static str,
    },

    #[error("{origin}:{line}: invalid {field} '{value}'")]
    InvalidNumber {
        origin: String,
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("{origin}:{line}: node {node} is outside the declared range [0, {num_nodes})")]
    NodeOutOfRange {
        origin: String,
        line: usize,
        node: u32,
        num_nodes: u32,
    },
}

impl InputError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        InputError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Read a whole input file into memory.
pub fn read_input(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|e| InputError::io(path, e))
}

/// Write `content` to `path`, replacing any existing file.
pub fn write_output(path: &Path, content: &str) -> Result<(), InputError> {
    fs::write(path, content).map_err(|e| InputError::io(path, e))?;
    log::debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// The fields of one input line, with enough context to report errors.
#[derive(Debug)]
pub struct LineFields<'a> {
    origin: &'a str,
    line: usize,
    words: Vec<&'a str>,
}

impl<'a> LineFields<'a> {
    /// Split `text` on whitespace. `line` is 1-based.
    pub fn new(origin: &'a str, line: usize, text: &'a str) -> Self {
        Self {
            origin,
            line,
            words: text.split_whitespace().collect(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// Raw text of field `index`.
    pub fn text(&self, index: usize, field: &'static str) -> Result<&'a str, InputError> {
        self.words
            .get(index)
            .copied()
            .ok_or_else(|| InputError::MissingField {
                origin: self.origin.to_string(),
                line: self.line,
                field,
            })
    }

    /// Parse field `index` as a number.
    pub fn parse<T>(&self, index: usize, field: &'static str) -> Result<T, InputError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.text(index, field)?;
        raw.parse::<T>().map_err(|_| InputError::InvalidNumber {
            origin: self.origin.to_string(),
            line: self.line,
            field,
            value: raw.to_string(),
        })
    }
}
