// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error type shared by the library.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Reading or writing a file failed.
    Io { path: PathBuf, source: io::Error },
    /// A query string is not valid classic query syntax.
    QueryParse { query: String, reason: String },
    /// The index file failed validation (magic, version, size, checksum, payload).
    CorruptIndex(String),
    /// A corpus line could not be decoded.
    Corpus { line: usize, reason: String },
    /// A caller-supplied value is out of range.
    InvalidArgument(String),
}

impl Error {
    /// Attach a path to an I/O error.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(query: &str, reason: impl Into<String>) -> Self {
        Error::QueryParse {
            query: query.to_string(),
            reason: reason.into(),
        }
    }

    /// True for errors that only affect a single query.
    pub fn is_query_error(&self) -> bool {
        matches!(self, Error::QueryParse { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Error::QueryParse { query, reason } => {
                write!(f, "cannot parse query '{}': {}", query, reason)
            }
            Error::CorruptIndex(reason) => write!(f, "corrupt index: {}", reason),
            Error::Corpus { line, reason } => write!(f, "corpus line {}: {}", line, reason),
            Error::InvalidArgument(reason) => write!(f, "invalid argument: {}", reason),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
