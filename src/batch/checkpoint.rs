// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The result file, which doubles as the checkpoint.
//!
//! Rows are only ever appended, one line per decided question, each followed
//! by a flush. Whatever the file ends with after a crash is therefore a
//! prefix of the run, and its last complete row names the question to resume
//! after. Blank lines carry no row and are passed over.
//!
//! A run killed mid-write can leave a torn last line with no terminator. A
//! torn line that still reads as a full `id,letter` row counts as written and
//! gets its missing newline. Anything shorter never formed a row: it is cut
//! off the file and the question it belonged to is answered again.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::OUTPUT_HEADER;
use crate::error::{Error, Result};
use crate::types::ResultRow;

const HEADER_ID: &str = "id";

/// `Some(id)` when `line` is a complete `id,letter` row.
fn row_id(line: &str) -> Option<&str> {
    let (id, answer) = line.trim_end_matches('\r').split_once(',')?;
    let complete = matches!(answer, "A" | "B" | "C" | "D");
    (complete && !id.is_empty() && id != HEADER_ID).then_some(id)
}

/// Split contents into the newline-terminated part and the torn tail.
fn split_torn(contents: &str) -> (&str, &str) {
    match contents.rfind('\n') {
        Some(end) => (&contents[..end + 1], &contents[end + 1..]),
        None => ("", contents),
    }
}

/// Checkpoint recorded in the contents of a result file.
pub fn checkpoint_from(contents: &str) -> Option<String> {
    let (complete, torn) = split_torn(contents);
    if let Some(id) = row_id(torn) {
        return Some(id.to_string());
    }
    let last = complete
        .lines()
        .rev()
        .map(|line| line.trim_end_matches('\r'))
        .find(|line| !line.trim().is_empty())?;
    let first_field = last.split(',').next().unwrap_or_default();
    if first_field == HEADER_ID || first_field.is_empty() {
        return None;
    }
    Some(first_field.to_string())
}

/// Checkpoint of the result file at `path`, or `None` if it does not exist.
pub fn read_checkpoint(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(checkpoint_from(&contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Append-only writer for the result file.
#[derive(Debug)]
pub struct ResultWriter {
    path: PathBuf,
    out: BufWriter<File>,
}

impl ResultWriter {
    /// Open `path` for appending, creating it with a header if it does not
    /// exist. Returns the writer and the checkpoint found in the file.
    pub fn open(path: &Path) -> Result<(Self, Option<String>)> {
        let existing = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(Error::io(path, e)),
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| Error::io(path, e))?;

        let (complete, torn) = split_torn(&existing);
        let torn_row = !torn.is_empty() && row_id(torn).is_some();
        if !torn.is_empty() && !torn_row {
            tracing::warn!(path = %path.display(), fragment = torn, "dropping torn last line");
            file.set_len(complete.len() as u64).map_err(|e| Error::io(path, e))?;
        }

        let mut writer = Self {
            path: path.to_path_buf(),
            out: BufWriter::new(file),
        };

        let checkpoint = if complete.is_empty() && !torn_row {
            writer.write_line(OUTPUT_HEADER)?;
            None
        } else {
            if torn_row {
                tracing::warn!(path = %path.display(), "result file has an unterminated last row");
                writer.write_line("")?;
            }
            checkpoint_from(&existing)
        };

        Ok((writer, checkpoint))
    }

    /// Append one row and flush it to the file.
    pub fn append(&mut self, row: &ResultRow) -> Result<()> {
        self.write_line(&row.to_csv())
    }

    /// Flush and close.
    pub fn finish(mut self) -> Result<()> {
        self.out.flush().map_err(|e| Error::io(&self.path, e))
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.out, "{}", line)
            .and_then(|_| self.out.flush())
            .map_err(|e| Error::io(&self.path, e))
    }
}
