// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Resumable batch answering.
//!
//! One pass over the dataset, strictly in file order:
//!
//! 1. Open the input, then the result file (creating it with a header, or
//!    reading its checkpoint).
//! 2. Skip the dataset header.
//! 3. With a checkpoint, read and discard rows up to and including the row
//!    whose id equals it.
//! 4. Answer every following row; append and flush each decision.
//!
//! Malformed rows, undecided questions and questions whose queries fail to
//! parse produce no output and do not stop the run. I/O errors do. Files are
//! closed on every exit path when the runner's locals drop, and the result
//! file is a valid resume point whenever the process stops.

pub mod checkpoint;
pub mod dataset;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::index::SearchIndex;
use crate::select::{AnswerSelector, Selection, Strategy};
use crate::types::ResultRow;

pub use checkpoint::{checkpoint_from, read_checkpoint, ResultWriter};
pub use dataset::{line_id, parse_line};

/// What happened to one dataset row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// Already answered in an earlier run.
    Replayed { line: usize },
    /// Not a six-token question row.
    Malformed { line: usize },
    /// Answered and appended.
    Decided(ResultRow),
    /// No candidate found any evidence.
    Undecided { id: String },
    /// A candidate query could not be parsed.
    Failed { id: String, reason: String },
}

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Data rows read, header excluded.
    pub rows_read: usize,
    pub replayed: usize,
    pub malformed: usize,
    pub decided: usize,
    pub undecided: usize,
    pub failed: usize,
    /// Checkpoint found in the result file at startup.
    pub resumed_from: Option<String>,
    /// Whether the checkpoint id was seen in the input.
    pub checkpoint_found: bool,
}

pub struct BatchRunner<'i, I: SearchIndex + ?Sized> {
    selector: AnswerSelector<'i, I>,
    input: PathBuf,
    output: PathBuf,
}

impl<'i, I: SearchIndex + ?Sized> BatchRunner<'i, I> {
    pub fn new(index: &'i I, config: &RunConfig) -> Result<Self> {
        Self::with_strategy(index, config.strategy, config.top_n, &config.input, &config.output)
    }

    pub fn with_strategy(
        index: &'i I,
        strategy: Strategy,
        top_n: usize,
        input: &Path,
        output: &Path,
    ) -> Result<Self> {
        if top_n == 0 {
            return Err(Error::InvalidArgument("top_n must be a positive integer".into()));
        }
        Ok(Self {
            selector: AnswerSelector::new(index, strategy, top_n),
            input: input.to_path_buf(),
            output: output.to_path_buf(),
        })
    }

    pub fn run(&self) -> Result<RunReport> {
        self.run_with(|_| {})
    }

    /// Run the batch, reporting each row to `on_row` as it completes.
    pub fn run_with<F>(&self, mut on_row: F) -> Result<RunReport>
    where
        F: FnMut(&RowOutcome),
    {
        let input = File::open(&self.input).map_err(|e| Error::io(&self.input, e))?;
        let (mut writer, checkpoint) = ResultWriter::open(&self.output)?;

        let mut report = RunReport {
            resumed_from: checkpoint.clone(),
            ..RunReport::default()
        };
        match &checkpoint {
            Some(id) => tracing::info!(checkpoint = %id, "resuming after checkpoint"),
            None => tracing::info!(output = %self.output.display(), "starting fresh run"),
        }

        let mut replaying = checkpoint.is_some();
        let mut reader = BufReader::new(input);
        let mut buf = Vec::new();
        let mut line_no = 0;
        while let Some(line) =
            next_line(&mut reader, &mut buf).map_err(|e| Error::io(&self.input, e))?
        {
            line_no += 1;
            // Line 1 is the dataset header.
            if line_no == 1 {
                continue;
            }
            report.rows_read += 1;

            if replaying {
                if line_id(&line) == checkpoint.as_deref() {
                    replaying = false;
                    report.checkpoint_found = true;
                    tracing::info!(line = line_no, "checkpoint reached");
                }
                report.replayed += 1;
                on_row(&RowOutcome::Replayed { line: line_no });
                continue;
            }

            let Some(record) = parse_line(&line) else {
                tracing::debug!(line = line_no, "skipping malformed row");
                report.malformed += 1;
                on_row(&RowOutcome::Malformed { line: line_no });
                continue;
            };

            let outcome = match self.selector.select(&record) {
                Ok(Selection::Decided(decision)) => {
                    let row = ResultRow {
                        id: record.id,
                        answer: decision.choice,
                    };
                    writer.append(&row)?;
                    report.decided += 1;
                    RowOutcome::Decided(row)
                }
                Ok(Selection::Undecided) => {
                    tracing::debug!(id = %record.id, "no evidence for any candidate");
                    report.undecided += 1;
                    RowOutcome::Undecided { id: record.id }
                }
                Err(e) if e.is_query_error() => {
                    tracing::warn!(id = %record.id, error = %e, "query failed, skipping question");
                    report.failed += 1;
                    RowOutcome::Failed {
                        id: record.id,
                        reason: e.to_string(),
                    }
                }
                Err(e) => return Err(e),
            };
            on_row(&outcome);
        }

        if replaying {
            tracing::warn!(
                checkpoint = checkpoint.as_deref().unwrap_or_default(),
                "checkpoint id never appeared in the input; nothing was answered"
            );
        }

        writer.finish()?;
        tracing::info!(
            rows = report.rows_read,
            decided = report.decided,
            undecided = report.undecided,
            malformed = report.malformed,
            failed = report.failed,
            "run complete"
        );
        Ok(report)
    }
}

/// Read one line without its terminator. Bytes that are not UTF-8 are
/// replaced rather than failing the run; such a row can still be malformed.
fn next_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}
