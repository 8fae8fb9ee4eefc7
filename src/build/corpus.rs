// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! JSON-lines corpus reader.
//!
//! One article per line: `{"title": "...", "text": "..."}`. Blank lines are
//! skipped. A line that is not a valid article is an error carrying its line
//! number, since a half-read corpus would silently produce a weaker index.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::StoredDocument;

use super::keywords::KeywordFilter;

/// Documents kept from a corpus file, plus what was left out.
#[derive(Debug, Default)]
pub struct CorpusLoad {
    pub docs: Vec<StoredDocument>,
    /// Articles read, kept or not.
    pub articles: usize,
    /// Articles rejected by the keyword filter.
    pub filtered: usize,
}

/// Parse one corpus line. `line_no` is 1-based and only used for errors.
pub fn parse_article(line: &str, line_no: usize) -> Result<StoredDocument> {
    serde_json::from_str(line).map_err(|e| Error::Corpus {
        line: line_no,
        reason: e.to_string(),
    })
}

/// Read every article from `path`, keeping those that pass `filter`.
pub fn load_corpus(path: &Path, filter: Option<&KeywordFilter>) -> Result<CorpusLoad> {
    load_corpus_with(path, filter, |_| {})
}

/// Like [`load_corpus`], calling `on_article` after each article is read.
pub fn load_corpus_with<F>(
    path: &Path,
    filter: Option<&KeywordFilter>,
    mut on_article: F,
) -> Result<CorpusLoad>
where
    F: FnMut(&StoredDocument),
{
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut load = CorpusLoad::default();

    for (n, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| Error::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let doc = parse_article(&line, n + 1)?;
        load.articles += 1;
        on_article(&doc);

        if filter.map_or(true, |f| f.matches(&doc.text)) {
            load.docs.push(doc);
        } else {
            tracing::debug!(title = %doc.title, "skipping article without keywords");
            load.filtered += 1;
        }
    }

    Ok(load)
}
