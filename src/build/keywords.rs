// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Keyword filter for corpus ingestion.
//!
//! A keywords file has one keyword per line. Lines that are blank after
//! trimming are skipped and repeats are dropped; the kept lines are used as
//! written. A document passes when its text contains any keyword verbatim
//! (case-sensitive substring).

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordFilter {
    keywords: Vec<String>,
}

impl KeywordFilter {
    pub fn parse(contents: &str) -> Self {
        let mut keywords: Vec<String> = Vec::new();
        for line in contents.lines() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || keywords.iter().any(|k| k == line) {
                continue;
            }
            keywords.push(line.to_string());
        }
        Self { keywords }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let filter = Self::parse(&contents);
        tracing::info!(path = %path.display(), keywords = filter.len(), "keywords loaded");
        Ok(filter)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|keyword| text.contains(keyword.as_str()))
    }
}
