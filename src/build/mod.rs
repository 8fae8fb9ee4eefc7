// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Offline index construction: corpus file in, index file out.
//!
//! Runs once, long before any question is answered. Reading is sequential,
//! analysis is parallel (with the `parallel` feature), and the snapshot is
//! written in one go.

pub mod corpus;
pub mod keywords;

use std::path::Path;

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};

use crate::analysis::Analyzer;
use crate::error::Result;
use crate::index::{write_index, CorpusIndex};
use crate::types::Field;

pub use corpus::{load_corpus, load_corpus_with, parse_article, CorpusLoad};
pub use keywords::KeywordFilter;

/// What one `index` run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub articles: usize,
    pub indexed: usize,
    pub filtered: usize,
    pub title_terms: usize,
    pub text_terms: usize,
    pub bytes: u64,
}

#[cfg(feature = "parallel")]
fn create_spinner(prefix: &'static str) -> ProgressBar {
    let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:<10} {pos} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    let pb = ProgressBar::new_spinner().with_style(style);
    pb.set_prefix(prefix);
    pb
}

/// Build an index from a JSON-lines corpus and write it to `output`.
pub fn run_index(corpus: &Path, output: &Path, keywords: Option<&Path>) -> Result<BuildReport> {
    let filter = keywords.map(KeywordFilter::load).transpose()?;

    #[cfg(feature = "parallel")]
    let load_pb = create_spinner("Reading");
    #[cfg(feature = "parallel")]
    load_pb.set_message("articles...");

    let load = load_corpus_with(corpus, filter.as_ref(), |_doc| {
        #[cfg(feature = "parallel")]
        load_pb.inc(1);
    })?;

    #[cfg(feature = "parallel")]
    load_pb.finish_with_message(format!("articles, {} kept", load.docs.len()));

    if load.docs.is_empty() {
        tracing::warn!(corpus = %corpus.display(), "no documents to index");
    }

    let articles = load.articles;
    let filtered = load.filtered;
    let index = CorpusIndex::build(load.docs, Analyzer::default());
    let bytes = write_index(&index, output)?;

    Ok(BuildReport {
        articles,
        indexed: index.len(),
        filtered,
        title_terms: index.field(Field::Title).term_count(),
        text_terms: index.field(Field::Text).term_count(),
        bytes,
    })
}
