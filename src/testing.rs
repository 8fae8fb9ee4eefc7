// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use std::cell::RefCell;

use crate::analysis::Analyzer;
use crate::error::{Error, Result};
use crate::index::{SearchIndex, SearchRequest};
use crate::types::{DocId, Hit, Operator, StoredDocument};

/// A handful of science sentences, one per document.
pub fn sample_corpus() -> Vec<StoredDocument> {
    vec![
        StoredDocument::new("Water", "Water reaches its freezing point at 0 degrees."),
        StoredDocument::new("Stars", "The sun is a star made mostly of hydrogen."),
        StoredDocument::new("Plants", "Plants use sunlight to make sugar from carbon dioxide."),
        StoredDocument::new("Magnets", "Opposite poles of a magnet attract each other."),
        StoredDocument::new("Sound", "Sound travels faster in water than in air."),
    ]
}

struct Rule {
    needle: String,
    operator: Option<Operator>,
    response: Response,
}

enum Response {
    Hits(Vec<(f64, StoredDocument)>),
    ParseError,
}

/// A [`SearchIndex`] with canned answers.
///
/// Each rule matches when its needle occurs in the query string (and, if
/// given, the operator matches). The first matching rule wins; unmatched
/// queries return no hits. Every search is recorded.
pub struct ScriptedIndex {
    analyzer: Analyzer,
    rules: Vec<Rule>,
    calls: RefCell<Vec<(String, Operator)>>,
}

impl Default for ScriptedIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedIndex {
    pub fn new() -> Self {
        Self {
            analyzer: Analyzer::default(),
            rules: Vec::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Hits with the given relevance scores and empty stored fields.
    pub fn with_scores(self, needle: &str, operator: Option<Operator>, scores: &[f64]) -> Self {
        let hits = scores
            .iter()
            .map(|&score| (score, StoredDocument::new("", "")))
            .collect();
        self.with_rule(needle, operator, Response::Hits(hits))
    }

    /// One hit per text, each with relevance 1.0.
    pub fn with_texts(self, needle: &str, operator: Option<Operator>, texts: &[&str]) -> Self {
        let hits = texts
            .iter()
            .map(|&text| (1.0, StoredDocument::new("", text)))
            .collect();
        self.with_rule(needle, operator, Response::Hits(hits))
    }

    /// Queries containing `needle` fail to parse.
    pub fn failing(self, needle: &str) -> Self {
        self.with_rule(needle, None, Response::ParseError)
    }

    /// Every (query, operator) searched so far.
    pub fn calls(&self) -> Vec<(String, Operator)> {
        self.calls.borrow().clone()
    }

    pub fn calls_with(&self, operator: Operator) -> usize {
        self.calls.borrow().iter().filter(|(_, op)| *op == operator).count()
    }

    fn with_rule(mut self, needle: &str, operator: Option<Operator>, response: Response) -> Self {
        self.rules.push(Rule {
            needle: needle.to_string(),
            operator,
            response,
        });
        self
    }
}

impl SearchIndex for ScriptedIndex {
    fn analyze(&self, text: &str) -> Vec<String> {
        self.analyzer.analyze(text)
    }

    fn search(&self, request: &SearchRequest<'_>) -> Result<Vec<Hit<'_>>> {
        self.calls
            .borrow_mut()
            .push((request.query.to_string(), request.operator));

        let rule = self.rules.iter().find(|rule| {
            request.query.contains(&rule.needle)
                && rule.operator.map_or(true, |op| op == request.operator)
        });
        match rule.map(|r| &r.response) {
            None => Ok(Vec::new()),
            Some(Response::ParseError) => Err(Error::parse(request.query, "scripted failure")),
            Some(Response::Hits(hits)) => Ok(hits
                .iter()
                .take(request.top_n)
                .enumerate()
                .map(|(i, (score, doc))| Hit {
                    doc_id: DocId(i as u32),
                    score: *score,
                    doc,
                })
                .collect()),
        }
    }
}
