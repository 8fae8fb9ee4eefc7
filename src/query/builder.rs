// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turning (question, candidate) into a query string.
//!
//! A question either has a blank to fill (`"A liquid turns solid at its
//! __________ point."`) or is open (`"What color is the sky?"`). Either way
//! the candidate is spliced in so the query reads as one statement, and that
//! statement is what gets matched against the corpus.

use crate::config::{BANNED_CHARS, BLANK_MARKER};
use crate::utils::blank_out;

/// Which stored fields the combined statement is searched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryTarget {
    /// `title:(q) OR text:(q)`
    TitleOrText,
    /// `text:(q)`
    Text,
}

/// Query string for one candidate, plus the escaped answer text that
/// term-overlap scoring analyzes on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateQuery {
    pub answer: String,
    pub statement: String,
    pub query: String,
}

/// Builds per-candidate queries for a fixed field target.
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder {
    target: QueryTarget,
}

impl QueryBuilder {
    pub fn new(target: QueryTarget) -> Self {
        Self { target }
    }

    pub fn target(&self) -> QueryTarget {
        self.target
    }

    /// Escape both sides, splice the answer into the question, and wrap the
    /// result in the field syntax for this builder's target.
    pub fn build(&self, question: &str, answer: &str) -> CandidateQuery {
        let answer = escape_symbols(answer);
        let statement = combine(&escape_symbols(question), &answer);
        let query = field_query(self.target, &statement);
        CandidateQuery {
            answer,
            statement,
            query,
        }
    }
}

/// Replace every query-syntax character with a space.
pub fn escape_symbols(text: &str) -> String {
    blank_out(text, &BANNED_CHARS)
}

/// Splice an (already escaped) answer into an (already escaped) question.
///
/// With a blank marker the answer replaces it, padded by a space on each
/// side. Without one, any `?` is blanked and the answer is appended after a
/// single space.
pub fn combine(question: &str, answer: &str) -> String {
    if question.contains(BLANK_MARKER) {
        question.replace(BLANK_MARKER, &format!(" {} ", answer))
    } else {
        format!("{} {}", question.replace('?', " "), answer)
    }
}

/// Wrap a statement in field groups.
pub fn field_query(target: QueryTarget, statement: &str) -> String {
    match target {
        QueryTarget::TitleOrText => format!("title:({0}) OR text:({0})", statement),
        QueryTarget::Text => format!("text:({})", statement),
    }
}
