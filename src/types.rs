// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The nouns of question answering.
//!
//! A [`QuestionRecord`] comes in from the dataset, gets turned into four
//! queries, each query produces [`Hit`]s, the hits collapse into one
//! [`CandidateScore`] per candidate, and the winner leaves as a [`ResultRow`].
//! Records and hits live for one scoring pass; result rows are the only thing
//! that reaches disk.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::CANDIDATE_COUNT;

// =============================================================================
// NEWTYPES
// =============================================================================

/// Type-safe document identifier.
///
/// Assigned densely from 0 in corpus order when the index is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct DocId(pub u32);

impl DocId {
    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Convert to usize for array indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

// =============================================================================
// SEARCH VOCABULARY
// =============================================================================

/// Indexed, stored document field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Text,
}

impl Field {
    pub const ALL: [Field; 2] = [Field::Title, Field::Text];

    /// Matches the serde `rename_all = "lowercase"` convention.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Text => "text",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        match name {
            "title" => Some(Field::Title),
            "text" => Some(Field::Text),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn slot(self) -> usize {
        match self {
            Field::Title => 0,
            Field::Text => 1,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default boolean operator applied between query clauses with no explicit
/// `AND`/`OR` between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::And => f.write_str("AND"),
            Operator::Or => f.write_str("OR"),
        }
    }
}

/// How document length affects relevance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthNorm {
    /// Long documents are down-weighted (BM25 `b = 0.75`).
    #[default]
    Classic,
    /// Document length is ignored (BM25 `b = 0`).
    Disabled,
}

/// Stored field values of one indexed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub title: String,
    pub text: String,
}

impl StoredDocument {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Text => &self.text,
        }
    }
}

/// One ranked search result. Borrows the stored fields from the index, so a
/// hit cannot outlive the search that produced it.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    pub doc_id: DocId,
    pub score: f64,
    pub doc: &'a StoredDocument,
}

impl<'a> Hit<'a> {
    pub fn field(&self, field: Field) -> &'a str {
        self.doc.field(field)
    }
}

// =============================================================================
// QUESTIONS AND ANSWERS
// =============================================================================

/// Positional label of a candidate answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Choice {
    A,
    B,
    C,
    D,
}

impl Choice {
    pub const ALL: [Choice; CANDIDATE_COUNT] = [Choice::A, Choice::B, Choice::C, Choice::D];

    /// Zero-based candidate position.
    pub fn index(self) -> usize {
        match self {
            Choice::A => 0,
            Choice::B => 1,
            Choice::C => 2,
            Choice::D => 3,
        }
    }

    /// One-based candidate number as used in the dataset (1 → A).
    pub fn number(self) -> usize {
        self.index() + 1
    }

    pub fn letter(self) -> char {
        match self {
            Choice::A => 'A',
            Choice::B => 'B',
            Choice::C => 'C',
            Choice::D => 'D',
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// One dataset row: a question and its four candidate answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    pub id: String,
    pub question: String,
    pub candidates: [String; CANDIDATE_COUNT],
}

impl QuestionRecord {
    pub fn candidate(&self, choice: Choice) -> &str {
        &self.candidates[choice.index()]
    }
}

/// Aggregate evidence for one candidate under one strategy pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateScore {
    pub choice: Choice,
    pub score: f64,
}

/// One decided question, as appended to the result file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub id: String,
    pub answer: Choice,
}

impl ResultRow {
    /// `id,letter`, without a line terminator.
    pub fn to_csv(&self) -> String {
        format!("{},{}", self.id, self.answer)
    }
}
