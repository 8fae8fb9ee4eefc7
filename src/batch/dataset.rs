// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tab-separated question rows.
//!
//! `id<TAB>question<TAB>a1<TAB>a2<TAB>a3<TAB>a4`. Empty tokens between
//! consecutive tabs are not counted, and a line with any other number of
//! tokens is not a question.

use crate::config::{CANDIDATE_COUNT, DATASET_FIELD_COUNT};
use crate::types::QuestionRecord;

fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.trim_end_matches(&['\r', '\n'][..])
        .split('\t')
        .filter(|token| !token.is_empty())
}

/// Parse one data line. `None` for malformed lines.
pub fn parse_line(line: &str) -> Option<QuestionRecord> {
    let fields: Vec<&str> = tokens(line).collect();
    if fields.len() != DATASET_FIELD_COUNT {
        return None;
    }
    let mut candidates: [String; CANDIDATE_COUNT] = Default::default();
    for (slot, answer) in candidates.iter_mut().zip(&fields[2..]) {
        *slot = answer.to_string();
    }
    Some(QuestionRecord {
        id: fields[0].to_string(),
        question: fields[1].to_string(),
        candidates,
    })
}

/// First token of a line, well-formed or not.
pub fn line_id(line: &str) -> Option<&str> {
    tokens(line).next()
}
