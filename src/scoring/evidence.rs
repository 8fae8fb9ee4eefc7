// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Reducing a hit list to one number.
//!
//! Both reductions are sums, so every score is non-negative and an empty hit
//! list scores exactly 0.0. The selector relies on that: exact zero means "no
//! evidence at all", and only that triggers a fallback pass.

use std::collections::HashMap;

use crate::types::{Field, Hit};

/// How a candidate's hits become its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMode {
    /// Sum of the index's relevance scores over the top hits.
    RelevanceSum,
    /// Sum over answer tokens of their frequency in each top hit's text.
    TermOverlap,
}

/// Sum of relevance scores.
pub fn relevance_sum(hits: &[Hit<'_>]) -> f64 {
    hits.iter().map(|hit| hit.score).sum()
}

/// Lexical overlap between the answer and the hit texts.
///
/// `frequencies` must count tokens with the same analysis the answer tokens
/// went through. Repeated answer tokens count once per repetition.
pub fn term_overlap<F>(answer_tokens: &[String], hits: &[Hit<'_>], frequencies: F) -> f64
where
    F: Fn(&str) -> HashMap<String, u32>,
{
    if answer_tokens.is_empty() {
        return 0.0;
    }
    let mut total: u64 = 0;
    for hit in hits {
        let tf = frequencies(hit.field(Field::Text));
        total += answer_tokens
            .iter()
            .map(|token| u64::from(tf.get(token).copied().unwrap_or(0)))
            .sum::<u64>();
    }
    total as f64
}
