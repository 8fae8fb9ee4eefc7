// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Evidence aggregation: one candidate answer in, one score out.
//!
//! A [`ScoringPass`] fixes everything about how a candidate is scored (query
//! operator, fields searched, reduction, length normalization). The
//! [`EvidenceAggregator`] applies a pass to a (question, answer) pair against
//! a [`SearchIndex`].

mod evidence;

pub use evidence::*;

use crate::error::Result;
use crate::index::{SearchIndex, SearchRequest};
use crate::query::{QueryBuilder, QueryTarget};
use crate::types::{Field, LengthNorm, Operator};

/// Everything that varies between scoring passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringPass {
    pub operator: Operator,
    pub target: QueryTarget,
    pub mode: ScoringMode,
    pub length_norm: LengthNorm,
}

impl ScoringPass {
    pub const fn new(operator: Operator, target: QueryTarget, mode: ScoringMode) -> Self {
        Self {
            operator,
            target,
            mode,
            length_norm: LengthNorm::Classic,
        }
    }

    pub const fn with_length_norm(mut self, length_norm: LengthNorm) -> Self {
        self.length_norm = length_norm;
        self
    }
}

/// Scores candidates against an index, keeping the top `top_n` hits per query.
pub struct EvidenceAggregator<'i, I: SearchIndex + ?Sized> {
    index: &'i I,
    top_n: usize,
}

impl<'i, I: SearchIndex + ?Sized> EvidenceAggregator<'i, I> {
    pub fn new(index: &'i I, top_n: usize) -> Self {
        Self { index, top_n }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Score one candidate answer to `question` under `pass`.
    ///
    /// Query syntax errors are returned, not swallowed; the caller decides
    /// what an unscorable candidate means for the question.
    pub fn score_candidate(&self, pass: &ScoringPass, question: &str, answer: &str) -> Result<f64> {
        let built = QueryBuilder::new(pass.target).build(question, answer);
        let request = SearchRequest {
            query: &built.query,
            default_field: Field::Text,
            operator: pass.operator,
            top_n: self.top_n,
            length_norm: pass.length_norm,
        };
        let hits = self.index.search(&request)?;

        let score = match pass.mode {
            ScoringMode::RelevanceSum => relevance_sum(&hits),
            ScoringMode::TermOverlap => {
                let answer_tokens = self.index.analyze(&built.answer);
                term_overlap(&answer_tokens, &hits, |text| self.index.term_frequencies(text))
            }
        };

        tracing::trace!(query = %built.query, hits = hits.len(), score, "candidate scored");
        Ok(score)
    }
}
