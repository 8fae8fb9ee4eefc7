// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Answer selection.
//!
//! ```text
//! Idle ─► Scoring(primary) ─┬─ max > 0 ──────────────────────► Decided
//!                           └─ max == 0 ─► Scoring(fallback) ─┬─ max > 0 ─► Decided
//!                                                             └─ otherwise ► Undecided
//! ```
//!
//! The arg-max starts at 0 and only moves on a strictly greater score, so the
//! earliest candidate wins ties and a pass where nothing scores above zero
//! picks nobody. The fallback runs only when the primary maximum is exactly
//! zero; any positive score, however small, is a decision.

mod strategy;

pub use strategy::{Strategy, StrategyDescriptor};

use crate::error::Result;
use crate::index::SearchIndex;
use crate::scoring::{EvidenceAggregator, ScoringPass};
use crate::types::{CandidateScore, Choice, QuestionRecord};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub choice: Choice,
    pub score: f64,
    /// The winning score came from the fallback pass.
    pub used_fallback: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    Decided(Decision),
    Undecided,
}

impl Selection {
    pub fn choice(&self) -> Option<Choice> {
        match self {
            Selection::Decided(decision) => Some(decision.choice),
            Selection::Undecided => None,
        }
    }
}

/// First strictly greatest positive score, if any.
pub fn arg_max(scores: &[CandidateScore]) -> Option<CandidateScore> {
    let mut best: Option<CandidateScore> = None;
    let mut max = 0.0;
    for candidate in scores {
        if candidate.score > max {
            max = candidate.score;
            best = Some(*candidate);
        }
    }
    best
}

/// Runs a strategy over the four candidates of each question.
pub struct AnswerSelector<'i, I: SearchIndex + ?Sized> {
    aggregator: EvidenceAggregator<'i, I>,
    strategy: StrategyDescriptor,
}

impl<'i, I: SearchIndex + ?Sized> AnswerSelector<'i, I> {
    pub fn new(index: &'i I, strategy: Strategy, top_n: usize) -> Self {
        Self::with_descriptor(index, strategy.descriptor(), top_n)
    }

    pub fn with_descriptor(index: &'i I, strategy: StrategyDescriptor, top_n: usize) -> Self {
        Self {
            aggregator: EvidenceAggregator::new(index, top_n),
            strategy,
        }
    }

    /// Pick an answer for `record`.
    ///
    /// A query error on any candidate fails the whole question; the caller
    /// decides whether that is fatal.
    pub fn select(&self, record: &QuestionRecord) -> Result<Selection> {
        let scores = self.score_pass(&self.strategy.primary, record)?;
        if let Some(best) = arg_max(&scores) {
            return Ok(decided(best, false));
        }

        let Some(fallback) = self.strategy.fallback else {
            return Ok(Selection::Undecided);
        };

        tracing::debug!(id = %record.id, "primary pass found no evidence, falling back");
        let scores = self.score_pass(&fallback, record)?;
        Ok(match arg_max(&scores) {
            Some(best) => decided(best, true),
            None => Selection::Undecided,
        })
    }

    fn score_pass(&self, pass: &ScoringPass, record: &QuestionRecord) -> Result<Vec<CandidateScore>> {
        let mut scores = Vec::with_capacity(Choice::ALL.len());
        for choice in Choice::ALL {
            let score =
                self.aggregator
                    .score_candidate(pass, &record.question, record.candidate(choice))?;
            tracing::debug!(
                id = %record.id,
                candidate = choice.number(),
                answer = record.candidate(choice),
                score,
                "candidate score"
            );
            scores.push(CandidateScore { choice, score });
        }
        Ok(scores)
    }
}

fn decided(best: CandidateScore, used_fallback: bool) -> Selection {
    Selection::Decided(Decision {
        choice: best.choice,
        score: best.score,
        used_fallback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(values: [f64; 4]) -> Vec<CandidateScore> {
        Choice::ALL
            .iter()
            .zip(values)
            .map(|(&choice, score)| CandidateScore { choice, score })
            .collect()
    }

    #[test]
    fn test_arg_max_first_strict_maximum() {
        let best = arg_max(&scores([1.0, 3.0, 3.0, 2.0])).unwrap();
        assert_eq!(best.choice, Choice::B);
    }

    #[test]
    fn test_arg_max_all_zero_is_none() {
        assert!(arg_max(&scores([0.0; 4])).is_none());
    }

    #[test]
    fn test_arg_max_tiny_positive_counts() {
        let best = arg_max(&scores([0.0, 0.0, 0.0001, 0.0])).unwrap();
        assert_eq!(best.choice, Choice::C);
    }
}
