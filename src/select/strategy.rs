// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The five answer strategies, as data.

use std::fmt;

use clap::ValueEnum;

use crate::query::QueryTarget;
use crate::scoring::{ScoringMode, ScoringPass};
use crate::types::{LengthNorm, Operator};

/// A primary scoring pass and the optional pass that runs when the primary
/// finds no evidence for any candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyDescriptor {
    pub primary: ScoringPass,
    pub fallback: Option<ScoringPass>,
}

/// Caller-selectable answer strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Strategy {
    /// Relevance sum over title and text.
    #[default]
    TopN,
    /// Relevance sum over title and text, ignoring document length.
    NoLengthNorm,
    /// AND query over text, falling back to OR.
    AndThenOr,
    /// AND query over text, falling back to OR with term overlap.
    AndThenOrCount,
    /// OR query over text scored by term overlap.
    OrCount,
}

const TOP_N: ScoringPass =
    ScoringPass::new(Operator::Or, QueryTarget::TitleOrText, ScoringMode::RelevanceSum);
const TEXT_AND: ScoringPass =
    ScoringPass::new(Operator::And, QueryTarget::Text, ScoringMode::RelevanceSum);
const TEXT_OR: ScoringPass =
    ScoringPass::new(Operator::Or, QueryTarget::Text, ScoringMode::RelevanceSum);
const TEXT_OR_COUNT: ScoringPass =
    ScoringPass::new(Operator::Or, QueryTarget::Text, ScoringMode::TermOverlap);

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::TopN,
        Strategy::NoLengthNorm,
        Strategy::AndThenOr,
        Strategy::AndThenOrCount,
        Strategy::OrCount,
    ];

    pub fn descriptor(self) -> StrategyDescriptor {
        let (primary, fallback) = match self {
            Strategy::TopN => (TOP_N, None),
            Strategy::NoLengthNorm => (TOP_N.with_length_norm(LengthNorm::Disabled), None),
            Strategy::AndThenOr => (TEXT_AND, Some(TEXT_OR)),
            Strategy::AndThenOrCount => (TEXT_AND, Some(TEXT_OR_COUNT)),
            Strategy::OrCount => (TEXT_OR_COUNT, None),
        };
        StrategyDescriptor { primary, fallback }
    }

    /// Name as accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::TopN => "top-n",
            Strategy::NoLengthNorm => "no-length-norm",
            Strategy::AndThenOr => "and-then-or",
            Strategy::AndThenOrCount => "and-then-or-count",
            Strategy::OrCount => "or-count",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
