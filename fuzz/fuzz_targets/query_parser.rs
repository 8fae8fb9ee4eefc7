// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for query building and parsing.
//!
//! Any question and answer text, once escaped and spliced, must yield a query
//! the parser accepts or rejects with an error. Raw input must never panic
//! the parser or the search that follows it.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sciqa::testing::sample_corpus;
use sciqa::{
    Analyzer, CorpusIndex, Field, LengthNorm, Operator, QueryBuilder, QueryTarget, SearchIndex,
    SearchRequest,
};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    question: &'a str,
    answer: &'a str,
    raw: &'a str,
    and: bool,
    top_n: u8,
}

fuzz_target!(|input: Input<'_>| {
    static INDEX: std::sync::OnceLock<CorpusIndex> = std::sync::OnceLock::new();
    let index = INDEX.get_or_init(|| CorpusIndex::build(sample_corpus(), Analyzer::default()));

    let operator = if input.and { Operator::And } else { Operator::Or };
    let top_n = usize::from(input.top_n).max(1);

    let built = QueryBuilder::new(QueryTarget::TitleOrText).build(input.question, input.answer);
    for query in [built.query.as_str(), input.raw] {
        let request = SearchRequest {
            query,
            default_field: Field::Text,
            operator,
            top_n,
            length_norm: LengthNorm::Classic,
        };
        if let Ok(hits) = index.search(&request) {
            assert!(hits.len() <= top_n);
            assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }
});
