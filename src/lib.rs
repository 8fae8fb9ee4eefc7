// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Multiple-choice science question answering over a full-text corpus.
//!
//! Each candidate answer is spliced into its question, the resulting
//! statement is searched against an indexed corpus, and the candidate whose
//! statement finds the most supporting evidence wins.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────┐   ┌──────────────┐   ┌─────────────┐   ┌──────────────┐
//! │   batch   │──▶│    select    │──▶│   scoring   │──▶│    query     │
//! │ (dataset, │   │ (strategies, │   │ (relevance, │   │  (builder,   │
//! │checkpoint)│   │  fallback)   │   │  overlap)   │   │   parser)    │
//! └───────────┘   └──────────────┘   └─────────────┘   └──────────────┘
//!                                           │
//!                                           ▼
//! ┌───────────┐   ┌──────────────────────────────────┐   ┌──────────────┐
//! │   build   │──▶│ index (SearchIndex, CorpusIndex, │◀──│   analysis   │
//! │ (corpus)  │   │        storage)                  │   │  (Analyzer)  │
//! └───────────┘   └──────────────────────────────────┘   └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use sciqa::{open_index, BatchRunner, RunConfig, Strategy};
//!
//! let index = open_index(Path::new("corpus.scqa"))?;
//! let config = RunConfig { index: "corpus.scqa".into(), input: "questions.tsv".into(),
//!     output: "answers.csv".into(), top_n: 5, strategy: Strategy::TopN };
//! let report = BatchRunner::new(&index, &config)?.run()?;
//! index.close();
//! ```

pub mod analysis;
pub mod batch;
pub mod build;
pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod query;
pub mod scoring;
pub mod select;
pub mod testing;
pub mod types;
mod utils;

pub use analysis::Analyzer;
pub use batch::{BatchRunner, ResultWriter, RowOutcome, RunReport};
pub use build::{run_index, BuildReport, KeywordFilter};
pub use config::RunConfig;
pub use error::{Error, Result};
pub use index::{open_index, write_index, CorpusIndex, SearchIndex, SearchRequest};
pub use query::{QueryBuilder, QueryParser, QueryTarget};
pub use scoring::{EvidenceAggregator, ScoringMode, ScoringPass};
pub use select::{AnswerSelector, Decision, Selection, Strategy, StrategyDescriptor};
pub use types::{
    CandidateScore, Choice, DocId, Field, Hit, LengthNorm, Operator, QuestionRecord, ResultRow,
    StoredDocument,
};
