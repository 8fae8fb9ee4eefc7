// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the sciqa command-line interface.
//!
//! Three subcommands: `answer` runs a strategy over a question file, `index`
//! builds an index file from a corpus, and `inspect` prints what is inside an
//! index file.

pub mod display;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::RunConfig;
use crate::select::Strategy;

#[derive(Parser)]
#[command(
    name = "sciqa",
    about = "Answer multiple-choice science questions from a full-text corpus",
    version
)]
pub struct Cli {
    /// Log per-candidate scores (same as RUST_LOG=sciqa=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Answer every question in a tab-separated file, resuming if OUTPUT exists
    Answer(AnswerArgs),

    /// Build an index file from a JSON-lines corpus
    Index {
        /// Corpus file, one {"title", "text"} object per line
        #[arg(short, long)]
        corpus: PathBuf,

        /// Index file to write
        #[arg(short, long)]
        output: PathBuf,

        /// Only index articles whose text contains one of these keywords (one per line)
        #[arg(short, long)]
        keywords: Option<PathBuf>,
    },

    /// Show statistics of an index file
    Inspect {
        /// Index file
        file: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct AnswerArgs {
    /// Index file built by `sciqa index`
    pub index: PathBuf,

    /// Questions: header line, then id, question and four answers per line
    pub input: PathBuf,

    /// Result CSV, appended to and used as the checkpoint
    pub output: PathBuf,

    /// Number of top hits aggregated per candidate
    #[arg(value_parser = parse_top_n)]
    pub top_n: usize,

    /// Scoring strategy
    #[arg(short, long, value_enum, default_value_t = Strategy::TopN)]
    pub strategy: Strategy,
}

impl From<AnswerArgs> for RunConfig {
    fn from(args: AnswerArgs) -> Self {
        RunConfig {
            index: args.index,
            input: args.input,
            output: args.output,
            top_n: args.top_n,
            strategy: args.strategy,
        }
    }
}

/// `TOP_N` must be a positive integer.
pub fn parse_top_n(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a positive integer", value)),
    }
}
