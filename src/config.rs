// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tuning constants and input limits.
//!
//! Everything here is compile-time. Per-run settings (index path, dataset,
//! output file, `top_n`, strategy) arrive through the CLI and are collected
//! into [`RunConfig`].

use std::path::PathBuf;

use crate::select::Strategy;

// =============================================================================
// QUERY CONSTRUCTION
// =============================================================================

/// Fill-in-the-blank placeholder inside a question template.
pub const BLANK_MARKER: &str = "__________";

/// Characters with meaning in the classic query syntax.
///
/// Each one is replaced by a space in both question and answer text before a
/// query string is assembled. `?` and `*` would otherwise turn into wildcards.
pub const BANNED_CHARS: [char; 18] = [
    '(', ')', '+', '-', '&', '|', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':', '\\', '/',
];

// =============================================================================
// RELEVANCE SCORING
// =============================================================================

/// BM25 term frequency saturation parameter.
pub const BM25_K1: f64 = 1.2;

/// BM25 document length normalization parameter.
///
/// Replaced by 0.0 when a search runs with [`crate::LengthNorm::Disabled`].
pub const BM25_B: f64 = 0.75;

// =============================================================================
// DATASET AND RESULT FILES
// =============================================================================

/// Non-empty tab-separated tokens on a well-formed dataset line:
/// id, question, four answers.
pub const DATASET_FIELD_COUNT: usize = 6;

/// Number of candidate answers per question.
pub const CANDIDATE_COUNT: usize = 4;

/// First line of every result file.
pub const OUTPUT_HEADER: &str = "id,correctAnswer";

// =============================================================================
// INDEX FILE LIMITS
// =============================================================================

/// Header magic: "SCQA"
pub const INDEX_MAGIC: [u8; 4] = *b"SCQA";

/// Footer magic: "AQCS" (reversed, marks valid file end)
pub const INDEX_FOOTER_MAGIC: [u8; 4] = *b"AQCS";

/// Current index file format version.
pub const INDEX_VERSION: u8 = 1;

/// Maximum index file size: 4 GB.
pub const MAX_INDEX_FILE_SIZE: u64 = 4 * 1024 * 1024 * 1024;

/// Brotli quality used when writing index snapshots.
pub const BROTLI_QUALITY: u32 = 9;

/// Brotli window size (log2) used when writing index snapshots.
pub const BROTLI_LG_WINDOW: u32 = 22;

/// Settings for one `answer` run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub index: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
    pub top_n: usize,
    pub strategy: Strategy,
}
