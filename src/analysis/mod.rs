// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text analysis shared by index construction and answer scoring.
//!
//! One [`Analyzer`] value describes the whole pipeline, so documents at build
//! time, queries at search time and answers in term-overlap scoring all end up
//! as the same tokens. If these ever diverge, overlap counts silently drop to
//! zero.
//!
//! # Pipeline
//!
//! ```text
//! "The H2O molecule's PowerShot"            raw text
//!   → [The, H2O, molecule's, PowerShot]      word tokenizer
//!   → [H2O, molecule's, PowerShot]           stop words (case-insensitive)
//!   → [H, 2, O, molecule, s, Power, Shot]    word delimiter (case, digits, punctuation)
//!   → [h, 2, o, molecule, s, power, shot]    lowercase + diacritic folding
//!   → [h, 2, o, molecul, s, power, shot]     Porter stemmer
//! ```

pub mod stemmer;

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::utils::normalize;

pub use stemmer::stem;

/// English stop words loaded from data/stop_words.json.
///
/// The JSON maps a language name to its word list; all lists are merged.
static STOP_WORDS: LazyLock<HashSet<String>> = LazyLock::new(|| {
    let json_str = include_str!("../../data/stop_words.json");
    parse_stop_words_json(json_str)
});

fn parse_stop_words_json(json_str: &str) -> HashSet<String> {
    serde_json::from_str::<HashMap<String, Vec<String>>>(json_str)
        .map(|languages| languages.into_values().flatten().map(|w| normalize(&w)).collect())
        .unwrap_or_default()
}

/// Check if a word is a stop word. Case-insensitive.
#[inline]
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&normalize(word))
}

/// Tokenization configuration.
///
/// Stateless and `Copy`: build one and hand it to everything that needs to
/// agree on what a token is. An index records the analyzer it was built with
/// and analyzes queries with the same one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analyzer {
    /// Drop stop words (checked on whole words, before delimiter splitting).
    pub remove_stop_words: bool,
    /// Split `PowerShot` into `Power` + `Shot`.
    pub split_on_case_change: bool,
    /// Split `H2O` into `H` + `2` + `O`.
    pub split_on_numerics: bool,
    /// Apply the Porter stemmer.
    pub stem: bool,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            remove_stop_words: true,
            split_on_case_change: true,
            split_on_numerics: true,
            stem: true,
        }
    }
}

impl Analyzer {
    /// Turn raw text into its normalized token sequence, in text order.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for word in words(text) {
            if self.remove_stop_words && is_stop_word(word) {
                continue;
            }
            for part in self.split_word(word) {
                let mut token = normalize(part);
                if self.stem {
                    token = stem(&token);
                }
                if !token.is_empty() && token.chars().all(char::is_alphanumeric) {
                    tokens.push(token);
                }
            }
        }
        tokens
    }

    /// Token → occurrence count for `text`.
    pub fn term_frequencies(&self, text: &str) -> HashMap<String, u32> {
        count_terms(self.analyze(text))
    }

    /// Word delimiter stage: split on non-alphanumerics, then on case and
    /// letter/digit transitions as configured.
    fn split_word<'a>(&self, word: &'a str) -> Vec<&'a str> {
        let mut parts = Vec::new();
        for run in word.split(|c: char| !c.is_alphanumeric()) {
            if run.is_empty() {
                continue;
            }
            let mut start = 0;
            let mut prev: Option<char> = None;
            for (i, c) in run.char_indices() {
                if let Some(p) = prev {
                    let case_break = self.split_on_case_change && p.is_lowercase() && c.is_uppercase();
                    let digit_break = self.split_on_numerics && (p.is_numeric() != c.is_numeric());
                    if case_break || digit_break {
                        parts.push(&run[start..i]);
                        start = i;
                    }
                }
                prev = Some(c);
            }
            parts.push(&run[start..]);
        }
        parts
    }
}

/// Word tokenizer: maximal runs of alphanumerics, allowing `'` `.` `_`
/// between two alphanumerics (`don't`, `U.S`, `3.14`).
fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '.' || c == '_'))
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
}

/// Occurrence count of each token.
pub fn count_terms(tokens: impl IntoIterator<Item = String>) -> HashMap<String, u32> {
    let mut tf = HashMap::new();
    for token in tokens {
        *tf.entry(token).or_insert(0) += 1;
    }
    tf
}
