// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search collaborator.
//!
//! Answer scoring only ever talks to a [`SearchIndex`]: analyze some text,
//! run a query string, get ranked hits back. [`CorpusIndex`] is the concrete
//! in-memory implementation: an inverted index over the `title` and `text`
//! fields with stored field values, ranked with BM25.
//!
//! # Ranking
//!
//! ```text
//! idf(t)      = ln(1 + (N - df + 0.5) / (df + 0.5))
//! score(t, d) = idf(t) · tf·(k1 + 1) / (tf + k1·(1 - b + b·|d| / avgdl))
//! ```
//!
//! Field statistics (`N`, `df`, `avgdl`) are per field. Boolean groups sum the
//! scores of their matching clauses.
//!
//! # Invariants
//!
//! 1. Each posting list is sorted by doc id, with one posting per document.
//! 2. `doc_lengths[field].len() == docs.len()` for every field.
//! 3. Every posting's `tf` is at least 1.

pub mod storage;

use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::{count_terms, Analyzer};
use crate::config::{BM25_B, BM25_K1};
use crate::error::Result;
use crate::query::{Occur, Query, QueryParser};
use crate::types::{DocId, Field, Hit, LengthNorm, Operator, StoredDocument};

pub use storage::{open_index, write_index};

/// One search call.
#[derive(Debug, Clone, Copy)]
pub struct SearchRequest<'q> {
    /// Classic query syntax.
    pub query: &'q str,
    /// Field for terms without a `field:` prefix.
    pub default_field: Field,
    /// Operator between clauses with no explicit conjunction.
    pub operator: Operator,
    /// Maximum number of hits returned.
    pub top_n: usize,
    pub length_norm: LengthNorm,
}

/// What answer scoring needs from an index.
pub trait SearchIndex {
    /// Normalized tokens of `text`, exactly as documents were analyzed.
    fn analyze(&self, text: &str) -> Vec<String>;

    /// Token → occurrence count of `text` under [`SearchIndex::analyze`].
    fn term_frequencies(&self, text: &str) -> HashMap<String, u32> {
        count_terms(self.analyze(text))
    }

    /// Ranked hits for a query. Fails with [`crate::Error::QueryParse`] when
    /// the query string is not valid syntax.
    fn search(&self, request: &SearchRequest<'_>) -> Result<Vec<Hit<'_>>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub tf: u32,
}

/// Postings and length statistics for one field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldIndex {
    postings: HashMap<String, Vec<Posting>>,
    doc_lengths: Vec<u32>,
    total_length: u64,
}

impl FieldIndex {
    pub fn postings(&self, term: &str) -> &[Posting] {
        self.postings.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    pub fn avg_doc_length(&self) -> f64 {
        if self.doc_lengths.is_empty() {
            0.0
        } else {
            self.total_length as f64 / self.doc_lengths.len() as f64
        }
    }

    fn push_document(&mut self, doc_id: DocId, frequencies: HashMap<String, u32>, length: u32) {
        for (term, tf) in frequencies {
            self.postings.entry(term).or_default().push(Posting { doc_id, tf });
        }
        self.doc_lengths.push(length);
        self.total_length += u64::from(length);
    }

    fn bm25(&self, tf: u32, doc_id: DocId, idf: f64, b: f64) -> f64 {
        let avgdl = self.avg_doc_length();
        let len = f64::from(self.doc_lengths.get(doc_id.as_usize()).copied().unwrap_or(0));
        let norm = if avgdl > 0.0 { 1.0 - b + b * len / avgdl } else { 1.0 };
        let tf = f64::from(tf);
        idf * tf * (BM25_K1 + 1.0) / (tf + BM25_K1 * norm)
    }
}

/// Per-document analysis output, produced in parallel and merged in order.
struct AnalyzedDocument {
    fields: [(HashMap<String, u32>, u32); 2],
}

impl AnalyzedDocument {
    fn new(doc: &StoredDocument, analyzer: &Analyzer) -> Self {
        let analyze = |field: Field| {
            let tf = analyzer.term_frequencies(doc.field(field));
            let length: u32 = tf.values().sum();
            (tf, length)
        };
        Self {
            fields: [analyze(Field::Title), analyze(Field::Text)],
        }
    }
}

/// In-memory BM25 index over `title` and `text`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusIndex {
    analyzer: Analyzer,
    docs: Vec<StoredDocument>,
    fields: [FieldIndex; 2],
}

impl CorpusIndex {
    /// Analyze and index `docs`. Doc ids follow input order.
    pub fn build(docs: Vec<StoredDocument>, analyzer: Analyzer) -> Self {
        #[cfg(feature = "parallel")]
        let analyzed: Vec<AnalyzedDocument> = docs
            .par_iter()
            .map(|doc| AnalyzedDocument::new(doc, &analyzer))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let analyzed: Vec<AnalyzedDocument> = docs
            .iter()
            .map(|doc| AnalyzedDocument::new(doc, &analyzer))
            .collect();

        let mut fields: [FieldIndex; 2] = Default::default();
        for (i, doc) in analyzed.into_iter().enumerate() {
            let doc_id = DocId(i as u32);
            for (slot, (tf, length)) in doc.fields.into_iter().enumerate() {
                fields[slot].push_document(doc_id, tf, length);
            }
        }

        tracing::debug!(
            docs = docs.len(),
            title_terms = fields[0].term_count(),
            text_terms = fields[1].term_count(),
            "built corpus index"
        );

        Self {
            analyzer,
            docs,
            fields,
        }
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn doc(&self, doc_id: DocId) -> Option<&StoredDocument> {
        self.docs.get(doc_id.as_usize())
    }

    pub fn field(&self, field: Field) -> &FieldIndex {
        &self.fields[field.slot()]
    }

    /// Checks the structural invariants. Used after loading a snapshot.
    pub(crate) fn is_well_formed(&self) -> bool {
        let n = self.docs.len();
        self.fields.iter().all(|f| {
            f.doc_lengths.len() == n
                && f.postings.values().all(|list| {
                    list.iter().all(|p| p.tf > 0 && p.doc_id.as_usize() < n)
                        && list.windows(2).all(|w| w[0].doc_id < w[1].doc_id)
                })
        })
    }

    /// Release the index. Dropping does the same; this makes the end of a run
    /// visible in the log.
    pub fn close(self) {
        tracing::info!(docs = self.docs.len(), "index closed");
    }

    fn idf(&self, df: usize) -> f64 {
        let n = self.docs.len() as f64;
        let df = df as f64;
        (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
    }

    fn evaluate(&self, query: &Query, b: f64) -> HashMap<DocId, f64> {
        match query {
            Query::Term { field, term } => {
                let index = self.field(*field);
                let postings = index.postings(term);
                let idf = self.idf(postings.len());
                postings
                    .iter()
                    .map(|p| (p.doc_id, index.bm25(p.tf, p.doc_id, idf, b)))
                    .collect()
            }
            Query::Boolean(clauses) => {
                let mut must: Vec<HashMap<DocId, f64>> = Vec::new();
                let mut should: Vec<HashMap<DocId, f64>> = Vec::new();
                let mut must_not: Vec<HashMap<DocId, f64>> = Vec::new();
                for clause in clauses {
                    let scores = self.evaluate(&clause.query, b);
                    match clause.occur {
                        Occur::Must => must.push(scores),
                        Occur::Should => should.push(scores),
                        Occur::MustNot => must_not.push(scores),
                    }
                }

                let mut matched: HashMap<DocId, f64> = match must.split_first() {
                    Some((first, rest)) => first
                        .iter()
                        .filter(|(doc, _)| rest.iter().all(|m| m.contains_key(doc)))
                        .map(|(doc, score)| {
                            let total = score + rest.iter().filter_map(|m| m.get(doc)).sum::<f64>();
                            (*doc, total)
                        })
                        .collect(),
                    None => {
                        let mut union = HashMap::new();
                        for scores in &should {
                            for doc in scores.keys() {
                                union.insert(*doc, 0.0);
                            }
                        }
                        union
                    }
                };

                for (doc, score) in matched.iter_mut() {
                    *score += should.iter().filter_map(|s| s.get(doc)).sum::<f64>();
                }
                matched.retain(|doc, _| !must_not.iter().any(|m| m.contains_key(doc)));
                matched
            }
        }
    }
}

impl SearchIndex for CorpusIndex {
    fn analyze(&self, text: &str) -> Vec<String> {
        self.analyzer.analyze(text)
    }

    fn search(&self, request: &SearchRequest<'_>) -> Result<Vec<Hit<'_>>> {
        let parser = QueryParser::new(self.analyzer, request.default_field, request.operator);
        let query = parser.parse(request.query)?;
        let length_weight = match request.length_norm {
            LengthNorm::Classic => BM25_B,
            LengthNorm::Disabled => 0.0,
        };

        let mut hits: Vec<Hit<'_>> = self
            .evaluate(&query, length_weight)
            .into_iter()
            .filter_map(|(doc_id, score)| {
                self.doc(doc_id).map(|doc| Hit { doc_id, score, doc })
            })
            .collect();
        hits.sort_by(|x, y| y.score.total_cmp(&x.score).then(x.doc_id.cmp(&y.doc_id)));
        hits.truncate(request.top_n);
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> CorpusIndex {
        CorpusIndex::build(
            vec![
                StoredDocument::new("Water", "Water reaches its freezing point at 0 degrees."),
                StoredDocument::new("Iron", "Iron has a melting point of 1538 degrees."),
                StoredDocument::new(
                    "Weather",
                    "Rain and snow fall from clouds. Rain is water. Snow is frozen water \
                     that falls slowly on cold days in the northern mountains.",
                ),
            ],
            Analyzer::default(),
        )
    }

    fn request(query: &str, operator: Operator) -> SearchRequest<'_> {
        SearchRequest {
            query,
            default_field: Field::Text,
            operator,
            top_n: 10,
            length_norm: LengthNorm::Classic,
        }
    }

    fn ids(hits: &[Hit<'_>]) -> Vec<u32> {
        hits.iter().map(|h| h.doc_id.get()).collect()
    }

    #[test]
    fn test_build_keeps_invariants() {
        let index = corpus();
        assert!(index.is_well_formed());
        assert_eq!(index.len(), 3);
        assert_eq!(index.field(Field::Text).postings("water").len(), 2);
        assert_eq!(index.field(Field::Text).postings("water")[1].tf, 2);
    }

    #[test]
    fn test_or_matches_any_and_requires_all() {
        let index = corpus();
        let or = index.search(&request("freezing melting", Operator::Or)).unwrap();
        assert_eq!(ids(&or).len(), 2);
        let and = index.search(&request("freezing melting", Operator::And)).unwrap();
        assert!(and.is_empty());
        let and = index.search(&request("freezing point", Operator::And)).unwrap();
        assert_eq!(ids(&and), vec![0]);
    }

    #[test]
    fn test_hits_sorted_and_truncated() {
        let index = corpus();
        let mut req = request("water degrees", Operator::Or);
        let hits = index.search(&req).unwrap();
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
        req.top_n = 1;
        assert_eq!(index.search(&req).unwrap().len(), 1);
    }

    #[test]
    fn test_must_not_excludes() {
        let index = corpus();
        let hits = index.search(&request("water NOT snow", Operator::Or)).unwrap();
        assert_eq!(ids(&hits), vec![0]);
    }

    #[test]
    fn test_title_or_text_groups() {
        let index = corpus();
        let hits = index
            .search(&request("title:(iron) OR text:(iron)", Operator::Or))
            .unwrap();
        assert_eq!(ids(&hits), vec![1]);
        let title_only = index.search(&request("title:(iron)", Operator::Or)).unwrap();
        assert!(hits[0].score > title_only[0].score);
    }

    #[test]
    fn test_disabled_length_norm_favors_long_documents() {
        let index = corpus();
        let classic = index.search(&request("water", Operator::Or)).unwrap();
        let mut req = request("water", Operator::Or);
        req.length_norm = LengthNorm::Disabled;
        let flat = index.search(&req).unwrap();
        let long_classic = classic.iter().find(|h| h.doc_id == DocId(2)).unwrap().score;
        let long_flat = flat.iter().find(|h| h.doc_id == DocId(2)).unwrap().score;
        assert!(long_flat > long_classic);
    }

    #[test]
    fn test_parse_error_surfaces() {
        let index = corpus();
        let err = index.search(&request("water AND", Operator::Or)).unwrap_err();
        assert!(err.is_query_error());
    }

    #[test]
    fn test_stop_word_only_query_matches_nothing() {
        let index = corpus();
        assert!(index.search(&request("the of and", Operator::Or)).unwrap().is_empty());
    }
}
