//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use sciqa::{Analyzer, CorpusIndex, StoredDocument};
use tempfile::TempDir;

// Re-export canonical test utilities from sciqa::testing
pub use sciqa::testing::{sample_corpus, ScriptedIndex};

/// Header line of the question files used in tests.
pub const DATASET_HEADER: &str = "id\tquestion\tanswerA\tanswerB\tanswerC\tanswerD";

/// Scratch directory holding one run's files.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a question file: header plus the given raw lines.
    pub fn dataset(&self, name: &str, lines: &[&str]) -> PathBuf {
        let mut contents = String::from(DATASET_HEADER);
        contents.push('\n');
        for line in lines {
            contents.push_str(line);
            contents.push('\n');
        }
        let path = self.path(name);
        fs::write(&path, contents).expect("write dataset");
        path
    }

    pub fn read(&self, name: &str) -> String {
        read(&self.path(name))
    }
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("read file")
}

/// One well-formed question line.
pub fn question(id: &str, text: &str, answers: [&str; 4]) -> String {
    format!("{}\t{}\t{}", id, text, answers.join("\t"))
}

/// Corpus for the freezing point scenario, with unrelated filler.
pub fn freezing_corpus() -> CorpusIndex {
    let mut docs = vec![StoredDocument::new(
        "Freezing point",
        "water reaches its freezing point at 0 degrees",
    )];
    docs.extend(sample_corpus());
    docs.push(StoredDocument::new(
        "Volcanoes",
        "Lava is molten rock that erupts from a volcano.",
    ));
    CorpusIndex::build(docs, Analyzer::default())
}

/// Data lines of a result file, header excluded.
pub fn result_rows(contents: &str) -> Vec<String> {
    contents.lines().skip(1).map(str::to_string).collect()
}
