//! End to end: corpus, index file, question file, result file.

use std::fs;

use crate::common::{freezing_corpus, question, Workspace};
use sciqa::{open_index, run_index, write_index, BatchRunner, RunConfig, Strategy};

const FREEZING: &str = "A liquid turns solid at its __________ point.";

fn freezing_line() -> String {
    question("7", FREEZING, ["freezing", "boiling", "melting", "evaporation"])
}

fn answer_with(ws: &Workspace, strategy: Strategy, top_n: usize) -> String {
    let index_path = ws.path("corpus.scqa");
    write_index(&freezing_corpus(), &index_path).unwrap();
    let config = RunConfig {
        index: index_path,
        input: ws.dataset("questions.tsv", &[freezing_line().as_str()]),
        output: ws.path("answers.csv"),
        top_n,
        strategy,
    };

    let index = open_index(&config.index).unwrap();
    let report = BatchRunner::new(&index, &config).unwrap().run().unwrap();
    index.close();
    assert_eq!(report.rows_read, 1);
    ws.read("answers.csv")
}

#[test]
fn test_freezing_point_question() {
    let ws = Workspace::new();
    assert_eq!(answer_with(&ws, Strategy::TopN, 5), "id,correctAnswer\n7,A\n");
}

#[test]
fn test_every_strategy_finds_freezing() {
    for strategy in Strategy::ALL {
        let ws = Workspace::new();
        assert_eq!(
            answer_with(&ws, strategy, 5),
            "id,correctAnswer\n7,A\n",
            "{strategy}"
        );
    }
}

#[test]
fn test_single_hit_is_enough() {
    let ws = Workspace::new();
    assert_eq!(answer_with(&ws, Strategy::TopN, 1), "id,correctAnswer\n7,A\n");
}

#[test]
fn test_from_corpus_file() {
    let ws = Workspace::new();
    let corpus = ws.path("corpus.jsonl");
    fs::write(
        &corpus,
        concat!(
            "{\"title\":\"Freezing point\",\"text\":\"Water reaches its freezing point at 0 degrees.\"}\n",
            "{\"title\":\"Steam\",\"text\":\"Water turns into steam when heated.\"}\n",
            "{\"title\":\"Volcanoes\",\"text\":\"Lava is molten rock.\"}\n",
        ),
    )
    .unwrap();
    let keywords = ws.path("keywords.txt");
    fs::write(&keywords, "Water\n").unwrap();

    let index_path = ws.path("corpus.scqa");
    let build = run_index(&corpus, &index_path, Some(&keywords)).unwrap();
    assert_eq!(build.articles, 3);
    assert_eq!(build.indexed, 2);

    let index = open_index(&index_path).unwrap();
    let steam = question(
        "8",
        "What does heated water turn into?",
        ["ice", "steam", "salt", "sand"],
    );
    let input = ws.dataset("questions.tsv", &[freezing_line().as_str(), steam.as_str()]);
    let output = ws.path("answers.csv");
    let report = BatchRunner::with_strategy(&index, Strategy::TopN, 3, &input, &output)
        .unwrap()
        .run()
        .unwrap();
    index.close();

    assert_eq!(report.decided, 2);
    assert_eq!(ws.read("answers.csv"), "id,correctAnswer\n7,A\n8,B\n");
}

#[test]
fn test_corrupt_index_file_is_rejected() {
    let ws = Workspace::new();
    let path = ws.path("corpus.scqa");
    write_index(&freezing_corpus(), &path).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    let middle = bytes.len() / 2;
    bytes[middle] ^= 0xFF;
    fs::write(&path, &bytes).unwrap();
    assert!(open_index(&path).is_err());

    bytes.truncate(middle);
    fs::write(&path, &bytes).unwrap();
    assert!(open_index(&path).is_err());
}
