//! Resumable batch runs over question files.

use std::fs;

use crate::common::{question, read, result_rows, ScriptedIndex, Workspace, DATASET_HEADER};
use sciqa::{BatchRunner, RowOutcome, RunReport, Strategy};

/// Every question's second candidate is the only one with evidence.
fn zebra_index() -> ScriptedIndex {
    ScriptedIndex::new().with_scores("zebra", None, &[1.0])
}

fn zebra_question(id: &str) -> String {
    question(id, "Which animal is striped?", ["horse", "zebra", "donkey", "mule"])
}

fn dataset_lines(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| zebra_question(id)).collect()
}

fn run(ws: &Workspace, index: &ScriptedIndex, lines: &[String]) -> RunReport {
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let input = ws.dataset("questions.tsv", &refs);
    BatchRunner::with_strategy(index, Strategy::TopN, 5, &input, &ws.path("answers.csv"))
        .unwrap()
        .run()
        .unwrap()
}

#[test]
fn test_fresh_run_writes_header_once() {
    let ws = Workspace::new();
    let report = run(&ws, &zebra_index(), &dataset_lines(&["1", "2", "3"]));

    assert_eq!(ws.read("answers.csv"), "id,correctAnswer\n1,B\n2,B\n3,B\n");
    assert_eq!(report.rows_read, 3);
    assert_eq!(report.decided, 3);
    assert_eq!(report.resumed_from, None);
}

#[test]
fn test_resume_matches_uninterrupted_run() {
    let ids = ["10", "11", "12", "13", "14"];
    let lines = dataset_lines(&ids);

    let continuous = Workspace::new();
    run(&continuous, &zebra_index(), &lines);
    let expected = continuous.read("answers.csv");

    for answered in 0..=ids.len() {
        let ws = Workspace::new();
        // A run stopped after `answered` rows left exactly this prefix behind.
        let mut partial = String::from("id,correctAnswer\n");
        for id in &ids[..answered] {
            partial.push_str(&format!("{},B\n", id));
        }
        fs::write(ws.path("answers.csv"), &partial).unwrap();

        let index = zebra_index();
        let report = run(&ws, &index, &lines);
        assert_eq!(ws.read("answers.csv"), expected, "stopped after {answered}");
        assert_eq!(report.replayed, answered);
        assert_eq!(report.decided, ids.len() - answered);
        // Replayed rows are never searched again.
        assert_eq!(index.calls().len(), 4 * (ids.len() - answered));
    }
}

#[test]
fn test_second_run_over_finished_output_appends_nothing() {
    let ws = Workspace::new();
    let lines = dataset_lines(&["1", "2"]);
    run(&ws, &zebra_index(), &lines);
    let first = ws.read("answers.csv");

    let report = run(&ws, &zebra_index(), &lines);
    assert_eq!(ws.read("answers.csv"), first);
    assert_eq!(report.resumed_from.as_deref(), Some("2"));
    assert!(report.checkpoint_found);
    assert_eq!(report.decided, 0);
}

#[test]
fn test_torn_last_row_is_answered_again() {
    let ws = Workspace::new();
    fs::write(ws.path("answers.csv"), "id,correctAnswer\n1,B\n2").unwrap();

    let report = run(&ws, &zebra_index(), &dataset_lines(&["1", "2", "3"]));
    assert_eq!(report.resumed_from.as_deref(), Some("1"));
    assert_eq!(report.decided, 2);

    assert_eq!(ws.read("answers.csv"), "id,correctAnswer\n1,B\n2,B\n3,B\n");
}

#[test]
fn test_torn_row_missing_its_letter_is_cut_off() {
    let ws = Workspace::new();
    fs::write(ws.path("answers.csv"), "id,correctAnswer\n1,B\n2,").unwrap();

    let report = run(&ws, &zebra_index(), &dataset_lines(&["1", "2", "3"]));
    assert_eq!(report.resumed_from.as_deref(), Some("1"));
    assert_eq!(result_rows(&ws.read("answers.csv")), ["1,B", "2,B", "3,B"]);
}

#[test]
fn test_trailing_blank_line_keeps_checkpoint() {
    let ws = Workspace::new();
    fs::write(ws.path("answers.csv"), "id,correctAnswer\n1,B\n2,B\n\n").unwrap();

    let index = zebra_index();
    let report = run(&ws, &index, &dataset_lines(&["1", "2", "3"]));
    assert_eq!(report.resumed_from.as_deref(), Some("2"));
    assert_eq!(report.replayed, 2);
    assert_eq!(report.decided, 1);
    assert_eq!(index.calls().len(), 4);

    let rows = result_rows(&ws.read("answers.csv"));
    let ids: Vec<&str> = rows.iter().filter_map(|row| row.split(',').next()).collect();
    assert_eq!(ids, ["1", "2", "", "3"]);
}

#[test]
fn test_torn_but_complete_row_counts_as_written() {
    let ws = Workspace::new();
    fs::write(ws.path("answers.csv"), "id,correctAnswer\n1,B\n2,B").unwrap();

    let report = run(&ws, &zebra_index(), &dataset_lines(&["1", "2", "3"]));
    assert_eq!(report.resumed_from.as_deref(), Some("2"));
    assert_eq!(ws.read("answers.csv"), "id,correctAnswer\n1,B\n2,B\n3,B\n");
}

#[test]
fn test_header_only_output_starts_from_the_top() {
    let ws = Workspace::new();
    fs::write(ws.path("answers.csv"), "id,correctAnswer\n").unwrap();

    let report = run(&ws, &zebra_index(), &dataset_lines(&["1", "2"]));
    assert_eq!(report.resumed_from, None);
    assert_eq!(ws.read("answers.csv"), "id,correctAnswer\n1,B\n2,B\n");
}

#[test]
fn test_malformed_rows_produce_no_output() {
    let ws = Workspace::new();
    let lines = vec![
        zebra_question("1"),
        "2\tToo few\thorse\tzebra\tdonkey".to_string(),
        "3\tToo many\thorse\tzebra\tdonkey\tmule\tpony".to_string(),
        String::new(),
        zebra_question("4"),
    ];
    let report = run(&ws, &zebra_index(), &lines);

    assert_eq!(result_rows(&ws.read("answers.csv")), ["1,B", "4,B"]);
    assert_eq!(report.malformed, 3);
    assert_eq!(report.decided, 2);
}

#[test]
fn test_invalid_utf8_row_does_not_stop_the_run() {
    let ws = Workspace::new();
    let mut bytes = format!("{}\n{}", DATASET_HEADER, zebra_question("1")).into_bytes();
    bytes.extend_from_slice(b"\n2\t\xff\xfe broken\n");
    bytes.extend_from_slice(b"3\tWhich animal is \xe9 striped?\thorse\tzebra\tdonkey\tmule\n");
    bytes.extend_from_slice(zebra_question("4").as_bytes());
    bytes.push(b'\n');
    let input = ws.path("questions.tsv");
    fs::write(&input, bytes).unwrap();

    let report = BatchRunner::with_strategy(
        &zebra_index(),
        Strategy::TopN,
        5,
        &input,
        &ws.path("answers.csv"),
    )
    .unwrap()
    .run()
    .unwrap();

    assert_eq!(report.rows_read, 4);
    assert_eq!(report.malformed, 1);
    assert_eq!(result_rows(&ws.read("answers.csv")), ["1,B", "3,B", "4,B"]);
}

#[test]
fn test_empty_tokens_between_tabs_are_ignored() {
    let ws = Workspace::new();
    let lines = vec!["5\t\tWhich animal is striped?\thorse\tzebra\t\tdonkey\tmule".to_string()];
    run(&ws, &zebra_index(), &lines);
    assert_eq!(result_rows(&ws.read("answers.csv")), ["5,B"]);
}

#[test]
fn test_undecided_and_failed_questions_are_skipped() {
    let ws = Workspace::new();
    let index = zebra_index().failing("lava");
    let lines = vec![
        zebra_question("1"),
        question("2", "Which is a color?", ["red", "blue", "green", "pink"]),
        question("3", "Which is hot?", ["ice", "lava", "snow", "rain"]),
        zebra_question("4"),
    ];

    let mut outcomes = Vec::new();
    let input = {
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        ws.dataset("questions.tsv", &refs)
    };
    let output = ws.path("answers.csv");
    let report = BatchRunner::with_strategy(&index, Strategy::TopN, 5, &input, &output)
        .unwrap()
        .run_with(|outcome| outcomes.push(outcome.clone()))
        .unwrap();

    assert_eq!(result_rows(&ws.read("answers.csv")), ["1,B", "4,B"]);
    assert_eq!(report.undecided, 1);
    assert_eq!(report.failed, 1);
    assert!(matches!(&outcomes[1], RowOutcome::Undecided { id } if id == "2"));
    assert!(matches!(&outcomes[2], RowOutcome::Failed { id, .. } if id == "3"));
}

#[test]
fn test_missing_checkpoint_answers_nothing() {
    let ws = Workspace::new();
    fs::write(ws.path("answers.csv"), "id,correctAnswer\n99,C\n").unwrap();

    let index = zebra_index();
    let report = run(&ws, &index, &dataset_lines(&["1", "2"]));
    assert_eq!(report.resumed_from.as_deref(), Some("99"));
    assert!(!report.checkpoint_found);
    assert_eq!(report.replayed, 2);
    assert_eq!(report.decided, 0);
    assert!(index.calls().is_empty());
    assert_eq!(ws.read("answers.csv"), "id,correctAnswer\n99,C\n");
}

#[test]
fn test_checkpoint_matches_malformed_row_id() {
    let ws = Workspace::new();
    fs::write(ws.path("answers.csv"), "id,correctAnswer\n2,A\n").unwrap();
    let lines = vec![
        zebra_question("1"),
        "2\tbroken row".to_string(),
        zebra_question("3"),
    ];

    let report = run(&ws, &zebra_index(), &lines);
    assert!(report.checkpoint_found);
    assert_eq!(report.replayed, 2);
    assert_eq!(result_rows(&ws.read("answers.csv")), ["2,A", "3,B"]);
}

#[test]
fn test_empty_dataset() {
    let ws = Workspace::new();
    let report = run(&ws, &zebra_index(), &[]);
    assert_eq!(report, RunReport::default());
    assert_eq!(read(&ws.path("answers.csv")), "id,correctAnswer\n");
}
