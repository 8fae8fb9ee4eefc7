//! Arg-max, tie and fallback behavior of the answer selector.

use crate::common::ScriptedIndex;
use sciqa::{
    AnswerSelector, Choice, Operator, QuestionRecord, ScoringMode, ScoringPass, Selection,
    Strategy, StrategyDescriptor,
};

fn record(answers: [&str; 4]) -> QuestionRecord {
    QuestionRecord {
        id: "1".into(),
        question: "Which one?".into(),
        candidates: answers.map(String::from),
    }
}

fn decided(selection: Selection) -> (Choice, bool) {
    match selection {
        Selection::Decided(d) => (d.choice, d.used_fallback),
        Selection::Undecided => panic!("expected a decision"),
    }
}

#[test]
fn test_tie_goes_to_earlier_candidate() {
    let index = ScriptedIndex::new()
        .with_scores("alpha", None, &[1.0])
        .with_scores("bravo", None, &[2.5])
        .with_scores("charlie", None, &[2.5])
        .with_scores("delta", None, &[0.5]);
    let selector = AnswerSelector::new(&index, Strategy::TopN, 5);
    let selection = selector
        .select(&record(["alpha", "bravo", "charlie", "delta"]))
        .unwrap();
    assert_eq!(decided(selection), (Choice::B, false));
}

#[test]
fn test_relevance_sum_over_top_n() {
    let index = ScriptedIndex::new()
        .with_scores("alpha", None, &[3.0])
        .with_scores("bravo", None, &[1.0, 1.0, 1.0, 1.0]);
    let record = record(["alpha", "bravo", "charlie", "delta"]);

    let narrow = AnswerSelector::new(&index, Strategy::TopN, 1);
    assert_eq!(narrow.select(&record).unwrap().choice(), Some(Choice::A));

    let wide = AnswerSelector::new(&index, Strategy::TopN, 4);
    assert_eq!(wide.select(&record).unwrap().choice(), Some(Choice::B));
}

#[test]
fn test_fallback_runs_when_and_pass_is_exactly_zero() {
    let index = ScriptedIndex::new().with_scores("charlie", Some(Operator::Or), &[0.7]);
    let selector = AnswerSelector::new(&index, Strategy::AndThenOr, 5);
    let selection = selector
        .select(&record(["alpha", "bravo", "charlie", "delta"]))
        .unwrap();
    assert_eq!(decided(selection), (Choice::C, true));
    assert_eq!(index.calls_with(Operator::And), 4);
    assert_eq!(index.calls_with(Operator::Or), 4);
}

#[test]
fn test_tiny_positive_score_blocks_fallback() {
    let index = ScriptedIndex::new()
        .with_scores("delta", Some(Operator::And), &[0.0001])
        .with_scores("alpha", Some(Operator::Or), &[50.0]);
    let selector = AnswerSelector::new(&index, Strategy::AndThenOr, 5);
    let selection = selector
        .select(&record(["alpha", "bravo", "charlie", "delta"]))
        .unwrap();
    assert_eq!(decided(selection), (Choice::D, false));
    assert_eq!(index.calls_with(Operator::Or), 0);
}

#[test]
fn test_no_evidence_anywhere_is_undecided() {
    let index = ScriptedIndex::new();
    for strategy in Strategy::ALL {
        let selector = AnswerSelector::new(&index, strategy, 5);
        let selection = selector
            .select(&record(["alpha", "bravo", "charlie", "delta"]))
            .unwrap();
        assert_eq!(selection, Selection::Undecided, "{strategy}");
    }
}

#[test]
fn test_fallback_without_evidence_is_undecided() {
    let index = ScriptedIndex::new();
    let selector = AnswerSelector::new(&index, Strategy::AndThenOrCount, 5);
    let selection = selector
        .select(&record(["alpha", "bravo", "charlie", "delta"]))
        .unwrap();
    assert_eq!(selection, Selection::Undecided);
    assert_eq!(index.calls().len(), 8);
}

#[test]
fn test_count_fallback_uses_term_overlap() {
    // The OR pass returns the same single hit for every candidate; only the
    // hit text decides.
    let index = ScriptedIndex::new().with_texts(
        "text:",
        Some(Operator::Or),
        &["Copper and copper wire conduct electricity; rubber does not."],
    );
    let selector = AnswerSelector::new(&index, Strategy::AndThenOrCount, 5);
    let selection = selector
        .select(&record(["wood", "rubber", "copper", "glass"]))
        .unwrap();
    assert_eq!(decided(selection), (Choice::C, true));
}

#[test]
fn test_or_count_ignores_relevance() {
    let index = ScriptedIndex::new()
        .with_texts("salt", None, &["Sugar dissolves in water."])
        .with_scores("sugar", None, &[0.1]);
    let selector = AnswerSelector::new(&index, Strategy::OrCount, 5);
    let selection = selector
        .select(&record(["salt", "sugar", "sand", "oil"]))
        .unwrap();
    // Salt's hit mentions no salt; sugar's hit has no text at all.
    assert_eq!(selection, Selection::Undecided);
}

#[test]
fn test_query_error_fails_the_question() {
    let index = ScriptedIndex::new()
        .with_scores("alpha", None, &[9.0])
        .failing("charlie");
    let selector = AnswerSelector::new(&index, Strategy::TopN, 5);
    let err = selector
        .select(&record(["alpha", "bravo", "charlie", "delta"]))
        .unwrap_err();
    assert!(err.is_query_error());
}

#[test]
fn test_custom_descriptor() {
    let pass = ScoringPass::new(
        Operator::Or,
        sciqa::QueryTarget::Text,
        ScoringMode::RelevanceSum,
    );
    let descriptor = StrategyDescriptor {
        primary: pass,
        fallback: None,
    };
    let index = ScriptedIndex::new().with_scores("text:(Which one  delta)", None, &[1.0]);
    let selector = AnswerSelector::with_descriptor(&index, descriptor, 3);
    let selection = selector
        .select(&record(["alpha", "bravo", "charlie", "delta"]))
        .unwrap();
    assert_eq!(selection.choice(), Some(Choice::D));
}
