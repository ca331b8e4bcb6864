use super::common::*;
use crate::screening::Document;

#[test]
fn ties_keep_input_order() {
    let documents = vec![
        Document::new("first", "python"),
        Document::new("blank", " "),
        Document::new("second", "python"),
        Document::new("third", "python"),
    ];
    let results = ranker().rank("python developer", &documents);

    assert_eq!(ids(&results), vec!["first", "second", "third"]);
    assert_eq!(results[0].score, results[2].score);
}

#[test]
fn zero_scores_keep_input_order_behind_matches() {
    let documents = vec![
        Document::new("z1", "watercolor painting"),
        Document::new("hit", "python developer"),
        Document::new("z2", "carpentry"),
    ];
    let results = ranker().rank("python developer", &documents);

    assert_eq!(ids(&results), vec!["hit", "z1", "z2"]);
}

#[test]
fn repeated_rankings_are_bit_identical() {
    let documents = vec![
        Document::new("a", "Senior Python engineer; NLP, spaCy and scikit-learn."),
        Document::new("b", "Data scientist: Python, pandas, NLP pipelines."),
        Document::new("c", "Frontend developer (React, TypeScript)."),
        Document::new("d", ""),
    ];
    let first = ranker().rank(JOB_DESCRIPTION, &documents);
    let second = ranker().rank(JOB_DESCRIPTION, &documents);

    assert_eq!(first.len(), second.len());
    for (left, right) in first.iter().zip(&second) {
        assert_eq!(left.id, right.id);
        assert_eq!(left.score.to_bits(), right.score.to_bits());
    }
    assert_well_formed(&first);
}

#[test]
fn scores_are_batch_relative() {
    let query = "rust developer";
    let alone = ranker().rank(query, &[Document::new("x", "rust developer tokio")]);
    let crowded = ranker().rank(
        query,
        &[
            Document::new("x", "rust developer tokio"),
            Document::new("y", "rust"),
            Document::new("z", "rust"),
        ],
    );

    let crowded_x = crowded
        .iter()
        .find(|result| result.id == "x")
        .expect("x ranked");
    assert_ne!(alone[0].score.to_bits(), crowded_x.score.to_bits());
}
