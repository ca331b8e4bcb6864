use std::sync::Arc;

use crate::screening::{
    Document, NormalizationOptions, Normalizer, RankedResult, ResumeRanker, Token, TokenKind,
    Tokenizer, VectorizerConfig,
};

pub(super) const JOB_DESCRIPTION: &str = "Looking for a Python developer with NLP experience";

pub(super) fn sample_documents() -> Vec<Document> {
    vec![
        Document::new("alice.txt", "Python NLP expert, five years' experience."),
        Document::new("bob.txt", "Graphic designer with Adobe skills."),
        Document::new("empty.txt", ""),
    ]
}

pub(super) fn ranker() -> ResumeRanker {
    ResumeRanker::english()
}

pub(super) fn ids(results: &[RankedResult]) -> Vec<&str> {
    results.iter().map(|result| result.id.as_str()).collect()
}

pub(super) fn assert_well_formed(results: &[RankedResult]) {
    for result in results {
        assert!(
            (0.0..=1.0).contains(&result.score),
            "score {} out of bounds for {}",
            result.score,
            result.id
        );
    }
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score, "ranking not descending");
    }
}

/// Splits on whitespace only and treats every token as a word, so tests can
/// swap the tokenizer without touching the ranker.
pub(super) struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn model(&self) -> &str {
        "whitespace"
    }

    fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        text.split_whitespace()
            .map(|text| Token {
                text,
                kind: TokenKind::Word,
            })
            .collect()
    }

    fn is_stop_word(&self, word: &str) -> bool {
        word == "ignored"
    }
}

pub(super) fn whitespace_ranker(options: NormalizationOptions) -> ResumeRanker {
    ResumeRanker::new(
        Normalizer::new(Arc::new(WhitespaceTokenizer), options),
        VectorizerConfig::default(),
    )
}
