use tracing::debug;

use super::document::{Document, RankedResult};
use super::similarity::cosine_similarity;
use super::vectorizer::{TfIdfVectorizer, VectorizerConfig};
use crate::screening::normalizer::{NormalizationOptions, Normalizer};

/// Ranks candidate documents against a query by TF-IDF cosine similarity.
///
/// The vector space is fitted per call over the query plus the surviving
/// documents, so scores are only comparable within one batch.
#[derive(Debug, Clone)]
pub struct ResumeRanker {
    normalizer: Normalizer,
    vectorizer: VectorizerConfig,
}

impl ResumeRanker {
    pub fn new(normalizer: Normalizer, vectorizer: VectorizerConfig) -> Self {
        Self {
            normalizer,
            vectorizer,
        }
    }

    /// English tokenizer, default normalization and weighting.
    pub fn english() -> Self {
        Self::new(
            Normalizer::english(NormalizationOptions::default()),
            VectorizerConfig::default(),
        )
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn vectorizer_config(&self) -> VectorizerConfig {
        self.vectorizer
    }

    /// Same tokenizer and weighting with different normalization switches.
    pub fn with_normalization(&self, options: NormalizationOptions) -> Self {
        Self::new(self.normalizer.with_options(options), self.vectorizer)
    }

    /// Rank `documents` against `query`, best match first.
    ///
    /// Blank documents are dropped; the result has one entry per remaining
    /// document. Ties keep input order.
    pub fn rank(&self, query: &str, documents: &[Document]) -> Vec<RankedResult> {
        let candidates: Vec<&Document> = documents.iter().filter(|doc| !doc.is_blank()).collect();
        if candidates.is_empty() {
            debug!(submitted = documents.len(), "no rankable documents");
            return Vec::new();
        }

        let mut corpus = Vec::with_capacity(candidates.len() + 1);
        corpus.push(self.normalizer.normalize(query));
        corpus.extend(
            candidates
                .iter()
                .map(|doc| self.normalizer.normalize(&doc.text)),
        );

        let (vectorizer, vectors) = TfIdfVectorizer::fit_transform(&corpus, self.vectorizer);
        debug!(
            submitted = documents.len(),
            ranked = candidates.len(),
            vocabulary = vectorizer.vocabulary_len(),
            "fitted ranking vector space"
        );

        let (query_vector, document_vectors) = vectors.split_at(1);
        let mut ranked: Vec<RankedResult> = candidates
            .into_iter()
            .zip(document_vectors)
            .map(|(doc, vector)| RankedResult {
                id: doc.id.clone(),
                text: doc.text.clone(),
                score: cosine_similarity(&query_vector[0], vector),
            })
            .collect();

        // stable: equal scores keep input order
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    /// Rank bare texts, identified by position (`resume-1`, `resume-2`, ...).
    pub fn rank_texts<S: AsRef<str>>(&self, query: &str, texts: &[S]) -> Vec<RankedResult> {
        let documents: Vec<Document> = texts
            .iter()
            .enumerate()
            .map(|(index, text)| Document::new(format!("resume-{}", index + 1), text.as_ref()))
            .collect();
        self.rank(query, &documents)
    }
}

impl Default for ResumeRanker {
    fn default() -> Self {
        Self::english()
    }
}
