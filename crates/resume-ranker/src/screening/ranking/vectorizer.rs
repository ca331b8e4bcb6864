//! TF-IDF vector space fitted over a single batch of texts.
//!
//! Terms are runs of two or more word characters (alphanumeric or `_`) after
//! lowercasing. The vocabulary is sorted, IDF is smoothed by default
//! (`ln((1 + n) / (1 + df)) + 1`) and every row is L2-normalized.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weighting switches for [`TfIdfVectorizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    pub smooth_idf: bool,
    pub sublinear_tf: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            smooth_idf: true,
            sublinear_tf: false,
        }
    }
}

/// Sparse vector as `(term index, weight)` pairs sorted by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn weight(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |(term, _)| *term)
            .map(|position| self.entries[position].1)
            .unwrap_or(0.0)
    }

    pub fn norm(&self) -> f64 {
        self.entries
            .iter()
            .map(|(_, weight)| weight * weight)
            .sum::<f64>()
            .sqrt()
    }

    /// Merge-join over the sorted indices.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut left, mut right) = (0, 0);
        let mut total = 0.0;
        while left < self.entries.len() && right < other.entries.len() {
            let (a_index, a_weight) = self.entries[left];
            let (b_index, b_weight) = other.entries[right];
            match a_index.cmp(&b_index) {
                std::cmp::Ordering::Less => left += 1,
                std::cmp::Ordering::Greater => right += 1,
                std::cmp::Ordering::Equal => {
                    total += a_weight * b_weight;
                    left += 1;
                    right += 1;
                }
            }
        }
        total
    }
}

/// Vocabulary and IDF weights fitted from one corpus.
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    config: VectorizerConfig,
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    /// Fit on `corpus` and return the vectorizer with one vector per text.
    pub fn fit_transform<S: AsRef<str>>(
        corpus: &[S],
        config: VectorizerConfig,
    ) -> (Self, Vec<SparseVector>) {
        let counts: Vec<BTreeMap<String, usize>> = corpus
            .iter()
            .map(|text| term_counts(text.as_ref()))
            .collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for terms in &counts {
            for term in terms.keys() {
                *document_frequency.entry(term.as_str()).or_default() += 1;
            }
        }

        let n = corpus.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (index, (term, df)) in document_frequency.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), index);
            idf.push(inverse_document_frequency(n, df as f64, config.smooth_idf));
        }

        let vectorizer = Self {
            config,
            vocabulary,
            idf,
        };
        let vectors = counts
            .iter()
            .map(|terms| vectorizer.weigh(terms))
            .collect();
        (vectorizer, vectors)
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    #[cfg(test)]
    pub(crate) fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|index| self.idf[index])
    }

    fn weigh(&self, terms: &BTreeMap<String, usize>) -> SparseVector {
        let mut entries: Vec<(usize, f64)> = terms
            .iter()
            .filter_map(|(term, &count)| {
                let index = self.term_index(term)?;
                let tf = if self.config.sublinear_tf {
                    1.0 + (count as f64).ln()
                } else {
                    count as f64
                };
                Some((index, tf * self.idf[index]))
            })
            .collect();
        entries.sort_by_key(|(index, _)| *index);

        let norm = entries
            .iter()
            .map(|(_, weight)| weight * weight)
            .sum::<f64>()
            .sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut entries {
                *weight /= norm;
            }
        }
        SparseVector { entries }
    }
}

fn inverse_document_frequency(n: f64, df: f64, smooth: bool) -> f64 {
    if smooth {
        ((1.0 + n) / (1.0 + df)).ln() + 1.0
    } else {
        (n / df).ln() + 1.0
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lowercased runs of at least two word characters.
pub(crate) fn analyze(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !is_word_char(c))
        .filter(|run| run.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

fn term_counts(text: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for term in analyze(text) {
        *counts.entry(term).or_default() += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn analyzer_drops_single_characters_and_splits_on_non_word_chars() {
        assert_eq!(
            analyze("C++ and node.js, a b2 snake_case"),
            vec!["and", "node", "js", "b2", "snake_case"]
        );
    }

    #[test]
    fn vocabulary_is_sorted_and_idf_is_smoothed() {
        let corpus = ["rust code", "rust code", "java"];
        let (vectorizer, vectors) = TfIdfVectorizer::fit_transform(&corpus, Default::default());

        assert_eq!(vectorizer.vocabulary_len(), 3);
        assert_eq!(vectorizer.term_index("code"), Some(0));
        assert_eq!(vectorizer.term_index("java"), Some(1));
        assert_eq!(vectorizer.term_index("rust"), Some(2));

        let expected_rust = (4.0_f64 / 3.0).ln() + 1.0;
        let expected_java = (4.0_f64 / 2.0).ln() + 1.0;
        assert!((vectorizer.idf("rust").unwrap() - expected_rust).abs() < EPSILON);
        assert!((vectorizer.idf("java").unwrap() - expected_java).abs() < EPSILON);

        for vector in &vectors {
            assert!((vector.norm() - 1.0).abs() < EPSILON);
        }
        assert!((vectors[0].dot(&vectors[1]) - 1.0).abs() < EPSILON);
        assert_eq!(vectors[0].dot(&vectors[2]), 0.0);
    }

    #[test]
    fn unsmoothed_idf_and_sublinear_tf() {
        let config = VectorizerConfig {
            smooth_idf: false,
            sublinear_tf: true,
        };
        let corpus = ["data data data", "data science"];
        let (vectorizer, vectors) = TfIdfVectorizer::fit_transform(&corpus, config);

        assert!((vectorizer.idf("data").unwrap() - 1.0).abs() < EPSILON);
        assert!((vectorizer.idf("science").unwrap() - (2.0_f64.ln() + 1.0)).abs() < EPSILON);
        // single term row normalizes to a unit weight regardless of tf
        let data = vectorizer.term_index("data").unwrap();
        assert!((vectors[0].weight(data) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn empty_vocabulary_yields_empty_vectors() {
        let corpus = ["", "a b c", "!!"];
        let (vectorizer, vectors) = TfIdfVectorizer::fit_transform(&corpus, Default::default());
        assert_eq!(vectorizer.vocabulary_len(), 0);
        assert!(vectors.iter().all(SparseVector::is_empty));
        assert_eq!(vectors[0].norm(), 0.0);
    }

    #[test]
    fn idf_depends_on_the_batch_it_was_fitted_on() {
        let (narrow, _) = TfIdfVectorizer::fit_transform(&["rust", "rust"], Default::default());
        let (wide, _) =
            TfIdfVectorizer::fit_transform(&["rust", "go", "java"], Default::default());

        assert!((narrow.idf("rust").unwrap() - 1.0).abs() < EPSILON);
        assert!((wide.idf("rust").unwrap() - (2.0_f64.ln() + 1.0)).abs() < EPSILON);
    }
}
