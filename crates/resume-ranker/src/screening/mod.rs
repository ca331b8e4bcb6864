//! Resume screening core: normalization and TF-IDF ranking.
//!
//! The core is pure and synchronous. It receives already-extracted text and
//! returns an ordered ranking; history, export and file intake belong to the
//! callers.

pub mod normalizer;
pub mod ranking;

#[cfg(test)]
mod tests;

pub use normalizer::{
    load_tokenizer, normalize, NormalizationOptions, Normalizer, RuleBasedTokenizer, Token,
    TokenKind, Tokenizer, TokenizerError, DEFAULT_TOKENIZER_MODEL,
};
pub use ranking::{
    cosine_similarity, Document, RankedResult, ResumeRanker, SparseVector, TfIdfVectorizer,
    VectorizerConfig,
};
