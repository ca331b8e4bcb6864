//! Text normalization: lowercase, tokenize, drop punctuation and (optionally)
//! stop-words, then rejoin with single spaces.

mod stopwords;
mod tokenizer;

pub use tokenizer::{
    load_tokenizer, RuleBasedTokenizer, Token, TokenKind, Tokenizer, TokenizerError,
    DEFAULT_TOKENIZER_MODEL,
};

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Switches applied by [`Normalizer::normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationOptions {
    pub remove_punctuation: bool,
    pub remove_stopwords: bool,
    pub lowercase: bool,
}

impl Default for NormalizationOptions {
    fn default() -> Self {
        Self {
            remove_punctuation: true,
            remove_stopwords: false,
            lowercase: true,
        }
    }
}

impl NormalizationOptions {
    /// Defaults plus stop-word removal.
    pub fn without_stopwords() -> Self {
        Self {
            remove_stopwords: true,
            ..Self::default()
        }
    }
}

/// Pure text normalizer bound to a tokenizer loaded at startup.
#[derive(Clone)]
pub struct Normalizer {
    tokenizer: Arc<dyn Tokenizer>,
    options: NormalizationOptions,
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("model", &self.tokenizer.model())
            .field("options", &self.options)
            .finish()
    }
}

impl Normalizer {
    pub fn new(tokenizer: Arc<dyn Tokenizer>, options: NormalizationOptions) -> Self {
        Self { tokenizer, options }
    }

    /// English rule-based tokenizer with the given options.
    pub fn english(options: NormalizationOptions) -> Self {
        Self::new(Arc::new(RuleBasedTokenizer::english()), options)
    }

    pub fn options(&self) -> NormalizationOptions {
        self.options
    }

    pub fn model(&self) -> &str {
        self.tokenizer.model()
    }

    /// Same tokenizer, different switches.
    pub fn with_options(&self, options: NormalizationOptions) -> Self {
        Self::new(self.tokenizer.clone(), options)
    }

    pub fn normalize(&self, text: &str) -> String {
        let options = self.options;
        let text: Cow<'_, str> = if options.lowercase {
            Cow::Owned(text.to_lowercase())
        } else {
            Cow::Borrowed(text)
        };

        self.tokenizer
            .tokenize(&text)
            .into_iter()
            .filter(|token| !(options.remove_punctuation && token.is_punct()))
            .filter(|token| !(options.remove_stopwords && self.tokenizer.is_stop_word(token.text)))
            .map(|token| token.text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Normalize with the built-in English tokenizer.
pub fn normalize(text: &str, options: &NormalizationOptions) -> String {
    Normalizer::english(*options).normalize(text)
}
