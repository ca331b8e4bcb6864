use serde::{Deserialize, Serialize};

/// Extracted candidate text keyed by a caller-chosen identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// Blank documents carry no usable content and are never ranked.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// One entry of a ranking: the original document and its similarity score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub id: String,
    pub text: String,
    pub score: f64,
}
