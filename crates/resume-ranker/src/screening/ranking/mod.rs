mod document;
mod ranker;
mod similarity;
mod vectorizer;

pub use document::{Document, RankedResult};
pub use ranker::ResumeRanker;
pub use similarity::cosine_similarity;
pub use vectorizer::{SparseVector, TfIdfVectorizer, VectorizerConfig};
