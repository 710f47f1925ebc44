//! Similarity capabilities backed by pre-trained embedding spaces.
//!
//! The normalizer never touches raw vectors; it only asks these two
//! questions of whatever model the caller plugs in:
//!
//! * `WordEmbeddings`: how close are two words, and which vocabulary
//!   words sit within a similarity threshold of a given one?
//! * `DocumentEmbeddings`: which document labels are nearest to a given
//!   label?
//!
//! [`dense::DenseVectors`] is the bundled in-memory implementation of
//! both. Anything that can answer the queries works: a word2vec index, a
//! quantized ANN store, a remote service. Training those models is out of
//! scope here; the traits consume them ready-made.

pub mod dense;

use thiserror::Error;

/// Public error type for embedding capabilities.
///
/// A *missing* word or label is not an error; implementations report
/// misses through empty results or zero scores. Errors are for the store
/// itself failing (I/O, poisoned state, a backing service gone away).
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding lookup `{0}` failed: {1}")]
    Lookup(&'static str, String),
}

/// Pairwise and threshold queries over a word-embedding space.
pub trait WordEmbeddings: Send + Sync {
    /// Similarity of two words as a bounded scalar. Unknown words score
    /// 0.0 rather than failing.
    fn similarity(&self, a: &str, b: &str) -> Result<f32, EmbeddingError>;

    /// Every vocabulary word with `similarity(word, token) >= accuracy`,
    /// most similar first. The list may include `token` itself; callers
    /// that want a distinct word must skip it. Unknown tokens yield an
    /// empty list.
    fn similar_words(&self, token: &str, accuracy: f32) -> Result<Vec<String>, EmbeddingError>;
}

/// Top-k neighbor queries over a document-embedding space.
pub trait DocumentEmbeddings: Send + Sync {
    /// The `n` labels nearest to `label`, descending similarity, never
    /// including `label` itself. Unknown labels yield an empty list.
    fn nearest_labels(&self, label: &str, n: usize) -> Result<Vec<String>, EmbeddingError>;
}
