use std::{borrow::Cow, fmt, sync::Arc};

use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    corpus::DocumentSource,
    embeddings::{DocumentEmbeddings, EmbeddingError, WordEmbeddings},
    index::{ContentIndex, IndexError},
    tokenize::{TokenizeError, Tokenizer},
};

/// Number of nearest documents consulted per candidate lookup.
pub const DEFAULT_TOP_N_LABELS: usize = 5;

/// Word-similarity threshold for replacement candidates.
pub const DEFAULT_WORD_SIM_ACCURACY: f32 = 0.9;

#[derive(Debug, Error)]
pub enum NormalizerError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("index error: {0}")]
    Index(#[from] IndexError),
    #[error("tokenize error: {0}")]
    Tokenize(#[from] TokenizeError),
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),
}

/// Token-level normalizer guided by word and document embeddings.
///
/// Each input token is looked up in the content index; every document
/// containing it proposes at most one replacement drawn from that
/// document's embedding neighborhood, and the proposal closest to the
/// original token wins. Tokens nothing vouches for pass through
/// unchanged, so the worst case is the input with its whitespace
/// collapsed to single spaces.
///
/// The index is immutable after construction; `normalize` can run from
/// several threads at once as long as the plugged-in capabilities
/// tolerate concurrent reads.
///
/// Equal-score candidates resolve to the first one proposed. Proposal
/// order follows the index's label order, so ties are deterministic.
/// That is a guarantee of this implementation, not of the scheme itself.
pub struct Normalizer {
    tokenizer: Arc<dyn Tokenizer>,
    words: Arc<dyn WordEmbeddings>,
    documents: Arc<dyn DocumentEmbeddings>,
    index: ContentIndex,
    top_n_labels: usize,
    word_sim_accuracy: f32,
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("index", &self.index)
            .field("top_n_labels", &self.top_n_labels)
            .field("word_sim_accuracy", &self.word_sim_accuracy)
            .finish_non_exhaustive()
    }
}

impl Normalizer {
    pub fn builder() -> NormalizerBuilder {
        NormalizerBuilder::default()
    }

    /// Read-only view of the label → tokens cache built at construction.
    pub fn index(&self) -> &ContentIndex {
        &self.index
    }

    /// Normalize `text`, token by token. Output tokens are joined by a
    /// single space regardless of the input's spacing; empty input yields
    /// empty output. Tokenizer or embedding failures propagate unchanged.
    pub fn normalize(&self, text: &str) -> Result<String, NormalizerError> {
        let mut normalized = String::with_capacity(text.len());
        for token in self.tokenizer.tokenize(text)? {
            if !normalized.is_empty() {
                normalized.push(' ');
            }
            normalized.push_str(&self.normalize_token(&token)?);
        }
        debug!(input = text, output = %normalized, "normalized text");
        Ok(normalized)
    }

    /// Decide a single token's fate. Every document containing the token
    /// anchors one candidate lookup; the collected candidates compete on
    /// similarity to the original token. No candidates → unchanged.
    fn normalize_token<'a>(&self, token: &'a str) -> Result<Cow<'a, str>, NormalizerError> {
        let mut replacements: SmallVec<[String; 4]> = SmallVec::new();
        for label in self.index.labels_containing(token) {
            if let Some(replacement) = self.find_replacement(token, label)? {
                if !replacements.iter().any(|r| *r == replacement) {
                    replacements.push(replacement);
                }
            }
        }

        if replacements.is_empty() {
            return Ok(Cow::Borrowed(token));
        }
        trace!(token, candidates = ?replacements, "replacement candidates");
        Ok(match self.select_replacement(&replacements, token)? {
            Some(replacement) => Cow::Owned(replacement.to_owned()),
            None => Cow::Borrowed(token),
        })
    }

    /// Look for a replacement for `token` anchored at `label`: take the
    /// single most similar vocabulary word (skipping the token itself)
    /// and accept it iff one of the `top_n_labels` documents nearest to
    /// `label` contains it.
    ///
    /// Only that one word is ever tested. If every nearby document
    /// rejects it, the lookup yields nothing rather than falling back to
    /// the runner-up.
    fn find_replacement(
        &self,
        token: &str,
        label: &str,
    ) -> Result<Option<String>, NormalizerError> {
        let nearest_labels = self.documents.nearest_labels(label, self.top_n_labels)?;
        let similar = self.words.similar_words(token, self.word_sim_accuracy)?;
        // the top entry is usually the token itself
        let Some(nearest) = similar.iter().find(|word| *word != token) else {
            return Ok(None);
        };
        for neighbor in &nearest_labels {
            if self.index.contains(neighbor, nearest) {
                return Ok(Some(nearest.clone()));
            }
        }
        Ok(None)
    }

    /// Pick the candidate most similar to the original token. Strict `>`
    /// keeps the first candidate on ties. The candidate is never weighed
    /// against keeping the token, so a lone low-scoring candidate still
    /// wins.
    fn select_replacement<'a>(
        &self,
        replacements: &'a [String],
        token: &str,
    ) -> Result<Option<&'a str>, NormalizerError> {
        let mut max = f32::NEG_INFINITY;
        let mut replacement = None;
        for candidate in replacements {
            let similarity = self.words.similarity(candidate, token)?;
            if similarity > max {
                replacement = Some(candidate.as_str());
                max = similarity;
            }
        }
        Ok(replacement)
    }
}

pub struct NormalizerBuilder {
    tokenizer: Option<Arc<dyn Tokenizer>>,
    words: Option<Arc<dyn WordEmbeddings>>,
    documents: Option<Arc<dyn DocumentEmbeddings>>,
    top_n_labels: usize,
    word_sim_accuracy: f32,
}

impl Default for NormalizerBuilder {
    fn default() -> Self {
        Self {
            tokenizer: None,
            words: None,
            documents: None,
            top_n_labels: DEFAULT_TOP_N_LABELS,
            word_sim_accuracy: DEFAULT_WORD_SIM_ACCURACY,
        }
    }
}

impl NormalizerBuilder {
    pub fn tokenizer<T: Tokenizer + 'static>(mut self, tokenizer: T) -> Self {
        self.tokenizer = Some(Arc::new(tokenizer));
        self
    }

    pub fn word_embeddings<W: WordEmbeddings + 'static>(mut self, words: W) -> Self {
        self.words = Some(Arc::new(words));
        self
    }

    pub fn document_embeddings<D: DocumentEmbeddings + 'static>(mut self, documents: D) -> Self {
        self.documents = Some(Arc::new(documents));
        self
    }

    /// How many nearest documents each candidate lookup consults.
    /// Must be at least 1.
    pub fn top_n_labels(mut self, n: usize) -> Self {
        self.top_n_labels = n;
        self
    }

    /// Similarity threshold a vocabulary word must meet to be considered.
    /// Must lie in `[0, 1]`.
    pub fn word_sim_accuracy(mut self, accuracy: f32) -> Self {
        self.word_sim_accuracy = accuracy;
        self
    }

    /// Validate the configuration, drain `corpus` into the content index
    /// and assemble the normalizer. `corpus` is consumed whole; a source
    /// or tokenizer failure fails the build.
    pub fn build(self, corpus: impl DocumentSource) -> Result<Normalizer, NormalizerError> {
        let tokenizer = self
            .tokenizer
            .ok_or_else(|| NormalizerError::Config("a tokenizer is required".into()))?;
        let words = self
            .words
            .ok_or_else(|| NormalizerError::Config("word embeddings are required".into()))?;
        let documents = self
            .documents
            .ok_or_else(|| NormalizerError::Config("document embeddings are required".into()))?;
        if self.top_n_labels == 0 {
            return Err(NormalizerError::Config(
                "top_n_labels must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.word_sim_accuracy) {
            return Err(NormalizerError::Config(format!(
                "word_sim_accuracy must lie in [0, 1], got {}",
                self.word_sim_accuracy
            )));
        }

        let index = ContentIndex::build(corpus, tokenizer.as_ref())?;
        Ok(Normalizer {
            tokenizer,
            words,
            documents,
            index,
            top_n_labels: self.top_n_labels,
            word_sim_accuracy: self.word_sim_accuracy,
        })
    }
}
