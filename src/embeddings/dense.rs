use std::collections::BTreeMap;

use super::{DocumentEmbeddings, EmbeddingError, WordEmbeddings};

/// In-memory embedding store over unit-normalized dense vectors.
///
/// Vectors are L2-normalized on insert, so cosine similarity reduces to a
/// dot product. The vocabulary lives in a `BTreeMap`: iteration is sorted
/// by key, which keeps ranked results stable when scores tie.
///
/// One store can back both capability seams: keyed by word it is a
/// `WordEmbeddings`, keyed by document label it is a `DocumentEmbeddings`.
#[derive(Debug, Clone, Default)]
pub struct DenseVectors {
    vectors: BTreeMap<String, Vec<f32>>,
}

impl DenseVectors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a vector under `key`, L2-normalizing it. A zero vector is
    /// stored as-is and scores 0.0 against everything.
    pub fn insert(&mut self, key: impl Into<String>, vector: Vec<f32>) {
        self.vectors.insert(key.into(), normalize(vector));
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vectors.contains_key(key)
    }

    fn cosine(&self, a: &str, b: &str) -> Option<f32> {
        let va = self.vectors.get(a)?;
        let vb = self.vectors.get(b)?;
        Some(dot(va, vb))
    }

    /// All keys ranked by similarity to `query`, descending. `skip_self`
    /// drops the query key from the result. Stable sort over the sorted
    /// vocabulary, so equal scores come out in key order.
    fn ranked(&self, query: &str, skip_self: bool) -> Vec<(String, f32)> {
        let Some(query_vec) = self.vectors.get(query) else {
            return Vec::new();
        };
        let mut scored: Vec<(String, f32)> = self
            .vectors
            .iter()
            .filter(|(key, _)| !(skip_self && key.as_str() == query))
            .map(|(key, vec)| (key.clone(), dot(query_vec, vec)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored
    }
}

impl FromIterator<(String, Vec<f32>)> for DenseVectors {
    fn from_iter<I: IntoIterator<Item = (String, Vec<f32>)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (key, vector) in iter {
            store.insert(key, vector);
        }
        store
    }
}

impl WordEmbeddings for DenseVectors {
    fn similarity(&self, a: &str, b: &str) -> Result<f32, EmbeddingError> {
        Ok(self.cosine(a, b).unwrap_or(0.0))
    }

    fn similar_words(&self, token: &str, accuracy: f32) -> Result<Vec<String>, EmbeddingError> {
        Ok(self
            .ranked(token, false)
            .into_iter()
            .take_while(|(_, score)| *score >= accuracy)
            .map(|(word, _)| word)
            .collect())
    }
}

impl DocumentEmbeddings for DenseVectors {
    fn nearest_labels(&self, label: &str, n: usize) -> Result<Vec<String>, EmbeddingError> {
        Ok(self
            .ranked(label, true)
            .into_iter()
            .take(n)
            .map(|(key, _)| key)
            .collect())
    }
}

fn normalize(mut vector: Vec<f32>) -> Vec<f32> {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut vector {
            *x /= norm;
        }
    }
    vector
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
