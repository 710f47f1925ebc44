use thiserror::Error;

/// Public error type for document sources.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("document source failed: {0}")]
    Source(String),
}

/// A document paired with the labels it was trained under.
///
/// Documents may carry several labels; the content index only uses the
/// first one (see `ContentIndex::build`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelledDocument {
    pub labels: Vec<String>,
    pub content: String,
}

impl LabelledDocument {
    pub fn new(label: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            labels: vec![label.into()],
            content: content.into(),
        }
    }

    pub fn with_labels(labels: Vec<String>, content: impl Into<String>) -> Self {
        Self {
            labels,
            content: content.into(),
        }
    }
}

/// A stream of labelled documents, drained fully and exactly once when the
/// normalizer is built. Implementations backed by files or databases can
/// fail mid-stream; draining stops at the first error.
pub trait DocumentSource {
    fn next_document(&mut self) -> Result<Option<LabelledDocument>, CorpusError>;
}

/// In-memory document source.
#[derive(Debug)]
pub struct InMemoryCorpus {
    documents: std::vec::IntoIter<LabelledDocument>,
}

impl InMemoryCorpus {
    pub fn new(documents: Vec<LabelledDocument>) -> Self {
        Self {
            documents: documents.into_iter(),
        }
    }

    /// Label each content string with `{template}{position}`:
    /// `with_label_template("doc_", …)` yields `doc_0`, `doc_1`, ….
    pub fn with_label_template<I, S>(template: &str, contents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let documents = contents
            .into_iter()
            .enumerate()
            .map(|(i, content)| LabelledDocument::new(format!("{template}{i}"), content))
            .collect();
        Self::new(documents)
    }
}

impl DocumentSource for InMemoryCorpus {
    fn next_document(&mut self) -> Result<Option<LabelledDocument>, CorpusError> {
        Ok(self.documents.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_template_numbers_documents() {
        let mut corpus = InMemoryCorpus::with_label_template("doc_", ["cat sat", "dog ran"]);
        let first = corpus.next_document().unwrap().unwrap();
        assert_eq!(first.labels, vec!["doc_0"]);
        assert_eq!(first.content, "cat sat");
        let second = corpus.next_document().unwrap().unwrap();
        assert_eq!(second.labels, vec!["doc_1"]);
        assert!(corpus.next_document().unwrap().is_none());
    }

    #[test]
    fn drained_corpus_stays_empty() {
        let mut corpus = InMemoryCorpus::new(vec![LabelledDocument::new("a", "x")]);
        assert!(corpus.next_document().unwrap().is_some());
        assert!(corpus.next_document().unwrap().is_none());
        assert!(corpus.next_document().unwrap().is_none());
    }
}
