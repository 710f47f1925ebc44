use std::collections::BTreeMap;

use thiserror::Error;

use crate::{
    corpus::{CorpusError, DocumentSource},
    tokenize::{TokenizeError, Tokenizer},
};

/// Public error type for index construction.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("document source failed: {0}")]
    Source(#[from] CorpusError),

    #[error("tokenizing document `{0}` failed: {1}")]
    Tokenize(String, TokenizeError),

    #[error("document yielded no labels")]
    UnlabelledDocument,
}

/// Local cache mapping each document label to its tokenized content.
///
/// Built once by draining a [`DocumentSource`], read-only afterwards.
/// Only the first label of a multi-label document is indexed; a repeated
/// label overwrites the earlier entry. The backing `BTreeMap` makes
/// iteration order deterministic (sorted by label).
#[derive(Debug, Default)]
pub struct ContentIndex {
    content: BTreeMap<String, Vec<String>>,
}

impl ContentIndex {
    /// Drain `source` fully, tokenizing each document's content. Fails on
    /// the first source or tokenizer error; there is no partial recovery.
    pub fn build(
        mut source: impl DocumentSource,
        tokenizer: &dyn Tokenizer,
    ) -> Result<Self, IndexError> {
        let mut content = BTreeMap::new();
        while let Some(document) = source.next_document()? {
            let label = document
                .labels
                .into_iter()
                .next()
                .ok_or(IndexError::UnlabelledDocument)?;
            let tokens = tokenizer
                .tokenize(&document.content)
                .map_err(|e| IndexError::Tokenize(label.clone(), e))?;
            content.insert(label, tokens);
        }
        Ok(Self { content })
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// The token sequence indexed under `label`, if any.
    pub fn tokens(&self, label: &str) -> Option<&[String]> {
        self.content.get(label).map(Vec::as_slice)
    }

    /// Exact, case-sensitive membership test. A label that was never
    /// indexed has no tokens.
    pub fn contains(&self, label: &str, token: &str) -> bool {
        self.tokens(label)
            .is_some_and(|tokens| tokens.iter().any(|t| t == token))
    }

    /// Every label whose content contains `token`, in label order.
    // TODO: replace the linear scan with an inverted index (token → labels)
    pub fn labels_containing<'a>(&'a self, token: &'a str) -> impl Iterator<Item = &'a str> {
        self.content
            .iter()
            .filter(move |(_, tokens)| tokens.iter().any(|t| t == token))
            .map(|(label, _)| label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        corpus::{InMemoryCorpus, LabelledDocument},
        tokenize::WhitespaceTokenizer,
    };

    fn index(docs: Vec<LabelledDocument>) -> ContentIndex {
        ContentIndex::build(InMemoryCorpus::new(docs), &WhitespaceTokenizer).unwrap()
    }

    #[test]
    fn indexes_tokenized_content() {
        let idx = index(vec![LabelledDocument::new("doc_0", "the cat sat")]);
        assert_eq!(
            idx.tokens("doc_0").unwrap(),
            ["the", "cat", "sat"].map(String::from)
        );
    }

    #[test]
    fn only_first_label_is_indexed() {
        let idx = index(vec![LabelledDocument::with_labels(
            vec!["first".into(), "second".into()],
            "cat",
        )]);
        assert!(idx.contains("first", "cat"));
        assert!(idx.tokens("second").is_none());
    }

    #[test]
    fn repeated_label_overwrites() {
        let idx = index(vec![
            LabelledDocument::new("doc_0", "old words"),
            LabelledDocument::new("doc_0", "new words"),
        ]);
        assert!(idx.contains("doc_0", "new"));
        assert!(!idx.contains("doc_0", "old"));
        assert_eq!(idx.len(), 1);
    }

    #[test]
    fn unlabelled_document_fails_construction() {
        let source = InMemoryCorpus::new(vec![LabelledDocument::with_labels(vec![], "cat")]);
        let err = ContentIndex::build(source, &WhitespaceTokenizer).unwrap_err();
        assert!(matches!(err, IndexError::UnlabelledDocument));
    }

    #[test]
    fn membership_is_case_sensitive() {
        let idx = index(vec![LabelledDocument::new("doc_0", "Cat")]);
        assert!(idx.contains("doc_0", "Cat"));
        assert!(!idx.contains("doc_0", "cat"));
    }

    #[test]
    fn absent_label_has_no_tokens() {
        let idx = index(vec![]);
        assert!(!idx.contains("missing", "cat"));
        assert!(idx.is_empty());
    }

    #[test]
    fn labels_containing_scans_in_label_order() {
        let idx = index(vec![
            LabelledDocument::new("doc_2", "cat ran"),
            LabelledDocument::new("doc_0", "cat sat"),
            LabelledDocument::new("doc_1", "dog sat"),
        ]);
        let labels: Vec<&str> = idx.labels_containing("cat").collect();
        assert_eq!(labels, vec!["doc_0", "doc_2"]);
    }
}
