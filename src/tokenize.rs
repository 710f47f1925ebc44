use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

/// Public error type for tokenizers.
#[derive(Debug, Error)]
pub enum TokenizeError {
    #[error("tokenization failed: {0}")]
    Failed(String),
}

/// Splits raw text into word tokens. Deterministic and stateless per call;
/// model-backed implementations may fail, hence the `Result`.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError>;
}

/// Whitespace tokenizer. Keeps punctuation attached to tokens, which is
/// usually what noisy social-media text wants: `"WoooHooo !!"` stays two
/// tokens and the trailing `!!` survives as its own token.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        Ok(text.split_whitespace().map(str::to_owned).collect())
    }
}

/// UAX-29 word-boundary tokenizer. Drops punctuation and symbols, so the
/// token stream lines up with what most embedding vocabularies were
/// trained on.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeTokenizer;

impl Tokenizer for UnicodeTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        Ok(text.unicode_words().map(str::to_owned).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_keeps_punctuation() {
        let tokens = WhitespaceTokenizer.tokenize("Good luck !!").unwrap();
        assert_eq!(tokens, vec!["Good", "luck", "!!"]);
    }

    #[test]
    fn whitespace_collapses_runs() {
        let tokens = WhitespaceTokenizer.tokenize("a  \t b").unwrap();
        assert_eq!(tokens, vec!["a", "b"]);
    }

    #[test]
    fn whitespace_empty_input() {
        assert!(WhitespaceTokenizer.tokenize("").unwrap().is_empty());
        assert!(WhitespaceTokenizer.tokenize("   ").unwrap().is_empty());
    }

    #[test]
    fn unicode_drops_punctuation() {
        let tokens = UnicodeTokenizer.tokenize("Hello, world!").unwrap();
        assert_eq!(tokens, vec!["Hello", "world"]);
    }

    #[test]
    fn unicode_keeps_contractions() {
        let tokens = UnicodeTokenizer.tokenize("weren't enuf").unwrap();
        assert_eq!(tokens, vec!["weren't", "enuf"]);
    }
}
