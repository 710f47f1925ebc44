pub mod corpus;
pub mod embeddings;
pub mod index;
pub mod normalizer;
pub mod tokenize;

pub use corpus::{DocumentSource, InMemoryCorpus, LabelledDocument};
pub use embeddings::dense::DenseVectors;
pub use embeddings::{DocumentEmbeddings, WordEmbeddings};
pub use index::ContentIndex;
pub use normalizer::{
    DEFAULT_TOP_N_LABELS, DEFAULT_WORD_SIM_ACCURACY, Normalizer, NormalizerBuilder,
    NormalizerError,
};
pub use tokenize::{Tokenizer, UnicodeTokenizer, WhitespaceTokenizer};
