//! End-to-end demo on noisy social-media text.
//!
//! Builds a tiny hand-crafted embedding space (real deployments would
//! load pre-trained word and document vectors) and normalizes a few
//! tweet-like lines. Run with `RUST_LOG=semnorm=debug` to see the
//! diagnostic records.

use semnorm::{DenseVectors, InMemoryCorpus, Normalizer, WhitespaceTokenizer};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // word vectors: each noisy spelling sits next to its canonical form
    let mut words = DenseVectors::new();
    words.insert("enuf", vec![0.98, 0.05, 0.0]);
    words.insert("enough", vec![1.0, 0.0, 0.0]);
    words.insert("thru", vec![0.05, 0.98, 0.0]);
    words.insert("through", vec![0.0, 1.0, 0.0]);
    words.insert("data", vec![0.0, 0.0, 1.0]);

    // document vectors: doc_0/doc_1 talk about the same things
    let mut docs = DenseVectors::new();
    docs.insert("doc_0", vec![1.0, 0.1]);
    docs.insert("doc_1", vec![0.9, 0.2]);
    docs.insert("doc_2", vec![0.1, 1.0]);
    docs.insert("doc_3", vec![0.2, 0.9]);

    let corpus = InMemoryCorpus::with_label_template(
        "doc_",
        [
            "got enuf training data for autonomous cars",
            "enough data for everyone here",
            "fun overtaking buses thru millimeter gaps",
            "driving through the city today",
        ],
    );

    let normalizer = Normalizer::builder()
        .tokenizer(WhitespaceTokenizer)
        .word_embeddings(words)
        .document_embeddings(docs)
        .top_n_labels(2)
        .build(corpus)?;

    for line in [
        "Got enuf training data, here goes. Good luck",
        "fun overtaking buses and trucks thru millimeter gaps",
        "nothing noisy about this one",
    ] {
        println!("  in: {line}");
        println!(" out: {}\n", normalizer.normalize(line)?);
    }

    Ok(())
}
