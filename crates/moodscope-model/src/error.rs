//! Error type shared by the vectorizer, the forest, and the artifact codec.

use thiserror::Error;

/// Errors raised while fitting, predicting, or (de)serializing models.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("artifact io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("artifact codec failed: {0}")]
    Codec(#[from] bincode::Error),

    #[error("training corpus is empty")]
    EmptyCorpus,

    #[error("no vocabulary terms survive the stop list and feature cap")]
    EmptyVocabulary,

    #[error("labels and examples disagree: {examples} examples vs {labels} labels")]
    LabelMismatch { examples: usize, labels: usize },

    #[error("forest needs at least one tree")]
    NoTrees,

    #[error("decision tree fit failed: {0}")]
    TreeFit(String),
}
