//! Shared request state: the fitted artifacts, loaded once.

use std::path::Path;

use moodscope_model::{artifact, ForestClassifier, ModelError, TfidfVectorizer};

/// Immutable after startup; handlers share it behind an `Arc`.
pub struct AppState {
    pub vectorizer: TfidfVectorizer,
    pub forest: ForestClassifier,
}

impl AppState {
    /// Loads both artifacts from `dir`.
    pub fn load(dir: &Path) -> Result<Self, ModelError> {
        Ok(Self {
            vectorizer: artifact::load_vectorizer(dir)?,
            forest: artifact::load_forest(dir)?,
        })
    }
}
