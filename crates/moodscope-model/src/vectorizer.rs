//! TF-IDF vectorizer over unigram tokens.
//!
//! Weighting follows the common smoothed formulation: raw term count times
//! `ln((1 + n_docs) / (1 + doc_freq)) + 1`, with each document vector scaled
//! to unit L2 norm afterwards.

use std::collections::HashMap;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::tokenize::{is_stopword, tokenize};

/// Vocabulary cap used when the caller does not override it.
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// Fitted TF-IDF vocabulary and per-term inverse document frequencies.
///
/// `vocabulary` maps a term to its column index; `idf[index]` holds the
/// matching weight. Both are frozen at fit time and shipped inside the
/// vectorizer artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learns a vocabulary and idf weights from `corpus`.
    ///
    /// Keeps the `max_features` terms with the highest total count across the
    /// corpus (ties resolve alphabetically), then assigns column indices in
    /// alphabetical order so equal vocabularies always map equally. Fails
    /// with [`ModelError::EmptyVocabulary`] when nothing survives the stop
    /// list or `max_features` is zero.
    pub fn fit<S: AsRef<str>>(corpus: &[S], max_features: usize) -> Result<Self, ModelError> {
        if corpus.is_empty() {
            return Err(ModelError::EmptyCorpus);
        }
        let n_docs = corpus.len();

        let mut corpus_tf: HashMap<String, u64> = HashMap::new();
        let mut doc_freq: HashMap<String, u64> = HashMap::new();
        for text in corpus {
            let mut doc_tf: HashMap<String, u64> = HashMap::new();
            for token in tokenize(text.as_ref()) {
                if is_stopword(&token) {
                    continue;
                }
                *doc_tf.entry(token).or_insert(0) += 1;
            }
            for (term, count) in doc_tf {
                *corpus_tf.entry(term.clone()).or_insert(0) += count;
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }
        let mut ranked: Vec<(String, u64)> = corpus_tf.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(max_features);
        if ranked.is_empty() {
            return Err(ModelError::EmptyVocabulary);
        }

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort_unstable();

        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (index, term) in terms.into_iter().enumerate() {
            let df = doc_freq[&term] as f64;
            idf.push(((1.0 + n_docs as f64) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        tracing::debug!(terms = vocabulary.len(), docs = n_docs, "fitted tf-idf vocabulary");
        Ok(Self { vocabulary, idf })
    }

    /// Maps one document to its L2-normalized TF-IDF vector.
    ///
    /// Out-of-vocabulary tokens contribute nothing; a document with no known
    /// tokens maps to the zero vector, which is left unnormalized.
    pub fn transform_one(&self, text: &str) -> Array1<f64> {
        let mut features = Array1::<f64>::zeros(self.idf.len());
        for token in tokenize(text) {
            if let Some(&index) = self.vocabulary.get(&token) {
                features[index] += self.idf[index];
            }
        }
        let norm = features.dot(&features).sqrt();
        if norm > 0.0 {
            features /= norm;
        }
        features
    }

    /// Maps a batch of documents to a dense `(docs, terms)` matrix.
    pub fn transform<S: AsRef<str>>(&self, texts: &[S]) -> Array2<f64> {
        let mut matrix = Array2::zeros((texts.len(), self.idf.len()));
        for (row, text) in texts.iter().enumerate() {
            matrix.row_mut(row).assign(&self.transform_one(text.as_ref()));
        }
        matrix
    }

    /// Number of terms in the fitted vocabulary.
    pub fn vocabulary_len(&self) -> usize {
        self.idf.len()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
