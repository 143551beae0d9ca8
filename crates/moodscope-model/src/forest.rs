//! Bagged ensemble of Gini decision trees.
//!
//! Each tree is fitted on a bootstrap resample (drawn with replacement, same
//! size as the training set) from a seeded RNG, so a given seed always yields
//! the same forest. The predicted probability for a document is the fraction
//! of trees voting for the positive class.

use linfa::dataset::Dataset;
use linfa::traits::{Fit, Predict};
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use moodscope_core::{Label, Prediction};

use crate::error::ModelError;

/// Ensemble size used when the caller does not override it.
pub const DEFAULT_TREES: usize = 200;
/// RNG seed used when the caller does not override it.
pub const DEFAULT_SEED: u64 = 42;

/// Knobs for [`ForestClassifier::fit`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of bagged trees.
    pub trees: usize,
    /// Depth cap per tree; `None` grows trees until leaves are pure.
    pub max_depth: Option<usize>,
    /// Seed for the bootstrap RNG.
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            trees: DEFAULT_TREES,
            max_depth: None,
            seed: DEFAULT_SEED,
        }
    }
}

/// Fitted forest, shipped as the model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestClassifier {
    trees: Vec<DecisionTree<f64, usize>>,
}

impl ForestClassifier {
    /// Fits `config.trees` trees on bootstrap resamples of `records`.
    pub fn fit(
        records: &Array2<f64>,
        labels: &[Label],
        config: &ForestConfig,
    ) -> Result<Self, ModelError> {
        if config.trees == 0 {
            return Err(ModelError::NoTrees);
        }
        let n_samples = records.nrows();
        if n_samples == 0 {
            return Err(ModelError::EmptyCorpus);
        }
        if n_samples != labels.len() {
            return Err(ModelError::LabelMismatch {
                examples: n_samples,
                labels: labels.len(),
            });
        }

        let targets: Array1<usize> = labels.iter().map(|label| label.index() as usize).collect();
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut trees = Vec::with_capacity(config.trees);
        for fitted in 0..config.trees {
            let indices: Vec<usize> = (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect();
            let resample = Dataset::new(
                records.select(Axis(0), &indices),
                targets.select(Axis(0), &indices),
            );
            let tree = DecisionTree::params()
                .split_quality(SplitQuality::Gini)
                .max_depth(config.max_depth)
                .fit(&resample)
                .map_err(|err| ModelError::TreeFit(err.to_string()))?;
            trees.push(tree);
            if (fitted + 1) % 50 == 0 {
                tracing::debug!(fitted = fitted + 1, total = config.trees, "fitting forest");
            }
        }
        Ok(Self { trees })
    }

    /// Positive-class vote fraction for each row of `records`, in `[0, 1]`.
    pub fn predict_proba(&self, records: &Array2<f64>) -> Vec<f64> {
        let mut votes = vec![0usize; records.nrows()];
        for tree in &self.trees {
            let predicted = tree.predict(records);
            for (count, vote) in votes.iter_mut().zip(predicted.iter()) {
                *count += *vote;
            }
        }
        votes
            .into_iter()
            .map(|count| count as f64 / self.trees.len() as f64)
            .collect()
    }

    /// Labels each row of `records`, carrying the vote fraction along.
    pub fn predict(&self, records: &Array2<f64>) -> Vec<Prediction> {
        self.predict_proba(records)
            .into_iter()
            .map(|probability| Prediction::new(label_for(probability), probability))
            .collect()
    }

    /// Labels a single feature vector.
    pub fn predict_one(&self, features: &Array1<f64>) -> Prediction {
        let row = features.clone().insert_axis(Axis(0));
        let probability = self.predict_proba(&row)[0];
        Prediction::new(label_for(probability), probability)
    }

    /// Number of trees in the ensemble.
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// True when the ensemble holds no trees. Cannot happen via [`Self::fit`].
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

// Majority vote: strictly more than half the trees must flag the positive
// class; an exact tie stays negative.
fn label_for(probability: f64) -> Label {
    if probability > 0.5 {
        Label::Depressed
    } else {
        Label::NotDepressed
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
