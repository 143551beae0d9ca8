//! Model layer for moodscope.
//!
//! Owns everything between raw text and a [`moodscope_core::Prediction`]:
//!
//! - [`tokenize`]: lowercased word extraction and the English stop list
//! - [`vectorizer`]: smoothed TF-IDF with a capped vocabulary
//! - [`forest`]: bagged Gini decision trees with seeded bootstraps
//! - [`metrics`]: hold-out accuracy / precision / recall / F1 reports
//! - [`artifact`]: the bincode on-disk codec for fitted models

pub mod artifact;
pub mod error;
pub mod forest;
pub mod metrics;
pub mod tokenize;
pub mod vectorizer;

pub use error::ModelError;
pub use forest::{ForestClassifier, ForestConfig, DEFAULT_SEED, DEFAULT_TREES};
pub use metrics::{evaluate, EvaluationReport};
pub use vectorizer::{TfidfVectorizer, DEFAULT_MAX_FEATURES};

#[cfg(test)]
mod tests {
    use super::*;

    use moodscope_core::Label;

    // Fit on a small separable corpus, ship the artifacts through disk, and
    // classify fresh texts with the reloaded pair.
    #[test]
    fn test_fit_save_load_predict_pipeline() {
        let corpus = vec![
            ("feeling hopeless and worthless since monday", Label::Depressed),
            ("hopeless nights crying alone", Label::Depressed),
            ("so hopeless nothing matters anymore", Label::Depressed),
            ("hopeless and exhausted beyond words", Label::Depressed),
            ("everything feels hopeless and dark", Label::Depressed),
            ("another hopeless sleepless night", Label::Depressed),
            ("celebrated a promotion with friends", Label::NotDepressed),
            ("morning jog felt refreshing", Label::NotDepressed),
            ("cooked delicious pasta tonight", Label::NotDepressed),
            ("hiking trip planned this weekend", Label::NotDepressed),
            ("garden tomatoes finally ripened", Label::NotDepressed),
            ("aced the certification exam", Label::NotDepressed),
        ];
        let texts: Vec<&str> = corpus.iter().map(|(text, _)| *text).collect();
        let labels: Vec<Label> = corpus.iter().map(|(_, label)| *label).collect();

        let vectorizer = TfidfVectorizer::fit(&texts, DEFAULT_MAX_FEATURES).unwrap();
        let config = ForestConfig {
            trees: 15,
            ..ForestConfig::default()
        };
        let forest =
            ForestClassifier::fit(&vectorizer.transform(&texts), &labels, &config).unwrap();

        let canonical = "I feel hopeless and empty every day";
        let before = forest.predict_one(&vectorizer.transform_one(canonical));

        let dir = tempfile::tempdir().unwrap();
        artifact::save_vectorizer(&vectorizer, dir.path()).unwrap();
        artifact::save_forest(&forest, dir.path()).unwrap();

        let vectorizer = artifact::load_vectorizer(dir.path()).unwrap();
        let forest = artifact::load_forest(dir.path()).unwrap();

        let flagged = forest.predict_one(&vectorizer.transform_one(canonical));
        assert_eq!(flagged.label, Label::Depressed);
        assert!((0.0..=1.0).contains(&flagged.probability));
        assert!(flagged.probability > 0.5);
        assert!(flagged.label.message().contains("⚠️"));

        // The reloaded pair must answer exactly like the fitted one.
        assert_eq!(flagged.label, before.label);
        assert_eq!(flagged.probability, before.probability);

        let cleared = forest.predict_one(&vectorizer.transform_one("a refreshing weekend hike"));
        assert_eq!(cleared.label, Label::NotDepressed);
        assert!(cleared.probability <= 0.5);
    }

    // The training split quality bar: a forest fitted on one half of the
    // corpus labels the held-out half perfectly when the classes share no
    // vocabulary.
    #[test]
    fn test_heldout_accuracy_on_separable_corpus() {
        let train_texts = vec![
            "feeling hopeless and worthless",
            "hopeless crying spells daily",
            "so hopeless and empty inside",
            "hopeless dread every evening",
            "won the neighborhood chess cup",
            "lovely picnic with grandkids",
            "promoted after the big launch",
            "fresh bread straight from the oven",
        ];
        let train_labels = vec![
            Label::Depressed,
            Label::Depressed,
            Label::Depressed,
            Label::Depressed,
            Label::NotDepressed,
            Label::NotDepressed,
            Label::NotDepressed,
            Label::NotDepressed,
        ];

        let vectorizer = TfidfVectorizer::fit(&train_texts, DEFAULT_MAX_FEATURES).unwrap();
        let config = ForestConfig {
            trees: 15,
            ..ForestConfig::default()
        };
        let forest = ForestClassifier::fit(
            &vectorizer.transform(&train_texts),
            &train_labels,
            &config,
        )
        .unwrap();

        let test_texts = vec![
            "hopeless thoughts again tonight",
            "hopeless and drained all week",
            "celebrated with fresh picnic bread",
            "chess in the park was lovely",
        ];
        let actual = vec![
            Label::Depressed,
            Label::Depressed,
            Label::NotDepressed,
            Label::NotDepressed,
        ];

        let predicted: Vec<Label> = forest
            .predict(&vectorizer.transform(&test_texts))
            .into_iter()
            .map(|prediction| prediction.label)
            .collect();

        let report = evaluate(&actual, &predicted);
        assert_eq!(report.accuracy, 1.0);
    }
}
