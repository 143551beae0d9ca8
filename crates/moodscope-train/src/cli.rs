//! Command-line surface of the trainer.

use std::path::PathBuf;

use clap::Parser;

use moodscope_model::{DEFAULT_MAX_FEATURES, DEFAULT_SEED, DEFAULT_TREES};

/// Fits the moodscope artifacts from a labeled corpus and reports hold-out
/// quality.
#[derive(Parser, Debug)]
#[command(name = "moodscope-train", version, about)]
pub struct TrainArgs {
    /// Labeled corpus in JSON Lines form, one {"text", "label"} per line.
    #[arg(long, default_value = "data/depression_dataset.jsonl")]
    pub dataset: PathBuf,

    /// Download the corpus from this URL first when the file is absent.
    #[arg(long)]
    pub dataset_url: Option<String>,

    /// Directory the fitted artifacts are written into.
    #[arg(long, default_value = "artifacts")]
    pub out_dir: PathBuf,

    /// Fraction of examples held out for evaluation.
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,

    /// Seed shared by the split shuffle and the bootstrap RNG.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of bagged trees in the forest.
    #[arg(long, default_value_t = DEFAULT_TREES)]
    pub trees: usize,

    /// Depth cap per tree; trees grow to purity when omitted.
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Vocabulary cap for the TF-IDF vectorizer.
    #[arg(long, default_value_t = DEFAULT_MAX_FEATURES)]
    pub max_features: usize,
}
