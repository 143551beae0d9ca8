//! Offline trainer.
//!
//! Loads a labeled corpus (downloading it first when a URL is given), fits
//! the TF-IDF vectorizer and the bagged forest on the training share, prints
//! a hold-out report, and writes both artifacts for the inference service.

mod cli;
mod dataset;

use anyhow::Context as _;
use clap::Parser;
use tracing::info;

use moodscope_core::Label;
use moodscope_model::{artifact, evaluate, ForestClassifier, ForestConfig, TfidfVectorizer};
use moodscope_provision::ArtifactSpec;

use crate::cli::TrainArgs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".parse().unwrap()),
        )
        .compact()
        .init();

    let args = TrainArgs::parse();
    anyhow::ensure!(
        (0.0..1.0).contains(&args.test_fraction),
        "test fraction must be in [0, 1), got {}",
        args.test_fraction
    );
    anyhow::ensure!(args.max_features > 0, "max features must be positive");

    if let Some(url) = &args.dataset_url {
        let spec = ArtifactSpec::new("dataset", url.as_str(), &args.dataset);
        moodscope_provision::ensure_artifact(&reqwest::Client::new(), &spec)
            .await
            .context("provisioning dataset")?;
    }

    let examples = dataset::load_jsonl(&args.dataset)?;
    anyhow::ensure!(!examples.is_empty(), "dataset has no examples");

    let (train, test) = dataset::split(examples, args.test_fraction, args.seed);
    anyhow::ensure!(
        !train.is_empty(),
        "hold-out fraction {} leaves no training examples",
        args.test_fraction
    );
    info!(train = train.len(), test = test.len(), "split corpus");

    let started = std::time::Instant::now();
    let train_texts: Vec<&str> = train.iter().map(|example| example.text.as_str()).collect();
    let train_labels: Vec<Label> = train.iter().map(|example| example.label).collect();

    let vectorizer = TfidfVectorizer::fit(&train_texts, args.max_features)?;
    info!(vocabulary = vectorizer.vocabulary_len(), "vectorizer fitted");

    let config = ForestConfig {
        trees: args.trees,
        max_depth: args.max_depth,
        seed: args.seed,
    };
    let forest = ForestClassifier::fit(&vectorizer.transform(&train_texts), &train_labels, &config)?;
    info!(
        trees = forest.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "forest fitted"
    );

    if test.is_empty() {
        info!("no hold-out examples, skipping evaluation");
    } else {
        let test_texts: Vec<&str> = test.iter().map(|example| example.text.as_str()).collect();
        let actual: Vec<Label> = test.iter().map(|example| example.label).collect();
        let predicted: Vec<Label> = forest
            .predict(&vectorizer.transform(&test_texts))
            .into_iter()
            .map(|prediction| prediction.label)
            .collect();

        let report = evaluate(&actual, &predicted);
        info!(accuracy = report.accuracy, "hold-out evaluation complete");
        println!("{}", report);
    }

    artifact::save_vectorizer(&vectorizer, &args.out_dir)?;
    artifact::save_forest(&forest, &args.out_dir)?;
    info!(out_dir = %args.out_dir.display(), "artifacts written");

    Ok(())
}
