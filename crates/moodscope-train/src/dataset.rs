//! Corpus loading and the seeded train/test split.

use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use moodscope_core::TrainingExample;

/// Loads a JSON Lines corpus. Blank lines are skipped; a malformed line
/// fails the whole load with its line number.
pub fn load_jsonl(path: &Path) -> Result<Vec<TrainingExample>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading dataset {}", path.display()))?;

    let mut examples = Vec::new();
    for (index, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let example: TrainingExample = serde_json::from_str(line)
            .with_context(|| format!("{}:{}: malformed example", path.display(), index + 1))?;
        examples.push(example);
    }
    tracing::info!(examples = examples.len(), path = %path.display(), "dataset loaded");
    Ok(examples)
}

/// Shuffles with a seeded RNG and holds out `ceil(len * test_fraction)`
/// examples. Returns `(train, test)`.
pub fn split(
    mut examples: Vec<TrainingExample>,
    test_fraction: f64,
    seed: u64,
) -> (Vec<TrainingExample>, Vec<TrainingExample>) {
    let mut rng = StdRng::seed_from_u64(seed);
    examples.shuffle(&mut rng);

    let test_len = ((examples.len() as f64) * test_fraction).ceil() as usize;
    let test_len = test_len.min(examples.len());
    let train = examples.split_off(test_len);
    (train, examples)
}
