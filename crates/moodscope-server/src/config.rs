//! Service configuration, read from the environment once at startup.

use std::env;
use std::path::PathBuf;

use moodscope_core::{MODEL_FILE, VECTORIZER_FILE};
use moodscope_provision::ArtifactSpec;

// Published locations of the fitted artifacts.
const DEFAULT_MODEL_URL: &str =
    "https://drive.google.com/uc?export=download&id=15Mk4f_NpCkV_zw6A0DSdDLalKPpFNGsX";
const DEFAULT_VECTORIZER_URL: &str =
    "https://drive.google.com/uc?export=download&id=1ffHyi06h7KgpwvvahhORaVyX_FGtWtgL";

/// Runtime settings. Every field has a default so a bare `moodscope-server`
/// starts out of the box; `MOODSCOPE_*` variables override per deployment.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Listen address, `MOODSCOPE_ADDR`.
    pub addr: String,
    /// Directory holding (or receiving) the artifacts, `MOODSCOPE_ARTIFACT_DIR`.
    pub artifact_dir: PathBuf,
    /// Model download source, `MOODSCOPE_MODEL_URL`.
    pub model_url: String,
    /// Vectorizer download source, `MOODSCOPE_VECTORIZER_URL`.
    pub vectorizer_url: String,
    /// Expected model digest, `MOODSCOPE_MODEL_SHA256`. Unset skips the check.
    pub model_sha256: Option<String>,
    /// Expected vectorizer digest, `MOODSCOPE_VECTORIZER_SHA256`.
    pub vectorizer_sha256: Option<String>,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self {
            addr: env_or("MOODSCOPE_ADDR", "0.0.0.0:8000"),
            artifact_dir: PathBuf::from(env_or("MOODSCOPE_ARTIFACT_DIR", "artifacts")),
            model_url: env_or("MOODSCOPE_MODEL_URL", DEFAULT_MODEL_URL),
            vectorizer_url: env_or("MOODSCOPE_VECTORIZER_URL", DEFAULT_VECTORIZER_URL),
            model_sha256: env::var("MOODSCOPE_MODEL_SHA256").ok(),
            vectorizer_sha256: env::var("MOODSCOPE_VECTORIZER_SHA256").ok(),
        }
    }

    /// Download specs for both artifacts, in load order.
    pub fn artifact_specs(&self) -> Vec<ArtifactSpec> {
        vec![
            ArtifactSpec::new(
                "vectorizer",
                self.vectorizer_url.as_str(),
                self.artifact_dir.join(VECTORIZER_FILE),
            )
            .with_digest(self.vectorizer_sha256.clone()),
            ArtifactSpec::new(
                "model",
                self.model_url.as_str(),
                self.artifact_dir.join(MODEL_FILE),
            )
            .with_digest(self.model_sha256.clone()),
        ]
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
