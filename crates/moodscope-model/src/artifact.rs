//! Binary artifact codec.
//!
//! Artifacts are bincode blobs. Saves go through a sibling `.tmp` file and a
//! rename so a crash mid-write never leaves a truncated artifact behind.

use std::fs::{self, File};
use std::io::Write as _;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use moodscope_core::{MODEL_FILE, VECTORIZER_FILE};

use crate::error::ModelError;
use crate::forest::ForestClassifier;
use crate::vectorizer::TfidfVectorizer;

/// Encodes `value` into the artifact wire format.
pub fn to_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, ModelError> {
    Ok(bincode::serialize(value)?)
}

/// Decodes a value from the artifact wire format.
pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ModelError> {
    Ok(bincode::deserialize(bytes)?)
}

/// Writes `value` to `path` atomically, creating parent directories as needed.
pub fn save<T: Serialize>(value: &T, path: &Path) -> Result<(), ModelError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    {
        let mut file = File::create(&tmp)?;
        file.write_all(&to_bytes(value)?)?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    tracing::debug!(path = %path.display(), "artifact written");
    Ok(())
}

/// Reads a value back from `path`.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let bytes = fs::read(path)?;
    from_bytes(&bytes)
}

/// Saves the vectorizer under its well-known file name inside `dir`.
pub fn save_vectorizer(vectorizer: &TfidfVectorizer, dir: &Path) -> Result<(), ModelError> {
    save(vectorizer, &dir.join(VECTORIZER_FILE))
}

/// Saves the forest under its well-known file name inside `dir`.
pub fn save_forest(forest: &ForestClassifier, dir: &Path) -> Result<(), ModelError> {
    save(forest, &dir.join(MODEL_FILE))
}

/// Loads the vectorizer from its well-known file name inside `dir`.
pub fn load_vectorizer(dir: &Path) -> Result<TfidfVectorizer, ModelError> {
    load(&dir.join(VECTORIZER_FILE))
}

/// Loads the forest from its well-known file name inside `dir`.
pub fn load_forest(dir: &Path) -> Result<ForestClassifier, ModelError> {
    load(&dir.join(MODEL_FILE))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::DEFAULT_MAX_FEATURES;

    fn fitted_vectorizer() -> TfidfVectorizer {
        let corpus = vec![
            "feeling hopeless tonight".to_string(),
            "great day great mood".to_string(),
        ];
        TfidfVectorizer::fit(&corpus, DEFAULT_MAX_FEATURES).unwrap()
    }

    #[test]
    fn test_vectorizer_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let original = fitted_vectorizer();
        save_vectorizer(&original, dir.path()).unwrap();

        let restored = load_vectorizer(dir.path()).unwrap();
        assert_eq!(restored.vocabulary_len(), original.vocabulary_len());
        assert_eq!(
            restored.transform_one("hopeless day"),
            original.transform_one("hopeless day")
        );
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("artifacts").join("v1").join("blob.bin");
        save(&vec![1u32, 2, 3], &nested).unwrap();
        assert_eq!(load::<Vec<u32>>(&nested).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        save(&7u64, &path).unwrap();
        assert!(path.exists());
        assert!(!dir.path().join("blob.tmp").exists());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load::<TfidfVectorizer>(&dir.path().join("absent.bin"));
        assert!(matches!(result, Err(ModelError::Io(_))));
    }

    #[test]
    fn test_garbage_bytes_are_codec_error() {
        let result = from_bytes::<TfidfVectorizer>(&[0xde, 0xad, 0xbe, 0xef]);
        assert!(matches!(result, Err(ModelError::Codec(_))));
    }
}
