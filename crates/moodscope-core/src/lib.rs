//! Core domain types shared across the moodscope workspace.
//!
//! This crate provides the types every other crate agrees on:
//!
//! - [`Label`] — the binary classification outcome
//! - [`Prediction`] — a label with its positive-class probability
//! - [`TrainingExample`] — one labeled text consumed by the trainer
//! - The conventional artifact file names
//!
//! # Example
//!
//! ```rust
//! use moodscope_core::{Label, Prediction};
//!
//! let prediction = Prediction::new(Label::Depressed, 0.87);
//!
//! assert_eq!(prediction.label.index(), 1);
//! assert_eq!(prediction.label.as_str(), "Depressed");
//! ```

use serde::{Deserialize, Serialize};

/// File name of the serialized classifier inside the artifact directory.
pub const MODEL_FILE: &str = "model.bin";

/// File name of the serialized vectorizer inside the artifact directory.
pub const VECTORIZER_FILE: &str = "vectorizer.bin";

// ─────────────────────────────────────────────────────────────────────────────
// Label
// ─────────────────────────────────────────────────────────────────────────────

/// Binary classification outcome.
///
/// Serialized as `0` / `1` to match the labeled corpus and the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Label {
    NotDepressed,
    Depressed,
}

impl Label {
    /// The class index (`0` or `1`) used in datasets and responses.
    pub fn index(self) -> u8 {
        match self {
            Label::NotDepressed => 0,
            Label::Depressed => 1,
        }
    }

    /// Human-readable label string exposed on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Label::NotDepressed => "Not Depressed",
            Label::Depressed => "Depressed",
        }
    }

    /// Fixed advisory message attached to every prediction response.
    pub fn message(self) -> &'static str {
        match self {
            Label::NotDepressed => "✅ No signs of depression detected.",
            Label::Depressed => "⚠️ Signs of depression detected.",
        }
    }

    /// Both classes, in index order.
    pub fn all() -> [Label; 2] {
        [Label::NotDepressed, Label::Depressed]
    }
}

impl TryFrom<u8> for Label {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Label::NotDepressed),
            1 => Ok(Label::Depressed),
            other => Err(format!("label must be 0 or 1, got {}", other)),
        }
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> Self {
        label.index()
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Prediction
// ─────────────────────────────────────────────────────────────────────────────

/// A classification result: the predicted class and the probability mass the
/// classifier assigned to the positive (depressed) class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: Label,
    /// Probability of the positive class, in `[0, 1]`.
    pub probability: f64,
}

impl Prediction {
    pub fn new(label: Label, probability: f64) -> Self {
        Self { label, probability }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Training data
// ─────────────────────────────────────────────────────────────────────────────

/// One labeled text, as found in the training corpus (one JSON object per
/// line: `{"text": "...", "label": 0}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub text: String,
    pub label: Label,
}

impl TrainingExample {
    pub fn new(text: impl Into<String>, label: Label) -> Self {
        Self { text: text.into(), label }
    }
}
