//! Hold-out evaluation: accuracy plus per-class precision, recall, and F1.

use std::fmt;

use serde::{Deserialize, Serialize};

use moodscope_core::Label;

/// Precision, recall, and F1 for a single class.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClassReport {
    pub label: Label,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of hold-out examples whose true label is `label`.
    pub support: usize,
}

/// Full hold-out report, printed by the trainer after fitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub accuracy: f64,
    pub classes: Vec<ClassReport>,
    pub samples: usize,
}

impl EvaluationReport {
    /// Unweighted mean precision across classes.
    pub fn macro_precision(&self) -> f64 {
        mean(self.classes.iter().map(|class| class.precision))
    }

    /// Unweighted mean recall across classes.
    pub fn macro_recall(&self) -> f64 {
        mean(self.classes.iter().map(|class| class.recall))
    }

    /// Unweighted mean F1 across classes.
    pub fn macro_f1(&self) -> f64 {
        mean(self.classes.iter().map(|class| class.f1))
    }
}

/// Scores `predicted` against `actual`. Both slices must be equally long.
pub fn evaluate(actual: &[Label], predicted: &[Label]) -> EvaluationReport {
    assert_eq!(actual.len(), predicted.len(), "evaluation inputs must align");

    let samples = actual.len();
    let correct = actual
        .iter()
        .zip(predicted)
        .filter(|(a, p)| a == p)
        .count();
    let accuracy = if samples == 0 {
        0.0
    } else {
        correct as f64 / samples as f64
    };

    let classes = Label::all()
        .into_iter()
        .map(|label| {
            let tp = count(actual, predicted, |a, p| a == label && p == label);
            let fp = count(actual, predicted, |a, p| a != label && p == label);
            let fn_ = count(actual, predicted, |a, p| a == label && p != label);
            let precision = ratio(tp, tp + fp);
            let recall = ratio(tp, tp + fn_);
            let f1 = if precision + recall == 0.0 {
                0.0
            } else {
                2.0 * precision * recall / (precision + recall)
            };
            ClassReport {
                label,
                precision,
                recall,
                f1,
                support: tp + fn_,
            }
        })
        .collect();

    EvaluationReport {
        accuracy,
        classes,
        samples,
    }
}

fn count(actual: &[Label], predicted: &[Label], keep: impl Fn(Label, Label) -> bool) -> usize {
    actual
        .iter()
        .zip(predicted)
        .filter(|(a, p)| keep(**a, **p))
        .count()
}

// 0/0 scores as 0, matching the usual report convention for absent classes.
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>14}  {:>9}  {:>9}  {:>9}  {:>8}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for class in &self.classes {
            writeln!(
                f,
                "{:>14}  {:>9.2}  {:>9.2}  {:>9.2}  {:>8}",
                class.label.as_str(),
                class.precision,
                class.recall,
                class.f1,
                class.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>14}  {:>9}  {:>9}  {:>9.2}  {:>8}",
            "accuracy", "", "", self.accuracy, self.samples
        )?;
        writeln!(
            f,
            "{:>14}  {:>9.2}  {:>9.2}  {:>9.2}  {:>8}",
            "macro avg",
            self.macro_precision(),
            self.macro_recall(),
            self.macro_f1(),
            self.samples
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
