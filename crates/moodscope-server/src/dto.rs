//! Wire types for the HTTP API.

use serde::{Deserialize, Serialize};

use moodscope_core::Prediction;

// === HTTP DTOs ===

/// Body of `POST /predict`.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

/// Body of a successful `POST /predict` response.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    /// The analyzed text, echoed back.
    pub input: String,
    /// Class index: 1 when depression indicators were detected, else 0.
    pub prediction: u8,
    /// Positive-class confidence in `[0, 1]`.
    pub probability: f64,
    pub label: &'static str,
    pub message: &'static str,
}

impl PredictResponse {
    pub fn new(input: String, prediction: &Prediction) -> Self {
        Self {
            input,
            prediction: prediction.label.index(),
            probability: prediction.probability,
            label: prediction.label.as_str(),
            message: prediction.label.message(),
        }
    }
}

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}

impl WelcomeResponse {
    pub fn new() -> Self {
        Self {
            message: "Welcome to the moodscope depression detection API 🧠",
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}
