//! Route table and request handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::dto::{HealthResponse, PredictRequest, PredictResponse, WelcomeResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Builds the application router. Middleware is layered on in `main`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .with_state(state)
}

async fn home() -> Json<WelcomeResponse> {
    Json(WelcomeResponse::new())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Classifies one text. Stateless per call; the artifacts never change
/// while the process lives, so equal inputs get equal answers.
async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, AppError> {
    let Json(request) = payload?;

    let features = state.vectorizer.transform_one(&request.text);
    let prediction = state.forest.predict_one(&features);
    tracing::info!(
        prediction = prediction.label.index(),
        probability = prediction.probability,
        "prediction served"
    );

    Ok(Json(PredictResponse::new(request.text, &prediction)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use moodscope_core::Label;
    use moodscope_model::{ForestClassifier, ForestConfig, TfidfVectorizer, DEFAULT_MAX_FEATURES};

    // Small fixture corpus. Every positive text carries "hopeless" and the
    // negative texts share no term, so the fitted forest is a clean oracle:
    // texts mentioning hopelessness flag positive, everything else negative.
    const POSITIVE: &[&str] = &[
        "feeling hopeless and worthless since monday",
        "hopeless nights crying alone",
        "so hopeless lately nothing matters anymore",
        "im hopeless tired and numb inside",
        "hopeless thoughts keep me awake",
        "everything feels hopeless and dark",
        "hopeless again skipped meals twice",
        "drowning in hopeless sadness",
        "hopeless mornings dreading work",
        "utterly hopeless cant focus",
        "hopeless and exhausted beyond words",
        "quiet hopeless despair all week",
        "hopeless spiral after the breakup",
        "feel hopeless whenever evening comes",
        "hopeless misery wont lift",
        "another hopeless sleepless night",
    ];

    const NEGATIVE: &[&str] = &[
        "celebrated a promotion with friends",
        "morning jog felt refreshing",
        "cooked delicious pasta tonight",
        "hiking trip planned this weekend",
        "finished reading an excellent novel",
        "garden tomatoes finally ripened",
        "productive meeting wrapped early",
        "learned three new guitar chords",
        "sunshine walk cleared a busy head",
        "volunteered at the animal shelter",
        "painted the kitchen bright yellow",
        "reunion dinner brought lots of laughter",
        "aced the certification exam",
        "weekend picnic by the lake",
        "new coffee blend tastes fantastic",
        "biked along the river trail",
    ];

    fn fixture_state() -> Arc<AppState> {
        let mut texts: Vec<String> = Vec::new();
        let mut labels = Vec::new();
        for text in POSITIVE {
            texts.push((*text).to_string());
            labels.push(Label::Depressed);
        }
        for text in NEGATIVE {
            texts.push((*text).to_string());
            labels.push(Label::NotDepressed);
        }

        let vectorizer = TfidfVectorizer::fit(&texts, DEFAULT_MAX_FEATURES).unwrap();
        let records = vectorizer.transform(&texts);
        let config = ForestConfig {
            trees: 25,
            ..ForestConfig::default()
        };
        let forest = ForestClassifier::fit(&records, &labels, &config).unwrap();
        Arc::new(AppState { vectorizer, forest })
    }

    fn app() -> Router {
        router(fixture_state())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_predict(app: Router, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_home_returns_welcome_payload() {
        let (status, body) = get_json(app(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].as_str().unwrap().contains("moodscope"));
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let (status, body) = get_json(app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_predict_flags_depressive_text() {
        let input = "I feel hopeless and empty every day";
        let (status, body) =
            post_predict(app(), json!({ "text": input }).to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["input"], input);
        assert_eq!(body["prediction"], 1);
        assert_eq!(body["label"], "Depressed");
        assert!(body["message"].as_str().unwrap().contains("⚠️"));

        let probability = body["probability"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&probability));
        assert!(probability > 0.5);
    }

    #[tokio::test]
    async fn test_predict_clears_neutral_text() {
        let input = "celebrated with a refreshing bike ride";
        let (status, body) =
            post_predict(app(), json!({ "text": input }).to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prediction"], 0);
        assert_eq!(body["label"], "Not Depressed");
        assert!(body["message"].as_str().unwrap().contains("✅"));
        assert!(body["probability"].as_f64().unwrap() <= 0.5);
    }

    #[tokio::test]
    async fn test_predict_is_deterministic_for_equal_input() {
        let state = fixture_state();
        let body = json!({ "text": "hopeless sleepless nights again" }).to_string();

        let (_, first) = post_predict(router(state.clone()), body.clone()).await;
        let (_, second) = post_predict(router(state), body).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_predict_handles_text_with_no_known_words() {
        let (status, body) =
            post_predict(app(), json!({ "text": "xylophone zanzibar" }).to_string()).await;

        assert_eq!(status, StatusCode::OK);
        let probability = body["probability"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&probability));
        let expected_label = if body["prediction"] == 1 { "Depressed" } else { "Not Depressed" };
        assert_eq!(body["label"], expected_label);
    }

    #[tokio::test]
    async fn test_predict_missing_text_field_is_unprocessable() {
        let (status, body) = post_predict(app(), "{}".to_string()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(!body["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_predict_malformed_json_is_bad_request() {
        let (status, body) = post_predict(app(), "{\"text\": ".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.get("error").is_some());
    }

    #[tokio::test]
    async fn test_predict_wrong_text_type_is_unprocessable() {
        let (status, _) = post_predict(app(), json!({ "text": 17 }).to_string()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
