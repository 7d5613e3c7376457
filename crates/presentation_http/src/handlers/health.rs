//! Health check handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use infrastructure::AppConfig;

use crate::state::AppState;

/// Liveness payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Answers as long as the process serves requests
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub normalizer: NormalizerStatus,
    pub speech: SpeechStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerStatus {
    pub program: String,
    pub working_dir_present: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechStatus {
    pub endpoint: String,
    pub speaker: String,
}

impl ReadinessResponse {
    /// Inspect the configured dependencies of the sentence pipeline
    async fn inspect(config: &AppConfig) -> Self {
        let working_dir_present = tokio::fs::metadata(&config.normalizer.working_dir)
            .await
            .is_ok_and(|m| m.is_dir());

        Self {
            ready: working_dir_present,
            normalizer: NormalizerStatus {
                program: config.normalizer.program.clone(),
                working_dir_present,
            },
            speech: SpeechStatus {
                endpoint: config.speech.endpoint(),
                speaker: config.speech.default_speaker.clone(),
            },
        }
    }
}

/// `503` until the normalizer working directory exists
///
/// The speech endpoint is reported but never called from here.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let report = ReadinessResponse::inspect(&state.config).await;
    let status = if report.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}
