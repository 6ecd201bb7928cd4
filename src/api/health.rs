//! Liveness and health endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use super::state::AppState;
use crate::api::types::{Json, StatusMessage};
use crate::domain::ChatMode;

pub const LIVENESS_MESSAGE: &str = "Netabot backend is running";

/// Health response with per-mode availability
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub modes: ModeAvailability,
}

/// Health check status
#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Serialize)]
pub struct ModeAvailability {
    pub sync: bool,
    pub async_job: bool,
}

/// GET /
pub async fn root() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: LIVENESS_MESSAGE.to_string(),
    })
}

/// GET /health
///
/// A mode without configuration degrades the service but it still answers
/// requests, so the status code stays 200.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let modes = ModeAvailability {
        sync: state.gateway.is_available(ChatMode::Sync),
        async_job: state.gateway.is_available(ChatMode::AsyncJob),
    };

    let status = if modes.sync && modes.async_job {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        modes,
    };

    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serialization() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Healthy).unwrap(),
            "\"healthy\""
        );
        assert_eq!(
            serde_json::to_string(&HealthStatus::Degraded).unwrap(),
            "\"degraded\""
        );
    }

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: HealthStatus::Degraded,
            version: "1.0.0".to_string(),
            modes: ModeAvailability {
                sync: true,
                async_job: false,
            },
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"degraded\""));
        assert!(json.contains("\"version\":\"1.0.0\""));
        assert!(json.contains("\"async_job\":false"));
    }
}
