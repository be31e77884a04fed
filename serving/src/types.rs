use serde::{Deserialize, Serialize};

/// `POST /predict` body: the 16 raw fields under a `data` key.
/// Validation happens against the typed domain, not here.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub data: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: u8,
    /// Positive-class probability; null for models without the capability.
    pub probability: Option<f32>,
}

/// Machine-readable error body: `error` is a stable kind, `detail` is
/// for humans reading logs and consoles.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
