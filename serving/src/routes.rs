use actix_web::{HttpResponse, Responder, get, post, web};
use log::error;

use loader::{ModelLoader, StateKind};
use model::{ClientRecord, transform};

use crate::types::{ErrorResponse, HealthResponse, PredictRequest, PredictResponse};

/// Stateless prediction endpoint. Polls the loader (never waits on it),
/// validates, transforms and scores. A not-ready model is said out loud,
/// never papered over with a stale or default answer.
#[post("/predict")]
pub async fn predict(
    loader: web::Data<ModelLoader>,
    request: web::Json<PredictRequest>,
) -> impl Responder {
    let Some(model) = loader.get_model() else {
        return HttpResponse::ServiceUnavailable().json(ErrorResponse {
            error: "model_not_ready",
            detail: "the model is still loading, retry shortly".to_string(),
        });
    };

    let record = match ClientRecord::from_json(&request.data) {
        Ok(record) => record,
        Err(err) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "invalid_input",
                detail: err.to_string(),
            });
        }
    };

    let features = transform(&record);
    match model.predict(&features) {
        Ok(prediction) => HttpResponse::Ok().json(PredictResponse {
            prediction: prediction.label,
            probability: prediction.probability,
        }),
        Err(err) => {
            error!("inference failed: {err}");
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "inference_error",
                detail: err.to_string(),
            })
        }
    }
}

/// Load-state probe: 200 once the model is ready, 503 with the current
/// state otherwise.
#[get("/health")]
pub async fn health(loader: web::Data<ModelLoader>) -> impl Responder {
    let kind = loader.state();
    let body = HealthResponse {
        status: kind.as_str(),
    };

    match kind {
        StateKind::Ready => HttpResponse::Ok().json(body),
        _ => HttpResponse::ServiceUnavailable().json(body),
    }
}
