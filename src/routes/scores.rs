use actix_web::{web, HttpResponse};
use serde_json::{json, Value};

use crate::core::Calculator;
use crate::error::CalcError;
use crate::models::{ErrorKind, ErrorResponse, ScoreResult};
use crate::routes::AppState;

/// Install `POST /{C::ID}` for one calculator
pub fn mount<C: Calculator>(cfg: &mut web::ServiceConfig) {
    cfg.route(&format!("/{}", C::ID), web::post().to(calculate_score::<C>));
}

/// Per-score endpoint
///
/// The body has already been decoded into the score's typed parameters by
/// the JSON extractor; shape errors never reach this handler.
async fn calculate_score<C: Calculator>(
    state: web::Data<AppState>,
    params: web::Json<C::Params>,
) -> HttpResponse {
    let params = params.into_inner();
    let outcome = state.registry.dispatch::<C>(&params);
    respond(C::ID, outcome, || serde_json::to_value(&params).unwrap_or(Value::Null))
}

/// Generic calculation endpoint
///
/// POST /api/{score_id}/calculate
pub(crate) async fn calculate_by_id(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    let score_id = path.into_inner();
    if !state.registry.contains(&score_id) {
        return score_not_found(&score_id);
    }

    let params = body.into_inner();
    let outcome = state.registry.invoke(&score_id, &params);
    respond(&score_id, outcome, move || params)
}

pub(crate) fn score_not_found(score_id: &str) -> HttpResponse {
    tracing::info!("Unknown score requested: {}", score_id);
    HttpResponse::NotFound().json(ErrorResponse::new(
        ErrorKind::ScoreNotFound,
        format!("Score '{}' not found", score_id),
        json!({ "score_id": score_id }),
    ))
}

/// Map a dispatch outcome onto an HTTP response
fn respond(
    score_id: &str,
    outcome: Option<Result<ScoreResult, CalcError>>,
    parameters: impl FnOnce() -> Value,
) -> HttpResponse {
    match outcome {
        Some(Ok(result)) => {
            tracing::info!("Calculated {}: {} ({})", score_id, result.result, result.stage);
            HttpResponse::Ok().json(result)
        }
        Some(Err(CalcError::Validation(message))) => {
            tracing::warn!("Validation failed for {}: {}", score_id, message);
            HttpResponse::UnprocessableEntity().json(ErrorResponse::new(
                ErrorKind::ValidationError,
                "Invalid parameters for calculation",
                json!({ "error": message }),
            ))
        }
        Some(Err(CalcError::Internal(message))) => {
            tracing::error!("Calculator {} failed: {}", score_id, message);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                ErrorKind::InternalServerError,
                "Internal error in calculation",
                json!({ "error": message }),
            ))
        }
        None => {
            tracing::error!("No calculator registered for {}", score_id);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                ErrorKind::CalculationError,
                format!("Error calculating {}", score_id),
                json!({ "parameters": parameters() }),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, http::StatusCode};

    async fn body_json(response: HttpResponse) -> Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_unknown_score_is_calculation_error() {
        let response = respond("not_a_real_score", None, || json!({}));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "CalculationError");
        assert_eq!(body["details"]["parameters"], json!({}));
    }

    #[actix_web::test]
    async fn test_validation_is_unprocessable() {
        let outcome = Some(Err(CalcError::validation("ICP cannot be greater than or equal to MAP")));
        let response = respond("cerebral_perfusion_pressure", outcome, || Value::Null);
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"], "ValidationError");
        assert_eq!(body["details"]["error"], "ICP cannot be greater than or equal to MAP");
    }

    #[actix_web::test]
    async fn test_internal_is_server_error() {
        let outcome = Some(Err(CalcError::internal("value is not a finite number")));
        let response = respond("oxygenation_index", outcome, || Value::Null);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "InternalServerError");
    }
}
