use actix_web::{web, HttpResponse, Responder};

use crate::core::ScoreEntry;
use crate::models::{
    CategoriesResponse, HealthResponse, ScoreListQuery, ScoreListResponse, ScoreMetadataResponse,
    ValidateScoreResponse,
};
use crate::routes::scores::score_not_found;
use crate::routes::AppState;

/// Health check endpoint
pub(crate) async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let scores_loaded = state.registry.len();
    let status = if scores_loaded > 0 { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        message: format!("{} score calculators loaded", scores_loaded),
        version: env!("CARGO_PKG_VERSION").to_string(),
        scores_loaded,
        timestamp: chrono::Utc::now(),
    })
}

fn matches_search(entry: &ScoreEntry, needle: &str) -> bool {
    let metadata = entry.metadata();
    entry.id().to_lowercase().contains(needle)
        || metadata.title.to_lowercase().contains(needle)
        || metadata.description.to_lowercase().contains(needle)
}

/// List scores
///
/// GET /api/scores?category=cardiology
/// GET /api/scores?search=sepsis
///
/// `search` takes precedence when both are given.
pub(crate) async fn list_scores(
    state: web::Data<AppState>,
    query: web::Query<ScoreListQuery>,
) -> impl Responder {
    let search = query.search.as_deref().map(str::to_lowercase);
    let category = query.category.as_deref().map(str::to_lowercase);

    let scores: Vec<_> = state
        .registry
        .entries()
        .filter(|entry| match (&search, &category) {
            (Some(needle), _) => matches_search(entry, needle),
            (None, Some(category)) => entry.metadata().category.eq_ignore_ascii_case(category),
            (None, None) => true,
        })
        .map(|entry| entry.metadata().info(entry.id()))
        .collect();

    tracing::debug!("Listing {} scores (category={:?}, search={:?})", scores.len(), category, search);

    HttpResponse::Ok().json(ScoreListResponse { total: scores.len(), scores })
}

/// GET /api/scores/{score_id}
pub(crate) async fn get_score_metadata(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let score_id = path.into_inner();
    let Some(entry) = state.registry.get(&score_id) else {
        return score_not_found(&score_id);
    };

    let metadata = entry.metadata();
    HttpResponse::Ok().json(ScoreMetadataResponse {
        info: metadata.info(entry.id()),
        endpoint: entry.endpoint(),
        references: metadata.references.iter().map(|r| r.to_string()).collect(),
        example_request: entry.example().clone(),
    })
}

/// GET /api/scores/{score_id}/validate
pub(crate) async fn validate_score(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let score_id = path.into_inner();
    if !state.registry.contains(&score_id) {
        return score_not_found(&score_id);
    }

    HttpResponse::Ok().json(ValidateScoreResponse {
        score_id,
        score_exists: true,
        calculator_available: true,
        status: "ready".to_string(),
    })
}

/// GET /api/categories
pub(crate) async fn list_categories(state: web::Data<AppState>) -> impl Responder {
    let categories = state.registry.categories();
    HttpResponse::Ok().json(CategoriesResponse { total: categories.len(), categories })
}
