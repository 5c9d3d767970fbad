// Route exports
pub mod catalog;
pub mod scores;

use actix_web::web;
use std::sync::Arc;

use crate::core::Registry;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
}

impl AppState {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }
}

/// Configure catalogue routes plus one POST route per registered score
pub fn configure_routes(cfg: &mut web::ServiceConfig, registry: &Registry) {
    cfg.route("/health", web::get().to(catalog::health_check));

    cfg.service(
        web::scope("/api")
            .route("/scores", web::get().to(catalog::list_scores))
            .route("/scores/{score_id}", web::get().to(catalog::get_score_metadata))
            .route("/scores/{score_id}/validate", web::get().to(catalog::validate_score))
            .route("/categories", web::get().to(catalog::list_categories))
            .route("/{score_id}/calculate", web::post().to(scores::calculate_by_id)),
    );

    for entry in registry.entries() {
        entry.mount(cfg);
    }
}
