pub mod health;
pub mod me;
pub mod responses;
pub mod rfqs;

use axum::{routing::get, routing::patch, routing::post, Router};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        // Public routes
        .route("/health", get(health::health_check))
        // Protected routes
        .route("/me", get(me::get_me))
        // RFQs
        .route("/rfqs", post(rfqs::create_rfq))
        .route("/rfqs", get(rfqs::list_rfqs))
        .route("/rfqs/:rfq_id", get(rfqs::get_rfq))
        .route("/rfqs/:rfq_id", patch(rfqs::update_rfq))
        .route("/rfqs/:rfq_id/publish", post(rfqs::publish_rfq))
        .route("/rfqs/:rfq_id/evaluate", post(rfqs::evaluate_rfq))
        // Responses (nested under RFQs)
        .route("/rfqs/:rfq_id/responses", post(responses::submit_response))
        .route("/rfqs/:rfq_id/responses", get(responses::list_responses))
}
