pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::proposal::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_form_page))
        .route("/health", get(health::health_handler))
        // HTML form submission
        .route("/proposals", post(handlers::handle_form_submit))
        // JSON API
        .route("/api/v1/proposals", post(handlers::handle_generate))
        .route(
            "/api/v1/proposals/preview",
            post(handlers::handle_preview),
        )
        .with_state(state)
}
