use super::handlers;
use super::state::AppState;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Polling and webhook delivery on the pets path; other methods fall through to 404
        .route(
            "/pets",
            get(handlers::list_pets)
                .post(handlers::create_pet)
                .fallback(handlers::not_found),
        )
        // Webhook senders may POST to any path
        .fallback(handlers::fallback)
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
