use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Catalog browsing
        .route("/titles/top", get(handlers::top_titles))
        .route("/titles/search", get(handlers::search_titles))
        .route("/titles/genre/:genre", get(handlers::titles_by_genre))
        // Quiz
        .route("/quiz/questions", get(handlers::get_questions))
        .route("/quiz", post(handlers::create_quiz))
        .route("/quiz/:id", get(handlers::get_quiz))
        .route("/quiz/:id/answers", post(handlers::record_answer))
        .route("/quiz/:id/advance", post(handlers::advance_quiz))
        .route("/quiz/:id/back", post(handlers::retreat_quiz))
        .route("/quiz/:id/reset", post(handlers::reset_quiz))
        // Request id runs outside the trace layer so spans carry the id
        .layer(TraceLayer::new_for_http().make_span_with(make_span))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
