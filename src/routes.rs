use axum::{
    handler::HandlerWithoutStateExt,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::ApiError;
use crate::handlers;
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.web_dir)
        .not_found_service(handlers::not_found.into_service());

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/chat", post(handlers::chat))
        .route("/api/status", get(handlers::status))
        .route("/api/tools", get(handlers::tools))
        .route("/api/templates", get(handlers::get_templates))
        .route("/api/history", get(handlers::get_history))
        .route("/api/extract-url", post(handlers::extract_url))
        // UI assets
        .nest_service("/static", static_dir)
        .fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub(crate) fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    error!("Request handler panicked: {}", detail);
    ApiError::Internal.into_response()
}
