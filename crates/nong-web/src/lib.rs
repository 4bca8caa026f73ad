pub mod response;
pub mod routes;

use axum::Router;
use nong_core::state::AppState;
use tower_http::services::ServeDir;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Full application: JSON routes, generated audio under `/static`, request tracing
pub fn create_app(state: AppState) -> Router {
    let static_dir = state.config.storage.static_dir.clone();

    routes::router(state)
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
