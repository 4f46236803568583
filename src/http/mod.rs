pub mod api;
pub mod error;
pub mod media;
pub mod pages;
pub mod preview;
pub mod state;
pub mod templates;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use crate::http::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::serve_gallery))
        .route("/view/{index}", get(pages::serve_viewer))
        .route("/media/{*path}", get(media::serve_media_get).head(media::serve_media_head))
        .route("/preview/{index}", get(preview::serve_preview))
        .route("/api/media", get(api::list_media))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
