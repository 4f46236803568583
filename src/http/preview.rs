use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use crate::http::error::AppError;
use crate::http::media::{canonical_within_root, stream_file};
use crate::http::pages::parse_index;
use crate::http::state::AppState;
use crate::http::templates::render_placeholder_svg;

/// Files above this size get an SVG placeholder instead of their own bytes.
pub const MAX_PREVIEW_BYTES: u64 = 2 * 1024 * 1024;

/// GET /preview/{index}: thumbnail source for a gallery card.
pub async fn serve_preview(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Response, AppError> {
    let index = parse_index(&raw)?;
    let entry = state.library.get(index).ok_or(AppError::NotFound)?;
    let path = canonical_within_root(&state.root, &entry.path).await?;
    let file_size = tokio::fs::metadata(&path).await?.len();

    if file_size > MAX_PREVIEW_BYTES {
        tracing::debug!("placeholder preview for #{} ({} bytes)", index, file_size);
        let svg = render_placeholder_svg(index, entry.kind, file_size);
        return Ok((StatusCode::OK, [(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response());
    }
    stream_file(&path, entry.mime, None).await
}
