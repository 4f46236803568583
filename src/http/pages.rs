use axum::{
    extract::{Path, State},
    response::Html,
};
use crate::http::error::AppError;
use crate::http::state::AppState;
use crate::http::templates;

/// Parse the `{index}` segment. Anything that is not a non-negative integer
/// is treated as a missing entry.
pub fn parse_index(raw: &str) -> Result<usize, AppError> {
    raw.parse::<usize>().map_err(|_| AppError::NotFound)
}

/// GET /: gallery grid.
pub async fn serve_gallery(State(state): State<AppState>) -> Html<String> {
    Html(templates::render_gallery(&state.library))
}

/// GET /view/{index}: full-screen viewer.
pub async fn serve_viewer(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Html<String>, AppError> {
    let index = parse_index(&raw)?;
    templates::render_viewer(&state.library, index)
        .map(Html)
        .ok_or(AppError::NotFound)
}
