use axum::{extract::State, Json};
use serde::Serialize;
use crate::http::state::AppState;
use crate::http::templates::media_url;

/// One entry of the `/api/media` listing.
#[derive(Debug, Serialize)]
pub struct MediaSummary {
    pub index: usize,
    pub path: String,
    pub url: String,
    pub preview_url: String,
    pub view_url: String,
    pub kind: &'static str,
    pub mime: &'static str,
    pub file_size: u64,
}

/// GET /api/media: every entry in scan order.
pub async fn list_media(State(state): State<AppState>) -> Json<Vec<MediaSummary>> {
    let items = state
        .library
        .items
        .iter()
        .enumerate()
        .map(|(index, entry)| MediaSummary {
            index,
            path: entry.rel_path.clone(),
            url: media_url(&entry.rel_path),
            preview_url: format!("/preview/{index}"),
            view_url: format!("/view/{index}"),
            kind: entry.kind.as_str(),
            mime: entry.mime,
            file_size: entry.file_size,
        })
        .collect();
    Json(items)
}
