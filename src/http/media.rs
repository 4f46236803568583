use std::path::{Component, Path as FsPath, PathBuf};

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use http_range_header::{parse_range_header, ParsedRanges};
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;
use crate::http::error::AppError;
use crate::http::state::AppState;
use crate::media::library::MediaEntry;

/// Normalize the `{path}` capture of `/media/{*path}` into the `/`-joined
/// form the scanner stores. Parent, root and drive-prefix components are
/// rejected outright, even when they would land back inside the root.
pub fn normalize_request_path(raw: &str) -> Result<String, AppError> {
    if raw.contains('\0') {
        tracing::warn!("Media path contains a null byte");
        return Err(AppError::PathTraversal);
    }
    let mut parts = Vec::new();
    for component in FsPath::new(raw).components() {
        match component {
            Component::Normal(name) => match name.to_str() {
                Some(s) => parts.push(s),
                None => return Err(AppError::NotFound),
            },
            Component::CurDir => continue,
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                tracing::warn!("Path traversal attempt rejected: {:?}", raw);
                return Err(AppError::PathTraversal);
            }
        }
    }
    if parts.is_empty() {
        return Err(AppError::NotFound);
    }
    Ok(parts.join("/"))
}

/// Resolve a requested media path to a scanned entry and its on-disk location.
///
/// Only paths the scanner indexed are servable. The file is canonicalized
/// again at request time so a file swapped for a symlink after the scan
/// cannot escape the root.
pub async fn resolve_media_path(state: &AppState, raw: &str) -> Result<(MediaEntry, PathBuf), AppError> {
    let rel_path = normalize_request_path(raw)?;
    let entry = state
        .library
        .find_by_rel_path(&rel_path)
        .cloned()
        .ok_or(AppError::NotFound)?;
    let canonical = canonical_within_root(&state.root, &entry.path).await?;
    Ok((entry, canonical))
}

pub(crate) async fn canonical_within_root(root: &FsPath, path: &FsPath) -> Result<PathBuf, AppError> {
    let canonical = match tokio::fs::canonicalize(path).await {
        Ok(p) => p,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(AppError::NotFound),
        Err(e) => return Err(AppError::Io(e)),
    };
    if !canonical.starts_with(root) {
        tracing::warn!(
            "Symlink escape attempt: {} resolved to {} which is outside {}",
            path.display(),
            canonical.display(),
            root.display()
        );
        return Err(AppError::PathTraversal);
    }
    Ok(canonical)
}

/// Headers present on every media response (GET + HEAD).
fn media_headers(mime: &'static str, file_size: u64) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(mime));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(file_size));
    headers.insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));
    headers
}

/// HEAD /media/{path}: headers only, the file is never opened.
pub async fn serve_media_head(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Response, AppError> {
    let (entry, path) = resolve_media_path(&state, &raw).await?;
    let file_size = tokio::fs::metadata(&path).await?.len();
    Ok((StatusCode::OK, media_headers(entry.mime, file_size)).into_response())
}

/// GET /media/{path}: stream the full file, or one byte range per RFC 7233.
pub async fn serve_media_get(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    req_headers: HeaderMap,
) -> Result<Response, AppError> {
    let (entry, path) = resolve_media_path(&state, &raw).await?;
    // A non-ASCII Range value cannot be a byte range; ignore it and serve the whole file.
    let range = req_headers.get(header::RANGE).and_then(|v| v.to_str().ok());
    stream_file(&path, entry.mime, range).await
}

/// Open `path` and stream it with `mime`, honouring an optional Range value.
///
/// A Range value that does not parse is ignored (full 200 response, per
/// RFC 7233 §3.1); one that parses but cannot be satisfied gets 416.
pub async fn stream_file(path: &FsPath, mime: &'static str, range: Option<&str>) -> Result<Response, AppError> {
    let file = match tokio::fs::File::open(path).await {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(AppError::NotFound),
        Err(e) => {
            tracing::error!("Failed to open file {}: {}", path.display(), e);
            return Err(AppError::Io(e));
        }
    };
    let file_size = file.metadata().await?.len();
    let headers = media_headers(mime, file_size);

    if let Some(range_str) = range {
        match parse_range_header(range_str) {
            Ok(parsed) => return range_response(file, file_size, parsed, headers).await,
            Err(_) => tracing::debug!("Ignoring unparseable Range {:?} for {}", range_str, path.display()),
        }
    }

    let body = Body::from_stream(ReaderStream::new(file));
    Ok((StatusCode::OK, headers, body).into_response())
}

fn unsatisfiable(file_size: u64) -> Response {
    (
        StatusCode::RANGE_NOT_SATISFIABLE,
        [(header::CONTENT_RANGE, format!("bytes */{}", file_size))],
    )
        .into_response()
}

/// Returns 206 Partial Content or 416 Range Not Satisfiable.
/// Multi-part ranges serve the first range only.
async fn range_response(
    mut file: tokio::fs::File,
    file_size: u64,
    parsed: ParsedRanges,
    mut headers: HeaderMap,
) -> Result<Response, AppError> {
    // validate() resolves suffix ranges against the size and rejects overlaps.
    let Ok(ranges) = parsed.validate(file_size) else {
        return Ok(unsatisfiable(file_size));
    };
    let Some(first) = ranges.into_iter().next() else {
        return Ok(unsatisfiable(file_size));
    };

    let start = *first.start();
    let end = *first.end(); // inclusive
    let length = end - start + 1;

    file.seek(std::io::SeekFrom::Start(start)).await?;

    let content_range = format!("bytes {}-{}/{}", start, end, file_size);
    headers.insert(
        header::CONTENT_RANGE,
        HeaderValue::from_str(&content_range).unwrap_or_else(|_| HeaderValue::from_static("bytes 0-0/0")),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));

    let body = Body::from_stream(ReaderStream::new(file.take(length)));
    Ok((StatusCode::PARTIAL_CONTENT, headers, body).into_response())
}
