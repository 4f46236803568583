use std::fs;
use std::path::Path;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use mediaview::http::{build_router, state::AppState};
use mediaview::media::scanner::{resolve_root, scan};

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-png-body";
const MP4_BYTES: &[u8] = b"\x00\x00\x00\x18ftypmp42fake-mp4-body";

fn make_app_from(dir: &Path) -> axum::Router {
    let root = resolve_root(dir).unwrap();
    let library = scan(&root);
    build_router(AppState::new(library, root))
}

/// Root with `a.png`, `b.mp4` and `notes.txt`.
fn fixture() -> (TempDir, axum::Router) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.png"), PNG_BYTES).unwrap();
    fs::write(dir.path().join("b.mp4"), MP4_BYTES).unwrap();
    fs::write(dir.path().join("notes.txt"), b"not media").unwrap();
    let app = make_app_from(dir.path());
    (dir, app)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

async fn body_text(response: axum::response::Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

fn content_type(response: &axum::response::Response) -> String {
    response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

// ── GET / ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn gallery_lists_one_card_per_entry() {
    let (_dir, app) = fixture();
    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(content_type(&response).starts_with("text/html"));
    let text = body_text(response).await;
    assert_eq!(text.matches("class=\"media-item\"").count(), 2, "{text}");
    assert!(text.contains("href=\"/view/0\""));
    assert!(text.contains("href=\"/view/1\""));
    assert!(!text.contains("notes.txt"));
}

#[tokio::test]
async fn gallery_uses_video_element_for_videos() {
    let (_dir, app) = fixture();
    let text = body_text(app.oneshot(get("/")).await.unwrap()).await;
    assert!(text.contains("src=\"/preview/0\""));
    assert!(text.contains("<video class=\"media-preview\" src=\"/media/b.mp4\""));
}

#[tokio::test]
async fn gallery_empty_directory_renders_empty_state() {
    let dir = tempfile::tempdir().unwrap();
    let response = make_app_from(dir.path()).oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let text = body_text(response).await;
    assert!(text.contains("No media found"));
    assert_eq!(text.matches("class=\"media-item\"").count(), 0);
}

// ── GET /view/{index} ─────────────────────────────────────────────────────────

#[tokio::test]
async fn viewer_renders_entry_with_wrapping_navigation() {
    let (_dir, app) = fixture();
    let response = app.oneshot(get("/view/0")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let text = body_text(response).await;
    assert!(text.contains("src=\"/media/a.png\""));
    assert!(text.contains("id=\"prev\" href=\"/view/1\""));
    assert!(text.contains("id=\"next\" href=\"/view/1\""));
    assert!(text.contains("href=\"/\""));
    assert!(text.contains("ArrowLeft"));
    assert!(text.contains("ArrowRight"));
    assert!(text.contains("Escape"));
}

#[tokio::test]
async fn viewer_out_of_range_returns_404() {
    let (_dir, app) = fixture();
    for uri in ["/view/2", "/view/99", "/view/-1", "/view/abc"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

// ── GET /media/{path} ─────────────────────────────────────────────────────────

#[tokio::test]
async fn media_png_served_with_image_png() {
    let (_dir, app) = fixture();
    let response = app.oneshot(get("/media/a.png")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "image/png");
    assert_eq!(response.headers().get("accept-ranges").unwrap(), "bytes");
    assert_eq!(body_bytes(response).await, PNG_BYTES);
}

#[tokio::test]
async fn media_mp4_served_with_video_mp4() {
    let (_dir, app) = fixture();
    let response = app.oneshot(get("/media/b.mp4")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "video/mp4");
    assert_eq!(body_bytes(response).await, MP4_BYTES);
}

#[tokio::test]
async fn media_not_in_list_returns_404() {
    let (_dir, app) = fixture();
    for uri in ["/media/notes.txt", "/media/missing.png", "/media/"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn media_percent_encoded_names_resolve() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("summer trip")).unwrap();
    fs::write(dir.path().join("summer trip").join("beach #1.jpg"), b"jpeg").unwrap();
    let response = make_app_from(dir.path())
        .oneshot(get("/media/summer%20trip/beach%20%231.jpg"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "image/jpeg");
}

#[tokio::test]
async fn media_path_traversal_is_rejected() {
    let (_dir, app) = fixture();
    for uri in [
        "/media/..%2f..%2fetc%2fpasswd",
        "/media/../../etc/passwd",
        "/media/%2fetc%2fpasswd",
        "/media/a.png%2f..%2f..%2fnotes.txt",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        let status = response.status();
        assert!(
            status == StatusCode::FORBIDDEN || status == StatusCode::NOT_FOUND,
            "{uri} returned {status}"
        );
        let text = String::from_utf8_lossy(&body_bytes(response).await).to_string();
        assert!(!text.contains("root:"), "{uri} leaked file contents");
    }
}

#[tokio::test]
async fn media_dot_dot_escape_is_forbidden() {
    let (_dir, app) = fixture();
    let response = app.oneshot(get("/media/..%2f..%2fetc%2fpasswd")).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[cfg(unix)]
#[tokio::test]
async fn media_swapped_for_symlink_after_scan_is_forbidden() {
    let outside = tempfile::tempdir().unwrap();
    fs::write(outside.path().join("secret.png"), b"secret").unwrap();
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.png"), PNG_BYTES).unwrap();
    let app = make_app_from(dir.path());

    fs::remove_file(dir.path().join("a.png")).unwrap();
    std::os::unix::fs::symlink(outside.path().join("secret.png"), dir.path().join("a.png")).unwrap();

    let response = app.oneshot(get("/media/a.png")).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn media_deleted_after_scan_returns_404() {
    let (dir, app) = fixture();
    fs::remove_file(dir.path().join("a.png")).unwrap();
    let response = app.oneshot(get("/media/a.png")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn media_range_returns_partial_content() {
    let (_dir, app) = fixture();
    let request = Request::builder()
        .uri("/media/a.png")
        .header("range", "bytes=0-3")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(
        response.headers().get("content-range").unwrap(),
        &format!("bytes 0-3/{}", PNG_BYTES.len())
    );
    assert_eq!(response.headers().get("content-length").unwrap(), "4");
    assert_eq!(body_bytes(response).await, &PNG_BYTES[..4]);
}

#[tokio::test]
async fn media_suffix_range_returns_tail() {
    let (_dir, app) = fixture();
    let request = Request::builder()
        .uri("/media/b.mp4")
        .header("range", "bytes=-4")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(body_bytes(response).await, &MP4_BYTES[MP4_BYTES.len() - 4..]);
}

#[tokio::test]
async fn media_range_beyond_eof_returns_416() {
    let (_dir, app) = fixture();
    let request = Request::builder()
        .uri("/media/a.png")
        .header("range", "bytes=1000-2000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::RANGE_NOT_SATISFIABLE);
    assert_eq!(
        response.headers().get("content-range").unwrap(),
        &format!("bytes */{}", PNG_BYTES.len())
    );
}

#[tokio::test]
async fn media_unparseable_range_serves_full_file() {
    let (_dir, app) = fixture();
    for range in ["garbage", "items=0-1", "bytes=abc"] {
        let request = Request::builder()
            .uri("/media/a.png")
            .header("range", range)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{range}");
        assert!(response.headers().get("content-range").is_none(), "{range}");
        assert_eq!(body_bytes(response).await, PNG_BYTES, "{range}");
    }
}

#[tokio::test]
async fn media_non_ascii_range_serves_full_file() {
    let (_dir, app) = fixture();
    let request = Request::builder()
        .uri("/media/b.mp4")
        .header("range", axum::http::HeaderValue::from_bytes(b"bytes=\xff-").unwrap())
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, MP4_BYTES);
}

#[tokio::test]
async fn media_range_past_end_is_clamped() {
    let (_dir, app) = fixture();
    let request = Request::builder()
        .uri("/media/a.png")
        .header("range", "bytes=0-999")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(
        response.headers().get("content-range").unwrap(),
        &format!("bytes 0-{}/{}", PNG_BYTES.len() - 1, PNG_BYTES.len())
    );
}

#[tokio::test]
async fn media_head_returns_headers_without_body() {
    let (_dir, app) = fixture();
    let request = Request::builder()
        .method("HEAD")
        .uri("/media/b.mp4")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "video/mp4");
    assert_eq!(
        response.headers().get("content-length").unwrap(),
        &MP4_BYTES.len().to_string()
    );
    assert!(body_bytes(response).await.is_empty());
}

// ── GET /preview/{index} ──────────────────────────────────────────────────────

#[tokio::test]
async fn preview_small_file_is_the_file() {
    let (_dir, app) = fixture();
    let response = app.oneshot(get("/preview/0")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "image/png");
    assert_eq!(body_bytes(response).await, PNG_BYTES);
}

#[tokio::test]
async fn preview_large_file_is_svg_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("huge.jpg"), vec![0u8; 2 * 1024 * 1024 + 1]).unwrap();
    let response = make_app_from(dir.path()).oneshot(get("/preview/0")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "image/svg+xml");
    let text = body_text(response).await;
    assert!(text.contains("Media 1"));
    assert!(text.contains(">Image<"));
}

#[tokio::test]
async fn preview_out_of_range_returns_404() {
    let (_dir, app) = fixture();
    let response = app.oneshot(get("/preview/5")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ── GET /api/media ────────────────────────────────────────────────────────────

#[tokio::test]
async fn api_lists_entries_in_scan_order() {
    let (_dir, app) = fixture();
    let response = app.oneshot(get("/api/media")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["path"], "a.png");
    assert_eq!(items[0]["kind"], "image");
    assert_eq!(items[0]["url"], "/media/a.png");
    assert_eq!(items[1]["index"], 1);
    assert_eq!(items[1]["kind"], "video");
    assert_eq!(items[1]["mime"], "video/mp4");
    assert_eq!(items[1]["view_url"], "/view/1");
    assert_eq!(items[1]["file_size"], MP4_BYTES.len() as u64);
}

// ── Everything else ───────────────────────────────────────────────────────────

#[tokio::test]
async fn unknown_route_returns_404() {
    let (_dir, app) = fixture();
    for uri in ["/nope", "/view", "/a.png", "/api"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_share_the_library() {
    let (_dir, app) = fixture();
    let mut handles = Vec::new();
    for i in 0..32 {
        let app = app.clone();
        let uri = match i % 4 {
            0 => "/",
            1 => "/view/1",
            2 => "/media/a.png",
            _ => "/api/media",
        };
        handles.push(tokio::spawn(async move {
            app.oneshot(get(uri)).await.unwrap().status()
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }
}
