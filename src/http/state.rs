use std::path::PathBuf;
use std::sync::Arc;
use crate::media::library::MediaLibrary;

/// Shared application state injected into all route handlers via axum::extract::State.
/// Built once after the scan and never mutated, so plain Arc sharing needs no lock.
#[derive(Clone)]
pub struct AppState {
    pub library: Arc<MediaLibrary>,
    /// Canonical scan root. Every file served must resolve below it.
    pub root: Arc<PathBuf>,
}

impl AppState {
    pub fn new(library: MediaLibrary, root: PathBuf) -> Self {
        Self {
            library: Arc::new(library),
            root: Arc::new(root),
        }
    }
}
