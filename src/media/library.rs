use std::path::PathBuf;

use crate::media::mime::MediaKind;

/// A single discovered media file.
#[derive(Debug, Clone)]
pub struct MediaEntry {
    /// Path relative to the scan root, always `/`-separated. This is the
    /// `{path}` segment of `/media/{path}`.
    pub rel_path: String,
    /// Canonical absolute path (via std::fs::canonicalize).
    pub path: PathBuf,
    /// File size in bytes at scan time.
    pub file_size: u64,
    /// MIME type from classify(), e.g. "video/mp4".
    pub mime: &'static str,
    pub kind: MediaKind,
}

/// Ordered in-memory media list built once at startup.
///
/// The position of an entry is its identity: `/view/{index}` and the
/// next/previous links all address entries by index, so the list is never
/// mutated once the scan has finished.
#[derive(Debug, Default)]
pub struct MediaLibrary {
    pub items: Vec<MediaEntry>,
}

impl MediaLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MediaEntry> {
        self.items.get(index)
    }

    /// Look up an entry by its root-relative path. Exact match only.
    pub fn find_by_rel_path(&self, rel_path: &str) -> Option<&MediaEntry> {
        self.items.iter().find(|e| e.rel_path == rel_path)
    }

    /// Index of the entry after `index`, wrapping to 0 past the end.
    /// None when the library is empty or `index` is out of range.
    pub fn next_index(&self, index: usize) -> Option<usize> {
        let n = self.items.len();
        (index < n).then(|| (index + 1) % n)
    }

    /// Index of the entry before `index`, wrapping to the last entry.
    pub fn prev_index(&self, index: usize) -> Option<usize> {
        let n = self.items.len();
        (index < n).then(|| (index + n - 1) % n)
    }
}
