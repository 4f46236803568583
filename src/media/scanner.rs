use std::path::{Component, Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

use crate::media::library::{MediaEntry, MediaLibrary};
use crate::media::mime::{classify, MediaKind};

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("path does not exist: {0}")]
    NotFound(PathBuf),
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("cannot resolve {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Validate the user-supplied root and return its canonical form.
pub fn resolve_root(path: &Path) -> Result<PathBuf, ScanError> {
    if !path.exists() {
        return Err(ScanError::NotFound(path.to_owned()));
    }
    if !path.is_dir() {
        return Err(ScanError::NotADirectory(path.to_owned()));
    }
    std::fs::canonicalize(path).map_err(|source| ScanError::Io {
        path: path.to_owned(),
        source,
    })
}

/// Walk `root` once and return every png/jpg/jpeg/mp4 file below it.
///
/// Entries within a directory are visited in file-name order, so the result
/// is deterministic for a given tree. Symlinks are not followed. Unreadable
/// entries log a warning and are skipped; the walk itself never fails.
pub fn scan(root: &Path) -> MediaLibrary {
    let start = Instant::now();
    let mut library = MediaLibrary::new();
    let mut image_count = 0usize;
    let mut video_count = 0usize;

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        match entry {
            Err(e) => {
                tracing::warn!("Cannot access entry: {}", e);
            }
            Ok(entry) if entry.path_is_symlink() => {
                tracing::debug!("Skipping symlink {}", entry.path().display());
            }
            Ok(entry) if entry.file_type().is_file() => {
                let Some(item) = process_file(root, entry.path()) else {
                    continue;
                };
                match item.kind {
                    MediaKind::Image => image_count += 1,
                    MediaKind::Video => video_count += 1,
                }
                tracing::debug!("indexed #{} {}", library.items.len(), item.rel_path);
                library.items.push(item);
            }
            Ok(_) => {} // directories: walkdir handles recursion
        }
    }

    tracing::info!(
        "Scanned {} files ({} image, {} video) in {:.1}s",
        library.items.len(),
        image_count,
        video_count,
        start.elapsed().as_secs_f64()
    );

    library
}

fn process_file(root: &Path, path: &Path) -> Option<MediaEntry> {
    // Non-media files are skipped silently.
    let (kind, mime) = classify(path)?;

    let Some(rel_path) = relative_url_path(root, path) else {
        tracing::warn!("Skipping {}: name is not valid UTF-8", path.display());
        return None;
    };

    let canonical = match std::fs::canonicalize(path) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!("Cannot canonicalize {}: {}", path.display(), e);
            return None;
        }
    };

    let file_size = match std::fs::metadata(&canonical) {
        Ok(m) => m.len(),
        Err(e) => {
            tracing::warn!("Cannot stat {}: {}", canonical.display(), e);
            return None;
        }
    };

    // Zero-byte files are interrupted copies, not media.
    if file_size == 0 {
        tracing::debug!("Skipping empty file {}", canonical.display());
        return None;
    }

    Some(MediaEntry {
        rel_path,
        path: canonical,
        file_size,
        mime,
        kind,
    })
}

/// `root/a/b.png` -> `"a/b.png"`, joined with `/` on every platform.
fn relative_url_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(name) => parts.push(name.to_str()?),
            _ => return None,
        }
    }
    Some(parts.join("/"))
}
