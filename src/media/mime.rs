use std::path::Path;

/// Media kind classification for discovered files.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Lowercase name used in JSON and in the preview placeholder.
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// Capitalized label shown to humans.
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Image => "Image",
            MediaKind::Video => "Video",
        }
    }
}

/// Classify a file path by its extension into a (MediaKind, MIME type) pair.
///
/// Returns `None` for anything outside the allow-list (png, jpg, jpeg, mp4).
/// Extensions are matched case-insensitively.
pub fn classify(path: &Path) -> Option<(MediaKind, &'static str)> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();

    let result = match ext.as_str() {
        "png" => (MediaKind::Image, "image/png"),
        "jpg" | "jpeg" => (MediaKind::Image, "image/jpeg"),
        "mp4" => (MediaKind::Video, "video/mp4"),
        _ => return None,
    };

    Some(result)
}
