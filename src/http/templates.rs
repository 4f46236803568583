//! HTML, CSS and JS for the gallery and viewer pages.
//!
//! Pages are assembled from static fragments plus `format!` for the dynamic
//! parts. Every string that comes from the filesystem goes through
//! [`html_escape`] and, inside URLs, [`media_url`].

use std::borrow::Cow;
use std::fmt::Write;

use crate::media::library::{MediaEntry, MediaLibrary};
use crate::media::mime::MediaKind;

const PAGE_TITLE: &str = "Media Viewer";

const GALLERY_CSS: &str = r#"
body { font-family: Arial, sans-serif; margin: 0; padding: 20px; background-color: #f0f0f0; }
.header { text-align: center; margin-bottom: 30px; }
.gallery { display: grid; grid-template-columns: repeat(auto-fill, 320px); gap: 20px; justify-content: center; }
.media-item { display: block; width: 320px; background: white; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.1); overflow: hidden; color: inherit; text-decoration: none; transition: transform 0.2s; }
.media-item:hover { transform: translateY(-2px); box-shadow: 0 4px 16px rgba(0,0,0,0.2); }
.media-container { position: relative; width: 320px; height: 200px; background: #ddd; }
.media-preview { width: 100%; height: 100%; object-fit: cover; display: block; }
.play-overlay { position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); background: rgba(0,0,0,0.7); color: white; border-radius: 50%; width: 60px; height: 60px; display: flex; align-items: center; justify-content: center; font-size: 24px; }
.media-info { color: #555; padding: 6px 8px; font-size: 12px; font-weight: bold; height: 24px; display: flex; align-items: center; justify-content: space-between; box-sizing: border-box; }
.empty { text-align: center; padding: 40px; font-size: 18px; color: #666; }
"#;

const VIEWER_CSS: &str = r#"
body { margin: 0; padding: 0; background-color: black; color: white; font-family: Arial, sans-serif; overflow: hidden; }
.viewer-container { position: relative; width: 100vw; height: 100vh; display: flex; align-items: center; justify-content: center; }
.media-display { max-width: 100vw; max-height: 100vh; object-fit: contain; }
.controls { position: absolute; top: 20px; left: 20px; right: 20px; display: flex; justify-content: space-between; align-items: center; z-index: 100; }
.nav-button, .side-nav { background: rgba(0,0,0,0.7); color: white; border-radius: 5px; text-decoration: none; transition: background 0.2s; }
.nav-button { padding: 15px 20px; font-size: 16px; }
.side-nav { position: absolute; top: 50%; transform: translateY(-50%); padding: 20px 15px; font-size: 24px; z-index: 100; }
.nav-button:hover, .side-nav:hover { background: rgba(0,0,0,0.9); }
.prev-nav { left: 20px; }
.next-nav { right: 20px; }
.media-info { position: absolute; bottom: 20px; left: 20px; right: 20px; text-align: center; background: rgba(0,0,0,0.7); padding: 10px; border-radius: 5px; }
"#;

/// Escape text for use in HTML text nodes and quoted attribute values.
pub fn html_escape(s: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(s)
}

/// `/media/{rel_path}` with every segment percent-encoded.
pub fn media_url(rel_path: &str) -> String {
    let encoded: Vec<Cow<'_, str>> = rel_path.split('/').map(urlencoding::encode).collect();
    format!("/media/{}", encoded.join("/"))
}

/// Human-readable size with binary units, e.g. `1.5 KB`, `3 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{} {}", rounded as u64, UNITS[unit])
    } else {
        format!("{:.1} {}", rounded, UNITS[unit])
    }
}

fn page_head(out: &mut String, css: &str) {
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"UTF-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    let _ = writeln!(out, "<title>{PAGE_TITLE}</title>");
    let _ = writeln!(out, "<style>{css}</style>");
    out.push_str("</head>\n");
}

fn gallery_card(out: &mut String, index: usize, entry: &MediaEntry) {
    let label = format!("Media {}", index + 1);
    let _ = writeln!(
        out,
        r#"<a class="media-item" href="/view/{index}" title="{title}">"#,
        title = html_escape(&entry.rel_path),
    );
    out.push_str("<div class=\"media-container\">\n");
    match entry.kind {
        MediaKind::Image => {
            let _ = writeln!(
                out,
                r#"<img class="media-preview" src="/preview/{index}" alt="{label}" loading="lazy">"#,
            );
        }
        MediaKind::Video => {
            let _ = writeln!(
                out,
                r#"<video class="media-preview" src="{src}" preload="metadata" muted></video>"#,
                src = html_escape(&media_url(&entry.rel_path)),
            );
            out.push_str("<div class=\"play-overlay\">&#9654;</div>\n");
        }
    }
    out.push_str("</div>\n");
    let _ = writeln!(
        out,
        "<div class=\"media-info\"><span>{label}</span><span>{size}</span></div>",
        size = format_file_size(entry.file_size),
    );
    out.push_str("</a>\n");
}

/// The `/` page: one 320x200 card per entry, or an empty-state message.
pub fn render_gallery(library: &MediaLibrary) -> String {
    let mut out = String::new();
    page_head(&mut out, GALLERY_CSS);
    out.push_str("<body>\n<div class=\"header\">\n");
    let _ = writeln!(out, "<h1>{PAGE_TITLE}</h1>");
    if library.is_empty() {
        out.push_str("</div>\n<div class=\"empty\">No media found</div>\n");
    } else {
        let _ = writeln!(
            out,
            "<p>{} items. Click any image or video to view it full screen.</p>",
            library.len()
        );
        out.push_str("</div>\n<div class=\"gallery\">\n");
        for (index, entry) in library.items.iter().enumerate() {
            gallery_card(&mut out, index, entry);
        }
        out.push_str("</div>\n");
    }
    out.push_str("</body>\n</html>\n");
    out
}

/// The `/view/{index}` page, or None when `index` is out of range.
pub fn render_viewer(library: &MediaLibrary, index: usize) -> Option<String> {
    let entry = library.get(index)?;
    let prev = library.prev_index(index)?;
    let next = library.next_index(index)?;
    let src = html_escape(&media_url(&entry.rel_path)).into_owned();

    let mut out = String::new();
    page_head(&mut out, VIEWER_CSS);
    out.push_str("<body>\n<div class=\"viewer-container\">\n");
    out.push_str("<div class=\"controls\">\n");
    out.push_str("<a class=\"nav-button\" id=\"back\" href=\"/\">&larr; Back to Gallery</a>\n");
    let _ = writeln!(out, "<span id=\"counter\">{} of {}</span>", index + 1, library.len());
    out.push_str("</div>\n");
    let _ = writeln!(out, "<a class=\"side-nav prev-nav\" id=\"prev\" href=\"/view/{prev}\">&lsaquo;</a>");
    let _ = writeln!(out, "<a class=\"side-nav next-nav\" id=\"next\" href=\"/view/{next}\">&rsaquo;</a>");
    match entry.kind {
        MediaKind::Image => {
            let _ = writeln!(
                out,
                r#"<img class="media-display" src="{src}" alt="Media {n}">"#,
                n = index + 1
            );
        }
        MediaKind::Video => {
            let _ = writeln!(
                out,
                r#"<video class="media-display" src="{src}" controls autoplay></video>"#
            );
        }
    }
    let _ = writeln!(
        out,
        "<div class=\"media-info\">{}</div>",
        html_escape(&entry.rel_path)
    );
    out.push_str("</div>\n");
    let _ = writeln!(
        out,
        r#"<script>
document.addEventListener('keydown', function (e) {{
    if (e.key === 'ArrowLeft') {{ window.location.href = '/view/{prev}'; }}
    else if (e.key === 'ArrowRight') {{ window.location.href = '/view/{next}'; }}
    else if (e.key === 'Escape') {{ window.location.href = '/'; }}
}});
</script>"#
    );
    out.push_str("</body>\n</html>\n");
    Some(out)
}

/// 320x200 SVG stand-in for files too large to use as a gallery thumbnail.
pub fn render_placeholder_svg(index: usize, kind: MediaKind, file_size: u64) -> String {
    let icon = match kind {
        MediaKind::Video => {
            r##"<g fill="#666"><rect x="130" y="70" width="50" height="35" rx="5" fill="none" stroke="#666" stroke-width="2"/><polygon points="180,80 195,87.5 180,95"/><circle cx="145" cy="82" r="2"/></g>"##
        }
        MediaKind::Image => {
            r##"<g fill="#666"><rect x="130" y="70" width="60" height="40" rx="3" fill="none" stroke="#666" stroke-width="2"/><circle cx="145" cy="85" r="5"/><polygon points="135,100 150,90 165,95 180,85 190,95 190,105 135,105"/></g>"##
        }
    };
    let size_mb = file_size as f64 / (1024.0 * 1024.0);
    format!(
        r##"<svg width="320" height="200" xmlns="http://www.w3.org/2000/svg">
<rect width="320" height="200" fill="#f0f0f0" stroke="#ddd" stroke-width="2"/>
{icon}
<text x="160" y="130" font-family="Arial, sans-serif" font-size="16" text-anchor="middle" fill="#666">{label}</text>
<text x="160" y="150" font-family="Arial, sans-serif" font-size="14" text-anchor="middle" fill="#888">Media {n}</text>
<text x="160" y="170" font-family="Arial, sans-serif" font-size="12" text-anchor="middle" fill="#999">{size_mb:.1} MB</text>
<text x="160" y="185" font-family="Arial, sans-serif" font-size="11" text-anchor="middle" fill="#aaa">Click to view full size</text>
</svg>"##,
        label = kind.label(),
        n = index + 1,
    )
}
