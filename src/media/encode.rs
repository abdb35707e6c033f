/// Embeddable image representation
///
/// Selected photos are stored inline in the gallery as `data:` URLs so the
/// museum never references files that might later move or disappear.
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{MuseumError, MuseumResult};

/// Extensions offered by the file dialog
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff", "ico",
];

/// Convert an image file into a `data:<mime>;base64,...` URL
pub async fn encode_data_url(path: PathBuf) -> MuseumResult<String> {
    // Reading and base64-encoding a large photo is blocking work
    tokio::task::spawn_blocking(move || encode_data_url_blocking(&path)).await?
}

/// Blocking implementation of the conversion
fn encode_data_url_blocking(path: &Path) -> MuseumResult<String> {
    let bytes = std::fs::read(path)?;
    let mime = detect_mime(path, &bytes)?;

    let payload = STANDARD.encode(&bytes);
    info!(
        "📸 Encoded {} ({:.1}KB) as {}",
        path.display(),
        bytes.len() as f64 / 1024.0,
        mime
    );
    Ok(format!("data:{};base64,{}", mime, payload))
}

/// Sniff the content first, then trust the extension
fn detect_mime(path: &Path, bytes: &[u8]) -> MuseumResult<&'static str> {
    if let Ok(format) = image::guess_format(bytes) {
        return Ok(format.to_mime_type());
    }

    path.extension()
        .and_then(ImageFormat::from_extension)
        .map(|format| format.to_mime_type())
        .ok_or_else(|| MuseumError::NotAnImage(path.display().to_string()))
}

/// Split a `data:` URL into its MIME type and decoded bytes
pub fn decode_data_url(src: &str) -> Option<(String, Vec<u8>)> {
    let rest = src.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(payload.trim()).ok()?;
    Some((mime.to_string(), bytes))
}
