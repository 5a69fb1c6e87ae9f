//! Turn the `<IMAGE>` argument into an image reference string.
//!
//! URLs and `data:` URLs pass through untouched. Anything naming an existing
//! file is read and wrapped as a `data:` URL.

use std::path::Path;

use anyhow::{Context, Result};

use oravision_core::ImageRef;

const PASS_THROUGH: [&str; 4] = ["data:", "http://", "https://", "gs://"];

pub fn resolve(arg: &str) -> Result<String> {
    if PASS_THROUGH.iter().any(|prefix| arg.starts_with(prefix)) {
        return Ok(arg.to_string());
    }

    let path = Path::new(arg);
    if !path.is_file() {
        // Let the adapter report what is wrong with it.
        return Ok(arg.to_string());
    }
    let bytes = std::fs::read(path).with_context(|| format!("reading image {}", path.display()))?;
    Ok(ImageRef::from_bytes(&bytes, mime_for(path)).to_uri())
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}
