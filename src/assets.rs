//! Logo asset loading
//!
//! The logo is loaded once before processing begins and shared read-only
//! across all items for the duration of the run.

use std::path::Path;

use image::RgbaImage;

use crate::error::Result;

/// Read the logo image from disk into an RGBA buffer.
pub fn load_logo(path: &Path) -> Result<RgbaImage> {
    Ok(image::open(path)?.to_rgba8())
}

/// Download the logo to `path`, then load it. The downloaded file doubles
/// as a cache for offline runs.
#[cfg(feature = "cdp")]
pub fn fetch_logo(url: &str, path: &Path) -> Result<RgbaImage> {
    use crate::error::Error;

    let response = reqwest::blocking::get(url)
        .map_err(|e| Error::Other(format!("logo download failed: {e}")))?;
    let bytes = response
        .bytes()
        .map_err(|e| Error::Other(format!("logo download failed: {e}")))?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, &bytes)?;
    load_logo(path)
}
