//! Crop rectangle computation from scan ratios

use image::RgbaImage;

use crate::error::{Error, Result};

/// Sentinel `ratio_height` meaning "extend to the bottom of the buffer".
/// Any negative value is treated the same way.
pub const TO_END: f64 = -1.0;

/// A sub-region of a specific pixel buffer, in that buffer's own pixel
/// coordinates. Also used for placed regions on a destination canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// The row just below this rectangle, the natural offset for stacking
    /// the next fragment.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// Turn a ratio pair into a full-width crop rectangle on `buffer`.
///
/// `ratio_y` and `ratio_height` are fractions of the buffer height.
/// `ratio_height` may be [`TO_END`] (or any negative value), which resolves
/// to `1 - ratio_y`. Rounding is half-away-from-zero (`f64::round`).
///
/// Ratios outside `[0, 1]` after sentinel resolution are a caller contract
/// violation and fail with [`Error::InvalidArgument`].
pub fn crop_rect(buffer: &RgbaImage, ratio_y: f64, ratio_height: f64) -> Result<Rect> {
    let ratio_height = if ratio_height < 0.0 {
        1.0 - ratio_y
    } else {
        ratio_height
    };

    if !(0.0..=1.0).contains(&ratio_y) || !(0.0..=1.0).contains(&ratio_height) {
        return Err(Error::InvalidArgument(format!(
            "crop ratios out of range: ratio_y={ratio_y}, ratio_height={ratio_height}"
        )));
    }

    let height = f64::from(buffer.height());
    Ok(Rect {
        x: 0,
        y: (ratio_y * height).round() as u32,
        width: buffer.width(),
        height: (ratio_height * height).round() as u32,
    })
}
