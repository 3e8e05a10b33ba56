//! Whitespace scanning over captured pixel buffers
//!
//! Shop pages render on a white background, so the content boundaries of a
//! capture are the first rows holding any non-white pixel. The rightmost
//! [`SCROLLBAR_SKIP`] columns are excluded from every scan: a scrollbar
//! artifact can leak into that band and would otherwise be mistaken for
//! content.

use image::{Rgba, RgbaImage};

/// Width in pixels of the scrollbar band excluded from scanning.
///
/// Fixed against the capture's pixel width, not proportional to it.
pub const SCROLLBAR_SKIP: u32 = 17;

/// The background color captures are trimmed against.
pub const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Scan rows top-down and return `y / height` of the first row containing a
/// non-background pixel.
///
/// A fully blank buffer returns `0.0` -- nothing to trim, not a failure.
pub fn scan_from_top(buffer: &RgbaImage) -> f64 {
    let scan_width = buffer.width().saturating_sub(SCROLLBAR_SKIP);
    for y in 0..buffer.height() {
        for x in 0..scan_width {
            if *buffer.get_pixel(x, y) != BACKGROUND {
                return f64::from(y) / f64::from(buffer.height());
            }
        }
    }
    0.0
}

/// Mirror of [`scan_from_top`]: scan rows bottom-up and return `y / height`
/// of the last row containing a non-background pixel, or `0.0` if the buffer
/// is blank.
pub fn scan_from_bottom(buffer: &RgbaImage) -> f64 {
    let scan_width = buffer.width().saturating_sub(SCROLLBAR_SKIP);
    for y in (0..buffer.height()).rev() {
        for x in 0..scan_width {
            if *buffer.get_pixel(x, y) != BACKGROUND {
                return f64::from(y) / f64::from(buffer.height());
            }
        }
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, BACKGROUND)
    }

    #[test]
    fn blank_buffer_scans_to_zero() {
        let buffer = blank(100, 80);
        assert_eq!(scan_from_top(&buffer), 0.0);
        assert_eq!(scan_from_bottom(&buffer), 0.0);
    }

    #[test]
    fn single_pixel_row_ratio() {
        let mut buffer = blank(100, 200);
        buffer.put_pixel(40, 50, Rgba([0, 0, 0, 255]));
        assert_eq!(scan_from_top(&buffer), 50.0 / 200.0);
        assert_eq!(scan_from_bottom(&buffer), 50.0 / 200.0);
    }

    #[test]
    fn scrollbar_band_is_ignored() {
        let mut buffer = blank(100, 200);
        // 100 - 17 = 83 is the first excluded column
        for x in 83..100 {
            buffer.put_pixel(x, 10, Rgba([0, 0, 0, 255]));
        }
        assert_eq!(scan_from_top(&buffer), 0.0);
        assert_eq!(scan_from_bottom(&buffer), 0.0);

        // one pixel just inside the scanned range is detected
        buffer.put_pixel(82, 10, Rgba([0, 0, 0, 255]));
        assert_eq!(scan_from_top(&buffer), 10.0 / 200.0);
    }

    #[test]
    fn top_and_bottom_bound_a_content_band() {
        let mut buffer = blank(1100, 1100);
        for y in 100..=300 {
            for x in 0..1100 - SCROLLBAR_SKIP {
                buffer.put_pixel(x, y, Rgba([20, 20, 20, 255]));
            }
        }
        assert_eq!(scan_from_top(&buffer), 100.0 / 1100.0);
        assert_eq!(scan_from_bottom(&buffer), 300.0 / 1100.0);
    }

    #[test]
    fn narrow_buffer_scans_nothing() {
        // buffers narrower than the scrollbar band have no scannable columns
        let mut buffer = blank(SCROLLBAR_SKIP - 1, 10);
        buffer.put_pixel(0, 5, Rgba([0, 0, 0, 255]));
        assert_eq!(scan_from_top(&buffer), 0.0);
    }
}
