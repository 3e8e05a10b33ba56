//! Fit-width drawing of cropped fragments onto a destination canvas

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::compose::crop::Rect;

/// Copy `source_crop` of `source` into `destination` at vertical offset
/// `offset_y`, scaled uniformly so the crop width fills the destination
/// width. The height follows from the same scale.
///
/// Returns the placed rectangle so callers can stack fragments
/// (`next_offset_y = placed.bottom()`).
///
/// Out-of-bounds regions are silently clipped on both ends: the source crop
/// is intersected with the source buffer and the placement is intersected
/// with the destination. An identity scale (crop width equals destination
/// width) copies pixels without resampling.
pub fn draw_fit_width(
    destination: &mut RgbaImage,
    source: &RgbaImage,
    source_crop: Rect,
    offset_y: u32,
) -> Rect {
    if source_crop.width == 0 || source_crop.height == 0 {
        return Rect {
            x: 0,
            y: offset_y,
            width: 0,
            height: 0,
        };
    }

    let scale = f64::from(destination.width()) / f64::from(source_crop.width);
    let placed = Rect {
        x: 0,
        y: offset_y,
        width: (f64::from(source_crop.width) * scale).round() as u32,
        height: (f64::from(source_crop.height) * scale).round() as u32,
    };

    if placed.height == 0 {
        return placed;
    }

    let view = imageops::crop_imm(
        source,
        source_crop.x,
        source_crop.y,
        source_crop.width,
        source_crop.height,
    )
    .to_image();

    if placed.width == view.width() && placed.height == view.height() {
        imageops::overlay(destination, &view, i64::from(placed.x), i64::from(placed.y));
    } else {
        let scaled = imageops::resize(&view, placed.width, placed.height, FilterType::Triangle);
        imageops::overlay(
            destination,
            &scaled,
            i64::from(placed.x),
            i64::from(placed.y),
        );
    }

    placed
}
