//! Page compositing: trimmed captures onto a fixed-size print canvas
//!
//! The core works on plain [`image::RgbaImage`] buffers and never touches a
//! browser. [`compose`] stacks two capture fragments onto a white canvas of
//! fixed print proportions, masks the scrollbar strip, and stamps the logo
//! watermark into the bottom-right corner.

pub mod crop;
pub mod draw;
pub mod scan;

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::error::Result;
use crop::{crop_rect, Rect, TO_END};
use draw::draw_fit_width;
use scan::{scan_from_bottom, scan_from_top, BACKGROUND};

/// Layout constants of the output page.
///
/// The canvas keeps a fixed 148:210 aspect (an A-series-like sheet) scaled
/// by `density`; everything else is a fraction of the canvas dimensions.
#[derive(Debug, Clone)]
pub struct PageLayout {
    /// Canvas width in base units (148 = 148 mm)
    pub base_width: u32,
    /// Canvas height in base units (210 = 210 mm)
    pub base_height: u32,
    /// Pixels per base unit
    pub density: u32,
    /// Margin above the first fragment, as a fraction of canvas height
    pub top_margin: f64,
    /// Vertical gap between the two fragments, as a fraction of canvas height
    pub fragment_gap: f64,
    /// Width of the white strip masking scrollbar leakage, as a fraction of
    /// canvas width
    pub scrollbar_mask: f64,
    /// Target logo width as a fraction of canvas width
    pub logo_width: f64,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            base_width: 148,
            base_height: 210,
            density: 10,
            top_margin: 0.01,
            fragment_gap: 0.025,
            scrollbar_mask: 0.01,
            logo_width: 0.5,
        }
    }
}

impl PageLayout {
    pub fn canvas_width(&self) -> u32 {
        self.base_width * self.density
    }

    pub fn canvas_height(&self) -> u32 {
        self.base_height * self.density
    }
}

/// Composite both capture fragments and the logo onto a fresh canvas.
///
/// The upper fragment is cropped between its first and last non-background
/// rows; the lower fragment is cropped from its first non-background row to
/// its end, since viewport scrolling cuts it off rather than trailing
/// whitespace. Fragments that would overrun the canvas are clipped by the
/// draw itself.
pub fn compose(
    layout: &PageLayout,
    upper: &RgbaImage,
    lower: &RgbaImage,
    logo: &RgbaImage,
) -> Result<RgbaImage> {
    let width = layout.canvas_width();
    let height = layout.canvas_height();
    let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);

    let upper_top = scan_from_top(upper);
    let upper_crop = crop_rect(upper, upper_top, scan_from_bottom(upper) - upper_top)?;

    let mut offset_y = (f64::from(height) * layout.top_margin).round() as u32;
    let placed = draw_fit_width(&mut canvas, upper, upper_crop, offset_y);
    offset_y = placed.bottom() + (f64::from(height) * layout.fragment_gap).round() as u32;

    let lower_crop = crop_rect(lower, scan_from_top(lower), TO_END)?;
    draw_fit_width(&mut canvas, lower, lower_crop, offset_y);

    mask_scrollbar_strip(&mut canvas, layout);
    draw_logo(&mut canvas, logo, layout);

    Ok(canvas)
}

/// Paint the rightmost strip of the canvas with background color. Either
/// fragment may have leaked a scrollbar into that band.
fn mask_scrollbar_strip(canvas: &mut RgbaImage, layout: &PageLayout) {
    let strip = (f64::from(canvas.width()) * layout.scrollbar_mask).round() as u32;
    let left = canvas.width().saturating_sub(strip);
    for y in 0..canvas.height() {
        for x in left..canvas.width() {
            canvas.put_pixel(x, y, BACKGROUND);
        }
    }
}

/// Scale the logo to the configured fraction of the canvas width and anchor
/// its bottom-right corner at the canvas's bottom-right corner.
fn draw_logo(canvas: &mut RgbaImage, logo: &RgbaImage, layout: &PageLayout) {
    let scale = f64::from(canvas.width()) * layout.logo_width / f64::from(logo.width());
    let target_width = (f64::from(logo.width()) * scale).round() as u32;
    let target_height = (f64::from(logo.height()) * scale).round() as u32;
    if target_width == 0 || target_height == 0 {
        return;
    }

    let scaled = if (target_width, target_height) == logo.dimensions() {
        logo.clone()
    } else {
        imageops::resize(logo, target_width, target_height, FilterType::Triangle)
    };

    let x = i64::from(canvas.width()) - i64::from(target_width);
    let y = i64::from(canvas.height()) - i64::from(target_height);
    imageops::overlay(canvas, &scaled, x, y);
}

/// Placement of the logo for a given canvas and logo size, exposed for
/// layout inspection without running a full composite.
///
/// A logo scaling taller (or wider) than the canvas anchors past the canvas
/// origin; the returned position is clamped to (0, 0) and the draw clips the
/// overflow.
pub fn logo_placement(layout: &PageLayout, logo_width: u32, logo_height: u32) -> Rect {
    let canvas_width = layout.canvas_width();
    let canvas_height = layout.canvas_height();
    let scale = f64::from(canvas_width) * layout.logo_width / f64::from(logo_width);
    let width = (f64::from(logo_width) * scale).round() as u32;
    let height = (f64::from(logo_height) * scale).round() as u32;
    Rect {
        x: canvas_width.saturating_sub(width),
        y: canvas_height.saturating_sub(height),
        width,
        height,
    }
}
