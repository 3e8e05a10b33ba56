//! End-to-end compositing scenarios on synthetic capture buffers

use image::{Rgba, RgbaImage};
use pageprint::compose::crop::crop_rect;
use pageprint::compose::scan::{scan_from_bottom, scan_from_top, BACKGROUND};
use pageprint::compose::{compose, PageLayout};

const RED: Rgba<u8> = Rgba([200, 0, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 200, 255]);
const GREEN: Rgba<u8> = Rgba([0, 128, 0, 255]);

fn blank(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, BACKGROUND)
}

fn fill_rows(buffer: &mut RgbaImage, rows: std::ops::RangeInclusive<u32>, color: Rgba<u8>) {
    for y in rows {
        for x in 0..buffer.width() {
            buffer.put_pixel(x, y, color);
        }
    }
}

/// A 1100x1100 capture with content in rows 100..=300 scans to the expected
/// ratios and crop height.
#[test]
fn scan_ratios_of_content_band() {
    let mut capture = blank(1100, 1100);
    fill_rows(&mut capture, 100..=300, RED);

    let top = scan_from_top(&capture);
    let bottom = scan_from_bottom(&capture);
    assert_eq!(top, 100.0 / 1100.0);
    assert_eq!(bottom, 300.0 / 1100.0);

    let rect = crop_rect(&capture, top, bottom - top).unwrap();
    assert_eq!(rect.y, 100);
    assert_eq!(rect.height, 200);
}

/// Full composite on the default 1480x2100 canvas: the upper fragment lands
/// at the 1% top margin, the lower fragment follows after the 2.5% gap.
#[test]
fn fragments_stack_with_margin_and_gap() {
    let layout = PageLayout::default();

    // canvas-width fragment so the draw runs at identity scale: content in
    // rows 0..=400 crops to exactly 400 rows
    let mut upper = blank(1480, 600);
    fill_rows(&mut upper, 0..=400, RED);

    let mut lower = blank(1480, 100);
    fill_rows(&mut lower, 0..=99, BLUE);

    let logo = RgbaImage::from_pixel(296, 100, GREEN);
    let canvas = compose(&layout, &upper, &lower, &logo).unwrap();

    assert_eq!(canvas.dimensions(), (1480, 2100));

    // top margin: round(2100 * 0.01) = 21
    assert_eq!(*canvas.get_pixel(0, 20), BACKGROUND);
    assert_eq!(*canvas.get_pixel(0, 21), RED);
    assert_eq!(*canvas.get_pixel(0, 420), RED);
    assert_eq!(*canvas.get_pixel(0, 421), BACKGROUND);

    // gap: round(2100 * 0.025) = 53, so the lower fragment starts at
    // 21 + 400 + 53 = 474
    assert_eq!(*canvas.get_pixel(0, 473), BACKGROUND);
    assert_eq!(*canvas.get_pixel(0, 474), BLUE);
    assert_eq!(*canvas.get_pixel(0, 573), BLUE);
    assert_eq!(*canvas.get_pixel(0, 574), BACKGROUND);
}

/// The scrollbar mask strip wins over fragment content; the logo wins over
/// the strip.
#[test]
fn scrollbar_strip_masked_and_logo_overlaid() {
    let layout = PageLayout::default();

    let mut upper = blank(1480, 600);
    fill_rows(&mut upper, 0..=400, RED);
    let lower = blank(1480, 100);

    // 296 * 2.5 = 740: logo scales to 740x250, anchored at (740, 1850)
    let logo = RgbaImage::from_pixel(296, 100, GREEN);
    let canvas = compose(&layout, &upper, &lower, &logo).unwrap();

    // fragment pixels in the rightmost 1% (15 columns) are repainted white
    assert_eq!(*canvas.get_pixel(1479, 100), BACKGROUND);
    assert_eq!(*canvas.get_pixel(1465, 100), BACKGROUND);
    assert_eq!(*canvas.get_pixel(1464, 100), RED);

    // logo occupies the bottom-right corner, on top of the mask strip
    assert_eq!(*canvas.get_pixel(739, 1850), BACKGROUND);
    assert_eq!(*canvas.get_pixel(740, 1850), GREEN);
    assert_eq!(*canvas.get_pixel(1479, 2099), GREEN);
    assert_eq!(*canvas.get_pixel(740, 1849), BACKGROUND);
}

/// Blank captures compose to a page holding only the logo: both scans
/// report zero, the crops are empty or full-blank, nothing else is drawn.
#[test]
fn blank_captures_compose_to_logo_only_page() {
    let layout = PageLayout::default();
    let upper = blank(1480, 600);
    let lower = blank(1480, 100);
    let logo = RgbaImage::from_pixel(296, 100, GREEN);

    let canvas = compose(&layout, &upper, &lower, &logo).unwrap();

    assert_eq!(*canvas.get_pixel(0, 21), BACKGROUND);
    assert_eq!(*canvas.get_pixel(700, 1000), BACKGROUND);
    assert_eq!(*canvas.get_pixel(1479, 2099), GREEN);
}
