//! Pipeline caching and persistence behavior with a stub renderer

use std::fs;
use std::time::Duration;

use image::{Rgba, RgbaImage};
use pageprint::error::Result;
use pageprint::pipeline::{PageScript, Pipeline, RunSummary};
use pageprint::Renderer;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([30, 30, 30, 255]);

/// Renderer stub producing a deterministic capture: a white 400x300 buffer
/// with an ink band in rows 50..=150.
struct StubRenderer {
    captures: u32,
}

impl StubRenderer {
    fn new() -> Self {
        Self { captures: 0 }
    }
}

impl Renderer for StubRenderer {
    fn set_window_size(&mut self, _width: u32, _height: u32) -> Result<()> {
        Ok(())
    }

    fn capture(&mut self) -> Result<RgbaImage> {
        self.captures += 1;
        let mut buffer = RgbaImage::from_pixel(400, 300, WHITE);
        for y in 50..=150 {
            for x in 0..380 {
                buffer.put_pixel(x, y, INK);
            }
        }
        Ok(buffer)
    }

    fn navigate(&mut self, _url: &str) -> Result<()> {
        Ok(())
    }
    fn evaluate(&mut self, _script: &str) -> Result<()> {
        Ok(())
    }
    fn click(&mut self, _selector: &str) -> Result<()> {
        Ok(())
    }
    fn remove_element(&mut self, _selector: &str) -> Result<()> {
        Ok(())
    }
    fn hide_element(&mut self, _selector: &str) -> Result<()> {
        Ok(())
    }
    fn show_element(&mut self, _selector: &str) -> Result<()> {
        Ok(())
    }
    fn set_element_style(&mut self, _selector: &str, _style: &str) -> Result<()> {
        Ok(())
    }
    fn scroll_to(&mut self, _selector: &str) -> Result<()> {
        Ok(())
    }
    fn wait_until_hidden(&mut self, _selector: &str, _timeout: Duration) -> Result<()> {
        Ok(())
    }
    fn close(self) -> Result<()> {
        Ok(())
    }
}

/// Script stub that just takes two captures.
struct StubScript;

impl PageScript<StubRenderer> for StubScript {
    fn capture_fragments(
        &self,
        renderer: &mut StubRenderer,
        _item: &str,
    ) -> Result<(RgbaImage, RgbaImage)> {
        Ok((renderer.capture()?, renderer.capture()?))
    }
}

fn logo() -> RgbaImage {
    RgbaImage::from_pixel(80, 40, Rgba([0, 100, 0, 255]))
}

#[test]
fn run_persists_fragments_and_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(dir.path());
    let mut renderer = StubRenderer::new();
    let items = vec!["vesper".to_string()];

    let summary = pipeline
        .run(&mut renderer, &StubScript, &logo(), &items)
        .unwrap();
    assert_eq!(
        summary,
        RunSummary {
            processed: 1,
            skipped: 0
        }
    );

    let item_dir = dir.path().join("vesper");
    assert!(item_dir.join("vesper_screen1.png").exists());
    assert!(item_dir.join("vesper_screen2.png").exists());
    assert!(item_dir.join("vesper.png").exists());
}

#[test]
fn cached_items_skip_the_renderer_and_keep_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(dir.path());
    let mut renderer = StubRenderer::new();
    let items = vec!["paris-paris".to_string()];

    pipeline
        .run(&mut renderer, &StubScript, &logo(), &items)
        .unwrap();
    assert_eq!(renderer.captures, 2);
    let sheet_path = dir.path().join("paris-paris").join("paris-paris.png");
    let first_bytes = fs::read(&sheet_path).unwrap();

    let summary = pipeline
        .run(&mut renderer, &StubScript, &logo(), &items)
        .unwrap();
    assert_eq!(
        summary,
        RunSummary {
            processed: 0,
            skipped: 1
        }
    );
    assert_eq!(renderer.captures, 2, "cached item must not invoke the renderer");
    assert_eq!(fs::read(&sheet_path).unwrap(), first_bytes);
}

#[test]
fn cache_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(dir.path()).with_cache(false);
    let mut renderer = StubRenderer::new();
    let items = vec!["vesper".to_string()];

    pipeline
        .run(&mut renderer, &StubScript, &logo(), &items)
        .unwrap();
    pipeline
        .run(&mut renderer, &StubScript, &logo(), &items)
        .unwrap();
    assert_eq!(renderer.captures, 4);
}

#[test]
fn recompose_rebuilds_the_sheet_from_fragments() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(dir.path());
    let mut renderer = StubRenderer::new();
    let items = vec!["vesper".to_string()];

    pipeline
        .run(&mut renderer, &StubScript, &logo(), &items)
        .unwrap();
    let sheet_path = dir.path().join("vesper").join("vesper.png");
    let original = fs::read(&sheet_path).unwrap();
    fs::remove_file(&sheet_path).unwrap();

    pipeline.recompose_item(&logo(), "vesper").unwrap();
    assert_eq!(fs::read(&sheet_path).unwrap(), original);
}

#[test]
fn recompose_without_fragments_fails() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(dir.path());
    assert!(pipeline.recompose_item(&logo(), "never-captured").is_err());
}
