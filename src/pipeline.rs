//! Per-item capture pipeline: capture, trim, composite, persist
//!
//! One renderer session is reused across all items, sequentially. Each item
//! produces its own output directory holding the two raw capture fragments
//! and the final composited sheet; an existing directory is the cache key
//! that skips the item entirely, so re-runs are idempotent.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use log::{debug, info};

use crate::compose::{compose, PageLayout};
use crate::error::Result;
use crate::Renderer;

/// Page-shape-dependent adjustment script.
///
/// Implementations own all DOM knowledge: navigation, element removal and
/// hiding, scrolling. The pipeline only sees the outcome, two capture
/// fragments per item.
pub trait PageScript<R: Renderer> {
    /// Produce the upper and lower capture fragments for `item`.
    fn capture_fragments(&self, renderer: &mut R, item: &str) -> Result<(RgbaImage, RgbaImage)>;
}

/// Counts of what a run actually did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub skipped: usize,
}

/// Sequential capture-and-composite pipeline rooted at an output directory.
pub struct Pipeline {
    out_dir: PathBuf,
    layout: PageLayout,
    skip_cached: bool,
}

impl Pipeline {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            layout: PageLayout::default(),
            skip_cached: true,
        }
    }

    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Disable the skip-if-directory-exists cache.
    pub fn with_cache(mut self, skip_cached: bool) -> Self {
        self.skip_cached = skip_cached;
        self
    }

    fn item_dir(&self, item: &str) -> PathBuf {
        self.out_dir.join(item)
    }

    fn fragment_paths(&self, item: &str) -> (PathBuf, PathBuf) {
        let dir = self.item_dir(item);
        (
            dir.join(format!("{item}_screen1.png")),
            dir.join(format!("{item}_screen2.png")),
        )
    }

    fn sheet_path(&self, item: &str) -> PathBuf {
        self.item_dir(item).join(format!("{item}.png"))
    }

    /// Run the full pipeline over `items` with a live renderer session.
    pub fn run<R, S>(
        &self,
        renderer: &mut R,
        script: &S,
        logo: &RgbaImage,
        items: &[String],
    ) -> Result<RunSummary>
    where
        R: Renderer,
        S: PageScript<R>,
    {
        let mut summary = RunSummary::default();
        for item in items {
            if self.skip_cached && self.item_dir(item).exists() {
                debug!("{item}: output directory exists, skipping");
                summary.skipped += 1;
                continue;
            }
            self.process_item(renderer, script, logo, item)?;
            summary.processed += 1;
        }
        info!(
            "run finished: {} processed, {} skipped",
            summary.processed, summary.skipped
        );
        Ok(summary)
    }

    fn process_item<R, S>(
        &self,
        renderer: &mut R,
        script: &S,
        logo: &RgbaImage,
        item: &str,
    ) -> Result<()>
    where
        R: Renderer,
        S: PageScript<R>,
    {
        info!("{item}: capturing");
        let (upper, lower) = script.capture_fragments(renderer, item)?;

        fs::create_dir_all(self.item_dir(item))?;
        let (upper_path, lower_path) = self.fragment_paths(item);
        upper.save(&upper_path)?;
        lower.save(&lower_path)?;

        let canvas = compose(&self.layout, &upper, &lower, logo)?;
        canvas.save(self.sheet_path(item))?;
        info!("{item}: sheet written");
        Ok(())
    }

    /// Rebuild the composited sheet from previously persisted fragments,
    /// without a renderer. Fails if the fragments were never captured.
    pub fn recompose_item(&self, logo: &RgbaImage, item: &str) -> Result<()> {
        let (upper_path, lower_path) = self.fragment_paths(item);
        let upper = load_rgba(&upper_path)?;
        let lower = load_rgba(&lower_path)?;
        let canvas = compose(&self.layout, &upper, &lower, logo)?;
        canvas.save(self.sheet_path(item))?;
        info!("{item}: sheet recomposed from cached fragments");
        Ok(())
    }
}

fn load_rgba(path: &Path) -> Result<RgbaImage> {
    Ok(image::open(path)?.to_rgba8())
}
