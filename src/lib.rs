//! pageprint
//!
//! Captures rendered shop pages with a headless browser and composites the
//! trimmed captures into a single print-ready sheet with a logo watermark.
//!
//! # Features
//!
//! - **CDP Backend** (default): drives headless Chrome via the Chrome
//!   DevTools Protocol to produce pixel captures
//! - **Compositing core**: whitespace scanning, crop computation, and
//!   fit-width drawing work on plain [`image::RgbaImage`] buffers and need
//!   no browser at all
//!
//! # Example
//!
//! ```no_run
//! use pageprint::{RendererConfig, Viewport};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RendererConfig {
//!     viewport: Viewport { width: 1100, height: 1100 },
//!     scaling: 2,
//!     ..Default::default()
//! };
//!
//! let mut renderer = pageprint::new_renderer(config.clone())?;
//! let calibration = pageprint::calibrate::calibrate(
//!     &mut renderer,
//!     config.scaling,
//!     config.viewport.width,
//!     config.viewport.height,
//! )?;
//! println!("capture size: {:?}", calibration.actual);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use image::RgbaImage;

pub mod error;
pub use error::{Error, Result};

#[cfg(feature = "cdp")]
pub mod cdp;

pub mod assets;
pub mod calibrate;
pub mod compose;
pub mod pipeline;
pub mod shop;

/// Configuration for a renderer session
///
/// The defaults match the shop-sheet capture setup: a 1100x1100 client area
/// captured at 2x browser scaling, headless.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Whether to run the browser without a visible window
    pub headless: bool,
    /// Desired client-area dimensions before scaling
    pub viewport: Viewport,
    /// Browser scaling factor applied to the viewport and to page zoom
    pub scaling: u32,
    /// Timeout for navigation waits and element lookups in milliseconds
    pub timeout_ms: u64,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport: Viewport::default(),
            scaling: 2,
            timeout_ms: 30000,
        }
    }
}

/// Client-area dimensions in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1100,
            height: 1100,
        }
    }
}

/// Capability seam over the external browser session.
///
/// The compositing core only needs [`set_window_size`](Renderer::set_window_size)
/// and [`capture`](Renderer::capture); the remaining operations exist for
/// page-shape-dependent adjustment scripts such as [`shop::FiveOClockScript`]
/// and keep the core free of any DOM knowledge.
pub trait Renderer {
    /// Set the outer window size. The captured client area may come out
    /// smaller; see [`calibrate::calibrate`].
    fn set_window_size(&mut self, width: u32, height: u32) -> Result<()>;

    /// Capture the current page state as a pixel buffer.
    fn capture(&mut self) -> Result<RgbaImage>;

    /// Navigate to a URL and wait for the page to settle.
    fn navigate(&mut self, url: &str) -> Result<()>;

    /// Evaluate a script in the page context, discarding the result.
    fn evaluate(&mut self, script: &str) -> Result<()>;

    /// Click the first element matching the selector.
    fn click(&mut self, selector: &str) -> Result<()>;

    /// Remove the first element matching the selector from the DOM.
    fn remove_element(&mut self, selector: &str) -> Result<()>;

    /// Hide the first element matching the selector (keeps its layout box).
    fn hide_element(&mut self, selector: &str) -> Result<()>;

    /// Undo [`hide_element`](Renderer::hide_element) by dropping the style
    /// attribute.
    fn show_element(&mut self, selector: &str) -> Result<()>;

    /// Replace the style attribute of the first element matching the selector.
    fn set_element_style(&mut self, selector: &str, style: &str) -> Result<()>;

    /// Scroll the first element matching the selector into view.
    fn scroll_to(&mut self, selector: &str) -> Result<()>;

    /// Wait until the element matching the selector is no longer rendered,
    /// or until the timeout elapses.
    fn wait_until_hidden(&mut self, selector: &str, timeout: Duration) -> Result<()>;

    /// Close the renderer session and clean up resources.
    fn close(self) -> Result<()>
    where
        Self: Sized;
}

/// Create a renderer with the default backend (currently CDP only).
#[cfg(feature = "cdp")]
pub fn new_renderer(config: RendererConfig) -> Result<impl Renderer> {
    cdp::CdpRenderer::new(config)
}
