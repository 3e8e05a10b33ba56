//! Chrome DevTools Protocol renderer implementation

use std::sync::Arc;
use std::time::{Duration, Instant};

use headless_chrome::browser::tab::Tab;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::types::Bounds;
use headless_chrome::{Browser, LaunchOptions};
use image::RgbaImage;

use crate::error::{Error, Result};
use crate::{Renderer, RendererConfig};

const HIDDEN_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// CDP-based renderer (uses the `headless_chrome` crate)
///
/// Launches a headless Chrome instance, manages a single tab, and provides
/// the `Renderer` trait implementation over it.
pub struct CdpRenderer {
    browser: Browser,
    tab: Arc<Tab>,
}

impl CdpRenderer {
    pub fn new(config: RendererConfig) -> Result<Self> {
        let launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some((
                config.viewport.width * config.scaling,
                config.viewport.height * config.scaling,
            )))
            .build()
            .map_err(|e| {
                Error::InitializationError(format!("Failed to build launch options: {}", e))
            })?;

        let browser = Browser::new(launch_options)
            .map_err(|e| Error::InitializationError(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| Error::InitializationError(format!("Failed to create tab: {}", e)))?;

        // governs navigation waits and element lookups on this tab
        tab.set_default_timeout(Duration::from_millis(config.timeout_ms));

        Ok(Self { browser, tab })
    }

    fn call_on_element(&self, selector: &str, function: &str) -> Result<()> {
        self.call_on_element_with_args(selector, function, Vec::new())
    }

    fn call_on_element_with_args(
        &self,
        selector: &str,
        function: &str,
        args: Vec<serde_json::Value>,
    ) -> Result<()> {
        let element = self
            .tab
            .find_element(selector)
            .map_err(|_| Error::MissingElement(selector.to_string()))?;
        element
            .call_js_fn(function, args, false)
            .map_err(|e| Error::ScriptError(format!("Element call failed on {selector}: {e}")))?;
        Ok(())
    }
}

impl Renderer for CdpRenderer {
    fn set_window_size(&mut self, width: u32, height: u32) -> Result<()> {
        self.tab
            .set_bounds(Bounds::Normal {
                left: None,
                top: None,
                width: Some(f64::from(width)),
                height: Some(f64::from(height)),
            })
            .map_err(|e| Error::InitializationError(format!("Failed to set bounds: {}", e)))?;
        Ok(())
    }

    fn capture(&mut self) -> Result<RgbaImage> {
        let png_data = self
            .tab
            .capture_screenshot(Page::CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| Error::CaptureError(format!("Screenshot failed: {}", e)))?;

        Ok(image::load_from_memory(&png_data)?.to_rgba8())
    }

    fn navigate(&mut self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| Error::NavigationError(format!("Navigation failed: {}", e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| Error::NavigationError(format!("Wait for navigation failed: {}", e)))?;

        // Wait for the page to stabilize
        std::thread::sleep(Duration::from_millis(500));

        Ok(())
    }

    fn evaluate(&mut self, script: &str) -> Result<()> {
        self.tab
            .evaluate(script, false)
            .map_err(|e| Error::ScriptError(format!("Evaluation failed: {}", e)))?;
        Ok(())
    }

    fn click(&mut self, selector: &str) -> Result<()> {
        let element = self
            .tab
            .find_element(selector)
            .map_err(|_| Error::MissingElement(selector.to_string()))?;
        element
            .click()
            .map_err(|e| Error::ScriptError(format!("Click failed on {selector}: {e}")))?;
        Ok(())
    }

    fn remove_element(&mut self, selector: &str) -> Result<()> {
        self.call_on_element(selector, "function() { this.remove(); }")
    }

    fn hide_element(&mut self, selector: &str) -> Result<()> {
        self.call_on_element(
            selector,
            "function() { this.setAttribute('style', 'visibility:hidden'); }",
        )
    }

    fn show_element(&mut self, selector: &str) -> Result<()> {
        self.call_on_element(selector, "function() { this.removeAttribute('style'); }")
    }

    fn set_element_style(&mut self, selector: &str, style: &str) -> Result<()> {
        self.call_on_element_with_args(
            selector,
            "function(style) { this.setAttribute('style', style); }",
            vec![serde_json::json!(style)],
        )
    }

    fn scroll_to(&mut self, selector: &str) -> Result<()> {
        let element = self
            .tab
            .find_element(selector)
            .map_err(|_| Error::MissingElement(selector.to_string()))?;
        element
            .scroll_into_view()
            .map_err(|e| Error::ScriptError(format!("Scroll failed on {selector}: {e}")))?;
        Ok(())
    }

    fn wait_until_hidden(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        let probe = format!(
            "(() => {{ const el = document.querySelector({}); \
             return !el || el.offsetParent === null; }})()",
            serde_json::json!(selector)
        );
        let deadline = Instant::now() + timeout;
        loop {
            let result = self
                .tab
                .evaluate(&probe, false)
                .map_err(|e| Error::ScriptError(format!("Visibility probe failed: {}", e)))?;
            if result.value == Some(serde_json::Value::Bool(true)) {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(Error::Timeout(timeout.as_millis() as u64));
            }
            std::thread::sleep(HIDDEN_POLL_INTERVAL);
        }
    }

    fn close(self) -> Result<()> {
        // Ensure underlying browser/tab are dropped explicitly so the child
        // process is terminated promptly.
        drop(self.tab);
        drop(self.browser);
        Ok(())
    }
}
