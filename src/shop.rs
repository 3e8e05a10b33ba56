//! Page-adjustment script for the Five O'Clock tea shop
//!
//! Everything in here is specific to that shop's WooCommerce markup. The
//! compositing core never sees any of it; it only receives the two capture
//! fragments this script produces.

use std::time::Duration;

use image::RgbaImage;
use log::debug;

use crate::error::{Error, Result};
use crate::pipeline::PageScript;
use crate::Renderer;

const COOKIE_WAIT: Duration = Duration::from_secs(30);

/// Captures a product page as two fragments: the product block with the
/// footer hidden, then the long description scrolled into view with the
/// product block hidden.
pub struct FiveOClockScript {
    base_url: String,
    scaling: u32,
}

impl FiveOClockScript {
    pub fn new(base_url: impl Into<String>, scaling: u32) -> Self {
        Self {
            base_url: base_url.into(),
            scaling,
        }
    }

    fn item_url(&self, item: &str) -> String {
        format!("{}/{}/", self.base_url.trim_end_matches('/'), item)
    }

    fn dismiss_cookie_banner<R: Renderer>(&self, renderer: &mut R) {
        // Banner may be absent (already accepted) or slow to fade; both are
        // fine, the scan just sees whatever is on screen.
        if renderer.click("#cn-accept-cookie").is_ok() {
            if let Err(e) = renderer.wait_until_hidden("#cn-accept-cookie", COOKIE_WAIT) {
                debug!("cookie banner did not disappear: {e}");
            }
        }
    }

    fn adjust_page<R: Renderer>(&self, renderer: &mut R) -> Result<()> {
        renderer.remove_element(".grecaptcha-badge")?;
        renderer.remove_element(".header-wrapper")?;
        renderer.hide_element(".page-title")?;

        renderer.set_element_style(
            ".product-main .product-title",
            "font-size: 6em; margin: 0.5em 0 0 0",
        )?;
        optional(renderer.remove_element(".product-main .woocommerce-product-rating"))?;
        renderer.remove_element(".product-main .price-wrapper")?;
        optional(
            renderer.hide_element(".woocommerce-product-gallery__image .yith-wcbm-badge-text"),
        )?;

        renderer.set_element_style(
            ".product-main .product-short-description",
            "margin: 0px !important",
        )?;
        renderer.remove_element(".product-main .product-short-description p")?;

        renderer.hide_element(".product-main form")?;
        optional(renderer.remove_element(".product-main .variations"))?;
        renderer.remove_element(".product-main .info_after_cart_wrapper")?;
        renderer.remove_element(".product-main .social-icons")?;

        renderer.evaluate(
            "document.querySelectorAll('.woocommerce-left-content-description p')\
             .forEach(p => p.setAttribute('style', 'font-size:1.35em'))",
        )?;
        renderer.hide_element(".woocommerce-left-content-reviews")?;
        renderer.set_element_style(".woocommerce-content", "width:95%")?;
        Ok(())
    }
}

impl<R: Renderer> PageScript<R> for FiveOClockScript {
    fn capture_fragments(&self, renderer: &mut R, item: &str) -> Result<(RgbaImage, RgbaImage)> {
        renderer.navigate(&self.item_url(item))?;
        if self.scaling != 1 {
            renderer.evaluate(&format!(
                "document.body.style.zoom = '{}%'",
                self.scaling * 100
            ))?;
        }

        self.dismiss_cookie_banner(renderer);
        self.adjust_page(renderer)?;

        // upper fragment: product block only
        renderer.hide_element(".product-footer")?;
        let upper = renderer.capture()?;

        // lower fragment: long description scrolled into view
        renderer.show_element(".product-footer")?;
        renderer.hide_element(".product-main")?;
        renderer.scroll_to(".woocommerce-left-content-description p:last-of-type")?;
        let lower = renderer.capture()?;

        Ok((upper, lower))
    }
}

/// Some page regions only exist for certain products; their absence is not
/// an error, anything else is.
fn optional(result: Result<()>) -> Result<()> {
    match result {
        Err(Error::MissingElement(selector)) => {
            debug!("optional element absent: {selector}");
            Ok(())
        }
        other => other,
    }
}
