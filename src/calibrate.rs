//! Resolution calibration against the renderer
//!
//! Browsers size their outer window, not the captured client area, so a
//! requested window size comes out smaller in the capture (window chrome,
//! device-pixel-ratio effects). Calibration measures that gap once and
//! corrects the window size once. A residual mismatch after the correction
//! pass is tolerated and logged, never retried: the renderer is external and
//! possibly non-deterministic, and an exact-match loop could spin forever.

use log::{debug, warn};

use crate::error::Result;
use crate::Renderer;

/// Outcome of a calibration run: the target capture size and the sizes
/// actually measured in each of the two passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    /// Capture size the window was calibrated towards (desired x scaling)
    pub requested: (u32, u32),
    /// Capture size measured before the correction
    pub first_pass: (u32, u32),
    /// Capture size measured after the single correction
    pub actual: (u32, u32),
}

impl Calibration {
    /// Whether the corrected capture hit the requested size exactly.
    pub fn matched(&self) -> bool {
        self.requested == self.actual
    }
}

/// Calibrate the renderer window so captures come out at
/// `desired_width x desired_height` scaled by `scaling`.
///
/// Exactly two window resizes and two calibration captures; best effort
/// only. See [`Calibration::matched`] for the outcome.
pub fn calibrate<R: Renderer>(
    renderer: &mut R,
    scaling: u32,
    desired_width: u32,
    desired_height: u32,
) -> Result<Calibration> {
    let width = desired_width * scaling;
    let height = desired_height * scaling;

    // Pass 1: request the target size outright and measure what the
    // capture really comes out as.
    renderer.set_window_size(width, height)?;
    let first = renderer.capture()?;
    let first_pass = first.dimensions();

    let width_delta = i64::from(width) - i64::from(first_pass.0);
    let height_delta = i64::from(height) - i64::from(first_pass.1);
    debug!(
        "calibration pass 1: requested {}x{}, captured {}x{} (delta {width_delta},{height_delta})",
        width, height, first_pass.0, first_pass.1
    );

    // Pass 2: grow the window by the measured gap and re-measure.
    let corrected_width = (i64::from(width) + width_delta).max(1) as u32;
    let corrected_height = (i64::from(height) + height_delta).max(1) as u32;
    renderer.set_window_size(corrected_width, corrected_height)?;
    let second = renderer.capture()?;
    let actual = second.dimensions();

    let calibration = Calibration {
        requested: (width, height),
        first_pass,
        actual,
    };
    if !calibration.matched() {
        warn!(
            "tried setting capture size {}x{}, but got {}x{}",
            width, height, actual.0, actual.1
        );
    }

    Ok(calibration)
}
