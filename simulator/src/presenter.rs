//! Presenters that copy engine frames into a simulator display.

use std::path::Path;

use anyhow::{Context, Result};
use emotion_engine::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use emotion_engine::{FrameBuffer, Present};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettings, OutputSettingsBuilder, SimulatorDisplay};

/// Offscreen simulator display. Counts presented frames.
pub struct SimPresenter {
    display: SimulatorDisplay<Rgb565>,
    frames: u64,
}

impl SimPresenter {
    pub fn new() -> Self {
        Self {
            display: SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)),
            frames: 0,
        }
    }

    #[inline]
    #[cfg(any(test, feature = "window"))]
    pub fn display(&self) -> &SimulatorDisplay<Rgb565> { &self.display }

    /// Frames presented so far.
    #[inline]
    pub fn frames(&self) -> u64 { self.frames }

    /// Write the last presented frame as a PNG, scaled by `scale`.
    pub fn save_png(
        &self,
        path: &Path,
        scale: u32,
    ) -> Result<()> {
        self.display
            .to_rgb_output_image(&output_settings(scale))
            .save_png(path)
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))
    }
}

impl Present for SimPresenter {
    fn present(
        &mut self,
        frame: &FrameBuffer,
    ) {
        let area = self.display.bounding_box();
        self.display.fill_contiguous(&area, frame.pixels()).ok();
        self.frames += 1;
    }
}

/// Plain output settings: no pixel grid, integer scale.
pub fn output_settings(scale: u32) -> OutputSettings { OutputSettingsBuilder::new().scale(scale.max(1)).pixel_spacing(0).build() }

#[cfg(test)]
mod tests {
    use emotion_engine::colors::{BLACK, RED};

    use super::*;

    #[test]
    fn test_present_copies_frame() {
        let mut presenter = SimPresenter::new();
        let mut frame = FrameBuffer::new();
        frame.set(10, 20, RED);
        presenter.present(&frame);

        assert_eq!(presenter.frames(), 1);
        assert_eq!(presenter.display().get_pixel(Point::new(10, 20)), RED);
        assert_eq!(presenter.display().get_pixel(Point::new(11, 20)), BLACK);
    }
}
