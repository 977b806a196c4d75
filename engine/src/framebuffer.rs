//! Offscreen RGB565 canvas.
//!
//! [`Canvas`] implements `DrawTarget` so every embedded-graphics primitive can
//! paint into it. All writes are clipped: out-of-range coordinates are
//! silently dropped, never wrapped and never a fault.
//!
//! The engine draws one full frame here per tick, then hands the finished
//! buffer to the display presenter in a single push.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::color_math;
use crate::colors::BLACK;

/// Full-screen frame buffer (240x240).
pub type FrameBuffer = Canvas<240, 240>;

/// Fixed-size grid of packed-565 pixels, row-major.
#[derive(Clone)]
pub struct Canvas<const W: usize, const H: usize> {
    rows: [[Rgb565; W]; H],
}

impl<const W: usize, const H: usize> Canvas<W, H> {
    /// Create a canvas cleared to black.
    pub const fn new() -> Self { Self { rows: [[BLACK; W]; H] } }

    /// Canvas width in pixels.
    #[inline]
    pub const fn width(&self) -> usize { W }

    /// Canvas height in pixels.
    #[inline]
    pub const fn height(&self) -> usize { H }

    #[inline]
    fn index(
        x: i32,
        y: i32,
    ) -> Option<(usize, usize)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x < W && y < H { Some((x, y)) } else { None }
    }

    /// Read a pixel. `None` outside the canvas.
    #[inline]
    pub fn get(
        &self,
        x: i32,
        y: i32,
    ) -> Option<Rgb565> {
        Self::index(x, y).map(|(x, y)| self.rows[y][x])
    }

    /// Write a pixel, clipped to the canvas.
    #[inline]
    pub fn set(
        &mut self,
        x: i32,
        y: i32,
        color: Rgb565,
    ) {
        if let Some((x, y)) = Self::index(x, y) {
            self.rows[y][x] = color;
        }
    }

    /// Composite `color` over the existing pixel with 8-bit opacity.
    #[inline]
    pub fn blend_pixel(
        &mut self,
        x: i32,
        y: i32,
        color: Rgb565,
        alpha: u8,
    ) {
        if let Some((x, y)) = Self::index(x, y) {
            let existing = self.rows[y][x];
            self.rows[y][x] = color_math::alpha_composite(existing, color, alpha);
        }
    }

    /// Fill the whole canvas with one color.
    pub fn fill(
        &mut self,
        color: Rgb565,
    ) {
        for row in &mut self.rows {
            row.fill(color);
        }
    }

    /// Scale every pixel's brightness by `factor / 256`.
    pub fn dim_all(
        &mut self,
        factor: u8,
    ) {
        if factor == u8::MAX {
            return;
        }
        for px in self.rows.iter_mut().flatten() {
            *px = color_math::dim(*px, factor);
        }
    }

    /// Rows of pixels, top to bottom.
    #[inline]
    pub fn rows(&self) -> &[[Rgb565; W]; H] { &self.rows }

    /// All pixels, row-major.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb565> + '_ { self.rows.iter().flatten().copied() }

    /// Packed 565 words, row-major, for presenters that push raw data.
    pub fn raw_pixels(&self) -> impl Iterator<Item = u16> + '_ { self.pixels().map(|c| c.into_storage()) }

    /// Count pixels that differ from `color`. Handy for asserting that a
    /// frame actually drew something.
    pub fn count_not(
        &self,
        color: Rgb565,
    ) -> usize {
        self.pixels().filter(|&c| c != color).count()
    }
}

impl<const W: usize, const H: usize> Default for Canvas<W, H> {
    fn default() -> Self { Self::new() }
}

impl<const W: usize, const H: usize> OriginDimensions for Canvas<W, H> {
    fn size(&self) -> Size { Size::new(W as u32, H as u32) }
}

impl<const W: usize, const H: usize> DrawTarget for Canvas<W, H> {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set(point.x, point.y, color);
        }
        Ok(())
    }

    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let drawable_area = area.intersection(&self.bounding_box());
        if drawable_area.size == Size::zero() {
            return Ok(());
        }

        let x_start = drawable_area.top_left.x as usize;
        let x_end = x_start + drawable_area.size.width as usize;
        for y in drawable_area.rows() {
            self.rows[y as usize][x_start..x_end].fill(color);
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
