//! Low-level drawing primitives shared across emotions.
//!
//! Shapes are addressed by their center, matching how eye geometry is
//! described. Helpers built on embedded-graphics primitives are generic over
//! any `DrawTarget<Color = Rgb565>`; helpers that read back pixels (alpha
//! blending) need the concrete [`Canvas`].

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle, RoundedRectangle, Triangle};

use crate::color_math;
use crate::framebuffer::Canvas;
use crate::math;

/// Filled rectangle by top-left corner. Non-positive sizes draw nothing.
pub fn fill_rect<D>(
    display: &mut D,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    if w <= 0 || h <= 0 {
        return;
    }
    Rectangle::new(Point::new(x, y), Size::new(w as u32, h as u32))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
        .ok();
}

/// Filled rounded rectangle by top-left corner.
///
/// The corner radius is clamped to half the shorter side.
pub fn fill_round_rect<D>(
    display: &mut D,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    radius: i32,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    if w <= 0 || h <= 0 {
        return;
    }
    let r = radius.clamp(0, w.min(h) / 2) as u32;
    let rect = Rectangle::new(Point::new(x, y), Size::new(w as u32, h as u32));
    RoundedRectangle::with_equal_corners(rect, Size::new(r, r))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
        .ok();
}

/// Filled rounded rectangle centered on `(cx, cy)`.
pub fn fill_round_rect_centered<D>(
    display: &mut D,
    cx: i32,
    cy: i32,
    w: i32,
    h: i32,
    radius: i32,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    fill_round_rect(display, cx - w / 2, cy - h / 2, w, h, radius, color);
}

/// Filled circle of radius `r` (diameter `2r + 1`).
pub fn fill_circle<D>(
    display: &mut D,
    cx: i32,
    cy: i32,
    r: i32,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    if r < 0 {
        return;
    }
    Circle::with_center(Point::new(cx, cy), (2 * r + 1) as u32)
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
        .ok();
}

/// One-pixel circle outline of radius `r`.
pub fn draw_circle<D>(
    display: &mut D,
    cx: i32,
    cy: i32,
    r: i32,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    if r <= 0 {
        return;
    }
    Circle::with_center(Point::new(cx, cy), (2 * r + 1) as u32)
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(display)
        .ok();
}

/// One-pixel line.
pub fn draw_line<D>(
    display: &mut D,
    from: Point,
    to: Point,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Line::new(from, to)
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(display)
        .ok();
}

/// Vertical line of `len` pixels starting at `(x, y)`.
pub fn vline<D>(
    display: &mut D,
    x: i32,
    y: i32,
    len: i32,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    fill_rect(display, x, y, 1, len, color);
}

/// Filled triangle.
pub fn fill_triangle<D>(
    display: &mut D,
    a: Point,
    b: Point,
    c: Point,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Triangle::new(a, b, c)
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
        .ok();
}

/// Four-point star: a vertical and a horizontal diamond of `size` steps,
/// built from one-pixel spans.
pub fn sparkle<D>(
    display: &mut D,
    cx: i32,
    cy: i32,
    size: i32,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    for i in 0..size {
        let span = size - i;
        fill_rect(display, cx - span / 2, cy - i, span, 1, color);
        fill_rect(display, cx - span / 2, cy + i, span, 1, color);
        vline(display, cx - i, cy - span / 2, span, color);
        vline(display, cx + i, cy - span / 2, span, color);
    }
}

// =============================================================================
// Read-back Primitives (concrete canvas only)
// =============================================================================

/// Filled circle composited over the existing pixels at `alpha` opacity.
pub fn translucent_circle<const W: usize, const H: usize>(
    canvas: &mut Canvas<W, H>,
    cx: i32,
    cy: i32,
    r: i32,
    color: Rgb565,
    alpha: u8,
) {
    if r < 0 {
        return;
    }
    let r2 = r * r;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r2 {
                canvas.blend_pixel(cx + dx, cy + dy, color, alpha);
            }
        }
    }
}

/// Filled ellipse with half-axes `(w, h)` rotated by `angle_deg` around its center.
pub fn rotated_ellipse<const W: usize, const H: usize>(
    canvas: &mut Canvas<W, H>,
    cx: i32,
    cy: i32,
    w: i32,
    h: i32,
    angle_deg: f32,
    color: Rgb565,
) {
    if w <= 0 || h <= 0 {
        return;
    }
    let angle = math::radians(angle_deg);
    let (ca, sa) = (math::cos(angle), math::sin(angle));
    for dy in -h..=h {
        let y_ratio = dy as f32 / h as f32;
        let span = math::sqrt((1.0 - y_ratio * y_ratio).max(0.0)) * w as f32;
        let x0 = math::floor(-span) as i32;
        let x1 = math::ceil(span) as i32;
        for i in x0..=x1 {
            let xf = i as f32;
            let xr = xf * ca - dy as f32 * sa;
            let yr = xf * sa + dy as f32 * ca;
            let px = math::floor(cx as f32 + xr + 0.5) as i32;
            let py = math::floor(cy as f32 + yr + 0.5) as i32;
            canvas.set(px, py, color);
        }
    }
}

/// Radial gradient built from `rings` concentric filled circles, `outer`
/// at the rim blending to `inner` at the core with smoothstep spacing.
pub fn gradient_circle<D>(
    display: &mut D,
    cx: i32,
    cy: i32,
    r: i32,
    inner: Rgb565,
    outer: Rgb565,
    rings: usize,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let rings = rings.clamp(2, 16);
    for i in 0..rings {
        let t = i as f32 / (rings - 1) as f32;
        let eased = crate::easing::smoothstep(t);
        let rr = ((r as f32 * (1.0 - eased) + 0.5) as i32).max(1);
        fill_circle(display, cx, cy, rr, color_math::ramp(outer, inner, t));
    }
}

// =============================================================================
// Tests
// =============================================================================
