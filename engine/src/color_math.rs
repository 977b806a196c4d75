//! Packed 5/6/5 color math.
//!
//! Every function here is pure. Channels are expanded to 8 bits with bit
//! replication, so full-scale values survive a round trip exactly and the
//! quantization error of any other value stays within one 565 step.
//!
//! # Hue Wheel
//!
//! Hues live on a 192-step wheel split into six 32-step segments
//! (red → yellow → green → cyan → blue → magenta → red). [`hue_lerp`] always
//! takes the shorter way around the wheel.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{IntoStorage, RgbColor};

use crate::easing::clamp01;
use crate::math;

/// Number of steps on the hue wheel.
pub const HUE_STEPS: u16 = 192;

const HALF_WHEEL: i32 = (HUE_STEPS / 2) as i32;

// =============================================================================
// Packing
// =============================================================================

/// Pack 8-bit channels into a 565 color by dropping the low bits.
///
/// Matches how the panel constants were tuned, so `rgb(255, 0, 0)` is 0xF800.
#[inline]
pub const fn rgb(
    r: u8,
    g: u8,
    b: u8,
) -> Rgb565 {
    Rgb565::new(r >> 3, g >> 2, b >> 3)
}

/// Pack 8-bit channels into a 565 color, rounding to the nearest level.
///
/// Inverse of [`unpack`] within one quantization step.
#[inline]
pub const fn pack(
    r: u8,
    g: u8,
    b: u8,
) -> Rgb565 {
    let r5 = (r as u16 * 31 + 127) / 255;
    let g6 = (g as u16 * 63 + 127) / 255;
    let b5 = (b as u16 * 31 + 127) / 255;
    Rgb565::new(r5 as u8, g6 as u8, b5 as u8)
}

/// Expand a 565 color to 8-bit channels.
#[inline]
pub fn unpack(c: Rgb565) -> (u8, u8, u8) {
    let (r5, g6, b5) = (c.r(), c.g(), c.b());
    ((r5 << 3) | (r5 >> 2), (g6 << 2) | (g6 >> 4), (b5 << 3) | (b5 >> 2))
}

/// Build a color from its raw 16-bit panel value.
#[inline]
pub const fn from_raw(raw: u16) -> Rgb565 {
    Rgb565::new(((raw >> 11) & 0x1F) as u8, ((raw >> 5) & 0x3F) as u8, (raw & 0x1F) as u8)
}

/// Raw 16-bit panel value of a color.
#[inline]
pub fn to_raw(c: Rgb565) -> u16 { c.into_storage() }

// =============================================================================
// Blending
// =============================================================================

/// Linear blend from `c1` (t = 0) to `c2` (t = 1) on the native 5/6/5 channels.
///
/// `t` is clamped. Partial steps truncate toward `c1`.
pub fn blend(
    c1: Rgb565,
    c2: Rgb565,
    t: f32,
) -> Rgb565 {
    let t = clamp01(t);
    let mix = |a: u8, b: u8| -> u8 {
        let a = i32::from(a);
        let b = i32::from(b);
        (a + ((b - a) as f32 * t) as i32) as u8
    };
    Rgb565::new(mix(c1.r(), c2.r()), mix(c1.g(), c2.g()), mix(c1.b(), c2.b()))
}

/// Like [`blend`], but partial steps round to the nearest native level.
pub fn blend_rounded(
    c1: Rgb565,
    c2: Rgb565,
    t: f32,
) -> Rgb565 {
    let t = clamp01(t);
    let mix = |a: u8, b: u8| -> u8 {
        let a = i32::from(a);
        let b = i32::from(b);
        (a + math::round((b - a) as f32 * t) as i32) as u8
    };
    Rgb565::new(mix(c1.r(), c2.r()), mix(c1.g(), c2.g()), mix(c1.b(), c2.b()))
}

/// Scale brightness by `factor / 256` (0 = black, 255 ≈ unchanged).
pub fn dim(
    c: Rgb565,
    factor: u8,
) -> Rgb565 {
    let (r, g, b) = unpack(c);
    let f = u16::from(factor);
    let scale = |v: u8| ((u16::from(v) * f) >> 8) as u8;
    rgb(scale(r), scale(g), scale(b))
}

/// Scale brightness by a float factor. `<= 0` is black, `>= 1` is unchanged.
pub fn scale(
    c: Rgb565,
    brightness: f32,
) -> Rgb565 {
    if brightness.is_nan() || brightness <= 0.0 {
        return Rgb565::BLACK;
    }
    if brightness >= 1.0 {
        return c;
    }
    let (r, g, b) = unpack(c);
    let f = |v: u8| (f32::from(v) * brightness) as u8;
    rgb(f(r), f(g), f(b))
}

/// Composite `color` over `existing` with 8-bit opacity (255 = opaque).
pub fn alpha_composite(
    existing: Rgb565,
    color: Rgb565,
    alpha: u8,
) -> Rgb565 {
    let (r0, g0, b0) = unpack(existing);
    let (r1, g1, b1) = unpack(color);
    let a = u16::from(alpha);
    let mix = |c0: u8, c1: u8| ((u16::from(c0) * (255 - a) + u16::from(c1) * a) / 255) as u8;
    rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1))
}

/// Add `amount` to every 8-bit channel, saturating at full scale.
pub fn brighten(
    c: Rgb565,
    amount: u8,
) -> Rgb565 {
    let (r, g, b) = unpack(c);
    rgb(r.saturating_add(amount), g.saturating_add(amount), b.saturating_add(amount))
}

/// Blend between two 8-bit channel triples with smoothstep easing applied to `t`.
///
/// Used for radial gradient ramps where the outer ring is `outer`.
pub fn ramp(
    outer: Rgb565,
    inner: Rgb565,
    t: f32,
) -> Rgb565 {
    let t = crate::easing::smoothstep(t);
    let (or, og, ob) = unpack(outer);
    let (ir, ig, ib) = unpack(inner);
    let mix = |o: u8, i: u8| (f32::from(o) + (f32::from(i) - f32::from(o)) * t) as u8;
    rgb(mix(or, ir), mix(og, ig), mix(ob, ib))
}

// =============================================================================
// Hue Wheel
// =============================================================================

/// Fully saturated color for a hue on the 192-step wheel.
///
/// Hues past the wheel wrap around.
pub fn hue_to_color(hue: u8) -> Rgb565 {
    let hue = (u16::from(hue) % HUE_STEPS) as u8;
    let off = (hue & 31) << 3;
    let (r, g, b) = match hue >> 5 {
        0 => (255, off, 0),
        1 => (255 - off, 255, 0),
        2 => (0, 255, off),
        3 => (0, 255 - off, 255),
        4 => (off, 0, 255),
        _ => (255, 0, 255 - off),
    };
    rgb(r, g, b)
}

/// Interpolate between two hues along the shorter arc of the wheel.
pub fn hue_lerp(
    a: u8,
    b: u8,
    t: f32,
) -> u8 {
    let steps = HUE_STEPS as i32;
    let a = i32::from(a) % steps;
    let b = i32::from(b) % steps;
    let mut da = b - a;
    if da > HALF_WHEEL {
        da -= steps;
    }
    if da < -HALF_WHEEL {
        da += steps;
    }
    let h = math::round(a as f32 + da as f32 * clamp01(t)) as i32;
    h.rem_euclid(steps) as u8
}

/// Advance a hue by `step`, wrapping on the wheel.
#[inline]
pub fn hue_add(
    hue: u8,
    step: u16,
) -> u8 {
    ((u16::from(hue) + step) % HUE_STEPS) as u8
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn within(
        a: u8,
        b: u8,
        tol: u8,
    ) -> bool {
        a.abs_diff(b) <= tol
    }

    // -------------------------------------------------------------------------
    // Packing
    // -------------------------------------------------------------------------

    #[test]
    fn test_round_trip_within_quantization() {
        for r in (0..=255u16).step_by(7) {
            for g in (0..=255u16).step_by(11) {
                for b in [0u8, 3, 64, 129, 200, 255] {
                    let (ur, ug, ub) = unpack(pack(r as u8, g as u8, b));
                    assert!(within(ur, r as u8, 4), "red {r} -> {ur}");
                    assert!(within(ug, g as u8, 2), "green {g} -> {ug}");
                    assert!(within(ub, b, 4), "blue {b} -> {ub}");
                }
            }
        }
    }

    #[test]
    fn test_full_scale_exact() {
        assert_eq!(unpack(pack(255, 255, 255)), (255, 255, 255));
        assert_eq!(unpack(pack(0, 0, 0)), (0, 0, 0));
    }

    #[test]
    fn test_raw_conversion() {
        assert_eq!(to_raw(from_raw(0xB4A5)), 0xB4A5);
        assert_eq!(to_raw(rgb(255, 0, 0)), 0xF800);
        assert_eq!(to_raw(rgb(0, 255, 0)), 0x07E0);
    }

    // -------------------------------------------------------------------------
    // Blending
    // -------------------------------------------------------------------------

    #[test]
    fn test_blend_endpoints_and_clamp() {
        let white = Rgb565::WHITE;
        let red = Rgb565::RED;
        assert_eq!(blend(white, red, 0.0), white);
        assert_eq!(blend(white, red, 1.0), red);
        assert_eq!(blend(white, red, -3.0), white, "t below 0 clamps");
        assert_eq!(blend(white, red, 7.0), red, "t above 1 clamps");
        let mid = blend(white, red, 0.5);
        assert_eq!(mid.r(), 31);
        assert!(mid.g() > 25 && mid.g() < 38);
    }

    #[test]
    fn test_blend_rounded_reaches_target_sooner() {
        let white = Rgb565::WHITE;
        let green = Rgb565::GREEN;
        assert_eq!(blend_rounded(white, green, 1.0), green);
        // 31 * 0.99 = 30.69: truncation stops at 1, rounding lands on 0.
        assert_eq!(blend(white, green, 0.99).r(), 1);
        assert_eq!(blend_rounded(white, green, 0.99).r(), 0);
    }

    #[test]
    fn test_dim() {
        assert_eq!(dim(Rgb565::WHITE, 0), Rgb565::BLACK);
        let half = unpack(dim(Rgb565::WHITE, 128));
        assert!(within(half.0, 127, 8));
        assert!(within(half.1, 127, 4));
        let near_full = unpack(dim(Rgb565::WHITE, 255));
        assert!(near_full.0 >= 246, "255 keeps almost full brightness");
    }

    #[test]
    fn test_scale_clamps() {
        assert_eq!(scale(Rgb565::YELLOW, 0.0), Rgb565::BLACK);
        assert_eq!(scale(Rgb565::YELLOW, f32::NAN), Rgb565::BLACK);
        assert_eq!(scale(Rgb565::YELLOW, 1.5), Rgb565::YELLOW);
        let (r, g, b) = unpack(scale(Rgb565::YELLOW, 0.5));
        assert!(within(r, 127, 8) && within(g, 127, 4));
        assert_eq!(b, 0);
    }

    #[test]
    fn test_alpha_composite() {
        let bg = Rgb565::BLACK;
        let fg = Rgb565::WHITE;
        assert_eq!(alpha_composite(bg, fg, 0), bg);
        assert_eq!(alpha_composite(bg, fg, 255), fg);
        let (r, g, b) = unpack(alpha_composite(bg, fg, 127));
        assert!(within(r, 127, 8) && within(g, 127, 4) && within(b, 127, 8));
    }

    #[test]
    fn test_brighten_saturates() {
        assert_eq!(brighten(Rgb565::WHITE, 8), Rgb565::WHITE);
        let (r, _, _) = unpack(brighten(Rgb565::BLACK, 8));
        assert_eq!(r, 8);
    }

    #[test]
    fn test_ramp_endpoints() {
        let outer = rgb(40, 0, 35);
        let inner = rgb(255, 60, 170);
        assert_eq!(ramp(outer, inner, 0.0), outer);
        assert_eq!(ramp(outer, inner, 1.0), inner);
    }

    // -------------------------------------------------------------------------
    // Hue Wheel
    // -------------------------------------------------------------------------

    #[test]
    fn test_hue_segments() {
        assert_eq!(hue_to_color(0), rgb(255, 0, 0));
        assert_eq!(hue_to_color(64), rgb(0, 255, 0));
        assert_eq!(hue_to_color(128), rgb(0, 0, 255));
        assert_eq!(hue_to_color(191), rgb(255, 0, 255 - 248));
        assert_eq!(hue_to_color(192), hue_to_color(0), "hues wrap");
    }

    #[test]
    fn test_hue_lerp_short_arc() {
        let h = hue_lerp(0, 190, 0.5);
        assert_eq!(h, 191, "0 -> 190 must travel the 2-step arc through the wrap");
        assert_eq!(hue_lerp(190, 0, 0.5), 191);
        assert_eq!(hue_lerp(10, 20, 0.5), 15);
        assert_eq!(hue_lerp(10, 20, 0.0), 10);
        assert_eq!(hue_lerp(10, 20, 1.0), 20);
    }

    #[test]
    fn test_hue_lerp_stays_on_wheel() {
        for a in (0..192u8).step_by(13) {
            for b in (0..192u8).step_by(17) {
                for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
                    assert!(u16::from(hue_lerp(a, b, t)) < HUE_STEPS);
                }
            }
        }
    }

    #[test]
    fn test_hue_add_wraps() {
        assert_eq!(hue_add(180, 24), 12);
        assert_eq!(hue_add(0, 87), 87);
    }
}
