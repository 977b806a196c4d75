//! Float helpers backed by `micromath` so results match on host and target.

use micromath::F32;

/// Full turn in radians.
pub const TAU: f32 = core::f32::consts::TAU;

/// Half turn in radians.
pub const PI: f32 = core::f32::consts::PI;

#[inline]
pub fn sin(x: f32) -> f32 { F32(x).sin().0 }

#[inline]
pub fn cos(x: f32) -> f32 { F32(x).cos().0 }

#[inline]
pub fn sqrt(x: f32) -> f32 { F32(x).sqrt().0 }

#[inline]
pub fn abs(x: f32) -> f32 { F32(x).abs().0 }

#[inline]
pub fn floor(x: f32) -> f32 { F32(x).floor().0 }

#[inline]
pub fn ceil(x: f32) -> f32 { F32(x).ceil().0 }

/// Round half away from zero.
#[inline]
pub fn round(x: f32) -> f32 { F32(x).round().0 }

/// Degrees to radians.
#[inline]
pub fn radians(deg: f32) -> f32 { deg * (PI / 180.0) }

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trig_close_to_std() {
        for i in 0..64 {
            let x = i as f32 * 0.1 - 3.2;
            assert!((sin(x) - x.sin()).abs() < 0.01, "sin({x})");
            assert!((cos(x) - x.cos()).abs() < 0.01, "cos({x})");
        }
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round(1.5), 2.0);
        assert_eq!(round(-1.5), -2.0);
        assert_eq!(round(0.49), 0.0);
        assert_eq!(floor(-0.5), -1.0);
        assert_eq!(ceil(0.1), 1.0);
    }
}
