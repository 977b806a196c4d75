//! Process-wide pseudo-random source.
//!
//! A thin wrapper over `SmallRng` with the handful of draws the animations
//! need. Ranges follow the firmware convention: `range(lo, hi)` is half-open.

use rand::rngs::SmallRng;
use rand::{Rng as _, SeedableRng};

/// Deterministic, seedable generator. Not reentrant; owned by the engine.
pub struct Rng {
    inner: SmallRng,
}

impl Rng {
    /// Create a generator from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Uniform integer in `[lo, hi)`. Returns `lo` when the range is empty.
    pub fn range(
        &mut self,
        lo: i32,
        hi: i32,
    ) -> i32 {
        if hi <= lo { lo } else { self.inner.gen_range(lo..hi) }
    }

    /// Uniform integer in `[lo, hi]`.
    pub fn range_inclusive(
        &mut self,
        lo: u32,
        hi: u32,
    ) -> u32 {
        if hi <= lo { lo } else { self.inner.gen_range(lo..=hi) }
    }

    /// Uniform integer in `[0, n)`. Returns 0 when `n` is 0.
    pub fn below(
        &mut self,
        n: u32,
    ) -> u32 {
        if n == 0 { 0 } else { self.inner.gen_range(0..n) }
    }

    /// Uniform float in `[lo, hi)`.
    pub fn range_f32(
        &mut self,
        lo: f32,
        hi: f32,
    ) -> f32 {
        if hi <= lo { lo } else { self.inner.gen_range(lo..hi) }
    }

    /// Uniform float in `[-1, 1]` at 1/1000 resolution.
    pub fn signed_unit(&mut self) -> f32 { self.range(-1000, 1001) as f32 / 1000.0 }

    /// Fair coin flip.
    #[inline]
    pub fn coin(&mut self) -> bool { self.inner.r#gen::<bool>() }

    /// True with probability `p / 256`.
    #[inline]
    pub fn chance(
        &mut self,
        p: u8,
    ) -> bool {
        self.below(256) < u32::from(p)
    }

    /// Random point on the 192-step hue wheel.
    #[inline]
    pub fn hue(&mut self) -> u8 { self.below(u32::from(crate::color_math::HUE_STEPS)) as u8 }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_bounds() {
        let mut rng = Rng::seeded(7);
        for _ in 0..2000 {
            let v = rng.range(-20, 21);
            assert!((-20..=20).contains(&v));
            let u = rng.range_inclusive(3000, 8000);
            assert!((3000..=8000).contains(&u));
            let s = rng.signed_unit();
            assert!((-1.0..=1.0).contains(&s));
            assert!(rng.hue() < 192);
        }
    }

    #[test]
    fn test_empty_ranges_are_safe() {
        let mut rng = Rng::seeded(1);
        assert_eq!(rng.range(5, 5), 5);
        assert_eq!(rng.range(5, 2), 5);
        assert_eq!(rng.below(0), 0);
        assert_eq!(rng.range_f32(1.0, 1.0), 1.0);
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = Rng::seeded(3);
        for _ in 0..500 {
            assert!(!rng.chance(0));
        }
    }

    #[test]
    fn test_seed_determinism() {
        let mut a = Rng::seeded(42);
        let mut b = Rng::seeded(42);
        for _ in 0..100 {
            assert_eq!(a.range(0, 1000), b.range(0, 1000));
        }
    }
}
