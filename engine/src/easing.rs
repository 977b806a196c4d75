//! Easing curves and phase timing helpers.
//!
//! Every curve clamps its input to `[0, 1]` and returns a value in `[0, 1]`.
//!
//! # Phases
//!
//! Most animations split their play time into ordered phases
//! (enter / hold / exit). [`PhaseTimeline`] maps an elapsed time onto
//! `(phase index, fraction within phase)` so variants never hand-roll the
//! running-sum arithmetic.

use crate::math;
use crate::rng::Rng;

// =============================================================================
// Curves
// =============================================================================

/// Clamp to `[0, 1]`. NaN maps to 0.
#[inline]
pub fn clamp01(t: f32) -> f32 {
    if t > 0.0 {
        if t < 1.0 { t } else { 1.0 }
    } else {
        0.0
    }
}

/// Cubic Hermite smoothstep.
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = clamp01(t);
    t * t * (3.0 - 2.0 * t)
}

/// Piecewise quadratic ease-in-out.
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = clamp01(t);
    if t < 0.5 { 2.0 * t * t } else { -1.0 + (4.0 - 2.0 * t) * t }
}

/// Quadratic ease-out.
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = clamp01(t);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Cubic ease-in-out.
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = clamp01(t);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// Quadratic ease-in-out plus uniform noise of `±amp`, re-clamped.
pub fn jittered_ease(
    progress: f32,
    amp: f32,
    rng: &mut Rng,
) -> f32 {
    clamp01(ease_in_out(progress) + rng.signed_unit() * amp)
}

/// Linear interpolation.
#[inline]
pub fn lerp(
    a: f32,
    b: f32,
    t: f32,
) -> f32 {
    a + (b - a) * t
}

/// Triangle pulse: 0 → 1 → 0 over `period_ms`.
pub fn triangle_pulse(
    elapsed_ms: u32,
    period_ms: u32,
) -> f32 {
    if period_ms < 2 {
        return 0.0;
    }
    let half = period_ms / 2;
    let c = elapsed_ms % period_ms;
    if c < half {
        c as f32 / half as f32
    } else {
        1.0 - (c - half) as f32 / (period_ms - half) as f32
    }
}

/// Raised cosine: 0 → 1 → 0 as `phase` goes 0 → 1.
#[inline]
pub fn raised_cosine(phase: f32) -> f32 { 0.5 * (1.0 - math::cos(math::TAU * phase)) }

// =============================================================================
// Time Slices
// =============================================================================

/// Fraction of `[start, start + dur)` covered at `now`, or `None` outside it.
pub fn phase01(
    now: u32,
    start: u32,
    dur: u32,
) -> Option<f32> {
    let elapsed = now.wrapping_sub(start);
    if dur == 0 || elapsed >= dur {
        None
    } else {
        Some(elapsed as f32 / dur as f32)
    }
}

/// Whether `now` is at or past `deadline` on the wrapping millisecond clock.
#[inline]
pub fn reached(
    now: u32,
    deadline: u32,
) -> bool {
    (now.wrapping_sub(deadline) as i32) >= 0
}

/// Square-wave jitter: `+magnitude` and `-magnitude` alternating every `step_ms`.
#[inline]
pub fn square_jitter(
    elapsed_ms: u32,
    step_ms: u32,
    magnitude: i32,
) -> i32 {
    if (elapsed_ms / step_ms.max(1)) % 2 == 0 { magnitude } else { -magnitude }
}

/// Ordered phase durations laid end to end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseTimeline<const N: usize> {
    durations: [u32; N],
}

impl<const N: usize> PhaseTimeline<N> {
    /// Build a timeline from phase lengths in milliseconds.
    pub const fn new(durations: [u32; N]) -> Self { Self { durations } }

    /// Sum of all phases.
    pub fn total(&self) -> u32 { self.durations.iter().sum() }

    /// Length of phase `index` (0 when out of range).
    pub fn duration(
        &self,
        index: usize,
    ) -> u32 {
        self.durations.get(index).copied().unwrap_or(0)
    }

    /// Locate `elapsed` on the timeline.
    ///
    /// Returns `(index, fraction)` with `fraction` in `[0, 1)`, or `None`
    /// once every phase has run out.
    pub fn locate(
        &self,
        elapsed: u32,
    ) -> Option<(usize, f32)> {
        let mut start = 0u32;
        for (i, &d) in self.durations.iter().enumerate() {
            if elapsed < start + d {
                return Some((i, (elapsed - start) as f32 / d as f32));
            }
            start += d;
        }
        None
    }

    /// Like [`PhaseTimeline::locate`] but wraps `elapsed` around the total, so
    /// the timeline repeats forever.
    pub fn locate_looped(
        &self,
        elapsed: u32,
    ) -> (usize, f32) {
        let total = self.total();
        if total == 0 {
            return (0, 0.0);
        }
        self.locate(elapsed % total).unwrap_or((0, 0.0))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curves_stay_in_unit_range() {
        let mut rng = Rng::seeded(9);
        for i in -20..=120 {
            let t = i as f32 / 100.0;
            for v in [
                smoothstep(t),
                ease_in_out(t),
                ease_out(t),
                ease_in_out_cubic(t),
                jittered_ease(t, 0.02, &mut rng),
                clamp01(t),
            ] {
                assert!((0.0..=1.0).contains(&v), "eased value {v} for t={t}");
            }
        }
    }

    #[test]
    fn test_curve_endpoints() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(ease_in_out(0.5), 0.5);
        assert_eq!(ease_out(1.0), 1.0);
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert_eq!(clamp01(f32::NAN), 0.0);
    }

    #[test]
    fn test_triangle_pulse() {
        assert_eq!(triangle_pulse(0, 1000), 0.0);
        assert_eq!(triangle_pulse(500, 1000), 1.0);
        assert_eq!(triangle_pulse(250, 1000), 0.5);
        assert_eq!(triangle_pulse(1250, 1000), 0.5);
        assert_eq!(triangle_pulse(10, 0), 0.0);
    }

    #[test]
    fn test_phase01() {
        assert_eq!(phase01(100, 100, 50), Some(0.0));
        assert_eq!(phase01(125, 100, 50), Some(0.5));
        assert_eq!(phase01(150, 100, 50), None);
        assert_eq!(phase01(99, 100, 50), None);
        assert_eq!(phase01(100, 100, 0), None);
    }

    #[test]
    fn test_reached_wraps() {
        assert!(reached(10, 10));
        assert!(!reached(9, 10));
        assert!(reached(5, u32::MAX - 5), "deadline just before the wrap");
        assert!(!reached(u32::MAX - 5, 5));
    }

    #[test]
    fn test_square_jitter() {
        assert_eq!(square_jitter(0, 50, 2), 2);
        assert_eq!(square_jitter(49, 50, 2), 2);
        assert_eq!(square_jitter(50, 50, 2), -2);
        assert_eq!(square_jitter(100, 50, 2), 2);
    }

    #[test]
    fn test_timeline_locate() {
        let tl = PhaseTimeline::new([500, 2000, 500]);
        assert_eq!(tl.total(), 3000);
        assert_eq!(tl.locate(0), Some((0, 0.0)));
        assert_eq!(tl.locate(250), Some((0, 0.5)));
        assert_eq!(tl.locate(500), Some((1, 0.0)));
        assert_eq!(tl.locate(2750), Some((2, 0.5)));
        assert_eq!(tl.locate(3000), None);
        assert_eq!(tl.locate_looped(3250), (0, 0.5));
    }

    #[test]
    fn test_timeline_skips_empty_phases() {
        let tl = PhaseTimeline::new([0, 100]);
        assert_eq!(tl.locate(0), Some((1, 0.0)));
        assert_eq!(PhaseTimeline::new([0u32; 2]).locate_looped(5), (0, 0.0));
    }
}
