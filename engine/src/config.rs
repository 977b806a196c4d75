//! Display geometry, frame timing and the per-emotion tables.
//!
//! Geometry is fixed at compile time. The duration and weight tables live in
//! [`EngineConfig`] so a host can override them at startup.

use crate::emotion_id::{EMOTION_COUNT, EmotionId};

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (round 240x240 panel).
pub const SCREEN_WIDTH: u32 = 240;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 240;

/// Screen center X coordinate.
pub const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;

/// Screen center Y coordinate.
pub const CENTER_Y: i32 = (SCREEN_HEIGHT / 2) as i32;

/// Target frame period in milliseconds (~50 FPS).
pub const FRAME_TIME_MS: u32 = 20;

// =============================================================================
// Eye Geometry
// =============================================================================

/// Radius used by circular eyes and fully rounded eye boxes.
pub const EYE_RADIUS: i32 = 35;

/// Horizontal distance from the face center to each eye center.
pub const EYE_DISTANCE: i32 = 50;

/// Width of the idle rounded-rect eye.
pub const EYE_WIDTH: i32 = 70;

/// Height of the idle rounded-rect eye.
pub const EYE_HEIGHT: i32 = 70;

/// Corner radius of the idle rounded-rect eye.
pub const EYE_CORNER: i32 = 20;

const _: () = assert!(EYE_CORNER * 2 <= EYE_WIDTH);
const _: () = assert!(EYE_DISTANCE * 2 >= EYE_WIDTH);
const _: () = assert!(CENTER_X + EYE_DISTANCE + EYE_WIDTH / 2 < SCREEN_WIDTH as i32);

// =============================================================================
// Cycle Timing
// =============================================================================

/// Shortest randomized idle window before recentering.
pub const IDLE_WINDOW_MIN_MS: u32 = 3000;

/// Longest randomized idle window before recentering (inclusive).
pub const IDLE_WINDOW_MAX_MS: u32 = 8000;

/// Per-tick easing factor pulling the wander offset back to center.
pub const RECENTER_EASE: f32 = 0.20;

/// Offset magnitude (per axis) under which the eyes count as centered.
pub const RECENTER_TOLERANCE: f32 = 0.2;

const _: () = assert!(IDLE_WINDOW_MIN_MS < IDLE_WINDOW_MAX_MS);

// =============================================================================
// Emotion Tables
// =============================================================================

/// Nominal play time per emotion in table order.
///
/// `BootIntro` carries its own fixed sequence length.
pub const DEFAULT_DURATIONS_MS: [u32; EMOTION_COUNT] = [
    8000,  // Normal
    8000,  // Sad
    8000,  // Confuse
    8000,  // Love
    8000,  // Cyclop
    7000,  // Shock
    8000,  // Drunk
    6000,  // Furious
    6000,  // Angry
    8000,  // Doubt
    8000,  // Angry2
    8000,  // Smile
    8000,  // BanhChung
    8000,  // Deadpool
    8000,  // FortuneTeller
    65000, // CarveSession
    65000, // Sleepy
    8000,  // Cry
    32000, // Fireworks
    crate::boot::BOOT_TOTAL_MS,
];

/// Selection weights in table order. Units are arbitrary.
pub const DEFAULT_WEIGHTS: [u8; EMOTION_COUNT] = [
    0,  // Normal (never picked)
    15, // Sad
    15, // Confuse
    40, // Love
    15, // Cyclop
    15, // Shock
    20, // Drunk
    1,  // Furious
    15, // Angry
    15, // Doubt
    10, // Angry2
    30, // Smile
    1,  // BanhChung
    15, // Deadpool
    10, // FortuneTeller
    40, // CarveSession
    15, // Sleepy
    10, // Cry
    15, // Fireworks
    0,  // BootIntro (never picked)
];

/// Emotion returned when the weight table sums to zero.
pub const FALLBACK_EMOTION: EmotionId = EmotionId::Sad;

// =============================================================================
// Engine Configuration
// =============================================================================

/// Externally supplied per-emotion tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    durations: [u32; EMOTION_COUNT],
    weights: [u8; EMOTION_COUNT],
}

impl EngineConfig {
    /// Configuration with the stock duration and weight tables.
    pub const fn new() -> Self {
        Self {
            durations: DEFAULT_DURATIONS_MS,
            weights: DEFAULT_WEIGHTS,
        }
    }

    /// Nominal duration of `id` in milliseconds.
    #[inline]
    pub const fn duration(
        &self,
        id: EmotionId,
    ) -> u32 {
        self.durations[id.index()]
    }

    /// Selection weight of `id`. Always 0 for ids the selector skips.
    #[inline]
    pub const fn weight(
        &self,
        id: EmotionId,
    ) -> u8 {
        if id.is_selectable() { self.weights[id.index()] } else { 0 }
    }

    /// Override one duration.
    pub fn set_duration(
        &mut self,
        id: EmotionId,
        ms: u32,
    ) {
        self.durations[id.index()] = ms;
    }

    /// Override one weight. Ignored for `Normal` and `BootIntro`.
    pub fn set_weight(
        &mut self,
        id: EmotionId,
        weight: u8,
    ) {
        if id.is_selectable() {
            self.weights[id.index()] = weight;
        }
    }

    /// Replace weights from a slice in table order. Index 0 is ignored and
    /// entries past the table end are dropped.
    pub fn set_weights(
        &mut self,
        weights: &[u8],
    ) {
        for (id, &w) in EmotionId::ALL.iter().zip(weights.iter()) {
            self.set_weight(*id, w);
        }
    }

    /// Sum of all selectable weights.
    pub fn total_weight(&self) -> u32 {
        EmotionId::ALL.iter().map(|id| u32::from(self.weight(*id))).sum()
    }
}

impl Default for EngineConfig {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Tests
// =============================================================================
