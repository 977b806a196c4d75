//! Weighted random emotion selection.
//!
//! Draws `r` uniformly in `[1, T]` where `T` is the sum of every selectable
//! weight, then walks the table in [`EmotionId`] order and returns the first
//! id whose running sum reaches `r`. Ids with weight 0 are never returned.
//! A table that sums to zero yields [`FALLBACK_EMOTION`].

use crate::config::{EngineConfig, FALLBACK_EMOTION};
use crate::emotion_id::EmotionId;
use crate::rng::Rng;

/// Pick the next emotion to play.
pub fn pick(
    config: &EngineConfig,
    rng: &mut Rng,
) -> EmotionId {
    let total = config.total_weight();
    if total == 0 {
        return FALLBACK_EMOTION;
    }
    let r = rng.range_inclusive(1, total);
    pick_at(config, r)
}

/// Resolve a draw `r` in `[1, total]` to an id by cumulative weight.
pub fn pick_at(
    config: &EngineConfig,
    r: u32,
) -> EmotionId {
    let mut running = 0u32;
    for id in EmotionId::ALL {
        let w = u32::from(config.weight(id));
        if w == 0 {
            continue;
        }
        running += w;
        if running >= r {
            return id;
        }
    }
    FALLBACK_EMOTION
}

// =============================================================================
// Tests
// =============================================================================
