//! Angry: flattened eyes and a pulsing red cross-popping vein in the upper
//! right corner.

use embedded_graphics::pixelcolor::Rgb565;

use super::{Emotion, FrameContext};
use crate::color_math::from_raw;
use crate::colors::{BLACK, WHITE};
use crate::config::{CENTER_X, CENTER_Y, EYE_DISTANCE, EYE_RADIUS, EYE_WIDTH};
use crate::easing::triangle_pulse;
use crate::framebuffer::FrameBuffer;
use crate::primitives::{fill_rect, fill_round_rect};

const PULSE_MS: u32 = 1000;
const VEIN_X: i32 = CENTER_X + EYE_DISTANCE + EYE_RADIUS - 5;
const VEIN_Y: i32 = 80;
const VEIN_LONG: i32 = 30;
const VEIN_WIDE: i32 = 15;
const VEIN_GAP: i32 = 5;

#[derive(Clone, Debug, Default)]
pub struct AngryFace;

impl AngryFace {
    pub fn new(_ctx: &mut FrameContext<'_>) -> Self { Self }
}

/// Vein color: red channel follows a 1 s triangle pulse.
pub fn vein_color(elapsed: u32) -> Rgb565 {
    let intensity = (triangle_pulse(elapsed, PULSE_MS) * 255.0) as u16;
    from_raw((intensity & 0xF8) << 8)
}

fn vein(
    fb: &mut FrameBuffer,
    color: Rgb565,
) {
    fill_rect(fb, VEIN_X - VEIN_LONG / 2, VEIN_Y - VEIN_WIDE / 2, VEIN_LONG, VEIN_WIDE, color);
    fill_rect(fb, VEIN_X - VEIN_WIDE / 2, VEIN_Y - VEIN_LONG / 2, VEIN_WIDE, VEIN_LONG, color);
    fill_rect(fb, VEIN_X - VEIN_LONG / 2, VEIN_Y - VEIN_GAP / 2, VEIN_LONG, VEIN_GAP, BLACK);
    fill_rect(fb, VEIN_X - VEIN_GAP / 2, VEIN_Y - VEIN_LONG / 2, VEIN_GAP, VEIN_LONG, BLACK);
}

impl Emotion for AngryFace {
    fn draw(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) -> bool {
        let top = CENTER_Y - EYE_RADIUS / 2;
        for x in [CENTER_X + EYE_DISTANCE, CENTER_X - EYE_DISTANCE] {
            fill_round_rect(ctx.fb, x - EYE_WIDTH / 2, top, EYE_WIDTH, EYE_RADIUS, EYE_RADIUS, WHITE);
        }
        vein(ctx.fb, vein_color(ctx.elapsed()));
        ctx.within_duration()
    }
}
