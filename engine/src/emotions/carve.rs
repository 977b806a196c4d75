//! Carve session: a long-running emotion with its own idle loop. The eyes
//! wander and blink for a few seconds, recenter, then carve one of four
//! expressions out of their corners before returning to idle. Once the
//! session deadline passes the eyes settle in the center until the play
//! times out.

use super::{Emotion, FrameContext};
use crate::colors::WHITE;
use crate::config::{CENTER_X, CENTER_Y, EYE_CORNER, EYE_DISTANCE, EYE_HEIGHT, EYE_WIDTH, IDLE_WINDOW_MAX_MS, IDLE_WINDOW_MIN_MS};
use crate::easing::{PhaseTimeline, ease_in_out, reached};
use crate::eyes::{EyeGeometry, carve_bottom, carve_top, eye_box};
use crate::framebuffer::FrameBuffer;
use crate::math;

/// Session length range, measured from the start of the play.
pub const SESSION_MS: (i32, i32) = (50_000, 60_001);

/// Carve in, hold, carve out.
pub const CARVE_TIMELINE: PhaseTimeline<3> = PhaseTimeline::new([600, 2000, 600]);

const RECENTER_DONE_PX: f32 = 1.0;
const BLINK_SQUEEZE: f32 = 0.75;
const MIN_EYE_H: i32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarveMode {
    /// One eye, inner corner cut from the top.
    Suspicious,
    /// Both eyes, outer bottom corners cut deep.
    Happy,
    /// Both eyes, outer top corners cut deep.
    TopCut,
    /// One eye, outer top corner cut deep.
    Worry,
}

impl CarveMode {
    fn from_index(i: i32) -> Self {
        match i {
            0 => Self::Suspicious,
            1 => Self::Happy,
            2 => Self::TopCut,
            _ => Self::Worry,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Recenter,
    Carve,
    Return,
    Done,
}

#[derive(Clone, Debug)]
pub struct CarveSession {
    eyes: EyeGeometry,
    phase: SessionPhase,
    phase_start: u32,
    idle_window: u32,
    mode: CarveMode,
    left_side: bool,
    deadline: u32,
}

impl CarveSession {
    pub fn new(ctx: &mut FrameContext<'_>) -> Self {
        let deadline = ctx.started_at.wrapping_add(ctx.rng.range(SESSION_MS.0, SESSION_MS.1) as u32);
        let mut session = Self {
            eyes: EyeGeometry::new(ctx.now, ctx.rng),
            phase: SessionPhase::Idle,
            phase_start: ctx.now,
            idle_window: 0,
            mode: CarveMode::Suspicious,
            left_side: true,
            deadline,
        };
        session.start_idle(ctx);
        session
    }

    pub fn phase(&self) -> SessionPhase { self.phase }

    pub fn mode(&self) -> CarveMode { self.mode }

    pub fn deadline(&self) -> u32 { self.deadline }

    fn start_idle(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) {
        self.phase = SessionPhase::Idle;
        self.phase_start = ctx.now;
        self.idle_window = ctx.rng.range(IDLE_WINDOW_MIN_MS as i32, IDLE_WINDOW_MAX_MS as i32 + 1) as u32;
    }

    fn start_carve(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) {
        self.phase = SessionPhase::Carve;
        self.phase_start = ctx.now;
        self.mode = CarveMode::from_index(ctx.rng.range(0, 4));
        self.left_side = ctx.rng.coin();
    }

    /// Eye centers including the wander offset.
    fn eye_centers(&self) -> (i32, i32, i32) {
        let dx = math::round(self.eyes.offset_x) as i32;
        let dy = math::round(self.eyes.offset_y) as i32;
        (CENTER_X - EYE_DISTANCE + dx, CENTER_X + EYE_DISTANCE + dx, CENTER_Y + dy)
    }

    /// Open eyes squeezed by the blink, never below a sliver.
    fn draw_blinking(
        &self,
        fb: &mut FrameBuffer,
        (left, right, cy): (i32, i32, i32),
    ) {
        let h = ((EYE_HEIGHT as f32 * (1.0 - BLINK_SQUEEZE * self.eyes.blink_progress())) as i32).max(MIN_EYE_H);
        eye_box(fb, left, cy, EYE_WIDTH, h, EYE_CORNER, WHITE);
        eye_box(fb, right, cy, EYE_WIDTH, h, EYE_CORNER, WHITE);
    }

    fn draw_carve(
        &self,
        fb: &mut FrameBuffer,
        t: f32,
    ) {
        let (left, right, cy) = self.eye_centers();
        eye_box(fb, left, cy, EYE_WIDTH, EYE_HEIGHT, EYE_CORNER, WHITE);
        eye_box(fb, right, cy, EYE_WIDTH, EYE_HEIGHT, EYE_CORNER, WHITE);
        if t <= 0.0 {
            return;
        }
        let depth = |max: f32| (max * t + 0.5) as i32;
        let (single, single_is_left) = if self.left_side { (left, true) } else { (right, false) };
        match self.mode {
            CarveMode::Suspicious => carve_corner(fb, single, cy, single_is_left, true, depth(22.0), 0),
            CarveMode::Happy => {
                carve_corner(fb, left, cy, true, false, depth(8.0), depth(28.0));
                carve_corner(fb, right, cy, false, false, depth(8.0), depth(28.0));
            }
            CarveMode::TopCut => {
                carve_corner(fb, left, cy, true, true, depth(6.0), depth(26.0));
                carve_corner(fb, right, cy, false, true, depth(6.0), depth(26.0));
            }
            CarveMode::Worry => carve_corner(fb, single, cy, single_is_left, true, depth(6.0), depth(26.0)),
        }
    }
}

/// Cut a stock eye along a diagonal, deeper at the inner or outer corner.
/// The inner corner of the left eye is its right edge.
fn carve_corner(
    fb: &mut FrameBuffer,
    cx: i32,
    cy: i32,
    left_eye: bool,
    top: bool,
    inner: i32,
    outer: i32,
) {
    let (l, r) = if left_eye { (outer, inner) } else { (inner, outer) };
    if top {
        carve_top(fb, cx, cy, l, r);
    } else {
        carve_bottom(fb, cx, cy, l, r);
    }
}

impl Emotion for CarveSession {
    fn draw(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) -> bool {
        let now = ctx.now;
        match self.phase {
            SessionPhase::Idle => {
                self.eyes.wander(now, ctx.rng);
                self.eyes.update_blink(now, ctx.rng);
                self.draw_blinking(ctx.fb, self.eye_centers());
                if reached(now, self.deadline) || now.wrapping_sub(self.phase_start) >= self.idle_window {
                    self.phase = SessionPhase::Recenter;
                }
            }
            SessionPhase::Recenter => {
                self.eyes.recenter_step();
                self.eyes.update_blink(now, ctx.rng);
                self.draw_blinking(ctx.fb, self.eye_centers());
                if math::abs(self.eyes.offset_x) < RECENTER_DONE_PX && math::abs(self.eyes.offset_y) < RECENTER_DONE_PX {
                    self.eyes.set_offset(0.0, 0.0);
                    if reached(now, self.deadline) {
                        self.phase = SessionPhase::Done;
                        self.phase_start = now;
                    } else {
                        self.start_carve(ctx);
                    }
                }
            }
            SessionPhase::Carve => {
                self.eyes.wander(now, ctx.rng);
                let e = now.wrapping_sub(self.phase_start);
                let t = match CARVE_TIMELINE.locate(e) {
                    Some((0, p)) => ease_in_out(p),
                    Some((1, _)) => 1.0,
                    Some((_, p)) => 1.0 - ease_in_out(p),
                    None => 0.0,
                };
                self.draw_carve(ctx.fb, t);
                if e >= CARVE_TIMELINE.total() {
                    self.phase = SessionPhase::Return;
                    self.phase_start = now;
                }
            }
            SessionPhase::Return => {
                self.eyes.wander(now, ctx.rng);
                self.eyes.update_blink(now, ctx.rng);
                self.draw_blinking(ctx.fb, self.eye_centers());
                self.start_idle(ctx);
            }
            SessionPhase::Done => {
                self.eyes.set_offset(0.0, 0.0);
                self.eyes.update_blink(now, ctx.rng);
                self.draw_blinking(ctx.fb, (CENTER_X - EYE_DISTANCE, CENTER_X + EYE_DISTANCE, CENTER_Y));
            }
        }
        ctx.within_duration()
    }
}
