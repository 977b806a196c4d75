//! Blocking motion macros.
//!
//! A motion event takes the display over for a few seconds: the runner owns
//! the frame loop, draws plain rounded eyes, presents every frame and sleeps
//! 16 ms between frames. No other engine state advances until the macro ends
//! on the idle eye pair. Callers then restart the cycle.

use crate::colors::{BLACK, WHITE};
use crate::config::CENTER_Y;
use crate::engine::{Clock, Delay, Present};
use crate::framebuffer::FrameBuffer;
use crate::primitives::fill_round_rect_centered;

// =============================================================================
// Constants
// =============================================================================

/// Delay between macro frames.
pub const MACRO_FRAME_MS: u32 = 16;

/// Eye box side at rest.
pub const EYE_SIZE: i32 = 70;

/// Eye corner radius.
pub const EYE_RADIUS: i32 = 20;

/// Distance between eye centers at rest.
pub const EYE_SPACING: i32 = 100;

const CX: i32 = 120;
const LEFT_HOME: i32 = CX - EYE_SPACING / 2;
const RIGHT_HOME: i32 = CX + EYE_SPACING / 2;

const TURN_LEAD_STEP: i32 = 7;
const TURN_TRAIL_STEP: i32 = 5;
const TURN_MERGE_START: i32 = 5;
const TURN_MERGE_MAX: i32 = 20;
const TURN_MERGE_GAP: i32 = 2;
const TURN_RETURN_STEP: i32 = 5;
const TURN_LEFT_BOUND: i32 = EYE_SIZE / 2;
const TURN_RIGHT_BOUND: i32 = 240 - EYE_SIZE / 2;

const HOLD_MS: u32 = 300;
const SETTLE_MS: u32 = 300;

const SPEED_PEAK: i32 = 90;
const SPEED_GROW_MAX: f32 = 15.0;
const SPEED_GROW_ACCEL: f32 = 7.0;
const SPEED_SHRINK_MAX: f32 = 3.5;
const SPEED_SHRINK_ACCEL: f32 = 0.4;
const SPEED_HOLD_MS: u32 = 500;

const BRAKE_SIZE: f32 = 50.0;
const BRAKE_SPACING_OPEN: f32 = 90.0;
const BRAKE_SPACING_CLOSED: f32 = 60.0;
const BRAKE_V_MAX: f32 = 2.5;
const BRAKE_ACCEL: f32 = 0.25;
const BRAKE_HOLD_MS: u32 = 600;

// =============================================================================
// Macro Kinds
// =============================================================================

/// The four motion-triggered choreographies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionMacro {
    TurnLeft,
    TurnRight,
    SpeedUp,
    Brakes,
}

impl MotionMacro {
    pub const ALL: [Self; 4] = [Self::TurnLeft, Self::TurnRight, Self::SpeedUp, Self::Brakes];

    pub const fn name(self) -> &'static str {
        match self {
            Self::TurnLeft => "turn_left",
            Self::TurnRight => "turn_right",
            Self::SpeedUp => "speed_up",
            Self::Brakes => "brakes",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TurnPhase {
    Travel,
    Merge,
    Hold(u32),
    Return,
    Settle(u32),
}

/// Step `value` toward `target` by at most `step`.
fn approach(
    value: i32,
    target: i32,
    step: i32,
) -> i32 {
    if value < target { (value + step).min(target) } else { (value - step).max(target) }
}

// =============================================================================
// Runner
// =============================================================================

/// Drives one macro at a time on the shared frame buffer.
pub struct MacroRunner<'a, T, P> {
    fb: &'a mut FrameBuffer,
    timer: &'a mut T,
    display: &'a mut P,
}

impl<'a, T, P> MacroRunner<'a, T, P>
where
    T: Clock + Delay,
    P: Present,
{
    pub fn new(
        fb: &'a mut FrameBuffer,
        timer: &'a mut T,
        display: &'a mut P,
    ) -> Self {
        Self { fb, timer, display }
    }

    /// Run `kind` to completion.
    pub fn run(
        &mut self,
        kind: MotionMacro,
    ) {
        match kind {
            MotionMacro::TurnLeft => self.turn_left(),
            MotionMacro::TurnRight => self.turn_right(),
            MotionMacro::SpeedUp => self.speed_up(),
            MotionMacro::Brakes => self.brakes(),
        }
    }

    /// Both eyes slide left, the right eye catches up, then both return.
    pub fn turn_left(&mut self) { self.turn(true) }

    /// Mirror of [`Self::turn_left`].
    pub fn turn_right(&mut self) { self.turn(false) }

    /// Eyes widen fast, hold, then ease back.
    pub fn speed_up(&mut self) {
        let mut size = EYE_SIZE;
        let mut v = 0.0f32;
        let mut growing = true;
        loop {
            if growing {
                v = (v + SPEED_GROW_ACCEL).min(SPEED_GROW_MAX);
                size += v as i32;
                if size >= SPEED_PEAK {
                    size = SPEED_PEAK;
                    v = 0.0;
                    growing = false;
                    self.frame(LEFT_HOME, RIGHT_HOME, size);
                    self.hold(SPEED_HOLD_MS, LEFT_HOME, RIGHT_HOME, size);
                    continue;
                }
            } else {
                v = (v + SPEED_SHRINK_ACCEL).min(SPEED_SHRINK_MAX);
                size -= v as i32;
                if size <= EYE_SIZE {
                    size = EYE_SIZE;
                    self.frame(LEFT_HOME, RIGHT_HOME, size);
                    self.hold(SETTLE_MS, LEFT_HOME, RIGHT_HOME, size);
                    break;
                }
            }
            self.frame(LEFT_HOME, RIGHT_HOME, size);
        }
        self.show_idle();
    }

    /// Eyes shrink and close in, hold, then reopen.
    pub fn brakes(&mut self) {
        let mut size = EYE_SIZE as f32;
        let mut spacing = BRAKE_SPACING_OPEN;
        let mut size_v = 0.0f32;
        let mut spacing_v = 0.0f32;

        loop {
            size_v = (size_v + BRAKE_ACCEL).min(BRAKE_V_MAX);
            spacing_v = (spacing_v + BRAKE_ACCEL).min(BRAKE_V_MAX);
            size = (size - size_v).max(BRAKE_SIZE);
            spacing = (spacing - spacing_v).max(BRAKE_SPACING_CLOSED);
            self.brake_frame(size, spacing);
            if size <= BRAKE_SIZE && spacing <= BRAKE_SPACING_CLOSED {
                break;
            }
        }
        self.timed(BRAKE_HOLD_MS, |runner| runner.brake_frame(size, spacing));

        // Velocities carry over from closing.
        loop {
            size_v = (size_v + BRAKE_ACCEL).min(BRAKE_V_MAX);
            spacing_v = (spacing_v + BRAKE_ACCEL).min(BRAKE_V_MAX);
            size = (size + size_v).min(EYE_SIZE as f32);
            spacing = (spacing + spacing_v).min(BRAKE_SPACING_OPEN);
            self.brake_frame(size, spacing);
            if size >= EYE_SIZE as f32 && spacing >= BRAKE_SPACING_OPEN {
                break;
            }
        }
        self.timed(SETTLE_MS, |runner| runner.brake_frame(size, spacing));
        self.show_idle();
    }

    // -------------------------------------------------------------------------
    // Turn
    // -------------------------------------------------------------------------

    fn turn(
        &mut self,
        leftward: bool,
    ) {
        // Lead eye is the one on the side of the turn. Positions are
        // mirrored so both directions share one loop.
        let dir = if leftward { -1 } else { 1 };
        let (mut lead, mut trail) = if leftward { (LEFT_HOME, RIGHT_HOME) } else { (RIGHT_HOME, LEFT_HOME) };
        let (lead_home, trail_home) = (lead, trail);
        let mut merge_speed = TURN_MERGE_START;
        let mut phase = TurnPhase::Travel;

        loop {
            match phase {
                TurnPhase::Travel => {
                    let open = if leftward { lead > TURN_LEFT_BOUND } else { lead < TURN_RIGHT_BOUND };
                    if open {
                        lead += dir * TURN_LEAD_STEP;
                        trail += dir * TURN_TRAIL_STEP;
                    } else {
                        phase = TurnPhase::Merge;
                    }
                }
                TurnPhase::Merge => {
                    if (trail - lead) * -dir > TURN_MERGE_GAP {
                        merge_speed = ((merge_speed as f32 * 1.5) as i32).min(TURN_MERGE_MAX);
                        trail += dir * merge_speed;
                    } else {
                        phase = TurnPhase::Hold(self.timer.now_ms());
                    }
                }
                TurnPhase::Hold(since) => {
                    if self.timer.now_ms().wrapping_sub(since) >= HOLD_MS {
                        phase = TurnPhase::Return;
                    }
                }
                TurnPhase::Return => {
                    lead = approach(lead, lead_home, TURN_RETURN_STEP);
                    trail = approach(trail, trail_home, TURN_RETURN_STEP);
                    if lead == lead_home && trail == trail_home {
                        phase = TurnPhase::Settle(self.timer.now_ms());
                    }
                }
                TurnPhase::Settle(since) => {
                    if self.timer.now_ms().wrapping_sub(since) >= SETTLE_MS {
                        break;
                    }
                }
            }
            let (left, right) = if leftward { (lead, trail) } else { (trail, lead) };
            self.frame(left, right, EYE_SIZE);
        }
        self.show_idle();
    }

    // -------------------------------------------------------------------------
    // Frames
    // -------------------------------------------------------------------------

    /// Draw one square eye pair, present it and wait out the frame.
    fn frame(
        &mut self,
        left_x: i32,
        right_x: i32,
        size: i32,
    ) {
        self.fb.fill(BLACK);
        fill_round_rect_centered(self.fb, left_x, CENTER_Y, size, size, EYE_RADIUS, WHITE);
        fill_round_rect_centered(self.fb, right_x, CENTER_Y, size, size, EYE_RADIUS, WHITE);
        self.display.present(self.fb);
        self.timer.delay_ms(MACRO_FRAME_MS);
    }

    fn brake_frame(
        &mut self,
        size: f32,
        spacing: f32,
    ) {
        let half = (spacing / 2.0) as i32;
        self.frame(CX - half, CX + half, size as i32);
    }

    /// Repeat still frames for `ms`.
    fn hold(
        &mut self,
        ms: u32,
        left_x: i32,
        right_x: i32,
        size: i32,
    ) {
        self.timed(ms, |runner| runner.frame(left_x, right_x, size));
    }

    fn timed(
        &mut self,
        ms: u32,
        mut draw: impl FnMut(&mut Self),
    ) {
        let since = self.timer.now_ms();
        while self.timer.now_ms().wrapping_sub(since) < ms {
            draw(self);
        }
    }

    /// Final resting frame. Not followed by a delay.
    fn show_idle(&mut self) {
        self.fb.fill(BLACK);
        fill_round_rect_centered(self.fb, LEFT_HOME, CENTER_Y, EYE_SIZE, EYE_SIZE, EYE_RADIUS, WHITE);
        fill_round_rect_centered(self.fb, RIGHT_HOME, CENTER_Y, EYE_SIZE, EYE_SIZE, EYE_RADIUS, WHITE);
        self.display.present(self.fb);
    }
}

// =============================================================================
// Tests
// =============================================================================
