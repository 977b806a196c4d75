//! Eye geometry and the shared eye drawing helpers.
//!
//! [`EyeGeometry`] carries the wander offset and the blink sub-machine. It is
//! mutated by whichever component owns the frame: the idle path, or an
//! emotion that reuses the wandering eyes.
//!
//! The drawing helpers are free functions that take every coordinate
//! explicitly. Eye pairs are addressed by the face center; single eyes by
//! their own center.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::colors::{BLACK, WHITE};
use crate::config::{CENTER_X, CENTER_Y, EYE_CORNER, EYE_DISTANCE, EYE_HEIGHT, EYE_RADIUS, EYE_WIDTH, RECENTER_EASE, RECENTER_TOLERANCE};
use crate::easing::{clamp01, reached};
use crate::math;
use crate::primitives::{draw_line, fill_circle, fill_round_rect, fill_round_rect_centered, fill_triangle};
use crate::rng::Rng;

// =============================================================================
// Timing
// =============================================================================

/// Interval between new wander targets.
pub const WANDER_INTERVAL_MS: u32 = 1000;

/// Per-tick easing toward the wander target.
pub const WANDER_EASE: f32 = 0.1;

/// Wander target range, half-open (`-20..21`).
pub const WANDER_RANGE: (i32, i32) = (-20, 21);

/// Time to close (and to reopen) the lids.
pub const BLINK_TRANSITION_MS: u32 = 150;

/// Time the lids stay shut.
pub const BLINK_HOLD_MS: u32 = 100;

/// Gap before the next blink, half-open.
pub const BLINK_GAP_MS: (i32, i32) = (1000, 3000);

/// Thickness of the shut-eye line.
pub const BLINK_LINE_THICKNESS: i32 = 4;

// =============================================================================
// Blink Sub-machine
// =============================================================================

/// Lid state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlinkPhase {
    Idle,
    Closing,
    Closed,
    Opening,
}

/// Four-state blink: close over 150 ms, hold 100 ms, open over 150 ms,
/// rest 1-3 s.
#[derive(Clone, Debug)]
pub struct Blink {
    phase: BlinkPhase,
    phase_start: u32,
    next_blink_at: u32,
    progress: f32,
}

impl Blink {
    /// Open eyes with the first blink scheduled 1-3 s after `now`.
    pub fn new(
        now: u32,
        rng: &mut Rng,
    ) -> Self {
        Self {
            phase: BlinkPhase::Idle,
            phase_start: now,
            next_blink_at: now.wrapping_add(Self::gap(rng)),
            progress: 0.0,
        }
    }

    fn gap(rng: &mut Rng) -> u32 { rng.range(BLINK_GAP_MS.0, BLINK_GAP_MS.1) as u32 }

    /// Current phase.
    #[inline]
    pub const fn phase(&self) -> BlinkPhase { self.phase }

    /// Lid closure: 0 = open, 1 = shut. Always within `[0, 1]`.
    #[inline]
    pub const fn progress(&self) -> f32 { self.progress }

    /// Advance the sub-machine to `now`.
    pub fn update(
        &mut self,
        now: u32,
        rng: &mut Rng,
    ) {
        let in_phase = now.wrapping_sub(self.phase_start);
        match self.phase {
            BlinkPhase::Idle => {
                if reached(now, self.next_blink_at) {
                    self.phase = BlinkPhase::Closing;
                    self.phase_start = now;
                }
            }
            BlinkPhase::Closing => {
                self.progress = clamp01(in_phase as f32 / BLINK_TRANSITION_MS as f32);
                if self.progress >= 1.0 {
                    self.phase = BlinkPhase::Closed;
                    self.phase_start = now;
                }
            }
            BlinkPhase::Closed => {
                if in_phase > BLINK_HOLD_MS {
                    self.phase = BlinkPhase::Opening;
                    self.phase_start = now;
                }
            }
            BlinkPhase::Opening => {
                self.progress = clamp01(1.0 - in_phase as f32 / BLINK_TRANSITION_MS as f32);
                if self.progress <= 0.0 {
                    self.phase = BlinkPhase::Idle;
                    self.next_blink_at = now.wrapping_add(Self::gap(rng));
                }
            }
        }
    }
}

// =============================================================================
// Eye Geometry
// =============================================================================

/// Wander offset, wander target and blink state of the eye pair.
#[derive(Clone, Debug)]
pub struct EyeGeometry {
    pub offset_x: f32,
    pub offset_y: f32,
    target_x: f32,
    target_y: f32,
    last_move: u32,
    blink: Blink,
}

impl EyeGeometry {
    /// Centered eyes, first wander target due one interval after `now`.
    pub fn new(
        now: u32,
        rng: &mut Rng,
    ) -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            target_x: 0.0,
            target_y: 0.0,
            last_move: now,
            blink: Blink::new(now, rng),
        }
    }

    /// Pick a new target every [`WANDER_INTERVAL_MS`] and ease toward it.
    pub fn wander(
        &mut self,
        now: u32,
        rng: &mut Rng,
    ) {
        if now.wrapping_sub(self.last_move) > WANDER_INTERVAL_MS {
            self.target_x = rng.range(WANDER_RANGE.0, WANDER_RANGE.1) as f32;
            self.target_y = rng.range(WANDER_RANGE.0, WANDER_RANGE.1) as f32;
            self.last_move = now;
        }
        self.offset_x += (self.target_x - self.offset_x) * WANDER_EASE;
        self.offset_y += (self.target_y - self.offset_y) * WANDER_EASE;
    }

    /// Advance the blink sub-machine.
    #[inline]
    pub fn update_blink(
        &mut self,
        now: u32,
        rng: &mut Rng,
    ) {
        self.blink.update(now, rng);
    }

    /// Ease the offset one step toward the center.
    pub fn recenter_step(&mut self) {
        self.offset_x -= self.offset_x * RECENTER_EASE;
        self.offset_y -= self.offset_y * RECENTER_EASE;
    }

    /// Whether both axes are inside the recenter tolerance.
    pub fn is_centered(&self) -> bool { math::abs(self.offset_x) < RECENTER_TOLERANCE && math::abs(self.offset_y) < RECENTER_TOLERANCE }

    /// Jump to an offset.
    pub fn set_offset(
        &mut self,
        x: f32,
        y: f32,
    ) {
        self.offset_x = x;
        self.offset_y = y;
    }

    /// Snap to the center and clear the wander target.
    pub fn recenter(
        &mut self,
        now: u32,
    ) {
        self.set_offset(0.0, 0.0);
        self.target_x = 0.0;
        self.target_y = 0.0;
        self.last_move = now;
    }

    /// Lid closure of the shared blink.
    #[inline]
    pub const fn blink_progress(&self) -> f32 { self.blink.progress() }

    /// Blink sub-machine, read-only.
    #[inline]
    pub const fn blink(&self) -> &Blink { &self.blink }

    /// Face center including the wander offset.
    pub fn center(&self) -> (f32, f32) { (CENTER_X as f32 + self.offset_x, CENTER_Y as f32 + self.offset_y) }

    /// Draw the idle eye pair at the current offset and blink.
    pub fn draw<D>(
        &self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let (cx, cy) = self.center();
        draw_blinking_eyes(display, cx, cy, self.blink_progress());
    }
}

// =============================================================================
// Eye Primitives
// =============================================================================

/// Idle rounded-rect eye pair whose height shrinks with `progress`.
///
/// Fully shut eyes become two thin blink lines.
pub fn draw_blinking_eyes<D>(
    display: &mut D,
    cx: f32,
    cy: f32,
    progress: f32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let left_x = (cx - EYE_DISTANCE as f32) as i32;
    let right_x = (cx + EYE_DISTANCE as f32) as i32;
    let height = EYE_HEIGHT as f32 * (1.0 - clamp01(progress));

    if height > 0.0 {
        let top = (cy - height / 2.0) as i32;
        let h = height as i32;
        fill_round_rect(display, left_x - EYE_WIDTH / 2, top, EYE_WIDTH, h, EYE_CORNER, WHITE);
        fill_round_rect(display, right_x - EYE_WIDTH / 2, top, EYE_WIDTH, h, EYE_CORNER, WHITE);
    } else {
        let y = cy as i32;
        blink_line(display, left_x, y, EYE_WIDTH / 2, BLINK_LINE_THICKNESS, WHITE);
        blink_line(display, right_x, y, EYE_WIDTH / 2, BLINK_LINE_THICKNESS, WHITE);
    }
}

/// Shut-eye line: a pill `2 * half_w` wide and `h` tall centered on `(x, y)`.
pub fn blink_line<D>(
    display: &mut D,
    x: i32,
    y: i32,
    half_w: i32,
    h: i32,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    fill_round_rect(display, x - half_w, y - h / 2, half_w * 2, h, h / 2, color);
}

/// Rounded eye box centered on `(cx, cy)`.
#[inline]
pub fn eye_box<D>(
    display: &mut D,
    cx: i32,
    cy: i32,
    w: i32,
    h: i32,
    r: i32,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    fill_round_rect_centered(display, cx, cy, w, h, r, color);
}

/// The stock 70x70 eye pair centered on the face at `(cx, cy)` with spacing `2 * distance`.
pub fn eye_pair<D>(
    display: &mut D,
    cx: i32,
    cy: i32,
    distance: i32,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    eye_box(display, cx - distance, cy, EYE_WIDTH, EYE_HEIGHT, EYE_CORNER, color);
    eye_box(display, cx + distance, cy, EYE_WIDTH, EYE_HEIGHT, EYE_CORNER, color);
}

/// Two white round eyes of radius `r`.
pub fn circle_eyes<D>(
    display: &mut D,
    left_x: i32,
    right_x: i32,
    y: i32,
    r: i32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    fill_circle(display, left_x, y, r, WHITE);
    fill_circle(display, right_x, y, r, WHITE);
}

/// Single round eye.
#[inline]
pub fn eye_circle<D>(
    display: &mut D,
    x: i32,
    y: i32,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    fill_circle(display, x, y, EYE_RADIUS, color);
}

/// Single flattened eye (70x42, corner 12).
#[inline]
pub fn eye_flat<D>(
    display: &mut D,
    x: i32,
    y: i32,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    fill_round_rect(display, x - 35, y - 21, 70, 42, 12, color);
}

/// Brow stroke geometry for [`brows_angled`].
#[derive(Clone, Copy, Debug)]
pub struct BrowStyle {
    /// Half the vertical rise of each stroke.
    pub extent: i32,
    /// Width of the eye the brow spans.
    pub eye_width: i32,
    /// How far the outer end starts inside the eye edge.
    pub inset: i32,
    /// Number of stacked one-pixel lines.
    pub thickness: i32,
}

/// Symmetric angled brows, slanting down toward the face center.
pub fn brows_angled<D>(
    display: &mut D,
    left_cx: i32,
    right_cx: i32,
    y: i32,
    style: BrowStyle,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let half = style.eye_width / 2;
    let (l_out, l_in) = (left_cx - half + style.inset, left_cx + half);
    let (r_out, r_in) = (right_cx + half - style.inset, right_cx - half);
    for t in 0..style.thickness {
        draw_line(display, Point::new(l_out, y - style.extent + t), Point::new(l_in, y + style.extent + t), color);
        draw_line(display, Point::new(r_out, y - style.extent + t), Point::new(r_in, y + style.extent + t), color);
    }
}

/// Erase everything above the diagonal from `(left, top + rise_left)` to
/// `(right, top + rise_right)` of a stock-sized eye centered on `(cx, cy)`.
pub fn carve_top<D>(
    display: &mut D,
    cx: i32,
    cy: i32,
    rise_left: i32,
    rise_right: i32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let x0 = cx - EYE_WIDTH / 2;
    let x1 = cx + EYE_WIDTH / 2;
    let y0 = cy - EYE_HEIGHT / 2;
    let far = y0 - 60;
    let (ya, yb) = (y0 + rise_left, y0 + rise_right);
    fill_triangle(display, Point::new(x0, ya), Point::new(x1, yb), Point::new(x0, far), BLACK);
    fill_triangle(display, Point::new(x1, yb), Point::new(x1, far), Point::new(x0, far), BLACK);
}

/// Mirror of [`carve_top`] that erases below a diagonal near the bottom edge.
pub fn carve_bottom<D>(
    display: &mut D,
    cx: i32,
    cy: i32,
    drop_left: i32,
    drop_right: i32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let x0 = cx - EYE_WIDTH / 2;
    let x1 = cx + EYE_WIDTH / 2;
    let y1 = cy + EYE_HEIGHT / 2;
    let far = y1 + 60;
    let (ya, yb) = (y1 - drop_left, y1 - drop_right);
    fill_triangle(display, Point::new(x0, ya), Point::new(x1, yb), Point::new(x0, far), BLACK);
    fill_triangle(display, Point::new(x1, yb), Point::new(x1, far), Point::new(x0, far), BLACK);
}

// =============================================================================
// Tests
// =============================================================================
