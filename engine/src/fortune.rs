//! Long-form text module shown during `FORTUNE_TELLER`.
//!
//! The engine treats the module as a black box behind [`TextModule`]: it is
//! started once per play, polled every tick and ended when the play stops.
//! While it runs, the module owns the frame.
//!
//! [`FortuneTeller`] lays a fortune out on a 120x120 offscreen canvas, then
//! blits it to the frame with a nearest-neighbour upscale centered on the
//! screen. A new fortune replaces the current one every 5 s.

use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use heapless::{String, Vec};

use crate::colors::BLACK;
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::framebuffer::{Canvas, FrameBuffer};
use crate::rng::Rng;
use crate::styles::{FORTUNE_FONT, FORTUNE_STYLE, MIDDLE_LEFT};

// =============================================================================
// Text Module Contract
// =============================================================================

/// Result of one [`TextModule::poll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextStatus {
    /// The frame was redrawn and should be presented.
    Redrawn,
    /// Still running, frame untouched.
    Unchanged,
    /// The module has stopped.
    Finished,
}

/// Stateful text collaborator driven by the fortune emotion.
pub trait TextModule {
    /// Start a run of `duration_ms` and draw the first page into `fb`.
    /// A zero duration selects the module's own default.
    fn begin(
        &mut self,
        now: u32,
        duration_ms: u32,
        rng: &mut Rng,
        fb: &mut FrameBuffer,
    );

    /// Advance the module.
    fn poll(
        &mut self,
        now: u32,
        rng: &mut Rng,
        fb: &mut FrameBuffer,
    ) -> TextStatus;

    /// Stop the module. Idempotent.
    fn end(&mut self);

    /// Whether a run is in progress.
    fn is_active(&self) -> bool;
}

// =============================================================================
// Layout
// =============================================================================

/// Offscreen canvas edge.
pub const TEXT_CANVAS: usize = 120;

/// Run length when `begin` is given zero.
pub const DEFAULT_RUN_MS: u32 = 7999;

/// Interval between fortunes.
pub const SWITCH_INTERVAL_MS: u32 = 5000;

/// Preferred upscale factor.
pub const DESIRED_SCALE: f32 = 1.5;

/// Largest upscale factor.
pub const MAX_SCALE: f32 = 2.0;

const MARGIN_X: i32 = 4;
const MARGIN_Y: i32 = 2;
const LINE_HEIGHT: i32 = 15;
const WRAP_WIDTH: i32 = TEXT_CANVAS as i32 - MARGIN_X * 2;

const MAX_LINES: usize = 16;
const LINE_LEN: usize = 48;

type Line = String<LINE_LEN>;

/// Wrapped text plus the measurements the blitter needs.
#[derive(Clone, Debug, Default)]
pub struct WrappedLayout {
    pub lines: Vec<Line, MAX_LINES>,
    pub max_line_width: i32,
}

impl WrappedLayout {
    pub fn total_height(&self) -> i32 { self.lines.len() as i32 * LINE_HEIGHT }

    fn push(
        &mut self,
        line: &str,
    ) {
        let mut owned = Line::new();
        push_truncated(&mut owned, line);
        self.max_line_width = self.max_line_width.max(text_width(&owned));
        self.lines.push(owned).ok();
    }
}

/// Append as much of `text` as the line has room for.
fn push_truncated(
    line: &mut Line,
    text: &str,
) {
    for c in text.chars() {
        if line.push(c).is_err() {
            break;
        }
    }
}

/// Rendered width of `text` in the fortune font.
pub fn text_width(text: &str) -> i32 {
    let n = text.chars().count() as u32;
    if n == 0 {
        return 0;
    }
    (n * FORTUNE_FONT.character_size.width + (n - 1) * FORTUNE_FONT.character_spacing) as i32
}

/// Greedy word wrap. Paragraphs split on newlines, and on a literal `\n`
/// escape sequence in the source text.
pub fn wrap(
    text: &str,
    area_width: i32,
) -> WrappedLayout {
    let mut layout = WrappedLayout::default();
    for paragraph in text.split('\n').flat_map(|p| p.split("\\n")) {
        let mut line = Line::new();
        for word in paragraph.split(' ') {
            let mut candidate = line.clone();
            let fits = candidate.push_str(word).is_ok() && candidate.push(' ').is_ok();
            if (!fits || text_width(&candidate) > area_width) && !line.is_empty() {
                layout.push(&line);
                line.clear();
                push_truncated(&mut line, word);
                line.push(' ').ok();
            } else if fits {
                line = candidate;
            } else {
                // Longer than a whole line on its own.
                push_truncated(&mut line, word);
            }
        }
        if !line.is_empty() {
            layout.push(&line);
        }
    }
    layout
}

/// Upscale factor that fits the layout on screen: the desired factor,
/// lowered to fit, then clamped to `[1, MAX_SCALE]`.
pub fn fit_scale(layout: &WrappedLayout) -> f32 {
    let safe_w = SCREEN_WIDTH as f32 - 2.0;
    let safe_h = SCREEN_HEIGHT as f32 - 2.0;
    let mut scale = DESIRED_SCALE;
    if layout.max_line_width > 0 {
        scale = scale.min(safe_w / (layout.max_line_width + 2 * MARGIN_X) as f32);
    }
    let total = layout.total_height();
    if total > 0 {
        scale = scale.min(safe_h / (total + 2 * MARGIN_Y) as f32);
    }
    scale.clamp(1.0, MAX_SCALE)
}

type TextCanvas = Canvas<TEXT_CANVAS, TEXT_CANVAS>;

fn render(
    canvas: &mut TextCanvas,
    layout: &WrappedLayout,
) {
    canvas.fill(BLACK);
    let half = LINE_HEIGHT / 2;
    let start_y = ((TEXT_CANVAS as i32 - layout.total_height()) / 2 + half).max(MARGIN_Y + half);
    for (i, line) in layout.lines.iter().enumerate() {
        let x = ((TEXT_CANVAS as i32 - text_width(line)) / 2).max(MARGIN_X);
        let y = start_y + i as i32 * LINE_HEIGHT;
        Text::with_text_style(line, Point::new(x, y), FORTUNE_STYLE, MIDDLE_LEFT)
            .draw(canvas)
            .ok();
    }
}

/// Nearest-neighbour upscale of `canvas` centered on a black frame.
fn blit_scaled(
    canvas: &TextCanvas,
    fb: &mut FrameBuffer,
    scale: f32,
) {
    let scale = scale.clamp(1.0, MAX_SCALE);
    let dst = (TEXT_CANVAS as f32 * scale + 0.5) as i32;
    let x0 = (SCREEN_WIDTH as i32 - dst) / 2;
    let y0 = (SCREEN_HEIGHT as i32 - dst) / 2;
    let last = TEXT_CANVAS as i32 - 1;

    fb.fill(BLACK);
    for dy in 0..dst {
        let sy = ((dy as f32 / scale) as i32).min(last);
        for dx in 0..dst {
            let sx = ((dx as f32 / scale) as i32).min(last);
            if let Some(c) = canvas.get(sx, sy) {
                fb.set(x0 + dx, y0 + dy, c);
            }
        }
    }
}

// =============================================================================
// Fortune Teller
// =============================================================================

pub const FORTUNES: &[&str] = &[
    "A quiet road today leads to a loud laugh tomorrow.",
    "The thing you keep postponing takes ten minutes. Do it.",
    "Someone is about to ask for your advice.\\nGive it kindly.",
    "Luck favours the one who checks the tyre pressure.",
    "A small kindness returns to you before the week is out.",
    "Your next good idea arrives while you are making tea.",
    "Patience now saves a long detour later.",
    "An old friend is thinking of you. Send the message.",
    "The shortcut is not shorter.\nTake the scenic way.",
    "Good news travels slowly but it is on its way.",
    "Tidy one drawer and the rest of the house will notice.",
    "You will find what you lost in the last place you look.",
];

/// Random fortunes, rotated every [`SWITCH_INTERVAL_MS`].
pub struct FortuneTeller {
    canvas: TextCanvas,
    active: bool,
    started_at: u32,
    run_ms: u32,
    last_switch: u32,
    current: usize,
}

impl FortuneTeller {
    pub const fn new() -> Self {
        Self {
            canvas: Canvas::new(),
            active: false,
            started_at: 0,
            run_ms: DEFAULT_RUN_MS,
            last_switch: 0,
            current: 0,
        }
    }

    /// Index of the fortune on screen.
    pub fn current(&self) -> usize { self.current }

    fn show(
        &mut self,
        rng: &mut Rng,
        fb: &mut FrameBuffer,
    ) {
        self.current = rng.below(FORTUNES.len() as u32) as usize;
        let layout = wrap(FORTUNES[self.current], WRAP_WIDTH);
        render(&mut self.canvas, &layout);
        blit_scaled(&self.canvas, fb, fit_scale(&layout));
    }
}

impl Default for FortuneTeller {
    fn default() -> Self { Self::new() }
}

impl TextModule for FortuneTeller {
    fn begin(
        &mut self,
        now: u32,
        duration_ms: u32,
        rng: &mut Rng,
        fb: &mut FrameBuffer,
    ) {
        self.run_ms = if duration_ms == 0 { DEFAULT_RUN_MS } else { duration_ms };
        self.started_at = now;
        self.last_switch = now;
        self.active = true;
        self.show(rng, fb);
    }

    fn poll(
        &mut self,
        now: u32,
        rng: &mut Rng,
        fb: &mut FrameBuffer,
    ) -> TextStatus {
        if !self.active {
            return TextStatus::Finished;
        }
        let mut status = TextStatus::Unchanged;
        if now.wrapping_sub(self.last_switch) > SWITCH_INTERVAL_MS {
            self.last_switch = now;
            self.show(rng, fb);
            status = TextStatus::Redrawn;
        }
        if now.wrapping_sub(self.started_at) >= self.run_ms {
            self.end();
            return TextStatus::Finished;
        }
        status
    }

    fn end(&mut self) { self.active = false; }

    fn is_active(&self) -> bool { self.active }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------------

    #[test]
    fn test_wrap_respects_width() {
        for text in FORTUNES {
            let layout = wrap(text, WRAP_WIDTH);
            assert!(!layout.lines.is_empty());
            for line in &layout.lines {
                let single_word = !line.trim_end().contains(' ');
                assert!(text_width(line) <= WRAP_WIDTH || single_word, "{line:?} overflows");
            }
        }
    }

    #[test]
    fn test_wrap_splits_paragraphs() {
        let layout = wrap("one\\ntwo\nthree", WRAP_WIDTH);
        let lines: std::vec::Vec<&str> = layout.lines.iter().map(|l| l.trim_end()).collect();
        assert_eq!(lines, ["one", "two", "three"]);
    }

    #[test]
    fn test_wrap_truncates_oversized_word() {
        let long = "x".repeat(LINE_LEN + 12);

        let alone = wrap(&long, WRAP_WIDTH);
        assert_eq!(alone.lines.len(), 1);
        assert_eq!(alone.lines[0].as_str(), &long[..LINE_LEN]);

        let after = wrap(&std::format!("ab {long} cd"), WRAP_WIDTH);
        let lines: std::vec::Vec<&str> = after.lines.iter().map(|l| l.trim_end()).collect();
        assert_eq!(lines, ["ab", &long[..LINE_LEN], "cd"]);
    }

    #[test]
    fn test_fit_scale_bounds() {
        let short = wrap("Hi", WRAP_WIDTH);
        assert_eq!(fit_scale(&short), DESIRED_SCALE);
        let empty = WrappedLayout::default();
        assert_eq!(fit_scale(&empty), DESIRED_SCALE);
        let mut tall = WrappedLayout::default();
        for _ in 0..MAX_LINES {
            tall.push("line");
        }
        assert_eq!(fit_scale(&tall), 1.0, "never shrinks below 1");
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    #[test]
    fn test_run_draws_switches_and_finishes() {
        let mut rng = Rng::seeded(14);
        let mut fb = FrameBuffer::new();
        let mut teller = FortuneTeller::new();
        teller.begin(1000, 8000, &mut rng, &mut fb);
        assert!(teller.is_active());
        assert!(fb.count_not(BLACK) > 0, "first fortune drawn on begin");

        assert_eq!(teller.poll(1020, &mut rng, &mut fb), TextStatus::Unchanged);
        assert_eq!(teller.poll(6001, &mut rng, &mut fb), TextStatus::Redrawn);
        assert_eq!(teller.poll(8999, &mut rng, &mut fb), TextStatus::Unchanged);
        assert_eq!(teller.poll(9000, &mut rng, &mut fb), TextStatus::Finished);
        assert!(!teller.is_active());
        assert_eq!(teller.poll(9100, &mut rng, &mut fb), TextStatus::Finished);
    }

    #[test]
    fn test_zero_duration_uses_default() {
        let mut rng = Rng::seeded(2);
        let mut fb = FrameBuffer::new();
        let mut teller = FortuneTeller::new();
        teller.begin(0, 0, &mut rng, &mut fb);
        assert_ne!(teller.poll(DEFAULT_RUN_MS - 1, &mut rng, &mut fb), TextStatus::Finished);
        assert_eq!(teller.poll(DEFAULT_RUN_MS, &mut rng, &mut fb), TextStatus::Finished);
    }
}
