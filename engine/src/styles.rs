//! Pre-computed text styles and font references.
//!
//! Fonts are shared `&'static MonoFont` references; only the color varies at
//! runtime, so callers build `MonoTextStyle::new(FONT, color)` on the fly.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::text::{Alignment, Baseline, TextStyle, TextStyleBuilder};
use profont::{PROFONT_9_POINT, PROFONT_14_POINT, PROFONT_18_POINT};

use crate::colors::WHITE;

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Left-aligned text anchored at its top edge. Used for floating glyphs.
pub const TOP_LEFT: TextStyle = TextStyleBuilder::new().alignment(Alignment::Left).baseline(Baseline::Top).build();

/// Left-aligned text anchored at its vertical middle. Used for fortune lines.
pub const MIDDLE_LEFT: TextStyle = TextStyleBuilder::new().alignment(Alignment::Left).baseline(Baseline::Middle).build();

// =============================================================================
// Font References
// =============================================================================

/// Sleep glyph fonts, smallest to largest.
pub const GLYPH_FONTS: [&MonoFont; 3] = [&PROFONT_9_POINT, &PROFONT_14_POINT, &PROFONT_18_POINT];

/// Fortune body font.
pub const FORTUNE_FONT: &MonoFont = &PROFONT_9_POINT;

/// White fortune text.
pub const FORTUNE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_9_POINT, WHITE);

/// Glyph font for a size class in `1..=3`. Out-of-range sizes clamp.
pub fn glyph_font(size: u8) -> &'static MonoFont<'static> { GLYPH_FONTS[usize::from(size.clamp(1, 3) - 1)] }
