//! Color constants for the face.
//!
//! Standard colors come from the `RgbColor` trait. Custom colors are built
//! with [`crate::color_math::rgb`] from 8-bit channels so they read the same
//! way the artwork was tuned.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

use crate::color_math::rgb;

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black. Background of every non-tinted frame.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Default eye color.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red. Angry/furious target color and the masked hero mask.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green (0x07E0). Leaf-wrapped cake color.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure blue. Flat eye during confusion.
pub const BLUE: Rgb565 = Rgb565::BLUE;

/// Pure yellow. Cyclop background, confused round eye, sparkles.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

// =============================================================================
// Custom Colors
// =============================================================================

/// Heart eye pink.
pub const LOVE_PINK: Rgb565 = rgb(255, 0, 160);

/// Cheek glow core.
pub const CHEEK_INNER: Rgb565 = rgb(255, 60, 170);

/// Cheek glow rim.
pub const CHEEK_OUTER: Rgb565 = rgb(40, 0, 35);

/// Bamboo-string ribbon tied around the cake eyes (raw 0xB4A5).
pub const RIBBON: Rgb565 = Rgb565::new(22, 37, 5);

/// Tear stream under the left eye (raw 0xC618, light gray).
pub const TEAR_LIGHT: Rgb565 = Rgb565::new(24, 48, 24);

/// Tear stream under the right eye (raw 0xD67A, blue-gray).
pub const TEAR_BLUE: Rgb565 = Rgb565::new(26, 51, 26);

/// Starting gray of a rising sleep glyph.
pub const SLEEP_GLYPH: Rgb565 = rgb(220, 220, 220);

// =============================================================================
// Tests
// =============================================================================
