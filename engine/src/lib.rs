//! Emotion cycle engine for a 240x240 RGB565 animated face.
//!
//! This crate is platform-agnostic and shared between the desktop simulator
//! and any display backend that can accept a full RGB565 frame:
//!
//! - [`color_math`]: Packed 5/6/5 color helpers, hue wheel, blending
//! - [`framebuffer`]: Clipped 240x240 offscreen canvas (`DrawTarget`)
//! - [`easing`]: Smoothstep, quadratic/cubic easing, phase timelines
//! - [`particles`]: Bounded particle pools (fireworks, rain, fog, sparkles, glyphs)
//! - [`eyes`]: Eye geometry, wander, blink sub-machine and eye primitives
//! - [`emotions`]: The emotion variants and their per-play runtime state
//! - [`selector`]: Weighted random emotion selection
//! - [`scheduler`]: Top-level cycle state machine
//! - [`engine`]: Per-tick compositor and the display/timer collaborators
//! - [`takeover`]: Blocking motion macros (turn, speed up, brakes)
//! - [`fortune`]: Long-form text module driven during `FORTUNE_TELLER`
//! - [`log_buffer`]: Ring buffer of engine events
//!
//! # no_std Compatibility
//!
//! The crate is `no_std` outside of tests and never allocates. All pools,
//! strings and buffers have a fixed capacity.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]

#[macro_use]
pub mod log_buffer;

pub mod boot;
pub mod color_math;
pub mod colors;
pub mod config;
pub mod easing;
pub mod emotion_id;
pub mod emotions;
pub mod engine;
pub mod eyes;
pub mod fortune;
pub mod framebuffer;
pub mod math;
pub mod particles;
pub mod primitives;
pub mod rng;
pub mod scheduler;
pub mod selector;
pub mod styles;
pub mod takeover;
pub mod tint;

// Re-export commonly used items
pub use config::EngineConfig;
pub use emotion_id::{EMOTION_COUNT, EmotionId};
pub use engine::{Clock, Delay, Engine, Present};
pub use framebuffer::FrameBuffer;
pub use rng::Rng;
pub use scheduler::CycleState;
