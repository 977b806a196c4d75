//! Emotion engine simulator for desktop platforms.
//!
//! Runs the engine against the embedded-graphics-simulator crate, either in an
//! SDL window or headless on a virtual clock.
//!
//! # Usage
//!
//! ```bash
//! # Interactive window at 2x
//! simulator --scale 2
//!
//! # 1000 frames headless, then save the last frame
//! simulator --frames 1000 --snapshot face.png
//!
//! # Custom durations and weights
//! simulator --config emotions.toml --seed 7
//! ```

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod config;
mod headless;
mod logging;
mod presenter;
mod timing;
#[cfg(feature = "window")]
mod window;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use emotion_engine::Engine;
use emotion_engine::takeover::MotionMacro;
use tracing::info;

use crate::headless::HeadlessRun;

/// Emotion engine simulator
#[derive(Parser, Debug)]
#[command(name = "simulator")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Run headless for this many frames instead of opening a window
    #[arg(short = 'n', long, value_name = "N")]
    frames: Option<u32>,

    /// Random seed (defaults to the config file's, then to the clock)
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Write the last headless frame to this PNG
    #[arg(long, value_name = "PNG")]
    snapshot: Option<PathBuf>,

    /// Play a motion macro after the headless frames
    #[arg(long = "macro", value_enum, value_name = "KIND")]
    motion: Option<MacroArg>,

    /// Configuration file path
    #[arg(short = 'c', long, env = "EMOTION_SIM_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "EMOTION_SIM_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output scale for the window and snapshots
    #[arg(long, default_value_t = 2)]
    scale: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MacroArg {
    TurnLeft,
    TurnRight,
    SpeedUp,
    Brakes,
}

impl From<MacroArg> for MotionMacro {
    fn from(arg: MacroArg) -> Self {
        match arg {
            MacroArg::TurnLeft => Self::TurnLeft,
            MacroArg::TurnRight => Self::TurnRight,
            MacroArg::SpeedUp => Self::SpeedUp,
            MacroArg::Brakes => Self::Brakes,
        }
    }
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logging(&args.log_level);

    let sim_config = config::load_config_from_path(args.config.as_deref()).context("Failed to load configuration")?;
    let seed = args.seed.or(sim_config.seed).unwrap_or_else(clock_seed);
    info!(seed, "Starting emotion engine");

    let mut engine = Engine::new(seed, sim_config.engine);

    match args.frames {
        Some(frames) => {
            let plan = HeadlessRun {
                frames,
                motion: args.motion.map(MotionMacro::from),
                snapshot: args.snapshot,
                scale: args.scale,
            };
            headless::run(&mut engine, &plan)?;
        }
        None => run_window(&mut engine, &args)?,
    }
    Ok(())
}

#[cfg(feature = "window")]
fn run_window(
    engine: &mut Engine,
    args: &Args,
) -> Result<()> {
    if args.snapshot.is_some() || args.motion.is_some() {
        tracing::warn!("--snapshot and --macro only apply to headless runs (--frames)");
    }
    window::run(engine, args.scale);
    Ok(())
}

#[cfg(not(feature = "window"))]
fn run_window(
    _engine: &mut Engine,
    _args: &Args,
) -> Result<()> {
    anyhow::bail!("Built without the `window` feature; pass --frames to run headless")
}
