//! Interactive SDL window.
//!
//! Keys:
//! - `L` / `R`: turn left / right
//! - `A`: speed up
//! - `B`: brakes
//! - `N`: restart the cycle
//! - `Esc`: quit

use std::thread;
use std::time::Instant;

use emotion_engine::takeover::MotionMacro;
use emotion_engine::{Clock, Engine, FrameBuffer, Present};
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{SimulatorEvent, Window};
use tracing::{debug, info};

use crate::logging::LogForwarder;
use crate::presenter::{SimPresenter, output_settings};
use crate::timing::{FRAME_TIME, WallTimer};

/// Presenter that refreshes the window on every frame.
struct WindowPresenter {
    inner: SimPresenter,
    window: Window,
}

impl Present for WindowPresenter {
    fn present(
        &mut self,
        frame: &FrameBuffer,
    ) {
        self.inner.present(frame);
        self.window.update(self.inner.display());
    }
}

enum Command {
    Motion(MotionMacro),
    Restart,
    Quit,
}

fn command_for(keycode: Keycode) -> Option<Command> {
    match keycode {
        Keycode::L => Some(Command::Motion(MotionMacro::TurnLeft)),
        Keycode::R => Some(Command::Motion(MotionMacro::TurnRight)),
        Keycode::A => Some(Command::Motion(MotionMacro::SpeedUp)),
        Keycode::B => Some(Command::Motion(MotionMacro::Brakes)),
        Keycode::N => Some(Command::Restart),
        Keycode::Escape => Some(Command::Quit),
        _ => None,
    }
}

/// Run until the window closes.
pub fn run(
    engine: &mut Engine,
    scale: u32,
) {
    let settings = output_settings(scale);
    let mut presenter = WindowPresenter {
        inner: SimPresenter::new(),
        window: Window::new("Emotion Engine", &settings),
    };
    let mut timer = WallTimer::new();
    let mut forwarder = LogForwarder::new();

    // The window only exists after the first update.
    presenter.present(&FrameBuffer::new());
    info!("Window open (L/R/A/B macros, N restart, Esc quit)");

    loop {
        let frame_start = Instant::now();

        let mut pending = None;
        for ev in presenter.window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    if let Some(cmd) = command_for(keycode) {
                        pending = Some(cmd);
                    }
                }
                _ => {}
            }
        }

        match pending {
            Some(Command::Quit) => return,
            Some(Command::Motion(kind)) => engine.play_macro(kind, &mut timer, &mut presenter),
            Some(Command::Restart) => engine.restart_cycle(timer.now_ms(), &mut presenter),
            None => engine.tick(timer.now_ms(), &mut presenter),
        }
        forwarder.forward(engine.log_mut());

        let elapsed = frame_start.elapsed();
        if let Some(rest) = FRAME_TIME.checked_sub(elapsed) {
            thread::sleep(rest);
        } else {
            debug!(elapsed_ms = elapsed.as_millis() as u64, "Frame over budget");
        }
    }
}
