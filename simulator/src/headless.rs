//! Headless runs: a fixed number of frames on a virtual clock.

use std::path::PathBuf;

use anyhow::Result;
use emotion_engine::takeover::MotionMacro;
use emotion_engine::{Clock, Engine};
use tracing::info;

use crate::logging::LogForwarder;
use crate::presenter::SimPresenter;
use crate::timing::VirtualTimer;

/// What a headless run should do.
#[derive(Clone, Debug)]
pub struct HeadlessRun {
    pub frames: u32,
    /// Macro to play after the frames, followed by a cycle restart.
    pub motion: Option<MotionMacro>,
    pub snapshot: Option<PathBuf>,
    pub scale: u32,
}

/// Outcome of a headless run.
#[derive(Clone, Copy, Debug)]
pub struct RunSummary {
    pub presented: u64,
    pub end_ms: u32,
    pub events: usize,
}

pub fn run(
    engine: &mut Engine,
    plan: &HeadlessRun,
) -> Result<RunSummary> {
    let mut timer = VirtualTimer::default();
    let mut presenter = SimPresenter::new();
    let mut forwarder = LogForwarder::new();
    let mut events = 0;

    for _ in 0..plan.frames {
        engine.step(&mut timer, &mut presenter);
        events += forwarder.forward(engine.log_mut());
    }

    if let Some(kind) = plan.motion {
        engine.play_macro(kind, &mut timer, &mut presenter);
        events += forwarder.forward(engine.log_mut());
    }

    if let Some(path) = &plan.snapshot {
        presenter.save_png(path, plan.scale)?;
        info!(path = %path.display(), "Snapshot written");
    }

    let summary = RunSummary {
        presented: presenter.frames(),
        end_ms: timer.now_ms(),
        events,
    };
    info!(
        frames = plan.frames,
        presented = summary.presented,
        end_ms = summary.end_ms,
        events = summary.events,
        state = engine.state().name(),
        "Headless run finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use emotion_engine::{CycleState, EngineConfig};

    use super::*;

    fn plan(frames: u32) -> HeadlessRun {
        HeadlessRun {
            frames,
            motion: None,
            snapshot: None,
            scale: 1,
        }
    }

    #[test]
    fn test_runs_through_boot() {
        let mut engine = Engine::new(1, EngineConfig::default());
        let summary = run(&mut engine, &plan(300)).unwrap();
        assert_eq!(summary.end_ms, 300 * 20);
        assert_eq!(engine.state(), CycleState::NormalIdle);
        assert!(summary.events >= 2, "boot and boot done");
    }

    #[test]
    fn test_macro_then_idle() {
        let mut engine = Engine::new(2, EngineConfig::default());
        let mut p = plan(10);
        p.motion = Some(MotionMacro::TurnRight);
        let summary = run(&mut engine, &p).unwrap();
        assert!(summary.presented > 10);
        assert_eq!(engine.state(), CycleState::NormalIdle);
    }

    #[test]
    fn test_writes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let mut engine = Engine::new(3, EngineConfig::default());
        let mut p = plan(5);
        p.snapshot = Some(path.clone());
        p.scale = 2;
        run(&mut engine, &p).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
