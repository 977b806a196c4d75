//! Top-level cycle state machine.
//!
//! ```text
//!  Booting ──► NormalIdle ──► NormalRecenter ──► PlayEmotion ──► ReturnToNormal
//!                  ▲                                                   │
//!                  └───────────────────────────────────────────────────┘
//! ```
//!
//! - `Booting` plays the boot intro once, then enters `NormalIdle`.
//! - `NormalIdle` draws the tint and the wandering, blinking eyes for a
//!   random 3-8 s window.
//! - `NormalRecenter` eases the eyes back to the center, then picks the next
//!   emotion and creates a fresh runtime for it.
//! - `PlayEmotion` draws the runtime until it reports inactive, then tears
//!   it down.
//! - `ReturnToNormal` nudges the eyes by one pixel, draws a single idle frame
//!   and re-arms `NormalIdle`.

use crate::colors::BLACK;
use crate::config::{EngineConfig, IDLE_WINDOW_MAX_MS, IDLE_WINDOW_MIN_MS};
use crate::emotion_id::EmotionId;
use crate::emotions::{EmotionRuntime, FrameContext};
use crate::engine::Present;
use crate::eyes::{EyeGeometry, draw_blinking_eyes};
use crate::fortune::TextModule;
use crate::framebuffer::FrameBuffer;
use crate::log_buffer::EventLog;
use crate::rng::Rng;
use crate::selector;
use crate::tint::IdleTint;

/// Scheduler state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleState {
    Booting,
    NormalIdle,
    NormalRecenter,
    PlayEmotion,
    ReturnToNormal,
}

impl CycleState {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Booting => "booting",
            Self::NormalIdle => "idle",
            Self::NormalRecenter => "recenter",
            Self::PlayEmotion => "play",
            Self::ReturnToNormal => "return",
        }
    }
}

/// Everything the scheduler borrows from the engine for one tick.
pub struct Stage<'a> {
    pub fb: &'a mut FrameBuffer,
    pub rng: &'a mut Rng,
    pub eyes: &'a mut EyeGeometry,
    pub tint: &'a mut IdleTint,
    pub text: &'a mut dyn TextModule,
    pub display: &'a mut dyn Present,
    pub config: &'a EngineConfig,
    pub log: &'a mut EventLog,
}

impl Stage<'_> {
    fn frame(
        &mut self,
        now: u32,
        started_at: u32,
        duration_ms: u32,
    ) -> FrameContext<'_> {
        FrameContext {
            fb: &mut *self.fb,
            rng: &mut *self.rng,
            eyes: &mut *self.eyes,
            tint: &mut *self.tint,
            text: &mut *self.text,
            display: &mut *self.display,
            now,
            started_at,
            duration_ms,
        }
    }
}

pub struct Scheduler {
    state: CycleState,
    current: Option<EmotionRuntime>,
    phase_start: u32,
    idle_window: u32,
    play_started_at: u32,
}

impl Scheduler {
    /// Scheduler waiting to play the boot intro on its first tick.
    pub const fn new() -> Self {
        Self {
            state: CycleState::Booting,
            current: None,
            phase_start: 0,
            idle_window: IDLE_WINDOW_MIN_MS,
            play_started_at: 0,
        }
    }

    #[inline]
    pub const fn state(&self) -> CycleState { self.state }

    /// Emotion currently playing, including the boot intro.
    pub fn current_emotion(&self) -> Option<EmotionId> { self.current.as_ref().map(EmotionRuntime::id) }

    /// Runtime of the active play, if any.
    pub fn runtime(&self) -> Option<&EmotionRuntime> { self.current.as_ref() }

    /// When the active play started.
    #[inline]
    pub const fn play_started_at(&self) -> u32 { self.play_started_at }

    /// Length of the current idle window.
    #[inline]
    pub const fn idle_window(&self) -> u32 { self.idle_window }

    /// Whether the compositor must keep last frame's pixels.
    pub fn keeps_frame(&self) -> bool { self.state == CycleState::PlayEmotion && self.current.as_ref().is_some_and(EmotionRuntime::keeps_frame) }

    /// Whether the active emotion presents frames itself.
    pub fn owns_display(&self) -> bool { self.state == CycleState::PlayEmotion && self.current.as_ref().is_some_and(EmotionRuntime::owns_display) }

    /// Enter `NormalIdle` with an explicit window.
    pub fn arm_idle(
        &mut self,
        now: u32,
        window_ms: u32,
    ) {
        self.state = CycleState::NormalIdle;
        self.phase_start = now;
        self.idle_window = window_ms;
    }

    fn start_idle(
        &mut self,
        now: u32,
        stage: &mut Stage<'_>,
    ) {
        let window = stage.rng.range(IDLE_WINDOW_MIN_MS as i32, IDLE_WINDOW_MAX_MS as i32 + 1) as u32;
        self.arm_idle(now, window);
        log_debug!(stage.log, now, "idle for {} ms", window);
    }

    /// Drop any active play, recenter the eyes, clear the frame and start a
    /// fresh idle window.
    pub fn restart(
        &mut self,
        now: u32,
        stage: &mut Stage<'_>,
    ) {
        if let Some(mut runtime) = self.current.take() {
            runtime.exit(&mut stage.frame(now, self.play_started_at, 0));
        }
        stage.eyes.recenter(now);
        stage.fb.fill(BLACK);
        log_info!(stage.log, now, "cycle restart");
        self.start_idle(now, stage);
    }

    /// Advance one tick and draw into the stage's frame buffer.
    pub fn advance(
        &mut self,
        now: u32,
        stage: &mut Stage<'_>,
    ) {
        match self.state {
            CycleState::Booting => self.boot(now, stage),
            CycleState::NormalIdle => self.idle(now, stage),
            CycleState::NormalRecenter => self.recenter(now, stage),
            CycleState::PlayEmotion => self.play(now, stage),
            CycleState::ReturnToNormal => self.return_to_normal(now, stage),
        }
    }

    fn boot(
        &mut self,
        now: u32,
        stage: &mut Stage<'_>,
    ) {
        let duration = stage.config.duration(EmotionId::BootIntro);
        if self.current.is_none() {
            self.play_started_at = now;
            self.current = Some(EmotionRuntime::start(EmotionId::BootIntro, &mut stage.frame(now, now, duration)));
            log_info!(stage.log, now, "boot");
        }
        let alive = match self.current.as_mut() {
            Some(runtime) => runtime.draw(&mut stage.frame(now, self.play_started_at, duration)),
            None => false,
        };
        if !alive {
            self.current = None;
            log_info!(stage.log, now, "boot done");
            self.start_idle(now, stage);
        }
    }

    fn idle(
        &mut self,
        now: u32,
        stage: &mut Stage<'_>,
    ) {
        stage.tint.draw(stage.fb, now, stage.rng);
        stage.eyes.wander(now, stage.rng);
        stage.eyes.update_blink(now, stage.rng);
        stage.eyes.draw(stage.fb);

        if now.wrapping_sub(self.phase_start) >= self.idle_window {
            self.state = CycleState::NormalRecenter;
            self.phase_start = now;
            log_debug!(stage.log, now, "recenter");
        }
    }

    fn recenter(
        &mut self,
        now: u32,
        stage: &mut Stage<'_>,
    ) {
        stage.eyes.recenter_step();
        stage.tint.draw(stage.fb, now, stage.rng);
        let (cx, cy) = stage.eyes.center();
        draw_blinking_eyes(stage.fb, cx, cy, stage.eyes.blink_progress());

        if stage.eyes.is_centered() {
            let id = selector::pick(stage.config, stage.rng);
            let duration = stage.config.duration(id);
            self.play_started_at = now;
            self.current = Some(EmotionRuntime::start(id, &mut stage.frame(now, now, duration)));
            self.state = CycleState::PlayEmotion;
            log_info!(stage.log, now, "play {} ({} ms)", id.name(), duration);
        }
    }

    fn play(
        &mut self,
        now: u32,
        stage: &mut Stage<'_>,
    ) {
        let Some(runtime) = self.current.as_mut() else {
            self.state = CycleState::ReturnToNormal;
            return;
        };
        let id = runtime.id();
        let mut ctx = stage.frame(now, self.play_started_at, stage.config.duration(id));
        if !runtime.draw(&mut ctx) {
            runtime.exit(&mut ctx);
            self.current = None;
            self.state = CycleState::ReturnToNormal;
            log_info!(stage.log, now, "{} done after {} ms", id.name(), now.wrapping_sub(self.play_started_at));
        }
    }

    fn return_to_normal(
        &mut self,
        now: u32,
        stage: &mut Stage<'_>,
    ) {
        let jx = if stage.rng.coin() { 1.0 } else { -1.0 };
        let jy = if stage.rng.coin() { 1.0 } else { -1.0 };
        stage.eyes.set_offset(jx, jy);
        stage.tint.draw(stage.fb, now, stage.rng);
        stage.eyes.draw(stage.fb);
        self.start_idle(now, stage);
    }
}

impl Default for Scheduler {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boot::BOOT_TOTAL_MS;
    use crate::config::FRAME_TIME_MS;
    use crate::emotion_id::EMOTION_COUNT;
    use crate::emotions::testing::CountingDisplay;
    use crate::fortune::FortuneTeller;

    /// Owns everything a [`Stage`] borrows.
    struct Rig {
        fb: FrameBuffer,
        rng: Rng,
        eyes: EyeGeometry,
        tint: IdleTint,
        text: FortuneTeller,
        display: CountingDisplay,
        config: EngineConfig,
        log: EventLog,
        scheduler: Scheduler,
    }

    impl Rig {
        fn new(seed: u64) -> Self {
            let mut rng = Rng::seeded(seed);
            let eyes = EyeGeometry::new(0, &mut rng);
            Self {
                fb: FrameBuffer::new(),
                rng,
                eyes,
                tint: IdleTint::new(),
                text: FortuneTeller::new(),
                display: CountingDisplay::default(),
                config: EngineConfig::default(),
                log: EventLog::new(),
                scheduler: Scheduler::new(),
            }
        }

        fn only(
            seed: u64,
            id: EmotionId,
            duration_ms: u32,
        ) -> Self {
            let mut rig = Self::new(seed);
            rig.config.set_weights(&[0; EMOTION_COUNT]);
            rig.config.set_weight(id, 1);
            rig.config.set_duration(id, duration_ms);
            rig
        }

        fn tick(
            &mut self,
            now: u32,
        ) {
            let mut stage = Stage {
                fb: &mut self.fb,
                rng: &mut self.rng,
                eyes: &mut self.eyes,
                tint: &mut self.tint,
                text: &mut self.text,
                display: &mut self.display,
                config: &self.config,
                log: &mut self.log,
            };
            self.scheduler.advance(now, &mut stage);
        }

        /// Tick until `state` is reached. Returns the time of the tick that
        /// entered it.
        fn run_until(
            &mut self,
            mut now: u32,
            state: CycleState,
        ) -> u32 {
            loop {
                self.tick(now);
                if self.scheduler.state() == state {
                    return now;
                }
                now += FRAME_TIME_MS;
                assert!(now < 1_000_000, "never reached {state:?}");
            }
        }
    }

    // -------------------------------------------------------------------------
    // Boot
    // -------------------------------------------------------------------------

    #[test]
    fn test_boot_then_idle() {
        let mut rig = Rig::new(1);
        assert_eq!(rig.scheduler.state(), CycleState::Booting);
        rig.tick(0);
        assert_eq!(rig.scheduler.current_emotion(), Some(EmotionId::BootIntro));
        let t = rig.run_until(20, CycleState::NormalIdle);
        assert!(t >= BOOT_TOTAL_MS);
        assert_eq!(rig.scheduler.current_emotion(), None);
        assert!((IDLE_WINDOW_MIN_MS..=IDLE_WINDOW_MAX_MS).contains(&rig.scheduler.idle_window()));
    }

    // -------------------------------------------------------------------------
    // Idle and Recenter
    // -------------------------------------------------------------------------

    #[test]
    fn test_idle_window_then_bounded_recenter() {
        let mut rig = Rig::new(2);
        let t0 = 10_000;
        rig.scheduler.arm_idle(t0, 3000);
        rig.eyes.set_offset(10.0, 10.0);

        rig.tick(t0 + 2980);
        assert_eq!(rig.scheduler.state(), CycleState::NormalIdle);
        rig.tick(t0 + 3000);
        assert_eq!(rig.scheduler.state(), CycleState::NormalRecenter);

        let mut ticks = 0;
        let mut now = t0 + 3000;
        while rig.scheduler.state() == CycleState::NormalRecenter {
            now += FRAME_TIME_MS;
            rig.tick(now);
            ticks += 1;
            assert!(ticks <= 21, "recenter took too long");
        }
        assert_eq!(rig.scheduler.state(), CycleState::PlayEmotion);
        assert!(rig.eyes.is_centered());
        assert_eq!(rig.scheduler.play_started_at(), now);
        assert!(rig.scheduler.current_emotion().is_some_and(EmotionId::is_selectable));
    }

    // -------------------------------------------------------------------------
    // Ordering
    // -------------------------------------------------------------------------

    #[test]
    fn test_state_ordering() {
        let mut rig = Rig::new(3);
        for id in EmotionId::ALL {
            rig.config.set_duration(id, 600);
        }
        let mut prev = rig.scheduler.state();
        let mut plays = 0;
        let mut now = 0;
        while plays < 6 {
            rig.tick(now);
            let state = rig.scheduler.state();
            if state != prev {
                let ok = matches!(
                    (prev, state),
                    (CycleState::Booting, CycleState::NormalIdle)
                        | (CycleState::NormalIdle, CycleState::NormalRecenter)
                        | (CycleState::NormalRecenter, CycleState::PlayEmotion)
                        | (CycleState::PlayEmotion, CycleState::ReturnToNormal)
                        | (CycleState::ReturnToNormal, CycleState::NormalIdle)
                );
                assert!(ok, "{prev:?} -> {state:?}");
                if state == CycleState::PlayEmotion {
                    plays += 1;
                }
                prev = state;
            }
            now += FRAME_TIME_MS;
            assert!(now < 600_000);
        }
    }

    #[test]
    fn test_play_respects_configured_duration() {
        let mut rig = Rig::only(4, EmotionId::Love, 1000);
        rig.scheduler.arm_idle(0, 0);
        let start = rig.run_until(0, CycleState::PlayEmotion);
        let end = rig.run_until(start + FRAME_TIME_MS, CycleState::ReturnToNormal);
        assert_eq!(end - start, 1000 + FRAME_TIME_MS);
        rig.tick(end + FRAME_TIME_MS);
        assert_eq!(rig.scheduler.state(), CycleState::NormalIdle);
        assert!(rig.eyes.offset_x.abs() == 1.0 && rig.eyes.offset_y.abs() == 1.0);
    }

    // -------------------------------------------------------------------------
    // Runtime Lifecycle
    // -------------------------------------------------------------------------

    #[test]
    fn test_each_play_gets_fresh_runtime() {
        let mut rig = Rig::only(5, EmotionId::Deadpool, 1500);
        rig.scheduler.arm_idle(0, 0);

        let first = rig.run_until(0, CycleState::PlayEmotion);
        rig.run_until(first + FRAME_TIME_MS, CycleState::ReturnToNormal);
        rig.scheduler.arm_idle(first + 2000, 0);
        let second = rig.run_until(first + 2000, CycleState::PlayEmotion);

        assert!(second > first);
        assert_eq!(rig.scheduler.play_started_at(), second);
        match rig.scheduler.runtime() {
            Some(EmotionRuntime::Deadpool(face)) => assert!(face.dots().is_empty(), "dots from the first play leaked"),
            _ => panic!("expected a deadpool runtime"),
        }
    }

    #[test]
    fn test_fortune_owns_display_and_keeps_frame() {
        let mut rig = Rig::only(6, EmotionId::FortuneTeller, 2000);
        rig.scheduler.arm_idle(0, 0);
        let start = rig.run_until(0, CycleState::PlayEmotion);
        assert!(rig.scheduler.owns_display());
        assert!(rig.scheduler.keeps_frame());
        assert!(rig.text.is_active());
        rig.run_until(start + FRAME_TIME_MS, CycleState::ReturnToNormal);
        assert!(!rig.text.is_active());
        assert!(!rig.scheduler.owns_display());
    }

    #[test]
    fn test_restart_ends_active_play() {
        let mut rig = Rig::only(7, EmotionId::FortuneTeller, 8000);
        rig.scheduler.arm_idle(0, 0);
        let start = rig.run_until(0, CycleState::PlayEmotion);
        rig.eyes.set_offset(5.0, -3.0);

        let mut stage = Stage {
            fb: &mut rig.fb,
            rng: &mut rig.rng,
            eyes: &mut rig.eyes,
            tint: &mut rig.tint,
            text: &mut rig.text,
            display: &mut rig.display,
            config: &rig.config,
            log: &mut rig.log,
        };
        rig.scheduler.restart(start + 100, &mut stage);

        assert_eq!(rig.scheduler.state(), CycleState::NormalIdle);
        assert_eq!(rig.scheduler.current_emotion(), None);
        assert!(!rig.text.is_active());
        assert_eq!((rig.eyes.offset_x, rig.eyes.offset_y), (0.0, 0.0));
        assert_eq!(rig.fb.count_not(BLACK), 0);
        assert!(rig.log.iter().any(|e| e.message.as_str() == "cycle restart"));
    }

    #[test]
    fn test_logs_picks() {
        let mut rig = Rig::only(8, EmotionId::Cry, 500);
        rig.scheduler.arm_idle(0, 0);
        rig.run_until(0, CycleState::PlayEmotion);
        assert!(rig.log.iter().any(|e| e.message.as_str() == "play cry (500 ms)"));
    }
}
