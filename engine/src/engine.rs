//! Per-tick compositor and the host collaborators it talks to.
//!
//! The host owns the display and the clock. Each tick the engine clears the
//! frame (unless the active emotion keeps its trails), lets the scheduler draw,
//! and presents the result (unless the active emotion presents by itself).

use crate::colors::BLACK;
use crate::config::{EngineConfig, FRAME_TIME_MS};
use crate::emotion_id::EmotionId;
use crate::eyes::EyeGeometry;
use crate::fortune::{FortuneTeller, TextModule};
use crate::framebuffer::FrameBuffer;
use crate::log_buffer::EventLog;
use crate::rng::Rng;
use crate::scheduler::{CycleState, Scheduler, Stage};
use crate::takeover::{MacroRunner, MotionMacro};
use crate::tint::IdleTint;

// =============================================================================
// Host Collaborators
// =============================================================================

/// Pushes a finished frame to the panel.
pub trait Present {
    fn present(
        &mut self,
        frame: &FrameBuffer,
    );
}

/// Monotonic millisecond clock. Wraps after ~49 days.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

/// Blocking delay.
pub trait Delay {
    fn delay_ms(
        &mut self,
        ms: u32,
    );
}

// =============================================================================
// Engine
// =============================================================================

pub struct Engine<T: TextModule = FortuneTeller> {
    fb: FrameBuffer,
    rng: Rng,
    eyes: EyeGeometry,
    tint: IdleTint,
    text: T,
    config: EngineConfig,
    log: EventLog,
    scheduler: Scheduler,
}

impl Engine<FortuneTeller> {
    /// Engine with the stock fortune module.
    pub fn new(
        seed: u64,
        config: EngineConfig,
    ) -> Self {
        Self::with_text(seed, config, FortuneTeller::new())
    }
}

impl<T: TextModule> Engine<T> {
    /// Engine with a custom text module.
    pub fn with_text(
        seed: u64,
        config: EngineConfig,
        text: T,
    ) -> Self {
        let mut rng = Rng::seeded(seed);
        let eyes = EyeGeometry::new(0, &mut rng);
        Self {
            fb: FrameBuffer::new(),
            rng,
            eyes,
            tint: IdleTint::new(),
            text,
            config,
            log: EventLog::new(),
            scheduler: Scheduler::new(),
        }
    }

    /// Clear, advance the scheduler, present.
    pub fn tick<P: Present>(
        &mut self,
        now: u32,
        display: &mut P,
    ) {
        if !self.scheduler.keeps_frame() {
            self.fb.fill(BLACK);
        }
        let mut stage = Stage {
            fb: &mut self.fb,
            rng: &mut self.rng,
            eyes: &mut self.eyes,
            tint: &mut self.tint,
            text: &mut self.text,
            display: &mut *display,
            config: &self.config,
            log: &mut self.log,
        };
        self.scheduler.advance(now, &mut stage);
        if !self.scheduler.owns_display() {
            display.present(&self.fb);
        }
    }

    /// One tick at the host clock's time, then wait out the frame.
    pub fn step<C, P>(
        &mut self,
        timer: &mut C,
        display: &mut P,
    ) where
        C: Clock + Delay,
        P: Present,
    {
        let now = timer.now_ms();
        self.tick(now, display);
        timer.delay_ms(FRAME_TIME_MS);
    }

    /// Return to a fresh idle window with centered eyes and a black frame.
    pub fn restart_cycle<P: Present>(
        &mut self,
        now: u32,
        display: &mut P,
    ) {
        let mut stage = Stage {
            fb: &mut self.fb,
            rng: &mut self.rng,
            eyes: &mut self.eyes,
            tint: &mut self.tint,
            text: &mut self.text,
            display: &mut *display,
            config: &self.config,
            log: &mut self.log,
        };
        self.scheduler.restart(now, &mut stage);
    }

    /// Run a motion macro to completion, then restart the cycle.
    ///
    /// Blocks for the whole choreography. Nothing else advances meanwhile.
    pub fn play_macro<C, P>(
        &mut self,
        kind: MotionMacro,
        timer: &mut C,
        display: &mut P,
    ) where
        C: Clock + Delay,
        P: Present,
    {
        let started = timer.now_ms();
        log_info!(self.log, started, "macro {}", kind.name());
        MacroRunner::new(&mut self.fb, timer, display).run(kind);
        let now = timer.now_ms();
        log_debug!(self.log, now, "macro {} took {} ms", kind.name(), now.wrapping_sub(started));
        self.restart_cycle(now, display);
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub fn frame(&self) -> &FrameBuffer { &self.fb }

    #[inline]
    pub fn state(&self) -> CycleState { self.scheduler.state() }

    #[inline]
    pub fn current_emotion(&self) -> Option<EmotionId> { self.scheduler.current_emotion() }

    #[inline]
    pub fn config(&self) -> &EngineConfig { &self.config }

    /// Mutable configuration. Changes apply from the next pick.
    #[inline]
    pub fn config_mut(&mut self) -> &mut EngineConfig { &mut self.config }

    /// Event log, for hosts to drain.
    #[inline]
    pub fn log_mut(&mut self) -> &mut EventLog { &mut self.log }

    #[inline]
    pub fn text(&self) -> &T { &self.text }
}

// =============================================================================
// Tests
// =============================================================================
