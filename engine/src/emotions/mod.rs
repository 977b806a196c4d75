//! Emotion variants and their per-play runtime state.
//!
//! Every variant is a small state machine implementing [`Emotion`]. The
//! scheduler creates a fresh [`EmotionRuntime`] each time an emotion starts
//! playing and drops it when the play ends, so no variant carries state from
//! one play into the next.
//!
//! Each tick the scheduler hands the active variant a [`FrameContext`]: the
//! shared frame buffer, the random source, the eye geometry, the idle tint,
//! the text module, the display, and the play timing.

pub mod angry;
pub mod angry2;
pub mod banh_chung;
pub mod carve;
pub mod confuse;
pub mod cry;
pub mod cyclop;
pub mod deadpool;
pub mod doubt;
pub mod drunk;
pub mod fireworks;
pub mod fortune;
pub mod furious;
pub mod love;
pub mod normal;
pub mod sad;
pub mod shock;
pub mod sleepy;
pub mod smile;

use crate::boot::BootIntro;
use crate::emotion_id::EmotionId;
use crate::engine::Present;
use crate::eyes::EyeGeometry;
use crate::fortune::TextModule;
use crate::framebuffer::FrameBuffer;
use crate::rng::Rng;
use crate::tint::IdleTint;

// =============================================================================
// Frame Context
// =============================================================================

/// Everything a variant may touch during one tick.
pub struct FrameContext<'a> {
    pub fb: &'a mut FrameBuffer,
    pub rng: &'a mut Rng,
    pub eyes: &'a mut EyeGeometry,
    pub tint: &'a mut IdleTint,
    pub text: &'a mut dyn TextModule,
    pub display: &'a mut dyn Present,
    /// Current time.
    pub now: u32,
    /// When the current play started.
    pub started_at: u32,
    /// Configured nominal duration of the current play.
    pub duration_ms: u32,
}

impl FrameContext<'_> {
    /// Milliseconds since the play started.
    #[inline]
    pub fn elapsed(&self) -> u32 { self.now.wrapping_sub(self.started_at) }

    /// The generic liveness rule: still inside the configured duration.
    #[inline]
    pub fn within_duration(&self) -> bool { self.elapsed() <= self.duration_ms }
}

// =============================================================================
// Emotion Contract
// =============================================================================

/// One emotion variant.
pub trait Emotion {
    /// Paint one frame. Returns whether the emotion is still active.
    fn draw(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) -> bool;

    /// Release anything started by the variant. Called once when the play ends.
    fn exit(
        &mut self,
        _ctx: &mut FrameContext<'_>,
    ) {
    }

    /// Whether the previous frame must be kept instead of cleared.
    fn keeps_frame(&self) -> bool { false }

    /// Whether the variant presents frames itself.
    fn owns_display(&self) -> bool { false }
}

// =============================================================================
// Runtime Dispatch
// =============================================================================

macro_rules! runtimes {
    ($($id:ident => $ty:ty),* $(,)?) => {
        /// Per-play state of the active emotion, one variant per [`EmotionId`].
        #[allow(clippy::large_enum_variant)]
        pub enum EmotionRuntime {
            $($id($ty),)*
        }

        impl EmotionRuntime {
            /// Fresh runtime for `id`, initialized at `ctx.now`.
            pub fn start(
                id: EmotionId,
                ctx: &mut FrameContext<'_>,
            ) -> Self {
                match id {
                    $(EmotionId::$id => Self::$id(<$ty>::new(ctx)),)*
                }
            }

            /// Which emotion this runtime plays.
            pub fn id(&self) -> EmotionId {
                match self {
                    $(Self::$id(_) => EmotionId::$id,)*
                }
            }

            pub fn as_emotion(&self) -> &dyn Emotion {
                match self {
                    $(Self::$id(e) => e,)*
                }
            }

            pub fn as_emotion_mut(&mut self) -> &mut dyn Emotion {
                match self {
                    $(Self::$id(e) => e,)*
                }
            }
        }
    };
}

runtimes! {
    Normal => normal::NormalFace,
    Sad => sad::SadFace,
    Confuse => confuse::ConfuseFace,
    Love => love::LoveFace,
    Cyclop => cyclop::CyclopFace,
    Shock => shock::ShockFace,
    Drunk => drunk::DrunkFace,
    Furious => furious::FuriousFace,
    Angry => angry::AngryFace,
    Doubt => doubt::DoubtFace,
    Angry2 => angry2::Angry2Face,
    Smile => smile::SmileFace,
    BanhChung => banh_chung::BanhChungFace,
    Deadpool => deadpool::DeadpoolFace,
    FortuneTeller => fortune::FortuneFace,
    CarveSession => carve::CarveSession,
    Sleepy => sleepy::SleepyFace,
    Cry => cry::CryFace,
    Fireworks => fireworks::FireworksFace,
    BootIntro => BootIntro,
}

impl EmotionRuntime {
    /// Paint one frame of the active emotion.
    #[inline]
    pub fn draw(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) -> bool {
        self.as_emotion_mut().draw(ctx)
    }

    /// Tear down the active emotion.
    #[inline]
    pub fn exit(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) {
        self.as_emotion_mut().exit(ctx);
    }

    #[inline]
    pub fn keeps_frame(&self) -> bool { self.as_emotion().keeps_frame() }

    #[inline]
    pub fn owns_display(&self) -> bool { self.as_emotion().owns_display() }
}

// =============================================================================
// Test Harness
// =============================================================================

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::fortune::FortuneTeller;

    /// Presenter that counts frames.
    #[derive(Default)]
    pub struct CountingDisplay {
        pub frames: usize,
    }

    impl Present for CountingDisplay {
        fn present(
            &mut self,
            _frame: &FrameBuffer,
        ) {
            self.frames += 1;
        }
    }

    /// Owns every collaborator a [`FrameContext`] borrows.
    pub struct Harness {
        pub fb: FrameBuffer,
        pub rng: Rng,
        pub eyes: EyeGeometry,
        pub tint: IdleTint,
        pub text: FortuneTeller,
        pub display: CountingDisplay,
        pub duration_ms: u32,
    }

    impl Harness {
        pub fn new(seed: u64) -> Self {
            let mut rng = Rng::seeded(seed);
            let eyes = EyeGeometry::new(0, &mut rng);
            Self {
                fb: FrameBuffer::new(),
                rng,
                eyes,
                tint: IdleTint::new(),
                text: FortuneTeller::new(),
                display: CountingDisplay::default(),
                duration_ms: 8000,
            }
        }

        pub fn ctx(
            &mut self,
            now: u32,
            started_at: u32,
        ) -> FrameContext<'_> {
            FrameContext {
                fb: &mut self.fb,
                rng: &mut self.rng,
                eyes: &mut self.eyes,
                tint: &mut self.tint,
                text: &mut self.text,
                display: &mut self.display,
                now,
                started_at,
                duration_ms: self.duration_ms,
            }
        }

        /// Start `id` at `start`, then tick every 20 ms until it reports
        /// inactive or `limit_ms` passes. Returns the elapsed time at the
        /// last active frame and the runtime.
        pub fn play(
            &mut self,
            id: EmotionId,
            start: u32,
            limit_ms: u32,
        ) -> (u32, EmotionRuntime) {
            let mut runtime = EmotionRuntime::start(id, &mut self.ctx(start, start));
            let mut last_active = 0;
            let mut t = 0;
            while t <= limit_ms {
                if !runtime.draw(&mut self.ctx(start + t, start)) {
                    break;
                }
                last_active = t;
                t += crate::config::FRAME_TIME_MS;
            }
            (last_active, runtime)
        }
    }

    #[test]
    fn test_start_matches_id() {
        let mut h = Harness::new(1);
        for id in EmotionId::ALL {
            let runtime = EmotionRuntime::start(id, &mut h.ctx(0, 0));
            assert_eq!(runtime.id(), id);
        }
    }

    #[test]
    fn test_only_fireworks_and_fortune_keep_frame() {
        let mut h = Harness::new(2);
        for id in EmotionId::ALL {
            let runtime = EmotionRuntime::start(id, &mut h.ctx(0, 0));
            let keeps = matches!(id, EmotionId::Fireworks | EmotionId::FortuneTeller);
            assert_eq!(runtime.keeps_frame(), keeps, "{}", id.name());
            assert_eq!(runtime.owns_display(), id == EmotionId::FortuneTeller, "{}", id.name());
        }
    }

    #[test]
    fn test_every_variant_draws_within_bounds() {
        for id in EmotionId::ALL {
            let mut h = Harness::new(3);
            h.duration_ms = 2000;
            let mut runtime = EmotionRuntime::start(id, &mut h.ctx(100, 100));
            for tick in 0..60u32 {
                runtime.draw(&mut h.ctx(100 + tick * 20, 100));
            }
            runtime.exit(&mut h.ctx(1300, 100));
            assert!(h.eyes.blink_progress() >= 0.0 && h.eyes.blink_progress() <= 1.0);
        }
    }
}
