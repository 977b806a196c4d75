//! Fortune teller: hands the screen to the text module for the duration of
//! the play. Frames are presented only when the text changes.

use super::{Emotion, FrameContext};
use crate::fortune::TextStatus;

#[derive(Clone, Debug, Default)]
pub struct FortuneFace;

impl FortuneFace {
    pub fn new(ctx: &mut FrameContext<'_>) -> Self {
        ctx.text.begin(ctx.now, ctx.duration_ms, ctx.rng, ctx.fb);
        ctx.display.present(ctx.fb);
        Self
    }
}

impl Emotion for FortuneFace {
    fn draw(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) -> bool {
        match ctx.text.poll(ctx.now, ctx.rng, ctx.fb) {
            TextStatus::Redrawn => {
                ctx.display.present(ctx.fb);
                true
            }
            TextStatus::Unchanged => true,
            TextStatus::Finished => false,
        }
    }

    fn exit(
        &mut self,
        ctx: &mut FrameContext<'_>,
    ) {
        ctx.text.end();
    }

    fn keeps_frame(&self) -> bool { true }

    fn owns_display(&self) -> bool { true }
}
