//! Translucent fog orbs circling the face center.

use embedded_graphics::pixelcolor::Rgb565;

use super::Pool;
use crate::color_math::rgb;
use crate::config::{CENTER_X, CENTER_Y};
use crate::framebuffer::FrameBuffer;
use crate::math;
use crate::primitives::translucent_circle;
use crate::rng::Rng;

/// Number of orbs.
pub const ORB_COUNT: usize = 25;

/// Orb opacity.
pub const ORB_ALPHA: u8 = 127;

/// Angular speed of the innermost orb, radians per tick.
const BASE_SPIN: f32 = 0.002;

/// Extra angular speed per orb index.
const SPIN_STEP: f32 = 0.0002;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orb {
    pub angle: f32,
    pub radius: f32,
    pub size: i32,
    pub color: Rgb565,
}

impl Orb {
    /// Screen position of the orb center.
    pub fn position(&self) -> (i32, i32) {
        (
            CENTER_X + (math::cos(self.angle) * self.radius) as i32,
            CENTER_Y + (math::sin(self.angle) * self.radius) as i32,
        )
    }
}

#[derive(Clone, Debug)]
pub struct Fog {
    orbs: Pool<Orb, ORB_COUNT>,
}

impl Fog {
    pub fn new(rng: &mut Rng) -> Self {
        let mut orbs = Pool::new();
        for _ in 0..ORB_COUNT {
            let channel = |rng: &mut Rng| rng.range(100, 255) as u8;
            orbs.spawn(Orb {
                angle: rng.range(0, 628) as f32 / 100.0,
                radius: rng.range(30, 100) as f32,
                size: rng.range(5, 21),
                color: rgb(channel(rng), channel(rng), channel(rng)),
            });
        }
        Self { orbs }
    }

    /// Advance every orb along its orbit and composite it over the frame.
    pub fn step(
        &mut self,
        fb: &mut FrameBuffer,
    ) {
        for (i, orb) in self.orbs.iter_mut().enumerate() {
            orb.angle += BASE_SPIN + i as f32 * SPIN_STEP;
            let (x, y) = orb.position();
            translucent_circle(fb, x, y, orb.size, orb.color, ORB_ALPHA);
        }
    }

    pub fn orbs(&self) -> impl Iterator<Item = &Orb> { self.orbs.iter() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbs_stay_within_orbit_radius() {
        let mut rng = Rng::seeded(12);
        let mut fog = Fog::new(&mut rng);
        let mut fb = FrameBuffer::new();
        for _ in 0..200 {
            fog.step(&mut fb);
        }
        assert_eq!(fog.orbs().count(), ORB_COUNT);
        for orb in fog.orbs() {
            let (x, y) = orb.position();
            assert!((x - CENTER_X).abs() <= 100 && (y - CENTER_Y).abs() <= 100);
            assert!((5..21).contains(&orb.size));
        }
    }
}
