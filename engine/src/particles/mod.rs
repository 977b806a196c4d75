//! Bounded particle pools.
//!
//! Every effect keeps its entries in a fixed array of slots. Spawning scans
//! for a free slot and silently does nothing when the pool is full, so the
//! live count can never exceed the capacity.
//!
//! - [`fireworks`]: Radial bursts with gravity and a global fade
//! - [`rain`]: Falling streaks that wrap to the top
//! - [`fog`]: Translucent orbs circling the face center
//! - [`sparkles`]: Fixed twinkling stars
//! - [`glyphs`]: Rising, fading sleep glyphs
//! - [`dot_field`]: Rejection-sampled dot cloud

pub mod dot_field;
pub mod fireworks;
pub mod fog;
pub mod glyphs;
pub mod rain;
pub mod sparkles;

// =============================================================================
// Pool
// =============================================================================

/// Fixed-capacity slot array. `None` marks a dead slot.
#[derive(Clone, Debug)]
pub struct Pool<T, const N: usize> {
    slots: [Option<T>; N],
}

impl<T, const N: usize> Pool<T, N> {
    /// Empty pool.
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
        }
    }

    /// Maximum number of live entries.
    #[inline]
    pub const fn capacity(&self) -> usize { N }

    /// Place `entry` in the first dead slot. Returns `false` (and drops the
    /// entry) when every slot is live.
    pub fn spawn(
        &mut self,
        entry: T,
    ) -> bool {
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(entry);
                true
            }
            None => false,
        }
    }

    /// Step every live entry; entries for which `step` returns `false` die.
    pub fn step<F>(
        &mut self,
        mut step: F,
    ) where
        F: FnMut(&mut T) -> bool,
    {
        for slot in &mut self.slots {
            let keep = match slot {
                Some(entry) => step(entry),
                None => true,
            };
            if !keep {
                *slot = None;
            }
        }
    }

    /// Live entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &T> { self.slots.iter().flatten() }

    /// Live entries in slot order, mutable.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> { self.slots.iter_mut().flatten() }

    /// Live entries with their slot index.
    pub fn enumerate(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|e| (i, e)))
    }

    /// Number of live entries.
    pub fn live_count(&self) -> usize { self.slots.iter().filter(|s| s.is_some()).count() }

    /// Whether no entry is alive.
    pub fn is_empty(&self) -> bool { self.slots.iter().all(Option::is_none) }

    /// Kill every entry.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }
}

impl<T, const N: usize> Default for Pool<T, N> {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Particle
// =============================================================================

/// Point mass with a color and a remaining life.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub color: embedded_graphics::pixelcolor::Rgb565,
    pub life: u16,
}

impl Particle {
    /// Apply `gravity` to the vertical velocity, then move one tick.
    #[inline]
    pub fn integrate(
        &mut self,
        gravity: f32,
    ) {
        self.vy += gravity;
        self.x += self.vx;
        self.y += self.vy;
    }

    /// Burn `amount` of life. Returns whether the particle is still alive.
    #[inline]
    pub fn age(
        &mut self,
        amount: u16,
    ) -> bool {
        self.life = self.life.saturating_sub(amount);
        self.life > 0
    }
}

// =============================================================================
// Tests
// =============================================================================
