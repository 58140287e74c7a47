//! Expanding ring particles emitted by blinking eyes.

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use heapless::Vec;
use rand::RngCore;

use crate::config::RippleConfig;
use crate::surface::circle;

/// Fixed number of ripple slots.
pub const RIPPLE_SLOTS: usize = 12;

/// Rings are drawn in the background-erasure color so they carve through
/// whatever is underneath.
const RING_COLOR: Rgb565 = Rgb565::BLACK;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ripple {
    pub center: Point,
    pub radius: i32,
    /// Radius growth per frame.
    pub speed: i32,
    pub active: bool,
}

impl Ripple {
    const EMPTY: Ripple = Ripple {
        center: Point::zero(),
        radius: 0,
        speed: 0,
        active: false,
    };
}

/// Fixed-capacity pool of ripples addressed by slot index.
pub struct RipplePool {
    ripples: [Ripple; RIPPLE_SLOTS],
}

impl Default for RipplePool {
    fn default() -> Self {
        Self::new()
    }
}

impl RipplePool {
    pub const fn new() -> Self {
        Self {
            ripples: [Ripple::EMPTY; RIPPLE_SLOTS],
        }
    }

    /// Emit a burst of rings around `center`, each starting at `radius`.
    ///
    /// The burst size and per-ring speed come from `config`. When the pool
    /// runs out of free slots the burst is truncated. Returns the slots that
    /// were filled.
    pub fn spawn<R: RngCore>(
        &mut self,
        center: Point,
        radius: i32,
        config: &RippleConfig,
        rng: &mut R,
    ) -> Vec<usize, RIPPLE_SLOTS> {
        let mut filled = Vec::new();
        let count = config.count.pick(rng).max(0);

        for _ in 0..count {
            let Some(slot) = self.ripples.iter().position(|r| !r.active) else {
                break;
            };
            self.ripples[slot] = Ripple {
                center,
                radius,
                speed: config.speed.pick(rng),
                active: true,
            };
            // Cannot overflow: at most RIPPLE_SLOTS free slots exist.
            let _ = filled.push(slot);
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("ripple burst of {} at ({}, {})", filled.len(), center.x, center.y);

        filled
    }

    /// Grow every ring and release those larger than the surface.
    pub fn update(&mut self, size: Size) {
        let limit = size.width.max(size.height) as i32;
        for ripple in self.ripples.iter_mut().filter(|r| r.active) {
            ripple.radius += ripple.speed;
            if ripple.radius > limit {
                ripple.active = false;
            }
        }
    }

    /// Draw each ring twice (`radius` and `radius - 1`) for a thick edge.
    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        for ripple in self.ripples.iter().filter(|r| r.active) {
            let Point { x, y } = ripple.center;
            circle(target, x, y, ripple.radius, RING_COLOR)?;
            if ripple.radius > 0 {
                circle(target, x, y, ripple.radius - 1, RING_COLOR)?;
            }
        }
        Ok(())
    }

    pub fn active_count(&self) -> usize {
        self.ripples.iter().filter(|r| r.active).count()
    }

    pub fn get(&self, slot: usize) -> Option<&Ripple> {
        self.ripples.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ripple> {
        self.ripples.iter()
    }
}
