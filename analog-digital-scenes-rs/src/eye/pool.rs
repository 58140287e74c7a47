//! Fixed-capacity eye pool with spaced placement.

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use rand::RngCore;

use super::{draw_eye, Eye, EyeParams};
use crate::config::{EyeConfig, RippleConfig, Span};
use crate::ripple::RipplePool;

/// Fixed number of eye slots.
pub const EYE_SLOTS: usize = 8;

pub struct EyePool {
    eyes: [Eye; EYE_SLOTS],
}

impl Default for EyePool {
    fn default() -> Self {
        Self::new()
    }
}

impl EyePool {
    pub const fn new() -> Self {
        Self {
            eyes: [Eye::EMPTY; EYE_SLOTS],
        }
    }

    /// Spawn a randomised eye into the first free slot.
    ///
    /// The center row is found by rejection sampling: up to
    /// `config.spawn_attempts` rows are drawn from
    /// `[half_height + edge_margin, height - half_height - edge_margin)` and
    /// the first one at least `config.min_spacing` away from every active
    /// eye wins. If none qualifies, or no slot is free, nothing is placed
    /// and `None` is returned.
    pub fn spawn<R: RngCore>(&mut self, config: &EyeConfig, size: Size, rng: &mut R) -> Option<usize> {
        let slot = self.free_slot()?;

        let (width, height) = (size.width as i32, size.height as i32);
        let half_height = config.half_height;
        let rows = Span::new(
            half_height + config.edge_margin,
            height - half_height - config.edge_margin,
        );

        let Some(y) = (0..config.spawn_attempts)
            .map(|_| rows.pick(rng))
            .find(|&y| self.is_clear(y, config.min_spacing))
        else {
            #[cfg(feature = "defmt")]
            defmt::debug!("eye spawn skipped: no row clear after {} attempts", config.spawn_attempts);
            return None;
        };

        let params = EyeParams {
            center: Point::new(width / 2, y),
            max_open: width / 2 - 2,
            half_height,
            blinks: config.blinks.pick(rng),
            first_gaze: config.first_gaze_frames.pick(rng),
        };
        self.eyes[slot] = Eye::spawn(params);

        #[cfg(feature = "defmt")]
        defmt::debug!("eye {} spawned at y={} blinks={}", slot, y, params.blinks);

        Some(slot)
    }

    /// Place an eye with explicit parameters into the first free slot.
    ///
    /// Spacing is not checked.
    pub fn place(&mut self, params: EyeParams) -> Option<usize> {
        let slot = self.free_slot()?;
        self.eyes[slot] = Eye::spawn(params);
        Some(slot)
    }

    /// Advance every active eye one frame, in slot order.
    ///
    /// Blinks are forwarded to `ripples` immediately. Returns the number of
    /// eyes still active afterwards.
    pub fn update<R: RngCore>(
        &mut self,
        config: &EyeConfig,
        ripple: &RippleConfig,
        ripples: &mut RipplePool,
        rng: &mut R,
    ) -> usize {
        let mut active = 0;
        for eye in self.eyes.iter_mut().filter(|e| e.is_active()) {
            if let Some(blink) = eye.update(config, rng) {
                ripples.spawn(blink.center, blink.radius, ripple, rng);
            }
            if eye.is_active() {
                active += 1;
            }
        }
        active
    }

    /// Draw every active eye.
    pub fn draw<D>(&self, target: &mut D, config: &EyeConfig) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        for eye in self.eyes.iter().filter(|e| e.is_active()) {
            draw_eye(eye, config, target)?;
        }
        Ok(())
    }

    pub fn active_count(&self) -> usize {
        self.eyes.iter().filter(|e| e.is_active()).count()
    }

    pub fn get(&self, slot: usize) -> Option<&Eye> {
        self.eyes.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Eye> {
        self.eyes.get_mut(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Eye> {
        self.eyes.iter()
    }

    /// Returns `true` if row `y` is at least `spacing` from every active eye.
    fn is_clear(&self, y: i32, spacing: i32) -> bool {
        self.eyes
            .iter()
            .filter(|e| e.is_active())
            .all(|e| (y - e.center.y).abs() >= spacing)
    }

    fn free_slot(&self) -> Option<usize> {
        self.eyes.iter().position(|e| !e.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eye::EyeState;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const SIZE: Size = Size::new(64, 256);

    fn params(y: i32) -> EyeParams {
        EyeParams {
            center: Point::new(32, y),
            max_open: 30,
            half_height: 25,
            blinks: 1,
            first_gaze: 20,
        }
    }

    #[test]
    fn spawned_eye_is_centered_and_closed() {
        let mut rng = SmallRng::seed_from_u64(31);
        let config = EyeConfig::default();
        let mut pool = EyePool::new();

        let slot = pool.spawn(&config, SIZE, &mut rng).unwrap();
        let eye = pool.get(slot).unwrap();
        assert_eq!(eye.state, EyeState::Opening);
        assert_eq!(eye.center.x, 32);
        assert!((27..229).contains(&eye.center.y));
        assert_eq!(eye.max_open, 30);
        assert_eq!(eye.open_amount, 0);
        assert!((1..=4).contains(&eye.blinks_remaining));
        assert!((20..60).contains(&eye.gaze.timer));
    }

    #[test]
    fn active_eyes_keep_minimum_spacing() {
        let mut rng = SmallRng::seed_from_u64(32);
        let config = EyeConfig::default();

        for _ in 0..100 {
            let mut pool = EyePool::new();
            for _ in 0..EYE_SLOTS {
                pool.spawn(&config, SIZE, &mut rng);
            }
            let rows: heapless::Vec<i32, EYE_SLOTS> = pool
                .iter()
                .filter(|e| e.is_active())
                .map(|e| e.center.y)
                .collect();
            for (i, a) in rows.iter().enumerate() {
                for b in &rows[i + 1..] {
                    assert!((a - b).abs() >= config.min_spacing);
                }
            }
        }
    }

    #[test]
    fn crowded_surface_skips_spawn() {
        let mut rng = SmallRng::seed_from_u64(33);
        let config = EyeConfig::default();
        // Rows 27..93 are all within 55 of an eye at 60.
        let size = Size::new(64, 120);
        let mut pool = EyePool::new();
        pool.place(params(60)).unwrap();

        for _ in 0..50 {
            assert_eq!(pool.spawn(&config, size, &mut rng), None);
        }
        assert_eq!(pool.active_count(), 1);
    }

    #[test]
    fn full_pool_rejects_spawn() {
        let mut rng = SmallRng::seed_from_u64(34);
        let mut pool = EyePool::new();
        for i in 0..EYE_SLOTS {
            assert_eq!(pool.place(params(i as i32)), Some(i));
        }
        assert_eq!(pool.place(params(0)), None);
        assert_eq!(pool.spawn(&EyeConfig::default(), SIZE, &mut rng), None);
    }

    #[test]
    fn blink_emits_ripples_at_half_height() {
        let mut rng = SmallRng::seed_from_u64(35);
        let config = EyeConfig::default();
        let ripple = RippleConfig::default();
        let mut ripples = RipplePool::new();
        let mut pool = EyePool::new();

        let slot = pool.place(params(100)).unwrap();
        {
            let eye = pool.get_mut(slot).unwrap();
            eye.state = EyeState::Open;
            eye.open_amount = eye.max_open;
            eye.timer = 1;
        }

        let active = pool.update(&config, &ripple, &mut ripples, &mut rng);
        assert_eq!(active, 1);
        assert_eq!(pool.get(slot).unwrap().state, EyeState::BlinkClosing);
        assert_eq!(pool.get(slot).unwrap().blinks_remaining, 0);

        let count = ripples.active_count();
        assert!((1..=3).contains(&count));
        for r in ripples.iter().filter(|r| r.active) {
            assert_eq!(r.radius, 25);
            assert_eq!(r.center, Point::new(32, 100));
        }
    }

    #[test]
    fn closing_eye_frees_slot_and_is_not_counted() {
        let mut rng = SmallRng::seed_from_u64(36);
        let config = EyeConfig::default();
        let mut ripples = RipplePool::new();
        let mut pool = EyePool::new();

        let slot = pool.place(params(100)).unwrap();
        {
            let eye = pool.get_mut(slot).unwrap();
            eye.state = EyeState::Closing;
            eye.open_amount = 2;
        }

        let active = pool.update(&config, &RippleConfig::default(), &mut ripples, &mut rng);
        assert_eq!(active, 0);
        assert_eq!(pool.active_count(), 0);
        assert_eq!(ripples.active_count(), 0);
    }
}
