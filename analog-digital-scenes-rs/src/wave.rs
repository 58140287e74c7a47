//! Waveform entity pool for the analog scene.
//!
//! Each [`Wave`] is a moving window over one [`Shape`]: rows between the
//! trailing edge (`leading_edge - length`) and the leading edge are drawn,
//! and the window slides down by `speed` rows per frame. Once the trailing
//! edge has passed the bottom of the surface the slot is released.

use core::f32::consts::PI;

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use rand::{Rng, RngCore};

use crate::config::WaveConfig;
use crate::surface::{color565, dimensions, hline, pixel};
use crate::waveform::Shape;

/// Fixed number of wave slots.
pub const WAVE_SLOTS: usize = 5;

/// Parameters for a new wave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParams {
    pub shape: Shape,
    /// Radians per screen height; must be positive.
    pub frequency: f32,
    /// Visible trace length in rows.
    pub length: i32,
    /// Rows advanced per frame.
    pub speed: i32,
    pub color: Rgb565,
}

impl WaveParams {
    /// Randomise every parameter from `config` for a surface of `size`.
    ///
    /// Frequency is an integer multiple of π, length spans from the
    /// configured minimum up to the surface height, and the color is drawn
    /// from the full 8-bit gamut before packing.
    pub fn random<R: RngCore>(config: &WaveConfig, size: Size, rng: &mut R) -> Self {
        let height = size.height as i32;
        let length = if height > config.min_length {
            rng.gen_range(config.min_length..height)
        } else {
            config.min_length
        };
        let shape = Shape::ALL[rng.gen_range(0..Shape::ALL.len())];

        Self {
            shape,
            frequency: config.frequency_multiples.pick(rng) as f32 * PI,
            length,
            speed: config.speed.pick(rng),
            color: color565(rng.gen(), rng.gen(), rng.gen()),
        }
    }
}

/// One scrolling waveform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    /// Row of the leading (lowest) edge.
    pub leading_edge: i32,
    pub length: i32,
    pub speed: i32,
    pub frequency: f32,
    pub color: Rgb565,
    pub shape: Shape,
    pub active: bool,
}

impl Wave {
    const EMPTY: Wave = Wave {
        leading_edge: 0,
        length: 0,
        speed: 0,
        frequency: 0.0,
        color: Rgb565::BLACK,
        shape: Shape::Sine,
        active: false,
    };

    /// A fresh wave with its leading edge on the top row.
    pub fn new(params: WaveParams) -> Self {
        Self {
            leading_edge: 0,
            length: params.length,
            speed: params.speed,
            frequency: params.frequency,
            color: params.color,
            shape: params.shape,
            active: true,
        }
    }

    /// Row of the trailing (highest) edge.
    pub fn trailing_edge(&self) -> i32 {
        self.leading_edge - self.length
    }

    /// Returns `true` once the whole trace is below a surface of `height`.
    pub fn is_past(&self, height: i32) -> bool {
        self.trailing_edge() > height
    }

    /// Advance the leading edge by one frame.
    pub fn update(&mut self) {
        self.leading_edge += self.speed;
    }

    /// Draw the visible part of the trace.
    ///
    /// Rows are clamped to the surface. Where the shape reports an edge
    /// between two consecutive rows, a full-width horizontal line is drawn on
    /// the first of them so the discontinuity reads like an oscilloscope
    /// trace instead of two disconnected dots.
    pub fn render<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565> + OriginDimensions,
    {
        let (width, height) = dimensions(target);
        let start = self.trailing_edge().max(0);
        let end = self.leading_edge.min(height);
        if start > end {
            return Ok(());
        }

        let sample = |y: i32| self.shape.sample(y, self.frequency, height as u32, width as u32);

        let mut x = sample(start);
        for y in start..=end {
            pixel(target, x, y, self.color)?;
            if y < end {
                let next = sample(y + 1);
                if self.shape.has_edge(x, next, width as u32) {
                    hline(target, 0, y, width, self.color)?;
                }
                x = next;
            }
        }
        Ok(())
    }
}

/// Fixed-capacity pool of waves addressed by slot index.
pub struct WavePool {
    waves: [Wave; WAVE_SLOTS],
}

impl Default for WavePool {
    fn default() -> Self {
        Self::new()
    }
}

impl WavePool {
    pub const fn new() -> Self {
        Self {
            waves: [Wave::EMPTY; WAVE_SLOTS],
        }
    }

    /// Spawn a randomised wave into the first free slot.
    ///
    /// Returns the slot index, or `None` if every slot is busy.
    pub fn spawn<R: RngCore>(&mut self, config: &WaveConfig, size: Size, rng: &mut R) -> Option<usize> {
        let slot = self.free_slot()?;
        let params = WaveParams::random(config, size, rng);
        self.waves[slot] = Wave::new(params);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "wave {} spawned: {} len={} speed={}",
            slot,
            params.shape,
            params.length,
            params.speed
        );

        Some(slot)
    }

    /// Place a wave with explicit parameters into the first free slot.
    pub fn spawn_with(&mut self, params: WaveParams) -> Option<usize> {
        let slot = self.free_slot()?;
        self.waves[slot] = Wave::new(params);
        Some(slot)
    }

    /// Draw, advance and retire every active wave in slot order.
    ///
    /// Returns the number of waves still active afterwards.
    pub fn render_and_update<D>(&mut self, target: &mut D) -> Result<usize, D::Error>
    where
        D: DrawTarget<Color = Rgb565> + OriginDimensions,
    {
        let (_, height) = dimensions(target);
        let mut active = 0;

        for (_slot, wave) in self.waves.iter_mut().enumerate() {
            if !wave.active {
                continue;
            }
            wave.render(target)?;
            wave.update();

            if wave.is_past(height) {
                wave.active = false;
                #[cfg(feature = "defmt")]
                defmt::trace!("wave {} retired", _slot);
            } else {
                active += 1;
            }
        }
        Ok(active)
    }

    pub fn active_count(&self) -> usize {
        self.waves.iter().filter(|w| w.active).count()
    }

    pub fn get(&self, slot: usize) -> Option<&Wave> {
        self.waves.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Wave> {
        self.waves.iter()
    }

    fn free_slot(&self) -> Option<usize> {
        self.waves.iter().position(|w| !w.active)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const W: usize = 64;
    const H: usize = 256;

    fn params(shape: Shape, frequency: f32) -> WaveParams {
        WaveParams {
            shape,
            frequency,
            length: H as i32,
            speed: 1,
            color: Rgb565::GREEN,
        }
    }

    fn full_rows(fb: &FrameBuffer<W, H>, color: Rgb565) -> usize {
        (0..H as i32)
            .filter(|&y| fb.row(y).map_or(false, |row| row.iter().all(|&p| p == color)))
            .count()
    }

    #[test]
    fn sawtooth_single_period_draws_one_connector() {
        let mut fb = FrameBuffer::<W, H>::new();
        let mut wave = Wave::new(params(Shape::Sawtooth, 2.0 * PI));
        wave.leading_edge = H as i32;

        wave.render(&mut fb).unwrap();

        assert_eq!(full_rows(&fb, Rgb565::GREEN), 1);
        // The connector sits where the ramp wraps, halfway down the screen.
        let row = (0..H as i32)
            .find(|&y| fb.row(y).unwrap().iter().all(|&p| p == Rgb565::GREEN))
            .unwrap();
        assert!((H as i32 / 2 - 1..=H as i32 / 2).contains(&row));
    }

    #[test]
    fn square_draws_connector_on_each_flip() {
        let mut fb = FrameBuffer::<W, H>::new();
        // Two full periods: flips near 1/4, 2/4 and 3/4 of the height. The
        // trace stops on the last visible row so the wrap back to the start
        // of the next period is not part of the window.
        let mut wave = Wave::new(params(Shape::Square, 4.0 * PI));
        wave.leading_edge = H as i32 - 1;

        wave.render(&mut fb).unwrap();

        assert_eq!(full_rows(&fb, Rgb565::GREEN), 3);
    }

    #[test]
    fn sine_draws_one_pixel_per_row() {
        let mut fb = FrameBuffer::<W, H>::new();
        let mut wave = Wave::new(params(Shape::Sine, 6.0 * PI));
        wave.leading_edge = 99;
        wave.length = 50;

        wave.render(&mut fb).unwrap();

        // Rows 49..=99 inclusive.
        assert_eq!(fb.count(Rgb565::GREEN), 51);
    }

    #[test]
    fn fresh_wave_draws_only_top_row() {
        let mut fb = FrameBuffer::<W, H>::new();
        let wave = Wave::new(params(Shape::Sine, 2.0 * PI));
        wave.render(&mut fb).unwrap();
        assert_eq!(fb.count(Rgb565::GREEN), 1);
    }

    #[test]
    fn update_advances_by_speed() {
        let mut wave = Wave::new(WaveParams {
            speed: 3,
            ..params(Shape::Sine, 2.0 * PI)
        });
        wave.update();
        wave.update();
        assert_eq!(wave.leading_edge, 6);
    }

    #[test]
    fn wave_retires_once_trailing_edge_passes_bottom() {
        let mut fb = FrameBuffer::<W, H>::new();
        let mut pool = WavePool::new();
        let slot = pool
            .spawn_with(WaveParams {
                length: 40,
                speed: 5,
                ..params(Shape::Triangle, 4.0 * PI)
            })
            .unwrap();

        let mut frames = 0;
        while pool.active_count() > 0 {
            pool.render_and_update(&mut fb).unwrap();
            frames += 1;
            assert!(frames < 1000);
        }

        let wave = pool.get(slot).unwrap();
        assert!(!wave.active);
        assert!(wave.trailing_edge() > H as i32);
        // (256 + 40) / 5 = 59.2, so the 60th advance crosses the bottom.
        assert_eq!(frames, 60);
    }

    #[test]
    fn spawn_fills_first_free_slot_and_stops_when_full() {
        let mut rng = SmallRng::seed_from_u64(1);
        let config = WaveConfig::default();
        let size = Size::new(W as u32, H as u32);
        let mut pool = WavePool::new();

        for expected in 0..WAVE_SLOTS {
            assert_eq!(pool.spawn(&config, size, &mut rng), Some(expected));
        }
        assert_eq!(pool.spawn(&config, size, &mut rng), None);
        assert_eq!(pool.active_count(), WAVE_SLOTS);
    }

    #[test]
    fn random_params_respect_config() {
        let mut rng = SmallRng::seed_from_u64(99);
        let config = WaveConfig::default();
        let size = Size::new(W as u32, H as u32);

        for _ in 0..500 {
            let p = WaveParams::random(&config, size, &mut rng);
            assert!((40..H as i32).contains(&p.length));
            assert!((1..6).contains(&p.speed));
            let multiple = p.frequency / PI;
            assert!(multiple >= 1.99 && multiple < 40.0);
        }
    }
}
