//! Oscilloscope scene: waveforms scrolling down a black screen.

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use rand::{Rng, RngCore};

use super::Scene;
use crate::config::{SceneConfig, WaveConfig};
use crate::surface::MatrixSurface;
use crate::wave::WavePool;

pub struct AnalogScene {
    config: WaveConfig,
    waves: WavePool,
}

impl AnalogScene {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            config: config.wave,
            waves: WavePool::new(),
        }
    }

    pub fn waves(&self) -> &WavePool {
        &self.waves
    }

    pub fn waves_mut(&mut self) -> &mut WavePool {
        &mut self.waves
    }
}

impl Scene for AnalogScene {
    /// Frame sequence:
    ///
    /// 1. Fill black.
    /// 2. Draw, advance and retire each wave in slot order.
    /// 3. Top up to the configured minimum, then roll for one extra wave
    ///    while below the maximum.
    /// 4. Present.
    fn render_frame<S, R>(&mut self, surface: &mut S, rng: &mut R) -> Result<(), S::Error>
    where
        S: MatrixSurface,
        R: RngCore,
    {
        surface.clear(Rgb565::BLACK)?;
        let size = surface.size();

        let mut active = self.waves.render_and_update(surface)?;

        // Skipped spawns still count, which bounds the loop.
        while active < self.config.min_active {
            self.waves.spawn(&self.config, size, rng);
            active += 1;
        }
        if active < self.config.max_active && rng.gen_range(0..self.config.spawn_chance.max(1)) == 0 {
            self.waves.spawn(&self.config, size, rng);
        }

        surface.present()
    }
}
