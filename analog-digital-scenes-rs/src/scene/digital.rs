//! Digital scene: digit rain and blinking eyes over a breathing red field.

use embedded_graphics::prelude::*;
use rand::{Rng, RngCore};

use super::Scene;
use crate::background::Background;
use crate::config::{EyeConfig, RippleConfig, SceneConfig};
use crate::digit_rain::DigitRain;
use crate::eye::EyePool;
use crate::ripple::RipplePool;
use crate::surface::MatrixSurface;

pub struct DigitalScene {
    eye_config: EyeConfig,
    ripple_config: RippleConfig,
    background: Background,
    rain: DigitRain,
    eyes: EyePool,
    ripples: RipplePool,
}

impl DigitalScene {
    /// Lay out the scene for a surface of `size`.
    ///
    /// Glyph spacing is fixed here; everything else adapts to the surface
    /// size seen each frame.
    pub fn new<R: RngCore>(config: &SceneConfig, size: Size, rng: &mut R) -> Self {
        Self {
            eye_config: config.eye,
            ripple_config: config.ripple,
            background: Background::new(&config.background),
            rain: DigitRain::new(&config.rain, size.height as i32, rng),
            eyes: EyePool::new(),
            ripples: RipplePool::new(),
        }
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn rain(&self) -> &DigitRain {
        &self.rain
    }

    pub fn eyes(&self) -> &EyePool {
        &self.eyes
    }

    pub fn eyes_mut(&mut self) -> &mut EyePool {
        &mut self.eyes
    }

    pub fn ripples(&self) -> &RipplePool {
        &self.ripples
    }
}

impl Scene for DigitalScene {
    fn render_frame<S, R>(&mut self, surface: &mut S, rng: &mut R) -> Result<(), S::Error>
    where
        S: MatrixSurface,
        R: RngCore,
    {
        let size = surface.size();

        // ── Background ───────────────────────────────────────────────
        let background = self.background.step(rng);
        surface.clear(background)?;

        // ── Digit rain ───────────────────────────────────────────────
        self.rain.advance(size.height as i32, rng);
        self.rain.draw(surface, background)?;

        // Existing rings grow before blinks below can add new ones.
        self.ripples.update(size);

        // ── Eyes ─────────────────────────────────────────────────────
        let config = &self.eye_config;
        let mut active = self
            .eyes
            .update(config, &self.ripple_config, &mut self.ripples, rng);
        self.eyes.draw(surface, config)?;

        // Skipped spawns still count, which bounds the loop.
        while active < config.min_active {
            self.eyes.spawn(config, size, rng);
            active += 1;
        }
        if active < config.max_active && rng.gen_range(0..config.spawn_chance.max(1)) == 0 {
            self.eyes.spawn(config, size, rng);
        }

        // ── Ripples ──────────────────────────────────────────────────
        self.ripples.draw(surface)?;

        surface.present()
    }
}
