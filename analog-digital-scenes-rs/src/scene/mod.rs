//! Per-frame scene drivers.
//!
//! A [`Scene`] owns its entity pools and turns one call to
//! [`render_frame`](Scene::render_frame) into one presented frame. Within a
//! frame every live entity is updated and drawn before any spawn decision
//! for its pool, so a fresh entity is never advanced twice.

mod analog;
mod digital;

pub use analog::AnalogScene;
pub use digital::DigitalScene;

use embedded_graphics::prelude::Size;
use rand::RngCore;

use crate::config::SceneConfig;
use crate::surface::MatrixSurface;

/// A frame-at-a-time animation.
pub trait Scene {
    /// Draw one complete frame and present it.
    ///
    /// # Errors
    ///
    /// Returns the surface error if any draw or the final present fails.
    fn render_frame<S, R>(&mut self, surface: &mut S, rng: &mut R) -> Result<(), S::Error>
    where
        S: MatrixSurface,
        R: RngCore;
}

/// Which scene is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SceneKind {
    /// Scrolling oscilloscope waveforms on black.
    #[default]
    Analog,
    /// Digit rain and blinking eyes on a breathing red background.
    Digital,
}

impl SceneKind {
    /// The other scene.
    pub fn toggled(self) -> Self {
        match self {
            SceneKind::Analog => SceneKind::Digital,
            SceneKind::Digital => SceneKind::Analog,
        }
    }
}

/// Both scenes, kept alive so switching resumes where each left off.
pub struct Scenes {
    pub analog: AnalogScene,
    pub digital: DigitalScene,
}

impl Scenes {
    pub fn new<R: RngCore>(config: &SceneConfig, size: Size, rng: &mut R) -> Self {
        Self {
            analog: AnalogScene::new(config),
            digital: DigitalScene::new(config, size, rng),
        }
    }

    /// Render one frame of the scene selected by `kind`.
    pub fn render_frame<S, R>(&mut self, kind: SceneKind, surface: &mut S, rng: &mut R) -> Result<(), S::Error>
    where
        S: MatrixSurface,
        R: RngCore,
    {
        match kind {
            SceneKind::Analog => self.analog.render_frame(surface, rng),
            SceneKind::Digital => self.digital.render_frame(surface, rng),
        }
    }
}
