//! Procedural animation scenes for RGB565 LED matrix panels.
//!
//! Two scenes share one pooled-entity framework:
//!
//! - **Analog** ([`AnalogScene`]): oscilloscope-style waveforms in six
//!   shapes scroll down a black screen.
//! - **Digital** ([`DigitalScene`]): a column of binary digit rain and
//!   diamond-shaped eyes that open, look around, blink and close over a
//!   slowly breathing red background. Every blink sends out ripple rings.
//!
//! Every entity lives in a fixed-capacity slot pool, so nothing allocates.
//! Scenes draw through `embedded-graphics` into any [`MatrixSurface`]; an
//! in-memory [`FrameBuffer`] is provided for host use.
//!
//! # Quick Start
//!
//! ```ignore
//! use analog_digital_scenes::{FrameBuffer, Scene, SceneConfig, Scenes, SceneKind};
//!
//! let config = SceneConfig::default();
//! config.validate()?;
//!
//! let mut panel = FrameBuffer::<64, 256>::new();
//! let mut scenes = Scenes::new(&config, panel.size(), &mut rng);
//! loop {
//!     scenes.render_frame(SceneKind::Digital, &mut panel, &mut rng)?;
//! }
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`**: structured logging via [`defmt`](https://docs.rs/defmt).
//! - **`task`**: the async [`scene_task`] frame loop (Embassy).

#![no_std]

pub mod background;
pub mod config;
pub mod digit_rain;
pub mod error;
pub mod eye;
pub mod framebuffer;
pub mod ripple;
pub mod scene;
#[cfg(feature = "task")]
pub mod scene_task;
pub mod surface;
pub mod wave;
pub mod waveform;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use config::{BackgroundConfig, EyeConfig, RainConfig, RippleConfig, SceneConfig, Span, WaveConfig};
pub use error::ConfigError;
pub use framebuffer::FrameBuffer;
pub use scene::{AnalogScene, DigitalScene, Scene, SceneKind, Scenes};
#[cfg(feature = "task")]
pub use scene_task::scene_task;
pub use surface::{color565, MatrixSurface};
pub use waveform::Shape;
