//! Debounced sensor triggers for the analog-digital installation.
//!
//! Each [`Sensor`] watches one digital input. A debounced rising edge drives
//! an indicator output HIGH and emits a note-on plus a control change to a
//! [`TriggerSink`]; after the note duration the output drops and the
//! matching note-off and control change follow.
//!
//! # Quick Start
//!
//! ```ignore
//! use sensor_trigger::{Sensor, SensorConfig, TriggerEvent};
//!
//! let mut sensor = Sensor::new(input_pin, led_pin, 1, SensorConfig::default())?;
//! sensor.init()?;
//!
//! let mut events: heapless::Vec<TriggerEvent, 8> = heapless::Vec::new();
//! loop {
//!     sensor.poll(Instant::now(), &mut events)?;
//!     for event in &events {
//!         forward(event);
//!     }
//!     events.clear();
//! }
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`**: structured logging via [`defmt`](https://docs.rs/defmt).

#![no_std]

pub mod config;
pub mod error;
pub mod event;
pub mod sensor;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use config::SensorConfig;
pub use error::SensorError;
pub use event::{TriggerEvent, TriggerSink};
pub use sensor::Sensor;
