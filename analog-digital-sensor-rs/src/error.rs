//! Sensor failures.
//!
//! A sensor owns two GPIO lines, the trigger input and the indicator
//! output, which share one HAL error type `E`. Everything else that can go
//! wrong is caught when the sensor is built.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError<E> {
    /// Reading the trigger input or driving the indicator failed.
    Pin(E),

    /// The requested note channel, which is outside [`crate::sensor::CHANNELS`].
    InvalidChannel(u8),
}

impl<E> From<E> for SensorError<E> {
    fn from(error: E) -> Self {
        SensorError::Pin(error)
    }
}

impl<E: fmt::Debug> fmt::Display for SensorError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SensorError::Pin(e) => write!(f, "sensor GPIO failed: {:?}", e),
            SensorError::InvalidChannel(ch) => write!(f, "sensor channel {} not in 1..=15", ch),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for SensorError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            SensorError::Pin(e) => defmt::write!(f, "sensor GPIO failed: {}", e),
            SensorError::InvalidChannel(ch) => defmt::write!(f, "sensor channel {} not in 1..=15", ch),
        }
    }
}
