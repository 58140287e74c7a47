//! Sensor trigger configuration.

use embassy_time::Duration;

/// Per-sensor note and timing settings.
///
/// [`SensorConfig::default()`] matches the installation: middle C at
/// velocity 100, control changes on channel 16, a five second note and a
/// 20 ms debounce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    /// Note number sent on trigger. Default: 60.
    pub note: u8,
    /// Note velocity. Default: 100.
    pub velocity: u8,
    /// Channel shared by every sensor's control changes. Default: 16.
    pub cc_channel: u8,
    /// How long a triggered note stays on, in milliseconds. Default: 5000.
    pub note_duration_ms: u64,
    /// How long the input must stay high before triggering, in
    /// milliseconds. Zero triggers on the rising edge itself. Default: 20.
    pub debounce_ms: u64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            note: 60,
            velocity: 100,
            cc_channel: 16,
            note_duration_ms: 5000,
            debounce_ms: 20,
        }
    }
}

impl SensorConfig {
    pub fn note_duration(&self) -> Duration {
        Duration::from_millis(self.note_duration_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
