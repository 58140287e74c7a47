//! Error types for scene configuration.

use core::fmt;

/// Reasons a [`SceneConfig`](crate::SceneConfig) is rejected by
/// [`SceneConfig::validate()`](crate::SceneConfig::validate).
///
/// Runtime policy failures (a full pool, an exhausted placement budget) are
/// not errors; the frame loop treats them as silent no-ops. Only a
/// configuration that could never satisfy the pool invariants ends up here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A pool maximum is zero or exceeds the pool's fixed slot count.
    PoolCapacity,
    /// A guaranteed minimum is larger than the matching maximum.
    MinimumAboveMaximum,
    /// A half-open random range has `min >= max`.
    EmptyRange,
    /// The waveform frequency range reaches zero or below.
    FrequencyFloor,
    /// The digit rain needs at least two glyphs (and at most the slot count).
    GlyphCount,
    /// A per-frame speed, spacing or size parameter is not positive.
    NonPositive,
    /// Frame rate outside 1–120 Hz.
    FrameRate,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::PoolCapacity => write!(f, "pool maximum outside slot capacity"),
            ConfigError::MinimumAboveMaximum => write!(f, "pool minimum above maximum"),
            ConfigError::EmptyRange => write!(f, "empty random range"),
            ConfigError::FrequencyFloor => write!(f, "frequency range must stay positive"),
            ConfigError::GlyphCount => write!(f, "invalid digit rain glyph count"),
            ConfigError::NonPositive => write!(f, "parameter must be positive"),
            ConfigError::FrameRate => write!(f, "frame rate must be 1-120 Hz"),
        }
    }
}
