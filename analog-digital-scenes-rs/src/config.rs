//! Scene configuration.
//!
//! All tunables live in [`SceneConfig`]. There are **no** module-level
//! animation constants apart from the fixed pool slot counts. Durations are
//! expressed in frames and assume the configured frame rate (60 Hz by
//! default), so a 60..180 frame hold is roughly one to three seconds.

use rand::{Rng, RngCore};

use crate::digit_rain::GLYPH_SLOTS;
use crate::error::ConfigError;
use crate::eye::EYE_SLOTS;
use crate::ripple::RIPPLE_SLOTS;
use crate::wave::WAVE_SLOTS;

// ── Span ─────────────────────────────────────────────────────────────────

/// Half-open integer range `[min, max)` sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Span {
    /// Inclusive lower bound.
    pub min: i32,
    /// Exclusive upper bound.
    pub max: i32,
}

impl Span {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Draw a uniform value from the range.
    ///
    /// An empty range yields `min` instead of panicking.
    pub fn pick<R: RngCore>(&self, rng: &mut R) -> i32 {
        if self.max <= self.min {
            return self.min;
        }
        rng.gen_range(self.min..self.max)
    }

    /// Returns `true` if `min < max`.
    pub fn is_valid(&self) -> bool {
        self.min < self.max
    }

    /// Largest value [`pick`](Self::pick) can return.
    pub fn upper(&self) -> i32 {
        if self.is_valid() {
            self.max - 1
        } else {
            self.min
        }
    }
}

// ── Per-pool configuration ───────────────────────────────────────────────

/// Waveform pool policy for the analog scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WaveConfig {
    /// Maximum simultaneously active waves. Default: 4.
    pub max_active: usize,
    /// Waves guaranteed on screen by forced spawns. Default: 1.
    pub min_active: usize,
    /// A random spawn happens with probability `1 / spawn_chance` per frame.
    /// Default: 120.
    pub spawn_chance: u32,
    /// Frequency parameter as a multiple of π. Default: 2..40.
    pub frequency_multiples: Span,
    /// Shortest visible trace in pixels; the longest is the surface height.
    /// Default: 40.
    pub min_length: i32,
    /// Leading edge advance per frame. Default: 1..6.
    pub speed: Span,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            max_active: 4,
            min_active: 1,
            spawn_chance: 120,
            frequency_multiples: Span::new(2, 40),
            min_length: 40,
            speed: Span::new(1, 6),
        }
    }
}

/// Eye pool policy and geometry for the digital scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EyeConfig {
    /// Maximum simultaneously active eyes. Default: 5.
    pub max_active: usize,
    /// Eyes guaranteed on screen by forced spawns. Default: 2.
    pub min_active: usize,
    /// A random spawn happens with probability `1 / spawn_chance` per frame.
    /// Default: 90.
    pub spawn_chance: u32,
    /// Vertical half-span from center to tip. Default: 25.
    pub half_height: i32,
    /// Minimum vertical distance between eye centers. Default: 55.
    pub min_spacing: i32,
    /// Rejection sampling budget per spawn. Default: 20.
    pub spawn_attempts: u32,
    /// Extra pixels kept between an eye tip and the screen edge. Default: 2.
    pub edge_margin: i32,
    /// `open_amount` change per frame while opening or closing. Default: 2.
    pub open_speed: i32,
    /// Blinks before the eye closes for good. Default: 1..5.
    pub blinks: Span,
    /// Frames held open between blinks. Default: 60..180.
    pub hold_frames: Span,
    /// Frames between gaze retargets. Default: 30..120.
    pub gaze_frames: Span,
    /// Frames before the first gaze retarget after spawning. Default: 20..60.
    pub first_gaze_frames: Span,
    /// Iris, pupil, lashes and gaze drift only appear above this opening.
    /// Default: 3.
    pub detail_threshold: i32,
    /// Lashes per lid side. Default: 5.
    pub lash_count: i32,
    /// Lash stroke length in pixels. Default: 5.
    pub lash_length: i32,
    /// Lashes stay this far from the lid tips. Default: 4.
    pub lash_inset: i32,
}

impl Default for EyeConfig {
    fn default() -> Self {
        Self {
            max_active: 5,
            min_active: 2,
            spawn_chance: 90,
            half_height: 25,
            min_spacing: 55,
            spawn_attempts: 20,
            edge_margin: 2,
            open_speed: 2,
            blinks: Span::new(1, 5),
            hold_frames: Span::new(60, 180),
            gaze_frames: Span::new(30, 120),
            first_gaze_frames: Span::new(20, 60),
            detail_threshold: 3,
            lash_count: 5,
            lash_length: 5,
            lash_inset: 4,
        }
    }
}

/// Ripple burst emitted on every blink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RippleConfig {
    /// Rings per burst. Default: 1..4.
    pub count: Span,
    /// Radius growth per frame. Default: 1..4.
    pub speed: Span,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            count: Span::new(1, 4),
            speed: Span::new(1, 4),
        }
    }
}

/// Scrolling binary digit column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RainConfig {
    /// Glyphs in the column. Default: 12.
    pub glyph_count: usize,
    /// X coordinate of the column. Default: 6.
    pub column_x: i32,
    /// Downward advance per frame. Default: 2.
    pub step: i32,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            glyph_count: 12,
            column_x: 6,
            step: 2,
        }
    }
}

/// Random-walking red background of the digital scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BackgroundConfig {
    /// Starting red intensity. Default: 15.
    pub initial_red: u8,
    /// Below this the walk is forced upward. Default: 15.
    pub min_red: u8,
    /// Above this the walk is forced downward. Default: 50.
    pub max_red: u8,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            initial_red: 15,
            min_red: 15,
            max_red: 50,
        }
    }
}

// ── SceneConfig ──────────────────────────────────────────────────────────

/// Complete configuration for both scenes and the frame loop.
///
/// [`SceneConfig::default()`] reproduces the installation tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SceneConfig {
    /// Frame rate in Hz. Default: 60.
    pub frame_rate_hz: u32,
    pub wave: WaveConfig,
    pub eye: EyeConfig,
    pub ripple: RippleConfig,
    pub rain: RainConfig,
    pub background: BackgroundConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            frame_rate_hz: 60,
            wave: WaveConfig::default(),
            eye: EyeConfig::default(),
            ripple: RippleConfig::default(),
            rain: RainConfig::default(),
            background: BackgroundConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Convert the configured frame rate to a timer period in milliseconds.
    ///
    /// Formula: `1000 / frame_rate_hz`.
    pub fn frame_period_ms(&self) -> u64 {
        1000 / self.frame_rate_hz.max(1) as u64
    }

    /// Check every invariant the pools rely on.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate_hz == 0 || self.frame_rate_hz > 120 {
            return Err(ConfigError::FrameRate);
        }

        // ── Waves ────────────────────────────────────────────────────
        let wave = &self.wave;
        if wave.max_active == 0 || wave.max_active > WAVE_SLOTS {
            return Err(ConfigError::PoolCapacity);
        }
        if wave.min_active > wave.max_active {
            return Err(ConfigError::MinimumAboveMaximum);
        }
        if !wave.frequency_multiples.is_valid() || !wave.speed.is_valid() {
            return Err(ConfigError::EmptyRange);
        }
        if wave.frequency_multiples.min <= 0 {
            return Err(ConfigError::FrequencyFloor);
        }
        if wave.speed.min <= 0 || wave.min_length <= 0 || wave.spawn_chance == 0 {
            return Err(ConfigError::NonPositive);
        }

        // ── Eyes ─────────────────────────────────────────────────────
        let eye = &self.eye;
        if eye.max_active == 0 || eye.max_active > EYE_SLOTS {
            return Err(ConfigError::PoolCapacity);
        }
        if eye.min_active > eye.max_active {
            return Err(ConfigError::MinimumAboveMaximum);
        }
        for span in [
            eye.blinks,
            eye.hold_frames,
            eye.gaze_frames,
            eye.first_gaze_frames,
        ] {
            if !span.is_valid() {
                return Err(ConfigError::EmptyRange);
            }
        }
        if eye.half_height <= 0
            || eye.open_speed <= 0
            || eye.min_spacing <= 0
            || eye.spawn_attempts == 0
            || eye.spawn_chance == 0
            || eye.lash_count < 2
            || eye.blinks.min < 0
        {
            return Err(ConfigError::NonPositive);
        }

        // ── Ripples ──────────────────────────────────────────────────
        let ripple = &self.ripple;
        if !ripple.count.is_valid() || !ripple.speed.is_valid() {
            return Err(ConfigError::EmptyRange);
        }
        if ripple.speed.min <= 0 || ripple.count.min < 0 {
            return Err(ConfigError::NonPositive);
        }
        if ripple.count.upper() as usize > RIPPLE_SLOTS {
            return Err(ConfigError::PoolCapacity);
        }

        // ── Rain and background ──────────────────────────────────────
        if self.rain.glyph_count < 2 || self.rain.glyph_count > GLYPH_SLOTS {
            return Err(ConfigError::GlyphCount);
        }
        if self.rain.step <= 0 {
            return Err(ConfigError::NonPositive);
        }
        if self.background.min_red > self.background.max_red {
            return Err(ConfigError::EmptyRange);
        }

        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
