//! Debounced sensor input with a timed note.
//!
//! [`Sensor`] watches one digital input for a LOW→HIGH transition. Once the
//! input has stayed HIGH for the debounce time it drives its output pin HIGH
//! and emits a note-on plus a control change; after the note duration it
//! drives the output LOW and emits the matching note-off and control change.
//! While a note is on the input is not read.

use embassy_time::Instant;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::SensorConfig;
use crate::error::SensorError;
use crate::event::{TriggerEvent, TriggerSink};

/// Valid per-sensor channel range.
pub const CHANNELS: core::ops::RangeInclusive<u8> = 1..=15;

/// A debounced trigger input paired with an indicator output.
///
/// # Example
///
/// ```ignore
/// use sensor_trigger::{Sensor, SensorConfig};
///
/// let mut sensor = Sensor::new(input_pin, led_pin, 3, SensorConfig::default())?;
/// sensor.init()?;
///
/// loop {
///     sensor.poll(Instant::now(), &mut midi_sink)?;
/// }
/// ```
pub struct Sensor<IN, OUT> {
    input: IN,
    output: OUT,
    channel: u8,
    cc_on: u8,
    cc_off: u8,
    config: SensorConfig,
    /// Last input level seen, for edge detection.
    last_high: bool,
    /// Start of the debounce window after a rising edge.
    pending_since: Option<Instant>,
    /// When the current note was triggered.
    note_started: Option<Instant>,
}

impl<IN, OUT> Sensor<IN, OUT>
where
    IN: InputPin,
    OUT: OutputPin<Error = IN::Error>,
{
    /// Create a sensor on `channel`.
    ///
    /// Each sensor gets its own control-change pair derived from the
    /// channel: `channel · 2` on trigger and `channel · 2 + 1` on release,
    /// so a listener on the shared control channel can tell sensors apart.
    ///
    /// # Errors
    /// * [`SensorError::InvalidChannel`] if `channel` is outside [`CHANNELS`]
    pub fn new(
        input: IN,
        output: OUT,
        channel: u8,
        config: SensorConfig,
    ) -> Result<Self, SensorError<IN::Error>> {
        if !CHANNELS.contains(&channel) {
            return Err(SensorError::InvalidChannel(channel));
        }

        let cc_on = channel * 2;
        Ok(Self {
            input,
            output,
            channel,
            cc_on,
            cc_off: cc_on + 1,
            config,
            last_high: false,
            pending_since: None,
            note_started: None,
        })
    }

    /// Drive the output LOW. Call once before polling.
    ///
    /// # Errors
    /// * [`SensorError::Pin`] on GPIO failure
    pub fn init(&mut self) -> Result<(), SensorError<IN::Error>> {
        self.output.set_low()?;
        Ok(())
    }

    /// Service the sensor. Call every loop iteration.
    ///
    /// Expires the current note if its time is up, then, if no note is on,
    /// reads the input and runs edge detection and debouncing.
    ///
    /// # Errors
    /// * [`SensorError::Pin`] on GPIO failure
    pub fn poll<S: TriggerSink>(&mut self, now: Instant, sink: &mut S) -> Result<(), SensorError<IN::Error>> {
        self.expire_note(now, sink)?;
        if self.is_note_on() {
            return Ok(());
        }

        if !self.input.is_high()? {
            self.last_high = false;
            self.pending_since = None;
            return Ok(());
        }

        if !self.last_high {
            self.last_high = true;
            self.pending_since = Some(now);
        }

        if let Some(since) = self.pending_since {
            if now.saturating_duration_since(since) >= self.config.debounce() {
                self.trigger(now, sink)?;
            }
        }
        Ok(())
    }

    /// Fire the note immediately.
    ///
    /// Ignored while a note is already on. A rising edge still being
    /// debounced is consumed by the note.
    ///
    /// # Errors
    /// * [`SensorError::Pin`] on GPIO failure
    pub fn trigger<S: TriggerSink>(&mut self, now: Instant, sink: &mut S) -> Result<(), SensorError<IN::Error>> {
        if self.is_note_on() {
            return Ok(());
        }

        self.output.set_high()?;
        sink.emit(TriggerEvent::NoteOn {
            note: self.config.note,
            velocity: self.config.velocity,
            channel: self.channel,
        });
        sink.emit(TriggerEvent::ControlChange {
            control: self.cc_on,
            value: 1,
            channel: self.config.cc_channel,
        });
        self.note_started = Some(now);
        self.pending_since = None;

        #[cfg(feature = "defmt")]
        defmt::info!("sensor {} triggered", self.channel);

        Ok(())
    }

    fn expire_note<S: TriggerSink>(&mut self, now: Instant, sink: &mut S) -> Result<(), SensorError<IN::Error>> {
        let Some(started) = self.note_started else {
            return Ok(());
        };
        if now.saturating_duration_since(started) < self.config.note_duration() {
            return Ok(());
        }

        self.output.set_low()?;
        sink.emit(TriggerEvent::NoteOff {
            note: self.config.note,
            velocity: self.config.velocity,
            channel: self.channel,
        });
        sink.emit(TriggerEvent::ControlChange {
            control: self.cc_off,
            value: 1,
            channel: self.config.cc_channel,
        });
        self.note_started = None;

        #[cfg(feature = "defmt")]
        defmt::debug!("sensor {} released", self.channel);

        Ok(())
    }

    pub fn is_note_on(&self) -> bool {
        self.note_started.is_some()
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Control numbers sent on trigger and on release.
    pub fn cc_pair(&self) -> (u8, u8) {
        (self.cc_on, self.cc_off)
    }

    /// Give the pins back.
    pub fn release(self) -> (IN, OUT) {
        (self.input, self.output)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
