//! Trigger events and where they go.
//!
//! The sensor never encodes a wire protocol; it hands typed events to a
//! [`TriggerSink`], which may forward them over USB MIDI, light an LED, or
//! just collect them.

/// One outgoing trigger message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriggerEvent {
    NoteOn { note: u8, velocity: u8, channel: u8 },
    NoteOff { note: u8, velocity: u8, channel: u8 },
    ControlChange { control: u8, value: u8, channel: u8 },
}

/// Receiver for trigger events.
pub trait TriggerSink {
    fn emit(&mut self, event: TriggerEvent);
}

/// Collects events up to capacity; later events are dropped.
impl<const N: usize> TriggerSink for heapless::Vec<TriggerEvent, N> {
    fn emit(&mut self, event: TriggerEvent) {
        if self.push(event).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("trigger event dropped: sink full");
        }
    }
}

impl<T: TriggerSink + ?Sized> TriggerSink for &mut T {
    fn emit(&mut self, event: TriggerEvent) {
        (**self).emit(event);
    }
}
