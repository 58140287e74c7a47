//! Eye lifecycle state machine.
//!
//! ```text
//! Inactive ─Spawned─▶ Opening ─FullyOpen─▶ Open ─HoldExpired─▶ BlinkClosing
//!                                           ▲  │                    │
//!                                 FullyOpen │  │ HoldExpiredNoBlinks│ FullyClosed
//!                                           │  ▼                    ▼
//!                 Inactive ◀─FullyClosed─ Closing            BlinkOpening
//! ```
//!
//! Every legal move is one row of [`transition`]. Events that have no row
//! for the current state are ignored, which keeps the per-frame driver in
//! [`Eye::update`](super::Eye::update) free of state checks.

/// Lifecycle phase of one eye slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EyeState {
    /// Slot is free.
    #[default]
    Inactive,
    /// Widening from a slit to full width.
    Opening,
    /// Fully open, counting down the hold timer.
    Open,
    /// Mid-blink, narrowing.
    BlinkClosing,
    /// Mid-blink, widening again.
    BlinkOpening,
    /// Final close; the slot is freed when it reaches zero.
    Closing,
}

impl EyeState {
    pub fn is_active(self) -> bool {
        self != EyeState::Inactive
    }

    /// Phases in which the iris keeps wandering.
    pub fn drifts_gaze(self) -> bool {
        matches!(
            self,
            EyeState::Opening | EyeState::Open | EyeState::BlinkOpening
        )
    }

    /// Sign of the per-frame change of the opening: `1`, `-1` or `0`.
    pub fn opening_direction(self) -> i32 {
        match self {
            EyeState::Opening | EyeState::BlinkOpening => 1,
            EyeState::BlinkClosing | EyeState::Closing => -1,
            EyeState::Inactive | EyeState::Open => 0,
        }
    }
}

/// Something that happened to an eye this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EyeEvent {
    /// A spawn placed the eye in a free slot.
    Spawned,
    /// The opening reached its maximum.
    FullyOpen,
    /// The opening reached zero.
    FullyClosed,
    /// The hold timer ran out with blinks left.
    HoldExpired,
    /// The hold timer ran out with no blinks left.
    HoldExpiredNoBlinks,
}

/// Side effect attached to a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EyeAction {
    /// Start closed with a fresh gaze.
    ResetOpen,
    /// Draw a new hold time.
    StartHold,
    /// Consume one blink and emit a ripple burst.
    Blink,
    /// Release the slot.
    Free,
    None,
}

/// The transition table.
///
/// Returns the next state and its action, or `None` when `event` does not
/// apply in `state`.
pub const fn transition(state: EyeState, event: EyeEvent) -> Option<(EyeState, EyeAction)> {
    use EyeEvent as E;
    use EyeState as S;

    match (state, event) {
        (S::Inactive, E::Spawned) => Some((S::Opening, EyeAction::ResetOpen)),
        (S::Opening, E::FullyOpen) => Some((S::Open, EyeAction::StartHold)),
        (S::Open, E::HoldExpired) => Some((S::BlinkClosing, EyeAction::Blink)),
        (S::Open, E::HoldExpiredNoBlinks) => Some((S::Closing, EyeAction::None)),
        (S::BlinkClosing, E::FullyClosed) => Some((S::BlinkOpening, EyeAction::None)),
        (S::BlinkOpening, E::FullyOpen) => Some((S::Open, EyeAction::StartHold)),
        (S::Closing, E::FullyClosed) => Some((S::Inactive, EyeAction::Free)),
        _ => None,
    }
}
