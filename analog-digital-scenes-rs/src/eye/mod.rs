//! Blinking diamond eyes of the digital scene.
//!
//! An [`Eye`] is driven one frame at a time by [`Eye::update`], which turns
//! the frame's progress into [`EyeEvent`]s and feeds them through the
//! [`transition`] table. A blink produces a [`Blink`] that the pool forwards
//! to the ripple pool.

mod draw;
mod fsm;
mod gaze;
mod pool;

pub use draw::draw_eye;
pub use fsm::{transition, EyeAction, EyeEvent, EyeState};
pub use gaze::Gaze;
pub use pool::{EyePool, EYE_SLOTS};

use embedded_graphics::prelude::Point;
use rand::RngCore;

use crate::config::EyeConfig;

/// Placement and lifetime of a new eye.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EyeParams {
    pub center: Point,
    /// Widest half-width when fully open.
    pub max_open: i32,
    pub half_height: i32,
    /// Blinks before the final close.
    pub blinks: i32,
    /// Frames before the first gaze retarget.
    pub first_gaze: i32,
}

/// Ripple burst request raised when an eye blinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blink {
    pub center: Point,
    /// Starting ring radius: the eye's half-height.
    pub radius: i32,
}

/// One eye slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eye {
    pub center: Point,
    pub state: EyeState,
    /// Current half-width, `0..=max_open`.
    pub open_amount: i32,
    pub max_open: i32,
    pub half_height: i32,
    /// Hold countdown while [`EyeState::Open`].
    pub timer: i32,
    pub blinks_remaining: i32,
    pub gaze: Gaze,
}

impl Eye {
    pub(crate) const EMPTY: Eye = Eye {
        center: Point::zero(),
        state: EyeState::Inactive,
        open_amount: 0,
        max_open: 0,
        half_height: 0,
        timer: 0,
        blinks_remaining: 0,
        gaze: Gaze {
            offset: Point::zero(),
            target: Point::zero(),
            timer: 0,
        },
    };

    /// A freshly spawned eye, closed and starting to open.
    pub fn spawn(params: EyeParams) -> Self {
        let mut eye = Eye {
            center: params.center,
            max_open: params.max_open.max(0),
            half_height: params.half_height,
            blinks_remaining: params.blinks.max(0),
            gaze: Gaze::new(params.first_gaze),
            ..Eye::EMPTY
        };
        if let Some((next, EyeAction::ResetOpen)) = transition(EyeState::Inactive, EyeEvent::Spawned) {
            eye.state = next;
            eye.reset_open();
        }
        eye
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Advance one frame.
    ///
    /// Returns a [`Blink`] when the hold timer ran out with blinks left.
    pub fn update<R: RngCore>(&mut self, config: &EyeConfig, rng: &mut R) -> Option<Blink> {
        let drifts = self.state.drifts_gaze();
        let direction = self.state.opening_direction();
        let mut blink = None;

        if direction != 0 {
            self.open_amount = (self.open_amount + direction * config.open_speed)
                .min(self.max_open)
                .max(0);
            if direction > 0 && self.open_amount >= self.max_open {
                self.apply(EyeEvent::FullyOpen, config, rng);
            } else if direction < 0 && self.open_amount <= 0 {
                self.apply(EyeEvent::FullyClosed, config, rng);
            }
        } else if self.state == EyeState::Open {
            self.timer -= 1;
            if self.timer <= 0 {
                let event = if self.blinks_remaining > 0 {
                    EyeEvent::HoldExpired
                } else {
                    EyeEvent::HoldExpiredNoBlinks
                };
                blink = self.apply(event, config, rng);
            }
        }

        if drifts && self.open_amount > config.detail_threshold {
            let reach = gaze::reach(self.open_amount, self.half_height);
            self.gaze.update(reach, config.gaze_frames, rng);
        }

        blink
    }

    /// Feed one event through the transition table and run its action.
    fn apply<R: RngCore>(&mut self, event: EyeEvent, config: &EyeConfig, rng: &mut R) -> Option<Blink> {
        let (next, action) = transition(self.state, event)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("eye at y={}: {} -> {}", self.center.y, self.state, next);

        self.state = next;
        match action {
            EyeAction::ResetOpen => {
                self.reset_open();
                None
            }
            EyeAction::StartHold => {
                self.timer = config.hold_frames.pick(rng);
                None
            }
            EyeAction::Blink => {
                self.blinks_remaining -= 1;
                Some(Blink {
                    center: self.center,
                    radius: self.half_height,
                })
            }
            EyeAction::Free | EyeAction::None => None,
        }
    }

    fn reset_open(&mut self) {
        self.open_amount = 0;
        self.timer = 0;
        self.gaze.offset = Point::zero();
        self.gaze.target = Point::zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn params(blinks: i32) -> EyeParams {
        EyeParams {
            center: Point::new(32, 100),
            max_open: 30,
            half_height: 25,
            blinks,
            first_gaze: 20,
        }
    }

    /// Frames from spawn to release in the worst case.
    ///
    /// Each open or close sweep takes `ceil(max_open / open_speed)` frames,
    /// and each hold lasts at most the largest hold time.
    fn lifecycle_bound(config: &EyeConfig, max_open: i32, blinks: i32) -> i32 {
        let sweep = (max_open + config.open_speed - 1) / config.open_speed;
        let hold = config.hold_frames.upper();
        sweep + blinks * (hold + 2 * sweep) + hold + sweep
    }

    #[test]
    fn spawned_eye_starts_opening() {
        let eye = Eye::spawn(params(2));
        assert_eq!(eye.state, EyeState::Opening);
        assert_eq!(eye.open_amount, 0);
        assert_eq!(eye.blinks_remaining, 2);
        assert_eq!(eye.gaze.timer, 20);
    }

    #[test]
    fn lifecycle_terminates_within_bound() {
        let mut rng = SmallRng::seed_from_u64(41);
        let config = EyeConfig::default();

        for blinks in 0..5 {
            let mut eye = Eye::spawn(params(blinks));
            let bound = lifecycle_bound(&config, eye.max_open, blinks);
            let mut frames = 0;
            let mut bursts = 0;
            while eye.is_active() {
                if eye.update(&config, &mut rng).is_some() {
                    bursts += 1;
                }
                frames += 1;
                assert!(frames <= bound, "exceeded {} frames", bound);
                assert!((0..=eye.max_open).contains(&eye.open_amount));
            }
            assert_eq!(bursts, blinks);
            assert_eq!(eye.open_amount, 0);
        }
    }

    #[test]
    fn opening_takes_ceil_of_max_over_speed() {
        let mut rng = SmallRng::seed_from_u64(42);
        let config = EyeConfig::default();
        let mut eye = Eye::spawn(EyeParams {
            max_open: 29,
            ..params(1)
        });

        for _ in 0..14 {
            eye.update(&config, &mut rng);
            assert_eq!(eye.state, EyeState::Opening);
        }
        eye.update(&config, &mut rng);
        assert_eq!(eye.state, EyeState::Open);
        assert_eq!(eye.open_amount, 29);
        assert!((60..180).contains(&eye.timer));
    }

    #[test]
    fn expired_hold_without_blinks_closes_silently() {
        let mut rng = SmallRng::seed_from_u64(43);
        let config = EyeConfig::default();
        let mut eye = Eye::spawn(params(0));
        eye.state = EyeState::Open;
        eye.open_amount = eye.max_open;
        eye.timer = 0;

        let blink = eye.update(&config, &mut rng);
        assert_eq!(blink, None);
        assert_eq!(eye.state, EyeState::Closing);
    }

    #[test]
    fn blink_reports_center_and_half_height() {
        let mut rng = SmallRng::seed_from_u64(44);
        let config = EyeConfig::default();
        let mut eye = Eye::spawn(params(3));
        eye.state = EyeState::Open;
        eye.open_amount = eye.max_open;
        eye.timer = 1;

        let blink = eye.update(&config, &mut rng);
        assert_eq!(
            blink,
            Some(Blink {
                center: Point::new(32, 100),
                radius: 25
            })
        );
        assert_eq!(eye.blinks_remaining, 2);
        assert_eq!(eye.state, EyeState::BlinkClosing);
    }

    #[test]
    fn zero_width_eye_still_completes() {
        let mut rng = SmallRng::seed_from_u64(45);
        let config = EyeConfig::default();
        let mut eye = Eye::spawn(EyeParams {
            max_open: -4,
            ..params(1)
        });
        assert_eq!(eye.max_open, 0);

        let mut frames = 0;
        while eye.is_active() {
            eye.update(&config, &mut rng);
            frames += 1;
            assert!(frames < 1000);
            assert_eq!(eye.open_amount, 0);
        }
    }

    #[test]
    fn gaze_is_frozen_while_closing() {
        let mut rng = SmallRng::seed_from_u64(46);
        let config = EyeConfig::default();
        let mut eye = Eye::spawn(params(0));
        eye.state = EyeState::Closing;
        eye.open_amount = 30;
        eye.gaze.target = Point::new(5, 3);
        eye.update(&config, &mut rng);
        assert_eq!(eye.gaze.offset, Point::zero());
    }
}
