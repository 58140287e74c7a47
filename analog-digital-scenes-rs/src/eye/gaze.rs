//! Iris gaze drift.

use embedded_graphics::prelude::Point;
use rand::{Rng, RngCore};

use crate::config::Span;

/// Wandering iris offset relative to the eye center.
///
/// A countdown picks a new target every so often; the offset then walks
/// toward it one pixel per axis per frame, so it never jumps and never
/// overshoots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gaze {
    pub offset: Point,
    pub target: Point,
    /// Frames until the next retarget.
    pub timer: i32,
}

impl Gaze {
    /// Centered gaze that retargets after `timer` frames.
    pub fn new(timer: i32) -> Self {
        Self {
            offset: Point::zero(),
            target: Point::zero(),
            timer,
        }
    }

    /// Advance one frame.
    ///
    /// `reach` bounds new targets to `±reach.x` by `±reach.y`; `interval`
    /// is the range the next countdown is drawn from.
    pub fn update<R: RngCore>(&mut self, reach: Point, interval: Span, rng: &mut R) {
        self.timer -= 1;
        if self.timer <= 0 {
            let (rx, ry) = (reach.x.max(0), reach.y.max(0));
            self.target = Point::new(rng.gen_range(-rx..=rx), rng.gen_range(-ry..=ry));
            self.timer = interval.pick(rng);
        }

        self.offset.x += (self.target.x - self.offset.x).signum();
        self.offset.y += (self.target.y - self.offset.y).signum();
    }
}

/// Largest target offset for an eye of the given opening and half-height.
pub fn reach(open_amount: i32, half_height: i32) -> Point {
    Point::new(open_amount / 3, half_height / 5)
}
