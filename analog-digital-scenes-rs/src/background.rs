//! Slowly breathing red background of the digital scene.

use embedded_graphics::pixelcolor::Rgb565;
use rand::{Rng, RngCore};

use crate::config::BackgroundConfig;
use crate::surface::color565;

/// Random walk over the red channel.
///
/// Each step picks a direction at random, except that above `max_red` the
/// walk is forced down and below `min_red` it is forced up, then moves by
/// zero or one. The value can therefore overshoot either clamp by one before
/// being pulled back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background {
    red: u8,
    min_red: u8,
    max_red: u8,
}

impl Background {
    pub fn new(config: &BackgroundConfig) -> Self {
        Self {
            red: config.initial_red,
            min_red: config.min_red,
            max_red: config.max_red,
        }
    }

    /// Take one step of the walk and return the new fill color.
    pub fn step<R: RngCore>(&mut self, rng: &mut R) -> Rgb565 {
        let mut up = rng.gen::<bool>();
        if self.red > self.max_red {
            up = false;
        }
        if self.red < self.min_red {
            up = true;
        }

        let delta = rng.gen_range(0..2u8);
        self.red = if up {
            self.red.saturating_add(delta)
        } else {
            self.red.saturating_sub(delta)
        };

        self.color()
    }

    /// Current red intensity.
    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn color(&self) -> Rgb565 {
        color565(self.red, 0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn starts_at_initial_value() {
        let bg = Background::new(&BackgroundConfig::default());
        assert_eq!(bg.red(), 15);
    }

    #[test]
    fn walk_stays_within_one_of_clamps() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut bg = Background::new(&BackgroundConfig::default());
        for _ in 0..20_000 {
            bg.step(&mut rng);
            assert!((14..=51).contains(&bg.red()), "red = {}", bg.red());
        }
    }

    #[test]
    fn walk_returns_from_outside_the_band() {
        let mut rng = SmallRng::seed_from_u64(12);
        let mut bg = Background::new(&BackgroundConfig {
            initial_red: 200,
            ..BackgroundConfig::default()
        });
        let mut previous = bg.red();
        for _ in 0..2_000 {
            bg.step(&mut rng);
            if previous > 50 {
                assert!(bg.red() <= previous);
            }
            previous = bg.red();
        }
        assert!(bg.red() <= 51);
    }

    #[test]
    fn color_carries_only_red() {
        let bg = Background::new(&BackgroundConfig::default());
        let color = bg.color();
        assert_eq!(color, color565(15, 0, 0));
    }
}
