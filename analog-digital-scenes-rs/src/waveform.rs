//! Stateless waveform sampling.
//!
//! Every [`Shape`] maps a row `y` to a column `x`: the row is converted to a
//! phase `y / height * frequency`, the shape turns the phase into an
//! amplitude in `[-1, 1]`, and the amplitude is rescaled onto
//! `[0, width - 1]`. `frequency` is in radians per screen height, so `2π`
//! draws one full period top to bottom.
//!
//! Nothing here stores state. The noise shape derives its control points
//! from [`noise_hash`], so identical inputs always redraw identically.

use core::f32::consts::PI;

use libm::{asinf, cosf, floorf, fmodf, roundf, sinf};

const TAU: f32 = 2.0 * PI;

/// Fraction of a shark-fin period spent on the linear rise.
const SHARK_RISE: f32 = 0.18;

/// Shortest noise segment in pixels.
const MIN_NOISE_PERIOD: f32 = 2.0;

/// The six waveform shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Shape {
    Sine,
    /// Linear ramps folded out of the sine via `asin(sin(p))`.
    Triangle,
    /// Rising ramp that snaps back once per period.
    Sawtooth,
    /// Fast linear rise followed by a slow cosine fall.
    SharkFin,
    /// Binary high/low with hard edges.
    Square,
    /// Cosine-interpolated hash control points.
    Noise,
}

impl Shape {
    /// All shapes, in spawn-table order.
    pub const ALL: [Shape; 6] = [
        Shape::Sine,
        Shape::Triangle,
        Shape::Sawtooth,
        Shape::SharkFin,
        Shape::Square,
        Shape::Noise,
    ];

    /// Column of the trace on row `y` for a `width × height` surface.
    ///
    /// The result is always within `[0, width - 1]`. `frequency` must be
    /// positive; the noise shape additionally clamps its segment length to
    /// two pixels so tiny frequencies cannot divide by zero.
    pub fn sample(self, y: i32, frequency: f32, height: u32, width: u32) -> i32 {
        let max_x = width.saturating_sub(1) as i32;

        if let Shape::Noise = self {
            return noise(y, frequency, height, width).clamp(0, max_x);
        }

        let phase = (y as f32 / height.max(1) as f32) * frequency;
        let amplitude = match self {
            Shape::Sine => sinf(phase),
            Shape::Triangle => 2.0 * asinf(sinf(phase)) / PI,
            Shape::Sawtooth => 2.0 * (phase / TAU - floorf(phase / TAU + 0.5)),
            Shape::SharkFin => shark_fin(phase),
            Shape::Square => {
                if sinf(phase) >= 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
            Shape::Noise => 0.0,
        };

        to_column(amplitude, width).clamp(0, max_x)
    }

    /// Whether the trace between two consecutive rows needs a connector.
    ///
    /// A sawtooth snaps back when the next column is more than half the width
    /// to the left; a square wave has an edge whenever its side flips. Other
    /// shapes are continuous.
    pub fn has_edge(self, x: i32, next_x: i32, width: u32) -> bool {
        match self {
            Shape::Sawtooth => next_x < x - (width as i32 / 2),
            Shape::Square => next_x != x,
            _ => false,
        }
    }
}

/// Rescale an amplitude in `[-1, 1]` onto `[0, width - 1]`.
fn to_column(amplitude: f32, width: u32) -> i32 {
    let span = width.saturating_sub(1) as f32;
    roundf((amplitude + 1.0) / 2.0 * span) as i32
}

fn shark_fin(phase: f32) -> f32 {
    let mut t = fmodf(phase, TAU) / TAU;
    if t < 0.0 {
        t += 1.0;
    }
    let level = if t < SHARK_RISE {
        t / SHARK_RISE
    } else {
        let fall = (t - SHARK_RISE) / (1.0 - SHARK_RISE);
        cosf(fall * PI) * 0.5 + 0.5
    };
    level * 2.0 - 1.0
}

fn noise(y: i32, frequency: f32, height: u32, width: u32) -> i32 {
    let mut period = TAU * height as f32 / frequency;
    // NaN and infinities from a zero frequency fall through to the floor too.
    if !(period >= MIN_NOISE_PERIOD) || !period.is_finite() {
        period = MIN_NOISE_PERIOD;
    }

    let segment = floorf(y as f32 / period) as i32;
    let t = (y as f32 - segment as f32 * period) / period;
    let smooth = (1.0 - cosf(t * PI)) / 2.0;

    let width = width.max(1);
    let x0 = (noise_hash(segment, frequency) % width) as i32;
    let x1 = (noise_hash(segment.wrapping_add(1), frequency) % width) as i32;

    x0 + (smooth * (x1 - x0) as f32) as i32
}

/// Reproducible pseudo-random value for a noise control point.
///
/// Multiplicative mixing with two large odd constants, then a xor-shift,
/// multiply, xor-shift finaliser, all in wrapping 32-bit arithmetic.
pub fn noise_hash(segment: i32, frequency: f32) -> u32 {
    let mut seed = (segment.wrapping_add(1) as u32).wrapping_mul(2_654_435_761);
    seed ^= ((frequency * 100.0) as u32).wrapping_mul(2_246_822_519);
    seed ^= seed >> 16;
    seed = seed.wrapping_mul(0x045d_9f3b);
    seed ^= seed >> 16;
    seed
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: u32 = 64;
    const HEIGHT: u32 = 256;

    #[test]
    fn every_shape_stays_on_screen() {
        for shape in Shape::ALL {
            for multiple in [1.0, 2.0, 7.0, 39.0] {
                let frequency = multiple * PI;
                for y in 0..HEIGHT as i32 {
                    let x = shape.sample(y, frequency, HEIGHT, WIDTH);
                    assert!(
                        (0..WIDTH as i32).contains(&x),
                        "{:?} y={} f={} gave x={}",
                        shape,
                        y,
                        frequency,
                        x
                    );
                }
            }
        }
    }

    #[test]
    fn tiny_frequency_does_not_escape_bounds() {
        for shape in Shape::ALL {
            let x = shape.sample(10, 0.0001, HEIGHT, WIDTH);
            assert!((0..WIDTH as i32).contains(&x));
        }
    }

    #[test]
    fn noise_hash_is_reproducible() {
        for segment in -3..20 {
            assert_eq!(noise_hash(segment, 5.0 * PI), noise_hash(segment, 5.0 * PI));
        }
        assert_ne!(noise_hash(0, 5.0 * PI), noise_hash(1, 5.0 * PI));
    }

    #[test]
    fn noise_sampling_is_reproducible() {
        let f = 11.0 * PI;
        for y in 0..HEIGHT as i32 {
            assert_eq!(
                Shape::Noise.sample(y, f, HEIGHT, WIDTH),
                Shape::Noise.sample(y, f, HEIGHT, WIDTH)
            );
        }
    }

    #[test]
    fn noise_starts_segment_at_hashed_control_point() {
        let f = 4.0 * PI;
        // Period = 2π·256 / 4π = 128 px, so row 0 and row 128 sit exactly on
        // control points 0 and 1.
        assert_eq!(
            Shape::Noise.sample(0, f, HEIGHT, WIDTH),
            (noise_hash(0, f) % WIDTH) as i32
        );
        assert_eq!(
            Shape::Noise.sample(128, f, HEIGHT, WIDTH),
            (noise_hash(1, f) % WIDTH) as i32
        );
    }

    #[test]
    fn sine_starts_at_center() {
        assert_eq!(Shape::Sine.sample(0, 2.0 * PI, HEIGHT, WIDTH), 32);
    }

    #[test]
    fn square_is_binary() {
        for y in 0..HEIGHT as i32 {
            let x = Shape::Square.sample(y, 6.0 * PI, HEIGHT, WIDTH);
            assert!(x == 0 || x == WIDTH as i32 - 1);
        }
    }

    #[test]
    fn shark_fin_peaks_early_in_period() {
        // One period over the screen: the peak is 18% of the way down.
        let f = 2.0 * PI;
        let peak_row = (HEIGHT as f32 * SHARK_RISE) as i32;
        let peak = Shape::SharkFin.sample(peak_row, f, HEIGHT, WIDTH);
        assert!(peak >= WIDTH as i32 - 2);
        assert_eq!(Shape::SharkFin.sample(0, f, HEIGHT, WIDTH), 0);
    }

    #[test]
    fn triangle_matches_sine_at_extremes() {
        let f = 2.0 * PI;
        let quarter = HEIGHT as i32 / 4;
        assert_eq!(Shape::Triangle.sample(quarter, f, HEIGHT, WIDTH), WIDTH as i32 - 1);
        assert_eq!(Shape::Triangle.sample(3 * quarter, f, HEIGHT, WIDTH), 0);
    }

    #[test]
    fn single_sawtooth_period_snaps_back_once() {
        let f = 2.0 * PI;
        let edges = (0..HEIGHT as i32 - 1)
            .filter(|&y| {
                let x = Shape::Sawtooth.sample(y, f, HEIGHT, WIDTH);
                let next = Shape::Sawtooth.sample(y + 1, f, HEIGHT, WIDTH);
                Shape::Sawtooth.has_edge(x, next, WIDTH)
            })
            .count();
        assert_eq!(edges, 1);
    }

    #[test]
    fn continuous_shapes_never_report_edges() {
        for shape in [Shape::Sine, Shape::Triangle, Shape::SharkFin, Shape::Noise] {
            assert!(!shape.has_edge(63, 0, WIDTH));
        }
        assert!(Shape::Square.has_edge(0, 63, WIDTH));
        assert!(!Shape::Sawtooth.has_edge(0, 63, WIDTH));
    }
}
