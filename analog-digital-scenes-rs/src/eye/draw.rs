//! Eye rendering.
//!
//! Drawing order, back to front:
//!
//! 1. Black diamond interior, scanline filled. At row offset `dy` the
//!    half-width is `open · (hh - |dy|) / hh`, giving straight edges that
//!    taper to the tips at `dy = ±hh`.
//! 2. Lid outline: four lines through the tips and the widest points.
//! 3. Lashes fanning out from evenly spaced lid points.
//! 4. Iris and pupil at the gaze offset.
//!
//! Lashes, iris and pupil only appear once the opening exceeds
//! [`EyeConfig::detail_threshold`]. A fully closed eye is a single vertical
//! slit in the lid color.

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};

use super::Eye;
use crate::config::EyeConfig;
use crate::surface::{color565, fill_circle, hline, line, vline};

const INTERIOR: Rgb565 = Rgb565::BLACK;

fn lid_color() -> Rgb565 {
    color565(180, 180, 140)
}

fn iris_color() -> Rgb565 {
    color565(180, 60, 60)
}

fn pupil_color() -> Rgb565 {
    color565(60, 10, 10)
}

/// Half-width of the diamond at row offset `dy`.
fn half_width(open: i32, half_height: i32, dy: i32) -> i32 {
    open * (half_height - dy.abs()) / half_height
}

/// Draw one eye onto `target`.
pub fn draw_eye<D>(eye: &Eye, config: &EyeConfig, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let Point { x: cx, y: cy } = eye.center;
    let hh = eye.half_height.max(1);
    let open = eye.open_amount;
    let lid = lid_color();

    if open <= 0 {
        return vline(target, cx, cy - hh, hh * 2 + 1, lid);
    }

    // 1. Interior
    for dy in -hh..=hh {
        let hw = half_width(open, hh, dy);
        if hw > 0 {
            hline(target, cx - hw, cy + dy, hw * 2 + 1, INTERIOR)?;
        }
    }

    // 2. Lids
    line(target, cx, cy - hh, cx - open, cy, lid)?;
    line(target, cx - open, cy, cx, cy + hh, lid)?;
    line(target, cx, cy - hh, cx + open, cy, lid)?;
    line(target, cx + open, cy, cx, cy + hh, lid)?;

    if open <= config.detail_threshold {
        return Ok(());
    }

    // 3. Lashes
    let span = hh - config.lash_inset;
    let gaps = (config.lash_count - 1).max(1);
    let length = config.lash_length;
    for i in 0..config.lash_count {
        let dy = -span + i * (2 * span) / gaps;
        let hw = half_width(open, hh, dy);
        let fan = dy * length / hh;
        line(target, cx - hw, cy + dy, cx - hw - length, cy + dy + fan, lid)?;
        line(target, cx + hw, cy + dy, cx + hw + length, cy + dy + fan, lid)?;
    }

    // 4. Iris and pupil. The gaze may have wandered further than the
    // current opening allows, so clamp it here.
    let reach = super::gaze::reach(open, hh);
    let ix = cx + eye.gaze.offset.x.clamp(-reach.x, reach.x);
    let iy = cy + eye.gaze.offset.y.clamp(-reach.y, reach.y);
    fill_circle(target, ix, iy, open / 3, iris_color())?;
    fill_circle(target, ix, iy, open / 6, pupil_color())
}
