//! Rendering surface capability set.
//!
//! Scenes draw into any `embedded-graphics` [`DrawTarget`] with
//! [`Rgb565`] pixels that can also report its size and present a finished
//! frame. The free functions here wrap the primitives the scenes need with
//! the pixel conventions of the LED matrix: a horizontal line of width `w`
//! covers `w` pixels starting at `x`, and a circle of radius `r` has a
//! diameter of `2r + 1` pixels centered on its origin.

use embedded_graphics::{
    pixelcolor::{Rgb565, Rgb888},
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle},
};

/// A frame-buffered matrix display.
///
/// Drawing goes to an off-screen buffer; [`present()`](Self::present)
/// transfers the completed frame to the panel.
pub trait MatrixSurface: DrawTarget<Color = Rgb565> + OriginDimensions {
    /// Push the completed frame to the panel.
    fn present(&mut self) -> Result<(), Self::Error>;
}

/// Pack 8-bit RGB components into the panel's 16-bit color.
pub fn color565(r: u8, g: u8, b: u8) -> Rgb565 {
    Rgb565::from(Rgb888::new(r, g, b))
}

/// Width and height of a surface as signed pixel coordinates.
pub fn dimensions<D: OriginDimensions>(target: &D) -> (i32, i32) {
    let size = target.size();
    (size.width as i32, size.height as i32)
}

pub fn pixel<D>(target: &mut D, x: i32, y: i32, color: Rgb565) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    Pixel(Point::new(x, y), color).draw(target)
}

/// Horizontal line of `width` pixels starting at `(x, y)`.
pub fn hline<D>(target: &mut D, x: i32, y: i32, width: i32, color: Rgb565) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    if width <= 0 {
        return Ok(());
    }
    line(target, x, y, x + width - 1, y, color)
}

/// Vertical line of `height` pixels starting at `(x, y)`.
pub fn vline<D>(target: &mut D, x: i32, y: i32, height: i32, color: Rgb565) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    if height <= 0 {
        return Ok(());
    }
    line(target, x, y, x, y + height - 1, color)
}

pub fn line<D>(
    target: &mut D,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    Line::new(Point::new(x0, y0), Point::new(x1, y1))
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(target)
}

/// One-pixel circle outline. Negative radii draw nothing.
pub fn circle<D>(target: &mut D, cx: i32, cy: i32, radius: i32, color: Rgb565) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    if radius < 0 {
        return Ok(());
    }
    Circle::with_center(Point::new(cx, cy), diameter(radius))
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(target)
}

/// Filled disc. Negative radii draw nothing.
pub fn fill_circle<D>(
    target: &mut D,
    cx: i32,
    cy: i32,
    radius: i32,
    color: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    if radius < 0 {
        return Ok(());
    }
    Circle::with_center(Point::new(cx, cy), diameter(radius))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(target)
}

fn diameter(radius: i32) -> u32 {
    (radius as u32) * 2 + 1
}
