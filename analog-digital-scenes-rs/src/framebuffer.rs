//! In-memory RGB565 frame buffer implementing [`MatrixSurface`].
//!
//! [`FrameBuffer`] stands in for a panel driver's back buffer: scenes draw
//! into it through `embedded-graphics`, and [`present()`](MatrixSurface::present)
//! latches the frame. Useful on the host and for inspecting rendered output.

use core::convert::Infallible;

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};

use crate::surface::MatrixSurface;

/// Fixed-size `W × H` frame buffer.
///
/// # Lifecycle
///
/// 1. [`FrameBuffer::new()`]: all pixels black, no frames presented.
/// 2. Draw through the `embedded-graphics` [`DrawTarget`] API.
/// 3. [`present()`](MatrixSurface::present): counts the frame.
///
/// Pixels outside the buffer are silently clipped.
pub struct FrameBuffer<const W: usize, const H: usize> {
    pixels: [[Rgb565; W]; H],
    presented: u32,
}

impl<const W: usize, const H: usize> Default for FrameBuffer<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> FrameBuffer<W, H> {
    pub fn new() -> Self {
        Self {
            pixels: [[Rgb565::BLACK; W]; H],
            presented: 0,
        }
    }

    /// Color at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
        if x < 0 || y < 0 {
            return None;
        }
        self.pixels
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
    }

    /// One full row, or `None` outside the buffer.
    pub fn row(&self, y: i32) -> Option<&[Rgb565; W]> {
        if y < 0 {
            return None;
        }
        self.pixels.get(y as usize)
    }

    /// Number of pixels currently holding `color`.
    pub fn count(&self, color: Rgb565) -> usize {
        self.pixels
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&p| p == color)
            .count()
    }

    /// Number of frames handed to [`present()`](MatrixSurface::present).
    pub fn frames_presented(&self) -> u32 {
        self.presented
    }
}

impl<const W: usize, const H: usize> OriginDimensions for FrameBuffer<W, H> {
    fn size(&self) -> Size {
        Size::new(W as u32, H as u32)
    }
}

impl<const W: usize, const H: usize> DrawTarget for FrameBuffer<W, H> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as usize, point.y as usize);
            if x < W && y < H {
                self.pixels[y][x] = color;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        for row in self.pixels.iter_mut() {
            row.fill(color);
        }
        Ok(())
    }
}

impl<const W: usize, const H: usize> MatrixSurface for FrameBuffer<W, H> {
    fn present(&mut self) -> Result<(), Self::Error> {
        self.presented = self.presented.wrapping_add(1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_black() {
        let fb = FrameBuffer::<8, 4>::new();
        assert_eq!(fb.count(Rgb565::BLACK), 32);
        assert_eq!(fb.frames_presented(), 0);
        assert_eq!(fb.size(), Size::new(8, 4));
    }

    #[test]
    fn clear_fills_every_pixel() {
        let mut fb = FrameBuffer::<8, 4>::new();
        fb.clear(Rgb565::RED).unwrap();
        assert_eq!(fb.count(Rgb565::RED), 32);
    }

    #[test]
    fn out_of_range_reads_are_none() {
        let fb = FrameBuffer::<8, 4>::new();
        assert_eq!(fb.pixel(8, 0), None);
        assert_eq!(fb.pixel(0, 4), None);
        assert_eq!(fb.pixel(-1, 0), None);
        assert!(fb.row(4).is_none());
    }

    #[test]
    fn present_counts_frames() {
        let mut fb = FrameBuffer::<2, 2>::new();
        fb.present().unwrap();
        fb.present().unwrap();
        assert_eq!(fb.frames_presented(), 2);
    }
}
