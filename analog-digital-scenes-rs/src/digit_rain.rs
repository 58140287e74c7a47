//! Scrolling column of binary digits.
//!
//! A fixed ring of glyphs, one spacing apart. Glyph `i` starts `i` spacings
//! above the top edge; a glyph that falls off the bottom is recycled one
//! spacing above the highest glyph, so the spacing never drifts and the
//! column has no seam.

use embedded_graphics::{
    mono_font::{ascii::FONT_10X20, MonoTextStyleBuilder},
    pixelcolor::Rgb565,
    prelude::*,
    text::{Baseline, Text},
};
use heapless::Vec;
use rand::{Rng, RngCore};

use crate::config::RainConfig;

/// Maximum number of glyphs in a column.
pub const GLYPH_SLOTS: usize = 12;

/// Glyph cell height in pixels.
pub const GLYPH_HEIGHT: i32 = FONT_10X20.character_size.height as i32;

const GLYPH_COLOR: Rgb565 = Rgb565::WHITE;

/// One scrolling character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// Row of the glyph's top edge.
    pub offset: i32,
    /// `'0'` or `'1'`.
    pub character: char,
    pub color: Rgb565,
}

impl Glyph {
    fn random<R: RngCore>(offset: i32, rng: &mut R) -> Self {
        Self {
            offset,
            character: if rng.gen::<bool>() { '1' } else { '0' },
            color: GLYPH_COLOR,
        }
    }
}

/// The digit rain column.
pub struct DigitRain {
    glyphs: Vec<Glyph, GLYPH_SLOTS>,
    wrap_offset: i32,
    column_x: i32,
    step: i32,
}

impl DigitRain {
    /// Lay out `config.glyph_count` glyphs for a surface `height` rows tall.
    ///
    /// The glyph count is clamped to `2..=GLYPH_SLOTS`.
    pub fn new<R: RngCore>(config: &RainConfig, height: i32, rng: &mut R) -> Self {
        let count = config.glyph_count.clamp(2, GLYPH_SLOTS);
        let wrap_offset = wrap_offset(height, count);

        let mut glyphs = Vec::new();
        for i in 0..count {
            // count <= GLYPH_SLOTS, so this never fails.
            let _ = glyphs.push(Glyph::random(wrap_offset * i as i32, rng));
        }

        Self {
            glyphs,
            wrap_offset,
            column_x: config.column_x,
            step: config.step,
        }
    }

    /// Scroll every glyph down one step, recycling those past `height`.
    pub fn advance<R: RngCore>(&mut self, height: i32, rng: &mut R) {
        for glyph in self.glyphs.iter_mut() {
            glyph.offset += self.step;
        }
        for i in 0..self.glyphs.len() {
            if self.glyphs[i].offset > height {
                let highest = self.glyphs.iter().map(|g| g.offset).min().unwrap_or(0);
                self.glyphs[i] = Glyph::random(highest + self.wrap_offset, rng);
            }
        }
    }

    /// Draw the visible glyphs over `background`.
    ///
    /// Glyphs at or above the wrap offset are still off screen and skipped.
    pub fn draw<D>(&self, target: &mut D, background: Rgb565) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        for glyph in self.glyphs.iter().filter(|g| g.offset > self.wrap_offset) {
            let style = MonoTextStyleBuilder::new()
                .font(&FONT_10X20)
                .text_color(glyph.color)
                .background_color(background)
                .build();

            let mut buf = [0u8; 4];
            let text = glyph.character.encode_utf8(&mut buf);

            Text::with_baseline(
                text,
                Point::new(self.column_x, glyph.offset),
                style,
                Baseline::Top,
            )
            .draw(target)?;
        }
        Ok(())
    }

    /// Spacing between glyph tops, negated. Also the row at or above which
    /// a glyph is not drawn.
    pub fn wrap_offset(&self) -> i32 {
        self.wrap_offset
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }
}

/// Spacing between glyph tops, negated.
///
/// Formula: `-(((height - h·(n - 1)) / (n - 1)) + h)` with `h` the glyph
/// height and `n` the glyph count.
pub fn wrap_offset(height: i32, count: usize) -> i32 {
    let gaps = (count.max(2) - 1) as i32;
    -(((height - GLYPH_HEIGHT * gaps) / gaps) + GLYPH_HEIGHT)
}
