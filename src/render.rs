use crate::consts;
use enum_dispatch::enum_dispatch;
use enum_map::{Enum, EnumMap};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Style},
    text::Span,
    widgets::Widget,
};
use thiserror::Error;
use unicode_width::UnicodeWidthStr;

/// The drawing surface for the playfield.  Positions are grid cells, relative
/// to the top-left corner of `area`; each cell is
/// [`CELL_WIDTH`][consts::CELL_WIDTH] columns wide.
#[derive(Debug, Eq, PartialEq)]
pub(crate) struct Canvas<'a> {
    pub(crate) area: Rect,
    pub(crate) buf: &'a mut Buffer,
}

impl Canvas<'_> {
    /// Return the part of the buffer covered by grid cell `pos`, or `None` if
    /// it lies outside of the canvas
    fn cell_rect(&self, pos: Position) -> Option<Rect> {
        let x = self
            .area
            .x
            .checked_add(pos.x.checked_mul(consts::CELL_WIDTH)?)?;
        let y = self.area.y.checked_add(pos.y)?;
        let rect = Rect::new(x, y, consts::CELL_WIDTH, 1).intersection(self.area);
        (!rect.is_empty()).then_some(rect)
    }

    /// Paint the whole of grid cell `pos` with `color`
    pub(crate) fn fill(&mut self, pos: Position, color: Color) {
        let Some(rect) = self.cell_rect(pos) else {
            return;
        };
        for p in rect.positions() {
            if let Some(cell) = self.buf.cell_mut(p) {
                cell.set_char(' ');
                cell.set_style(Style::reset().bg(color));
            }
        }
    }

    /// Write `glyph` into grid cell `pos`, replacing whatever was there
    pub(crate) fn blit(&mut self, pos: Position, glyph: &str, style: Style) {
        let Some(rect) = self.cell_rect(pos) else {
            return;
        };
        for p in rect.positions() {
            if let Some(cell) = self.buf.cell_mut(p) {
                cell.reset();
            }
        }
        Span::styled(glyph, Style::reset().patch(style)).render(rect, self.buf);
    }
}

/// One of the four fixed orientations a sprite can be drawn in
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

#[enum_dispatch]
pub(crate) trait Draw {
    /// Draw into grid cell `pos` of `canvas`, facing `rotation`
    fn draw(&self, canvas: &mut Canvas<'_>, pos: Position, rotation: Rotation);
}

/// How an entity looks.  Chosen once, when assets are loaded.
#[enum_dispatch(Draw)]
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Renderable {
    Sprite,
    ColorRect,
}

/// A plain square of colour filling the cell, used when a sprite could not be
/// loaded
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ColorRect(pub(crate) Color);

impl Draw for ColorRect {
    fn draw(&self, canvas: &mut Canvas<'_>, pos: Position, _rotation: Rotation) {
        canvas.fill(pos, self.0);
    }
}

/// A text sprite with one glyph per rotation
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Sprite {
    glyphs: EnumMap<Rotation, String>,
    style: Style,
}

impl Sprite {
    /// Parse a sprite from the contents of a sprite file: either a single
    /// glyph line, used for every rotation, or four lines giving the glyphs
    /// for 0°, 90°, 180°, and 270° in that order.
    pub(crate) fn parse(src: &str, style: Style) -> Result<Sprite, SpriteError> {
        let mut lines = src
            .lines()
            .map(|ln| ln.trim_end_matches('\r'))
            .collect::<Vec<_>>();
        while lines.last().is_some_and(|ln| ln.trim().is_empty()) {
            lines.pop();
        }
        for &ln in &lines {
            let width = ln.width();
            if width == 0 {
                return Err(SpriteError::EmptyGlyph);
            }
            if width > usize::from(consts::CELL_WIDTH) {
                return Err(SpriteError::TooWide {
                    glyph: ln.to_owned(),
                    width,
                });
            }
        }
        let glyphs = match lines[..] {
            [] => return Err(SpriteError::Empty),
            [glyph] => EnumMap::from_fn(|_| glyph.to_owned()),
            [g0, g90, g180, g270] => EnumMap::from_fn(|rot| {
                match rot {
                    Rotation::Deg0 => g0,
                    Rotation::Deg90 => g90,
                    Rotation::Deg180 => g180,
                    Rotation::Deg270 => g270,
                }
                .to_owned()
            }),
            _ => return Err(SpriteError::GlyphCount(lines.len())),
        };
        Ok(Sprite { glyphs, style })
    }

    pub(crate) fn glyph(&self, rotation: Rotation) -> &str {
        &self.glyphs[rotation]
    }
}

impl Draw for Sprite {
    fn draw(&self, canvas: &mut Canvas<'_>, pos: Position, rotation: Rotation) {
        canvas.blit(pos, self.glyph(rotation), self.style);
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum SpriteError {
    #[error("sprite file contains no glyphs")]
    Empty,
    #[error("sprite file contains a blank glyph line")]
    EmptyGlyph,
    #[error("sprite file must contain 1 or 4 glyphs, but it contains {0}")]
    GlyphCount(usize),
    #[error(
        "glyph {glyph:?} is {width} columns wide, but at most {} are allowed",
        consts::CELL_WIDTH
    )]
    TooWide { glyph: String, width: usize },
}
