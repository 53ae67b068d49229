//! The rendering boundary.
//!
//! The core never draws anything itself. It pushes dirty cells and the
//! thin primitives the decorative layers need through the [`Surface`]
//! trait, and asks for frame callbacks through the [`Clock`] trait.
//! Both are implemented by the presentation layer (a terminal, a pixel
//! canvas, a test recorder).

use crate::{cells::Coord, error::Error};
use rand::{thread_rng, Rng};
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// An opaque color from its red, green and blue components.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// A color from its red, green, blue and alpha components.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);
    /// The light gray used for the background grid lines.
    pub const GRID: Self = Self::rgb(0xf0, 0xf0, 0xf0);
}

/// The drawing surface supplied by the presentation layer.
///
/// Coordinates are in pixels; the core multiplies cell coordinates by
/// the configured cell size before calling in. An implementation is
/// free to interpret "pixel" loosely (a terminal maps one cell to one
/// character cell and ignores sub-cell geometry).
pub trait Surface {
    /// Draws one cell covering `size_px` × `size_px` pixels.
    ///
    /// `None` means "erase this cell's area". The core only calls this
    /// for cells whose visual state changed since the previous redraw,
    /// except after a resize or clear, when the whole board is redrawn.
    fn draw_cell(&mut self, x: i32, y: i32, size_px: u32, color: Option<Color>);

    /// Draws a one-pixel line between two points.
    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Color);

    /// Draws a line of text with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color);

    /// Erases the whole surface.
    fn clear(&mut self);
}

/// The frame scheduling primitive supplied by the presentation layer.
///
/// The automaton arms exactly one callback per tick while it is
/// running. The presentation layer must call
/// [`Automaton::frame`](crate::Automaton::frame) once per request.
pub trait Clock {
    /// Requests a callback as soon as possible.
    fn request(&mut self);

    /// Requests a callback after `delay`.
    fn request_after(&mut self, delay: Duration);
}

/// The built-in color catalog.
///
/// Ports of the named color functions of the original canvas demos.
/// Gradients need the board size, so they are constructed through
/// [`Palette::from_name`] rather than `FromStr`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Palette {
    /// Translucent black.
    Black,
    /// Translucent green.
    Green,
    /// A new random color on every redraw.
    Random,
    /// Opacity grows with the y-coordinate.
    VGradient { height: i32 },
    /// Opacity grows with the x-coordinate.
    HGradient { width: i32 },
}

impl Palette {
    /// Looks a palette up by its catalog name.
    pub fn from_name(name: &str, width: i32, height: i32) -> Result<Self, Error> {
        match name {
            "black" => Ok(Self::Black),
            "green" => Ok(Self::Green),
            "random" => Ok(Self::Random),
            "v-gradient" => Ok(Self::VGradient { height }),
            "h-gradient" => Ok(Self::HGradient { width }),
            _ => Err(Error::UnknownColor(name.to_string())),
        }
    }

    /// The catalog names accepted by [`Palette::from_name`].
    pub const fn names() -> &'static [&'static str] {
        &["black", "green", "random", "v-gradient", "h-gradient"]
    }

    /// The color for a living cell at `coord`.
    pub fn color(&self, coord: Coord) -> Color {
        match *self {
            Self::Black => Color::rgba(0, 0, 0, 0x99),
            Self::Green => Color::rgba(0, 0x99, 0, 0x99),
            Self::Random => {
                let mut rng = thread_rng();
                Color::rgb(rng.gen(), rng.gen(), rng.gen())
            }
            Self::VGradient { height } => {
                let alpha = gradient_alpha(coord.1, height);
                Color::rgba(0, 0, 0, alpha)
            }
            Self::HGradient { width } => {
                let alpha = gradient_alpha(coord.0, width);
                Color::rgba(0, 0, 0, alpha)
            }
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::Black
    }
}

/// Maps a position within `0..extent` to an alpha in `0..=255`.
fn gradient_alpha(pos: i32, extent: i32) -> u8 {
    if extent <= 0 {
        return 0xff;
    }
    let ratio = (pos.clamp(0, extent) as f64) / (extent as f64);
    (ratio * 255.0).round() as u8
}
