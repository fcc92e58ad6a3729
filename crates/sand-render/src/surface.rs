use glam::{IVec2, UVec2};
use serde::{Deserialize, Serialize};

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const BLACK: Colour = Colour::rgb(0, 0, 0);
    pub const WHITE: Colour = Colour::rgb(255, 255, 255);
    /// Light grey "sand" behind the screen drawing.
    pub const SAND: Colour = Colour::rgb(230, 230, 230);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }
}

/// A solid pen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pen {
    pub colour: Colour,
    pub width: u32,
}

impl Pen {
    pub const fn new(colour: Colour, width: u32) -> Self {
        Self { colour, width }
    }
}

/// Drawing operations the renderer needs from a host surface.
///
/// Coordinates are device pixels with the origin at the top-left corner.
/// `line_to` follows the classic current-position model: it draws from the
/// current position towards `to`, leaving the final pixel unpainted, and
/// then makes `to` the current position.
pub trait DrawSurface {
    fn select_pen(&mut self, pen: Pen);

    fn move_to(&mut self, to: IVec2);

    fn line_to(&mut self, to: IVec2);

    /// Paint the whole client area.
    fn fill(&mut self, colour: Colour);

    /// Client area size in device pixels.
    fn size(&self) -> UVec2;

    /// Reallocate for new client dimensions. Existing content may be lost.
    fn resize(&mut self, size: UVec2);
}
