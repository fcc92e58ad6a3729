use glam::{IVec2, UVec2};
use image::RgbaImage;
use std::path::Path;

use crate::surface::{Colour, DrawSurface, Pen};

/// An in-memory RGBA surface with a current pen and position.
///
/// Lines are rasterized with Bresenham's algorithm. Wider pens stamp a
/// square brush centred on each pixel of the line. Anything outside the
/// image is clipped.
pub struct RasterSurface {
    image: RgbaImage,
    pen: Pen,
    position: IVec2,
}

impl RasterSurface {
    pub fn new(size: UVec2, background: Colour) -> Self {
        let mut surface = Self {
            image: RgbaImage::new(size.x, size.y),
            pen: Pen::new(Colour::BLACK, 1),
            position: IVec2::ZERO,
        };
        surface.fill(background);
        surface
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn position(&self) -> IVec2 {
        self.position
    }

    /// Colour at `pixel`, or `None` outside the surface.
    pub fn pixel(&self, pixel: IVec2) -> Option<Colour> {
        if pixel.x < 0 || pixel.y < 0 {
            return None;
        }
        let (x, y) = (pixel.x as u32, pixel.y as u32);
        if x >= self.image.width() || y >= self.image.height() {
            return None;
        }
        let [r, g, b, _] = self.image.get_pixel(x, y).0;
        Some(Colour::rgb(r, g, b))
    }

    /// Number of pixels currently painted in `colour`.
    pub fn count(&self, colour: Colour) -> usize {
        let rgba = colour.to_rgba();
        self.image.pixels().filter(|p| **p == rgba).count()
    }

    pub fn save_png(&self, path: &Path) -> image::ImageResult<()> {
        self.image.save_with_format(path, image::ImageFormat::Png)
    }

    fn plot(&mut self, center: IVec2) {
        let width = self.pen.width.max(1) as i32;
        let low = center - IVec2::splat((width - 1) / 2);
        let rgba = self.pen.colour.to_rgba();
        let (w, h) = (self.image.width() as i32, self.image.height() as i32);
        for y in low.y.max(0)..(low.y + width).min(h) {
            for x in low.x.max(0)..(low.x + width).min(w) {
                self.image.put_pixel(x as u32, y as u32, rgba);
            }
        }
    }
}

impl DrawSurface for RasterSurface {
    fn select_pen(&mut self, pen: Pen) {
        self.pen = pen;
    }

    fn move_to(&mut self, to: IVec2) {
        self.position = to;
    }

    fn line_to(&mut self, to: IVec2) {
        let mut p = self.position;
        let d = IVec2::new((to.x - p.x).abs(), -(to.y - p.y).abs());
        let s = IVec2::new((to.x - p.x).signum(), (to.y - p.y).signum());
        let mut err = d.x + d.y;
        while p != to {
            self.plot(p);
            let e2 = 2 * err;
            if e2 >= d.y {
                err += d.y;
                p.x += s.x;
            }
            if e2 <= d.x {
                err += d.x;
                p.y += s.y;
            }
        }
        self.position = to;
    }

    fn fill(&mut self, colour: Colour) {
        let rgba = colour.to_rgba();
        for pixel in self.image.pixels_mut() {
            *pixel = rgba;
        }
    }

    fn size(&self) -> UVec2 {
        UVec2::new(self.image.width(), self.image.height())
    }

    fn resize(&mut self, size: UVec2) {
        if size != self.size() {
            self.image = RgbaImage::new(size.x, size.y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> RasterSurface {
        RasterSurface::new(UVec2::new(16, 16), Colour::WHITE)
    }

    #[test]
    fn test_new_is_filled() {
        let s = surface();
        assert_eq!(s.count(Colour::WHITE), 256);
    }

    #[test]
    fn test_line_excludes_end_pixel() {
        let mut s = surface();
        s.move_to(IVec2::new(2, 5));
        s.line_to(IVec2::new(6, 5));
        assert_eq!(s.count(Colour::BLACK), 4);
        assert_eq!(s.pixel(IVec2::new(2, 5)), Some(Colour::BLACK));
        assert_eq!(s.pixel(IVec2::new(5, 5)), Some(Colour::BLACK));
        assert_eq!(s.pixel(IVec2::new(6, 5)), Some(Colour::WHITE));
        assert_eq!(s.position(), IVec2::new(6, 5));
    }

    #[test]
    fn test_diagonal_line() {
        let mut s = surface();
        s.move_to(IVec2::new(0, 0));
        s.line_to(IVec2::new(4, 4));
        for i in 0..4 {
            assert_eq!(s.pixel(IVec2::new(i, i)), Some(Colour::BLACK));
        }
        assert_eq!(s.count(Colour::BLACK), 4);
    }

    #[test]
    fn test_zero_length_line_draws_nothing() {
        let mut s = surface();
        s.move_to(IVec2::new(3, 3));
        s.line_to(IVec2::new(3, 3));
        assert_eq!(s.count(Colour::BLACK), 0);
    }

    #[test]
    fn test_clipping() {
        let mut s = surface();
        s.move_to(IVec2::new(-10, 8));
        s.line_to(IVec2::new(30, 8));
        assert_eq!(s.count(Colour::BLACK), 16);
        assert_eq!(s.pixel(IVec2::new(-1, 8)), None);
    }

    #[test]
    fn test_wide_pen() {
        let mut s = surface();
        s.select_pen(Pen::new(Colour::BLACK, 3));
        s.move_to(IVec2::new(5, 5));
        s.line_to(IVec2::new(6, 5));
        assert_eq!(s.count(Colour::BLACK), 9);
    }

    #[test]
    fn test_resize() {
        let mut s = surface();
        s.resize(UVec2::new(8, 4));
        assert_eq!(s.size(), UVec2::new(8, 4));
    }
}
