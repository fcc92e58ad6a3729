use glam::{IVec2, UVec2};
use sand_core::Point;

/// Print margin as a fraction of the half-page: the drawing radius on paper
/// is `min(w, h) / 2 * 5 / 6`.
pub const PRINT_MARGIN: (i32, i32) = (5, 6);

/// Maps normalized trajectory coordinates onto one surface's pixels.
///
/// The centre is the middle of the client area and the radius is half of
/// its smaller side, so the unit circle just touches the nearer edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportMapping {
    pub center: IVec2,
    pub radius: i32,
}

impl ViewportMapping {
    pub fn new(center: IVec2, radius: i32) -> Self {
        Self { center, radius }
    }

    /// Mapping for an on-screen client area.
    pub fn for_client(size: UVec2) -> Self {
        let size = size.as_ivec2();
        Self {
            center: size / 2,
            radius: (size.x / 2).min(size.y / 2),
        }
    }

    /// Mapping for a print page, pulled in by `PRINT_MARGIN`.
    pub fn for_page(size: UVec2) -> Self {
        let mapping = Self::for_client(size);
        let (num, den) = PRINT_MARGIN;
        Self {
            radius: mapping.radius * num / den,
            ..mapping
        }
    }

    pub fn to_pixel(&self, point: Point) -> IVec2 {
        let r = f64::from(self.radius);
        IVec2::new(
            (point.x * r + f64::from(self.center.x)).round() as i32,
            (point.y * r + f64::from(self.center.y)).round() as i32,
        )
    }

    /// Inverse of `to_pixel`. `None` when the mapping has no extent.
    pub fn to_normalized(&self, pixel: IVec2) -> Option<Point> {
        if self.radius <= 0 {
            return None;
        }
        let r = f64::from(self.radius);
        let offset = pixel - self.center;
        Some(Point::new(f64::from(offset.x) / r, f64::from(offset.y) / r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_mapping_uses_smaller_side() {
        let m = ViewportMapping::for_client(UVec2::new(800, 600));
        assert_eq!(m.center, IVec2::new(400, 300));
        assert_eq!(m.radius, 300);
    }

    #[test]
    fn test_page_mapping_has_margin() {
        let m = ViewportMapping::for_page(UVec2::new(2400, 3000));
        assert_eq!(m.center, IVec2::new(1200, 1500));
        assert_eq!(m.radius, 1000);
    }

    #[test]
    fn test_to_pixel_rounds() {
        let m = ViewportMapping::new(IVec2::new(100, 100), 100);
        assert_eq!(m.to_pixel(Point::new(0.5, -0.5)), IVec2::new(150, 50));
        assert_eq!(m.to_pixel(Point::new(0.004, 0.006)), IVec2::new(100, 101));
        assert_eq!(m.to_pixel(Point::new(-0.006, 0.0)), IVec2::new(99, 100));
    }

    #[test]
    fn test_to_normalized_inverts_to_pixel() {
        let m = ViewportMapping::for_client(UVec2::new(640, 480));
        let p = m.to_normalized(IVec2::new(440, 120)).unwrap();
        assert!(p.approx_eq(&Point::new(0.5, -0.5)));
        assert_eq!(m.to_pixel(p), IVec2::new(440, 120));
    }

    #[test]
    fn test_empty_mapping_has_no_inverse() {
        let m = ViewportMapping::for_client(UVec2::new(1, 300));
        assert_eq!(m.radius, 0);
        assert!(m.to_normalized(IVec2::ZERO).is_none());
    }
}
