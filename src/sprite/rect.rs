use crate::error::{DrawError, Result};
use crate::surface::Surface;
use crate::types::{NamedColor, Point};

/// Size and color of a box sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    width: f64,
    height: f64,
    color: Option<NamedColor>,
}

impl BoxShape {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0) {
            return Err(DrawError::validation("box size", "must be non-negative numbers"));
        }
        Ok(Self {
            width,
            height,
            color: None,
        })
    }

    pub fn with_color(mut self, color: NamedColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn color(&self) -> Option<NamedColor> {
        self.color
    }

    /// Axis-aligned overlap with shared edges counting as contact.
    pub fn touching(&self, at: Point, other: &BoxShape, other_at: Point) -> bool {
        !(other_at.x > at.x + self.width
            || other_at.x + other.width < at.x
            || other_at.y > at.y + self.height
            || other_at.y + other.height < at.y)
    }

    pub(crate) fn paint(&self, surface: &mut Surface, at: Point) -> Result<()> {
        surface.draw_box(at.x, at.y, self.width, self.height, self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(w: f64, h: f64) -> BoxShape {
        BoxShape::new(w, h).unwrap()
    }

    #[test]
    fn touching_is_symmetric() {
        let cases = [
            (shape(2.0, 1.0), Point::new(0.0, 0.0), shape(2.0, 8.0), Point::new(1.0, 0.5)),
            (shape(2.0, 1.0), Point::new(0.0, 0.0), shape(2.0, 8.0), Point::new(5.0, 0.0)),
            (shape(3.0, 3.0), Point::new(4.0, 4.0), shape(1.0, 1.0), Point::new(7.0, 7.0)),
            (shape(3.0, 3.0), Point::new(4.0, 4.0), shape(1.0, 1.0), Point::new(2.0, 2.5)),
        ];
        for (a, pa, b, pb) in cases {
            assert_eq!(a.touching(pa, &b, pb), b.touching(pb, &a, pa));
        }
    }

    #[test]
    fn shared_edges_touch() {
        let a = shape(2.0, 2.0);
        assert!(a.touching(Point::new(0.0, 0.0), &a, Point::new(2.0, 0.0)));
        assert!(!a.touching(Point::new(0.0, 0.0), &a, Point::new(2.5, 0.0)));
        assert!(a.touching(Point::new(3.0, 3.0), &a, Point::new(3.0, 3.0)));
    }

    #[test]
    fn rejects_negative_size() {
        assert!(BoxShape::new(-1.0, 2.0).is_err());
    }
}
