//! # Strokes
//!
//! A stroke is one continuous freehand path, from pointer-down to pointer-up. Its color and
//! width are fixed when it is created; only its point list may grow, and only while it is
//! the canvas' in-progress stroke.

use crate::{brush::Thickness, color::Color, util::FiniteF32Error};

/// A position on the canvas, in pixels. Origin is the top left, +Y is down.
#[derive(Copy, Clone, PartialEq, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}
impl Point {
    /// Create a point, rejecting NaN or infinite coordinates.
    pub fn new(x: f32, y: f32) -> Result<Self, FiniteF32Error> {
        if x.is_finite() && y.is_finite() {
            Ok(Self { x, y })
        } else {
            Err(FiniteF32Error::NotFinite)
        }
    }
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f32 {
        let (dx, dy) = (self.x - other.x, self.y - other.y);
        dx * dx + dy * dy
    }
}
impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Stroke {
    // Most taps and short scribbles fit inline.
    points: smallvec::SmallVec<[Point; 8]>,
    color: Color,
    thickness: Thickness,
}
impl Stroke {
    /// An empty stroke that will be painted with the given settings.
    #[must_use]
    pub fn new(color: Color, thickness: Thickness) -> Self {
        Self {
            points: smallvec::SmallVec::new(),
            color,
            thickness,
        }
    }
    /// Build a finished stroke from a list of points.
    #[must_use]
    pub fn from_points(
        color: Color,
        thickness: Thickness,
        points: impl IntoIterator<Item = Point>,
    ) -> Self {
        Self {
            points: points.into_iter().collect(),
            color,
            thickness,
        }
    }
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }
    #[must_use]
    pub fn thickness(&self) -> Thickness {
        self.thickness
    }
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }
    /// Axis-aligned bounds `(min, max)` of the painted area, including the brush radius.
    /// `None` if the stroke has no points.
    #[must_use]
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let first = *self.points.first()?;
        let (min, max) = self.points.iter().fold((first, first), |(min, max), p| {
            (
                Point {
                    x: min.x.min(p.x),
                    y: min.y.min(p.y),
                },
                Point {
                    x: max.x.max(p.x),
                    y: max.y.max(p.y),
                },
            )
        });
        let radius = self.thickness.get() / 2.0;
        Some((
            Point {
                x: min.x - radius,
                y: min.y - radius,
            },
            Point {
                x: max.x + radius,
                y: max.y + radius,
            },
        ))
    }
    // Growth is reserved for the canvas, which owns the in-progress stroke.
    pub(crate) fn push(&mut self, point: Point) {
        self.points.push(point);
    }
}

#[cfg(test)]
mod test {
    use super::{Point, Stroke};
    use crate::{brush::Thickness, color::Color};
    #[test]
    fn bounds_include_radius() {
        let stroke = Stroke::from_points(
            Color::BLACK,
            Thickness::new(4.0).unwrap(),
            [Point { x: 10.0, y: 5.0 }, Point { x: 2.0, y: 8.0 }],
        );
        let (min, max) = stroke.bounds().unwrap();
        assert_eq!(min, Point { x: 0.0, y: 3.0 });
        assert_eq!(max, Point { x: 12.0, y: 10.0 });
        assert!(Stroke::new(Color::BLACK, Thickness::HAIRLINE)
            .bounds()
            .is_none());
    }
    #[test]
    fn point_rejects_nan() {
        assert!(Point::new(f32::NAN, 0.0).is_err());
        assert!(Point::new(0.0, f32::INFINITY).is_err());
        assert_eq!(Point::new(1.0, 2.0), Ok(Point { x: 1.0, y: 2.0 }));
    }
}
