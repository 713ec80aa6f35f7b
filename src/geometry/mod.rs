//! Geometric primitives for layout analysis.
//!
//! OCR engines report each fragment as a quadrilateral in image pixel space
//! (y grows downward). Layout analysis only needs the axis-aligned projection
//! of that quadrilateral, stored as an integer [`BoundingBox`].

use serde::{Deserialize, Serialize};

/// A 2D point in image space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_markdown::geometry::Point;
    ///
    /// let point = Point::new(10.0, 20.0);
    /// assert_eq!(point.x, 10.0);
    /// assert_eq!(point.y, 20.0);
    /// ```
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Check that both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Floating-point extent of a set of points: `(min_x, min_y, max_x, max_y)`.
///
/// Returns `None` for an empty slice or when any coordinate is NaN or infinite.
pub fn point_extent(points: &[Point]) -> Option<(f32, f32, f32, f32)> {
    let first = points.first()?;
    if !points.iter().all(Point::is_finite) {
        return None;
    }

    let mut extent = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        extent.0 = extent.0.min(p.x);
        extent.1 = extent.1.min(p.y);
        extent.2 = extent.2.max(p.x);
        extent.3 = extent.3.max(p.y);
    }
    Some(extent)
}

/// An axis-aligned bounding box with integer coordinates.
///
/// Serialized as `[min_x, min_y, max_x, max_y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct BoundingBox {
    /// Left edge
    pub min_x: i32,
    /// Top edge
    pub min_y: i32,
    /// Right edge
    pub max_x: i32,
    /// Bottom edge
    pub max_y: i32,
}

impl BoundingBox {
    /// Create a bounding box, swapping coordinates if given in the wrong order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_markdown::geometry::BoundingBox;
    ///
    /// let bbox = BoundingBox::new(30, 40, 10, 20);
    /// assert_eq!((bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y), (10, 20, 30, 40));
    /// ```
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    /// Project a polygon onto its axis-aligned bounding box.
    ///
    /// Coordinates are truncated toward zero, matching how OCR pipelines
    /// conventionally cast pixel positions to integers.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_markdown::geometry::{BoundingBox, Point};
    ///
    /// let quad = [
    ///     Point::new(10.7, 5.2),
    ///     Point::new(90.1, 6.0),
    ///     Point::new(89.9, 30.9),
    ///     Point::new(10.2, 29.5),
    /// ];
    /// let bbox = BoundingBox::from_points(&quad).unwrap();
    /// assert_eq!(bbox, BoundingBox::new(10, 5, 90, 30));
    /// ```
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let (x0, y0, x1, y1) = point_extent(points)?;
        Some(Self::new(x0 as i32, y0 as i32, x1 as i32, y1 as i32))
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// The four corners, clockwise from top-left.
    pub fn corners(&self) -> [Point; 4] {
        let (x0, y0) = (self.min_x as f32, self.min_y as f32);
        let (x1, y1) = (self.max_x as f32, self.max_y as f32);
        [
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ]
    }
}

impl From<[i32; 4]> for BoundingBox {
    fn from(v: [i32; 4]) -> Self {
        BoundingBox::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BoundingBox> for [i32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.min_x, b.min_y, b.max_x, b.max_y]
    }
}
