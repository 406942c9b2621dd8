//! Ground-truth region representation.

use nalgebra::Point2;

/// Axis-aligned rectangle given by its top-left corner and extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

/// Closed polygon given by its vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub points: Vec<Point2<f64>>,
}

impl Polygon {
    pub fn new(points: Vec<Point2<f64>>) -> Self {
        Self { points }
    }

    /// Create a polygon from a flat `[x1, y1, x2, y2, ...]` slice.
    ///
    /// A trailing odd coordinate is ignored.
    pub fn from_slice(coords: &[f64]) -> Self {
        let points = coords
            .chunks_exact(2)
            .map(|c| Point2::new(c[0], c[1]))
            .collect();
        Self { points }
    }
}

/// Region annotation for a single frame.
///
/// Special regions carry a code instead of geometry and mark frames where the
/// target is not annotated or where the tracker has to be (re)initialized.
#[derive(Clone, Debug, PartialEq)]
pub enum Region {
    Special(i32),
    Rectangle(Rectangle),
    Polygon(Polygon),
}

impl Region {
    pub const UNKNOWN: i32 = 0;
    pub const INITIALIZE: i32 = 1;
    pub const FAILURE: i32 = 2;

    /// Shorthand for a rectangle region.
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Region::Rectangle(Rectangle::new(x, y, width, height))
    }

    pub fn is_special(&self) -> bool {
        matches!(self, Region::Special(_))
    }

    /// Axis-aligned bounding box of the region.
    ///
    /// # Returns
    /// `None` for special regions and polygons without vertices.
    pub fn bounds(&self) -> Option<Rectangle> {
        match self {
            Region::Special(_) => None,
            Region::Rectangle(r) => Some(*r),
            Region::Polygon(p) => {
                let first = p.points.first()?;
                let (mut min_x, mut min_y) = (first.x, first.y);
                let (mut max_x, mut max_y) = (first.x, first.y);

                for pt in &p.points[1..] {
                    min_x = min_x.min(pt.x);
                    min_y = min_y.min(pt.y);
                    max_x = max_x.max(pt.x);
                    max_y = max_y.max(pt.y);
                }

                Some(Rectangle::new(min_x, min_y, max_x - min_x, max_y - min_y))
            }
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Region::Special(Region::UNKNOWN)
    }
}
