//! Viewport clipping of route geometry.

use serde::{Deserialize, Serialize};

use crate::{Geometry, Position, Result};

/// A map viewport in lon/lat, with the y axis growing downward.
///
/// The bounds come straight from screen-space viewport math, so `top` is
/// the numerically smaller y and `top <= bottom` holds. Constructing the
/// box is the caller's job; an empty or inverted box simply contains
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl BBox {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        BBox {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Whether `(x, y)` falls inside the box, borders included.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Keeps the segments of a MultiLineString that touch a bounding box.
///
/// A segment survives when any of its points lies inside the box, and kept
/// segments are copied whole, in input order, never truncated at the
/// border. A segment crossing the box between two outside points is
/// dropped; acceptable at viewport scale, where segments are short against
/// the box.
///
/// # Errors
///
/// [`RouteError::UnsupportedGeometry`](crate::RouteError::UnsupportedGeometry)
/// unless the input is a MultiLineString. Stitch to `LineString` only after
/// clipping, or wrap the line back into a single-member MultiLineString.
///
/// # Example
/// ```
/// use trailstitch::{clip, BBox, Geometry, Position};
///
/// let ways = Geometry::MultiLineString {
///     coordinates: vec![
///         vec![Position::new(11.0, 46.0), Position::new(11.1, 46.0)],
///         vec![Position::new(13.0, 48.0), Position::new(13.1, 48.0)],
///     ],
/// };
/// let viewport = BBox::new(10.9, 11.2, 45.9, 46.1);
/// let visible = clip(&ways, &viewport).unwrap();
/// assert_eq!(visible.len(), 1);
/// ```
pub fn clip(geometry: &Geometry, bbox: &BBox) -> Result<Vec<Vec<Position>>> {
    let segments = geometry.multi_line_coordinates()?;
    Ok(segments
        .iter()
        .filter(|seg| seg.iter().any(|p| bbox.contains(p.lon, p.lat)))
        .cloned()
        .collect())
}
