//! Ascent and descent totals over a stitched route.

use serde::{Deserialize, Serialize};

use crate::Position;

/// Total climb and drop along a route, in the unit of the input elevations.
///
/// `descent` keeps the sign of the deltas that produced it: a route that
/// drops a net 30 m reports `descent == -30.0`. Display code formats the
/// magnitude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AscentDescent {
    pub ascent: f64,
    pub descent: f64,
}

/// Accumulates ascent and descent over the elevation channel of a route.
///
/// Coordinates are walked in order, so the caller passes a stitched line;
/// summing per-way totals would misread every junction. A coordinate
/// without elevation reads as 0, which fabricates a spurious delta wherever
/// tagged and untagged data meet. That is a data-quality gap in the source,
/// reported as-is rather than papered over.
///
/// # Example
/// ```
/// use trailstitch::{ascent_descent, Position};
///
/// let route = vec![
///     Position::with_ele(11.0, 46.0, 100.0),
///     Position::with_ele(11.1, 46.0, 150.0),
///     Position::with_ele(11.2, 46.0, 120.0),
///     Position::with_ele(11.3, 46.0, 170.0),
/// ];
/// let totals = ascent_descent(&route);
/// assert_eq!(totals.ascent, 100.0);
/// assert_eq!(totals.descent, -30.0);
/// ```
pub fn ascent_descent(coords: &[Position]) -> AscentDescent {
    let mut totals = AscentDescent::default();
    for pair in coords.windows(2) {
        let delta = pair[1].ele.unwrap_or(0.0) - pair[0].ele.unwrap_or(0.0);
        if delta > 0.0 {
            totals.ascent += delta;
        } else {
            totals.descent += delta;
        }
    }
    totals
}
