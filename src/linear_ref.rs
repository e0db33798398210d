//! Linear referencing along a stitched route.
//!
//! Once a route is a single LineString, every vertex gets an m-value: the
//! great-circle distance in kilometers from the route start, measured along
//! the line ([`add_m`]). The lookups in this module resolve between the
//! three coordinate systems a hiking map juggles:
//!
//! | Function | From | To |
//! |----------|------|-----|
//! | [`index_at_length`] | km along route | vertex index |
//! | [`point_at_length`] | km along route | vertex |
//! | [`index_at_point`] | map position | vertex index |
//! | [`project_poi`] | off-route position | [`PoiProjection`] |

use serde::{Deserialize, Serialize};

use crate::geo_utils::{great_circle_km, nearest_on_segment, planar_degrees};
use crate::Position;

/// How far away a POI may sit and still snap onto the route, in km.
pub const DEFAULT_SNAP_TOLERANCE_KM: f64 = 0.1;

/// Writes each vertex's distance from the route start into its m slot.
///
/// Distances are great-circle kilometers accumulated along the line, so
/// `coords.last().m` is the route length. Existing m-values are
/// overwritten. Elevation does not contribute; a route climbing a switchback
/// measures the same as its map projection.
///
/// # Example
/// ```
/// use trailstitch::{add_m, Position};
///
/// let mut route = vec![Position::new(11.0, 46.0), Position::new(11.0, 47.0)];
/// add_m(&mut route);
/// assert_eq!(route[0].m, Some(0.0));
/// assert!((route[1].m.unwrap() - 111.19).abs() < 0.01);
/// ```
pub fn add_m(coords: &mut [Position]) {
    let mut total = 0.0;
    let mut last: Option<Position> = None;
    for pt in coords.iter_mut() {
        if let Some(prev) = last {
            total += great_circle_km(&prev, pt);
        }
        pt.m = Some(total);
        last = Some(*pt);
    }
}

/// Leftmost insertion index of `length_km` in the route's m sequence.
///
/// The coordinates must already carry m-values ([`add_m`]); on
/// unreferenced input every m reads as 0 and the answer is meaningless.
/// The index may equal `coords.len()` when `length_km` lies past the end
/// of the route.
pub fn index_at_length(coords: &[Position], length_km: f64) -> usize {
    coords.partition_point(|p| p.m.unwrap_or(0.0) < length_km)
}

/// The first vertex at or past `length_km` along the route.
///
/// `None` when `length_km` exceeds the route length.
///
/// # Example
/// ```
/// use trailstitch::{add_m, point_at_length, Position};
///
/// let mut route = vec![
///     Position::new(11.0, 46.0),
///     Position::new(11.0, 46.5),
///     Position::new(11.0, 47.0),
/// ];
/// add_m(&mut route);
/// let half = point_at_length(&route, 50.0).unwrap();
/// assert_eq!(half.lat, 46.5);
/// assert!(point_at_length(&route, 500.0).is_none());
/// ```
pub fn point_at_length(coords: &[Position], length_km: f64) -> Option<&Position> {
    coords.get(index_at_length(coords, length_km))
}

/// Index of the route vertex nearest to a query position.
///
/// A linear scan with flat lon/lat distance: the query comes from a map
/// interaction in the same unprojected plane, routes run a few thousand
/// vertices, and the error of ignoring latitude scaling cancels out when
/// comparing candidates meters apart. The earliest index wins ties.
/// `None` on an empty route.
pub fn index_at_point(coords: &[Position], query: &Position) -> Option<usize> {
    let mut nearest = f64::INFINITY;
    let mut found = None;
    for (i, pt) in coords.iter().enumerate() {
        let d = planar_degrees(pt, query);
        if d < nearest {
            nearest = d;
            found = Some(i);
        }
    }
    found
}

/// Where a POI landed on a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoiProjection {
    /// Start vertex of the route segment the POI projects onto.
    pub index: usize,
    /// That vertex's m-value; `None` when the route is unreferenced.
    pub distance_along_route: Option<f64>,
    /// Great-circle distance from the POI to its projection, in km.
    pub snap_distance_km: f64,
}

/// Projects a position onto the nearest point of a route, gated by a snap
/// tolerance.
///
/// Every segment is considered, not just the vertices: a POI between two
/// widely spaced vertices would otherwise snap tens of meters off. The
/// reported `index` and `distance_along_route` belong to the starting
/// vertex of the winning segment, which is as fine-grained as the route's
/// own sampling. Returns `None` when the nearest distance exceeds
/// `tolerance_km`; the position belongs to some other trail then. Sitting
/// exactly at the tolerance still snaps.
///
/// # Example
/// ```
/// use trailstitch::{add_m, project_poi, Position, DEFAULT_SNAP_TOLERANCE_KM};
///
/// let mut route = vec![
///     Position::new(11.0, 46.0),
///     Position::new(11.1, 46.0),
///     Position::new(11.2, 46.0),
/// ];
/// add_m(&mut route);
///
/// // A hut a handful of meters north of the second segment.
/// let hut = Position::new(11.15, 46.0003);
/// let spot = project_poi(&route, &hut, DEFAULT_SNAP_TOLERANCE_KM).unwrap();
/// assert_eq!(spot.index, 1);
///
/// // A summit 5 km away does not belong to this route.
/// let summit = Position::new(11.15, 46.05);
/// assert!(project_poi(&route, &summit, DEFAULT_SNAP_TOLERANCE_KM).is_none());
/// ```
pub fn project_poi(
    coords: &[Position],
    poi: &Position,
    tolerance_km: f64,
) -> Option<PoiProjection> {
    let mut best: Option<(usize, f64)> = None;

    if coords.len() == 1 {
        best = Some((0, great_circle_km(poi, &coords[0])));
    }
    for (i, pair) in coords.windows(2).enumerate() {
        let foot = nearest_on_segment(poi, &pair[0], &pair[1]);
        let d = great_circle_km(poi, &foot);
        let closer = match best {
            Some((_, best_d)) => d < best_d,
            None => true,
        };
        if closer {
            best = Some((i, d));
        }
    }

    let (index, snap_distance_km) = best?;
    if snap_distance_km > tolerance_km {
        return None;
    }
    Some(PoiProjection {
        index,
        distance_along_route: coords[index].m,
        snap_distance_km,
    })
}
