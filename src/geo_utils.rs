//! # Geometry Primitives
//!
//! Distance and projection primitives shared by the stitcher, the linear
//! referencer and the clipper.
//!
//! ## Overview
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`great_circle_km`] | Haversine distance between two positions, in kilometers |
//! | [`planar_degrees`] | Flat lon/lat distance for map hit-testing |
//! | [`nearest_on_segment`] | Closest point on a segment to a query position |
//! | [`polyline_length_km`] | Total great-circle length of a coordinate run |
//!
//! M-values are kilometers on a sphere of radius [`EARTH_RADIUS_KM`]; every
//! stored linear reference scales with that constant.
//!
//! ## Example
//!
//! ```rust
//! use trailstitch::geo_utils::great_circle_km;
//! use trailstitch::Position;
//!
//! let bolzano = Position::new(11.3548, 46.4983);
//! let merano = Position::new(11.1594, 46.6713);
//!
//! let km = great_circle_km(&bolzano, &merano);
//! assert!(km > 20.0 && km < 30.0);
//! ```

use crate::Position;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two positions in kilometers.
///
/// Haversine on a sphere of radius [`EARTH_RADIUS_KM`]. Elevation is ignored;
/// hiking-route distances are horizontal by convention.
#[inline]
pub fn great_circle_km(a: &Position, b: &Position) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Flat distance between two positions in degree space.
///
/// Used for hit-testing a map click against route vertices, where the query
/// already lives in the same unprojected lon/lat plane as the geometry and a
/// geodesic answer buys nothing.
#[inline]
pub fn planar_degrees(a: &Position, b: &Position) -> f64 {
    ((a.lon - b.lon).powi(2) + (a.lat - b.lat).powi(2)).sqrt()
}

/// Closest point to `q` on the segment from `a` to `b`.
///
/// Projects in degree space with the parameter clamped to the segment, so the
/// result is always between the two endpoints. A zero-length segment returns
/// `a`. The returned position carries no `ele`/`m`.
pub fn nearest_on_segment(q: &Position, a: &Position, b: &Position) -> Position {
    let dx = b.lon - a.lon;
    let dy = b.lat - a.lat;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return Position::new(a.lon, a.lat);
    }
    let t = (((q.lon - a.lon) * dx + (q.lat - a.lat) * dy) / len_sq).clamp(0.0, 1.0);
    Position::new(a.lon + t * dx, a.lat + t * dy)
}

/// Total great-circle length of a coordinate run in kilometers.
///
/// Empty and single-point runs have length 0.
pub fn polyline_length_km(coords: &[Position]) -> f64 {
    coords
        .windows(2)
        .map(|pair| great_circle_km(&pair[0], &pair[1]))
        .sum()
}
