//! A stitched, linearly referenced route with cached statistics.

use crate::elevation::{ascent_descent, AscentDescent};
use crate::linear_ref::{
    add_m, index_at_length, index_at_point, point_at_length, project_poi, PoiProjection,
};
use crate::stitch::stitch_line;
use crate::{Geometry, Position, Result};

/// A route that went through the full preparation pipeline.
///
/// The constructor stitches strictly, writes m-values and caches length and
/// elevation totals, so holding a `Route` is proof the geometry is a single
/// connected, referenced line. Display and lookup code works from here
/// instead of re-running pipeline steps.
///
/// # Example
/// ```
/// use trailstitch::{Geometry, Position, Route};
///
/// let ways = Geometry::MultiLineString {
///     coordinates: vec![
///         vec![
///             Position::with_ele(11.0, 46.0, 1200.0),
///             Position::with_ele(11.0, 46.1, 1350.0),
///         ],
///         vec![
///             Position::with_ele(11.0, 46.1, 1350.0),
///             Position::with_ele(11.0, 46.2, 1280.0),
///         ],
///     ],
/// };
/// let route = Route::from_geometry(&ways).unwrap();
/// assert!((route.length_km() - 22.24).abs() < 0.01);
/// assert_eq!(route.ascent_descent().ascent, 150.0);
/// assert_eq!(route.ascent_descent().descent, -70.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    coords: Vec<Position>,
    length_km: f64,
    elevation: AscentDescent,
}

impl Route {
    /// Builds a route from the raw way batch of a relation.
    ///
    /// # Errors
    ///
    /// [`RouteError::UnsupportedGeometry`](crate::RouteError::UnsupportedGeometry)
    /// unless `geometry` is a MultiLineString,
    /// [`RouteError::Disconnected`](crate::RouteError::Disconnected) when
    /// its ways do not chain into a single line.
    pub fn from_geometry(geometry: &Geometry) -> Result<Route> {
        let mut coords = stitch_line(geometry.multi_line_coordinates()?)?;
        add_m(&mut coords);
        let length_km = coords.last().and_then(|p| p.m).unwrap_or(0.0);
        let elevation = ascent_descent(&coords);
        Ok(Route {
            coords,
            length_km,
            elevation,
        })
    }

    /// The stitched coordinates; every vertex carries an m-value.
    pub fn coords(&self) -> &[Position] {
        &self.coords
    }

    /// Total length in kilometers, the last vertex's m-value.
    pub fn length_km(&self) -> f64 {
        self.length_km
    }

    /// Cached ascent and descent totals.
    pub fn ascent_descent(&self) -> AscentDescent {
        self.elevation
    }

    /// See [`index_at_length`].
    pub fn index_at_length(&self, length_km: f64) -> usize {
        index_at_length(&self.coords, length_km)
    }

    /// See [`point_at_length`].
    pub fn point_at_length(&self, length_km: f64) -> Option<&Position> {
        point_at_length(&self.coords, length_km)
    }

    /// See [`index_at_point`].
    pub fn index_at_point(&self, query: &Position) -> Option<usize> {
        index_at_point(&self.coords, query)
    }

    /// See [`project_poi`].
    pub fn project_poi(&self, poi: &Position, tolerance_km: f64) -> Option<PoiProjection> {
        project_poi(&self.coords, poi, tolerance_km)
    }

    /// Hands the referenced line back out, for serialization.
    pub fn into_geometry(self) -> Geometry {
        Geometry::LineString {
            coordinates: self.coords,
        }
    }
}
