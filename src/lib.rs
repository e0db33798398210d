//! # trailstitch
//!
//! Route geometry stitching and linear referencing for hiking maps.
//!
//! A map database stores a hiking route as an ordered bag of way fragments:
//! short linestrings that may run in either direction, repeat, or break.
//! This library rebuilds continuous routes from such fragments and answers
//! the distance queries a route display needs:
//!
//! - Orientation resolution and stitching of way fragments into continuous
//!   linestrings
//! - Cumulative-distance (M) referencing along a stitched route
//! - Distance-to-point and point-to-index lookups against referenced routes
//! - Snap-gated projection of POIs onto a route
//! - Ascent/descent aggregation and bounding-box clipping
//! - Directed-Hausdorff coverage checks between route variants
//!
//! ## Quick Start
//!
//! ```rust
//! use trailstitch::{add_m, ascent_descent, stitch, Geometry, Position};
//!
//! // Way fragments as fetched from the map database: inconsistent
//! // directions, shared endpoint nodes.
//! let ways = Geometry::MultiLineString {
//!     coordinates: vec![
//!         vec![
//!             Position::with_ele(11.344, 46.498, 262.0),
//!             Position::with_ele(11.350, 46.505, 310.0),
//!         ],
//!         vec![
//!             Position::with_ele(11.362, 46.512, 401.0),
//!             Position::with_ele(11.350, 46.505, 310.0),
//!         ],
//!     ],
//! };
//!
//! let stitched = stitch(&ways).expect("single connected chain");
//! if let Geometry::LineString { mut coordinates } = stitched {
//!     add_m(&mut coordinates);
//!     let length = coordinates.last().and_then(|p| p.m).unwrap_or(0.0);
//!     let gain = ascent_descent(&coordinates);
//!     println!("{length:.1} km, {:.0} m up", gain.ascent);
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// Unified error handling
pub mod error;
pub use error::{Result, RouteError};

// Geodesic and planar distance primitives
pub mod geo_utils;

// Whole-segment flips so consecutive ways share endpoints
pub mod orient;
pub use orient::resolve_orientation;

// Stitching way fragments into continuous linestrings
pub mod stitch;
pub use stitch::{stitch, stitch_all};

// M-values and distance/point lookups along a stitched route
pub mod linear_ref;
pub use linear_ref::{
    add_m, index_at_length, index_at_point, point_at_length, project_poi, PoiProjection,
    DEFAULT_SNAP_TOLERANCE_KM,
};

// Ascent/descent aggregation over elevation-tagged coordinates
pub mod elevation;
pub use elevation::{ascent_descent, AscentDescent};

// Bounding-box clipping of multi-line geometries
pub mod clip;
pub use clip::{clip, BBox};

// POI anchor extraction and batch annotation against a route
pub mod poi;
pub use poi::{anchor_point, annotate_pois};

// Route coverage checks (directed Hausdorff over densified lines)
pub mod similarity;
pub use similarity::{directed_hausdorff_m, is_covered_by, resample_max_spacing, CoverageConfig};

// Stitched-and-referenced route facade with cached statistics
pub mod route;
pub use route::Route;

// Synthetic trail generation for tests and benchmarks
pub mod synthetic;

// ============================================================================
// Core Types
// ============================================================================

/// A single geodetic coordinate in GeoJSON axis order (x = lon, y = lat).
///
/// Serialized as the position array `[lon, lat]`, `[lon, lat, ele]` or
/// `[lon, lat, ele, m]` — the shortest arity that preserves the populated
/// fields. `ele` is elevation in meters; `m` is the cumulative route distance
/// in kilometers assigned by [`add_m`] and absent until then. A referenced
/// position without elevation serializes `ele` as `null`.
///
/// # Example
/// ```
/// use trailstitch::Position;
///
/// let p: Position = serde_json::from_str("[11.3548, 46.4983, 262.0]").unwrap();
/// assert_eq!(p.ele, Some(262.0));
/// assert_eq!(p.m, None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub lon: f64,
    pub lat: f64,
    /// Elevation in meters, when the provider delivered one.
    pub ele: Option<f64>,
    /// Cumulative route distance in kilometers, present only after
    /// linear referencing.
    pub m: Option<f64>,
}

impl Position {
    /// Creates a position without elevation.
    pub fn new(lon: f64, lat: f64) -> Self {
        Position {
            lon,
            lat,
            ele: None,
            m: None,
        }
    }

    /// Creates a position with elevation.
    pub fn with_ele(lon: f64, lat: f64, ele: f64) -> Self {
        Position {
            lon,
            lat,
            ele: Some(ele),
            m: None,
        }
    }

    /// Whether two positions are the same map node.
    ///
    /// Ways that chain share bit-identical endpoint nodes, so node identity
    /// is exact equality on `lon` and `lat`, ignoring `ele` and `m`. There is
    /// deliberately no tolerance: a near miss is a topology error upstream,
    /// not something to paper over here.
    #[inline]
    pub fn same_node(&self, other: &Position) -> bool {
        self.lon == other.lon && self.lat == other.lat
    }
}

impl Serialize for Position {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let arity = match (self.ele, self.m) {
            (_, Some(_)) => 4,
            (Some(_), None) => 3,
            (None, None) => 2,
        };
        let mut seq = serializer.serialize_seq(Some(arity))?;
        seq.serialize_element(&self.lon)?;
        seq.serialize_element(&self.lat)?;
        if arity >= 3 {
            seq.serialize_element(&self.ele)?;
        }
        if let Some(m) = self.m {
            seq.serialize_element(&m)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PositionVisitor;

        impl<'de> Visitor<'de> for PositionVisitor {
            type Value = Position;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a position array [lon, lat] with optional ele and m")
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Position, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let lon = seq
                    .next_element::<f64>()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let lat = seq
                    .next_element::<f64>()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                // Trailing components are optional and may be JSON null.
                let ele = seq.next_element::<Option<f64>>()?.flatten();
                let m = seq.next_element::<Option<f64>>()?.flatten();
                if seq.next_element::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(5, &self));
                }
                Ok(Position { lon, lat, ele, m })
            }
        }

        deserializer.deserialize_seq(PositionVisitor)
    }
}

impl From<Position> for geo::Point<f64> {
    fn from(p: Position) -> Self {
        geo::Point::new(p.lon, p.lat)
    }
}

impl From<geo::Point<f64>> for Position {
    fn from(p: geo::Point<f64>) -> Self {
        Position::new(p.x(), p.y())
    }
}

/// A GeoJSON geometry.
///
/// Only the three geometry types the route and POI providers exchange are
/// modeled. The serde form is GeoJSON: a `type` tag next to the nested
/// `coordinates` arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// A single position; POI anchors.
    Point { coordinates: Position },
    /// One continuous run of positions; the canonical output of stitching.
    LineString { coordinates: Vec<Position> },
    /// An ordered batch of way segments; the raw route input.
    MultiLineString { coordinates: Vec<Vec<Position>> },
}

impl Geometry {
    /// GeoJSON name of this geometry's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point { .. } => "Point",
            Geometry::LineString { .. } => "LineString",
            Geometry::MultiLineString { .. } => "MultiLineString",
        }
    }

    /// Borrows the segment list of a MultiLineString.
    ///
    /// # Errors
    ///
    /// [`RouteError::UnsupportedGeometry`] for the other geometry types.
    pub fn multi_line_coordinates(&self) -> Result<&[Vec<Position>]> {
        match self {
            Geometry::MultiLineString { coordinates } => Ok(coordinates),
            other => Err(RouteError::UnsupportedGeometry {
                expected: "MultiLineString",
                found: other.type_name(),
            }),
        }
    }

    /// Converts to the `geo` ecosystem types, dropping `ele` and `m`.
    ///
    /// For handing stitched results to rendering or analysis code built on
    /// the `geo` crates.
    pub fn to_geo(&self) -> geo::Geometry<f64> {
        match self {
            Geometry::Point { coordinates } => geo::Geometry::Point((*coordinates).into()),
            Geometry::LineString { coordinates } => {
                geo::Geometry::LineString(line_to_geo(coordinates))
            }
            Geometry::MultiLineString { coordinates } => geo::Geometry::MultiLineString(
                geo::MultiLineString::new(coordinates.iter().map(|seg| line_to_geo(seg)).collect()),
            ),
        }
    }
}

fn line_to_geo(coords: &[Position]) -> geo::LineString<f64> {
    geo::LineString::new(
        coords
            .iter()
            .map(|p| geo::Coord { x: p.lon, y: p.lat })
            .collect(),
    )
}

/// Properties of a [`Feature`].
///
/// `tags` is the OSM key/value map the providers attach to every feature.
/// The optional fields are written by [`annotate_pois`] once a POI snaps
/// onto a route; they are skipped when absent. Members this crate does not
/// know about round-trip through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    /// Index of the route vertex this POI snapped to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    /// M-value of the snapped vertex, in kilometers from the route start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    /// Elevation of the POI anchor point, in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ele: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A GeoJSON feature: one geometry plus its properties.
///
/// A present `type` member must read `"Feature"`, mirroring the tag check
/// on [`Geometry`]; an omitted member is tolerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default)]
    kind: FeatureKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: Properties,
}

/// Tag value of a serialized [`Feature`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
enum FeatureKind {
    #[default]
    Feature,
}

impl Feature {
    /// Wraps a geometry into a feature with empty properties.
    pub fn new(geometry: Geometry) -> Self {
        Feature {
            kind: FeatureKind::Feature,
            id: None,
            geometry,
            properties: Properties::default(),
        }
    }

    /// Whether this feature is a route relation rather than a POI
    /// (`tags["type"] == "route"`).
    pub fn is_route(&self) -> bool {
        self.properties.tags.get("type").map(String::as_str) == Some("route")
    }
}

/// A GeoJSON feature collection, the providers' response envelope.
///
/// A present `type` member must read `"FeatureCollection"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default)]
    kind: CollectionKind,
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// Tag value of a serialized [`FeatureCollection`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
enum CollectionKind {
    #[default]
    FeatureCollection,
}

impl FeatureCollection {
    /// An empty collection, the placeholder a client renders before data
    /// arrives.
    pub fn empty() -> Self {
        FeatureCollection {
            kind: CollectionKind::FeatureCollection,
            features: Vec::new(),
        }
    }

    /// The first route feature, if the collection carries one.
    pub fn route(&self) -> Option<&Feature> {
        self.features.iter().find(|f| f.is_route())
    }
}

impl Default for FeatureCollection {
    fn default() -> Self {
        FeatureCollection::empty()
    }
}
