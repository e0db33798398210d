//! Placing POI features along a stitched route.
//!
//! Huts, summits, water sources and junction signs arrive as their own
//! GeoJSON features. To render them on an elevation profile or in a trail
//! directory they need a place *along* the route: this module anchors each
//! feature to a single coordinate, projects that anchor onto the route and
//! writes the result back into the feature's properties.

use crate::linear_ref::project_poi;
use crate::{FeatureCollection, Geometry, Position};

/// The single coordinate a feature is projected by.
///
/// Point features anchor at their coordinate. LineString features (a water
/// pipeline, a via ferrata approach) anchor at their first point; MultiLine
/// features have no natural anchor and return `None`. Empty LineStrings
/// also yield `None`.
pub fn anchor_point(geometry: &Geometry) -> Option<&Position> {
    match geometry {
        Geometry::Point { coordinates } => Some(coordinates),
        Geometry::LineString { coordinates } => coordinates.first(),
        Geometry::MultiLineString { .. } => None,
    }
}

/// Projects every feature of a collection onto a route and stores the
/// result in the feature properties.
///
/// For each feature with an anchor point, `ele` is copied from the anchor
/// and, when the anchor snaps within `tolerance_km` of the route, `index`
/// and `distance_km` are filled from the projection. All three properties
/// are cleared first, so annotations from a previously selected route never
/// leak through. Features without an anchor are left cleared.
///
/// Returns the number of features that snapped onto the route.
pub fn annotate_pois(
    route: &[Position],
    pois: &mut FeatureCollection,
    tolerance_km: f64,
) -> usize {
    let total = pois.features.len();
    let mut snapped = 0;

    for feature in &mut pois.features {
        let props = &mut feature.properties;
        props.index = None;
        props.distance_km = None;
        props.ele = None;

        let anchor = match anchor_point(&feature.geometry) {
            Some(a) => *a,
            None => continue,
        };
        props.ele = anchor.ele;

        if let Some(projection) = project_poi(route, &anchor, tolerance_km) {
            props.index = Some(projection.index);
            props.distance_km = projection.distance_along_route;
            snapped += 1;
            log::debug!(
                "poi snapped to vertex {} at {:.3} km, {:.0} m off route",
                projection.index,
                projection.distance_along_route.unwrap_or(0.0),
                projection.snap_distance_km * 1000.0
            );
        }
    }

    log::debug!("{} of {} features snapped onto route", snapped, total);
    snapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linear_ref::{add_m, DEFAULT_SNAP_TOLERANCE_KM};
    use crate::Feature;

    fn route() -> Vec<Position> {
        let mut coords: Vec<Position> = (0..4)
            .map(|i| Position::new(11.0 + i as f64 * 0.01, 46.0))
            .collect();
        add_m(&mut coords);
        coords
    }

    fn point_feature(lon: f64, lat: f64, ele: Option<f64>) -> Feature {
        let coordinates = match ele {
            Some(e) => Position::with_ele(lon, lat, e),
            None => Position::new(lon, lat),
        };
        Feature::new(Geometry::Point { coordinates })
    }

    #[test]
    fn test_anchor_point_per_geometry() {
        let hut = Geometry::Point {
            coordinates: Position::new(11.0, 46.0),
        };
        assert!(anchor_point(&hut).is_some());

        let pipeline = Geometry::LineString {
            coordinates: vec![Position::new(11.0, 46.0), Position::new(11.1, 46.0)],
        };
        assert_eq!(anchor_point(&pipeline).map(|p| p.lon), Some(11.0));

        let empty_line = Geometry::LineString { coordinates: vec![] };
        assert!(anchor_point(&empty_line).is_none());

        let multi = Geometry::MultiLineString { coordinates: vec![] };
        assert!(anchor_point(&multi).is_none());
    }

    #[test]
    fn test_annotate_fills_snapped_features() {
        let route = route();
        let mut pois = FeatureCollection::empty();
        pois.features.push(point_feature(11.0151, 46.0001, Some(1820.0)));

        let snapped = annotate_pois(&route, &mut pois, DEFAULT_SNAP_TOLERANCE_KM);
        assert_eq!(snapped, 1);

        let props = &pois.features[0].properties;
        assert_eq!(props.index, Some(1));
        assert_eq!(props.distance_km, route[1].m);
        assert_eq!(props.ele, Some(1820.0));
    }

    #[test]
    fn test_annotate_clears_stale_annotations() {
        let route = route();
        let mut pois = FeatureCollection::empty();
        let mut far = point_feature(12.5, 47.5, None);
        far.properties.index = Some(77);
        far.properties.distance_km = Some(123.0);
        far.properties.ele = Some(999.0);
        pois.features.push(far);

        let snapped = annotate_pois(&route, &mut pois, DEFAULT_SNAP_TOLERANCE_KM);
        assert_eq!(snapped, 0);

        let props = &pois.features[0].properties;
        assert_eq!(props.index, None);
        assert_eq!(props.distance_km, None);
        // The anchor carries no elevation, so ele stays cleared too.
        assert_eq!(props.ele, None);
    }
}
