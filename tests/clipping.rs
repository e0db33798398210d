//! Tests for viewport clipping

use trailstitch::synthetic;
use trailstitch::{clip, BBox, Geometry, Position, RouteError};

fn segment(points: &[(f64, f64)]) -> Vec<Position> {
    points.iter().map(|(lon, lat)| Position::new(*lon, *lat)).collect()
}

#[test]
fn test_segment_kept_when_any_point_inside() {
    let ways = Geometry::MultiLineString {
        coordinates: vec![
            // Fully inside.
            segment(&[(11.01, 46.01), (11.02, 46.02)]),
            // One endpoint pokes in.
            segment(&[(11.05, 46.05), (13.00, 48.00)]),
            // Fully outside.
            segment(&[(13.10, 48.10), (13.20, 48.20)]),
        ],
    };
    let viewport = BBox::new(11.0, 11.1, 46.0, 46.1);

    let kept = clip(&ways, &viewport).unwrap();
    assert_eq!(kept.len(), 2);
    // Kept segments are whole, not truncated at the border.
    assert_eq!(kept[1][1].lon, 13.00);
}

#[test]
fn test_borders_are_inside() {
    let viewport = BBox::new(11.0, 11.1, 46.0, 46.1);
    assert!(viewport.contains(11.0, 46.1));
    assert!(viewport.contains(11.1, 46.0));
    assert!(!viewport.contains(11.1 + 1e-12, 46.0));

    let corner_touch = Geometry::MultiLineString {
        coordinates: vec![segment(&[(11.1, 46.1), (12.0, 47.0)])],
    };
    assert_eq!(clip(&corner_touch, &viewport).unwrap().len(), 1);
}

#[test]
fn test_crossing_segment_without_inside_point_is_dropped() {
    // Documented coarseness: both endpoints outside, line passes through.
    let crossing = Geometry::MultiLineString {
        coordinates: vec![segment(&[(10.0, 46.05), (12.0, 46.05)])],
    };
    let viewport = BBox::new(11.0, 11.1, 46.0, 46.1);
    assert!(clip(&crossing, &viewport).unwrap().is_empty());
}

#[test]
fn test_clip_preserves_order_and_content() {
    let trail = synthetic::trail(44, 200);
    let ways = synthetic::fragment(&trail, 10);
    let geometry = Geometry::MultiLineString {
        coordinates: ways.clone(),
    };
    // A viewport around the whole trail keeps everything as-is.
    let viewport = BBox::new(
        trail.iter().map(|p| p.lon).fold(f64::INFINITY, f64::min),
        trail.iter().map(|p| p.lon).fold(f64::NEG_INFINITY, f64::max),
        trail.iter().map(|p| p.lat).fold(f64::INFINITY, f64::min),
        trail.iter().map(|p| p.lat).fold(f64::NEG_INFINITY, f64::max),
    );
    assert_eq!(clip(&geometry, &viewport).unwrap(), ways);

    // Clipping never mutates its input.
    let before = geometry.clone();
    clip(&geometry, &BBox::new(0.0, 1.0, 0.0, 1.0)).unwrap();
    assert_eq!(geometry, before);
}

#[test]
fn test_empty_collection_and_empty_result() {
    let empty = Geometry::MultiLineString { coordinates: vec![] };
    let viewport = BBox::new(11.0, 11.1, 46.0, 46.1);
    assert!(clip(&empty, &viewport).unwrap().is_empty());
}

#[test]
fn test_clip_refuses_other_geometries() {
    let viewport = BBox::new(11.0, 11.1, 46.0, 46.1);
    let line = Geometry::LineString {
        coordinates: segment(&[(11.0, 46.0), (11.1, 46.1)]),
    };
    match clip(&line, &viewport) {
        Err(RouteError::UnsupportedGeometry { expected, found }) => {
            assert_eq!(expected, "MultiLineString");
            assert_eq!(found, "LineString");
        }
        other => panic!("expected UnsupportedGeometry, got {other:?}"),
    }
}
