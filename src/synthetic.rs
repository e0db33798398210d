//! Synthetic trail generation for tests and benchmarks.
//!
//! Real route relations are awkward fixtures: they are large, they change
//! upstream, and their stitched ground truth is whatever the code said last
//! time. The generators here build trails with a known stitched result from
//! a seed, so tests can fragment, flip and break them and assert exact
//! recovery.
//!
//! ## Typical use
//!
//! ```
//! use trailstitch::synthetic;
//! use trailstitch::{stitch, Geometry};
//!
//! let trail = synthetic::trail(42, 200);
//! let mut ways = synthetic::fragment(&trail, 8);
//! synthetic::shuffle_flip(&mut ways, 7);
//!
//! let stitched = stitch(&Geometry::MultiLineString { coordinates: ways }).unwrap();
//! assert!(matches!(stitched, Geometry::LineString { ref coordinates } if coordinates.len() == 200));
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::Position;

/// Meters per degree of latitude.
const METERS_PER_DEG_LAT: f64 = 111_320.0;

/// Trailhead the generated trails leave from (Bolzano, South Tyrol).
const TRAILHEAD: Position = Position {
    lon: 11.3548,
    lat: 46.4983,
    ele: Some(262.0),
    m: None,
};

/// Generates a meandering mountain trail with elevation.
///
/// Step length varies between 30 and 80 m under a smoothly wandering
/// heading, so the line is irregular the way recorded GPS tracks are, yet
/// fully determined by `seed`. Elevation drifts with a slight upward bias.
pub fn trail(seed: u64, points: usize) -> Vec<Position> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut coords = Vec::with_capacity(points);

    let mut lon = TRAILHEAD.lon;
    let mut lat = TRAILHEAD.lat;
    let mut ele = TRAILHEAD.ele.unwrap_or(0.0);
    let mut heading: f64 = rng.gen_range(0.0..std::f64::consts::TAU);

    for _ in 0..points {
        coords.push(Position::with_ele(lon, lat, ele));

        let step_m = rng.gen_range(30.0..80.0);
        heading += rng.gen_range(-0.4..0.4);
        lat += step_m * heading.cos() / METERS_PER_DEG_LAT;
        lon += step_m * heading.sin() / (METERS_PER_DEG_LAT * lat.to_radians().cos());
        ele += rng.gen_range(-4.0..6.0);
    }
    coords
}

/// Splits a trail into consecutive way fragments.
///
/// Adjacent fragments share their junction node, the way consecutive OSM
/// ways of a relation share endpoint nodes standing at the junction.
/// `parts` is clamped so that every fragment keeps at least two points;
/// inputs too short to split come back as a single fragment.
pub fn fragment(coords: &[Position], parts: usize) -> Vec<Vec<Position>> {
    if coords.len() < 2 || parts <= 1 {
        return vec![coords.to_vec()];
    }
    let last = coords.len() - 1;
    let parts = parts.min(last);
    (0..parts)
        .map(|k| {
            let lo = k * last / parts;
            let hi = (k + 1) * last / parts;
            coords[lo..=hi].to_vec()
        })
        .collect()
}

/// Reverses a random subset of ways in place.
///
/// Way order stays untouched: a relation lists members in traversal order,
/// only their drawing direction is arbitrary.
pub fn shuffle_flip(ways: &mut [Vec<Position>], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for way in ways.iter_mut() {
        if rng.gen_bool(0.5) {
            way.reverse();
        }
    }
}

/// Breaks the topology by shifting every way from index `at` on sideways.
///
/// The batch then holds two genuinely disjoint chains, the fixture for the
/// strict stitcher's failure path.
pub fn disconnect(ways: &mut [Vec<Position>], at: usize, offset_deg: f64) {
    for way in ways.iter_mut().skip(at) {
        for p in way.iter_mut() {
            p.lon += offset_deg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{stitch, stitch_all, Geometry, RouteError};

    #[test]
    fn test_trail_is_deterministic() {
        assert_eq!(trail(7, 100), trail(7, 100));
        assert_ne!(trail(7, 100), trail(8, 100));
    }

    #[test]
    fn test_trail_has_elevation_everywhere() {
        assert!(trail(3, 50).iter().all(|p| p.ele.is_some()));
    }

    #[test]
    fn test_fragment_shares_junctions() {
        let line = trail(11, 120);
        let ways = fragment(&line, 7);
        assert_eq!(ways.len(), 7);
        for pair in ways.windows(2) {
            let junction = pair[0][pair[0].len() - 1];
            assert!(junction.same_node(&pair[1][0]));
        }
        // Junction duplication accounted for, nothing lost.
        let total: usize = ways.iter().map(Vec::len).sum();
        assert_eq!(total - (ways.len() - 1), line.len());
    }

    #[test]
    fn test_fragment_clamps_tiny_inputs() {
        let line = trail(5, 3);
        let ways = fragment(&line, 10);
        assert_eq!(ways.len(), 2);
        assert!(ways.iter().all(|w| w.len() >= 2));
        assert_eq!(fragment(&line, 0), vec![line.clone()]);
    }

    #[test]
    fn test_flipped_fragments_stitch_back() {
        let line = trail(23, 150);
        let mut ways = fragment(&line, 9);
        shuffle_flip(&mut ways, 41);

        let stitched = stitch(&Geometry::MultiLineString { coordinates: ways }).unwrap();
        match stitched {
            Geometry::LineString { coordinates } => {
                // Recovered forwards or backwards, both are the same trail.
                let forwards = coordinates
                    .iter()
                    .zip(line.iter())
                    .all(|(a, b)| a.same_node(b));
                let backwards = coordinates
                    .iter()
                    .rev()
                    .zip(line.iter())
                    .all(|(a, b)| a.same_node(b));
                assert_eq!(coordinates.len(), line.len());
                assert!(forwards || backwards);
            }
            other => panic!("expected LineString, got {}", other.type_name()),
        }
    }

    #[test]
    fn test_disconnect_breaks_strict_stitching() {
        let line = trail(2, 80);
        let mut ways = fragment(&line, 4);
        disconnect(&mut ways, 2, 1.0);

        let geometry = Geometry::MultiLineString { coordinates: ways };
        assert!(matches!(
            stitch(&geometry),
            Err(RouteError::Disconnected { segment_index: 2, .. })
        ));

        let tolerant = stitch_all(&geometry).unwrap();
        assert!(matches!(
            tolerant,
            Geometry::MultiLineString { ref coordinates } if coordinates.len() == 2
        ));
    }
}
