//! Route coverage checks.
//!
//! Curated route relations are verified against independently authored
//! reference tracks: every part of the candidate line must run close to the
//! reference. Vertex spacing in OSM ways is wildly uneven, so both lines
//! are densified to a spacing bound first, then compared with the directed
//! Hausdorff distance over their point sets. All distances in this module
//! are meters.

use geo::{Distance, Haversine};

use crate::Position;

/// Thresholds for [`is_covered_by`], in meters.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageConfig {
    /// Densification bound: no two consecutive points farther apart than
    /// this after resampling.
    pub max_spacing_m: f64,
    /// Largest directed Hausdorff distance that still counts as covered.
    pub max_distance_m: f64,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        CoverageConfig {
            max_spacing_m: 100.0,
            max_distance_m: 100.0,
        }
    }
}

fn haversine_m(a: &Position, b: &Position) -> f64 {
    let from = geo::Point::new(a.lon, a.lat);
    let to = geo::Point::new(b.lon, b.lat);
    Haversine::distance(from, to)
}

/// Densifies a line until consecutive points are at most `max_spacing_m`
/// apart.
///
/// Original vertices are kept in place; inserted points interpolate lon/lat
/// linearly and carry neither elevation nor m. They exist to make Hausdorff
/// measurements honest on long straight links, not to enrich the geometry.
/// Inputs shorter than two points, and non-positive spacings, come back
/// unchanged.
pub fn resample_max_spacing(coords: &[Position], max_spacing_m: f64) -> Vec<Position> {
    if coords.len() < 2 || max_spacing_m <= 0.0 {
        return coords.to_vec();
    }

    let mut out = Vec::with_capacity(coords.len());
    out.push(coords[0]);
    for pair in coords.windows(2) {
        let d = haversine_m(&pair[0], &pair[1]);
        if d > max_spacing_m {
            // Evenly spaced so every link measures d / n <= the bound.
            let n = (d / max_spacing_m).ceil() as usize;
            for k in 1..n {
                let t = k as f64 / n as f64;
                out.push(Position::new(
                    pair[0].lon + t * (pair[1].lon - pair[0].lon),
                    pair[0].lat + t * (pair[1].lat - pair[0].lat),
                ));
            }
        }
        out.push(pair[1]);
    }
    out
}

/// Directed Hausdorff distance from `from` to `to`, in meters.
///
/// The farthest any point of `from` sits from the point set `to`. Empty
/// `from` is trivially covered and measures 0; a non-empty `from` against
/// an empty `to` has no finite answer and measures infinity.
pub fn directed_hausdorff_m(from: &[Position], to: &[Position]) -> f64 {
    let mut worst = 0.0_f64;
    for f in from {
        let mut nearest = f64::INFINITY;
        for t in to {
            let d = haversine_m(f, t);
            if d < nearest {
                nearest = d;
                if nearest <= worst {
                    // Cannot raise the maximum anymore.
                    break;
                }
            }
        }
        if nearest > worst {
            worst = nearest;
        }
    }
    worst
}

/// Whether `candidate` runs within `config.max_distance_m` of `reference`
/// over its whole length.
///
/// Both lines are densified first so sparse vertex sampling cannot hide a
/// stretch that wanders off. The check is asymmetric on purpose: a
/// candidate covering only half of the reference still passes. Run it both
/// ways to test that two lines describe the same route.
pub fn is_covered_by(
    candidate: &[Position],
    reference: &[Position],
    config: &CoverageConfig,
) -> bool {
    let candidate = resample_max_spacing(candidate, config.max_spacing_m);
    let reference = resample_max_spacing(reference, config.max_spacing_m);
    directed_hausdorff_m(&candidate, &reference) <= config.max_distance_m
}

#[cfg(test)]
mod tests {
    use super::*;

    // About 785 m per 0.01 degrees of longitude at this latitude.
    fn straight(lon_step: f64, points: usize) -> Vec<Position> {
        (0..points)
            .map(|i| Position::new(11.0 + i as f64 * lon_step, 45.0))
            .collect()
    }

    #[test]
    fn test_resample_bounds_every_link() {
        let sparse = straight(0.01, 5);
        let dense = resample_max_spacing(&sparse, 100.0);
        assert!(dense.len() > sparse.len());
        for pair in dense.windows(2) {
            assert!(haversine_m(&pair[0], &pair[1]) <= 100.0 + 1e-6);
        }
        // Original vertices survive.
        for p in &sparse {
            assert!(dense.iter().any(|q| q.same_node(p)));
        }
    }

    #[test]
    fn test_resample_leaves_dense_input_alone() {
        let dense = straight(0.0005, 4);
        assert_eq!(resample_max_spacing(&dense, 100.0), dense);
    }

    #[test]
    fn test_hausdorff_zero_on_itself() {
        let line = straight(0.01, 4);
        assert_eq!(directed_hausdorff_m(&line, &line), 0.0);
    }

    #[test]
    fn test_hausdorff_measures_offset() {
        let line = straight(0.01, 4);
        let shifted: Vec<Position> = line
            .iter()
            .map(|p| Position::new(p.lon, p.lat + 0.001))
            .collect();
        let d = directed_hausdorff_m(&shifted, &line);
        // 0.001 degrees of latitude is about 111 m.
        assert!((d - 111.0).abs() < 1.0);
    }

    #[test]
    fn test_hausdorff_empty_sets() {
        let line = straight(0.01, 3);
        assert_eq!(directed_hausdorff_m(&[], &line), 0.0);
        assert_eq!(directed_hausdorff_m(&line, &[]), f64::INFINITY);
    }

    #[test]
    fn test_coverage_catches_sparse_detour() {
        // Candidate and reference share endpoints 1.57 km apart, but the
        // candidate bulges sideways at its only interior vertex. Without
        // resampling, the reference's two endpoints would be the only
        // measuring sticks and the bulge's flanks would go unnoticed.
        let reference = straight(0.02, 2);
        let candidate = vec![
            Position::new(11.00, 45.0),
            Position::new(11.01, 45.01),
            Position::new(11.02, 45.0),
        ];
        let config = CoverageConfig::default();
        assert!(!is_covered_by(&candidate, &reference, &config));

        // The same check passes for a faithful candidate.
        let faithful = straight(0.01, 3);
        assert!(is_covered_by(&faithful, &reference, &config));
    }

    #[test]
    fn test_coverage_is_directed() {
        let reference = straight(0.01, 9);
        let half: Vec<Position> = reference[..4].to_vec();
        let config = CoverageConfig::default();
        assert!(is_covered_by(&half, &reference, &config));
        assert!(!is_covered_by(&reference, &half, &config));
    }
}
