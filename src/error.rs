//! Error types for the stitching and clipping entry points.
//!
//! Degenerate inputs (empty batches, single segments, single points) are
//! handled by returning trivial results and never reach these variants; an
//! out-of-tolerance POI projection is a `None`, not an error.

use thiserror::Error;

use crate::Position;

/// Errors surfaced by route stitching, clipping and the [`Route`](crate::Route)
/// facade.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    /// Strict stitching met a segment that joins neither end of the running
    /// line. Carries the 0-based position of the offending segment in the
    /// input batch and its endpoints, so callers can report where the route
    /// topology breaks.
    #[error(
        "route disconnected at segment {segment_index}: \
         [{:.7}, {:.7}] .. [{:.7}, {:.7}] joins neither end of the stitched line",
        .start.lon, .start.lat, .end.lon, .end.lat
    )]
    Disconnected {
        segment_index: usize,
        start: Position,
        end: Position,
    },

    /// An operation was handed a geometry type it cannot process.
    #[error("cannot process geometry of type {found}: expected {expected}")]
    UnsupportedGeometry {
        expected: &'static str,
        found: &'static str,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RouteError>;
