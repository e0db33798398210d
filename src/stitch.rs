//! Stitches ordered way segments into continuous linestrings.
//!
//! OSM route relations arrive as a MultiLineString of member ways. The
//! stitchers orient a copy of those ways ([`resolve_orientation`]), then
//! concatenate them with each shared junction node kept exactly once.
//!
//! Two entry points cover the two callers:
//!
//! | Function | Contract | Use |
//! |----------|----------|-----|
//! | [`stitch`] | single chain or error | routes that must be measurable end to end |
//! | [`stitch_all`] | every chain, never fails | display of partially mapped routes |

use crate::orient::resolve_orientation;
use crate::{Geometry, Position, Result, RouteError};

/// Where a walk had to start a new chain.
struct ChainBreak {
    segment_index: usize,
    start: Position,
    end: Position,
}

/// Chains produced by one walk over an oriented batch.
struct Walk {
    chains: Vec<Vec<Position>>,
    first_break: Option<ChainBreak>,
}

/// Stitches the ways of a MultiLineString into a single LineString.
///
/// The input is not modified: the ways are copied, oriented and
/// concatenated, with the junction node shared by consecutive ways kept
/// once. A way that duplicates its predecessor, pointwise forward or
/// reversed, is dropped; relations sometimes carry the same way once per
/// travel direction.
///
/// An empty MultiLineString stitches to an empty LineString, and a single
/// way is returned as-is.
///
/// # Errors
///
/// [`RouteError::UnsupportedGeometry`] unless the input is a
/// MultiLineString, [`RouteError::Disconnected`] when the ways do not form
/// one chain. Callers that can render fragments fall back to
/// [`stitch_all`].
///
/// # Example
/// ```
/// use trailstitch::{stitch, Geometry, Position};
///
/// let ways = Geometry::MultiLineString {
///     coordinates: vec![
///         vec![Position::new(11.0, 46.0), Position::new(11.1, 46.1)],
///         vec![Position::new(11.1, 46.1), Position::new(11.2, 46.2)],
///     ],
/// };
/// let line = stitch(&ways).unwrap();
/// assert!(matches!(line, Geometry::LineString { ref coordinates } if coordinates.len() == 3));
/// ```
pub fn stitch(geometry: &Geometry) -> Result<Geometry> {
    let coordinates = stitch_line(geometry.multi_line_coordinates()?)?;
    Ok(Geometry::LineString { coordinates })
}

/// Strict walk over a raw segment slice, for callers that already hold one.
pub(crate) fn stitch_line(segments: &[Vec<Position>]) -> Result<Vec<Position>> {
    let walk = walk_segments(segments);
    if let Some(brk) = walk.first_break {
        return Err(RouteError::Disconnected {
            segment_index: brk.segment_index,
            start: brk.start,
            end: brk.end,
        });
    }
    Ok(walk.chains.into_iter().next().unwrap_or_default())
}

/// Stitches the ways of a MultiLineString into as few chains as possible.
///
/// Same walk as [`stitch`], but a way that connects to neither end of the
/// running chain starts a new chain instead of failing. The result is a
/// MultiLineString with one member per chain; a fully connected input
/// yields a single member.
///
/// # Errors
///
/// [`RouteError::UnsupportedGeometry`] unless the input is a
/// MultiLineString.
pub fn stitch_all(geometry: &Geometry) -> Result<Geometry> {
    let walk = walk_segments(geometry.multi_line_coordinates()?);
    if walk.chains.len() > 1 {
        log::debug!(
            "segments do not form a single line, keeping {} chains",
            walk.chains.len()
        );
    }
    Ok(Geometry::MultiLineString {
        coordinates: walk.chains,
    })
}

fn walk_segments(segments: &[Vec<Position>]) -> Walk {
    let mut oriented = segments.to_vec();
    resolve_orientation(&mut oriented);

    let mut chains: Vec<Vec<Position>> = Vec::new();
    let mut current: Vec<Position> = Vec::new();
    let mut first_break: Option<ChainBreak> = None;
    let mut prev: Option<&Vec<Position>> = None;

    for (i, seg) in oriented.iter().enumerate() {
        if seg.is_empty() {
            continue;
        }
        if let Some(p) = prev {
            if duplicate_of(seg, p) {
                log::debug!("dropping way {} duplicating its predecessor", i);
                continue;
            }
        }

        match current.last() {
            Some(endpoint) if seg[0].same_node(endpoint) => {
                // Junction node already present, append the rest.
                current.extend_from_slice(&seg[1..]);
            }
            Some(_) => {
                if first_break.is_none() {
                    first_break = Some(ChainBreak {
                        segment_index: i,
                        start: seg[0],
                        end: seg[seg.len() - 1],
                    });
                }
                chains.push(std::mem::take(&mut current));
                current.extend_from_slice(seg);
            }
            None => current.extend_from_slice(seg),
        }
        prev = Some(seg);
    }
    if !current.is_empty() {
        chains.push(current);
    }

    Walk { chains, first_break }
}

/// Pointwise node equality against the previous way, either direction.
fn duplicate_of(seg: &[Position], prev: &[Position]) -> bool {
    if seg.len() != prev.len() {
        return false;
    }
    if seg.iter().zip(prev.iter()).all(|(a, b)| a.same_node(b)) {
        return true;
    }
    seg.iter().zip(prev.iter().rev()).all(|(a, b)| a.same_node(b))
}
