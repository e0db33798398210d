//! Segment orientation for route stitching.
//!
//! A route relation lists its member ways in traversal order, but each way
//! keeps the direction it happened to be drawn in. Before stitching,
//! consecutive ways are flipped in place so that each way's end meets the
//! next way's start.

use crate::Position;

/// Resolver state while walking the segment batch.
///
/// The first way of a chain cannot be oriented on its own: only once the
/// second way is known can we tell which of its ends faces forward. The
/// resolver therefore parks a chain opener in `AwaitingChainStart` and
/// decides its direction one step later. A segment that connects to neither
/// end of the running chain opens a new chain and is parked the same way.
enum ChainState {
    /// Index of a chain's first segment, orientation still undecided.
    AwaitingChainStart(usize),
    /// Extending a chain; `last_end` is the running endpoint.
    Chaining { last_end: Position },
}

/// Flips segments in place so consecutive segments share an endpoint.
///
/// After the call, every adjacent pair within a connected chain satisfies
/// `seg[i].last() == seg[i + 1].first()` under node equality
/// ([`Position::same_node`]). Segments that cannot connect are left where
/// they are, each starting its own chain; reporting on them is the
/// stitcher's job, so this function never fails. Batches of fewer than two
/// segments are returned untouched.
///
/// This is the one operation that mutates its argument; the stitchers work
/// on their own copy.
///
/// # Example
/// ```
/// use trailstitch::{resolve_orientation, Position};
///
/// let a = Position::new(11.0, 46.0);
/// let b = Position::new(11.1, 46.1);
/// let c = Position::new(11.2, 46.2);
///
/// // Second way points backwards: it ends where the first way ends.
/// let mut ways = vec![vec![a, b], vec![c, b]];
/// resolve_orientation(&mut ways);
/// assert!(ways[1][0].same_node(&b));
/// ```
pub fn resolve_orientation(segments: &mut [Vec<Position>]) {
    if segments.len() < 2 {
        return;
    }

    let mut state = ChainState::AwaitingChainStart(0);

    for i in 1..segments.len() {
        let (seg_start, seg_end) = match (segments[i].first(), segments[i].last()) {
            (Some(s), Some(e)) => (*s, *e),
            // A degenerate empty segment neither chains nor breaks a chain.
            _ => continue,
        };

        if let ChainState::AwaitingChainStart(pending) = state {
            match (segments[pending].first().copied(), segments[pending].last().copied()) {
                (Some(opener_first), Some(opener_last)) => {
                    // The opener points the wrong way when its *start* is the
                    // node shared with this segment.
                    let flip = opener_first.same_node(&seg_start)
                        || opener_first.same_node(&seg_end);
                    if flip {
                        segments[pending].reverse();
                    }
                    let last_end = if flip { opener_first } else { opener_last };
                    state = ChainState::Chaining { last_end };
                }
                _ => {
                    state = ChainState::AwaitingChainStart(i);
                    continue;
                }
            }
        }

        if let ChainState::Chaining { last_end } = state {
            if last_end.same_node(&seg_start) {
                state = ChainState::Chaining { last_end: seg_end };
            } else if last_end.same_node(&seg_end) {
                segments[i].reverse();
                state = ChainState::Chaining { last_end: seg_start };
            } else {
                // Disconnected: this segment opens the next chain.
                state = ChainState::AwaitingChainStart(i);
            }
        }
    }
}
