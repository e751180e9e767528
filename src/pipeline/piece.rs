//!
//! Piece requests and extent coordination.
//!
//! A piece request identifies which portion of a dataset is being asked of a
//! producer. The extent coordinator remaps a request for the combined output
//! into per-input requests: identical requests when streaming is disabled, and
//! distinct disjoint pieces when it is enabled.
//!

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A request for one portion of a dataset.
///
/// `piece` selects which of `num_pieces` equal subdivisions to produce.
/// `ghost_levels` asks for that many extra layers of boundary cells beyond the
/// piece's exclusive region, duplicating data across piece seams. The default
/// request is the whole dataset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PieceRequest {
    /// Index of the requested piece, in `0..num_pieces`.
    pub piece: usize,
    /// Total number of pieces the dataset is subdivided into.
    pub num_pieces: usize,
    /// Number of ghost cell layers to include past the piece boundary.
    pub ghost_levels: usize,
}

impl PieceRequest {
    /// Request piece `piece` out of `num_pieces`, without ghost cells.
    #[inline]
    pub fn new(piece: usize, num_pieces: usize) -> PieceRequest {
        PieceRequest {
            piece,
            num_pieces,
            ghost_levels: 0,
        }
    }

    /// Set the number of ghost levels on this request.
    #[inline]
    pub fn with_ghost_levels(self, ghost_levels: usize) -> PieceRequest {
        PieceRequest {
            ghost_levels,
            ..self
        }
    }
}

impl Default for PieceRequest {
    /// The whole dataset: piece 0 of 1, no ghost cells.
    #[inline]
    fn default() -> Self {
        PieceRequest::new(0, 1)
    }
}

/// Compute the piece that input `input` of `num_inputs` must produce to satisfy
/// `request` for the combined output.
///
/// With `streaming` disabled every input replicates the output request. With it
/// enabled, the output request is subdivided `num_inputs` times further and
/// input `i` is assigned piece `request.piece * num_inputs + i` of
/// `request.num_pieces * num_inputs`, so each input contributes exactly one
/// distinct piece per global request. For the common whole-output request this
/// assigns input `i` piece `i` of `num_inputs`.
///
/// Ghost levels are forwarded unchanged: piece producers already duplicate the
/// points on shared piece boundaries, and positive ghost levels additionally
/// duplicate whole boundary cells.
#[inline]
pub fn assign_piece(
    request: PieceRequest,
    input: usize,
    num_inputs: usize,
    streaming: bool,
) -> PieceRequest {
    debug_assert!(input < num_inputs);
    if !streaming {
        return request;
    }
    PieceRequest {
        piece: (request.piece * num_inputs + input) % (request.num_pieces * num_inputs),
        num_pieces: request.num_pieces * num_inputs,
        ghost_levels: request.ghost_levels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replication_when_streaming_is_off() {
        let request = PieceRequest::new(2, 5).with_ghost_levels(1);
        for input in 0..3 {
            assert_eq!(assign_piece(request, input, 3, false), request);
        }
    }

    #[test]
    fn distinct_pieces_when_streaming_is_on() {
        let request = PieceRequest::default();
        let assigned: Vec<_> = (0..3).map(|i| assign_piece(request, i, 3, true)).collect();

        assert_eq!(assigned[0], PieceRequest::new(0, 3));
        assert_eq!(assigned[1], PieceRequest::new(1, 3));
        assert_eq!(assigned[2], PieceRequest::new(2, 3));
    }

    #[test]
    fn piece_subdivision_covers_all_pieces_once() {
        // Over all global pieces, the per-input assignments enumerate every
        // subdivided piece exactly once.
        let num_inputs = 3;
        let num_pieces = 4;
        let mut seen = vec![0usize; num_pieces * num_inputs];
        for piece in 0..num_pieces {
            for input in 0..num_inputs {
                let assigned = assign_piece(
                    PieceRequest::new(piece, num_pieces),
                    input,
                    num_inputs,
                    true,
                );
                assert_eq!(assigned.num_pieces, num_pieces * num_inputs);
                seen[assigned.piece] += 1;
            }
        }
        assert!(seen.iter().all(|&count| count == 1));
    }

    #[test]
    fn ghost_levels_are_forwarded() {
        let request = PieceRequest::new(0, 2).with_ghost_levels(2);
        let assigned = assign_piece(request, 1, 2, true);
        assert_eq!(assigned.ghost_levels, 2);
    }

    #[test]
    fn single_input_streaming_matches_replication() {
        let request = PieceRequest::new(1, 4);
        assert_eq!(assign_piece(request, 0, 1, true), request);
    }
}
