//! King safety: simulating a candidate move on a board copy.
//!
//! This is the single mechanism that forbids moving into check. Pseudo-legal
//! generation never consults check status; every candidate destination is
//! instead replayed here on an independent copy of the board, and kept only
//! if the mover's own king ends up unattacked.

use crate::attack;
use crate::board::{Board, StateError};
use crate::mask::SquareSet;
use crate::types::{Cell, Coord};

/// Returns `true` if relocating the piece on `src` to `dst` leaves the
/// mover's own king unattacked.
///
/// `src == dst` is a valid no-op query meaning "is this piece's king safe
/// right now"; with the king itself on `src` that reads "is this square
/// currently attacked".
///
/// The hypothetical board relocates exactly one piece: an en-passant victim
/// is not removed and a castling rook is not relocated. Counters and flags
/// are left untouched, and the real board is never mutated.
pub fn is_safe(b: &Board, src: Coord, dst: Coord) -> Result<bool, StateError> {
    let cell = b.get(src);
    let state = cell.state().ok_or(StateError::EmptySquare(src))?;

    let mut sim = b.clone();
    sim.put(dst, cell);
    if src != dst {
        sim.put(src, Cell::EMPTY);
    }

    let king = match sim.king_pos(state.color) {
        Some(k) => k,
        // Either the board never had this king, or the relocation just
        // overwrote it (an en-passant candidate may target an occupied
        // square). Landing on your own king is never safe.
        None => {
            return if b.king_pos(state.color).is_none() {
                Err(StateError::NoKing(state.color))
            } else {
                Ok(false)
            };
        }
    };
    Ok(!attack::is_attacked(&sim, king, state.color.inv()))
}

/// Keeps only the destinations of `dests` that pass [`is_safe`] for the
/// piece on `src`.
pub(crate) fn filter_safe(
    b: &Board,
    src: Coord,
    dests: SquareSet,
) -> Result<SquareSet, StateError> {
    let mut res = SquareSet::EMPTY;
    for dst in dests {
        if is_safe(b, src, dst)? {
            res.set(dst);
        }
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn sq(s: &str) -> Coord {
        s.parse().unwrap()
    }

    fn board(diagram: &str) -> Board {
        Board::from_diagram(diagram).unwrap()
    }

    #[test]
    fn noop_query_reports_check() {
        // Black rook pins nothing yet; the white king on e1 is on the open e-file.
        let b = board("....r.../......../......../......../......../......../......../....K...");
        assert!(!is_safe(&b, sq("e1"), sq("e1")).unwrap());
        // Stepping off the file is safe.
        assert!(is_safe(&b, sq("e1"), sq("d1")).unwrap());
        assert!(is_safe(&b, sq("e1"), sq("d2")).unwrap());
        // Staying on it is not.
        assert!(!is_safe(&b, sq("e1"), sq("e2")).unwrap());
    }

    #[test]
    fn capturing_the_attacker_is_safe() {
        let b = board("......../......../......../......../......../......../....r.../....K...");
        assert!(!is_safe(&b, sq("e1"), sq("e1")).unwrap());
        assert!(is_safe(&b, sq("e1"), sq("e2")).unwrap());
    }

    #[test]
    fn pinned_piece_exposes_king() {
        // White bishop on e2 shields the king from the rook on e8.
        let b = board("....r.../......../......../......../......../......../....B.../....K...");
        assert!(is_safe(&b, sq("e1"), sq("e1")).unwrap());
        // Moving the bishop off the file exposes the king.
        assert!(!is_safe(&b, sq("e2"), sq("d3")).unwrap());
        // Sliding it along the pin keeps the king covered.
        assert!(is_safe(&b, sq("e2"), sq("e2")).unwrap());
    }

    #[test]
    fn simulation_does_not_touch_the_real_board() {
        let b = board("....r.../......../......../......../......../......../....B.../....K...");
        let before = b.clone();
        let _ = is_safe(&b, sq("e2"), sq("d3")).unwrap();
        assert_eq!(b, before);
    }

    #[test]
    fn landing_on_your_own_king_is_unsafe_not_an_error() {
        let b = board("....k.../......../......../......../......../......../...K..../..N.....");
        assert_eq!(is_safe(&b, sq("c1"), sq("d2")), Ok(false));
    }

    #[test]
    fn missing_king_is_an_error() {
        let b = board("......../......../......../......../......../......../....P.../........");
        assert_eq!(
            is_safe(&b, sq("e2"), sq("e3")),
            Err(StateError::NoKing(Color::White))
        );
        assert_eq!(
            is_safe(&b, sq("a1"), sq("a2")),
            Err(StateError::EmptySquare(sq("a1")))
        );
    }

    #[test]
    fn filter_retains_only_safe_destinations() {
        let b = board("....r.../......../......../......../......../......../....B.../....K...");
        let dests = SquareSet::EMPTY
            .with(sq("d3"))
            .with(sq("f3"))
            .with(sq("e4")); // e4 stays on the pin file
        let filtered = filter_safe(&b, sq("e2"), dests).unwrap();
        assert_eq!(filtered, SquareSet::from_coord(sq("e4")));
    }
}
