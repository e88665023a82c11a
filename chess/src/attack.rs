//! Attack sets: the squares a piece currently threatens.
//!
//! An attack set contains capture targets, not quiet destinations: a slider
//! ray contributes only the first occupied square it meets, and only when
//! that square holds an opposing piece. Pawns are the one exception — for
//! king-safety purposes a pawn threatens both forward diagonals whether or
//! not they are occupied.

use crate::board::{Board, StateError};
use crate::mask::SquareSet;
use crate::types::{Color, Coord, Piece};
use crate::geometry;

/// Orthogonal ray directions, as (file, rank) deltas.
pub(crate) const LINE_DIRS: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Diagonal ray directions.
pub(crate) const DIAG_DIRS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

pub(crate) const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
];

pub(crate) const KING_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// First occupied square along the ray from `src` (exclusive), if any.
fn first_occupied(b: &Board, src: Coord, delta_file: isize, delta_rank: isize) -> Option<Coord> {
    let mut cur = src;
    while let Some(next) = cur.try_shift(delta_file, delta_rank) {
        if b.get(next).is_occupied() {
            return Some(next);
        }
        cur = next;
    }
    None
}

/// Empty squares reachable along each ray, stopping before the first blocker.
pub(crate) fn ray_quiets(b: &Board, src: Coord, dirs: &[(isize, isize)]) -> SquareSet {
    let mut res = SquareSet::EMPTY;
    for &(df, dr) in dirs {
        let mut cur = src;
        while let Some(next) = cur.try_shift(df, dr) {
            if b.get(next).is_occupied() {
                break;
            }
            res.set(next);
            cur = next;
        }
    }
    res
}

/// The first blocker of each ray, kept only when it is an opposing piece.
pub(crate) fn ray_captures(
    b: &Board,
    src: Coord,
    dirs: &[(isize, isize)],
    mover: Color,
) -> SquareSet {
    let mut res = SquareSet::EMPTY;
    for &(df, dr) in dirs {
        if let Some(hit) = first_occupied(b, src, df, dr) {
            if b.get(hit).color() == Some(mover.inv()) {
                res.set(hit);
            }
        }
    }
    res
}

/// Offset squares that are on the board and empty.
pub(crate) fn step_quiets(b: &Board, src: Coord, offsets: &[(isize, isize)]) -> SquareSet {
    let mut res = SquareSet::EMPTY;
    for &(df, dr) in offsets {
        if let Some(dst) = src.try_shift(df, dr) {
            if b.get(dst).is_empty() {
                res.set(dst);
            }
        }
    }
    res
}

/// Offset squares that are on the board and hold an opposing piece.
pub(crate) fn step_captures(
    b: &Board,
    src: Coord,
    offsets: &[(isize, isize)],
    mover: Color,
) -> SquareSet {
    let mut res = SquareSet::EMPTY;
    for &(df, dr) in offsets {
        if let Some(dst) = src.try_shift(df, dr) {
            if b.get(dst).color() == Some(mover.inv()) {
                res.set(dst);
            }
        }
    }
    res
}

/// Both forward diagonals of a pawn, regardless of occupancy.
fn pawn_threats(src: Coord, color: Color) -> SquareSet {
    let fwd = geometry::pawn_forward_delta(color);
    let mut res = SquareSet::EMPTY;
    for df in [-1, 1] {
        if let Some(dst) = src.try_shift(df, fwd) {
            res.set(dst);
        }
    }
    res
}

/// The set of squares threatened by the piece at `src`.
pub fn attacks_from(b: &Board, src: Coord) -> Result<SquareSet, StateError> {
    let state = b.get(src).state().ok_or(StateError::EmptySquare(src))?;
    Ok(match state.kind {
        Piece::Rook => ray_captures(b, src, &LINE_DIRS, state.color),
        Piece::Bishop => ray_captures(b, src, &DIAG_DIRS, state.color),
        Piece::Queen => {
            ray_captures(b, src, &LINE_DIRS, state.color)
                | ray_captures(b, src, &DIAG_DIRS, state.color)
        }
        Piece::Knight => step_captures(b, src, &KNIGHT_OFFSETS, state.color),
        Piece::King => step_captures(b, src, &KING_OFFSETS, state.color),
        Piece::Pawn => pawn_threats(src, state.color),
    })
}

/// Returns `true` if any piece of color `by` attacks `target`.
///
/// The cast runs backwards from `target`: a rook ray hitting an opposing
/// rook or queen means the target is attacked, and so on for every movement
/// pattern. Sliders are probed first, then knights, pawns and the enemy
/// king; the order only matters for early exit.
pub fn is_attacked(b: &Board, target: Coord, by: Color) -> bool {
    for &(df, dr) in &LINE_DIRS {
        if let Some(hit) = first_occupied(b, target, df, dr) {
            let cell = b.get(hit);
            if cell.is(by, Piece::Rook) || cell.is(by, Piece::Queen) {
                return true;
            }
        }
    }
    for &(df, dr) in &DIAG_DIRS {
        if let Some(hit) = first_occupied(b, target, df, dr) {
            let cell = b.get(hit);
            if cell.is(by, Piece::Bishop) || cell.is(by, Piece::Queen) {
                return true;
            }
        }
    }
    for &(df, dr) in &KNIGHT_OFFSETS {
        if let Some(hit) = target.try_shift(df, dr) {
            if b.get(hit).is(by, Piece::Knight) {
                return true;
            }
        }
    }
    // A pawn of color `by` attacking `target` stands one step backwards from
    // the target along the attacker's own forward direction.
    let back = -geometry::pawn_forward_delta(by);
    for df in [-1, 1] {
        if let Some(hit) = target.try_shift(df, back) {
            if b.get(hit).is(by, Piece::Pawn) {
                return true;
            }
        }
    }
    for &(df, dr) in &KING_OFFSETS {
        if let Some(hit) = target.try_shift(df, dr) {
            if b.get(hit).is(by, Piece::King) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn sq(s: &str) -> Coord {
        s.parse().unwrap()
    }

    fn board(diagram: &str) -> Board {
        Board::from_diagram(diagram).unwrap()
    }

    #[test]
    fn empty_square_is_an_error() {
        let b = Board::initial();
        assert_eq!(
            attacks_from(&b, sq("e4")),
            Err(StateError::EmptySquare(sq("e4")))
        );
    }

    #[test]
    fn rook_ray_stops_at_first_blocker() {
        // White rook on d4 with a black pawn on d6 and a white pawn on g4.
        let b = board("......../......../...p..../......../...R..P./......../......../........");
        let attacks = attacks_from(&b, sq("d4")).unwrap();
        assert_eq!(attacks, SquareSet::from_coord(sq("d6")));
        // Nothing beyond the blockers, neither d7 nor h4.
        assert!(!attacks.has(sq("d7")));
        assert!(!attacks.has(sq("g4")));
        assert!(!attacks.has(sq("h4")));
    }

    #[test]
    fn queen_attacks_are_rook_and_bishop_union() {
        // Black queen on d4; white pawns on d6, f6 and b2.
        let b = board("......../......../...P.P../......../...q..../......../.P....../........");
        let q = sq("d4");
        let line = ray_captures(&b, q, &LINE_DIRS, Color::Black);
        let diag = ray_captures(&b, q, &DIAG_DIRS, Color::Black);
        let attacks = attacks_from(&b, q).unwrap();
        assert_eq!(attacks, line | diag);
        assert_eq!(attacks.len(), 3);
        assert!(attacks.has(sq("d6")));
        assert!(attacks.has(sq("f6")));
        assert!(attacks.has(sq("b2")));
    }

    #[test]
    fn knight_in_the_center_attacks_nothing_on_empty_board() {
        let mut b = Board::empty();
        b.put(sq("e4"), Cell::from_parts(Color::White, Piece::Knight));
        assert_eq!(attacks_from(&b, sq("e4")).unwrap(), SquareSet::EMPTY);
    }

    #[test]
    fn knight_attacks_only_enemy_occupants() {
        // Black pawns on d6 and f6, white pawn on c5: knight on e4.
        let b = board("......../......../...p.p../..P...../....N.../......../......../........");
        let attacks = attacks_from(&b, sq("e4")).unwrap();
        assert_eq!(attacks.len(), 2);
        assert!(attacks.has(sq("d6")));
        assert!(attacks.has(sq("f6")));
    }

    #[test]
    fn pawn_threatens_diagonals_regardless_of_occupancy() {
        let mut b = Board::empty();
        b.put(sq("e4"), Cell::from_parts(Color::White, Piece::Pawn));
        let attacks = attacks_from(&b, sq("e4")).unwrap();
        assert_eq!(attacks.len(), 2);
        assert!(attacks.has(sq("d5")));
        assert!(attacks.has(sq("f5")));

        b.put(sq("e4"), Cell::from_parts(Color::Black, Piece::Pawn));
        let attacks = attacks_from(&b, sq("e4")).unwrap();
        assert!(attacks.has(sq("d3")));
        assert!(attacks.has(sq("f3")));

        // Edge pawn threatens a single square.
        b.put(sq("a2"), Cell::from_parts(Color::White, Piece::Pawn));
        assert_eq!(attacks_from(&b, sq("a2")).unwrap().len(), 1);
    }

    #[test]
    fn rook_and_knight_reach_in_detection() {
        let b = board("......../......../......../....r.../......../......../....K.../........");
        assert!(is_attacked(&b, sq("e2"), Color::Black));
        assert!(!is_attacked(&b, sq("d2"), Color::Black));

        let b = board("......../......../......../......../...n..../......../....K.../........");
        assert!(is_attacked(&b, sq("e2"), Color::Black));
        assert!(is_attacked(&b, sq("f5"), Color::Black));
        assert!(!is_attacked(&b, sq("d2"), Color::Black));
    }

    #[test]
    fn slider_attacks_are_blocked() {
        // Black rook on e8, white pawn on e5 shields e-file below it.
        let b = board("....r.../......../......../....P.../......../......../....K.../........");
        assert!(is_attacked(&b, sq("e5"), Color::Black));
        assert!(!is_attacked(&b, sq("e2"), Color::Black));
        assert!(!is_attacked(&b, sq("e4"), Color::Black));
    }

    #[test]
    fn pawn_attack_direction_in_detection() {
        // Black pawn on d4 attacks c3 and e3, never c5 or e5.
        let b = board("......../......../......../......../...p..../......../......../........");
        assert!(is_attacked(&b, sq("c3"), Color::Black));
        assert!(is_attacked(&b, sq("e3"), Color::Black));
        assert!(!is_attacked(&b, sq("c5"), Color::Black));
        assert!(!is_attacked(&b, sq("d3"), Color::Black));
    }

    #[test]
    fn king_and_knight_detection() {
        let b = board("......../......../......../......../......../..n...../......../k.......");
        assert!(is_attacked(&b, sq("b2"), Color::Black)); // king a1
        assert!(is_attacked(&b, sq("d1"), Color::Black)); // knight c3
        assert!(is_attacked(&b, sq("e4"), Color::Black)); // knight c3
        assert!(!is_attacked(&b, sq("h8"), Color::Black));
    }
}
