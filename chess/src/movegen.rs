//! Move generation.
//!
//! Generation happens in two layers. The `semilegal` layer produces the
//! destinations consistent with a piece's movement pattern and the current
//! occupancy, split into quiet moves (onto empty squares) and captures,
//! without any regard for king safety. The `legal` layer replays every
//! candidate through [`crate::legal::is_safe`] and additionally grants the
//! king its castling candidates, whose conditions are validated right here
//! rather than by the generic filter.

use crate::attack::{self, DIAG_DIRS, KING_OFFSETS, KNIGHT_OFFSETS, LINE_DIRS};
use crate::board::{Board, StateError};
use crate::geometry;
use crate::legal::is_safe;
use crate::mask::SquareSet;
use crate::moves::{Move, MoveKind};
use crate::types::{CastlingSide, Color, Coord, Piece, PieceState};

use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;

/// List of moves for one side, bounded by the most any position can hold.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MoveList(ArrayVec<Move, 256>);

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

impl Deref for MoveList {
    type Target = ArrayVec<Move, 256>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn pawn_quiets(b: &Board, src: Coord, state: PieceState) -> SquareSet {
    let mut res = SquareSet::EMPTY;
    let fwd = geometry::pawn_forward_delta(state.color);
    if let Some(one) = src.try_shift(0, fwd) {
        if b.get(one).is_empty() {
            res.set(one);
            // The double advance wants the literal home rank, not merely a
            // zero counter: a pawn dropped elsewhere with a fresh counter
            // gets no double step, and one dropped back home does.
            if state.moves == 0 && src.rank() == geometry::pawn_home_rank(state.color) {
                if let Some(two) = one.try_shift(0, fwd) {
                    if b.get(two).is_empty() {
                        res.set(two);
                    }
                }
            }
        }
    }
    res
}

fn pawn_captures(b: &Board, src: Coord, state: PieceState) -> SquareSet {
    let mut res = SquareSet::EMPTY;
    let fwd = geometry::pawn_forward_delta(state.color);
    for df in [-1, 1] {
        if let Some(dst) = src.try_shift(df, fwd) {
            if b.get(dst).color() == Some(state.color.inv()) {
                res.set(dst);
            }
        }
    }
    res
}

/// En passant, evaluated independently for the left and right neighbor:
/// the capturing pawn must stand on one of the two middle ranks, and the
/// neighbor must be an opposing pawn that just made its initial double step
/// (just-moved flag set, move counter exactly 1). The landing square's own
/// occupancy is not examined.
fn enpassant_captures(b: &Board, src: Coord, state: PieceState) -> SquareSet {
    let mut res = SquareSet::EMPTY;
    if !geometry::is_enpassant_rank(src.rank()) {
        return res;
    }
    let fwd = geometry::pawn_forward_delta(state.color);
    for df in [-1, 1] {
        let beside = match src.try_shift(df, 0) {
            Some(c) => c,
            None => continue,
        };
        let victim = match b.get(beside).state() {
            Some(s) => s,
            None => continue,
        };
        if victim.color != state.color
            && victim.kind == Piece::Pawn
            && victim.just_moved
            && victim.moves == 1
        {
            if let Some(dst) = src.try_shift(df, fwd) {
                res.set(dst);
            }
        }
    }
    res
}

fn quiet_dests(b: &Board, src: Coord, state: PieceState) -> SquareSet {
    match state.kind {
        Piece::Rook => attack::ray_quiets(b, src, &LINE_DIRS),
        Piece::Bishop => attack::ray_quiets(b, src, &DIAG_DIRS),
        Piece::Queen => {
            attack::ray_quiets(b, src, &LINE_DIRS) | attack::ray_quiets(b, src, &DIAG_DIRS)
        }
        Piece::Knight => attack::step_quiets(b, src, &KNIGHT_OFFSETS),
        Piece::King => attack::step_quiets(b, src, &KING_OFFSETS),
        Piece::Pawn => pawn_quiets(b, src, state),
    }
}

fn capture_dests(b: &Board, src: Coord, state: PieceState) -> SquareSet {
    match state.kind {
        Piece::Rook => attack::ray_captures(b, src, &LINE_DIRS, state.color),
        Piece::Bishop => attack::ray_captures(b, src, &DIAG_DIRS, state.color),
        Piece::Queen => {
            attack::ray_captures(b, src, &LINE_DIRS, state.color)
                | attack::ray_captures(b, src, &DIAG_DIRS, state.color)
        }
        Piece::Knight => attack::step_captures(b, src, &KNIGHT_OFFSETS, state.color),
        Piece::King => attack::step_captures(b, src, &KING_OFFSETS, state.color),
        Piece::Pawn => pawn_captures(b, src, state) | enpassant_captures(b, src, state),
    }
}

/// One castling candidate, or `None` if any condition fails.
///
/// Checked relative to the king's actual square: the one or two squares the
/// king crosses must be empty and safe (probed with hypothetical king
/// relocations), the queenside rook additionally needs its knight square
/// clear, and the corner square must hold an unmoved rook of the king's
/// color. The caller has already established that the king itself is
/// unmoved and not in check.
fn castling_candidate(
    b: &Board,
    src: Coord,
    king: PieceState,
    side: CastlingSide,
) -> Result<Option<Coord>, StateError> {
    let dir: isize = match side {
        CastlingSide::Queen => -1,
        CastlingSide::King => 1,
    };
    let rook_offset: isize = match side {
        CastlingSide::Queen => -4,
        CastlingSide::King => 3,
    };

    let one = match src.try_shift(dir, 0) {
        Some(c) => c,
        None => return Ok(None),
    };
    let two = match one.try_shift(dir, 0) {
        Some(c) => c,
        None => return Ok(None),
    };
    if b.get(one).is_occupied() || b.get(two).is_occupied() {
        return Ok(None);
    }
    if !is_safe(b, src, one)? || !is_safe(b, src, two)? {
        return Ok(None);
    }
    if side == CastlingSide::Queen {
        let three = match two.try_shift(dir, 0) {
            Some(c) => c,
            None => return Ok(None),
        };
        if b.get(three).is_occupied() {
            return Ok(None);
        }
    }

    let rook_sq = match src.try_shift(rook_offset, 0) {
        Some(c) => c,
        None => return Ok(None),
    };
    match b.get(rook_sq).state() {
        Some(r) if r.color == king.color && r.kind == Piece::Rook && r.moves == 0 => {
            Ok(Some(two))
        }
        _ => Ok(None),
    }
}

fn castling_dests(b: &Board, src: Coord, king: PieceState) -> Result<SquareSet, StateError> {
    let mut res = SquareSet::EMPTY;
    if king.moves != 0 || !is_safe(b, src, src)? {
        return Ok(res);
    }
    for side in [CastlingSide::Queen, CastlingSide::King] {
        if let Some(dst) = castling_candidate(b, src, king, side)? {
            res.set(dst);
        }
    }
    Ok(res)
}

/// Destinations consistent with movement pattern and occupancy alone.
pub mod semilegal {
    use super::*;

    /// Quiet destinations (empty squares) for the piece on `src`.
    pub fn quiet_moves(b: &Board, src: Coord) -> Result<SquareSet, StateError> {
        let state = b.get(src).state().ok_or(StateError::EmptySquare(src))?;
        Ok(super::quiet_dests(b, src, state))
    }

    /// Capture destinations for the piece on `src`, en passant included.
    pub fn capture_moves(b: &Board, src: Coord) -> Result<SquareSet, StateError> {
        let state = b.get(src).state().ok_or(StateError::EmptySquare(src))?;
        Ok(super::capture_dests(b, src, state))
    }

    /// Union of quiet and capture destinations.
    pub fn moves(b: &Board, src: Coord) -> Result<SquareSet, StateError> {
        let state = b.get(src).state().ok_or(StateError::EmptySquare(src))?;
        Ok(super::quiet_dests(b, src, state) | super::capture_dests(b, src, state))
    }
}

/// Destinations that also leave the mover's own king safe.
pub mod legal {
    use super::*;
    use crate::legal::filter_safe;

    /// Legal quiet destinations; for a king this includes castling.
    pub fn quiet_moves(b: &Board, src: Coord) -> Result<SquareSet, StateError> {
        let state = b.get(src).state().ok_or(StateError::EmptySquare(src))?;
        let mut res = filter_safe(b, src, super::quiet_dests(b, src, state))?;
        if state.kind == Piece::King {
            res |= super::castling_dests(b, src, state)?;
        }
        Ok(res)
    }

    /// Legal capture destinations.
    pub fn capture_moves(b: &Board, src: Coord) -> Result<SquareSet, StateError> {
        let state = b.get(src).state().ok_or(StateError::EmptySquare(src))?;
        filter_safe(b, src, super::capture_dests(b, src, state))
    }

    /// The full legal destination mask for the piece on `src`. This is what
    /// a UI highlights once a square is selected.
    ///
    /// Any occupied square may be queried; enforcing whose turn it is
    /// belongs to the caller, which owns the side-to-move indicator.
    pub fn moves(b: &Board, src: Coord) -> Result<SquareSet, StateError> {
        Ok(quiet_moves(b, src)? | capture_moves(b, src)?)
    }

    /// Enumerates every legal move of the given color, in square order.
    pub fn gen_all(b: &Board, color: Color) -> Result<MoveList, StateError> {
        let mut res = MoveList::new();
        for (src, _) in b.pieces(color) {
            for dst in quiet_moves(b, src)? {
                res.push(Move::new(MoveKind::Quiet, src, dst));
            }
            for dst in capture_moves(b, src)? {
                res.push(Move::new(MoveKind::Capture, src, dst));
            }
        }
        Ok(res)
    }
}

/// Returns `true` if the given color has at least one legal move, stopping
/// at the first piece that can move.
pub fn has_legal_moves(b: &Board, color: Color) -> Result<bool, StateError> {
    for (src, _) in b.pieces(color) {
        if legal::moves(b, src)?.is_nonempty() {
            return Ok(true);
        }
    }
    Ok(false)
}
