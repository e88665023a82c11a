//! Committing moves to the board.
//!
//! [`apply`] performs the relocation the caller chose from a legal-move
//! mask, plus all the bookkeeping that goes with it: capture removal, the
//! rook hop of a castling king, en-passant victim removal, move counters and
//! just-moved flags, and the pending-promotion hand-off. It deliberately
//! does not re-validate legality — committing a move that was not in the
//! last computed legal mask is a caller contract violation.

use crate::board::Board;
use crate::geometry;
use crate::types::{CastlingSide, Cell, Coord, Piece, PieceState, Rank};

use std::fmt;

use thiserror::Error;

/// How a generated move relates to the occupancy it was generated against.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Move onto an empty square (castling included).
    Quiet,
    /// Capture of an opposing piece (en passant included).
    Capture,
}

/// A from/to square pair produced by move generation.
///
/// Moves are transient values: they are regenerated from the board for every
/// query and never persisted. Castling and en passant are not tagged
/// specially — [`apply`] re-derives them from the board state itself.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    kind: MoveKind,
    src: Coord,
    dst: Coord,
}

impl Move {
    #[inline]
    pub const fn new(kind: MoveKind, src: Coord, dst: Coord) -> Move {
        Move { kind, src, dst }
    }

    #[inline]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    #[inline]
    pub const fn src(&self) -> Coord {
        self.src
    }

    #[inline]
    pub const fn dst(&self) -> Coord {
        self.dst
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)
    }
}

/// Result of [`apply`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move is complete.
    Completed,
    /// A pawn reached the far rank; the caller must pick a replacement via
    /// [`complete_promotion`] before play continues.
    PromotionPending,
}

impl MoveOutcome {
    #[inline]
    pub fn is_promotion_pending(self) -> bool {
        self == MoveOutcome::PromotionPending
    }
}

/// Error applying a move.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ApplyError {
    /// There is no piece on the source square.
    #[error("cannot move from empty square {0}")]
    EmptySquare(Coord),
}

/// Error completing a promotion.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum PromoteError {
    /// There is no piece on the given square.
    #[error("no piece on square {0}")]
    EmptySquare(Coord),
    /// The piece on the given square is not a pawn.
    #[error("piece on square {0} is not a pawn")]
    NotAPawn(Coord),
    /// The square is not on the first or last rank.
    #[error("square {0} is not on a promotion rank")]
    NotPromotionRank(Coord),
}

/// Target piece for promotion.
///
/// Kings and pawns are not representable, so an illegal replacement cannot
/// even be requested.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PromotePiece {
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
}

impl From<PromotePiece> for Piece {
    #[inline]
    fn from(p: PromotePiece) -> Self {
        match p {
            PromotePiece::Knight => Piece::Knight,
            PromotePiece::Bishop => Piece::Bishop,
            PromotePiece::Rook => Piece::Rook,
            PromotePiece::Queen => Piece::Queen,
        }
    }
}

impl TryFrom<Piece> for PromotePiece {
    type Error = ();

    #[inline]
    fn try_from(p: Piece) -> Result<Self, Self::Error> {
        match p {
            Piece::Knight => Ok(PromotePiece::Knight),
            Piece::Bishop => Ok(PromotePiece::Bishop),
            Piece::Rook => Ok(PromotePiece::Rook),
            Piece::Queen => Ok(PromotePiece::Queen),
            _ => Err(()),
        }
    }
}

/// Moves the castling rook when the king has just moved two files.
fn relocate_castling_rook(b: &mut Board, king_src: Coord, king_dst: Coord) {
    let side = if king_dst.file() < king_src.file() {
        CastlingSide::Queen
    } else {
        CastlingSide::King
    };
    let rank = king_dst.rank();
    let rook_src = Coord::from_parts(geometry::castling_rook_src_file(side), rank);
    let rook_dst = Coord::from_parts(geometry::castling_rook_dst_file(side), rank);
    let mut rook = b.get(rook_src);
    if let Some(r) = rook.state_mut() {
        r.moves += 1;
        b.put(rook_dst, rook);
        b.put(rook_src, Cell::EMPTY);
    }
}

/// Removes the en-passant victim if the pawn move that just landed on
/// `dst` was an en-passant capture: a diagonal landing on rank index 2 or
/// 5 whose bypassed square (the origin rank at the destination file) holds
/// an opposing pawn that just made its initial double step.
fn remove_enpassant_victim(b: &mut Board, mover: PieceState, src: Coord, dst: Coord) {
    if !matches!(dst.rank(), Rank::R6 | Rank::R3) || dst.file() == src.file() {
        return;
    }
    let victim_sq = Coord::from_parts(dst.file(), src.rank());
    if let Some(v) = b.get(victim_sq).state() {
        if v.color != mover.color && v.kind == Piece::Pawn && v.just_moved && v.moves == 1 {
            b.put(victim_sq, Cell::EMPTY);
        }
    }
}

/// Commits the relocation `src` → `dst` on the board.
///
/// The destination occupant, if any, is removed. A king moving exactly two
/// files also relocates the corresponding rook; a pawn that en-passant
/// captured removes its victim. The mover's move counter is incremented,
/// every just-moved flag is cleared, and the flag is set on the piece now
/// standing on `dst`. `src == dst` is accepted and still counts as a move
/// for the bookkeeping.
///
/// Returns [`MoveOutcome::PromotionPending`] when a pawn lands on the first
/// or last rank.
pub fn apply(b: &mut Board, src: Coord, dst: Coord) -> Result<MoveOutcome, ApplyError> {
    let cell = b.get(src);
    let state = cell.state().ok_or(ApplyError::EmptySquare(src))?;

    b.put(dst, cell);
    if src != dst {
        b.put(src, Cell::EMPTY);
    }

    if state.kind == Piece::King
        && src.file().index().abs_diff(dst.file().index()) == 2
    {
        relocate_castling_rook(b, src, dst);
    }

    if state.kind == Piece::Pawn {
        remove_enpassant_victim(b, state, src, dst);
    }

    if let Some(s) = b.state_mut(dst) {
        s.moves += 1;
    }
    b.clear_just_moved();
    if let Some(s) = b.state_mut(dst) {
        s.just_moved = true;
    }

    if state.kind == Piece::Pawn && matches!(dst.rank(), Rank::R8 | Rank::R1) {
        return Ok(MoveOutcome::PromotionPending);
    }
    Ok(MoveOutcome::Completed)
}

/// Resolves a pending promotion by replacing the pawn on `sq` with a new
/// piece of the chosen kind and the same color.
///
/// The replacement inherits the pawn's move counter and just-moved flag
/// rather than starting fresh.
pub fn complete_promotion(
    b: &mut Board,
    sq: Coord,
    piece: PromotePiece,
) -> Result<(), PromoteError> {
    let state = b.get(sq).state().ok_or(PromoteError::EmptySquare(sq))?;
    if state.kind != Piece::Pawn {
        return Err(PromoteError::NotAPawn(sq));
    }
    if !matches!(sq.rank(), Rank::R8 | Rank::R1) {
        return Err(PromoteError::NotPromotionRank(sq));
    }
    b.put(
        sq,
        Cell::from(PieceState {
            color: state.color,
            kind: piece.into(),
            moves: state.moves,
            just_moved: state.just_moved,
        }),
    );
    Ok(())
}
