//! Game state classification for the side to move.

use crate::board::{Board, StateError};
use crate::legal::is_safe;
use crate::movegen::has_legal_moves;
use crate::types::Color;

use std::fmt;

/// Classification of the position for one side, combining "is the king
/// attacked" with "does any legal move exist".
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// King safe, moves available.
    Normal,
    /// King attacked, moves available.
    Check,
    /// King attacked, no legal move: the side to move has lost.
    Checkmate,
    /// King safe but no legal move: draw.
    Stalemate,
}

impl GameStatus {
    /// Returns `true` if the game is finished.
    #[inline]
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }

    /// Returns `true` if the side's king is currently attacked.
    #[inline]
    pub fn is_check(self) -> bool {
        matches!(self, GameStatus::Check | GameStatus::Checkmate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let s = match self {
            GameStatus::Normal => "normal",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
        };
        write!(f, "{}", s)
    }
}

/// Classifies the position for the given side to move.
///
/// Scans the side's pieces for any legal move and probes the king square
/// with a no-op safety query. Errors on a board without a king of that
/// color.
pub fn evaluate(b: &Board, side: Color) -> Result<GameStatus, StateError> {
    let king = b.king_pos(side).ok_or(StateError::NoKing(side))?;
    let in_check = !is_safe(b, king, king)?;
    let any_move = has_legal_moves(b, side)?;
    Ok(match (in_check, any_move) {
        (false, true) => GameStatus::Normal,
        (true, true) => GameStatus::Check,
        (true, false) => GameStatus::Checkmate,
        (false, false) => GameStatus::Stalemate,
    })
}
