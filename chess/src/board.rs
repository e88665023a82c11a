//! The board: an 8×8 grid of optional piece occupants.

use crate::mask::SquareSet;
use crate::types::{Cell, Color, Coord, File, Piece, PieceState, Rank};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Malformed-board and invalid-query conditions surfaced by the engine.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum StateError {
    /// A move or attack query was made for an empty square.
    #[error("square {0} is empty")]
    EmptySquare(Coord),
    /// The board holds no king of the given color, so king safety cannot be
    /// evaluated.
    #[error("no king of color {0:?} on the board")]
    NoKing(Color),
}

/// Position validation error.
///
/// The engine itself operates on whatever board it is given and only assumes
/// one king per color; [`Board::validate`] lets a caller check that
/// precondition (and basic pawn sanity) up front.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// One of the sides doesn't have a king.
    #[error("no king of color {0:?}")]
    NoKing(Color),
    /// One of the sides has more than one king.
    #[error("more than one king of color {0:?}")]
    TooManyKings(Color),
    /// There is a pawn on the first or the last rank.
    #[error("invalid pawn position {0}")]
    InvalidPawnRank(Coord),
}

/// Error parsing a board diagram.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum DiagramParseError {
    /// Rank holds more than 8 cells.
    #[error("too many cells in rank {0}")]
    RankTooLong(Rank),
    /// Rank holds fewer than 8 cells.
    #[error("not enough cells in rank {0}")]
    RankTooShort(Rank),
    /// More than 8 ranks.
    #[error("too many ranks")]
    TooManyRanks,
    /// Fewer than 8 ranks.
    #[error("not enough ranks")]
    NotEnoughRanks,
    /// Unexpected character.
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// An 8×8 mailbox of [`Cell`]s.
///
/// The board is the only mutable state the engine operates on. It carries no
/// side-to-move indicator and no castling or en-passant bookkeeping of its
/// own: everything the special-case rules need lives on the pieces
/// themselves (move counters and just-moved flags), and the side to move is
/// passed explicitly by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; 64],
}

impl Board {
    /// A board with no pieces on it.
    #[inline]
    pub const fn empty() -> Board {
        Board {
            cells: [Cell::EMPTY; 64],
        }
    }

    /// The standard starting position, all counters zeroed.
    pub fn initial() -> Board {
        let mut res = Board::empty();
        for file in File::iter() {
            res.put2(file, Rank::R2, Cell::from_parts(Color::White, Piece::Pawn));
            res.put2(file, Rank::R7, Cell::from_parts(Color::Black, Piece::Pawn));
        }
        for (color, rank) in [(Color::White, Rank::R1), (Color::Black, Rank::R8)] {
            res.put2(File::A, rank, Cell::from_parts(color, Piece::Rook));
            res.put2(File::B, rank, Cell::from_parts(color, Piece::Knight));
            res.put2(File::C, rank, Cell::from_parts(color, Piece::Bishop));
            res.put2(File::D, rank, Cell::from_parts(color, Piece::Queen));
            res.put2(File::E, rank, Cell::from_parts(color, Piece::King));
            res.put2(File::F, rank, Cell::from_parts(color, Piece::Bishop));
            res.put2(File::G, rank, Cell::from_parts(color, Piece::Knight));
            res.put2(File::H, rank, Cell::from_parts(color, Piece::Rook));
        }
        res
    }

    /// Builds a board from a 64-cell layout, indexed like [`Coord::index`].
    ///
    /// The cells are taken as given, movement history included; call
    /// [`Board::reset_counters`] afterwards for setup/reset semantics.
    #[inline]
    pub const fn from_cells(cells: [Cell; 64]) -> Board {
        Board { cells }
    }

    /// Parses a board from a diagram of 8 ranks separated by `/`, top rank
    /// first, with the cell characters of [`Cell::from_char`].
    ///
    /// Every parsed piece is fresh: zero move counter, just-moved flag
    /// cleared.
    pub fn from_diagram(s: &str) -> Result<Board, DiagramParseError> {
        Board::from_str(s)
    }

    /// Returns the contents of the square with coordinate `c`.
    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        self.cells[c.index()]
    }

    /// Returns the contents of the square with file `file` and rank `rank`.
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Cell {
        self.get(Coord::from_parts(file, rank))
    }

    /// Puts `cell` on the square with coordinate `c`.
    #[inline]
    pub fn put(&mut self, c: Coord, cell: Cell) {
        self.cells[c.index()] = cell;
    }

    /// Puts `cell` on the square with file `file` and rank `rank`.
    #[inline]
    pub fn put2(&mut self, file: File, rank: Rank, cell: Cell) {
        self.put(Coord::from_parts(file, rank), cell);
    }

    /// Mutable access to the piece on square `c`, if any.
    #[inline]
    pub fn state_mut(&mut self, c: Coord) -> Option<&mut PieceState> {
        self.cells[c.index()].state_mut()
    }

    /// A view over the raw cells.
    #[inline]
    pub fn as_cells(&self) -> &[Cell; 64] {
        &self.cells
    }

    /// Iterates over all pieces of the given color, in square order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Coord, PieceState)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.state()
                .filter(|s| s.color == color)
                .map(|s| (Coord::from_index(idx), s))
        })
    }

    /// Mask of all squares occupied by the given color.
    pub fn occupied_by(&self, color: Color) -> SquareSet {
        self.pieces(color).map(|(c, _)| c).collect()
    }

    /// Position of the king of color `c`, if present.
    ///
    /// With more than one king of a color on the board (which [`Board::validate`]
    /// rejects), the one with the lowest square index is returned.
    pub fn king_pos(&self, c: Color) -> Option<Coord> {
        self.pieces(c)
            .find(|(_, s)| s.kind == Piece::King)
            .map(|(coord, _)| coord)
    }

    /// Zeroes every piece's move counter and clears every just-moved flag,
    /// as a setup or reset does.
    pub fn reset_counters(&mut self) {
        for cell in self.cells.iter_mut() {
            if let Some(s) = cell.state_mut() {
                s.moves = 0;
                s.just_moved = false;
            }
        }
    }

    pub(crate) fn clear_just_moved(&mut self) {
        for cell in self.cells.iter_mut() {
            if let Some(s) = cell.state_mut() {
                s.just_moved = false;
            }
        }
    }

    /// Checks the preconditions the engine assumes: exactly one king per
    /// color and no pawns on the first or last rank.
    pub fn validate(&self) -> Result<(), ValidateError> {
        for color in [Color::White, Color::Black] {
            let kings = self
                .pieces(color)
                .filter(|(_, s)| s.kind == Piece::King)
                .count();
            if kings == 0 {
                return Err(ValidateError::NoKing(color));
            }
            if kings > 1 {
                return Err(ValidateError::TooManyKings(color));
            }
        }
        for coord in Coord::iter() {
            if self.get(coord).piece() == Some(Piece::Pawn)
                && matches!(coord.rank(), Rank::R8 | Rank::R1)
            {
                return Err(ValidateError::InvalidPawnRank(coord));
            }
        }
        Ok(())
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Board {
        Board::empty()
    }
}

impl fmt::Display for Board {
    /// Renders the diagram form accepted by [`Board::from_diagram`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            if rank != Rank::R8 {
                write!(f, "/")?;
            }
            for file in File::iter() {
                write!(f, "{}", self.get2(file, rank).as_char())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = DiagramParseError;

    fn from_str(s: &str) -> Result<Board, DiagramParseError> {
        let mut res = Board::empty();
        let mut rank = 0_usize;
        let mut file = 0_usize;
        for c in s.chars() {
            match c {
                '/' => {
                    if file < 8 {
                        return Err(DiagramParseError::RankTooShort(Rank::from_index(rank)));
                    }
                    rank += 1;
                    file = 0;
                    if rank >= 8 {
                        return Err(DiagramParseError::TooManyRanks);
                    }
                }
                _ => {
                    if file >= 8 {
                        return Err(DiagramParseError::RankTooLong(Rank::from_index(rank)));
                    }
                    let cell =
                        Cell::from_char(c).ok_or(DiagramParseError::UnexpectedChar(c))?;
                    res.put2(File::from_index(file), Rank::from_index(rank), cell);
                    file += 1;
                }
            }
        }
        if rank < 7 {
            return Err(DiagramParseError::NotEnoughRanks);
        }
        if file < 8 {
            return Err(DiagramParseError::RankTooShort(Rank::from_index(rank)));
        }
        Ok(res)
    }
}
