//! # gridchess
//!
//! A mailbox chess rules library. It answers three questions for a UI or
//! any other driver:
//!
//! - which destinations are legal for the piece on a square
//!   ([`movegen::legal::moves`]),
//! - how a chosen move changes the board ([`moves::apply`] and
//!   [`moves::complete_promotion`]),
//! - what state the position is in for the side to move
//!   ([`status::evaluate`]).
//!
//! The board is a plain 8×8 grid of optional pieces. Castling rights and
//! en-passant eligibility are not tracked separately: each piece carries a
//! move counter and a just-moved flag, and the special-case rules read
//! those directly. There is no search, no evaluation and no notation
//! parsing here — drivers feed squares in and get masks and outcomes back.
//!
//! ```
//! use gridchess::{movegen::legal, moves, status, Board, Color, GameStatus};
//!
//! let mut board = Board::initial();
//! let from = "e2".parse().unwrap();
//! let dests = legal::moves(&board, from).unwrap();
//! assert!(dests.has("e4".parse().unwrap()));
//!
//! moves::apply(&mut board, from, "e4".parse().unwrap()).unwrap();
//! assert_eq!(status::evaluate(&board, Color::Black), Ok(GameStatus::Normal));
//! ```

pub use gridchess_base::{geometry, mask, types};

pub mod attack;
pub mod board;
pub mod legal;
pub mod movegen;
pub mod moves;
pub mod status;

pub use board::{Board, DiagramParseError, StateError, ValidateError};
pub use mask::SquareSet;
pub use movegen::MoveList;
pub use moves::{Move, MoveKind, MoveOutcome, PromotePiece};
pub use status::GameStatus;
pub use types::{CastlingSide, Cell, Color, Coord, File, Piece, PieceState, Rank};
