//! This is a rust chess rules engine for a single board position.
//!
//! It answers three questions for the UI layer sitting on top of it: which
//! moves are legal for a piece, is a color in check, and does some color
//! have no legal moves left.  Legality is derived the simple way: generate
//! the pseudo-legal moves per piece, then replay each candidate on a copy of
//! the board and drop the ones that leave the mover's own king attacked.
//!
//! Castling, en passant, promotion, draw rules, and search are out of scope.

mod board;
mod chess_move;
mod color;
mod error;
mod file;
mod movegen;
mod piece;
mod rank;
mod square;

pub use crate::board::{Board, BoardStatus, STARTING_POSITION};
pub use crate::chess_move::ChessMove;
pub use crate::color::{Color, ALL_COLORS, NUM_COLORS};
pub use crate::error::Error;
pub use crate::file::{File, ALL_FILES, NUM_FILES};
pub use crate::movegen::{
    legal_destinations, pseudo_legal_destinations, Destinations, MoveGen, MAX_DESTINATIONS,
};
pub use crate::piece::{Piece, ALL_PIECES, NUM_PIECES};
pub use crate::rank::{Rank, ALL_RANKS, NUM_RANKS};
pub use crate::square::{Square, ALL_SQUARES, NUM_SQUARES};
