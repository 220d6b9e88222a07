use crate::chess_move::ChessMove;
use crate::color::Color;
use crate::error::Error;
use crate::file::{File, ALL_FILES};
use crate::movegen::{legal_destinations, square_attacked_by, Destinations, MoveGen};
use crate::piece::Piece;
use crate::rank::{Rank, ALL_RANKS};
use crate::square::{Square, ALL_SQUARES, NUM_SQUARES};

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// The layout of the standard initial arrangement.
pub const STARTING_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Does some color have no legal moves at all?
///
/// A color with no legal moves may be checkmated or stalemated; this status
/// deliberately does not distinguish the two.  Combine it with
/// [`Board::in_check`] when the distinction matters.  White is tested first,
/// so `WhiteHasNoMoves` wins on the (malformed) boards where both colors are
/// stuck.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Debug, Hash)]
pub enum BoardStatus {
    Ongoing,
    WhiteHasNoMoves,
    BlackHasNoMoves,
}

/// A representation of a chess board.  That's why you're here, right?
///
/// The board owns every piece on it: an 8x8 array of slots, each empty or
/// holding exactly one `(Piece, Color)`.  It is a small `Copy` value, which
/// is what makes the simulate-and-test legality pass affordable without any
/// undo logic.
///
/// ```
/// use chesskit::{Board, ChessMove, Square};
///
/// let mut board = Board::default();
/// assert!(board.attempt_move(ChessMove::new(Square::E2, Square::E4)));
/// assert!(!board.attempt_move(ChessMove::new(Square::A1, Square::A5)));
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Board {
    pieces: [Option<(Piece, Color)>; NUM_SQUARES],
}

impl Board {
    /// Construct a new `Board` that is completely empty.
    /// Note: This does NOT give you the initial position.  Just a blank
    /// slate.
    pub fn new() -> Board {
        Board {
            pieces: [None; NUM_SQUARES],
        }
    }

    /// Look up a slot by raw indices, where rank 0 is White's backrank.
    /// Fails with `Error::OutOfBounds` instead of touching memory when either
    /// index leaves [0, 7].
    ///
    /// Move generation never goes through this: it builds `Square`s, which
    /// are in range by construction.  This is the boundary for callers that
    /// hold plain integers.
    pub fn get(&self, rank: usize, file: usize) -> Result<Option<(Piece, Color)>, Error> {
        if rank >= 8 || file >= 8 {
            return Err(Error::OutOfBounds { rank, file });
        }
        Ok(self.pieces[rank << 3 | file])
    }

    /// What piece is on a particular `Square`?  Is there even one?
    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        self.pieces[square.to_index()].map(|(piece, _)| piece)
    }

    /// What color piece is on a particular `Square`?  Is there even one?
    #[inline]
    pub fn color_on(&self, square: Square) -> Option<Color> {
        self.pieces[square.to_index()].map(|(_, color)| color)
    }

    /// Where is the king of this color?  `None` is a tolerated answer:
    /// partial and hand-built positions may have no king at all, and the
    /// engine stays total over them (see [`Board::in_check`]).
    pub fn king_square(&self, color: Color) -> Option<Square> {
        ALL_SQUARES
            .iter()
            .find(|square| self.pieces[square.to_index()] == Some((Piece::King, color)))
            .copied()
    }

    /// Relocate whatever occupies the source square to the destination,
    /// overwriting (and thereby capturing) anything that was there, then
    /// clear the source.  No legality check of any kind; an empty source is
    /// a no-op.
    ///
    /// This is the one primitive that mutates the board.  It is shared by
    /// [`Board::attempt_move`] after validation and by the legality filter,
    /// which replays candidates on private copies.
    pub fn apply_unchecked(&mut self, m: ChessMove) {
        if self.pieces[m.get_source().to_index()].is_none() {
            return;
        }
        self.pieces[m.get_dest().to_index()] = self.pieces[m.get_source().to_index()];
        self.pieces[m.get_source().to_index()] = None;
    }

    /// The legal destinations for the piece on `square`, empty when the
    /// square is unoccupied.  Legality is scoped to the occupant's own
    /// color; the board tracks no side to move.
    ///
    /// ```
    /// use chesskit::{Board, Square};
    ///
    /// let board = Board::default();
    /// assert_eq!(board.moves_from(Square::D2).len(), 2);
    /// assert_eq!(board.moves_from(Square::D1).len(), 0); // boxed-in queen
    /// assert_eq!(board.moves_from(Square::D4).len(), 0); // nobody home
    /// ```
    pub fn moves_from(&self, square: Square) -> Destinations {
        legal_destinations(self, square)
    }

    /// Commit a move iff it is legal for the piece on its source square.
    /// Returns whether the move was applied; on `false` (illegal request or
    /// empty source) the board is untouched.
    pub fn attempt_move(&mut self, m: ChessMove) -> bool {
        if self.pieces[m.get_source().to_index()].is_none() {
            return false;
        }
        if !legal_destinations(self, m.get_source()).contains(&m.get_dest()) {
            return false;
        }
        self.apply_unchecked(m);
        true
    }

    /// Is this color's king currently attacked?  A color with no king on the
    /// board is never in check; that keeps every query total over arbitrary
    /// positions rather than panicking on malformed ones.
    pub fn in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king_square) => square_attacked_by(self, king_square, !color),
            None => false,
        }
    }

    /// Does either color have no legal moves at all?
    ///
    /// ```
    /// use chesskit::{Board, BoardStatus, Color};
    /// use std::str::FromStr;
    ///
    /// assert_eq!(Board::default().status(), BoardStatus::Ongoing);
    ///
    /// // a back-rank mate: no black move exists, and Black is in check
    /// let board = Board::from_str("k7/8/8/8/8/8/8/RR6").expect("valid layout");
    /// assert_eq!(board.status(), BoardStatus::BlackHasNoMoves);
    /// assert!(board.in_check(Color::Black));
    /// ```
    pub fn status(&self) -> BoardStatus {
        if MoveGen::new_legal(self, Color::White).len() == 0 {
            return BoardStatus::WhiteHasNoMoves;
        }
        if MoveGen::new_legal(self, Color::Black).len() == 0 {
            return BoardStatus::BlackHasNoMoves;
        }
        BoardStatus::Ongoing
    }
}

impl Index<Square> for Board {
    type Output = Option<(Piece, Color)>;

    #[inline]
    fn index(&self, index: Square) -> &Self::Output {
        &self.pieces[index.to_index()]
    }
}

impl IndexMut<Square> for Board {
    #[inline]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.pieces[index.to_index()]
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::from_str(STARTING_POSITION).expect("valid starting layout")
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Import a board from a layout string, read rank by rank from the top
    /// (Black's backrank) down.  A digit skips that many empty files, `/`
    /// starts the next rank, and letters place pieces: uppercase White,
    /// lowercase Black.  Anything else fails with `Error::InvalidLayout`,
    /// and no partially filled board escapes.
    ///
    /// ```
    /// use chesskit::{Board, Color, Piece, Square};
    /// use std::str::FromStr;
    ///
    /// let board = Board::from_str("k7/8/8/8/3Q4/8/8/8").expect("valid layout");
    /// assert_eq!(board[Square::D4], Some((Piece::Queen, Color::White)));
    /// assert_eq!(board[Square::A8], Some((Piece::King, Color::Black)));
    /// ```
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut board = Board::new();
        let mut cur_rank = Rank::Eighth;
        let mut cur_file = File::A;

        for c in value.chars() {
            match c {
                '/' => {
                    cur_rank = cur_rank.down();
                    cur_file = File::A;
                }
                '1'..='8' => {
                    cur_file = File::from_index(cur_file.to_index() + (c as usize - '0' as usize));
                }
                _ => match Piece::from_char(c) {
                    Some((piece, color)) => {
                        board[Square::make_square(cur_rank, cur_file)] = Some((piece, color));
                        cur_file = cur_file.right();
                    }
                    None => {
                        return Err(Error::InvalidLayout {
                            layout: value.to_string(),
                        });
                    }
                },
            }
        }

        Ok(board)
    }
}

impl fmt::Display for Board {
    /// Export the layout string this board would be imported from.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut count = 0;
        for rank in ALL_RANKS.iter().rev() {
            for file in ALL_FILES.iter() {
                let square = Square::make_square(*rank, *file);

                if self.pieces[square.to_index()].is_some() && count != 0 {
                    write!(f, "{}", count)?;
                    count = 0;
                }

                if let Some((piece, color)) = self.pieces[square.to_index()] {
                    write!(f, "{}", piece.to_char(color))?;
                } else {
                    count += 1;
                }
            }

            if count != 0 {
                write!(f, "{}", count)?;
            }

            if *rank != Rank::First {
                write!(f, "/")?;
            }
            count = 0;
        }

        Ok(())
    }
}

#[test]
fn check_initial_position() {
    let computed_layout = format!("{}", Board::default());
    assert_eq!(computed_layout, STARTING_POSITION);
    assert_eq!(
        Board::from_str(STARTING_POSITION).expect("valid layout"),
        Board::default()
    );
}

#[test]
fn layout_export_round_trips_sparse_positions() {
    for layout in ["k7/8/1Q6/8/8/8/8/8", "8/8/8/3p4/8/1P1Q4/8/8", "8"].iter() {
        // note: "8" round-trips to a full empty-board layout
        let board = Board::from_str(layout).expect("valid layout");
        let exported = format!("{}", board);
        assert_eq!(
            Board::from_str(&exported).expect("valid layout"),
            board,
            "{} exported as {}",
            layout,
            exported
        );
    }
}

#[test]
fn unrecognized_layout_tokens_are_rejected() {
    let layout = "x7/8/8/8/8/8/8/8";
    assert_eq!(
        Board::from_str(layout),
        Err(Error::InvalidLayout {
            layout: layout.to_string()
        })
    );

    // trailing FEN fields are not part of this format
    assert!(Board::from_str("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w").is_err());
    assert!(Board::from_str("9/8/8/8/8/8/8/8").is_err());
}

#[test]
fn raw_access_is_bounds_checked() {
    let board = Board::default();
    assert_eq!(board.get(0, 0), Ok(Some((Piece::Rook, Color::White))));
    assert_eq!(board.get(7, 4), Ok(Some((Piece::King, Color::Black))));
    assert_eq!(board.get(3, 3), Ok(None));
    assert_eq!(board.get(8, 0), Err(Error::OutOfBounds { rank: 8, file: 0 }));
    assert_eq!(board.get(0, 9), Err(Error::OutOfBounds { rank: 0, file: 9 }));
}

#[test]
fn apply_unchecked_relocates_and_captures() {
    let mut board = Board::default();
    // ignores every movement rule on purpose
    board.apply_unchecked(ChessMove::new(Square::E2, Square::E7));
    assert_eq!(board.piece_on(Square::E2), None);
    assert_eq!(board[Square::E7], Some((Piece::Pawn, Color::White)));

    // an empty source is a no-op
    let before = board;
    board.apply_unchecked(ChessMove::new(Square::E5, Square::E6));
    assert_eq!(board, before);
}

#[test]
fn attempt_move_commits_legal_moves() {
    let mut board = Board::default();
    assert!(board.attempt_move(ChessMove::new(Square::E2, Square::E4)));
    assert_eq!(board.piece_on(Square::E4), Some(Piece::Pawn));
    assert_eq!(board.piece_on(Square::E2), None);

    // no side to move is tracked: Black may be moved next or not at all
    assert!(board.attempt_move(ChessMove::new(Square::E7, Square::E5)));
}

#[test]
fn attempt_move_rejects_illegal_requests_and_reports_it() {
    let mut board = Board::default();
    let before = board;
    assert!(!board.attempt_move(ChessMove::new(Square::E2, Square::E5)));
    assert!(!board.attempt_move(ChessMove::new(Square::E4, Square::E5)));
    assert!(!board.attempt_move(ChessMove::new(Square::D1, Square::H5)));
    assert_eq!(board, before);
}

#[test]
fn rook_gives_check_along_a_clear_file() {
    let board = Board::from_str("k7/8/8/8/8/8/8/R7").expect("valid layout");
    assert!(board.in_check(Color::Black));
    assert!(!board.in_check(Color::White));

    // the king may only step out of the rook's file
    let mut escapes: Vec<Square> = board.moves_from(Square::A8).into_iter().collect();
    escapes.sort();
    assert_eq!(escapes, vec![Square::B7, Square::B8]);
}

#[test]
fn kingless_colors_are_never_in_check() {
    let board = Board::from_str("8/8/8/8/8/8/8/Q7").expect("valid layout");
    assert!(!board.in_check(Color::White));
    assert!(!board.in_check(Color::Black));
}

#[test]
fn stalemate_reports_as_no_moves_without_check() {
    let board = Board::from_str("k7/8/1Q6/8/8/8/8/8").expect("valid layout");
    assert_eq!(board.status(), BoardStatus::BlackHasNoMoves);
    assert!(!board.in_check(Color::Black));
}

#[test]
fn checkmate_reports_as_no_moves_with_check() {
    let board = Board::from_str("k7/8/8/8/8/8/8/RR6").expect("valid layout");
    assert_eq!(board.status(), BoardStatus::BlackHasNoMoves);
    assert!(board.in_check(Color::Black));
}

#[test]
fn fools_mate_is_reported_for_white() {
    let board =
        Board::from_str("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR").expect("valid layout");
    assert_eq!(board.status(), BoardStatus::WhiteHasNoMoves);
    assert!(board.in_check(Color::White));
}

#[test]
fn status_is_ongoing_while_both_sides_have_moves() {
    assert_eq!(Board::default().status(), BoardStatus::Ongoing);

    // an empty board: nobody has moves, and White is reported first
    assert_eq!(Board::new().status(), BoardStatus::WhiteHasNoMoves);
}
