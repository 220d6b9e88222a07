use crate::board::Board;
use crate::chess_move::ChessMove;
use crate::color::Color;
use crate::piece::Piece;
use crate::square::{Square, ALL_SQUARES};
use arrayvec::ArrayVec;

/// The most destinations any single piece can have (a queen near the middle
/// of an open board).
pub const MAX_DESTINATIONS: usize = 27;

/// The destinations one piece can reach, in generation order.
pub type Destinations = ArrayVec<Square, MAX_DESTINATIONS>;

const ROOK_RAYS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const BISHOP_RAYS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const KING_STEPS: [(i8, i8); 8] = [
    (1, -1),
    (1, 0),
    (1, 1),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Walk outward along each ray, one square at a time.  A same-color piece
/// ends the ray before its square; an opposite-color piece is included as a
/// capture and then ends the ray.
fn ray_destinations(
    board: &Board,
    square: Square,
    color: Color,
    rays: &[(i8, i8)],
    moves: &mut Destinations,
) {
    for &(rank_delta, file_delta) in rays {
        let mut current = square;
        while let Some(next) = current.offset(rank_delta, file_delta) {
            match board[next] {
                None => {
                    moves.push(next);
                    current = next;
                }
                Some((_, occupant)) => {
                    if occupant != color {
                        moves.push(next);
                    }
                    break;
                }
            }
        }
    }
}

/// One fixed step per offset, keeping in-bounds squares that are empty or
/// hold an opposite-color piece.
fn step_destinations(
    board: &Board,
    square: Square,
    color: Color,
    steps: &[(i8, i8)],
    moves: &mut Destinations,
) {
    for &(rank_delta, file_delta) in steps {
        if let Some(dest) = square.offset(rank_delta, file_delta) {
            match board[dest] {
                None => moves.push(dest),
                Some((_, occupant)) => {
                    if occupant != color {
                        moves.push(dest);
                    }
                }
            }
        }
    }
}

/// Pawns are the only asymmetric piece: they push toward the opposing
/// backrank, may push twice from their starting rank when both squares are
/// clear, and capture diagonally forward only.
fn pawn_destinations(board: &Board, square: Square, color: Color, moves: &mut Destinations) {
    let forward: i8 = match color {
        Color::White => 1,
        Color::Black => -1,
    };

    if let Some(one) = square.offset(forward, 0) {
        if board[one].is_none() {
            moves.push(one);

            // the double push requires the single-push square to be clear as
            // well, so it nests inside the check above
            if square.get_rank() == color.to_second_rank() {
                if let Some(two) = square.offset(forward * 2, 0) {
                    if board[two].is_none() {
                        moves.push(two);
                    }
                }
            }
        }
    }

    for &file_delta in &[-1, 1] {
        if let Some(dest) = square.offset(forward, file_delta) {
            if let Some((_, occupant)) = board[dest] {
                if occupant != color {
                    moves.push(dest);
                }
            }
        }
    }
}

/// Compute every pseudo-legal destination for the piece on `square`:
/// geometrically valid under the movement and blocking rules, without regard
/// to whether the move exposes the mover's own king.
///
/// An empty square yields an empty list.
///
/// ```
/// use chesskit::{pseudo_legal_destinations, Board, Square};
///
/// let board = Board::default();
/// assert_eq!(pseudo_legal_destinations(&board, Square::G1).len(), 2);
/// assert_eq!(pseudo_legal_destinations(&board, Square::E4).len(), 0);
/// ```
pub fn pseudo_legal_destinations(board: &Board, square: Square) -> Destinations {
    let mut moves = Destinations::new();
    let (piece, color) = match board[square] {
        Some(occupant) => occupant,
        None => return moves,
    };

    match piece {
        Piece::Pawn => pawn_destinations(board, square, color, &mut moves),
        Piece::Knight => step_destinations(board, square, color, &KNIGHT_JUMPS, &mut moves),
        Piece::Bishop => ray_destinations(board, square, color, &BISHOP_RAYS, &mut moves),
        Piece::Rook => ray_destinations(board, square, color, &ROOK_RAYS, &mut moves),
        Piece::Queen => {
            ray_destinations(board, square, color, &ROOK_RAYS, &mut moves);
            ray_destinations(board, square, color, &BISHOP_RAYS, &mut moves);
        }
        Piece::King => step_destinations(board, square, color, &KING_STEPS, &mut moves),
    }

    moves
}

/// Is `target` among the raw pseudo-legal destinations of any piece of
/// color `by`?  Raw generation keeps this test from recursing into the
/// legality filter.
pub(crate) fn square_attacked_by(board: &Board, target: Square, by: Color) -> bool {
    for square in ALL_SQUARES.iter() {
        if board.color_on(*square) != Some(by) {
            continue;
        }
        if pseudo_legal_destinations(board, *square).contains(&target) {
            return true;
        }
    }
    false
}

/// Compute the truly legal destinations for the piece on `square`: each
/// pseudo-legal candidate is played out on a copy of the board and kept only
/// if the mover's king is not attacked afterward.
///
/// A color with no king on the board has nothing to expose, so every
/// pseudo-legal move of that color is legal.
pub fn legal_destinations(board: &Board, square: Square) -> Destinations {
    let color = match board.color_on(square) {
        Some(color) => color,
        None => return Destinations::new(),
    };

    let mut legal = Destinations::new();
    for dest in pseudo_legal_destinations(board, square) {
        let mut copy = *board;
        copy.apply_unchecked(ChessMove::new(square, dest));
        if !copy.in_check(color) {
            legal.push(dest);
        }
    }
    legal
}

struct SquareAndDestinations {
    square: Square,
    destinations: Destinations,
}

/// The move generation iterator
///
/// This structure computes all moves for one color up front, records them as
/// one destination list per origin square, and then iterates them as
/// `ChessMove`s.  Pieces with no destinations are skipped entirely.
///
/// # Examples
///
/// ```
/// use chesskit::{Board, Color, MoveGen};
///
/// // create a board with the initial position
/// let board = Board::default();
///
/// // create an iterable
/// let mut iterable = MoveGen::new_legal(&board, Color::White);
///
/// // make sure .len() works.
/// assert_eq!(iterable.len(), 20); // the .len() function does *not* consume the iterator
///
/// // count the moves
/// let mut count = 0;
/// for _ in &mut iterable {
///     count += 1;
/// }
/// assert_eq!(count, 20);
/// ```
pub struct MoveGen {
    moves: ArrayVec<SquareAndDestinations, 64>,
    index: usize,
    cursor: usize,
}

impl MoveGen {
    /// Enumerate the legal moves for `color`: pseudo-legal moves with every
    /// candidate that would leave `color`'s own king attacked filtered out.
    pub fn new_legal(board: &Board, color: Color) -> MoveGen {
        MoveGen::new(board, color, true)
    }

    /// Enumerate the raw pseudo-legal moves for `color`, skipping the
    /// king-safety filter.  This is the generation the attack test itself
    /// runs on, exposed for callers that want the unfiltered candidates.
    pub fn new_pseudo_legal(board: &Board, color: Color) -> MoveGen {
        MoveGen::new(board, color, false)
    }

    fn new(board: &Board, color: Color, legal: bool) -> MoveGen {
        let mut result = MoveGen {
            moves: ArrayVec::new(),
            index: 0,
            cursor: 0,
        };
        for square in ALL_SQUARES.iter() {
            if board.color_on(*square) != Some(color) {
                continue;
            }
            let destinations = if legal {
                legal_destinations(board, *square)
            } else {
                pseudo_legal_destinations(board, *square)
            };
            if !destinations.is_empty() {
                result.moves.push(SquareAndDestinations {
                    square: *square,
                    destinations,
                });
            }
        }
        result
    }

    /// The destinations recorded for `square`, or `None` when that square
    /// holds no piece of the generated color or its piece cannot move.
    pub fn destinations_from(&self, square: Square) -> Option<&[Square]> {
        self.moves
            .iter()
            .find(|entry| entry.square == square)
            .map(|entry| entry.destinations.as_slice())
    }
}

impl ExactSizeIterator for MoveGen {
    /// Give the exact length of this iterator
    fn len(&self) -> usize {
        let remaining: usize = self
            .moves
            .iter()
            .skip(self.index)
            .map(|entry| entry.destinations.len())
            .sum();
        remaining - self.cursor
    }
}

impl Iterator for MoveGen {
    type Item = ChessMove;

    /// Give a size_hint to some functions that need it
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }

    /// Find the next chess move.
    fn next(&mut self) -> Option<ChessMove> {
        let entry = self.moves.get(self.index)?;
        let result = ChessMove::new(entry.square, entry.destinations[self.cursor]);
        self.cursor += 1;
        if self.cursor >= entry.destinations.len() {
            self.index += 1;
            self.cursor = 0;
        }
        Some(result)
    }
}

#[cfg(test)]
use crate::board::STARTING_POSITION;
#[cfg(test)]
use crate::color::ALL_COLORS;
#[cfg(test)]
use std::str::FromStr;

#[cfg(test)]
fn board_from(layout: &str) -> Board {
    Board::from_str(layout).expect("valid layout")
}

#[cfg(test)]
fn sorted(destinations: Destinations) -> Vec<Square> {
    let mut result: Vec<Square> = destinations.into_iter().collect();
    result.sort();
    result
}

#[test]
fn starting_position_has_twenty_moves_per_side() {
    let board = board_from(STARTING_POSITION);
    assert_eq!(MoveGen::new_legal(&board, Color::White).len(), 20);
    assert_eq!(MoveGen::new_legal(&board, Color::Black).len(), 20);
}

#[test]
fn empty_squares_yield_no_moves() {
    let board = Board::new();
    for square in ALL_SQUARES.iter() {
        assert!(pseudo_legal_destinations(&board, *square).is_empty());
        assert!(legal_destinations(&board, *square).is_empty());
    }
}

#[test]
fn rook_stops_before_a_friendly_blocker() {
    let board = board_from("8/8/8/8/8/P7/8/R7");
    let moves = sorted(pseudo_legal_destinations(&board, Square::A1));
    assert_eq!(
        moves,
        vec![
            Square::B1,
            Square::C1,
            Square::D1,
            Square::E1,
            Square::F1,
            Square::G1,
            Square::H1,
            Square::A2,
        ]
    );
}

#[test]
fn rook_captures_an_enemy_blocker_and_stops() {
    let board = board_from("8/8/8/8/8/p7/8/R7");
    let moves = pseudo_legal_destinations(&board, Square::A1);
    assert!(moves.contains(&Square::A2));
    assert!(moves.contains(&Square::A3));
    assert!(!moves.contains(&Square::A4));
}

#[test]
fn queen_never_jumps_over_blockers() {
    let board = board_from("8/8/8/3p4/8/1P1Q4/8/8");
    let moves = pseudo_legal_destinations(&board, Square::D3);
    assert!(moves.contains(&Square::D4));
    assert!(moves.contains(&Square::D5)); // capture ends the ray
    assert!(!moves.contains(&Square::D6));
    assert!(moves.contains(&Square::C3));
    assert!(!moves.contains(&Square::B3)); // own pawn ends the ray early
    assert!(!moves.contains(&Square::A3));
}

#[test]
fn knight_moves_from_corner_and_center() {
    let board = board_from("8/8/8/8/8/8/8/N7");
    assert_eq!(
        sorted(pseudo_legal_destinations(&board, Square::A1)),
        vec![Square::C2, Square::B3]
    );

    let board = board_from("8/8/8/3N4/8/8/8/8");
    assert_eq!(pseudo_legal_destinations(&board, Square::D5).len(), 8);
}

#[test]
fn king_steps_one_square_in_every_direction() {
    let board = board_from("8/8/8/3K4/8/8/8/8");
    assert_eq!(pseudo_legal_destinations(&board, Square::D5).len(), 8);

    let board = board_from("K7/8/8/8/8/8/8/8");
    assert_eq!(
        sorted(pseudo_legal_destinations(&board, Square::A8)),
        vec![Square::A7, Square::B7, Square::B8]
    );
}

#[test]
fn pawn_single_and_double_push() {
    let board = board_from("8/8/8/8/8/8/4P3/8");
    assert_eq!(
        sorted(pseudo_legal_destinations(&board, Square::E2)),
        vec![Square::E3, Square::E4]
    );

    // off the starting rank there is no double push
    let board = board_from("8/8/8/8/4P3/8/8/8");
    assert_eq!(
        sorted(pseudo_legal_destinations(&board, Square::E4)),
        vec![Square::E5]
    );
}

#[test]
fn blocked_pawn_pushes() {
    // a blocked single push forbids the double push as well
    let board = board_from("8/8/8/8/8/4n3/4P3/8");
    assert!(pseudo_legal_destinations(&board, Square::E2).is_empty());

    let board = board_from("8/8/8/8/4n3/8/4P3/8");
    assert_eq!(
        sorted(pseudo_legal_destinations(&board, Square::E2)),
        vec![Square::E3]
    );

    // an own piece blocks the same way
    let board = board_from("8/8/8/8/8/4N3/4P3/8");
    assert!(pseudo_legal_destinations(&board, Square::E2).is_empty());
}

#[test]
fn pawn_captures_diagonally_and_only_enemy_pieces() {
    let board = board_from("8/8/8/8/8/3n1n2/4P3/8");
    assert_eq!(
        sorted(pseudo_legal_destinations(&board, Square::E2)),
        vec![Square::D3, Square::E3, Square::F3, Square::E4]
    );

    // own knights on the capture squares: pushes only
    let board = board_from("8/8/8/8/8/3N1N2/4P3/8");
    assert_eq!(
        sorted(pseudo_legal_destinations(&board, Square::E2)),
        vec![Square::E3, Square::E4]
    );
}

#[test]
fn edge_pawns_do_not_wrap_around_the_board() {
    let board = board_from("8/8/8/8/8/1p4p1/P6P/8");
    assert_eq!(
        sorted(pseudo_legal_destinations(&board, Square::A2)),
        vec![Square::A3, Square::B3, Square::A4]
    );
    assert_eq!(
        sorted(pseudo_legal_destinations(&board, Square::H2)),
        vec![Square::G3, Square::H3, Square::H4]
    );
}

#[test]
fn black_pawns_move_toward_the_first_rank() {
    let board = board_from("8/4p3/8/8/8/8/8/8");
    assert_eq!(
        sorted(pseudo_legal_destinations(&board, Square::E7)),
        vec![Square::E5, Square::E6]
    );
}

#[test]
fn pawn_on_the_last_rank_has_no_moves() {
    let board = board_from("4P3/8/8/8/8/8/8/8");
    assert!(pseudo_legal_destinations(&board, Square::E8).is_empty());
}

#[test]
fn generated_destinations_stay_on_board_and_never_hit_own_pieces() {
    let layouts = [
        STARTING_POSITION,
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R",
        "k7/2Q5/8/3n4/8/1B6/8/K6R",
    ];
    for layout in layouts.iter() {
        let board = board_from(layout);
        for square in ALL_SQUARES.iter() {
            let mover = board.color_on(*square);
            for dest in pseudo_legal_destinations(&board, *square) {
                assert!(dest.to_index() < 64);
                assert_ne!(board.color_on(dest), mover);
            }
        }
    }
}

#[test]
fn legal_moves_are_a_subset_of_pseudo_legal_moves() {
    let board = board_from("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R");
    for square in ALL_SQUARES.iter() {
        let pseudo = pseudo_legal_destinations(&board, *square);
        for dest in legal_destinations(&board, *square) {
            assert!(pseudo.contains(&dest));
        }
    }
}

#[test]
fn no_committed_move_leaves_the_mover_in_check() {
    // the second layout is a finished fool's mate: White simply contributes
    // zero moves to the loop
    let layouts = [
        STARTING_POSITION,
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR",
    ];
    for layout in layouts.iter() {
        let board = board_from(layout);
        for &color in ALL_COLORS.iter() {
            for mv in MoveGen::new_legal(&board, color) {
                let mut copy = board;
                copy.apply_unchecked(mv);
                assert!(!copy.in_check(color));
            }
        }
    }
}

#[test]
fn an_absolutely_pinned_piece_cannot_move() {
    let board = board_from("8/8/8/8/8/2b5/1R6/K7");
    assert_eq!(pseudo_legal_destinations(&board, Square::B2).len(), 14);
    assert!(legal_destinations(&board, Square::B2).is_empty());

    // the king itself can still step off the diagonal
    assert_eq!(
        sorted(legal_destinations(&board, Square::A1)),
        vec![Square::B1, Square::A2]
    );
}

#[test]
fn a_pinned_slider_may_still_move_along_the_pin_line() {
    let board = board_from("4r3/8/8/8/8/4R3/8/4K3");
    assert_eq!(pseudo_legal_destinations(&board, Square::E3).len(), 13);
    assert_eq!(
        sorted(legal_destinations(&board, Square::E3)),
        vec![
            Square::E2,
            Square::E4,
            Square::E5,
            Square::E6,
            Square::E7,
            Square::E8,
        ]
    );
}

#[test]
fn movegen_len_tracks_consumption() {
    let board = board_from(STARTING_POSITION);
    let mut iterable = MoveGen::new_legal(&board, Color::White);
    let mut count = 0;
    while iterable.next().is_some() {
        count += 1;
        assert_eq!(iterable.len(), 20 - count);
    }
    assert_eq!(count, 20);
}

#[test]
fn movegen_looks_up_destinations_per_origin() {
    let board = board_from(STARTING_POSITION);
    let movegen = MoveGen::new_legal(&board, Color::White);

    let mut knight = movegen.destinations_from(Square::B1).unwrap().to_vec();
    knight.sort();
    assert_eq!(knight, vec![Square::A3, Square::C3]);

    // not the generated color
    assert_eq!(movegen.destinations_from(Square::E7), None);
    // nothing there at all
    assert_eq!(movegen.destinations_from(Square::E4), None);
}

#[test]
fn pseudo_legal_movegen_skips_the_king_safety_filter() {
    // the pinned rook from above shows up in the raw enumeration only
    let board = board_from("8/8/8/8/8/2b5/1R6/K7");
    let pseudo = MoveGen::new_pseudo_legal(&board, Color::White);
    assert!(pseudo.destinations_from(Square::B2).is_some());
    let legal = MoveGen::new_legal(&board, Color::White);
    assert!(legal.destinations_from(Square::B2).is_none());
}
