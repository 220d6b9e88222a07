use crate::error::Error;
use crate::square::Square;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Represent a ChessMove in memory
#[derive(Clone, Copy, Eq, Ord, PartialOrd, PartialEq, Default, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ChessMove {
    source: Square,
    dest: Square,
}

impl ChessMove {
    /// Create a new chess move, given a source `Square` and a destination
    /// `Square`
    #[inline]
    pub fn new(source: Square, dest: Square) -> ChessMove {
        ChessMove { source, dest }
    }

    /// Get the source square (square the piece is currently on).
    #[inline]
    pub fn get_source(&self) -> Square {
        self.source
    }

    /// Get the destination square (square the piece is going to).
    #[inline]
    pub fn get_dest(&self) -> Square {
        self.dest
    }
}

impl FromStr for ChessMove {
    type Err = Error;

    /// Convert a coordinate-pair string to a move. If invalid, return
    /// `Error::InvalidMove`
    ///
    /// ```
    /// use chesskit::{ChessMove, Square};
    /// use std::str::FromStr;
    ///
    /// let mv = ChessMove::new(Square::E2, Square::E4);
    ///
    /// assert_eq!(ChessMove::from_str("e2e4").expect("Valid Move"), mv);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 {
            return Err(Error::InvalidMove);
        }
        let source = s
            .get(0..2)
            .and_then(|sq| Square::from_str(sq).ok())
            .ok_or(Error::InvalidMove)?;
        let dest = s
            .get(2..4)
            .and_then(|sq| Square::from_str(sq).ok())
            .ok_or(Error::InvalidMove)?;
        Ok(ChessMove::new(source, dest))
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.source, self.dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_moves() {
        assert_eq!(ChessMove::from_str("e2e-"), Err(Error::InvalidMove));
        assert_eq!(ChessMove::from_str(""), Err(Error::InvalidMove));
        assert_eq!(ChessMove::from_str("e2"), Err(Error::InvalidMove));
        assert_eq!(ChessMove::from_str("e2e44"), Err(Error::InvalidMove));
        assert_eq!(ChessMove::from_str("i2e4"), Err(Error::InvalidMove));
    }

    #[test]
    fn valid_moves() {
        assert_eq!(
            ChessMove::from_str("e2e4"),
            Ok(ChessMove::new(Square::E2, Square::E4))
        );
        assert_eq!(
            ChessMove::from_str("g1f3"),
            Ok(ChessMove::new(Square::G1, Square::F3))
        );
        assert_eq!(
            ChessMove::from_str("a7a8"),
            Ok(ChessMove::new(Square::A7, Square::A8))
        );
    }

    #[test]
    fn display_round_trip() {
        let mv = ChessMove::new(Square::B1, Square::C3);
        assert_eq!(ChessMove::from_str(&mv.to_string()), Ok(mv));
    }
}
