use failure::Fail;

/// Sometimes, bad stuff happens.
#[derive(Debug, Fail, PartialEq)]
pub enum Error {
    /// A raw coordinate outside the 8x8 board was dereferenced.
    #[fail(display = "The coordinate ({}, {}) is not on the board.", rank, file)]
    OutOfBounds { rank: usize, file: usize },

    /// The layout string contains a token that is neither a piece letter, a
    /// skip digit, nor a rank separator.
    #[fail(display = "Invalid layout string: {}", layout)]
    InvalidLayout { layout: String },

    /// An attempt was made to convert a string not equal to "1".."8" to a rank.
    #[fail(display = "The string specified does not contain a valid rank.")]
    InvalidRank,

    /// An attempt was made to convert a string not equal to "a".."h" to a file.
    #[fail(display = "The string specified does not contain a valid file.")]
    InvalidFile,

    /// An attempt was made to convert a string not in coordinate notation
    /// (e.g. "e4") to a square.
    #[fail(display = "The string specified does not contain a valid square.")]
    InvalidSquare,

    /// An attempt was made to convert a string not in coordinate-pair notation
    /// (e.g. "e2e4") to a move.
    #[fail(display = "The string specified does not contain a valid move.")]
    InvalidMove,
}
