//! Error types for the FEN codec, the SAN codec, and move requests.

use crate::square::Square;

/// Errors from parsing a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    /// The string does not have 4 to 6 whitespace-separated fields.
    #[error("expected 4 to 6 FEN fields, found {found}")]
    WrongFieldCount { found: usize },
    /// The placement field does not have exactly 8 ranks.
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount { found: usize },
    /// A rank describes more or fewer than 8 squares.
    #[error("rank {rank} describes {length} squares, expected 8")]
    BadRankLength { rank: usize, length: usize },
    /// An unrecognized character appeared in the piece placement.
    #[error("invalid piece character: '{character}'")]
    InvalidPieceChar { character: char },
    /// The active color field is not "w" or "b".
    #[error("invalid active color: \"{found}\"")]
    InvalidColor { found: String },
    /// An unrecognized character appeared in the castling field.
    #[error("invalid castling character: '{character}'")]
    InvalidCastlingChar { character: char },
    /// The en passant field is not "-" or a valid square.
    #[error("invalid en passant square: \"{found}\"")]
    InvalidEnPassant { found: String },
}

/// Errors from a programmatic move request.
///
/// A failed request never mutates the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The origin square has no piece on it.
    #[error("no piece on {square}")]
    EmptySquare { square: Square },
    /// The piece on the origin square belongs to the side not on move.
    #[error("it is not the turn of the piece on {square}")]
    OutOfTurn { square: Square },
    /// No legal move connects the two squares.
    #[error("{from}{to} is not a legal move")]
    Illegal { from: Square, to: Square },
}

/// Errors from parsing or resolving a SAN move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SanError {
    /// The text does not fit the SAN grammar.
    #[error("malformed SAN: \"{input}\"")]
    Malformed { input: String },
    /// A castling move was given but the side to move has no king.
    #[error("side to move has no king")]
    MissingKing,
    /// No generated move matches the text.
    #[error("no matching move for \"{input}\"")]
    NoMatch { input: String },
    /// Several moves match and the disambiguator does not single one out.
    #[error("ambiguous SAN: \"{input}\"")]
    Ambiguous { input: String },
    /// The move parsed but is not legal in the position.
    #[error(transparent)]
    Illegal(#[from] MoveError),
}
