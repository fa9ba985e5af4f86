//! Chess rules engine: legal move generation, make/undo, and the FEN and
//! SAN codecs.
//!
//! The entry point is [`Position`]. It owns the board, the side to move,
//! castling rights, the en passant target and the move history; everything
//! else in the crate is a view onto it or a codec for it.
//!
//! ```
//! use scacco::{Position, Scope, Square};
//!
//! let mut position = Position::new();
//! position.play_san("e4").unwrap();
//! position.play(Square::E7, Square::E5, None).unwrap();
//!
//! assert_eq!(position.moves(Scope::default()).len(), 29);
//! assert!(!position.is_game_over());
//! position.undo().unwrap();
//! ```

mod board;
mod castle_rights;
mod chess_move;
mod color;
mod error;
mod fen;
mod make_move;
mod movegen;
mod perft;
mod piece;
mod piece_kind;
mod position;
mod san;
mod square;

pub use board::Board;
pub use castle_rights::{CastleRights, CastleSide};
pub use chess_move::{Move, MoveKind};
pub use color::Color;
pub use error::{FenError, MoveError, SanError};
pub use fen::STARTING_FEN;
pub use make_move::MoveRecord;
pub use movegen::{Scope, generate};
pub use perft::{divide, perft};
pub use piece::Piece;
pub use piece_kind::PieceKind;
pub use position::Position;
pub use square::Square;
