//! FEN parsing and serialization for [`Position`].
//!
//! Four to six fields are accepted on input: placement, active color,
//! castling, en passant, and optionally the halfmove and fullmove clocks.
//! The clocks are not part of the game state tracked here; output writes a
//! zero halfmove clock and derives the fullmove number from the history.

use std::fmt;
use std::str::FromStr;

use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::FenError;
use crate::piece::Piece;
use crate::position::Position;
use crate::square::Square;

/// The FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Position, FenError> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(FenError::WrongFieldCount {
                found: fields.len(),
            });
        }

        let mut position = Position::empty();
        parse_placement(fields[0], &mut position)?;

        position.turn = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidColor {
                    found: other.to_string(),
                });
            }
        };

        position.castling = CastleRights::from_fen(fields[2])?;

        position.en_passant = match fields[3] {
            "-" => None,
            other => Some(Square::from_algebraic(other).ok_or_else(|| {
                FenError::InvalidEnPassant {
                    found: other.to_string(),
                }
            })?),
        };

        Ok(position)
    }
}

fn parse_placement(field: &str, position: &mut Position) -> Result<(), FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }

    // Ranks arrive top-down, which is exactly board index order.
    for (rank_number, rank) in ranks.iter().enumerate() {
        let mut file = 0usize;
        for c in rank.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as usize;
            } else {
                let piece =
                    Piece::from_fen_char(c).ok_or(FenError::InvalidPieceChar { character: c })?;
                if file < 8 {
                    let square = Square::from_index_unchecked((rank_number * 8 + file) as u8);
                    position.board.place(square, piece);
                }
                file += 1;
            }
        }
        if file != 8 {
            return Err(FenError::BadRankLength {
                rank: 8 - rank_number,
                length: file,
            });
        }
    }
    Ok(())
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank_number in 0..8 {
            if rank_number > 0 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for file in 0..8 {
                let square = Square::from_index_unchecked((rank_number * 8 + file) as u8);
                match self.board.get(square) {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.fen_char())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
        }

        write!(f, " {} {} ", self.turn, self.castling)?;
        match self.en_passant {
            Some(square) => write!(f, "{square}")?,
            None => write!(f, "-")?,
        }
        write!(f, " 0 {}", self.history.len() / 2 + 1)
    }
}
