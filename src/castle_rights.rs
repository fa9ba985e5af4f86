//! Castling rights, stored as a 4-bit field.

use std::fmt;

use crate::color::Color;
use crate::error::FenError;
use crate::square::Square;

/// Which wing of the board to castle toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

const WHITE_KING: u8 = 0b0001;
const WHITE_QUEEN: u8 = 0b0010;
const BLACK_KING: u8 = 0b0100;
const BLACK_QUEEN: u8 = 0b1000;

/// The four castling rights of a position.
///
/// A right stays set only while the king and the relevant rook have never
/// left their original squares; the move executor clears rights through
/// [`revoked_by`](CastleRights::revoked_by) masks on every committed move.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleRights(u8);

impl CastleRights {
    /// No castling rights.
    pub const NONE: CastleRights = CastleRights(0);
    /// All four castling rights.
    pub const ALL: CastleRights = CastleRights(0b1111);

    /// Check whether `color` may still castle on `side`.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::bit(color, side) != 0
    }

    /// Return `true` if no rights remain.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Return these rights with every bit of `mask` cleared.
    #[inline]
    pub const fn without(self, mask: CastleRights) -> CastleRights {
        CastleRights(self.0 & !mask.0)
    }

    /// The rights lost when `square` is vacated or captured into.
    ///
    /// The king squares map to both of their color's rights, the corner
    /// squares to the single right of their rook. Applying this mask to both
    /// ends of every committed move revokes rights on king moves, rook moves
    /// and rook captures alike.
    pub const fn revoked_by(square: Square) -> CastleRights {
        CastleRights(match square.index() {
            60 => WHITE_KING | WHITE_QUEEN, // e1
            63 => WHITE_KING,               // h1
            56 => WHITE_QUEEN,              // a1
            4 => BLACK_KING | BLACK_QUEEN,  // e8
            7 => BLACK_KING,                // h8
            0 => BLACK_QUEEN,               // a8
            _ => 0,
        })
    }

    /// Parse the FEN castling field (e.g. "KQkq", "Kq", "-").
    pub fn from_fen(s: &str) -> Result<CastleRights, FenError> {
        if s == "-" {
            return Ok(CastleRights::NONE);
        }
        let mut bits = 0;
        for c in s.chars() {
            bits |= match c {
                'K' => WHITE_KING,
                'Q' => WHITE_QUEEN,
                'k' => BLACK_KING,
                'q' => BLACK_QUEEN,
                _ => return Err(FenError::InvalidCastlingChar { character: c }),
            };
        }
        Ok(CastleRights(bits))
    }

    /// Serialize to the FEN castling field, in fixed K, Q, k, q order.
    pub fn to_fen(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }
        let mut s = String::with_capacity(4);
        for (bit, c) in [
            (WHITE_KING, 'K'),
            (WHITE_QUEEN, 'Q'),
            (BLACK_KING, 'k'),
            (BLACK_QUEEN, 'q'),
        ] {
            if self.0 & bit != 0 {
                s.push(c);
            }
        }
        s
    }

    #[inline]
    const fn bit(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => WHITE_KING,
            (Color::White, CastleSide::QueenSide) => WHITE_QUEEN,
            (Color::Black, CastleSide::KingSide) => BLACK_KING,
            (Color::Black, CastleSide::QueenSide) => BLACK_QUEEN,
        }
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({})", self.to_fen())
    }
}
