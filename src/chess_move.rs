//! Candidate moves as a tagged from/to/kind record.

use std::fmt;

use crate::piece_kind::PieceKind;
use crate::square::Square;

/// What a move does, fixed at generation time.
///
/// The kind is decided by the move generator, never inferred afterwards, and
/// each variant carries exactly what the executor needs to apply and reverse
/// it. `DoublePush` is a quiet pawn move that additionally arms the en passant
/// target; `Promotion` names the kind the pawn becomes on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Quiet,
    DoublePush,
    Capture,
    EnPassant,
    Promotion(PieceKind),
    KingsideCastle,
    QueensideCastle,
}

/// A candidate move: origin, destination, and what it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
}

impl Move {
    /// Create a move.
    #[inline]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Move {
        Move { from, to, kind }
    }

    /// Return the promotion kind, if this is a promotion.
    #[inline]
    pub const fn promotion(self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Promotion(kind) => Some(kind),
            _ => None,
        }
    }

    /// Return `true` for either castling kind.
    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(
            self.kind,
            MoveKind::KingsideCastle | MoveKind::QueensideCastle
        )
    }
}

impl fmt::Display for Move {
    /// Coordinate notation: origin and destination, plus a lowercase
    /// promotion letter ("e2e4", "e7e8q").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion() {
            write!(f, "{}", kind.fen_char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Move, MoveKind};
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    #[test]
    fn accessors() {
        let mv = Move::new(Square::E2, Square::E4, MoveKind::DoublePush);
        assert_eq!(mv.from, Square::E2);
        assert_eq!(mv.to, Square::E4);
        assert_eq!(mv.promotion(), None);
        assert!(!mv.is_castle());
    }

    #[test]
    fn promotion_kind() {
        let mv = Move::new(
            Square::E7,
            Square::E8,
            MoveKind::Promotion(PieceKind::Knight),
        );
        assert_eq!(mv.promotion(), Some(PieceKind::Knight));
    }

    #[test]
    fn castle_detection() {
        assert!(Move::new(Square::E1, Square::G1, MoveKind::KingsideCastle).is_castle());
        assert!(Move::new(Square::E8, Square::C8, MoveKind::QueensideCastle).is_castle());
        assert!(!Move::new(Square::E1, Square::G1, MoveKind::Quiet).is_castle());
    }

    #[test]
    fn display_coordinate_notation() {
        assert_eq!(
            Move::new(Square::E2, Square::E4, MoveKind::Quiet).to_string(),
            "e2e4"
        );
        assert_eq!(
            Move::new(Square::E7, Square::E8, MoveKind::Promotion(PieceKind::Queen)).to_string(),
            "e7e8q"
        );
    }
}
