//! The move executor: committing moves, and reversing them exactly.
//!
//! [`Position::apply`] and [`Position::revert`] are the raw state
//! transitions; they trust their input and never touch the history stack.
//! The public [`Position::play`] / [`Position::undo`] pair layers request
//! validation and history bookkeeping on top.

use tracing::trace;

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::chess_move::{Move, MoveKind};
use crate::error::MoveError;
use crate::movegen::{self, Scope};
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

/// Everything needed to reverse one committed move.
///
/// The captured piece is stored with its own square, which differs from the
/// move's destination only for en passant. Castling rights and the en
/// passant target are snapshotted wholesale; both are cheap and neither can
/// be recomputed from the move alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Undo {
    captured: Option<(Square, Piece)>,
    prior_castling: CastleRights,
    prior_en_passant: Option<Square>,
}

/// One committed move with its undo record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct HistoryEntry {
    pub(crate) mv: Move,
    pub(crate) undo: Undo,
}

/// What a successful move request did.
///
/// `piece` is the mover with its pre-move kind, so a promotion reports a
/// pawn there and the new kind in `promoted_to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promoted_to: Option<PieceKind>,
}

/// Where the rook starts and lands for each castling destination.
fn castle_rook_squares(king_to: Square) -> (Square, Square) {
    match king_to {
        Square::G1 => (Square::H1, Square::F1),
        Square::C1 => (Square::A1, Square::D1),
        Square::G8 => (Square::H8, Square::F8),
        _ => (Square::A8, Square::D8),
    }
}

impl Position {
    /// Commit the legal move from `from` to `to`.
    ///
    /// A promotion request selects among the generated promotion variants;
    /// `None` promotes to a queen, and a promotion kind on a move that
    /// cannot promote is illegal. On any error the position is untouched.
    pub fn play(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<MoveRecord, MoveError> {
        let piece = self.board.get(from).ok_or(MoveError::EmptySquare { square: from })?;
        if piece.color != self.turn {
            return Err(MoveError::OutOfTurn { square: from });
        }

        let candidate = movegen::generate(self, Scope::square(from))
            .into_iter()
            .find(|mv| {
                mv.to == to
                    && match mv.promotion() {
                        Some(kind) => kind == promotion.unwrap_or(PieceKind::Queen),
                        None => promotion.is_none(),
                    }
            })
            .ok_or(MoveError::Illegal { from, to })?;

        if !self.is_legal(candidate) {
            return Err(MoveError::Illegal { from, to });
        }

        Ok(self.commit(candidate, piece))
    }

    /// Take back the most recent committed move.
    pub fn undo(&mut self) -> Option<Move> {
        let entry = self.history.pop()?;
        self.revert(entry.mv, entry.undo);
        trace!(mv = %entry.mv, ply = self.history.len(), "took back move");
        Some(entry.mv)
    }

    /// Commit a move already vetted for legality, recording it in history.
    ///
    /// `piece` is the mover on `mv.from`, looked up by the caller.
    pub(crate) fn commit(&mut self, mv: Move, piece: Piece) -> MoveRecord {
        let undo = self.apply(mv);
        self.history.push(HistoryEntry { mv, undo });
        trace!(mv = %mv, ply = self.history.len(), "committed move");
        MoveRecord {
            mv,
            piece,
            captured: undo.captured.map(|(_, victim)| victim),
            promoted_to: mv.promotion(),
        }
    }

    /// Perform the state transition for `mv` without recording history.
    ///
    /// The caller vouches that `mv` was generated for this position.
    pub(crate) fn apply(&mut self, mv: Move) -> Undo {
        let undo = Undo {
            captured: self.capture_of(mv),
            prior_castling: self.castling,
            prior_en_passant: self.en_passant,
        };

        if let Some((square, _)) = undo.captured {
            self.board.remove(square);
        }
        if let Some(mut piece) = self.board.remove(mv.from) {
            if let Some(kind) = mv.promotion() {
                piece.kind = kind;
            }
            self.board.place(mv.to, piece);

            if mv.is_castle() {
                let (rook_from, rook_to) = castle_rook_squares(mv.to);
                if let Some(rook) = self.board.remove(rook_from) {
                    self.board.place(rook_to, rook);
                }
            }

            self.en_passant = match mv.kind {
                MoveKind::DoublePush => Board::at(mv.from, piece.color.forward()),
                _ => None,
            };
        }

        self.castling = self
            .castling
            .without(CastleRights::revoked_by(mv.from))
            .without(CastleRights::revoked_by(mv.to));
        self.turn = self.turn.flip();
        undo
    }

    /// Exact inverse of [`apply`](Position::apply) for the same move.
    pub(crate) fn revert(&mut self, mv: Move, undo: Undo) {
        self.turn = self.turn.flip();
        self.castling = undo.prior_castling;
        self.en_passant = undo.prior_en_passant;

        if let Some(mut piece) = self.board.remove(mv.to) {
            if mv.promotion().is_some() {
                piece.kind = PieceKind::Pawn;
            }
            self.board.place(mv.from, piece);

            if mv.is_castle() {
                let (rook_from, rook_to) = castle_rook_squares(mv.to);
                if let Some(rook) = self.board.remove(rook_to) {
                    self.board.place(rook_from, rook);
                }
            }
        }

        if let Some((square, piece)) = undo.captured {
            self.board.place(square, piece);
        }
    }

    /// The piece `mv` captures, with the square it stands on.
    fn capture_of(&self, mv: Move) -> Option<(Square, Piece)> {
        match mv.kind {
            MoveKind::EnPassant => {
                let victim = self
                    .board
                    .get(mv.from)
                    .map(|pawn| -pawn.color.forward())
                    .and_then(|back| Board::at(mv.to, back))?;
                self.board.get(victim).map(|piece| (victim, piece))
            }
            _ => self.board.get(mv.to).map(|piece| (mv.to, piece)),
        }
    }
}
