//! The position aggregate: placement, turn, castling rights, en passant
//! target, and the query surface built on top of them.
//!
//! Legality is decided by simulation: a candidate is applied to a throwaway
//! fork of the position and the resulting board is inspected. No incremental
//! attack map is maintained; correctness over throughput, with perft as the
//! oracle that keeps it honest.

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::chess_move::{Move, MoveKind};
use crate::color::Color;
use crate::movegen::{self, Scope};
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// A full game state with its move history.
#[derive(Clone, Debug, PartialEq)]
pub struct Position {
    pub(crate) board: Board,
    pub(crate) turn: Color,
    pub(crate) castling: CastleRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) history: Vec<crate::make_move::HistoryEntry>,
}

impl Position {
    /// The standard starting position.
    pub fn new() -> Position {
        let mut position = Position::empty();
        position.reset();
        position
    }

    /// An empty board, white to move, no castling rights.
    pub fn empty() -> Position {
        Position {
            board: Board::empty(),
            turn: Color::White,
            castling: CastleRights::NONE,
            en_passant: None,
            history: Vec::new(),
        }
    }

    /// Restore the standard starting position, discarding all history.
    pub fn reset(&mut self) {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        self.clear();
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            // Rank 8 occupies indices 0..8 and rank 1 occupies 56..64.
            let file = file as u8;
            self.board.place(
                Square::from_index_unchecked(file),
                Piece::new(kind, Color::Black),
            );
            self.board.place(
                Square::from_index_unchecked(8 + file),
                Piece::new(PieceKind::Pawn, Color::Black),
            );
            self.board.place(
                Square::from_index_unchecked(48 + file),
                Piece::new(PieceKind::Pawn, Color::White),
            );
            self.board.place(
                Square::from_index_unchecked(56 + file),
                Piece::new(kind, Color::White),
            );
        }
        self.castling = CastleRights::ALL;
    }

    /// Empty the board and reset turn, rights, target and history.
    pub fn clear(&mut self) {
        self.board.clear();
        self.turn = Color::White;
        self.castling = CastleRights::NONE;
        self.en_passant = None;
        self.history.clear();
    }

    /// The piece placement.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The remaining castling rights.
    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    /// The en passant target square, armed only for the one ply after a
    /// double pawn push.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// The piece on `square`, if any.
    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.board.get(square)
    }

    /// The number of committed plies.
    #[inline]
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// The committed moves, oldest first.
    pub fn played(&self) -> impl Iterator<Item = Move> + '_ {
        self.history.iter().map(|entry| entry.mv)
    }

    /// All legal moves within `scope`.
    pub fn moves(&self, scope: Scope) -> Vec<Move> {
        movegen::generate(self, scope)
            .into_iter()
            .filter(|&mv| self.is_legal(mv))
            .collect()
    }

    /// Whether committing `mv` would be legal for the piece that moves.
    ///
    /// For castling this also rejects castling out of or through check; the
    /// generator only vouches for rights and empty squares.
    pub fn is_legal(&self, mv: Move) -> bool {
        let Some(piece) = self.board.get(mv.from) else {
            return false;
        };
        let mover = piece.color;

        if mv.is_castle() {
            if self.is_square_attacked(mv.from, mover.flip()) {
                return false;
            }
            let step = match mv.kind {
                MoveKind::KingsideCastle => 1,
                _ => -1,
            };
            // Walking the king one square at a time probes the transit
            // square with the same machinery as the destination.
            let Some(transit) = Board::at(mv.from, step) else {
                return false;
            };
            let one_step = Move::new(mv.from, transit, MoveKind::Quiet);
            if self.probe(one_step).king_attacked(mover) {
                return false;
            }
        }

        !self.probe(mv).king_attacked(mover)
    }

    /// Fork the position without its history and apply `mv` to the fork.
    pub(crate) fn probe(&self, mv: Move) -> Position {
        let mut fork = Position {
            board: self.board,
            turn: self.turn,
            castling: self.castling,
            en_passant: self.en_passant,
            history: Vec::new(),
        };
        fork.apply(mv);
        fork
    }

    fn king_attacked(&self, color: Color) -> bool {
        match self.board.king_square(color) {
            Some(square) => self.is_square_attacked(square, color.flip()),
            None => false,
        }
    }

    /// Whether any piece of `by` attacks `square`.
    ///
    /// Detection runs outward from the target: knight and king offsets are
    /// probed directly, sliding rays stop at the first occupied square, and
    /// pawns are looked up on the two squares they would attack from.
    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        const KNIGHT_OFFSETS: [i16; 8] = [-21, -19, -12, -8, 8, 12, 19, 21];
        const KING_OFFSETS: [i16; 8] = [-11, -10, -9, -1, 1, 9, 10, 11];
        const ROOK_RAYS: [i16; 4] = [-10, -1, 1, 10];
        const BISHOP_RAYS: [i16; 4] = [-11, -9, 9, 11];

        let holds = |candidate: Option<Square>, kind: PieceKind| {
            candidate.is_some_and(|sq| self.board.get(sq) == Some(Piece::new(kind, by)))
        };

        for offset in KNIGHT_OFFSETS {
            if holds(Board::at(square, offset), PieceKind::Knight) {
                return true;
            }
        }
        for offset in KING_OFFSETS {
            if holds(Board::at(square, offset), PieceKind::King) {
                return true;
            }
        }

        // A pawn attacks diagonally forward, so the attacker sits one rank
        // behind the target in its own direction of travel.
        let back = -by.forward();
        if holds(Board::at(square, back - 1), PieceKind::Pawn)
            || holds(Board::at(square, back + 1), PieceKind::Pawn)
        {
            return true;
        }

        self.ray_attacked(square, by, &ROOK_RAYS, PieceKind::Rook)
            || self.ray_attacked(square, by, &BISHOP_RAYS, PieceKind::Bishop)
    }

    fn ray_attacked(&self, square: Square, by: Color, rays: &[i16], slider: PieceKind) -> bool {
        for &ray in rays {
            let mut current = square;
            while let Some(next) = Board::at(current, ray) {
                if let Some(piece) = self.board.get(next) {
                    if piece.color == by
                        && (piece.kind == slider || piece.kind == PieceKind::Queen)
                    {
                        return true;
                    }
                    break;
                }
                current = next;
            }
        }
        false
    }

    /// Whether the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.king_attacked(self.turn)
    }

    /// Whether the side to move is checkmated.
    pub fn is_checkmate(&self) -> bool {
        self.is_check() && self.moves(Scope::default()).is_empty()
    }

    /// Whether the side to move has no legal move but is not in check.
    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && self.moves(Scope::default()).is_empty()
    }

    /// Whether the game has ended by checkmate or stalemate.
    pub fn is_game_over(&self) -> bool {
        self.moves(Scope::default()).is_empty()
    }
}

impl Default for Position {
    fn default() -> Position {
        Position::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Position;
    use crate::color::Color;
    use crate::movegen::Scope;
    use crate::piece::Piece;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    fn position(fen: &str) -> Position {
        fen.parse().unwrap()
    }

    #[test]
    fn starting_position_layout() {
        let pos = Position::new();
        assert_eq!(pos.turn(), Color::White);
        assert_eq!(pos.en_passant(), None);
        assert_eq!(
            pos.get(Square::E1),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            pos.get(Square::D8),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
        assert_eq!(pos.board().iter().count(), 32);
    }

    #[test]
    fn clear_empties_everything() {
        let mut pos = Position::new();
        pos.clear();
        assert_eq!(pos.board().iter().count(), 0);
        assert!(pos.castling().is_empty());
        assert_eq!(pos.ply(), 0);
    }

    #[test]
    fn twenty_legal_moves_from_the_start() {
        let pos = Position::new();
        assert_eq!(pos.moves(Scope::default()).len(), 20);
    }

    #[test]
    fn pinned_rook_stays_on_the_file() {
        let pos = position("3q3k/8/8/8/8/8/3R4/3K4 w - - 0 1");
        let moves = pos.moves(Scope::square(Square::D2));
        let destinations: Vec<String> = moves.iter().map(|m| m.to.to_string()).collect();

        assert_eq!(moves.len(), 6);
        for expected in ["d3", "d4", "d5", "d6", "d7", "d8"] {
            assert!(destinations.contains(&expected.to_string()));
        }
    }

    #[test]
    fn king_may_not_step_into_attack() {
        // Black rook owns the e-file above the king.
        let pos = position("4r2k/8/8/8/8/8/8/4K3 w - - 0 1");
        let moves = pos.moves(Scope::square(Square::E1));
        assert!(moves.iter().all(|m| m.to.file_index() != 4));
    }

    #[test]
    fn attack_detection_per_piece() {
        let pos = position("4k3/8/8/1b6/8/2N5/1P6/4K3 w - - 0 1");
        // The bishop on b5 eyes e2 through empty squares.
        assert!(pos.is_square_attacked(Square::E2, Color::Black));
        // b3 is not on either of the bishop's diagonals.
        assert!(!pos.is_square_attacked(Square::B3, Color::Black));
        assert!(pos.is_square_attacked(Square::B5, Color::White)); // knight c3
        assert!(pos.is_square_attacked(Square::D7, Color::Black)); // king e8
    }

    #[test]
    fn pawn_attacks_are_directional() {
        let pos = position("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1");
        assert!(pos.is_square_attacked(Square::D5, Color::White));
        assert!(pos.is_square_attacked(Square::F5, Color::White));
        assert!(!pos.is_square_attacked(Square::E5, Color::White));
        assert!(!pos.is_square_attacked(Square::D3, Color::White));
    }

    #[test]
    fn cannot_castle_out_of_check() {
        let pos = position("4k3/8/8/8/8/8/4r3/4K2R w K - 0 1");
        assert!(pos.moves(Scope::default()).iter().all(|m| !m.is_castle()));
    }

    #[test]
    fn cannot_castle_through_attack() {
        // Black rook covers f1, the square the king passes through.
        let pos = position("4kr2/8/8/8/8/8/8/4K2R w K - 0 1");
        assert!(pos.moves(Scope::default()).iter().all(|m| !m.is_castle()));
    }

    #[test]
    fn cannot_castle_into_attack() {
        let pos = position("4k1r1/8/8/8/8/8/8/4K2R w K - 0 1");
        assert!(pos.moves(Scope::default()).iter().all(|m| !m.is_castle()));
    }

    #[test]
    fn may_castle_with_only_the_rook_attacked() {
        // The bishop on f6 eyes a1; an attacked rook does not forbid castling.
        let pos = position("4k3/8/5b2/8/8/8/8/R3K3 w Q - 0 1");
        assert!(pos.moves(Scope::default()).iter().any(|m| m.is_castle()));
    }

    #[test]
    fn check_detection() {
        let pos = position("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1");
        assert!(pos.is_check());
        assert!(!pos.is_checkmate());

        let pos = Position::new();
        assert!(!pos.is_check());
    }

    #[test]
    fn back_rank_checkmate() {
        let pos = position("6k1/5ppp/8/8/8/8/8/K5R1 b - - 0 1");
        assert!(!pos.is_checkmate());

        let pos = position("6k1/5ppp/8/8/8/8/8/K4R2 b - - 0 1");
        assert!(!pos.is_check());

        let pos = position("5rk1/5ppp/8/8/8/8/8/K4R2 b - - 0 1");
        assert!(!pos.is_checkmate());

        let pos = position("6k1/5ppp/8/8/8/8/8/K3R3 b - - 0 1");
        assert!(!pos.is_checkmate());

        let pos = position("R5k1/5ppp/8/8/8/8/8/K7 b - - 0 1");
        assert!(pos.is_checkmate());
        assert!(!pos.is_stalemate());
        assert!(pos.is_game_over());
    }

    #[test]
    fn smothered_checkmate_fixture() {
        let pos = position("r4bkr/ppp3pp/2n1B3/4p3/8/8/PPPP1PPP/RNB1K2R b KQ - 0 10");
        assert!(pos.is_checkmate());
        assert!(!pos.is_stalemate());
    }

    #[test]
    fn stalemate() {
        let pos = position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(pos.is_stalemate());
        assert!(!pos.is_checkmate());
        assert!(pos.is_game_over());
    }

    #[test]
    fn ongoing_game_is_not_over() {
        assert!(!Position::new().is_game_over());
    }
}
