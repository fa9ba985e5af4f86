//! Pseudo-legal move generation.
//!
//! Every piece's movement is a fixed table of mailbox offsets walked from the
//! origin square; sliding pieces repeat an offset until they run off the board
//! or into a piece. Castling candidates are emitted whenever the right is
//! held, the gap is clear and the rook is home — whether the king is safe is
//! the legality filter's business, not the generator's.

use crate::board::Board;
use crate::castle_rights::CastleSide;
use crate::chess_move::{Move, MoveKind};
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

/// Restricts generation to one square, one color, or both.
///
/// With neither set, moves are generated for the side to move.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scope {
    pub square: Option<Square>,
    pub color: Option<Color>,
}

impl Scope {
    /// Generate only for the piece on `square`.
    pub const fn square(square: Square) -> Scope {
        Scope {
            square: Some(square),
            color: None,
        }
    }

    /// Generate for every piece of `color`.
    pub const fn color(color: Color) -> Scope {
        Scope {
            square: None,
            color: Some(color),
        }
    }
}

struct OffsetTable {
    slide: bool,
    offsets: &'static [i16],
}

const ROOK: OffsetTable = OffsetTable {
    slide: true,
    offsets: &[-10, -1, 1, 10],
};
const BISHOP: OffsetTable = OffsetTable {
    slide: true,
    offsets: &[-11, -9, 9, 11],
};
const QUEEN: OffsetTable = OffsetTable {
    slide: true,
    offsets: &[-11, -10, -9, -1, 1, 9, 10, 11],
};
const KING: OffsetTable = OffsetTable {
    slide: false,
    offsets: &[-11, -10, -9, -1, 1, 9, 10, 11],
};
const KNIGHT: OffsetTable = OffsetTable {
    slide: false,
    offsets: &[-21, -19, -12, -8, 8, 12, 19, 21],
};

/// Generate pseudo-legal candidate moves.
///
/// The order is unspecified but deterministic for a fixed position: pieces
/// are visited in board index order (a8 toward h1) and offsets in table
/// order, so tests can rely on reproducible output.
pub fn generate(position: &Position, scope: Scope) -> Vec<Move> {
    let mut moves = Vec::new();

    match scope.square {
        Some(square) => {
            if let Some(piece) = position.board().get(square)
                && scope.color.is_none_or(|color| color == piece.color)
            {
                generate_for_piece(position, square, piece, &mut moves);
            }
        }
        None => {
            let color = scope.color.unwrap_or(position.turn());
            for (square, piece) in position.board().iter() {
                if piece.color == color {
                    generate_for_piece(position, square, piece, &mut moves);
                }
            }
        }
    }

    moves
}

fn generate_for_piece(position: &Position, square: Square, piece: Piece, out: &mut Vec<Move>) {
    match piece.kind {
        PieceKind::Pawn => generate_pawn(position, square, piece.color, out),
        PieceKind::Knight => walk_offsets(position, square, piece.color, &KNIGHT, out),
        PieceKind::Bishop => walk_offsets(position, square, piece.color, &BISHOP, out),
        PieceKind::Rook => walk_offsets(position, square, piece.color, &ROOK, out),
        PieceKind::Queen => walk_offsets(position, square, piece.color, &QUEEN, out),
        PieceKind::King => {
            walk_offsets(position, square, piece.color, &KING, out);
            generate_castles(position, square, piece.color, out);
        }
    }
}

fn walk_offsets(
    position: &Position,
    origin: Square,
    color: Color,
    table: &OffsetTable,
    out: &mut Vec<Move>,
) {
    for &offset in table.offsets {
        let mut current = origin;
        while let Some(next) = Board::at(current, offset) {
            match position.board().get(next) {
                Some(other) => {
                    if other.color != color {
                        out.push(Move::new(origin, next, MoveKind::Capture));
                    }
                    break;
                }
                None => out.push(Move::new(origin, next, MoveKind::Quiet)),
            }
            if !table.slide {
                break;
            }
            current = next;
        }
    }
}

/// Emit castling candidates: the right is held, the squares between king and
/// rook are empty, and a same-color rook stands at the expected offset.
fn generate_castles(position: &Position, king: Square, color: Color, out: &mut Vec<Move>) {
    let board = position.board();
    let rook = Piece::new(PieceKind::Rook, color);

    if position.castling().has(color, CastleSide::KingSide)
        && let (Some(step), Some(dest), Some(corner)) = (
            Board::at(king, 1),
            Board::at(king, 2),
            Board::at(king, 3),
        )
        && board.get(step).is_none()
        && board.get(dest).is_none()
        && board.get(corner) == Some(rook)
    {
        out.push(Move::new(king, dest, MoveKind::KingsideCastle));
    }

    if position.castling().has(color, CastleSide::QueenSide)
        && let (Some(step), Some(dest), Some(gap), Some(corner)) = (
            Board::at(king, -1),
            Board::at(king, -2),
            Board::at(king, -3),
            Board::at(king, -4),
        )
        && board.get(step).is_none()
        && board.get(dest).is_none()
        && board.get(gap).is_none()
        && board.get(corner) == Some(rook)
    {
        out.push(Move::new(king, dest, MoveKind::QueensideCastle));
    }
}

fn generate_pawn(position: &Position, square: Square, color: Color, out: &mut Vec<Move>) {
    let board = position.board();
    let forward = color.forward();
    let promotion_rank = color.promotion_rank();

    // Single step, and the double step from the starting rank.
    if let Some(one) = Board::at(square, forward)
        && board.get(one).is_none()
    {
        push_pawn_advance(square, one, promotion_rank, MoveKind::Quiet, out);

        if square.rank_index() == color.pawn_start_rank()
            && let Some(two) = Board::at(square, forward * 2)
            && board.get(two).is_none()
        {
            out.push(Move::new(square, two, MoveKind::DoublePush));
        }
    }

    // Diagonal captures, and en passant onto the armed target square.
    for offset in [forward - 1, forward + 1] {
        let Some(dest) = Board::at(square, offset) else {
            continue;
        };

        if position.en_passant() == Some(dest) {
            // The captured pawn stands one rank behind the target square.
            if let Some(victim_square) = Board::at(dest, -forward)
                && board.get(victim_square) == Some(Piece::new(PieceKind::Pawn, color.flip()))
            {
                out.push(Move::new(square, dest, MoveKind::EnPassant));
            }
        } else if let Some(other) = board.get(dest)
            && other.color != color
        {
            push_pawn_advance(square, dest, promotion_rank, MoveKind::Capture, out);
        }
    }
}

fn push_pawn_advance(
    from: Square,
    to: Square,
    promotion_rank: u8,
    kind: MoveKind,
    out: &mut Vec<Move>,
) {
    if to.rank_index() == promotion_rank {
        for promoted in PieceKind::PROMOTIONS {
            out.push(Move::new(from, to, MoveKind::Promotion(promoted)));
        }
    } else {
        out.push(Move::new(from, to, kind));
    }
}
