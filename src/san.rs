//! SAN parsing and encoding.
//!
//! Parsing resolves text against the generator's candidates instead of
//! trusting the text: the piece letter and destination select candidates, a
//! disambiguator narrows them by origin, and anything still ambiguous is an
//! error rather than a guess. Encoding is the inverse and computes the
//! minimal disambiguator the same way.

use crate::chess_move::{Move, MoveKind};
use crate::error::{MoveError, SanError};
use crate::make_move::MoveRecord;
use crate::movegen::{self, Scope};
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

impl Position {
    /// Resolve SAN text to the legal move it names.
    ///
    /// Accepts `O-O`/`O-O-O` in either case, an optional `=` before the
    /// promotion letter, and ignores trailing decorations (`+`, `#`, `!`,
    /// `?`). Piece and promotion letters must be uppercase.
    pub fn parse_san(&self, text: &str) -> Result<Move, SanError> {
        let trimmed = text.trim().trim_end_matches(['+', '#', '!', '?']);
        if trimmed.is_empty() {
            return Err(SanError::Malformed {
                input: text.to_string(),
            });
        }

        let castle = match trimmed.to_ascii_uppercase().as_str() {
            "O-O" => Some(MoveKind::KingsideCastle),
            "O-O-O" => Some(MoveKind::QueensideCastle),
            _ => None,
        };
        if let Some(kind) = castle {
            return self.resolve_castle(kind, text);
        }

        let mut chars: Vec<char> = trimmed.chars().collect();

        let piece_kind = match PieceKind::from_san_letter(chars[0]) {
            Some(kind) => {
                chars.remove(0);
                kind
            }
            None => PieceKind::Pawn,
        };

        let mut promotion = None;
        if piece_kind == PieceKind::Pawn
            && let Some(&last) = chars.last()
            && let Some(kind) = PieceKind::from_san_letter(last)
        {
            if !PieceKind::PROMOTIONS.contains(&kind) {
                return Err(SanError::Malformed {
                    input: text.to_string(),
                });
            }
            promotion = Some(kind);
            chars.pop();
            if chars.last() == Some(&'=') {
                chars.pop();
            }
        }

        if chars.len() < 2 {
            return Err(SanError::Malformed {
                input: text.to_string(),
            });
        }
        let destination: String = chars.split_off(chars.len() - 2).into_iter().collect();
        let to = Square::from_algebraic(&destination).ok_or_else(|| SanError::Malformed {
            input: text.to_string(),
        })?;

        if chars.last() == Some(&'x') {
            chars.pop();
        }
        if chars.len() > 2
            || chars
                .iter()
                .any(|&c| !('a'..='h').contains(&c) && !('1'..='8').contains(&c))
        {
            return Err(SanError::Malformed {
                input: text.to_string(),
            });
        }
        let disambiguator: String = chars.into_iter().collect();

        let matches: Vec<Move> = movegen::generate(self, Scope::default())
            .into_iter()
            .filter(|mv| {
                self.board.get(mv.from).is_some_and(|p| p.kind == piece_kind)
                    && mv.to == to
                    && !mv.is_castle()
                    && match mv.promotion() {
                        Some(kind) => kind == promotion.unwrap_or(PieceKind::Queen),
                        None => promotion.is_none(),
                    }
                    && mv.from.to_string().contains(&disambiguator)
                    // Without an origin file, pawn notation names a push.
                    && (piece_kind != PieceKind::Pawn
                        || !disambiguator.is_empty()
                        || mv.from.file_index() == mv.to.file_index())
            })
            .collect();

        match matches.as_slice() {
            [] => Err(SanError::NoMatch {
                input: text.to_string(),
            }),
            [mv] => {
                if self.is_legal(*mv) {
                    Ok(*mv)
                } else {
                    Err(MoveError::Illegal {
                        from: mv.from,
                        to: mv.to,
                    }
                    .into())
                }
            }
            _ => Err(SanError::Ambiguous {
                input: text.to_string(),
            }),
        }
    }

    /// Parse SAN text and commit the move it names.
    pub fn play_san(&mut self, text: &str) -> Result<MoveRecord, SanError> {
        let mv = self.parse_san(text)?;
        let piece = self
            .board
            .get(mv.from)
            .ok_or(MoveError::EmptySquare { square: mv.from })?;
        Ok(self.commit(mv, piece))
    }

    /// Encode a generated move as SAN, with `+`/`#` decoration.
    pub fn san(&self, mv: Move) -> String {
        let mut text = match mv.kind {
            MoveKind::KingsideCastle => "O-O".to_string(),
            MoveKind::QueensideCastle => "O-O-O".to_string(),
            _ => self.san_body(mv),
        };

        let after = self.probe(mv);
        if after.is_checkmate() {
            text.push('#');
        } else if after.is_check() {
            text.push('+');
        }
        text
    }

    fn san_body(&self, mv: Move) -> String {
        let mut text = String::new();
        let is_capture = self.board.get(mv.to).is_some() || mv.kind == MoveKind::EnPassant;

        match self.board.get(mv.from).map(|piece| piece.kind) {
            Some(PieceKind::Pawn) | None => {
                if is_capture {
                    text.push(mv.from.file_char());
                }
            }
            Some(kind) => {
                text.push(kind.san_letter());
                text.push_str(&self.disambiguator(mv, kind));
            }
        }

        if is_capture {
            text.push('x');
        }
        text.push_str(&mv.to.to_string());

        if let Some(kind) = mv.promotion() {
            text.push('=');
            text.push(kind.san_letter());
        }
        text
    }

    /// The minimal origin fragment distinguishing `mv` from its rivals:
    /// nothing, the file, the rank, or the full square.
    fn disambiguator(&self, mv: Move, kind: PieceKind) -> String {
        let rivals: Vec<Square> = movegen::generate(self, Scope::default())
            .into_iter()
            .filter(|other| {
                other.to == mv.to
                    && other.from != mv.from
                    && !other.is_castle()
                    && self
                        .board
                        .get(other.from)
                        .is_some_and(|piece| piece.kind == kind)
            })
            .map(|other| other.from)
            .collect();

        if rivals.is_empty() {
            return String::new();
        }
        if rivals.len() == 1 {
            return if rivals[0].file_index() != mv.from.file_index() {
                mv.from.file_char().to_string()
            } else {
                mv.from.rank_char().to_string()
            };
        }
        mv.from.to_string()
    }

    fn resolve_castle(&self, kind: MoveKind, input: &str) -> Result<Move, SanError> {
        let king = self
            .board
            .king_square(self.turn)
            .ok_or(SanError::MissingKing)?;

        let candidate = movegen::generate(self, Scope::square(king))
            .into_iter()
            .find(|mv| mv.kind == kind)
            .ok_or_else(|| SanError::NoMatch {
                input: input.to_string(),
            })?;

        if self.is_legal(candidate) {
            Ok(candidate)
        } else {
            Err(MoveError::Illegal {
                from: candidate.from,
                to: candidate.to,
            }
            .into())
        }
    }
}
