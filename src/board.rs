//! The 64-slot piece array and the padded 10x12 mailbox.

use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Padded 10x12 mailbox. Interior cells hold the board index of the square
/// they cover; the two sentinel ranks above and below and the sentinel file on
/// each side hold -1, so a single lookup detects any off-board offset.
const MAILBOX: [i8; 120] = {
    let mut cells = [-1i8; 120];
    let mut index = 0;
    while index < 64 {
        cells[(index / 8 + 2) * 10 + index % 8 + 1] = index as i8;
        index += 1;
    }
    cells
};

/// Inverse of [`MAILBOX`]: the padded position of each board index.
const MAILBOX64: [i16; 64] = {
    let mut cells = [0i16; 64];
    let mut index = 0;
    while index < 64 {
        cells[index] = ((index / 8 + 2) * 10 + index % 8 + 1) as i16;
        index += 1;
    }
    cells
};

/// Piece placement: one optional piece per square.
///
/// All occupancy mutation goes through [`place`](Board::place) and
/// [`remove`](Board::remove), and all offset arithmetic goes through
/// [`at`](Board::at); no other code does bounds checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// Create a board with no pieces on it.
    pub const fn empty() -> Board {
        Board {
            squares: [None; 64],
        }
    }

    /// Return the piece on `square`, if any.
    #[inline]
    pub const fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Put `piece` on `square`, replacing whatever was there.
    #[inline]
    pub fn place(&mut self, square: Square, piece: Piece) {
        self.squares[square.index()] = Some(piece);
    }

    /// Take the piece off `square`, returning it if the square was occupied.
    #[inline]
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.index()].take()
    }

    /// Empty every square.
    pub fn clear(&mut self) {
        self.squares = [None; 64];
    }

    /// Return the square reached from `square` by a mailbox `offset`, or
    /// `None` when the offset lands outside the board.
    #[inline]
    pub fn at(square: Square, offset: i16) -> Option<Square> {
        let padded = MAILBOX64[square.index()] + offset;
        if !(0..120).contains(&padded) {
            return None;
        }
        match MAILBOX[padded as usize] {
            -1 => None,
            index => Some(Square::from_index_unchecked(index as u8)),
        }
    }

    /// Find the square of `color`'s king, if it is on the board.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.iter()
            .find(|&(_, piece)| piece.kind == PieceKind::King && piece.color == color)
            .map(|(square, _)| square)
    }

    /// Iterate over occupied squares in index order (a8 toward h1).
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                slot.map(|piece| (Square::from_index_unchecked(index as u8), piece))
            })
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::empty()
    }
}
