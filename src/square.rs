//! Board squares, indexed from a8 (0) to h1 (63).

use std::fmt;

/// A square on the board, encoded as a `u8` index.
///
/// Index 0 is a8; indices grow by file and then by descending rank, so h8 = 7,
/// a7 = 8 and h1 = 63. This matches the order squares appear in a FEN
/// placement string. Squares that are "off the board" are represented as
/// `Option<Square>::None` throughout the crate.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square(u8);

impl Square {
    /// Total number of squares.
    pub const COUNT: usize = 64;

    /// Create a square from a zero-based index, returning `None` if out of range.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Square> {
        if index < 64 { Some(Square(index)) } else { None }
    }

    /// Create a square from a zero-based index without bounds checking.
    ///
    /// # Panics
    ///
    /// Debug-asserts that `index < 64`.
    #[inline]
    pub(crate) const fn from_index_unchecked(index: u8) -> Square {
        debug_assert!(index < 64);
        Square(index)
    }

    /// Create a square from file (0 = a) and rank (0 = rank 1) indices.
    #[inline]
    pub const fn from_coords(file: u8, rank: u8) -> Option<Square> {
        if file < 8 && rank < 8 {
            Some(Square((7 - rank) * 8 + file))
        } else {
            None
        }
    }

    /// Parse an algebraic square name (e.g. "e4").
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        if !(b'a'..=b'h').contains(&bytes[0]) || !(b'1'..=b'8').contains(&bytes[1]) {
            return None;
        }
        Square::from_coords(bytes[0] - b'a', bytes[1] - b'1')
    }

    /// Return the zero-based index (0 = a8 .. 63 = h1).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Return the file index (0 = a .. 7 = h).
    #[inline]
    pub const fn file_index(self) -> u8 {
        self.0 % 8
    }

    /// Return the rank index (0 = rank 1 .. 7 = rank 8).
    #[inline]
    pub const fn rank_index(self) -> u8 {
        7 - self.0 / 8
    }

    /// Return the file letter ('a'..'h').
    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.file_index()) as char
    }

    /// Return the rank digit ('1'..'8').
    #[inline]
    pub const fn rank_char(self) -> char {
        (b'1' + self.rank_index()) as char
    }

    /// Iterate over all 64 squares in index order (a8, b8, ..., h1).
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }

    // Named square constants, FEN order (rank 8 first).
    pub const A8: Square = Square(0);
    pub const B8: Square = Square(1);
    pub const C8: Square = Square(2);
    pub const D8: Square = Square(3);
    pub const E8: Square = Square(4);
    pub const F8: Square = Square(5);
    pub const G8: Square = Square(6);
    pub const H8: Square = Square(7);
    pub const A7: Square = Square(8);
    pub const B7: Square = Square(9);
    pub const C7: Square = Square(10);
    pub const D7: Square = Square(11);
    pub const E7: Square = Square(12);
    pub const F7: Square = Square(13);
    pub const G7: Square = Square(14);
    pub const H7: Square = Square(15);
    pub const A6: Square = Square(16);
    pub const B6: Square = Square(17);
    pub const C6: Square = Square(18);
    pub const D6: Square = Square(19);
    pub const E6: Square = Square(20);
    pub const F6: Square = Square(21);
    pub const G6: Square = Square(22);
    pub const H6: Square = Square(23);
    pub const A5: Square = Square(24);
    pub const B5: Square = Square(25);
    pub const C5: Square = Square(26);
    pub const D5: Square = Square(27);
    pub const E5: Square = Square(28);
    pub const F5: Square = Square(29);
    pub const G5: Square = Square(30);
    pub const H5: Square = Square(31);
    pub const A4: Square = Square(32);
    pub const B4: Square = Square(33);
    pub const C4: Square = Square(34);
    pub const D4: Square = Square(35);
    pub const E4: Square = Square(36);
    pub const F4: Square = Square(37);
    pub const G4: Square = Square(38);
    pub const H4: Square = Square(39);
    pub const A3: Square = Square(40);
    pub const B3: Square = Square(41);
    pub const C3: Square = Square(42);
    pub const D3: Square = Square(43);
    pub const E3: Square = Square(44);
    pub const F3: Square = Square(45);
    pub const G3: Square = Square(46);
    pub const H3: Square = Square(47);
    pub const A2: Square = Square(48);
    pub const B2: Square = Square(49);
    pub const C2: Square = Square(50);
    pub const D2: Square = Square(51);
    pub const E2: Square = Square(52);
    pub const F2: Square = Square(53);
    pub const G2: Square = Square(54);
    pub const H2: Square = Square(55);
    pub const A1: Square = Square(56);
    pub const B1: Square = Square(57);
    pub const C1: Square = Square(58);
    pub const D1: Square = Square(59);
    pub const E1: Square = Square(60);
    pub const F1: Square = Square(61);
    pub const G1: Square = Square(62);
    pub const H1: Square = Square(63);
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::Square;

    #[test]
    fn corner_indices() {
        assert_eq!(Square::A8.index(), 0);
        assert_eq!(Square::H8.index(), 7);
        assert_eq!(Square::A1.index(), 56);
        assert_eq!(Square::H1.index(), 63);
    }

    #[test]
    fn index_bijection() {
        for sq in Square::all() {
            let reconstructed = Square::from_coords(sq.file_index(), sq.rank_index());
            assert_eq!(reconstructed, Some(sq));
            assert_eq!(Square::from_index(sq.index() as u8), Some(sq));
        }
        assert_eq!(Square::all().count(), 64);
    }

    #[test]
    fn from_index_out_of_range() {
        assert_eq!(Square::from_index(64), None);
        assert_eq!(Square::from_index(255), None);
    }

    #[test]
    fn coords() {
        assert_eq!(Square::E4.file_index(), 4);
        assert_eq!(Square::E4.rank_index(), 3);
        assert_eq!(Square::A1.rank_index(), 0);
        assert_eq!(Square::A8.rank_index(), 7);
    }

    #[test]
    fn algebraic_roundtrip() {
        for sq in Square::all() {
            let name = sq.to_string();
            assert_eq!(Square::from_algebraic(&name), Some(sq), "failed for {name}");
        }
    }

    #[test]
    fn algebraic_known_values() {
        assert_eq!(Square::from_algebraic("a8"), Some(Square::A8));
        assert_eq!(Square::from_algebraic("e4"), Some(Square::E4));
        assert_eq!(Square::from_algebraic("h1"), Some(Square::H1));
    }

    #[test]
    fn algebraic_invalid() {
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("a"), None);
        assert_eq!(Square::from_algebraic(""), None);
        assert_eq!(Square::from_algebraic("e44"), None);
    }

    #[test]
    fn debug_shows_algebraic() {
        assert_eq!(format!("{:?}", Square::E4), "Square(e4)");
    }
}
