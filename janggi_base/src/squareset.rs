use crate::types::Square;
use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign};
use std::fmt;
use std::iter::{FromIterator, IntoIterator};

/// Set of board squares, one bit per square
///
/// Bits above [`Square::COUNT`] are always zero.
#[derive(
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
)]
pub struct SquareSet(u128);

impl SquareSet {
    pub const EMPTY: SquareSet = SquareSet(0);
    pub const FULL: SquareSet = SquareSet((1_u128 << Square::COUNT) - 1);

    pub const fn from_raw(val: u128) -> SquareSet {
        SquareSet(val & Self::FULL.0)
    }

    pub const fn from_square(sq: Square) -> SquareSet {
        SquareSet(1_u128 << sq.index())
    }

    pub const fn with(self, sq: Square) -> SquareSet {
        SquareSet(self.0 | (1_u128 << sq.index()))
    }

    pub const fn without(self, sq: Square) -> SquareSet {
        SquareSet(self.0 & !(1_u128 << sq.index()))
    }

    pub fn set(&mut self, sq: Square) {
        *self = self.with(sq);
    }

    pub fn unset(&mut self, sq: Square) {
        *self = self.without(sq);
    }

    pub const fn has(&self, sq: Square) -> bool {
        ((self.0 >> sq.index()) & 1) != 0
    }

    /// Returns all the squares which are not in the set
    pub const fn complement(&self) -> SquareSet {
        SquareSet(!self.0 & Self::FULL.0)
    }

    pub const fn as_raw(&self) -> u128 {
        self.0
    }

    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_nonempty(&self) -> bool {
        self.0 != 0
    }

    /// Returns the square with the lowest index, if any
    pub fn first(&self) -> Option<Square> {
        self.into_iter().next()
    }
}

impl From<SquareSet> for u128 {
    fn from(s: SquareSet) -> u128 {
        s.0
    }
}

impl From<Square> for SquareSet {
    fn from(sq: Square) -> SquareSet {
        SquareSet::from_square(sq)
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "SquareSet(")?;
        for (i, sq) in self.into_iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", sq)?;
        }
        write!(f, ")")
    }
}

pub struct Iter(u128);

impl Iterator for Iter {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros();
        self.0 &= self.0.wrapping_sub(1_u128);
        unsafe { Some(Square::from_index_unchecked(bit as usize)) }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Iter {}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        Iter(self.0)
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> SquareSet {
        let mut res = SquareSet::EMPTY;
        for sq in iter {
            res.set(sq);
        }
        res
    }
}

impl Extend<Square> for SquareSet {
    fn extend<I: IntoIterator<Item = Square>>(&mut self, iter: I) {
        for sq in iter {
            self.set(sq);
        }
    }
}
