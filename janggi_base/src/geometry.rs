//! Static board geometry: bounds, palaces and palace diagonals

use crate::squareset::SquareSet;
use crate::types::{File, Rank, Side, Square};

pub const fn is_inside_board(file: isize, rank: isize) -> bool {
    0 <= file && file < File::COUNT as isize && 0 <= rank && rank < Rank::COUNT as isize
}

/// Rank delta of a single forward step
pub const fn forward_delta(s: Side) -> isize {
    match s {
        Side::Blue => -1,
        Side::Red => 1,
    }
}

/// Back rank of the side, where its Chariots start
pub const fn home_rank(s: Side) -> Rank {
    match s {
        Side::Blue => Rank::R10,
        Side::Red => Rank::R1,
    }
}

pub const fn palace_center(s: Side) -> Square {
    match s {
        Side::Blue => Square::from_parts(File::E, Rank::R9),
        Side::Red => Square::from_parts(File::E, Rank::R2),
    }
}

/// Returns the side whose palace contains `sq`, if any
pub const fn palace_of(sq: Square) -> Option<Side> {
    let file = sq.file().index();
    if file < File::D.index() || file > File::F.index() {
        return None;
    }
    match sq.rank() {
        Rank::R1 | Rank::R2 | Rank::R3 => Some(Side::Red),
        Rank::R8 | Rank::R9 | Rank::R10 => Some(Side::Blue),
        _ => None,
    }
}

pub const fn is_inside_palace(s: Side, sq: Square) -> bool {
    match palace_of(sq) {
        Some(p) => p as u8 == s as u8,
        None => false,
    }
}

pub fn palace(s: Side) -> SquareSet {
    Square::iter().filter(|&sq| is_inside_palace(s, sq)).collect()
}

/// Returns the squares joined to `sq` by a marked palace diagonal
///
/// The centre of a palace is joined to its four corners, and each corner is joined to
/// the centre. Any other square has no diagonal neighbours.
pub fn palace_diagonal_neighbors(sq: Square) -> SquareSet {
    let side = match palace_of(sq) {
        Some(side) => side,
        None => return SquareSet::EMPTY,
    };
    let center = palace_center(side);
    if sq == center {
        let mut res = SquareSet::EMPTY;
        for (df, dr) in [(-1, -1), (-1, 1), (1, -1), (1, 1)] {
            if let Some(corner) = center.try_shift(df, dr) {
                res.set(corner);
            }
        }
        return res;
    }
    let df = center.file().index() as isize - sq.file().index() as isize;
    let dr = center.rank().index() as isize - sq.rank().index() as isize;
    if df != 0 && dr != 0 {
        SquareSet::from_square(center)
    } else {
        SquareSet::EMPTY
    }
}
