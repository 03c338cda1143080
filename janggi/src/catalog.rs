//! Movement grammar of each piece kind

use crate::board::is_inside_palace;
use crate::squareset::SquareSet;
use crate::types::{Piece, PieceKind, Side, Square};
use janggi_base::geometry::forward_delta;

use arrayvec::ArrayVec;

#[inline]
const fn ss(val: u128) -> SquareSet {
    SquareSet::from_raw(val)
}

include!(concat!(env!("OUT_DIR"), "/near.rs"));

/// Squares from the origin outward, origin excluded
///
/// The longest path is a slide along a file, which visits nine squares.
pub type Path = ArrayVec<Square, 9>;

/// All the paths of a piece from one origin
pub type PathList = ArrayVec<Path, 8>;

/// How the paths of a piece kind are turned into destinations
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Reach {
    /// The last square of the path is the only destination, and all the squares before it
    /// must be empty
    Step,
    /// Every square up to the first occupied one is a destination, and the occupied one is
    /// a destination if it holds an enemy piece
    Slide,
    /// The piece must jump over exactly one screen, which may not be a Cannon. Squares after
    /// the screen are destinations up to the next occupied one, which is a destination if
    /// it holds an enemy non-Cannon piece
    Leap,
}

#[inline]
pub fn reach(kind: PieceKind) -> Reach {
    match kind {
        PieceKind::Chariot => Reach::Slide,
        PieceKind::Cannon => Reach::Leap,
        PieceKind::General
        | PieceKind::Guard
        | PieceKind::Horse
        | PieceKind::Elephant
        | PieceKind::Soldier => Reach::Step,
    }
}

#[inline]
pub fn orthogonal_neighbors(sq: Square) -> SquareSet {
    unsafe { *ORTHOGONAL_NEIGHBORS.get_unchecked(sq.index()) }
}

#[inline]
pub fn palace_diagonals(sq: Square) -> SquareSet {
    unsafe { *PALACE_DIAGONALS.get_unchecked(sq.index()) }
}

const ORTHOGONAL_DELTAS: [(isize, isize); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

fn delta(src: Square, dst: Square) -> (isize, isize) {
    (
        dst.file().index() as isize - src.file().index() as isize,
        dst.rank().index() as isize - src.rank().index() as isize,
    )
}

fn single(sq: Square) -> Path {
    let mut path = Path::new();
    path.push(sq);
    path
}

fn palace_steps(side: Side, origin: Square) -> PathList {
    (orthogonal_neighbors(origin) | palace_diagonals(origin))
        .into_iter()
        .filter(|&sq| is_inside_palace(side, sq))
        .map(single)
        .collect()
}

fn soldier_steps(side: Side, origin: Square) -> PathList {
    let fwd = forward_delta(side);
    let orth = orthogonal_neighbors(origin)
        .into_iter()
        .filter(|&sq| delta(origin, sq).1 != -fwd);
    let diag = palace_diagonals(origin)
        .into_iter()
        .filter(|&sq| delta(origin, sq).1 == fwd);
    orth.chain(diag).map(single).collect()
}

// Leg first, then `diag_steps` diagonal steps outward to either side of the leg direction.
fn jumps(origin: Square, diag_steps: usize) -> PathList {
    let mut res = PathList::new();
    for (df, dr) in ORTHOGONAL_DELTAS {
        let leg = match origin.try_shift(df, dr) {
            Some(leg) => leg,
            None => continue,
        };
        for side in [-1, 1] {
            // Perpendicular component of the diagonal step
            let (pf, pr) = (dr * side, df * side);
            let mut path = single(leg);
            let mut cur = leg;
            let mut ok = true;
            for _ in 0..diag_steps {
                match cur.try_shift(df + pf, dr + pr) {
                    Some(next) => {
                        path.push(next);
                        cur = next;
                    }
                    None => {
                        ok = false;
                        break;
                    }
                }
            }
            if ok {
                res.push(path);
            }
        }
    }
    res
}

fn lines(origin: Square) -> PathList {
    let mut res = PathList::new();
    for (df, dr) in ORTHOGONAL_DELTAS {
        let mut path = Path::new();
        let mut cur = origin;
        while let Some(next) = cur.try_shift(df, dr) {
            path.push(next);
            cur = next;
        }
        if !path.is_empty() {
            res.push(path);
        }
    }
    for first in palace_diagonals(origin) {
        let (df, dr) = delta(origin, first);
        let mut path = single(first);
        let mut cur = first;
        // Continue along the same diagonal only while it stays marked
        while let Some(next) = cur.try_shift(df, dr) {
            if !palace_diagonals(cur).has(next) {
                break;
            }
            path.push(next);
            cur = next;
        }
        res.push(path);
    }
    res
}

/// Returns candidate paths for `piece` standing on `origin`
///
/// Paths never leave the board. Occupancy is not taken into account here; see
/// [`reach()`] for how the paths are resolved against the board.
pub fn paths(piece: Piece, origin: Square) -> PathList {
    match piece.kind {
        PieceKind::General | PieceKind::Guard => palace_steps(piece.side, origin),
        PieceKind::Horse => jumps(origin, 1),
        PieceKind::Elephant => jumps(origin, 2),
        PieceKind::Chariot | PieceKind::Cannon => lines(origin),
        PieceKind::Soldier => soldier_steps(piece.side, origin),
    }
}
