//! Legal destinations, attacks and checks

use crate::board::Board;
use crate::catalog::{self, Path, Reach};
use crate::game::Rules;
use crate::moves::Move;
use crate::squareset::SquareSet;
use crate::types::{Piece, PieceKind, Side, Square};

use arrayvec::ArrayVec;
use thiserror::Error;

/// Error querying destinations
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum MoveGenError {
    /// The origin square holds no piece
    #[error("no piece at {0}")]
    InvalidSelection(Square),
}

/// List of moves for one side
///
/// No janggi position comes close to filling it.
pub type MoveList = ArrayVec<Move, 256>;

fn resolve_step(b: &Board, path: &Path, res: &mut SquareSet) {
    if let Some((&dst, legs)) = path.split_last() {
        if legs.iter().all(|&sq| b.get(sq).is_empty()) {
            res.set(dst);
        }
    }
}

fn resolve_slide(b: &Board, side: Side, path: &Path, res: &mut SquareSet) {
    for &sq in path {
        let cell = b.get(sq);
        if cell.is_empty() {
            res.set(sq);
            continue;
        }
        if !cell.is_side(side) {
            res.set(sq);
        }
        break;
    }
}

fn resolve_leap(b: &Board, side: Side, path: &Path, res: &mut SquareSet) {
    let mut iter = path.iter().copied();
    let screen = match iter.by_ref().find(|&sq| b.get(sq).is_occupied()) {
        Some(sq) => sq,
        None => return,
    };
    if b.get(screen).kind() == Some(PieceKind::Cannon) {
        return;
    }
    for sq in iter {
        let cell = b.get(sq);
        if cell.is_empty() {
            res.set(sq);
            continue;
        }
        if !cell.is_side(side) && cell.kind() != Some(PieceKind::Cannon) {
            res.set(sq);
        }
        break;
    }
}

// Destinations of `piece` as if it stood on `origin`, without the self-check filter.
fn piece_destinations(b: &Board, piece: Piece, origin: Square) -> SquareSet {
    let mut res = SquareSet::EMPTY;
    let reach = catalog::reach(piece.kind);
    for path in catalog::paths(piece, origin) {
        match reach {
            Reach::Step => resolve_step(b, &path, &mut res),
            Reach::Slide => resolve_slide(b, piece.side, &path, &mut res),
            Reach::Leap => resolve_leap(b, piece.side, &path, &mut res),
        }
    }
    res & b.side_pieces(piece.side).complement()
}

/// Returns the squares where the piece on `origin` may move
///
/// The result follows the movement grammar of the piece, the occupancy of the board and
/// the palace constraints. It never contains a square occupied by a piece of the same side.
/// Whether the move leaves the mover's General under attack is not checked; use
/// [`safe_destinations()`] for that. An empty set is a valid answer.
///
/// # Example
///
/// ```
/// # use janggi::{movegen, Board};
/// #
/// let b = Board::initial();
/// let dsts = movegen::legal_destinations(&b, "a7".parse().unwrap()).unwrap();
/// assert_eq!(format!("{:?}", dsts), "SquareSet(a6 b7)");
/// ```
pub fn legal_destinations(b: &Board, origin: Square) -> Result<SquareSet, MoveGenError> {
    let piece = b
        .piece_at(origin)
        .ok_or(MoveGenError::InvalidSelection(origin))?;
    Ok(piece_destinations(b, piece, origin))
}

/// Returns `true` if any piece of side `by` has `sq` among its destinations
pub fn is_square_attacked(b: &Board, sq: Square, by: Side) -> bool {
    b.side_pieces(by).into_iter().any(|src| {
        b.piece_at(src)
            .map_or(false, |piece| piece_destinations(b, piece, src).has(sq))
    })
}

/// Returns all the pieces of side `by` that have `sq` among their destinations
pub fn square_attackers(b: &Board, sq: Square, by: Side) -> SquareSet {
    b.side_pieces(by)
        .into_iter()
        .filter(|&src| {
            b.piece_at(src)
                .map_or(false, |piece| piece_destinations(b, piece, src).has(sq))
        })
        .collect()
}

/// Returns `true` if the General of side `s` is attacked
///
/// A side without a General is never in check.
pub fn is_in_check(b: &Board, s: Side) -> bool {
    b.general_pos(s)
        .map_or(false, |sq| is_square_attacked(b, sq, s.inv()))
}

/// Returns [`legal_destinations()`] without the moves which leave the mover's General
/// under attack
pub fn safe_destinations(b: &Board, origin: Square) -> Result<SquareSet, MoveGenError> {
    let piece = b
        .piece_at(origin)
        .ok_or(MoveGenError::InvalidSelection(origin))?;
    Ok(piece_destinations(b, piece, origin)
        .into_iter()
        .filter(|&dst| {
            let mut next = *b;
            next.move_piece(origin, dst);
            !is_in_check(&next, piece.side)
        })
        .collect())
}

/// Returns `true` if side `s` has at least one move which does not leave its General
/// under attack
pub fn has_safe_moves(b: &Board, s: Side) -> bool {
    b.side_pieces(s).into_iter().any(|src| {
        safe_destinations(b, src).map_or(false, |dsts| dsts.is_nonempty())
    })
}

/// Returns the destinations of the piece on `origin` under the given rules
///
/// With [`Rules::forbid_self_check`] set, this is [`safe_destinations()`], otherwise
/// [`legal_destinations()`].
pub fn destinations(b: &Board, origin: Square, rules: &Rules) -> Result<SquareSet, MoveGenError> {
    if rules.forbid_self_check {
        safe_destinations(b, origin)
    } else {
        legal_destinations(b, origin)
    }
}

/// Returns all the moves of side `s` under the given rules, ordered by source square
pub fn gen_moves(b: &Board, s: Side, rules: &Rules) -> MoveList {
    let mut res = MoveList::new();
    for src in b.side_pieces(s) {
        if let Ok(dsts) = destinations(b, src, rules) {
            res.extend(dsts.into_iter().map(|dst| Move::new(src, dst)));
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    // Board with both Generals at home and the given extra pieces, written as
    // `("e5", 'R')` with layout letters
    fn board(pieces: &[(&str, char)]) -> Board {
        let mut b = Board::from_layout("9/4g4/9/9/9/9/9/9/4G4/9").unwrap();
        for &(s, c) in pieces {
            b.put(sq(s), Cell::from_char(c).unwrap());
        }
        b
    }

    fn dsts(b: &Board, s: &str) -> BTreeSet<String> {
        legal_destinations(b, sq(s))
            .unwrap()
            .into_iter()
            .map(|sq| sq.to_string())
            .collect()
    }

    fn names(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_origin() {
        let b = Board::initial();
        assert_eq!(
            legal_destinations(&b, sq("e5")),
            Err(MoveGenError::InvalidSelection(sq("e5")))
        );
        assert_eq!(
            safe_destinations(&b, sq("e5")),
            Err(MoveGenError::InvalidSelection(sq("e5")))
        );
    }

    #[test]
    fn test_initial_soldiers() {
        let b = Board::initial();
        assert_eq!(dsts(&b, "a7"), names(&["a6", "b7"]));
        assert_eq!(dsts(&b, "e7"), names(&["d7", "f7", "e6"]));
        assert_eq!(dsts(&b, "i7"), names(&["h7", "i6"]));
        assert_eq!(dsts(&b, "c4"), names(&["b4", "d4", "c5"]));
    }

    #[test]
    fn test_initial_position() {
        let b = Board::initial();
        assert_eq!(dsts(&b, "e9"), names(&["d8", "e8", "f8", "d9", "f9", "e10"]));
        assert_eq!(dsts(&b, "b8"), names(&[]));
        assert_eq!(dsts(&b, "a10"), names(&["a9", "a8"]));
        assert_eq!(dsts(&b, "c10"), names(&["d8"]));
        assert_eq!(dsts(&b, "b10"), names(&["d7"]));
        assert_eq!(gen_moves(&b, Side::Blue, &Rules::default()).len(), 31);
        assert_eq!(gen_moves(&b, Side::Red, &Rules::default()).len(), 31);
    }

    #[test]
    fn test_cannon_screen() {
        // No screen
        let b = board(&[("b3", 'C')]);
        assert!(!dsts(&b, "b3").contains("b6"));
        assert!(dsts(&b, "b3").is_empty());

        // One non-Cannon screen
        let b = board(&[("b3", 'C'), ("b5", 's')]);
        assert_eq!(
            dsts(&b, "b3"),
            names(&["b6", "b7", "b8", "b9", "b10"])
        );

        // Two screens
        let b = board(&[("b3", 'C'), ("b4", 'S'), ("b5", 's')]);
        assert!(!dsts(&b, "b3").contains("b6"));
        assert!(dsts(&b, "b3").contains("b5"));

        // Cannon as a screen
        let b = board(&[("b3", 'C'), ("b5", 'c')]);
        assert!(dsts(&b, "b3").is_empty());
        let b = board(&[("b3", 'C'), ("b5", 'C')]);
        assert!(dsts(&b, "b3").is_empty());

        // Cannon is never captured by a Cannon
        let b = board(&[("b3", 'C'), ("b5", 's'), ("b7", 'c')]);
        assert_eq!(dsts(&b, "b3"), names(&["b6"]));
        let b = board(&[("b3", 'C'), ("b5", 's'), ("b7", 'r')]);
        assert_eq!(dsts(&b, "b3"), names(&["b6", "b7"]));
    }

    #[test]
    fn test_cannon_palace() {
        let b = board(&[("d1", 'C'), ("e2", '.')]);
        assert!(!dsts(&b, "d1").contains("f3"));
        // The Red General at e2 is a screen
        let b = board(&[("d1", 'C')]);
        assert!(dsts(&b, "d1").contains("f3"));
        let b = board(&[("d3", 'C')]);
        assert!(dsts(&b, "d3").contains("f1"));
        let b = board(&[("d3", 'C'), ("f1", 'a')]);
        assert!(dsts(&b, "d3").contains("f1"));
        let b = board(&[("d3", 'C'), ("f1", 'c')]);
        assert!(!dsts(&b, "d3").contains("f1"));
    }

    #[test]
    fn test_elephant_blocking() {
        let base = [("e5", 'e')];
        let b = board(&base);
        assert!(dsts(&b, "e5").contains("g8"));
        assert_eq!(dsts(&b, "e5").len(), 8);

        for blocker in ["e6", "f7"] {
            for c in ['s', 'S'] {
                let b = board(&[base[0], (blocker, c)]);
                assert!(!dsts(&b, "e5").contains("g8"));
            }
        }
        let b = board(&[base[0], ("g8", 's')]);
        assert!(!dsts(&b, "e5").contains("g8"));
        let b = board(&[base[0], ("g8", 'S')]);
        assert!(dsts(&b, "e5").contains("g8"));
    }

    #[test]
    fn test_horse_blocking() {
        let b = board(&[("e5", 'H')]);
        assert_eq!(dsts(&b, "e5").len(), 8);
        let b = board(&[("e5", 'H'), ("e6", 's')]);
        let d = dsts(&b, "e5");
        assert!(!d.contains("d7"));
        assert!(!d.contains("f7"));
        assert_eq!(d.len(), 6);
    }

    #[test]
    fn test_chariot() {
        let b = board(&[("a1", 'r'), ("a5", 'S'), ("d1", 'a')]);
        assert_eq!(dsts(&b, "a1"), names(&["a2", "a3", "a4", "a5", "b1", "c1"]));

        // Palace diagonal, corner through the centre
        let b = board(&[("d8", 'r')]);
        assert!(dsts(&b, "d8").contains("e9"));
        assert!(!dsts(&b, "d8").contains("f10"));
        let b = Board::from_layout("9/4g4/9/9/9/9/9/3r5/9/4G4").unwrap();
        assert!(dsts(&b, "d8").contains("e9"));
        assert!(dsts(&b, "d8").contains("f10"));

        // Middle of a palace edge has no diagonal
        let b = board(&[("e8", 'r')]);
        assert!(!dsts(&b, "e8").contains("d9"));
        // Outside the palace, no diagonals at all
        let b = board(&[("c3", 'r')]);
        assert!(!dsts(&b, "c3").contains("d2"));
    }

    #[test]
    fn test_general_and_guard() {
        let b = board(&[("d1", 'a')]);
        assert_eq!(dsts(&b, "d1"), names(&["e1", "d2"]));
        assert_eq!(
            dsts(&b, "e2"),
            names(&["e1", "f1", "d2", "f2", "d3", "e3", "f3"])
        );
        let b = board(&[("e9", '.'), ("f10", 'G')]);
        assert_eq!(dsts(&b, "f10"), names(&["e10", "f9", "e9"]));
    }

    #[test]
    fn test_soldier_palace() {
        // Forward diagonal captures the General
        let b = board(&[("d3", 'S')]);
        assert_eq!(dsts(&b, "d3"), names(&["c3", "e3", "d2", "e2"]));
        let b = board(&[("d3", 'S'), ("e2", 'S')]);
        assert_eq!(dsts(&b, "d3"), names(&["c3", "e3", "d2"]));

        // Backward diagonal is never allowed
        let b = board(&[("e2", 'S')]);
        assert_eq!(dsts(&b, "e2"), names(&["d2", "f2", "e1", "d1", "f1"]));
        let b = board(&[("f8", 's')]);
        assert_eq!(dsts(&b, "f8"), names(&["e8", "g8", "f9", "e9"]));
    }

    #[test]
    fn test_check() {
        let b = board(&[("e5", 'R')]);
        assert!(is_in_check(&b, Side::Red));
        assert!(!is_in_check(&b, Side::Blue));
        assert_eq!(square_attackers(&b, sq("e2"), Side::Blue), SquareSet::from_square(sq("e5")));

        let b = board(&[("e5", 'R'), ("e4", 's')]);
        assert!(!is_in_check(&b, Side::Red));

        // Cannon checks over a screen
        let b = board(&[("e5", 'C'), ("e4", 's')]);
        assert!(is_in_check(&b, Side::Red));

        // Horse checks unless its leg is blocked
        let b = board(&[("d4", 'H')]);
        assert!(is_in_check(&b, Side::Red));
        let b = board(&[("d4", 'H'), ("d3", 'a')]);
        assert!(!is_in_check(&b, Side::Red));

        // No General, no check
        let b = Board::from_layout("9/9/9/9/4R4/9/9/9/4G4/9").unwrap();
        assert!(!is_in_check(&b, Side::Red));
        assert!(is_square_attacked(&b, sq("e2"), Side::Blue));
    }

    #[test]
    fn test_safe_destinations() {
        // The Guard is pinned on the e file
        let b = board(&[("e3", 'a'), ("e6", 'R')]);
        assert_eq!(dsts(&b, "e3"), names(&["d3", "f3"]));
        assert_eq!(safe_destinations(&b, sq("e3")), Ok(SquareSet::EMPTY));

        // The General may not step onto an attacked point
        let g = board(&[("d6", 'R')]);
        let safe = safe_destinations(&g, sq("e2")).unwrap();
        assert!(!safe.has(sq("d1")));
        assert!(!safe.has(sq("d2")));
        assert!(!safe.has(sq("d3")));
        assert!(safe.has(sq("e1")));
        assert!(safe.has(sq("f3")));
        assert!(legal_destinations(&g, sq("e2")).unwrap().has(sq("d2")));

        let rules = Rules::strict();
        assert_eq!(destinations(&b, sq("e3"), &rules), Ok(SquareSet::EMPTY));
        assert_eq!(
            destinations(&b, sq("e3"), &Rules::default()),
            legal_destinations(&b, sq("e3"))
        );
    }

    #[test]
    fn test_has_safe_moves() {
        // Red General in the corner, attacked by a Chariot, with every escape covered
        let b = Board::from_layout("R2g5/R8/9/9/9/9/9/9/4G4/9").unwrap();
        assert!(is_in_check(&b, Side::Red));
        assert!(!has_safe_moves(&b, Side::Red));
        assert!(has_safe_moves(&b, Side::Blue));

        let b = Board::initial();
        assert!(has_safe_moves(&b, Side::Red));
        assert!(has_safe_moves(&b, Side::Blue));
    }

    #[test]
    fn test_random_playout() {
        let mut rng = StdRng::seed_from_u64(0x4a61_6e67_6769);
        let rules = Rules::default();
        for _ in 0..20 {
            let mut b = Board::initial();
            let mut side = Side::Blue;
            for _ in 0..150 {
                for src in b.occupied() {
                    let d = legal_destinations(&b, src).unwrap();
                    assert!((d & b.side_pieces(b.get(src).side().unwrap())).is_empty());
                    assert!(!d.has(src));
                }
                let moves = gen_moves(&b, side, &rules);
                let mv = match moves.choose(&mut rng) {
                    Some(&mv) => mv,
                    None => break,
                };
                let captured = b.move_piece(mv.src, mv.dst);
                assert!(!captured.is_side(side));
                assert!(b.validate().is_ok());
                if captured.kind() == Some(PieceKind::General) {
                    assert!(b.general_pos(side.inv()).is_none());
                    break;
                }
                side = side.inv();
            }
        }
    }
}
