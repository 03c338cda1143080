//! Moves and their text notation

use crate::types::{Piece, Side, Square, SquareParseError};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error parsing a [`Move`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum MoveParseError {
    #[error("bad string length")]
    BadLength,
    #[error("bad source: {0}")]
    BadSrc(SquareParseError),
    #[error("bad destination: {0}")]
    BadDst(SquareParseError),
    #[error("source and destination are the same")]
    SameSquare,
}

/// Move of a piece from `src` to `dst`
///
/// A move by itself is just a pair of squares. Whether it is legal depends on the position;
/// see [`GameState::apply_move()`](crate::game::GameState::apply_move).
///
/// Moves are written as two square names joined together, like `e7e6` or `a10a9`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub src: Square,
    pub dst: Square,
}

impl Move {
    #[inline]
    pub const fn new(src: Square, dst: Square) -> Move {
        Move { src, dst }
    }

    /// Parses the move from its text notation
    ///
    /// Does the same as [`Move::from_str`].
    #[inline]
    pub fn from_text(s: &str) -> Result<Move, MoveParseError> {
        Move::from_str(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Move, Self::Err> {
        if !s.is_ascii() || !(4..=6).contains(&s.len()) {
            return Err(MoveParseError::BadLength);
        }
        // The destination starts with the second file letter
        let split = s
            .bytes()
            .enumerate()
            .skip(1)
            .find(|(_, b)| b.is_ascii_alphabetic())
            .map(|(i, _)| i)
            .ok_or(MoveParseError::BadLength)?;
        let src = Square::from_str(&s[..split]).map_err(MoveParseError::BadSrc)?;
        let dst = Square::from_str(&s[split..]).map_err(MoveParseError::BadDst)?;
        if src == dst {
            return Err(MoveParseError::SameSquare);
        }
        Ok(Move { src, dst })
    }
}

/// Applied move, together with what it did to the board
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub mv: Move,
    /// Piece that moved
    pub piece: Piece,
    /// Piece removed from the destination, if any
    pub captured: Option<Piece>,
}

impl MoveRecord {
    #[inline]
    pub fn side(&self) -> Side {
        self.piece.side
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.mv)?;
        if let Some(captured) = self.captured {
            write!(f, "x{}", captured.kind.name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, PieceKind, Rank};

    #[test]
    fn test_parse() {
        let mv = Move::from_text("e7e6").unwrap();
        assert_eq!(mv.src, Square::from_parts(File::E, Rank::R7));
        assert_eq!(mv.dst, Square::from_parts(File::E, Rank::R6));
        assert_eq!(mv.to_string(), "e7e6");

        let mv = Move::from_text("a10a9").unwrap();
        assert_eq!(mv.src, Square::from_parts(File::A, Rank::R10));
        assert_eq!(mv.to_string(), "a10a9");
        assert_eq!(Move::from_text("i9i10").unwrap().to_string(), "i9i10");
        assert_eq!(Move::from_text("b10c10").unwrap().to_string(), "b10c10");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Move::from_text("e7"), Err(MoveParseError::BadLength));
        assert_eq!(Move::from_text("e7e6e5e"), Err(MoveParseError::BadLength));
        assert_eq!(Move::from_text("e71234"), Err(MoveParseError::BadLength));
        assert_eq!(Move::from_text("e7e7"), Err(MoveParseError::SameSquare));
        assert!(matches!(
            Move::from_text("j7e6"),
            Err(MoveParseError::BadSrc(_))
        ));
        assert!(matches!(
            Move::from_text("e7e11"),
            Err(MoveParseError::BadDst(_))
        ));
        assert!(matches!(
            Move::from_text("e0e6"),
            Err(MoveParseError::BadSrc(_))
        ));
    }

    #[test]
    fn test_record_display() {
        let rec = MoveRecord {
            mv: Move::from_text("b8b1").unwrap(),
            piece: Piece::new(Side::Blue, PieceKind::Cannon),
            captured: Some(Piece::new(Side::Red, PieceKind::Elephant)),
        };
        assert_eq!(rec.to_string(), "b8b1xElephant");
        assert_eq!(rec.side(), Side::Blue);
    }
}
