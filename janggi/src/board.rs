//! Board and related things

use crate::squareset::SquareSet;
use crate::types::{Cell, File, Piece, PieceKind, Rank, Side, Square};

use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

pub use janggi_base::geometry::{is_inside_board, is_inside_palace, palace_diagonal_neighbors};
use janggi_base::geometry::{forward_delta, home_rank};

/// Board validation error
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// Too many pieces of given side
    ///
    /// No more than 16 pieces of each side is allowed.
    #[error("too many pieces of side {0:?}")]
    TooManyPieces(Side),
    /// One of the sides has more than one General
    #[error("more than one general of side {0:?}")]
    TooManyGenerals(Side),
    /// A General stands outside of its own palace
    #[error("general outside of the palace at {0}")]
    GeneralOutsidePalace(Square),
    /// A Guard stands outside of its own palace
    #[error("guard outside of the palace at {0}")]
    GuardOutsidePalace(Square),
}

/// Error parsing the board layout
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum LayoutParseError {
    /// Rank is too large
    #[error("too many items in rank {0}")]
    RankOverflow(Rank),
    /// Rank is too small
    #[error("not enough items in rank {0}")]
    RankUnderflow(Rank),
    /// Too many ranks
    #[error("too many ranks")]
    Overflow,
    /// Not enough ranks
    #[error("not enough ranks")]
    Underflow,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Error building [`Board`] from layout
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum LayoutError {
    /// Layout cannot be parsed
    #[error("cannot parse layout: {0}")]
    Parse(#[from] LayoutParseError),
    /// Layout was parsed, but the position is invalid
    #[error("invalid position: {0}")]
    Valid(#[from] ValidateError),
}

/// Janggi board
///
/// The board is a plain array of 90 cells, indexed by [`Square::index()`]. It knows nothing
/// about turns or move legality: [`Board::put()`] and [`Board::move_piece()`] mutate it
/// unconditionally. Legality is the business of [`movegen`](crate::movegen) and
/// [`GameState`](crate::game::GameState).
///
/// # Layout
///
/// The board can be written as a layout string: ten rows separated by `/`, from rank 1
/// (Red's back rank) to rank 10 (Blue's back rank). Each row lists files `a` to `i`, with
/// a digit standing for a run of empty points. Blue pieces are uppercase, Red pieces are
/// lowercase: `g` General, `a` Guard, `h` Horse, `e` Elephant, `r` Chariot, `c` Cannon,
/// `s` Soldier.
///
/// # Example
///
/// ```
/// # use janggi::{Board, Cell, PieceKind, Side, Square};
/// #
/// let mut board = Board::empty();
/// board.put("e2".parse().unwrap(), Cell::from_parts(Side::Red, PieceKind::General));
/// board.put("e9".parse().unwrap(), Cell::from_parts(Side::Blue, PieceKind::General));
/// assert_eq!(board.as_layout(), "9/4g4/9/9/9/9/9/9/4G4/9");
/// assert!(board.validate().is_ok());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    cells: [Cell; Square::COUNT],
}

impl Board {
    /// Returns a board without any pieces
    #[inline]
    pub const fn empty() -> Board {
        Board {
            cells: [Cell::EMPTY; Square::COUNT],
        }
    }

    /// Returns a board with the initial position
    pub fn initial() -> Board {
        let mut res = Board::empty();
        for side in Side::iter() {
            // Ranks counted from the home rank towards the opponent
            let home = home_rank(side).index() as isize;
            let rank = |n: isize| Rank::from_index((home + forward_delta(side) * n) as usize);
            let (back, general, cannon, soldier) = (rank(0), rank(1), rank(2), rank(3));
            res.put2(File::A, back, Cell::from_parts(side, PieceKind::Chariot));
            res.put2(File::B, back, Cell::from_parts(side, PieceKind::Elephant));
            res.put2(File::C, back, Cell::from_parts(side, PieceKind::Horse));
            res.put2(File::D, back, Cell::from_parts(side, PieceKind::Guard));
            res.put2(File::F, back, Cell::from_parts(side, PieceKind::Guard));
            res.put2(File::G, back, Cell::from_parts(side, PieceKind::Elephant));
            res.put2(File::H, back, Cell::from_parts(side, PieceKind::Horse));
            res.put2(File::I, back, Cell::from_parts(side, PieceKind::Chariot));
            res.put2(File::E, general, Cell::from_parts(side, PieceKind::General));
            res.put2(File::B, cannon, Cell::from_parts(side, PieceKind::Cannon));
            res.put2(File::H, cannon, Cell::from_parts(side, PieceKind::Cannon));
            for file in [File::A, File::C, File::E, File::G, File::I] {
                res.put2(file, soldier, Cell::from_parts(side, PieceKind::Soldier));
            }
        }
        res
    }

    /// Parses and validates a board from layout
    ///
    /// Does the same as [`Board::from_str`]. It is recommended to use this function instead of
    /// `from_str()` for better readability.
    #[inline]
    pub fn from_layout(s: &str) -> Result<Board, LayoutError> {
        Board::from_str(s)
    }

    /// Returns the contents of the square `sq`
    #[inline]
    pub fn get(&self, sq: Square) -> Cell {
        self.cells[sq.index()]
    }

    /// Returns the contents of the square with file `file` and rank `rank`
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Cell {
        self.get(Square::from_parts(file, rank))
    }

    /// Returns the piece standing on `sq`, if any
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.get(sq).piece()
    }

    /// Puts `cell` to the square `sq`, replacing whatever was there
    #[inline]
    pub fn put(&mut self, sq: Square, cell: Cell) {
        self.cells[sq.index()] = cell;
    }

    /// Puts `cell` to the square with file `file` and rank `rank`
    #[inline]
    pub fn put2(&mut self, file: File, rank: Rank, cell: Cell) {
        self.put(Square::from_parts(file, rank), cell);
    }

    /// Moves the contents of `src` to `dst` and leaves `src` empty
    ///
    /// Whatever stood on `dst` is removed from the board and returned. No legality checks
    /// are done here.
    #[inline]
    pub fn move_piece(&mut self, src: Square, dst: Square) -> Cell {
        let captured = self.get(dst);
        self.put(dst, self.get(src));
        self.put(src, Cell::EMPTY);
        captured
    }

    /// Returns all the squares holding the piece of side `s` and kind `k`
    pub fn find(&self, s: Side, k: PieceKind) -> SquareSet {
        let cell = Cell::from_parts(s, k);
        self.iter().filter(|&(_, c)| c == cell).map(|(sq, _)| sq).collect()
    }

    /// Returns all the squares holding pieces of side `s`
    pub fn side_pieces(&self, s: Side) -> SquareSet {
        self.iter().filter(|(_, c)| c.is_side(s)).map(|(sq, _)| sq).collect()
    }

    /// Returns all the occupied squares
    pub fn occupied(&self) -> SquareSet {
        self.iter().filter(|(_, c)| c.is_occupied()).map(|(sq, _)| sq).collect()
    }

    /// Returns the position of the General of side `s`, or `None` if it was captured
    #[inline]
    pub fn general_pos(&self, s: Side) -> Option<Square> {
        self.find(s, PieceKind::General).first()
    }

    /// Iterates over all the squares with their contents, in square index order
    pub fn iter(&self) -> impl Iterator<Item = (Square, Cell)> + '_ {
        Square::iter().map(move |sq| (sq, self.get(sq)))
    }

    /// Returns every square together with the piece on it, in square index order
    ///
    /// This is the full view of the position for rendering.
    pub fn snapshot(&self) -> Vec<(Square, Option<Piece>)> {
        self.iter().map(|(sq, c)| (sq, c.piece())).collect()
    }

    /// Checks that the position satisfies the board invariants
    pub fn validate(&self) -> Result<(), ValidateError> {
        for side in Side::iter() {
            if self.side_pieces(side).len() > 16 {
                return Err(ValidateError::TooManyPieces(side));
            }
            let generals = self.find(side, PieceKind::General);
            if generals.len() > 1 {
                return Err(ValidateError::TooManyGenerals(side));
            }
            if let Some(sq) = generals.into_iter().find(|&sq| !is_inside_palace(side, sq)) {
                return Err(ValidateError::GeneralOutsidePalace(sq));
            }
            let guards = self.find(side, PieceKind::Guard);
            if let Some(sq) = guards.into_iter().find(|&sq| !is_inside_palace(side, sq)) {
                return Err(ValidateError::GuardOutsidePalace(sq));
            }
        }
        Ok(())
    }

    /// Wraps the board to allow pretty-printing with the given style `Style`
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    ///
    /// # Example
    ///
    /// ```
    /// # use janggi::{Board, board::PrettyStyle};
    /// #
    /// let b = Board::initial();
    ///
    /// let res = r#"
    ///  1|reha.aehr
    ///  2|....g....
    ///  3|.c.....c.
    ///  4|s.s.s.s.s
    ///  5|.........
    ///  6|.........
    ///  7|S.S.S.S.S
    ///  8|.C.....C.
    ///  9|....G....
    /// 10|REHA.AEHR
    /// --+---------
    ///   |abcdefghi
    /// "#;
    /// assert_eq!(b.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { board: self, style }
    }

    /// Converts the board into a layout string
    ///
    /// Does the same as `Board::to_string()`. It is recommended to use this function instead of
    /// `to_string()` for better readability.
    #[inline]
    pub fn as_layout(&self) -> String {
        self.to_string()
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Board {
        Board::empty()
    }
}

/// Style for [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces as Hanja characters, as they are written on real pieces
    Hanja,
}

/// Wrapper to pretty-print the board
///
/// See docs for [`Board::pretty()`] for more details.
pub struct Pretty<'a> {
    board: &'a Board,
    style: PrettyStyle,
}

fn parse_cells(s: &str) -> Result<[Cell; Square::COUNT], LayoutParseError> {
    type Error = LayoutParseError;

    let mut file = 0_usize;
    let mut rank = 0_usize;
    let mut cells = [Cell::EMPTY; Square::COUNT];
    for b in s.bytes() {
        match b {
            b'1'..=b'9' => {
                let add = (b - b'0') as usize;
                if file + add > File::COUNT {
                    return Err(Error::RankOverflow(Rank::from_index(rank)));
                }
                file += add;
            }
            b'/' => {
                if file < File::COUNT {
                    return Err(Error::RankUnderflow(Rank::from_index(rank)));
                }
                rank += 1;
                file = 0;
                if rank >= Rank::COUNT {
                    return Err(Error::Overflow);
                }
            }
            _ => {
                if file >= File::COUNT {
                    return Err(Error::RankOverflow(Rank::from_index(rank)));
                }
                let cell = Cell::from_char(b as char).ok_or(Error::UnexpectedChar(b as char))?;
                cells[Square::from_parts(File::from_index(file), Rank::from_index(rank)).index()] =
                    cell;
                file += 1;
            }
        };
    }

    if file < File::COUNT {
        return Err(Error::RankUnderflow(Rank::from_index(rank)));
    }
    if rank < Rank::COUNT - 1 {
        return Err(Error::Underflow);
    }

    Ok(cells)
}

impl FromStr for Board {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        let board = Board {
            cells: parse_cells(s)?,
        };
        board.validate()?;
        Ok(board)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            if rank.index() != 0 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for file in File::iter() {
                let cell = self.get2(file, rank);
                if cell.is_empty() {
                    empty += 1;
                    continue;
                }
                if empty != 0 {
                    write!(f, "{}", empty)?;
                    empty = 0;
                }
                write!(f, "{}", cell)?;
            }
            if empty != 0 {
                write!(f, "{}", empty)?;
            }
        }
        Ok(())
    }
}

trait StyleTable {
    const HORZ_FRAME: char;
    const VERT_FRAME: char;
    const ANGLE_FRAME: char;

    fn cell(c: Cell) -> char;

    fn fmt(b: &Board, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            write!(f, "{:>2}{}", rank.number(), Self::VERT_FRAME)?;
            for file in File::iter() {
                write!(f, "{}", Self::cell(b.get2(file, rank)))?;
            }
            writeln!(f)?;
        }
        write!(f, "{}{}{}", Self::HORZ_FRAME, Self::HORZ_FRAME, Self::ANGLE_FRAME)?;
        for _ in File::iter() {
            write!(f, "{}", Self::HORZ_FRAME)?;
        }
        writeln!(f)?;
        write!(f, "  {}", Self::VERT_FRAME)?;
        for file in File::iter() {
            write!(f, "{}", file)?;
        }
        writeln!(f)?;
        Ok(())
    }
}

struct AsciiStyleTable;
struct HanjaStyleTable;

impl StyleTable for AsciiStyleTable {
    const HORZ_FRAME: char = '-';
    const VERT_FRAME: char = '|';
    const ANGLE_FRAME: char = '+';

    fn cell(c: Cell) -> char {
        c.as_char()
    }
}

impl StyleTable for HanjaStyleTable {
    const HORZ_FRAME: char = '─';
    const VERT_FRAME: char = '│';
    const ANGLE_FRAME: char = '┼';

    fn cell(c: Cell) -> char {
        c.as_hanja_char()
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self.board, f),
            PrettyStyle::Hanja => HanjaStyleTable::fmt(self.board, f),
        }
    }
}
