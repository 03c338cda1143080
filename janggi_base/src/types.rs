use std::fmt;
use std::hint;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SquareParseError {
    #[error("unexpected file char {0:?}")]
    UnexpectedFileChar(char),
    #[error("unexpected rank {0:?}")]
    UnexpectedRank(String),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellParseError {
    #[error("unexpected cell char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SideParseError {
    #[error("unexpected side char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
    I = 8,
}

impl File {
    pub const COUNT: usize = 9;

    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub const unsafe fn from_index_unchecked(val: usize) -> Self {
        match val {
            0 => File::A,
            1 => File::B,
            2 => File::C,
            3 => File::D,
            4 => File::E,
            5 => File::F,
            6 => File::G,
            7 => File::H,
            8 => File::I,
            _ => hint::unreachable_unchecked(),
        }
    }

    pub const fn from_index(val: usize) -> Self {
        assert!(val < Self::COUNT, "file index must be between 0 and 8");
        unsafe { Self::from_index_unchecked(val) }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(|x| unsafe { Self::from_index_unchecked(x) })
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='i' => Some(unsafe {
                Self::from_index_unchecked((u32::from(c) - u32::from('a')) as usize)
            }),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        (b'a' + *self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// Board rank
///
/// `R1` is the back rank of Red, `R10` is the back rank of Blue.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
    R9 = 8,
    R10 = 9,
}

impl Rank {
    pub const COUNT: usize = 10;

    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub const unsafe fn from_index_unchecked(val: usize) -> Self {
        match val {
            0 => Rank::R1,
            1 => Rank::R2,
            2 => Rank::R3,
            3 => Rank::R4,
            4 => Rank::R5,
            5 => Rank::R6,
            6 => Rank::R7,
            7 => Rank::R8,
            8 => Rank::R9,
            9 => Rank::R10,
            _ => hint::unreachable_unchecked(),
        }
    }

    pub const fn from_index(val: usize) -> Self {
        assert!(val < Self::COUNT, "rank index must be between 0 and 9");
        unsafe { Self::from_index_unchecked(val) }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(|x| unsafe { Self::from_index_unchecked(x) })
    }

    /// Returns the rank number as written in notation, from 1 to 10
    pub const fn number(&self) -> usize {
        self.index() + 1
    }

    pub fn from_number(num: usize) -> Option<Self> {
        match num {
            1..=10 => Some(unsafe { Self::from_index_unchecked(num - 1) }),
            _ => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.number())
    }
}

/// One of the 90 board points
///
/// Squares are stored as a linear index `rank * 9 + file`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    pub const COUNT: usize = File::COUNT * Rank::COUNT;

    pub const fn from_index(val: usize) -> Square {
        assert!(val < Self::COUNT, "square must be between 0 and 89");
        Square(val as u8)
    }

    pub const unsafe fn from_index_unchecked(val: usize) -> Square {
        Square(val as u8)
    }

    pub const fn from_parts(file: File, rank: Rank) -> Square {
        Square((rank as u8) * (File::COUNT as u8) + file as u8)
    }

    pub const fn file(&self) -> File {
        unsafe { File::from_index_unchecked(self.0 as usize % File::COUNT) }
    }

    pub const fn rank(&self) -> Rank {
        unsafe { Rank::from_index_unchecked(self.0 as usize / File::COUNT) }
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns the square shifted by the given number of files and ranks, or `None`
    /// if it falls off the board
    pub fn try_shift(self, delta_file: isize, delta_rank: isize) -> Option<Square> {
        let new_file = self.file().index().wrapping_add(delta_file as usize);
        let new_rank = self.rank().index().wrapping_add(delta_rank as usize);
        if new_file >= File::COUNT || new_rank >= Rank::COUNT {
            return None;
        }
        unsafe {
            Some(Square::from_parts(
                File::from_index_unchecked(new_file),
                Rank::from_index_unchecked(new_rank),
            ))
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..Self::COUNT as u8).map(Square)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if self.index() < Self::COUNT {
            return write!(f, "Square({})", self);
        }
        write!(f, "Square(?{:?})", self.0)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !(2..=3).contains(&s.len()) || !s.is_ascii() {
            return Err(SquareParseError::BadLength);
        }
        let file_ch = s.as_bytes()[0] as char;
        let file = File::from_char(file_ch).ok_or(SquareParseError::UnexpectedFileChar(file_ch))?;
        let rank_str = &s[1..];
        let rank = rank_str
            .parse::<usize>()
            .ok()
            .filter(|_| rank_str.bytes().all(|b| b.is_ascii_digit()) && !rank_str.starts_with('0'))
            .and_then(Rank::from_number)
            .ok_or_else(|| SquareParseError::UnexpectedRank(rank_str.to_string()))?;
        Ok(Square::from_parts(file, rank))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Side {
    Blue = 0,
    Red = 1,
}

impl Side {
    pub const fn inv(&self) -> Side {
        match *self {
            Side::Blue => Side::Red,
            Side::Red => Side::Blue,
        }
    }

    pub fn as_char(&self) -> char {
        match *self {
            Side::Blue => 'b',
            Side::Red => 'r',
        }
    }

    pub fn from_char(c: char) -> Option<Side> {
        match c {
            'b' => Some(Side::Blue),
            'r' => Some(Side::Red),
            _ => None,
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        [Side::Blue, Side::Red].into_iter()
    }

    pub fn name(&self) -> &'static str {
        match *self {
            Side::Blue => "Blue",
            Side::Red => "Red",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Side {
    type Err = SideParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Side::from_char(ch).ok_or(SideParseError::UnexpectedChar(ch)),
            _ => Err(SideParseError::BadLength),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PieceKind {
    General = 0,
    Guard = 1,
    Horse = 2,
    Elephant = 3,
    Chariot = 4,
    Cannon = 5,
    Soldier = 6,
}

impl PieceKind {
    pub const COUNT: usize = 7;

    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub const unsafe fn from_index_unchecked(val: usize) -> Self {
        match val {
            0 => PieceKind::General,
            1 => PieceKind::Guard,
            2 => PieceKind::Horse,
            3 => PieceKind::Elephant,
            4 => PieceKind::Chariot,
            5 => PieceKind::Cannon,
            6 => PieceKind::Soldier,
            _ => hint::unreachable_unchecked(),
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(|x| unsafe { Self::from_index_unchecked(x) })
    }

    /// Returns how many pieces of this kind each side has in the starting position
    pub const fn initial_count(&self) -> usize {
        match *self {
            PieceKind::General => 1,
            PieceKind::Soldier => 5,
            _ => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match *self {
            PieceKind::General => "General",
            PieceKind::Guard => "Guard",
            PieceKind::Horse => "Horse",
            PieceKind::Elephant => "Elephant",
            PieceKind::Chariot => "Chariot",
            PieceKind::Cannon => "Cannon",
            PieceKind::Soldier => "Soldier",
        }
    }
}

/// A piece of the given kind and side
///
/// Pieces have no identity of their own: two pieces with the same kind and side
/// are interchangeable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(side: Side, kind: PieceKind) -> Piece {
        Piece { side, kind }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} {}", self.side.name(), self.kind.name())
    }
}

/// Contents of a single board point, either empty or holding one piece
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell(u8);

impl Cell {
    pub const EMPTY: Cell = Cell(0);
    pub const COUNT: usize = 1 + 2 * PieceKind::COUNT;

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_occupied(&self) -> bool {
        self.0 != 0
    }

    pub const unsafe fn from_index_unchecked(val: usize) -> Cell {
        Cell(val as u8)
    }

    pub const fn from_index(val: usize) -> Cell {
        assert!(val < Self::COUNT, "index too large");
        Cell(val as u8)
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    pub const fn from_parts(s: Side, k: PieceKind) -> Cell {
        Cell(match s {
            Side::Blue => 1 + k as u8,
            Side::Red => 1 + PieceKind::COUNT as u8 + k as u8,
        })
    }

    pub const fn from_piece(p: Piece) -> Cell {
        Self::from_parts(p.side, p.kind)
    }

    pub const fn side(&self) -> Option<Side> {
        match self.0 {
            0 => None,
            1..=7 => Some(Side::Blue),
            _ => Some(Side::Red),
        }
    }

    pub const fn kind(&self) -> Option<PieceKind> {
        match self.0 {
            0 => None,
            v @ 1..=7 => Some(unsafe { PieceKind::from_index_unchecked(v as usize - 1) }),
            v => Some(unsafe { PieceKind::from_index_unchecked(v as usize - 8) }),
        }
    }

    pub const fn piece(&self) -> Option<Piece> {
        match (self.side(), self.kind()) {
            (Some(side), Some(kind)) => Some(Piece { side, kind }),
            _ => None,
        }
    }

    /// Returns `true` if the cell holds a piece of side `s`
    pub fn is_side(&self, s: Side) -> bool {
        self.side() == Some(s)
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(|x| unsafe { Self::from_index_unchecked(x) })
    }

    pub fn as_char(&self) -> char {
        b".GAHERCSgahercs"[self.0 as usize] as char
    }

    pub fn as_hanja_char(&self) -> char {
        [
            '.', '楚', '士', '馬', '象', '車', '包', '卒', '漢', '士', '馬', '象', '車', '包', '兵',
        ][self.0 as usize]
    }

    pub fn from_char(c: char) -> Option<Self> {
        if c == '.' {
            return Some(Cell::EMPTY);
        }
        let side = if c.is_ascii_uppercase() {
            Side::Blue
        } else {
            Side::Red
        };
        let kind = match c.to_ascii_lowercase() {
            'g' => PieceKind::General,
            'a' => PieceKind::Guard,
            'h' => PieceKind::Horse,
            'e' => PieceKind::Elephant,
            'r' => PieceKind::Chariot,
            'c' => PieceKind::Cannon,
            's' => PieceKind::Soldier,
            _ => return None,
        };
        Some(Cell::from_parts(side, kind))
    }
}

impl From<Piece> for Cell {
    fn from(p: Piece) -> Cell {
        Cell::from_piece(p)
    }
}

impl From<Option<Piece>> for Cell {
    fn from(p: Option<Piece>) -> Cell {
        p.map_or(Cell::EMPTY, Cell::from_piece)
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if self.index() < Self::COUNT {
            return write!(f, "Cell({})", self.as_char());
        }
        write!(f, "Cell(?{:?})", self.0)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Cell {
    type Err = CellParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Cell::from_char(ch).ok_or(CellParseError::UnexpectedChar(ch)),
            _ => Err(CellParseError::BadLength),
        }
    }
}
