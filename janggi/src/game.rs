//! Game controller: turns, selection and game end

use crate::board::Board;
use crate::movegen::{self, MoveGenError};
use crate::moves::{Move, MoveParseError, MoveRecord};
use crate::squareset::SquareSet;
use crate::types::{Piece, PieceKind, Side, Square};

use std::fmt;

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Rules in force for a game
///
/// The default rules are permissive: a player may leave their General under attack, and
/// the game ends when a General is captured. [`Rules::strict()`] forbids such moves
/// instead, so a General is never captured and the game ends by checkmate.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rules {
    /// Forbid moves which leave the mover's General under attack
    pub forbid_self_check: bool,
}

impl Rules {
    #[inline]
    pub const fn permissive() -> Rules {
        Rules {
            forbid_self_check: false,
        }
    }

    #[inline]
    pub const fn strict() -> Rules {
        Rules {
            forbid_self_check: true,
        }
    }
}

/// Game status
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Status {
    Ongoing,
    /// The game is over and the given side won
    Won(Side),
}

impl Status {
    #[inline]
    pub fn is_finished(&self) -> bool {
        matches!(self, Status::Won(_))
    }

    #[inline]
    pub fn winner(&self) -> Option<Side> {
        match *self {
            Status::Won(side) => Some(side),
            Status::Ongoing => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            Status::Ongoing => write!(f, "ongoing"),
            Status::Won(side) => write!(f, "{} wins", side.name()),
        }
    }
}

/// State of the selection machine
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Phase {
    AwaitingSelection,
    PieceSelected(Square),
    GameOver(Side),
}

/// Why a selection was refused
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// The square is not among the destinations of the selected piece
    IllegalDestination(Square),
}

/// What [`GameState::select()`] did
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SelectEvent {
    /// A piece of the side to move was selected
    Selected(Square),
    /// The selected piece was selected again and the selection was dropped
    Deselected(Square),
    /// A move was applied
    Moved(MoveRecord),
    /// The selection was refused, nothing changed
    Rejected(RejectReason),
    /// The selection had no effect, either because it was not a piece of the side to move
    /// or because the game is over
    Ignored,
}

/// Result of [`GameState::select()`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SelectResult {
    pub event: SelectEvent,
    /// Destinations of the currently selected piece, empty if nothing is selected
    pub highlight: SquareSet,
}

/// One entry of the game history
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Turn {
    Move(MoveRecord),
    Pass(Side),
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Turn::Move(rec) => rec.fmt(f),
            Turn::Pass(_) => write!(f, "pass"),
        }
    }
}

/// Error applying a move
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum MoveError {
    #[error("game is over")]
    GameOver,
    #[error("no piece at {0}")]
    NoPiece(Square),
    #[error("piece at {0} does not belong to the side to move")]
    NotOwnPiece(Square),
    #[error("illegal move {0}")]
    IllegalDestination(Move),
    #[error("cannot pass while in check")]
    PassInCheck,
}

impl From<MoveGenError> for MoveError {
    fn from(e: MoveGenError) -> MoveError {
        match e {
            MoveGenError::InvalidSelection(sq) => MoveError::NoPiece(sq),
        }
    }
}

/// Error applying a list of moves
///
/// The position indicates the zero-based index of the offending token.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum MoveListError {
    #[error("cannot parse move #{0}: {1}")]
    Parse(usize, MoveParseError),
    #[error("cannot apply move #{0}: {1}")]
    Apply(usize, MoveError),
}

/// Janggi game with its selection state
///
/// The game starts from the initial position with Blue to move. The host drives it by
/// selecting squares with [`GameState::select()`], or by applying moves directly with
/// [`GameState::apply_move()`].
///
/// # Example
///
/// ```
/// # use janggi::{GameState, SelectEvent, Side};
/// #
/// let mut game = GameState::new();
/// let res = game.select("a7".parse().unwrap());
/// assert_eq!(res.event, SelectEvent::Selected("a7".parse().unwrap()));
/// assert_eq!(format!("{:?}", res.highlight), "SquareSet(a6 b7)");
///
/// let res = game.select("a6".parse().unwrap());
/// assert!(matches!(res.event, SelectEvent::Moved(_)));
/// assert_eq!(game.side(), Side::Red);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    side: Side,
    selected: Option<(Square, SquareSet)>,
    status: Status,
    rules: Rules,
    history: Vec<Turn>,
}

impl GameState {
    /// Creates a game from the initial position with default rules
    #[inline]
    pub fn new() -> GameState {
        GameState::with_rules(Rules::default())
    }

    /// Creates a game from the initial position with the given rules
    pub fn with_rules(rules: Rules) -> GameState {
        GameState {
            board: Board::initial(),
            side: Side::Blue,
            selected: None,
            status: Status::Ongoing,
            rules,
            history: Vec::new(),
        }
    }

    /// Creates a game from an arbitrary position
    ///
    /// If a General is already missing, the game is over and the other side won.
    pub fn from_board(board: Board, side: Side, rules: Rules) -> GameState {
        let status = match (board.general_pos(side), board.general_pos(side.inv())) {
            (None, Some(_)) => Status::Won(side.inv()),
            (Some(_), None) => Status::Won(side),
            _ => Status::Ongoing,
        };
        GameState {
            board,
            side,
            selected: None,
            status,
            rules,
            history: Vec::new(),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// Returns all the turns played since the game started
    #[inline]
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    #[inline]
    pub fn selected(&self) -> Option<Square> {
        self.selected.map(|(sq, _)| sq)
    }

    /// Returns the destinations of the selected piece
    #[inline]
    pub fn highlight(&self) -> SquareSet {
        self.selected.map_or(SquareSet::EMPTY, |(_, hl)| hl)
    }

    pub fn phase(&self) -> Phase {
        match (self.status, self.selected) {
            (Status::Won(side), _) => Phase::GameOver(side),
            (Status::Ongoing, Some((sq, _))) => Phase::PieceSelected(sq),
            (Status::Ongoing, None) => Phase::AwaitingSelection,
        }
    }

    /// Returns `true` if the General of the side to move is under attack
    #[inline]
    pub fn is_check(&self) -> bool {
        movegen::is_in_check(&self.board, self.side)
    }

    /// Returns the destinations of the piece on `sq` under the rules in force
    pub fn destinations(&self, sq: Square) -> Result<SquareSet, MoveGenError> {
        movegen::destinations(&self.board, sq, &self.rules)
    }

    /// Handles a square selection from the host
    ///
    /// Selecting a piece of the side to move selects it and returns its destinations as the
    /// highlight. With a piece selected, selecting one of its destinations applies the move,
    /// selecting the piece again drops the selection, and selecting another own piece
    /// selects that one instead. Any other square is rejected and the selection is kept.
    /// Once the game is over, every selection is ignored.
    #[instrument(skip(self))]
    pub fn select(&mut self, sq: Square) -> SelectResult {
        if self.status.is_finished() {
            debug!("game is over, selection ignored");
            return SelectResult {
                event: SelectEvent::Ignored,
                highlight: SquareSet::EMPTY,
            };
        }

        if let Some((selected, highlight)) = self.selected {
            if sq == selected {
                debug!(%sq, "deselected");
                self.selected = None;
                return SelectResult {
                    event: SelectEvent::Deselected(sq),
                    highlight: SquareSet::EMPTY,
                };
            }
            if let (true, Some(piece)) = (highlight.has(sq), self.board.piece_at(selected)) {
                let rec = self.do_move(piece, Move::new(selected, sq));
                return SelectResult {
                    event: SelectEvent::Moved(rec),
                    highlight: SquareSet::EMPTY,
                };
            }
            if !self.board.get(sq).is_side(self.side) {
                warn!(%sq, from = %selected, "illegal destination");
                return SelectResult {
                    event: SelectEvent::Rejected(RejectReason::IllegalDestination(sq)),
                    highlight,
                };
            }
        }

        if !self.board.get(sq).is_side(self.side) {
            debug!(%sq, "not a piece of the side to move");
            return SelectResult {
                event: SelectEvent::Ignored,
                highlight: SquareSet::EMPTY,
            };
        }

        let highlight = self.destinations(sq).unwrap_or(SquareSet::EMPTY);
        debug!(%sq, count = highlight.len(), "selected");
        self.selected = Some((sq, highlight));
        SelectResult {
            event: SelectEvent::Selected(sq),
            highlight,
        }
    }

    /// Applies the move `mv` for the side to move
    ///
    /// The move is checked in the same way as with [`GameState::select()`]. The selection,
    /// if any, is dropped.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, mv: Move) -> Result<MoveRecord, MoveError> {
        if self.status.is_finished() {
            warn!("game is over");
            return Err(MoveError::GameOver);
        }
        let piece = match self.board.piece_at(mv.src) {
            Some(piece) if piece.side == self.side => piece,
            Some(_) => {
                warn!("not a piece of the side to move");
                return Err(MoveError::NotOwnPiece(mv.src));
            }
            None => {
                warn!("no piece to move");
                return Err(MoveError::NoPiece(mv.src));
            }
        };
        if !self.destinations(mv.src)?.has(mv.dst) {
            warn!("illegal destination");
            return Err(MoveError::IllegalDestination(mv));
        }
        Ok(self.do_move(piece, mv))
    }

    /// Passes the turn to the opponent without moving
    ///
    /// Under strict rules a side in check may not pass.
    #[instrument(skip(self))]
    pub fn pass(&mut self) -> Result<(), MoveError> {
        if self.status.is_finished() {
            warn!("game is over");
            return Err(MoveError::GameOver);
        }
        if self.rules.forbid_self_check && self.is_check() {
            warn!(side = %self.side, "cannot pass while in check");
            return Err(MoveError::PassInCheck);
        }
        debug!(side = %self.side, "pass");
        self.history.push(Turn::Pass(self.side));
        self.selected = None;
        self.side = self.side.inv();
        Ok(())
    }

    /// Applies space-separated moves, like `"e7e6 e4e5 pass"`
    ///
    /// Stops at the first move that cannot be parsed or applied; the moves before it stay
    /// applied.
    #[instrument(skip(self))]
    pub fn push_moves(&mut self, moves: &str) -> Result<(), MoveListError> {
        for (i, token) in moves.split_ascii_whitespace().enumerate() {
            if token == "pass" {
                self.pass().map_err(|e| MoveListError::Apply(i, e))?;
                continue;
            }
            let mv = Move::from_text(token).map_err(|e| MoveListError::Parse(i, e))?;
            self.apply_move(mv).map_err(|e| MoveListError::Apply(i, e))?;
        }
        Ok(())
    }

    /// Starts a new game with the same rules
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        info!("new game");
        *self = GameState::with_rules(self.rules);
    }

    fn do_move(&mut self, piece: Piece, mv: Move) -> MoveRecord {
        let mover = self.side;
        let captured = self.board.move_piece(mv.src, mv.dst).piece();
        let rec = MoveRecord {
            mv,
            piece,
            captured,
        };
        self.history.push(Turn::Move(rec));
        self.selected = None;
        debug!(%rec, side = %mover, "move applied");

        #[cfg(feature = "selftest")]
        if let Err(e) = self.board.validate() {
            panic!("board became invalid after {}: {}", mv, e);
        }

        let opponent = mover.inv();
        let general_captured = captured.map(|p| p.kind) == Some(PieceKind::General);
        let checkmate = self.rules.forbid_self_check
            && movegen::is_in_check(&self.board, opponent)
            && !movegen::has_safe_moves(&self.board, opponent);
        if general_captured || checkmate {
            info!(winner = %mover, general_captured, "game over");
            self.status = Status::Won(mover);
        } else {
            self.side = opponent;
        }
        rec
    }
}

impl Default for GameState {
    #[inline]
    fn default() -> GameState {
        GameState::new()
    }
}
