//! Rules engine for janggi (Korean chess)
//!
//! The engine keeps the board, tells which squares a piece may move to, applies moves and
//! detects the end of the game. It knows nothing about rendering: the host passes square
//! selections in and gets destination sets, board snapshots and the game status back.
//!
//! # Example
//!
//! ```
//! use janggi::{Side, Status};
//!
//! let game = janggi::new_game();
//! let (game, highlight) = janggi::select(game, "c10".parse().unwrap());
//! assert_eq!(format!("{:?}", highlight), "SquareSet(d8)");
//!
//! let (game, highlight) = janggi::select(game, "d8".parse().unwrap());
//! assert!(highlight.is_empty());
//! assert_eq!(game.side(), Side::Red);
//! assert_eq!(janggi::status(&game), Status::Ongoing);
//! assert_eq!(janggi::snapshot(&game).len(), 90);
//! ```

pub mod board;
pub mod catalog;
pub mod game;
pub mod movegen;
pub mod moves;

pub use janggi_base::geometry;
pub use janggi_base::squareset;
pub use janggi_base::types;

pub use board::Board;
pub use game::{GameState, Phase, RejectReason, Rules, SelectEvent, SelectResult, Status, Turn};
pub use moves::{Move, MoveRecord};
pub use squareset::SquareSet;
pub use types::{Cell, File, Piece, PieceKind, Rank, Side, Square};

/// Starts a new game with default rules and Blue to move
#[inline]
pub fn new_game() -> GameState {
    GameState::new()
}

/// Selects `sq` in `state` and returns the updated state with the current highlight
///
/// This is a value-passing form of [`GameState::select()`].
pub fn select(mut state: GameState, sq: Square) -> (GameState, SquareSet) {
    let res = state.select(sq);
    (state, res.highlight)
}

/// Returns every square with its piece, in square index order
#[inline]
pub fn snapshot(state: &GameState) -> Vec<(Square, Option<Piece>)> {
    state.board().snapshot()
}

#[inline]
pub fn status(state: &GameState) -> Status {
    state.status()
}
