//! [`Game`] implementation for tic-tac-toe, used by search.

use crate::board::{Board, BoardStatus, Mark, Square};
use handplay_core::{Game, GameResult};

/// A board plus the mark to move next.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Position {
    board: Board,
    to_move: Mark,
}

impl Position {
    pub fn new(board: Board, to_move: Mark) -> Self {
        Self { board, to_move }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get the mark to move.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }
}

/// Tic-tac-toe rules. The player's mark, `O`, opens.
#[derive(Clone, Copy, Debug, Default)]
pub struct TicTacToe;

impl Game for TicTacToe {
    type State = Position;
    type Action = Square;
    type Player = Mark;

    fn initial_state(&self) -> Self::State {
        Position::new(Board::new(), Mark::O)
    }

    fn to_move(&self, state: &Self::State) -> Self::Player {
        state.to_move
    }

    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action> {
        if self.is_terminal(state) {
            return Vec::new();
        }
        state.board.empty_squares()
    }

    fn apply(&self, state: &Self::State, action: Self::Action) -> Self::State {
        let mut board = state.board.clone();
        // Actions must come from `legal_actions`.
        let placed = board.try_mark(state.to_move, action);
        debug_assert!(placed.is_ok(), "illegal action {action}: {placed:?}");
        Position::new(board, state.to_move.opposite())
    }

    fn result(&self, state: &Self::State) -> Option<GameResult<Self::Player>> {
        match state.board.status() {
            BoardStatus::InProgress => None,
            BoardStatus::Won(mark) => Some(GameResult::Won(mark)),
            BoardStatus::Tie => Some(GameResult::Draw),
        }
    }
}
