//! Tic-tac-toe rules and computer opponents.
//!
//! ```
//! use handplay_tictactoe::{strategy_for, Board, Mark};
//! use handplay_core::Difficulty;
//! use rand::SeedableRng;
//!
//! let mut board = Board::new();
//! assert!(board.mark_square(Mark::O, 1, 1));
//!
//! let mut ai = strategy_for(Difficulty::Hard, rand::rngs::StdRng::seed_from_u64(0));
//! let reply = ai.select(&board, Mark::X).unwrap();
//! assert!(board.is_empty(reply));
//! ```

pub mod board;
pub mod game;
pub mod minimax;
pub mod strategy;

pub use board::{Board, BoardStatus, Mark, Square, LINES};
pub use game::{Position, TicTacToe};
pub use minimax::Minimax;
pub use strategy::{
    strategy_for, winning_square, MinimaxStrategy, RandomStrategy, Strategy, TacticalStrategy,
};
