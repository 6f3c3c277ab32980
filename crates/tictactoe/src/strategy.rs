//! Computer opponents, one per difficulty.
//!
//! The `Strategy` trait lets the session swap opponents without knowing
//! how a move is chosen:
//! - Easy: [`RandomStrategy`], uniform over empty squares
//! - Medium: [`TacticalStrategy`], win, else block, else random
//! - Hard: [`MinimaxStrategy`], exhaustive search

use crate::board::{Board, Mark, Square, LINES};
use crate::game::Position;
use crate::minimax::Minimax;
use handplay_core::Difficulty;
use log::debug;
use rand::Rng;

/// Chooses the computer's move.
pub trait Strategy: Send {
    /// Pick a move for `me` on `board`, or `None` if no square is free
    /// or the game is already decided.
    fn select(&mut self, board: &Board, me: Mark) -> Option<Square>;

    fn difficulty(&self) -> Difficulty;
}

/// The first empty square, in scan order, that would complete a line for
/// `mark`.
pub fn winning_square(board: &Board, mark: Mark) -> Option<Square> {
    board
        .empty_squares()
        .into_iter()
        .find(|&sq| completes_line(board, mark, sq))
}

fn completes_line(board: &Board, mark: Mark, square: Square) -> bool {
    LINES
        .iter()
        .filter(|line| line.contains(&square.index()))
        .any(|line| {
            line.iter()
                .filter(|&&i| i != square.index())
                .all(|&i| board.get(Square::ALL[i]) == Some(mark))
        })
}

fn random_square<R: Rng>(board: &Board, rng: &mut R) -> Option<Square> {
    let empty = board.empty_squares();
    if empty.is_empty() {
        return None;
    }
    Some(empty[rng.gen_range(0..empty.len())])
}

/// Easy: any empty square, uniformly.
pub struct RandomStrategy<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomStrategy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> Strategy for RandomStrategy<R> {
    fn select(&mut self, board: &Board, _me: Mark) -> Option<Square> {
        if board.is_game_over() {
            return None;
        }
        random_square(board, &mut self.rng)
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Easy
    }
}

/// Medium: complete an own line, else block the opponent's, else random.
pub struct TacticalStrategy<R: Rng> {
    rng: R,
}

impl<R: Rng> TacticalStrategy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> Strategy for TacticalStrategy<R> {
    fn select(&mut self, board: &Board, me: Mark) -> Option<Square> {
        if board.is_game_over() {
            return None;
        }
        if let Some(sq) = winning_square(board, me) {
            debug!("{me} completes a line at {sq}");
            return Some(sq);
        }
        if let Some(sq) = winning_square(board, me.opposite()) {
            debug!("{me} blocks {} at {sq}", me.opposite());
            return Some(sq);
        }
        random_square(board, &mut self.rng)
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Medium
    }
}

/// Hard: exhaustive minimax. Never loses.
#[derive(Clone, Copy, Debug, Default)]
pub struct MinimaxStrategy {
    search: Minimax,
}

impl MinimaxStrategy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Strategy for MinimaxStrategy {
    fn select(&mut self, board: &Board, me: Mark) -> Option<Square> {
        if board.is_game_over() {
            return None;
        }
        let choice = self.search.best_move(&Position::new(board.clone(), me));
        debug!("minimax picks {choice:?} for {me}");
        choice
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Hard
    }
}

/// Build the opponent for a difficulty.
pub fn strategy_for<R>(difficulty: Difficulty, rng: R) -> Box<dyn Strategy>
where
    R: Rng + Send + 'static,
{
    match difficulty {
        Difficulty::Easy => Box::new(RandomStrategy::new(rng)),
        Difficulty::Medium => Box::new(TacticalStrategy::new(rng)),
        Difficulty::Hard => Box::new(MinimaxStrategy::new()),
    }
}
