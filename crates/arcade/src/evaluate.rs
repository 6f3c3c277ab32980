//! Strength check: an opponent strategy against a uniformly random player.

use handplay_core::Difficulty;
use handplay_tictactoe::{strategy_for, Board, BoardStatus, Mark, RandomStrategy, Strategy};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// Evaluation results, from the strategy's side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvaluationResult {
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub total_games: usize,
}

impl EvaluationResult {
    pub fn win_rate(&self) -> f32 {
        if self.total_games == 0 {
            return 0.0;
        }
        self.wins as f32 / self.total_games as f32
    }

    fn add(mut self, status: BoardStatus, me: Mark) -> Self {
        match status {
            BoardStatus::Won(mark) if mark == me => self.wins += 1,
            BoardStatus::Won(_) => self.losses += 1,
            BoardStatus::Tie | BoardStatus::InProgress => self.draws += 1,
        }
        self.total_games += 1;
        self
    }

    fn merge(self, other: Self) -> Self {
        Self {
            wins: self.wins + other.wins,
            losses: self.losses + other.losses,
            draws: self.draws + other.draws,
            total_games: self.total_games + other.total_games,
        }
    }
}

/// Play one game of the strategy (as `X`) against a random player and
/// return the final board status.
pub fn play_one(difficulty: Difficulty, seed: u64, strategy_moves_first: bool) -> BoardStatus {
    let me = Mark::X;
    let mut strategy = strategy_for(difficulty, ChaCha8Rng::seed_from_u64(seed));
    let mut random = RandomStrategy::new(ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)));
    let mut board = Board::new();
    let mut to_move = if strategy_moves_first { me } else { me.opposite() };

    while board.check_end() == BoardStatus::InProgress {
        let choice = if to_move == me {
            strategy.select(&board, to_move)
        } else {
            random.select(&board, to_move)
        };
        let Some(square) = choice else { break };
        if board.try_mark(to_move, square).is_err() {
            break;
        }
        to_move = to_move.opposite();
    }
    board.status()
}

/// Play `games` games in parallel, alternating who moves first.
pub fn run_evaluation(difficulty: Difficulty, games: usize, seed: u64) -> EvaluationResult {
    (0..games)
        .into_par_iter()
        .map(|i| {
            let game_seed = seed.wrapping_add(i as u64 * 1000);
            let status = play_one(difficulty, game_seed, i % 2 == 1);
            EvaluationResult::default().add(status, Mark::X)
        })
        .reduce(EvaluationResult::default, EvaluationResult::merge)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_never_loses() {
        let result = run_evaluation(Difficulty::Hard, 40, 42);
        assert_eq!(result.total_games, 40);
        assert_eq!(result.losses, 0);
        assert_eq!(result.wins + result.draws, 40);
    }

    #[test]
    fn test_counts_add_up() {
        for difficulty in Difficulty::ALL {
            let result = run_evaluation(difficulty, 20, 7);
            assert_eq!(result.wins + result.losses + result.draws, 20);
        }
    }

    #[test]
    fn test_reproducible() {
        assert_eq!(
            run_evaluation(Difficulty::Medium, 16, 3),
            run_evaluation(Difficulty::Medium, 16, 3)
        );
    }

    #[test]
    fn test_win_rate() {
        let result = EvaluationResult {
            wins: 3,
            losses: 1,
            draws: 0,
            total_games: 4,
        };
        assert!((result.win_rate() - 0.75).abs() < 1e-6);
        assert_eq!(EvaluationResult::default().win_rate(), 0.0);
    }
}
