//! Tests verifying the opponents' playing strength.
//!
//! - Hard never loses, whoever moves first
//! - Medium takes its own win before blocking, and blocks otherwise

use handplay_core::Difficulty;
use handplay_tictactoe::{
    strategy_for, winning_square, Board, BoardStatus, Mark, MinimaxStrategy, Square,
    Strategy as _,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn sq(row: usize, col: usize) -> Square {
    Square::new(row, col).unwrap()
}

/// Walk every possible opponent line against a deterministic Hard player
/// and return the number of finished games visited.
fn explore(board: &Board, to_move: Mark, hard: Mark, ai: &mut MinimaxStrategy) -> usize {
    match board.status() {
        BoardStatus::Won(winner) => {
            assert_eq!(winner, hard, "hard lost:\n{board}");
            return 1;
        }
        BoardStatus::Tie => return 1,
        BoardStatus::InProgress => {}
    }

    if to_move == hard {
        let choice = ai.select(board, hard).expect("hard must move");
        let mut next = board.clone();
        next.try_mark(hard, choice).unwrap();
        explore(&next, to_move.opposite(), hard, ai)
    } else {
        board
            .empty_squares()
            .into_iter()
            .map(|reply| {
                let mut next = board.clone();
                next.try_mark(to_move, reply).unwrap();
                explore(&next, to_move.opposite(), hard, ai)
            })
            .sum()
    }
}

#[test]
fn test_hard_never_loses_moving_second() {
    // Player (O) opens, as in a session.
    let mut ai = MinimaxStrategy::new();
    let games = explore(&Board::new(), Mark::O, Mark::X, &mut ai);
    assert!(games > 0);
}

#[test]
fn test_hard_never_loses_moving_first() {
    let mut ai = MinimaxStrategy::new();
    let games = explore(&Board::new(), Mark::X, Mark::X, &mut ai);
    assert!(games > 0);
}

#[test]
fn test_hard_never_loses_to_random_player() {
    for seed in 0..50 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut ai = strategy_for(Difficulty::Hard, ChaCha8Rng::seed_from_u64(seed));
        let mut board = Board::new();
        let mut to_move = Mark::O;

        while !board.is_game_over() && !board.is_full() {
            let square = if to_move == Mark::X {
                ai.select(&board, Mark::X).unwrap()
            } else {
                let empty = board.empty_squares();
                empty[rng.gen_range(0..empty.len())]
            };
            board.try_mark(to_move, square).unwrap();
            to_move = to_move.opposite();
        }

        assert_ne!(board.winner(), Some(Mark::O), "seed {seed}:\n{board}");
    }
}

#[test]
fn test_hard_blocks_every_threat_after_corner_opening() {
    // Player opens in the corner. Whatever the player tries next, each time
    // they have two in a line the reply lands on the open square.
    let mut ai = MinimaxStrategy::new();
    let mut opening = Board::new();
    assert!(opening.mark_square(Mark::O, 0, 0));

    fn walk(board: &Board, ai: &mut MinimaxStrategy) {
        if board.is_game_over() || board.is_full() {
            assert_ne!(board.winner(), Some(Mark::O), "player won:\n{board}");
            return;
        }
        let threat = winning_square(board, Mark::O);
        let own_win = winning_square(board, Mark::X);
        let reply = ai.select(board, Mark::X).unwrap();
        if let (Some(threat), None) = (threat, own_win) {
            assert_eq!(reply, threat, "threat left open:\n{board}");
        }

        let mut after = board.clone();
        after.try_mark(Mark::X, reply).unwrap();
        if after.is_game_over() || after.is_full() {
            return;
        }
        for square in after.empty_squares() {
            let mut next = after.clone();
            next.try_mark(Mark::O, square).unwrap();
            walk(&next, ai);
        }
    }

    walk(&opening, &mut ai);
}

#[test]
fn test_medium_completes_own_line_over_blocking() {
    let board = Board::from_rows(["XX ", "OO ", "   "]).unwrap();
    for seed in 0..20 {
        let mut ai = strategy_for(Difficulty::Medium, ChaCha8Rng::seed_from_u64(seed));
        assert_eq!(ai.select(&board, Mark::O), Some(sq(1, 2)));
    }
}

#[test]
fn test_medium_blocks_single_threat() {
    let board = Board::from_rows(["O O", " X ", "   "]).unwrap();
    for seed in 0..20 {
        let mut ai = strategy_for(Difficulty::Medium, ChaCha8Rng::seed_from_u64(seed));
        assert_eq!(ai.select(&board, Mark::X), Some(sq(0, 1)));
    }
}

#[test]
fn test_easy_fills_board_without_errors() {
    let mut ai = strategy_for(Difficulty::Easy, ChaCha8Rng::seed_from_u64(11));
    let mut board = Board::new();
    let mut to_move = Mark::O;
    while board.check_end() == BoardStatus::InProgress {
        let square = ai.select(&board, to_move).unwrap();
        board.try_mark(to_move, square).unwrap();
        to_move = to_move.opposite();
    }
    assert!(board.is_game_over());
    assert_eq!(ai.select(&board, to_move), None);
}
