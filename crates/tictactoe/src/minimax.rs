//! Exhaustive minimax with alpha-beta pruning.
//!
//! Tic-tac-toe is small enough (branching <= 9, depth <= 9) to search to
//! the end, so the result is optimal. Terminal values are scored from the
//! searching side: +1 win, -1 loss, 0 draw. Every root move is searched
//! with a full window, so root scores are exact and the first maximal
//! move in scan order is chosen.

use crate::game::TicTacToe;
use handplay_core::Game;

const WIN: i32 = 1;
const LOSS: i32 = -1;

/// Minimax searcher over any [`Game`] small enough to solve outright.
#[derive(Clone, Copy, Debug, Default)]
pub struct Minimax<G: Game = TicTacToe> {
    game: G,
}

impl<G: Game> Minimax<G> {
    pub fn new(game: G) -> Self {
        Self { game }
    }

    /// Exact value of every legal move for the side to move, in scan order.
    pub fn scored_moves(&self, state: &G::State) -> Vec<(G::Action, i32)> {
        let me = self.game.to_move(state);
        self.game
            .legal_actions(state)
            .into_iter()
            .map(|action| {
                let next = self.game.apply(state, action);
                (action, self.alphabeta(&next, me, LOSS, WIN, false))
            })
            .collect()
    }

    /// Get the best move for the side to move, or `None` on a finished board.
    pub fn best_move(&self, state: &G::State) -> Option<G::Action> {
        let mut best: Option<(G::Action, i32)> = None;
        for (action, score) in self.scored_moves(state) {
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((action, score));
            }
        }
        best.map(|(action, _)| action)
    }

    /// Game-theoretic value of `state` for `me`.
    pub fn value(&self, state: &G::State, me: G::Player) -> i32 {
        let maximizing = self.game.to_move(state) == me;
        self.alphabeta(state, me, LOSS, WIN, maximizing)
    }

    fn alphabeta(
        &self,
        state: &G::State,
        me: G::Player,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        if let Some(score) = self.game.score_for(state, me) {
            return score;
        }

        if maximizing {
            let mut max_eval = LOSS;
            for action in self.game.legal_actions(state) {
                let next = self.game.apply(state, action);
                let eval = self.alphabeta(&next, me, alpha, beta, false);
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break; // Beta cutoff
                }
            }
            max_eval
        } else {
            let mut min_eval = WIN;
            for action in self.game.legal_actions(state) {
                let next = self.game.apply(state, action);
                let eval = self.alphabeta(&next, me, alpha, beta, true);
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break; // Alpha cutoff
                }
            }
            min_eval
        }
    }
}
