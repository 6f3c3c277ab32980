use std::hash::Hash;

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameResult<P> {
    Won(P),
    Draw,
}

/// A two-player, perfect-information, turn-based game.
///
/// Search is written against this trait and never mutates a state in
/// place: `apply` always returns a fresh hypothetical state.
pub trait Game: Clone + Send + Sync {
    /// The game state (e.g., a board plus side to move)
    type State: Clone + Send;

    /// A game action (e.g., a square)
    type Action: Clone + Copy + Send + Eq + Hash;

    /// One side (e.g., a mark)
    type Player: Copy + Eq + Send;

    /// Returns the initial game state
    fn initial_state(&self) -> Self::State;

    /// Returns the side to move
    fn to_move(&self, state: &Self::State) -> Self::Player;

    /// Returns all legal actions from the given state, in scan order.
    /// Empty once the game is over.
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Applies an action, returning a new state (immutable operation)
    fn apply(&self, state: &Self::State, action: Self::Action) -> Self::State;

    /// Returns the result, or `None` while the game is still running
    fn result(&self, state: &Self::State) -> Option<GameResult<Self::Player>>;

    /// Returns true if the game has ended (win or draw)
    fn is_terminal(&self, state: &Self::State) -> bool {
        self.result(state).is_some()
    }

    /// Returns the outcome from `player`'s side:
    /// - `Some(1)` if `player` won
    /// - `Some(-1)` if `player` lost
    /// - `Some(0)` for a draw
    /// - `None` if the game is not terminal
    fn score_for(&self, state: &Self::State, player: Self::Player) -> Option<i32> {
        self.result(state).map(|result| match result {
            GameResult::Won(winner) if winner == player => 1,
            GameResult::Won(_) => -1,
            GameResult::Draw => 0,
        })
    }
}
