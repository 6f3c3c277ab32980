//! One tic-tac-toe game against the computer, with the timing rules of the
//! interactive screen.
//!
//! The player (`O`) always moves first. After each accepted player move
//! the computer's reply is chosen at once but only lands on the board
//! after `ai_move_delay`; player input is ignored until it does. Gesture
//! placements are additionally rate-limited by `click_cooldown`.

use crate::config::TicTacToeTiming;
use handplay_core::{Difficulty, HandplayError, Result, Timestamp};
use handplay_tictactoe::{Board, BoardStatus, Mark, Square, Strategy};
use log::{debug, info};

pub const PLAYER: Mark = Mark::O;
pub const COMPUTER: Mark = Mark::X;

/// Where a placement came from. Only gestures are rate-limited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSource {
    Gesture,
    Mouse,
}

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    PlayerWins,
    ComputerWins,
    Tie,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingReply {
    square: Square,
    scheduled_at: Timestamp,
}

/// A tic-tac-toe game in progress.
pub struct TicTacToeSession {
    board: Board,
    difficulty: Difficulty,
    strategy: Box<dyn Strategy>,
    timing: TicTacToeTiming,
    pending: Option<PendingReply>,
    last_gesture_move: Option<Timestamp>,
    hover: Option<Square>,
    outcome: Option<GameOutcome>,
    winning_line: Option<[Square; 3]>,
    ended_at: Option<Timestamp>,
}

impl TicTacToeSession {
    pub fn new(strategy: Box<dyn Strategy>, timing: TicTacToeTiming) -> Self {
        Self {
            board: Board::new(),
            difficulty: strategy.difficulty(),
            strategy,
            timing,
            pending: None,
            last_gesture_move: None,
            hover: None,
            outcome: None,
            winning_line: None,
            ended_at: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Square under the pointer while an O-sign is held.
    pub fn hover(&self) -> Option<Square> {
        self.hover
    }

    pub fn set_hover(&mut self, hover: Option<Square>) {
        self.hover = hover;
    }

    /// True while the computer's reply is scheduled but not yet placed.
    pub fn is_thinking(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// The completed line, if the game was won.
    pub fn winning_line(&self) -> Option<[Square; 3]> {
        self.winning_line
    }

    pub fn ended_at(&self) -> Option<Timestamp> {
        self.ended_at
    }

    /// Place the player's mark. On success the computer's reply is
    /// scheduled unless the move ended the game.
    pub fn play(&mut self, square: Square, source: InputSource, now: Timestamp) -> Result<()> {
        if self.is_over() {
            return Err(HandplayError::GameOver);
        }
        if self.pending.is_some() {
            return Err(HandplayError::WrongPhase("computer turn"));
        }
        if source == InputSource::Gesture {
            if let Some(last) = self.last_gesture_move {
                if now.since(last) <= self.timing.click_cooldown() {
                    return Err(HandplayError::WrongPhase("click cooldown"));
                }
            }
        }

        self.board.try_mark(PLAYER, square)?;
        debug!("player {} at {square} via {source:?}", PLAYER);
        if source == InputSource::Gesture {
            self.last_gesture_move = Some(now);
        }

        if !self.check_end(now) {
            self.schedule_reply(now);
        }
        Ok(())
    }

    /// Place the computer's reply once its delay has elapsed.
    pub fn tick(&mut self, now: Timestamp) -> Option<Square> {
        let pending = self.pending?;
        if now.since(pending.scheduled_at) < self.timing.ai_move_delay() {
            return None;
        }
        self.pending = None;
        if let Err(e) = self.board.try_mark(COMPUTER, pending.square) {
            debug!("computer reply {} dropped: {e}", pending.square);
            return None;
        }
        debug!("computer {} at {}", COMPUTER, pending.square);
        self.check_end(now);
        Some(pending.square)
    }

    /// Start a fresh board with the same opponent. Only once the game is
    /// over.
    pub fn reset(&mut self) -> Result<()> {
        if !self.is_over() {
            return Err(HandplayError::WrongPhase("game in progress"));
        }
        self.board = Board::new();
        self.pending = None;
        self.last_gesture_move = None;
        self.hover = None;
        self.outcome = None;
        self.winning_line = None;
        self.ended_at = None;
        info!("tic-tac-toe reset ({})", self.difficulty);
        Ok(())
    }

    fn schedule_reply(&mut self, now: Timestamp) {
        match self.strategy.select(&self.board, COMPUTER) {
            Some(square) => {
                debug!("computer reply {square} scheduled at {now}");
                self.pending = Some(PendingReply {
                    square,
                    scheduled_at: now,
                });
            }
            None => debug!("computer has no reply"),
        }
    }

    /// Returns true if the game just ended.
    fn check_end(&mut self, now: Timestamp) -> bool {
        let outcome = match self.board.check_end() {
            BoardStatus::InProgress => return false,
            BoardStatus::Won(mark) if mark == PLAYER => GameOutcome::PlayerWins,
            BoardStatus::Won(_) => GameOutcome::ComputerWins,
            BoardStatus::Tie => GameOutcome::Tie,
        };
        self.outcome = Some(outcome);
        self.winning_line = self.board.winning_line();
        self.ended_at = Some(now);
        info!("tic-tac-toe over at {now}: {outcome:?}\n{}", self.board);
        true
    }
}
