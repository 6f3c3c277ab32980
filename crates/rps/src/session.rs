//! Match scoring across a fixed number of rounds.

use crate::moves::{judge, Move, RoundOutcome};
use handplay_core::{HandplayError, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rounds in a match unless configured otherwise.
pub const DEFAULT_MAX_ROUNDS: u32 = 3;

/// One resolved round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub player: Move,
    pub computer: Move,
    pub outcome: RoundOutcome,
}

impl RoundRecord {
    pub fn new(player: Move, computer: Move) -> Self {
        Self {
            player,
            computer,
            outcome: judge(player, computer),
        }
    }

    /// Human-readable summary, e.g. "You chose rock. Computer chose
    /// scissors. You win!".
    pub fn describe(&self) -> String {
        let verdict = match self.outcome {
            RoundOutcome::PlayerWins => "You win!",
            RoundOutcome::ComputerWins => "Computer wins!",
            RoundOutcome::Tie => "It's a tie!",
        };
        format!(
            "You chose {}. Computer chose {}. {}",
            self.player, self.computer, verdict
        )
    }
}

/// Final result of a finished match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Victory,
    Defeat,
    Draw,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Victory => write!(f, "Victory!"),
            Verdict::Defeat => write!(f, "Defeat"),
            Verdict::Draw => write!(f, "Draw"),
        }
    }
}

/// Scores for one match.
///
/// Scores only ever increase and a tie increments neither. Once
/// `rounds_played` reaches `max_rounds` the session is finished and
/// rejects further rounds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpsSession {
    player_score: u32,
    computer_score: u32,
    rounds_played: u32,
    max_rounds: u32,
    last_result: Option<String>,
    computer_choice: Option<Move>,
    finished: bool,
}

impl Default for RpsSession {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROUNDS)
    }
}

impl RpsSession {
    /// `max_rounds` of zero is treated as one.
    pub fn new(max_rounds: u32) -> Self {
        Self {
            player_score: 0,
            computer_score: 0,
            rounds_played: 0,
            max_rounds: max_rounds.max(1),
            last_result: None,
            computer_choice: None,
            finished: false,
        }
    }

    pub fn player_score(&self) -> u32 {
        self.player_score
    }

    pub fn computer_score(&self) -> u32 {
        self.computer_score
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// Summary of the most recent round.
    pub fn last_result(&self) -> Option<&str> {
        self.last_result.as_deref()
    }

    /// The computer's throw in the most recent round.
    pub fn computer_choice(&self) -> Option<Move> {
        self.computer_choice
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Score one round.
    pub fn play(&mut self, player: Move, computer: Move) -> Result<RoundRecord> {
        if self.finished {
            return Err(HandplayError::SessionFinished {
                rounds: self.rounds_played,
            });
        }

        let record = RoundRecord::new(player, computer);
        match record.outcome {
            RoundOutcome::PlayerWins => self.player_score += 1,
            RoundOutcome::ComputerWins => self.computer_score += 1,
            RoundOutcome::Tie => {}
        }
        self.rounds_played += 1;
        self.computer_choice = Some(computer);
        self.last_result = Some(record.describe());

        info!(
            "round {}/{}: {} (score {}-{})",
            self.rounds_played,
            self.max_rounds,
            record.describe(),
            self.player_score,
            self.computer_score
        );

        if self.rounds_played >= self.max_rounds {
            self.finished = true;
            info!("match finished: {:?}", self.verdict());
        }
        Ok(record)
    }

    /// The overall result, once finished. Equal scores are a draw.
    pub fn verdict(&self) -> Option<Verdict> {
        if !self.finished {
            return None;
        }
        Some(match self.player_score.cmp(&self.computer_score) {
            std::cmp::Ordering::Greater => Verdict::Victory,
            std::cmp::Ordering::Less => Verdict::Defeat,
            std::cmp::Ordering::Equal => Verdict::Draw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session() {
        let session = RpsSession::default();
        assert_eq!(session.max_rounds(), 3);
        assert_eq!(session.rounds_played(), 0);
        assert!(!session.is_finished());
        assert_eq!(session.last_result(), None);
        assert_eq!(session.verdict(), None);
    }

    #[test]
    fn test_scoring() {
        let mut session = RpsSession::default();
        session.play(Move::Rock, Move::Scissors).unwrap();
        assert_eq!((session.player_score(), session.computer_score()), (1, 0));

        session.play(Move::Rock, Move::Rock).unwrap();
        assert_eq!((session.player_score(), session.computer_score()), (1, 0));

        session.play(Move::Rock, Move::Paper).unwrap();
        assert_eq!((session.player_score(), session.computer_score()), (1, 1));
        assert_eq!(session.computer_choice(), Some(Move::Paper));
    }

    #[test]
    fn test_finishes_after_max_rounds() {
        let mut session = RpsSession::new(2);
        session.play(Move::Paper, Move::Rock).unwrap();
        assert!(!session.is_finished());
        session.play(Move::Paper, Move::Rock).unwrap();
        assert!(session.is_finished());
        assert_eq!(session.verdict(), Some(Verdict::Victory));
    }

    #[test]
    fn test_finished_session_is_immutable() {
        let mut session = RpsSession::new(1);
        session.play(Move::Rock, Move::Paper).unwrap();
        let before = session.clone();

        let err = session.play(Move::Rock, Move::Scissors).unwrap_err();
        assert_eq!(err, HandplayError::SessionFinished { rounds: 1 });
        assert_eq!(session, before);
        assert_eq!(session.verdict(), Some(Verdict::Defeat));
    }

    #[test]
    fn test_draw_verdict() {
        let mut session = RpsSession::default();
        session.play(Move::Rock, Move::Scissors).unwrap();
        session.play(Move::Rock, Move::Paper).unwrap();
        session.play(Move::Rock, Move::Rock).unwrap();
        assert_eq!(session.verdict(), Some(Verdict::Draw));
    }

    #[test]
    fn test_result_text() {
        let mut session = RpsSession::default();
        session.play(Move::Rock, Move::Scissors).unwrap();
        assert_eq!(
            session.last_result(),
            Some("You chose rock. Computer chose scissors. You win!")
        );
        session.play(Move::Rock, Move::Paper).unwrap();
        assert!(session.last_result().unwrap().ends_with("Computer wins!"));
        session.play(Move::Paper, Move::Paper).unwrap();
        assert!(session.last_result().unwrap().ends_with("It's a tie!"));
    }

    #[test]
    fn test_zero_rounds_clamped() {
        assert_eq!(RpsSession::new(0).max_rounds(), 1);
    }
}
