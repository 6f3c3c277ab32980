//! Small value types shared by every crate.
//!
//! - [`Timestamp`]: frame time in milliseconds, monotonic per session
//! - [`Difficulty`]: Tic-Tac-Toe opponent strength
//! - [`GameKind`]: which game a session plays

use crate::{HandplayError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// A frame timestamp in milliseconds.
///
/// Timeouts are cooperative: durations are measured by comparing a stored
/// timestamp against the current frame's timestamp, never by timers.
/// The epoch is arbitrary (usually session start); only differences matter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The session epoch.
    pub const ZERO: Self = Self(0);

    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub fn from_secs_f64(secs: f64) -> Self {
        Self((secs.max(0.0) * 1000.0).round() as u64)
    }

    pub fn millis(self) -> u64 {
        self.0
    }

    /// Time elapsed since `earlier`, saturating at zero if the clock
    /// appears to run backwards.
    pub fn since(self, earlier: Timestamp) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }

    /// This timestamp shifted forward by `duration`.
    pub fn after(self, duration: Duration) -> Self {
        Self(self.0.saturating_add(duration.as_millis() as u64))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Opponent strength for Tic-Tac-Toe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Uniform random among empty squares.
    Easy,
    /// Win if possible, else block, else random.
    #[default]
    Medium,
    /// Exhaustive minimax; never loses.
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = HandplayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(HandplayError::Parse {
                kind: "difficulty",
                input: s.to_string(),
            }),
        }
    }
}

/// The game a session plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    TicTacToe,
    RockPaperScissors,
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameKind::TicTacToe => f.write_str("tictactoe"),
            GameKind::RockPaperScissors => f.write_str("rps"),
        }
    }
}

impl FromStr for GameKind {
    type Err = HandplayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tictactoe" | "ttt" | "tic-tac-toe" => Ok(GameKind::TicTacToe),
            "rps" | "rockpaperscissors" | "rock-paper-scissors" => Ok(GameKind::RockPaperScissors),
            _ => Err(HandplayError::Parse {
                kind: "game",
                input: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_since_saturates() {
        let early = Timestamp::from_millis(100);
        let late = Timestamp::from_millis(350);
        assert_eq!(late.since(early), Duration::from_millis(250));
        assert_eq!(early.since(late), Duration::ZERO);
    }

    #[test]
    fn test_timestamp_after() {
        let t = Timestamp::from_millis(1_000).after(Duration::from_secs(3));
        assert_eq!(t.millis(), 4_000);
    }

    #[test]
    fn test_timestamp_from_secs() {
        assert_eq!(Timestamp::from_secs_f64(1.5).millis(), 1_500);
        assert_eq!(Timestamp::from_secs_f64(-2.0), Timestamp::ZERO);
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(" HARD ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_difficulty_display_roundtrip() {
        for d in Difficulty::ALL {
            assert_eq!(d.to_string().parse::<Difficulty>().unwrap(), d);
        }
    }

    #[test]
    fn test_game_kind_parse() {
        assert_eq!("ttt".parse::<GameKind>().unwrap(), GameKind::TicTacToe);
        assert_eq!("rps".parse::<GameKind>().unwrap(), GameKind::RockPaperScissors);
        assert!("chess".parse::<GameKind>().is_err());
    }
}
