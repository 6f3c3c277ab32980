//! Arcade configuration.
//!
//! Every field has a default, so an empty file (or no file) gives the
//! standard game. A TOML file only needs the values it changes:
//!
//! ```toml
//! max_rounds = 5
//!
//! [stabilizer]
//! cooldown_frames = 20
//!
//! [rounds]
//! hold_ms = 3000
//! ```

use crate::layout::ScreenBoard;
use handplay_core::{HandplayError, Result};
use handplay_gesture::StabilizerConfig;
use handplay_rps::{RoundTiming, DEFAULT_MAX_ROUNDS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Millisecond timings for a tic-tac-toe session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicTacToeTiming {
    /// Minimum gap between two accepted gesture placements.
    pub click_cooldown_ms: u64,
    /// How long the computer "thinks" before its reply lands.
    pub ai_move_delay_ms: u64,
}

impl Default for TicTacToeTiming {
    fn default() -> Self {
        Self {
            click_cooldown_ms: 800,
            ai_move_delay_ms: 500,
        }
    }
}

impl TicTacToeTiming {
    pub fn click_cooldown(&self) -> Duration {
        Duration::from_millis(self.click_cooldown_ms)
    }

    pub fn ai_move_delay(&self) -> Duration {
        Duration::from_millis(self.ai_move_delay_ms)
    }

    /// Timing with no delays, for scripted play and evaluation.
    pub fn immediate() -> Self {
        Self {
            click_cooldown_ms: 0,
            ai_move_delay_ms: 0,
        }
    }
}

/// All tunables for one arcade run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    /// Rounds in a rock-paper-scissors match.
    pub max_rounds: u32,
    pub stabilizer: StabilizerConfig,
    pub tictactoe: TicTacToeTiming,
    pub rounds: RoundTiming,
    /// Screen rectangle for mouse clicks.
    pub board: ScreenBoard,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            stabilizer: StabilizerConfig::default(),
            tictactoe: TicTacToeTiming::default(),
            rounds: RoundTiming::default(),
            board: ScreenBoard::default(),
        }
    }
}

impl ArcadeConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| HandplayError::Parse {
            kind: "arcade config",
            input: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| HandplayError::Serialize {
            kind: "arcade config",
            reason: e.to_string(),
        })
    }

    /// Reject settings the sessions cannot honour.
    pub fn validate(&self) -> Result<()> {
        let alpha = self.stabilizer.smoothing;
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(HandplayError::InvalidConfig(format!(
                "stabilizer.smoothing must be in (0, 1], got {alpha}"
            )));
        }
        if self.max_rounds == 0 {
            return Err(HandplayError::InvalidConfig(
                "max_rounds must be at least 1".into(),
            ));
        }
        if self.board.cell_size <= 0.0 {
            return Err(HandplayError::InvalidConfig(
                "board.cell_size must be positive".into(),
            ));
        }
        self.rounds.validate()
    }
}
