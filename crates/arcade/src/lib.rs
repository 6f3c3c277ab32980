//! Handplay Arcade - gesture-driven tic-tac-toe and rock-paper-scissors
//!
//! Wires the gesture pipeline to the two games:
//!
//! - [`Orchestrator`] - one stabilizer plus the live session, ticked per frame
//! - [`TicTacToeSession`] - board, opponent and the screen's timing rules
//! - [`ArcadeConfig`] - every tunable, loadable from TOML
//! - [`FrameTrace`] - recorded frames for offline replay
//!
//! # Example
//!
//! ```
//! use handplay_arcade::{ArcadeConfig, Orchestrator};
//! use handplay_core::{Difficulty, GameKind, Timestamp};
//! use handplay_gesture::poses;
//!
//! let mut arcade = Orchestrator::new(
//!     ArcadeConfig::default(),
//!     GameKind::TicTacToe,
//!     Difficulty::Hard,
//!     42,
//!     Timestamp::ZERO,
//! )
//! .unwrap();
//!
//! // Hold an O-sign over the centre square.
//! let hand = poses::o_sign_at(0.5, 0.5);
//! let placed = (0..10u64)
//!     .filter_map(|i| arcade.update(Some(&hand), Timestamp::from_millis(i * 16)).placed)
//!     .next();
//! assert!(placed.is_some());
//! ```

pub mod config;
pub mod evaluate;
pub mod layout;
pub mod orchestrator;
pub mod session;
pub mod trace;

pub use config::{ArcadeConfig, TicTacToeTiming};
pub use evaluate::{run_evaluation, EvaluationResult};
pub use layout::{cell_at, ScreenBoard};
pub use orchestrator::{gesture_move, ActiveSession, FrameReport, Orchestrator};
pub use session::{GameOutcome, InputSource, TicTacToeSession, COMPUTER, PLAYER};
pub use trace::{replay, FrameTrace, ReplaySummary, TraceFrame};
