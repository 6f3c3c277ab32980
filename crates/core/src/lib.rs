//! Handplay Core - shared abstractions for the gesture arcade
//!
//! This crate holds what every other handplay crate agrees on.
//!
//! # Types
//!
//! - [`Game`] / [`GameResult`] - Turn-based games searched by the AI opponents
//! - [`Timestamp`] - Frame clock used for cooperative timeouts
//! - [`Difficulty`] / [`GameKind`] - Session configuration
//! - [`HandplayError`] - Why an input was rejected

mod error;
mod game;
mod types;

pub use error::{HandplayError, Result};
pub use game::{Game, GameResult};
pub use types::{Difficulty, GameKind, Timestamp};
