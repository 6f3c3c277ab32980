//! Rock-paper-scissors against the computer.
//!
//! - [`moves`]: throws and who beats whom
//! - [`session`]: scores over a fixed number of rounds
//! - [`round`]: the countdown / capture / result protocol, ticked per frame
//! - [`thrower`]: where the computer's throw comes from

pub mod moves;
pub mod round;
pub mod session;
pub mod thrower;

pub use moves::{judge, Move, RoundOutcome};
pub use round::{HoldTracker, RoundEvent, RoundPhase, RoundTiming, RpsMatch};
pub use session::{RoundRecord, RpsSession, Verdict, DEFAULT_MAX_ROUNDS};
pub use thrower::{RandomThrower, ScriptedThrower, Thrower};
