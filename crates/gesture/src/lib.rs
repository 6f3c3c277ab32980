//! Handplay Gesture - from hand landmarks to interaction signals
//!
//! Per frame, the external hand-pose model supplies either nothing or one
//! [`LandmarkSet`]. This crate turns that stream into:
//!
//! - a discrete [`Gesture`] via an ordered rule table ([`Classifier`])
//! - a low-jitter pointer via an EMA filter ([`PointerSmoother`])
//! - debounced, edge-triggered clicks ([`Stabilizer`])
//!
//! # Example
//!
//! ```
//! use handplay_gesture::{poses, Stabilizer};
//!
//! let mut stabilizer = Stabilizer::default();
//! let hand = poses::o_sign_at(0.5, 0.5);
//!
//! let clicks = (0..10)
//!     .filter(|_| stabilizer.update(Some(&hand)).clicked)
//!     .count();
//! assert_eq!(clicks, 1);
//! ```

pub mod classifier;
pub mod landmarks;
mod pointer;
pub mod poses;
mod stabilizer;

pub use classifier::{classify, Classification, Classifier, ClassifierThresholds, Gesture};
pub use landmarks::{
    Finger, Landmark, LandmarkSet, Point, INDEX_TIP, LANDMARK_COUNT, MIDDLE_TIP, THUMB_MCP,
    THUMB_TIP, WRIST,
};
pub use pointer::PointerSmoother;
pub use stabilizer::{FrameSignal, PointerState, Stabilizer, StabilizerConfig};
