//! Temporal debouncing of per-frame classifications.
//!
//! Turns a noisy stream of labels into a stable gesture, a smoothed
//! pointer, and edge-triggered clicks. A click fires on a frame where
//! - the current label is the O-sign and the label it replaced was not,
//! - the O-sign has been held for more than `min_stable_frames` frames,
//! - no frame cooldown is active, and
//! - this O-sign hold has not already produced a click.
//!
//! Firing arms a cooldown of `cooldown_frames` frames.

use crate::classifier::{Classifier, ClassifierThresholds, Gesture};
use crate::landmarks::{Finger, LandmarkSet, Point};
use crate::pointer::PointerSmoother;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Debounce and smoothing parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilizerConfig {
    /// EMA weight of the newest pointer sample.
    pub smoothing: f32,
    /// A hold must exceed this many frames before it can click.
    pub min_stable_frames: u32,
    /// Frames during which new clicks are suppressed after one fires.
    pub cooldown_frames: u32,
    pub thresholds: ClassifierThresholds,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.3,
            min_stable_frames: 3,
            cooldown_frames: 15,
            thresholds: ClassifierThresholds::default(),
        }
    }
}

/// Snapshot of the stabilizer's per-session state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    /// Smoothed pointer; `None` while no hand is visible.
    pub position: Option<Point>,
    pub gesture: Option<Gesture>,
    /// Frame-to-frame repeats of `gesture`: 0 on the frame the label
    /// changes, then +1 for every identical frame after it. A run of `n`
    /// identical frames therefore reads `n - 1`, so with
    /// `min_stable_frames = 3` the earliest click is the fifth frame.
    pub stable_frames: u32,
    /// Frames left before another click may fire.
    pub cooldown: u32,
}

/// What one frame produced, for the orchestrator and the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameSignal {
    pub hand_present: bool,
    pub gesture: Option<Gesture>,
    pub pointer: Option<Point>,
    /// True on exactly the frame a click edge fired.
    pub clicked: bool,
}

/// Per-session gesture stabilizer. One instance per active session.
#[derive(Clone, Debug)]
pub struct Stabilizer {
    config: StabilizerConfig,
    classifier: Classifier,
    smoother: PointerSmoother,
    current: Option<Gesture>,
    /// Label in effect before the current run began.
    previous: Option<Gesture>,
    /// Repeats of `current`; see [`PointerState::stable_frames`].
    stable_frames: u32,
    cooldown: u32,
    run_clicked: bool,
}

impl Stabilizer {
    pub fn new(config: StabilizerConfig) -> Self {
        Self {
            classifier: Classifier::new(config.thresholds),
            smoother: PointerSmoother::new(config.smoothing),
            config,
            current: None,
            previous: None,
            stable_frames: 0,
            cooldown: 0,
            run_clicked: false,
        }
    }

    pub fn config(&self) -> &StabilizerConfig {
        &self.config
    }

    /// Process one frame. `None` means the pose model saw no hand.
    pub fn update(&mut self, hand: Option<&LandmarkSet>) -> FrameSignal {
        let classification = hand.and_then(|h| self.classifier.classify(h));
        let gesture = classification.map(|c| c.gesture);

        match hand {
            Some(_) if gesture == self.current => {
                self.stable_frames = self.stable_frames.saturating_add(1);
            }
            _ => self.begin_run(gesture),
        }

        self.cooldown = self.cooldown.saturating_sub(1);
        let clicked = self.try_click();

        let pointer = match hand {
            Some(h) => {
                let raw = classification
                    .and_then(|c| c.pointer)
                    .unwrap_or_else(|| {
                        let tip = h.tip(Finger::Index);
                        Point::new(tip.x, tip.y)
                    });
                Some(self.smoother.filter(raw))
            }
            None => {
                self.smoother.reset();
                None
            }
        };

        FrameSignal {
            hand_present: hand.is_some(),
            gesture,
            pointer,
            clicked,
        }
    }

    fn begin_run(&mut self, gesture: Option<Gesture>) {
        if gesture != self.current {
            trace!("gesture {:?} -> {:?}", self.current, gesture);
        }
        self.previous = self.current;
        self.current = gesture;
        self.stable_frames = 0;
        self.run_clicked = false;
    }

    fn try_click(&mut self) -> bool {
        let edge = self.current == Some(Gesture::OSign)
            && self.previous != Some(Gesture::OSign)
            && !self.run_clicked;
        if !edge || self.stable_frames <= self.config.min_stable_frames {
            return false;
        }
        if self.cooldown > 0 {
            return false;
        }

        self.cooldown = self.config.cooldown_frames;
        self.run_clicked = true;
        debug!(
            "click fired after {} stable frames, cooldown {} frames",
            self.stable_frames, self.cooldown
        );
        true
    }

    pub fn state(&self) -> PointerState {
        PointerState {
            position: self.smoother.current(),
            gesture: self.current,
            stable_frames: self.stable_frames,
            cooldown: self.cooldown,
        }
    }

    /// Drop all history, as at session start.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }
}

impl Default for Stabilizer {
    fn default() -> Self {
        Self::new(StabilizerConfig::default())
    }
}
