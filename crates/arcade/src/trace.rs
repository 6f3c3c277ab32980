//! Recorded frame traces.
//!
//! A trace is a JSON array of frames, each with a timestamp, the hand the
//! pose model saw (or `null`), and an optional mouse click in pixels:
//!
//! ```json
//! [
//!   { "t_ms": 0, "landmarks": null, "click": null },
//!   { "t_ms": 16, "landmarks": [[0.5, 0.8, 0.0], ...], "click": null },
//!   { "t_ms": 32, "landmarks": null, "click": [210.0, 70.0] }
//! ]
//! ```

use crate::orchestrator::{FrameReport, Orchestrator};
use handplay_core::{HandplayError, Result, Timestamp};
use handplay_gesture::LandmarkSet;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceFrame {
    pub t_ms: u64,
    #[serde(default)]
    pub landmarks: Option<Vec<[f32; 3]>>,
    #[serde(default)]
    pub click: Option<[f32; 2]>,
}

impl TraceFrame {
    pub fn timestamp(&self) -> Timestamp {
        Timestamp::from_millis(self.t_ms)
    }

    /// The recorded hand, if any.
    pub fn hand(&self) -> Result<Option<LandmarkSet>> {
        self.landmarks
            .as_deref()
            .map(LandmarkSet::from_triples)
            .transpose()
    }

    pub fn with_hand(t_ms: u64, hand: &LandmarkSet) -> Self {
        let landmarks = hand.points().iter().map(|p| [p.x, p.y, p.z]).collect();
        Self {
            t_ms,
            landmarks: Some(landmarks),
            click: None,
        }
    }
}

/// An ordered list of frames.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameTrace {
    pub frames: Vec<TraceFrame>,
}

impl FrameTrace {
    pub fn new(frames: Vec<TraceFrame>) -> Self {
        Self { frames }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let trace: Self = serde_json::from_str(json).map_err(|e| HandplayError::Parse {
            kind: "frame trace",
            input: e.to_string(),
        })?;
        if trace.frames.windows(2).any(|w| w[1].t_ms < w[0].t_ms) {
            return Err(HandplayError::Parse {
                kind: "frame trace",
                input: "timestamps go backwards".into(),
            });
        }
        Ok(trace)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(write_error)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

fn write_error(e: serde_json::Error) -> HandplayError {
    HandplayError::Serialize {
        kind: "frame trace",
        reason: e.to_string(),
    }
}

/// Totals from replaying a trace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub frames: usize,
    pub hands_seen: usize,
    /// Frames whose landmark buffer could not be used; treated as no hand.
    pub bad_frames: usize,
    pub clicks: usize,
    pub player_moves: usize,
    pub computer_moves: usize,
    pub rounds_resolved: usize,
    pub rejected: usize,
}

impl ReplaySummary {
    fn record(&mut self, report: &FrameReport) {
        self.frames += 1;
        if report.signal.hand_present {
            self.hands_seen += 1;
        }
        if report.signal.clicked {
            self.clicks += 1;
        }
        if report.placed.is_some() {
            self.player_moves += 1;
        }
        if report.computer_moved.is_some() {
            self.computer_moves += 1;
        }
        if matches!(
            report.round_event,
            Some(handplay_rps::RoundEvent::Resolved { .. })
        ) {
            self.rounds_resolved += 1;
        }
        if report.rejected.is_some() {
            self.rejected += 1;
        }
    }
}

/// Feed every frame of `trace` through `orchestrator`.
///
/// A malformed hand is treated as no hand, the same as a camera dropout.
pub fn replay(orchestrator: &mut Orchestrator, trace: &FrameTrace) -> ReplaySummary {
    let mut summary = ReplaySummary::default();
    for frame in &trace.frames {
        let now = frame.timestamp();
        let hand = match frame.hand() {
            Ok(hand) => hand,
            Err(e) => {
                warn!("frame at {now}: {e}");
                summary.bad_frames += 1;
                None
            }
        };

        let report = orchestrator.update(hand.as_ref(), now);
        summary.record(&report);

        if let Some([x, y]) = frame.click {
            match orchestrator.mouse_click(x, y, now) {
                Ok(_) => summary.player_moves += 1,
                Err(e) => {
                    debug!("mouse click at ({x}, {y}) rejected: {e}");
                    summary.rejected += 1;
                }
            }
        }
    }
    summary
}
