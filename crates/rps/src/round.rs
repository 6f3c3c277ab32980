//! Timed round protocol.
//!
//! ```text
//! Countdown --(countdown)--> Capture --(hold lock-in | timeout)--> Result
//!     ^                                                              |
//!     +------------------(result, rounds left)-----------------------+
//!                                                                    |
//!                          Finished <--(result, last round)----------+
//! ```
//!
//! Transitions are driven by [`RpsMatch::tick`], called once per frame with
//! the frame's timestamp. Each phase remembers when it was entered; nothing
//! happens between ticks.

use crate::moves::Move;
use crate::session::{RoundRecord, RpsSession, Verdict, DEFAULT_MAX_ROUNDS};
use crate::thrower::Thrower;
use handplay_core::{HandplayError, Result, Timestamp};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Phase durations, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundTiming {
    /// "3, 2, 1" before capture opens.
    pub countdown_ms: u64,
    /// Longest capture window; the player throws rock if nothing locks in.
    pub capture_timeout_ms: u64,
    /// How long one gesture must be held to lock in.
    pub hold_ms: u64,
    /// How long the round result stays up.
    pub result_ms: u64,
}

impl Default for RoundTiming {
    fn default() -> Self {
        Self {
            countdown_ms: 3_000,
            capture_timeout_ms: 12_000,
            hold_ms: 4_000,
            result_ms: 3_000,
        }
    }
}

impl RoundTiming {
    pub fn countdown(&self) -> Duration {
        Duration::from_millis(self.countdown_ms)
    }

    pub fn capture_timeout(&self) -> Duration {
        Duration::from_millis(self.capture_timeout_ms)
    }

    pub fn hold(&self) -> Duration {
        Duration::from_millis(self.hold_ms)
    }

    pub fn result(&self) -> Duration {
        Duration::from_millis(self.result_ms)
    }

    /// A hold that can never complete inside the capture window is rejected.
    pub fn validate(&self) -> Result<()> {
        if self.hold_ms == 0 {
            return Err(HandplayError::InvalidConfig(
                "hold_ms must be positive".into(),
            ));
        }
        if self.hold_ms >= self.capture_timeout_ms {
            return Err(HandplayError::InvalidConfig(format!(
                "hold_ms ({}) must be shorter than capture_timeout_ms ({})",
                self.hold_ms, self.capture_timeout_ms
            )));
        }
        Ok(())
    }
}

/// Where a round currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundPhase {
    Countdown,
    Capture,
    Result,
    Finished,
}

impl RoundPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            RoundPhase::Countdown => "countdown",
            RoundPhase::Capture => "capture",
            RoundPhase::Result => "result",
            RoundPhase::Finished => "finished",
        }
    }
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that happened on a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundEvent {
    CaptureOpened,
    /// The round was scored. `timed_out` means the player defaulted to rock.
    Resolved { record: RoundRecord, timed_out: bool },
    NextRound,
    MatchOver(Verdict),
}

/// Tracks how long the same throw has been shown.
///
/// Any change of the visible throw, including to nothing, restarts the
/// timer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoldTracker {
    current: Option<Move>,
    since: Timestamp,
}

impl HoldTracker {
    pub fn new(now: Timestamp) -> Self {
        Self {
            current: None,
            since: now,
        }
    }

    /// Record this frame's throw and return how long it has been held.
    pub fn observe(&mut self, gesture: Option<Move>, now: Timestamp) -> Duration {
        if gesture != self.current {
            if let Some(m) = gesture {
                debug!("hold restarted on {m} at {now}");
            }
            self.current = gesture;
            self.since = now;
        }
        self.held(now)
    }

    pub fn current(&self) -> Option<Move> {
        self.current
    }

    /// Time the current throw has been held. Zero with nothing shown.
    pub fn held(&self, now: Timestamp) -> Duration {
        match self.current {
            Some(_) => now.since(self.since),
            None => Duration::ZERO,
        }
    }
}

/// A best-of-N match driven by frame ticks.
pub struct RpsMatch {
    session: RpsSession,
    timing: RoundTiming,
    phase: RoundPhase,
    phase_start: Timestamp,
    hold: HoldTracker,
    last_round: Option<RoundRecord>,
    thrower: Box<dyn Thrower>,
}

impl RpsMatch {
    /// Start a match; the first countdown begins at `now`.
    pub fn new(
        timing: RoundTiming,
        max_rounds: u32,
        thrower: Box<dyn Thrower>,
        now: Timestamp,
    ) -> Self {
        Self {
            session: RpsSession::new(max_rounds),
            timing,
            phase: RoundPhase::Countdown,
            phase_start: now,
            hold: HoldTracker::new(now),
            last_round: None,
            thrower,
        }
    }

    /// Default timing and round count.
    pub fn with_thrower(thrower: Box<dyn Thrower>, now: Timestamp) -> Self {
        Self::new(RoundTiming::default(), DEFAULT_MAX_ROUNDS, thrower, now)
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn phase_start(&self) -> Timestamp {
        self.phase_start
    }

    pub fn session(&self) -> &RpsSession {
        &self.session
    }

    pub fn timing(&self) -> &RoundTiming {
        &self.timing
    }

    pub fn last_round(&self) -> Option<&RoundRecord> {
        self.last_round.as_ref()
    }

    /// The throw currently being held during capture.
    pub fn held_gesture(&self) -> Option<Move> {
        match self.phase {
            RoundPhase::Capture => self.hold.current(),
            _ => None,
        }
    }

    /// Advance the protocol to `now`, given this frame's visible throw.
    ///
    /// At most one transition happens per tick.
    pub fn tick(&mut self, now: Timestamp, gesture: Option<Move>) -> Option<RoundEvent> {
        let elapsed = now.since(self.phase_start);
        match self.phase {
            RoundPhase::Countdown => {
                if elapsed < self.timing.countdown() {
                    return None;
                }
                self.enter(RoundPhase::Capture, now);
                self.hold = HoldTracker::new(now);
                self.hold.observe(gesture, now);
                Some(RoundEvent::CaptureOpened)
            }
            RoundPhase::Capture => {
                if self.hold.observe(gesture, now) >= self.timing.hold() {
                    if let Some(m) = self.hold.current() {
                        return self.resolve(m, false, now);
                    }
                }
                if elapsed >= self.timing.capture_timeout() {
                    debug!("capture timed out, defaulting to rock");
                    return self.resolve(Move::Rock, true, now);
                }
                None
            }
            RoundPhase::Result => {
                if elapsed < self.timing.result() {
                    return None;
                }
                match self.session.verdict() {
                    Some(verdict) => {
                        self.enter(RoundPhase::Finished, now);
                        Some(RoundEvent::MatchOver(verdict))
                    }
                    None => {
                        self.enter(RoundPhase::Countdown, now);
                        Some(RoundEvent::NextRound)
                    }
                }
            }
            RoundPhase::Finished => None,
        }
    }

    /// Lock in a throw directly, skipping the hold. Only valid during
    /// capture.
    pub fn lock_in(&mut self, player: Move, now: Timestamp) -> Result<RoundRecord> {
        if self.phase != RoundPhase::Capture {
            return Err(HandplayError::WrongPhase(self.phase.as_str()));
        }
        let computer = self.thrower.throw();
        let record = self.session.play(player, computer)?;
        self.last_round = Some(record);
        self.enter(RoundPhase::Result, now);
        Ok(record)
    }

    /// Start a new match with the same thrower and timing. Only once the
    /// current match is finished.
    pub fn restart(&mut self, now: Timestamp) -> Result<()> {
        if self.phase != RoundPhase::Finished {
            return Err(HandplayError::WrongPhase(self.phase.as_str()));
        }
        self.session = RpsSession::new(self.session.max_rounds());
        self.last_round = None;
        self.hold = HoldTracker::new(now);
        self.enter(RoundPhase::Countdown, now);
        Ok(())
    }

    /// Seconds left on the countdown display (3, 2, 1), during countdown.
    pub fn countdown_value(&self, now: Timestamp) -> Option<u32> {
        if self.phase != RoundPhase::Countdown {
            return None;
        }
        let remaining = self
            .timing
            .countdown()
            .saturating_sub(now.since(self.phase_start));
        let secs = (remaining.as_millis() as u64 + 999) / 1000;
        Some(secs.max(1) as u32)
    }

    /// Fraction of the lock-in hold completed, in `[0, 1]`.
    pub fn hold_progress(&self, now: Timestamp) -> f32 {
        if self.phase != RoundPhase::Capture || self.timing.hold_ms == 0 {
            return 0.0;
        }
        let held = self.hold.held(now).as_secs_f32();
        (held / self.timing.hold().as_secs_f32()).min(1.0)
    }

    /// Time left before the player defaults to rock, during capture.
    pub fn capture_remaining(&self, now: Timestamp) -> Option<Duration> {
        (self.phase == RoundPhase::Capture).then(|| {
            self.timing
                .capture_timeout()
                .saturating_sub(now.since(self.phase_start))
        })
    }

    fn resolve(&mut self, player: Move, timed_out: bool, now: Timestamp) -> Option<RoundEvent> {
        match self.lock_in(player, now) {
            Ok(record) => Some(RoundEvent::Resolved { record, timed_out }),
            Err(e) => {
                debug!("round not resolved: {e}");
                None
            }
        }
    }

    fn enter(&mut self, phase: RoundPhase, now: Timestamp) {
        debug!("{} -> {} at {now}", self.phase, phase);
        if phase == RoundPhase::Countdown {
            info!(
                "round {} of {}",
                self.session.rounds_played() + 1,
                self.session.max_rounds()
            );
        }
        self.phase = phase;
        self.phase_start = now;
    }
}
