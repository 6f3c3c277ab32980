//! Per-frame routing from the gesture pipeline into the active game.
//!
//! Data flows one way each frame:
//! landmarks -> [`Stabilizer`] -> [`Orchestrator::update`] -> session.
//! Mouse clicks enter through [`Orchestrator::mouse_click`] and reach the
//! same session operations as gesture clicks.

use crate::config::ArcadeConfig;
use crate::layout::cell_at;
use crate::session::{InputSource, TicTacToeSession};
use handplay_core::{Difficulty, GameKind, HandplayError, Result, Timestamp};
use handplay_gesture::{FrameSignal, Gesture, LandmarkSet, PointerState, Stabilizer};
use handplay_rps::{Move, RandomThrower, RoundEvent, RpsMatch, Thrower};
use handplay_tictactoe::{strategy_for, Square, Strategy};
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The game currently being played.
pub enum ActiveSession {
    TicTacToe(TicTacToeSession),
    Rps(RpsMatch),
}

impl ActiveSession {
    pub fn kind(&self) -> GameKind {
        match self {
            ActiveSession::TicTacToe(_) => GameKind::TicTacToe,
            ActiveSession::Rps(_) => GameKind::RockPaperScissors,
        }
    }
}

/// Everything one frame produced, for the renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub signal: FrameSignal,
    /// Square under the O-sign pointer (tic-tac-toe).
    pub hover: Option<Square>,
    /// Player mark placed this frame.
    pub placed: Option<Square>,
    /// Computer mark placed this frame.
    pub computer_moved: Option<Square>,
    /// Round protocol transition this frame (rock-paper-scissors).
    pub round_event: Option<RoundEvent>,
    /// Why a click this frame had no effect.
    pub rejected: Option<HandplayError>,
}

/// Map a stable gesture to a throw. The O-sign is not a throw.
pub fn gesture_move(gesture: Gesture) -> Option<Move> {
    match gesture {
        Gesture::Rock => Some(Move::Rock),
        Gesture::Paper => Some(Move::Paper),
        Gesture::Scissors => Some(Move::Scissors),
        Gesture::OSign => None,
    }
}

/// Owns the stabilizer and the one live session.
pub struct Orchestrator {
    config: ArcadeConfig,
    stabilizer: Stabilizer,
    session: ActiveSession,
}

impl Orchestrator {
    /// Start a session of `kind`. Randomness for the computer is seeded
    /// from `seed`; `difficulty` only matters for tic-tac-toe.
    pub fn new(
        config: ArcadeConfig,
        kind: GameKind,
        difficulty: Difficulty,
        seed: u64,
        now: Timestamp,
    ) -> Result<Self> {
        let rng = ChaCha8Rng::seed_from_u64(seed);
        match kind {
            GameKind::TicTacToe => {
                Self::tic_tac_toe(config, strategy_for(difficulty, rng))
            }
            GameKind::RockPaperScissors => {
                Self::rock_paper_scissors(config, Box::new(RandomThrower::new(rng)), now)
            }
        }
    }

    pub fn tic_tac_toe(config: ArcadeConfig, strategy: Box<dyn Strategy>) -> Result<Self> {
        config.validate()?;
        info!("starting tic-tac-toe ({})", strategy.difficulty());
        let session = TicTacToeSession::new(strategy, config.tictactoe);
        Ok(Self::with_session(config, ActiveSession::TicTacToe(session)))
    }

    pub fn rock_paper_scissors(
        config: ArcadeConfig,
        thrower: Box<dyn Thrower>,
        now: Timestamp,
    ) -> Result<Self> {
        config.validate()?;
        info!("starting rock-paper-scissors, {} rounds", config.max_rounds);
        let game = RpsMatch::new(config.rounds, config.max_rounds, thrower, now);
        Ok(Self::with_session(config, ActiveSession::Rps(game)))
    }

    fn with_session(config: ArcadeConfig, session: ActiveSession) -> Self {
        Self {
            stabilizer: Stabilizer::new(config.stabilizer),
            config,
            session,
        }
    }

    pub fn config(&self) -> &ArcadeConfig {
        &self.config
    }

    pub fn session(&self) -> &ActiveSession {
        &self.session
    }

    pub fn pointer_state(&self) -> PointerState {
        self.stabilizer.state()
    }

    /// Process one camera frame. `None` means no hand was seen.
    pub fn update(&mut self, hand: Option<&LandmarkSet>, now: Timestamp) -> FrameReport {
        let signal = self.stabilizer.update(hand);
        let mut report = FrameReport {
            signal,
            ..FrameReport::default()
        };

        match &mut self.session {
            ActiveSession::TicTacToe(game) => {
                report.computer_moved = game.tick(now);

                let hover = match signal.gesture {
                    Some(Gesture::OSign) => signal.pointer.and_then(cell_at),
                    _ => None,
                };
                game.set_hover(hover);
                report.hover = hover;

                if signal.clicked {
                    match hover {
                        Some(square) => match game.play(square, InputSource::Gesture, now) {
                            Ok(()) => report.placed = Some(square),
                            Err(e) => {
                                debug!("gesture click on {square} rejected: {e}");
                                report.rejected = Some(e);
                            }
                        },
                        None => debug!("gesture click outside the board"),
                    }
                }
            }
            ActiveSession::Rps(game) => {
                let throw = signal.gesture.and_then(gesture_move);
                report.round_event = game.tick(now, throw);
            }
        }
        report
    }

    /// Mouse fallback: a click at screen pixel `(x, y)`.
    pub fn mouse_click(&mut self, x: f32, y: f32, now: Timestamp) -> Result<Square> {
        match &mut self.session {
            ActiveSession::TicTacToe(game) => {
                let square = self.config.board.locate(x, y)?;
                game.play(square, InputSource::Mouse, now)?;
                Ok(square)
            }
            ActiveSession::Rps(game) => Err(HandplayError::WrongPhase(game.phase().as_str())),
        }
    }

    /// Play again once the current game or match is over.
    pub fn reset(&mut self, now: Timestamp) -> Result<()> {
        match &mut self.session {
            ActiveSession::TicTacToe(game) => game.reset()?,
            ActiveSession::Rps(game) => game.restart(now)?,
        }
        self.stabilizer.reset();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handplay_gesture::poses;
    use handplay_rps::{RoundPhase, ScriptedThrower};
    use handplay_tictactoe::MinimaxStrategy;

    fn ms(t: u64) -> Timestamp {
        Timestamp::from_millis(t)
    }

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn test_gesture_mapping() {
        assert_eq!(gesture_move(Gesture::Rock), Some(Move::Rock));
        assert_eq!(gesture_move(Gesture::Paper), Some(Move::Paper));
        assert_eq!(gesture_move(Gesture::Scissors), Some(Move::Scissors));
        assert_eq!(gesture_move(Gesture::OSign), None);
    }

    #[test]
    fn test_new_picks_session_kind() {
        let config = ArcadeConfig::default();
        let ttt =
            Orchestrator::new(config, GameKind::TicTacToe, Difficulty::Hard, 1, ms(0)).unwrap();
        assert_eq!(ttt.session().kind(), GameKind::TicTacToe);
        let rps =
            Orchestrator::new(config, GameKind::RockPaperScissors, Difficulty::Easy, 1, ms(0))
                .unwrap();
        assert_eq!(rps.session().kind(), GameKind::RockPaperScissors);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ArcadeConfig {
            max_rounds: 0,
            ..ArcadeConfig::default()
        };
        assert!(
            Orchestrator::new(config, GameKind::TicTacToe, Difficulty::Easy, 0, ms(0)).is_err()
        );
    }

    #[test]
    fn test_o_sign_hover_and_click() {
        let mut orch =
            Orchestrator::tic_tac_toe(ArcadeConfig::default(), Box::new(MinimaxStrategy::new()))
                .unwrap();
        // Centre of the top-left cell.
        let hand = poses::o_sign_at(0.15, 0.15);

        let mut placed = None;
        for frame in 0..10 {
            let report = orch.update(Some(&hand), ms(frame * 16));
            assert_eq!(report.hover, Some(sq(0, 0)));
            if report.placed.is_some() {
                placed = report.placed;
            }
        }
        assert_eq!(placed, Some(sq(0, 0)));
    }

    #[test]
    fn test_rps_ignores_mouse() {
        let mut orch = Orchestrator::rock_paper_scissors(
            ArcadeConfig::default(),
            Box::new(ScriptedThrower::always(Move::Rock)),
            ms(0),
        )
        .unwrap();
        assert_eq!(
            orch.mouse_click(10.0, 10.0, ms(5)),
            Err(HandplayError::WrongPhase("countdown"))
        );
        orch.update(None, ms(3000));
        match orch.session() {
            ActiveSession::Rps(game) => assert_eq!(game.phase(), RoundPhase::Capture),
            ActiveSession::TicTacToe(_) => unreachable!(),
        }
    }

    #[test]
    fn test_mouse_click_routes_to_board() {
        let mut orch =
            Orchestrator::tic_tac_toe(ArcadeConfig::default(), Box::new(MinimaxStrategy::new()))
                .unwrap();
        let (x, y) = orch.config().board.center(sq(1, 1));
        assert_eq!(orch.mouse_click(x, y, ms(0)), Ok(sq(1, 1)));
        assert!(orch.mouse_click(-5.0, 10.0, ms(10)).is_err());
    }
}
