//! Computer throw sources.

use crate::moves::Move;
use rand::Rng;

/// Picks the computer's throw for a round.
pub trait Thrower: Send {
    fn throw(&mut self) -> Move;
}

/// Uniformly random throws.
pub struct RandomThrower<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomThrower<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> Thrower for RandomThrower<R> {
    fn throw(&mut self) -> Move {
        Move::ALL[self.rng.gen_range(0..Move::ALL.len())]
    }
}

/// Replays a fixed list of throws, cycling when it runs out.
#[derive(Clone, Debug)]
pub struct ScriptedThrower {
    script: Vec<Move>,
    next: usize,
}

impl ScriptedThrower {
    /// An empty script throws rock forever.
    pub fn new(script: Vec<Move>) -> Self {
        Self { script, next: 0 }
    }

    pub fn always(m: Move) -> Self {
        Self::new(vec![m])
    }
}

impl Thrower for ScriptedThrower {
    fn throw(&mut self) -> Move {
        if self.script.is_empty() {
            return Move::Rock;
        }
        let m = self.script[self.next % self.script.len()];
        self.next += 1;
        m
    }
}
