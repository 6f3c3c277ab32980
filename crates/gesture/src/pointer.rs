//! Exponential moving average for pointer jitter.
//!
//! Lower smoothing factor = smoother but more lag.

use crate::landmarks::Point;

/// EMA filter over a 2-D position.
#[derive(Clone, Debug)]
pub struct PointerSmoother {
    /// Weight of the newest sample, in (0, 1].
    alpha: f32,
    smoothed: Option<Point>,
}

impl PointerSmoother {
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(f32::EPSILON, 1.0),
            smoothed: None,
        }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Feed a raw sample and return the smoothed position.
    ///
    /// The first sample after construction or `reset` initializes the
    /// filter directly.
    pub fn filter(&mut self, raw: Point) -> Point {
        let next = match self.smoothed {
            None => raw,
            Some(prev) => Point::new(
                prev.x * (1.0 - self.alpha) + raw.x * self.alpha,
                prev.y * (1.0 - self.alpha) + raw.y * self.alpha,
            ),
        };
        self.smoothed = Some(next);
        next
    }

    /// Last smoothed position, if the filter has been fed.
    pub fn current(&self) -> Option<Point> {
        self.smoothed
    }

    /// Forget history; the next sample initializes the filter again.
    pub fn reset(&mut self) {
        self.smoothed = None;
    }
}

impl Default for PointerSmoother {
    fn default() -> Self {
        Self::new(0.3)
    }
}
