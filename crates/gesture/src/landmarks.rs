//! Hand landmark storage.
//!
//! One [`LandmarkSet`] is 21 normalized points for a single hand in a single
//! frame, as produced by the external hand-pose model. `x` and `y` lie in
//! [0, 1] with `y` growing downwards; `z` is relative depth and unused by
//! the classifier.

use handplay_core::{HandplayError, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Number of landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Planar distance, ignoring depth.
    pub fn distance_xy(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint_xy(&self, other: &Landmark) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// A 2-D position, normalized to the camera frame unless stated otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The five digits, each with a fingertip and a base joint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// The four non-thumb fingers.
    pub const FINGERS: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    pub fn tip(self) -> usize {
        match self {
            Finger::Thumb => THUMB_TIP,
            Finger::Index => INDEX_TIP,
            Finger::Middle => MIDDLE_TIP,
            Finger::Ring => RING_TIP,
            Finger::Pinky => PINKY_TIP,
        }
    }

    /// The base joint the tip is compared against. For the thumb this is
    /// the MCP joint; for the others, the knuckle.
    pub fn base(self) -> usize {
        match self {
            Finger::Thumb => THUMB_MCP,
            Finger::Index => INDEX_MCP,
            Finger::Middle => MIDDLE_MCP,
            Finger::Ring => RING_MCP,
            Finger::Pinky => PINKY_MCP,
        }
    }
}

/// The 21 landmarks of one hand in one frame. Immutable once built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LandmarkSet([Landmark; LANDMARK_COUNT]);

impl LandmarkSet {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self(points)
    }

    /// Parse the pose model's flat `x, y, z, x, y, z, ...` buffer.
    ///
    /// # Errors
    /// Returns `HandplayError::InvalidLandmarks` unless the buffer holds
    /// exactly 63 finite values.
    pub fn from_flat(flat: &[f32]) -> Result<Self> {
        if flat.len() != LANDMARK_COUNT * 3 {
            return Err(HandplayError::InvalidLandmarks(format!(
                "expected {} values, got {}",
                LANDMARK_COUNT * 3,
                flat.len()
            )));
        }
        if flat.iter().any(|v| !v.is_finite()) {
            return Err(HandplayError::InvalidLandmarks(
                "buffer contains non-finite values".to_string(),
            ));
        }

        let mut points = [Landmark::default(); LANDMARK_COUNT];
        for (point, xyz) in points.iter_mut().zip(flat.chunks_exact(3)) {
            *point = Landmark::new(xyz[0], xyz[1], xyz[2]);
        }
        Ok(Self(points))
    }

    /// Build from a slice of `[x, y, z]` triples (the frame-trace format).
    pub fn from_triples(triples: &[[f32; 3]]) -> Result<Self> {
        let flat: Vec<f32> = triples.iter().flatten().copied().collect();
        Self::from_flat(&flat)
    }

    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.0.get(index)
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.0
    }

    pub fn tip(&self, finger: Finger) -> &Landmark {
        &self.0[finger.tip()]
    }

    pub fn base(&self, finger: Finger) -> &Landmark {
        &self.0[finger.base()]
    }

    /// Tip sits below its base (larger y): the finger is folded down.
    pub fn is_curled(&self, finger: Finger) -> bool {
        self.tip(finger).y > self.base(finger).y
    }

    /// Tip sits above its base (smaller y): the finger points up.
    pub fn is_extended(&self, finger: Finger) -> bool {
        self.tip(finger).y < self.base(finger).y
    }

    /// Planar distance between two fingertips.
    pub fn tip_distance(&self, a: Finger, b: Finger) -> f32 {
        self.tip(a).distance_xy(self.tip(b))
    }
}

impl std::ops::Index<usize> for LandmarkSet {
    type Output = Landmark;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flat_parses_points_in_order() {
        let flat: Vec<f32> = (0..63).map(|i| i as f32 / 100.0).collect();
        let set = LandmarkSet::from_flat(&flat).unwrap();
        assert_eq!(set[WRIST], Landmark::new(0.0, 0.01, 0.02));
        assert_eq!(set[PINKY_TIP], Landmark::new(0.60, 0.61, 0.62));
    }

    #[test]
    fn test_from_flat_rejects_wrong_length() {
        let result = LandmarkSet::from_flat(&[0.5; 60]);
        assert!(matches!(result, Err(HandplayError::InvalidLandmarks(_))));
    }

    #[test]
    fn test_from_flat_rejects_nan() {
        let mut flat = vec![0.5; 63];
        flat[10] = f32::NAN;
        assert!(LandmarkSet::from_flat(&flat).is_err());
    }

    #[test]
    fn test_finger_joints() {
        assert_eq!(Finger::Thumb.tip(), 4);
        assert_eq!(Finger::Thumb.base(), 2);
        assert_eq!(Finger::Index.base(), 5);
        assert_eq!(Finger::Middle.base(), 9);
        assert_eq!(Finger::Ring.base(), 13);
        assert_eq!(Finger::Pinky.base(), 17);
    }

    #[test]
    fn test_curled_and_extended() {
        let mut points = [Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        points[INDEX_TIP].y = 0.3;
        points[MIDDLE_TIP].y = 0.7;
        let set = LandmarkSet::new(points);

        assert!(set.is_extended(Finger::Index));
        assert!(!set.is_curled(Finger::Index));
        assert!(set.is_curled(Finger::Middle));
        // Level tip and base is neither.
        assert!(!set.is_curled(Finger::Ring));
        assert!(!set.is_extended(Finger::Ring));
    }

    #[test]
    fn test_distance_and_midpoint() {
        let a = Landmark::new(0.0, 0.0, 0.9);
        let b = Landmark::new(0.3, 0.4, -0.9);
        assert!((a.distance_xy(&b) - 0.5).abs() < 1e-6);
        assert_eq!(a.midpoint_xy(&b), Point::new(0.15, 0.2));
    }
}
