//! Synthetic reference poses.
//!
//! Hand-built landmark sets for each gesture, used by tests, frame-trace
//! fixtures and the `handplay` demo commands. Each pose is laid out in
//! offsets from an anchor point so it can be moved around the frame
//! without changing its classification.

use crate::landmarks::*;

/// Offsets from the anchor for a relaxed hand: every fingertip level with
/// its base joint, so no predicate holds.
const NEUTRAL: [(f32, f32); LANDMARK_COUNT] = [
    (0.00, 0.30),  // wrist
    (-0.05, 0.22), // thumb cmc
    (-0.10, 0.10), // thumb mcp
    (-0.08, 0.10), // thumb ip
    (-0.06, 0.10), // thumb tip
    (-0.05, 0.00), // index mcp
    (-0.05, 0.00),
    (-0.05, 0.00),
    (-0.05, 0.00), // index tip
    (0.00, -0.02), // middle mcp
    (0.00, -0.02),
    (0.00, -0.02),
    (0.00, -0.02), // middle tip
    (0.05, 0.00), // ring mcp
    (0.05, 0.00),
    (0.05, 0.00),
    (0.05, 0.00), // ring tip
    (0.10, 0.03), // pinky mcp
    (0.10, 0.03),
    (0.10, 0.03),
    (0.10, 0.03), // pinky tip
];

const CURL: f32 = 0.05;
const REACH: f32 = 0.20;

fn build(anchor: Point, offsets: &[(f32, f32); LANDMARK_COUNT]) -> LandmarkSet {
    let mut points = [Landmark::default(); LANDMARK_COUNT];
    for (point, (dx, dy)) in points.iter_mut().zip(offsets.iter()) {
        *point = Landmark::new(anchor.x + dx, anchor.y + dy, 0.0);
    }
    LandmarkSet::new(points)
}

fn curl(offsets: &mut [(f32, f32); LANDMARK_COUNT], finger: Finger) {
    let base = offsets[finger.base()];
    offsets[finger.tip()] = (base.0, base.1 + CURL);
}

fn extend(offsets: &mut [(f32, f32); LANDMARK_COUNT], finger: Finger) {
    let base = offsets[finger.base()];
    offsets[finger.tip()] = (base.0, base.1 - REACH);
}

const DEFAULT_ANCHOR: Point = Point::new(0.5, 0.55);

/// Relaxed hand at the default anchor; classifies as no gesture.
pub fn neutral() -> LandmarkSet {
    neutral_at(DEFAULT_ANCHOR.x, DEFAULT_ANCHOR.y)
}

pub fn neutral_at(x: f32, y: f32) -> LandmarkSet {
    build(Point::new(x, y), &NEUTRAL)
}

/// Closed fist.
pub fn rock() -> LandmarkSet {
    let mut offsets = NEUTRAL;
    for finger in Finger::FINGERS {
        curl(&mut offsets, finger);
    }
    build(DEFAULT_ANCHOR, &offsets)
}

/// Open palm, all five digits up.
pub fn paper() -> LandmarkSet {
    let mut offsets = NEUTRAL;
    for finger in Finger::ALL {
        extend(&mut offsets, finger);
    }
    // Splay the thumb away from the index finger.
    offsets[THUMB_TIP].0 -= 0.08;
    build(DEFAULT_ANCHOR, &offsets)
}

/// Index and middle up in a V, ring and pinky folded.
pub fn scissors() -> LandmarkSet {
    let mut offsets = NEUTRAL;
    extend(&mut offsets, Finger::Index);
    extend(&mut offsets, Finger::Middle);
    offsets[INDEX_TIP].0 -= 0.05;
    offsets[MIDDLE_TIP].0 += 0.06;
    curl(&mut offsets, Finger::Ring);
    curl(&mut offsets, Finger::Pinky);
    build(DEFAULT_ANCHOR, &offsets)
}

/// O-sign whose thumb/index pinch is centred on `(x, y)`.
pub fn o_sign_at(x: f32, y: f32) -> LandmarkSet {
    let mut offsets = NEUTRAL;
    // Pinch point is the anchor; lift the base joints below it.
    offsets[THUMB_TIP] = (-0.01, 0.0);
    offsets[INDEX_TIP] = (0.01, 0.0);
    offsets[THUMB_MCP] = (-0.06, 0.12);
    offsets[INDEX_MCP] = (0.00, 0.12);
    offsets[MIDDLE_MCP] = (0.04, 0.10);
    offsets[RING_MCP] = (0.07, 0.11);
    offsets[PINKY_MCP] = (0.10, 0.13);
    extend(&mut offsets, Finger::Middle);
    extend(&mut offsets, Finger::Ring);
    extend(&mut offsets, Finger::Pinky);
    build(Point::new(x, y), &offsets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{classify, Gesture};

    #[test]
    fn test_poses_classify_as_named() {
        assert_eq!(classify(&rock()).map(|c| c.gesture), Some(Gesture::Rock));
        assert_eq!(classify(&paper()).map(|c| c.gesture), Some(Gesture::Paper));
        assert_eq!(
            classify(&scissors()).map(|c| c.gesture),
            Some(Gesture::Scissors)
        );
        assert_eq!(
            classify(&o_sign_at(0.2, 0.8)).map(|c| c.gesture),
            Some(Gesture::OSign)
        );
        assert_eq!(classify(&neutral()), None);
    }

    #[test]
    fn test_neutral_anywhere_is_no_gesture() {
        for &(x, y) in &[(0.1, 0.1), (0.9, 0.2), (0.5, 0.9)] {
            assert_eq!(classify(&neutral_at(x, y)), None);
        }
    }
}
