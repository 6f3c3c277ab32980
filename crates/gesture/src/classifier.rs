//! Static hand-pose classification.
//!
//! Gestures are recognised by an ordered rule table evaluated top to
//! bottom; the first predicate that holds wins. Priority order:
//! O-sign, Scissors, Paper, Rock. A pose that matches nothing is simply
//! "no gesture", never an error.

use crate::landmarks::{Finger, LandmarkSet, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A recognised hand pose. "No gesture" is `Option::None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    Rock,
    Paper,
    Scissors,
    /// Thumb and index tips touching, other fingers up. Acts as a click.
    OSign,
}

impl Gesture {
    pub fn as_str(self) -> &'static str {
        match self {
            Gesture::Rock => "rock",
            Gesture::Paper => "paper",
            Gesture::Scissors => "scissors",
            Gesture::OSign => "o_sign",
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distance thresholds, in normalized image units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierThresholds {
    /// Index and middle tips must be further apart than this for Scissors.
    pub scissors_spread: f32,
    /// Thumb and index tips must be closer than this for the O-sign.
    pub pinch_distance: f32,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            scissors_spread: 0.1,
            pinch_distance: 0.07,
        }
    }
}

/// Result of classifying one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    pub gesture: Gesture,
    /// Only the O-sign designates a position: the thumb/index midpoint.
    pub pointer: Option<Point>,
}

type Predicate = fn(&LandmarkSet, &ClassifierThresholds) -> bool;

/// Evaluated in order; first match wins.
const RULES: [(Gesture, Predicate); 4] = [
    (Gesture::OSign, is_o_sign),
    (Gesture::Scissors, is_scissors),
    (Gesture::Paper, is_paper),
    (Gesture::Rock, is_rock),
];

/// All four non-thumb fingers folded down.
pub fn is_rock(hand: &LandmarkSet, _: &ClassifierThresholds) -> bool {
    Finger::FINGERS.iter().all(|&f| hand.is_curled(f))
}

/// All five digits, thumb included, pointing up.
pub fn is_paper(hand: &LandmarkSet, _: &ClassifierThresholds) -> bool {
    Finger::ALL.iter().all(|&f| hand.is_extended(f))
}

/// Index and middle spread apart, ring and pinky folded.
pub fn is_scissors(hand: &LandmarkSet, t: &ClassifierThresholds) -> bool {
    hand.tip_distance(Finger::Index, Finger::Middle) > t.scissors_spread
        && hand.is_curled(Finger::Ring)
        && hand.is_curled(Finger::Pinky)
}

/// Thumb touching index, remaining three fingers up.
pub fn is_o_sign(hand: &LandmarkSet, t: &ClassifierThresholds) -> bool {
    hand.tip_distance(Finger::Thumb, Finger::Index) < t.pinch_distance
        && hand.is_extended(Finger::Middle)
        && hand.is_extended(Finger::Ring)
        && hand.is_extended(Finger::Pinky)
}

/// Stateless landmark classifier.
#[derive(Clone, Copy, Debug, Default)]
pub struct Classifier {
    thresholds: ClassifierThresholds,
}

impl Classifier {
    pub fn new(thresholds: ClassifierThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ClassifierThresholds {
        &self.thresholds
    }

    /// Return the highest-priority matching gesture, or `None`.
    pub fn classify(&self, hand: &LandmarkSet) -> Option<Classification> {
        let gesture = RULES
            .iter()
            .find(|(_, predicate)| predicate(hand, &self.thresholds))
            .map(|(gesture, _)| *gesture)?;

        let pointer = match gesture {
            Gesture::OSign => Some(
                hand.tip(Finger::Thumb)
                    .midpoint_xy(hand.tip(Finger::Index)),
            ),
            _ => None,
        };

        Some(Classification { gesture, pointer })
    }

    /// Every gesture whose predicate holds, in priority order.
    /// Useful for diagnostics; `classify` returns the first of these.
    pub fn matches(&self, hand: &LandmarkSet) -> Vec<Gesture> {
        RULES
            .iter()
            .filter(|(_, predicate)| predicate(hand, &self.thresholds))
            .map(|(gesture, _)| *gesture)
            .collect()
    }
}

/// Classify with the default thresholds.
pub fn classify(hand: &LandmarkSet) -> Option<Classification> {
    Classifier::default().classify(hand)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poses;

    #[test]
    fn test_rock() {
        let c = classify(&poses::rock()).unwrap();
        assert_eq!(c.gesture, Gesture::Rock);
        assert!(c.pointer.is_none());
    }

    #[test]
    fn test_paper() {
        assert_eq!(classify(&poses::paper()).unwrap().gesture, Gesture::Paper);
    }

    #[test]
    fn test_scissors() {
        assert_eq!(
            classify(&poses::scissors()).unwrap().gesture,
            Gesture::Scissors
        );
    }

    #[test]
    fn test_o_sign_carries_midpoint() {
        let hand = poses::o_sign_at(0.4, 0.6);
        let c = classify(&hand).unwrap();
        assert_eq!(c.gesture, Gesture::OSign);
        let p = c.pointer.unwrap();
        assert!((p.x - 0.4).abs() < 1e-5);
        assert!((p.y - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_neutral_hand_is_no_gesture() {
        assert!(classify(&poses::neutral()).is_none());
    }

    #[test]
    fn test_scissors_needs_spread() {
        // Index and middle tips nearly touching: not scissors.
        let mut points = *poses::scissors().points();
        points[crate::MIDDLE_TIP].x = points[crate::INDEX_TIP].x + 0.02;
        let hand = LandmarkSet::new(points);
        assert_ne!(classify(&hand).map(|c| c.gesture), Some(Gesture::Scissors));
    }

    #[test]
    fn test_o_sign_beats_paper() {
        // Thumb/index pinch with every fingertip above its base satisfies
        // both the O-sign and Paper predicates.
        let hand = poses::o_sign_at(0.5, 0.2);
        let classifier = Classifier::default();
        let all = classifier.matches(&hand);
        assert!(all.contains(&Gesture::OSign));
        assert!(all.contains(&Gesture::Paper));
        assert_eq!(classifier.classify(&hand).unwrap().gesture, Gesture::OSign);
    }

    #[test]
    fn test_thresholds_are_configurable() {
        let strict = Classifier::new(ClassifierThresholds {
            scissors_spread: 0.5,
            ..Default::default()
        });
        assert_ne!(
            strict.classify(&poses::scissors()).map(|c| c.gesture),
            Some(Gesture::Scissors)
        );
    }

    #[test]
    fn test_gesture_display() {
        assert_eq!(Gesture::OSign.to_string(), "o_sign");
        assert_eq!(Gesture::Rock.to_string(), "rock");
    }
}
