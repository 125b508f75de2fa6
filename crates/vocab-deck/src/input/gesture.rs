//! Pointer gesture tracking and classification.
//!
//! A gesture runs from pointer-down to pointer-up. Its classification only
//! depends on the final displacement, never on the path taken.

use glam::Vec2;

use crate::api::config::GestureConfig;
use crate::api::types::WordStatus;

/// Direction of a completed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
    Down,
}

impl SwipeDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SwipeDirection::Left => "left",
            SwipeDirection::Right => "right",
            SwipeDirection::Down => "down",
        }
    }

    /// The grade a swipe in this direction assigns.
    pub fn grade(self) -> WordStatus {
        match self {
            SwipeDirection::Right => WordStatus::Known,
            SwipeDirection::Left => WordStatus::Unknown,
            SwipeDirection::Down => WordStatus::Partial,
        }
    }
}

/// Outcome of a released pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Barely moved: flip the card.
    Tap,
    /// Moved far enough along an axis to grade the word.
    Swipe(SwipeDirection),
    /// Moved, but not decisively (upward, or stuck between thresholds).
    Cancelled,
}

/// Classify a displacement (screen coordinates, y grows downward).
///
/// Horizontal motion wins over vertical when both pass the swipe threshold.
pub fn classify(delta: Vec2, config: &GestureConfig) -> Gesture {
    let abs = delta.abs();
    if abs.x < config.tap_threshold && abs.y < config.tap_threshold {
        return Gesture::Tap;
    }
    if abs.x > config.swipe_threshold {
        return Gesture::Swipe(if delta.x > 0.0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        });
    }
    if delta.y > config.swipe_threshold {
        return Gesture::Swipe(SwipeDirection::Down);
    }
    Gesture::Cancelled
}

/// Tracks one pointer between down and up.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    origin: Option<Vec2>,
    delta: Vec2,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, pos: Vec2) {
        self.origin = Some(pos);
        self.delta = Vec2::ZERO;
    }

    /// Update the displacement. Ignored unless a gesture is in progress.
    pub fn update(&mut self, pos: Vec2) {
        if let Some(origin) = self.origin {
            self.delta = pos - origin;
        }
    }

    /// Finish the gesture at `pos`. Returns None if no pointer was down.
    pub fn end(&mut self, pos: Vec2, config: &GestureConfig) -> Option<Gesture> {
        let origin = self.origin.take()?;
        let delta = pos - origin;
        self.delta = Vec2::ZERO;
        Some(classify(delta, config))
    }

    pub fn cancel(&mut self) {
        self.origin = None;
        self.delta = Vec2::ZERO;
    }

    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }

    /// Current displacement from the pointer-down position.
    pub fn delta(&self) -> Vec2 {
        self.delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> GestureConfig {
        GestureConfig::default()
    }

    #[test]
    fn small_motion_is_a_tap() {
        assert_eq!(classify(Vec2::new(10.0, 10.0), &cfg()), Gesture::Tap);
        assert_eq!(classify(Vec2::new(-29.0, 29.0), &cfg()), Gesture::Tap);
        assert_eq!(classify(Vec2::ZERO, &cfg()), Gesture::Tap);
    }

    #[test]
    fn horizontal_swipes_grade_known_and_unknown() {
        assert_eq!(
            classify(Vec2::new(60.0, 5.0), &cfg()),
            Gesture::Swipe(SwipeDirection::Right)
        );
        assert_eq!(
            classify(Vec2::new(-60.0, 0.0), &cfg()),
            Gesture::Swipe(SwipeDirection::Left)
        );
        assert_eq!(SwipeDirection::Right.grade(), WordStatus::Known);
        assert_eq!(SwipeDirection::Left.grade(), WordStatus::Unknown);
    }

    #[test]
    fn downward_swipe_grades_partial() {
        let g = classify(Vec2::new(0.0, 60.0), &cfg());
        assert_eq!(g, Gesture::Swipe(SwipeDirection::Down));
        assert_eq!(SwipeDirection::Down.grade(), WordStatus::Partial);
    }

    #[test]
    fn horizontal_wins_when_both_axes_pass() {
        assert_eq!(
            classify(Vec2::new(55.0, 120.0), &cfg()),
            Gesture::Swipe(SwipeDirection::Right)
        );
    }

    #[test]
    fn upward_and_in_between_motion_is_cancelled() {
        assert_eq!(classify(Vec2::new(0.0, -90.0), &cfg()), Gesture::Cancelled);
        assert_eq!(classify(Vec2::new(40.0, 40.0), &cfg()), Gesture::Cancelled);
        assert_eq!(classify(Vec2::new(35.0, 0.0), &cfg()), Gesture::Cancelled);
    }

    #[test]
    fn thresholds_must_be_passed_not_reached() {
        assert_eq!(classify(Vec2::new(30.0, 0.0), &cfg()), Gesture::Cancelled);
        assert_eq!(classify(Vec2::new(0.0, 30.0), &cfg()), Gesture::Cancelled);
        assert_eq!(classify(Vec2::new(50.0, 0.0), &cfg()), Gesture::Cancelled);
        assert_eq!(classify(Vec2::new(-50.0, 0.0), &cfg()), Gesture::Cancelled);
        assert_eq!(classify(Vec2::new(0.0, 50.0), &cfg()), Gesture::Cancelled);
        assert_eq!(
            classify(Vec2::new(50.5, 0.0), &cfg()),
            Gesture::Swipe(SwipeDirection::Right)
        );
    }

    #[test]
    fn tracker_measures_from_origin() {
        let mut t = GestureTracker::new();
        assert!(t.end(Vec2::new(5.0, 5.0), &cfg()).is_none());

        t.begin(Vec2::new(100.0, 100.0));
        t.update(Vec2::new(130.0, 110.0));
        assert_eq!(t.delta(), Vec2::new(30.0, 10.0));

        let g = t.end(Vec2::new(170.0, 100.0), &cfg());
        assert_eq!(g, Some(Gesture::Swipe(SwipeDirection::Right)));
        assert!(!t.is_active());
        assert_eq!(t.delta(), Vec2::ZERO);
    }

    #[test]
    fn cancel_discards_the_gesture() {
        let mut t = GestureTracker::new();
        t.begin(Vec2::ZERO);
        t.update(Vec2::new(-80.0, 0.0));
        t.cancel();
        assert!(t.end(Vec2::new(-80.0, 0.0), &cfg()).is_none());
    }
}
