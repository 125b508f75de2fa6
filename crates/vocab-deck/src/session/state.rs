use crate::input::gesture::SwipeDirection;
use crate::progress::store::LevelStats;

/// Where the practice flow is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Front of the card at `index`.
    Showing(usize),
    /// Back of the card (translation + definition).
    Flipped(usize),
    /// The word was just graded; the acknowledgment plays until `remaining`
    /// reaches zero, then the next card shows.
    Grading {
        index: usize,
        direction: SwipeDirection,
        flipped: bool,
        remaining: f32,
    },
    /// Every word is graded. Only commands are accepted.
    Complete,
}

impl Phase {
    /// Index of the card on screen, if any.
    pub fn index(&self) -> Option<usize> {
        match *self {
            Phase::Showing(i) | Phase::Flipped(i) => Some(i),
            Phase::Grading { index, .. } => Some(index),
            Phase::Complete => None,
        }
    }

    pub fn is_flipped(&self) -> bool {
        matches!(self, Phase::Flipped(_) | Phase::Grading { flipped: true, .. })
    }

    /// Whether pointer gestures and grading keys are processed.
    pub fn accepts_gestures(&self) -> bool {
        matches!(self, Phase::Showing(_) | Phase::Flipped(_))
    }
}

/// Bookkeeping for one practice session of one level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub level: String,
    /// Catalog index of the current word; equals `stats.total` once done.
    pub current_index: usize,
    pub stats: LevelStats,
}

impl SessionState {
    pub fn total(&self) -> usize {
        self.stats.total
    }

    pub fn is_complete(&self) -> bool {
        self.current_index >= self.stats.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_index_and_face() {
        assert_eq!(Phase::Showing(3).index(), Some(3));
        assert!(!Phase::Showing(3).is_flipped());
        assert!(Phase::Flipped(0).is_flipped());

        let grading = Phase::Grading {
            index: 2,
            direction: SwipeDirection::Down,
            flipped: true,
            remaining: 0.2,
        };
        assert_eq!(grading.index(), Some(2));
        assert!(grading.is_flipped());
        assert!(!grading.accepts_gestures());
        assert_eq!(Phase::Complete.index(), None);
    }
}
