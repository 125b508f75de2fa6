//! View models consumed by the page shell.
//!
//! Pure functions of the controller (or catalog + store); the shell turns
//! them into DOM updates.

use serde::Serialize;

use crate::catalog::levels::LevelCatalog;
use crate::progress::kv::KeyValueStore;
use crate::progress::store::{LevelStats, ProgressStore};
use crate::session::controller::SessionController;
use crate::session::state::Phase;

/// What the practice page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum PracticeView {
    Card(CardView),
    Summary(SummaryView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub level: String,
    pub index: usize,
    pub total: usize,
    pub word: String,
    pub pos_label: &'static str,
    pub pos_class: &'static str,
    pub definition: String,
    pub translation: String,
    pub flipped: bool,
    /// Card offset while dragging, in pixels.
    pub drag_x: f32,
    pub drag_y: f32,
    /// Card rotation while dragging, in degrees.
    pub tilt_deg: f32,
    /// Acknowledgment overlay class (`good`, `bad`, `partial`) while grading.
    pub feedback: Option<&'static str>,
    /// Exit animation direction (`right`, `left`, `down`) while grading.
    pub exit: Option<&'static str>,
    /// Graded share of the level, 0–100.
    pub progress_percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    pub level: String,
    pub known: usize,
    pub partial: usize,
    pub unknown: usize,
    pub total: usize,
}

/// One entry of the level index page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelCardView {
    pub id: String,
    pub href: String,
    pub known: usize,
    pub partial: usize,
    pub unknown: usize,
    pub total: usize,
    /// Known share of the level, 0–100.
    pub known_percent: u32,
}

pub fn render<S: KeyValueStore>(session: &SessionController<S>) -> PracticeView {
    let state = session.state();
    let (index, entry) = match session.phase().index().zip(session.current_word()) {
        Some(found) => found,
        None => return PracticeView::Summary(summary(&state.level, &state.stats)),
    };

    let (feedback, exit) = match session.phase() {
        Phase::Grading { direction, .. } => (
            Some(direction.grade().feedback_class()),
            Some(direction.as_str()),
        ),
        _ => (None, None),
    };

    let drag = session.drag_delta();
    PracticeView::Card(CardView {
        level: state.level.clone(),
        index,
        total: state.total(),
        word: entry.word.clone(),
        pos_label: entry.part_of_speech.label(),
        pos_class: entry.part_of_speech.css_class(),
        definition: entry.definition.clone(),
        translation: entry.translation.clone(),
        flipped: session.phase().is_flipped(),
        drag_x: drag.x,
        drag_y: drag.y,
        tilt_deg: drag.x * session.gesture_config().tilt_per_px,
        feedback,
        exit,
        progress_percent: state.stats.graded_percent(),
    })
}

fn summary(level: &str, stats: &LevelStats) -> SummaryView {
    SummaryView {
        level: level.to_string(),
        known: stats.known,
        partial: stats.partial,
        unknown: stats.unknown,
        total: stats.total,
    }
}

/// Cards for the index page, in catalog order.
pub fn level_cards<S: KeyValueStore>(
    catalog: &LevelCatalog,
    progress: &ProgressStore<S>,
) -> Vec<LevelCardView> {
    catalog
        .levels()
        .iter()
        .map(|level| {
            let stats = progress.aggregate(level);
            LevelCardView {
                id: level.id.clone(),
                href: format!("level.html?level={}", level.id),
                known: stats.known,
                partial: stats.partial,
                unknown: stats.unknown,
                total: stats.total,
                known_percent: stats.known_percent(),
            }
        })
        .collect()
}
