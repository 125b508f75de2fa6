use glam::Vec2;

use crate::api::config::{GestureConfig, TrainerConfig};
use crate::api::types::{event_kind, SpeechRequest, TrainerEvent, WordStatus};
use crate::catalog::levels::{Level, WordEntry};
use crate::input::gesture::{Gesture, GestureTracker, SwipeDirection};
use crate::input::queue::{custom_kind, key_code, InputEvent, InputQueue};
use crate::progress::kv::KeyValueStore;
use crate::progress::store::{LevelStats, ProgressStore};
use crate::session::state::{Phase, SessionState};

/// Drives the practice flow of one level.
///
/// Words that already carry a stored grade are skipped, so reopening a level
/// resumes at the first ungraded word. Each grade is written through to the
/// progress store immediately; the level summary is rewritten after every
/// grade and once more on completion.
pub struct SessionController<S> {
    level: Level,
    progress: ProgressStore<S>,
    gesture: GestureConfig,
    advance_delay: f32,
    tracker: GestureTracker,
    phase: Phase,
    state: SessionState,
    /// Grade of each word in catalog order, as known to this session.
    grades: Vec<Option<WordStatus>>,
    events: Vec<TrainerEvent>,
    speech: Vec<SpeechRequest>,
}

impl<S: KeyValueStore> SessionController<S> {
    pub fn new(level: Level, progress: ProgressStore<S>, config: &TrainerConfig) -> Self {
        let grades = level
            .iter()
            .map(|w| progress.graded(&level.id, &w.word))
            .collect();
        let state = SessionState {
            level: level.id.clone(),
            current_index: 0,
            stats: LevelStats::empty(level.len()),
        };
        let mut session = Self {
            level,
            progress,
            gesture: config.gesture,
            advance_delay: config.advance_delay.max(0.0),
            tracker: GestureTracker::new(),
            phase: Phase::Complete,
            state,
            grades,
            events: Vec::new(),
            speech: Vec::new(),
        };
        session.begin();
        session
    }

    fn begin(&mut self) {
        self.tracker.cancel();
        self.state.stats = self.count_grades();
        let first = self.next_ungraded(0);
        log::info!(
            "session: level {}: {} word(s), {} already graded",
            self.level.id,
            self.level.len(),
            self.state.stats.graded()
        );
        self.show(first);
    }

    fn count_grades(&self) -> LevelStats {
        let mut stats = LevelStats::empty(self.level.len());
        for status in self.grades.iter().flatten() {
            stats.regrade(None, *status);
        }
        stats
    }

    fn next_ungraded(&self, from: usize) -> usize {
        (from..self.level.len())
            .find(|&i| self.grades[i].is_none())
            .unwrap_or(self.level.len())
    }

    /// Show the card at `index`, or finish when past the end.
    fn show(&mut self, index: usize) {
        self.state.current_index = index;
        if index >= self.level.len() {
            self.finish();
        } else {
            self.phase = Phase::Showing(index);
            self.events
                .push(TrainerEvent::new(event_kind::ADVANCED, index as f32, 0.0, 0.0));
        }
    }

    fn finish(&mut self) {
        self.phase = Phase::Complete;
        self.state.current_index = self.level.len();
        let stats = self.state.stats;
        self.save_summary();
        log::info!(
            "session: level {} complete: {} known, {} partial, {} unknown",
            self.level.id,
            stats.known,
            stats.partial,
            stats.unknown
        );
        self.events.push(TrainerEvent::new(
            event_kind::COMPLETED,
            stats.known as f32,
            stats.partial as f32,
            stats.unknown as f32,
        ));
    }

    fn save_summary(&self) {
        if let Err(e) = self.progress.save_summary(&self.level.id, &self.state.stats) {
            log::warn!("session: could not save summary: {e}");
        }
    }

    /// Process one input event.
    pub fn handle(&mut self, event: InputEvent) {
        if let InputEvent::Custom { kind } = event {
            self.command(kind);
            return;
        }
        if !self.phase.accepts_gestures() {
            return;
        }
        match event {
            InputEvent::PointerDown { x, y } => self.tracker.begin(Vec2::new(x, y)),
            InputEvent::PointerMove { x, y } => self.tracker.update(Vec2::new(x, y)),
            InputEvent::PointerUp { x, y } => {
                if let Some(gesture) = self.tracker.end(Vec2::new(x, y), &self.gesture) {
                    self.apply(gesture);
                }
            }
            InputEvent::PointerCancel => self.tracker.cancel(),
            InputEvent::KeyDown { key_code } => self.key(key_code),
            InputEvent::Custom { .. } => {}
        }
    }

    /// Process queued input, then advance timers by `dt` seconds.
    pub fn update(&mut self, input: &InputQueue, dt: f32) {
        for event in input.iter() {
            self.handle(*event);
        }
        self.tick(dt);
    }

    /// Advance the acknowledgment timer. Returns true if the card changed.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Phase::Grading { index, remaining, .. } = &mut self.phase else {
            return false;
        };
        *remaining -= dt;
        if *remaining > 0.0 {
            return false;
        }
        let after = *index + 1;
        let next = self.next_ungraded(after);
        self.show(next);
        true
    }

    fn key(&mut self, code: u32) {
        match code {
            key_code::ARROW_RIGHT => self.grade(SwipeDirection::Right),
            key_code::ARROW_LEFT => self.grade(SwipeDirection::Left),
            key_code::ARROW_DOWN => self.grade(SwipeDirection::Down),
            key_code::SPACE => self.flip(),
            _ => {}
        }
    }

    fn command(&mut self, kind: u32) {
        match kind {
            custom_kind::RESET => self.reset(),
            custom_kind::SPEAK => self.speak_current(),
            other => log::debug!("session: ignoring custom event {other}"),
        }
    }

    fn apply(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Tap => self.flip(),
            Gesture::Swipe(direction) => self.grade(direction),
            Gesture::Cancelled => {
                if let Phase::Flipped(i) = self.phase {
                    self.phase = Phase::Showing(i);
                    self.events.push(TrainerEvent::new(event_kind::FLIPPED, 0.0, i as f32, 0.0));
                }
            }
        }
    }

    fn flip(&mut self) {
        let (next, face) = match self.phase {
            Phase::Showing(i) => (Phase::Flipped(i), 1.0),
            Phase::Flipped(i) => (Phase::Showing(i), 0.0),
            _ => return,
        };
        self.phase = next;
        if let Some(i) = next.index() {
            self.events.push(TrainerEvent::new(event_kind::FLIPPED, face, i as f32, 0.0));
        }
    }

    fn grade(&mut self, direction: SwipeDirection) {
        if !self.phase.accepts_gestures() {
            return;
        }
        let Some(index) = self.phase.index() else {
            return;
        };
        let flipped = self.phase.is_flipped();
        let status = direction.grade();
        let word = &self.level.words[index].word;

        if let Err(e) = self.progress.set_status(&self.level.id, word, status) {
            log::warn!("session: could not save grade for {word}: {e}");
        }
        log::debug!("session: {word} graded {status}");

        let previous = self.grades[index].replace(status);
        self.state.stats.regrade(previous, status);
        self.save_summary();

        self.tracker.cancel();
        self.events.push(TrainerEvent::new(
            event_kind::GRADED,
            status.code(),
            index as f32,
            0.0,
        ));
        self.phase = Phase::Grading {
            index,
            direction,
            flipped,
            remaining: self.advance_delay,
        };
    }

    /// Clear the level's progress and start over from the first word.
    pub fn reset(&mut self) {
        if let Err(e) = self.progress.reset_level(&self.level) {
            log::warn!("session: could not clear progress for level {}: {e}", self.level.id);
        }
        self.grades = vec![None; self.level.len()];
        self.events.push(TrainerEvent::new(event_kind::RESET, 0.0, 0.0, 0.0));
        self.begin();
    }

    /// Queue a pronunciation of the word on screen.
    pub fn speak_current(&mut self) {
        if let Some(entry) = self.current_word() {
            self.speech.push(SpeechRequest(entry.word.clone()));
        }
    }

    // -- Accessors --

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn progress(&self) -> &ProgressStore<S> {
        &self.progress
    }

    pub fn gesture_config(&self) -> &GestureConfig {
        &self.gesture
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn current_word(&self) -> Option<&WordEntry> {
        self.phase.index().and_then(|i| self.level.get(i))
    }

    /// Displacement of the pointer being dragged, zero when idle.
    pub fn drag_delta(&self) -> Vec2 {
        if self.tracker.is_active() {
            self.tracker.delta()
        } else {
            Vec2::ZERO
        }
    }

    /// Events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<TrainerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pronunciation requests emitted since the last drain.
    pub fn drain_speech(&mut self) -> Vec<SpeechRequest> {
        std::mem::take(&mut self.speech)
    }
}
