use std::rc::Rc;

use vocab_deck::{
    render, InputEvent, InputQueue, Pronouncer, SessionController, TrainerEvent,
};

use crate::speech::BrowserSpeech;
use crate::storage::LocalStorage;

pub type Session = SessionController<LocalStorage>;

/// Wires one practice session to the page.
///
/// Lives in a `thread_local!` in `lib.rs`: wasm-bindgen cannot export generic
/// structs, so the page drives it through free functions.
pub struct SessionRunner {
    session: Session,
    input: InputQueue,
    pronouncer: Rc<Pronouncer<BrowserSpeech>>,
    /// Events of the last tick, flattened for a `Float32Array` read.
    event_buffer: Vec<f32>,
}

impl SessionRunner {
    pub fn new(session: Session, pronouncer: Rc<Pronouncer<BrowserSpeech>>) -> Self {
        Self {
            session,
            input: InputQueue::new(),
            pronouncer,
            event_buffer: Vec::new(),
        }
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: feed queued input, advance timers, collect outgoing
    /// events and start any requested pronunciation. Returns true when the
    /// view may have changed.
    pub fn tick(&mut self, dt: f32) -> bool {
        let had_input = !self.input.is_empty();
        self.session.update(&self.input, dt);
        self.input.drain();

        let events = self.session.drain_events();
        self.event_buffer = TrainerEvent::pack(&events);

        for request in self.session.drain_speech() {
            let pronouncer = Rc::clone(&self.pronouncer);
            wasm_bindgen_futures::spawn_local(async move {
                let spoken = pronouncer.speak(&request.0).await;
                log::debug!("speech: {} -> {spoken:?}", request.0);
            });
        }

        had_input || !events.is_empty()
    }

    pub fn view_json(&self) -> String {
        serde_json::to_string(&render(&self.session)).unwrap_or_else(|e| {
            log::error!("runner: could not serialize view: {e}");
            String::new()
        })
    }

    pub fn events(&self) -> &[f32] {
        &self.event_buffer
    }

    pub fn pronouncer(&self) -> Rc<Pronouncer<BrowserSpeech>> {
        Rc::clone(&self.pronouncer)
    }

    pub fn current_word(&self) -> Option<String> {
        self.session.current_word().map(|w| w.word.clone())
    }
}
