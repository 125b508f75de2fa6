//! Browser bridge for vocab-deck.
//!
//! The page calls `trainer_init` once, optionally `trainer_configure`, then
//! boots either the level index or a practice session. During practice it
//! forwards pointer and key input, calls `trainer_tick(dt)` every animation
//! frame and re-renders from `trainer_view()` whenever the tick reports a
//! change.

pub mod fetch;
pub mod page;
pub mod runner;
pub mod speech;
pub mod storage;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Float32Array, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use vocab_deck::catalog::load;
use vocab_deck::{
    level_cards, render, InputEvent, Level, LevelCatalog, ProgressStore, Pronouncer,
    SessionController, Theme, ThemePrefs, TrainerConfig,
};

use fetch::FetchSource;
use runner::SessionRunner;
use speech::BrowserSpeech;
use storage::LocalStorage;

#[derive(Default)]
struct Bridge {
    config: TrainerConfig,
    runner: Option<SessionRunner>,
}

thread_local! {
    static BRIDGE: RefCell<Bridge> = RefCell::new(Bridge::default());
}

/// Run `f` against the practice session. Before `trainer_boot_practice` has
/// resolved there is none, and the call is a no-op returning `R::default()`.
fn with_runner<R: Default>(f: impl FnOnce(&mut SessionRunner) -> R) -> R {
    BRIDGE.with(|cell| match cell.borrow_mut().runner.as_mut() {
        Some(runner) => f(runner),
        None => R::default(),
    })
}

fn config() -> TrainerConfig {
    BRIDGE.with(|cell| cell.borrow().config.clone())
}

async fn load_catalog(config: &TrainerConfig) -> LevelCatalog {
    load(&FetchSource::new(&config.catalog_path)).await
}

fn apply_stored_theme(store: &LocalStorage, config: &TrainerConfig) {
    page::apply(ThemePrefs::new(store.clone(), &config.storage).load());
}

fn to_js(json: Result<String, serde_json::Error>) -> Result<JsValue, JsValue> {
    json.map(JsValue::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub fn trainer_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("vocab-deck: initialized");
}

/// Override any subset of the defaults with a JSON document.
#[wasm_bindgen]
pub fn trainer_configure(json: &str) {
    match TrainerConfig::from_json(json) {
        Ok(config) => BRIDGE.with(|cell| cell.borrow_mut().config = config),
        Err(e) => log::warn!("config: ignoring invalid configuration: {e}"),
    }
}

/// Load the catalog and resolve to the level cards of the index page (JSON).
#[wasm_bindgen]
pub fn trainer_boot_index() -> Promise {
    future_to_promise(async move {
        let config = config();
        let catalog = load_catalog(&config).await;
        let store = LocalStorage::open();
        apply_stored_theme(&store, &config);

        let progress = ProgressStore::new(store, &config.storage);
        to_js(serde_json::to_string(&level_cards(&catalog, &progress)))
    })
}

/// Load the catalog, open the level named by the `level` query parameter and
/// resolve to its first view (JSON).
#[wasm_bindgen]
pub fn trainer_boot_practice() -> Promise {
    future_to_promise(async move {
        let config = config();
        let catalog = load_catalog(&config).await;
        let store = LocalStorage::open();
        apply_stored_theme(&store, &config);

        let id = page::query_level().unwrap_or_else(|| config.default_level.clone());
        let level = catalog.level(&id).cloned().unwrap_or_else(|| {
            log::warn!("practice: level {id} is not in the catalog");
            Level::new(id.clone(), Vec::new())
        });

        let progress = ProgressStore::new(store, &config.storage);
        let session = SessionController::new(level, progress, &config);
        let view = serde_json::to_string(&render(&session));

        let pronouncer = Rc::new(Pronouncer::new(BrowserSpeech, &config.speech));
        let runner = SessionRunner::new(session, pronouncer);
        BRIDGE.with(|cell| cell.borrow_mut().runner = Some(runner));
        to_js(view)
    })
}

#[wasm_bindgen]
pub fn trainer_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn trainer_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn trainer_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn trainer_pointer_cancel() {
    with_runner(|r| r.push_input(InputEvent::PointerCancel));
}

#[wasm_bindgen]
pub fn trainer_key_down(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
}

/// See `vocab_deck::custom_kind`.
#[wasm_bindgen]
pub fn trainer_custom_event(kind: u32) {
    with_runner(|r| r.push_input(InputEvent::Custom { kind }));
}

/// Advance one frame. True when the page should re-read the view.
#[wasm_bindgen]
pub fn trainer_tick(dt: f32) -> bool {
    with_runner(|r| r.tick(dt))
}

#[wasm_bindgen]
pub fn trainer_view() -> String {
    with_runner(|r| r.view_json())
}

/// Events of the last tick, four floats each: kind, a, b, c.
#[wasm_bindgen]
pub fn trainer_events() -> Float32Array {
    let events = with_runner(|r| r.events().to_vec());
    Float32Array::from(events.as_slice())
}

/// Pronounce the word on screen. Resolves once playback has started, or at
/// once when nothing could be played.
#[wasm_bindgen]
pub fn trainer_speak() -> Promise {
    let target = with_runner(|r| r.current_word().map(|w| (r.pronouncer(), w)));
    future_to_promise(async move {
        if let Some((pronouncer, word)) = target {
            let spoken = pronouncer.speak(&word).await;
            log::debug!("speech: {word} -> {spoken:?}");
        }
        Ok(JsValue::UNDEFINED)
    })
}

/// CSS class of the stored theme.
#[wasm_bindgen]
pub fn trainer_theme() -> String {
    let config = config();
    ThemePrefs::new(LocalStorage::open(), &config.storage)
        .load()
        .css_class()
        .to_string()
}

/// Apply and persist a theme given by its CSS class.
#[wasm_bindgen]
pub fn trainer_set_theme(name: &str) {
    let Some(theme) = Theme::from_css_class(name) else {
        log::warn!("theme: unknown theme {name:?}");
        return;
    };
    page::apply(theme);
    let config = config();
    if let Err(e) = ThemePrefs::new(LocalStorage::open(), &config.storage).save(theme) {
        log::warn!("theme: could not save preference: {e}");
    }
}
