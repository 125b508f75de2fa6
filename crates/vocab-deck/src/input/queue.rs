/// Input events the trainer understands, in page (CSS pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at (x, y).
    PointerDown { x: f32, y: f32 },
    /// The pointer moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// The touch/click ended at (x, y).
    PointerUp { x: f32, y: f32 },
    /// The browser took the pointer away (scroll, lost capture).
    PointerCancel,
    /// A key was pressed. Uses DOM `keyCode` values, see [`key_code`].
    KeyDown { key_code: u32 },
    /// A command from a page button. See [`custom_kind`].
    Custom { kind: u32 },
}

/// DOM key codes with a meaning on the practice page.
pub mod key_code {
    pub const SPACE: u32 = 32;
    pub const ARROW_LEFT: u32 = 37;
    pub const ARROW_UP: u32 = 38;
    pub const ARROW_RIGHT: u32 = 39;
    pub const ARROW_DOWN: u32 = 40;
}

/// Custom command kinds (JS → Rust).
pub mod custom_kind {
    /// Clear the level's progress and start over.
    pub const RESET: u32 = 1;
    /// Pronounce the current word.
    pub const SPEAK: u32 = 2;
}

/// A queue of input events.
/// JS writes events into the queue; the runner drains it every frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take the pending events, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
