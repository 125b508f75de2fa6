pub mod controller;
pub mod state;
pub mod view;

pub use controller::SessionController;
pub use state::{Phase, SessionState};
pub use view::{level_cards, render, CardView, LevelCardView, PracticeView, SummaryView};
