pub mod gesture;
pub mod queue;
