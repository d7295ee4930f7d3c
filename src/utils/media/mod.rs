pub mod core;
pub mod engine;

pub use engine::{AudioEvent, AudioOutput};
