pub mod background_tasks;
pub mod content_state;
pub mod playback_state;
pub mod search_state;
pub mod ui_state;

pub use background_tasks::BackgroundTasks;
pub use content_state::ContentState;
pub use playback_state::{PlaybackController, PlaybackStatus};
pub use search_state::SearchState;
pub use ui_state::UIState;
