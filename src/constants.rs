//! Application constants and configuration defaults

// === UI & Layout ===
pub const APP_WIDTH: f32 = 1280.0;
pub const APP_HEIGHT: f32 = 820.0;
pub const SIDEBAR_WIDTH: f32 = 240.0;
pub const ALBUM_CARD_SIZE: f32 = 160.0;
pub const TRACK_ROW_HEIGHT: f32 = 60.0;
pub const TRACK_COVER_SIZE: f32 = 48.0;
pub const PLAYER_BAR_HEIGHT: f32 = 88.0;
pub const REPAINT_INTERVAL_IDLE_MILLIS: u64 = 250;

// === Catalog ===
pub const DEFAULT_API_BASE: &str = "https://api.deezer.com";
pub const CHART_TRACKS_LIMIT: usize = 20;
pub const CHART_ALBUMS_LIMIT: usize = 12;
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
pub const IO_WORKER_THREADS: usize = 2;

// === Audio Playback ===
pub const FIRST_FRAME_TIMEOUT_SECS: u64 = 10;
pub const STREAM_STALL_TIMEOUT_SECS: u64 = 5;
pub const AUDIO_POLL_INTERVAL_MILLIS: u64 = 50;
pub const SELECT_GUARD_MILLIS: u64 = 250; // Coalesces a double click on a freshly loaded row
