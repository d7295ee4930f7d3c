mod api;
mod app;
mod config;
mod constants;
mod models;
mod screens;
mod state;
mod ui_components;
mod utils;

use api::DeezerClient;
use app::PreviewApp;
use config::AppConfig;
use constants::*;
use eframe::egui;
use state::{BackgroundTasks, PlaybackController, UIState};
use std::sync::Arc;
use utils::artwork::ArtworkCache;
use utils::async_helper::TaskRunner;
use utils::audio_controller::AudioController;

// App version and metadata
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_NAME: &str = "PreviewRS";
const APP_DESCRIPTION: &str = "Deezer Chart Browser";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG=debug for verbose output, RUST_LOG=info for normal logs
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("wgpu_core", log::LevelFilter::Warn)
        .filter_module("wgpu_hal", log::LevelFilter::Warn)
        .filter_module("naga", log::LevelFilter::Warn)
        .filter_module("eframe", log::LevelFilter::Warn)
        .init();

    log::info!("[Main] Starting {} v{}", APP_NAME, APP_VERSION);

    let config = AppConfig::from_env();
    log::info!("[Main] Catalog: {}", config.api_base_url);

    let catalog = Arc::new(DeezerClient::new(&config)?);
    let runner = TaskRunner::new(IO_WORKER_THREADS)?;
    let tasks = BackgroundTasks::new(catalog, runner);

    let (audio, audio_events) = AudioController::new(config.first_frame_timeout)?;
    let playback = PlaybackController::new(audio, audio_events, config.select_guard);

    let ui = UIState::new(ArtworkCache::new(utils::http::client(config.request_timeout)?));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("{} v{} - {}", APP_NAME, APP_VERSION, APP_DESCRIPTION))
            .with_inner_size([APP_WIDTH, APP_HEIGHT])
            .with_min_inner_size([960.0, 600.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |_cc| Ok(Box::new(PreviewApp::new(playback, tasks, ui)))),
    )?;

    log::info!("[Main] Bye");
    Ok(())
}
