use eframe::egui;
use log::info;
use std::time::Duration;

// State modules
use crate::state::{BackgroundTasks, ContentState, PlaybackController, SearchState, UIState};
use crate::utils::audio_controller::AudioController;
use crate::utils::media::AudioOutput;

// Constants
use crate::constants::*;

pub struct PreviewApp<O: AudioOutput = AudioController> {
    // Track list (query buffer, results, loading phase)
    pub search: SearchState,

    // Current track and transport
    pub playback: PlaybackController<O>,

    // Album shelf
    pub content: ContentState,

    // UI state (navigation, artwork, shutdown)
    pub ui: UIState,

    // Background tasks (catalog requests in flight)
    pub tasks: BackgroundTasks,
}

impl<O: AudioOutput> PreviewApp<O> {
    /// Build the app and issue the startup chart and album requests
    pub fn new(playback: PlaybackController<O>, tasks: BackgroundTasks, ui: UIState) -> Self {
        let mut app = Self {
            search: SearchState::default(),
            playback,
            content: ContentState::default(),
            ui,
            tasks,
        };
        app.start();
        app
    }

    fn start(&mut self) {
        info!("[App] Loading chart tracks and albums");
        let request = self.search.load_initial();
        self.tasks.dispatch_search(request);

        self.tasks.request_albums();
        self.content.albums_loading = true;
    }

    /// Search bar Enter: search the buffered text, or reload the chart when blank
    pub fn submit_search(&mut self) {
        let request = self.search.submit();
        self.tasks.dispatch_search(request);
    }

    /// Row click on the track list
    pub fn select_result(&mut self, index: usize) {
        if let Some(track) = self.search.results().get(index).cloned() {
            self.playback.select(&track);
        }
    }

    /// Transport button and Space: select the current track again
    pub fn toggle_playback(&mut self) {
        if let Some(track) = self.playback.current().cloned() {
            self.playback.select(&track);
        }
    }

    /// Fetch a cover in the background unless it is cached or pending
    pub fn request_artwork(&mut self, url: &str) {
        self.ui.artwork.request(url, self.tasks.runner());
    }

    /// Apply whatever finished since the last frame; true when lists changed
    pub fn poll_background(&mut self) -> bool {
        let mut changed = self.tasks.poll_search(&mut self.search) > 0;

        if let Some(albums) = self.tasks.poll_albums() {
            self.content.set_albums(albums);
            changed = true;
        }

        self.playback.poll_events();
        changed
    }

    /// Anything that needs frames while no input arrives
    fn is_active(&self) -> bool {
        self.search.is_loading()
            || self.tasks.albums_pending()
            || self.ui.artwork.is_loading()
            || self.playback.is_playing()
    }

    /// Space toggles playback unless a text field has the keyboard
    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.toggle_playback();
        }
    }

    fn cleanup(&mut self) {
        info!("[Shutdown] Stopping audio playback...");
        self.playback.shutdown();

        info!("[Shutdown] Clearing texture caches...");
        self.ui.artwork.clear();

        info!("[Shutdown] Cleanup complete");
    }
}

impl<O: AudioOutput> eframe::App for PreviewApp<O> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) && !self.ui.is_shutting_down {
            self.ui.is_shutting_down = true;
            self.cleanup();
        }

        // Dark theme
        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(crate::ui_components::colors::TEXT_PRIMARY);
        visuals.panel_fill = crate::ui_components::colors::BG_MAIN;
        visuals.window_fill = crate::ui_components::colors::BG_CARD;
        visuals.extreme_bg_color = crate::ui_components::colors::BG_INPUT;
        ctx.set_visuals(visuals);

        ctx.style_mut(|style| {
            style.interaction.selectable_labels = false;
        });

        // Check for search results, albums and audio events
        if self.poll_background() {
            ctx.request_repaint();
        }

        // Check for artwork updates
        if self.ui.artwork.poll(ctx) {
            ctx.request_repaint();
        }

        self.handle_keyboard_shortcuts(ctx);

        crate::ui_components::layout::render_with_layout(self, ctx);

        let repaint_interval = if self.is_active() {
            Duration::from_millis(AUDIO_POLL_INTERVAL_MILLIS)
        } else {
            Duration::from_millis(REPAINT_INTERVAL_IDLE_MILLIS)
        };
        ctx.request_repaint_after(repaint_interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::catalog::fake::FakeCatalog;
    use crate::state::playback_state::fake::{Command, FakeOutput};
    use crate::state::search_state::SearchPhase;
    use crate::state::PlaybackStatus;
    use crate::utils::artwork::ArtworkCache;
    use crate::utils::async_helper::TaskRunner;
    use crate::utils::media::AudioEvent;
    use std::sync::mpsc::{channel, Sender};
    use std::sync::Arc;
    use std::time::Instant;

    fn app() -> (PreviewApp<FakeOutput>, Sender<AudioEvent>) {
        let (event_tx, event_rx) = channel();
        let playback = PlaybackController::new(FakeOutput::default(), event_rx, Duration::ZERO);
        let tasks = BackgroundTasks::new(Arc::new(FakeCatalog::default()), TaskRunner::new(1).unwrap());
        let ui = UIState::new(ArtworkCache::new(reqwest::Client::new()));
        (PreviewApp::new(playback, tasks, ui), event_tx)
    }

    /// Poll like the frame loop would until `done` holds or five seconds pass
    fn settle(app: &mut PreviewApp<FakeOutput>, done: impl Fn(&PreviewApp<FakeOutput>) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !done(app) && Instant::now() < deadline {
            app.poll_background();
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    fn last_generation(app: &PreviewApp<FakeOutput>) -> u64 {
        app.playback
            .output()
            .commands
            .iter()
            .rev()
            .find_map(|c| match c {
                Command::Load(_, generation) => Some(*generation),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn startup_loads_chart_and_albums() {
        let (mut app, _tx) = app();
        assert!(app.search.is_loading());
        assert!(app.content.albums_loading);

        settle(&mut app, |a| !a.search.is_loading() && !a.content.albums_loading);

        assert_eq!(app.search.results().len(), 20);
        assert_eq!(app.content.albums.len(), 12);
        assert_eq!(app.search.heading(), "Top Tracks");
        assert_eq!(app.playback.status(), PlaybackStatus::Stopped);
    }

    #[test]
    fn search_select_end_and_replay() {
        let (mut app, tx) = app();
        settle(&mut app, |a| !a.search.is_loading());

        app.search.set_query("daft punk");
        app.submit_search();
        assert_eq!(app.search.phase(), SearchPhase::Loading);
        settle(&mut app, |a| !a.search.is_loading());
        assert_eq!(app.search.phase(), SearchPhase::Ready);
        assert_eq!(app.search.heading(), "Search Results");

        let third = app.search.results()[2].clone();
        app.select_result(2);
        assert_eq!(app.playback.status(), PlaybackStatus::Playing);
        assert!(app.playback.is_current(third.id));

        tx.send(AudioEvent::Ended {
            generation: last_generation(&app),
        })
        .unwrap();
        app.poll_background();
        assert_eq!(app.playback.status(), PlaybackStatus::Paused);
        assert!(app.playback.is_current(third.id));

        app.select_result(2);
        assert_eq!(app.playback.status(), PlaybackStatus::Playing);
        assert_eq!(app.playback.output().loads(), 1);
    }

    #[test]
    fn current_track_survives_a_new_search() {
        let (mut app, _tx) = app();
        settle(&mut app, |a| !a.search.is_loading());
        let first = app.search.results()[0].clone();
        app.select_result(0);

        app.search.set_query("something else");
        app.submit_search();
        settle(&mut app, |a| !a.search.is_loading());

        assert!(app.playback.is_current(first.id));
        assert!(!app.search.results().iter().any(|t| t.same_track(&first)));
        assert_eq!(app.playback.status(), PlaybackStatus::Playing);
    }

    #[test]
    fn toggle_playback_without_selection_does_nothing() {
        let (mut app, _tx) = app();
        app.toggle_playback();
        assert_eq!(app.playback.status(), PlaybackStatus::Stopped);
        assert!(app.playback.output().commands.is_empty());
    }

    #[test]
    fn toggle_playback_pauses_and_resumes_current() {
        let (mut app, _tx) = app();
        settle(&mut app, |a| !a.search.is_loading());
        app.select_result(4);

        app.toggle_playback();
        assert_eq!(app.playback.status(), PlaybackStatus::Paused);
        app.toggle_playback();
        assert_eq!(app.playback.status(), PlaybackStatus::Playing);
    }

    #[test]
    fn out_of_range_row_is_ignored() {
        let (mut app, _tx) = app();
        app.select_result(99);
        assert_eq!(app.playback.status(), PlaybackStatus::Stopped);
    }
}
