use crate::models::Track;
use crate::utils::media::{AudioEvent, AudioOutput};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Stopped, // Nothing ever selected, no transport bar
    Paused,  // Track selected, silent
    Playing, // Track selected, output running
}

/// Single-slot selection and transport for track previews.
///
/// Owns the one audio output. Every source load bumps `generation`; device
/// events carrying an older generation belong to a replaced source and are
/// ignored.
pub struct PlaybackController<O: AudioOutput> {
    output: O,
    events: Receiver<AudioEvent>,
    current: Option<Track>,
    is_playing: bool,
    generation: u64,
    loaded_at: Option<Instant>,
    select_guard: Duration,
    last_error: Option<String>,
}

impl<O: AudioOutput> PlaybackController<O> {
    /// `events` is the output's notification channel; the controller is its
    /// only consumer
    pub fn new(output: O, events: Receiver<AudioEvent>, select_guard: Duration) -> Self {
        Self {
            output,
            events,
            current: None,
            is_playing: false,
            generation: 0,
            loaded_at: None,
            select_guard,
            last_error: None,
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        match (&self.current, self.is_playing) {
            (None, _) => PlaybackStatus::Stopped,
            (Some(_), true) => PlaybackStatus::Playing,
            (Some(_), false) => PlaybackStatus::Paused,
        }
    }

    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_current(&self, track_id: u64) -> bool {
        self.current.as_ref().is_some_and(|t| t.id == track_id)
    }

    /// Reason the current preview could not be played, if it failed
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[cfg(test)]
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Row click or transport click
    pub fn select(&mut self, track: &Track) {
        self.select_at(track, Instant::now());
    }

    pub fn select_at(&mut self, track: &Track, now: Instant) {
        let same_track = self.current.as_ref().is_some_and(|c| c.same_track(track));

        if !same_track {
            self.load_and_play(track, now);
            return;
        }

        // A repeat of the click that just loaded this track is the same gesture
        if let Some(loaded_at) = self.loaded_at {
            if now.saturating_duration_since(loaded_at) < self.select_guard {
                log::debug!("[Playback] Coalescing repeated select of track {}", track.id);
                return;
            }
        }

        if self.is_playing {
            log::info!("[Playback] Pausing track {}", track.id);
            self.output.pause();
            self.is_playing = false;
        } else {
            log::info!("[Playback] Resuming track {}", track.id);
            self.last_error = None;
            self.output.play();
            self.is_playing = true;
        }
    }

    fn load_and_play(&mut self, track: &Track, now: Instant) {
        self.generation += 1;
        log::info!(
            "[Playback] Loading '{}' by {} (track {}, generation {})",
            track.title,
            track.artist.name,
            track.id,
            self.generation
        );

        self.output.load(&track.preview, self.generation);
        self.output.play();

        self.current = Some(track.clone());
        self.is_playing = true;
        self.loaded_at = Some(now);
        self.last_error = None;
    }

    /// Drain device notifications; called once per frame
    pub fn poll_events(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(event) => self.handle_event(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.is_playing {
                        log::error!("[Playback] Audio output disconnected");
                        self.is_playing = false;
                        self.last_error = Some("Audio output stopped".to_string());
                    }
                    break;
                }
            }
        }
    }

    pub fn handle_event(&mut self, event: AudioEvent) {
        if self.current.is_none() || event.generation() != self.generation {
            log::debug!(
                "[Playback] Ignoring event for generation {} (current {})",
                event.generation(),
                self.generation
            );
            return;
        }

        match event {
            AudioEvent::Ended { .. } => {
                log::info!("[Playback] Preview finished");
                self.is_playing = false;
            }
            AudioEvent::Failed { reason, .. } => {
                log::warn!("[Playback] Preview failed: {}", reason);
                self.is_playing = false;
                self.last_error = Some(reason);
            }
        }
    }

    /// Silence the output before the app exits
    pub fn shutdown(&mut self) {
        self.output.stop();
        self.is_playing = false;
    }
}


#[cfg(test)]
mod tests {
    use super::fake::{Command, FakeOutput};
    use super::*;
    use crate::api::catalog::fake::track;
    use std::sync::mpsc::{channel, Sender};

    const GUARD: Duration = Duration::from_millis(250);

    fn controller() -> (PlaybackController<FakeOutput>, Sender<AudioEvent>) {
        let (tx, rx) = channel();
        (PlaybackController::new(FakeOutput::default(), rx, GUARD), tx)
    }

    fn later(t: Instant, millis: u64) -> Instant {
        t + Duration::from_millis(millis)
    }

    #[test]
    fn starts_stopped() {
        let (pc, _tx) = controller();
        assert_eq!(pc.status(), PlaybackStatus::Stopped);
        assert!(pc.current().is_none());
        assert!(!pc.is_playing());
    }

    #[test]
    fn select_from_stopped_loads_and_plays() {
        let (mut pc, _tx) = controller();
        let t = track(1, "One");
        pc.select(&t);

        assert_eq!(pc.status(), PlaybackStatus::Playing);
        assert!(pc.is_current(1));
        assert_eq!(
            pc.output().commands,
            vec![Command::Load(t.preview.clone(), 1), Command::Play]
        );
    }

    #[test]
    fn double_select_from_stopped_is_idempotent() {
        let (mut pc, _tx) = controller();
        let t = track(1, "One");
        let t0 = Instant::now();

        pc.select_at(&t, t0);
        pc.select_at(&t, later(t0, 40));

        assert_eq!(pc.status(), PlaybackStatus::Playing);
        assert!(pc.is_current(1));
        assert_eq!(pc.output().loads(), 1);
        assert_eq!(pc.output().commands.len(), 2);
    }

    #[test]
    fn toggle_round_trip() {
        let (mut pc, _tx) = controller();
        let t = track(1, "One");
        let t0 = Instant::now();
        pc.select_at(&t, t0);

        pc.select_at(&t, later(t0, 1_000));
        assert_eq!(pc.status(), PlaybackStatus::Paused);
        assert!(pc.output().audible_url().is_none());

        pc.select_at(&t, later(t0, 1_010));
        assert_eq!(pc.status(), PlaybackStatus::Playing);
        assert!(pc.is_current(1));
        assert_eq!(pc.output().loads(), 1);
        assert_eq!(pc.output().audible_url(), Some(t.preview.as_str()));
    }

    #[test]
    fn switching_replaces_the_source() {
        let (mut pc, _tx) = controller();
        let t1 = track(1, "One");
        let t2 = track(2, "Two");
        let t0 = Instant::now();

        pc.select_at(&t1, t0);
        pc.select_at(&t2, later(t0, 10));

        assert_eq!(pc.status(), PlaybackStatus::Playing);
        assert!(pc.is_current(2));
        assert_eq!(pc.output().audible_url(), Some(t2.preview.as_str()));
        assert_eq!(pc.output().loads(), 2);
    }

    #[test]
    fn switching_from_paused_plays_new_track() {
        let (mut pc, _tx) = controller();
        let t1 = track(1, "One");
        let t2 = track(2, "Two");
        let t0 = Instant::now();

        pc.select_at(&t1, t0);
        pc.select_at(&t1, later(t0, 1_000));
        assert_eq!(pc.status(), PlaybackStatus::Paused);

        pc.select_at(&t2, later(t0, 1_010));
        assert_eq!(pc.status(), PlaybackStatus::Playing);
        assert!(pc.is_current(2));
    }

    #[test]
    fn natural_end_pauses_and_keeps_selection() {
        let (mut pc, tx) = controller();
        let t = track(1, "One");
        let t0 = Instant::now();
        pc.select_at(&t, t0);

        tx.send(AudioEvent::Ended { generation: 1 }).unwrap();
        pc.poll_events();

        assert_eq!(pc.status(), PlaybackStatus::Paused);
        assert!(pc.is_current(1));

        pc.select_at(&t, later(t0, 31_000));
        assert_eq!(pc.status(), PlaybackStatus::Playing);
        assert_eq!(pc.output().commands.last(), Some(&Command::Play));
    }

    #[test]
    fn end_of_replaced_source_is_ignored() {
        let (mut pc, tx) = controller();
        let t0 = Instant::now();
        pc.select_at(&track(1, "One"), t0);
        pc.select_at(&track(2, "Two"), later(t0, 10));

        tx.send(AudioEvent::Ended { generation: 1 }).unwrap();
        pc.poll_events();

        assert_eq!(pc.status(), PlaybackStatus::Playing);
        assert!(pc.is_current(2));
    }

    #[test]
    fn failed_preview_pauses_with_reason() {
        let (mut pc, tx) = controller();
        let t0 = Instant::now();
        let t = track(1, "One");
        pc.select_at(&t, t0);

        tx.send(AudioEvent::Failed {
            generation: 1,
            reason: "track has no preview".to_string(),
        })
        .unwrap();
        pc.poll_events();

        assert_eq!(pc.status(), PlaybackStatus::Paused);
        assert!(pc.is_current(1));
        assert_eq!(pc.last_error(), Some("track has no preview"));

        // Retrying clears the error
        pc.select_at(&t, later(t0, 2_000));
        assert_eq!(pc.status(), PlaybackStatus::Playing);
        assert!(pc.last_error().is_none());
    }

    #[test]
    fn events_before_any_selection_are_ignored() {
        let (mut pc, tx) = controller();
        tx.send(AudioEvent::Ended { generation: 0 }).unwrap();
        pc.poll_events();
        assert_eq!(pc.status(), PlaybackStatus::Stopped);
    }

    #[test]
    fn disconnected_output_stops_playing() {
        let (mut pc, tx) = controller();
        pc.select(&track(1, "One"));
        drop(tx);
        pc.poll_events();
        assert_eq!(pc.status(), PlaybackStatus::Paused);
        assert!(pc.last_error().is_some());
    }

    #[test]
    fn shutdown_stops_output() {
        let (mut pc, _tx) = controller();
        pc.select(&track(1, "One"));
        pc.shutdown();
        assert_eq!(pc.output().commands.last(), Some(&Command::Stop));
        assert!(!pc.is_playing());
    }
}
