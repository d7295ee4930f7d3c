use crate::constants::{AUDIO_POLL_INTERVAL_MILLIS, STREAM_STALL_TIMEOUT_SECS};
use crate::utils::errors::AudioError;
use crate::utils::media::{AudioEvent, AudioOutput};
use crate::utils::mediaplay::{PreviewPlayer, PreviewSource};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioCommand {
    Load { url: String, generation: u64 },
    Play,
    Pause,
    Stop,
}

/// Handle to the audio thread. Commands are queued on a channel and applied
/// one at a time in send order.
pub struct AudioController {
    command_tx: Sender<AudioCommand>,
}

impl AudioController {
    /// Spawn the audio thread; the returned receiver carries its events
    pub fn new(first_frame_timeout: Duration) -> Result<(Self, Receiver<AudioEvent>), AudioError> {
        let (command_tx, command_rx) = channel();
        let (event_tx, event_rx) = channel();
        let stall_timeout = Duration::from_secs(STREAM_STALL_TIMEOUT_SECS);

        std::thread::Builder::new()
            .name("previewrs-audio".to_string())
            .spawn(move || {
                let opener =
                    move |url: &str| PreviewPlayer::open(url, first_frame_timeout, stall_timeout);
                AudioWorker::new(opener, event_tx).run(command_rx);
            })
            .map_err(|e| AudioError::Runtime(format!("Failed to spawn audio thread: {}", e)))?;

        Ok((Self { command_tx }, event_rx))
    }

    fn send(&self, command: AudioCommand) {
        if self.command_tx.send(command).is_err() {
            log::error!("[AudioController] Audio thread is gone, command dropped");
        }
    }
}

impl AudioOutput for AudioController {
    fn load(&mut self, url: &str, generation: u64) {
        self.send(AudioCommand::Load {
            url: url.to_string(),
            generation,
        });
    }

    fn play(&mut self) {
        self.send(AudioCommand::Play);
    }

    fn pause(&mut self) {
        self.send(AudioCommand::Pause);
    }

    fn stop(&mut self) {
        self.send(AudioCommand::Stop);
    }
}

/// The loaded source. The player is opened on the first `Play` and reopened
/// when `Play` arrives after it ran out.
struct Loaded<P> {
    url: String,
    generation: u64,
    player: Option<P>,
    playing: bool,
    end_reported: bool,
}

/// State owned by the audio thread
struct AudioWorker<P, F> {
    open: F,
    event_tx: Sender<AudioEvent>,
    slot: Option<Loaded<P>>,
}

impl<P, F> AudioWorker<P, F>
where
    P: PreviewSource,
    F: FnMut(&str) -> Result<P, AudioError>,
{
    fn new(open: F, event_tx: Sender<AudioEvent>) -> Self {
        Self {
            open,
            event_tx,
            slot: None,
        }
    }

    fn run(mut self, command_rx: Receiver<AudioCommand>) {
        let poll = Duration::from_millis(AUDIO_POLL_INTERVAL_MILLIS);
        loop {
            match command_rx.recv_timeout(poll) {
                Ok(command) => self.handle(command),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    log::debug!("[AudioController] Controller dropped, audio thread exiting");
                    break;
                }
            }
            self.tick();
        }
    }

    fn handle(&mut self, command: AudioCommand) {
        match command {
            AudioCommand::Load { url, generation } => {
                // Old player (and its download) goes first
                if let Some(old) = self.slot.take() {
                    log::debug!("[AudioController] Releasing generation {}", old.generation);
                }
                log::debug!("[AudioController] Loaded generation {}: {}", generation, url);
                self.slot = Some(Loaded {
                    url,
                    generation,
                    player: None,
                    playing: false,
                    end_reported: false,
                });
            }
            AudioCommand::Play => {
                let Some(slot) = self.slot.as_mut() else {
                    log::warn!("[AudioController] Play without a loaded source");
                    return;
                };

                let needs_open = slot.player.as_ref().map_or(true, |p| p.is_finished());
                if needs_open {
                    slot.player = None;
                    match (self.open)(&slot.url) {
                        Ok(player) => slot.player = Some(player),
                        Err(e) => {
                            log::error!("[AudioController] Error loading audio: {}", e);
                            slot.playing = false;
                            let event = AudioEvent::Failed {
                                generation: slot.generation,
                                reason: e.to_string(),
                            };
                            self.emit(event);
                            return;
                        }
                    }
                }

                if let Some(player) = slot.player.as_mut() {
                    player.play();
                    slot.playing = true;
                    slot.end_reported = false;
                    log::info!("[AudioController] Playing generation {}", slot.generation);
                }
            }
            AudioCommand::Pause => {
                if let Some(slot) = self.slot.as_mut() {
                    if let Some(player) = slot.player.as_mut() {
                        player.pause();
                    }
                    slot.playing = false;
                }
            }
            AudioCommand::Stop => {
                self.slot = None;
            }
        }
    }

    /// Report a drained source once
    fn tick(&mut self) {
        let Some(slot) = self.slot.as_mut() else {
            return;
        };
        let finished = slot.player.as_ref().is_some_and(|p| p.is_finished());
        if slot.playing && !slot.end_reported && finished {
            slot.playing = false;
            slot.end_reported = true;
            let event = AudioEvent::Ended {
                generation: slot.generation,
            };
            log::info!("[AudioController] Generation {} finished", slot.generation);
            self.emit(event);
        }
    }

    fn emit(&self, event: AudioEvent) {
        if self.event_tx.send(event).is_err() {
            log::debug!("[AudioController] No event subscriber");
        }
    }
}
