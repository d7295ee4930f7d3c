/// Commands accepted by an audio output, applied strictly in call order
pub trait AudioOutput {
    /// Replace the current source with `url`, paused. `generation` tags the
    /// events this source will produce.
    fn load(&mut self, url: &str, generation: u64);
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
}

/// Notifications emitted by the audio output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioEvent {
    /// The source played to its natural end
    Ended { generation: u64 },
    /// The source could not be opened or played
    Failed { generation: u64, reason: String },
}

impl AudioEvent {
    pub fn generation(&self) -> u64 {
        match self {
            AudioEvent::Ended { generation } | AudioEvent::Failed { generation, .. } => *generation,
        }
    }
}
