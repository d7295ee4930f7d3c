use crate::utils::errors::AudioError;
use crate::utils::media::core::{stream_preview, DecodedChunk};
use rodio::{OutputStream, Sink, Source};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Something the audio thread can start, pause and watch for its end
pub trait PreviewSource {
    fn play(&mut self);
    fn pause(&mut self);
    fn is_finished(&self) -> bool;
}

/// One preview on one rodio sink; dropping it silences the output and ends the
/// download thread
pub struct PreviewPlayer {
    sink: Sink,
    _stream: OutputStream,
}

/// Progressive streaming source fed by decoded MP3 frames
struct StreamingSource {
    sample_rx: Receiver<DecodedChunk>,
    current_samples: Vec<i16>,
    sample_index: usize,
    sample_rate: u32,
    channels: u16,
    last_sample_time: Instant,
    last_pull: Instant,
    stall_timeout: Duration,
    done: bool,
}

impl StreamingSource {
    fn new(first: DecodedChunk, sample_rx: Receiver<DecodedChunk>, stall_timeout: Duration) -> Self {
        let now = Instant::now();
        Self {
            sample_rx,
            current_samples: first.samples,
            sample_index: 0,
            sample_rate: first.sample_rate,
            channels: first.channels,
            last_sample_time: now,
            last_pull: now,
            stall_timeout,
            done: false,
        }
    }
}

impl Iterator for StreamingSource {
    type Item = i16;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        // A long gap between pulls means the sink was paused, not that the stream stalled
        let now = Instant::now();
        if now.duration_since(self.last_pull) > Duration::from_secs(1) {
            self.last_sample_time = now;
        }
        self.last_pull = now;

        if self.sample_index < self.current_samples.len() {
            let sample = self.current_samples[self.sample_index];
            self.sample_index += 1;
            return Some(sample);
        }

        loop {
            match self.sample_rx.try_recv() {
                Ok(chunk) => {
                    if chunk.samples.is_empty() {
                        continue;
                    }
                    self.current_samples = chunk.samples;
                    self.sample_index = 1;
                    self.last_sample_time = now;
                    return Some(self.current_samples[0]);
                }
                Err(TryRecvError::Empty) => {
                    if self.last_sample_time.elapsed() > self.stall_timeout {
                        log::error!("[StreamingSource] Stream timeout detected - ending playback");
                        self.done = true;
                        return None;
                    }
                    // Yield silence while the download catches up
                    return Some(0);
                }
                Err(TryRecvError::Disconnected) => {
                    self.done = true;
                    return None;
                }
            }
        }
    }
}

impl Source for StreamingSource {
    fn current_frame_len(&self) -> Option<usize> {
        None // Unknown for streaming
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

impl PreviewPlayer {
    /// Start downloading `url` and return a paused player once the first
    /// frame has been decoded
    pub fn open(
        url: &str,
        first_frame_timeout: Duration,
        stall_timeout: Duration,
    ) -> Result<Self, AudioError> {
        if url.trim().is_empty() {
            return Err(AudioError::MissingPreview);
        }

        let (sample_tx, sample_rx): (Sender<DecodedChunk>, Receiver<DecodedChunk>) = channel();
        let failure: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
        spawn_download(url.to_string(), first_frame_timeout, sample_tx, Arc::clone(&failure))?;

        let first = match sample_rx.recv_timeout(first_frame_timeout) {
            Ok(chunk) => chunk,
            Err(RecvTimeoutError::Timeout) => return Err(AudioError::Timeout(first_frame_timeout)),
            Err(RecvTimeoutError::Disconnected) => {
                let reason = crate::utils::error_handling::safe_lock(&failure, "PreviewPlayer")
                    .take()
                    .unwrap_or_else(|| "stream closed before any audio".to_string());
                return Err(AudioError::Stream(reason));
            }
        };

        log::info!(
            "[PreviewPlayer] Streaming {} Hz, {} ch",
            first.sample_rate,
            first.channels
        );

        let (_stream, stream_handle) = OutputStream::try_default()?;
        let sink = Sink::try_new(&stream_handle)?;
        sink.pause();
        sink.append(StreamingSource::new(first, sample_rx, stall_timeout));

        Ok(Self { sink, _stream })
    }
}

impl PreviewSource for PreviewPlayer {
    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn is_finished(&self) -> bool {
        self.sink.empty()
    }
}

impl Drop for PreviewPlayer {
    fn drop(&mut self) {
        self.sink.stop();
    }
}

fn spawn_download(
    url: String,
    connect_timeout: Duration,
    sample_tx: Sender<DecodedChunk>,
    failure: Arc<Mutex<Option<String>>>,
) -> Result<(), AudioError> {
    std::thread::Builder::new()
        .name("previewrs-stream".to_string())
        .spawn(move || {
            let rt = match crate::utils::error_handling::create_runtime() {
                Ok(r) => r,
                Err(e) => {
                    log::error!("[Streaming] {}", e);
                    *crate::utils::error_handling::safe_lock(&failure, "Streaming") = Some(e);
                    return;
                }
            };

            // `sample_tx` outlives the stream so the failure is recorded before
            // the receiver sees the channel close
            if let Err(e) = rt.block_on(stream_preview(&url, connect_timeout, &sample_tx)) {
                log::warn!("[Streaming] {}", e);
                *crate::utils::error_handling::safe_lock(&failure, "Streaming") = Some(e.to_string());
            }
            drop(sample_tx);
        })
        .map(|_| ())
        .map_err(|e| AudioError::Runtime(format!("Failed to spawn stream thread: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(samples: Vec<i16>) -> DecodedChunk {
        DecodedChunk {
            samples,
            sample_rate: 44_100,
            channels: 2,
        }
    }

    #[test]
    fn source_plays_chunks_then_ends_when_download_closes() {
        let (tx, rx) = channel();
        tx.send(chunk(vec![3, 4])).unwrap();
        tx.send(chunk(Vec::new())).unwrap();
        tx.send(chunk(vec![5])).unwrap();
        drop(tx);

        let source = StreamingSource::new(chunk(vec![1, 2]), rx, Duration::from_secs(5));
        assert_eq!(source.sample_rate(), 44_100);
        assert_eq!(source.channels(), 2);

        let samples: Vec<i16> = source.collect();
        assert_eq!(samples, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn source_yields_silence_while_buffering() {
        let (tx, rx) = channel();
        let mut source = StreamingSource::new(chunk(vec![7]), rx, Duration::from_secs(5));
        assert_eq!(source.next(), Some(7));
        assert_eq!(source.next(), Some(0));

        tx.send(chunk(vec![8])).unwrap();
        assert_eq!(source.next(), Some(8));
    }

    #[test]
    fn source_ends_after_stall() {
        let (_tx, rx) = channel();
        let mut source = StreamingSource::new(chunk(Vec::new()), rx, Duration::ZERO);
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(source.next(), None);
        assert_eq!(source.next(), None);
    }

    #[test]
    fn empty_url_is_missing_preview() {
        let result = PreviewPlayer::open("  ", Duration::from_secs(1), Duration::from_secs(1));
        assert!(matches!(result, Err(AudioError::MissingPreview)));
    }

    #[test]
    fn unreachable_url_fails_before_touching_the_device() {
        let result = PreviewPlayer::open(
            "http://127.0.0.1:9/preview.mp3",
            Duration::from_secs(5),
            Duration::from_secs(1),
        );
        assert!(matches!(result, Err(AudioError::Stream(_))));
    }
}
