// Progressive preview download + MP3 decode.

use crate::utils::errors::AudioError;
use futures_util::StreamExt;
use minimp3::{Decoder as Mp3Decoder, Frame};
use std::sync::mpsc::Sender;
use std::time::Duration;

/// One decoded MP3 frame, interleaved
#[derive(Debug)]
pub struct DecodedChunk {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
    pub channels: u16,
}

/// Download `url` and send decoded frames to `sample_tx` as bytes arrive.
///
/// Returns the number of frames sent. Stops early (with `Ok`) when the
/// receiver is dropped, which is how a replaced preview ends its download.
pub async fn stream_preview(
    url: &str,
    connect_timeout: Duration,
    sample_tx: &Sender<DecodedChunk>,
) -> Result<usize, AudioError> {
    let client = crate::utils::http::streaming_client(connect_timeout)
        .map_err(|e| AudioError::Stream(e.to_string()))?;

    log::debug!("[Streaming] Fetching preview {}", url);
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AudioError::Stream(e.to_string()))?;

    if !response.status().is_success() {
        return Err(AudioError::Stream(format!("HTTP {}", response.status())));
    }

    let mut mp3_buffer: Vec<u8> = Vec::new();
    let mut frames_sent = 0;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| AudioError::Stream(e.to_string()))?;
        mp3_buffer.extend_from_slice(&chunk);

        if !send_new_frames(&mp3_buffer, &mut frames_sent, sample_tx) {
            log::debug!("[Streaming] Preview replaced, stopping download");
            return Ok(frames_sent);
        }
    }

    // The last chunk may have completed a frame the loop already tried
    send_new_frames(&mp3_buffer, &mut frames_sent, sample_tx);

    log::debug!(
        "[Streaming] Preview complete: {} KB, {} frames",
        mp3_buffer.len() / 1024,
        frames_sent
    );

    if frames_sent == 0 {
        return Err(AudioError::Stream("no decodable audio in preview".to_string()));
    }
    Ok(frames_sent)
}

/// Decode the whole buffer and send only the frames not sent yet.
/// Returns false once the receiver is gone.
pub fn send_new_frames(buffer: &[u8], frames_sent: &mut usize, tx: &Sender<DecodedChunk>) -> bool {
    let mut decoder = Mp3Decoder::new(buffer);
    let mut frame_index = 0;

    while let Ok(Frame {
        data,
        sample_rate,
        channels,
        ..
    }) = decoder.next_frame()
    {
        if frame_index >= *frames_sent {
            let chunk = DecodedChunk {
                samples: data,
                sample_rate: sample_rate.max(1) as u32,
                channels: channels.max(1) as u16,
            };
            if tx.send(chunk).is_err() {
                return false;
            }
            *frames_sent = frame_index + 1;
        }
        frame_index += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    #[test]
    fn garbage_yields_no_frames() {
        let (tx, rx) = channel();
        let mut sent = 0;
        assert!(send_new_frames(&[0u8; 4096], &mut sent, &tx));
        assert_eq!(sent, 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn unreachable_preview_is_an_error() {
        let (tx, _rx) = channel();
        let result = stream_preview("http://127.0.0.1:9/preview.mp3", Duration::from_millis(500), &tx).await;
        assert!(matches!(result, Err(AudioError::Stream(_))));
    }
}
