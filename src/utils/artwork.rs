use crate::utils::async_helper::TaskRunner;
use eframe::egui;
use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{channel, Receiver, Sender};

/// Result of one cover download: the URL it was requested for and the decoded
/// image, or `None` when fetching or decoding failed
type ArtworkResult = (String, Option<egui::ColorImage>);

/// Cover textures keyed by URL.
///
/// Each URL is fetched at most once per session; failed covers are not
/// retried and render as a placeholder.
pub struct ArtworkCache {
    client: reqwest::Client,
    textures: HashMap<String, egui::TextureHandle>,
    requested: HashSet<String>,
    in_flight: usize,
    tx: Sender<ArtworkResult>,
    rx: Receiver<ArtworkResult>,
}

impl ArtworkCache {
    pub fn new(client: reqwest::Client) -> Self {
        let (tx, rx) = channel();
        Self {
            client,
            textures: HashMap::new(),
            requested: HashSet::new(),
            in_flight: 0,
            tx,
            rx,
        }
    }

    pub fn get(&self, url: &str) -> Option<&egui::TextureHandle> {
        self.textures.get(url)
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Mark `url` as requested; false when it is empty or was requested before
    fn begin(&mut self, url: &str) -> bool {
        if url.is_empty() || self.requested.contains(url) {
            return false;
        }
        self.requested.insert(url.to_string());
        self.in_flight += 1;
        true
    }

    /// Start a background fetch for `url` unless it is cached or pending
    pub fn request(&mut self, url: &str, runner: &TaskRunner) {
        if !self.begin(url) {
            return;
        }

        let client = self.client.clone();
        let url = url.to_string();
        runner.spawn_and_send(
            move || {
                Box::pin(async move {
                    let image = match fetch_bytes(&client, &url).await {
                        Ok(bytes) => match load_artwork_from_bytes(&bytes) {
                            Ok(img) => Some(img),
                            Err(e) => {
                                log::warn!("[Artwork] Failed to decode {}: {}", url, e);
                                None
                            }
                        },
                        Err(e) => {
                            log::warn!("[Artwork] Failed to fetch {}: {}", url, e);
                            None
                        }
                    };
                    (url, image)
                })
            },
            self.tx.clone(),
        );
    }

    /// Upload finished downloads as textures; returns true when anything arrived
    pub fn poll(&mut self, ctx: &egui::Context) -> bool {
        let mut arrived = false;
        while let Ok((url, image)) = self.rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            arrived = true;
            if let Some(img) = image {
                let texture = ctx.load_texture(url.clone(), img, egui::TextureOptions::LINEAR);
                self.textures.insert(url, texture);
            }
        }
        arrived
    }

    pub fn clear(&mut self) {
        self.textures.clear();
    }
}

async fn fetch_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, reqwest::Error> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

/// Decode JPEG/PNG bytes into an egui image
pub fn load_artwork_from_bytes(bytes: &[u8]) -> Result<egui::ColorImage, image::ImageError> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    let size = [img.width() as usize, img.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw()))
}
