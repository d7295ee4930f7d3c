use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ArtistRef {
    pub name: String,
}

/// Album reference embedded in a track (only what the track list shows)
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct AlbumRef {
    pub title: String,
    #[serde(default)]
    pub cover_medium: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Track {
    pub id: u64,
    pub title: String,
    pub artist: ArtistRef,
    pub album: AlbumRef,
    #[serde(default)]
    pub duration: u32, // Whole seconds
    #[serde(default)]
    pub preview: String, // 30s MP3 clip, empty when the service has none
}

impl Track {
    /// Tracks are identified by their catalog id alone
    pub fn same_track(&self, other: &Track) -> bool {
        self.id == other.id
    }

    pub fn has_preview(&self) -> bool {
        !self.preview.trim().is_empty()
    }
}
