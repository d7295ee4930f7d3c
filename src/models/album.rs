use super::ArtistRef;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Album {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub cover_medium: String,
    pub artist: ArtistRef,
}
