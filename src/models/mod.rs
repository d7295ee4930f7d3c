// Data models for Deezer catalog entities

pub mod album;
pub mod responses;
pub mod track;

// Re-export commonly used types
pub use album::Album;
pub use responses::parse_data_envelope;
pub use track::{AlbumRef, ArtistRef, Track};
