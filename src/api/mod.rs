// Deezer catalog client modules

pub mod catalog;
pub mod deezer;

// Re-export commonly used types
pub use catalog::{CatalogApi, CatalogFuture};
pub use deezer::DeezerClient;
