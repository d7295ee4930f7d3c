//! The catalog seam: everything the app asks of the remote service.

use crate::models::{Album, Track};
use std::future::Future;
use std::pin::Pin;

/// Boxed `Send` future so the trait stays object-safe behind `Arc<dyn CatalogApi>`
pub type CatalogFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read-only catalog queries.
///
/// Implementations never fail towards the caller: network and decode errors
/// are logged and collapse into an empty list.
pub trait CatalogApi: Send + Sync {
    /// Top chart tracks, used as the default list when no search is active
    fn fetch_chart_tracks(&self) -> CatalogFuture<'_, Vec<Track>>;

    /// Top chart albums, fetched once at startup
    fn fetch_chart_albums(&self) -> CatalogFuture<'_, Vec<Album>>;

    /// Free-text search for a non-blank query
    fn search_tracks<'a>(&'a self, query: &'a str) -> CatalogFuture<'a, Vec<Track>>;

    /// Free-text search; a blank query falls back to the chart instead of
    /// issuing an empty search
    fn search<'a>(&'a self, query: &'a str) -> CatalogFuture<'a, Vec<Track>> {
        if query.trim().is_empty() {
            log::debug!("[Catalog] Blank query, delegating to chart tracks");
            self.fetch_chart_tracks()
        } else {
            self.search_tracks(query)
        }
    }
}
