use crate::models::Album;

/// Catalog content that does not follow the search box
#[derive(Default)]
pub struct ContentState {
    // Home Screen Content
    pub albums: Vec<Album>,
    pub albums_loading: bool,
}

impl ContentState {
    /// Album shelf arrived; it is never refreshed afterwards
    pub fn set_albums(&mut self, albums: Vec<Album>) {
        log::info!("[Content] {} chart albums loaded", albums.len());
        self.albums = albums;
        self.albums_loading = false;
    }
}
