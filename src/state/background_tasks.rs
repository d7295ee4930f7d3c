use crate::api::CatalogApi;
use crate::models::Album;
use crate::state::search_state::{SearchKind, SearchRequest, SearchResponse, SearchState};
use crate::utils::async_helper::TaskRunner;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

/// Runs catalog requests off the UI thread and hands results back to it.
///
/// Requests are never cancelled; the sequence tag carried by each search
/// response decides whether `SearchState` accepts it.
pub struct BackgroundTasks {
    runner: TaskRunner,
    catalog: Arc<dyn CatalogApi>,

    // Track list (chart or search)
    search_tx: Sender<SearchResponse>,
    search_rx: Receiver<SearchResponse>,

    // Album shelf, fetched once
    albums_rx: Option<Receiver<Vec<Album>>>,
}

impl BackgroundTasks {
    pub fn new(catalog: Arc<dyn CatalogApi>, runner: TaskRunner) -> Self {
        let (search_tx, search_rx) = channel();
        Self {
            runner,
            catalog,
            search_tx,
            search_rx,
            albums_rx: None,
        }
    }

    pub fn runner(&self) -> &TaskRunner {
        &self.runner
    }

    pub fn dispatch_search(&self, request: SearchRequest) {
        let catalog = Arc::clone(&self.catalog);
        let SearchRequest { seq, kind } = request;

        self.runner.spawn_and_send(
            move || {
                Box::pin(async move {
                    let tracks = match &kind {
                        SearchKind::Chart => catalog.fetch_chart_tracks().await,
                        SearchKind::Query(query) => catalog.search(query).await,
                    };
                    SearchResponse { seq, tracks }
                })
            },
            self.search_tx.clone(),
        );
    }

    /// Feed every finished search into `state`; returns how many arrived
    pub fn poll_search(&self, state: &mut SearchState) -> usize {
        let mut received = 0;
        while let Ok(response) = self.search_rx.try_recv() {
            received += 1;
            state.commit(response);
        }
        received
    }

    pub fn request_albums(&mut self) {
        if self.albums_rx.is_some() {
            return;
        }
        let (tx, rx) = channel();
        let catalog = Arc::clone(&self.catalog);
        self.runner.spawn_and_send(
            move || Box::pin(async move { catalog.fetch_chart_albums().await }),
            tx,
        );
        self.albums_rx = Some(rx);
    }

    /// Albums once they arrive; the receiver is dropped after delivery
    pub fn poll_albums(&mut self) -> Option<Vec<Album>> {
        let albums = self.albums_rx.as_ref()?.try_recv().ok()?;
        self.albums_rx = None;
        Some(albums)
    }

    pub fn albums_pending(&self) -> bool {
        self.albums_rx.is_some()
    }
}
