// Deezer public API endpoints
use super::{CatalogApi, CatalogFuture};
use crate::config::AppConfig;
use crate::models::{parse_data_envelope, Album, Track};
use crate::utils::errors::CatalogError;
use serde::de::DeserializeOwned;

pub struct DeezerClient {
    http: reqwest::Client,
    base_url: String,
    chart_tracks_limit: usize,
    chart_albums_limit: usize,
}

impl DeezerClient {
    pub fn new(config: &AppConfig) -> Result<Self, CatalogError> {
        let http = crate::utils::http::client(config.request_timeout)?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            chart_tracks_limit: config.chart_tracks_limit,
            chart_albums_limit: config.chart_albums_limit,
        })
    }

    pub fn chart_tracks_url(&self) -> String {
        format!(
            "{}/chart/0/tracks?limit={}",
            self.base_url, self.chart_tracks_limit
        )
    }

    pub fn chart_albums_url(&self) -> String {
        format!(
            "{}/chart/0/albums?limit={}",
            self.base_url, self.chart_albums_limit
        )
    }

    pub fn search_url(&self, query: &str) -> String {
        format!("{}/search?q={}", self.base_url, urlencoding::encode(query))
    }

    pub async fn try_fetch_chart_tracks(&self) -> Result<Vec<Track>, CatalogError> {
        self.get_list(&self.chart_tracks_url()).await
    }

    pub async fn try_fetch_chart_albums(&self) -> Result<Vec<Album>, CatalogError> {
        self.get_list(&self.chart_albums_url()).await
    }

    pub async fn try_search_tracks(&self, query: &str) -> Result<Vec<Track>, CatalogError> {
        self.get_list(&self.search_url(query)).await
    }

    async fn get_list<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, CatalogError> {
        log::debug!("[Catalog] GET {}", url);

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_data_envelope(&body)
    }
}

/// Collapse a catalog failure into an empty list, reporting it to the log
fn or_empty<T>(result: Result<Vec<T>, CatalogError>, what: &str) -> Vec<T> {
    match result {
        Ok(items) => {
            log::info!("[Catalog] Fetched {} {}", items.len(), what);
            items
        }
        Err(e) => {
            log::error!("[Catalog] Error fetching {}: {}", what, e);
            Vec::new()
        }
    }
}

impl CatalogApi for DeezerClient {
    fn fetch_chart_tracks(&self) -> CatalogFuture<'_, Vec<Track>> {
        Box::pin(async move { or_empty(self.try_fetch_chart_tracks().await, "chart tracks") })
    }

    fn fetch_chart_albums(&self) -> CatalogFuture<'_, Vec<Album>> {
        Box::pin(async move { or_empty(self.try_fetch_chart_albums().await, "chart albums") })
    }

    fn search_tracks<'a>(&'a self, query: &'a str) -> CatalogFuture<'a, Vec<Track>> {
        Box::pin(async move {
            let what = format!("search results for {:?}", query);
            or_empty(self.try_search_tracks(query).await, &what)
        })
    }
}
