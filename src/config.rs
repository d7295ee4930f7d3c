//! Runtime configuration.
//!
//! Defaults live in `constants`; an optional `.env` file or the process
//! environment may override them. Only `main` reads the environment, every
//! component receives its values through its constructor.

use crate::constants::*;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_API_BASE: &str = "PREVIEWRS_API_BASE";
pub const ENV_CHART_TRACKS: &str = "PREVIEWRS_CHART_TRACKS";
pub const ENV_CHART_ALBUMS: &str = "PREVIEWRS_CHART_ALBUMS";
pub const ENV_TIMEOUT_SECS: &str = "PREVIEWRS_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub chart_tracks_limit: usize,
    pub chart_albums_limit: usize,
    pub request_timeout: Duration,
    pub first_frame_timeout: Duration,
    pub select_guard: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            chart_tracks_limit: CHART_TRACKS_LIMIT,
            chart_albums_limit: CHART_ALBUMS_LIMIT,
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            first_frame_timeout: Duration::from_secs(FIRST_FRAME_TIMEOUT_SECS),
            select_guard: Duration::from_millis(SELECT_GUARD_MILLIS),
        }
    }
}

impl AppConfig {
    /// Load `.env` (if present) and apply overrides from the environment
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => log::info!("[Config] Loaded {}", path.display()),
            Err(e) if e.not_found() => log::debug!("[Config] No .env file, using environment"),
            Err(e) => log::warn!("[Config] Failed to read .env file: {}", e),
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base) = lookup(ENV_API_BASE).filter(|v| !v.trim().is_empty()) {
            config.api_base_url = base.trim().to_string();
        }
        if let Some(limit) = parse_override::<usize>(&lookup, ENV_CHART_TRACKS) {
            config.chart_tracks_limit = limit;
        }
        if let Some(limit) = parse_override::<usize>(&lookup, ENV_CHART_ALBUMS) {
            config.chart_albums_limit = limit;
        }
        if let Some(secs) = parse_override::<u64>(&lookup, ENV_TIMEOUT_SECS) {
            config.request_timeout = Duration::from_secs(secs);
        }

        config
    }
}

fn parse_override<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("[Config] Ignoring {}={:?}: not a valid number", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_service_limits() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.api_base_url, "https://api.deezer.com");
        assert_eq!(config.chart_tracks_limit, 20);
        assert_eq!(config.chart_albums_limit, 12);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn overrides_apply() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_API_BASE, "http://localhost:8080"),
            (ENV_CHART_TRACKS, "50"),
            (ENV_TIMEOUT_SECS, " 3 "),
        ]));
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.chart_tracks_limit, 50);
        assert_eq!(config.chart_albums_limit, 12);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_API_BASE, "   "),
            (ENV_CHART_ALBUMS, "twelve"),
        ]));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE);
        assert_eq!(config.chart_albums_limit, CHART_ALBUMS_LIMIT);
    }
}
