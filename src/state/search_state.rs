use crate::models::Track;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,    // Nothing submitted yet
    Loading, // Latest request in flight
    Ready,   // Latest request answered (possibly with nothing)
}

/// What the dispatcher should ask the catalog for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchKind {
    Chart,
    Query(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub seq: u64,
    pub kind: SearchKind,
}

#[derive(Debug)]
pub struct SearchResponse {
    pub seq: u64,
    pub tracks: Vec<Track>,
}

/// Query buffer, result list and loading phase of the track list.
///
/// Every submit is tagged with a strictly increasing sequence number and only
/// the response carrying the latest tag may replace the results, whatever
/// order the responses come back in.
pub struct SearchState {
    query: String,
    results: Vec<Track>,
    phase: SearchPhase,
    latest_seq: u64,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            phase: SearchPhase::Idle,
            latest_seq: 0,
        }
    }
}

impl SearchState {
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Mutable buffer for the search text field; editing never issues a request
    pub fn query_mut(&mut self) -> &mut String {
        &mut self.query
    }

    #[allow(dead_code)]
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn results(&self) -> &[Track] {
        &self.results
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::Loading
    }

    #[allow(dead_code)]
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Startup load: the chart, sequenced like any other submit
    pub fn load_initial(&mut self) -> SearchRequest {
        self.issue(SearchKind::Chart)
    }

    /// Submit the buffered text; blank text asks for the chart
    pub fn submit(&mut self) -> SearchRequest {
        let kind = if self.query.trim().is_empty() {
            SearchKind::Chart
        } else {
            SearchKind::Query(self.query.clone())
        };
        self.issue(kind)
    }

    fn issue(&mut self, kind: SearchKind) -> SearchRequest {
        self.latest_seq += 1;
        self.phase = SearchPhase::Loading;
        log::info!("[Search] Request #{} issued: {:?}", self.latest_seq, kind);
        SearchRequest {
            seq: self.latest_seq,
            kind,
        }
    }

    /// Apply a response; returns false (and changes nothing) when it is stale
    pub fn commit(&mut self, response: SearchResponse) -> bool {
        if response.seq != self.latest_seq {
            log::debug!(
                "[Search] Discarding stale response #{} (latest is #{})",
                response.seq,
                self.latest_seq
            );
            return false;
        }

        log::info!(
            "[Search] Request #{} ready with {} tracks",
            response.seq,
            response.tracks.len()
        );
        self.results = response.tracks;
        self.phase = SearchPhase::Ready;
        true
    }

    /// Track list heading, following the live text in the search box
    pub fn heading(&self) -> &'static str {
        if self.query.is_empty() {
            "Top Tracks"
        } else {
            "Search Results"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::catalog::fake::{track, FakeCatalog};

    fn response(seq: u64, tracks: Vec<Track>) -> SearchResponse {
        SearchResponse { seq, tracks }
    }

    fn ids(state: &SearchState) -> Vec<u64> {
        state.results().iter().map(|t| t.id).collect()
    }

    #[test]
    fn starts_idle_and_empty() {
        let state = SearchState::default();
        assert_eq!(state.phase(), SearchPhase::Idle);
        assert!(state.results().is_empty());
        assert_eq!(state.heading(), "Top Tracks");
    }

    #[test]
    fn editing_does_not_change_phase() {
        let mut state = SearchState::default();
        state.set_query("daft");
        state.query_mut().push_str(" punk");
        assert_eq!(state.phase(), SearchPhase::Idle);
        assert_eq!(state.latest_seq(), 0);
        assert_eq!(state.query(), "daft punk");
        assert_eq!(state.heading(), "Search Results");
    }

    #[test]
    fn submit_routes_blank_to_chart() {
        let mut state = SearchState::default();
        state.set_query("   ");
        assert_eq!(state.submit().kind, SearchKind::Chart);

        state.set_query("daft punk");
        assert_eq!(
            state.submit().kind,
            SearchKind::Query("daft punk".to_string())
        );
    }

    #[test]
    fn submit_loads_then_commit_readies() {
        let mut state = SearchState::default();
        state.set_query("daft punk");
        let request = state.submit();
        assert!(state.is_loading());

        let committed = state.commit(response(request.seq, FakeCatalog::results_for("daft punk")));
        assert!(committed);
        assert_eq!(state.phase(), SearchPhase::Ready);
        assert_eq!(state.results().len(), 5);
    }

    #[test]
    fn last_submission_wins_when_responses_reorder() {
        let mut state = SearchState::default();
        state.set_query("a");
        let a = state.submit();
        state.set_query("b");
        let b = state.submit();

        assert!(state.commit(response(b.seq, vec![track(2, "b")])));
        assert!(!state.commit(response(a.seq, vec![track(1, "a")])));

        assert_eq!(ids(&state), vec![2]);
        assert_eq!(state.phase(), SearchPhase::Ready);
    }

    #[test]
    fn stale_response_does_not_end_loading() {
        let mut state = SearchState::default();
        state.set_query("a");
        let a = state.submit();
        state.set_query("b");
        let b = state.submit();

        assert!(!state.commit(response(a.seq, vec![track(1, "a")])));
        assert!(state.is_loading());
        assert!(state.results().is_empty());

        assert!(state.commit(response(b.seq, vec![track(2, "b")])));
        assert!(!state.is_loading());
    }

    #[test]
    fn failed_search_becomes_ready_and_empty() {
        let mut state = SearchState::default();
        let initial = state.load_initial();
        state.commit(response(initial.seq, FakeCatalog::chart()));

        state.set_query("nothing");
        let request = state.submit();
        assert!(state.commit(response(request.seq, Vec::new())));
        assert_eq!(state.phase(), SearchPhase::Ready);
        assert!(state.results().is_empty());
    }
}
