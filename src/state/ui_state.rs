use crate::utils::artwork::ArtworkCache;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MainTab {
    Home,
    Search,
    Library,
}

impl MainTab {
    pub const ALL: [MainTab; 3] = [MainTab::Home, MainTab::Search, MainTab::Library];

    pub fn label(self) -> &'static str {
        match self {
            MainTab::Home => "🏠  Home",
            MainTab::Search => "🔍  Search",
            MainTab::Library => "📚  Your Library",
        }
    }
}

pub struct UIState {
    // Navigation (the sidebar is static, Home is the only page)
    pub selected_tab: MainTab,

    // Cover art for albums, rows and the transport bar
    pub artwork: ArtworkCache,

    pub is_shutting_down: bool,
}

impl UIState {
    pub fn new(artwork: ArtworkCache) -> Self {
        Self {
            selected_tab: MainTab::Home,
            artwork,
            is_shutting_down: false,
        }
    }
}
