use eframe::egui::Color32;

// Backgrounds
pub const BG_MAIN: Color32 = Color32::from_rgb(18, 18, 18);
pub const BG_SIDEBAR: Color32 = Color32::from_rgb(0, 0, 0);
pub const BG_CARD: Color32 = Color32::from_rgb(24, 24, 24);
pub const BG_INPUT: Color32 = Color32::from_rgb(40, 40, 40);
pub const BG_HOVER: Color32 = Color32::from_rgb(40, 40, 45);
pub const BG_SELECTED: Color32 = Color32::from_rgb(48, 48, 54);
pub const BG_PLACEHOLDER: Color32 = Color32::from_rgb(60, 60, 60);

// Text
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(179, 179, 179);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);

// Accents
pub const ACCENT: Color32 = Color32::from_rgb(162, 56, 255);
pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
