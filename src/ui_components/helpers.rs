use crate::ui_components::colors::*;
use eframe::egui::{self, Color32, CornerRadius, Rect, Vec2};

/// Items per row and left padding that centres a grid of `item_width` cards
pub fn calculate_grid_layout(available_width: f32, item_width: f32, spacing: f32) -> (usize, f32) {
    let items_per_row = ((available_width + spacing) / (item_width + spacing))
        .floor()
        .max(1.0) as usize;
    let used = items_per_row as f32 * item_width + (items_per_row - 1) as f32 * spacing;
    let padding = ((available_width - used) / 2.0).max(0.0);
    (items_per_row, padding)
}

/// Cut `text` to `max_chars` characters, ending with an ellipsis when cut
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

/// Paint a cover texture into `rect`, or a placeholder when it is not loaded
pub fn paint_cover(ui: &egui::Ui, rect: Rect, texture: Option<&egui::TextureHandle>, rounding: u8) {
    match texture {
        Some(texture) => {
            egui::Image::new((texture.id(), rect.size()))
                .corner_radius(CornerRadius::same(rounding))
                .paint_at(ui, rect);
        }
        None => {
            ui.painter()
                .rect_filled(rect, CornerRadius::same(rounding), BG_PLACEHOLDER);
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "🎵",
                egui::FontId::proportional(rect.height() * 0.35),
                TEXT_MUTED,
            );
        }
    }
}

/// Round transport button; returns true when clicked
pub fn circle_button(ui: &mut egui::Ui, icon: &str, size: f32, enabled: bool) -> bool {
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(size), egui::Sense::click());
    let fill = if !enabled {
        Color32::TRANSPARENT
    } else if response.hovered() {
        Color32::WHITE
    } else {
        TEXT_PRIMARY
    };
    let icon_color = if enabled { BG_MAIN } else { TEXT_MUTED };

    ui.painter().circle_filled(rect.center(), size / 2.0, fill);
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        icon,
        egui::FontId::proportional(size * 0.45),
        icon_color,
    );

    if enabled && response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    enabled && response.clicked()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_fits_whole_cards() {
        let (per_row, padding) = calculate_grid_layout(1000.0, 160.0, 20.0);
        assert_eq!(per_row, 5);
        assert_eq!(padding, (1000.0 - (5.0 * 160.0 + 4.0 * 20.0)) / 2.0);
    }

    #[test]
    fn narrow_grid_keeps_one_card() {
        let (per_row, padding) = calculate_grid_layout(100.0, 160.0, 20.0);
        assert_eq!(per_row, 1);
        assert_eq!(padding, 0.0);
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_text("Around the World", 25), "Around the World");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_text("Beyoncé Knowles-Carter", 8), "Beyoncé…");
    }
}
