use crate::app::PreviewApp;
use crate::constants::TRACK_COVER_SIZE;
use crate::ui_components::colors::*;
use crate::ui_components::helpers::{circle_button, paint_cover, truncate_text};
use crate::utils::media::AudioOutput;
use eframe::egui::{self, Vec2};

/// Transport bar for the current track. Previous and next are drawn but
/// inactive; there is no queue.
pub fn render_player_bar<O: AudioOutput>(app: &mut PreviewApp<O>, ui: &mut egui::Ui) {
    let Some(track) = app.playback.current().cloned() else {
        return;
    };
    let is_playing = app.playback.is_playing();
    let error = app.playback.last_error().map(str::to_string);

    app.request_artwork(&track.album.cover_medium);

    let mut toggle = false;
    ui.horizontal_centered(|ui| {
        // Cover + title/artist, fixed width on the left
        let cover_size = TRACK_COVER_SIZE + 8.0;
        let (cover_rect, _) = ui.allocate_exact_size(Vec2::splat(cover_size), egui::Sense::hover());
        paint_cover(ui, cover_rect, app.ui.artwork.get(&track.album.cover_medium), 4);
        ui.add_space(12.0);

        ui.allocate_ui(Vec2::new(260.0, cover_size), |ui| {
            ui.vertical(|ui| {
                ui.add_space(6.0);
                ui.label(
                    egui::RichText::new(truncate_text(&track.title, 32))
                        .size(14.0)
                        .color(TEXT_PRIMARY)
                        .strong(),
                );
                ui.label(
                    egui::RichText::new(truncate_text(&track.artist.name, 36))
                        .size(12.0)
                        .color(TEXT_SECONDARY),
                );
            });
        });

        // Transport buttons centred in the remaining width
        let controls_width = 3.0 * 40.0 + 2.0 * 16.0;
        let free = ui.available_width();
        ui.add_space(((free - controls_width) / 2.0 - 130.0).max(16.0));

        circle_button(ui, "⏮", 32.0, false);
        ui.add_space(16.0);
        let icon = if is_playing { "⏸" } else { "▶" };
        if circle_button(ui, icon, 40.0, true) {
            toggle = true;
        }
        ui.add_space(16.0);
        circle_button(ui, "⏭", 32.0, false);

        if let Some(error) = &error {
            ui.add_space(24.0);
            ui.label(
                egui::RichText::new(format!("⚠ {}", truncate_text(error, 60)))
                    .size(12.0)
                    .color(ERROR),
            );
        }
    });

    if toggle {
        app.toggle_playback();
    }
}
