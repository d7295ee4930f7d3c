use crate::app::PreviewApp;
use crate::constants::*;
use crate::models::{Album, Track};
use crate::state::PlaybackStatus;
use crate::ui_components::colors::*;
use crate::ui_components::helpers::{calculate_grid_layout, paint_cover, truncate_text};
use crate::utils::format_duration;
use crate::utils::media::AudioOutput;
use eframe::egui::{self, Color32, CornerRadius, Sense, Vec2};

/// Home view: search bar, album shelf and the track list
pub fn render_home_view<O: AudioOutput>(app: &mut PreviewApp<O>, ui: &mut egui::Ui) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.add_space(20.0);
            render_search_bar(app, ui);
            ui.add_space(24.0);
            render_album_shelf(app, ui);
            ui.add_space(28.0);
            render_track_list(app, ui);
            ui.add_space(20.0);
        });
}

fn render_search_bar<O: AudioOutput>(app: &mut PreviewApp<O>, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.add_space(20.0);
        let response = ui.add(
            egui::TextEdit::singleline(app.search.query_mut())
                .hint_text("🔍 Search for songs, artists...")
                .desired_width(420.0)
                .margin(egui::Margin::symmetric(12, 8)),
        );

        // Enter in the field submits; editing alone never does
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            app.submit_search();
        }
    });
}

fn render_album_shelf<O: AudioOutput>(app: &mut PreviewApp<O>, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.add_space(20.0);
        ui.label(
            egui::RichText::new("Popular Albums")
                .size(22.0)
                .color(Color32::WHITE)
                .strong(),
        );
    });
    ui.add_space(12.0);

    if app.content.albums_loading && app.content.albums.is_empty() {
        ui.horizontal(|ui| {
            ui.add_space(20.0);
            ui.spinner();
        });
        return;
    }

    let albums = app.content.albums.clone();
    for album in &albums {
        app.request_artwork(&album.cover_medium);
    }

    let spacing = 16.0;
    let (items_per_row, padding) =
        calculate_grid_layout(ui.available_width() - 40.0, ALBUM_CARD_SIZE, spacing);

    for row in albums.chunks(items_per_row) {
        ui.horizontal(|ui| {
            ui.add_space(20.0 + padding);
            for album in row {
                render_album_card(app, ui, album);
                ui.add_space(spacing);
            }
        });
        ui.add_space(spacing);
    }
}

fn render_album_card<O: AudioOutput>(app: &PreviewApp<O>, ui: &mut egui::Ui, album: &Album) {
    let size = ALBUM_CARD_SIZE;
    let (rect, response) = ui.allocate_exact_size(Vec2::new(size, size + 48.0), Sense::hover());

    if response.hovered() {
        ui.painter()
            .rect_filled(rect.expand(4.0), CornerRadius::same(6), BG_HOVER);
    }

    let cover_rect = egui::Rect::from_min_size(rect.min, Vec2::splat(size));
    paint_cover(ui, cover_rect, app.ui.artwork.get(&album.cover_medium), 6);

    let text_pos = cover_rect.left_bottom() + Vec2::new(2.0, 6.0);
    ui.painter().text(
        text_pos,
        egui::Align2::LEFT_TOP,
        truncate_text(&album.title, 22),
        egui::FontId::proportional(13.0),
        TEXT_PRIMARY,
    );
    ui.painter().text(
        text_pos + Vec2::new(0.0, 18.0),
        egui::Align2::LEFT_TOP,
        truncate_text(&album.artist.name, 24),
        egui::FontId::proportional(11.0),
        TEXT_SECONDARY,
    );
}

fn render_track_list<O: AudioOutput>(app: &mut PreviewApp<O>, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.add_space(20.0);
        ui.label(
            egui::RichText::new(app.search.heading())
                .size(22.0)
                .color(Color32::WHITE)
                .strong(),
        );
    });
    ui.add_space(12.0);

    if app.search.is_loading() {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.spinner();
        });
        return;
    }

    if app.search.results().is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label(
                egui::RichText::new("No tracks found")
                    .size(16.0)
                    .color(Color32::GRAY),
            );
        });
        return;
    }

    let tracks = app.search.results().to_vec();
    for track in &tracks {
        app.request_artwork(&track.album.cover_medium);
    }

    let mut clicked = None;
    for (index, track) in tracks.iter().enumerate() {
        let is_current = app.playback.is_current(track.id);
        let status = if is_current {
            app.playback.status()
        } else {
            PlaybackStatus::Stopped
        };
        if render_track_row(app, ui, index, track, status) {
            clicked = Some(index);
        }
    }

    if let Some(index) = clicked {
        app.select_result(index);
    }
}

/// One row; returns true when clicked. `status` is `Stopped` for rows that
/// are not the current track.
fn render_track_row<O: AudioOutput>(
    app: &PreviewApp<O>,
    ui: &mut egui::Ui,
    index: usize,
    track: &Track,
    status: PlaybackStatus,
) -> bool {
    let width = ui.available_width() - 40.0;
    let (outer, response) = ui.allocate_exact_size(Vec2::new(width + 40.0, TRACK_ROW_HEIGHT), Sense::click());
    let rect = egui::Rect::from_min_size(outer.min + Vec2::new(20.0, 0.0), Vec2::new(width, TRACK_ROW_HEIGHT));
    let is_current = status != PlaybackStatus::Stopped;

    if is_current {
        ui.painter().rect_filled(rect, CornerRadius::same(6), BG_SELECTED);
    } else if response.hovered() {
        ui.painter().rect_filled(rect, CornerRadius::same(6), BG_HOVER);
    }
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }

    let painter = ui.painter();
    let center_y = rect.center().y;

    // Index, or the transport state of the current track
    let marker = match status {
        PlaybackStatus::Playing => "⏸".to_string(),
        PlaybackStatus::Paused => "▶".to_string(),
        PlaybackStatus::Stopped => (index + 1).to_string(),
    };
    let marker_color = if is_current { ACCENT } else { TEXT_SECONDARY };
    painter.text(
        egui::pos2(rect.left() + 20.0, center_y),
        egui::Align2::CENTER_CENTER,
        marker,
        egui::FontId::proportional(14.0),
        marker_color,
    );

    let cover_rect = egui::Rect::from_center_size(
        egui::pos2(rect.left() + 44.0 + TRACK_COVER_SIZE / 2.0, center_y),
        Vec2::splat(TRACK_COVER_SIZE),
    );
    paint_cover(ui, cover_rect, app.ui.artwork.get(&track.album.cover_medium), 4);

    let painter = ui.painter();
    let text_x = cover_rect.right() + 14.0;
    let title_color = if is_current { ACCENT } else { TEXT_PRIMARY };
    painter.text(
        egui::pos2(text_x, center_y - 9.0),
        egui::Align2::LEFT_CENTER,
        truncate_text(&track.title, 48),
        egui::FontId::proportional(14.0),
        title_color,
    );
    let subtitle = if track.has_preview() {
        truncate_text(&track.artist.name, 48)
    } else {
        format!("{} · no preview", truncate_text(&track.artist.name, 36))
    };
    painter.text(
        egui::pos2(text_x, center_y + 10.0),
        egui::Align2::LEFT_CENTER,
        subtitle,
        egui::FontId::proportional(12.0),
        TEXT_SECONDARY,
    );

    // Album column starts at 55% of the row, duration is right aligned
    painter.text(
        egui::pos2(rect.left() + width * 0.55, center_y),
        egui::Align2::LEFT_CENTER,
        truncate_text(&track.album.title, 36),
        egui::FontId::proportional(13.0),
        TEXT_SECONDARY,
    );
    painter.text(
        egui::pos2(rect.right() - 16.0, center_y),
        egui::Align2::RIGHT_CENTER,
        format_duration(track.duration),
        egui::FontId::proportional(13.0),
        TEXT_MUTED,
    );

    response.clicked()
}
