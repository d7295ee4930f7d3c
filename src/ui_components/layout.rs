use crate::app::PreviewApp;
use crate::constants::*;
use crate::state::ui_state::MainTab;
use crate::ui_components::colors::*;
use crate::utils::media::AudioOutput;
use eframe::egui::{self, CornerRadius, Sense, Vec2};

/// Sidebar on the left, transport bar at the bottom once a track is selected,
/// home page in the remaining space
pub fn render_with_layout<O: AudioOutput>(app: &mut PreviewApp<O>, ctx: &egui::Context) {
    egui::SidePanel::left("sidebar")
        .exact_width(SIDEBAR_WIDTH)
        .resizable(false)
        .frame(egui::Frame::new().fill(BG_SIDEBAR).inner_margin(egui::Margin::same(16)))
        .show(ctx, |ui| {
            render_sidebar(ui, app.ui.selected_tab);
        });

    if app.playback.current().is_some() {
        egui::TopBottomPanel::bottom("player_bar")
            .exact_height(PLAYER_BAR_HEIGHT)
            .frame(egui::Frame::new().fill(BG_CARD).inner_margin(egui::Margin::same(12)))
            .show(ctx, |ui| {
                crate::ui_components::player_bar::render_player_bar(app, ui);
            });
    }

    egui::CentralPanel::default()
        .frame(egui::Frame::new().fill(BG_MAIN))
        .show(ctx, |ui| {
            crate::screens::home::render_home_view(app, ui);
        });
}

fn render_sidebar(ui: &mut egui::Ui, selected: MainTab) {
    ui.add_space(8.0);
    ui.label(
        egui::RichText::new("PreviewRS")
            .size(24.0)
            .color(ACCENT)
            .strong(),
    );
    ui.add_space(24.0);

    for tab in MainTab::ALL {
        let (rect, response) =
            ui.allocate_exact_size(Vec2::new(ui.available_width(), 36.0), Sense::hover());

        if tab == selected {
            ui.painter().rect_filled(rect, CornerRadius::same(6), BG_SELECTED);
        } else if response.hovered() {
            ui.painter().rect_filled(rect, CornerRadius::same(6), BG_HOVER);
        }

        let color = if tab == selected { TEXT_PRIMARY } else { TEXT_SECONDARY };
        ui.painter().text(
            rect.left_center() + Vec2::new(12.0, 0.0),
            egui::Align2::LEFT_CENTER,
            tab.label(),
            egui::FontId::proportional(15.0),
            color,
        );
        ui.add_space(4.0);
    }
}
