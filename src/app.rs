use eframe::egui;

use crate::data::model::Player;
use crate::state::AppState;
use crate::ui::{charts, overview, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ScoutBenchApp {
    pub state: AppState,
}

impl Default for ScoutBenchApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl eframe::App for ScoutBenchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: overview table + the eight chart panels ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let state = &self.state;
            let Some(dataset) = &state.dataset else {
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    ui.heading("Open a player dataset to explore it  (File → Open…)");
                });
                return;
            };

            // The filtered view every panel consumes, rebuilt from the
            // cached indices each frame.
            let visible: Vec<&Player> = state
                .visible_indices
                .iter()
                .map(|&i| &dataset.players[i])
                .collect();

            egui::ScrollArea::vertical().show(ui, |ui| {
                overview::dataset_overview(ui, &visible);
                ui.separator();
                charts::age_vs_ball_control(ui, &visible);
                ui.separator();
                charts::height_vs_metrics(ui, &visible);
                ui.separator();
                charts::wage_vs_overall(ui, &visible);
                ui.separator();
                charts::top_quickest(ui, &visible, &state.club_colors);
                ui.separator();
                charts::position_wage_value(ui, &visible, &state.position_colors);
                ui.separator();
                charts::nationality_wages(ui, &visible);
                ui.separator();
                charts::age_vs_overall(ui, &visible);
                ui.separator();
                charts::top_overall(ui, &visible, &state.club_colors);
            });
        });
    }
}
