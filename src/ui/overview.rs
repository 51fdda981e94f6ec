use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::filter::dense_rows;
use crate::data::model::{NumericField, Player};

/// Number of rows shown in the preview table.
const PREVIEW_ROWS: usize = 5;

/// The skill columns a row must fully populate to count as a complete
/// profile (the subset dense enough for cross-metric comparisons).
const PROFILE_FIELDS: [NumericField; 8] = [
    NumericField::Pace,
    NumericField::Shooting,
    NumericField::Passing,
    NumericField::Dribbling,
    NumericField::Defending,
    NumericField::Physic,
    NumericField::HeadingAccuracy,
    NumericField::HeightCm,
];

// ---------------------------------------------------------------------------
// Dataset overview – preview of the first few visible records
// ---------------------------------------------------------------------------

pub fn dataset_overview(ui: &mut Ui, players: &[&Player]) {
    ui.heading("Dataset Overview");

    let preview = &players[..players.len().min(PREVIEW_ROWS)];

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(140.0))
        .columns(Column::auto().at_least(60.0), 5)
        .header(20.0, |mut header| {
            for title in ["Name", "Age", "Club", "Nationality", "Positions", "Overall"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for p in preview {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&p.short_name);
                    });
                    row.col(|ui| {
                        ui.label(fmt_num(p.age));
                    });
                    row.col(|ui| {
                        ui.label(p.club_name.as_deref().unwrap_or("-"));
                    });
                    row.col(|ui| {
                        ui.label(p.nationality_name.as_deref().unwrap_or("-"));
                    });
                    row.col(|ui| {
                        ui.label(p.player_positions.as_deref().unwrap_or("-"));
                    });
                    row.col(|ui| {
                        ui.label(fmt_num(p.overall));
                    });
                });
            }
        });

    if players.is_empty() {
        ui.label("No players match the current filters.");
        return;
    }

    let complete = dense_rows(players, &PROFILE_FIELDS);
    ui.label(format!(
        "{} of {} visible players have a complete skill profile.",
        complete.len(),
        players.len()
    ));
}

fn fmt_num(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.0}"))
        .unwrap_or_else(|| "-".to_string())
}
