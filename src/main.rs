mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::ScoutBenchApp;
use eframe::egui;

/// Dataset location: the `SCOUT_BENCH_DATA` environment variable, falling
/// back to `fifa_data.csv` in the working directory.
fn dataset_path() -> PathBuf {
    std::env::var_os("SCOUT_BENCH_DATA")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("fifa_data.csv"))
}

fn main() -> eframe::Result {
    env_logger::init();

    // The dashboard is useless without its table, so a failed startup load
    // is fatal. Files opened later through the menu only surface a status
    // message on failure.
    let path = dataset_path();
    let dataset = match data::loader::load_file(&path) {
        Ok(ds) => ds,
        Err(e) => {
            log::error!("Cannot load dataset {}: {e:#}", path.display());
            std::process::exit(1);
        }
    };
    log::info!("Loaded {} players from {}", dataset.len(), path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Scout Bench – Football Player Explorer",
        options,
        Box::new(move |_cc| {
            let mut app = ScoutBenchApp::default();
            app.state.set_dataset(dataset);
            Ok(Box::new(app))
        }),
    )
}
