mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;
mod views;

use std::path::Path;

use anyhow::Context;
use app::LaunchDashboardApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(config::CONFIG_FILE));

    // The dataset is read once; without it there is nothing to serve.
    let dataset = match data::loader::load_file(&config.data_path) {
        Ok(ds) => ds,
        Err(e) => {
            log::error!("Failed to load launch records: {e:#}");
            return Err(e);
        }
    };
    if dataset.is_empty() {
        log::warn!("{} holds no launch records; charts will be empty", config.data_path.display());
    } else {
        log::info!(
            "Loaded {} launch records from {}",
            dataset.len(),
            config.data_path.display()
        );
    }

    let state = AppState::new(dataset, &config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(app::TITLE)
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        app::TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running dashboard window")
}
