// Period Calendar preview
// Main entry point

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use period_calendar::services::markings::{load_markings, MarkedDates};
use period_calendar::services::settings::SettingsService;
use period_calendar::ui_egui::PeriodPreviewApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Period Calendar preview");

    // An explicit settings path wins over the platform config dir
    let service = match std::env::args().nth(1) {
        Some(path) => SettingsService::new(PathBuf::from(path)),
        None => SettingsService::from_project_dirs()?,
    };
    let settings = service.get()?;

    let markings = match &settings.markings {
        Some(path) if path.exists() => load_markings(path)?,
        Some(path) => {
            log::warn!("Marked dates file {:?} not found, starting empty", path);
            MarkedDates::new()
        }
        None => MarkedDates::new(),
    };

    let app = PeriodPreviewApp::new(&settings, markings);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Period Calendar")
            .with_inner_size([420.0, 260.0])
            .with_min_inner_size([340.0, 200.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Period Calendar",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow!("Failed to run preview window: {}", e))
}
