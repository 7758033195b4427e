mod app;
mod config;
mod data;
mod session;
mod state;
mod task;
mod ui;

use app::DomainInsightsApp;
use config::Config;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = Config::load().unwrap_or_else(|e| {
        log::error!("Failed to load config, using defaults: {e:#}");
        Config::default()
    });
    log::info!("Using resource {}", config.resource);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Domain Insights",
        options,
        Box::new(move |_cc| Ok(Box::new(DomainInsightsApp::new(config)))),
    )
}
