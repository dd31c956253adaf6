//! kalkulacka - a calculator with light/dark themes and particle bursts

use eframe::NativeOptions;
use kalkcore::Config;
use kalkulacka::app::KalkulackaApp;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = Config::discover();
    info!(
        theme = config.theme.name(),
        effects = config.effects.enabled,
        "starting kalkulacka"
    );

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([300.0, 440.0])
            .with_min_inner_size([240.0, 340.0])
            .with_title("kalkulacka"),
        ..Default::default()
    };

    eframe::run_native(
        "kalkulacka",
        options,
        Box::new(move |cc| Box::new(KalkulackaApp::new(cc, config))),
    )
}
