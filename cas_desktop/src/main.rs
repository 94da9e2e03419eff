// main.rs - Desktop viewer for one-dimensional cellular automata

use anyhow::{anyhow, Context};
use log::info;

mod app;
mod automaton;
mod canvas;
mod settings;

use app::SimulationApp;
use settings::DesktopConfig;

/// Room for the toolbar above the simulation canvas.
const TOOLBAR_HEIGHT: f32 = 90.0;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting cellular automata viewer...");

    let config = DesktopConfig::load();
    info!(
        "Rule {}, width {}, limit {:?}, {:?} view",
        config.simulation.rule, config.simulation.width, config.simulation.absolute_limit, config.mode
    );

    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([
            config.view.viewport.width + 16.0,
            config.view.viewport.height + TOOLBAR_HEIGHT,
        ]),
        ..Default::default()
    };

    let app = SimulationApp::new(config, runtime);
    eframe::run_native(
        "Cellular Automata Simulator",
        options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|e| anyhow!("Window event loop failed: {}", e))
}
