mod app;
mod color;
mod data;
mod state;
mod ui;

use std::sync::Arc;

use app::TitanicApp;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // The dataset loads exactly once; everything downstream borrows it.
    // A malformed bundled dataset is unrecoverable.
    let state = match data::loader::load_bundled()
        .map(Arc::new)
        .and_then(AppState::new)
    {
        Ok(state) => state,
        Err(e) => {
            log::error!("failed to start: {e:#}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Titanic Survivor Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(TitanicApp::new(state)))),
    )
}
