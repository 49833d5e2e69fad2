mod app;
mod color;
mod state;
mod ui;

use app::HousingExplorerApp;
use eframe::egui;
use housing_explorer::config::LoaderConfig;
use housing_explorer::data::loader::DataLoader;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // Load before the window opens; the snapshot is shared read-only afterwards.
    let config = LoaderConfig::from_env();
    let loaded = DataLoader::new(&config).load();
    let state = AppState::new(loaded);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "California Housing Data (1990)",
        options,
        Box::new(move |_cc| Ok(Box::new(HousingExplorerApp::new(state)))),
    )
}
