mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::AttritionApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // The dashboard is useless without its data, so a load failure aborts
    // startup instead of rendering a partial page.
    let dataset = match data::loader::load_csv(Path::new(data::loader::DATA_PATH)) {
        Ok(ds) => ds,
        Err(e) => {
            log::error!("failed to load {}: {e}", data::loader::DATA_PATH);
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    log::info!(
        "loaded {} employee records with {} columns",
        dataset.len(),
        dataset.columns.len()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Employee Attrition Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(AttritionApp::new(dataset)))),
    )
}
