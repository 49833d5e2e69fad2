use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HousingExplorerApp {
    pub state: AppState,
}

impl HousingExplorerApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for HousingExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title + match count ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: about, filters, summary ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: map, histogram, raw rows ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading("Housing Data Map");
                    plot::housing_map(ui, &mut self.state);
                    ui.add_space(12.0);

                    ui.heading("Distribution of Median House Values");
                    plot::price_histogram(ui, &self.state);
                    ui.add_space(12.0);

                    ui.heading("Filtered Data");
                    table::data_table(ui, &self.state);
                });
        });
    }
}
