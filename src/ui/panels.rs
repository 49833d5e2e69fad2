use eframe::egui::{Color32, RichText, ScrollArea, Slider, Ui};
use housing_explorer::data::filter::IncomeBracket;
use housing_explorer::data::summary::format_currency;

use crate::state::AppState;

const SYNTHETIC_NOTICE: &str =
    "Using synthetic sample data because the housing dataset could not be loaded.";

// ---------------------------------------------------------------------------
// Left side panel – about, filter widgets, summary
// ---------------------------------------------------------------------------

/// Render the left sidebar.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("About");
            ui.label("Explore the 1990 California census housing blocks.");
            ui.label(RichText::new(format!("Source: {}", state.origin)).weak());
            ui.separator();

            ui.heading("Filters");
            ui.add_space(4.0);
            price_filter(ui, state);
            ui.separator();
            location_filter(ui, state);
            ui.separator();
            income_filter(ui, state);
            ui.separator();

            ui.heading("Data Summary");
            summary_section(ui, state);
            ui.add_space(8.0);
            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
        });
}

fn price_filter(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Price Range Filter");
    let (lo, hi) = state.price_bounds();
    let current = state.criteria.price_range;
    let mut range = current;

    // Each handle is bounded by the other so the range never inverts.
    ui.add(
        Slider::new(&mut range.min, lo..=current.max)
            .text("min")
            .prefix("$")
            .fixed_decimals(0),
    );
    ui.add(
        Slider::new(&mut range.max, current.min..=hi)
            .text("max")
            .prefix("$")
            .fixed_decimals(0),
    );

    if range != current {
        state.set_price_range(range);
    }
}

fn location_filter(ui: &mut Ui, state: &mut AppState) {
    let n_selected = state.criteria.allowed_locations.len();
    let locations: Vec<String> = state.table.locations().iter().cloned().collect();
    ui.strong(format!("Location Type  ({n_selected}/{})", locations.len()));

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all_locations();
        }
        if ui.small_button("None").clicked() {
            state.select_no_locations();
        }
    });

    for location in &locations {
        let mut checked = state.criteria.allowed_locations.contains(location);
        let text = RichText::new(location).color(state.colors.color_for(location));
        if ui.checkbox(&mut checked, text).changed() {
            state.toggle_location(location);
        }
    }

    if state.criteria.allowed_locations.is_empty() {
        ui.label(RichText::new("Nothing selected: showing every location.").weak());
    }
}

fn income_filter(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Income Level");
    let mut bracket = state.criteria.income_bracket;
    for option in IncomeBracket::ALL {
        ui.radio_value(&mut bracket, option, option.to_string());
    }
    state.set_income_bracket(bracket);
}

fn summary_section(ui: &mut Ui, state: &AppState) {
    ui.label(format!("Total properties: {}", state.table.len()));
    ui.label(format!("Filtered properties: {}", state.view.len()));
    match &state.summary {
        Ok(summary) => {
            ui.label(format!(
                "Average price: {}",
                format_currency(summary.mean_price)
            ));
            ui.label(format!("Average income: {:.2}", summary.mean_income));
        }
        Err(e) => {
            ui.label(RichText::new(format!("Average price: no data ({e})")).weak());
            ui.label(RichText::new("Average income: no data").weak());
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title row and match count.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("California Housing Data (1990)");
        ui.separator();
        ui.label(RichText::new(showing_text(state.view.len(), state.table.len())).strong());
    });

    if state.origin.is_synthetic() {
        ui.label(RichText::new(SYNTHETIC_NOTICE).color(Color32::from_rgb(230, 160, 0)));
    }
    ui.add_space(2.0);
}

fn showing_text(filtered: usize, total: usize) -> String {
    format!("Showing {filtered} out of {total} properties")
}

/// Shown in place of a plot when the filters match nothing.
pub fn no_data_notice(ui: &mut Ui, message: &str) {
    ui.add_space(8.0);
    ui.label(RichText::new(format!("⚠ {message}")).color(Color32::from_rgb(230, 160, 0)));
    ui.add_space(8.0);
}
