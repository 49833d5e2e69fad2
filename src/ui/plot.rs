use std::collections::BTreeMap;

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotBounds, PlotPoints, Points};
use housing_explorer::data::filter::FilteredView;
use housing_explorer::data::model::HousingRecord;
use housing_explorer::data::summary::{self, format_currency, HISTOGRAM_BINS};

use crate::state::AppState;
use crate::ui::panels::no_data_notice;

const PLOT_HEIGHT: f32 = 420.0;

/// Half the visible map extent around the centroid, in degrees.
const MAP_HALF_WIDTH: f64 = 5.0;
const MAP_HALF_HEIGHT: f64 = 4.0;

const BAR_FILL: Color32 = Color32::from_rgb(135, 206, 235);

// ---------------------------------------------------------------------------
// Map (central panel)
// ---------------------------------------------------------------------------

/// Scatter the filtered blocks by longitude/latitude, coloured by location.
pub fn housing_map(ui: &mut Ui, state: &mut AppState) {
    let summary = match state.summary {
        Ok(summary) => summary,
        Err(_) => {
            no_data_notice(ui, "No data available for the selected filters.");
            return;
        }
    };
    let recenter = std::mem::take(&mut state.recenter_map);

    let mut by_location: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for r in state.view.records() {
        by_location
            .entry(r.ocean_proximity.as_str())
            .or_default()
            .push([r.longitude, r.latitude]);
    }

    let hover_view = state.view.clone();
    let colors = &state.colors;

    Plot::new("housing_map")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .data_aspect(1.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .label_formatter(move |name, value| {
            if name.is_empty() {
                return String::new();
            }
            nearest_record(&hover_view, value.x, value.y)
                .map(tooltip_text)
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            if recenter {
                let (lon, lat) = summary.centroid;
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [lon - MAP_HALF_WIDTH, lat - MAP_HALF_HEIGHT],
                    [lon + MAP_HALF_WIDTH, lat + MAP_HALF_HEIGHT],
                ));
            }

            for (location, points) in by_location {
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(location)
                        .color(colors.color_for(location))
                        .radius(2.0),
                );
            }
        });
}

/// The record closest to `(lon, lat)`, for hover tooltips.
fn nearest_record(view: &FilteredView, lon: f64, lat: f64) -> Option<&HousingRecord> {
    view.records().min_by(|a, b| {
        let da = (a.longitude - lon).powi(2) + (a.latitude - lat).powi(2);
        let db = (b.longitude - lon).powi(2) + (b.latitude - lat).powi(2);
        da.total_cmp(&db)
    })
}

fn tooltip_text(record: &HousingRecord) -> String {
    format!(
        "Median Value: {}\nIncome: {}\nLocation: {}",
        format_currency(record.median_house_value),
        record.median_income,
        record.ocean_proximity
    )
}

// ---------------------------------------------------------------------------
// Histogram (central panel)
// ---------------------------------------------------------------------------

/// Distribution of `median_house_value` over the filtered rows.
pub fn price_histogram(ui: &mut Ui, state: &AppState) {
    let values: Vec<f64> = state
        .view
        .records()
        .map(|r| r.median_house_value)
        .collect();

    let Some(hist) = summary::histogram(&values, HISTOGRAM_BINS) else {
        no_data_notice(ui, "No data available for histogram.");
        return;
    };

    let bars: Vec<Bar> = hist
        .bars()
        .map(|(center, count)| {
            Bar::new(center, count as f64)
                .width(hist.bin_width)
                .fill(BAR_FILL)
                .stroke(Stroke::new(1.0, Color32::BLACK))
        })
        .collect();

    Plot::new("price_histogram")
        .height(PLOT_HEIGHT * 0.75)
        .x_axis_label("Median House Value ($)")
        .y_axis_label("Frequency")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Distribution of House Values"));
        });
}
