use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};
use housing_explorer::data::model::{HousingRecord, REQUIRED_COLUMNS};

use crate::state::AppState;

/// Rows shown in the raw data table.
pub const TABLE_ROWS: usize = 100;

// ---------------------------------------------------------------------------
// Raw data table (central panel)
// ---------------------------------------------------------------------------

/// Render the first [`TABLE_ROWS`] filtered records.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    let rows: Vec<&HousingRecord> = state.view.head(TABLE_ROWS).collect();
    if rows.is_empty() {
        ui.label("No rows match the selected filters.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .columns(Column::auto().at_least(70.0), REQUIRED_COLUMNS.len())
        .header(20.0, |mut header| {
            for name in REQUIRED_COLUMNS {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let cells = record_cells(rows[row.index()]);
                for cell in cells {
                    row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });

    if state.view.len() > TABLE_ROWS {
        ui.label(format!(
            "First {TABLE_ROWS} of {} matching rows.",
            state.view.len()
        ));
    }
}

/// Cell text for each column, in [`REQUIRED_COLUMNS`] order.
fn record_cells(r: &HousingRecord) -> [String; 10] {
    [
        format!("{:.2}", r.longitude),
        format!("{:.2}", r.latitude),
        r.housing_median_age.to_string(),
        r.total_rooms.to_string(),
        r.total_bedrooms
            .map(|b| b.to_string())
            .unwrap_or_else(|| "—".to_string()),
        r.population.to_string(),
        r.households.to_string(),
        format!("{:.4}", r.median_income),
        format!("{:.0}", r.median_house_value),
        r.ocean_proximity.clone(),
    ]
}

#[cfg(test)]
mod tests {
    use housing_explorer::data::synthetic;

    use super::*;

    #[test]
    fn test_cells_follow_column_order() {
        let table = synthetic::generate(1, 4);
        let mut record = table.records()[0].clone();
        record.total_bedrooms = None;
        record.median_house_value = 452_600.0;

        let cells = record_cells(&record);
        assert_eq!(cells.len(), REQUIRED_COLUMNS.len());
        assert_eq!(cells[4], "—");
        assert_eq!(cells[8], "452600");
        assert_eq!(cells[9], record.ocean_proximity);
    }
}
