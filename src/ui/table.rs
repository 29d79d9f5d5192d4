use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::CategoryColors;
use crate::data::model::PassengerTable;
use crate::data::stats::SurvivalBreakdown;

/// How many rows the inline previews show; the download buttons carry the
/// full table.
pub const TABLE_PREVIEW_ROWS: usize = 5;

// ---------------------------------------------------------------------------
// Passenger table preview
// ---------------------------------------------------------------------------

/// Render the first rows of `table` as a striped grid with a row-number
/// column. `id` keeps multiple previews on one page apart.
pub fn passenger_preview(ui: &mut Ui, id: &str, table: &PassengerTable) {
    if table.is_empty() {
        ui.label("No rows match the current filters.");
        return;
    }

    ui.push_id(id, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::initial(30.0).resizable(false))
            .columns(
                Column::initial(90.0).resizable(true),
                PassengerTable::COLUMNS.len(),
            )
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("#");
                });
                for title in PassengerTable::COLUMNS {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for (i, passenger) in table
                    .passengers()
                    .iter()
                    .take(TABLE_PREVIEW_ROWS)
                    .enumerate()
                {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(format!("{}", i + 1));
                        });
                        for cell in passenger.display_cells() {
                            row.col(|ui| {
                                ui.label(cell);
                            });
                        }
                    });
                }
            });
    });

    if table.len() > TABLE_PREVIEW_ROWS {
        ui.small(format!(
            "… {} more rows in the downloads",
            table.len() - TABLE_PREVIEW_ROWS
        ));
    }
}

// ---------------------------------------------------------------------------
// Survival proportion table
// ---------------------------------------------------------------------------

/// Render a survival breakdown as a two-column grid, labels tinted with the
/// shared chart colours.
pub fn breakdown_grid(
    ui: &mut Ui,
    id: &str,
    breakdown: &SurvivalBreakdown,
    colors: &CategoryColors,
) {
    egui::Grid::new(id).striped(true).show(ui, |ui| {
        ui.strong("Survived");
        ui.strong("Proportion (%)");
        ui.end_row();
        for (label, pct) in breakdown.shares() {
            let label = label.to_string();
            ui.colored_label(colors.color_for(&label), label);
            ui.label(format!("{pct:.2}"));
            ui.end_row();
        }
    });
}
