use anyhow::anyhow;
use eframe::egui;

use crate::data::export::{
    breakdown_export, passenger_export, to_csv_bytes, to_xlsx_bytes, ExportTable,
};
use crate::state::AppState;
use crate::ui::{panels, plot, table};

const INTRO: &str = "The Titanic was the largest passenger ship in service at the \
time. She had 2,208 people aboard when she struck an iceberg around 23:40 ship's \
time on Sunday, 14 April 1912, and sank two hours and forty minutes later, at \
02:20 on Monday, 15 April. The sinking killed 1,496 people, making it one of the \
deadliest maritime disasters in history.";

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TitanicApp {
    state: AppState,
}

impl TitanicApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for TitanicApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: toolbar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: filter form ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::filter_form(ui, &mut self.state);
            });

        // ---- Central panel: the report ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.report(ui);
                });
        });
    }
}

impl TitanicApp {
    /// One top-to-bottom pass over the report: intro, both table previews,
    /// the proportion tables and the comparison charts.
    fn report(&mut self, ui: &mut egui::Ui) {
        ui.heading("Titanic survival analysis");
        ui.label(INTRO);
        ui.separator();

        ui.strong("Before filters");
        let baseline = self.state.dataset.clone();
        table::passenger_preview(ui, "baseline_preview", &baseline);
        let baseline_export = passenger_export(&baseline);
        download_row(ui, &mut self.state, &baseline_export, "titanic_baseline");
        ui.separator();

        ui.strong("After filters");
        table::passenger_preview(ui, "filtered_preview", &self.state.filtered);
        let filtered_export = passenger_export(&self.state.filtered);
        download_row(ui, &mut self.state, &filtered_export, "titanic_filtered");
        ui.separator();

        ui.heading("Survival proportions");
        let baseline_shares_export = breakdown_export(&self.state.baseline_breakdown);
        let filtered_shares_export = self
            .state
            .filtered_breakdown
            .as_ref()
            .ok()
            .map(breakdown_export);

        ui.columns(2, |cols| {
            cols[0].strong("Baseline proportion");
            table::breakdown_grid(
                &mut cols[0],
                "baseline_shares",
                &self.state.baseline_breakdown,
                &self.state.colors,
            );
            download_row(
                &mut cols[0],
                &mut self.state,
                &baseline_shares_export,
                "survival_baseline",
            );

            cols[1].strong("Filtered proportion");
            if let Ok(breakdown) = &self.state.filtered_breakdown {
                table::breakdown_grid(
                    &mut cols[1],
                    "filtered_shares",
                    breakdown,
                    &self.state.colors,
                );
            }
            if let Some(export) = &filtered_shares_export {
                download_row(&mut cols[1], &mut self.state, export, "survival_filtered");
            }
        });
        ui.separator();

        plot::comparison_charts(ui, &self.state);
    }
}

// ---------------------------------------------------------------------------
// Download buttons
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
enum ExportFormat {
    Csv,
    Xlsx,
}

fn download_row(ui: &mut egui::Ui, state: &mut AppState, export: &ExportTable, stem: &str) {
    ui.horizontal(|ui| {
        if ui.button("📥 CSV").clicked() {
            save_export(state, export, stem, ExportFormat::Csv);
        }
        if ui.button("📥 XLSX").clicked() {
            save_export(state, export, stem, ExportFormat::Xlsx);
        }
    });
}

/// Serialize `export` and write it wherever the save dialog points. Failures
/// land in the status line; they never abort the session.
fn save_export(state: &mut AppState, export: &ExportTable, stem: &str, format: ExportFormat) {
    let (ext, filter_name) = match format {
        ExportFormat::Csv => ("csv", "CSV"),
        ExportFormat::Xlsx => ("xlsx", "Excel"),
    };

    let Some(path) = rfd::FileDialog::new()
        .set_title("Save table")
        .add_filter(filter_name, &[ext])
        .set_file_name(format!("{stem}.{ext}"))
        .save_file()
    else {
        return;
    };

    let bytes = match format {
        ExportFormat::Csv => to_csv_bytes(export),
        ExportFormat::Xlsx => to_xlsx_bytes(export),
    };
    let written = bytes.and_then(|b| {
        std::fs::write(&path, b).map_err(|e| anyhow!("writing {}: {e}", path.display()))
    });
    match written {
        Ok(()) => log::info!("saved {}", path.display()),
        Err(e) => state.set_error(format!("Failed to save: {e:#}")),
    }
}
