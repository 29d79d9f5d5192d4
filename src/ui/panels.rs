use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::ALL_CATEGORIES;
use crate::state::{AppState, ChartKind};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar: row counts and the status line.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong("Titanic Survivor Explorer");
        ui.separator();

        ui.label(format!(
            "{} passengers loaded, {} after filters",
            state.dataset.len(),
            state.filtered.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – the filter form
// ---------------------------------------------------------------------------

/// Render the filter form. Widgets bind to the pending form state; nothing
/// touches the report until the user hits Apply, which submits every
/// selection at once.
pub fn filter_form(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Bounds and category lists come from the baseline table, so the
    // default ranges exclude nothing.
    let dataset = state.dataset.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Chart type");
            ui.horizontal(|ui: &mut Ui| {
                ui.radio_value(&mut state.form.chart, ChartKind::Bars, "Bars");
                ui.radio_value(&mut state.form.chart, ChartKind::Pie, "Pie");
            });
            ui.separator();

            range_picker(ui, "Age", &mut state.form.selection.age, dataset.age_bounds());
            range_picker(
                ui,
                "Family aboard",
                &mut state.form.selection.family,
                dataset.family_bounds(),
            );
            range_picker(
                ui,
                "Fare",
                &mut state.form.selection.fare,
                dataset.fare_bounds(),
            );
            ui.separator();

            multiselect_group(
                ui,
                "Embark town",
                &dataset.embark_towns(),
                &mut state.form.selection.embark_town,
            );
            multiselect_group(
                ui,
                "Sex",
                &dataset.sex_labels(),
                &mut state.form.selection.sex,
            );
            multiselect_group(
                ui,
                "Travelling alone",
                &dataset.alone_labels(),
                &mut state.form.selection.alone,
            );
            multiselect_group(
                ui,
                "Class",
                &dataset.class_labels(),
                &mut state.form.selection.class,
            );
            ui.separator();

            if ui.button("Apply filters").clicked() {
                state.apply_filters();
            }
        });
}

/// Two clamped pickers for a closed `[low, high]` interval. The widgets
/// clamp against each other, so `low > high` cannot be entered.
fn range_picker(ui: &mut Ui, label: &str, range: &mut (f64, f64), bounds: (f64, f64)) {
    ui.strong(label);
    let (mut low, mut high) = *range;
    ui.add(
        egui::Slider::new(&mut low, bounds.0..=high)
            .integer()
            .text("min"),
    );
    ui.add(
        egui::Slider::new(&mut high, low..=bounds.1)
            .integer()
            .text("max"),
    );
    *range = (low, high);
    ui.add_space(4.0);
}

/// A collapsible checkbox group over the unique values of one categorical
/// column, with the `all` sentinel listed first.
fn multiselect_group(
    ui: &mut Ui,
    label: &str,
    choices: &BTreeSet<String>,
    selected: &mut BTreeSet<String>,
) {
    let summary = if selected.contains(ALL_CATEGORIES) {
        "all".to_string()
    } else {
        format!("{}/{}", selected.len(), choices.len())
    };

    egui::CollapsingHeader::new(RichText::new(format!("{label}  ({summary})")).strong())
        .id_salt(label)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            let mut all = selected.contains(ALL_CATEGORIES);
            if ui.checkbox(&mut all, ALL_CATEGORIES).changed() {
                if all {
                    selected.insert(ALL_CATEGORIES.to_string());
                } else {
                    selected.remove(ALL_CATEGORIES);
                }
            }

            for choice in choices {
                let mut checked = selected.contains(choice);
                if ui.checkbox(&mut checked, choice).changed() {
                    if checked {
                        selected.insert(choice.clone());
                    } else {
                        selected.remove(choice);
                    }
                }
            }
        });
}
