use std::sync::Arc;

use anyhow::Context;

use crate::color::CategoryColors;
use crate::data::filter::FilterSelection;
use crate::data::model::{PassengerTable, Survival};
use crate::data::stats::{survival_breakdown, BreakdownError, SurvivalBreakdown};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which comparison chart the report shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bars,
    Pie,
}

/// Pending form edits. Nothing here affects the report until the user
/// submits; `AppState::apply_filters` copies it over in one step.
pub struct FilterForm {
    pub chart: ChartKind,
    pub selection: FilterSelection,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// The baseline table, loaded once and shared read-only.
    pub dataset: Arc<PassengerTable>,

    /// Pending form edits (side panel widgets bind to this).
    pub form: FilterForm,

    /// Chart kind in effect (applied on submit).
    pub chart: ChartKind,

    /// Result of the last submitted filter selection.
    pub filtered: PassengerTable,

    /// Survival shares of the baseline table; computed once.
    pub baseline_breakdown: SurvivalBreakdown,

    /// Survival shares of the filtered table; `Err` when the selection
    /// matched no rows, in which case the comparison chart is omitted.
    pub filtered_breakdown: Result<SurvivalBreakdown, BreakdownError>,

    /// Shared label → colour mapping for bars, pies and legends.
    pub colors: CategoryColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the initial state: unrestricted filters, full table visible.
    pub fn new(dataset: Arc<PassengerTable>) -> anyhow::Result<Self> {
        let baseline_breakdown =
            survival_breakdown(&dataset).context("baseline survival breakdown")?;

        let selection = FilterSelection::unrestricted(&dataset);
        let filtered = selection.apply(&dataset);
        let filtered_breakdown = survival_breakdown(&filtered);

        let colors = CategoryColors::new(
            [Survival::No, Survival::Yes].map(|s| s.to_string()),
        );

        Ok(Self {
            dataset,
            form: FilterForm {
                chart: ChartKind::Bars,
                selection,
            },
            chart: ChartKind::Bars,
            filtered,
            baseline_breakdown,
            filtered_breakdown,
            colors,
            status_message: None,
        })
    }

    /// Atomically apply everything the form currently holds: filter the
    /// dataset, recompute the comparison shares, update the status line.
    pub fn apply_filters(&mut self) {
        self.chart = self.form.chart;
        self.filtered = self.form.selection.apply(&self.dataset);
        self.filtered_breakdown = survival_breakdown(&self.filtered);
        match &self.filtered_breakdown {
            Ok(_) => self.status_message = None,
            Err(e) => {
                log::warn!("selection matched no rows: {e}");
                self.status_message = Some(format!("Filter error: {e}"));
            }
        }
    }

    /// Record a non-fatal failure (exports, dialogs) for the status line.
    pub fn set_error(&mut self, message: String) {
        log::error!("{message}");
        self.status_message = Some(message);
    }
}
