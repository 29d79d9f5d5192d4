use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{
    Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2,
};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, Text};

use crate::color::CategoryColors;
use crate::data::stats::SurvivalBreakdown;
use crate::state::{AppState, ChartKind};

// ---------------------------------------------------------------------------
// Comparison charts (central panel)
// ---------------------------------------------------------------------------

/// Render the two-panel survival comparison: baseline on the left, the
/// filtered table on the right. When the filter matched no rows the right
/// panel degrades to an error note; the baseline always renders.
pub fn comparison_charts(ui: &mut Ui, state: &AppState) {
    ui.columns(2, |cols| {
        chart_panel(
            &mut cols[0],
            "raw_shares_plot",
            "Raw data",
            Some(&state.baseline_breakdown),
            state.chart,
            &state.colors,
        );
        chart_panel(
            &mut cols[1],
            "filtered_shares_plot",
            "Filtered data",
            state.filtered_breakdown.as_ref().ok(),
            state.chart,
            &state.colors,
        );
    });
}

fn chart_panel(
    ui: &mut Ui,
    id: &str,
    title: &str,
    breakdown: Option<&SurvivalBreakdown>,
    chart: ChartKind,
    colors: &CategoryColors,
) {
    ui.strong(title);
    match breakdown {
        None => {
            ui.label(
                RichText::new("Nothing to chart: the filter matched no rows.")
                    .color(Color32::RED),
            );
        }
        Some(breakdown) => match chart {
            ChartKind::Bars => bar_chart(ui, id, breakdown, colors),
            ChartKind::Pie => pie_chart(ui, breakdown, colors),
        },
    }
}

// ---------------------------------------------------------------------------
// Bars
// ---------------------------------------------------------------------------

/// One bar per survival label with its percentage printed above; the legend
/// doubles as the category axis.
fn bar_chart(ui: &mut Ui, id: &str, breakdown: &SurvivalBreakdown, colors: &CategoryColors) {
    let shares = breakdown.shares();

    Plot::new(id)
        .legend(Legend::default())
        .show_axes([false, true])
        .show_grid([false, true])
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-0.7)
        .include_x(shares.len() as f64 - 0.3)
        .include_y(0.0)
        .include_y(112.0)
        .height(220.0)
        .show(ui, |plot_ui| {
            for (i, (label, pct)) in shares.iter().enumerate() {
                let label = label.to_string();
                let color = colors.color_for(&label);
                let bars = vec![Bar::new(i as f64, *pct).width(0.6)];
                plot_ui.bar_chart(BarChart::new(bars).color(color).name(label));
                plot_ui.text(Text::new(
                    PlotPoint::new(i as f64, *pct + 5.0),
                    RichText::new(format!("{pct:.1}")).strong(),
                ));
            }
        });
}

// ---------------------------------------------------------------------------
// Pie
// ---------------------------------------------------------------------------

/// A pie with percentage labels, drawn with the raw painter since egui_plot
/// has no pie primitive. Slices wider than a quarter turn are tessellated in
/// quarter-turn segments to stay convex.
fn pie_chart(ui: &mut Ui, breakdown: &SurvivalBreakdown, colors: &CategoryColors) {
    let shares = breakdown.shares();
    let side = 200.0;

    let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::hover());
    let center = response.rect.center();
    let radius = side * 0.45;

    let mut angle = -FRAC_PI_2; // start at 12 o'clock
    for (label, pct) in shares {
        let label = label.to_string();
        let color = colors.color_for(&label);
        let sweep = (*pct as f32) / 100.0 * TAU;

        let mut remaining = sweep;
        let mut segment_start = angle;
        while remaining > 0.0 {
            let segment = remaining.min(FRAC_PI_2);
            wedge(&painter, center, radius, segment_start, segment, color);
            segment_start += segment;
            remaining -= segment;
        }

        let mid = angle + sweep / 2.0;
        let label_pos = center + radius * 0.6 * Vec2::new(mid.cos(), mid.sin());
        painter.text(
            label_pos,
            Align2::CENTER_CENTER,
            format!("{pct:.2}"),
            FontId::proportional(13.0),
            Color32::WHITE,
        );

        angle += sweep;
    }

    ui.horizontal(|ui| {
        for (label, _) in shares {
            let label = label.to_string();
            ui.colored_label(colors.color_for(&label), format!("■ {label}"));
        }
    });
}

fn wedge(
    painter: &eframe::egui::Painter,
    center: Pos2,
    radius: f32,
    start: f32,
    sweep: f32,
    color: Color32,
) {
    let steps = ((sweep / TAU * 64.0).ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for step in 0..=steps {
        let a = start + sweep * step as f32 / steps as f32;
        points.push(center + radius * Vec2::new(a.cos(), a.sin()));
    }
    painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
}
