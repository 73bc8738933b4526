use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, RichText, ScrollArea, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Plot, PlotPoints, Polygon,
};
use egui_extras::{Column, TableBuilder};

use crate::color::{self, ColorMap};
use crate::data::stats::{BoxStats, CorrelationMatrix};
use crate::data::view::{self, ChartArtifact, ChartData, HistogramSeries, Section, ViolinGroup};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel – dashboard sections
// ---------------------------------------------------------------------------

/// Render the whole dashboard: five chart sections followed by the data
/// table and download action.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Employee Attrition Dashboard");
            ui.label(
                "Macro and micro-level insights on employee attrition trends. \
                 Filter, visualize, and explore metrics to inform HR decision-making.",
            );
            ui.add_space(8.0);

            for section in Section::ALL {
                egui::CollapsingHeader::new(RichText::new(section.title()).strong())
                    .default_open(section == Section::Overview)
                    .show(ui, |ui: &mut Ui| {
                        for artifact in state
                            .artifacts
                            .iter()
                            .filter(|a| a.spec.section == section)
                        {
                            chart(ui, &state.group_colors, artifact);
                        }
                    });
            }

            egui::CollapsingHeader::new(RichText::new("Data Table & Download").strong())
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    data_table(ui, state);
                });
        });
}

fn chart(ui: &mut Ui, colors: &ColorMap, artifact: &ChartArtifact) {
    ui.add_space(6.0);
    ui.strong(artifact.spec.title);
    if let Some(blurb) = artifact.spec.blurb {
        ui.label(blurb);
    }
    match &artifact.data {
        ChartData::Pie { slices } => pie_chart(ui, slices),
        ChartData::Histogram { categories, series } => {
            histogram_chart(
                ui,
                artifact.spec.title,
                categories,
                series,
                artifact.spec.stacked,
                colors,
            );
        }
        ChartData::BoxPlot { groups } => box_chart(ui, artifact.spec.title, groups, colors),
        ChartData::Violin { groups } => violin_chart(ui, artifact.spec.title, groups, colors),
        ChartData::Heatmap(matrix) => heatmap_chart(ui, artifact.spec.title, matrix),
    }
    ui.add_space(6.0);
}

/// Axis formatter that maps integer plot coordinates onto category labels.
fn index_axis_formatter(
    labels: Vec<String>,
) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let rounded = mark.value.round();
        if (mark.value - rounded).abs() < 1e-3 && rounded >= 0.0 {
            if let Some(label) = labels.get(rounded as usize) {
                return label.clone();
            }
        }
        String::new()
    }
}

// ---------------------------------------------------------------------------
// Pie (painter-drawn)
// ---------------------------------------------------------------------------

fn pie_chart(ui: &mut Ui, slices: &[(String, f64)]) {
    let total: f64 = slices.iter().map(|(_, v)| v).sum();
    let palette = color::generate_palette(slices.len());

    ui.horizontal(|ui: &mut Ui| {
        let (response, painter) = ui.allocate_painter(Vec2::splat(200.0), Sense::hover());
        let rect = response.rect;
        let center = rect.center();
        let radius = rect.width().min(rect.height()) * 0.45;

        if total > 0.0 {
            let mut angle = -std::f32::consts::FRAC_PI_2;
            for ((_, value), color) in slices.iter().zip(&palette) {
                let sweep = (value / total) as f32 * std::f32::consts::TAU;
                // Triangle fan: sectors can be reflex, so convex shapes only
                // work per step.
                let steps = (sweep / 0.08).ceil().max(1.0) as usize;
                for s in 0..steps {
                    let a0 = angle + sweep * s as f32 / steps as f32;
                    let a1 = angle + sweep * (s + 1) as f32 / steps as f32;
                    painter.add(Shape::convex_polygon(
                        vec![
                            center,
                            center + radius * Vec2::new(a0.cos(), a0.sin()),
                            center + radius * Vec2::new(a1.cos(), a1.sin()),
                        ],
                        *color,
                        Stroke::NONE,
                    ));
                }
                angle += sweep;
            }
        } else {
            painter.circle_stroke(center, radius, Stroke::new(1.0, Color32::GRAY));
        }

        ui.vertical(|ui: &mut Ui| {
            for ((label, value), color) in slices.iter().zip(&palette) {
                ui.horizontal(|ui: &mut Ui| {
                    let (swatch, p) = ui.allocate_painter(Vec2::splat(12.0), Sense::hover());
                    p.rect_filled(swatch.rect, 2, *color);
                    let pct = if total > 0.0 { 100.0 * value / total } else { 0.0 };
                    ui.label(format!("{label}: {value:.0} ({pct:.1}%)"));
                });
            }
            if total == 0.0 {
                ui.label("No rows match the current filters.");
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Grouped histogram
// ---------------------------------------------------------------------------

fn histogram_chart(
    ui: &mut Ui,
    id: &str,
    categories: &[String],
    series: &[HistogramSeries],
    stacked: bool,
    colors: &ColorMap,
) {
    let n_series = series.len().max(1) as f64;
    let group_width = 0.8;
    let bar_width = if stacked {
        group_width
    } else {
        group_width / n_series
    };

    let mut bar_charts: Vec<BarChart> = Vec::new();
    for (s_idx, s) in series.iter().enumerate() {
        let color = colors.color_for(&s.label);
        let bars: Vec<Bar> = s
            .counts
            .iter()
            .enumerate()
            .map(|(c_idx, &count)| {
                let x = if stacked {
                    c_idx as f64
                } else {
                    c_idx as f64 - group_width / 2.0 + bar_width * (s_idx as f64 + 0.5)
                };
                Bar::new(x, count).width(bar_width * 0.9).fill(color)
            })
            .collect();
        let mut chart = BarChart::new(bars).name(&s.label).color(color);
        if stacked {
            let below: Vec<&BarChart> = bar_charts.iter().collect();
            chart = chart.stack_on(&below);
        }
        bar_charts.push(chart);
    }

    Plot::new(id)
        .height(240.0)
        .legend(Legend::default())
        .y_axis_label("Count")
        .x_axis_formatter(index_axis_formatter(categories.to_vec()))
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for bar_chart in bar_charts {
                plot_ui.bar_chart(bar_chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Box plot
// ---------------------------------------------------------------------------

fn box_chart(
    ui: &mut Ui,
    id: &str,
    groups: &[(String, BoxStats)],
    colors: &ColorMap,
) {
    let mut box_plots = Vec::new();
    for (i, (label, st)) in groups.iter().enumerate() {
        let color = colors.color_for(label);
        let elem = BoxElem::new(
            i as f64,
            BoxSpread::new(st.min, st.q1, st.median, st.q3, st.max),
        )
        .box_width(0.5)
        .whisker_width(0.25)
        .fill(color.gamma_multiply(0.4))
        .stroke(Stroke::new(1.5, color));
        box_plots.push(BoxPlot::new(vec![elem]).name(label).color(color));
    }

    let labels: Vec<String> = groups.iter().map(|(l, _)| l.clone()).collect();
    Plot::new(id)
        .height(240.0)
        .legend(Legend::default())
        .x_axis_formatter(index_axis_formatter(labels))
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for box_plot in box_plots {
                plot_ui.box_plot(box_plot);
            }
        });
}

// ---------------------------------------------------------------------------
// Violin plot (mirrored KDE outline with an inner box)
// ---------------------------------------------------------------------------

fn violin_chart(ui: &mut Ui, id: &str, groups: &[ViolinGroup], colors: &ColorMap) {
    let labels: Vec<String> = groups.iter().map(|g| g.label.clone()).collect();
    Plot::new(id)
        .height(240.0)
        .legend(Legend::default())
        .x_axis_formatter(index_axis_formatter(labels))
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for (i, g) in groups.iter().enumerate() {
                let color = colors.color_for(&g.label);
                let x0 = i as f64;

                let max_density = g
                    .profile
                    .iter()
                    .map(|&(_, d)| d)
                    .fold(0.0_f64, f64::max);
                if max_density > 0.0 {
                    let half_width = 0.35;
                    let mut points: Vec<[f64; 2]> = g
                        .profile
                        .iter()
                        .map(|&(v, d)| [x0 + d / max_density * half_width, v])
                        .collect();
                    points.extend(
                        g.profile
                            .iter()
                            .rev()
                            .map(|&(v, d)| [x0 - d / max_density * half_width, v]),
                    );
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(points))
                            .name(&g.label)
                            .fill_color(color.gamma_multiply(0.35))
                            .stroke(Stroke::new(1.0, color)),
                    );
                }

                let st = g.stats;
                let inner = BoxElem::new(
                    x0,
                    BoxSpread::new(st.min, st.q1, st.median, st.q3, st.max),
                )
                .box_width(0.08)
                .whisker_width(0.0)
                .fill(color.gamma_multiply(0.8))
                .stroke(Stroke::new(1.0, color));
                plot_ui.box_plot(BoxPlot::new(vec![inner]).color(color));
            }
        });
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

fn heatmap_chart(ui: &mut Ui, id: &str, matrix: &CorrelationMatrix) {
    let n = matrix.fields.len();
    if n == 0 {
        ui.label("No numeric columns available.");
        return;
    }

    let x_labels = matrix.fields.clone();
    // Rows are drawn top-down, so the y axis runs in reverse field order.
    let y_labels: Vec<String> = matrix.fields.iter().rev().cloned().collect();

    Plot::new(id)
        .height(420.0)
        .data_aspect(1.0)
        .show_grid(false)
        .x_axis_formatter(index_axis_formatter(x_labels))
        .y_axis_formatter(index_axis_formatter(y_labels))
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for i in 0..n {
                for j in 0..n {
                    let r = matrix.cells[i][j];
                    let fill = if r.is_nan() {
                        Color32::DARK_GRAY
                    } else {
                        color::diverging_color(((r + 1.0) / 2.0) as f32)
                    };
                    let x = j as f64;
                    let y = (n - 1 - i) as f64;
                    let cell: Vec<[f64; 2]> = vec![
                        [x - 0.5, y - 0.5],
                        [x + 0.5, y - 0.5],
                        [x + 0.5, y + 0.5],
                        [x - 0.5, y + 0.5],
                    ];
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(cell))
                            .fill_color(fill)
                            .stroke(Stroke::new(0.5, Color32::from_gray(40))),
                    );
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Data table preview and download
// ---------------------------------------------------------------------------

fn data_table(ui: &mut Ui, state: &mut AppState) {
    let preview = view::preview(&state.visible_indices);
    ui.label(format!(
        "Showing the first {} of {} filtered rows.",
        preview.len(),
        state.visible_indices.len()
    ));
    ui.add_space(4.0);

    let columns = &state.dataset.columns;
    ScrollArea::horizontal()
        .id_salt("preview_table")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .columns(Column::auto().at_least(70.0), columns.len())
                .max_scroll_height(320.0)
                .header(20.0, |mut header| {
                    for col in columns {
                        header.col(|ui| {
                            ui.strong(col.as_str());
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, preview.len(), |mut row| {
                        let record = &state.dataset.rows[preview[row.index()]];
                        for col in columns {
                            row.col(|ui| {
                                ui.label(
                                    record
                                        .get(col)
                                        .map(|v| v.to_string())
                                        .unwrap_or_default(),
                                );
                            });
                        }
                    });
                });
        });

    ui.add_space(6.0);
    if ui.button("Download Filtered Data").clicked() {
        super::panels::save_filtered_csv(state);
    }
}
