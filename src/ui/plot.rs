use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui, Vec2, pos2};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::color::CategoryColors;
use crate::views::correlation::CorrelationData;
use crate::views::proportion::ProportionData;

// ---------------------------------------------------------------------------
// Proportion chart (pie)
// ---------------------------------------------------------------------------

/// Angular span `(start, end)` of every slice, clockwise from 12 o'clock.
/// Zero-valued slices get `None`; so does everything when the total is zero.
pub fn wedge_spans(values: &[usize]) -> Vec<Option<(f32, f32)>> {
    let total: usize = values.iter().sum();
    if total == 0 {
        return vec![None; values.len()];
    }
    let mut start = -FRAC_PI_2;
    values
        .iter()
        .map(|&v| {
            if v == 0 {
                return None;
            }
            let end = start + TAU * v as f32 / total as f32;
            let span = (start, end);
            start = end;
            Some(span)
        })
        .collect()
}

fn on_circle(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    pos2(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

/// Fill one wedge as a fan of convex pieces, each at most a quarter turn.
fn fill_wedge(painter: &egui::Painter, center: Pos2, radius: f32, (a0, a1): (f32, f32), color: Color32) {
    let pieces = ((a1 - a0) / FRAC_PI_4).ceil().max(1.0) as usize;
    let step = (a1 - a0) / pieces as f32;
    for p in 0..pieces {
        let from = a0 + p as f32 * step;
        let mut points = vec![center];
        for k in 0..=8 {
            points.push(on_circle(center, radius, from + step * k as f32 / 8.0));
        }
        painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
    }
}

/// Render the pie with "label + percent" drawn inside each slice and a
/// legend to its right.
pub fn proportion_chart(ui: &mut Ui, data: &ProportionData) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(data.title.as_str());
    });

    if data.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.weak("No launches match the current selection");
        });
        return;
    }

    let values: Vec<usize> = data.slices.iter().map(|s| s.value).collect();
    let labels: Vec<String> = data.slices.iter().map(|s| s.label.clone()).collect();
    let spans = wedge_spans(&values);
    let palette = CategoryColors::new(&labels);
    let legend = palette.legend_entries();
    let colors: Vec<Color32> = legend.iter().map(|(_, c)| *c).collect();

    ui.horizontal(|ui: &mut Ui| {
        let side = ui
            .available_height()
            .min(ui.available_width() * 0.7)
            .max(120.0);
        let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::hover());
        let center = response.rect.center();
        let radius = side * 0.47;

        for (span, &color) in spans.iter().zip(&colors) {
            if let Some(span) = span {
                fill_wedge(&painter, center, radius, *span, color);
            }
        }

        let visible = spans.iter().flatten().count();
        if visible > 1 {
            for (a0, _) in spans.iter().flatten() {
                painter.line_segment(
                    [center, on_circle(center, radius, *a0)],
                    Stroke::new(1.5, Color32::WHITE),
                );
            }
        }

        for (i, (slice, span)) in data.slices.iter().zip(&spans).enumerate() {
            let Some((a0, a1)) = span else {
                continue;
            };
            let at = if visible == 1 {
                center
            } else {
                on_circle(center, radius * 0.62, (a0 + a1) / 2.0)
            };
            painter.text(
                at,
                Align2::CENTER_CENTER,
                format!("{}\n{:.1}%", slice.label, data.share(i)),
                FontId::proportional(12.0),
                Color32::WHITE,
            );
        }

        ui.vertical(|ui: &mut Ui| {
            for ((label, color), value) in legend.iter().zip(&values) {
                ui.horizontal(|ui: &mut Ui| {
                    let (swatch, _) = ui.allocate_exact_size(Vec2::splat(10.0), Sense::hover());
                    ui.painter().rect_filled(swatch, 2.0, *color);
                    ui.label(format!("{label}  ({value})"));
                });
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Correlation chart (scatter)
// ---------------------------------------------------------------------------

/// Payload mass vs. outcome, one point series per booster category.
pub fn correlation_chart(ui: &mut Ui, data: &CorrelationData, colors: &CategoryColors) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(data.title.as_str());
    });

    Plot::new("correlation_chart")
        .legend(Legend::default())
        .x_axis_label(data.x_label.as_str())
        .y_axis_label(data.y_label.as_str())
        .include_x(0.0)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &data.series {
                let points: PlotPoints = series.points.iter().copied().collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&series.category)
                        .color(colors.color_for(&series.category))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });
}
