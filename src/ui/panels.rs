use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Ui, Vec2, pos2};

use crate::data::catalog::SiteSelection;
use crate::data::filter::{PayloadRange, SiteFilterComposition};
use crate::state::{AppState, ControlEvent};

// ---------------------------------------------------------------------------
// Site selector
// ---------------------------------------------------------------------------

/// Searchable single-choice selector over the site catalog.
/// Returns an event only when the selection actually changes.
pub fn site_selector(ui: &mut Ui, state: &mut AppState) -> Option<ControlEvent> {
    let mut chosen: Option<SiteSelection> = None;

    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Launch Site");
        egui::ComboBox::from_id_salt("site_selector")
            .selected_text(state.filter.site.to_string())
            .width(280.0)
            .show_ui(ui, |ui: &mut Ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut state.site_query)
                        .hint_text("Select a Launch Site"),
                );
                ui.separator();

                let hits = state.catalog.search(&state.site_query);
                if hits.is_empty() {
                    ui.weak("No matching site");
                }
                for entry in hits {
                    let selected = state.filter.site == *entry;
                    if ui.selectable_label(selected, entry.to_string()).clicked() {
                        chosen = Some(entry.clone());
                    }
                }
            });
    });

    let site = chosen.filter(|s| *s != state.filter.site)?;
    state.site_query.clear();
    Some(ControlEvent::SiteChanged(site))
}

// ---------------------------------------------------------------------------
// Payload range selector
// ---------------------------------------------------------------------------

/// Two sliders (from / to) over the configured bounds with a tick row
/// labelling each step.
pub fn payload_range(ui: &mut Ui, state: &AppState) -> Option<ControlEvent> {
    let (min, max) = state.slider_bounds;
    let mut lo = state.filter.payload.lo();
    let mut hi = state.filter.payload.hi();
    let mut lo_changed = false;
    let mut hi_changed = false;

    ui.label("Payload range (Kg):");
    let slider_width = (ui.available_width() - 120.0).max(200.0);
    ui.spacing_mut().slider_width = slider_width;

    lo_changed |= ui
        .add(
            egui::Slider::new(&mut lo, min..=max)
                .step_by(state.slider_step)
                .text("from"),
        )
        .changed();
    tick_row(ui, &state.slider_marks, (min, max));
    hi_changed |= ui
        .add(
            egui::Slider::new(&mut hi, min..=max)
                .step_by(state.slider_step)
                .text("to"),
        )
        .changed();

    if !lo_changed && !hi_changed {
        return None;
    }
    let range = PayloadRange::dragged(lo, hi, lo_changed);
    (range != state.filter.payload).then_some(ControlEvent::PayloadChanged(range))
}

fn tick_row(ui: &mut Ui, marks: &[f64], (min, max): (f64, f64)) {
    let width = ui.spacing().slider_width;
    let (rect, _) = ui.allocate_exact_size(Vec2::new(width, 14.0), Sense::hover());
    let span = (max - min).max(f64::EPSILON);
    let color = ui.visuals().weak_text_color();
    let painter = ui.painter();
    for &m in marks {
        let t = ((m - min) / span) as f32;
        let x = rect.left() + t * rect.width();
        painter.text(
            pos2(x, rect.center().y),
            Align2::CENTER_CENTER,
            format!("{m:.0}"),
            FontId::proportional(10.0),
            color,
        );
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the status bar: dataset size, rows shown, composition policy.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!(
            "{} launches loaded, {} shown in scatter",
            state.dataset.len(),
            state.correlation.data.point_count()
        ));

        ui.separator();

        ui.label(format!(
            "Payload {:.0} – {:.0} kg",
            state.filter.payload.lo(),
            state.filter.payload.hi()
        ));

        if state.composition == SiteFilterComposition::Override && !state.filter.site.is_all() {
            ui.separator();
            ui.label(
                RichText::new("payload range ignored while a site is selected")
                    .color(Color32::from_rgb(200, 120, 0)),
            );
        }
    });
}
