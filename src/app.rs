use eframe::egui::{self, Color32, RichText};
use egui_extras::{Size, StripBuilder};

use crate::state::{AppState, ControlEvent};
use crate::ui::{panels, plot};

pub const TITLE: &str = "SpaceX Launch Records Dashboard";

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashboardApp {
    pub state: AppState,
}

impl LaunchDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for LaunchDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut events: Vec<ControlEvent> = Vec::new();

        // ---- Top panel: status bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Central panel: heading, controls, charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(
                    RichText::new(TITLE)
                        .size(32.0)
                        .color(Color32::from_rgb(0x50, 0x3D, 0x36)),
                );
            });
            ui.add_space(6.0);

            events.extend(panels::site_selector(ui, &mut self.state));
            ui.separator();

            let state = &self.state;
            StripBuilder::new(ui)
                .size(Size::relative(0.42).at_least(180.0))
                .size(Size::exact(90.0))
                .size(Size::remainder().at_least(200.0))
                .vertical(|mut strip| {
                    strip.cell(|ui| {
                        plot::proportion_chart(ui, &state.proportion.data);
                    });
                    strip.cell(|ui| {
                        events.extend(panels::payload_range(ui, state));
                    });
                    strip.cell(|ui| {
                        plot::correlation_chart(ui, &state.correlation.data, &state.booster_colors);
                    });
                });
        });

        // Everything on screen now reflects the current filter state; new
        // events are applied in one go and shown on the next frame.
        self.state.mark_presented();
        if !events.is_empty() {
            for event in events {
                self.state.dispatch(event);
            }
            ctx.request_repaint();
        }
    }
}
