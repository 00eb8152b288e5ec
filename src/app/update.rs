//! Per-frame update of [`DashboardApp`].

use std::time::Duration;

use eframe::egui;
use egui_phosphor::regular as icons;

use super::{DashboardApp, ListingState};

impl DashboardApp {
    fn header_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading(self.config.title.as_str());
            ui.separator();
            ui.label(format!("Organization: {}", self.config.organization));
            ui.separator();
            let reload = ui.add_enabled(
                !self.listing.is_loading(),
                egui::Button::new(format!("{} Reload", icons::ARROWS_CLOCKWISE)),
            );
            if reload.clicked() {
                self.reload();
            }
            let has_selection = self.selection.borrow().selected().is_some();
            if ui
                .add_enabled(has_selection, egui::Button::new("Clear selection"))
                .clicked()
            {
                self.selection.borrow_mut().clear();
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak(format!("{} metrics", self.rows.len()));
            });
        });
    }

    fn body_ui(&mut self, ui: &mut egui::Ui) {
        match self.listing.state().clone() {
            ListingState::Idle | ListingState::Loading if self.rows.is_empty() => {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
                return;
            }
            ListingState::Failed(msg) => {
                ui.horizontal(|ui| {
                    ui.colored_label(ui.visuals().error_fg_color, format!("Could not load metrics: {msg}"));
                    if ui.button("Retry").clicked() {
                        self.reload();
                    }
                });
                if self.rows.is_empty() {
                    return;
                }
            }
            _ => {}
        }

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.scatter
                    .show(ui, &self.rows, self.generation, &self.selection);
                ui.add_space(8.0);
                let hovered = self.scatter.hovered_row();
                self.table
                    .show(ui, &self.rows, &self.selection, &mut self.loader, hovered);
            });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// eframe integration
// ─────────────────────────────────────────────────────────────────────────────

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(rows) = self.listing.poll() {
            self.apply_listing(rows);
        }
        self.loader.poll();

        egui::TopBottomPanel::top("dashboard_header").show(ctx, |ui| {
            self.header_ui(ui);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.body_ui(ui);
        });

        // Worker threads request a repaint when done; this is a fallback in case one is missed.
        if self.listing.is_loading() || self.loader.in_flight() > 0 {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
