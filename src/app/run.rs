//! Top-level entry point for running the dashboard as a native window.

use std::time::Duration;

use eframe::egui;

use crate::api::ApiClient;
use crate::config::DashboardConfig;

use super::DashboardApp;

/// Launch the dashboard in a native window. Blocks until the window is closed.
pub fn run_dashboard(mut cfg: DashboardConfig) -> eframe::Result<()> {
    let client = ApiClient::new(&cfg.api_url, Duration::from_secs(cfg.request_timeout_secs))
        .map_err(|e| eframe::Error::AppCreation(Box::new(e)))?;

    let title = cfg.title.clone();
    let mut opts = cfg.native_options.take().unwrap_or_default();
    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts
            .viewport
            .clone()
            .with_inner_size(egui::vec2(1400.0, 900.0))
            .with_title(title.clone());
    }

    eframe::run_native(
        &title,
        opts,
        Box::new(move |cc| {
            // Install Phosphor icon font before creating the app.
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(DashboardApp::new(&cc.egui_ctx, cfg, client)))
        }),
    )
}
