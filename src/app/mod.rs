//! Dashboard application wiring.
//!
//! | Sub-module  | Responsibility |
//! | ----------- | -------------- |
//! | [`listing`] | Background load of the metric listing |
//! | [`update`]  | Per-frame polling and layout ([`eframe::App`] impl) |
//! | [`run`]     | [`run_dashboard()`] entry point |

mod listing;
mod run;
mod update;

pub use listing::{ListingLoader, ListingState};
pub use run::run_dashboard;

use std::sync::Arc;

use eframe::egui;

use crate::api::ApiClient;
use crate::config::DashboardConfig;
use crate::data::loader::DetailLoader;
use crate::data::metric::MetricRow;
use crate::data::selection::{Selection, SharedSelection};
use crate::panels::{MetricTable, ScatterplotPanel};

/// Standalone dashboard implementing [`eframe::App`].
///
/// Owns the dataset and every piece of view state. The table and the
/// scatterplot share one [`Selection`] through a [`SharedSelection`] handle.
pub struct DashboardApp {
    pub config: DashboardConfig,
    client: Arc<ApiClient>,
    ctx: egui::Context,

    // ── Data ─────────────────────────────────────────────────────────────────
    rows: Vec<MetricRow>,
    /// Bumped whenever `rows` is replaced so views rebuild their indices.
    generation: u64,
    listing: ListingLoader,
    loader: DetailLoader<ApiClient>,

    // ── Views ────────────────────────────────────────────────────────────────
    selection: SharedSelection,
    scatter: ScatterplotPanel,
    table: MetricTable,
}

impl DashboardApp {
    pub fn new(ctx: &egui::Context, config: DashboardConfig, client: ApiClient) -> Self {
        let client = Arc::new(client);
        let repaint = ctx.clone();
        let loader =
            DetailLoader::from_shared(Arc::clone(&client)).with_notify(move || repaint.request_repaint());
        let scatter = ScatterplotPanel::new(config.scatterplot.clone(), config.scatter_resolver());
        let table = MetricTable::new(
            config.default_horizon,
            config.time_series.clone(),
            config.time_series_resolver(),
        );
        let mut app = Self {
            config,
            client,
            ctx: ctx.clone(),
            rows: Vec::new(),
            generation: 0,
            listing: ListingLoader::default(),
            loader,
            selection: Selection::shared(),
            scatter,
            table,
        };
        app.reload();
        app
    }

    /// (Re)load the metric listing in the background.
    pub fn reload(&mut self) {
        let client = Arc::clone(&self.client);
        let organization = self.config.organization.clone();
        let ctx = self.ctx.clone();
        tracing::info!(api = client.base_url(), %organization, "loading metrics listing");
        self.listing.load(client, organization, move || ctx.request_repaint());
    }

    fn apply_listing(&mut self, rows: Vec<MetricRow>) {
        self.rows = rows;
        self.generation += 1;
        self.selection.borrow_mut().reconcile(&self.rows);
        self.table.reset_views();
    }
}
