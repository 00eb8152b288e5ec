//! capdash crate root: re-exports and module wiring.
//!
//! A capacity-planning dashboard built on egui/eframe. It lists monitored
//! metrics with their forecasted saturation, plots urgency (days until full vs.
//! current saturation) and shows a forecast chart for every expanded row.
//!
//! - `data`: UI-independent model, scales, hit testing, selection and loading
//! - `api`: blocking client for the predictive-capacity HTTP API
//! - `panels`: egui views (table, scatterplot, forecast chart, glyphs)
//! - `app`: the [`DashboardApp`] and [`run_dashboard`] entry point
//! - `config`: typed configuration, loadable from YAML

pub mod api;
pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod panels;

pub use api::ApiClient;
pub use app::{run_dashboard, DashboardApp};
pub use config::{DashboardConfig, Margin, ScatterplotConfig, TimeSeriesConfig};
pub use error::{DashboardError, Result};
