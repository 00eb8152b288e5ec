//! Configuration types for the dashboard and its views.
//!
//! Everything has a `Default`; a YAML file (see [`DashboardConfig::from_yaml_file`])
//! can override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::metric::Horizon;
use crate::data::resolver::ResolverConfig;
use crate::error::Result;

// ─────────────────────────────────────────────────────────────────────────────
// Margin
// ─────────────────────────────────────────────────────────────────────────────

/// Padding in points around a chart.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margin {
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-view configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Urgency scatterplot above the table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterplotConfig {
    pub margin: Margin,
    /// Plot height in points. Default: `250.0`.
    pub height: f32,
    /// Tooltip search cutoff in pixels. Default: `100.0`.
    pub hover_radius: f64,
    /// Click-to-select search cutoff in pixels. Default: `50.0`.
    pub click_radius: f64,
    /// Marker radius for unselected points.
    pub point_radius: f32,
    /// Marker radius for the selected point.
    pub selected_point_radius: f32,
}

impl Default for ScatterplotConfig {
    fn default() -> Self {
        Self {
            margin: Margin::new(30.0, 40.0, 50.0, 100.0),
            height: 250.0,
            hover_radius: 100.0,
            click_radius: 50.0,
            point_radius: 8.0,
            selected_point_radius: 12.0,
        }
    }
}

/// Forecast chart shown inside an expanded table row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSeriesConfig {
    pub margin: Margin,
    /// Chart height in points. Default: `300.0`.
    pub height: f32,
    /// Tooltip search cutoff in pixels, measured along the time axis only. Default: `200.0`.
    pub hover_radius: f64,
    /// Hide the time axis labels.
    pub compact: bool,
}

impl Default for TimeSeriesConfig {
    fn default() -> Self {
        Self {
            margin: Margin::new(50.0, 20.0, 20.0, 80.0),
            height: 300.0,
            hover_radius: 200.0,
            compact: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// DashboardConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration.
///
/// | Field            | Purpose |
/// |------------------|---------|
/// | `api_url`        | Base URL of the predictive-capacity API |
/// | `organization`   | Organization passed to the listing endpoint |
/// | `scatterplot`    | Urgency scatterplot sizing and hit radii |
/// | `time_series`    | Per-row forecast chart sizing and hit radius |
/// | `leave_delay_ms` | Tooltip hide delay after the pointer leaves a chart |
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_url: String,
    pub organization: String,
    /// Native window title.
    pub title: String,
    /// Per-request HTTP timeout in seconds.
    pub request_timeout_secs: u64,
    pub leave_delay_ms: u64,
    /// Horizon initially shown in the saturation column.
    pub default_horizon: Horizon,
    pub scatterplot: ScatterplotConfig,
    pub time_series: TimeSeriesConfig,
    /// Optional eframe native-window options.
    #[serde(skip)]
    pub native_options: Option<eframe::NativeOptions>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            organization: "test".to_string(),
            title: "Predictive Capacity".to_string(),
            request_timeout_secs: 30,
            leave_delay_ms: 300,
            default_horizon: Horizon::default(),
            scatterplot: ScatterplotConfig::default(),
            time_series: TimeSeriesConfig::default(),
            native_options: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&s)
    }

    fn leave_delay_secs(&self) -> f64 {
        self.leave_delay_ms as f64 / 1000.0
    }

    /// Resolver tuning for the scatterplot: hover tooltips plus click selection.
    pub fn scatter_resolver(&self) -> ResolverConfig {
        ResolverConfig {
            hover_radius: self.scatterplot.hover_radius,
            click_radius: Some(self.scatterplot.click_radius),
            leave_delay_secs: self.leave_delay_secs(),
        }
    }

    /// Resolver tuning for row charts: hover only.
    pub fn time_series_resolver(&self) -> ResolverConfig {
        ResolverConfig {
            hover_radius: self.time_series.hover_radius,
            click_radius: None,
            leave_delay_secs: self.leave_delay_secs(),
        }
    }
}
