//! Metric rows as delivered by the `/metrics` listing endpoint.

use serde::{Deserialize, Deserializer, Serialize};

/// `days_to_full` at or above this value means "not forecast to fill".
pub const DAYS_TO_FULL_HORIZON: f64 = 1000.0;

/// Label shown instead of a day count when the horizon is unbounded.
pub const UNBOUNDED_DAYS_LABEL: &str = "+300";

/// Accept `null` (or a missing field) as NaN so a single bad row never fails the listing.
fn nullable_f64<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(de)?.unwrap_or(f64::NAN))
}

fn nan() -> f64 {
    f64::NAN
}

/// Current vs. forecast saturation at one horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaturationForecast {
    #[serde(default = "nan", deserialize_with = "nullable_f64")]
    pub current_saturation: f64,
    #[serde(default = "nan", deserialize_with = "nullable_f64")]
    pub forecast: f64,
}

impl Default for SaturationForecast {
    fn default() -> Self {
        Self {
            current_saturation: f64::NAN,
            forecast: f64::NAN,
        }
    }
}

/// One monitored metric with its forecast summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    pub uuid: String,
    #[serde(default)]
    pub metric_name: String,
    #[serde(default)]
    pub host_name: String,
    #[serde(default)]
    pub host_id: String,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub service_name: String,
    #[serde(default = "nan", deserialize_with = "nullable_f64")]
    pub days_to_full: f64,
    #[serde(default = "nan", deserialize_with = "nullable_f64")]
    pub current_saturation: f64,
    #[serde(default = "nan", deserialize_with = "nullable_f64")]
    pub confidence_level: f64,
    #[serde(default)]
    pub saturation_3_months: SaturationForecast,
    #[serde(default)]
    pub saturation_6_months: SaturationForecast,
    #[serde(default)]
    pub saturation_12_months: SaturationForecast,
}

impl MetricRow {
    /// Saturation pair for the given forecast horizon.
    pub fn saturation(&self, horizon: Horizon) -> &SaturationForecast {
        match horizon {
            Horizon::ThreeMonths => &self.saturation_3_months,
            Horizon::SixMonths => &self.saturation_6_months,
            Horizon::TwelveMonths => &self.saturation_12_months,
        }
    }

    /// Negated days-to-full, present only for rows that belong on the urgency scatterplot.
    ///
    /// `0` marks a metric that is already saturated and is kept; missing values and
    /// the `>= 1000` "never full" sentinel are not.
    ///
    /// ```
    /// # use capdash::data::metric::MetricRow;
    /// let mut row = MetricRow::new("a");
    /// row.days_to_full = 42.0;
    /// assert_eq!(row.neg_days_to_full(), Some(-42.0));
    /// row.days_to_full = 0.0;
    /// assert_eq!(row.neg_days_to_full(), Some(-0.0));
    /// row.days_to_full = 1000.0;
    /// assert_eq!(row.neg_days_to_full(), None);
    /// ```
    pub fn neg_days_to_full(&self) -> Option<f64> {
        let d = self.days_to_full;
        (d.is_finite() && d >= 0.0 && d < DAYS_TO_FULL_HORIZON).then_some(-d)
    }

    /// Empty row with only an identifier; mostly useful for tests and fixtures.
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            metric_name: String::new(),
            host_name: String::new(),
            host_id: String::new(),
            service_id: String::new(),
            service_name: String::new(),
            days_to_full: f64::NAN,
            current_saturation: f64::NAN,
            confidence_level: f64::NAN,
            saturation_3_months: SaturationForecast::default(),
            saturation_6_months: SaturationForecast::default(),
            saturation_12_months: SaturationForecast::default(),
        }
    }
}

/// Forecast horizon shown in the table's saturation column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Horizon {
    #[default]
    ThreeMonths,
    SixMonths,
    TwelveMonths,
}

impl Horizon {
    pub const ALL: [Horizon; 3] = [Horizon::ThreeMonths, Horizon::SixMonths, Horizon::TwelveMonths];

    pub fn label(&self) -> &'static str {
        match self {
            Horizon::ThreeMonths => "3 months",
            Horizon::SixMonths => "6 months",
            Horizon::TwelveMonths => "12 months",
        }
    }
}

impl std::fmt::Display for Horizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A row projected into the scatterplot's data space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterRecord {
    /// Index of the source row in the dataset.
    pub row: usize,
    pub neg_days_to_full: f64,
    pub current_saturation: f64,
}

/// Rows eligible for the urgency scatterplot, in dataset order.
pub fn scatter_records(rows: &[MetricRow]) -> Vec<ScatterRecord> {
    rows.iter()
        .enumerate()
        .filter_map(|(row, m)| {
            let neg = m.neg_days_to_full()?;
            m.current_saturation.is_finite().then_some(ScatterRecord {
                row,
                neg_days_to_full: neg,
                current_saturation: m.current_saturation,
            })
        })
        .collect()
}

/// Integer day count, or the unbounded label for missing / far-horizon values.
///
/// ```
/// # use capdash::data::metric::format_days_to_full;
/// assert_eq!(format_days_to_full(12.4), "12");
/// assert_eq!(format_days_to_full(f64::NAN), "+300");
/// assert_eq!(format_days_to_full(1500.0), "+300");
/// ```
pub fn format_days_to_full(days: f64) -> String {
    if days.is_finite() && days < DAYS_TO_FULL_HORIZON {
        format!("{:.0}", days)
    } else {
        UNBOUNDED_DAYS_LABEL.to_string()
    }
}

/// Format a 0..1 fraction as a percentage with the given number of decimals.
///
/// ```
/// # use capdash::data::metric::format_percent;
/// assert_eq!(format_percent(0.4567, 2), "45.67%");
/// assert_eq!(format_percent(0.4567, 0), "46%");
/// ```
pub fn format_percent(fraction: f64, decimals: usize) -> String {
    if fraction.is_finite() {
        format!("{:.*}%", decimals, fraction * 100.0)
    } else {
        "–".to_string()
    }
}
