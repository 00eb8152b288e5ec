//! Forecast time series delivered by `/predictions/{uuid}`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// Raw JSON body of a prediction response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionPayload {
    pub data_scaled: Vec<f64>,
    pub data_dates: Vec<String>,
    pub forecast: Vec<f64>,
    pub forecast_dates: Vec<String>,
}

/// Validated time series: history followed by forecast, dates as UNIX seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesRecord {
    /// `[t, value]` pairs of the scaled history.
    pub history: Vec<[f64; 2]>,
    /// `[t, value]` pairs of the forecast.
    pub forecast: Vec<[f64; 2]>,
}

impl TryFrom<PredictionPayload> for TimeSeriesRecord {
    type Error = DashboardError;

    fn try_from(p: PredictionPayload) -> Result<Self> {
        let history = zip_series(&p.data_dates, &p.data_scaled, "data_dates", "data_scaled")?;
        let forecast = zip_series(&p.forecast_dates, &p.forecast, "forecast_dates", "forecast")?;
        Ok(Self { history, forecast })
    }
}

fn zip_series(
    dates: &[String],
    values: &[f64],
    dates_field: &'static str,
    values_field: &'static str,
) -> Result<Vec<[f64; 2]>> {
    if dates.len() != values.len() {
        return Err(DashboardError::LengthMismatch {
            field: values_field,
            other: dates_field,
            left: values.len(),
            right: dates.len(),
        });
    }
    dates
        .iter()
        .zip(values)
        .map(|(d, &v)| Ok([parse_date(d)?, v]))
        .collect()
}

/// Parse an ISO-8601 date into UNIX seconds. Timezone-less values are taken as UTC.
///
/// ```
/// # use capdash::data::prediction::parse_date;
/// assert_eq!(parse_date("1970-01-02").unwrap(), 86_400.0);
/// assert_eq!(parse_date("1970-01-01T00:01:00Z").unwrap(), 60.0);
/// assert!(parse_date("yesterday").is_err());
/// ```
pub fn parse_date(s: &str) -> Result<f64> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.timestamp_millis() as f64 / 1000.0);
    }
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
    ];
    for fmt in NAIVE_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ndt.and_utc().timestamp_millis() as f64 / 1000.0);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc().timestamp() as f64)
        .ok_or_else(|| DashboardError::InvalidDate(s.to_string()))
}

impl TimeSeriesRecord {
    /// History then forecast, in that order. Used to build the chart's hit-test index.
    pub fn all_points(&self) -> impl Iterator<Item = &[f64; 2]> {
        self.history.iter().chain(self.forecast.iter())
    }

    pub fn len(&self) -> usize {
        self.history.len() + self.forecast.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Time span from the first history date to the last forecast date.
    ///
    /// Falls back to whichever sequence is non-empty; `None` when both are empty.
    pub fn date_extent(&self) -> Option<(f64, f64)> {
        let start = self.history.first().or(self.forecast.first())?[0];
        let end = self.forecast.last().or(self.history.last())?[0];
        Some((start.min(end), start.max(end)))
    }

    /// Min/max over both sequences. An empty side contributes `0.0`, as a missing extent would.
    pub fn value_extent(&self) -> (f64, f64) {
        let side = |pts: &[[f64; 2]]| {
            let mut lo = f64::INFINITY;
            let mut hi = f64::NEG_INFINITY;
            for p in pts.iter().filter(|p| p[1].is_finite()) {
                lo = lo.min(p[1]);
                hi = hi.max(p[1]);
            }
            if lo.is_finite() {
                (lo, hi)
            } else {
                (0.0, 0.0)
            }
        };
        let (h_lo, h_hi) = side(&self.history);
        let (f_lo, f_hi) = side(&self.forecast);
        (h_lo.min(f_lo), h_hi.max(f_hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_datetime_is_utc() {
        assert_eq!(parse_date("1970-01-01T01:00:00").unwrap(), 3600.0);
        assert_eq!(parse_date("1970-01-01 00:00:01.500").unwrap(), 1.5);
    }

    #[test]
    fn offset_is_respected() {
        assert_eq!(parse_date("1970-01-01T01:00:00+01:00").unwrap(), 0.0);
    }

    #[test]
    fn value_extent_counts_empty_side_as_zero() {
        let rec = TimeSeriesRecord {
            history: vec![[0.0, 0.5], [1.0, 0.7]],
            forecast: vec![],
        };
        assert_eq!(rec.value_extent(), (0.0, 0.7));
    }
}
