//! Blocking HTTP client for the predictive-capacity API.
//!
//! All calls block; the UI only invokes them from worker threads.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::data::loader::{MetricsSource, PredictionSource};
use crate::data::metric::MetricRow;
use crate::data::prediction::{PredictionPayload, TimeSeriesRecord};
use crate::error::{DashboardError, Result};

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /healthcheck`.
    pub fn healthcheck(&self) -> Result<()> {
        let _: serde_json::Value = self.get_json("/healthcheck", &[])?;
        Ok(())
    }

    /// `GET /metrics?organization=..`: the dashboard listing.
    pub fn list_metrics(&self, organization: &str) -> Result<Vec<MetricRow>> {
        let rows: Vec<MetricRow> = self.get_json("/metrics", &[("organization", organization)])?;
        tracing::info!(organization, rows = rows.len(), "metrics listing loaded");
        Ok(rows)
    }

    /// `GET /predictions/{uuid}`: one row's history and forecast.
    pub fn prediction(&self, uuid: &str) -> Result<TimeSeriesRecord> {
        let payload: PredictionPayload = self.get_json(&format!("/predictions/{uuid}"), &[])?;
        TimeSeriesRecord::try_from(payload)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "GET");
        let resp = self.http.get(&url).query(query).send()?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DashboardError::NotFound(url));
        }
        if !status.is_success() {
            return Err(DashboardError::Status {
                status: status.as_u16(),
                url,
            });
        }
        let body = resp.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl MetricsSource for ApiClient {
    fn healthcheck(&self) -> Result<()> {
        ApiClient::healthcheck(self)
    }

    fn list_metrics(&self, organization: &str) -> Result<Vec<MetricRow>> {
        ApiClient::list_metrics(self, organization)
    }
}

impl PredictionSource for ApiClient {
    fn fetch_prediction(&self, uuid: &str) -> Result<TimeSeriesRecord> {
        self.prediction(uuid)
    }
}
