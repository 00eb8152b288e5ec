//! Background load of the metric listing.

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;

use crate::data::loader::MetricsSource;
use crate::data::metric::MetricRow;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum ListingState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// One listing request at a time; a new [`start`](Self::start) supersedes the previous one.
pub struct ListingLoader {
    state: ListingState,
    rx: Option<Receiver<Result<Vec<MetricRow>>>>,
    /// The API healthcheck rides along with the first load only.
    health_checked: bool,
}

impl Default for ListingLoader {
    fn default() -> Self {
        Self {
            state: ListingState::Idle,
            rx: None,
            health_checked: false,
        }
    }
}

impl ListingLoader {
    pub fn state(&self) -> &ListingState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == ListingState::Loading
    }

    /// Load `organization`'s listing from `source`, checking API health first on the initial load.
    pub fn load<S, N>(&mut self, source: Arc<S>, organization: String, notify: N)
    where
        S: MetricsSource,
        N: FnOnce() + Send + 'static,
    {
        let check_health = !std::mem::replace(&mut self.health_checked, true);
        self.start(
            move || {
                if check_health {
                    match source.healthcheck() {
                        Ok(()) => tracing::info!("API healthcheck passed"),
                        Err(e) => tracing::warn!(error = %e, "healthcheck failed"),
                    }
                }
                source.list_metrics(&organization)
            },
            notify,
        );
    }

    /// Run `fetch` on a worker thread; `notify` runs there once it finishes.
    pub fn start<F, N>(&mut self, fetch: F, notify: N)
    where
        F: FnOnce() -> Result<Vec<MetricRow>> + Send + 'static,
        N: FnOnce() + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let spawned = std::thread::Builder::new()
            .name("metrics-listing".to_string())
            .spawn(move || {
                let _ = tx.send(fetch());
                notify();
            });
        match spawned {
            Ok(_) => {
                self.state = ListingState::Loading;
                self.rx = Some(rx);
            }
            Err(e) => {
                self.state = ListingState::Failed(e.to_string());
                self.rx = None;
            }
        }
    }

    /// Rows of a listing that finished since the last call.
    pub fn poll(&mut self) -> Option<Vec<MetricRow>> {
        let result = self.rx.as_ref()?.try_recv().ok()?;
        self.rx = None;
        match result {
            Ok(rows) => {
                self.state = ListingState::Loaded;
                Some(rows)
            }
            Err(e) => {
                tracing::warn!(error = %e, "metrics listing failed");
                self.state = ListingState::Failed(e.to_string());
                None
            }
        }
    }
}
