//! Lazy per-row loading of forecast time series.
//!
//! Expanding a table row asks the [`DetailLoader`] for that row's series. The
//! first expansion starts one background fetch; the result is cached for the
//! lifetime of the loader, so later expansions are served from memory.
//! Collapsing a row while its fetch is in flight does not cancel it; the result
//! is still cached when it arrives.
//!
//! Fetches run on short-lived worker threads and report back over a channel;
//! the UI thread calls [`DetailLoader::poll`] once per frame to apply them.

use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use super::metric::MetricRow;
use super::prediction::TimeSeriesRecord;
use crate::error::Result;

/// Anything that can produce the metric listing.
pub trait MetricsSource: Send + Sync + 'static {
    fn healthcheck(&self) -> Result<()>;
    fn list_metrics(&self, organization: &str) -> Result<Vec<MetricRow>>;
}

/// Anything that can produce the time series for a row.
pub trait PredictionSource: Send + Sync + 'static {
    fn fetch_prediction(&self, uuid: &str) -> Result<TimeSeriesRecord>;
}

/// Load state of one row's detail series.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(Arc<TimeSeriesRecord>),
    /// The fetch failed; holds the error message. Can be retried.
    Failed(String),
}

type Notify = Arc<dyn Fn() + Send + Sync>;

pub struct DetailLoader<S> {
    source: Arc<S>,
    cache: HashMap<String, DetailState>,
    expanded: HashSet<String>,
    tx: Sender<(String, Result<TimeSeriesRecord>)>,
    rx: Receiver<(String, Result<TimeSeriesRecord>)>,
    in_flight: usize,
    notify: Option<Notify>,
}

impl<S: PredictionSource> DetailLoader<S> {
    pub fn new(source: S) -> Self {
        Self::from_shared(Arc::new(source))
    }

    pub fn from_shared(source: Arc<S>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            cache: HashMap::new(),
            expanded: HashSet::new(),
            tx,
            rx,
            in_flight: 0,
            notify: None,
        }
    }

    /// Callback run on the worker thread after each fetch, typically `ctx.request_repaint()`.
    pub fn with_notify(mut self, notify: impl Fn() + Send + Sync + 'static) -> Self {
        self.notify = Some(Arc::new(notify));
        self
    }

    pub fn is_expanded(&self, uuid: &str) -> bool {
        self.expanded.contains(uuid)
    }

    pub fn state(&self, uuid: &str) -> Option<&DetailState> {
        self.cache.get(uuid)
    }

    /// Number of fetches started but not yet applied by [`poll`](Self::poll).
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Expand a row, starting its fetch unless a cache entry already exists.
    pub fn expand(&mut self, uuid: &str) {
        self.expanded.insert(uuid.to_string());
        if !self.cache.contains_key(uuid) {
            self.spawn_fetch(uuid);
        }
    }

    pub fn collapse(&mut self, uuid: &str) {
        self.expanded.remove(uuid);
    }

    pub fn toggle(&mut self, uuid: &str) {
        if self.is_expanded(uuid) {
            self.collapse(uuid);
        } else {
            self.expand(uuid);
        }
    }

    /// Re-issue a failed fetch. Returns `false` when the row is not in the failed state.
    pub fn retry(&mut self, uuid: &str) -> bool {
        if !matches!(self.cache.get(uuid), Some(DetailState::Failed(_))) {
            return false;
        }
        self.spawn_fetch(uuid);
        true
    }

    /// Apply all finished fetches. Returns how many were applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok((uuid, result)) = self.rx.try_recv() {
            self.apply(uuid, result);
            applied += 1;
        }
        applied
    }

    /// Like [`poll`](Self::poll) but waits up to `timeout` for the first result.
    pub fn poll_timeout(&mut self, timeout: Duration) -> usize {
        if self.in_flight == 0 {
            return 0;
        }
        match self.rx.recv_timeout(timeout) {
            Ok((uuid, result)) => {
                self.apply(uuid, result);
                1 + self.poll()
            }
            Err(_) => 0,
        }
    }

    fn apply(&mut self, uuid: String, result: Result<TimeSeriesRecord>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let state = match result {
            Ok(record) => {
                tracing::debug!(uuid = %uuid, points = record.len(), "prediction loaded");
                DetailState::Loaded(Arc::new(record))
            }
            Err(e) => {
                tracing::warn!(uuid = %uuid, error = %e, "prediction fetch failed");
                DetailState::Failed(e.to_string())
            }
        };
        self.cache.insert(uuid, state);
    }

    fn spawn_fetch(&mut self, uuid: &str) {
        tracing::debug!(uuid, "fetching prediction");
        self.cache.insert(uuid.to_string(), DetailState::Loading);
        self.in_flight += 1;

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let notify = self.notify.clone();
        let uuid = uuid.to_string();
        let spawned = std::thread::Builder::new()
            .name(format!("prediction-{uuid}"))
            .spawn({
                let uuid = uuid.clone();
                move || {
                    let result = source.fetch_prediction(&uuid);
                    // Receiver gone means the loader was dropped; nothing left to update.
                    let _ = tx.send((uuid, result));
                    if let Some(notify) = notify {
                        notify();
                    }
                }
            });
        if let Err(e) = spawned {
            self.in_flight -= 1;
            tracing::warn!(uuid = %uuid, error = %e, "could not spawn fetch thread");
            self.cache.insert(uuid, DetailState::Failed(e.to_string()));
        }
    }
}
