//! Single-row selection shared between the metric table and the scatterplot.

use std::cell::RefCell;
use std::rc::Rc;

use super::metric::MetricRow;

/// Handle type used to share one [`Selection`] between views on the UI thread.
pub type SharedSelection = Rc<RefCell<Selection>>;

/// Radio-style selection: at most one row `uuid`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    key: Option<String>,
}

impl Selection {
    pub fn shared() -> SharedSelection {
        Rc::new(RefCell::new(Self::default()))
    }

    pub fn selected(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn is_selected(&self, uuid: &str) -> bool {
        self.key.as_deref() == Some(uuid)
    }

    /// Select `uuid`. Returns `true` if the selection changed.
    pub fn select(&mut self, uuid: &str) -> bool {
        if self.is_selected(uuid) {
            return false;
        }
        tracing::debug!(uuid, "row selected");
        self.key = Some(uuid.to_string());
        true
    }

    pub fn clear(&mut self) {
        if self.key.take().is_some() {
            tracing::debug!("selection cleared");
        }
    }

    /// Drop the key if its row is no longer part of `rows`.
    pub fn reconcile(&mut self, rows: &[MetricRow]) {
        if let Some(key) = &self.key {
            if !rows.iter().any(|r| &r.uuid == key) {
                tracing::debug!(uuid = %key, "selected row vanished from dataset");
                self.key = None;
            }
        }
    }
}

/// Move the selected row (if present in `order`) to the front, keeping every other row in place.
///
/// `order` holds indices into `rows`.
///
/// ```
/// # use capdash::data::metric::MetricRow;
/// # use capdash::data::selection::pin_selected_first;
/// let rows: Vec<_> = ["a", "b", "c"].into_iter().map(MetricRow::new).collect();
/// let mut order = vec![0, 1, 2];
/// pin_selected_first(&mut order, &rows, Some("c"));
/// assert_eq!(order, vec![2, 0, 1]);
/// ```
pub fn pin_selected_first(order: &mut [usize], rows: &[MetricRow], selected: Option<&str>) {
    let Some(key) = selected else {
        return;
    };
    if let Some(pos) = order.iter().position(|&i| rows[i].uuid == key) {
        order[..=pos].rotate_right(1);
    }
}
