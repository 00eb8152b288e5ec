//! Column sorting for the metric table.
//!
//! Numeric columns may carry missing or non-finite values; those always sort
//! after every finite value, in both directions, and never cause a panic.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::metric::MetricRow;
use super::selection::pin_selected_first;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    DaysToFull,
    CurrentSaturation,
    ConfidenceLevel,
    HostName,
    ServiceName,
    MetricName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    }
}

/// Active sort of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSort {
    pub column: SortColumn,
    pub order: SortOrder,
}

impl Default for TableSort {
    /// Most saturated metrics first.
    fn default() -> Self {
        Self {
            column: SortColumn::CurrentSaturation,
            order: SortOrder::Descending,
        }
    }
}

impl TableSort {
    /// Header click: flip the order on the active column, otherwise switch column ascending.
    pub fn clicked(self, column: SortColumn) -> Self {
        if self.column == column {
            Self {
                column,
                order: self.order.flipped(),
            }
        } else {
            Self {
                column,
                order: SortOrder::Ascending,
            }
        }
    }
}

/// Compare two numeric keys; non-finite keys go last regardless of `order`.
///
/// ```
/// # use std::cmp::Ordering;
/// # use capdash::data::sorting::{compare_numeric, SortOrder};
/// assert_eq!(compare_numeric(f64::NAN, 1.0, SortOrder::Ascending), Ordering::Greater);
/// assert_eq!(compare_numeric(f64::NAN, 1.0, SortOrder::Descending), Ordering::Greater);
/// assert_eq!(compare_numeric(2.0, 1.0, SortOrder::Descending), Ordering::Less);
/// ```
pub fn compare_numeric(a: f64, b: f64, order: SortOrder) -> Ordering {
    match (a.is_finite(), b.is_finite()) {
        (true, true) => order.apply(a.total_cmp(&b)),
        (false, true) => Ordering::Greater,
        (true, false) => Ordering::Less,
        (false, false) => Ordering::Equal,
    }
}

pub fn compare_rows(a: &MetricRow, b: &MetricRow, sort: TableSort) -> Ordering {
    let order = sort.order;
    match sort.column {
        SortColumn::DaysToFull => compare_numeric(a.days_to_full, b.days_to_full, order),
        SortColumn::CurrentSaturation => {
            compare_numeric(a.current_saturation, b.current_saturation, order)
        }
        SortColumn::ConfidenceLevel => {
            compare_numeric(a.confidence_level, b.confidence_level, order)
        }
        SortColumn::HostName => order.apply(a.host_name.cmp(&b.host_name)),
        SortColumn::ServiceName => order.apply(a.service_name.cmp(&b.service_name)),
        SortColumn::MetricName => order.apply(a.metric_name.cmp(&b.metric_name)),
    }
}

/// Display order of `rows` as indices: stable column sort, then the selected row pinned first.
pub fn table_order(rows: &[MetricRow], sort: Option<TableSort>, selected: Option<&str>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    if let Some(sort) = sort {
        order.sort_by(|&a, &b| compare_rows(&rows[a], &rows[b], sort));
    }
    pin_selected_first(&mut order, rows, selected);
    order
}
