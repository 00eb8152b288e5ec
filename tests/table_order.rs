use capdash::data::metric::MetricRow;
use capdash::data::selection::{pin_selected_first, Selection};
use capdash::data::sorting::{table_order, SortColumn, SortOrder, TableSort};
use proptest::prelude::*;

fn row(uuid: &str, days: f64) -> MetricRow {
    let mut r = MetricRow::new(uuid);
    r.days_to_full = days;
    r
}

fn uuids(rows: &[MetricRow], order: &[usize]) -> Vec<String> {
    order.iter().map(|&i| rows[i].uuid.clone()).collect()
}

fn by_days(order: SortOrder) -> Option<TableSort> {
    Some(TableSort {
        column: SortColumn::DaysToFull,
        order,
    })
}

#[test]
fn ascending_days_puts_nan_last() {
    let rows = vec![row("a", 5.0), row("b", f64::NAN), row("c", 2.0)];
    let order = table_order(&rows, by_days(SortOrder::Ascending), None);
    assert_eq!(uuids(&rows, &order), ["c", "a", "b"]);
}

#[test]
fn descending_days_still_puts_nan_last() {
    let rows = vec![row("a", 5.0), row("b", f64::NAN), row("c", 2.0), row("d", f64::INFINITY)];
    let order = table_order(&rows, by_days(SortOrder::Descending), None);
    assert_eq!(uuids(&rows, &order), ["a", "c", "b", "d"]);
}

#[test]
fn string_columns_sort_lexically() {
    let mut rows: Vec<_> = ["x", "y", "z"].into_iter().map(MetricRow::new).collect();
    rows[0].host_name = "web-2".into();
    rows[1].host_name = "db-1".into();
    rows[2].host_name = "web-1".into();
    let sort = Some(TableSort {
        column: SortColumn::HostName,
        order: SortOrder::Descending,
    });
    assert_eq!(uuids(&rows, &table_order(&rows, sort, None)), ["x", "z", "y"]);
}

#[test]
fn header_click_toggles_then_switches() {
    let s = TableSort::default();
    assert_eq!(s.column, SortColumn::CurrentSaturation);
    assert_eq!(s.order, SortOrder::Descending);
    let s = s.clicked(SortColumn::CurrentSaturation);
    assert_eq!(s.order, SortOrder::Ascending);
    let s = s.clicked(SortColumn::HostName);
    assert_eq!((s.column, s.order), (SortColumn::HostName, SortOrder::Ascending));
}

#[test]
fn selected_row_is_pinned_after_sorting() {
    let rows = vec![row("a", 5.0), row("b", f64::NAN), row("c", 2.0)];
    let order = table_order(&rows, by_days(SortOrder::Ascending), Some("b"));
    assert_eq!(uuids(&rows, &order), ["b", "c", "a"]);
}

#[test]
fn unknown_selection_leaves_order_alone() {
    let rows = vec![row("a", 5.0), row("c", 2.0)];
    let order = table_order(&rows, None, Some("zzz"));
    assert_eq!(order, vec![0, 1]);
}

#[test]
fn selection_is_radio_style_and_explicitly_cleared() {
    let mut sel = Selection::default();
    assert!(sel.select("a"));
    assert!(!sel.select("a"));
    assert!(sel.select("b"));
    assert!(sel.is_selected("b"));
    assert!(!sel.is_selected("a"));
    sel.clear();
    assert_eq!(sel.selected(), None);
}

#[test]
fn reconcile_drops_vanished_key() {
    let mut sel = Selection::default();
    sel.select("gone");
    sel.reconcile(&[MetricRow::new("a")]);
    assert_eq!(sel.selected(), None);

    sel.select("a");
    sel.reconcile(&[MetricRow::new("a")]);
    assert_eq!(sel.selected(), Some("a"));
}

proptest! {
    #[test]
    fn pinning_is_stable(n in 1usize..40, pick in any::<prop::sample::Index>(), seed in any::<u64>()) {
        let rows: Vec<_> = (0..n).map(|i| MetricRow::new(format!("r{i}"))).collect();
        // Arbitrary but deterministic starting permutation.
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by_key(|&i| (i as u64).wrapping_mul(seed | 1) % 97);
        let before = order.clone();
        let key = rows[pick.index(n)].uuid.clone();

        pin_selected_first(&mut order, &rows, Some(key.as_str()));

        prop_assert_eq!(&rows[order[0]].uuid, &key);
        let rest_before: Vec<_> = before.iter().filter(|&&i| rows[i].uuid != key).collect();
        let rest_after: Vec<_> = order[1..].iter().collect();
        prop_assert_eq!(rest_before, rest_after);
    }

    #[test]
    fn non_finite_sorts_last_in_both_directions(days in prop::collection::vec(prop_oneof![Just(f64::NAN), -10.0..5000.0f64], 1..30), asc in any::<bool>()) {
        let rows: Vec<_> = days.iter().enumerate().map(|(i, &d)| row(&format!("r{i}"), d)).collect();
        let order = if asc { SortOrder::Ascending } else { SortOrder::Descending };
        let sorted = table_order(&rows, by_days(order), None);
        let first_nan = sorted.iter().position(|&i| !rows[i].days_to_full.is_finite()).unwrap_or(sorted.len());
        prop_assert!(sorted[first_nan..].iter().all(|&i| !rows[i].days_to_full.is_finite()));
    }
}
