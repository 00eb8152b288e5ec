use capdash::data::resolver::{PointerResolver, ResolverConfig};
use capdash::data::scale::LinearScale;
use capdash::data::spatial::{ProjectedIndex, SpatialIndex};
use proptest::prelude::*;

fn index(points: &[(f64, f64)]) -> SpatialIndex {
    SpatialIndex::build(points, |p| p.0, |p| p.1)
}

#[test]
fn empty_index_never_matches() {
    let idx = index(&[]);
    assert!(idx.is_empty());
    assert_eq!(idx.nearest_within(0.0, 0.0, 1e9), None);
    assert_eq!(idx.nearest(0.0, 0.0), None);
}

#[test]
fn single_point_matches_within_radius_only() {
    let idx = index(&[(5.0, 5.0)]);
    assert_eq!(idx.nearest_within(8.0, 9.0, 5.0), Some(0));
    assert_eq!(idx.nearest_within(8.0, 9.1, 5.0), None);
}

#[test]
fn coincident_points_resolve_to_lowest_index() {
    let idx = index(&[(3.0, 3.0); 6]);
    for q in [(3.0, 3.0), (4.0, 3.0), (3.0, 0.5)] {
        assert_eq!(idx.nearest_within(q.0, q.1, 10.0), Some(0));
    }
    assert_eq!(idx.nearest_within(30.0, 3.0, 10.0), None);
}

#[test]
fn non_finite_projections_are_skipped() {
    let idx = index(&[(f64::NAN, 0.0), (1.0, 1.0), (f64::INFINITY, 2.0)]);
    assert_eq!(idx.len(), 1);
    assert_eq!(idx.nearest(0.0, 0.0), Some(1));
    assert_eq!(idx.position_of(1), Some((1.0, 1.0)));
    assert_eq!(idx.position_of(0), None);
}

#[test]
fn zero_radius_requires_exact_hit() {
    let idx = index(&[(1.0, 1.0), (2.0, 2.0)]);
    assert_eq!(idx.nearest_within(2.0, 2.0, 0.0), Some(1));
    assert_eq!(idx.nearest_within(2.0, 2.1, 0.0), None);
}

#[test]
fn x_only_projection_finds_closest_date() {
    // Time-series charts index every sample at y = 0.
    let xs = [0.0, 10.0, 20.0, 30.0];
    let idx = SpatialIndex::build(&xs, |x| *x, |_| 0.0);
    assert_eq!(idx.nearest_within(17.0, 0.0, 200.0), Some(2));
}

/// What a chart view keys its index on: the x scale plus a dataset generation.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Layout {
    x: LinearScale,
    generation: u64,
}

fn layout(width: f64, generation: u64) -> Layout {
    Layout {
        x: LinearScale::new((0.0, 10.0), (0.0, width)),
        generation,
    }
}

fn project(values: &[f64], l: Layout) -> SpatialIndex {
    SpatialIndex::build(values, |v| l.x.map(*v), |_| 0.0)
}

#[test]
fn changed_range_moves_points_to_new_pixels() {
    let values = [2.0, 8.0];
    let mut projected = ProjectedIndex::default();
    let narrow = layout(100.0, 1);
    assert!(projected.ensure(narrow, || project(&values, narrow)));
    assert_eq!(projected.index().position_of(1), Some((80.0, 0.0)));

    let wide = layout(500.0, 1);
    assert!(projected.ensure(wide, || project(&values, wide)));
    assert_eq!(projected.index().position_of(1), Some((400.0, 0.0)));
    assert_eq!(projected.index().nearest_within(400.0, 0.0, 1.0), Some(1));
    assert_eq!(projected.index().nearest_within(80.0, 0.0, 1.0), None);
}

#[test]
fn new_dataset_generation_rebuilds() {
    let mut projected = ProjectedIndex::default();
    let first = layout(100.0, 1);
    projected.ensure(first, || project(&[1.0, 2.0], first));
    assert_eq!(projected.index().len(), 2);

    let second = layout(100.0, 2);
    assert!(projected.ensure(second, || project(&[1.0, 2.0, 3.0], second)));
    assert_eq!(projected.index().len(), 3);
    assert_eq!(projected.fingerprint(), Some(&second));
}

#[test]
fn unchanged_fingerprint_reuses_index() {
    let mut projected = ProjectedIndex::default();
    let l = layout(100.0, 1);
    assert!(projected.ensure(l, || project(&[5.0], l)));
    let mut built = false;
    assert!(!projected.ensure(l, || {
        built = true;
        SpatialIndex::default()
    }));
    assert!(!built);
    assert_eq!(projected.index().len(), 1);
}

#[test]
fn rebuild_drops_tooltip_and_pending_clear() {
    let values = [2.0, 8.0];
    let mut resolver = PointerResolver::new(ResolverConfig::default());
    let mut projected = ProjectedIndex::default();

    let narrow = layout(100.0, 1);
    assert!(resolver.refresh_index(&mut projected, narrow, || project(&values, narrow)));
    assert_eq!(resolver.pointer_move(80.0, 0.0, projected.index()), Some(1));

    // Same layout: nothing is rebuilt and the tooltip survives.
    assert!(!resolver.refresh_index(&mut projected, narrow, || project(&values, narrow)));
    assert_eq!(resolver.tooltip(), Some(1));

    resolver.pointer_leave(0.0);
    let wide = layout(500.0, 1);
    assert!(resolver.refresh_index(&mut projected, wide, || project(&values, wide)));
    assert_eq!(resolver.tooltip(), None);
    assert_eq!(resolver.pending_clear(), None);

    resolver.pointer_move(80.0, 0.0, projected.index());
    let reloaded = layout(500.0, 2);
    assert!(resolver.refresh_index(&mut projected, reloaded, || project(&values, reloaded)));
    assert_eq!(resolver.tooltip(), None);
}

fn points_strategy() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((0.0..800.0f64, 0.0..400.0f64), 1..200)
}

proptest! {
    #[test]
    fn query_at_point_returns_a_point_at_that_position(pts in points_strategy(), pick in any::<prop::sample::Index>(), r in 0.0..300.0f64) {
        let idx = index(&pts);
        let p = pts[pick.index(pts.len())];
        let hit = idx.nearest_within(p.0, p.1, r).expect("self query must match");
        // Duplicates may win the tie-break, but the hit must sit exactly on the query.
        prop_assert_eq!(pts[hit], p);
        prop_assert!(hit <= pick.index(pts.len()));
    }

    #[test]
    fn nothing_beyond_radius(pts in points_strategy(), qx in -500.0..1300.0f64, qy in -500.0..900.0f64, r in 0.0..100.0f64) {
        let idx = index(&pts);
        let closest = pts
            .iter()
            .map(|p| ((p.0 - qx).powi(2) + (p.1 - qy).powi(2)).sqrt())
            .fold(f64::INFINITY, f64::min);
        let hit = idx.nearest_within(qx, qy, r);
        if closest > r {
            prop_assert_eq!(hit, None);
        } else {
            let i = hit.expect("a point is within radius");
            let d = ((pts[i].0 - qx).powi(2) + (pts[i].1 - qy).powi(2)).sqrt();
            prop_assert!((d - closest).abs() < 1e-9);
        }
    }
}
