use capdash::data::resolver::{PointerResolver, ResolverConfig};
use capdash::data::spatial::SpatialIndex;

fn scatter_index() -> SpatialIndex {
    SpatialIndex::build(&[(10.0, 10.0), (300.0, 10.0)], |p| p.0, |p| p.1)
}

fn scatter_resolver() -> PointerResolver {
    PointerResolver::new(ResolverConfig {
        hover_radius: 100.0,
        click_radius: Some(50.0),
        leave_delay_secs: 0.3,
    })
}

#[test]
fn move_near_point_shows_tooltip() {
    let idx = scatter_index();
    let mut r = scatter_resolver();
    assert_eq!(r.pointer_move(40.0, 40.0, &idx), Some(0));
    assert_eq!(r.tooltip(), Some(0));
}

#[test]
fn move_out_of_range_keeps_previous_tooltip() {
    let idx = scatter_index();
    let mut r = scatter_resolver();
    r.pointer_move(10.0, 10.0, &idx);
    assert_eq!(r.pointer_move(155.0, 300.0, &idx), Some(0));
}

#[test]
fn leave_clears_after_delay() {
    let idx = scatter_index();
    let mut r = scatter_resolver();
    r.pointer_move(10.0, 10.0, &idx);
    r.pointer_leave(0.0);
    assert!(!r.tick(0.2));
    assert_eq!(r.tooltip(), Some(0));
    assert!(r.tick(0.3));
    assert_eq!(r.tooltip(), None);
    assert_eq!(r.pending_clear(), None);
}

#[test]
fn move_before_delay_cancels_clear_and_shows_new_match() {
    let idx = scatter_index();
    let mut r = scatter_resolver();
    r.pointer_move(10.0, 10.0, &idx);
    r.pointer_leave(0.0);
    assert_eq!(r.pointer_move(290.0, 12.0, &idx), Some(1));
    assert_eq!(r.pending_clear(), None);
    assert!(!r.tick(1.0));
    assert_eq!(r.tooltip(), Some(1));
}

#[test]
fn click_uses_narrower_radius() {
    let idx = scatter_index();
    let mut r = scatter_resolver();
    // 80px away: inside hover radius, outside click radius.
    assert_eq!(r.pointer_move(90.0, 10.0, &idx), Some(0));
    assert_eq!(r.click(90.0, 10.0, &idx), None);
    assert_eq!(r.click(50.0, 10.0, &idx), Some(0));
}

#[test]
fn click_cancels_pending_clear_but_keeps_tooltip() {
    let idx = scatter_index();
    let mut r = scatter_resolver();
    r.pointer_move(10.0, 10.0, &idx);
    r.pointer_leave(0.0);
    assert_eq!(r.click(300.0, 10.0, &idx), Some(1));
    assert_eq!(r.pending_clear(), None);
    assert_eq!(r.tooltip(), Some(0));
}

#[test]
fn resolvers_do_not_share_timers() {
    let idx = scatter_index();
    let mut a = scatter_resolver();
    let mut b = scatter_resolver();
    a.pointer_move(10.0, 10.0, &idx);
    b.pointer_move(300.0, 10.0, &idx);
    a.pointer_leave(0.0);
    b.pointer_move(300.0, 10.0, &idx);
    assert!(a.tick(0.5));
    assert!(!b.tick(0.5));
    assert_eq!(b.tooltip(), Some(1));
}
