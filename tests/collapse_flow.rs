//! End-to-end collapse flow over the stock job queue and tween engine.

use std::rc::Rc;
use std::time::{Duration, Instant};

use reveal::prelude::*;

struct Harness {
    element: Element,
    collapsed: Binding<bool>,
    config: SharedConfig,
    queue: Rc<JobQueue>,
    engine: Rc<TweenEngine>,
    collapse: Collapse,
}

fn mount(initially_collapsed: bool) -> Harness {
    let element = Element::new(240.0);
    let collapsed = Binding::new(initially_collapsed);
    let config = SharedConfig::default();
    let queue = Rc::new(JobQueue::new());
    let engine = Rc::new(TweenEngine::new());
    let collapse = Collapse::attach(
        &element,
        &collapsed,
        config.clone(),
        queue.clone(),
        engine.clone(),
    );
    Harness {
        element,
        collapsed,
        config,
        queue,
        engine,
        collapse,
    }
}

/// One turn of the host loop, with the clock already past any transition.
fn settle(h: &Harness) {
    h.queue.run_pending();
    h.engine.advance(Instant::now() + Duration::from_secs(60));
}

#[test]
fn first_render_is_immediate_in_both_directions() {
    let open = mount(false);
    assert_eq!(open.element.height(), Height::Auto);
    assert!(open.element.has_marker(Marker::VISIBLE));
    assert!(!open.element.has_marker(Marker::TRANSITIONING));
    assert!(!open.engine.is_animating(&open.element));

    let closed = mount(true);
    assert_eq!(closed.element.height(), Height::Px(0.0));
    assert!(!closed.element.has_marker(Marker::VISIBLE));
    assert!(!closed.element.has_marker(Marker::TRANSITIONING));
    assert!(!closed.engine.is_animating(&closed.element));
}

#[test]
fn close_then_open_full_cycle() {
    let h = mount(false);

    h.collapsed.set(true);
    assert!(h.element.has_marker(Marker::TRANSITIONING));
    h.queue.run_pending();
    assert!(h.engine.is_animating(&h.element));

    h.engine.advance(Instant::now() + Duration::from_secs(60));
    assert_eq!(h.element.height(), Height::Px(0.0));
    assert!(!h.element.has_marker(Marker::VISIBLE));
    assert!(!h.element.has_marker(Marker::TRANSITIONING));

    h.collapsed.set(false);
    settle(&h);
    assert_eq!(h.element.height(), Height::Auto);
    assert!(h.element.has_marker(Marker::VISIBLE));
    assert!(!h.element.has_marker(Marker::TRANSITIONING));
}

#[test]
fn close_reaches_partial_heights_before_finishing() {
    let h = mount(false);
    h.element.set_duration_attr("10");

    h.collapsed.set(true);
    h.queue.run_pending();
    h.engine.advance(Instant::now() + Duration::from_secs(5));

    let Height::Px(px) = h.element.height() else {
        panic!("expected a pixel height mid-transition");
    };
    assert!(px > 0.0 && px < 240.0, "got {px}");
    assert!(h.element.has_marker(Marker::TRANSITIONING));
}

#[test]
fn per_element_duration_override_finishes_faster() {
    let h = mount(false);
    h.element.set_duration_attr("0.5");

    h.collapsed.set(true);
    h.queue.run_pending();
    // Past the override but well within the 1s default.
    h.engine.advance(Instant::now() + Duration::from_millis(700));

    assert_eq!(h.element.height(), Height::Px(0.0));
    assert!(!h.element.has_marker(Marker::TRANSITIONING));
}

#[test]
fn config_updates_merge_and_apply_live() {
    let h = mount(false);
    h.config.set(ConfigUpdate::default().ease(Ease::EaseInOut));
    h.config.set(ConfigUpdate::default().duration(0.2));

    let merged = h.config.get();
    assert_eq!(merged.transition_duration, 0.2);
    assert_eq!(merged.transition_ease, Ease::EaseInOut);

    // The shortened duration applies to the next transition.
    h.collapsed.set(true);
    h.queue.run_pending();
    h.engine.advance(Instant::now() + Duration::from_millis(400));
    assert_eq!(h.element.height(), Height::Px(0.0));
}

#[test]
fn superseding_mid_flight_settles_on_last_toggle() {
    let h = mount(true);

    // Open, let the tween get part way.
    h.collapsed.set(false);
    h.queue.run_pending();
    h.engine.advance(Instant::now() + Duration::from_millis(300));
    assert!(h.engine.is_animating(&h.element));

    // Close overtakes the open mid-flight.
    h.collapsed.set(true);
    h.queue.run_pending();
    h.engine.advance(Instant::now() + Duration::from_secs(60));

    assert_eq!(h.element.height(), Height::Px(0.0));
    assert!(!h.element.has_marker(Marker::VISIBLE));
    assert!(!h.element.has_marker(Marker::TRANSITIONING));
}

#[test]
fn rapid_toggles_before_queue_turn_settle_on_last() {
    let h = mount(true);

    h.collapsed.set(false);
    h.collapsed.set(true);
    h.collapsed.set(false);
    settle(&h);

    assert_eq!(h.element.height(), Height::Auto);
    assert!(h.element.has_marker(Marker::VISIBLE));
    assert!(!h.element.has_marker(Marker::TRANSITIONING));
}

#[test]
fn detach_freezes_the_element() {
    let h = mount(false);

    h.collapsed.set(true);
    h.queue.run_pending();
    h.engine.advance(Instant::now() + Duration::from_millis(300));
    let mid_height = h.element.height();

    h.collapse.detach();
    assert!(!h.engine.is_animating(&h.element));

    // Nothing queued runs, nothing animates, the height stays put.
    h.collapsed.set(false);
    assert_eq!(h.queue.run_pending(), 0);
    h.engine.advance(Instant::now() + Duration::from_secs(60));
    assert_eq!(h.element.height(), mid_height);
}

#[test]
fn detach_before_queue_turn_cancels_the_job() {
    let h = mount(false);

    h.collapsed.set(true);
    drop(h.collapse);

    assert_eq!(h.queue.run_pending(), 0);
    assert!(!h.engine.is_animating(&h.element));
}
