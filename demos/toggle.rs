//! Walkthrough of the collapse lifecycle with a hand-pumped host loop.
//!
//! Run with `RUST_LOG=debug cargo run --example toggle` to watch the
//! transitions in the log output.

use std::rc::Rc;
use std::time::{Duration, Instant};

use reveal::prelude::*;

fn pump(queue: &JobQueue, engine: &TweenEngine, element: &Element) {
    while queue.has_pending() || engine.is_animating(element) {
        queue.run_pending();
        engine.advance(Instant::now());
        std::thread::sleep(Duration::from_millis(16));
    }
}

fn describe(element: &Element) -> String {
    format!(
        "height {:?}, visible {}, transitioning {}",
        element.height(),
        element.has_marker(Marker::VISIBLE),
        element.has_marker(Marker::TRANSITIONING),
    )
}

fn main() {
    env_logger::init();

    let config = SharedConfig::default();
    config.set(ConfigUpdate::default().duration(0.3).ease(Ease::EaseInOut));

    let element = Element::new(240.0);
    let collapsed = Binding::new(false);
    let queue = Rc::new(JobQueue::new());
    let engine = Rc::new(TweenEngine::new());

    let collapse = Collapse::attach(
        &element,
        &collapsed,
        config,
        queue.clone(),
        engine.clone(),
    );
    println!("mounted open: {}", describe(&element));

    collapsed.set(true);
    pump(&queue, &engine, &element);
    println!("after close:  {}", describe(&element));

    collapsed.set(false);
    pump(&queue, &engine, &element);
    println!("after open:   {}", describe(&element));

    collapse.detach();
    println!("detached:     {}", describe(&element));
}
