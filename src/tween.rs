//! Height tweening.
//!
//! The tween engine owns at most one animation per element (a new request
//! overwrites a running one, whose completion never fires) and is stepped
//! explicitly by the host loop via [`TweenEngine::advance`]. The controller
//! talks to it through the [`Animator`] interface so tests can substitute
//! their own recording implementation.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Instant;

use crate::easing::Ease;
use crate::element::{Element, ElementId, Height};

/// Resolved parameters for one animation call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Duration in seconds
    pub duration: f32,
    pub ease: Ease,
}

/// Performs timed height transitions on behalf of the collapse controller.
///
/// Both calls overwrite any in-flight animation on the same element; the
/// overwritten animation's completion callback never fires.
pub trait Animator {
    /// Animate the element's height from its current value to its natural
    /// content size, then invoke `on_done`.
    fn animate_open(&self, element: &Element, transition: Transition, on_done: Box<dyn FnOnce()>);

    /// Animate the element's height from its current value to zero, then
    /// invoke `on_done`.
    fn animate_close(&self, element: &Element, transition: Transition, on_done: Box<dyn FnOnce()>);

    /// Forcibly stop any in-flight animation on the element without
    /// completion. A no-op when none is running.
    fn stop(&self, element: &Element);
}

struct Tween {
    element: Element,
    from: f32,
    to: f32,
    started: Instant,
    transition: Transition,
    on_done: Option<Box<dyn FnOnce()>>,
}

impl Tween {
    /// Step to `now`; returns the completion callback once finished.
    fn advance(&mut self, now: Instant) -> Option<Box<dyn FnOnce()>> {
        let elapsed = now.saturating_duration_since(self.started).as_secs_f32();
        let t = (elapsed / self.transition.duration).min(1.0);
        let eased = self.transition.ease.evaluate(t);
        let value = self.from + (self.to - self.from) * eased;

        if t >= 1.0 {
            self.element.set_height(Height::Px(self.to));
            self.on_done.take()
        } else {
            log::trace!(
                "element {:?}: height {:.2} (t = {:.3})",
                self.element.id(),
                value,
                t
            );
            self.element.set_height(Height::Px(value));
            None
        }
    }
}

/// Default [`Animator`]: eased height interpolation stepped by the host loop.
#[derive(Clone)]
pub struct TweenEngine {
    tweens: Rc<RefCell<HashMap<ElementId, Tween>>>,
}

impl TweenEngine {
    pub fn new() -> Self {
        Self {
            tweens: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    fn start(&self, element: &Element, to: f32, transition: Transition, on_done: Box<dyn FnOnce()>) {
        let from = match element.height() {
            Height::Px(px) => px,
            Height::Auto => element.content_height(),
        };
        log::debug!(
            "element {:?}: tween {:.2} -> {:.2} over {}s ({:?})",
            element.id(),
            from,
            to,
            transition.duration,
            transition.ease
        );
        // Insert overwrites any in-flight tween on this element; its
        // completion callback is dropped unfired.
        self.tweens.borrow_mut().insert(
            element.id(),
            Tween {
                element: element.clone(),
                from,
                to,
                started: Instant::now(),
                transition,
                on_done: Some(on_done),
            },
        );
    }

    /// Step every active tween to `now`, invoking completion callbacks for
    /// tweens that finished. Callbacks run after the engine's bookkeeping is
    /// released, so they may start new animations.
    pub fn advance(&self, now: Instant) {
        let mut finished = Vec::new();
        {
            let mut tweens = self.tweens.borrow_mut();
            let done_ids: Vec<ElementId> = tweens
                .iter_mut()
                .filter_map(|(id, tween)| tween.advance(now).map(|done| (*id, done)))
                .map(|(id, done)| {
                    finished.push(done);
                    id
                })
                .collect();
            for id in done_ids {
                tweens.remove(&id);
            }
        }
        for done in finished {
            done();
        }
    }

    /// Whether the element has an in-flight animation.
    pub fn is_animating(&self, element: &Element) -> bool {
        self.tweens.borrow().contains_key(&element.id())
    }
}

impl Default for TweenEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Animator for TweenEngine {
    fn animate_open(&self, element: &Element, transition: Transition, on_done: Box<dyn FnOnce()>) {
        let target = element.content_height();
        self.start(element, target, transition, on_done);
    }

    fn animate_close(&self, element: &Element, transition: Transition, on_done: Box<dyn FnOnce()>) {
        self.start(element, 0.0, transition, on_done);
    }

    fn stop(&self, element: &Element) {
        if self.tweens.borrow_mut().remove(&element.id()).is_some() {
            log::debug!("element {:?}: tween stopped", element.id());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::time::Duration;

    fn linear(duration: f32) -> Transition {
        Transition {
            duration,
            ease: Ease::Linear,
        }
    }

    #[test]
    fn test_open_targets_content_height() {
        let engine = TweenEngine::new();
        let element = Element::new(200.0);
        element.set_height(Height::Px(0.0));
        let done = Rc::new(Cell::new(false));

        let flag = done.clone();
        engine.animate_open(&element, linear(1.0), Box::new(move || flag.set(true)));
        assert!(engine.is_animating(&element));

        engine.advance(Instant::now() + Duration::from_secs(2));
        assert!(done.get());
        assert!(!engine.is_animating(&element));
        assert_eq!(element.height(), Height::Px(200.0));
    }

    #[test]
    fn test_close_targets_zero() {
        let engine = TweenEngine::new();
        let element = Element::new(200.0);
        let done = Rc::new(Cell::new(false));

        let flag = done.clone();
        engine.animate_close(&element, linear(0.5), Box::new(move || flag.set(true)));
        engine.advance(Instant::now() + Duration::from_secs(1));

        assert!(done.get());
        assert_eq!(element.height(), Height::Px(0.0));
    }

    #[test]
    fn test_midway_height_is_interpolated() {
        let engine = TweenEngine::new();
        let element = Element::new(100.0);
        element.set_height(Height::Px(0.0));

        engine.animate_open(&element, linear(10.0), Box::new(|| {}));
        engine.advance(Instant::now() + Duration::from_secs(5));

        let Height::Px(px) = element.height() else {
            panic!("expected a pixel height mid-tween");
        };
        assert!(px > 5.0 && px < 95.0, "got {px}");
        assert!(engine.is_animating(&element));
    }

    #[test]
    fn test_new_request_overwrites_and_drops_completion() {
        let engine = TweenEngine::new();
        let element = Element::new(100.0);
        element.set_height(Height::Px(0.0));
        let first_done = Rc::new(Cell::new(false));
        let second_done = Rc::new(Cell::new(false));

        let flag = first_done.clone();
        engine.animate_open(&element, linear(1.0), Box::new(move || flag.set(true)));
        let flag = second_done.clone();
        engine.animate_close(&element, linear(1.0), Box::new(move || flag.set(true)));

        engine.advance(Instant::now() + Duration::from_secs(2));
        assert!(!first_done.get());
        assert!(second_done.get());
        assert_eq!(element.height(), Height::Px(0.0));
    }

    #[test]
    fn test_stop_kills_without_completion() {
        let engine = TweenEngine::new();
        let element = Element::new(100.0);
        let done = Rc::new(Cell::new(false));

        let flag = done.clone();
        engine.animate_close(&element, linear(1.0), Box::new(move || flag.set(true)));
        engine.stop(&element);

        engine.advance(Instant::now() + Duration::from_secs(2));
        assert!(!done.get());
        assert!(!engine.is_animating(&element));
    }

    #[test]
    fn test_stop_without_tween_is_noop() {
        let engine = TweenEngine::new();
        let element = Element::new(100.0);
        engine.stop(&element); // Must not panic
    }

    #[test]
    fn test_completion_may_start_new_tween() {
        let engine = TweenEngine::new();
        let element = Element::new(100.0);
        element.set_height(Height::Px(0.0));

        let chained = engine.clone();
        let chained_element = element.clone();
        engine.animate_open(
            &element,
            linear(1.0),
            Box::new(move || {
                chained.animate_close(&chained_element, linear(1.0), Box::new(|| {}));
            }),
        );

        engine.advance(Instant::now() + Duration::from_secs(2));
        assert!(engine.is_animating(&element));
    }
}
