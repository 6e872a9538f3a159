//! The collapse controller.
//!
//! One [`Collapse`] is attached per collapsible element. It watches a
//! `Binding<bool>` (truthy means collapsed), drives the element's markers
//! and height through the injected [`Scheduler`] and [`Animator`] services,
//! and releases everything it holds on detach.
//!
//! The very first state application is synchronous and bypasses the
//! animator, so an element mounts in its correct visual state without a
//! transition flashing on first paint. Every later toggle defers its
//! animation request to the next turn of the loop and tags it with a
//! generation token: only the completion belonging to the latest toggle may
//! apply, and a still-pending deferred request is canceled outright when a
//! newer toggle supersedes it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::binding::{Binding, Subscription};
use crate::config::SharedConfig;
use crate::element::{Element, Height, Marker};
use crate::schedule::{JobId, Scheduler};
use crate::tween::Animator;

struct State {
    element: Element,
    config: SharedConfig,
    scheduler: Rc<dyn Scheduler>,
    animator: Rc<dyn Animator>,
    is_open: bool,
    initial_skip: bool,
    pending: Vec<JobId>,
    generation: u64,
    subscription: Option<Subscription<bool>>,
    detached: bool,
}

impl State {
    fn cancel_pending(&mut self) {
        for id in self.pending.drain(..) {
            self.scheduler.cancel(id);
        }
    }
}

/// Open/close state machine for one collapsible element.
///
/// Teardown happens exactly once, through [`detach`](Collapse::detach) or
/// drop, whichever comes first: the binding subscription is released, every
/// pending deferred job is canceled, and any in-flight animation on the
/// element is stopped.
pub struct Collapse {
    state: Rc<RefCell<State>>,
}

impl Collapse {
    /// Attach a controller to `element`, driven by `binding`.
    ///
    /// Adds the base `COLLAPSIBLE` marker, applies the binding's current
    /// value synchronously (no animation), then subscribes for changes: a
    /// truthy value closes the element, a falsy one opens it.
    pub fn attach(
        element: &Element,
        binding: &Binding<bool>,
        config: SharedConfig,
        scheduler: Rc<dyn Scheduler>,
        animator: Rc<dyn Animator>,
    ) -> Self {
        element.add_marker(Marker::COLLAPSIBLE);

        let state = Rc::new(RefCell::new(State {
            element: element.clone(),
            config,
            scheduler,
            animator,
            is_open: false,
            initial_skip: true,
            pending: Vec::new(),
            generation: 0,
            subscription: None,
            detached: false,
        }));

        if binding.get() {
            Self::close(&state);
        } else {
            Self::open(&state);
        }

        let weak = Rc::downgrade(&state);
        let subscription = binding.subscribe(move |collapsed| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            if *collapsed {
                Self::close(&state);
            } else {
                Self::open(&state);
            }
        });
        state.borrow_mut().subscription = Some(subscription);

        Self { state }
    }

    /// Whether the latest observed value asked for the open state.
    pub fn is_open(&self) -> bool {
        self.state.borrow().is_open
    }

    fn open(cell: &Rc<RefCell<State>>) {
        let mut state = cell.borrow_mut();
        if state.detached {
            return;
        }
        state.is_open = true;

        if state.initial_skip {
            state.initial_skip = false;
            let element = state.element.clone();
            drop(state);
            log::debug!("element {:?}: initial state open", element.id());
            Self::open_done(&element);
            return;
        }

        state.generation += 1;
        let token = state.generation;
        state.cancel_pending();
        log::debug!(
            "element {:?}: open (generation {})",
            state.element.id(),
            token
        );

        let element = state.element.clone();
        let config = state.config.clone();
        let animator = state.animator.clone();
        let weak = Rc::downgrade(cell);
        let job = state.scheduler.schedule(Box::new(move || {
            let transition = element.resolve_transition(&config);
            let done_element = element.clone();
            animator.animate_open(
                &element,
                transition,
                Box::new(move || {
                    if Self::token_is_current(&weak, token) {
                        Self::open_done(&done_element);
                    }
                }),
            );
        }));
        state.pending.push(job);
    }

    fn close(cell: &Rc<RefCell<State>>) {
        let mut state = cell.borrow_mut();
        if state.detached {
            return;
        }
        state.is_open = false;
        // The mid-transition marker goes up before any deferral so outside
        // styling can react for the whole close, not just after the queue
        // turns over.
        state.element.add_marker(Marker::TRANSITIONING);

        if state.initial_skip {
            state.initial_skip = false;
            state.element.set_height(Height::Px(0.0));
            let element = state.element.clone();
            drop(state);
            log::debug!("element {:?}: initial state closed", element.id());
            Self::close_done(&element);
            return;
        }

        state.generation += 1;
        let token = state.generation;
        state.cancel_pending();
        log::debug!(
            "element {:?}: close (generation {})",
            state.element.id(),
            token
        );

        let element = state.element.clone();
        let config = state.config.clone();
        let animator = state.animator.clone();
        let weak = Rc::downgrade(cell);
        let job = state.scheduler.schedule(Box::new(move || {
            let transition = element.resolve_transition(&config);
            let done_element = element.clone();
            animator.animate_close(
                &element,
                transition,
                Box::new(move || {
                    if Self::token_is_current(&weak, token) {
                        Self::close_done(&done_element);
                    }
                }),
            );
        }));
        state.pending.push(job);
    }

    /// A completion applies only when its toggle is still the latest and the
    /// controller is still attached; stale completions are dropped.
    fn token_is_current(weak: &std::rc::Weak<RefCell<State>>, token: u64) -> bool {
        weak.upgrade()
            .map(|cell| {
                let state = cell.borrow();
                !state.detached && state.generation == token
            })
            .unwrap_or(false)
    }

    fn open_done(element: &Element) {
        element.remove_marker(Marker::TRANSITIONING);
        element.add_marker(Marker::VISIBLE);
        element.set_height(Height::Auto);
    }

    fn close_done(element: &Element) {
        element.remove_marker(Marker::TRANSITIONING);
        element.remove_marker(Marker::VISIBLE);
    }

    /// Tear the controller down: unsubscribe from the binding, cancel every
    /// pending deferred job, and stop any in-flight animation. Idempotent;
    /// also runs on drop.
    pub fn detach(&self) {
        Self::teardown(&self.state);
    }

    fn teardown(cell: &Rc<RefCell<State>>) {
        let mut state = cell.borrow_mut();
        if state.detached {
            return;
        }
        state.detached = true;
        state.subscription.take(); // Drop deregisters
        state.cancel_pending();
        let animator = state.animator.clone();
        let element = state.element.clone();
        drop(state);

        animator.stop(&element);
        log::debug!("element {:?}: collapse detached", element.id());
    }
}

impl Drop for Collapse {
    fn drop(&mut self) {
        Self::teardown(&self.state);
    }
}
