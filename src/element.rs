//! The collapsible element: markers, height, and per-element overrides.
//!
//! An [`Element`] is the piece of UI the controller and the tween engine
//! both mutate: a set of state markers (the styling hooks external observers
//! react to), a height that is either a fixed pixel value or the element's
//! natural content size, and optional raw attribute overrides for the
//! transition parameters.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use bitflags::bitflags;

use crate::config::SharedConfig;
use crate::easing::Ease;
use crate::tween::Transition;

bitflags! {
    /// State markers carried by a collapsible element
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Marker: u8 {
        /// Static base marker, applied once on attach
        const COLLAPSIBLE   = 0b001;
        /// The element is (or is becoming) open
        const VISIBLE       = 0b010;
        /// A close transition is in progress
        const TRANSITIONING = 0b100;
    }
}

/// Height of the element's collapsible dimension.
///
/// `Auto` means the natural content size; an open element must end at `Auto`
/// (not a fixed pixel value) so content changes after the transition are
/// accommodated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Height {
    Auto,
    Px(f32),
}

/// Unique identifier for an element
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ElementId(u64);

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(0);

impl ElementId {
    fn next() -> Self {
        Self(NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug)]
struct ElementState {
    markers: Marker,
    height: Height,
    content_height: f32,
    transition_duration_attr: Option<String>,
    transition_ease_attr: Option<String>,
}

/// Shared handle to one collapsible element.
///
/// Clones refer to the same element; the tween engine keys its per-element
/// animations by [`ElementId`].
#[derive(Clone, Debug)]
pub struct Element {
    id: ElementId,
    state: Rc<RefCell<ElementState>>,
}

impl Element {
    /// Create an element with the given natural content height, starting
    /// with no markers and an automatic height.
    pub fn new(content_height: f32) -> Self {
        Self {
            id: ElementId::next(),
            state: Rc::new(RefCell::new(ElementState {
                markers: Marker::empty(),
                height: Height::Auto,
                content_height,
                transition_duration_attr: None,
                transition_ease_attr: None,
            })),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn add_marker(&self, marker: Marker) {
        self.state.borrow_mut().markers.insert(marker);
    }

    pub fn remove_marker(&self, marker: Marker) {
        self.state.borrow_mut().markers.remove(marker);
    }

    pub fn has_marker(&self, marker: Marker) -> bool {
        self.state.borrow().markers.contains(marker)
    }

    pub fn height(&self) -> Height {
        self.state.borrow().height
    }

    pub fn set_height(&self, height: Height) {
        self.state.borrow_mut().height = height;
    }

    /// Natural size of the content; the target of an open transition.
    pub fn content_height(&self) -> f32 {
        self.state.borrow().content_height
    }

    /// Update the natural content size (content changed while mounted).
    pub fn set_content_height(&self, height: f32) {
        self.state.borrow_mut().content_height = height;
    }

    /// Set the raw `transition-duration` attribute override.
    pub fn set_duration_attr(&self, value: impl Into<String>) {
        self.state.borrow_mut().transition_duration_attr = Some(value.into());
    }

    /// Set the raw `transition-ease` attribute override.
    pub fn set_ease_attr(&self, value: impl Into<String>) {
        self.state.borrow_mut().transition_ease_attr = Some(value.into());
    }

    /// Resolve the transition parameters for one animation call: attribute
    /// override when present and valid, else the live configured default.
    /// Evaluated fresh on every call so late reconfiguration applies.
    ///
    /// A duration attribute only wins when it parses to a finite value
    /// greater than zero; anything else falls back silently. Overrides never
    /// touch the shared configuration.
    pub fn resolve_transition(&self, config: &SharedConfig) -> Transition {
        let defaults = config.get();
        let state = self.state.borrow();

        let duration = state
            .transition_duration_attr
            .as_deref()
            .and_then(|raw| raw.trim().parse::<f32>().ok())
            .filter(|seconds| seconds.is_finite() && *seconds > 0.0)
            .unwrap_or(defaults.transition_duration);

        let ease = state
            .transition_ease_attr
            .as_deref()
            .and_then(Ease::parse)
            .unwrap_or(defaults.transition_ease);

        Transition { duration, ease }
    }
}
