//! `reveal` — a reactive collapsible panel controller.
//!
//! A [`Collapse`](collapse::Collapse) controller watches a boolean
//! [`Binding`](binding::Binding) (truthy means collapsed) and expands or
//! collapses its element by tweening the element's height between zero and
//! its natural content size. Transitions run through two injected services:
//! a [`Scheduler`](schedule::Scheduler) that defers work to a later turn of
//! the host event loop, and an [`Animator`](tween::Animator) that performs
//! the timed height interpolation. [`JobQueue`](schedule::JobQueue) and
//! [`TweenEngine`](tween::TweenEngine) are the stock implementations; both
//! are pumped explicitly by the host loop.
//!
//! ```ignore
//! let element = Element::new(240.0);
//! let collapsed = Binding::new(false);
//! let queue = Rc::new(JobQueue::new());
//! let engine = Rc::new(TweenEngine::new());
//!
//! let _collapse = Collapse::attach(
//!     &element,
//!     &collapsed,
//!     SharedConfig::default(),
//!     queue.clone(),
//!     engine.clone(),
//! );
//!
//! collapsed.set(true);
//! // host loop:
//! queue.run_pending();
//! engine.advance(Instant::now());
//! ```

pub mod binding;
pub mod collapse;
pub mod config;
pub mod easing;
pub mod element;
pub mod schedule;
pub mod tween;

pub mod prelude {
    pub use crate::binding::{Binding, Subscription};
    pub use crate::collapse::Collapse;
    pub use crate::config::{CollapseConfig, ConfigUpdate, SharedConfig};
    pub use crate::easing::Ease;
    pub use crate::element::{Element, ElementId, Height, Marker};
    pub use crate::schedule::{JobId, JobQueue, Scheduler};
    pub use crate::tween::{Animator, Transition, TweenEngine};
}
