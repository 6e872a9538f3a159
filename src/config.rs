//! Transition configuration.
//!
//! A [`CollapseConfig`] holds the process-wide transition defaults. Partial
//! updates merge field-wise into the existing values rather than replacing
//! them wholesale, so a bootstrap sequence can set the duration and the ease
//! in separate calls. Services read the live values through a
//! [`SharedConfig`] handle on every animation call, so late reconfiguration
//! takes effect without re-attaching controllers.

use std::sync::{Arc, RwLock};

use crate::easing::Ease;

/// Transition defaults used when an element carries no overrides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollapseConfig {
    /// Duration of the open/close transition in seconds
    pub transition_duration: f32,
    /// Easing curve applied to the transition
    pub transition_ease: Ease,
}

impl Default for CollapseConfig {
    fn default() -> Self {
        Self {
            transition_duration: 1.0,
            transition_ease: Ease::Linear,
        }
    }
}

impl CollapseConfig {
    /// Merge a partial update into this configuration, overwriting only the
    /// fields the update carries.
    pub fn merge(&mut self, update: ConfigUpdate) {
        if let Some(duration) = update.transition_duration {
            self.transition_duration = duration;
        }
        if let Some(ease) = update.transition_ease {
            self.transition_ease = ease;
        }
    }
}

/// A partial [`CollapseConfig`]; unset fields keep their current value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConfigUpdate {
    pub transition_duration: Option<f32>,
    pub transition_ease: Option<Ease>,
}

impl ConfigUpdate {
    pub fn duration(mut self, seconds: f32) -> Self {
        self.transition_duration = Some(seconds);
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.transition_ease = Some(ease);
        self
    }
}

/// Cheaply clonable handle to the live configuration.
///
/// Every clone points at the same values; `set` merges, `get` snapshots.
#[derive(Clone, Debug, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<CollapseConfig>>,
}

impl SharedConfig {
    pub fn new(config: CollapseConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Merge a partial update into the live configuration.
    pub fn set(&self, update: ConfigUpdate) {
        let Ok(mut guard) = self.inner.write() else {
            return; // Lock poisoned, skip update silently
        };
        guard.merge(update);
    }

    /// Snapshot the current configuration.
    pub fn get(&self) -> CollapseConfig {
        self.inner
            .read()
            .map(|guard| *guard)
            .unwrap_or_default()
    }
}
