//! Reactive boolean-ish bindings.
//!
//! A [`Binding`] is the bound expression the collapse controller watches:
//! writing a value notifies subscribers only when the value actually
//! changed, so a controller's open/close transitions fire exactly once per
//! real toggle. Subscriptions are cancelable handles; unsubscribing twice
//! (or after the binding is gone) is harmless.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type SubscriberId = u64;
type Callback<T> = Box<dyn Fn(&T)>;

struct BindingInner<T> {
    value: T,
    subscribers: Vec<(SubscriberId, Callback<T>)>,
    next_id: SubscriberId,
}

/// A single-threaded reactive value with change-only notification.
pub struct Binding<T> {
    inner: Rc<RefCell<BindingInner<T>>>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Binding<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(BindingInner {
                value,
                subscribers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Register a change callback. The callback is invoked with each new
    /// value after a change, never with the current value at registration.
    pub fn subscribe<F>(&self, f: F) -> Subscription<T>
    where
        F: Fn(&T) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push((id, Box::new(f)));
        Subscription {
            binding: Rc::downgrade(&self.inner),
            id,
        }
    }
}

impl<T: Clone> Binding<T> {
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }
}

impl<T: PartialEq> Binding<T> {
    /// Sets the value, notifying subscribers only if it actually changed.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
        }
        // Subscribers run under a shared borrow: callbacks may read the
        // binding but must not write it or subscribe re-entrantly.
        let inner = self.inner.borrow();
        for (_, callback) in &inner.subscribers {
            callback(&inner.value);
        }
    }
}

/// Handle to a registered change callback.
///
/// Deregisters on [`unsubscribe`](Subscription::unsubscribe) or on drop;
/// both are idempotent.
pub struct Subscription<T> {
    binding: Weak<RefCell<BindingInner<T>>>,
    id: SubscriberId,
}

impl<T> Subscription<T> {
    pub fn unsubscribe(&mut self) {
        if let Some(inner) = self.binding.upgrade() {
            inner
                .borrow_mut()
                .subscribers
                .retain(|(id, _)| *id != self.id);
        }
        // A dead Weak means the binding (and the callback) are already gone.
        self.binding = Weak::new();
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
