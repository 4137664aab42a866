//! Subscribable input sources.
//!
//! A source delivers [`InputEvent`]s to listeners until the returned
//! [`Subscription`] is dropped or cancelled. The native viewer pushes events
//! directly; [`SyntheticInput`] drives tests and the `web` canvas source
//! wraps DOM listeners.

use std::cell::RefCell;
use std::rc::Rc;

use web_time::Instant;

use super::event::InputEvent;

/// Callback receiving each event together with its timestamp.
pub type Listener = Box<dyn FnMut(&InputEvent, Instant)>;

/// Anything that can deliver input events to listeners.
pub trait InputSource {
    /// Register `listener`. It stays registered until the returned
    /// subscription is dropped.
    fn subscribe(&self, listener: Listener) -> Subscription;
}

/// Handle that unregisters a listener when dropped.
#[must_use = "dropping a Subscription unregisters its listener"]
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Subscription that runs `teardown` exactly once when released.
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// Subscription with nothing to release.
    #[must_use]
    pub fn empty() -> Self {
        Self { teardown: None }
    }

    /// Unregister now.
    pub fn cancel(mut self) {
        self.release();
    }

    /// Whether the listener is still registered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.teardown.is_some()
    }

    fn release(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
    /// Ids unsubscribed while their listener was being dispatched.
    removed: Vec<u64>,
    dispatching: bool,
}

/// In-process input source driven by [`emit`](Self::emit).
///
/// Cloning yields another handle to the same listener set.
#[derive(Clone, Default)]
pub struct SyntheticInput {
    registry: Rc<RefCell<Registry>>,
}

impl SyntheticInput {
    /// Source with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    /// Deliver `event` to every listener.
    ///
    /// Listeners may subscribe or unsubscribe while being called; changes
    /// apply from the next event on.
    pub fn emit(&self, event: &InputEvent, at: Instant) {
        let mut listeners = {
            let mut registry = self.registry.borrow_mut();
            registry.dispatching = true;
            std::mem::take(&mut registry.listeners)
        };

        for (_, listener) in &mut listeners {
            listener(event, at);
        }

        let mut registry = self.registry.borrow_mut();
        registry.dispatching = false;
        let removed = std::mem::take(&mut registry.removed);
        listeners.retain(|(id, _)| !removed.contains(id));
        // Listeners added during dispatch were pushed onto the emptied vec.
        listeners.append(&mut registry.listeners);
        registry.listeners = listeners;
    }
}

impl InputSource for SyntheticInput {
    fn subscribe(&self, listener: Listener) -> Subscription {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.push((id, listener));
            id
        };

        let weak = Rc::downgrade(&self.registry);
        Subscription::new(move || {
            let Some(registry) = weak.upgrade() else {
                return;
            };
            let mut registry = registry.borrow_mut();
            if registry.dispatching {
                registry.removed.push(id);
            }
            registry.listeners.retain(|(other, _)| *other != id);
        })
    }
}

impl std::fmt::Debug for SyntheticInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntheticInput")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(source: &SyntheticInput) -> (Rc<RefCell<u32>>, Subscription) {
        let hits = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&hits);
        let sub = source.subscribe(Box::new(move |_, _| {
            *seen.borrow_mut() += 1;
        }));
        (hits, sub)
    }

    #[test]
    fn dropping_the_subscription_detaches() {
        let source = SyntheticInput::new();
        let (hits, sub) = counter(&source);
        let event = InputEvent::Scroll { delta: 1.0 };

        source.emit(&event, Instant::now());
        assert_eq!(*hits.borrow(), 1);
        assert_eq!(source.listener_count(), 1);

        drop(sub);
        assert_eq!(source.listener_count(), 0);
        source.emit(&event, Instant::now());
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn cancel_detaches_only_its_listener() {
        let source = SyntheticInput::new();
        let (a, sub_a) = counter(&source);
        let (b, _sub_b) = counter(&source);

        sub_a.cancel();
        source.emit(&InputEvent::Scroll { delta: 1.0 }, Instant::now());
        assert_eq!(*a.borrow(), 0);
        assert_eq!(*b.borrow(), 1);
        assert_eq!(source.listener_count(), 1);
    }

    #[test]
    fn unsubscribing_during_dispatch_is_deferred() {
        let source = SyntheticInput::new();
        let slot: Rc<RefCell<Option<Subscription>>> =
            Rc::new(RefCell::new(None));
        let inner = Rc::clone(&slot);
        let sub = source.subscribe(Box::new(move |_, _| {
            let _ = inner.borrow_mut().take();
        }));
        *slot.borrow_mut() = Some(sub);

        source.emit(&InputEvent::Scroll { delta: 1.0 }, Instant::now());
        assert_eq!(source.listener_count(), 0);
    }

    #[test]
    fn subscription_outliving_source_is_harmless() {
        let source = SyntheticInput::new();
        let (_, sub) = counter(&source);
        drop(source);
        assert!(sub.is_active());
        drop(sub);
    }
}
