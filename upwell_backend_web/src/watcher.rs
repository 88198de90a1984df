// Copyright 2026 the Upwell Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `IntersectionObserver` wrapper with per-element enter/exit callbacks.
//!
//! A [`ViewportWatcher`] owns one `IntersectionObserver` and a
//! [`WatchTable`] of registrations. Elements are registered with
//! [`observe`](ViewportWatcher::observe); the platform batches intersection
//! changes and delivers them to a single JS closure, which dispatches each
//! entry to its registration in delivery order.
//!
//! Element identity is the registration key: a `js_sys::WeakMap` maps each
//! observed element to its slot index, so the association never extends the
//! element's lifetime. Re-observing an element silently replaces its prior
//! registration, keeping at most one per element per watcher instance.
//!
//! If the platform cannot construct an `IntersectionObserver`, construction
//! still succeeds and the watcher is inert: every [`observe`] returns a
//! no-op [`Subscription`] and no callback ever fires. Callers must tolerate
//! targets that never report entry.
//!
//! [`observe`]: ViewportWatcher::observe
//! [`WatchTable`]: upwell_core::watch::WatchTable

use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use upwell_core::watch::{WatchId, WatchTable};

/// Observer geometry for one watcher instance.
#[derive(Clone, Debug, PartialEq)]
pub struct WatcherConfig {
    /// Intersection root; `None` means the viewport.
    pub root: Option<Element>,
    /// Margin applied to the root's bounding box before testing.
    pub root_margin: String,
    /// Fraction of the target's area that must be visible.
    pub threshold: f64,
}

impl Default for WatcherConfig {
    /// Triggers 10% before the element's bottom edge reaches the viewport
    /// edge, at 10% visible area.
    fn default() -> Self {
        Self {
            root: None,
            root_margin: String::from("0px 0px -10% 0px"),
            threshold: 0.1,
        }
    }
}

type EntryCallback = Rc<dyn Fn(&IntersectionObserverEntry)>;

/// Per-element callbacks and the one-shot flag.
///
/// Callbacks are shared `Fn` closures so a callback may re-enter the watcher
/// (for example, unsubscribe itself) while it runs; the dispatch loop never
/// holds a registration borrow across an invocation.
#[derive(Clone)]
pub struct WatchHandlers {
    on_enter: EntryCallback,
    on_exit: Option<EntryCallback>,
    once: bool,
}

impl WatchHandlers {
    /// Creates handlers that invoke `on_enter` each time the element enters
    /// the viewport.
    pub fn enter(on_enter: impl Fn(&IntersectionObserverEntry) + 'static) -> Self {
        Self {
            on_enter: Rc::new(on_enter),
            on_exit: None,
            once: false,
        }
    }

    /// Auto-deregisters the element after its first enter callback.
    #[must_use]
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    /// Invokes `on_exit` when the element leaves the viewport.
    ///
    /// Exit callbacks never fire for `once` registrations and never trigger
    /// deregistration.
    #[must_use]
    pub fn on_exit(mut self, on_exit: impl Fn(&IntersectionObserverEntry) + 'static) -> Self {
        self.on_exit = Some(Rc::new(on_exit));
        self
    }

    /// Returns `true` if this registration auto-deregisters on first entry.
    #[must_use]
    pub fn is_once(&self) -> bool {
        self.once
    }

    /// Returns `true` if an exit callback was supplied.
    #[must_use]
    pub fn has_exit(&self) -> bool {
        self.on_exit.is_some()
    }
}

impl core::fmt::Debug for WatchHandlers {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WatchHandlers")
            .field("on_exit", &self.on_exit.is_some())
            .field("once", &self.once)
            .finish()
    }
}

struct Registration {
    element: Element,
    handlers: WatchHandlers,
}

/// State shared between the watcher, its dispatch closure, and outstanding
/// subscriptions. The closure captures an `Rc` of this (never of the watcher
/// itself), so no reference cycle forms through the JS heap.
struct Shared {
    table: RefCell<WatchTable<Registration>>,
    /// Element → slot index. Weak keys: the association dies with the
    /// element and never extends its lifetime.
    lookup: js_sys::WeakMap,
    /// `None` before construction finishes, after `disconnect`, or when the
    /// platform lacks `IntersectionObserver`.
    observer: RefCell<Option<IntersectionObserver>>,
}

/// Detects elements crossing into (and out of) the visible viewport.
pub struct ViewportWatcher {
    shared: Rc<Shared>,
    /// Keeps the dispatch closure alive for the observer's lifetime.
    _callback: Option<Closure<dyn FnMut(js_sys::Array)>>,
}

impl Default for ViewportWatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportWatcher {
    /// Creates a watcher with the default margin and threshold.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WatcherConfig::default())
    }

    /// Creates a watcher with explicit observer geometry.
    #[must_use]
    pub fn with_config(config: WatcherConfig) -> Self {
        let shared = Rc::new(Shared {
            table: RefCell::new(WatchTable::new()),
            lookup: js_sys::WeakMap::new(),
            observer: RefCell::new(None),
        });

        let dispatch_shared = Rc::clone(&shared);
        let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
            dispatch(&dispatch_shared, &entries);
        });

        let options = IntersectionObserverInit::new();
        options.set_root_margin(&config.root_margin);
        options.set_threshold(&JsValue::from_f64(config.threshold));
        if let Some(root) = config.root.as_ref() {
            options.set_root(Some(root));
        }

        // Detection is best-effort: if the platform cannot construct an
        // observer, the watcher stays inert rather than failing.
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .ok();
        let callback = observer.is_some().then_some(callback);
        *shared.observer.borrow_mut() = observer;

        Self {
            shared,
            _callback: callback,
        }
    }

    /// Registers `element` for intersection callbacks.
    ///
    /// Returns a [`Subscription`] that deregisters exactly this
    /// registration; unsubscribing more than once is a no-op. An absent
    /// element (or an inert watcher) yields a no-op subscription — never an
    /// error. An element already registered with this watcher has its prior
    /// registration silently replaced.
    pub fn observe(&self, element: Option<&Element>, handlers: WatchHandlers) -> Subscription {
        let Some(element) = element else {
            return Subscription::inert();
        };
        let observer = self.shared.observer.borrow();
        let Some(observer) = observer.as_ref() else {
            return Subscription::inert();
        };

        if let Some(prior) = registration_for(&self.shared, element) {
            let _ = self.shared.table.borrow_mut().remove(prior);
        }

        let id = self.shared.table.borrow_mut().insert(Registration {
            element: element.clone(),
            handlers,
        });
        let _ = self
            .shared
            .lookup
            .set(element, &JsValue::from_f64(f64::from(id.index())));
        observer.observe(element);

        Subscription {
            shared: Rc::downgrade(&self.shared),
            id: Some(id),
        }
    }

    /// Registers every element in `elements` with identical handlers.
    ///
    /// The returned [`SubscriptionSet`] unsubscribes all of them in
    /// registration order.
    pub fn observe_all(
        &self,
        elements: impl IntoIterator<Item = Element>,
        handlers: WatchHandlers,
    ) -> SubscriptionSet {
        let subscriptions = elements
            .into_iter()
            .map(|element| self.observe(Some(&element), handlers.clone()))
            .collect();
        SubscriptionSet { subscriptions }
    }

    /// Stops all detection permanently for this watcher instance.
    ///
    /// Every registration is dropped and no callback ever fires again;
    /// later `observe` calls return no-op subscriptions.
    pub fn disconnect(&self) {
        if let Some(observer) = self.shared.observer.borrow_mut().take() {
            observer.disconnect();
        }
        self.shared.table.borrow_mut().clear();
    }

    /// Number of live registrations.
    #[must_use]
    pub fn len(&self) -> u32 {
        self.shared.table.borrow().len()
    }

    /// Returns `true` if no registrations are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shared.table.borrow().is_empty()
    }
}

impl Drop for ViewportWatcher {
    fn drop(&mut self) {
        // The observer must not outlive the dispatch closure.
        self.disconnect();
    }
}

impl core::fmt::Debug for ViewportWatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ViewportWatcher")
            .field("active", &self.shared.observer.borrow().is_some())
            .field("registrations", &self.shared.table.borrow().len())
            .finish()
    }
}

/// Resolves the live registration for `element`, verifying element identity.
fn registration_for(shared: &Shared, element: &Element) -> Option<WatchId> {
    let value = shared.lookup.get(element);
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "lookup values are slot indices; small nonnegative integers"
    )]
    let idx = value.as_f64()? as u32;
    let table = shared.table.borrow();
    let id = table.id_at(idx)?;
    let registration = table.get(id)?;
    (registration.element == *element).then_some(id)
}

/// Removes a registration, unobserves its element, and drops the lookup
/// entry. Stale ids are a safe no-op.
fn remove_registration(shared: &Shared, id: WatchId) {
    let Some(registration) = shared.table.borrow_mut().remove(id) else {
        return;
    };
    let _ = shared.lookup.delete(&registration.element);
    if let Some(observer) = shared.observer.borrow().as_ref() {
        observer.unobserve(&registration.element);
    }
}

/// Dispatches one intersection batch in delivery order.
///
/// Each entry's full handling — including `once` deregistration — completes
/// before the next entry is examined, so removing one element never
/// suppresses or delays another entry in the same batch. Handlers are cloned
/// out of the table before invocation, so a callback may safely unsubscribe
/// itself or any other registration.
fn dispatch(shared: &Rc<Shared>, entries: &js_sys::Array) {
    for entry in entries.iter() {
        let entry: IntersectionObserverEntry = entry.unchecked_into();
        let target = entry.target();
        let Some(id) = registration_for(shared, &target) else {
            continue;
        };
        let Some(handlers) = shared
            .table
            .borrow()
            .get(id)
            .map(|registration| registration.handlers.clone())
        else {
            continue;
        };

        if entry.is_intersecting() {
            (handlers.on_enter)(&entry);
            if handlers.once {
                remove_registration(shared, id);
            }
        } else if !handlers.once
            && let Some(on_exit) = handlers.on_exit.as_ref()
        {
            on_exit(&entry);
        }
    }
}

/// Deregistration handle for a single [`observe`](ViewportWatcher::observe).
#[derive(Debug)]
pub struct Subscription {
    shared: Weak<Shared>,
    id: Option<WatchId>,
}

impl Subscription {
    fn inert() -> Self {
        Self {
            shared: Weak::new(),
            id: None,
        }
    }

    /// Deregisters exactly this registration.
    ///
    /// Safe to call repeatedly, and safe after the registration already
    /// auto-deregistered via `once`: the stale handle makes every later call
    /// a no-op.
    pub fn unsubscribe(&self) {
        let (Some(shared), Some(id)) = (self.shared.upgrade(), self.id) else {
            return;
        };
        remove_registration(&shared, id);
    }

    /// Returns `true` if the registration is still live.
    #[must_use]
    pub fn is_active(&self) -> bool {
        match (self.shared.upgrade(), self.id) {
            (Some(shared), Some(id)) => shared.table.borrow().contains(id),
            _ => false,
        }
    }
}

/// Deregistration handle for [`observe_all`](ViewportWatcher::observe_all).
#[derive(Debug)]
pub struct SubscriptionSet {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionSet {
    /// Unsubscribes every registration, in registration order.
    pub fn unsubscribe_all(&self) {
        for subscription in &self.subscriptions {
            subscription.unsubscribe();
        }
    }

    /// Number of subscriptions in the set (including inert ones).
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_triggers_early() {
        let config = WatcherConfig::default();
        assert_eq!(config.root_margin, "0px 0px -10% 0px");
        assert!((config.threshold - 0.1).abs() < f64::EPSILON, "10% area");
        assert!(config.root.is_none(), "default root is the viewport");
    }

    #[test]
    fn handlers_default_to_repeating_enter_only() {
        let handlers = WatchHandlers::enter(|_| {});
        assert!(!handlers.is_once());
        assert!(!handlers.has_exit());
    }

    #[test]
    fn handlers_builder_sets_flags() {
        let handlers = WatchHandlers::enter(|_| {}).once().on_exit(|_| {});
        assert!(handlers.is_once());
        assert!(handlers.has_exit());
    }
}
