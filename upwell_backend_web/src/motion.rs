// Copyright 2026 the Upwell Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generic scroll-driven class toggles.
//!
//! [`MotionController`] is the thin sibling of
//! [`RevealController`](crate::reveal::RevealController): no per-kind
//! styling, no stagger, just class names added on viewport entry.
//!
//! Two independent marking systems are wired here, each on its own watcher:
//!
//! - `[data-motion]` elements get the class named by the attribute value on
//!   every entry (not one-shot, no exit action);
//! - `[data-reveal]` elements get the fixed `is-revealed` class on first
//!   entry only.
//!
//! The second is the default fallback marking that pages rely on when the
//! richer reveal controller is not wired up. The two subscriptions are kept
//! deliberately separate rather than merged, and the separate watchers mean
//! an element carrying both markers holds both registrations.

use alloc::borrow::ToOwned as _;
use core::cell::Cell;

use web_sys::Element;

use upwell_core::attr;

use crate::reveal::query_targets;
use crate::watcher::{ViewportWatcher, WatchHandlers};

/// Adds marker classes when tagged elements enter the viewport.
#[derive(Debug)]
pub struct MotionController {
    /// Repeating `[data-motion]` class toggles.
    classes: ViewportWatcher,
    /// One-shot `is-revealed` fallback marking.
    revealed: ViewportWatcher,
    root: Option<Element>,
    initialized: Cell<bool>,
}

impl Default for MotionController {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionController {
    /// Creates a controller scanning the whole document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            classes: ViewportWatcher::new(),
            revealed: ViewportWatcher::new(),
            root: None,
            initialized: Cell::new(false),
        }
    }

    /// Restricts scanning to the subtree under `root`.
    #[must_use]
    pub fn with_root(mut self, root: Element) -> Self {
        self.root = Some(root);
        self
    }

    /// Discovers tagged elements and wires both marking systems.
    ///
    /// Synchronous and idempotent per controller; absence of matching
    /// elements is a silent no-op.
    pub fn initialize(&self) {
        if self.initialized.replace(true) {
            return;
        }

        for el in query_targets(self.root.as_ref(), attr::MOTION_SELECTOR) {
            let Some(class) = el.get_attribute(attr::MOTION) else {
                continue;
            };
            let class = class.trim().to_owned();
            if class.is_empty() {
                continue;
            }
            let target = el.clone();
            let handlers = WatchHandlers::enter(move |_entry| {
                let _ = target.class_list().add_1(&class);
            });
            let _ = self.classes.observe(Some(&el), handlers);
        }

        for el in query_targets(self.root.as_ref(), attr::REVEAL_SELECTOR) {
            let target = el.clone();
            let handlers = WatchHandlers::enter(move |_entry| {
                let _ = target.class_list().add_1(attr::REVEALED_CLASS);
            })
            .once();
            let _ = self.revealed.observe(Some(&el), handlers);
        }
    }
}
