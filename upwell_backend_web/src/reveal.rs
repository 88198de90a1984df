// Copyright 2026 the Upwell Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute-driven one-time reveal with staggered groups.
//!
//! [`RevealController`] scans for `[data-reveal]` elements, applies their
//! hidden initial styles synchronously, and registers one-shot viewport
//! watches that run the reveal transition on first entry. Containers that
//! also carry `[data-reveal-stagger]` are handled as groups: the container
//! is observed as a single unit and its `[data-reveal-child]` members reveal
//! in document order with computed delays.
//!
//! Reduced motion short-circuits every transition: the final visual state is
//! committed synchronously inside the enter callback with no cleanup step.
//! Otherwise the final state is committed on the next animation frame so the
//! hidden state is painted first, and a `transitionend` listener clears the
//! transient styling hints exactly once.

use alloc::vec::Vec;
use core::cell::Cell;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, HtmlElement, TransitionEvent};

use upwell_core::attr;
use upwell_core::reveal::{RevealKind, parse_delay_ms, transition_shorthand};
use upwell_core::stagger::StaggerPlan;

use crate::media::prefers_reduced_motion;
use crate::watcher::{ViewportWatcher, WatchHandlers};

/// Drives the one-time reveal lifecycle for tagged elements.
///
/// Owns its [`ViewportWatcher`]; dropping the controller disconnects all
/// detection, so a page keeps it alive for as long as reveals should fire.
#[derive(Debug)]
pub struct RevealController {
    watcher: ViewportWatcher,
    root: Option<Element>,
}

impl Default for RevealController {
    fn default() -> Self {
        Self::new()
    }
}

impl RevealController {
    /// Creates a controller with a fresh default watcher, scanning the
    /// whole document.
    #[must_use]
    pub fn new() -> Self {
        Self::with_watcher(ViewportWatcher::new())
    }

    /// Creates a controller around an existing watcher.
    #[must_use]
    pub fn with_watcher(watcher: ViewportWatcher) -> Self {
        Self {
            watcher,
            root: None,
        }
    }

    /// Restricts scanning to the subtree under `root`.
    #[must_use]
    pub fn with_root(mut self, root: Element) -> Self {
        self.root = Some(root);
        self
    }

    /// Discovers targets and wires all watcher registrations.
    ///
    /// Synchronous and idempotent: targets already set up are skipped via
    /// their init-guard attribute, and the method returns without waiting
    /// for any reveal. No matching elements, a missing document, or an
    /// unavailable platform observer are all silent no-ops.
    pub fn initialize(&self) {
        let all = query_targets(self.root.as_ref(), attr::REVEAL_SELECTOR);
        if all.is_empty() {
            return;
        }

        // Mutually exclusive classification: an element carrying the
        // stagger marker is a container, never an individual target, and a
        // group member reveals only through its container.
        let (containers, rest): (Vec<_>, Vec<_>) = all
            .into_iter()
            .partition(|el| el.has_attribute(attr::REVEAL_STAGGER));
        let individuals: Vec<_> = rest
            .into_iter()
            .filter(|el| !el.has_attribute(attr::REVEAL_CHILD))
            .collect();

        self.init_individuals(individuals);
        self.init_staggered(containers);
    }

    fn init_individuals(&self, targets: Vec<Element>) {
        for target in &targets {
            apply_initial_styles(target);
        }

        let handlers = WatchHandlers::enter(|entry| {
            let target = entry.target();
            let delay = parse_delay_ms(target.get_attribute(attr::REVEAL_DELAY).as_deref());
            reveal_with_transition(&target, delay);
        })
        .once();

        // Registrations live until the element enters the viewport; the
        // controller keeps no per-target state.
        let _ = self.watcher.observe_all(targets, handlers);
    }

    fn init_staggered(&self, containers: Vec<Element>) {
        for container in containers {
            let children = query_targets(Some(&container), attr::REVEAL_CHILD_SELECTOR);
            if children.is_empty() {
                continue;
            }

            let plan = StaggerPlan::from_markup(
                container.get_attribute(attr::REVEAL_DELAY).as_deref(),
                container.get_attribute(attr::REVEAL_STAGGER).as_deref(),
            );

            // Children move to their hidden state now; delays are computed
            // once, by document-order index.
            let staged: Vec<(Element, u32)> = (0u32..)
                .zip(children)
                .map(|(index, child)| {
                    apply_initial_styles(&child);
                    (child, plan.child_delay(index))
                })
                .collect();

            let marker = container.clone();
            let handlers = WatchHandlers::enter(move |_entry| {
                for (child, delay) in &staged {
                    reveal_with_transition(child, *delay);
                }
                // Dropping the marker signals the group dispatched.
                let _ = marker.remove_attribute(attr::REVEAL_STAGGER);
            })
            .once();

            let _ = self.watcher.observe(Some(&container), handlers);
        }
    }

    /// The watcher driving this controller's registrations.
    #[must_use]
    pub fn watcher(&self) -> &ViewportWatcher {
        &self.watcher
    }
}

/// Collects the elements matching `selector` under `root` (or the document).
pub(crate) fn query_targets(root: Option<&Element>, selector: &str) -> Vec<Element> {
    let list = match root {
        Some(root) => root.query_selector_all(selector),
        None => {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return Vec::new();
            };
            document.query_selector_all(selector)
        }
    };
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Applies the hidden initial state for a target's kind.
///
/// Guarded by the init attribute: a target already in `PENDING_REVEAL` (or
/// `REVEALED`) is skipped entirely, keeping repeat initialization from
/// re-hiding visible content.
fn apply_initial_styles(target: &Element) {
    if target.get_attribute(attr::REVEAL_INIT).as_deref() == Some("1") {
        return;
    }
    let _ = target.set_attribute(attr::REVEAL_INIT, "1");

    let Some(html) = target.dyn_ref::<HtmlElement>() else {
        return;
    };
    let kind = RevealKind::parse(&target.get_attribute(attr::REVEAL).unwrap_or_default());
    let style = html.style();
    let _ = style.set_property("will-change", "opacity, transform");
    let _ = style.set_property("opacity", "0");
    let _ = style.set_property("transform", kind.initial_transform());
}

/// Transitions one target to its revealed state.
///
/// Reduced motion commits the final state synchronously. The animated path
/// schedules the commit for the next animation frame (the hidden state must
/// paint before the transition starts) and clears the transient styling
/// hints once the transition ends.
fn reveal_with_transition(target: &Element, delay_ms: u32) {
    let Some(html) = target.dyn_ref::<HtmlElement>() else {
        let _ = target.remove_attribute(attr::REVEAL);
        return;
    };
    let style = html.style();

    if prefers_reduced_motion() {
        let _ = style.set_property("opacity", "1");
        let _ = style.set_property("transform", "none");
        let _ = style.set_property("transition", "none");
        let _ = target.remove_attribute(attr::REVEAL);
        return;
    }

    let _ = style.set_property("transition", &transition_shorthand(delay_ms));

    // Commit the visible end-state one frame later.
    let commit_style = style.clone();
    let commit = Closure::once_into_js(move || {
        let _ = commit_style.set_property("opacity", "1");
        let _ = commit_style.set_property("transform", "none");
    });
    if let Some(window) = web_sys::window() {
        let _ = window.request_animation_frame(commit.unchecked_ref());
    }

    // Clear the transient hints exactly once, no matter how many
    // transitionend events the element dispatches. Events from unrelated
    // properties are filtered out so an early end on some other transition
    // cannot cut the reveal short.
    let fired = Cell::new(false);
    let cleanup_style = style;
    let cleanup = Closure::<dyn FnMut(TransitionEvent)>::new(move |event: TransitionEvent| {
        let property = event.property_name();
        if property != "opacity" && property != "transform" {
            return;
        }
        if fired.replace(true) {
            return;
        }
        let _ = cleanup_style.remove_property("will-change");
        let _ = cleanup_style.remove_property("transition");
    });
    let _ = html
        .add_event_listener_with_callback("transitionend", cleanup.as_ref().unchecked_ref());
    // One listener per revealed target, kept for the element's lifetime.
    cleanup.forget();

    // Marker removal is the completion signal for external styling; it
    // precedes the visual commit, which lands on the next frame.
    let _ = target.remove_attribute(attr::REVEAL);
}
