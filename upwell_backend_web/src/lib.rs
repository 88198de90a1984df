// Copyright 2026 the Upwell Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for upwell.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`ViewportWatcher`]: `IntersectionObserver` wrapper with per-element
//!   enter/exit callbacks and one-shot registrations
//! - [`RevealController`]: attribute-driven one-time reveal with staggered
//!   groups and a reduced-motion fallback
//! - [`MotionController`]: generic scroll-driven class toggles
//! - [`Bootstrapper`]: ordered page boot with a per-module error boundary

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

mod boot;
mod media;
mod motion;
mod reveal;
mod watcher;

pub use boot::Bootstrapper;
pub use media::prefers_reduced_motion;
pub use motion::MotionController;
pub use reveal::RevealController;
pub use watcher::{Subscription, SubscriptionSet, ViewportWatcher, WatchHandlers, WatcherConfig};

pub use upwell_core::reveal::RevealKind;
pub use upwell_core::stagger::StaggerPlan;
