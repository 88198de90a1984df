// Copyright 2026 the Upwell Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for viewport-observation and staged reveal.
//!
//! `upwell_core` holds every part of the reveal subsystem that does not need
//! a browser: registration bookkeeping, the reveal vocabulary (kinds,
//! transition strings, delay parsing), stagger delay math, and the attribute
//! names that form the contract with markup authors. It is `no_std`
//! compatible (with `alloc`) so the whole decision surface is testable on the
//! host while the web backend stays thin.
//!
//! # Architecture
//!
//! The backend turns platform intersection callbacks into reveal transitions
//! using the pieces defined here:
//!
//! ```text
//!   markup attributes ──► attr / reveal parsing ──► initial hidden state
//!        │
//!        ▼
//!   ViewportWatcher (backend) ──► WatchTable registrations
//!        │
//!        ▼
//!   intersection batch ──► enter/exit dispatch ──► reveal transition
//!                                │                      │
//!                                ▼                      ▼
//!                          once removal          stagger delays
//! ```
//!
//! **[`watch`]** — Generational slot storage for watcher registrations.
//! Handles stay valid across slot reuse; removing a stale handle is a no-op,
//! which is what makes double-unsubscribe and unsubscribe-after-`once` safe.
//!
//! **[`reveal`]** — Reveal kinds and their initial hidden styles, the fixed
//! transition duration/curve, and markup delay parsing.
//!
//! **[`stagger`]** — Per-child delay computation for staggered groups.
//!
//! **[`attr`]** — The attribute vocabulary consumed from markup.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod attr;
pub mod reveal;
pub mod stagger;
pub mod watch;
