// Copyright 2026 the Upwell Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The attribute vocabulary consumed from markup.
//!
//! These names are the contract between markup authors and the reveal
//! subsystem. An element carrying [`REVEAL`] is an individual target unless
//! it also carries [`REVEAL_STAGGER`], in which case it is a container whose
//! [`REVEAL_CHILD`]-marked descendants reveal as a staggered group; the two
//! classifications are mutually exclusive at discovery time.

/// Marks an element for reveal; the value selects the
/// [`RevealKind`](crate::reveal::RevealKind).
pub const REVEAL: &str = "data-reveal";

/// Per-target start offset in milliseconds.
pub const REVEAL_DELAY: &str = "data-reveal-delay";

/// Declares a stagger container; the value is the step between children in
/// milliseconds.
pub const REVEAL_STAGGER: &str = "data-reveal-stagger";

/// Marks an element as a stagger group member.
pub const REVEAL_CHILD: &str = "data-reveal-child";

/// Init guard set during setup so repeat initialization is idempotent.
pub const REVEAL_INIT: &str = "data-reveal-init";

/// Names a class to add when the element enters the viewport.
pub const MOTION: &str = "data-motion";

/// Selector matching every reveal target and container.
pub const REVEAL_SELECTOR: &str = "[data-reveal]";

/// Selector matching stagger group members.
pub const REVEAL_CHILD_SELECTOR: &str = "[data-reveal-child]";

/// Selector matching scroll-driven motion hooks.
pub const MOTION_SELECTOR: &str = "[data-motion]";

/// Fixed class the motion fallback adds on first viewport entry.
pub const REVEALED_CLASS: &str = "is-revealed";
