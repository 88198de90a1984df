// Copyright 2026 the Upwell Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Media-query helpers.

/// Returns `true` if the platform requests minimal or no animation.
///
/// Queried at reveal time (not cached) so a preference change mid-session
/// affects targets that have not yet revealed. Unavailable `matchMedia`
/// reads as `false`: full animation is the default.
#[must_use]
pub fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|window| {
            window
                .match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .is_some_and(|query| query.matches())
}
