// Copyright 2026 the Upwell Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-child delay computation for staggered reveal groups.
//!
//! A stagger container is observed as a single unit; when it enters the
//! viewport every marked child reveals in document order, each offset by
//! `base_delay_ms + index * step_ms`. The delays are computed once at
//! initialization from the container's attributes.

use crate::reveal::{parse_delay_ms, parse_ms};

/// Step between consecutive children when the stagger attribute carries no
/// usable value, in milliseconds.
pub const DEFAULT_STAGGER_STEP_MS: u32 = 60;

/// Delay schedule for one stagger container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StaggerPlan {
    /// Offset applied to every child.
    pub base_delay_ms: u32,
    /// Additional offset per child index.
    pub step_ms: u32,
}

impl StaggerPlan {
    /// Creates a plan from explicit values.
    #[must_use]
    pub const fn new(base_delay_ms: u32, step_ms: u32) -> Self {
        Self {
            base_delay_ms,
            step_ms,
        }
    }

    /// Derives a plan from a container's delay and stagger attributes.
    ///
    /// The base delay follows [`parse_delay_ms`] (default 0). The step
    /// defaults to [`DEFAULT_STAGGER_STEP_MS`] when the attribute is missing
    /// or unparseable; an explicit `"0"` is honored and reveals every child
    /// simultaneously.
    #[must_use]
    pub fn from_markup(delay_attr: Option<&str>, stagger_attr: Option<&str>) -> Self {
        Self {
            base_delay_ms: parse_delay_ms(delay_attr),
            step_ms: stagger_attr
                .and_then(parse_ms)
                .unwrap_or(DEFAULT_STAGGER_STEP_MS),
        }
    }

    /// Effective delay for the child at `index` (document order).
    ///
    /// Saturates instead of wrapping for absurd markup values.
    #[must_use]
    pub const fn child_delay(self, index: u32) -> u32 {
        self.base_delay_ms.saturating_add(index.saturating_mul(self.step_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_delay_is_base_plus_index_times_step() {
        let plan = StaggerPlan::new(100, 50);
        for i in 0..8 {
            assert_eq!(plan.child_delay(i), 100 + 50 * i);
        }
    }

    #[test]
    fn container_with_step_80_and_no_base_delay() {
        // Three children, stagger attribute "80", delay attribute unset:
        // the children reveal at 0, 80, and 160 ms.
        let plan = StaggerPlan::from_markup(None, Some("80"));
        assert_eq!(plan.base_delay_ms, 0);
        let delays: [u32; 3] = [plan.child_delay(0), plan.child_delay(1), plan.child_delay(2)];
        assert_eq!(delays, [0, 80, 160]);
    }

    #[test]
    fn missing_step_defaults_to_60() {
        let plan = StaggerPlan::from_markup(Some("100"), None);
        assert_eq!(plan, StaggerPlan::new(100, 60));
    }

    #[test]
    fn unparseable_step_defaults_to_60() {
        let plan = StaggerPlan::from_markup(None, Some("fast"));
        assert_eq!(plan.step_ms, 60);
    }

    #[test]
    fn explicit_zero_step_is_simultaneous() {
        let plan = StaggerPlan::from_markup(Some("40"), Some("0"));
        assert_eq!(plan.child_delay(0), 40);
        assert_eq!(plan.child_delay(5), 40);
    }

    #[test]
    fn child_delay_saturates() {
        let plan = StaggerPlan::new(u32::MAX - 10, 60);
        assert_eq!(plan.child_delay(7), u32::MAX);
    }
}
