// Copyright 2026 the Upwell Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered page boot with a per-module error boundary.
//!
//! The reveal path runs first — anything hidden by its initial styles must
//! be wired before other modules touch the page — then each registered
//! module initializes in registration order. A failing module is logged to
//! the console and skipped; one failure never blocks the rest.

use alloc::boxed::Box;
use alloc::format;
use alloc::vec::Vec;

use wasm_bindgen::JsValue;
use web_sys::console;

use crate::reveal::RevealController;

type InitFn = Box<dyn Fn() -> Result<(), JsValue>>;

struct Module {
    name: &'static str,
    init: InitFn,
}

/// Boots page modules in a fixed order, reveal first.
pub struct Bootstrapper {
    modules: Vec<Module>,
}

impl Default for Bootstrapper {
    fn default() -> Self {
        Self::new()
    }
}

impl Bootstrapper {
    /// Creates an empty bootstrapper.
    #[must_use]
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Registers a module initializer; modules run in registration order.
    pub fn register(
        &mut self,
        name: &'static str,
        init: impl Fn() -> Result<(), JsValue> + 'static,
    ) {
        self.modules.push(Module {
            name,
            init: Box::new(init),
        });
    }

    /// Number of registered modules (reveal is not counted; it always runs).
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` if no modules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Initializes the reveal controller, then every registered module.
    ///
    /// Module failures are logged and skipped so one broken module cannot
    /// keep the rest of the page from booting.
    pub fn boot(&self, reveal: &RevealController) {
        reveal.initialize();

        for module in &self.modules {
            if let Err(err) = (module.init)() {
                console::error_2(
                    &JsValue::from_str(&format!("[boot] module init failed: {}", module.name)),
                    &err,
                );
            }
        }
    }
}

impl core::fmt::Debug for Bootstrapper {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Bootstrapper")
            .field("modules", &self.modules.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_order_is_kept() {
        let mut boot = Bootstrapper::new();
        assert!(boot.is_empty());
        boot.register("header", || Ok(()));
        boot.register("motion", || Ok(()));
        assert_eq!(boot.len(), 2);
        let names: Vec<_> = boot.modules.iter().map(|m| m.name).collect();
        assert_eq!(names, ["header", "motion"]);
    }
}
