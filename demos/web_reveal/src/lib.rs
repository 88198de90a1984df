// Copyright 2026 the Upwell Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: staged scroll reveal driven by `upwell_backend_web`.
//!
//! Builds a scrollable page entirely from Rust — a hero section above the
//! fold, then a fading heading, a sliding paragraph, a staggered card grid,
//! and a `data-motion` badge below it — and boots the reveal and motion
//! controllers through the [`Bootstrapper`]. Scroll down to watch the
//! targets transition in; with reduced motion enabled they appear instantly.
//!
//! Build with: `wasm-pack build --target web demos/web_reveal`
//!
//! Then serve `demos/web_reveal/` and open `index.html` in a browser.
//!
//! [`Bootstrapper`]: upwell_backend_web::Bootstrapper

// This crate only runs in the browser; suppress dead-code warnings when
// cargo-checking on a native host target.
#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::format;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

use upwell_backend_web::{Bootstrapper, MotionController, RevealController};
use upwell_core::attr;

const CARD_COLORS: [&str; 3] = [
    "rgba(242, 67, 54, 0.9)",  // red
    "rgba(77, 176, 80, 0.9)",  // green
    "rgba(33, 150, 243, 0.9)", // blue
];

/// Entry point — called automatically by `wasm_bindgen(start)`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    let window = web_sys::window().expect("no global window");
    let document = window.document().expect("no document");

    build_page(&document)?;

    let reveal = RevealController::new();
    let motion = MotionController::new();

    let mut boot = Bootstrapper::new();
    boot.register("motion", move || {
        motion.initialize();
        Ok(())
    });
    boot.boot(&reveal);

    // Keep the controllers (and their observers) alive for the page's
    // lifetime — there is no graceful shutdown on the web.
    core::mem::forget(boot);
    core::mem::forget(reveal);

    Ok(())
}

/// Builds the demo page: hero, reveal targets, stagger grid, motion badge.
fn build_page(document: &Document) -> Result<(), JsValue> {
    let body = document.body().expect("no body");
    let _ = body.style().set_property("margin", "0");
    let _ = body
        .style()
        .set_property("font-family", "system-ui, sans-serif");
    let _ = body.style().set_property("background", "#101014");
    let _ = body.style().set_property("color", "#f4f4f6");

    // Hero fills the first viewport so everything below starts off-screen.
    let hero = styled_block(document, "min-height: 100vh; display: grid; place-items: center")?;
    let title = text_el(document, "h1", "Scroll to reveal")?;
    hero.append_child(&title)?;
    body.append_child(&hero)?;

    let section = styled_block(document, "max-width: 640px; margin: 0 auto; padding: 4rem 1rem")?;

    let heading = text_el(document, "h2", "Fading in")?;
    heading.set_attribute(attr::REVEAL, "fade")?;
    section.append_child(&heading)?;

    let copy = text_el(
        document,
        "p",
        "This paragraph slides up 120 ms after it enters the viewport.",
    )?;
    copy.set_attribute(attr::REVEAL, "slide-up")?;
    copy.set_attribute(attr::REVEAL_DELAY, "120")?;
    section.append_child(&copy)?;

    // Staggered grid: the container is observed as one unit, the cards
    // reveal at 0, 80, and 160 ms.
    let grid = styled_block(
        document,
        "display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; margin-top: 3rem",
    )?;
    grid.set_attribute(attr::REVEAL, "")?;
    grid.set_attribute(attr::REVEAL_STAGGER, "80")?;
    for (i, color) in CARD_COLORS.iter().enumerate() {
        let card = styled_block(
            document,
            &format!("height: 120px; border-radius: 12px; background: {color}"),
        )?;
        card.set_attribute(attr::REVEAL, "scale-in")?;
        card.set_attribute(attr::REVEAL_CHILD, "")?;
        let _ = card.set_attribute("aria-label", &format!("card {}", i + 1));
        grid.append_child(&card)?;
    }
    section.append_child(&grid)?;

    let badge = text_el(document, "div", "in view")?;
    badge.set_attribute(attr::MOTION, "is-floating")?;
    let _ = badge
        .dyn_ref::<HtmlElement>()
        .expect("badge is an html element")
        .style()
        .set_property("margin-top", "3rem");
    section.append_child(&badge)?;

    body.append_child(&section)?;
    Ok(())
}

/// Creates a `<div>` carrying the given inline style text.
fn styled_block(document: &Document, css: &str) -> Result<Element, JsValue> {
    let el = document.create_element("div")?;
    el.set_attribute("style", css)?;
    Ok(el)
}

/// Creates an element of `tag` with the given text content.
fn text_el(document: &Document, tag: &str, text: &str) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    el.set_text_content(Some(text));
    Ok(el)
}
