// Copyright 2026 the Upwell Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reveal vocabulary: kinds, transition strings, and delay parsing.
//!
//! A reveal target moves through three phases, carried entirely by its
//! element attributes so the controller holds no per-target state after
//! setup:
//!
//! ```text
//!   PENDING_SETUP ──(initialize)──► PENDING_REVEAL ──(viewport enter)──► REVEALED
//! ```
//!
//! - `PENDING_SETUP → PENDING_REVEAL` happens synchronously during
//!   initialization: the hidden initial style for the target's
//!   [`RevealKind`] is applied and the init-guard attribute is set, making
//!   repeat initialization idempotent.
//! - `PENDING_REVEAL → REVEALED` happens on viewport entry: either instantly
//!   (reduced motion) or via a transition built from
//!   [`transition_shorthand`]. Entering `REVEALED` removes the reveal marker
//!   attribute; a target that never enters the viewport stays in
//!   `PENDING_REVEAL` forever, by design.

use alloc::format;
use alloc::string::String;

/// Fixed transition duration for every reveal, in milliseconds.
pub const REVEAL_DURATION_MS: u32 = 600;

/// Fixed ease curve for every reveal.
pub const REVEAL_EASE: &str = "cubic-bezier(.2,.7,.2,1)";

/// The visual style a target transitions from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RevealKind {
    /// Transparent, no transform.
    Fade,
    /// Transparent, offset 18px downward.
    #[default]
    SlideUp,
    /// Transparent, scaled to 98%.
    ScaleIn,
}

impl RevealKind {
    /// Parses a reveal-marker attribute value.
    ///
    /// Unknown, empty, or whitespace-only values fall back to
    /// [`SlideUp`](Self::SlideUp).
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "fade" => Self::Fade,
            "scale-in" => Self::ScaleIn,
            _ => Self::SlideUp,
        }
    }

    /// The `transform` value of the hidden initial state.
    ///
    /// Initial `opacity` is `0` for every kind.
    #[must_use]
    pub const fn initial_transform(self) -> &'static str {
        match self {
            Self::Fade => "none",
            Self::SlideUp => "translateY(18px)",
            Self::ScaleIn => "scale(.98)",
        }
    }
}

/// Builds the two-property transition value for a reveal.
///
/// Opacity and transform animate together with the fixed duration and ease,
/// offset by `delay_ms`.
#[must_use]
pub fn transition_shorthand(delay_ms: u32) -> String {
    format!(
        "opacity {REVEAL_DURATION_MS}ms {REVEAL_EASE} {delay_ms}ms, \
         transform {REVEAL_DURATION_MS}ms {REVEAL_EASE} {delay_ms}ms"
    )
}

/// Parses a delay attribute in milliseconds.
///
/// Missing, empty, negative, or non-numeric values yield 0. A numeric prefix
/// is honored (`"60px"` parses as 60), matching how the markup contract was
/// consumed historically.
#[must_use]
pub fn parse_delay_ms(raw: Option<&str>) -> u32 {
    raw.and_then(parse_ms).unwrap_or(0)
}

/// Parses the leading unsigned integer of a trimmed attribute value.
///
/// Returns `None` when no digits lead the value (after an optional `+`).
/// Values that overflow `u32` are treated as unparseable.
pub(crate) fn parse_ms(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: usize = unsigned
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    unsigned[..digits].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_known_values() {
        assert_eq!(RevealKind::parse("fade"), RevealKind::Fade);
        assert_eq!(RevealKind::parse("slide-up"), RevealKind::SlideUp);
        assert_eq!(RevealKind::parse("scale-in"), RevealKind::ScaleIn);
    }

    #[test]
    fn kind_defaults_to_slide_up() {
        assert_eq!(RevealKind::parse(""), RevealKind::SlideUp);
        assert_eq!(RevealKind::parse("sparkle"), RevealKind::SlideUp);
        assert_eq!(RevealKind::default(), RevealKind::SlideUp);
    }

    #[test]
    fn kind_trims_whitespace() {
        assert_eq!(RevealKind::parse("  fade  "), RevealKind::Fade);
    }

    #[test]
    fn initial_transforms() {
        assert_eq!(RevealKind::Fade.initial_transform(), "none");
        assert_eq!(RevealKind::SlideUp.initial_transform(), "translateY(18px)");
        assert_eq!(RevealKind::ScaleIn.initial_transform(), "scale(.98)");
    }

    #[test]
    fn transition_covers_both_properties() {
        let value = transition_shorthand(120);
        assert_eq!(
            value,
            "opacity 600ms cubic-bezier(.2,.7,.2,1) 120ms, \
             transform 600ms cubic-bezier(.2,.7,.2,1) 120ms"
        );
    }

    #[test]
    fn transition_zero_delay() {
        let value = transition_shorthand(0);
        assert!(value.contains("opacity 600ms"), "missing opacity clause");
        assert!(value.contains("transform 600ms"), "missing transform clause");
        assert!(value.ends_with("0ms"), "delay must close the shorthand");
    }

    #[test]
    fn delay_parses_plain_integers() {
        assert_eq!(parse_delay_ms(Some("120")), 120);
        assert_eq!(parse_delay_ms(Some(" 45 ")), 45);
        assert_eq!(parse_delay_ms(Some("+30")), 30);
        assert_eq!(parse_delay_ms(Some("0")), 0);
    }

    #[test]
    fn delay_honors_numeric_prefix() {
        assert_eq!(parse_delay_ms(Some("60px")), 60);
        assert_eq!(parse_delay_ms(Some("12.5")), 12);
    }

    #[test]
    fn delay_degrades_to_zero() {
        assert_eq!(parse_delay_ms(None), 0);
        assert_eq!(parse_delay_ms(Some("")), 0);
        assert_eq!(parse_delay_ms(Some("soon")), 0);
        // Negative delays are clamped; a reveal never starts in the past.
        assert_eq!(parse_delay_ms(Some("-5")), 0);
        // Overflowing values are treated as unparseable.
        assert_eq!(parse_delay_ms(Some("99999999999999999999")), 0);
    }
}
