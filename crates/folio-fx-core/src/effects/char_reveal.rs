#![forbid(unsafe_code)]

//! Per-character text reveal.
//!
//! Text is split into grapheme clusters, each wrapped in its own span that
//! fades and slides in. Cluster `i` starts `i * CHAR_STAGGER` after the
//! first, following a linear stagger.

use std::time::Duration;

use unicode_segmentation::UnicodeSegmentation;

/// Delay between consecutive characters.
pub const CHAR_STAGGER: Duration = Duration::from_millis(50);

/// Name of the keyframes rule used by every character span.
pub const KEYFRAMES_NAME: &str = "fadeInChar";

/// Stylesheet injected once so the spans can animate.
pub const KEYFRAMES_CSS: &str = "
    @keyframes fadeInChar {
        from {
            opacity: 0;
            transform: translateY(20px);
        }
        to {
            opacity: 1;
            transform: translateY(0);
        }
    }
";

/// Styles set on the heading itself once its text is replaced by spans.
///
/// Pages may hide headings until the reveal runs; the spans carry their own
/// fade, so the heading must be visible.
pub const HOST_STYLES: [(&str, &str); 1] = [("opacity", "1")];

/// Styles every span starts with, before its animation runs.
pub const SLOT_STYLES: [(&str, &str); 1] = [("opacity", "0")];

/// One character span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharSlot {
    /// Span text; plain spaces become no-break spaces so they keep width.
    pub text: String,
    /// Start offset of this span's animation.
    pub delay: Duration,
}

impl CharSlot {
    /// CSS `animation` shorthand for this span.
    pub fn animation_css(&self) -> String {
        format!(
            "{KEYFRAMES_NAME} 0.5s ease forwards {}ms",
            self.delay.as_millis()
        )
    }
}

/// Split `text` into staggered character spans.
pub fn reveal_slots(text: &str) -> Vec<CharSlot> {
    text.graphemes(true)
        .enumerate()
        .map(|(i, g)| CharSlot {
            text: if g == " " { "\u{00A0}".to_owned() } else { g.to_owned() },
            delay: CHAR_STAGGER.saturating_mul(u32::try_from(i).unwrap_or(u32::MAX)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_nothing() {
        assert!(reveal_slots("").is_empty());
    }

    #[test]
    fn spaces_become_nbsp_and_delays_are_linear() {
        let slots = reveal_slots("a b");
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[1].text, "\u{00A0}");
        assert_eq!(slots[0].delay, Duration::ZERO);
        assert_eq!(slots[2].delay, Duration::from_millis(100));
    }

    #[test]
    fn clusters_stay_whole() {
        let slots = reveal_slots("🇯🇵x");
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].text, "🇯🇵");
    }

    #[test]
    fn heading_is_made_visible_while_spans_start_hidden() {
        assert!(HOST_STYLES.contains(&("opacity", "1")));
        assert!(SLOT_STYLES.contains(&("opacity", "0")));
    }

    #[test]
    fn animation_shorthand() {
        let slots = reveal_slots("xyz");
        assert_eq!(slots[2].animation_css(), "fadeInChar 0.5s ease forwards 100ms");
    }
}
