#![forbid(unsafe_code)]

//! Scroll reveal tracking.
//!
//! The host observes tagged elements with its intersection primitive and
//! forwards each notification here. An element is revealed the first time
//! its visible fraction reaches the threshold and stays revealed for good;
//! scrolling it back out of view never hides it again.

use std::collections::HashSet;

use crate::config::ScrollConfig;

/// Class that marks an element for reveal.
pub const FADE_IN_CLASS: &str = "fade-in";

/// Class added once an element is revealed.
pub const VISIBLE_CLASS: &str = "visible";

/// Per-section stagger of the fade-in animation, in milliseconds.
pub const SECTION_STAGGER_MS: usize = 100;

/// Host-assigned element identifier.
pub type ElementId = u32;

/// Tracks which observed elements have been revealed.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    threshold: f64,
    root_margin: String,
    observed: HashSet<ElementId>,
    revealed: HashSet<ElementId>,
}

impl RevealTracker {
    /// `threshold` is clamped to `[0, 1]`; a NaN threshold is treated as 0.
    pub fn new(threshold: f64, root_margin: impl Into<String>) -> Self {
        let threshold = if threshold.is_nan() {
            0.0
        } else {
            threshold.clamp(0.0, 1.0)
        };
        Self {
            threshold,
            root_margin: root_margin.into(),
            observed: HashSet::new(),
            revealed: HashSet::new(),
        }
    }

    pub fn from_config(config: &ScrollConfig) -> Self {
        Self::new(config.threshold, config.root_margin.clone())
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn root_margin(&self) -> &str {
        &self.root_margin
    }

    /// Start tracking `id`.
    pub fn observe(&mut self, id: ElementId) {
        self.observed.insert(id);
    }

    pub fn is_observed(&self, id: ElementId) -> bool {
        self.observed.contains(&id)
    }

    pub fn is_revealed(&self, id: ElementId) -> bool {
        self.revealed.contains(&id)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    /// Feed one intersection notification. Returns `true` exactly once per
    /// element: on the notification that reveals it. The host should then
    /// mark it visible and may stop observing it.
    pub fn on_intersection(&mut self, id: ElementId, ratio: f64, is_intersecting: bool) -> bool {
        if !self.observed.contains(&id) || self.revealed.contains(&id) {
            return false;
        }
        let crossed = if self.threshold == 0.0 {
            is_intersecting
        } else {
            ratio >= self.threshold
        };
        if crossed {
            self.observed.remove(&id);
            self.revealed.insert(id);
            tracing::trace!(id, ratio, "element revealed");
        }
        crossed
    }
}

/// CSS `animation-delay` for the `index`-th section.
pub fn section_delay_css(index: usize) -> String {
    format!("{}ms", index.saturating_mul(SECTION_STAGGER_MS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_at_exact_threshold_once() {
        let mut t = RevealTracker::new(0.1, "0px");
        t.observe(1);
        assert!(!t.on_intersection(1, 0.05, true));
        assert!(t.on_intersection(1, 0.1, true));
        assert!(!t.on_intersection(1, 0.5, true));
        assert!(!t.on_intersection(1, 0.0, false));
        assert!(t.is_revealed(1));
        assert_eq!(t.revealed_count(), 1);
    }

    #[test]
    fn unobserved_elements_are_ignored() {
        let mut t = RevealTracker::new(0.1, "0px");
        assert!(!t.on_intersection(9, 1.0, true));
        assert!(!t.is_revealed(9));
    }

    #[test]
    fn zero_threshold_uses_intersecting_flag() {
        let mut t = RevealTracker::new(0.0, "0px");
        t.observe(2);
        assert!(!t.on_intersection(2, 0.0, false));
        assert!(t.on_intersection(2, 0.0, true));
    }

    #[test]
    fn threshold_is_clamped() {
        assert_eq!(RevealTracker::new(4.0, "").threshold(), 1.0);
        assert_eq!(RevealTracker::new(-1.0, "").threshold(), 0.0);
        assert_eq!(RevealTracker::new(f64::NAN, "").threshold(), 0.0);
    }

    #[test]
    fn from_config_copies_margin() {
        let t = RevealTracker::from_config(&ScrollConfig::default());
        assert_eq!(t.root_margin(), "0px");
        assert_eq!(t.threshold(), 0.1);
    }

    #[test]
    fn section_delays_step_by_tenth() {
        assert_eq!(section_delay_css(0), "0ms");
        assert_eq!(section_delay_css(3), "300ms");
    }
}
