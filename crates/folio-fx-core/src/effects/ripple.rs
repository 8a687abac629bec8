#![forbid(unsafe_code)]

//! Click ripples.
//!
//! A ripple is a transient element centered on the click point, positioned
//! relative to the clicked element and removed after a fixed lifetime. Cards
//! get a ripple as large as their longer side, styled by the `ripple` class.
//! Links get a small inline-styled dot.

use std::time::Duration;

use crate::geometry::{Point, Rect};

/// Class carried by card ripples.
pub const RIPPLE_CLASS: &str = "ripple";

/// Diameter of a link ripple.
pub const LINK_RIPPLE_SIZE: f64 = 20.0;

/// Styles applied to the clicked host so the ripple is clipped to it.
pub const HOST_STYLES: [(&str, &str); 2] = [("position", "relative"), ("overflow", "hidden")];

/// Inline styles of a link ripple.
pub const LINK_RIPPLE_STYLES: [(&str, &str); 5] = [
    ("position", "absolute"),
    ("border-radius", "50%"),
    ("background", "rgba(0, 255, 0, 0.5)"),
    ("pointer-events", "none"),
    ("animation", "ripple 0.6s ease-out"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RippleKind {
    /// Sized to the clicked card, class-styled, 1s lifetime.
    Card,
    /// Fixed 20px dot, inline-styled, 600ms lifetime.
    Link,
}

impl RippleKind {
    pub fn lifetime(self) -> Duration {
        match self {
            Self::Card => Duration::from_millis(1000),
            Self::Link => Duration::from_millis(600),
        }
    }
}

/// Where and how big to draw one ripple, relative to the clicked element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleSpec {
    pub kind: RippleKind,
    /// Width and height.
    pub size: f64,
    pub left: f64,
    pub top: f64,
    pub lifetime: Duration,
}

impl RippleSpec {
    /// Geometry for a click at `client` on an element with bounds `rect`.
    pub fn for_click(rect: Rect, client: Point, kind: RippleKind) -> Self {
        let size = match kind {
            RippleKind::Card => rect.max_side(),
            RippleKind::Link => LINK_RIPPLE_SIZE,
        };
        let local = rect.to_local(client);
        Self {
            kind,
            size,
            left: local.x - size / 2.0,
            top: local.y - size / 2.0,
            lifetime: kind.lifetime(),
        }
    }

    /// Geometry styles (`width`, `height`, `left`, `top`).
    pub fn geometry_styles(&self) -> [(&'static str, String); 4] {
        let size = super::px(self.size);
        [
            ("width", size.clone()),
            ("height", size),
            ("left", super::px(self.left)),
            ("top", super::px(self.top)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_ripple_uses_longer_side_and_centers_on_click() {
        let rect = Rect::new(100.0, 200.0, 300.0, 120.0);
        let spec = RippleSpec::for_click(rect, Point::new(150.0, 260.0), RippleKind::Card);
        assert_eq!(spec.size, 300.0);
        assert_eq!(spec.left, 50.0 - 150.0);
        assert_eq!(spec.top, 60.0 - 150.0);
        assert_eq!(spec.lifetime, Duration::from_secs(1));
    }

    #[test]
    fn link_ripple_is_small_and_short_lived() {
        let rect = Rect::new(0.0, 0.0, 80.0, 20.0);
        let spec = RippleSpec::for_click(rect, Point::new(40.0, 10.0), RippleKind::Link);
        assert_eq!(spec.size, 20.0);
        assert_eq!((spec.left, spec.top), (30.0, 0.0));
        assert_eq!(spec.lifetime, Duration::from_millis(600));
    }

    #[test]
    fn geometry_styles_are_pixel_lengths() {
        let spec = RippleSpec::for_click(
            Rect::new(0.0, 0.0, 40.0, 40.0),
            Point::new(20.0, 20.0),
            RippleKind::Card,
        );
        let styles = spec.geometry_styles();
        assert_eq!(styles[0], ("width", "40px".to_owned()));
        assert_eq!(styles[2], ("left", "0px".to_owned()));
    }
}
