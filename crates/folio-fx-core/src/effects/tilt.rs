#![forbid(unsafe_code)]

//! 3D tilt for card elements.
//!
//! Rotation is proportional to the pointer's offset from the card center:
//! `rotateX = (y - cy) / 10`, `rotateY = (cx - x) / 10`, in degrees.

use crate::geometry::{Point, Rect};

/// Pixels of pointer offset per degree of rotation.
pub const TILT_DIVISOR: f64 = 10.0;

/// Transform applied when the pointer leaves the card.
pub const NEUTRAL_TRANSFORM: &str = "perspective(1000px) rotateX(0) rotateY(0) scale3d(1, 1, 1)";

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tilt {
    /// Degrees about the horizontal axis.
    pub rotate_x: f64,
    /// Degrees about the vertical axis.
    pub rotate_y: f64,
}

impl Tilt {
    /// Tilt for a pointer at `client` over a card with bounds `rect`.
    pub fn from_pointer(rect: Rect, client: Point) -> Self {
        let local = rect.to_local(client);
        let center = rect.local_center();
        Self {
            rotate_x: (local.y - center.y) / TILT_DIVISOR,
            rotate_y: (center.x - local.x) / TILT_DIVISOR,
        }
    }

    /// CSS transform for the hovered card.
    pub fn to_css(&self) -> String {
        format!(
            "perspective(1000px) rotateX({}deg) rotateY({}deg) scale3d(1.05, 1.05, 1.05)",
            self.rotate_x, self.rotate_y
        )
    }
}
