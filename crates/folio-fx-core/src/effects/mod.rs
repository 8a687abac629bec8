#![forbid(unsafe_code)]

//! Independent micro-effects.
//!
//! Each effect is a small, self-contained piece of math or a timed state
//! machine. None of them share state with another; the host attaches each
//! one to its elements through event listeners or timers.

pub mod char_reveal;
pub mod counter;
pub mod follower;
pub mod glitch;
pub mod hover;
pub mod parallax;
pub mod ripple;
pub mod tilt;

pub use char_reveal::{CharSlot, reveal_slots};
pub use counter::CounterTween;
pub use follower::MouseFollower;
pub use glitch::{GlitchEdge, GlitchPulse};
pub use hover::HoverStyle;
pub use parallax::{parallax_offset, parse_speed};
pub use ripple::{RippleKind, RippleSpec};
pub use tilt::Tilt;

/// Format a CSS pixel length.
#[inline]
pub fn px(value: f64) -> String {
    format!("{value}px")
}

#[cfg(test)]
mod tests {
    #[test]
    fn px_formats_plainly() {
        assert_eq!(super::px(12.0), "12px");
        assert_eq!(super::px(-2.5), "-2.5px");
    }
}
