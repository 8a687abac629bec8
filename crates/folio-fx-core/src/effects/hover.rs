#![forbid(unsafe_code)]

//! Hover transforms for badges and navigation links.

/// Transform pair applied on pointer enter/leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverStyle {
    pub enter: &'static str,
    pub leave: &'static str,
    /// CSS `transition`, set on enter.
    pub transition: &'static str,
}

impl HoverStyle {
    /// Badges spin and grow.
    pub const BADGE: Self = Self {
        enter: "scale(1.3) rotate(360deg)",
        leave: "scale(1) rotate(0deg)",
        transition: "transform 0.5s ease",
    };

    /// Nav links lift slightly.
    pub const NAV_LINK: Self = Self {
        enter: "translateY(-5px) scale(1.1)",
        leave: "translateY(0) scale(1)",
        transition: "all 0.3s ease",
    };
}
