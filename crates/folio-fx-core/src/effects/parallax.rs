#![forbid(unsafe_code)]

//! Scroll parallax.
//!
//! Each tagged element is shifted by `-(scroll * speed)`, where `speed` comes
//! from its `data-speed` attribute.

/// Speed used when `data-speed` is absent or not a number.
pub const DEFAULT_SPEED: f64 = 0.5;

/// Vertical offset for an element at scroll position `scroll_y`.
#[inline]
pub fn parallax_offset(scroll_y: f64, speed: f64) -> f64 {
    -(scroll_y * speed)
}

/// Parse a `data-speed` attribute value.
pub fn parse_speed(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(DEFAULT_SPEED)
}

/// CSS transform for a vertical offset.
pub fn translate_y_css(offset: f64) -> String {
    format!("translateY({offset}px)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_opposes_scroll() {
        assert_eq!(parallax_offset(200.0, 0.5), -100.0);
        assert_eq!(parallax_offset(0.0, 0.5), 0.0);
        assert_eq!(parallax_offset(100.0, -0.2), 20.0);
    }

    #[test]
    fn speed_defaults_when_missing_or_bad() {
        assert_eq!(parse_speed(None), 0.5);
        assert_eq!(parse_speed(Some("fast")), 0.5);
        assert_eq!(parse_speed(Some("NaN")), 0.5);
        assert_eq!(parse_speed(Some(" 0.8 ")), 0.8);
    }

    #[test]
    fn transform_css() {
        assert_eq!(translate_y_css(-100.0), "translateY(-100px)");
    }
}
