#![forbid(unsafe_code)]

//! Element selectors the page is expected to provide. Any of them may be
//! absent; the matching effect simply does not activate.

pub const PARTICLES_CANVAS_ID: &str = "particles-canvas";
pub const SUBTITLE: &str = ".subtitle";
pub const CARD: &str = ".card";
pub const BADGE: &str = ".badge";
pub const NAV_LINK: &str = "nav a";
pub const FADE_IN: &str = ".fade-in";
pub const PARALLAX: &str = ".parallax";
pub const HEADER_TITLE: &str = "header h1";
pub const SECTION: &str = "section";
pub const SECTION_HEADING: &str = "section h2";
pub const LINK: &str = "a";
