#![forbid(unsafe_code)]

//! Error types.
//!
//! Only the configuration fetch can fail at runtime, and that failure is
//! always absorbed by falling back to defaults (see
//! [`EffectsConfig::resolve`](crate::config::EffectsConfig::resolve)).
//! [`FxError`] covers construction misuse.

use core::fmt;

/// Why the configuration resource could not be used.
#[derive(Debug)]
pub enum ConfigError {
    /// The request itself failed (network error, CORS, no window).
    Fetch(String),
    /// The server answered with a non-success status.
    Status(u16),
    /// The body was not a valid configuration document.
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(msg) => write!(f, "config fetch failed: {msg}"),
            Self::Status(code) => write!(f, "config fetch returned status {code}"),
            Self::Parse(err) => write!(f, "config parse failed: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Component construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FxError {
    /// A typing effect needs at least one string to cycle through.
    EmptyTextList,
}

impl fmt::Display for FxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTextList => write!(f, "typing effect requires at least one text"),
        }
    }
}

impl std::error::Error for FxError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_mentions_code() {
        assert_eq!(
            ConfigError::Status(404).to_string(),
            "config fetch returned status 404"
        );
    }

    #[test]
    fn parse_error_exposes_source() {
        let err: ConfigError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("config parse failed"));
    }
}
