#![forbid(unsafe_code)]

//! Effect configuration.
//!
//! The page may ship an `animations.json` document with any subset of the
//! top-level keys `particles`, `typing`, `scroll`, `glitch`, `pulse`. The
//! document is taken as-is: each field that is missing, `null` or unusable
//! falls back to its own default while every other value is kept. Integer
//! fields accept any non-negative JSON number. Only a body that is not JSON
//! at all counts as "configuration unavailable", in which case the whole
//! [`EffectsConfig::default`] is used.
//!
//! # Invariants
//!
//! 1. `EffectsConfig::resolve(Err(_)) == EffectsConfig::default()`.
//! 2. One bad value never discards another section or field.
//! 3. The resolved value is never mutated; components receive it by reference
//!    or clone the section they need.

use std::time::Duration;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ConfigError;

/// Default location of the configuration resource, relative to the page.
pub const DEFAULT_CONFIG_URL: &str = "animations.json";

/// Palette used when the configuration supplies none.
pub const DEFAULT_PALETTE: [&str; 4] = ["#8B0000", "#0066ff", "#00ff00", "#ff6b6b"];

/// Full configuration for every effect category.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub particles: ParticlesConfig,
    pub typing: TypingConfig,
    pub scroll: ScrollConfig,
    pub glitch: GlitchConfig,
    pub pulse: PulseConfig,
}

impl EffectsConfig {
    /// Parse a configuration document, defaulting bad values one by one.
    ///
    /// Fails only when `body` is not JSON. A body that is JSON but not an
    /// object carries no settings and yields the defaults.
    pub fn from_json_str(body: &str) -> Result<Self, ConfigError> {
        let doc: Value = serde_json::from_str(body)?;
        Ok(Self {
            particles: lenient_section(&doc, "particles"),
            typing: lenient_section(&doc, "typing"),
            scroll: lenient_section(&doc, "scroll"),
            glitch: lenient_section(&doc, "glitch"),
            pulse: lenient_section(&doc, "pulse"),
        })
    }

    /// Collapse the outcome of a fetch into a usable configuration.
    ///
    /// Any failure (fetch, status, parse) yields the defaults. Nothing is
    /// retried and nothing is surfaced beyond a log line.
    pub fn resolve(fetched: Result<String, ConfigError>) -> Self {
        match fetched.and_then(|body| Self::from_json_str(&body)) {
            Ok(config) => {
                tracing::debug!(
                    particles = config.particles.count,
                    "loaded animation config"
                );
                config
            }
            Err(err) => {
                tracing::info!(error = %err, "using default animation config");
                Self::default()
            }
        }
    }
}

/// Build `T` from section `name` of `doc`, keeping each field that
/// deserializes and defaulting the rest. A missing, `null` or non-object
/// section is all defaults.
fn lenient_section<T>(doc: &Value, name: &'static str) -> T
where
    T: Default + Serialize + DeserializeOwned,
{
    let Some(Value::Object(given)) = doc.get(name) else {
        if doc.get(name).is_some_and(|raw| !raw.is_null()) {
            tracing::debug!(section = name, "ignoring non-object config section");
        }
        return T::default();
    };
    let Ok(Value::Object(mut accepted)) = serde_json::to_value(T::default()) else {
        return T::default();
    };
    for (key, value) in given {
        let Some(previous) = accepted.get(key).cloned() else {
            continue;
        };
        accepted.insert(key.clone(), value.clone());
        if serde_json::from_value::<T>(Value::Object(accepted.clone())).is_err() {
            tracing::debug!(section = name, field = %key, "ignoring invalid config value");
            accepted.insert(key.clone(), previous);
        }
    }
    serde_json::from_value(Value::Object(accepted)).unwrap_or_default()
}

/// Accept any finite, non-negative JSON number for an integer field.
///
/// Fractions round up, so a count of `20.5` behaves like a `i < 20.5` loop.
fn whole_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value < 0.0 {
        return Err(D::Error::custom(format!(
            "expected a non-negative number, got {value}"
        )));
    }
    T::try_from(value.ceil() as u64).map_err(|_| D::Error::custom("number out of range"))
}

/// Particle field tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticlesConfig {
    /// Number of particles generated at initialization.
    #[serde(deserialize_with = "whole_number")]
    pub count: usize,
    /// Velocity spread; each component is drawn from `(-speed/2, speed/2)`.
    pub speed: f64,
    /// Radius spread; radius is drawn from `[1, size + 1)`.
    pub size: f64,
    /// CSS colors, one picked uniformly per particle.
    pub colors: Vec<String>,
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        Self {
            count: 50,
            speed: 2.0,
            size: 3.0,
            colors: DEFAULT_PALETTE.iter().map(|c| (*c).to_owned()).collect(),
        }
    }
}

impl ParticlesConfig {
    /// The configured palette, or [`DEFAULT_PALETTE`] when it is empty.
    pub fn palette(&self) -> Vec<String> {
        if self.colors.is_empty() {
            DEFAULT_PALETTE.iter().map(|c| (*c).to_owned()).collect()
        } else {
            self.colors.clone()
        }
    }
}

/// Typing effect timing, all in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypingConfig {
    /// Delay before each revealed character.
    #[serde(deserialize_with = "whole_number")]
    pub speed: u64,
    /// Delay before each deleted character.
    #[serde(deserialize_with = "whole_number")]
    pub delete_speed: u64,
    /// Pause at full text and at empty text.
    #[serde(deserialize_with = "whole_number")]
    pub pause_time: u64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            speed: 100,
            delete_speed: 50,
            pause_time: 2000,
        }
    }
}

impl TypingConfig {
    pub fn type_delay(&self) -> Duration {
        Duration::from_millis(self.speed)
    }

    pub fn delete_delay(&self) -> Duration {
        Duration::from_millis(self.delete_speed)
    }

    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_time)
    }
}

/// Scroll reveal observation options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollConfig {
    /// Visible fraction needed before an element is revealed.
    pub threshold: f64,
    /// CSS margin applied to the observation root.
    pub root_margin: String,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px".to_owned(),
        }
    }
}

/// Glitch pulse timing in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlitchConfig {
    /// How long each glitch stays on.
    #[serde(deserialize_with = "whole_number")]
    pub duration: u64,
    /// Period between glitch starts.
    #[serde(deserialize_with = "whole_number")]
    pub interval: u64,
}

impl Default for GlitchConfig {
    fn default() -> Self {
        Self {
            duration: 200,
            interval: 3000,
        }
    }
}

/// Pulse animation parameters, published to stylesheets as CSS variables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// Cycle length in seconds.
    pub duration: f64,
    /// Peak scale factor.
    pub scale: f64,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            duration: 2.0,
            scale: 1.1,
        }
    }
}

impl PulseConfig {
    /// Custom properties to set on the document root.
    pub fn css_variables(&self) -> [(&'static str, String); 2] {
        [
            ("--pulse-duration", format!("{}s", self.duration)),
            ("--pulse-scale", format!("{}", self.scale)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = EffectsConfig::default();
        assert_eq!(cfg.particles.count, 50);
        assert_eq!(cfg.particles.speed, 2.0);
        assert_eq!(cfg.particles.size, 3.0);
        assert_eq!(
            cfg.particles.colors,
            vec!["#8B0000", "#0066ff", "#00ff00", "#ff6b6b"]
        );
        assert_eq!(
            cfg.typing,
            TypingConfig {
                speed: 100,
                delete_speed: 50,
                pause_time: 2000
            }
        );
        assert_eq!(cfg.scroll.threshold, 0.1);
        assert_eq!(cfg.scroll.root_margin, "0px");
        assert_eq!(
            cfg.glitch,
            GlitchConfig {
                duration: 200,
                interval: 3000
            }
        );
        assert_eq!(cfg.pulse.duration, 2.0);
        assert_eq!(cfg.pulse.scale, 1.1);
    }

    #[test]
    fn fetch_failure_resolves_to_defaults() {
        let cfg = EffectsConfig::resolve(Err(ConfigError::Fetch("offline".into())));
        assert_eq!(cfg, EffectsConfig::default());
    }

    #[traced_test]
    #[test]
    fn fallback_is_logged() {
        let cfg = EffectsConfig::resolve(Err(ConfigError::Status(500)));
        assert_eq!(cfg, EffectsConfig::default());
        assert!(logs_contain("using default animation config"));
        assert!(logs_contain("status 500"));
    }

    #[test]
    fn malformed_body_resolves_to_defaults() {
        let cfg = EffectsConfig::resolve(Ok("{ not json".into()));
        assert_eq!(cfg, EffectsConfig::default());
    }

    #[test]
    fn wrong_field_type_defaults_only_that_field() {
        let body = r#"{"particles":{"count":"many","speed":4}}"#;
        let cfg = EffectsConfig::resolve(Ok(body.into()));
        assert_eq!(cfg.particles.count, 50);
        assert_eq!(cfg.particles.speed, 4.0);
    }

    #[test]
    fn fractional_timing_keeps_the_rest_of_the_document() {
        let body = r#"{"particles":{"count":20},"typing":{"speed":100.5,"pauseTime":900}}"#;
        let cfg = EffectsConfig::resolve(Ok(body.into()));
        assert_eq!(cfg.particles.count, 20);
        assert_eq!(cfg.typing.speed, 101);
        assert_eq!(cfg.typing.pause_time, 900);
    }

    #[test]
    fn null_section_defaults_only_that_section() {
        let body = r#"{"particles":{"count":20},"pulse":null}"#;
        let cfg = EffectsConfig::resolve(Ok(body.into()));
        assert_eq!(cfg.particles.count, 20);
        assert_eq!(cfg.pulse, PulseConfig::default());
    }

    #[test]
    fn null_and_negative_fields_default_individually() {
        let body = r#"{"glitch":{"duration":null,"interval":5000},"typing":{"speed":-3}}"#;
        let cfg = EffectsConfig::from_json_str(body).unwrap();
        assert_eq!(
            cfg.glitch,
            GlitchConfig {
                duration: 200,
                interval: 5000
            }
        );
        assert_eq!(cfg.typing, TypingConfig::default());
    }

    #[test]
    fn non_object_document_yields_defaults() {
        let cfg = EffectsConfig::from_json_str("[1, 2, 3]").unwrap();
        assert_eq!(cfg, EffectsConfig::default());
    }

    #[test]
    fn partial_document_defaults_field_by_field() {
        let body = r#"{"particles":{"count":12},"typing":{"deleteSpeed":7}}"#;
        let cfg = EffectsConfig::from_json_str(body).unwrap();
        assert_eq!(cfg.particles.count, 12);
        assert_eq!(cfg.particles.speed, 2.0);
        assert_eq!(cfg.typing.delete_speed, 7);
        assert_eq!(cfg.typing.speed, 100);
        assert_eq!(cfg.glitch, GlitchConfig::default());
    }

    #[test]
    fn camel_case_keys_round_through_serde() {
        let json = serde_json::to_value(EffectsConfig::default()).unwrap();
        assert_eq!(json["typing"]["pauseTime"], 2000);
        assert_eq!(json["scroll"]["rootMargin"], "0px");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let cfg = EffectsConfig::from_json_str(r#"{"sparkles":{"on":true}}"#).unwrap();
        assert_eq!(cfg, EffectsConfig::default());
    }

    #[test]
    fn empty_palette_falls_back() {
        let cfg = ParticlesConfig {
            colors: Vec::new(),
            ..ParticlesConfig::default()
        };
        assert_eq!(cfg.palette().len(), DEFAULT_PALETTE.len());
    }

    #[test]
    fn pulse_variables_use_seconds() {
        let vars = PulseConfig::default().css_variables();
        assert_eq!(vars[0], ("--pulse-duration", "2s".to_owned()));
        assert_eq!(vars[1], ("--pulse-scale", "1.1".to_owned()));
    }
}
