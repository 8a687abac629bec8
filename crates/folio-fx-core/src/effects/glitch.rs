#![forbid(unsafe_code)]

//! Periodic glitch pulse.
//!
//! Switches on at `interval`, `2 * interval`, ... and switches off `duration`
//! after each start. The duration is clamped to the interval so pulses never
//! overlap.

use std::time::Duration;

use crate::config::GlitchConfig;
use crate::schedule::TimedEffect;

/// Class toggled on the glitching element.
pub const GLITCH_CLASS: &str = "glitch-effect";

/// Attribute that mirrors the element text for the CSS pseudo-element layers.
pub const GLITCH_TEXT_ATTR: &str = "data-text";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlitchEdge {
    On,
    Off,
}

#[derive(Debug, Clone)]
pub struct GlitchPulse {
    interval: Duration,
    duration: Duration,
    active: bool,
    started: bool,
}

impl GlitchPulse {
    pub fn new(config: GlitchConfig) -> Self {
        let interval = Duration::from_millis(config.interval);
        Self {
            interval,
            duration: Duration::from_millis(config.duration).min(interval),
            active: false,
            started: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl TimedEffect for GlitchPulse {
    type Output = GlitchEdge;

    fn pending_delay(&self) -> Option<Duration> {
        Some(if self.active {
            self.duration
        } else if self.started {
            self.interval - self.duration
        } else {
            self.interval
        })
    }

    fn fire(&mut self) -> GlitchEdge {
        self.started = true;
        self.active = !self.active;
        if self.active {
            GlitchEdge::On
        } else {
            GlitchEdge::Off
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Timeline;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn pulses_on_interval_grid() {
        let mut tl = Timeline::new(GlitchPulse::new(GlitchConfig::default()));
        let fired = tl.advance(ms(6500));
        assert_eq!(
            fired,
            vec![
                (ms(3000), GlitchEdge::On),
                (ms(3200), GlitchEdge::Off),
                (ms(6000), GlitchEdge::On),
                (ms(6200), GlitchEdge::Off),
            ]
        );
    }

    #[test]
    fn duration_never_exceeds_interval() {
        let g = GlitchPulse::new(GlitchConfig {
            duration: 5000,
            interval: 1000,
        });
        assert_eq!(g.duration(), g.interval());
    }

    #[test]
    fn toggles_active_state() {
        let mut g = GlitchPulse::new(GlitchConfig::default());
        assert!(!g.is_active());
        assert_eq!(g.fire(), GlitchEdge::On);
        assert!(g.is_active());
        assert_eq!(g.pending_delay(), Some(ms(200)));
        assert_eq!(g.fire(), GlitchEdge::Off);
        assert_eq!(g.pending_delay(), Some(ms(2800)));
    }
}
