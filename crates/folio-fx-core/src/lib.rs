#![forbid(unsafe_code)]

//! `folio-fx-core` holds the effect logic behind the folio-fx page decorations.
//!
//! Nothing in this crate touches a browser. The host (see `folio-fx-web`)
//! injects a [`surface::RenderSurface`] and a [`surface::Viewport`], feeds
//! pointer/scroll/intersection events in, and drives timed effects through the
//! [`schedule::TimedEffect`] contract. That keeps every effect deterministic
//! and testable natively.
//!
//! Design goals:
//! - **Explicit configuration**: one immutable [`config::EffectsConfig`] is
//!   resolved at startup and handed to each component.
//! - **Host-driven time**: timer chains are finite state machines that report
//!   their next delay instead of scheduling themselves.
//! - **Stoppable loops**: per-frame components expose start/stop control.

pub mod config;
pub mod effects;
pub mod error;
pub mod geometry;
pub mod particles;
pub mod reveal;
pub mod schedule;
pub mod selectors;
pub mod surface;
pub mod typing;

pub use config::EffectsConfig;
pub use error::{ConfigError, FxError};
pub use geometry::{Point, Rect, Size, Vec2};
pub use particles::{Particle, ParticleField, ResizePolicy};
pub use reveal::RevealTracker;
pub use schedule::{TimedEffect, Timeline};
pub use surface::{RecordingSurface, RenderSurface, Viewport};
pub use typing::{TypingEffect, TypingPhase};
