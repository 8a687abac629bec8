#![forbid(unsafe_code)]

//! Timer-chain scheduling.
//!
//! Self-rescheduling callbacks (typing, glitch, counter) are modelled as
//! finite state machines implementing [`TimedEffect`]: the effect reports how
//! long until its next transition, and the host calls [`TimedEffect::fire`]
//! when that delay has elapsed. The web host maps this onto `setTimeout`;
//! [`Timeline`] maps it onto a deterministic, host-advanced clock.
//!
//! # Invariants
//!
//! 1. Transitions fire in order, each exactly `pending_delay()` after the
//!    previous one (measured on the driving clock).
//! 2. Once `pending_delay()` returns `None` the effect is finished and is
//!    never fired again.
//! 3. [`Timeline`] stretches zero delays to [`MIN_STEP`] so a degenerate
//!    chain cannot spin inside a single `advance`.

use std::time::Duration;

/// Smallest gap [`Timeline`] leaves between two transitions.
pub const MIN_STEP: Duration = Duration::from_millis(1);

/// A state machine advanced by delayed transitions.
pub trait TimedEffect {
    /// What a transition produces for the host to apply.
    type Output;

    /// Delay until the next transition, or `None` when finished.
    fn pending_delay(&self) -> Option<Duration>;

    /// Perform the next transition.
    fn fire(&mut self) -> Self::Output;
}

/// Deterministic driver for a [`TimedEffect`].
///
/// Time only moves when [`advance`](Self::advance) is called, so a whole
/// timer chain can be replayed in a test without sleeping.
#[derive(Debug, Clone)]
pub struct Timeline<E> {
    effect: E,
    now: Duration,
    next_at: Option<Duration>,
}

impl<E: TimedEffect> Timeline<E> {
    /// Start driving `effect` at time zero.
    pub fn new(effect: E) -> Self {
        let next_at = effect.pending_delay().map(|d| d.max(MIN_STEP));
        Self {
            effect,
            now: Duration::ZERO,
            next_at,
        }
    }

    /// Current clock value.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn effect(&self) -> &E {
        &self.effect
    }

    /// Absolute time of the next transition, if any.
    pub fn next_at(&self) -> Option<Duration> {
        self.next_at
    }

    /// Advance the clock by `dt`, firing every transition that falls due.
    ///
    /// Outputs are returned with the absolute time they fired at.
    pub fn advance(&mut self, dt: Duration) -> Vec<(Duration, E::Output)> {
        self.advance_to(self.now.saturating_add(dt))
    }

    /// Advance the clock to `target` (no-op if `target` is in the past).
    pub fn advance_to(&mut self, target: Duration) -> Vec<(Duration, E::Output)> {
        let mut fired = Vec::new();
        while let Some(at) = self.next_at {
            if at > target {
                break;
            }
            self.now = at;
            fired.push((at, self.effect.fire()));
            self.next_at = self
                .effect
                .pending_delay()
                .map(|delay| at.saturating_add(delay.max(MIN_STEP)));
        }
        if target > self.now {
            self.now = target;
        }
        fired
    }

    pub fn into_inner(self) -> E {
        self.effect
    }
}
