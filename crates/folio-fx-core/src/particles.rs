#![forbid(unsafe_code)]

//! Background particle field.
//!
//! A fixed batch of particles drifts across the viewport, bouncing off its
//! edges; pairs closer than [`LINK_DISTANCE`] are joined by a faint line.
//!
//! # Frame algorithm
//!
//! 1. Integrate every particle by its velocity.
//! 2. Reflect: a coordinate below zero forces its velocity component
//!    positive, one past the far edge forces it negative.
//! 3. Clear the surface, draw every particle as a filled circle.
//! 4. For every unordered pair at distance `d < LINK_DISTANCE`, stroke a line
//!    with alpha `min(LINK_MAX_ALPHA, (LINK_DISTANCE - d) / LINK_DISTANCE * LINK_MAX_ALPHA)`.
//!
//! Step 4 is quadratic in the particle count; the field holds tens of
//! particles, not thousands.
//!
//! # Invariants
//!
//! 1. The field holds exactly `config.count` particles after construction and
//!    after every [`ParticleField::reinitialize`].
//! 2. A particle outside the bounds always has its offending velocity
//!    component pointing back inside after a step, so it re-enters.
//! 3. A stopped field neither moves nor draws.

use fastrand::Rng;

use crate::config::ParticlesConfig;
use crate::geometry::{Point, Size, Vec2};
use crate::surface::{RenderSurface, Viewport};

/// Pairs closer than this are linked.
pub const LINK_DISTANCE: f64 = 150.0;

/// Alpha of a link between coincident particles.
pub const LINK_MAX_ALPHA: f64 = 0.3;

/// Stroke width of links.
pub const LINK_WIDTH: f64 = 1.0;

/// Smallest particle radius; the configured size is added on top.
const MIN_RADIUS: f64 = 1.0;

/// What happens to particle positions when the bounds change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizePolicy {
    /// Leave positions alone; particles outside the new bounds drift back in
    /// through the reflection rule.
    #[default]
    Preserve,
    /// Clamp every position into the new bounds immediately.
    Clamp,
}

/// One moving point.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Point,
    pub velocity: Vec2,
    pub radius: f64,
    pub color: String,
    pub opacity: f64,
}

impl Particle {
    /// Move by one frame of velocity, then reflect off `bounds`.
    fn advance(&mut self, bounds: Size) {
        self.position += self.velocity;
        if self.position.x < 0.0 {
            self.velocity.x = self.velocity.x.abs();
        } else if self.position.x > bounds.width {
            self.velocity.x = -self.velocity.x.abs();
        }
        if self.position.y < 0.0 {
            self.velocity.y = self.velocity.y.abs();
        } else if self.position.y > bounds.height {
            self.velocity.y = -self.velocity.y.abs();
        }
    }
}

/// Alpha for a link between two particles `distance` apart, or `None` when
/// they are too far apart to be linked.
#[inline]
pub fn link_alpha(distance: f64) -> Option<f64> {
    (distance < LINK_DISTANCE)
        .then(|| ((LINK_DISTANCE - distance) / LINK_DISTANCE * LINK_MAX_ALPHA).min(LINK_MAX_ALPHA))
}

/// The particle collection plus its update/render loop state.
#[derive(Debug, Clone)]
pub struct ParticleField {
    config: ParticlesConfig,
    palette: Vec<String>,
    particles: Vec<Particle>,
    bounds: Size,
    rng: Rng,
    resize_policy: ResizePolicy,
    running: bool,
    frame_idx: u64,
}

impl ParticleField {
    /// Create a running field filling `bounds` with `config.count` particles.
    pub fn new(config: ParticlesConfig, bounds: Size, seed: u64) -> Self {
        let palette = config.palette();
        let mut field = Self {
            config,
            palette,
            particles: Vec::new(),
            bounds,
            rng: Rng::with_seed(seed),
            resize_policy: ResizePolicy::default(),
            running: true,
            frame_idx: 0,
        };
        field.reinitialize();
        tracing::debug!(
            count = field.particles.len(),
            width = bounds.width,
            height = bounds.height,
            "particle field created"
        );
        field
    }

    /// Size the surface to the viewport and build a field covering it.
    pub fn attach(
        config: ParticlesConfig,
        surface: &mut impl RenderSurface,
        viewport: &impl Viewport,
        seed: u64,
    ) -> Self {
        let bounds = viewport.size();
        surface.set_size(bounds);
        Self::new(config, bounds, seed)
    }

    /// Builder: choose the resize behavior.
    #[must_use]
    pub fn with_resize_policy(mut self, policy: ResizePolicy) -> Self {
        self.resize_policy = policy;
        self
    }

    /// Builder: reseed and regenerate the particles.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Rng::with_seed(seed);
        self.reinitialize();
        self
    }

    /// Discard all particles and generate a fresh batch.
    pub fn reinitialize(&mut self) {
        let count = self.config.count;
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(self.spawn());
        }
        self.particles = particles;
    }

    fn spawn(&mut self) -> Particle {
        let speed = self.config.speed;
        let color = self.palette[self.rng.usize(..self.palette.len())].clone();
        Particle {
            position: Point::new(
                self.rng.f64() * self.bounds.width,
                self.rng.f64() * self.bounds.height,
            ),
            velocity: Vec2::new(
                (self.rng.f64() - 0.5) * speed,
                (self.rng.f64() - 0.5) * speed,
            ),
            radius: self.rng.f64() * self.config.size + MIN_RADIUS,
            color,
            opacity: self.rng.f64(),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access, for hosts that seed known positions.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn resize_policy(&self) -> ResizePolicy {
        self.resize_policy
    }

    /// Number of frames run since creation.
    pub fn frame_idx(&self) -> u64 {
        self.frame_idx
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Adopt new bounds and resize the surface to match.
    pub fn resize(&mut self, size: Size, surface: &mut impl RenderSurface) {
        self.bounds = size;
        surface.set_size(size);
        if self.resize_policy == ResizePolicy::Clamp {
            for p in &mut self.particles {
                p.position = size.clamp(p.position);
            }
        }
        tracing::debug!(
            width = size.width,
            height = size.height,
            policy = ?self.resize_policy,
            "particle field resized"
        );
    }

    /// Integrate and reflect every particle once.
    pub fn step(&mut self) {
        let bounds = self.bounds;
        for p in &mut self.particles {
            p.advance(bounds);
        }
    }

    /// Draw the current state. Returns the number of links drawn.
    pub fn render(&self, surface: &mut impl RenderSurface) -> usize {
        surface.clear();
        for p in &self.particles {
            surface.fill_circle(p.position, p.radius, &p.color, p.opacity);
        }

        let mut links = 0;
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                if let Some(alpha) = link_alpha(a.position.distance(b.position)) {
                    surface.stroke_line(a.position, b.position, &a.color, alpha, LINK_WIDTH);
                    links += 1;
                }
            }
        }
        links
    }

    /// One animation frame: step then render. Returns `false` (and does
    /// nothing) when the field is stopped.
    pub fn frame(&mut self, surface: &mut impl RenderSurface) -> bool {
        if !self.running {
            return false;
        }
        self.step();
        let links = self.render(surface);
        self.frame_idx += 1;
        tracing::trace!(frame = self.frame_idx, links, "particle frame");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, FixedViewport, RecordingSurface};

    fn field(count: usize) -> ParticleField {
        let config = ParticlesConfig {
            count,
            ..ParticlesConfig::default()
        };
        ParticleField::new(config, Size::new(800.0, 600.0), 7)
    }

    fn place(field: &mut ParticleField, points: &[(f64, f64)]) {
        for (p, &(x, y)) in field.particles_mut().iter_mut().zip(points) {
            p.position = Point::new(x, y);
            p.velocity = Vec2::ZERO;
        }
    }

    #[test]
    fn creates_configured_count() {
        assert_eq!(field(50).particles().len(), 50);
        assert_eq!(field(0).particles().len(), 0);
    }

    #[test]
    fn spawned_particles_respect_ranges() {
        let f = field(200);
        for p in f.particles() {
            assert!(f.bounds().contains(p.position));
            assert!(p.velocity.x.abs() <= 1.0 && p.velocity.y.abs() <= 1.0);
            assert!((1.0..4.0).contains(&p.radius));
            assert!((0.0..1.0).contains(&p.opacity));
            assert!(DEFAULT_COLORS.contains(&p.color.as_str()));
        }
    }

    const DEFAULT_COLORS: [&str; 4] = crate::config::DEFAULT_PALETTE;

    #[test]
    fn same_seed_same_field() {
        assert_eq!(field(10).particles(), field(10).particles());
    }

    #[test]
    fn reflects_off_right_edge() {
        let mut f = field(1);
        let p = &mut f.particles_mut()[0];
        p.position = Point::new(799.5, 10.0);
        p.velocity = Vec2::new(1.0, 0.0);
        f.step();
        assert_eq!(f.particles()[0].velocity.x, -1.0);
        f.step();
        assert!(f.particles()[0].position.x <= 800.0);
    }

    #[test]
    fn reflects_off_top_edge() {
        let mut f = field(1);
        let p = &mut f.particles_mut()[0];
        p.position = Point::new(10.0, 0.5);
        p.velocity = Vec2::new(0.0, -1.0);
        f.step();
        assert_eq!(f.particles()[0].velocity.y, 1.0);
    }

    #[test]
    fn shrink_does_not_trap_particles() {
        let mut f = field(1);
        let mut surface = RecordingSurface::new(f.bounds());
        {
            let p = &mut f.particles_mut()[0];
            p.position = Point::new(700.0, 100.0);
            p.velocity = Vec2::new(1.0, 0.0);
        }
        f.resize(Size::new(400.0, 600.0), &mut surface);
        for _ in 0..400 {
            f.step();
        }
        assert!(f.particles()[0].position.x <= 400.0);
    }

    #[test]
    fn clamp_policy_pulls_particles_in_on_resize() {
        let mut f = field(20).with_resize_policy(ResizePolicy::Clamp);
        let mut surface = RecordingSurface::new(f.bounds());
        f.resize(Size::new(100.0, 50.0), &mut surface);
        assert_eq!(surface.size(), Size::new(100.0, 50.0));
        assert!(f.particles().iter().all(|p| f.bounds().contains(p.position)));
    }

    #[test]
    fn link_alpha_profile() {
        assert_eq!(link_alpha(0.0), Some(0.3));
        assert_eq!(link_alpha(150.0), None);
        assert_eq!(link_alpha(200.0), None);
        let a = link_alpha(75.0).unwrap();
        assert!((a - 0.15).abs() < 1e-12);
    }

    #[test]
    fn render_links_only_close_pairs() {
        let mut f = field(3);
        place(&mut f, &[(0.0, 0.0), (100.0, 0.0), (400.0, 400.0)]);
        let mut surface = RecordingSurface::new(f.bounds());
        let links = f.render(&mut surface);
        assert_eq!(links, 1);
        assert_eq!(surface.ops()[0], DrawOp::Clear);
        assert_eq!(surface.circles().count(), 3);
        match surface.lines().next() {
            Some(DrawOp::Line {
                from,
                to,
                alpha,
                width,
                color,
            }) => {
                assert_eq!(*from, Point::new(0.0, 0.0));
                assert_eq!(*to, Point::new(100.0, 0.0));
                assert!((alpha - 0.1).abs() < 1e-12);
                assert_eq!(*width, 1.0);
                assert_eq!(color, &f.particles()[0].color);
            }
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    fn stopped_field_is_inert() {
        let mut f = field(5);
        let mut surface = RecordingSurface::new(f.bounds());
        let before = f.particles().to_vec();
        f.stop();
        assert!(!f.frame(&mut surface));
        assert_eq!(f.particles(), &before[..]);
        assert!(surface.ops().is_empty());
        f.start();
        assert!(f.frame(&mut surface));
        assert_eq!(f.frame_idx(), 1);
    }

    #[test]
    fn attach_sizes_surface_to_viewport() {
        let viewport = FixedViewport {
            size: Size::new(1280.0, 720.0),
            scroll_y: 0.0,
        };
        let mut surface = RecordingSurface::default();
        let f = ParticleField::attach(ParticlesConfig::default(), &mut surface, &viewport, 1);
        assert_eq!(surface.size(), viewport.size);
        assert_eq!(f.bounds(), viewport.size);
        assert_eq!(f.particles().len(), 50);
    }

    #[test]
    fn reinitialize_keeps_count() {
        let mut f = field(9).with_seed(99);
        f.reinitialize();
        assert_eq!(f.particles().len(), 9);
    }
}
