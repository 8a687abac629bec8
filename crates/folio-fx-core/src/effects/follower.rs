#![forbid(unsafe_code)]

//! Cursor-trailing marker.
//!
//! Every frame the marker closes a fixed fraction of the gap to the live
//! cursor position: `pos += (target - pos) * SMOOTHING`.

use crate::geometry::Point;

/// Fraction of the remaining gap closed per frame.
pub const SMOOTHING: f64 = 0.1;

/// Class of the floating marker element.
pub const FOLLOWER_CLASS: &str = "mouse-follower";

#[derive(Debug, Clone)]
pub struct MouseFollower {
    position: Point,
    target: Point,
    smoothing: f64,
    running: bool,
}

impl Default for MouseFollower {
    fn default() -> Self {
        Self::new()
    }
}

impl MouseFollower {
    /// Marker and cursor both start at the origin.
    pub fn new() -> Self {
        Self {
            position: Point::ORIGIN,
            target: Point::ORIGIN,
            smoothing: SMOOTHING,
            running: true,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn target(&self) -> Point {
        self.target
    }

    /// Record the latest cursor position.
    pub fn set_target(&mut self, target: Point) {
        self.target = target;
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

    /// Ease one frame toward the cursor. Returns the new position, or `None`
    /// when stopped.
    pub fn step(&mut self) -> Option<Point> {
        if !self.running {
            return None;
        }
        self.position += (self.target - self.position) * self.smoothing;
        Some(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closes_ten_percent_per_frame() {
        let mut f = MouseFollower::new();
        f.set_target(Point::new(100.0, 50.0));
        let p = f.step().unwrap();
        assert!((p.x - 10.0).abs() < 1e-12);
        assert!((p.y - 5.0).abs() < 1e-12);
        let p = f.step().unwrap();
        assert!((p.x - 19.0).abs() < 1e-12);
    }

    #[test]
    fn converges_on_target() {
        let mut f = MouseFollower::new();
        f.set_target(Point::new(300.0, -40.0));
        for _ in 0..300 {
            f.step();
        }
        assert!(f.position().distance(f.target()) < 1e-6);
    }

    #[test]
    fn stopped_follower_holds_position() {
        let mut f = MouseFollower::new();
        f.set_target(Point::new(10.0, 10.0));
        f.stop();
        assert_eq!(f.step(), None);
        assert_eq!(f.position(), Point::ORIGIN);
    }
}
