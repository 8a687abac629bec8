#![forbid(unsafe_code)]

//! Host capabilities injected into the effects.
//!
//! [`RenderSurface`] is the minimal 2D drawing contract the particle field
//! needs; [`Viewport`] exposes window size and scroll position. The web host
//! implements both over `CanvasRenderingContext2d` and `Window`.
//! [`RecordingSurface`] captures draw calls so effect output can be asserted
//! without a display.

use crate::geometry::{Point, Size};

/// 2D drawing target.
pub trait RenderSurface {
    /// Current backing-store size.
    fn size(&self) -> Size;

    /// Resize the backing store (clears it, as canvases do).
    fn set_size(&mut self, size: Size);

    /// Clear the whole surface.
    fn clear(&mut self);

    /// Fill a circle of `radius` at `center`.
    fn fill_circle(&mut self, center: Point, radius: f64, color: &str, alpha: f64);

    /// Stroke a straight line segment.
    fn stroke_line(&mut self, from: Point, to: Point, color: &str, alpha: f64, width: f64);
}

/// Window-level geometry.
pub trait Viewport {
    /// Inner size of the window.
    fn size(&self) -> Size;

    /// Vertical document scroll offset.
    fn scroll_y(&self) -> f64;
}

/// A viewport with fixed values, for hosts without a window and for tests.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedViewport {
    pub size: Size,
    pub scroll_y: f64,
}

impl Viewport for FixedViewport {
    fn size(&self) -> Size {
        self.size
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }
}

/// One captured draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Circle {
        center: Point,
        radius: f64,
        color: String,
        alpha: f64,
    },
    Line {
        from: Point,
        to: Point,
        color: String,
        alpha: f64,
        width: f64,
    },
}

/// Surface that records every operation instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Size,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ops: Vec::new(),
        }
    }

    /// All operations since creation or the last [`take_ops`](Self::take_ops).
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drain the recorded operations.
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Line { .. }))
    }
}

impl RenderSurface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: &str, alpha: f64) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            color: color.to_owned(),
            alpha,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: &str, alpha: f64, width: f64) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            color: color.to_owned(),
            alpha,
            width,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_surface_captures_in_order() {
        let mut s = RecordingSurface::new(Size::new(10.0, 10.0));
        s.clear();
        s.fill_circle(Point::new(1.0, 1.0), 2.0, "#fff", 0.5);
        s.stroke_line(Point::ORIGIN, Point::new(3.0, 4.0), "#000", 0.1, 1.0);
        assert_eq!(s.ops().len(), 3);
        assert_eq!(s.ops()[0], DrawOp::Clear);
        assert_eq!(s.circles().count(), 1);
        assert_eq!(s.lines().count(), 1);
        assert_eq!(s.take_ops().len(), 3);
        assert!(s.ops().is_empty());
    }
}
