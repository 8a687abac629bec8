#![forbid(unsafe_code)]

//! `RenderSurface` backed by a 2D canvas context.

use std::f64::consts::TAU;

use folio_fx_core::{Point, RenderSurface, Size};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    size: Size,
}

impl CanvasSurface {
    /// Acquire the 2D context of `canvas`.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d canvas context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let size = Size::new(f64::from(canvas.width()), f64::from(canvas.height()));
        Ok(Self { canvas, ctx, size })
    }
}

impl RenderSurface for CanvasSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
        self.canvas.set_width(size.width.max(0.0) as u32);
        self.canvas.set_height(size.height.max(0.0) as u32);
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.size.width, self.size.height);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: &str, alpha: f64) {
        self.ctx.begin_path();
        // Only fails for a negative radius, which particles never have.
        if self.ctx.arc(center.x, center.y, radius, 0.0, TAU).is_err() {
            return;
        }
        self.ctx.set_fill_style_str(color);
        self.ctx.set_global_alpha(alpha);
        self.ctx.fill();
        self.ctx.set_global_alpha(1.0);
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: &str, alpha: f64, width: f64) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_global_alpha(alpha);
        self.ctx.set_line_width(width);
        self.ctx.stroke();
        self.ctx.set_global_alpha(1.0);
    }
}
