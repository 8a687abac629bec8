#![forbid(unsafe_code)]

//! `Viewport` backed by the browser window.

use folio_fx_core::{Size, Viewport};
use web_sys::Window;

pub struct WindowViewport {
    window: Window,
}

impl WindowViewport {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

/// Unreadable dimensions read as zero.
fn dimension(value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>) -> f64 {
    value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}

impl Viewport for WindowViewport {
    fn size(&self) -> Size {
        Size::new(
            dimension(self.window.inner_width()),
            dimension(self.window.inner_height()),
        )
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }
}
