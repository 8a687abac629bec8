#![forbid(unsafe_code)]

//! WASM frontend for folio-fx.
//!
//! Exposes a single `wasm-bindgen` type, `FolioFx`, that:
//! - fetches the optional `animations.json` configuration (once, with
//!   fallback to defaults),
//! - wires every effect from `folio-fx-core` to the matching page elements,
//! - drives per-frame effects from `requestAnimationFrame` and timer chains
//!   from `setTimeout`,
//! - can be stopped explicitly.
//!
//! ```js
//! import init, { FolioFx } from "./pkg/folio_fx_web.js";
//! await init();
//! const fx = new FolioFx();
//! await fx.init("animations.json");
//! ```

pub mod console_log;

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod config_fetch;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod orchestrator;
#[cfg(target_arch = "wasm32")]
mod timers;
#[cfg(target_arch = "wasm32")]
mod viewport;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::FolioFx;

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct FolioFx;

#[cfg(not(target_arch = "wasm32"))]
impl FolioFx {
    pub fn new() -> Self {
        Self
    }

    /// Nothing is ever wired natively.
    pub fn is_ready(&self) -> bool {
        false
    }
}
