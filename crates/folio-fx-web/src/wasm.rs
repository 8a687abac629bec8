#![forbid(unsafe_code)]

use std::cell::Cell;
use std::rc::Rc;

use folio_fx_core::config::DEFAULT_CONFIG_URL;
use folio_fx_core::effects::CounterTween;
use folio_fx_core::effects::counter::duration_or_default;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;
use web_time::Instant;

use crate::orchestrator::{self, Runtime};
use crate::{config_fetch, console_log, timers};

/// Page effects controller.
///
/// `init` fetches the configuration once and wires every effect. `stop`
/// halts the frame loops and lets pending timers lapse; `destroy` also
/// releases the scroll observer. Neither can be undone: build a new
/// instance to restart.
#[wasm_bindgen]
pub struct FolioFx {
    alive: Rc<Cell<bool>>,
    runtime: Option<Runtime>,
    ready: bool,
}

impl Default for FolioFx {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl FolioFx {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
            runtime: None,
            ready: false,
        }
    }

    /// Load `config_url` (default `animations.json`) and attach the effects.
    ///
    /// A failed fetch is not an error: the defaults are used instead. Calling
    /// `init` again after it succeeded, or after `stop`, does nothing.
    pub async fn init(&mut self, config_url: Option<String>) -> Result<(), JsValue> {
        if self.ready || !self.alive.get() {
            return Ok(());
        }
        console_error_panic_hook::set_once();
        console_log::init();

        let started = Instant::now();
        let url = config_url.unwrap_or_else(|| DEFAULT_CONFIG_URL.to_owned());
        let config = config_fetch::load_config(&url).await;
        self.runtime = Some(orchestrator::start(&config, Rc::clone(&self.alive))?);
        self.ready = true;
        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "folio effects ready"
        );
        Ok(())
    }

    #[wasm_bindgen(js_name = isReady)]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Count `element`'s text up from 0 to `target` over `duration_ms`
    /// (2000 when omitted).
    #[wasm_bindgen(js_name = animateCounter)]
    pub fn animate_counter(&self, element: HtmlElement, target: u32, duration_ms: Option<u32>) {
        let tween = CounterTween::new(u64::from(target), duration_or_default(duration_ms));
        element.set_text_content(Some("0"));
        timers::run_timed(tween, Rc::clone(&self.alive), move |value| {
            element.set_text_content(Some(&value.to_string()));
        });
    }

    pub fn stop(&mut self) {
        self.alive.set(false);
        if let Some(runtime) = &self.runtime {
            runtime.stop();
        }
        tracing::debug!("folio effects stopped");
    }

    /// Stop and drop every handle. The instance is inert afterwards.
    pub fn destroy(&mut self) {
        self.alive.set(false);
        if let Some(runtime) = self.runtime.take() {
            runtime.destroy();
        }
        self.ready = false;
    }
}
