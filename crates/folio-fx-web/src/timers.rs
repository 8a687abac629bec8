#![forbid(unsafe_code)]

//! Browser drivers for core timing: `setTimeout` chains for `TimedEffect`s
//! and a `requestAnimationFrame` loop for per-frame effects.
//!
//! # Invariants
//!
//! - Every callback checks the shared `alive` flag before doing work; once it
//!   is cleared, chains lapse on their next fire and loops stop rescheduling.
//! - A chain has at most one timeout pending at a time.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use folio_fx_core::TimedEffect;
use folio_fx_core::schedule::MIN_STEP;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

/// Run `f` once after `delay`.
pub fn set_timeout(delay: Duration, f: impl FnOnce() + 'static) -> Result<(), JsValue> {
    let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    let callback = Closure::once_into_js(f);
    window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        millis,
    )?;
    Ok(())
}

struct Chain<E, F> {
    effect: E,
    on_fire: F,
}

fn schedule<E, F>(chain: Rc<RefCell<Chain<E, F>>>, alive: Rc<Cell<bool>>)
where
    E: TimedEffect + 'static,
    F: FnMut(E::Output) + 'static,
{
    let Some(delay) = chain.borrow().effect.pending_delay() else {
        return;
    };
    let next = Rc::clone(&chain);
    let result = set_timeout(delay.max(MIN_STEP), move || {
        if !alive.get() {
            return;
        }
        {
            let mut guard = next.borrow_mut();
            let Chain { effect, on_fire } = &mut *guard;
            on_fire(effect.fire());
        }
        schedule(next, alive);
    });
    if let Err(err) = result {
        tracing::warn!(error = ?err, "timer chain could not be scheduled");
    }
}

/// Drive `effect` from a `setTimeout` chain, handing each output to
/// `on_fire`, until the effect finishes or `alive` is cleared.
pub fn run_timed<E, F>(effect: E, alive: Rc<Cell<bool>>, on_fire: F)
where
    E: TimedEffect + 'static,
    F: FnMut(E::Output) + 'static,
{
    schedule(Rc::new(RefCell::new(Chain { effect, on_fire })), alive);
}

/// Call `tick` on every animation frame while `alive` is set.
pub fn animation_loop(
    alive: Rc<Cell<bool>>,
    mut tick: impl FnMut() + 'static,
) -> Result<(), JsValue> {
    // The closure reschedules itself, so it has to reach its own handle.
    let handle: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let inner = Rc::clone(&handle);

    *handle.borrow_mut() = Some(Closure::new(move || {
        if !alive.get() {
            return;
        }
        tick();
        let scheduled = window().and_then(|w| match inner.borrow().as_ref() {
            Some(cb) => w.request_animation_frame(cb.as_ref().unchecked_ref()),
            None => Err(JsValue::from_str("animation frame callback missing")),
        });
        if let Err(err) = scheduled {
            tracing::warn!(error = ?err, "animation loop stopped");
        }
    }));

    let first = handle.borrow();
    match first.as_ref() {
        Some(cb) => window()?.request_animation_frame(cb.as_ref().unchecked_ref())?,
        None => return Err(JsValue::from_str("animation frame callback missing")),
    };
    Ok(())
}
