#![forbid(unsafe_code)]

//! Small DOM helpers shared by the effect wiring.
//!
//! Lookups return `Option`/`Vec` so callers can skip absent elements.
//! Listeners are leaked with `Closure::forget`: they live as long as the page.

use folio_fx_core::{Point, Rect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, MouseEvent};

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Every element matching `selector`, in document order.
pub fn query_all(doc: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = doc.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn query(doc: &Document, selector: &str) -> Option<HtmlElement> {
    doc.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn create(doc: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    Ok(doc.create_element(tag)?.dyn_into::<HtmlElement>()?)
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) -> Result<(), JsValue> {
    el.style().set_property(property, value)
}

pub fn set_styles<V: AsRef<str>>(el: &HtmlElement, styles: &[(&str, V)]) -> Result<(), JsValue> {
    for (property, value) in styles {
        set_style(el, property, value.as_ref())?;
    }
    Ok(())
}

pub fn bounding_rect(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

pub fn client_point(ev: &MouseEvent) -> Point {
    Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

pub fn on_event(
    target: &EventTarget,
    name: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn on_mouse(
    target: &EventTarget,
    name: &str,
    handler: impl FnMut(MouseEvent) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(MouseEvent)>::new(handler);
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
