#![forbid(unsafe_code)]

//! Wires every effect to the page.
//!
//! Each `wire_*` step looks its elements up, skips silently when they are
//! absent, and logs (without aborting the rest) when the browser refuses an
//! operation. The order matches the page's visual priority: the canvas first,
//! link ripples last.
//!
//! # Invariants
//!
//! - Sections are tagged `fade-in` before the observer starts, so they are
//!   observed like every other fade-in target.
//! - All loops and timer chains share one `alive` flag.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use folio_fx_core::effects::char_reveal::{self, KEYFRAMES_CSS};
use folio_fx_core::effects::follower::FOLLOWER_CLASS;
use folio_fx_core::effects::glitch::{GLITCH_CLASS, GLITCH_TEXT_ATTR};
use folio_fx_core::effects::parallax::translate_y_css;
use folio_fx_core::effects::ripple::{HOST_STYLES, LINK_RIPPLE_STYLES, RIPPLE_CLASS};
use folio_fx_core::effects::tilt::NEUTRAL_TRANSFORM;
use folio_fx_core::effects::{
    GlitchEdge, GlitchPulse, HoverStyle, MouseFollower, RippleKind, RippleSpec, Tilt,
    parallax_offset, parse_speed, px, reveal_slots,
};
use folio_fx_core::reveal::{ElementId, FADE_IN_CLASS, VISIBLE_CLASS, section_delay_css};
use folio_fx_core::typing::{DEFAULT_SUBTITLES, TYPING_CLASS};
use folio_fx_core::{
    EffectsConfig, ParticleField, RevealTracker, TypingEffect, Viewport, selectors,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, HtmlCanvasElement, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

use crate::canvas::CanvasSurface;
use crate::dom;
use crate::timers;
use crate::viewport::WindowViewport;

/// Attribute carrying the tracker id of each observed element.
const REVEAL_ID_ATTR: &str = "data-reveal-id";

/// Handles kept alive for stop/destroy.
pub struct Runtime {
    alive: Rc<Cell<bool>>,
    particles: Option<Rc<RefCell<ParticleField>>>,
    follower: Option<Rc<RefCell<MouseFollower>>>,
    observer: Option<IntersectionObserver>,
}

impl Runtime {
    pub fn stop(&self) {
        self.alive.set(false);
        if let Some(field) = &self.particles {
            field.borrow_mut().stop();
        }
        if let Some(follower) = &self.follower {
            follower.borrow_mut().stop();
        }
    }

    /// Stop everything and release the scroll observer.
    pub fn destroy(self) {
        self.stop();
        if let Some(observer) = &self.observer {
            observer.disconnect();
        }
    }
}

fn log_failure<T>(component: &'static str, result: Result<T, JsValue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(component, error = ?err, "effect wiring failed");
            None
        }
    }
}

/// Attach every effect. Only a missing window or document is fatal.
pub fn start(config: &EffectsConfig, alive: Rc<Cell<bool>>) -> Result<Runtime, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = dom::document()?;

    let particles = log_failure(
        "particles",
        wire_particles(&doc, &window, config, Rc::clone(&alive)),
    )
    .flatten();
    log_failure("typing", wire_typing(&doc, config, Rc::clone(&alive)));
    let observer = log_failure("reveal", wire_reveal(&doc, config)).flatten();
    log_failure("glitch", wire_glitch(&doc, config, Rc::clone(&alive)));
    let follower = log_failure("follower", wire_follower(&doc, Rc::clone(&alive))).flatten();
    log_failure("cards", wire_cards(&doc));
    log_failure("parallax", wire_parallax(&doc, &window));
    log_failure("char_reveal", wire_char_reveal(&doc));
    log_failure("hover", wire_hover(&doc));
    log_failure("links", wire_link_ripples(&doc));
    log_failure("pulse", publish_pulse(&doc, config));

    tracing::info!(
        particles = particles.is_some(),
        follower = follower.is_some(),
        reveal = observer.is_some(),
        "effects wired"
    );
    Ok(Runtime {
        alive,
        particles,
        follower,
        observer,
    })
}

// ---------------------------------------------------------------------------
// Particles

fn random_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

fn wire_particles(
    doc: &Document,
    window: &Window,
    config: &EffectsConfig,
    alive: Rc<Cell<bool>>,
) -> Result<Option<Rc<RefCell<ParticleField>>>, JsValue> {
    let Some(canvas) = doc.get_element_by_id(selectors::PARTICLES_CANVAS_ID) else {
        return Ok(None);
    };
    let canvas = canvas.dyn_into::<HtmlCanvasElement>()?;
    let mut surface = CanvasSurface::new(canvas)?;
    let viewport = WindowViewport::new(window.clone());
    let field = ParticleField::attach(
        config.particles.clone(),
        &mut surface,
        &viewport,
        random_seed(),
    );

    let surface = Rc::new(RefCell::new(surface));
    let field = Rc::new(RefCell::new(field));

    {
        let surface = Rc::clone(&surface);
        let field = Rc::clone(&field);
        dom::on_event(window, "resize", move |_| {
            field
                .borrow_mut()
                .resize(viewport.size(), &mut *surface.borrow_mut());
        })?;
    }
    {
        let field = Rc::clone(&field);
        timers::animation_loop(alive, move || {
            field.borrow_mut().frame(&mut *surface.borrow_mut());
        })?;
    }
    tracing::debug!(count = config.particles.count, "particles wired");
    Ok(Some(field))
}

// ---------------------------------------------------------------------------
// Text effects

fn wire_typing(
    doc: &Document,
    config: &EffectsConfig,
    alive: Rc<Cell<bool>>,
) -> Result<(), JsValue> {
    let Some(el) = dom::query(doc, selectors::SUBTITLE) else {
        return Ok(());
    };
    let effect = TypingEffect::new(DEFAULT_SUBTITLES, config.typing)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    el.class_list().add_1(TYPING_CLASS)?;
    el.set_text_content(Some(""));
    timers::run_timed(effect, alive, move |text| {
        if let Some(text) = text {
            el.set_text_content(Some(&text));
        }
    });
    tracing::debug!("typing wired");
    Ok(())
}

fn wire_glitch(
    doc: &Document,
    config: &EffectsConfig,
    alive: Rc<Cell<bool>>,
) -> Result<(), JsValue> {
    let Some(el) = dom::query(doc, selectors::HEADER_TITLE) else {
        return Ok(());
    };
    timers::run_timed(GlitchPulse::new(config.glitch), alive, move |edge| {
        let applied = match edge {
            GlitchEdge::On => {
                let text = el.text_content().unwrap_or_default();
                el.set_attribute(GLITCH_TEXT_ATTR, &text)
                    .and_then(|()| el.class_list().add_1(GLITCH_CLASS))
            }
            GlitchEdge::Off => el.class_list().remove_1(GLITCH_CLASS),
        };
        if let Err(err) = applied {
            tracing::warn!(error = ?err, "glitch toggle failed");
        }
    });
    tracing::debug!("glitch wired");
    Ok(())
}

fn wire_char_reveal(doc: &Document) -> Result<(), JsValue> {
    let headings = dom::query_all(doc, selectors::SECTION_HEADING);
    if headings.is_empty() {
        return Ok(());
    }
    let style = dom::create(doc, "style")?;
    style.set_text_content(Some(KEYFRAMES_CSS));
    doc.head()
        .ok_or_else(|| JsValue::from_str("no head element"))?
        .append_child(&style)?;

    for heading in &headings {
        let text = heading.text_content().unwrap_or_default();
        heading.set_text_content(None);
        dom::set_styles(heading, &char_reveal::HOST_STYLES)?;
        for slot in reveal_slots(&text) {
            let span = dom::create(doc, "span")?;
            span.set_text_content(Some(&slot.text));
            dom::set_styles(&span, &char_reveal::SLOT_STYLES)?;
            dom::set_style(&span, "animation", &slot.animation_css())?;
            heading.append_child(&span)?;
        }
    }
    tracing::debug!(headings = headings.len(), "char reveal wired");
    Ok(())
}

// ---------------------------------------------------------------------------
// Scroll

fn wire_reveal(
    doc: &Document,
    config: &EffectsConfig,
) -> Result<Option<IntersectionObserver>, JsValue> {
    for (i, section) in dom::query_all(doc, selectors::SECTION).iter().enumerate() {
        section.class_list().add_1(FADE_IN_CLASS)?;
        dom::set_style(section, "animation-delay", &section_delay_css(i))?;
    }

    let targets = dom::query_all(doc, selectors::FADE_IN);
    if targets.is_empty() {
        return Ok(None);
    }

    let tracker = Rc::new(RefCell::new(RevealTracker::from_config(&config.scroll)));
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(tracker.borrow().threshold()));
    options.set_root_margin(tracker.borrow().root_margin());

    let on_entries = {
        let tracker = Rc::clone(&tracker);
        Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    let target = entry.target();
                    let Some(id) = target
                        .get_attribute(REVEAL_ID_ATTR)
                        .and_then(|raw| raw.parse::<ElementId>().ok())
                    else {
                        continue;
                    };
                    let revealed = tracker.borrow_mut().on_intersection(
                        id,
                        entry.intersection_ratio(),
                        entry.is_intersecting(),
                    );
                    if revealed {
                        if let Err(err) = target.class_list().add_1(VISIBLE_CLASS) {
                            tracing::warn!(error = ?err, "reveal failed");
                        }
                        observer.unobserve(&target);
                    }
                }
            },
        )
    };
    let observer =
        IntersectionObserver::new_with_options(on_entries.as_ref().unchecked_ref(), &options)?;
    on_entries.forget();

    for (id, target) in (0..).zip(&targets) {
        target.set_attribute(REVEAL_ID_ATTR, &id.to_string())?;
        tracker.borrow_mut().observe(id);
        observer.observe(target);
    }
    tracing::debug!(targets = targets.len(), "scroll reveal wired");
    Ok(Some(observer))
}

fn wire_parallax(doc: &Document, window: &Window) -> Result<(), JsValue> {
    let layers: Vec<(HtmlElement, f64)> = dom::query_all(doc, selectors::PARALLAX)
        .into_iter()
        .map(|el| {
            let speed = parse_speed(el.get_attribute("data-speed").as_deref());
            (el, speed)
        })
        .collect();
    if layers.is_empty() {
        return Ok(());
    }
    let viewport = WindowViewport::new(window.clone());
    let count = layers.len();
    dom::on_event(window, "scroll", move |_| {
        let scroll_y = viewport.scroll_y();
        for (el, speed) in &layers {
            let css = translate_y_css(parallax_offset(scroll_y, *speed));
            if let Err(err) = dom::set_style(el, "transform", &css) {
                tracing::warn!(error = ?err, "parallax update failed");
            }
        }
    })?;
    tracing::debug!(layers = count, "parallax wired");
    Ok(())
}

// ---------------------------------------------------------------------------
// Pointer

fn wire_follower(
    doc: &Document,
    alive: Rc<Cell<bool>>,
) -> Result<Option<Rc<RefCell<MouseFollower>>>, JsValue> {
    let Some(body) = doc.body() else {
        return Ok(None);
    };
    let marker = dom::create(doc, "div")?;
    marker.set_class_name(FOLLOWER_CLASS);
    body.append_child(&marker)?;

    let follower = Rc::new(RefCell::new(MouseFollower::new()));
    {
        let follower = Rc::clone(&follower);
        dom::on_mouse(doc, "mousemove", move |ev| {
            follower.borrow_mut().set_target(dom::client_point(&ev));
        })?;
    }
    {
        let follower = Rc::clone(&follower);
        timers::animation_loop(alive, move || {
            let Some(pos) = follower.borrow_mut().step() else {
                return;
            };
            let moved = dom::set_style(&marker, "left", &px(pos.x))
                .and_then(|()| dom::set_style(&marker, "top", &px(pos.y)));
            if let Err(err) = moved {
                tracing::warn!(error = ?err, "follower update failed");
            }
        })?;
    }
    tracing::debug!("mouse follower wired");
    Ok(Some(follower))
}

fn spawn_ripple(doc: &Document, host: &HtmlElement, spec: RippleSpec) -> Result<(), JsValue> {
    dom::set_styles(host, &HOST_STYLES)?;
    let ripple = dom::create(doc, "span")?;
    match spec.kind {
        RippleKind::Card => ripple.set_class_name(RIPPLE_CLASS),
        RippleKind::Link => dom::set_styles(&ripple, &LINK_RIPPLE_STYLES)?,
    }
    dom::set_styles(&ripple, &spec.geometry_styles())?;
    host.append_child(&ripple)?;
    timers::set_timeout(spec.lifetime, move || ripple.remove())
}

fn on_click_ripple(doc: &Document, host: &HtmlElement, kind: RippleKind) -> Result<(), JsValue> {
    let doc = doc.clone();
    let target = host.clone();
    dom::on_mouse(host, "click", move |ev| {
        let spec = RippleSpec::for_click(dom::bounding_rect(&target), dom::client_point(&ev), kind);
        if let Err(err) = spawn_ripple(&doc, &target, spec) {
            tracing::warn!(error = ?err, "ripple failed");
        }
    })
}

fn wire_cards(doc: &Document) -> Result<(), JsValue> {
    let cards = dom::query_all(doc, selectors::CARD);
    for card in &cards {
        on_click_ripple(doc, card, RippleKind::Card)?;

        let target = card.clone();
        dom::on_mouse(card, "mousemove", move |ev| {
            let tilt = Tilt::from_pointer(dom::bounding_rect(&target), dom::client_point(&ev));
            if let Err(err) = dom::set_style(&target, "transform", &tilt.to_css()) {
                tracing::warn!(error = ?err, "tilt failed");
            }
        })?;

        let target = card.clone();
        dom::on_event(card, "mouseleave", move |_| {
            if let Err(err) = dom::set_style(&target, "transform", NEUTRAL_TRANSFORM) {
                tracing::warn!(error = ?err, "tilt reset failed");
            }
        })?;
    }
    tracing::debug!(cards = cards.len(), "cards wired");
    Ok(())
}

fn wire_link_ripples(doc: &Document) -> Result<(), JsValue> {
    let links = dom::query_all(doc, selectors::LINK);
    for link in &links {
        on_click_ripple(doc, link, RippleKind::Link)?;
    }
    tracing::debug!(links = links.len(), "link ripples wired");
    Ok(())
}

fn wire_hover(doc: &Document) -> Result<(), JsValue> {
    for (selector, hover) in [
        (selectors::BADGE, HoverStyle::BADGE),
        (selectors::NAV_LINK, HoverStyle::NAV_LINK),
    ] {
        for el in dom::query_all(doc, selector) {
            let target = el.clone();
            dom::on_event(&el, "mouseenter", move |_| {
                let applied = dom::set_style(&target, "transition", hover.transition)
                    .and_then(|()| dom::set_style(&target, "transform", hover.enter));
                if let Err(err) = applied {
                    tracing::warn!(error = ?err, "hover failed");
                }
            })?;
            let target = el.clone();
            dom::on_event(&el, "mouseleave", move |_| {
                if let Err(err) = dom::set_style(&target, "transform", hover.leave) {
                    tracing::warn!(error = ?err, "hover reset failed");
                }
            })?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Pulse

fn publish_pulse(doc: &Document, config: &EffectsConfig) -> Result<(), JsValue> {
    let Some(root) = doc
        .document_element()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return Ok(());
    };
    dom::set_styles(&root, &config.pulse.css_variables())
}
