//! Event listeners, intersection observers and the wake-up callbacks.
//!
//! Listener closures live for the whole page and are leaked with `forget`.
//! Observers and the pending timeout are owned by the bridge state.

use std::cell::RefCell;
use std::collections::HashMap;

use gloo_timers::callback::Timeout;
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, Window,
};

use crate::patch::{Group, Wake};
use crate::selectors;

use super::scan::all;
use super::send;

#[derive(Default)]
struct Bridge {
    observers: HashMap<Group, IntersectionObserver>,
    timeout: Option<Timeout>,
    frame_pending: bool,
}

thread_local! {
    static BRIDGE: RefCell<Bridge> = RefCell::new(Bridge::default());
}

fn listen<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if target
        .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
        .is_err()
    {
        warn!(event, "listener not installed");
    }
    cb.forget();
}

/// Run `f` the first time `event` fires on `target`.
pub(super) fn once<F>(target: &EventTarget, event: &str, f: F)
where
    F: FnOnce() + 'static,
{
    let mut f = Some(f);
    listen(target, event, move |_| {
        if let Some(f) = f.take() {
            f();
        }
    });
}

/// `offsetTop` of the element a `#fragment` link points at.
fn fragment_top(document: &Document, href: &str) -> Option<f64> {
    if href.len() < 2 || !href.starts_with('#') {
        return None;
    }
    let el = document.query_selector(href).ok().flatten()?;
    let el = el.dyn_into::<HtmlElement>().ok()?;
    Some(f64::from(el.offset_top()))
}

fn top_query(top: Option<f64>) -> String {
    top.map(|t| format!("?top={}", t)).unwrap_or_default()
}

fn on_indexed<F>(document: &Document, selector: &str, event: &str, make_path: F)
where
    F: Fn(usize) -> (&'static str, String),
{
    for (i, el) in all(document, selector).iter().enumerate() {
        let (path, query) = make_path(i);
        listen(el, event, move |_| {
            send(path, &query, "");
        });
    }
}

fn install_nav(document: &Document) {
    if let Ok(Some(hamburger)) = document.query_selector(selectors::HAMBURGER) {
        listen(&hamburger, "click", |_| {
            send("/nav/toggle", "", "");
        });
    }

    for link in all(document, "a[href^=\"#\"]") {
        let is_nav = link.class_list().contains(&selectors::NAV_LINK[1..]);
        let doc = document.clone();
        let href = link.get_attribute("href").unwrap_or_default();
        listen(&link, "click", move |ev| {
            ev.prevent_default();
            let query = top_query(fragment_top(&doc, &href));
            let path = if is_nav { "/nav/link" } else { "/nav/section" };
            send(path, &query, "");
        });
    }
    // Nav links leading off the page still close the menu.
    for link in all(document, selectors::NAV_LINK) {
        let href = link.get_attribute("href").unwrap_or_default();
        if !href.starts_with('#') {
            listen(&link, "click", |_| {
                send("/nav/link", "", "");
            });
        }
    }
}

fn install_flow(document: &Document) {
    for (c, card) in all(document, selectors::ARCHITECTURE_CARD).iter().enumerate() {
        for (s, step) in all(card, selectors::FLOW_STEP).iter().enumerate() {
            let query = format!("?card={}&step={}", c, s);
            let enter = query.clone();
            listen(step, "mouseenter", move |_| {
                send("/flow/enter", &enter, "");
            });
            let leave = format!("?card={}", c);
            listen(step, "mouseleave", move |_| {
                send("/flow/leave", &leave, "");
            });
            listen(step, "click", move |_| {
                send("/flow/open", &query, "");
            });
        }
    }
}

fn scroll_query(window: &Window, document: &Document) -> String {
    let page_y = window.page_y_offset().unwrap_or(0.0);
    let root = document.document_element();
    let root_top = root.as_ref().map(|r| f64::from(r.scroll_top())).unwrap_or(0.0);
    let body_top = document
        .body()
        .map(|b| f64::from(b.scroll_top()))
        .unwrap_or(0.0);
    let top = if root_top > 0.0 { root_top } else { body_top };
    let height = root.as_ref().map(|r| f64::from(r.scroll_height())).unwrap_or(0.0);
    let client = root.as_ref().map(|r| f64::from(r.client_height())).unwrap_or(0.0);
    format!(
        "?y={}&top={}&height={}&client={}",
        page_y, top, height, client
    )
}

/// Hook every page element up to its route.
pub(super) fn install(window: &Window, document: &Document) {
    install_nav(document);

    {
        let win = window.clone();
        let doc = document.clone();
        listen(window, "scroll", move |_| {
            send("/scroll", &scroll_query(&win, &doc), "");
        });
    }

    on_indexed(document, selectors::SYSTEM_BUTTON, "click", |i| {
        ("/showcase/select", format!("?index={}", i))
    });
    on_indexed(document, selectors::HOVER_CARD, "mouseenter", |i| {
        ("/hover/enter", format!("?index={}", i))
    });
    on_indexed(document, selectors::HOVER_CARD, "mouseleave", |i| {
        ("/hover/leave", format!("?index={}", i))
    });
    on_indexed(document, selectors::TECH_ITEM, "click", |i| {
        ("/sparkle", format!("?index={}", i))
    });
    install_flow(document);

    // Modal clicks are delegated: created elements carry `data-fx-node`.
    listen(document, "click", |ev| {
        let Some(el) = ev.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        if matches!(el.closest(&format!("[{}]", selectors::ATTR_CLOSE)), Ok(Some(_))) {
            send("/modal/close", "", "");
        } else if let Some(node) = el.get_attribute(selectors::ATTR_NODE) {
            send("/modal/backdrop", &format!("?node={}", node), "");
        }
    });

    listen(document, "keydown", |ev| {
        let Some(key) = ev.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
            return;
        };
        let key = String::from(js_sys::encode_uri_component(&key));
        send("/key", &format!("?key={}", key), "");
    });

    once(window, "load", || {
        send("/page/load", "", "");
    });
}

/// Create the observer for `group` and observe every stamped member.
pub(super) fn observe(document: &Document, group: Group, threshold: f64, root_margin: &str) {
    let cb = Closure::wrap(Box::new(move |entries: js_sys::Array, _: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            if !entry.is_intersecting() {
                continue;
            }
            if let Some(index) = entry.target().get_attribute(group.attr()) {
                let query = format!("?group={}&index={}", group.as_str(), index);
                send("/visible", &query, "");
            }
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    init.set_root_margin(root_margin);
    let observer = match IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &init) {
        Ok(observer) => observer,
        Err(_) => {
            warn!(group = group.as_str(), "intersection observer unavailable");
            return;
        }
    };
    cb.forget();

    for el in all(document, &format!("[{}]", group.attr())) {
        observer.observe(&el);
    }
    let previous = BRIDGE.with(|b| b.borrow_mut().observers.insert(group, observer));
    if let Some(previous) = previous {
        previous.disconnect();
    }
}

pub(super) fn unobserve(group: Group, el: &Element) {
    BRIDGE.with(|b| {
        if let Some(observer) = b.borrow().observers.get(&group) {
            observer.unobserve(el);
        }
    });
}

fn request_frame() {
    let already = BRIDGE.with(|b| std::mem::replace(&mut b.borrow_mut().frame_pending, true));
    if already {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    let cb = Closure::once_into_js(|_: f64| {
        BRIDGE.with(|b| b.borrow_mut().frame_pending = false);
        send("/clock/frame", "", "");
    });
    if window
        .request_animation_frame(cb.unchecked_ref())
        .is_err()
    {
        BRIDGE.with(|b| b.borrow_mut().frame_pending = false);
    }
}

/// Arm one animation frame and one timeout as the core requested. The
/// previous timeout is replaced, which cancels it.
pub(super) fn arm(wake: &Wake) {
    if wake.frame {
        request_frame();
    }
    let timeout = wake.timer_ms.map(|ms| {
        let ms = ms.ceil().clamp(0.0, f64::from(u32::MAX)) as u32;
        Timeout::new(ms, || {
            send("/clock/timer", "", "");
        })
    });
    let previous = BRIDGE.with(|b| std::mem::replace(&mut b.borrow_mut().timeout, timeout));
    drop(previous);
}
