//! Browser bridge: scans the document, forwards DOM events to `dispatch`,
//! applies the returned patches and arms the callbacks the core asks for.
//!
//! Only compiled for wasm32.

mod apply;
mod scan;
mod wire;

use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, Window};

use crate::patch::Response;

fn window() -> Option<Window> {
    web_sys::window()
}

fn document() -> Option<Document> {
    window()?.document()
}

fn now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Dispatch one event and apply its outcome to the live document.
pub(crate) fn send(path: &str, query: &str, body: &str) -> Response {
    let response = match crate::dispatch(path, query, body, now()) {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "event dropped");
            return Response::default();
        }
    };
    if let Some(document) = document() {
        apply::apply(&document, &response.patches);
    }
    wire::arm(&response.wake);
    response
}

fn boot() {
    let (Some(window), Some(document)) = (window(), document()) else {
        warn!("no document; effects not started");
        return;
    };
    let layout = scan::scan(&document);
    let body = match serde_json::to_string(&layout) {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "layout snapshot failed");
            return;
        }
    };
    wire::install(&window, &document);
    send("/page/boot", "", &body);
    info!("page bridge ready");
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    crate::logging::init();

    let Some(document) = document() else {
        return;
    };
    let state = js_sys::Reflect::get(&document, &JsValue::from_str("readyState"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default();
    if state == "loading" {
        wire::once(&document, "DOMContentLoaded", boot);
    } else {
        boot();
    }
}

/// Smooth-scroll to the element with id `id`, below the fixed navbar.
/// Unknown ids do nothing.
#[wasm_bindgen]
pub fn scroll_to_section(id: &str) {
    let top = document()
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|el| f64::from(el.offset_top()));
    let query = top.map(|t| format!("?top={}", t)).unwrap_or_default();
    send("/nav/section", &query, "");
}
