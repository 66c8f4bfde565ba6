//! Showcase page effects compiled to WASM.
//!
//! Exports `handle_event(path, query, body, now_ms)` for the DOM bridge (or
//! any JS host) to call. Events are routed with `matchit`, the same router
//! engine that powers Axum, and every handler answers with a JSON `Response`:
//! the patches to apply plus when to call back for timers and frames.

use tracing::{debug, warn};
use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod fx;
pub mod layout;
pub mod logging;
pub mod patch;
pub mod render;
pub mod routes;
pub mod selectors;

#[cfg(target_arch = "wasm32")]
pub mod dom;

use crate::config::FxConfig;
use crate::error::{FxError, Result};
use crate::fx::state::{with_page, with_page_mut};
use crate::patch::Response;

fn router() -> matchit::Router<&'static str> {
    let mut router = matchit::Router::new();

    router.insert("/page/boot", "boot").ok();
    router.insert("/page/load", "load").ok();
    router.insert("/page/teardown", "teardown").ok();

    router.insert("/nav/toggle", "nav_toggle").ok();
    router.insert("/nav/link", "nav_link").ok();
    router.insert("/nav/section", "nav_section").ok();
    router.insert("/scroll", "scroll").ok();

    router.insert("/visible", "visible").ok();
    router.insert("/showcase/select", "showcase_select").ok();
    router.insert("/hover/enter", "hover_enter").ok();
    router.insert("/hover/leave", "hover_leave").ok();
    router.insert("/sparkle", "sparkle").ok();

    router.insert("/flow/enter", "flow_enter").ok();
    router.insert("/flow/leave", "flow_leave").ok();
    router.insert("/flow/open", "flow_open").ok();
    router.insert("/modal/close", "modal_close").ok();
    router.insert("/modal/backdrop", "modal_backdrop").ok();
    router.insert("/key", "key").ok();

    router.insert("/clock/timer", "clock_timer").ok();
    router.insert("/clock/frame", "clock_frame").ok();

    router
}

/// Route one event. The page clock is advanced to `now_ms` first, so
/// handlers see the host's time. Until the page is booted, and again after
/// teardown, every event other than boot and teardown is ignored.
pub fn dispatch(path: &str, query: &str, body: &str, now_ms: f64) -> Result<Response> {
    with_page_mut(|page| page.clock.advance_to(now_ms));

    let router = router();
    let matched = router
        .at(path)
        .map_err(|_| FxError::UnknownEvent(path.to_string()))?;
    debug!(path, query, now_ms, "event");

    let tag = *matched.value;
    if !matches!(tag, "boot" | "teardown") && !with_page(|page| page.booted) {
        debug!(path, "page not booted, event ignored");
        let wake = with_page(|page| page.clock.wake());
        return Ok(Response {
            patches: Vec::new(),
            wake,
        });
    }

    let patches = match tag {
        "boot" => routes::page::handle_boot(query, body),
        "load" => routes::page::handle_load(),
        "teardown" => routes::page::handle_teardown(),

        "nav_toggle" => routes::nav::handle_toggle(),
        "nav_link" => routes::nav::handle_link(query),
        "nav_section" => routes::nav::handle_section(query),
        "scroll" => routes::nav::handle_scroll(query),

        "visible" => routes::interact::handle_visible(query),
        "showcase_select" => routes::showcase::handle_select(query),
        "hover_enter" => routes::interact::handle_hover(query, true),
        "hover_leave" => routes::interact::handle_hover(query, false),
        "sparkle" => routes::interact::handle_sparkle(query),

        "flow_enter" => routes::flow::handle_enter(query),
        "flow_leave" => routes::flow::handle_leave(query),
        "flow_open" => routes::flow::handle_open(query),
        "modal_close" => routes::flow::handle_close(),
        "modal_backdrop" => routes::flow::handle_backdrop(query),
        "key" => routes::flow::handle_key(query),

        "clock_timer" => routes::clock::handle_timer(),
        "clock_frame" => routes::clock::handle_frame(),

        other => return Err(FxError::UnknownEvent(other.to_string())),
    };

    let wake = with_page(|page| page.clock.wake());
    Ok(Response { patches, wake })
}

/// Process one page event and return the JSON `Response`.
///
/// Called from JavaScript via wasm-bindgen.
///
/// # Arguments
/// * `path`: event path (e.g., "/showcase/select")
/// * `query`: event parameters (e.g., "?index=2")
/// * `body`: payload; the layout snapshot for "/page/boot", empty otherwise
/// * `now_ms`: host clock (`performance.now()`)
#[wasm_bindgen]
pub fn handle_event(path: &str, query: &str, body: &str, now_ms: f64) -> String {
    match dispatch(path, query, body, now_ms) {
        Ok(response) => response.to_json(),
        Err(e) => {
            warn!(error = %e, "event dropped");
            let wake = with_page(|page| page.clock.wake());
            Response {
                patches: Vec::new(),
                wake,
            }
            .to_json()
        }
    }
}

/// Replace the effect configuration. Returns `{"ok":true}` or
/// `{"error":"..."}`; an invalid configuration leaves the current one.
#[wasm_bindgen]
pub fn configure(json: &str) -> String {
    match FxConfig::from_json(json) {
        Ok(config) => {
            with_page_mut(|page| page.config = config);
            r#"{"ok":true}"#.to_string()
        }
        Err(e) => {
            warn!(error = %e, "configuration rejected");
            serde_json::json!({ "error": e.to_string() }).to_string()
        }
    }
}

/// Tear the page down: stop the cycle, remove particles and the modal,
/// cancel all timers. Returns the JSON `Response` with the removals, which
/// the browser bridge has already applied.
#[wasm_bindgen]
pub fn teardown() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        dom::send("/page/teardown", "", "").to_json()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        handle_event("/page/teardown", "", "", f64::NAN)
    }
}
