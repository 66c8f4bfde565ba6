//! `/nav/*` and `/scroll` routes.

use tracing::warn;

use crate::fx::nav;
use crate::fx::scroll::ScrollMetrics;
use crate::fx::state::with_page_mut;
use crate::patch::Patch;
use crate::routes::util::{get_f64, parse_query};

// ── /nav/toggle ────────────────────────────────────────────────────

pub fn handle_toggle() -> Vec<Patch> {
    with_page_mut(|page| {
        let mut out = Vec::new();
        page.nav.toggle(&mut out);
        out
    })
}

// ── /nav/link ──────────────────────────────────────────────────────

/// A `.nav-link` was clicked. `?top=` is the `offsetTop` of the section its
/// fragment names; absent when no such section exists.
pub fn handle_link(query: &str) -> Vec<Patch> {
    let params = parse_query(query);
    let top = get_f64(&params, "top");
    with_page_mut(|page| {
        let mut out = Vec::new();
        page.nav.close(&mut out);
        nav::scroll_to(top, &page.config.nav, &mut out);
        out
    })
}

// ── /nav/section ───────────────────────────────────────────────────

/// Scroll to a section without touching the menu.
pub fn handle_section(query: &str) -> Vec<Patch> {
    let params = parse_query(query);
    let top = get_f64(&params, "top");
    with_page_mut(|page| {
        let mut out = Vec::new();
        nav::scroll_to(top, &page.config.nav, &mut out);
        out
    })
}

// ── /scroll ────────────────────────────────────────────────────────

/// `?y=&top=&height=&client=`: page offset, scroll top, scroll height and
/// viewport height.
pub fn handle_scroll(query: &str) -> Vec<Patch> {
    let params = parse_query(query);
    let Some(page_y) = get_f64(&params, "y") else {
        warn!(query, "scroll event without offset");
        return Vec::new();
    };
    let metrics = ScrollMetrics {
        page_y,
        scroll_top: get_f64(&params, "top").unwrap_or(page_y),
        scroll_height: get_f64(&params, "height").unwrap_or(0.0),
        client_height: get_f64(&params, "client").unwrap_or(0.0),
    };
    with_page_mut(|page| {
        let mut out = Vec::new();
        page.on_scroll(metrics, &mut out);
        out
    })
}
