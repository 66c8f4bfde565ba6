//! Pointer and visibility routes: card hover, tech-item sparkles and
//! intersection reports.

use tracing::warn;

use crate::fx::state::with_page_mut;
use crate::patch::{Group, Patch};
use crate::routes::util::{get_index, get_param, parse_query};

// ── /hover/enter, /hover/leave ─────────────────────────────────────

/// `?index=` of the card under the pointer.
pub fn handle_hover(query: &str, entering: bool) -> Vec<Patch> {
    let params = parse_query(query);
    let Some(index) = get_index(&params, "index") else {
        warn!(query, "hover without index");
        return Vec::new();
    };
    with_page_mut(|page| {
        let mut out = Vec::new();
        if entering {
            page.hover.enter(index, &mut out);
        } else {
            page.hover.leave(index, &mut out);
        }
        out
    })
}

// ── /sparkle ───────────────────────────────────────────────────────

pub fn handle_sparkle(query: &str) -> Vec<Patch> {
    let params = parse_query(query);
    let Some(index) = get_index(&params, "index") else {
        warn!(query, "sparkle without index");
        return Vec::new();
    };
    with_page_mut(|page| {
        let mut out = Vec::new();
        page.sparkle(index, &mut out);
        out
    })
}

// ── /visible ───────────────────────────────────────────────────────

/// `?group=&index=`: member `index` of an observed group intersected.
pub fn handle_visible(query: &str) -> Vec<Patch> {
    let params = parse_query(query);
    let group = get_param(&params, "group").and_then(Group::parse);
    let index = get_index(&params, "index");
    let (Some(group), Some(index)) = (group, index) else {
        warn!(query, "visibility report without group or index");
        return Vec::new();
    };
    with_page_mut(|page| {
        let mut out = Vec::new();
        page.visible(group, index, &mut out);
        out
    })
}
