//! Architecture flow routes plus the step modal they open.

use tracing::warn;

use crate::fx::state::with_page_mut;
use crate::patch::Patch;
use crate::routes::util::{get_index, get_param, parse_query};

fn card_and_step(query: &str) -> Option<(usize, usize)> {
    let params = parse_query(query);
    Some((get_index(&params, "card")?, get_index(&params, "step")?))
}

// ── /flow/enter ────────────────────────────────────────────────────

/// `?card=&step=` of the hovered `.flow-step`, step local to its card.
pub fn handle_enter(query: &str) -> Vec<Patch> {
    let Some((card, step)) = card_and_step(query) else {
        warn!(query, "flow hover without card or step");
        return Vec::new();
    };
    with_page_mut(|page| {
        let mut out = Vec::new();
        page.flow.hover_enter(card, step, &mut out);
        out
    })
}

// ── /flow/leave ────────────────────────────────────────────────────

pub fn handle_leave(query: &str) -> Vec<Patch> {
    let params = parse_query(query);
    let Some(card) = get_index(&params, "card") else {
        warn!(query, "flow leave without card");
        return Vec::new();
    };
    with_page_mut(|page| {
        let mut out = Vec::new();
        page.flow.hover_leave(card, &mut out);
        out
    })
}

// ── /flow/open ─────────────────────────────────────────────────────

pub fn handle_open(query: &str) -> Vec<Patch> {
    let Some((card, step)) = card_and_step(query) else {
        warn!(query, "flow click without card or step");
        return Vec::new();
    };
    with_page_mut(|page| {
        let mut out = Vec::new();
        page.open_step(card, step, &mut out);
        out
    })
}

// ── /modal/close ───────────────────────────────────────────────────

pub fn handle_close() -> Vec<Patch> {
    with_page_mut(|page| {
        let mut out = Vec::new();
        page.modal.close(&mut out);
        out
    })
}

// ── /modal/backdrop ────────────────────────────────────────────────

/// `?node=` of the element clicked. Only a click on the overlay itself
/// closes the modal; clicks inside the card are ignored.
pub fn handle_backdrop(query: &str) -> Vec<Patch> {
    let params = parse_query(query);
    let node = get_param(&params, "node").and_then(|n| n.parse().ok());
    with_page_mut(|page| {
        let mut out = Vec::new();
        if node.is_some() && node == page.modal.node() {
            page.modal.close(&mut out);
        }
        out
    })
}

// ── /key ───────────────────────────────────────────────────────────

pub fn handle_key(query: &str) -> Vec<Patch> {
    let params = parse_query(query);
    let key = get_param(&params, "key").unwrap_or("");
    with_page_mut(|page| {
        let mut out = Vec::new();
        page.key(key, &mut out);
        out
    })
}
