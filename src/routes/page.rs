//! `/page/*` routes: boot, window load and teardown.

use tracing::warn;

use crate::fx::state::with_page_mut;
use crate::layout::Layout;
use crate::patch::Patch;
use crate::routes::util::{get_param, parse_query};

// ── /page/boot ─────────────────────────────────────────────────────

/// Body is the JSON `Layout` snapshot; `?seed=` fixes the particle RNG,
/// otherwise it is derived from the host clock.
pub fn handle_boot(query: &str, body: &str) -> Vec<Patch> {
    let layout = match Layout::from_json(body) {
        Ok(layout) => layout,
        Err(e) => {
            warn!(error = %e, "boot ignored: malformed layout");
            return Vec::new();
        }
    };
    let params = parse_query(query);
    let seed = get_param(&params, "seed").and_then(|s| s.parse::<u64>().ok());
    with_page_mut(|page| {
        let seed = seed.unwrap_or_else(|| page.clock.now().to_bits());
        let mut out = Vec::new();
        page.boot(&layout, seed, &mut out);
        out
    })
}

// ── /page/load ─────────────────────────────────────────────────────

pub fn handle_load() -> Vec<Patch> {
    with_page_mut(|page| {
        let mut out = Vec::new();
        page.load(&mut out);
        out
    })
}

// ── /page/teardown ─────────────────────────────────────────────────

pub fn handle_teardown() -> Vec<Patch> {
    with_page_mut(|page| {
        let mut out = Vec::new();
        page.teardown(&mut out);
        out
    })
}
