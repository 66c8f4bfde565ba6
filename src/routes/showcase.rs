//! `/showcase/select` route.

use tracing::warn;

use crate::fx::state::with_page_mut;
use crate::patch::Patch;
use crate::routes::util::{get_index, parse_query};

// ── /showcase/select ───────────────────────────────────────────────

/// `?index=` of the clicked `.system-btn`.
pub fn handle_select(query: &str) -> Vec<Patch> {
    let params = parse_query(query);
    let Some(index) = get_index(&params, "index") else {
        warn!(query, "showcase select without index");
        return Vec::new();
    };
    with_page_mut(|page| {
        let mut out = Vec::new();
        page.showcase
            .select(index, &page.config.showcase, &mut page.clock, &mut out);
        out
    })
}
