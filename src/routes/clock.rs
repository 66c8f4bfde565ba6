//! `/clock/*` routes: the host calling back for due timers and frames.
//! The clock itself is advanced in `dispatch` before routing.

use crate::fx::state::with_page_mut;
use crate::patch::Patch;

// ── /clock/timer ───────────────────────────────────────────────────

pub fn handle_timer() -> Vec<Patch> {
    with_page_mut(|page| {
        let mut out = Vec::new();
        page.fire_due(&mut out);
        out
    })
}

// ── /clock/frame ───────────────────────────────────────────────────

pub fn handle_frame() -> Vec<Patch> {
    with_page_mut(|page| {
        let mut out = Vec::new();
        page.run_frame(&mut out);
        out
    })
}
