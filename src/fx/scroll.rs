//! Hero parallax and the reading-progress bar.

use crate::config::ScrollConfig;
use crate::fx::NodeIds;
use crate::patch::{NodeId, Patch, Target};
use crate::selectors;

/// Scroll position reported by the host with every scroll event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    /// `window.pageYOffset`
    pub page_y: f64,
    /// `documentElement.scrollTop` (or `body.scrollTop`)
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

/// Percentage of the page scrolled, clamped to `[0, 100]`. Pages that do not
/// scroll report 0.
pub fn progress_percent(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let scrollable = scroll_height - client_height;
    if scrollable.is_nan() || scrollable <= 0.0 {
        return 0.0;
    }
    let pct = scroll_top / scrollable * 100.0;
    if pct.is_finite() { pct.clamp(0.0, 100.0) } else { 0.0 }
}

#[derive(Debug, Default)]
pub struct ScrollFx {
    has_hero: bool,
    progress: Option<NodeId>,
}

impl ScrollFx {
    pub fn new(has_hero: bool) -> Self {
        Self {
            has_hero,
            progress: None,
        }
    }

    pub fn progress_node(&self) -> Option<NodeId> {
        self.progress
    }

    /// Create the progress bar once.
    pub fn boot(&mut self, config: &ScrollConfig, ids: &mut NodeIds, out: &mut Vec<Patch>) {
        if self.progress.is_some() {
            return;
        }
        let node = ids.next();
        self.progress = Some(node);
        out.push(Patch::Create {
            node,
            style: format!(
                "position: fixed; top: 0; left: 0; width: 0%; height: {}px; \
                 background: linear-gradient(90deg, #2563eb, #06b6d4); \
                 z-index: 10000; transition: width 0.1s ease;",
                config.progress_height_px
            ),
            html: String::new(),
            anchor: None,
        });
    }

    pub fn teardown(&mut self, out: &mut Vec<Patch>) {
        if let Some(node) = self.progress.take() {
            out.push(Patch::Remove { node });
        }
    }

    pub fn on_scroll(&self, m: ScrollMetrics, config: &ScrollConfig, out: &mut Vec<Patch>) {
        if self.has_hero {
            out.push(Patch::style(
                Target::first(selectors::HERO_GRAPHIC),
                "transform",
                format!("translateY({}px)", m.page_y * config.parallax_rate),
            ));
        }
        if let Some(node) = self.progress {
            let pct = progress_percent(m.scroll_top, m.scroll_height, m.client_height);
            out.push(Patch::style(Target::node(node), "width", format!("{}%", pct)));
        }
    }
}
