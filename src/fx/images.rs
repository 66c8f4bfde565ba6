//! Deferred `img[data-src]` loading.

use crate::fx::latch::Latches;
use crate::patch::{Group, Patch, Target};
use crate::selectors;

#[derive(Debug, Default)]
pub struct LazyImages {
    sources: Vec<String>,
    latches: Latches,
}

impl LazyImages {
    pub fn new(sources: &[String]) -> Self {
        Self {
            sources: sources.to_vec(),
            latches: Latches::new(sources.len()),
        }
    }

    pub fn boot(&self, out: &mut Vec<Patch>) {
        if self.sources.is_empty() {
            return;
        }
        out.push(Patch::Observe {
            group: Group::LazyImage,
            threshold: 0.0,
            root_margin: "0px".to_string(),
        });
    }

    /// Swap in the real source. No retry on load failure.
    pub fn visible(&mut self, index: usize, out: &mut Vec<Patch>) {
        if !self.latches.fire(index) {
            return;
        }
        let Some(src) = self.sources.get(index) else {
            return;
        };
        let target = Target::member(Group::LazyImage, index);
        out.push(Patch::SetAttr {
            target: target.clone(),
            name: "src".to_string(),
            value: src.clone(),
        });
        out.push(Patch::RemoveAttr {
            target,
            name: selectors::ATTR_LAZY_SRC.to_string(),
        });
        out.push(Patch::Unobserve {
            group: Group::LazyImage,
            index,
        });
    }

    pub fn is_loaded(&self, index: usize) -> bool {
        self.latches.is_triggered(index)
    }
}
