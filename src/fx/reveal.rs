//! Fade-and-rise reveal for `[data-aos]` elements.

use crate::config::RevealConfig;
use crate::fx::latch::Latches;
use crate::patch::{Group, Patch, Target};

#[derive(Debug, Default)]
pub struct Reveal {
    latches: Latches,
}

impl Reveal {
    pub fn new(count: usize) -> Self {
        Self {
            latches: Latches::new(count),
        }
    }

    /// Hide every element and start observing them.
    pub fn boot(&self, config: &RevealConfig, out: &mut Vec<Patch>) {
        if self.latches.is_empty() {
            return;
        }
        for i in 0..self.latches.len() {
            let target = Target::member(Group::Aos, i);
            out.push(Patch::style(target.clone(), "opacity", "0"));
            out.push(Patch::style(
                target.clone(),
                "transform",
                format!("translateY({}px)", config.offset),
            ));
            out.push(Patch::style(
                target,
                "transition",
                format!("all {}s ease", seconds(config.transition_ms)),
            ));
        }
        out.push(Patch::Observe {
            group: Group::Aos,
            threshold: config.threshold,
            root_margin: format!("0px 0px -{}px 0px", config.bottom_margin),
        });
    }

    pub fn visible(&mut self, index: usize, out: &mut Vec<Patch>) {
        if !self.latches.fire(index) {
            return;
        }
        let target = Target::member(Group::Aos, index);
        out.push(Patch::style(target.clone(), "opacity", "1"));
        out.push(Patch::style(target, "transform", "translateY(0)"));
        out.push(Patch::Unobserve {
            group: Group::Aos,
            index,
        });
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.latches.is_triggered(index)
    }
}

/// Milliseconds as a CSS seconds value: 600 → "0.6".
pub fn seconds(ms: u32) -> String {
    format!("{}", f64::from(ms) / 1000.0)
}
