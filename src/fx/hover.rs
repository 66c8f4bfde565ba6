//! Lift-on-hover for card-like elements.

use crate::patch::{Patch, Target};
use crate::selectors;

const LIFTED: &str = "translateY(-10px) scale(1.02)";

#[derive(Debug, Default)]
pub struct HoverCards {
    lifted: Vec<bool>,
}

impl HoverCards {
    pub fn new(count: usize) -> Self {
        Self {
            lifted: vec![false; count],
        }
    }

    pub fn enter(&mut self, index: usize, out: &mut Vec<Patch>) {
        self.set(index, true, out);
    }

    pub fn leave(&mut self, index: usize, out: &mut Vec<Patch>) {
        self.set(index, false, out);
    }

    pub fn is_lifted(&self, index: usize) -> bool {
        self.lifted.get(index).copied().unwrap_or(false)
    }

    fn set(&mut self, index: usize, lifted: bool, out: &mut Vec<Patch>) {
        let Some(slot) = self.lifted.get_mut(index) else {
            return;
        };
        *slot = lifted;
        out.push(Patch::style(
            Target::nth(selectors::HOVER_CARD, index),
            "transform",
            if lifted { LIFTED } else { "" },
        ));
    }
}
