//! Architecture diagram: staggered step/arrow reveal, hover emphasis, the
//! tech-spec cascade and the progressive icon reveal.

use tracing::debug;

use crate::config::FlowConfig;
use crate::fx::latch::{Latch, Latches};
use crate::fx::reveal::seconds;
use crate::fx::schedule::{Scheduler, Task};
use crate::layout::{FlowCardLayout, FlowStepLayout, Layout};
use crate::patch::{Group, Patch, Target};
use crate::selectors;

/// How a step looks while some step of its card is hovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// At or before the hovered step.
    Lit,
    /// After the hovered step.
    Dimmed,
}

/// Emphasis of every step of a `count`-step card while step `hovered` is
/// under the pointer.
pub fn emphasis(count: usize, hovered: usize) -> Vec<Emphasis> {
    (0..count)
        .map(|i| {
            if i <= hovered {
                Emphasis::Lit
            } else {
                Emphasis::Dimmed
            }
        })
        .collect()
}

#[derive(Debug, Default)]
struct Card {
    layout: FlowCardLayout,
    latch: Latch,
    hovered: Option<usize>,
}

#[derive(Debug, Default)]
pub struct Flow {
    cards: Vec<Card>,
    has_specs: bool,
    specs: Latch,
    spec_items: usize,
    icons: Latches,
}

fn step_target(card: usize, step: usize) -> Target {
    Target::member(Group::ArchCard, card).within(selectors::FLOW_STEP, step)
}

fn arrow_target(card: usize, arrow: usize) -> Target {
    Target::member(Group::ArchCard, card).within(selectors::FLOW_ARROW, arrow)
}

fn spec_target(item: usize) -> Target {
    Target::nth(selectors::SPEC_ITEM, item)
}

impl Flow {
    pub fn new(layout: &Layout) -> Self {
        Self {
            cards: layout
                .flow_cards
                .iter()
                .map(|c| Card {
                    layout: c.clone(),
                    ..Card::default()
                })
                .collect(),
            has_specs: layout.has_tech_specs,
            specs: Latch::default(),
            spec_items: layout.spec_items,
            icons: Latches::new(layout.arch_icons),
        }
    }

    pub fn step(&self, card: usize, step: usize) -> Option<&FlowStepLayout> {
        self.cards.get(card)?.layout.steps.get(step)
    }

    pub fn hovered(&self, card: usize) -> Option<usize> {
        self.cards.get(card)?.hovered
    }

    pub fn boot(&self, config: &FlowConfig, out: &mut Vec<Patch>) {
        for (c, card) in self.cards.iter().enumerate() {
            for s in 0..card.layout.steps.len() {
                out.push(Patch::style(step_target(c, s), "opacity", "0"));
                out.push(Patch::style(step_target(c, s), "transform", "translateY(30px)"));
            }
            for a in 0..card.layout.arrows {
                out.push(Patch::style(arrow_target(c, a), "opacity", "0"));
                out.push(Patch::style(arrow_target(c, a), "transform", "scale(0.5)"));
            }
        }
        if !self.cards.is_empty() {
            out.push(Patch::Observe {
                group: Group::ArchCard,
                threshold: config.card_threshold,
                root_margin: "0px".to_string(),
            });
        }
        if self.has_specs {
            out.push(Patch::Observe {
                group: Group::TechSpecs,
                threshold: config.spec_threshold,
                root_margin: "0px".to_string(),
            });
        }
        if !self.icons.is_empty() {
            out.push(Patch::Observe {
                group: Group::ArchIcon,
                threshold: config.icon_threshold,
                root_margin: "0px".to_string(),
            });
        }
    }

    /// First visibility of a card schedules its step reveals.
    pub fn card_visible(
        &mut self,
        card: usize,
        config: &FlowConfig,
        clock: &mut Scheduler,
        out: &mut Vec<Patch>,
    ) {
        let Some(c) = self.cards.get_mut(card) else {
            return;
        };
        if !c.latch.fire() {
            return;
        }
        out.push(Patch::Unobserve {
            group: Group::ArchCard,
            index: card,
        });
        let steps = c.layout.steps.len();
        debug!(card, steps, "architecture card revealed");
        for step in 0..steps {
            let delay = u32::try_from(step)
                .unwrap_or(u32::MAX)
                .saturating_mul(config.step_stagger_ms);
            clock.after(delay, Task::StepReveal { card, step });
        }
    }

    pub fn step_reveal(
        &self,
        card: usize,
        step: usize,
        config: &FlowConfig,
        clock: &mut Scheduler,
        out: &mut Vec<Patch>,
    ) {
        let Some(c) = self.cards.get(card) else {
            return;
        };
        let Some(layout) = c.layout.steps.get(step) else {
            return;
        };
        let target = step_target(card, step);
        out.push(Patch::style(
            target.clone(),
            "transition",
            format!("all {}s ease", seconds(config.step_ms)),
        ));
        out.push(Patch::style(target.clone(), "opacity", "1"));
        out.push(Patch::style(target.clone(), "transform", "translateY(0)"));
        if layout.icon_html.is_some() {
            out.push(Patch::style(
                target.within(selectors::STEP_ICON, 0),
                "animation",
                format!("pulse {}s ease", seconds(config.step_ms)),
            ));
        }
        if step < c.layout.arrows {
            clock.after(
                config.arrow_delay_ms,
                Task::ArrowReveal { card, arrow: step },
            );
        }
    }

    pub fn arrow_reveal(&self, card: usize, arrow: usize, config: &FlowConfig, out: &mut Vec<Patch>) {
        if self.cards.get(card).is_none_or(|c| arrow >= c.layout.arrows) {
            return;
        }
        let target = arrow_target(card, arrow);
        out.push(Patch::style(
            target.clone(),
            "transition",
            format!("all {}s ease", seconds(config.arrow_ms)),
        ));
        out.push(Patch::style(target.clone(), "opacity", "1"));
        out.push(Patch::style(target, "transform", "scale(1)"));
    }

    pub fn hover_enter(&mut self, card: usize, step: usize, out: &mut Vec<Patch>) {
        let Some(c) = self.cards.get_mut(card) else {
            return;
        };
        let count = c.layout.steps.len();
        if step >= count {
            return;
        }
        c.hovered = Some(step);
        for (i, e) in emphasis(count, step).into_iter().enumerate() {
            let target = step_target(card, i);
            match e {
                Emphasis::Lit => {
                    out.push(Patch::style(target.clone(), "filter", "brightness(1.1)"));
                    out.push(Patch::style(target, "transform", "translateY(-5px) scale(1.02)"));
                }
                Emphasis::Dimmed => {
                    out.push(Patch::style(target, "filter", "brightness(0.8)"));
                }
            }
        }
    }

    pub fn hover_leave(&mut self, card: usize, out: &mut Vec<Patch>) {
        let Some(c) = self.cards.get_mut(card) else {
            return;
        };
        c.hovered = None;
        for i in 0..c.layout.steps.len() {
            out.push(Patch::style(step_target(card, i), "filter", ""));
            out.push(Patch::style(step_target(card, i), "transform", ""));
        }
    }

    /// First visibility of the tech-spec container hides its items and schedules
    /// their cascade.
    pub fn specs_visible(&mut self, config: &FlowConfig, clock: &mut Scheduler, out: &mut Vec<Patch>) {
        if !self.has_specs || !self.specs.fire() {
            return;
        }
        out.push(Patch::Unobserve {
            group: Group::TechSpecs,
            index: 0,
        });
        for item in 0..self.spec_items {
            out.push(Patch::style(spec_target(item), "opacity", "0"));
            out.push(Patch::style(
                spec_target(item),
                "transform",
                "translateY(30px) rotateY(-10deg)",
            ));
            let delay = u32::try_from(item)
                .unwrap_or(u32::MAX)
                .saturating_mul(config.spec_stagger_ms);
            clock.after(delay, Task::SpecReveal { item });
        }
    }

    pub fn spec_reveal(&self, item: usize, config: &FlowConfig, clock: &mut Scheduler, out: &mut Vec<Patch>) {
        if item >= self.spec_items {
            return;
        }
        let target = spec_target(item);
        out.push(Patch::style(
            target.clone(),
            "transition",
            format!("all {}s ease", seconds(config.spec_ms)),
        ));
        out.push(Patch::style(target.clone(), "opacity", "1"));
        out.push(Patch::style(target, "transform", "translateY(0) rotateY(0deg)"));
        clock.after(config.data_sparkle_delay_ms, Task::DataSparkles { item });
    }

    /// Box the data sparkles of tech-spec item `item` appear in.
    pub fn spec_box(&self, item: usize) -> Option<Target> {
        (item < self.spec_items).then(|| spec_target(item))
    }

    pub fn icon_visible(&mut self, index: usize, out: &mut Vec<Patch>) {
        if !self.icons.fire(index) {
            return;
        }
        out.push(Patch::style(
            Target::member(Group::ArchIcon, index),
            "animation",
            "iconReveal 1s ease forwards",
        ));
        out.push(Patch::Unobserve {
            group: Group::ArchIcon,
            index,
        });
    }
}
