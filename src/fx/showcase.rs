//! Body-system showcase: exactly one of a fixed set of panels is active,
//! switched by button clicks and by a recurring cycle timer.
//!
//! Manual selection and the cycle share the same `active` state and the same
//! activation path. A click does not pause or reset the cycle, so the next
//! tick may override it within one period.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ShowcaseConfig;
use crate::fx::schedule::{Scheduler, Task, TimerId};
use crate::patch::{Patch, Target};
use crate::selectors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemPanel {
    Skeletal,
    Muscular,
    Organs,
}

impl SystemPanel {
    /// Cycle order.
    pub const ALL: [SystemPanel; 3] = [
        SystemPanel::Skeletal,
        SystemPanel::Muscular,
        SystemPanel::Organs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SystemPanel::Skeletal => "skeletal",
            SystemPanel::Muscular => "muscular",
            SystemPanel::Organs => "organs",
        }
    }

    pub fn parse(s: &str) -> Option<SystemPanel> {
        SystemPanel::ALL.into_iter().find(|p| p.as_str() == s)
    }

    pub fn next(self) -> SystemPanel {
        let i = SystemPanel::ALL.iter().position(|p| *p == self).unwrap_or(0);
        SystemPanel::ALL[(i + 1) % SystemPanel::ALL.len()]
    }
}

#[derive(Debug)]
pub struct Showcase {
    active: SystemPanel,
    /// Which button carries `active`; a click picks the clicked one, a tick
    /// the first button targeting the panel.
    active_button: Option<usize>,
    buttons: Vec<Option<SystemPanel>>,
    panels: Vec<Option<SystemPanel>>,
    cycle: Option<TimerId>,
    pulses: Vec<Option<TimerId>>,
}

impl Default for Showcase {
    fn default() -> Self {
        Self {
            active: SystemPanel::Skeletal,
            active_button: None,
            buttons: Vec::new(),
            panels: Vec::new(),
            cycle: None,
            pulses: Vec::new(),
        }
    }
}

impl Showcase {
    pub fn new(buttons: &[String], panels: &[String]) -> Self {
        Self {
            buttons: buttons.iter().map(|b| SystemPanel::parse(b)).collect(),
            panels: panels.iter().map(|p| SystemPanel::parse(p)).collect(),
            pulses: vec![None; buttons.len()],
            ..Self::default()
        }
    }

    pub fn active(&self) -> SystemPanel {
        self.active
    }

    pub fn active_button(&self) -> Option<usize> {
        self.active_button
    }

    pub fn is_cycling(&self) -> bool {
        self.cycle.is_some()
    }

    fn has_elements(&self) -> bool {
        !self.buttons.is_empty() || !self.panels.is_empty()
    }

    /// Render the initial panel so markup and state agree.
    pub fn boot(&mut self, out: &mut Vec<Patch>) {
        if self.has_elements() {
            self.activate(self.active, None, out);
        }
    }

    /// Handle a click on button `index`: activate its panel and pulse it.
    /// Buttons with an unknown `data-target` only pulse.
    pub fn select(
        &mut self,
        index: usize,
        config: &ShowcaseConfig,
        clock: &mut Scheduler,
        out: &mut Vec<Patch>,
    ) {
        let Some(target) = self.buttons.get(index).copied() else {
            return;
        };
        if let Some(panel) = target {
            self.activate(panel, Some(index), out);
        }

        let button = Target::nth(selectors::SYSTEM_BUTTON, index);
        out.push(Patch::style(button, "transform", "scale(0.95)"));
        if let Some(Some(pending)) = self.pulses.get(index) {
            clock.cancel(*pending);
        }
        let id = clock.after(config.pulse_ms, Task::PulseEnd { button: index });
        if let Some(slot) = self.pulses.get_mut(index) {
            *slot = Some(id);
        }
    }

    pub fn pulse_end(&mut self, button: usize, out: &mut Vec<Patch>) {
        if let Some(slot) = self.pulses.get_mut(button) {
            *slot = None;
        }
        out.push(Patch::style(
            Target::nth(selectors::SYSTEM_BUTTON, button),
            "transform",
            "",
        ));
    }

    /// Start the recurring cycle. Starting a running cycle does nothing.
    pub fn start(&mut self, config: &ShowcaseConfig, clock: &mut Scheduler) {
        if self.cycle.is_none() && self.has_elements() {
            self.cycle = Some(clock.after(config.cycle_ms, Task::CycleTick));
            debug!(period_ms = config.cycle_ms, "showcase cycle started");
        }
    }

    pub fn stop(&mut self, clock: &mut Scheduler) {
        if let Some(id) = self.cycle.take() {
            clock.cancel(id);
            debug!("showcase cycle stopped");
        }
    }

    /// Advance to the next panel and schedule the following tick.
    pub fn tick(&mut self, config: &ShowcaseConfig, clock: &mut Scheduler, out: &mut Vec<Patch>) {
        if self.cycle.is_none() {
            return;
        }
        self.activate(self.active.next(), None, out);
        self.cycle = Some(clock.after(config.cycle_ms, Task::CycleTick));
    }

    /// Mutual-exclusion activation: every button and panel is re-rendered,
    /// and at most one of each ends up `active`.
    fn activate(&mut self, panel: SystemPanel, button: Option<usize>, out: &mut Vec<Patch>) {
        debug_assert!(button.map_or(true, |b| b < self.buttons.len()));
        self.active = panel;
        self.active_button =
            button.or_else(|| self.buttons.iter().position(|b| *b == Some(panel)));
        let active_panel = self.panels.iter().position(|p| *p == Some(panel));

        for i in 0..self.buttons.len() {
            out.push(active_class(
                Target::nth(selectors::SYSTEM_BUTTON, i),
                self.active_button == Some(i),
            ));
        }
        for i in 0..self.panels.len() {
            out.push(active_class(
                Target::nth(selectors::BODY_SYSTEM, i),
                active_panel == Some(i),
            ));
        }
    }
}

fn active_class(target: Target, on: bool) -> Patch {
    if on {
        Patch::add_class(target, selectors::ACTIVE)
    } else {
        Patch::remove_class(target, selectors::ACTIVE)
    }
}
