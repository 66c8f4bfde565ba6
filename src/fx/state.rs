//! Page-wide effect state.
//!
//! Uses `thread_local!` + `RefCell` for mutable access in single-threaded
//! WASM. The module stays alive with the page, so state persists across
//! `handle_event` calls until teardown.

use std::cell::RefCell;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info};

use crate::config::FxConfig;
use crate::fx::NodeIds;
use crate::fx::flow::Flow;
use crate::fx::hover::HoverCards;
use crate::fx::images::LazyImages;
use crate::fx::modal::Modal;
use crate::fx::nav::Nav;
use crate::fx::particles::Particles;
use crate::fx::reveal::{Reveal, seconds};
use crate::fx::schedule::{Scheduler, Task};
use crate::fx::scroll::{ScrollFx, ScrollMetrics};
use crate::fx::showcase::Showcase;
use crate::fx::tween::{CounterTween, StatTween, TweenGroup};
use crate::layout::Layout;
use crate::patch::{Group, Patch, Target};
use crate::render;
use crate::selectors;

/// Everything the effects know about the current page.
#[derive(Debug)]
pub struct Page {
    pub config: FxConfig,
    pub clock: Scheduler,
    pub ids: NodeIds,
    pub rng: SmallRng,
    pub booted: bool,
    pub nav: Nav,
    pub reveal: Reveal,
    pub counters: TweenGroup<CounterTween>,
    pub stats: TweenGroup<StatTween>,
    pub showcase: Showcase,
    pub scroll: ScrollFx,
    pub hover: HoverCards,
    pub particles: Particles,
    pub flow: Flow,
    pub modal: Modal,
    pub images: LazyImages,
    pub tech_items: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            config: FxConfig::default(),
            clock: Scheduler::default(),
            ids: NodeIds::default(),
            rng: SmallRng::seed_from_u64(0),
            booted: false,
            nav: Nav::default(),
            reveal: Reveal::default(),
            counters: TweenGroup::default(),
            stats: TweenGroup::default(),
            showcase: Showcase::default(),
            scroll: ScrollFx::default(),
            hover: HoverCards::default(),
            particles: Particles::default(),
            flow: Flow::default(),
            modal: Modal::default(),
            images: LazyImages::default(),
            tech_items: 0,
        }
    }
}

impl Page {
    /// Build every component from the markup snapshot and emit the initial
    /// patches. Booting a booted page tears it down first.
    pub fn boot(&mut self, layout: &Layout, seed: u64, out: &mut Vec<Patch>) {
        if self.booted {
            self.teardown(out);
        }
        let config = &self.config;
        self.rng = SmallRng::seed_from_u64(seed);
        self.nav = Nav::new(layout);
        self.reveal = Reveal::new(layout.aos);
        self.counters = TweenGroup::counters(&layout.counters, config);
        self.stats = TweenGroup::stats(&layout.stats, config);
        self.showcase = Showcase::new(&layout.system_buttons, &layout.body_systems);
        self.scroll = ScrollFx::new(layout.has_hero);
        self.hover = HoverCards::new(layout.hover_cards);
        self.particles = Particles::default();
        self.flow = Flow::new(layout);
        self.modal = Modal::default();
        self.images = LazyImages::new(&layout.lazy_images);
        self.tech_items = layout.tech_items;

        out.push(Patch::InjectStyle {
            css: render::KEYFRAMES.to_string(),
        });
        self.reveal.boot(&self.config.reveal, out);
        self.counters.boot(out);
        self.stats.boot(out);
        self.showcase.boot(out);
        self.scroll.boot(&self.config.scroll, &mut self.ids, out);
        self.flow.boot(&self.config.flow, out);
        self.images.boot(out);
        if self.config.showcase.autoplay {
            self.showcase.start(&self.config.showcase, &mut self.clock);
        }
        self.booted = true;
        info!(
            reveal = layout.aos,
            panels = layout.body_systems.len(),
            flow_cards = layout.flow_cards.len(),
            "showcase page effects loaded"
        );
    }

    /// Window `load`: jump to the top and fade the body in.
    pub fn load(&mut self, out: &mut Vec<Patch>) {
        out.push(Patch::ScrollTo {
            top: 0.0,
            smooth: false,
        });
        let body = Target::first(selectors::BODY);
        out.push(Patch::style(body.clone(), "opacity", "0"));
        out.push(Patch::style(
            body,
            "transition",
            format!("opacity {}s ease", seconds(self.config.page.fade_ms)),
        ));
        self.clock
            .after(self.config.page.fade_delay_ms, Task::BodyFadeIn);
    }

    /// Stop the cycle, drop transient elements and cancel all pending work.
    pub fn teardown(&mut self, out: &mut Vec<Patch>) {
        self.showcase.stop(&mut self.clock);
        self.particles.clear(&mut self.clock, out);
        self.modal.close(out);
        self.scroll.teardown(out);
        self.counters.finish_all(out);
        self.stats.finish_all(out);
        self.clock.clear();
        self.booted = false;
        info!("showcase page effects torn down");
    }

    pub fn on_scroll(&mut self, metrics: ScrollMetrics, out: &mut Vec<Patch>) {
        self.nav.on_scroll(metrics.page_y, &self.config.nav, out);
        self.scroll.on_scroll(metrics, &self.config.scroll, out);
    }

    pub fn visible(&mut self, group: Group, index: usize, out: &mut Vec<Patch>) {
        match group {
            Group::Aos => self.reveal.visible(index, out),
            Group::Counter => self.counters.visible(index, &mut self.clock, out),
            Group::Stat => self.stats.visible(index, &mut self.clock, out),
            Group::ArchCard => {
                self.flow
                    .card_visible(index, &self.config.flow, &mut self.clock, out)
            }
            Group::TechSpecs if index == 0 => {
                self.flow
                    .specs_visible(&self.config.flow, &mut self.clock, out)
            }
            Group::TechSpecs => {}
            Group::ArchIcon => self.flow.icon_visible(index, out),
            Group::LazyImage => self.images.visible(index, out),
        }
    }

    /// Burst of sparkles around tech item `index`.
    pub fn sparkle(&mut self, index: usize, out: &mut Vec<Patch>) {
        if index >= self.tech_items {
            return;
        }
        self.particles.sparkle(
            Target::nth(selectors::TECH_ITEM, index),
            &self.config.sparkles,
            &mut self.rng,
            &mut self.clock,
            &mut self.ids,
            out,
        );
    }

    pub fn open_step(&mut self, card: usize, step: usize, out: &mut Vec<Patch>) {
        if let Some(layout) = self.flow.step(card, step) {
            self.modal.open(layout, &mut self.ids, out);
        }
    }

    pub fn key(&mut self, key: &str, out: &mut Vec<Patch>) {
        if key == "Escape" {
            self.modal.close(out);
        }
    }

    pub fn run_task(&mut self, task: Task, out: &mut Vec<Patch>) {
        debug!(?task, now = self.clock.now(), "task");
        match task {
            Task::PulseEnd { button } => self.showcase.pulse_end(button, out),
            Task::CycleTick => {
                self.showcase
                    .tick(&self.config.showcase, &mut self.clock, out)
            }
            Task::ParticleExpire { node } => self.particles.expire(node, out),
            Task::StepReveal { card, step } => {
                self.flow
                    .step_reveal(card, step, &self.config.flow, &mut self.clock, out)
            }
            Task::ArrowReveal { card, arrow } => {
                self.flow.arrow_reveal(card, arrow, &self.config.flow, out)
            }
            Task::SpecReveal { item } => {
                self.flow
                    .spec_reveal(item, &self.config.flow, &mut self.clock, out)
            }
            Task::DataSparkles { item } => {
                if let Some(within) = self.flow.spec_box(item) {
                    self.particles.data_sparkle(
                        within,
                        &self.config.flow,
                        &mut self.rng,
                        &mut self.clock,
                        &mut self.ids,
                        out,
                    );
                }
            }
            Task::BodyFadeIn => {
                out.push(Patch::style(Target::first(selectors::BODY), "opacity", "1"))
            }
            Task::CounterFrame { index } => self.counters.frame(index, &mut self.clock, out),
            Task::StatFrame { index } => self.stats.frame(index, &mut self.clock, out),
        }
    }

    /// Run every timer that is due, including ones scheduled along the way.
    pub fn fire_due(&mut self, out: &mut Vec<Patch>) {
        while let Some(task) = self.clock.pop_due() {
            self.run_task(task, out);
        }
    }

    /// Run the tasks queued for this animation frame, then any due timers.
    pub fn run_frame(&mut self, out: &mut Vec<Patch>) {
        for task in self.clock.take_frame() {
            self.run_task(task, out);
        }
        self.fire_due(out);
    }
}

thread_local! {
    static PAGE: RefCell<Page> = RefCell::new(Page::default());
}

/// Execute a closure with read access to the page state.
pub fn with_page<F, R>(f: F) -> R
where
    F: FnOnce(&Page) -> R,
{
    PAGE.with(|p| f(&p.borrow()))
}

/// Execute a closure with mutable access to the page state.
pub fn with_page_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut Page) -> R,
{
    PAGE.with(|p| f(&mut p.borrow_mut()))
}

/// Replace the entire page state.
pub fn replace_page(page: Page) {
    PAGE.with(|p| {
        *p.borrow_mut() = page;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{FlowCardLayout, FlowStepLayout};

    fn layout() -> Layout {
        Layout {
            has_hamburger: true,
            has_nav_menu: true,
            has_navbar: true,
            aos: 2,
            counters: vec!["98%".to_string()],
            system_buttons: vec!["skeletal".into(), "muscular".into(), "organs".into()],
            body_systems: vec!["skeletal".into(), "muscular".into(), "organs".into()],
            has_hero: true,
            hover_cards: 3,
            stats: vec!["1,234+".to_string()],
            tech_items: 2,
            flow_cards: vec![FlowCardLayout {
                steps: vec![FlowStepLayout {
                    title: "Intake".into(),
                    description: "Voice capture".into(),
                    icon_html: None,
                }],
                arrows: 0,
            }],
            has_tech_specs: true,
            spec_items: 1,
            arch_icons: 1,
            lazy_images: vec!["/a.png".into()],
            ..Layout::default()
        }
    }

    fn booted() -> Page {
        let mut page = Page::default();
        let mut out = Vec::new();
        page.boot(&layout(), 7, &mut out);
        page
    }

    #[test]
    fn boot_injects_styles_and_starts_cycle() {
        let mut page = Page::default();
        let mut out = Vec::new();
        page.boot(&layout(), 7, &mut out);
        assert!(matches!(out[0], Patch::InjectStyle { .. }));
        assert!(page.booted);
        assert!(page.showcase.is_cycling());
        assert!(page.scroll.progress_node().is_some());
        let observed = out
            .iter()
            .filter(|p| matches!(p, Patch::Observe { .. }))
            .count();
        assert_eq!(observed, 7);
    }

    #[test]
    fn autoplay_off_leaves_cycle_stopped() {
        let mut page = Page::default();
        page.config.showcase.autoplay = false;
        page.boot(&layout(), 1, &mut Vec::new());
        assert!(!page.showcase.is_cycling());
    }

    #[test]
    fn load_fades_body_in_after_delay() {
        let mut page = booted();
        let mut out = Vec::new();
        page.load(&mut out);
        assert_eq!(out[0], Patch::ScrollTo { top: 0.0, smooth: false });
        assert!(out.contains(&Patch::style(
            Target::first("body"),
            "transition",
            "opacity 0.5s ease"
        )));

        out.clear();
        page.clock.advance_to(100.0);
        page.fire_due(&mut out);
        assert_eq!(out, vec![Patch::style(Target::first("body"), "opacity", "1")]);
    }

    #[test]
    fn teardown_leaves_nothing_behind() {
        let mut page = booted();
        let mut out = Vec::new();
        page.sparkle(0, &mut out);
        page.open_step(0, 0, &mut out);
        assert_eq!(page.particles.live(), 8);
        assert!(page.modal.is_open());

        out.clear();
        page.teardown(&mut out);
        assert_eq!(page.particles.live(), 0);
        assert!(!page.modal.is_open());
        assert!(!page.showcase.is_cycling());
        assert_eq!(page.clock.pending_timers(), 0);
        assert_eq!(page.clock.pending_frames(), 0);
        // 8 particles, the modal and the progress bar.
        assert_eq!(out.len(), 10);
    }

    #[test]
    fn teardown_mid_tween_restores_literal_text() {
        let mut page = booted();
        let mut out = Vec::new();
        page.visible(Group::Counter, 0, &mut out);
        page.visible(Group::Stat, 0, &mut out);
        for _ in 0..5 {
            page.run_frame(&mut out);
        }
        assert!(page.counters.is_running(0));

        out.clear();
        page.teardown(&mut out);
        assert!(out.contains(&Patch::text(Target::member(Group::Counter, 0), "98%")));
        assert!(out.contains(&Patch::text(Target::member(Group::Stat, 0), "1,234+")));
        assert!(!page.counters.is_running(0));
        assert!(!page.stats.is_running(0));
    }

    #[test]
    fn reboot_tears_down_first() {
        let mut page = booted();
        let first_bar = page.scroll.progress_node();
        let mut out = Vec::new();
        page.boot(&layout(), 9, &mut out);
        assert!(out.contains(&Patch::Remove {
            node: first_bar.unwrap()
        }));
        assert_eq!(page.clock.pending_timers(), 1);
    }

    #[test]
    fn escape_closes_modal_only() {
        let mut page = booted();
        let mut out = Vec::new();
        page.open_step(0, 0, &mut out);
        out.clear();
        page.key("Enter", &mut out);
        assert!(out.is_empty());
        page.key("Escape", &mut out);
        assert_eq!(out.len(), 1);
        assert!(!page.modal.is_open());
        assert!(page.scroll.progress_node().is_some());
    }

    #[test]
    fn stat_runs_to_exact_literal() {
        let mut page = booted();
        let mut out = Vec::new();
        page.visible(Group::Stat, 0, &mut out);
        for _ in 0..100 {
            page.run_frame(&mut out);
        }
        let texts: Vec<&str> = out
            .iter()
            .filter_map(|p| match p {
                Patch::SetText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts.last(), Some(&"1,234+"));
        assert!(!texts.contains(&"1234"));
        assert!(!texts.contains(&"1,233+"));
    }

    #[test]
    fn sparkle_ignores_unknown_item() {
        let mut page = booted();
        let mut out = Vec::new();
        page.sparkle(5, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn data_sparkles_follow_spec_reveal() {
        let mut page = booted();
        page.showcase.stop(&mut page.clock);
        let mut out = Vec::new();
        page.visible(Group::TechSpecs, 0, &mut out);
        page.clock.advance_to(400.0);
        page.fire_due(&mut out);
        assert_eq!(page.particles.live(), 5);
        page.clock.advance_to(2400.0);
        page.fire_due(&mut out);
        assert_eq!(page.particles.live(), 0);
    }

    #[test]
    fn thread_local_page_is_replaceable() {
        replace_page(booted());
        assert!(with_page(|p| p.booted));
        with_page_mut(|p| p.teardown(&mut Vec::new()));
        assert!(!with_page(|p| p.booted));
        replace_page(Page::default());
    }
}
