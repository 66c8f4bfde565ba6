//! Frame-stepped number tweens for dashboard counters and summary stats.
//!
//! Both kinds start on first visibility, advance one increment per animation
//! frame, never decrease, and finish by restoring the exact original text.

use crate::config::FxConfig;
use crate::fx::latch::Latches;
use crate::fx::schedule::{Scheduler, Task};
use crate::patch::{Group, Patch, Target};

/// Outcome of advancing a tween by one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Show this text and ask for another frame.
    Continue(String),
    /// Show this text; the tween is finished.
    Done(String),
}

pub trait Tween {
    fn advance(&mut self) -> Frame;

    /// The literal text the element ends on.
    fn original(&self) -> &str;
}

/// Dashboard value such as `98%` or `1200`.
#[derive(Debug, Clone)]
pub struct CounterTween {
    target: u64,
    increment: f64,
    current: f64,
    percent: bool,
    original: String,
}

impl CounterTween {
    /// Parse the digits of `text` as the target. Text without digits (or with
    /// more digits than fit a `u64`) yields `None`.
    pub fn parse(text: &str, steps: u32) -> Option<Self> {
        let target = digits_of(text)?;
        Some(Self {
            target,
            increment: target as f64 / f64::from(steps.max(1)),
            current: 0.0,
            percent: text.contains('%'),
            original: text.to_string(),
        })
    }
}

impl Tween for CounterTween {
    fn advance(&mut self) -> Frame {
        let target = self.target as f64;
        if self.current < target {
            self.current += self.increment;
            let shown = (self.current.ceil() as u64).min(self.target);
            let text = if self.percent {
                format!("{}%", shown)
            } else {
                shown.to_string()
            };
            Frame::Continue(text)
        } else {
            Frame::Done(self.original.clone())
        }
    }

    fn original(&self) -> &str {
        &self.original
    }
}

/// Summary stat such as `1,234+` or `50K users`.
#[derive(Debug, Clone)]
pub struct StatTween {
    target: u64,
    frame: u32,
    steps: u32,
    suffix: String,
    original: String,
}

impl StatTween {
    pub fn parse(text: &str, steps: u32) -> Option<Self> {
        let target = digits_of(text)?;
        let suffix = text
            .chars()
            .filter(|c| !c.is_ascii_digit() && *c != ',')
            .collect();
        Some(Self {
            target,
            frame: 0,
            steps: steps.max(1),
            suffix,
            original: text.to_string(),
        })
    }
}

impl Tween for StatTween {
    /// Frame `k` shows `floor(target * k / steps)`, computed in integers so
    /// the value before completion can never round up to the target.
    fn advance(&mut self) -> Frame {
        self.frame = self.frame.saturating_add(1);
        if self.frame < self.steps {
            let shown = u128::from(self.target) * u128::from(self.frame) / u128::from(self.steps);
            let shown = u64::try_from(shown).unwrap_or(self.target);
            Frame::Continue(format!("{}{}", group_thousands(shown), self.suffix))
        } else {
            Frame::Done(self.original.clone())
        }
    }

    fn original(&self) -> &str {
        &self.original
    }
}

fn digits_of(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Format with comma thousands separators: 1234567 → "1,234,567".
pub fn group_thousands(n: u64) -> String {
    let raw = n.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, c) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// The tweens of one observed group plus their one-shot latches.
#[derive(Debug)]
pub struct TweenGroup<T> {
    group: Group,
    latches: Latches,
    tweens: Vec<Option<T>>,
}

impl<T> Default for TweenGroup<T> {
    fn default() -> Self {
        Self {
            group: Group::Counter,
            latches: Latches::default(),
            tweens: Vec::new(),
        }
    }
}

impl TweenGroup<CounterTween> {
    pub fn counters(texts: &[String], config: &FxConfig) -> Self {
        let steps = config.reveal.counter_steps;
        Self::new(
            Group::Counter,
            texts.iter().map(|t| CounterTween::parse(t, steps)).collect(),
        )
    }
}

impl TweenGroup<StatTween> {
    pub fn stats(texts: &[String], config: &FxConfig) -> Self {
        let steps = config.stats.steps;
        Self::new(
            Group::Stat,
            texts.iter().map(|t| StatTween::parse(t, steps)).collect(),
        )
    }
}

impl<T: Tween> TweenGroup<T> {
    pub fn new(group: Group, tweens: Vec<Option<T>>) -> Self {
        Self {
            group,
            latches: Latches::new(tweens.len()),
            tweens,
        }
    }

    /// Observe with the browser's default options (any pixel visible).
    pub fn boot(&self, out: &mut Vec<Patch>) {
        if self.tweens.is_empty() {
            return;
        }
        out.push(Patch::Observe {
            group: self.group,
            threshold: 0.0,
            root_margin: "0px".to_string(),
        });
    }

    /// First visibility starts the tween with an immediate first frame.
    pub fn visible(&mut self, index: usize, clock: &mut Scheduler, out: &mut Vec<Patch>) {
        if !self.latches.fire(index) {
            return;
        }
        out.push(Patch::Unobserve {
            group: self.group,
            index,
        });
        self.frame(index, clock, out);
    }

    pub fn frame(&mut self, index: usize, clock: &mut Scheduler, out: &mut Vec<Patch>) {
        let Some(slot) = self.tweens.get_mut(index) else {
            return;
        };
        let Some(tween) = slot.as_mut() else {
            return;
        };
        let target = Target::member(self.group, index);
        match tween.advance() {
            Frame::Continue(text) => {
                out.push(Patch::text(target, text));
                clock.next_frame(frame_task(self.group, index));
            }
            Frame::Done(text) => {
                out.push(Patch::text(target, text));
                *slot = None;
            }
        }
    }

    /// Jump every running tween to its literal text and drop it.
    pub fn finish_all(&mut self, out: &mut Vec<Patch>) {
        for index in 0..self.tweens.len() {
            if !self.is_running(index) {
                continue;
            }
            if let Some(tween) = self.tweens[index].take() {
                out.push(Patch::text(
                    Target::member(self.group, index),
                    tween.original(),
                ));
            }
        }
    }

    pub fn is_running(&self, index: usize) -> bool {
        self.latches.is_triggered(index) && self.tweens.get(index).is_some_and(Option::is_some)
    }
}

fn frame_task(group: Group, index: usize) -> Task {
    match group {
        Group::Stat => Task::StatFrame { index },
        _ => Task::CounterFrame { index },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run<T: Tween>(mut tween: T) -> Vec<Frame> {
        let mut frames = Vec::new();
        for _ in 0..10_000 {
            let f = tween.advance();
            let done = matches!(f, Frame::Done(_));
            frames.push(f);
            if done {
                return frames;
            }
        }
        panic!("tween never finished");
    }

    fn numeric(text: &str) -> u64 {
        text.chars()
            .filter(char::is_ascii_digit)
            .collect::<String>()
            .parse()
            .unwrap()
    }

    #[test]
    fn group_thousands_formats() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn counter_keeps_percent_suffix() {
        let frames = run(CounterTween::parse("98%", 50).unwrap());
        for f in &frames {
            let (Frame::Continue(t) | Frame::Done(t)) = f;
            assert!(t.ends_with('%'), "{t}");
        }
        assert_eq!(frames.last(), Some(&Frame::Done("98%".to_string())));
    }

    #[test]
    fn counter_is_monotonic_and_ends_on_original() {
        let frames = run(CounterTween::parse("1200", 50).unwrap());
        let mut last = 0;
        for f in &frames {
            if let Frame::Continue(t) = f {
                let v = numeric(t);
                assert!(v >= last && v <= 1200);
                last = v;
            }
        }
        assert_eq!(frames.last(), Some(&Frame::Done("1200".to_string())));
        assert!((50..=52).contains(&frames.len()));
    }

    #[test]
    fn counter_without_digits_is_skipped() {
        assert!(CounterTween::parse("N/A", 50).is_none());
    }

    #[test]
    fn stat_restores_grouped_literal() {
        let frames = run(StatTween::parse("1,234+", 60).unwrap());
        let mut last = 0;
        for f in &frames[..frames.len() - 1] {
            let Frame::Continue(t) = f else { panic!() };
            assert!(t.ends_with('+'));
            let v = numeric(t);
            assert!(v >= last && v < 1234);
            last = v;
        }
        assert_eq!(frames.last(), Some(&Frame::Done("1,234+".to_string())));
        assert_eq!(frames.len(), 60);
        assert!(!frames.contains(&Frame::Continue("1,233+".to_string())));
    }

    #[test]
    fn stat_suffix_drops_digits_and_commas() {
        let mut t = StatTween::parse("50K users", 60).unwrap();
        let Frame::Continue(text) = t.advance() else { panic!() };
        assert!(text.ends_with("K users"));
        assert!(StatTween::parse("∞", 60).is_none());
    }

    #[test]
    fn group_runs_once_per_element() {
        let mut group = TweenGroup::new(
            Group::Stat,
            vec![StatTween::parse("120", 60), StatTween::parse("abc", 60)],
        );
        let mut clock = Scheduler::default();
        let mut out = Vec::new();

        group.visible(0, &mut clock, &mut out);
        assert!(group.is_running(0));
        assert_eq!(clock.pending_frames(), 1);
        assert!(matches!(out[0], Patch::Unobserve { index: 0, .. }));
        assert!(matches!(out[1], Patch::SetText { .. }));

        out.clear();
        group.visible(0, &mut clock, &mut out);
        assert!(out.is_empty());

        // Digit-free text unobserves but never animates.
        group.visible(1, &mut clock, &mut out);
        assert_eq!(out.len(), 1);
        assert!(!group.is_running(1));
    }

    #[test]
    fn finish_all_restores_running_tweens_only() {
        let mut group = TweenGroup::new(
            Group::Counter,
            vec![CounterTween::parse("98%", 50), CounterTween::parse("1200", 50)],
        );
        let mut clock = Scheduler::default();
        let mut out = Vec::new();
        group.visible(0, &mut clock, &mut out);
        for _ in 0..4 {
            group.frame(0, &mut clock, &mut out);
        }

        out.clear();
        group.finish_all(&mut out);
        assert_eq!(
            out,
            vec![Patch::text(Target::member(Group::Counter, 0), "98%")]
        );
        assert!(!group.is_running(0));

        out.clear();
        group.frame(0, &mut clock, &mut out);
        group.finish_all(&mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn group_frames_until_done() {
        let mut group = TweenGroup::new(Group::Counter, vec![CounterTween::parse("10", 5)]);
        let mut clock = Scheduler::default();
        let mut out = Vec::new();
        group.visible(0, &mut clock, &mut out);
        while !clock.take_frame().is_empty() {
            group.frame(0, &mut clock, &mut out);
        }
        assert_eq!(
            out.last(),
            Some(&Patch::text(Target::member(Group::Counter, 0), "10"))
        );
        assert!(!group.is_running(0));
    }
}
