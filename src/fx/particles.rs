//! Ephemeral sparkle particles.
//!
//! Every particle is created with an expiry timer and tracked until it is
//! removed, either by that timer or by `clear` at teardown, so none outlive
//! their lifetime.

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use rand::Rng;

use crate::config::{FlowConfig, SparkleConfig};
use crate::fx::NodeIds;
use crate::fx::reveal::seconds;
use crate::fx::schedule::{Scheduler, Task, TimerId};
use crate::patch::{Anchor, NodeId, Patch, Target};

/// End offsets of a radial burst: particle `i` flies along angle
/// `i / count * 2π` for a random distance in `[min_radius, max_radius)`.
pub fn burst_offsets<R: Rng + ?Sized>(
    count: u32,
    min_radius: f64,
    max_radius: f64,
    rng: &mut R,
) -> Vec<(f64, f64)> {
    (0..count)
        .map(|i| {
            let angle = f64::from(i) / f64::from(count) * TAU;
            let distance = if max_radius > min_radius {
                rng.gen_range(min_radius..max_radius)
            } else {
                min_radius
            };
            (angle.cos() * distance, angle.sin() * distance)
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct Particles {
    live: BTreeMap<NodeId, TimerId>,
}

impl Particles {
    pub fn live(&self) -> usize {
        self.live.len()
    }

    /// Radial burst from the center of `around`.
    pub fn sparkle<R: Rng + ?Sized>(
        &mut self,
        around: Target,
        config: &SparkleConfig,
        rng: &mut R,
        clock: &mut Scheduler,
        ids: &mut NodeIds,
        out: &mut Vec<Patch>,
    ) {
        let offsets = burst_offsets(config.count, config.min_radius, config.max_radius, rng);
        for (dx, dy) in offsets {
            let style = format!(
                "position: fixed; width: 8px; height: 8px; background: #ffd700; \
                 border-radius: 50%; pointer-events: none; z-index: 1000; \
                 animation: sparkle {}s ease-out forwards; --end-x: {}px; --end-y: {}px;",
                seconds(config.lifetime_ms),
                dx,
                dy
            );
            let anchor = Anchor {
                target: around.clone(),
                fx: 0.5,
                fy: 0.5,
            };
            self.spawn(style, anchor, config.lifetime_ms, clock, ids, out);
        }
    }

    /// Upward-drifting particles at random spots inside `within`.
    pub fn data_sparkle<R: Rng + ?Sized>(
        &mut self,
        within: Target,
        config: &FlowConfig,
        rng: &mut R,
        clock: &mut Scheduler,
        ids: &mut NodeIds,
        out: &mut Vec<Patch>,
    ) {
        for _ in 0..config.data_sparkle_count {
            let style = format!(
                "position: fixed; width: 6px; height: 6px; background: #06b6d4; \
                 border-radius: 50%; pointer-events: none; z-index: 1000; \
                 animation: dataSparkle {}s ease-out forwards;",
                seconds(config.data_sparkle_lifetime_ms)
            );
            let anchor = Anchor {
                target: within.clone(),
                fx: rng.r#gen::<f64>(),
                fy: rng.r#gen::<f64>(),
            };
            self.spawn(
                style,
                anchor,
                config.data_sparkle_lifetime_ms,
                clock,
                ids,
                out,
            );
        }
    }

    fn spawn(
        &mut self,
        style: String,
        anchor: Anchor,
        lifetime_ms: u32,
        clock: &mut Scheduler,
        ids: &mut NodeIds,
        out: &mut Vec<Patch>,
    ) {
        let node = ids.next();
        let timer = clock.after(lifetime_ms, Task::ParticleExpire { node });
        self.live.insert(node, timer);
        out.push(Patch::Create {
            node,
            style,
            html: String::new(),
            anchor: Some(anchor),
        });
    }

    pub fn expire(&mut self, node: NodeId, out: &mut Vec<Patch>) {
        if self.live.remove(&node).is_some() {
            out.push(Patch::Remove { node });
        }
    }

    /// Remove every live particle now and cancel their timers.
    pub fn clear(&mut self, clock: &mut Scheduler, out: &mut Vec<Patch>) {
        for (node, timer) in std::mem::take(&mut self.live) {
            clock.cancel(timer);
            out.push(Patch::Remove { node });
        }
    }
}
