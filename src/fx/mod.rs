//! Page effect state machines.
//!
//! Each component owns its own state and turns events into `Patch` lists.
//! `state` holds the page-wide container that ties them together for the
//! lifetime of the page.

pub mod flow;
pub mod hover;
pub mod images;
pub mod latch;
pub mod modal;
pub mod nav;
pub mod particles;
pub mod reveal;
pub mod schedule;
pub mod scroll;
pub mod showcase;
pub mod state;
pub mod tween;

use crate::patch::NodeId;

/// Allocator for `NodeId`s of elements the crate creates.
#[derive(Debug, Default)]
pub struct NodeIds(NodeId);

impl NodeIds {
    pub fn next(&mut self) -> NodeId {
        let id = self.0;
        self.0 = self.0.wrapping_add(1);
        id
    }
}
