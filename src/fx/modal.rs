//! Step detail modal. At most one is open at a time.

use tracing::debug;

use crate::fx::NodeIds;
use crate::layout::FlowStepLayout;
use crate::patch::{NodeId, Patch};
use crate::render;

#[derive(Debug, Default)]
pub struct Modal {
    open: Option<NodeId>,
}

impl Modal {
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn node(&self) -> Option<NodeId> {
        self.open
    }

    /// Open a modal for `step`, replacing any modal already open.
    pub fn open(&mut self, step: &FlowStepLayout, ids: &mut NodeIds, out: &mut Vec<Patch>) {
        self.close(out);
        let node = ids.next();
        self.open = Some(node);
        debug!(node, title = %step.title, "modal opened");
        out.push(Patch::Create {
            node,
            style: render::MODAL_OVERLAY_STYLE.to_string(),
            html: render::step_modal(step),
            anchor: None,
        });
    }

    /// Returns false when nothing was open.
    pub fn close(&mut self, out: &mut Vec<Patch>) -> bool {
        match self.open.take() {
            Some(node) => {
                out.push(Patch::Remove { node });
                true
            }
            None => false,
        }
    }
}
