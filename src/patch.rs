//! Declarative DOM mutations.
//!
//! The core never touches the document. Every handler returns a list of
//! `Patch` values describing what should change, and the DOM bridge (or any
//! JS host calling `handle_event`) applies them in order. All types serialize
//! to tagged JSON so a host outside this crate can apply them too.

use serde::{Deserialize, Serialize};

use crate::selectors;

/// Handle for an element created by this crate (progress bar, particles, modal).
pub type NodeId = u32;

/// Observed element groups, each backed by one intersection observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    Aos,
    Counter,
    Stat,
    ArchCard,
    TechSpecs,
    ArchIcon,
    LazyImage,
}

impl Group {
    pub const ALL: [Group; 7] = [
        Group::Aos,
        Group::Counter,
        Group::Stat,
        Group::ArchCard,
        Group::TechSpecs,
        Group::ArchIcon,
        Group::LazyImage,
    ];

    pub fn selector(self) -> &'static str {
        match self {
            Group::Aos => selectors::AOS,
            Group::Counter => selectors::DASHBOARD_VALUE,
            Group::Stat => selectors::STAT_NUMBER,
            Group::ArchCard => selectors::ARCHITECTURE_CARD,
            Group::TechSpecs => selectors::TECH_SPECS,
            Group::ArchIcon => selectors::ARCH_ICON,
            Group::LazyImage => selectors::LAZY_IMAGE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Group::Aos => "aos",
            Group::Counter => "counter",
            Group::Stat => "stat",
            Group::ArchCard => "arch_card",
            Group::TechSpecs => "tech_specs",
            Group::ArchIcon => "arch_icon",
            Group::LazyImage => "lazy_image",
        }
    }

    /// Index attribute the bridge stamps on each member at boot, so members
    /// stay addressable after their matching attributes change.
    pub fn attr(self) -> &'static str {
        match self {
            Group::Aos => "data-fx-aos",
            Group::Counter => "data-fx-counter",
            Group::Stat => "data-fx-stat",
            Group::ArchCard => "data-fx-arch-card",
            Group::TechSpecs => "data-fx-tech-specs",
            Group::ArchIcon => "data-fx-arch-icon",
            Group::LazyImage => "data-fx-lazy-image",
        }
    }

    pub fn parse(s: &str) -> Option<Group> {
        Group::ALL.into_iter().find(|g| g.as_str() == s)
    }
}

/// Which element a patch applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Target {
    /// `document.querySelector(selector)`
    First { selector: String },
    /// `document.querySelectorAll(selector)[index]`
    Nth { selector: String, index: usize },
    /// `scope.querySelectorAll(selector)[index]`
    Within {
        scope: Box<Target>,
        selector: String,
        index: usize,
    },
    /// Member `index` of an observed group, via its `Group::attr` stamp.
    Member { group: Group, index: usize },
    /// An element created by a previous `Patch::Create`.
    Node { node: NodeId },
}

impl Target {
    pub fn first(selector: &str) -> Self {
        Target::First {
            selector: selector.to_string(),
        }
    }

    pub fn nth(selector: &str, index: usize) -> Self {
        Target::Nth {
            selector: selector.to_string(),
            index,
        }
    }

    pub fn member(group: Group, index: usize) -> Self {
        Target::Member { group, index }
    }

    pub fn node(node: NodeId) -> Self {
        Target::Node { node }
    }

    pub fn within(self, selector: &str, index: usize) -> Self {
        Target::Within {
            scope: Box::new(self),
            selector: selector.to_string(),
            index,
        }
    }
}

/// Viewport-relative position inside a target's bounding box, resolved by
/// the bridge when the element is created. `fx`/`fy` are fractions of the
/// box width/height (0.5, 0.5 is the center).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub target: Target,
    pub fx: f64,
    pub fy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Patch {
    AddClass {
        target: Target,
        class: String,
    },
    RemoveClass {
        target: Target,
        class: String,
    },
    /// An empty `value` removes the property.
    SetStyle {
        target: Target,
        property: String,
        value: String,
    },
    SetText {
        target: Target,
        text: String,
    },
    SetAttr {
        target: Target,
        name: String,
        value: String,
    },
    RemoveAttr {
        target: Target,
        name: String,
    },
    /// Append a `<div>` to `<body>`. With an anchor, `left`/`top` are set to
    /// the anchor's position in pixels.
    Create {
        node: NodeId,
        style: String,
        html: String,
        anchor: Option<Anchor>,
    },
    Remove {
        node: NodeId,
    },
    ScrollTo {
        top: f64,
        smooth: bool,
    },
    Observe {
        group: Group,
        threshold: f64,
        root_margin: String,
    },
    Unobserve {
        group: Group,
        index: usize,
    },
    /// Append a `<style>` element to `<head>`.
    InjectStyle {
        css: String,
    },
}

impl Patch {
    pub fn add_class(target: Target, class: &str) -> Self {
        Patch::AddClass {
            target,
            class: class.to_string(),
        }
    }

    pub fn remove_class(target: Target, class: &str) -> Self {
        Patch::RemoveClass {
            target,
            class: class.to_string(),
        }
    }

    pub fn style(target: Target, property: &str, value: impl Into<String>) -> Self {
        Patch::SetStyle {
            target,
            property: property.to_string(),
            value: value.into(),
        }
    }

    pub fn text(target: Target, text: impl Into<String>) -> Self {
        Patch::SetText {
            target,
            text: text.into(),
        }
    }
}

/// When the host should call back into the core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wake {
    /// A frame task is queued: call `/clock/frame` on the next animation frame.
    pub frame: bool,
    /// Milliseconds until the next timer is due: call `/clock/timer` then.
    pub timer_ms: Option<f64>,
}

/// Result of dispatching one event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub patches: Vec<Patch>,
    pub wake: Wake,
}

impl Response {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"patches":[],"wake":{}}"#.to_string())
    }
}
