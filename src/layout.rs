//! Snapshot of the page markup taken once at boot.
//!
//! The bridge fills this in from the live document; the core only ever
//! sees these counts and strings, never the elements themselves.

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub has_hamburger: bool,
    pub has_nav_menu: bool,
    pub has_navbar: bool,
    pub nav_links: usize,
    /// Number of `[data-aos]` elements.
    pub aos: usize,
    /// Text of each `.dashboard-value`.
    pub counters: Vec<String>,
    /// `data-target` of each `.system-btn`, in document order.
    pub system_buttons: Vec<String>,
    /// `data-system` of each `.body-system`, in document order.
    pub body_systems: Vec<String>,
    pub has_hero: bool,
    pub hover_cards: usize,
    /// Text of each `.stat-number`.
    pub stats: Vec<String>,
    pub tech_items: usize,
    pub flow_cards: Vec<FlowCardLayout>,
    pub has_tech_specs: bool,
    pub spec_items: usize,
    pub arch_icons: usize,
    /// `data-src` of each lazy image.
    pub lazy_images: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowCardLayout {
    pub steps: Vec<FlowStepLayout>,
    pub arrows: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowStepLayout {
    pub title: String,
    pub description: String,
    /// Inner markup of the step's `.step-icon`, if it has one.
    pub icon_html: Option<String>,
}

impl Layout {
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Layout::default());
        }
        Ok(serde_json::from_str(json)?)
    }
}
