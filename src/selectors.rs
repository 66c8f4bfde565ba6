//! Class names and attributes the page markup must provide.

pub const HAMBURGER: &str = ".hamburger";
pub const NAV_MENU: &str = ".nav-menu";
pub const NAV_LINK: &str = ".nav-link";
pub const NAVBAR: &str = ".navbar";

pub const AOS: &str = "[data-aos]";
pub const DASHBOARD_VALUE: &str = ".dashboard-value";

pub const SYSTEM_BUTTON: &str = ".system-btn";
pub const BODY_SYSTEM: &str = ".body-system";
/// Attribute on `.system-btn` naming the panel it selects.
pub const ATTR_TARGET: &str = "data-target";
/// Attribute on `.body-system` naming the panel.
pub const ATTR_SYSTEM: &str = "data-system";

pub const HERO_GRAPHIC: &str = ".hero-graphic";

pub const HOVER_CARD: &str = ".feature-card, .doctor-card, .showcase-item, .tech-item";
pub const STAT_NUMBER: &str = ".stat-number";
pub const TECH_ITEM: &str = ".tech-item";

pub const ARCHITECTURE_CARD: &str = ".architecture-card";
pub const FLOW_STEP: &str = ".flow-step";
pub const FLOW_ARROW: &str = ".flow-arrow";
pub const STEP_ICON: &str = ".step-icon";
pub const STEP_TITLE: &str = "h4";
pub const STEP_DESCRIPTION: &str = "p";

pub const TECH_SPECS: &str = ".tech-specs-container";
pub const SPEC_ITEM: &str = ".spec-item";
pub const ARCH_ICON: &str = ".arch-icon";

pub const LAZY_IMAGE: &str = "img[data-src]";
pub const ATTR_LAZY_SRC: &str = "data-src";

pub const BODY: &str = "body";

/// Attribute stamped on elements this crate creates.
pub const ATTR_NODE: &str = "data-fx-node";
/// Attribute marking the modal's close button.
pub const ATTR_CLOSE: &str = "data-fx-close";

/// Class toggled on the active menu, buttons and panels.
pub const ACTIVE: &str = "active";
