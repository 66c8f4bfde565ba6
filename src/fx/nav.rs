//! Mobile menu, in-page scrolling and the navbar's scroll-dependent style.

use crate::config::NavConfig;
use crate::layout::Layout;
use crate::patch::{Patch, Target};
use crate::selectors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    Solid,
    Frosted,
}

impl HeaderStyle {
    pub fn for_offset(scroll_y: f64, config: &NavConfig) -> Self {
        if scroll_y > config.frosted_threshold {
            HeaderStyle::Frosted
        } else {
            HeaderStyle::Solid
        }
    }

    fn background(self) -> &'static str {
        match self {
            HeaderStyle::Solid => "#ffffff",
            HeaderStyle::Frosted => "rgba(255, 255, 255, 0.95)",
        }
    }

    fn backdrop_filter(self) -> &'static str {
        match self {
            HeaderStyle::Solid => "none",
            HeaderStyle::Frosted => "blur(10px)",
        }
    }
}

#[derive(Debug, Default)]
pub struct Nav {
    open: bool,
    header: Option<HeaderStyle>,
    has_hamburger: bool,
    has_menu: bool,
    has_navbar: bool,
}

impl Nav {
    pub fn new(layout: &Layout) -> Self {
        Self {
            open: false,
            header: None,
            has_hamburger: layout.has_hamburger,
            has_menu: layout.has_nav_menu,
            has_navbar: layout.has_navbar,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn header(&self) -> Option<HeaderStyle> {
        self.header
    }

    pub fn toggle(&mut self, out: &mut Vec<Patch>) {
        self.open = !self.open;
        self.render_menu(out);
    }

    /// Close the menu. Closing a closed menu emits nothing.
    pub fn close(&mut self, out: &mut Vec<Patch>) {
        if self.open {
            self.open = false;
            self.render_menu(out);
        }
    }

    fn render_menu(&self, out: &mut Vec<Patch>) {
        let targets = [
            (self.has_hamburger, selectors::HAMBURGER),
            (self.has_menu, selectors::NAV_MENU),
        ];
        for (present, selector) in targets {
            if !present {
                continue;
            }
            let target = Target::first(selector);
            out.push(if self.open {
                Patch::add_class(target, selectors::ACTIVE)
            } else {
                Patch::remove_class(target, selectors::ACTIVE)
            });
        }
    }

    /// Re-evaluate the navbar style for the current scroll offset. Patches are
    /// only emitted when the style actually changes.
    pub fn on_scroll(&mut self, scroll_y: f64, config: &NavConfig, out: &mut Vec<Patch>) {
        if !self.has_navbar {
            return;
        }
        let style = HeaderStyle::for_offset(scroll_y, config);
        if self.header == Some(style) {
            return;
        }
        self.header = Some(style);
        let navbar = Target::first(selectors::NAVBAR);
        out.push(Patch::style(navbar.clone(), "background", style.background()));
        out.push(Patch::style(navbar, "backdrop-filter", style.backdrop_filter()));
    }
}

/// Smooth-scroll to a section whose top edge sits at `offset_top`, leaving
/// room for the fixed navbar. A missing section scrolls nowhere.
pub fn scroll_to(offset_top: Option<f64>, config: &NavConfig, out: &mut Vec<Patch>) {
    let Some(top) = offset_top.filter(|t| t.is_finite()) else {
        return;
    };
    out.push(Patch::ScrollTo {
        top: (top - config.header_offset).max(0.0),
        smooth: true,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_nav() -> Nav {
        Nav::new(&Layout {
            has_hamburger: true,
            has_nav_menu: true,
            has_navbar: true,
            ..Layout::default()
        })
    }

    #[test]
    fn toggle_flips_both_elements() {
        let mut nav = full_nav();
        let mut out = Vec::new();
        nav.toggle(&mut out);
        assert!(nav.is_open());
        assert_eq!(
            out,
            vec![
                Patch::add_class(Target::first(".hamburger"), "active"),
                Patch::add_class(Target::first(".nav-menu"), "active"),
            ]
        );

        out.clear();
        nav.toggle(&mut out);
        assert!(!nav.is_open());
        assert_eq!(
            out[0],
            Patch::remove_class(Target::first(".hamburger"), "active")
        );
    }

    #[test]
    fn closing_closed_menu_is_noop() {
        let mut nav = full_nav();
        let mut out = Vec::new();
        nav.close(&mut out);
        assert!(out.is_empty());

        nav.toggle(&mut out);
        out.clear();
        nav.close(&mut out);
        assert_eq!(out.len(), 2);
        out.clear();
        nav.close(&mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn missing_menu_elements_are_skipped() {
        let mut nav = Nav::new(&Layout::default());
        let mut out = Vec::new();
        nav.toggle(&mut out);
        assert!(nav.is_open());
        assert!(out.is_empty());
    }

    #[test]
    fn scroll_target_accounts_for_header() {
        let config = NavConfig::default();
        let mut out = Vec::new();
        scroll_to(Some(500.0), &config, &mut out);
        assert_eq!(out, vec![Patch::ScrollTo { top: 430.0, smooth: true }]);
    }

    #[test]
    fn missing_scroll_target_is_skipped() {
        let mut out = Vec::new();
        scroll_to(None, &NavConfig::default(), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn header_switches_at_threshold() {
        let config = NavConfig::default();
        assert_eq!(HeaderStyle::for_offset(0.0, &config), HeaderStyle::Solid);
        assert_eq!(HeaderStyle::for_offset(50.0, &config), HeaderStyle::Solid);
        assert_eq!(HeaderStyle::for_offset(50.5, &config), HeaderStyle::Frosted);
    }

    #[test]
    fn header_patches_only_on_change() {
        let config = NavConfig::default();
        let mut nav = full_nav();
        let mut out = Vec::new();
        nav.on_scroll(10.0, &config, &mut out);
        assert_eq!(out.len(), 2);
        out.clear();
        nav.on_scroll(20.0, &config, &mut out);
        assert!(out.is_empty());
        nav.on_scroll(120.0, &config, &mut out);
        assert_eq!(nav.header(), Some(HeaderStyle::Frosted));
        assert_eq!(
            out[0],
            Patch::style(
                Target::first(".navbar"),
                "background",
                "rgba(255, 255, 255, 0.95)"
            )
        );
    }
}
