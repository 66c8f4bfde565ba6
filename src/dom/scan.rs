//! Build the `Layout` snapshot and stamp group indices on observed elements.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::layout::{FlowCardLayout, FlowStepLayout, Layout};
use crate::patch::Group;
use crate::selectors;

/// Every element matching `selector` under `scope`, in document order.
/// Invalid selectors match nothing.
pub(super) fn all(scope: &impl AsRef<web_sys::Node>, selector: &str) -> Vec<Element> {
    let node: &web_sys::Node = scope.as_ref();
    let list = if let Some(document) = node.dyn_ref::<Document>() {
        document.query_selector_all(selector)
    } else if let Some(element) = node.dyn_ref::<Element>() {
        element.query_selector_all(selector)
    } else {
        return Vec::new();
    };
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect()
}

fn exists(document: &Document, selector: &str) -> bool {
    matches!(document.query_selector(selector), Ok(Some(_)))
}

fn text(el: &Element) -> String {
    el.text_content().unwrap_or_default().trim().to_string()
}

fn attr(el: &Element, name: &str) -> String {
    el.get_attribute(name).unwrap_or_default()
}

fn flow_card(card: &Element) -> FlowCardLayout {
    let steps = all(card, selectors::FLOW_STEP)
        .iter()
        .map(|step| {
            let child = |selector: &str| step.query_selector(selector).ok().flatten();
            FlowStepLayout {
                title: child(selectors::STEP_TITLE).map(|e| text(&e)).unwrap_or_default(),
                description: child(selectors::STEP_DESCRIPTION)
                    .map(|e| text(&e))
                    .unwrap_or_default(),
                icon_html: child(selectors::STEP_ICON).map(|e| e.inner_html()),
            }
        })
        .collect();
    FlowCardLayout {
        steps,
        arrows: all(card, selectors::FLOW_ARROW).len(),
    }
}

/// Stamp `Group::attr` indices, then describe the page.
pub fn scan(document: &Document) -> Layout {
    for group in Group::ALL {
        for (i, el) in all(document, group.selector()).iter().enumerate() {
            if el.set_attribute(group.attr(), &i.to_string()).is_err() {
                tracing::debug!(group = group.as_str(), i, "could not stamp element");
            }
        }
    }

    let texts = |selector: &str| -> Vec<String> {
        all(document, selector).iter().map(text).collect()
    };
    let attrs = |selector: &str, name: &str| -> Vec<String> {
        all(document, selector)
            .iter()
            .map(|el| attr(el, name))
            .collect()
    };

    Layout {
        has_hamburger: exists(document, selectors::HAMBURGER),
        has_nav_menu: exists(document, selectors::NAV_MENU),
        has_navbar: exists(document, selectors::NAVBAR),
        nav_links: all(document, selectors::NAV_LINK).len(),
        aos: all(document, selectors::AOS).len(),
        counters: texts(selectors::DASHBOARD_VALUE),
        system_buttons: attrs(selectors::SYSTEM_BUTTON, selectors::ATTR_TARGET),
        body_systems: attrs(selectors::BODY_SYSTEM, selectors::ATTR_SYSTEM),
        has_hero: exists(document, selectors::HERO_GRAPHIC),
        hover_cards: all(document, selectors::HOVER_CARD).len(),
        stats: texts(selectors::STAT_NUMBER),
        tech_items: all(document, selectors::TECH_ITEM).len(),
        flow_cards: all(document, selectors::ARCHITECTURE_CARD)
            .iter()
            .map(flow_card)
            .collect(),
        has_tech_specs: exists(document, selectors::TECH_SPECS),
        spec_items: all(document, selectors::SPEC_ITEM).len(),
        arch_icons: all(document, selectors::ARCH_ICON).len(),
        lazy_images: attrs(selectors::LAZY_IMAGE, selectors::ATTR_LAZY_SRC),
    }
}
