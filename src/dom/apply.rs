//! Apply `Patch` lists to the live document. Targets that resolve to nothing
//! are skipped.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::patch::{Anchor, Patch, Target};
use crate::selectors;

use super::wire;

fn nth(list: Result<web_sys::NodeList, wasm_bindgen::JsValue>, index: usize) -> Option<Element> {
    let index = u32::try_from(index).ok()?;
    list.ok()?.item(index)?.dyn_into::<Element>().ok()
}

pub(super) fn resolve(document: &Document, target: &Target) -> Option<Element> {
    match target {
        Target::First { selector } => document.query_selector(selector).ok().flatten(),
        Target::Nth { selector, index } => nth(document.query_selector_all(selector), *index),
        Target::Within {
            scope,
            selector,
            index,
        } => {
            let scope = resolve(document, scope)?;
            nth(scope.query_selector_all(selector), *index)
        }
        Target::Member { group, index } => document
            .query_selector(&format!("[{}=\"{}\"]", group.attr(), index))
            .ok()
            .flatten(),
        Target::Node { node } => document
            .query_selector(&format!("[{}=\"{}\"]", selectors::ATTR_NODE, node))
            .ok()
            .flatten(),
    }
}

fn set_style(el: &Element, property: &str, value: &str) {
    let Some(el) = el.dyn_ref::<HtmlElement>() else {
        return;
    };
    let style = el.style();
    let result = if value.is_empty() {
        style.remove_property(property).map(|_| ())
    } else {
        style.set_property(property, value)
    };
    if result.is_err() {
        tracing::debug!(property, value, "style rejected");
    }
}

fn place(document: &Document, el: &Element, anchor: &Anchor) {
    let Some(target) = resolve(document, &anchor.target) else {
        return;
    };
    let rect = target.get_bounding_client_rect();
    let left = rect.left() + rect.width() * anchor.fx;
    let top = rect.top() + rect.height() * anchor.fy;
    set_style(el, "left", &format!("{}px", left));
    set_style(el, "top", &format!("{}px", top));
}

fn create(document: &Document, node: u32, style: &str, html: &str, anchor: Option<&Anchor>) {
    let Some(body) = document.body() else {
        return;
    };
    let Ok(el) = document.create_element("div") else {
        return;
    };
    let _ = el.set_attribute("style", style);
    let _ = el.set_attribute(selectors::ATTR_NODE, &node.to_string());
    if !html.is_empty() {
        el.set_inner_html(html);
    }
    if let Some(anchor) = anchor {
        place(document, &el, anchor);
    }
    if body.append_child(&el).is_err() {
        tracing::debug!(node, "could not attach created element");
    }
}

fn scroll_to(top: f64, smooth: bool) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if smooth {
        let options = web_sys::ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    } else {
        window.scroll_to_with_x_and_y(0.0, top);
    }
}

fn inject_style(document: &Document, css: &str) {
    let Ok(style) = document.create_element("style") else {
        return;
    };
    style.set_text_content(Some(css));
    if let Some(head) = document.head() {
        let _ = head.append_child(&style);
    }
}

pub fn apply(document: &Document, patches: &[Patch]) {
    for patch in patches {
        match patch {
            Patch::AddClass { target, class } => {
                if let Some(el) = resolve(document, target) {
                    let _ = el.class_list().add_1(class);
                }
            }
            Patch::RemoveClass { target, class } => {
                if let Some(el) = resolve(document, target) {
                    let _ = el.class_list().remove_1(class);
                }
            }
            Patch::SetStyle {
                target,
                property,
                value,
            } => {
                if let Some(el) = resolve(document, target) {
                    set_style(&el, property, value);
                }
            }
            Patch::SetText { target, text } => {
                if let Some(el) = resolve(document, target) {
                    el.set_text_content(Some(text));
                }
            }
            Patch::SetAttr {
                target,
                name,
                value,
            } => {
                if let Some(el) = resolve(document, target) {
                    let _ = el.set_attribute(name, value);
                }
            }
            Patch::RemoveAttr { target, name } => {
                if let Some(el) = resolve(document, target) {
                    let _ = el.remove_attribute(name);
                }
            }
            Patch::Create {
                node,
                style,
                html,
                anchor,
            } => create(document, *node, style, html, anchor.as_ref()),
            Patch::Remove { node } => {
                if let Some(el) = resolve(document, &Target::node(*node)) {
                    el.remove();
                }
            }
            Patch::ScrollTo { top, smooth } => scroll_to(*top, *smooth),
            Patch::Observe {
                group,
                threshold,
                root_margin,
            } => wire::observe(document, *group, *threshold, root_margin),
            Patch::Unobserve { group, index } => {
                if let Some(el) = resolve(document, &Target::member(*group, *index)) {
                    wire::unobserve(*group, &el);
                }
            }
            Patch::InjectStyle { css } => inject_style(document, css),
        }
    }
}
