//! Browser test for the DOM bridge. Run with `wasm-pack test --headless`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

const MARKUP: &str = r#"
<nav class="navbar"><div class="hamburger"></div><ul class="nav-menu"></ul></nav>
<section data-aos="fade-up" id="features"><span class="stat-number">1,234+</span></section>
<button class="system-btn" data-target="skeletal"></button>
<button class="system-btn" data-target="muscular"></button>
<div class="body-system" data-system="skeletal"></div>
<div class="body-system" data-system="muscular"></div>
"#;

fn query(selector: &str) -> Option<web_sys::Element> {
    web_sys::window()?
        .document()?
        .query_selector(selector)
        .ok()
        .flatten()
}

#[wasm_bindgen_test]
fn boot_applies_patches_and_teardown_cleans_up() {
    let body = query("body").unwrap();
    body.set_inner_html(MARKUP);

    showcase_fx::dom::start();

    let aos = query("[data-aos]")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    assert_eq!(aos.style().get_property_value("opacity").unwrap(), "0");
    assert_eq!(aos.get_attribute("data-fx-aos").as_deref(), Some("0"));
    assert!(query(".body-system[data-system=\"skeletal\"].active").is_some());
    assert!(query("[data-fx-node]").is_some());

    showcase_fx::teardown();
    assert!(query("[data-fx-node]").is_none());
}

#[wasm_bindgen_test]
fn unknown_section_does_not_scroll() {
    showcase_fx::dom::scroll_to_section("does-not-exist");
}
