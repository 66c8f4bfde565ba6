//! End-to-end scenarios through the exported JSON interface.

use showcase_fx::handle_event;
use showcase_fx::patch::{Group, Patch, Response, Target};

const LAYOUT: &str = r#"{
    "has_hamburger": true,
    "has_nav_menu": true,
    "has_navbar": true,
    "nav_links": 4,
    "aos": 3,
    "counters": ["98%", "1200"],
    "system_buttons": ["skeletal", "muscular", "organs"],
    "body_systems": ["skeletal", "muscular", "organs"],
    "has_hero": true,
    "hover_cards": 5,
    "stats": ["1,234+", "50K users"],
    "tech_items": 2,
    "flow_cards": [{
        "steps": [
            {"title": "Voice intake", "description": "Speech to text", "icon_html": "<i class=\"fas fa-microphone\"></i>"},
            {"title": "Triage", "description": "Ranks urgency <fast>"},
            {"title": "Report", "description": "Doctor summary"}
        ],
        "arrows": 2
    }],
    "has_tech_specs": true,
    "spec_items": 3,
    "arch_icons": 2,
    "lazy_images": ["/img/body.webp"]
}"#;

fn event(path: &str, query: &str, now: f64) -> Response {
    serde_json::from_str(&handle_event(path, query, "", now)).unwrap()
}

fn boot() -> Response {
    serde_json::from_str(&handle_event("/page/boot", "?seed=42", LAYOUT, 0.0)).unwrap()
}

fn created(resp: &Response) -> Vec<u32> {
    resp.patches
        .iter()
        .filter_map(|p| match p {
            Patch::Create { node, .. } => Some(*node),
            _ => None,
        })
        .collect()
}

fn removed(resp: &Response) -> Vec<u32> {
    resp.patches
        .iter()
        .filter_map(|p| match p {
            Patch::Remove { node } => Some(*node),
            _ => None,
        })
        .collect()
}

fn active(resp: &Response, selector: &str) -> Vec<usize> {
    resp.patches
        .iter()
        .filter_map(|p| match p {
            Patch::AddClass {
                target: Target::Nth { selector: s, index },
                class,
            } if s == selector && class == "active" => Some(*index),
            _ => None,
        })
        .collect()
}

#[test]
fn stat_counts_up_to_exact_literal() {
    boot();
    let mut now = 16.0;
    let mut resp = event("/visible", "?group=stat&index=0", now);
    let mut texts = Vec::new();
    loop {
        for p in &resp.patches {
            if let Patch::SetText { text, .. } = p {
                texts.push(text.clone());
            }
        }
        if !resp.wake.frame {
            break;
        }
        now += 16.0;
        resp = event("/clock/frame", "", now);
    }
    assert_eq!(texts.last().map(String::as_str), Some("1,234+"));
    assert!(!texts.iter().any(|t| t == "1234" || t == "1,233+"));
}

#[test]
fn manual_select_then_tick_returns_to_first_panel() {
    let resp = boot();
    assert_eq!(active(&resp, ".body-system"), vec![0]);
    assert_eq!(resp.wake.timer_ms, Some(8000.0));

    let resp = event("/showcase/select", "?index=2", 1000.0);
    assert_eq!(active(&resp, ".body-system"), vec![2]);
    assert_eq!(active(&resp, ".system-btn"), vec![2]);

    let resp = event("/clock/timer", "", 8000.0);
    assert_eq!(active(&resp, ".body-system"), vec![0]);
    assert_eq!(active(&resp, ".system-btn"), vec![0]);
}

#[test]
fn modal_opens_once_and_closes_cleanly() {
    boot();
    let first = event("/flow/open", "?card=0&step=1", 10.0);
    let nodes = created(&first);
    assert_eq!(nodes.len(), 1);
    let html = first
        .patches
        .iter()
        .find_map(|p| match p {
            Patch::Create { html, .. } => Some(html.clone()),
            _ => None,
        })
        .unwrap();
    assert!(html.contains("Triage"));
    assert!(html.contains("Ranks urgency &lt;fast&gt;"));

    // A second click replaces the first modal.
    let second = event("/flow/open", "?card=0&step=0", 20.0);
    assert_eq!(removed(&second), nodes);
    let modal = created(&second)[0];

    // Clicks inside the card do not close it, the backdrop does.
    let inside = event("/modal/backdrop", "", 30.0);
    assert!(inside.patches.is_empty());
    let closed = event("/modal/backdrop", &format!("?node={}", modal), 40.0);
    assert_eq!(removed(&closed), vec![modal]);

    event("/flow/open", "?card=0&step=2", 50.0);
    let escaped = event("/key", "?key=Escape", 60.0);
    assert_eq!(removed(&escaped).len(), 1);
    assert!(event("/key", "?key=Escape", 70.0).patches.is_empty());
}

#[test]
fn sparkles_leave_nothing_behind() {
    boot();
    let resp = event("/sparkle", "?index=1", 100.0);
    let nodes = created(&resp);
    assert_eq!(nodes.len(), 8);
    assert_eq!(resp.wake.timer_ms, Some(1000.0));

    let resp = event("/clock/timer", "", 1100.0);
    let mut gone = removed(&resp);
    gone.sort_unstable();
    assert_eq!(gone, nodes);
}

#[test]
fn teardown_clears_everything() {
    boot();
    event("/sparkle", "?index=0", 10.0);
    event("/flow/open", "?card=0&step=0", 20.0);
    event("/visible", "?group=arch_card&index=0", 30.0);
    let resp: Response = serde_json::from_str(&showcase_fx::teardown()).unwrap();
    // 8 particles, the modal and the progress bar.
    assert_eq!(removed(&resp).len(), 10);
    assert!(!resp.wake.frame);
    assert_eq!(resp.wake.timer_ms, None);

    let resp = event("/clock/timer", "", 100_000.0);
    assert!(resp.patches.is_empty());
}

#[test]
fn reveal_fires_once_per_element() {
    boot();
    let first = event("/visible", "?group=aos&index=1", 5.0);
    assert!(first.patches.contains(&Patch::Unobserve {
        group: Group::Aos,
        index: 1
    }));
    assert!(first.patches.contains(&Patch::style(
        Target::member(Group::Aos, 1),
        "opacity",
        "1"
    )));
    assert!(event("/visible", "?group=aos&index=1", 6.0).patches.is_empty());
    assert!(event("/visible", "?group=aos&index=9", 7.0).patches.is_empty());
}

#[test]
fn progress_width_stays_in_range() {
    let resp = boot();
    let bar = created(&resp)[0];
    for (query, expected) in [
        ("?y=0&top=0&height=3000&client=1000", "0%"),
        ("?y=1000&top=1000&height=3000&client=1000", "50%"),
        ("?y=9000&top=9000&height=3000&client=1000", "100%"),
        ("?y=10&top=10&height=800&client=800", "0%"),
    ] {
        let resp = event("/scroll", query, 1.0);
        assert!(
            resp.patches
                .contains(&Patch::style(Target::node(bar), "width", expected)),
            "{query}"
        );
    }
}

#[test]
fn header_turns_frosted_past_threshold() {
    boot();
    let resp = event("/scroll", "?y=80&top=80&height=3000&client=1000", 1.0);
    assert!(resp.patches.contains(&Patch::style(
        Target::first(".navbar"),
        "backdrop-filter",
        "blur(10px)"
    )));
    let again = event("/scroll", "?y=90&top=90&height=3000&client=1000", 2.0);
    assert!(
        !again
            .patches
            .iter()
            .any(|p| matches!(p, Patch::SetStyle { property, .. } if property == "backdrop-filter"))
    );
}

#[test]
fn architecture_flow_reveals_in_sequence() {
    boot();
    event("/showcase/select", "?index=0", 0.0);
    let resp = event("/visible", "?group=arch_card&index=0", 100.0);
    assert_eq!(resp.wake.timer_ms, Some(0.0));

    let step = |s: usize| Target::member(Group::ArchCard, 0).within(".flow-step", s);
    let resp = event("/clock/timer", "", 100.0);
    assert!(resp.patches.contains(&Patch::style(step(0), "opacity", "1")));
    assert!(!resp.patches.contains(&Patch::style(step(1), "opacity", "1")));

    let resp = event("/clock/timer", "", 900.0);
    assert!(resp.patches.contains(&Patch::style(step(1), "opacity", "1")));
    assert!(resp.patches.contains(&Patch::style(step(2), "opacity", "1")));

    let hover = event("/flow/enter", "?card=0&step=0", 1000.0);
    assert!(hover.patches.contains(&Patch::style(step(2), "filter", "brightness(0.8)")));
}

#[test]
fn lazy_image_swaps_source() {
    boot();
    let resp = event("/visible", "?group=lazy_image&index=0", 1.0);
    assert!(resp.patches.iter().any(|p| matches!(
        p,
        Patch::SetAttr { name, value, .. } if name == "src" && value == "/img/body.webp"
    )));
}

#[test]
fn window_load_fades_body_in() {
    boot();
    let resp = event("/page/load", "", 500.0);
    assert_eq!(
        resp.patches[0],
        Patch::ScrollTo {
            top: 0.0,
            smooth: false
        }
    );
    assert_eq!(resp.wake.timer_ms, Some(100.0));
    let resp = event("/clock/timer", "", 600.0);
    assert!(resp
        .patches
        .contains(&Patch::style(Target::first("body"), "opacity", "1")));
}

#[test]
fn teardown_mid_count_restores_literal_text() {
    boot();
    event("/visible", "?group=counter&index=0", 1.0);
    for t in 2..7 {
        event("/clock/frame", "", f64::from(t));
    }
    let resp: Response = serde_json::from_str(&showcase_fx::teardown()).unwrap();
    assert!(resp
        .patches
        .contains(&Patch::text(Target::member(Group::Counter, 0), "98%")));
    assert!(event("/clock/frame", "", 10.0).patches.is_empty());
}

#[test]
fn oversized_step_stagger_still_reveals_first_step() {
    assert_eq!(
        showcase_fx::configure(r#"{"flow":{"step_stagger_ms":3000000000}}"#),
        r#"{"ok":true}"#
    );
    boot();
    let resp = event("/visible", "?group=arch_card&index=0", 1.0);
    assert_eq!(resp.wake.timer_ms, Some(0.0));
    let step = Target::member(Group::ArchCard, 0).within(".flow-step", 0);
    let resp = event("/clock/timer", "", 1.0);
    assert!(resp.patches.contains(&Patch::style(step, "opacity", "1")));
    showcase_fx::configure("{}");
}
