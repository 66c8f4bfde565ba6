//! Markup and stylesheet fragments the crate injects into the page.

use crate::layout::FlowStepLayout;
use crate::selectors;

/// Keyframes and rules used by the effects, injected once at boot.
pub const KEYFRAMES: &str = r#"
@keyframes fadeIn {
    from { opacity: 0; }
    to { opacity: 1; }
}
@keyframes slideIn {
    from { transform: translateY(-50px); opacity: 0; }
    to { transform: translateY(0); opacity: 1; }
}
@keyframes sparkle {
    0% { transform: translate(0, 0) scale(1); opacity: 1; }
    100% { transform: translate(var(--end-x), var(--end-y)) scale(0); opacity: 0; }
}
@keyframes iconReveal {
    0% { transform: scale(0) rotate(-180deg); opacity: 0; }
    50% { transform: scale(1.2) rotate(-90deg); opacity: 0.8; }
    100% { transform: scale(1) rotate(0deg); opacity: 1; }
}
@keyframes dataSparkle {
    0% { transform: scale(1) translateY(0); opacity: 1; }
    50% { transform: scale(1.5) translateY(-20px); opacity: 0.8; }
    100% { transform: scale(0) translateY(-40px); opacity: 0; }
}
@keyframes bounce {
    0%, 20%, 50%, 80%, 100% { transform: translateY(0); }
    40% { transform: translateY(-10px); }
    60% { transform: translateY(-5px); }
}
.flow-step {
    cursor: pointer;
    user-select: none;
}
.flow-step:hover .step-icon {
    animation: bounce 0.6s ease !important;
}
"#;

/// Full-screen backdrop of the step detail modal.
pub const MODAL_OVERLAY_STYLE: &str = "position: fixed; top: 0; left: 0; width: 100%; \
    height: 100%; background: rgba(0, 0, 0, 0.8); display: flex; align-items: center; \
    justify-content: center; z-index: 10000; animation: fadeIn 0.3s ease;";

/// Render the modal card for one flow step. Title and description are page
/// text and get escaped; the icon is the step's own markup and is kept as is.
pub fn step_modal(step: &FlowStepLayout) -> String {
    let mut h = String::with_capacity(1024);
    h.push_str(
        r#"<div style="background: white; padding: 40px; border-radius: 20px; max-width: 500px; width: 90%; text-align: center; transform: scale(0.8); animation: slideIn 0.3s ease forwards;">"#,
    );
    if let Some(icon) = &step.icon_html {
        h.push_str(&format!(
            r#"<div style="font-size: 3rem; color: #2563eb; margin-bottom: 20px;">{}</div>"#,
            icon
        ));
    }
    h.push_str(&format!(
        r#"<h3 style="font-size: 1.8rem; margin-bottom: 20px; color: #1f2937;">{}</h3>"#,
        escape_html(&step.title)
    ));
    h.push_str(&format!(
        r#"<p style="font-size: 1.1rem; color: #6b7280; margin-bottom: 30px; line-height: 1.6;">{}</p>"#,
        escape_html(&step.description)
    ));
    h.push_str(&format!(
        r#"<button {} style="background: #2563eb; color: white; border: none; padding: 12px 30px; border-radius: 25px; cursor: pointer; font-size: 1rem; transition: all 0.3s ease;">Close</button>"#,
        selectors::ATTR_CLOSE
    ));
    h.push_str("</div>");
    h
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
