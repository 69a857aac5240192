//! HTML and CSS fragments injected into the page.
//!
//! Uses [maud](https://maud.lambda.xyz/) like the rest of the site tooling, so
//! interpolated text (messages, labels) is escaped.

use crate::config::NotificationConfig;
use crate::notify::Severity;
use maud::{Markup, html};

/// Label shown on the export control while the document renders.
pub fn busy_label(text: &str) -> Markup {
    html! {
        i class="fas fa-spinner fa-spin" {}
        " " (text)
    }
}

/// Class attribute of a notification node.
pub fn notification_class(severity: Severity) -> String {
    format!("notification notification-{severity}")
}

/// Inline style of a notification node: fixed top-right box sliding in.
pub fn notification_style(severity: Severity, config: &NotificationConfig) -> String {
    let background = match severity {
        Severity::Success => &config.success_color,
        Severity::Error => &config.error_color,
    };
    format!(
        "position: fixed; top: 20px; right: 20px; padding: 15px 25px; \
         background: {background}; color: white; border-radius: 5px; \
         box-shadow: 0 4px 12px rgba(0,0,0,0.15); z-index: 10000; \
         animation: slideIn {enter}s ease;",
        enter = seconds(config.enter_ms)
    )
}

/// Animation value that plays the exit slide.
pub fn notification_exit_animation(config: &NotificationConfig) -> String {
    format!("slideOut {}s ease", seconds(config.exit_ms))
}

/// Keyframes for the notification slides and the reveal fade, plus the rule
/// binding the reveal class to its animation.
pub fn keyframes_css(reveal_class: &str) -> String {
    format!(
        "@keyframes slideIn {{ from {{transform: translateX(400px); opacity:0;}} to {{transform: translateX(0); opacity:1;}} }}\n\
         @keyframes slideOut {{ from {{transform: translateX(0); opacity:1;}} to {{transform: translateX(400px); opacity:0;}} }}\n\
         .{reveal_class} {{ animation: fadeIn 0.6s ease forwards; }}\n\
         @keyframes fadeIn {{ from {{opacity:0; transform: translateY(20px);}} to {{opacity:1; transform: translateY(0);}} }}\n"
    )
}

fn seconds(ms: u32) -> f64 {
    f64::from(ms) / 1000.0
}
