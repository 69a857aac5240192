//! Behavior configuration.
//!
//! Every constant the page behaviors depend on (selectors, thresholds,
//! timings, messages, export options) lives in [`BehaviorConfig`]. Stock
//! defaults reproduce the portfolio page as shipped; a page can override any
//! subset of them with a sparse TOML document.
//!
//! ## Where the Overrides Come From
//!
//! In the browser the overlay is read from an inline script element:
//!
//! ```html
//! <script type="application/toml" id="folio-config">
//! [export]
//! filename = "Jane_Doe_Resume.pdf"
//!
//! [navigation]
//! threshold = 120
//! </script>
//! ```
//!
//! Absent element means stock defaults. A malformed document is logged and
//! the stock defaults are used instead; configuration never stops the page
//! from initializing.
//!
//! ## Configuration Options
//!
//! See [`stock_config_toml`] for the full, commented document. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Page behavior configuration.
///
/// All fields have defaults. Overlays need only specify the values they want
/// to change.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BehaviorConfig {
    /// Scroll-spy navigation and in-page anchors.
    pub navigation: NavigationConfig,
    /// Reveal-on-view entrance animations.
    pub reveal: RevealConfig,
    /// Deferred image loading.
    pub lazy_images: LazyImagesConfig,
    /// Resume PDF export.
    pub export: ExportConfig,
    /// Transient notifications.
    pub notifications: NotificationConfig,
    /// Contact form validation.
    pub contact: ContactConfig,
    /// Small-viewport navigation toggle.
    pub menu: MenuConfig,
    /// Console logging.
    pub logging: LoggingConfig,
}

impl BehaviorConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(ConfigError::Validation(
                "reveal.threshold must be between 0 and 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.export.image_quality) {
            return Err(ConfigError::Validation(
                "export.image_quality must be between 0 and 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.export.busy_opacity) {
            return Err(ConfigError::Validation(
                "export.busy_opacity must be between 0 and 1".into(),
            ));
        }
        if self.export.raster_scale == 0 {
            return Err(ConfigError::Validation(
                "export.raster_scale must be at least 1".into(),
            ));
        }
        if !is_non_negative(self.export.margin) {
            return Err(ConfigError::Validation(
                "export.margin must be a non-negative number".into(),
            ));
        }
        if !is_non_negative(self.navigation.threshold) {
            return Err(ConfigError::Validation(
                "navigation.threshold must be a non-negative number".into(),
            ));
        }
        if self.contact.required_fields.is_empty() {
            return Err(ConfigError::Validation(
                "contact.required_fields must not be empty".into(),
            ));
        }
        if self.contact.email_field.is_empty() {
            return Err(ConfigError::Validation(
                "contact.email_field must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Finite and `>= 0`. NaN fails every comparison, so it must be ruled out here.
fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Scroll-spy navigation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    /// Selector for the navigation links that get highlighted.
    pub link_selector: String,
    /// Selector for the page sections tracked by scroll position.
    pub section_selector: String,
    /// Selector for in-page anchors converted into smooth scrolls.
    pub anchor_selector: String,
    /// A section becomes current once the scroll offset reaches
    /// `section top - threshold`.
    pub threshold: f64,
    /// Class marking the active navigation link.
    pub active_class: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            link_selector: "nav a".to_string(),
            section_selector: "section".to_string(),
            anchor_selector: "a[href^=\"#\"]".to_string(),
            threshold: 200.0,
            active_class: "active".to_string(),
        }
    }
}

/// Reveal animation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Elements animated the first time they scroll into view.
    pub selectors: Vec<String>,
    /// Class applied on first intersection. Never removed.
    pub class: String,
    /// Visible-area fraction that counts as intersecting.
    pub threshold: f64,
    /// Observer root margin, CSS shorthand.
    pub root_margin: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selectors: vec![
                ".skill-box".to_string(),
                ".service-tag".to_string(),
                ".experience-item".to_string(),
            ],
            class: "fade-in".to_string(),
            threshold: 0.1,
            root_margin: "0px 0px -100px 0px".to_string(),
        }
    }
}

impl RevealConfig {
    /// Comma-joined selector list, ready for `querySelectorAll`.
    pub fn selector_list(&self) -> String {
        self.selectors.join(", ")
    }
}

/// Deferred image loading settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LazyImagesConfig {
    /// Attribute holding the deferred image source.
    pub source_attribute: String,
}

impl Default for LazyImagesConfig {
    fn default() -> Self {
        Self {
            source_attribute: "data-src".to_string(),
        }
    }
}

impl LazyImagesConfig {
    /// Selector matching images that still carry a deferred source.
    pub fn selector(&self) -> String {
        format!("img[{}]", self.source_attribute)
    }
}

/// Page orientation handed to the rendering pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Resume export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Id of the element rendered into the document.
    pub content_id: String,
    /// Id of the control that triggers the export.
    pub button_id: String,
    /// Name of the saved file.
    pub filename: String,
    /// Page margin, in `unit`s.
    pub margin: f64,
    /// Raster image type for the captured content.
    pub image_type: String,
    /// Raster image quality (0 = worst, 1 = best).
    pub image_quality: f64,
    /// Canvas scale used when rasterizing the content.
    pub raster_scale: u32,
    /// Fetch cross-origin images with CORS when rasterizing.
    pub use_cors: bool,
    /// Let the rasterizer write its own console output.
    pub pipeline_logging: bool,
    /// Page unit (`in`, `mm`, `pt`).
    pub unit: String,
    /// Page format (`letter`, `a4`, ...).
    pub format: String,
    pub orientation: Orientation,
    /// Label shown on the control while rendering.
    pub busy_label: String,
    /// Control opacity while rendering.
    pub busy_opacity: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            content_id: "resumeContent".to_string(),
            button_id: "downloadBtn".to_string(),
            filename: "Resume.pdf".to_string(),
            margin: 0.2,
            image_type: "jpeg".to_string(),
            image_quality: 0.98,
            raster_scale: 2,
            use_cors: true,
            pipeline_logging: false,
            unit: "in".to_string(),
            format: "letter".to_string(),
            orientation: Orientation::Portrait,
            busy_label: "Generating PDF...".to_string(),
            busy_opacity: 0.7,
        }
    }
}

/// Notification timing, colors and message text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotificationConfig {
    /// Length of the entrance slide.
    pub enter_ms: u32,
    /// How long a notification stays before its exit animation starts.
    pub display_ms: u32,
    /// Length of the exit animation; the node is removed afterwards.
    pub exit_ms: u32,
    /// Background for success notifications.
    pub success_color: String,
    /// Background for error notifications.
    pub error_color: String,
    pub messages: MessagesConfig,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enter_ms: 300,
            display_ms: 3000,
            exit_ms: 300,
            success_color: "#4caf50".to_string(),
            error_color: "#f44336".to_string(),
            messages: MessagesConfig::default(),
        }
    }
}

/// User-facing notification text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MessagesConfig {
    pub export_succeeded: String,
    pub export_failed: String,
    pub contact_accepted: String,
    pub contact_rejected: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            export_succeeded: "Resume downloaded successfully!".to_string(),
            export_failed: "Failed to generate PDF. Please try again.".to_string(),
            contact_accepted: "Message sent successfully!".to_string(),
            contact_rejected: "Please fill in all required fields.".to_string(),
        }
    }
}

/// Contact form settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Id of the contact form element.
    pub form_id: String,
    /// Fields that must be present and non-empty.
    pub required_fields: Vec<String>,
    /// Field checked for email shape (`@` and `.` somewhere in it).
    pub email_field: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            form_id: "contactForm".to_string(),
            required_fields: vec![
                "name".to_string(),
                "email".to_string(),
                "message".to_string(),
            ],
            email_field: "email".to_string(),
        }
    }
}

/// Mobile menu settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuConfig {
    pub toggle_selector: String,
    pub nav_selector: String,
    /// Class mirrored onto both the toggle and the nav while open.
    pub open_class: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            toggle_selector: ".menu-toggle".to_string(),
            nav_selector: "nav".to_string(),
            open_class: "active".to_string(),
        }
    }
}

/// Console log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Parse a sparse TOML document, layer it over the stock defaults, then
/// deserialize and validate the result.
///
/// Blank input (including whitespace-only inline script bodies) yields the
/// defaults. Unknown keys fail deserialization.
pub fn load_config_str(source: &str) -> Result<BehaviorConfig, ConfigError> {
    let mut layered = match toml::Value::try_from(BehaviorConfig::default()) {
        Ok(toml::Value::Table(table)) => table,
        _ => unreachable!("BehaviorConfig serializes to a table"),
    };
    if !source.trim().is_empty() {
        let overrides: toml::Table = toml::from_str(source)?;
        layer(&mut layered, overrides);
    }
    let config: BehaviorConfig = toml::Value::Table(layered).try_into()?;
    config.validate()?;
    Ok(config)
}

/// Tables merge key by key; any other override replaces the stock value,
/// arrays included.
fn layer(stock: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        let merged = match (stock.remove(&key), value) {
            (Some(toml::Value::Table(mut section)), toml::Value::Table(nested)) => {
                layer(&mut section, nested);
                toml::Value::Table(section)
            }
            (_, value) => value,
        };
        stock.insert(key, merged);
    }
}

/// Returns a fully-commented stock config document with every key.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Behavior Configuration
# ============================
# All settings are optional. Values shown below are the defaults.
# Embed overrides in the page as:
#   <script type="application/toml" id="folio-config"> ... </script>
# Unknown keys cause the whole document to be ignored (and logged).

# ---------------------------------------------------------------------------
# Scroll-spy navigation
# ---------------------------------------------------------------------------
[navigation]
link_selector = "nav a"
section_selector = "section"
# In-page anchors that scroll smoothly instead of jumping.
anchor_selector = "a[href^=\"#\"]"
# A section becomes current once the page is scrolled to (top - threshold).
threshold = 200.0
active_class = "active"

# ---------------------------------------------------------------------------
# Reveal-on-view animation
# ---------------------------------------------------------------------------
[reveal]
selectors = [".skill-box", ".service-tag", ".experience-item"]
class = "fade-in"
# Fraction of the element that must be visible (0-1).
threshold = 0.1
root_margin = "0px 0px -100px 0px"

# ---------------------------------------------------------------------------
# Lazy images
# ---------------------------------------------------------------------------
[lazy_images]
source_attribute = "data-src"

# ---------------------------------------------------------------------------
# Resume export
# ---------------------------------------------------------------------------
[export]
content_id = "resumeContent"
button_id = "downloadBtn"
filename = "Resume.pdf"
margin = 0.2
image_type = "jpeg"
# Raster quality (0-1).
image_quality = 0.98
raster_scale = 2
use_cors = true
pipeline_logging = false
unit = "in"
format = "letter"
orientation = "portrait"
busy_label = "Generating PDF..."
busy_opacity = 0.7

# ---------------------------------------------------------------------------
# Notifications
# ---------------------------------------------------------------------------
[notifications]
enter_ms = 300
display_ms = 3000
exit_ms = 300
success_color = "#4caf50"
error_color = "#f44336"

[notifications.messages]
export_succeeded = "Resume downloaded successfully!"
export_failed = "Failed to generate PDF. Please try again."
contact_accepted = "Message sent successfully!"
contact_rejected = "Please fill in all required fields."

# ---------------------------------------------------------------------------
# Contact form
# ---------------------------------------------------------------------------
[contact]
form_id = "contactForm"
required_fields = ["name", "email", "message"]
email_field = "email"

# ---------------------------------------------------------------------------
# Mobile menu
# ---------------------------------------------------------------------------
[menu]
toggle_selector = ".menu-toggle"
nav_selector = "nav"
open_class = "active"

# ---------------------------------------------------------------------------
# Logging (off | error | warn | info | debug)
# ---------------------------------------------------------------------------
[logging]
level = "info"
"##
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_page_values() {
        let config = BehaviorConfig::default();
        assert_eq!(config.navigation.threshold, 200.0);
        assert_eq!(config.reveal.threshold, 0.1);
        assert_eq!(config.reveal.root_margin, "0px 0px -100px 0px");
        assert_eq!(config.export.raster_scale, 2);
        assert_eq!(config.export.orientation, Orientation::Portrait);
        assert_eq!(config.notifications.display_ms, 3000);
        assert_eq!(config.notifications.exit_ms, 300);
    }

    #[test]
    fn stock_toml_matches_defaults() {
        let parsed: BehaviorConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(parsed, BehaviorConfig::default());
    }

    #[test]
    fn blank_source_yields_defaults() {
        let config = load_config_str("  \n").unwrap();
        assert_eq!(config, BehaviorConfig::default());
    }

    #[test]
    fn sparse_overlay_keeps_other_defaults() {
        let config = load_config_str(
            r#"
            [export]
            filename = "Jane_Doe_Resume.pdf"
            "#,
        )
        .unwrap();
        assert_eq!(config.export.filename, "Jane_Doe_Resume.pdf");
        assert_eq!(config.export.margin, 0.2);
        assert_eq!(config.navigation, NavigationConfig::default());
    }

    #[test]
    fn nested_overlay_merges_messages() {
        let config = load_config_str(
            r#"
            [notifications.messages]
            contact_accepted = "Thanks!"
            "#,
        )
        .unwrap();
        assert_eq!(config.notifications.messages.contact_accepted, "Thanks!");
        assert_eq!(
            config.notifications.messages.export_failed,
            "Failed to generate PDF. Please try again."
        );
    }

    #[test]
    fn unknown_key_rejected() {
        let result = load_config_str(
            r#"
            [navigation]
            treshold = 100
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn malformed_toml_rejected() {
        assert!(matches!(
            load_config_str("[export"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn out_of_range_quality_rejected() {
        let result = load_config_str("[export]\nimage_quality = 1.5\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn zero_raster_scale_rejected() {
        let result = load_config_str("[export]\nraster_scale = 0\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn nan_threshold_rejected() {
        let result = load_config_str("[navigation]\nthreshold = nan\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn nan_and_infinite_margin_rejected() {
        for margin in ["nan", "inf", "-0.5"] {
            let result = load_config_str(&format!("[export]\nmargin = {margin}\n"));
            assert!(
                matches!(result, Err(ConfigError::Validation(_))),
                "margin = {margin} accepted"
            );
        }
    }

    #[test]
    fn empty_required_fields_rejected() {
        let result = load_config_str("[contact]\nrequired_fields = []\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn merge_replaces_arrays_wholesale() {
        let config = load_config_str("[reveal]\nselectors = [\".card\"]\n").unwrap();
        assert_eq!(config.reveal.selectors, vec![".card".to_string()]);
        assert_eq!(config.reveal.selector_list(), ".card");
    }

    #[test]
    fn reveal_selector_list_joins_with_commas() {
        assert_eq!(
            RevealConfig::default().selector_list(),
            ".skill-box, .service-tag, .experience-item"
        );
    }

    #[test]
    fn lazy_selector_uses_attribute() {
        assert_eq!(LazyImagesConfig::default().selector(), "img[data-src]");
    }

    #[test]
    fn log_level_maps_to_filter() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(log::LevelFilter::from(LogLevel::Off), log::LevelFilter::Off);
    }
}
