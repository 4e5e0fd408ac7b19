//! Page configuration.
//!
//! Every tunable the page uses (selectors, thresholds, durations,
//! breakpoints) lives here. All sections default to the values the landing
//! page ships with, so an empty TOML document is a valid configuration.
//!
//! # Example
//!
//! ```
//! use spark_page::config::PageConfig;
//!
//! let config = PageConfig::from_toml_str(r#"
//!     [counter]
//!     duration_ms = 1500
//!
//!     [toast]
//!     welcome_message = "Hello!"
//! "#).unwrap();
//!
//! assert_eq!(config.counter.duration_ms, 1500);
//! assert_eq!(config.reveal.threshold, 0.12);
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::dom::Selector;
use crate::error::ConfigError;
use crate::types::RootMargin;

// =============================================================================
// SECTIONS
// =============================================================================

/// Scroll-reveal animation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub selector: String,
    pub threshold: f64,
    pub root_margin: RootMargin,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".category-card, .feature-item, .plan-card, .section-header, .hero-text"
                .to_string(),
            threshold: 0.12,
            root_margin: RootMargin::new(0.0, 0.0, -80.0, 0.0),
        }
    }
}

/// Lazy image loading settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LazyConfig {
    pub selector: String,
    /// Attribute holding the deferred image source.
    pub source_attribute: String,
    pub threshold: f64,
    pub root_margin: RootMargin,
}

impl Default for LazyConfig {
    fn default() -> Self {
        Self {
            selector: "img[data-src]".to_string(),
            source_attribute: "data-src".to_string(),
            threshold: 0.0,
            root_margin: RootMargin::new(0.0, 0.0, 120.0, 0.0),
        }
    }
}

/// Count-up animation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub selector: String,
    /// Attribute holding the target integer.
    pub target_attribute: String,
    pub threshold: f64,
    pub duration_ms: u64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            selector: ".channels-counter".to_string(),
            target_attribute: "data-target".to_string(),
            threshold: 0.2,
            duration_ms: 2000,
        }
    }
}

/// Theme toggle settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Preference store key.
    pub storage_key: String,
    pub toggle: String,
    pub icon: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            toggle: "#themeToggle".to_string(),
            icon: ".theme-icon".to_string(),
        }
    }
}

/// Mobile navigation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub trigger: String,
    pub menu: String,
    /// Viewport widths above this force the menu closed.
    pub breakpoint: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            trigger: "#hamburger".to_string(),
            menu: "#navLinks".to_string(),
            breakpoint: 860.0,
        }
    }
}

/// Header and hero scroll effects.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub header: String,
    /// Offset (px) past which the header counts as scrolled.
    pub scrolled_offset: f64,
    pub hero_text: String,
    pub parallax_factor: f64,
    pub anchors: String,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            header: "#header".to_string(),
            scrolled_offset: 60.0,
            hero_text: ".hero .hero-text".to_string(),
            parallax_factor: 0.06,
            anchors: "a[href^=\"#\"]".to_string(),
        }
    }
}

/// Responsive image sizing and resize debouncing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Widths below this are mobile.
    pub mobile_below: f64,
    /// Widths below this (and not mobile) are tablet.
    pub tablet_below: f64,
    pub phone_max_width_mobile: u32,
    pub phone_max_width_tablet: u32,
    pub layout_debounce_ms: u64,
    pub vh_debounce_ms: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mobile_below: 768.0,
            tablet_below: 1024.0,
            phone_max_width_mobile: 160,
            phone_max_width_tablet: 200,
            layout_debounce_ms: 250,
            vh_debounce_ms: 100,
        }
    }
}

/// Toast and modal settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub duration_ms: u64,
    pub exit_ms: u64,
    pub welcome_message: Option<String>,
    pub welcome_delay_ms: u64,
    pub plan_button: String,
    pub plan_card: String,
    pub plan_name: String,
    pub default_plan_name: String,
    pub cta_buttons: String,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            duration_ms: 3000,
            exit_ms: 300,
            welcome_message: Some("Welcome!".to_string()),
            welcome_delay_ms: 1200,
            plan_button: ".plan-button".to_string(),
            plan_card: ".plan-card".to_string(),
            plan_name: ".plan-name".to_string(),
            default_plan_name: "Plan".to_string(),
            cta_buttons: ".cta-button, .plan-button".to_string(),
        }
    }
}

// =============================================================================
// PAGE CONFIG
// =============================================================================

/// Complete page configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub reveal: RevealConfig,
    pub lazy: LazyConfig,
    pub counter: CounterConfig,
    pub theme: ThemeConfig,
    pub nav: NavConfig,
    pub scroll: ScrollConfig,
    pub layout: LayoutConfig,
    pub toast: ToastConfig,
}

impl PageConfig {
    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PageConfig =
            toml::from_str(content).map_err(|source| ConfigError::ParseError { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file.
    ///
    /// A missing file yields `PageConfig::default()`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no page config, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content)
    }

    /// Validate value ranges and selector syntax.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, threshold) in [
            ("reveal.threshold", self.reveal.threshold),
            ("lazy.threshold", self.lazy.threshold),
            ("counter.threshold", self.counter.threshold),
        ] {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(invalid(format!("{name} must be within [0, 1], got {threshold}")));
            }
        }

        if self.counter.duration_ms == 0 {
            return Err(invalid("counter.duration_ms must be positive"));
        }
        if self.toast.duration_ms == 0 {
            return Err(invalid("toast.duration_ms must be positive"));
        }
        if self.layout.mobile_below > self.layout.tablet_below {
            return Err(invalid("layout.mobile_below must not exceed layout.tablet_below"));
        }

        for (name, selector) in [
            ("reveal.selector", &self.reveal.selector),
            ("lazy.selector", &self.lazy.selector),
            ("counter.selector", &self.counter.selector),
            ("theme.toggle", &self.theme.toggle),
            ("theme.icon", &self.theme.icon),
            ("nav.trigger", &self.nav.trigger),
            ("nav.menu", &self.nav.menu),
            ("scroll.header", &self.scroll.header),
            ("scroll.hero_text", &self.scroll.hero_text),
            ("scroll.anchors", &self.scroll.anchors),
            ("toast.plan_button", &self.toast.plan_button),
            ("toast.plan_card", &self.toast.plan_card),
            ("toast.plan_name", &self.toast.plan_name),
            ("toast.cta_buttons", &self.toast.cta_buttons),
        ] {
            Selector::parse(selector)
                .map_err(|message| invalid(format!("{name}: {message}")))?;
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError { message: message.into() }
}

// =============================================================================
// TESTS
// =============================================================================
