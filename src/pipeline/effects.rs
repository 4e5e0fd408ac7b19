//! Effect application - turns reducer output into document mutations,
//! preference writes and presenter calls.

use super::mount::Page;
use crate::chrome::{ChromeEffect, DeviceClass, Theme};
use crate::dom::Selector;
use crate::types::HostCapabilities;

/// Format a pixel value for a style property: at most three decimals, no
/// trailing zeros.
pub(crate) fn css_px(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    // -0.0 would print as "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}px")
}

impl Page {
    pub(super) fn apply_effect(&mut self, effect: ChromeEffect) {
        match effect {
            ChromeEffect::ApplyTheme(theme) => self.apply_theme(theme),

            ChromeEffect::PersistTheme(theme) => {
                // The toggle already happened; a failed write only loses persistence
                if let Err(error) = self.preferences.set(&self.config.theme.storage_key, theme.as_str())
                {
                    tracing::warn!(%error, theme = theme.as_str(), "failed to persist theme");
                }
            }

            ChromeEffect::SetNavOpen(open) => {
                for id in [
                    self.document.query(&self.selectors.nav_menu),
                    self.document.query(&self.selectors.nav_trigger),
                ]
                .into_iter()
                .flatten()
                {
                    if let Some(node) = self.document.get_mut(id) {
                        node.set_class("active", open);
                    }
                }
                let body = self.document.body();
                if let Some(body) = self.document.get_mut(body) {
                    body.set_style("overflow", if open { "hidden" } else { "" });
                }
            }

            ChromeEffect::SetHeaderScrolled(scrolled) => {
                if let Some(header) = self.document.query(&self.selectors.header) {
                    if let Some(node) = self.document.get_mut(header) {
                        node.set_class("scrolled", scrolled);
                    }
                }
            }

            ChromeEffect::SetParallax(offset) => {
                let transform = format!("translateY({})", css_px(offset));
                self.style_all(|s| &s.hero_text, "transform", &transform);
            }

            ChromeEffect::ScrollIntoView(target) => {
                let Some(rect) = self.document.get(target).map(|node| node.rect()) else {
                    return;
                };
                self.scroll_to(rect.y);
            }

            ChromeEffect::ApplyDevice(device) => self.apply_device(device),

            ChromeEffect::ShowModal(modal) => self.presenter.show_modal(&modal),

            ChromeEffect::CloseModal => self.presenter.close_modal(),
        }
    }

    fn apply_theme(&mut self, theme: Theme) {
        let root = self.document.root();
        if let Some(root) = self.document.get_mut(root) {
            root.set_attr("data-theme", theme.as_str());
        }
        if let Some(icon) = self.document.query(&self.selectors.theme_icon) {
            if let Some(node) = self.document.get_mut(icon) {
                node.set_text(theme.icon());
            }
        }
    }

    fn apply_device(&mut self, device: DeviceClass) {
        let hero_display = if device.hides_hero_mockup() { "none" } else { "" };
        self.style_all(|s| &s.hero_mockup, "display", hero_display);

        let phone_width = device
            .phone_max_width(&self.config.layout)
            .map(|px| css_px(f64::from(px)))
            .unwrap_or_default();
        self.style_all(|s| &s.phone_mockup, "max-width", &phone_width);

        tracing::debug!(?device, "device layout applied");
    }

    /// Write `--vh` on the root from the current viewport height.
    pub(super) fn apply_viewport_height(&mut self) {
        let value = css_px(self.viewport.height * 0.01);
        let root = self.document.root();
        if let Some(root) = self.document.get_mut(root) {
            root.set_style("--vh", value);
        }
    }

    pub(super) fn apply_device_classes(&mut self) {
        let body = self.document.body();
        let Some(body) = self.document.get_mut(body) else {
            return;
        };
        if self.capabilities.contains(HostCapabilities::TOUCH) {
            body.add_class("touch-device");
            body.set_style("-webkit-overflow-scrolling", "touch");
        }
        if self.capabilities.contains(HostCapabilities::MOBILE_AGENT) {
            body.add_class("mobile-device");
        }
    }

    fn style_all(
        &mut self,
        selector: impl Fn(&super::mount::Selectors) -> &Selector,
        property: &str,
        value: &str,
    ) {
        for id in self.document.query_all(selector(&self.selectors)) {
            if let Some(node) = self.document.get_mut(id) {
                node.set_style(property, value);
            }
        }
    }
}
