//! Mount API - page lifecycle and host event entry points.
//!
//! # Example
//!
//! ```
//! use spark_page::config::PageConfig;
//! use spark_page::dom::{Document, ElementSpec};
//! use spark_page::pipeline::{HostServices, Page};
//! use spark_page::Rect;
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let img = doc.append(
//!     body,
//!     ElementSpec::new("img")
//!         .class("lazy")
//!         .attr("data-src", "/hero.png")
//!         .rect(Rect::new(0.0, 2000.0, 400.0, 300.0)),
//! );
//!
//! let mut page = Page::mount(doc, HostServices::headless(), PageConfig::default()).unwrap();
//! page.ready();
//! assert_eq!(page.document().get(img).unwrap().attr("src"), None);
//!
//! page.scroll_to(1500.0);
//! assert_eq!(page.document().get(img).unwrap().attr("src"), Some("/hero.png"));
//! ```

use spark_signals::{signal, Signal};

use super::host::HostServices;
use crate::actions::{
    arm_reveal, counter_action, counter_final_action, lazy_image_action, reveal_action,
};
use crate::analytics::AnalyticsSink;
use crate::chrome::{
    reduce, ChromeEffect, ChromeEvent, ChromeState, DeviceClass, HeaderState, Presenter, Theme,
    Toast, ToastId, ToastPosition,
};
use crate::config::PageConfig;
use crate::dom::{Document, Selector};
use crate::error::{ConfigError, PageError};
use crate::observe::{Action, ActionContext, Dispatcher, IntersectionWatcher, WatchConfig};
use crate::scheduler::{Debouncer, FrameScheduler, TimerQueue};
use crate::state::PreferenceStore;
use crate::types::{ElementId, HostCapabilities, RootMargin, Viewport};

// =============================================================================
// SELECTORS
// =============================================================================

/// Every selector the page uses, parsed once at mount.
pub(super) struct Selectors {
    pub(super) reveal: Selector,
    pub(super) lazy: Selector,
    pub(super) counter: Selector,
    pub(super) theme_toggle: Selector,
    pub(super) theme_icon: Selector,
    pub(super) nav_trigger: Selector,
    pub(super) nav_menu: Selector,
    pub(super) header: Selector,
    pub(super) hero_text: Selector,
    pub(super) anchors: Selector,
    pub(super) plan_button: Selector,
    pub(super) plan_card: Selector,
    pub(super) plan_name: Selector,
    pub(super) cta: Selector,
    pub(super) hero_mockup: Selector,
    pub(super) phone_mockup: Selector,
}

const HERO_MOCKUP: &str = "img.hero-mockup";
const PHONE_MOCKUP: &str = "img.phone-mockup";

impl Selectors {
    fn parse(config: &PageConfig) -> Result<Self, ConfigError> {
        let parse = |name: &str, source: &str| {
            Selector::parse(source).map_err(|message| ConfigError::ValidationError {
                message: format!("{name}: {message}"),
            })
        };

        Ok(Self {
            reveal: parse("reveal.selector", &config.reveal.selector)?,
            lazy: parse("lazy.selector", &config.lazy.selector)?,
            counter: parse("counter.selector", &config.counter.selector)?,
            theme_toggle: parse("theme.toggle", &config.theme.toggle)?,
            theme_icon: parse("theme.icon", &config.theme.icon)?,
            nav_trigger: parse("nav.trigger", &config.nav.trigger)?,
            nav_menu: parse("nav.menu", &config.nav.menu)?,
            header: parse("scroll.header", &config.scroll.header)?,
            hero_text: parse("scroll.hero_text", &config.scroll.hero_text)?,
            anchors: parse("scroll.anchors", &config.scroll.anchors)?,
            plan_button: parse("toast.plan_button", &config.toast.plan_button)?,
            plan_card: parse("toast.plan_card", &config.toast.plan_card)?,
            plan_name: parse("toast.plan_name", &config.toast.plan_name)?,
            cta: parse("toast.cta_buttons", &config.toast.cta_buttons)?,
            hero_mockup: parse("hero mockup", HERO_MOCKUP)?,
            phone_mockup: parse("phone mockup", PHONE_MOCKUP)?,
        })
    }
}

// =============================================================================
// PAGE
// =============================================================================

/// One-shot behaviors bound at `ready`, in per-element binding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetupKind {
    Counter,
    Reveal,
    Lazy,
}

/// Deferred work on the page clock.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum PageTimer {
    Welcome(String),
    DismissToast(ToastId),
    RemoveToast(ToastId),
}

/// A mounted page.
///
/// The host owns the event loop and forwards what happens to it:
/// - [`ready`](Self::ready) once the document is complete
/// - [`scroll_to`](Self::scroll_to), [`resize`](Self::resize), [`click`](Self::click)
/// - [`animation_frame`](Self::animation_frame) on every frame
/// - [`advance_to`](Self::advance_to) as its clock moves
pub struct Page {
    pub(super) document: Document,
    pub(super) config: PageConfig,
    pub(super) selectors: Selectors,
    pub(super) viewport: Viewport,
    pub(super) capabilities: HostCapabilities,
    pub(super) watcher: IntersectionWatcher,
    pub(super) dispatcher: Dispatcher,
    pub(super) frames: FrameScheduler,
    pub(super) timers: TimerQueue<PageTimer>,
    pub(super) layout_debounce: Debouncer,
    pub(super) vh_debounce: Debouncer,
    pub(super) state: Signal<ChromeState>,
    pub(super) preferences: Box<dyn PreferenceStore>,
    pub(super) presenter: Box<dyn Presenter>,
    pub(super) analytics: Box<dyn AnalyticsSink>,
    pub(super) next_toast: u64,
    pub(super) ready: bool,
}

impl Page {
    /// Attach page behavior to `document`.
    ///
    /// Validates `config`, restores the stored theme and applies the
    /// viewport height variable and device classes. Viewport-bound actions
    /// are registered later, by [`ready`](Self::ready).
    pub fn mount(
        document: Document,
        host: HostServices,
        config: PageConfig,
    ) -> Result<Self, PageError> {
        config.validate()?;
        let selectors = Selectors::parse(&config)?;

        let HostServices { capabilities, viewport, preferences, presenter, analytics, error_sink } =
            host;

        let theme = Theme::from_stored(preferences.get(&config.theme.storage_key).as_deref());
        let initial = ChromeState {
            theme,
            header: HeaderState::from_offset(viewport.scroll_y, config.scroll.scrolled_offset),
            device: DeviceClass::from_width(viewport.width, &config.layout),
            ..ChromeState::default()
        };
        let header_scrolled = initial.header.is_scrolled();

        let watcher = if capabilities.contains(HostCapabilities::INTERSECTION) {
            IntersectionWatcher::new()
        } else {
            IntersectionWatcher::unsupported()
        };

        let mut page = Self {
            layout_debounce: Debouncer::new(config.layout.layout_debounce_ms),
            vh_debounce: Debouncer::new(config.layout.vh_debounce_ms),
            document,
            config,
            selectors,
            viewport,
            capabilities,
            watcher,
            dispatcher: Dispatcher::with_boxed_sink(error_sink),
            frames: FrameScheduler::new(),
            timers: TimerQueue::new(),
            state: signal(initial),
            preferences,
            presenter,
            analytics,
            next_toast: 0,
            ready: false,
        };

        page.apply_effect(ChromeEffect::ApplyTheme(theme));
        page.apply_effect(ChromeEffect::SetHeaderScrolled(header_scrolled));
        page.apply_viewport_height();
        page.apply_device_classes();

        tracing::info!(
            theme = theme.as_str(),
            capabilities = ?page.capabilities,
            width = page.viewport.width,
            height = page.viewport.height,
            "page mounted"
        );
        Ok(page)
    }

    /// Run one-time setup: bind counters, reveals and lazy images, size
    /// images for the device, schedule the welcome toast, then deliver the
    /// initial visibility poll. Later calls do nothing.
    pub fn ready(&mut self) {
        if self.ready {
            return;
        }
        self.ready = true;

        // Document order across kinds; one element may take several actions
        let mut bindings = Vec::new();
        for element in self.document.descendants(self.document.root()) {
            for kind in [SetupKind::Counter, SetupKind::Reveal, SetupKind::Lazy] {
                if self.selector_for(kind).matches(&self.document, element) {
                    bindings.push((element, kind));
                }
            }
        }

        for (element, kind) in bindings {
            let (config, action) = self.setup_action(element, kind);
            self.bind(element, config, action);
        }

        let device = self.state.get().device;
        self.apply_effect(ChromeEffect::ApplyDevice(device));

        // An empty message disables the welcome toast from TOML
        let welcome = self.config.toast.welcome_message.clone().filter(|m| !m.is_empty());
        if let Some(message) = welcome {
            self.timers.schedule(self.config.toast.welcome_delay_ms, PageTimer::Welcome(message));
        }

        tracing::debug!(
            pending = self.dispatcher.pending(),
            fired = self.dispatcher.fired(),
            "page ready"
        );
        self.refresh_visibility();
    }

    fn selector_for(&self, kind: SetupKind) -> &Selector {
        match kind {
            SetupKind::Counter => &self.selectors.counter,
            SetupKind::Reveal => &self.selectors.reveal,
            SetupKind::Lazy => &self.selectors.lazy,
        }
    }

    fn setup_action(&mut self, element: ElementId, kind: SetupKind) -> (WatchConfig, Action) {
        match kind {
            SetupKind::Counter => {
                let counter = &self.config.counter;
                let action = if self.capabilities.contains(HostCapabilities::ANIMATION_FRAME) {
                    counter_action(&counter.target_attribute, counter.duration_ms)
                } else {
                    counter_final_action(&counter.target_attribute)
                };
                (WatchConfig::new(counter.threshold, RootMargin::ZERO), action)
            }
            SetupKind::Reveal => {
                arm_reveal(&mut self.document, element);
                let reveal = &self.config.reveal;
                (WatchConfig::new(reveal.threshold, reveal.root_margin), reveal_action())
            }
            SetupKind::Lazy => {
                let lazy = &self.config.lazy;
                (
                    WatchConfig::new(lazy.threshold, lazy.root_margin),
                    lazy_image_action(&lazy.source_attribute),
                )
            }
        }
    }

    fn bind(&mut self, element: ElementId, config: WatchConfig, action: Action) {
        let mut cx = ActionContext { document: &mut self.document, frames: &mut self.frames };
        self.dispatcher.register_or_fire(&mut self.watcher, element, config, action, &mut cx);
    }

    // =========================================================================
    // HOST EVENTS
    // =========================================================================

    /// The page scrolled to vertical offset `y`.
    pub fn scroll_to(&mut self, y: f64) {
        self.viewport.scroll_y = y.max(0.0);
        self.dispatch(ChromeEvent::Scrolled { offset: self.viewport.scroll_y });
        self.refresh_visibility();
    }

    /// The viewport changed size. Layout and `--vh` updates are debounced
    /// on the page clock.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.width = width;
        self.viewport.height = height;

        let now = self.timers.now();
        self.layout_debounce.trigger(now);
        self.vh_debounce.trigger(now);
        self.refresh_visibility();
    }

    /// A click landed on `target`.
    ///
    /// Element handlers run before document-level ones, so an anchor inside
    /// the open menu closes it before the outside-click check sees it.
    pub fn click(&mut self, target: ElementId) {
        if !self.document.is_connected(target) {
            return;
        }
        let mut events = Vec::new();

        if let Some(anchor) = self.document.closest(target, &self.selectors.anchors) {
            if let Some(destination) = self.anchor_target(anchor) {
                events.push(ChromeEvent::AnchorFollowed { target: destination });
            }
        }

        if let Some(button) = self.document.closest(target, &self.selectors.plan_button) {
            events.push(ChromeEvent::PlanChosen { plan: self.plan_name(button) });
        }

        if self.document.closest(target, &self.selectors.cta).is_some() {
            self.analytics.track("Button Click", "CTA");
        }

        let inside = |selector: &Selector| {
            self.document
                .query(selector)
                .map(|scope| self.document.contains(scope, target))
        };
        if inside(&self.selectors.theme_toggle) == Some(true) {
            events.push(ChromeEvent::ThemeToggled);
        }
        match (inside(&self.selectors.nav_trigger), inside(&self.selectors.nav_menu)) {
            (Some(true), Some(_)) => events.push(ChromeEvent::NavTriggerClicked),
            (Some(false), Some(false)) => events.push(ChromeEvent::OutsideClick),
            _ => {}
        }

        for event in events {
            self.dispatch(event);
        }
    }

    /// Close the plan modal (close button or backdrop).
    pub fn dismiss_modal(&mut self) {
        self.dispatch(ChromeEvent::ModalDismissed);
    }

    /// Run one animation frame. Returns how many frame tasks are still
    /// pending afterwards.
    pub fn animation_frame(&mut self, timestamp: f64) -> usize {
        self.frames.run_frame(&mut self.document, timestamp)
    }

    /// Move the page clock to `now` milliseconds, firing due timers and
    /// settled debouncers.
    pub fn advance_to(&mut self, now: u64) {
        while let Some(timer) = self.timers.pop_due(now) {
            self.fire_timer(timer);
        }

        let now = self.timers.now();
        if self.layout_debounce.poll(now) {
            self.dispatch(ChromeEvent::Resized { width: self.viewport.width });
        }
        if self.vh_debounce.poll(now) {
            self.apply_viewport_height();
        }
    }

    /// Show a toast now. Dismissal and removal are scheduled on the page
    /// clock.
    pub fn show_toast(&mut self, message: impl Into<String>) -> ToastId {
        let id = ToastId(self.next_toast);
        self.next_toast += 1;

        let toast = Toast {
            id,
            message: message.into(),
            duration_ms: self.config.toast.duration_ms,
            position: ToastPosition::BottomRight,
        };
        self.presenter.show_toast(&toast);
        self.timers.schedule(toast.duration_ms, PageTimer::DismissToast(id));
        id
    }

    fn fire_timer(&mut self, timer: PageTimer) {
        match timer {
            PageTimer::Welcome(message) => {
                self.show_toast(message);
            }
            PageTimer::DismissToast(id) => {
                self.presenter.dismiss_toast(id);
                self.timers.schedule(self.config.toast.exit_ms, PageTimer::RemoveToast(id));
            }
            PageTimer::RemoveToast(id) => self.presenter.remove_toast(id),
        }
    }

    /// Remove `element` from the document. Pending actions bound to it or
    /// its descendants are released without firing.
    pub fn remove_element(&mut self, element: ElementId) -> bool {
        let removed = self.document.remove(element);
        if removed {
            let released = self.dispatcher.prune(&mut self.watcher, &self.document);
            tracing::debug!(%element, released, "element removed");
        }
        removed
    }

    /// Re-poll the watcher and fire actions whose elements entered the
    /// viewport. Call after moving elements through
    /// [`document_mut`](Self::document_mut).
    pub fn refresh_visibility(&mut self) -> usize {
        self.dispatcher.prune(&mut self.watcher, &self.document);
        let notifications = self.watcher.poll(&self.document, &self.viewport);
        if notifications.is_empty() {
            return 0;
        }
        let mut cx = ActionContext { document: &mut self.document, frames: &mut self.frames };
        self.dispatcher.deliver(&mut self.watcher, notifications, &mut cx)
    }

    fn dispatch(&mut self, event: ChromeEvent) {
        let current = self.state.get();
        let (next, effects) = reduce(&current, event, &self.config);
        if next != current {
            self.state.set(next);
        }
        for effect in effects {
            self.apply_effect(effect);
        }
    }

    fn anchor_target(&self, anchor: ElementId) -> Option<ElementId> {
        let href = self.document.get(anchor)?.attr("href")?;
        let id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
        self.document.element_by_id(id)
    }

    fn plan_name(&self, button: ElementId) -> String {
        self.document
            .closest(button, &self.selectors.plan_card)
            .and_then(|card| self.document.query_within(card, &self.selectors.plan_name))
            .and_then(|name| self.document.get(name))
            .map(|name| name.text().trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.config.toast.default_plan_name.clone())
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable document access for host-side layout changes.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn capabilities(&self) -> HostCapabilities {
        self.capabilities
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Current chrome state.
    pub fn state(&self) -> ChromeState {
        self.state.get()
    }

    /// The chrome state signal, for effects that react to it.
    pub fn state_signal(&self) -> Signal<ChromeState> {
        self.state.clone()
    }

    /// Actions still waiting for their element to enter the viewport.
    pub fn pending_actions(&self) -> usize {
        self.dispatcher.pending()
    }

    /// Actions fired so far.
    pub fn fired_actions(&self) -> usize {
        self.dispatcher.fired()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.pending()
    }

    /// Current page clock in milliseconds.
    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    /// Stop the page and hand the document back. Actions that never fired
    /// are dropped.
    pub fn unmount(self) -> Document {
        tracing::info!(
            pending = self.dispatcher.pending(),
            fired = self.dispatcher.fired(),
            "page unmounted"
        );
        self.document
    }
}

// =============================================================================
// TESTS
// =============================================================================
