//! Chrome reducer.
//!
//! `(state, event) -> (state, effects)` with no I/O. The pipeline turns
//! effects into document mutations, preference writes and presenter calls.

use super::layout::{DeviceClass, HeaderState, NavState};
use super::overlay::Modal;
use super::theme::Theme;
use crate::config::PageConfig;
use crate::types::ElementId;

/// Page chrome state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChromeState {
    pub theme: Theme,
    pub nav: NavState,
    pub header: HeaderState,
    pub device: DeviceClass,
    pub modal_open: bool,
}

/// Interactions the chrome reacts to.
#[derive(Clone, Debug, PartialEq)]
pub enum ChromeEvent {
    ThemeToggled,
    NavTriggerClicked,
    /// Click landed outside both the menu and its trigger.
    OutsideClick,
    Scrolled { offset: f64 },
    /// Debounced viewport width change.
    Resized { width: f64 },
    /// In-page anchor with an existing target.
    AnchorFollowed { target: ElementId },
    PlanChosen { plan: String },
    ModalDismissed,
}

/// Side effects requested by the reducer.
#[derive(Clone, Debug, PartialEq)]
pub enum ChromeEffect {
    /// Write `data-theme` and the toggle icon.
    ApplyTheme(Theme),
    PersistTheme(Theme),
    SetNavOpen(bool),
    SetHeaderScrolled(bool),
    /// Hero text translation in pixels.
    SetParallax(f64),
    ScrollIntoView(ElementId),
    ApplyDevice(DeviceClass),
    ShowModal(Modal),
    CloseModal,
}

/// Advance the chrome state by one event.
pub fn reduce(
    state: &ChromeState,
    event: ChromeEvent,
    config: &PageConfig,
) -> (ChromeState, Vec<ChromeEffect>) {
    let mut next = state.clone();
    let mut effects = Vec::new();

    match event {
        ChromeEvent::ThemeToggled => {
            next.theme = state.theme.toggled();
            effects.push(ChromeEffect::ApplyTheme(next.theme));
            effects.push(ChromeEffect::PersistTheme(next.theme));
        }

        ChromeEvent::NavTriggerClicked => {
            next.nav = state.nav.toggled();
            effects.push(ChromeEffect::SetNavOpen(next.nav.is_open()));
        }

        ChromeEvent::OutsideClick => {
            if state.nav.is_open() {
                next.nav = NavState::Closed;
                effects.push(ChromeEffect::SetNavOpen(false));
            }
        }

        ChromeEvent::Scrolled { offset } => {
            next.header = HeaderState::from_offset(offset, config.scroll.scrolled_offset);
            effects.push(ChromeEffect::SetHeaderScrolled(next.header.is_scrolled()));
            effects.push(ChromeEffect::SetParallax(offset * config.scroll.parallax_factor));
        }

        ChromeEvent::Resized { width } => {
            next.device = DeviceClass::from_width(width, &config.layout);
            effects.push(ChromeEffect::ApplyDevice(next.device));
            if width > config.nav.breakpoint && state.nav.is_open() {
                next.nav = NavState::Closed;
                effects.push(ChromeEffect::SetNavOpen(false));
            }
        }

        ChromeEvent::AnchorFollowed { target } => {
            effects.push(ChromeEffect::ScrollIntoView(target));
            next.nav = NavState::Closed;
            effects.push(ChromeEffect::SetNavOpen(false));
        }

        ChromeEvent::PlanChosen { plan } => {
            next.modal_open = true;
            effects.push(ChromeEffect::ShowModal(Modal { plan }));
        }

        ChromeEvent::ModalDismissed => {
            if state.modal_open {
                next.modal_open = false;
                effects.push(ChromeEffect::CloseModal);
            }
        }
    }

    (next, effects)
}
