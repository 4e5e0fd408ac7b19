//! Chrome Module - page furniture outside the one-shot core
//!
//! - **Theme** - dark/light preference
//! - **Layout** - mobile nav, header scroll state, device size buckets
//! - **Overlay** - plan modal and toast contracts, presenter trait
//! - **Reducer** - pure `(state, event) -> (state, effects)` transitions
//!
//! Handlers hold no state between events; everything lives in
//! [`ChromeState`], which the pipeline publishes as a signal.

mod layout;
mod overlay;
mod reducer;
mod theme;

pub use layout::{DeviceClass, HeaderState, NavState};
pub use overlay::{Modal, Presenter, Toast, ToastId, ToastPosition, TracingPresenter};
pub use reducer::{reduce, ChromeEffect, ChromeEvent, ChromeState};
pub use theme::Theme;
