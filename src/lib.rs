//! # spark-page
//!
//! Viewport-triggered one-shot actions and page chrome for a headless
//! document model.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for the
//! published chrome state.
//!
//! ## Architecture
//!
//! Elements are bound to one-shot actions (count-up, reveal, lazy image).
//! A viewport watcher reports when they come into view, the dispatcher fires
//! each action at most once and releases its subscription. Chrome behavior
//! (theme, nav, header, modals, toasts) is a pure reducer whose effects the
//! pipeline applies.
//!
//! ```text
//! Host events → Page → Watcher → Dispatcher → Actions
//!                  └→ reduce(ChromeState, ChromeEvent) → ChromeEffect
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (ElementId, Rect, Viewport, RootMargin, HostCapabilities)
//! - [`dom`] - Headless element tree and selectors
//! - [`observe`] - Viewport watcher and one-shot dispatcher
//! - [`actions`] - Counter, reveal and lazy-image actions
//! - [`scheduler`] - Animation frames, timers, debouncing
//! - [`chrome`] - Theme, navigation, header, overlays
//! - [`state`] - Persistent preferences
//! - [`pipeline`] - Mounted page and host event entry points

pub mod actions;
pub mod analytics;
pub mod chrome;
pub mod config;
pub mod dom;
pub mod error;
pub mod logging;
pub mod observe;
pub mod pipeline;
pub mod scheduler;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::PageConfig;
pub use error::{ActionError, ConfigError, PageError, PreferenceError, WatchError};
pub use pipeline::{HostServices, Page};
