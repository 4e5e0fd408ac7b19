//! Observe Module - viewport-triggered one-shot actions
//!
//! - **Watcher** - subscription contract over the visibility primitive
//! - **Intersection** - geometric watcher used by the headless host
//! - **Dispatcher** - fires each bound action at most once, then detaches

mod dispatcher;
mod intersection;
mod watcher;

pub use dispatcher::{Action, ActionContext, Dispatcher, ErrorSink, TracingSink};
pub use intersection::IntersectionWatcher;
pub use watcher::{Notification, ViewportWatcher, WatchConfig, WatchHandle};
