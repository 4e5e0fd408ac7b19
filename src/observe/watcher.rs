//! Viewport watcher contract.

use crate::error::WatchError;
use crate::types::{ElementId, RootMargin};

/// Subscription handle issued by a [`ViewportWatcher`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatchHandle(pub(crate) u64);

/// When an element counts as inside the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WatchConfig {
    /// Visible fraction (0..=1) required to count as intersecting.
    pub threshold: f64,
    /// Grows or shrinks the viewport before testing.
    pub root_margin: RootMargin,
}

impl WatchConfig {
    pub fn new(threshold: f64, root_margin: RootMargin) -> Self {
        Self { threshold, root_margin }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self::new(0.0, RootMargin::ZERO)
    }
}

/// Intersection state change for one subscription.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Notification {
    pub handle: WatchHandle,
    pub element: ElementId,
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
}

/// Subscription interface over the host's visibility primitive.
///
/// Notifications are produced by the implementation and handed to the
/// dispatcher by the host; this trait only covers the subscription
/// lifecycle.
pub trait ViewportWatcher {
    /// Start watching `target`.
    ///
    /// Returns [`WatchError::Unsupported`] when the host cannot observe
    /// visibility, so callers can fall back to firing immediately.
    fn subscribe(&mut self, target: ElementId, config: WatchConfig) -> Result<WatchHandle, WatchError>;

    /// Stop delivering notifications for `handle`. Returns false for an
    /// unknown or already released handle.
    fn unsubscribe(&mut self, handle: WatchHandle) -> bool;
}
