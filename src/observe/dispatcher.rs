//! One-Shot Action Dispatcher
//!
//! Binds a viewport subscription to an action per element and guarantees
//! the action runs at most once, on the first genuine viewport entry.
//!
//! # Lifecycle
//!
//! ```text
//! register → subscribe → notification(is_intersecting) → fire → unsubscribe → release
//! ```
//!
//! Actions are `FnOnce`, so a registration physically cannot run its action
//! twice: firing moves the closure out. A failing action is still treated
//! as fired. Its error goes to the [`ErrorSink`] and is never retried.
//!
//! # Example
//!
//! ```
//! use spark_page::dom::{Document, ElementSpec};
//! use spark_page::observe::{Dispatcher, IntersectionWatcher, WatchConfig, ActionContext};
//! use spark_page::scheduler::FrameScheduler;
//! use spark_page::{Rect, Viewport};
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let card = doc.append(body, ElementSpec::new("div").rect(Rect::new(0.0, 100.0, 200.0, 100.0)));
//!
//! let mut watcher = IntersectionWatcher::new();
//! let mut frames = FrameScheduler::new();
//! let mut dispatcher = Dispatcher::new();
//!
//! dispatcher.register(&mut watcher, card, WatchConfig::default(), Box::new(|el, cx| {
//!     if let Some(node) = cx.document.get_mut(el) {
//!         node.add_class("visible");
//!     }
//!     Ok(())
//! })).unwrap();
//!
//! let notes = watcher.poll(&doc, &Viewport::new(1000.0, 800.0));
//! let mut cx = ActionContext { document: &mut doc, frames: &mut frames };
//! assert_eq!(dispatcher.deliver(&mut watcher, notes, &mut cx), 1);
//! assert!(doc.get(card).unwrap().has_class("visible"));
//! ```

use std::collections::HashMap;

use super::watcher::{Notification, ViewportWatcher, WatchConfig, WatchHandle};
use crate::dom::Document;
use crate::error::{ActionError, WatchError};
use crate::scheduler::FrameScheduler;
use crate::types::ElementId;

// =============================================================================
// TYPES
// =============================================================================

/// What an action may touch while firing.
pub struct ActionContext<'a> {
    pub document: &'a mut Document,
    pub frames: &'a mut FrameScheduler,
}

/// A one-shot side effect bound to an element.
pub type Action = Box<dyn FnOnce(ElementId, &mut ActionContext<'_>) -> Result<(), ActionError>>;

/// Receives action failures.
pub trait ErrorSink {
    fn report(&mut self, error: ActionError);
}

impl<F> ErrorSink for F
where
    F: FnMut(ActionError),
{
    fn report(&mut self, error: ActionError) {
        self(error)
    }
}

/// Default sink: log and move on.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn report(&mut self, error: ActionError) {
        tracing::warn!(element = %error.element(), %error, "one-shot action failed");
    }
}

struct Registration {
    element: ElementId,
    /// `None` once fired.
    action: Option<Action>,
}

// =============================================================================
// DISPATCHER
// =============================================================================

pub struct Dispatcher {
    registrations: HashMap<WatchHandle, Registration>,
    sink: Box<dyn ErrorSink>,
    fired: usize,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::with_sink(TracingSink)
    }

    pub fn with_sink(sink: impl ErrorSink + 'static) -> Self {
        Self::with_boxed_sink(Box::new(sink))
    }

    pub fn with_boxed_sink(sink: Box<dyn ErrorSink>) -> Self {
        Self {
            registrations: HashMap::new(),
            sink,
            fired: 0,
        }
    }

    /// Registrations still waiting for viewport entry.
    pub fn pending(&self) -> usize {
        self.registrations.len()
    }

    /// Total actions fired (including failed ones).
    pub fn fired(&self) -> usize {
        self.fired
    }

    pub fn is_registered(&self, element: ElementId) -> bool {
        self.registrations.values().any(|reg| reg.element == element)
    }

    /// Subscribe `element` and bind `action` to its first viewport entry.
    ///
    /// On [`WatchError::Unsupported`] nothing is registered and the action
    /// is dropped; use [`register_or_fire`](Self::register_or_fire) to
    /// apply the immediate-fire fallback instead.
    pub fn register(
        &mut self,
        watcher: &mut dyn ViewportWatcher,
        element: ElementId,
        config: WatchConfig,
        action: Action,
    ) -> Result<WatchHandle, WatchError> {
        let handle = watcher.subscribe(element, config)?;
        self.registrations.insert(handle, Registration { element, action: Some(action) });
        tracing::trace!(%element, ?handle, "registered one-shot action");
        Ok(handle)
    }

    /// Like [`register`](Self::register), but when the watcher is
    /// unsupported the action fires right away.
    ///
    /// Returns `true` if the action fired immediately.
    pub fn register_or_fire(
        &mut self,
        watcher: &mut dyn ViewportWatcher,
        element: ElementId,
        config: WatchConfig,
        action: Action,
        cx: &mut ActionContext<'_>,
    ) -> bool {
        match watcher.subscribe(element, config) {
            Ok(handle) => {
                self.registrations.insert(handle, Registration { element, action: Some(action) });
                tracing::trace!(%element, ?handle, "registered one-shot action");
                false
            }
            Err(WatchError::Unsupported) => {
                tracing::debug!(%element, "viewport observation unsupported, firing immediately");
                self.invoke(element, action, cx);
                true
            }
        }
    }

    /// Handle a batch of notifications. Returns how many actions fired.
    ///
    /// Notifications that are not intersecting, or that name a handle this
    /// dispatcher no longer owns, are ignored.
    pub fn deliver(
        &mut self,
        watcher: &mut dyn ViewportWatcher,
        notifications: impl IntoIterator<Item = Notification>,
        cx: &mut ActionContext<'_>,
    ) -> usize {
        let mut fired = 0;

        for note in notifications {
            if !note.is_intersecting {
                continue;
            }
            let Some(registration) = self.registrations.get_mut(&note.handle) else {
                continue;
            };
            let Some(action) = registration.action.take() else {
                continue;
            };
            let element = registration.element;

            let result = action(element, cx);
            self.fired += 1;
            fired += 1;

            watcher.unsubscribe(note.handle);
            self.registrations.remove(&note.handle);
            tracing::trace!(%element, ratio = note.intersection_ratio, "one-shot action fired");

            if let Err(error) = result {
                self.sink.report(error);
            }
        }

        fired
    }

    /// Release registrations whose element left the document before ever
    /// entering the viewport. Their actions are dropped without firing.
    pub fn prune(&mut self, watcher: &mut dyn ViewportWatcher, document: &Document) -> usize {
        let stale: Vec<WatchHandle> = self
            .registrations
            .iter()
            .filter(|(_, reg)| !document.is_connected(reg.element))
            .map(|(handle, _)| *handle)
            .collect();

        for handle in &stale {
            watcher.unsubscribe(*handle);
            self.registrations.remove(handle);
        }
        if !stale.is_empty() {
            tracing::debug!(count = stale.len(), "released registrations for removed elements");
        }
        stale.len()
    }

    fn invoke(&mut self, element: ElementId, action: Action, cx: &mut ActionContext<'_>) {
        self.fired += 1;
        if let Err(error) = action(element, cx) {
            self.sink.report(error);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
