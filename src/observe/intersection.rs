//! Geometric viewport watcher.
//!
//! Tests element rectangles against the viewport, the way the browser's
//! intersection observer does, and reports state transitions on each
//! [`poll`](IntersectionWatcher::poll).
//!
//! Semantics:
//! - the first poll after `subscribe` always reports the current state
//! - later polls report only when `is_intersecting` flips
//! - edge contact counts as intersecting (ratio may be 0)
//! - zero-area targets that touch the viewport report ratio 1
//! - detached elements are silent

use super::watcher::{Notification, ViewportWatcher, WatchConfig, WatchHandle};
use crate::dom::Document;
use crate::error::WatchError;
use crate::types::{ElementId, Rect, Viewport};

#[derive(Debug, Clone)]
struct Subscription {
    handle: WatchHandle,
    target: ElementId,
    config: WatchConfig,
    last: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct IntersectionWatcher {
    supported: bool,
    next_handle: u64,
    subscriptions: Vec<Subscription>,
}

impl Default for IntersectionWatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl IntersectionWatcher {
    pub fn new() -> Self {
        Self {
            supported: true,
            next_handle: 0,
            subscriptions: Vec::new(),
        }
    }

    /// A watcher for hosts without intersection observation.
    ///
    /// Every `subscribe` fails with [`WatchError::Unsupported`].
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new()
        }
    }

    pub fn is_supported(&self) -> bool {
        self.supported
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub fn is_watching(&self, target: ElementId) -> bool {
        self.subscriptions.iter().any(|sub| sub.target == target)
    }

    /// Recompute intersections and return state transitions, in
    /// subscription order.
    pub fn poll(&mut self, document: &Document, viewport: &Viewport) -> Vec<Notification> {
        let mut out = Vec::new();

        for sub in &mut self.subscriptions {
            let Some(element) = document.get(sub.target) else {
                continue;
            };
            let (is_intersecting, intersection_ratio) =
                measure(element.rect(), viewport, &sub.config);

            if sub.last == Some(is_intersecting) {
                continue;
            }
            sub.last = Some(is_intersecting);
            out.push(Notification {
                handle: sub.handle,
                element: sub.target,
                is_intersecting,
                intersection_ratio,
            });
        }

        out
    }
}

impl ViewportWatcher for IntersectionWatcher {
    fn subscribe(&mut self, target: ElementId, config: WatchConfig) -> Result<WatchHandle, WatchError> {
        if !self.supported {
            return Err(WatchError::Unsupported);
        }

        let handle = WatchHandle(self.next_handle);
        self.next_handle += 1;
        self.subscriptions.push(Subscription {
            handle,
            target,
            config,
            last: None,
        });
        Ok(handle)
    }

    fn unsubscribe(&mut self, handle: WatchHandle) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|sub| sub.handle != handle);
        before != self.subscriptions.len()
    }
}

/// `(is_intersecting, ratio)` for a target against the margin-adjusted viewport.
fn measure(target: Rect, viewport: &Viewport, config: &WatchConfig) -> (bool, f64) {
    let root = viewport.rect().expand(&config.root_margin);
    let Some(visible) = target.intersection(&root) else {
        return (false, 0.0);
    };

    let area = target.area();
    let ratio = if area > 0.0 { (visible.area() / area).min(1.0) } else { 1.0 };
    (ratio >= config.threshold, ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementSpec;
    use crate::types::RootMargin;

    fn setup(rect: Rect) -> (Document, ElementId) {
        let mut doc = Document::new();
        let body = doc.body();
        let el = doc.append(body, ElementSpec::new("div").rect(rect));
        (doc, el)
    }

    #[test]
    fn test_first_poll_reports_state() {
        let (doc, el) = setup(Rect::new(0.0, 2000.0, 100.0, 100.0));
        let mut watcher = IntersectionWatcher::new();
        watcher.subscribe(el, WatchConfig::default()).unwrap();

        let first = watcher.poll(&doc, &Viewport::new(1000.0, 800.0));
        assert_eq!(first.len(), 1);
        assert!(!first[0].is_intersecting);

        // No transition, no notification
        assert!(watcher.poll(&doc, &Viewport::new(1000.0, 800.0)).is_empty());
    }

    #[test]
    fn test_transition_on_scroll() {
        let (doc, el) = setup(Rect::new(0.0, 2000.0, 100.0, 100.0));
        let mut watcher = IntersectionWatcher::new();
        watcher.subscribe(el, WatchConfig::default()).unwrap();
        let mut viewport = Viewport::new(1000.0, 800.0);
        watcher.poll(&doc, &viewport);

        viewport.scroll_y = 1500.0;
        let entered = watcher.poll(&doc, &viewport);
        assert_eq!(entered.len(), 1);
        assert!(entered[0].is_intersecting);
        assert_eq!(entered[0].intersection_ratio, 1.0);
    }

    #[test]
    fn test_threshold_requires_ratio() {
        // Element 100px tall with 10px visible at the bottom of the viewport
        let (doc, el) = setup(Rect::new(0.0, 790.0, 100.0, 100.0));
        let mut watcher = IntersectionWatcher::new();
        watcher.subscribe(el, WatchConfig::new(0.2, RootMargin::ZERO)).unwrap();

        let notes = watcher.poll(&doc, &Viewport::new(1000.0, 800.0));
        assert!(!notes[0].is_intersecting);
        assert!((notes[0].intersection_ratio - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_negative_margin_shrinks_root() {
        let (doc, el) = setup(Rect::new(0.0, 750.0, 100.0, 40.0));
        let mut watcher = IntersectionWatcher::new();
        watcher
            .subscribe(el, WatchConfig::new(0.12, RootMargin::new(0.0, 0.0, -80.0, 0.0)))
            .unwrap();

        let notes = watcher.poll(&doc, &Viewport::new(1000.0, 800.0));
        assert!(!notes[0].is_intersecting);
    }

    #[test]
    fn test_positive_margin_preloads() {
        let (doc, el) = setup(Rect::new(0.0, 880.0, 100.0, 100.0));
        let mut watcher = IntersectionWatcher::new();
        watcher
            .subscribe(el, WatchConfig::new(0.0, RootMargin::new(0.0, 0.0, 120.0, 0.0)))
            .unwrap();

        let notes = watcher.poll(&doc, &Viewport::new(1000.0, 800.0));
        assert!(notes[0].is_intersecting);
    }

    #[test]
    fn test_zero_area_target() {
        let (doc, el) = setup(Rect::new(10.0, 10.0, 0.0, 0.0));
        let mut watcher = IntersectionWatcher::new();
        watcher.subscribe(el, WatchConfig::new(0.5, RootMargin::ZERO)).unwrap();

        let notes = watcher.poll(&doc, &Viewport::new(1000.0, 800.0));
        assert!(notes[0].is_intersecting);
        assert_eq!(notes[0].intersection_ratio, 1.0);
    }

    #[test]
    fn test_detached_is_silent() {
        let (mut doc, el) = setup(Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut watcher = IntersectionWatcher::new();
        watcher.subscribe(el, WatchConfig::default()).unwrap();
        doc.remove(el);

        assert!(watcher.poll(&doc, &Viewport::new(1000.0, 800.0)).is_empty());
    }

    #[test]
    fn test_unsubscribe_and_unsupported() {
        let (_, el) = setup(Rect::ZERO);
        let mut watcher = IntersectionWatcher::new();
        let handle = watcher.subscribe(el, WatchConfig::default()).unwrap();
        assert!(watcher.is_watching(el));
        assert!(watcher.unsubscribe(handle));
        assert!(!watcher.unsubscribe(handle));
        assert!(watcher.is_empty());

        let mut none = IntersectionWatcher::unsupported();
        assert_eq!(none.subscribe(el, WatchConfig::default()), Err(WatchError::Unsupported));
    }
}
