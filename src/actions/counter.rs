//! Count-up animation.
//!
//! Once fired, a [`CounterTask`] rides the frame scheduler: each frame
//! renders `floor(progress * target)` and the final frame renders `target`
//! exactly, so float truncation never leaves the counter one short.

use crate::dom::Document;
use crate::error::ActionError;
use crate::observe::Action;
use crate::scheduler::{FrameStatus, FrameTask};
use crate::types::ElementId;

/// Parse a counter target attribute.
///
/// Takes the leading decimal digits after optional whitespace, so `"250+"`
/// is 250. Missing, empty, non-numeric, negative or overflowing input is 0.
///
/// ```
/// use spark_page::actions::parse_target;
///
/// assert_eq!(parse_target(Some("250")), 250);
/// assert_eq!(parse_target(Some(" 42 channels")), 42);
/// assert_eq!(parse_target(Some("-5")), 0);
/// assert_eq!(parse_target(Some("abc")), 0);
/// assert_eq!(parse_target(None), 0);
/// ```
pub fn parse_target(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return 0;
    };
    let trimmed = raw.trim_start();
    let digits = trimmed
        .strip_prefix('+')
        .unwrap_or(trimmed)
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .unwrap_or("");
    digits.parse().unwrap_or(0)
}

/// Per-element count-up state.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterTask {
    element: ElementId,
    target: u64,
    duration_ms: f64,
    /// Captured on the first frame.
    start: Option<f64>,
}

impl CounterTask {
    pub fn new(element: ElementId, target: u64, duration_ms: u64) -> Self {
        Self {
            element,
            target,
            duration_ms: duration_ms.max(1) as f64,
            start: None,
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    /// Progress in `[0, 1]` at `timestamp`; 0 before the first frame.
    pub fn progress(&self, timestamp: f64) -> f64 {
        match self.start {
            Some(start) => ((timestamp - start) / self.duration_ms).clamp(0.0, 1.0),
            None => 0.0,
        }
    }

    /// Value shown at `progress`.
    pub fn value_at(&self, progress: f64) -> u64 {
        if progress >= 1.0 {
            return self.target;
        }
        (progress * self.target as f64).floor() as u64
    }
}

impl FrameTask for CounterTask {
    fn step(&mut self, document: &mut Document, timestamp: f64) -> FrameStatus {
        let start = *self.start.get_or_insert(timestamp);
        let progress = ((timestamp - start) / self.duration_ms).clamp(0.0, 1.0);

        // Element gone: nothing left to animate
        let Some(element) = document.get_mut(self.element) else {
            return FrameStatus::Done;
        };
        element.set_text(self.value_at(progress).to_string());

        if progress < 1.0 { FrameStatus::Continue } else { FrameStatus::Done }
    }
}

/// Build the counter action.
///
/// The target is read from `target_attribute` when the action fires, so the
/// markup may change it up to the moment the counter scrolls into view.
pub fn counter_action(target_attribute: &str, duration_ms: u64) -> Action {
    let attribute = target_attribute.to_string();
    Box::new(move |element, cx| {
        let node = cx.document.get(element).ok_or(ActionError::Detached { element })?;
        let target = parse_target(node.attr(&attribute));
        cx.frames.request(Box::new(CounterTask::new(element, target, duration_ms)));
        tracing::debug!(%element, target, duration_ms, "counter animation started");
        Ok(())
    })
}

/// Counter for hosts without animation frames: jump straight to the target.
pub fn counter_final_action(target_attribute: &str) -> Action {
    let attribute = target_attribute.to_string();
    Box::new(move |element, cx| {
        let node = cx.document.get_mut(element).ok_or(ActionError::Detached { element })?;
        let target = parse_target(node.attr(&attribute));
        node.set_text(target.to_string());
        Ok(())
    })
}
