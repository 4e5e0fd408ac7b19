//! Scroll reveal.

use crate::dom::Document;
use crate::error::ActionError;
use crate::observe::Action;
use crate::types::ElementId;

/// Marker added at setup; styles hide the element until revealed.
pub const PENDING_CLASS: &str = "animate-on-scroll";
/// Terminal markers added on viewport entry. Never removed.
pub const VISIBLE_CLASSES: [&str; 2] = ["visible", "fade-in"];

/// Prepare an element for revealing.
pub fn arm_reveal(document: &mut Document, element: ElementId) {
    if let Some(node) = document.get_mut(element) {
        node.add_class(PENDING_CLASS);
    }
}

pub fn reveal_action() -> Action {
    Box::new(|element, cx| {
        let node = cx.document.get_mut(element).ok_or(ActionError::Detached { element })?;
        for class in VISIBLE_CLASSES {
            node.add_class(class);
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementSpec;
    use crate::observe::ActionContext;
    use crate::scheduler::FrameScheduler;

    #[test]
    fn test_reveal_marks_visible() {
        let mut doc = Document::new();
        let body = doc.body();
        let card = doc.append(body, ElementSpec::new("div").class("plan-card"));
        let mut frames = FrameScheduler::new();

        arm_reveal(&mut doc, card);
        assert!(doc.get(card).unwrap().has_class(PENDING_CLASS));

        reveal_action()(card, &mut ActionContext { document: &mut doc, frames: &mut frames })
            .unwrap();
        let node = doc.get(card).unwrap();
        assert!(node.has_class("visible"));
        assert!(node.has_class("fade-in"));
        assert!(node.has_class(PENDING_CLASS));
    }
}
