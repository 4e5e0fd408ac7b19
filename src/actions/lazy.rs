//! Lazy image loading.
//!
//! Promotes a deferred source attribute (`data-src` by default) to `src`
//! and drops the `lazy` marker class.

use crate::error::ActionError;
use crate::observe::Action;

/// Marker class for images that have not loaded yet.
pub const LAZY_CLASS: &str = "lazy";

pub fn lazy_image_action(source_attribute: &str) -> Action {
    let attribute = source_attribute.to_string();
    Box::new(move |element, cx| {
        let node = cx.document.get_mut(element).ok_or(ActionError::Detached { element })?;
        let source = node
            .attr(&attribute)
            .map(str::to_string)
            .ok_or_else(|| ActionError::MissingAttribute {
                element,
                attribute: attribute.clone(),
            })?;

        node.set_attr("src", source);
        node.remove_class(LAZY_CLASS);
        Ok(())
    })
}
