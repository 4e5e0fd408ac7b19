//! Headless document model.
//!
//! An arena of elements with the state the page enhancements read and
//! write: classes, attributes, inline styles, text content and a layout
//! rectangle. Elements are addressed by [`ElementId`]; removing an element
//! frees its whole subtree and leaves the ids dangling (lookups return
//! `None`).

use std::collections::BTreeMap;

use super::selector::Selector;
use crate::types::{ElementId, Rect};

// =============================================================================
// ELEMENT
// =============================================================================

/// A single element.
#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
    rect: Rect,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    // -------------------------------------------------------------------------
    // Classes
    // -------------------------------------------------------------------------

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class. Returns false if it was already present.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_string());
        true
    }

    /// Remove a class. Returns false if it was absent.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        before != self.classes.len()
    }

    /// Toggle a class, returning whether it is present afterwards.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.remove_class(class) {
            false
        } else {
            self.add_class(class)
        }
    }

    /// Force a class on or off.
    pub fn set_class(&mut self, class: &str, present: bool) {
        if present {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    // -------------------------------------------------------------------------
    // Attributes and style
    // -------------------------------------------------------------------------

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        self.attributes.insert(name.to_string(), value.into());
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    /// Set an inline style property. An empty value clears it.
    pub fn set_style(&mut self, property: &str, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.style.remove(property);
        } else {
            self.style.insert(property.to_string(), value);
        }
    }
}

// =============================================================================
// ELEMENT SPEC
// =============================================================================

/// Builder for elements appended to a [`Document`].
///
/// ```
/// use spark_page::dom::{Document, ElementSpec};
/// use spark_page::Rect;
///
/// let mut doc = Document::new();
/// let body = doc.body();
/// let img = doc.append(body, ElementSpec::new("img")
///     .class("lazy")
///     .attr("data-src", "hero.jpg")
///     .rect(Rect::new(0.0, 1200.0, 300.0, 200.0)));
///
/// assert_eq!(doc.get(img).unwrap().attr("data-src"), Some("hero.jpg"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    element: Element,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            element: Element {
                tag: tag.to_ascii_lowercase(),
                ..Element::default()
            },
        }
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(mut self, class: &str) -> Self {
        self.element.add_class(class);
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.element.set_attr(name, value);
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.element.text = text.to_string();
        self
    }

    pub fn rect(mut self, rect: Rect) -> Self {
        self.element.rect = rect;
        self
    }
}

// =============================================================================
// DOCUMENT
// =============================================================================

/// Element tree with `html > (head, body)` created up front.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Option<Element>>,
    root: ElementId,
    head: ElementId,
    body: ElementId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: vec![Some(ElementSpec::new("html").element)],
            root: ElementId(0),
            head: ElementId(0),
            body: ElementId(0),
        };
        doc.head = doc.append(doc.root, ElementSpec::new("head"));
        doc.body = doc.append(doc.root, ElementSpec::new("body"));
        doc
    }

    /// The `<html>` element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn head(&self) -> ElementId {
        self.head
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Append a new element as the last child of `parent`.
    ///
    /// Appending under a removed parent creates a detached element that no
    /// query will ever return.
    pub fn append(&mut self, parent: ElementId, spec: ElementSpec) -> ElementId {
        let id = ElementId(self.nodes.len());
        let mut element = spec.element;
        element.parent = Some(parent);

        match self.get_mut(parent) {
            Some(parent) => {
                parent.children.push(id);
                self.nodes.push(Some(element));
            }
            None => self.nodes.push(None),
        }
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Is the element still part of the document?
    pub fn is_connected(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Remove an element and its subtree. The root cannot be removed.
    pub fn remove(&mut self, id: ElementId) -> bool {
        if id == self.root {
            return false;
        }
        let Some(parent) = self.get(id).and_then(Element::parent) else {
            return false;
        };
        if let Some(parent) = self.get_mut(parent) {
            parent.children.retain(|child| *child != id);
        }

        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(slot) = self.nodes.get_mut(next.0) {
                if let Some(element) = slot.take() {
                    stack.extend(element.children);
                }
            }
        }
        true
    }

    /// Inclusive containment: `ancestor` contains itself.
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).and_then(Element::parent);
        }
        false
    }

    /// Connected elements in document (pre-order) order, starting at `scope`.
    pub fn descendants(&self, scope: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![scope];
        while let Some(id) = stack.pop() {
            let Some(element) = self.get(id) else {
                continue;
            };
            out.push(id);
            stack.extend(element.children.iter().rev().copied());
        }
        out
    }

    /// All matching elements in document order.
    pub fn query_all(&self, selector: &Selector) -> Vec<ElementId> {
        self.query_all_within(self.root, selector)
    }

    /// Matching elements inside `scope` (excluding `scope` itself).
    pub fn query_all_within(&self, scope: ElementId, selector: &Selector) -> Vec<ElementId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| *id != scope && selector.matches(self, *id))
            .collect()
    }

    /// First matching element in document order.
    pub fn query(&self, selector: &Selector) -> Option<ElementId> {
        self.query_all(selector).into_iter().next()
    }

    pub fn query_within(&self, scope: ElementId, selector: &Selector) -> Option<ElementId> {
        self.query_all_within(scope, selector).into_iter().next()
    }

    /// Nearest inclusive ancestor matching `selector`.
    pub fn closest(&self, id: ElementId, selector: &Selector) -> Option<ElementId> {
        let mut current = Some(id);
        while let Some(candidate) = current {
            let element = self.get(candidate)?;
            if selector.matches(self, candidate) {
                return Some(candidate);
            }
            current = element.parent();
        }
        None
    }

    /// Element carrying the given `id` attribute.
    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.descendants(self.root)
            .into_iter()
            .find(|candidate| self.get(*candidate).and_then(|e| e.attr("id")) == Some(id))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Document, ElementId, ElementId, ElementId) {
        let mut doc = Document::new();
        let body = doc.body();
        let nav = doc.append(body, ElementSpec::new("nav").id("navLinks"));
        let link = doc.append(nav, ElementSpec::new("a").attr("href", "#plans"));
        let plans = doc.append(body, ElementSpec::new("section").id("plans"));
        (doc, nav, link, plans)
    }

    #[test]
    fn test_initial_structure() {
        let doc = Document::new();
        assert_eq!(doc.get(doc.root()).unwrap().tag(), "html");
        assert_eq!(doc.get(doc.head()).unwrap().tag(), "head");
        assert_eq!(doc.get(doc.body()).unwrap().tag(), "body");
        assert!(doc.contains(doc.root(), doc.body()));
    }

    #[test]
    fn test_document_order() {
        let (doc, nav, link, plans) = setup();
        let all = doc.descendants(doc.body());
        assert_eq!(all, vec![doc.body(), nav, link, plans]);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let (doc, nav, link, plans) = setup();
        assert!(doc.contains(nav, nav));
        assert!(doc.contains(nav, link));
        assert!(!doc.contains(nav, plans));
    }

    #[test]
    fn test_remove_drops_subtree() {
        let (mut doc, nav, link, plans) = setup();
        assert!(doc.remove(nav));
        assert!(!doc.is_connected(nav));
        assert!(!doc.is_connected(link));
        assert!(doc.is_connected(plans));
        assert!(!doc.remove(nav));
        assert!(!doc.remove(doc.root()));
    }

    #[test]
    fn test_class_helpers() {
        let mut element = ElementSpec::new("div").class("a").element;
        assert!(!element.add_class("a"));
        assert!(element.toggle_class("b"));
        assert!(!element.toggle_class("b"));
        assert!(element.remove_class("a"));
        assert!(element.classes().is_empty());
    }

    #[test]
    fn test_empty_style_clears() {
        let mut element = Element::default();
        element.set_style("overflow", "hidden");
        assert_eq!(element.style("overflow"), Some("hidden"));
        element.set_style("overflow", "");
        assert_eq!(element.style("overflow"), None);
    }

    #[test]
    fn test_queries() {
        let (doc, nav, link, _) = setup();
        let anchors = Selector::parse("a[href^=\"#\"]").unwrap();
        assert_eq!(doc.query_all(&anchors), vec![link]);
        assert_eq!(doc.element_by_id("navLinks"), Some(nav));

        let nav_sel = Selector::parse("#navLinks").unwrap();
        assert_eq!(doc.closest(link, &nav_sel), Some(nav));
        assert_eq!(doc.query_within(nav, &nav_sel), None);
    }
}
