//! DOM Module - headless element tree and selectors
//!
//! The page enhancements never touch a real browser. They operate on this
//! document model, which a host keeps in sync with whatever it renders.

mod document;
mod selector;

pub use document::{Document, Element, ElementSpec};
pub use selector::Selector;
