//! Selector - the small CSS selector subset the page needs
//!
//! Supported syntax:
//! - type selectors: `img`, `a`
//! - ids and classes: `#header`, `.plan-card`
//! - attribute presence, equality and prefix: `[data-src]`, `[href="#top"]`, `[href^="#"]`
//! - descendant combinator: `.hero .hero-text`
//! - selector lists: `.a, .b`
//!
//! Anything else is rejected at parse time so configuration typos surface
//! during validation instead of silently matching nothing.

use std::iter::Peekable;
use std::str::Chars;

use super::document::{Document, Element};
use crate::types::ElementId;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct AttrTest {
    name: String,
    op: AttrOp,
}

/// One compound selector: `img.lazy[data-src]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Compound {
    universal: bool,
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrTest>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        !self.universal
            && self.tag.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attrs.is_empty()
    }

    fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.attr("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| element.has_class(class)) {
            return false;
        }
        self.attrs.iter().all(|test| match (&test.op, element.attr(&test.name)) {
            (_, None) => false,
            (AttrOp::Exists, Some(_)) => true,
            (AttrOp::Equals(expected), Some(value)) => value == expected,
            (AttrOp::Prefix(prefix), Some(value)) => value.starts_with(prefix.as_str()),
        })
    }
}

/// Compounds joined by descendant combinators, outermost first.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Complex {
    parts: Vec<Compound>,
}

/// A parsed selector list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Complex>,
}

// =============================================================================
// PARSING
// =============================================================================

impl Selector {
    /// Parse a selector list. Errors carry a short human-readable reason.
    pub fn parse(input: &str) -> Result<Self, String> {
        let mut alternatives = Vec::new();
        let mut chars = input.chars().peekable();

        loop {
            alternatives.push(parse_complex(&mut chars)?);
            match chars.next() {
                None => break,
                Some(',') => continue,
                Some(c) => return Err(format!("unexpected '{c}' in '{input}'")),
            }
        }

        Ok(Self { alternatives })
    }

    /// Does `element` match any alternative?
    pub fn matches(&self, document: &Document, element: ElementId) -> bool {
        self.alternatives.iter().any(|complex| matches_complex(complex, document, element))
    }
}

fn skip_spaces(chars: &mut Peekable<Chars<'_>>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn parse_ident(chars: &mut Peekable<Chars<'_>>) -> Result<String, String> {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        ident.push(c);
        chars.next();
    }
    if ident.is_empty() {
        return Err("expected identifier".to_string());
    }
    Ok(ident)
}

fn parse_value(chars: &mut Peekable<Chars<'_>>) -> Result<String, String> {
    match chars.peek().copied() {
        Some(quote @ ('"' | '\'')) => {
            chars.next();
            let mut value = String::new();
            loop {
                match chars.next() {
                    Some(c) if c == quote => return Ok(value),
                    Some(c) => value.push(c),
                    None => return Err("unterminated string".to_string()),
                }
            }
        }
        _ => parse_ident(chars),
    }
}

fn parse_attr(chars: &mut Peekable<Chars<'_>>) -> Result<AttrTest, String> {
    skip_spaces(chars);
    let name = parse_ident(chars)?;
    skip_spaces(chars);

    let op = match chars.next() {
        Some(']') => return Ok(AttrTest { name, op: AttrOp::Exists }),
        Some('=') => AttrOp::Equals(parse_value_after_spaces(chars)?),
        Some('^') => {
            if chars.next() != Some('=') {
                return Err("expected '^='".to_string());
            }
            AttrOp::Prefix(parse_value_after_spaces(chars)?)
        }
        Some(c) => return Err(format!("unsupported attribute operator '{c}'")),
        None => return Err("unterminated attribute selector".to_string()),
    };

    skip_spaces(chars);
    if chars.next() != Some(']') {
        return Err("expected ']'".to_string());
    }
    Ok(AttrTest { name, op })
}

fn parse_value_after_spaces(chars: &mut Peekable<Chars<'_>>) -> Result<String, String> {
    skip_spaces(chars);
    parse_value(chars)
}

fn parse_compound(chars: &mut Peekable<Chars<'_>>) -> Result<Compound, String> {
    let mut compound = Compound::default();

    if chars.peek().is_some_and(|&c| is_ident_char(c)) {
        compound.tag = Some(parse_ident(chars)?.to_ascii_lowercase());
    } else if chars.peek() == Some(&'*') {
        chars.next();
        compound.universal = true;
    }

    loop {
        match chars.peek().copied() {
            Some('#') => {
                chars.next();
                compound.id = Some(parse_ident(chars)?);
            }
            Some('.') => {
                chars.next();
                compound.classes.push(parse_ident(chars)?);
            }
            Some('[') => {
                chars.next();
                compound.attrs.push(parse_attr(chars)?);
            }
            _ => break,
        }
    }

    Ok(compound)
}

fn parse_complex(chars: &mut Peekable<Chars<'_>>) -> Result<Complex, String> {
    let mut parts = Vec::new();
    skip_spaces(chars);

    loop {
        let compound = parse_compound(chars)?;
        if compound.is_empty() {
            return Err("empty selector".to_string());
        }
        parts.push(compound);
        skip_spaces(chars);
        match chars.peek() {
            None | Some(',') => break,
            Some(_) => continue,
        }
    }

    Ok(Complex { parts })
}

// =============================================================================
// MATCHING
// =============================================================================

fn matches_complex(complex: &Complex, document: &Document, element: ElementId) -> bool {
    let Some((last, ancestors)) = complex.parts.split_last() else {
        return false;
    };
    let Some(node) = document.get(element) else {
        return false;
    };
    if !last.matches(node) {
        return false;
    }

    // Walk up the tree, consuming compounds right to left
    let mut remaining = ancestors.iter().rev().peekable();
    let mut current = node.parent();
    while let Some(wanted) = remaining.peek() {
        let Some(id) = current else {
            return false;
        };
        let Some(ancestor) = document.get(id) else {
            return false;
        };
        if wanted.matches(ancestor) {
            remaining.next();
        }
        current = ancestor.parent();
    }
    true
}

// =============================================================================
// TESTS
// =============================================================================
