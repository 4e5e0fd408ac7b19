//! Core types for spark-page.
//!
//! Geometry (`Rect`, `Viewport`, `RootMargin`), element handles and the
//! host capability flags shared by every other module.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::Deserialize;

use crate::error::ConfigError;

// =============================================================================
// ELEMENT HANDLE
// =============================================================================

/// Opaque handle to an element owned by a [`Document`](crate::dom::Document).
///
/// Handles are never reused within one document, so a stale handle simply
/// stops resolving once its element is removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    /// Raw index into the document arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// RECT
// =============================================================================

/// Axis-aligned rectangle in CSS pixels (document coordinates).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const ZERO: Rect = Rect { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Intersection of two rects, or `None` when they are disjoint.
    ///
    /// Rects that only share an edge produce a zero-area intersection,
    /// matching how browsers treat edge-adjacent targets.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right < left || bottom < top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Grow (positive) or shrink (negative) each side by the margin.
    pub fn expand(&self, margin: &RootMargin) -> Rect {
        Rect::new(
            self.x - margin.left,
            self.y - margin.top,
            self.width + margin.left + margin.right,
            self.height + margin.top + margin.bottom,
        )
    }
}

// =============================================================================
// VIEWPORT
// =============================================================================

/// The visible window onto the document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Vertical scroll offset from the top of the document.
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { scroll_y: 0.0, width, height }
    }

    /// Visible region in document coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

// =============================================================================
// ROOT MARGIN
// =============================================================================

/// Margin applied to the viewport before intersection testing.
///
/// Parsed from the CSS shorthand used by `rootMargin`: one to four pixel
/// values in `top right bottom left` order (`px` suffix optional).
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    pub const ZERO: RootMargin = RootMargin { top: 0.0, right: 0.0, bottom: 0.0, left: 0.0 };

    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }
}

impl FromStr for RootMargin {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split_whitespace()
            .map(|part| {
                let number = part.strip_suffix("px").unwrap_or(part);
                number.parse::<f64>().map_err(|_| ConfigError::InvalidMargin {
                    value: s.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Same expansion rules as CSS margin shorthand
        match values.as_slice() {
            [all] => Ok(Self::new(*all, *all, *all, *all)),
            [v, h] => Ok(Self::new(*v, *h, *v, *h)),
            [t, h, b] => Ok(Self::new(*t, *h, *b, *h)),
            [t, r, b, l] => Ok(Self::new(*t, *r, *b, *l)),
            _ => Err(ConfigError::InvalidMargin { value: s.to_string() }),
        }
    }
}

impl TryFrom<String> for RootMargin {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}px {}px {}px", self.top, self.right, self.bottom, self.left)
    }
}

// =============================================================================
// HOST CAPABILITIES
// =============================================================================

bitflags! {
    /// Primitives the host environment provides.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct HostCapabilities: u8 {
        /// Visibility/intersection observation is available.
        const INTERSECTION = 0b0000_0001;
        /// Animation-frame scheduling is available.
        const ANIMATION_FRAME = 0b0000_0010;
        /// Touch input was detected.
        const TOUCH = 0b0000_0100;
        /// User agent looks like a phone or tablet.
        const MOBILE_AGENT = 0b0000_1000;
    }
}

impl HostCapabilities {
    /// A typical desktop browser.
    pub fn desktop() -> Self {
        Self::INTERSECTION | Self::ANIMATION_FRAME
    }
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self::desktop()
    }
}

// =============================================================================
// TESTS
// =============================================================================
