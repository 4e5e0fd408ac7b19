//! Navigation, header and device-size states.

use crate::config::LayoutConfig;

/// Mobile navigation menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavState {
    Open,
    #[default]
    Closed,
}

impl NavState {
    pub fn is_open(self) -> bool {
        self == Self::Open
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }
}

/// Header appearance, driven by scroll offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HeaderState {
    #[default]
    Top,
    Scrolled,
}

impl HeaderState {
    /// Scrolled strictly past `threshold` pixels.
    pub fn from_offset(offset: f64, threshold: f64) -> Self {
        if offset > threshold { Self::Scrolled } else { Self::Top }
    }

    pub fn is_scrolled(self) -> bool {
        self == Self::Scrolled
    }
}

/// Viewport size bucket used for responsive image tweaks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeviceClass {
    Mobile,
    Tablet,
    #[default]
    Desktop,
}

impl DeviceClass {
    pub fn from_width(width: f64, layout: &LayoutConfig) -> Self {
        if width < layout.mobile_below {
            Self::Mobile
        } else if width < layout.tablet_below {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }

    /// `max-width` for phone mockups, if any.
    pub fn phone_max_width(self, layout: &LayoutConfig) -> Option<u32> {
        match self {
            Self::Mobile => Some(layout.phone_max_width_mobile),
            Self::Tablet => Some(layout.phone_max_width_tablet),
            Self::Desktop => None,
        }
    }

    /// Hero mockups are hidden on phones.
    pub fn hides_hero_mockup(self) -> bool {
        self == Self::Mobile
    }
}
