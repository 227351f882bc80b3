//! Split layouts: configurations, user preference, policy and rectangles

mod policy;
mod rect;

pub use policy::{DistanceSource, LayoutPolicy};
pub use rect::{PixelRect, ViewportRect, rect_for};

use serde::{Deserialize, Serialize};

/// How the display is currently divided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SplitConfiguration {
    /// One full-screen view on the primary surface
    #[default]
    Single,
    /// Two panes stacked top/bottom
    Horizontal,
    /// Two panes side by side
    Vertical,
    /// One wide pane on top, two below
    ThreeWay,
    /// Four quadrants
    FourWay,
}

impl SplitConfiguration {
    /// Number of split panes this configuration needs (0 for `Single`)
    #[inline]
    pub const fn pane_count(self) -> usize {
        match self {
            Self::Single => 0,
            Self::Horizontal | Self::Vertical => 2,
            Self::ThreeWay => 3,
            Self::FourWay => 4,
        }
    }

    /// Whether the display is divided at all
    #[inline]
    pub const fn is_split(self) -> bool {
        !matches!(self, Self::Single)
    }
}

/// Layout the user asked for in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LayoutPreference {
    /// Pick a layout from the player count and their arrangement
    #[default]
    Automatic,
    /// Prefer top/bottom panes
    Horizontal,
    /// Prefer side-by-side panes
    Vertical,
    /// Prefer the three-way layout
    ThreeWay,
    /// Prefer quadrants
    FourWay,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pane_count() {
        assert_eq!(SplitConfiguration::Single.pane_count(), 0);
        assert_eq!(SplitConfiguration::Horizontal.pane_count(), 2);
        assert_eq!(SplitConfiguration::Vertical.pane_count(), 2);
        assert_eq!(SplitConfiguration::ThreeWay.pane_count(), 3);
        assert_eq!(SplitConfiguration::FourWay.pane_count(), 4);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(SplitConfiguration::default(), SplitConfiguration::Single);
        assert_eq!(LayoutPreference::default(), LayoutPreference::Automatic);
        assert!(!SplitConfiguration::Single.is_split());
        assert!(SplitConfiguration::ThreeWay.is_split());
    }
}
