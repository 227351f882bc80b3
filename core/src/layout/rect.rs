//! Viewport rectangles for each split configuration

use serde::{Deserialize, Serialize};

use super::SplitConfiguration;

/// Normalized viewport rectangle.
///
/// All values are fractions of the display in `[0, 1]`. The origin is the
/// bottom-left corner and `y` grows upward, matching the camera rect
/// convention of most engines.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportRect {
    /// Left edge
    pub x: f32,
    /// Bottom edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl ViewportRect {
    /// The whole display
    pub const FULLSCREEN: ViewportRect = ViewportRect::new(0.0, 0.0, 1.0, 1.0);

    /// Create a rectangle from its bottom-left corner and size
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge
    #[inline]
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Covered fraction of the display
    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Area shared with `other` (zero when they only touch)
    pub fn overlap_area(&self, other: &ViewportRect) -> f32 {
        let w = self.right().min(other.right()) - self.x.max(other.x);
        let h = self.top().min(other.top()) - self.y.max(other.y);
        if w > 0.0 && h > 0.0 { w * h } else { 0.0 }
    }

    /// Convert to a pixel rectangle with a top-left origin.
    ///
    /// Edges are rounded independently so adjacent panes share their border
    /// pixel column/row exactly.
    pub fn to_pixels(&self, display_width: u32, display_height: u32) -> PixelRect {
        let w = display_width as f32;
        let h = display_height as f32;
        let left = (self.x * w).round() as u32;
        let right = (self.right() * w).round() as u32;
        let top = ((1.0 - self.top()) * h).round() as u32;
        let bottom = ((1.0 - self.y) * h).round() as u32;
        PixelRect {
            x: left,
            y: top,
            width: right.saturating_sub(left),
            height: bottom.saturating_sub(top),
        }
    }
}

/// Pane placement on a concrete display, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Whether the pane covers at least one pixel
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Rectangle of pane `pane` in `config`.
///
/// Returns `None` for `Single` (the primary surface uses
/// [`ViewportRect::FULLSCREEN`]) and for any pane index the configuration
/// does not have.
pub fn rect_for(config: SplitConfiguration, pane: usize) -> Option<ViewportRect> {
    if pane >= config.pane_count() {
        return None;
    }

    let rect = match config {
        SplitConfiguration::Single => return None,
        // Pane 0 on top, pane 1 below
        SplitConfiguration::Horizontal => {
            ViewportRect::new(0.0, if pane == 0 { 0.5 } else { 0.0 }, 1.0, 0.5)
        }
        // Pane 0 left, pane 1 right
        SplitConfiguration::Vertical => {
            ViewportRect::new(if pane == 0 { 0.0 } else { 0.5 }, 0.0, 0.5, 1.0)
        }
        SplitConfiguration::ThreeWay => match pane {
            0 => ViewportRect::new(0.0, 0.5, 1.0, 0.5),
            1 => ViewportRect::new(0.0, 0.0, 0.5, 0.5),
            _ => ViewportRect::new(0.5, 0.0, 0.5, 0.5),
        },
        // Row-major quadrants, row 0 at the bottom
        SplitConfiguration::FourWay => ViewportRect::new(
            (pane % 2) as f32 * 0.5,
            (pane / 2) as f32 * 0.5,
            0.5,
            0.5,
        ),
    };
    Some(rect)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPLITS: [SplitConfiguration; 4] = [
        SplitConfiguration::Horizontal,
        SplitConfiguration::Vertical,
        SplitConfiguration::ThreeWay,
        SplitConfiguration::FourWay,
    ];

    fn panes(config: SplitConfiguration) -> Vec<ViewportRect> {
        (0..config.pane_count())
            .map(|i| rect_for(config, i).unwrap())
            .collect()
    }

    #[test]
    fn test_single_has_no_panes() {
        assert_eq!(rect_for(SplitConfiguration::Single, 0), None);
    }

    #[test]
    fn test_out_of_range_pane_is_none() {
        for config in SPLITS {
            assert_eq!(rect_for(config, config.pane_count()), None);
        }
    }

    #[test]
    fn test_horizontal_top_then_bottom() {
        assert_eq!(
            rect_for(SplitConfiguration::Horizontal, 0),
            Some(ViewportRect::new(0.0, 0.5, 1.0, 0.5))
        );
        assert_eq!(
            rect_for(SplitConfiguration::Horizontal, 1),
            Some(ViewportRect::new(0.0, 0.0, 1.0, 0.5))
        );
    }

    #[test]
    fn test_vertical_left_then_right() {
        assert_eq!(
            rect_for(SplitConfiguration::Vertical, 0),
            Some(ViewportRect::new(0.0, 0.0, 0.5, 1.0))
        );
        assert_eq!(
            rect_for(SplitConfiguration::Vertical, 1),
            Some(ViewportRect::new(0.5, 0.0, 0.5, 1.0))
        );
    }

    #[test]
    fn test_three_way_layout() {
        assert_eq!(
            panes(SplitConfiguration::ThreeWay),
            vec![
                ViewportRect::new(0.0, 0.5, 1.0, 0.5),
                ViewportRect::new(0.0, 0.0, 0.5, 0.5),
                ViewportRect::new(0.5, 0.0, 0.5, 0.5),
            ]
        );
    }

    #[test]
    fn test_four_way_row_zero_at_bottom() {
        assert_eq!(
            panes(SplitConfiguration::FourWay),
            vec![
                ViewportRect::new(0.0, 0.0, 0.5, 0.5),
                ViewportRect::new(0.5, 0.0, 0.5, 0.5),
                ViewportRect::new(0.0, 0.5, 0.5, 0.5),
                ViewportRect::new(0.5, 0.5, 0.5, 0.5),
            ]
        );
    }

    #[test]
    fn test_rect_for_is_pure() {
        for config in SPLITS {
            for pane in 0..config.pane_count() {
                assert_eq!(rect_for(config, pane), rect_for(config, pane));
            }
        }
    }

    #[test]
    fn test_every_layout_tiles_the_display() {
        for config in SPLITS {
            let rects = panes(config);
            let total: f32 = rects.iter().map(ViewportRect::area).sum();
            assert_eq!(total, 1.0, "{config:?} does not cover the display");

            for (i, a) in rects.iter().enumerate() {
                assert!(a.x >= 0.0 && a.y >= 0.0 && a.right() <= 1.0 && a.top() <= 1.0);
                for b in &rects[i + 1..] {
                    assert_eq!(a.overlap_area(b), 0.0, "{config:?} panes overlap");
                }
            }
        }
    }

    #[test]
    fn test_to_pixels_flips_origin() {
        // Top pane of a horizontal split starts at pixel row 0
        let top = rect_for(SplitConfiguration::Horizontal, 0).unwrap();
        assert_eq!(
            top.to_pixels(960, 540),
            PixelRect {
                x: 0,
                y: 0,
                width: 960,
                height: 270
            }
        );

        let bottom = rect_for(SplitConfiguration::Horizontal, 1).unwrap();
        assert_eq!(
            bottom.to_pixels(960, 540),
            PixelRect {
                x: 0,
                y: 270,
                width: 960,
                height: 270
            }
        );
    }

    #[test]
    fn test_to_pixels_odd_resolution_shares_edges() {
        let left = rect_for(SplitConfiguration::Vertical, 0).unwrap().to_pixels(101, 51);
        let right = rect_for(SplitConfiguration::Vertical, 1).unwrap().to_pixels(101, 51);
        assert_eq!(left.x + left.width, right.x);
        assert_eq!(left.width + right.width, 101);
        assert!(left.is_valid() && right.is_valid());
    }
}
