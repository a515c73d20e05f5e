//! Pure offset computation.

use parallax_core::{Geometry, SlideOffset};
use smallvec::SmallVec;

/// Translations produced for one scroll event.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ScrollFrame {
    /// Horizontal translation of the whole strip.
    pub strip_offset: f64,
    /// Background translation for each recomputed slide, in slide order.
    pub backgrounds: SmallVec<[SlideOffset; 2]>,
}

impl ScrollFrame {
    /// Background offset computed for `index`, if that slide was recomputed.
    pub fn offset_for(&self, index: usize) -> Option<f64> {
        self.backgrounds
            .iter()
            .find(|b| b.index == index)
            .map(|b| b.offset)
    }
}

/// One-based index of the slide under the viewport's left edge.
pub fn visible_index(scroll_offset: f64, slide_width: f64) -> i64 {
    ((scroll_offset + slide_width) / slide_width).floor() as i64
}

/// Zero-based positions of the current and next slide, dropping any outside
/// `[0, slide_count)`.
///
/// Empty when the slide width is not a positive finite number.
pub fn visible_pair(scroll_offset: f64, geometry: &Geometry) -> SmallVec<[usize; 2]> {
    if !(geometry.slide_width.is_finite() && geometry.slide_width > 0.0) || !scroll_offset.is_finite() {
        return SmallVec::new();
    }
    let visible = visible_index(scroll_offset, geometry.slide_width);
    let count = geometry.slide_count as i64;
    [visible.saturating_sub(1), visible]
        .into_iter()
        .filter(|&p| (0..count).contains(&p))
        .map(|p| p as usize)
        .collect()
}

/// Background translation of the slide at `position`.
///
/// The strip's own motion at that slide, `-slide_width * position + scroll_offset`,
/// damped by `1 - speed`: `speed = 0` tracks the foreground exactly and
/// `speed = 1` holds the background still.
pub fn background_offset(position: usize, scroll_offset: f64, slide_width: f64, speed: f64) -> f64 {
    (-slide_width * position as f64 + scroll_offset) * (1.0 - speed)
}

/// Starting background translation for every slide after the first.
pub fn initial_offset(slide_width: f64, speed: f64) -> f64 {
    -slide_width * (1.0 - speed)
}

/// Offsets applied once at startup, before any scroll event.
pub fn initial_offsets(geometry: &Geometry, speed: f64) -> Vec<SlideOffset> {
    let offset = initial_offset(geometry.slide_width, speed);
    (1..geometry.slide_count)
        .map(|index| SlideOffset { index, offset })
        .collect()
}

/// Compute the strip and background translations for `scroll_offset`.
pub fn on_scroll(scroll_offset: f64, geometry: &Geometry, speed: f64) -> ScrollFrame {
    let backgrounds = visible_pair(scroll_offset, geometry)
        .into_iter()
        .map(|index| SlideOffset {
            index,
            offset: background_offset(index, scroll_offset, geometry.slide_width, speed),
        })
        .collect();

    ScrollFrame {
        strip_offset: -scroll_offset,
        backgrounds,
    }
}
