//! Lightness mapping for rendering tiles.
//!
//! Presentation layers colour a cell with a fixed hue and vary only the
//! lightness (as a percentage): larger tiles get darker backgrounds, and the
//! text flips to a light shade once the background is dark enough to need it.

use crate::engine::Tile;

/// Text lightness used on dark backgrounds.
pub const LIGHT_TEXT: f64 = 95.0;
/// Text lightness used on light backgrounds.
pub const DARK_TEXT: f64 = 18.0;

const TEXT_FLIP_THRESHOLD: f64 = 50.0;

/// Background lightness for a cell holding `value`: `100 - 10 * log2(value)`.
///
/// Empty cells get the lightest background. The result is clamped to
/// `0.0..=100.0`, which only kicks in from the 2048 tile upwards.
///
/// ```
/// use slide_2048::palette::cell_background_color;
/// assert_eq!(cell_background_color(2), 90.0);
/// assert_eq!(cell_background_color(1024), 0.0);
/// ```
pub fn cell_background_color(value: Tile) -> f64 {
    if value == 0 {
        return 100.0;
    }
    let power = (value as f64).log2();
    (100.0 - power * 10.0).clamp(0.0, 100.0)
}

/// Text lightness that stays readable on the given background lightness.
pub fn cell_text_color(background_lightness: f64) -> f64 {
    if background_lightness <= TEXT_FLIP_THRESHOLD {
        LIGHT_TEXT
    } else {
        DARK_TEXT
    }
}
