use std::str::FromStr;

use crate::error::FilterError;

/// A point-wise color mapping from one RGB triple to another.
///
/// Inputs are the current 8-bit channel values; outputs are unclamped reals
/// that the engine clamps and rounds on write-back. Any `Fn(f64, f64, f64) -> [f64; 3]`
/// closure is a `Transform`.
pub trait Transform {
    fn map(&self, r: f64, g: f64, b: f64) -> [f64; 3];
}

impl<F> Transform for F
where
    F: Fn(f64, f64, f64) -> [f64; 3],
{
    fn map(&self, r: f64, g: f64, b: f64) -> [f64; 3] {
        self(r, g, b)
    }
}

/// Store a real channel value as 8 bits: clamp to [0, 255], round half to even.
/// NaN stores as 0.
#[inline]
pub fn to_channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, 255.0).round_ties_even() as u8
}

/// Luma used by grayscale and sepia.
#[inline]
fn luma(r: f64, g: f64, b: f64) -> f64 {
    r * 0.21 + g * 0.71 + b * 0.07
}

pub fn grayscale(r: f64, g: f64, b: f64) -> [f64; 3] {
    let l = luma(r, g, b);
    [l, l, l]
}

pub fn sepia(r: f64, g: f64, b: f64) -> [f64; 3] {
    let l = luma(r, g, b);
    [l + 95.0, l + 58.0, l]
}

pub fn invert(r: f64, g: f64, b: f64) -> [f64; 3] {
    [255.0 - r, 255.0 - g, 255.0 - b]
}

/// Subtracts from fixed per-channel pivots. Results below zero clamp to black.
pub fn smart_invert(r: f64, g: f64, b: f64) -> [f64; 3] {
    [20.0 - r, 240.0 - g, 125.0 - b]
}

/// Keeps red-dominant, blue-dominant and yellow-ish pixels; flattens the rest to their mean.
pub fn preserve_primary_colors(r: f64, g: f64, b: f64) -> [f64; 3] {
    let red_max = r > g && r > b;
    let blue_max = b > r && b > g;
    let yellow = r > 180.0 && g > 180.0 && b < 100.0;
    if red_max || blue_max || yellow {
        return [r, g, b];
    }
    let avg = (r + g + b) / 3.0;
    [avg, avg, avg]
}

pub fn color_boost(r: f64, g: f64, b: f64) -> [f64; 3] {
    [
        (r + 40.0).min(255.0),
        (g + 40.0).min(255.0),
        (b + 40.0).min(255.0),
    ]
}

/// Binary threshold on the channel mean; exactly 128 maps to black.
pub fn high_contrast(r: f64, g: f64, b: f64) -> [f64; 3] {
    let avg = (r + g + b) / 3.0;
    let v = if avg > 128.0 { 255.0 } else { 0.0 };
    [v, v, v]
}

pub fn blue_tone(r: f64, g: f64, b: f64) -> [f64; 3] {
    [r * 0.5, g * 0.5, (b + 50.0).min(255.0)]
}

/// The named filter catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    Grayscale,
    Sepia,
    Invert,
    SmartInvert,
    PreservePrimaryColors,
    ColorBoost,
    HighContrast,
    BlueTone,
}

impl Filter {
    pub const ALL: &[Filter] = &[
        Filter::Grayscale,
        Filter::Sepia,
        Filter::Invert,
        Filter::SmartInvert,
        Filter::PreservePrimaryColors,
        Filter::ColorBoost,
        Filter::HighContrast,
        Filter::BlueTone,
    ];

    /// Display label.
    pub fn name(self) -> &'static str {
        match self {
            Filter::Grayscale => "Grayscale",
            Filter::Sepia => "Sepia",
            Filter::Invert => "Invert",
            Filter::SmartInvert => "Smart Invert",
            Filter::PreservePrimaryColors => "Preserve Primary Colors",
            Filter::ColorBoost => "Color Boost",
            Filter::HighContrast => "High Contrast",
            Filter::BlueTone => "Blue Tone",
        }
    }

    /// Stable lookup key.
    pub fn key(self) -> &'static str {
        match self {
            Filter::Grayscale => "grayscale",
            Filter::Sepia => "sepia",
            Filter::Invert => "invert",
            Filter::SmartInvert => "smartInvert",
            Filter::PreservePrimaryColors => "preservePrimaryColors",
            Filter::ColorBoost => "colorBoost",
            Filter::HighContrast => "highContrast",
            Filter::BlueTone => "blueTone",
        }
    }

    /// The pure function backing this filter.
    pub fn function(self) -> fn(f64, f64, f64) -> [f64; 3] {
        match self {
            Filter::Grayscale => grayscale,
            Filter::Sepia => sepia,
            Filter::Invert => invert,
            Filter::SmartInvert => smart_invert,
            Filter::PreservePrimaryColors => preserve_primary_colors,
            Filter::ColorBoost => color_boost,
            Filter::HighContrast => high_contrast,
            Filter::BlueTone => blue_tone,
        }
    }
}

impl Transform for Filter {
    fn map(&self, r: f64, g: f64, b: f64) -> [f64; 3] {
        (self.function())(r, g, b)
    }
}

impl FromStr for Filter {
    type Err = FilterError;

    /// Accepts the lookup key case-insensitively, with or without `-`/`_` separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        Filter::ALL
            .iter()
            .copied()
            .find(|f| f.key().to_lowercase() == folded)
            .ok_or_else(|| FilterError::UnknownFilter(s.to_string()))
    }
}
