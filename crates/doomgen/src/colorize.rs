//! Gradient colorizer: maps glyph-grid characters to palette colors.

use crate::grid::{ColoredCell, ColoredLine};
use crate::palette::Palette;
use serde::{Deserialize, Serialize};

/// Direction of the gradient sweep across the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientDirection {
    None,
    #[default]
    Horizontal,
    Vertical,
    Diagonal,
    Radial,
}

#[derive(Clone, Debug)]
pub struct ColorizeOptions {
    pub direction: GradientDirection,
    /// Rewrite every sampled color's OKLCH lightness to the sub-range
    /// maximum, keeping only hue/saturation variation.
    pub normalize_brightness: bool,
    /// Palette sub-range start, percent (0-100).
    pub palette_start: f64,
    /// Palette sub-range end, percent (0-100).
    pub palette_end: f64,
}

impl Default for ColorizeOptions {
    fn default() -> Self {
        Self {
            direction: GradientDirection::Horizontal,
            normalize_brightness: false,
            palette_start: 0.0,
            palette_end: 100.0,
        }
    }
}

/// Apply a color gradient to ASCII art lines.
///
/// The output grid has the same row/column shape as the input; spaces map
/// to transparent blank cells.
pub fn colorize(lines: &[String], palette: &Palette, options: &ColorizeOptions) -> Vec<ColoredLine> {
    let height = lines.len();
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let start = options.palette_start / 100.0;
    let end = options.palette_end / 100.0;
    let target_lightness = options
        .normalize_brightness
        .then(|| palette.max_lightness(start, end));

    lines
        .iter()
        .enumerate()
        .map(|(row, line)| {
            line.chars()
                .enumerate()
                .map(|(col, ch)| {
                    if ch == ' ' {
                        return ColoredCell::blank();
                    }
                    let t_raw = gradient_t(row, col, height, width, options.direction);
                    let mut color = palette.sample(start + t_raw * (end - start));
                    if let Some(l) = target_lightness {
                        let mut oklch = color.to_oklch();
                        oklch.l = l;
                        color = oklch.to_rgb();
                    }
                    ColoredCell::solid(ch, color)
                })
                .collect()
        })
        .collect()
}

/// Normalized gradient position of a cell, guarded against degenerate
/// single-row/column grids (no division by zero; result 0).
fn gradient_t(
    row: usize,
    col: usize,
    height: usize,
    width: usize,
    direction: GradientDirection,
) -> f64 {
    match direction {
        GradientDirection::None => 0.0,
        GradientDirection::Horizontal => {
            if width > 1 {
                col as f64 / (width - 1) as f64
            } else {
                0.0
            }
        }
        GradientDirection::Vertical => {
            if height > 1 {
                row as f64 / (height - 1) as f64
            } else {
                0.0
            }
        }
        GradientDirection::Diagonal => {
            if width + height > 2 {
                (col + row) as f64 / (width + height - 2) as f64
            } else {
                0.0
            }
        }
        GradientDirection::Radial => {
            let cx = width as f64 / 2.0;
            let cy = height as f64 / 2.0;
            let max_dist = (cx * cx + cy * cy).sqrt();
            if max_dist > 0.0 {
                let dx = col as f64 - cx;
                let dy = row as f64 - cy;
                (dx * dx + dy * dy).sqrt() / max_dist
            } else {
                0.0
            }
        }
    }
}
