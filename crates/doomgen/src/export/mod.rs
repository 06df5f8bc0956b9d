//! Artifact serializers. Every exporter consumes a colored grid plus the
//! fields of [`BannerState`](crate::state::BannerState) it needs and
//! produces one output file's bytes or text.

pub mod animation;
pub mod ansi;
pub mod css;
pub mod html;
pub mod raster;
pub mod svg;

use crate::grid::{grid_width, ColoredLine};

/// Character cell width, SVG/HTML user units.
pub const CHAR_WIDTH: f64 = 9.6;
/// Row height, SVG/HTML user units.
pub const LINE_HEIGHT: f64 = 16.0;
/// Canvas margin per side.
pub const MARGIN: f64 = 20.0;

/// Canvas size for a grid, margins included.
pub fn canvas_size(grid: &[ColoredLine]) -> (f64, f64) {
    let width = grid_width(grid) as f64 * CHAR_WIDTH + MARGIN * 2.0;
    let height = grid.len() as f64 * LINE_HEIGHT + MARGIN * 2.0;
    (width, height)
}

/// Plain uncolored text, rows joined by newlines.
pub fn plain_text(grid: &[ColoredLine]) -> String {
    grid.iter()
        .map(|line| line.iter().map(|c| c.ch).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a float without trailing zeros (`78.4`, `104`, `0.85`).
pub(crate) fn fmt_num(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        let s = format!("{v:.4}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

pub(crate) fn escape_xml(ch: char) -> String {
    match ch {
        '&' => "&amp;".to_string(),
        '<' => "&lt;".to_string(),
        '>' => "&gt;".to_string(),
        c => c.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::ColoredCell;

    #[test]
    fn canvas_size_uses_longest_row() {
        let grid = vec![
            vec![ColoredCell::blank(); 10],
            vec![ColoredCell::blank(); 4],
        ];
        let (w, h) = canvas_size(&grid);
        assert_eq!(w, 10.0 * 9.6 + 40.0);
        assert_eq!(h, 2.0 * 16.0 + 40.0);
    }

    #[test]
    fn number_formatting() {
        assert_eq!(fmt_num(104.0), "104");
        assert_eq!(fmt_num(78.4), "78.4");
        assert_eq!(fmt_num(0.85), "0.85");
        assert_eq!(fmt_num(0.8999999999), "0.9");
    }
}
