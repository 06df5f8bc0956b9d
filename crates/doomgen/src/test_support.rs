//! Test support utilities for doomgen.
//!
//! Helpers for building grids and synthetic fonts in tests; not part of
//! the stable public API.

use crate::color::Rgb;
use crate::figlet::FigletFont;
use crate::grid::{ColoredCell, ColoredGrid};

/// Build a grid from plain text rows, coloring every non-space cell the
/// same solid color.
pub fn solid_grid(rows: &[&str], color: Rgb) -> ColoredGrid {
    rows.iter()
        .map(|row| {
            row.chars()
                .map(|ch| {
                    if ch == ' ' {
                        ColoredCell::blank()
                    } else {
                        ColoredCell::solid(ch, color)
                    }
                })
                .collect()
        })
        .collect()
}

/// A tiny 3-row font covering the characters tests need. `A` and `B` are
/// 4 columns wide with space padding that exercises kerning; `!` is a
/// 1-column glyph.
pub fn tiny_font() -> FigletFont {
    let mut font = FigletFont::new("tiny");
    font.add_raw_char(b' ', &["  ", "  ", "  "]);
    font.add_raw_char(b'A', &[" /\\ ", "|--|", "|  |"]);
    font.add_raw_char(b'B', &["|) ", "|) ", "|) "]);
    font.add_raw_char(b'!', &["|", "|", "."]);
    font
}

/// A minimal but well-formed `.flf` file body for parser tests.
pub fn sample_flf() -> String {
    let mut flf = String::from("flf2a$ 3 2 10 0 1\nminimal test font\n");
    // 95 printable ASCII glyphs, each 3 rows of "<ch><ch>"
    for code in 32u8..=126 {
        let ch = code as char;
        let visible = if ch == ' ' { '$' } else { ch };
        for _ in 0..2 {
            flf.push_str(&format!("{visible}{visible}@\n"));
        }
        flf.push_str(&format!("{visible}{visible}@@\n"));
    }
    flf
}
