//! The colored-grid data structure passed between pipeline stages.

use crate::color::Rgb;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Cell color: either a solid sRGB color or transparent (blank cells).
///
/// Serializes as the string `"transparent"` or `"#rrggbb"` to stay
/// wire-compatible with existing `.doomgen.json` snapshots.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CellColor {
    Transparent,
    Solid(Rgb),
}

impl Serialize for CellColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellColor::Transparent => serializer.serialize_str("transparent"),
            CellColor::Solid(rgb) => serializer.collect_str(rgb),
        }
    }
}

impl<'de> Deserialize<'de> for CellColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s == "transparent" {
            return Ok(CellColor::Transparent);
        }
        s.parse()
            .map(CellColor::Solid)
            .map_err(serde::de::Error::custom)
    }
}

/// One character cell of a colored grid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColoredCell {
    #[serde(rename = "char")]
    pub ch: char,
    pub color: CellColor,
}

impl ColoredCell {
    /// A space cell; always transparent.
    pub const fn blank() -> Self {
        Self {
            ch: ' ',
            color: CellColor::Transparent,
        }
    }

    /// A colored cell. Spaces are forced transparent so the blank-cell
    /// invariant holds no matter what the caller passes.
    pub fn solid(ch: char, color: Rgb) -> Self {
        if ch == ' ' {
            Self::blank()
        } else {
            Self {
                ch,
                color: CellColor::Solid(color),
            }
        }
    }

    /// True when the cell renders nothing (space or transparent).
    pub fn is_blank(&self) -> bool {
        self.ch == ' ' || self.color == CellColor::Transparent
    }
}

/// One row of cells. Rows may have differing lengths (ragged right edge).
pub type ColoredLine = Vec<ColoredCell>;

/// The grid: ordered rows of cells.
pub type ColoredGrid = Vec<ColoredLine>;

/// Width of a grid: the longest row.
pub fn grid_width(grid: &[ColoredLine]) -> usize {
    grid.iter().map(|l| l.len()).max().unwrap_or(0)
}

/// Strip colors back to plain rows of text.
pub fn to_plain_lines(grid: &[ColoredLine]) -> Vec<String> {
    grid.iter()
        .map(|line| line.iter().map(|c| c.ch).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_is_always_blank() {
        let cell = ColoredCell::solid(' ', Rgb::from_hex(0xff0000));
        assert_eq!(cell, ColoredCell::blank());
        assert!(cell.is_blank());
    }

    #[test]
    fn cell_color_json_shape() {
        let cell = ColoredCell::solid('#', Rgb::from_hex(0xff4500));
        let json = serde_json::to_string(&cell).unwrap();
        assert_eq!(json, r##"{"char":"#","color":"#ff4500"}"##);
        let back: ColoredCell = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cell);
    }

    #[test]
    fn transparent_roundtrip() {
        let json = serde_json::to_string(&ColoredCell::blank()).unwrap();
        assert_eq!(json, r#"{"char":" ","color":"transparent"}"#);
        let back: ColoredCell = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ColoredCell::blank());
    }

    #[test]
    fn width_of_ragged_grid() {
        let grid: ColoredGrid = vec![
            vec![ColoredCell::blank(); 3],
            vec![ColoredCell::blank(); 7],
            vec![],
        ];
        assert_eq!(grid_width(&grid), 7);
        assert_eq!(grid_width(&[]), 0);
    }
}
