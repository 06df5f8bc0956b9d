//! Grid effect stages: distress (battle damage) and drip.
//!
//! Both stages are pure apart from their unseeded RNG; repeated runs
//! differ. `apply` is the one composition point and fixes the stage
//! order: distress first, then drip sampled from the distressed grid.

use crate::grid::{CellColor, ColoredCell, ColoredLine};
use rand::Rng;

/// Glyph ramp for drip rows, indexed by depth below the banner.
pub const DRIP_CHARS: [char; 4] = ['|', ':', ';', '.'];

/// Longest drip a single column can produce.
pub const MAX_DRIP_LENGTH: usize = 5;

/// Randomly blank non-space cells with probability `intensity`/100.
///
/// `intensity <= 0` is the identity transform; `intensity >= 100` blanks
/// every non-blank cell.
pub fn distress(grid: &[ColoredLine], intensity: f64) -> Vec<ColoredLine> {
    if intensity <= 0.0 {
        return grid.to_vec();
    }
    let mut rng = rand::thread_rng();
    grid.iter()
        .map(|line| {
            line.iter()
                .map(|cell| {
                    if !cell.is_blank() && rng.gen_range(0.0..100.0) < intensity {
                        ColoredCell::blank()
                    } else {
                        *cell
                    }
                })
                .collect()
        })
        .collect()
}

/// Generate drip rows below the grid's bottom edge.
///
/// Each non-blank bottom-row column starts a drip with probability
/// `density`/100, of random length in `[1, MAX_DRIP_LENGTH]`, keeping the
/// column's color. Returns ONLY the new rows, to be appended below the
/// input; empty when `density <= 0` or the grid is empty.
pub fn drip(grid: &[ColoredLine], density: f64) -> Vec<ColoredLine> {
    let Some(last) = grid.last() else {
        return Vec::new();
    };
    if density <= 0.0 {
        return Vec::new();
    }

    let mut rng = rand::thread_rng();
    let columns: Vec<(CellColor, usize)> = last
        .iter()
        .map(|cell| {
            if !cell.is_blank() && rng.gen_range(0.0..100.0) < density {
                (cell.color, rng.gen_range(1..=MAX_DRIP_LENGTH))
            } else {
                (CellColor::Transparent, 0)
            }
        })
        .collect();

    let max_len = columns.iter().map(|&(_, len)| len).max().unwrap_or(0);
    (0..max_len)
        .map(|row| {
            columns
                .iter()
                .map(|&(color, len)| {
                    if row < len {
                        ColoredCell {
                            ch: DRIP_CHARS[row.min(DRIP_CHARS.len() - 1)],
                            color,
                        }
                    } else {
                        ColoredCell::blank()
                    }
                })
                .collect()
        })
        .collect()
}

/// Run both stages in their required order and append the drip rows.
pub fn apply(grid: &[ColoredLine], distress_intensity: f64, drip_density: f64) -> Vec<ColoredLine> {
    let mut out = distress(grid, distress_intensity);
    let drips = drip(&out, drip_density);
    out.extend(drips);
    out
}
