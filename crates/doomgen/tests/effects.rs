use doomgen::color::Rgb;
use doomgen::effects::{self, DRIP_CHARS, MAX_DRIP_LENGTH};
use doomgen::grid::CellColor;
use doomgen::test_support::solid_grid;
use pretty_assertions::assert_eq;

const RED: Rgb = Rgb::from_hex(0xff0000);

#[test]
fn distress_zero_is_identity() {
    let grid = solid_grid(&["##  ##", " #### "], RED);
    assert_eq!(effects::distress(&grid, 0.0), grid);
    assert_eq!(effects::distress(&grid, -5.0), grid);
}

#[test]
fn distress_hundred_blanks_everything() {
    let grid = solid_grid(&["######", "##  ##"], RED);
    let out = effects::distress(&grid, 100.0);
    assert_eq!(out.len(), grid.len());
    for (row, line) in out.iter().enumerate() {
        assert_eq!(line.len(), grid[row].len());
        for cell in line {
            assert!(cell.is_blank());
        }
    }
}

#[test]
fn distress_partial_never_adds_cells() {
    let grid = solid_grid(&["########"], RED);
    let out = effects::distress(&grid, 50.0);
    for (a, b) in grid[0].iter().zip(&out[0]) {
        // a cell either survives untouched or goes blank
        assert!(b == a || b.is_blank());
    }
}

#[test]
fn drip_zero_or_empty_adds_nothing() {
    let grid = solid_grid(&["####"], RED);
    assert!(effects::drip(&grid, 0.0).is_empty());
    assert!(effects::drip(&[], 100.0).is_empty());
}

#[test]
fn drip_full_density_drips_every_column() {
    let grid = solid_grid(&["## #"], RED);
    let rows = effects::drip(&grid, 100.0);
    assert!(!rows.is_empty());
    assert!(rows.len() <= MAX_DRIP_LENGTH);
    for row in &rows {
        assert_eq!(row.len(), grid[0].len());
        // the blank source column never drips
        assert!(row[2].is_blank());
    }
    // every drip glyph comes from the ramp and keeps the column color
    for (depth, row) in rows.iter().enumerate() {
        for cell in row {
            if cell.is_blank() {
                continue;
            }
            assert_eq!(cell.ch, DRIP_CHARS[depth.min(DRIP_CHARS.len() - 1)]);
            assert_eq!(cell.color, CellColor::Solid(RED));
        }
    }
    // top drip row: all three source columns started a drip
    assert!(!rows[0][0].is_blank());
    assert!(!rows[0][1].is_blank());
    assert!(!rows[0][3].is_blank());
}

#[test]
fn drip_lengths_are_contiguous_from_the_top() {
    let grid = solid_grid(&["#####"], RED);
    let rows = effects::drip(&grid, 100.0);
    for col in 0..5 {
        let mut seen_blank = false;
        for row in &rows {
            if row[col].is_blank() {
                seen_blank = true;
            } else {
                assert!(!seen_blank, "gap inside a drip column");
            }
        }
    }
}

#[test]
fn apply_composes_distress_then_drip() {
    let grid = solid_grid(&["####", "####"], RED);
    // distress at 100 blanks the grid, so nothing is left to drip
    let out = effects::apply(&grid, 100.0, 100.0);
    assert_eq!(out.len(), 2);

    // no distress: drip rows are appended below the original rows
    let out = effects::apply(&grid, 0.0, 100.0);
    assert!(out.len() > 2);
    assert_eq!(out[0], grid[0]);
    assert_eq!(out[1], grid[1]);
}
