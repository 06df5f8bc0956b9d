use doomgen::colorize::{colorize, ColorizeOptions, GradientDirection};
use doomgen::grid::CellColor;
use doomgen::palette;
use pretty_assertions::assert_eq;

fn lines(rows: &[&str]) -> Vec<String> {
    rows.iter().map(|s| s.to_string()).collect()
}

fn options(direction: GradientDirection) -> ColorizeOptions {
    ColorizeOptions {
        direction,
        ..ColorizeOptions::default()
    }
}

#[test]
fn shape_is_preserved_for_every_direction() {
    let input = lines(&["AB ", " CD"]);
    let palette = palette::find("hellfire").unwrap();
    for direction in [
        GradientDirection::None,
        GradientDirection::Horizontal,
        GradientDirection::Vertical,
        GradientDirection::Diagonal,
        GradientDirection::Radial,
    ] {
        let grid = colorize(&input, palette, &options(direction));
        assert_eq!(grid.len(), 2);
        for (row, line) in grid.iter().enumerate() {
            assert_eq!(line.len(), input[row].chars().count());
            for (col, cell) in line.iter().enumerate() {
                let ch = input[row].chars().nth(col).unwrap();
                assert_eq!(cell.ch, ch);
                if ch == ' ' {
                    assert_eq!(cell.color, CellColor::Transparent);
                } else {
                    assert!(matches!(cell.color, CellColor::Solid(_)));
                }
            }
        }
    }
}

#[test]
fn horizontal_boundaries_hit_palette_range_ends() {
    let palette = palette::find("hellfire").unwrap();
    let grid = colorize(
        &lines(&["###", "###"]),
        palette,
        &options(GradientDirection::Horizontal),
    );
    let first = *palette.stops.first().unwrap();
    let last = *palette.stops.last().unwrap();
    for line in &grid {
        assert_eq!(line[0].color, CellColor::Solid(first));
        assert_eq!(line[2].color, CellColor::Solid(last));
    }
}

#[test]
fn sub_range_remaps_boundaries() {
    let palette = palette::find("hellfire").unwrap();
    let grid = colorize(
        &lines(&["##"]),
        palette,
        &ColorizeOptions {
            direction: GradientDirection::Horizontal,
            palette_start: 25.0,
            palette_end: 75.0,
            ..ColorizeOptions::default()
        },
    );
    assert_eq!(grid[0][0].color, CellColor::Solid(palette.sample(0.25)));
    assert_eq!(grid[0][1].color, CellColor::Solid(palette.sample(0.75)));
}

#[test]
fn degenerate_sizes_do_not_divide_by_zero() {
    let palette = palette::find("cyberdemon").unwrap();
    let first = *palette.stops.first().unwrap();
    // single column
    let grid = colorize(&lines(&["#", "#"]), palette, &options(GradientDirection::Horizontal));
    assert_eq!(grid[0][0].color, CellColor::Solid(first));
    // single row
    let grid = colorize(&lines(&["##"]), palette, &options(GradientDirection::Vertical));
    assert_eq!(grid[0][1].color, CellColor::Solid(first));
    // 1x1 diagonal
    let grid = colorize(&lines(&["#"]), palette, &options(GradientDirection::Diagonal));
    assert_eq!(grid[0][0].color, CellColor::Solid(first));
}

#[test]
fn direction_none_paints_one_color() {
    let palette = palette::find("toxic-waste").unwrap();
    let grid = colorize(&lines(&["###", "###"]), palette, &options(GradientDirection::None));
    let first = grid[0][0].color;
    for line in &grid {
        for cell in line {
            assert_eq!(cell.color, first);
        }
    }
}

#[test]
fn normalize_brightness_compresses_lightness_spread() {
    let palette = palette::find("hellfire").unwrap();
    let input = lines(&["##########"]);
    let plain = colorize(&input, palette, &options(GradientDirection::Horizontal));
    let normalized = colorize(
        &input,
        palette,
        &ColorizeOptions {
            direction: GradientDirection::Horizontal,
            normalize_brightness: true,
            ..ColorizeOptions::default()
        },
    );

    let lightness = |grid: &doomgen::ColoredGrid| -> Vec<f64> {
        grid[0]
            .iter()
            .map(|cell| match cell.color {
                CellColor::Solid(rgb) => rgb.to_oklch().l,
                CellColor::Transparent => unreachable!(),
            })
            .collect()
    };
    let spread = |ls: &[f64]| ls.iter().cloned().fold(f64::MIN, f64::max)
        - ls.iter().cloned().fold(f64::MAX, f64::min);

    let plain_l = lightness(&plain);
    let norm_l = lightness(&normalized);
    assert!(spread(&norm_l) < spread(&plain_l));
    // no cell got darker (small slack for the 8-bit round trip)
    for (p, n) in plain_l.iter().zip(&norm_l) {
        assert!(n + 5e-3 >= *p);
    }
}
