//! Terminal-facing text exporters: ANSI escape text and a self-contained
//! shell banner script.

use crate::grid::{CellColor, ColoredLine};

/// 24-bit ANSI colored text, one row per line. Every colored cell is
/// self-terminated with a reset so partial copies stay clean; blank cells
/// emit a literal space.
pub fn ansi(grid: &[ColoredLine]) -> String {
    grid.iter()
        .map(|line| {
            line.iter()
                .map(|cell| match cell.color {
                    CellColor::Solid(rgb) if cell.ch != ' ' => format!(
                        "\x1b[38;2;{};{};{}m{}\x1b[0m",
                        rgb.r, rgb.g, rgb.b, cell.ch
                    ),
                    _ => cell.ch.to_string(),
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A bash script that reprints the banner: one `printf '%b\n'` per row
/// with literal `\e[38;2;R;G;Bm` escapes in the argument.
pub fn shell_script(grid: &[ColoredLine]) -> String {
    let mut out = String::from("#!/usr/bin/env bash\n");
    for line in grid {
        let payload: String = line
            .iter()
            .map(|cell| match cell.color {
                CellColor::Solid(rgb) if cell.ch != ' ' => format!(
                    "\\e[38;2;{};{};{}m{}\\e[0m",
                    rgb.r,
                    rgb.g,
                    rgb.b,
                    quote_single(cell.ch)
                ),
                _ => quote_single(cell.ch),
            })
            .collect();
        out.push_str(&format!("printf '%b\\n' '{payload}'\n"));
    }
    out
}

/// Escape a character for use inside a single-quoted shell string.
fn quote_single(ch: char) -> String {
    if ch == '\'' {
        "'\\''".to_string()
    } else {
        ch.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::grid::ColoredCell;
    use pretty_assertions::assert_eq;

    fn cell(ch: char, hex: u32) -> ColoredCell {
        ColoredCell::solid(ch, Rgb::from_hex(hex))
    }

    #[test]
    fn cells_are_self_terminated() {
        let grid = vec![vec![cell('A', 0xff4500), ColoredCell::blank(), cell('B', 0x00ff00)]];
        assert_eq!(
            ansi(&grid),
            "\x1b[38;2;255;69;0mA\x1b[0m \x1b[38;2;0;255;0mB\x1b[0m"
        );
    }

    #[test]
    fn rows_join_with_newline() {
        let grid = vec![vec![cell('X', 0xffffff)], vec![cell('Y', 0x000000)]];
        assert_eq!(ansi(&grid).matches('\n').count(), 1);
    }

    #[test]
    fn script_has_shebang_and_printf_per_row() {
        let grid = vec![vec![cell('#', 0xff0000)], vec![ColoredCell::blank()]];
        let script = shell_script(&grid);
        assert!(script.starts_with("#!/usr/bin/env bash\n"));
        assert_eq!(script.matches("printf '%b\\n'").count(), 2);
        assert!(script.contains("\\e[38;2;255;0;0m#\\e[0m"));
    }

    #[test]
    fn single_quotes_are_escaped() {
        let grid = vec![vec![cell('\'', 0x112233)]];
        let script = shell_script(&grid);
        assert!(script.contains("'\\''"));
    }
}
