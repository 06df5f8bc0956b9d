//! doomgen: DOOM-styled ASCII banner toolkit.
//! Features: FIGlet layout, OKLCH gradient colorizing, distress/drip
//! effects, animated SVG/HTML/ANSI/raster exporters, JSON snapshots.

pub mod color;
pub mod colorize;
pub mod effects;
mod error;
pub mod export;
pub mod figlet;
pub mod grid;
pub mod palette;
pub mod snapshot;
pub mod state;
pub mod timing;

// Test utilities
pub mod test_support;

pub use error::{BannerError, Result};
pub use grid::{CellColor, ColoredCell, ColoredGrid, ColoredLine};
pub use state::{BannerState, StatePatch};

use figlet::FontLibrary;

/// Run the full pipeline: lay the text out with the state's font, apply
/// the gradient, then the distress and drip stages.
pub fn render_grid(library: &FontLibrary, state: &BannerState) -> Result<ColoredGrid> {
    let rendered = library.render(&state.font_id, &state.text, state.layout)?;
    let palette = palette::find(&state.palette_id)
        .ok_or_else(|| BannerError::UnknownPalette(state.palette_id.clone()))?;
    let colored = colorize::colorize(&rendered.lines, palette, &state.colorize_options());
    Ok(effects::apply(
        &colored,
        state.distress_intensity,
        state.drip_density,
    ))
}
