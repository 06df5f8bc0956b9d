use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use doomgen::color::Rgb;
use doomgen::colorize::GradientDirection;
use doomgen::export::{
    self, animation, ansi, html,
    raster::{self, RasterOptions},
    svg,
};
use doomgen::figlet::{FigletFont, FontLibrary, LayoutMode};
use doomgen::{palette, render_grid, snapshot, BannerState, ColoredGrid};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "doomgen", about = "DOOM-style ASCII banner generator")]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Render text and export it (format inferred from the output extension;
    /// no output prints ANSI to stdout)
    Render {
        text: String,
        /// FIGlet font file (.flf, or a zip containing one)
        #[arg(short, long)]
        font: PathBuf,
        /// Output file: .svg .html .ans .sh .txt .png .webp .json
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Kerning: full, fitted or default (smushing)
        #[arg(long, default_value = "default")]
        layout: String,
        #[arg(long, default_value = "hellfire")]
        palette: String,
        /// Gradient direction: none, horizontal, vertical, diagonal, radial
        #[arg(long, default_value = "horizontal")]
        direction: String,
        #[arg(long, default_value_t = 0.0)]
        palette_start: f64,
        #[arg(long, default_value_t = 100.0)]
        palette_end: f64,
        #[arg(long)]
        normalize_brightness: bool,
        #[arg(long, default_value_t = 60.0)]
        glow: f64,
        #[arg(long, default_value_t = 0.0)]
        shadow: f64,
        #[arg(long, default_value_t = 0.0)]
        drip: f64,
        #[arg(long, default_value_t = 0.0)]
        distress: f64,
        #[arg(long, default_value_t = 0.0)]
        pixelation: f64,
        #[arg(long)]
        crt: bool,
        #[arg(long, default_value_t = 0.0)]
        crt_curvature: f64,
        #[arg(long, default_value_t = 0.0)]
        crt_flicker: f64,
        #[arg(long, default_value_t = 0.0)]
        crt_blip: f64,
        #[arg(long, default_value_t = 0.0)]
        crt_power_loss: f64,
        #[arg(long, default_value_t = 0.0)]
        shake: f64,
        #[arg(long, default_value_t = 0.0)]
        color_shift: f64,
        #[arg(long, default_value = "#0a0a0a")]
        bg: String,
        /// For .webp: encode one animation cycle instead of a still
        #[arg(long)]
        animated: bool,
        /// Raster output with transparent background
        #[arg(long)]
        transparent: bool,
    },
    /// Re-export a .doomgen.json snapshot to another format
    Convert {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Font file, needed when the snapshot holds no colored grid
        #[arg(short, long)]
        font: Option<PathBuf>,
        #[arg(long)]
        animated: bool,
        #[arg(long)]
        transparent: bool,
    },
    /// List the palette registry
    Palettes,
    /// Inspect FIGlet font metadata
    Inspect { font: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Cmd::Render {
            text,
            font,
            output,
            layout,
            palette,
            direction,
            palette_start,
            palette_end,
            normalize_brightness,
            glow,
            shadow,
            drip,
            distress,
            pixelation,
            crt,
            crt_curvature,
            crt_flicker,
            crt_blip,
            crt_power_loss,
            shake,
            color_shift,
            bg,
            animated,
            transparent,
        } => {
            let font_id = font_id(&font)?;
            let mut library = FontLibrary::new();
            library
                .load_file(&font_id, &font)
                .with_context(|| format!("loading font {}", font.display()))?;

            let state = BannerState {
                text,
                font_id,
                layout: parse_layout(&layout)?,
                palette_id: palette,
                gradient_direction: parse_direction(&direction)?,
                palette_start,
                palette_end,
                normalize_brightness,
                glow_intensity: glow,
                shadow_offset: shadow,
                drip_density: drip,
                distress_intensity: distress,
                pixelation,
                crt_enabled: crt,
                crt_curvature,
                crt_flicker,
                crt_blip,
                crt_power_loss,
                screen_shake: shake,
                color_shift_speed: color_shift,
                bg_color: bg.parse::<Rgb>()?,
                ..BannerState::default()
            };
            let grid = render_grid(&library, &state)?;

            match output {
                Some(path) => export_to(&path, &grid, &state, animated, transparent)?,
                None => println!("{}", ansi::ansi(&grid)),
            }
        }
        Cmd::Convert {
            input,
            output,
            font,
            animated,
            transparent,
        } => {
            let json = fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let parsed = snapshot::from_json(&json)?;
            let mut state = BannerState::default();
            state.apply(parsed.state);

            let grid = match parsed.colored_lines {
                Some(grid) => grid,
                None => {
                    let Some(font) = font else {
                        bail!("snapshot holds no colored grid; pass --font to re-render");
                    };
                    let mut library = FontLibrary::new();
                    library.load_file(&state.font_id, &font)?;
                    render_grid(&library, &state)?
                }
            };
            export_to(&output, &grid, &state, animated, transparent)?;
        }
        Cmd::Palettes => {
            for p in palette::DOOM_PALETTES {
                println!("{} ({}): {}", p.id, p.label, p.description);
                let stops: Vec<String> = p.stops.iter().map(|s| s.to_string()).collect();
                println!("  stops: {}", stops.join(" "));
            }
        }
        Cmd::Inspect { font } => {
            let f = FigletFont::load(&font)?;
            println!("FIGlet font: {}", font.display());
            println!("  header: {}", f.header());
            println!("  height: {} rows", f.height());
            println!("  glyphs: {}", f.glyph_count());
            println!("  comment lines: {}", f.comments().len());
        }
    }
    Ok(())
}

fn font_id(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("font path has no file name: {}", path.display()))
}

fn parse_layout(s: &str) -> Result<LayoutMode> {
    Ok(match s {
        "full" => LayoutMode::Full,
        "fitted" => LayoutMode::Fitted,
        "default" | "smush" => LayoutMode::Smush,
        other => bail!("unknown layout: {other}"),
    })
}

fn parse_direction(s: &str) -> Result<GradientDirection> {
    Ok(match s {
        "none" => GradientDirection::None,
        "horizontal" => GradientDirection::Horizontal,
        "vertical" => GradientDirection::Vertical,
        "diagonal" => GradientDirection::Diagonal,
        "radial" => GradientDirection::Radial,
        other => bail!("unknown gradient direction: {other}"),
    })
}

fn export_to(
    path: &Path,
    grid: &ColoredGrid,
    state: &BannerState,
    animated: bool,
    transparent: bool,
) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    let raster_options = RasterOptions {
        transparent,
        ..RasterOptions::default()
    };
    match ext.as_str() {
        "svg" => fs::write(path, svg::document(grid, state))?,
        "html" => fs::write(path, html::document(grid, state))?,
        "ans" => fs::write(path, ansi::ansi(grid) + "\n")?,
        "txt" => fs::write(path, export::plain_text(grid) + "\n")?,
        "sh" => {
            fs::write(path, ansi::shell_script(grid))?;
            make_executable(path)?;
        }
        "png" => fs::write(path, raster::render_png(grid, state, &raster_options)?)?,
        "webp" => {
            let bytes = if animated {
                animation::render_animated_webp(grid, state, &raster_options)?
            } else {
                raster::render_webp(grid, state, &raster_options)?
            };
            fs::write(path, bytes)?;
        }
        "json" => fs::write(path, snapshot::to_json(state, Some(grid))?)?,
        other => bail!("unsupported output extension: .{other}"),
    }
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
