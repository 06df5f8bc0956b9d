//! Raster capture: frozen SVG -> resvg -> auto-cropped PNG/WebP bytes.

use super::svg;
use crate::color::Rgb;
use crate::error::{BannerError, Result};
use crate::grid::ColoredLine;
use crate::state::BannerState;
use image::{ImageFormat, Rgba, RgbaImage};
use once_cell::sync::Lazy;
use resvg::{tiny_skia, usvg};
use std::io::Cursor;
use std::sync::Arc;

/// Pixels of padding kept around the content bounding box when cropping.
const CROP_PAD: u32 = 24;
/// Per-channel difference below which a pixel counts as background.
const BG_TOLERANCE: u8 = 2;

#[derive(Clone, Copy, Debug)]
pub struct RasterOptions {
    /// Device pixel ratio; output pixels per SVG unit.
    pub pixel_ratio: f32,
    /// Skip the background rect and crop on alpha instead of color.
    pub transparent: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            pixel_ratio: 2.0,
            transparent: false,
        }
    }
}

// Scanning system fonts takes tens of milliseconds; every rasterization
// shares this one database, and concurrent first callers block on the
// same initialization.
static FONT_DB: Lazy<Arc<usvg::fontdb::Database>> = Lazy::new(|| {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    Arc::new(db)
});

/// Render an SVG string to a pixel buffer at the given scale.
pub(crate) fn rasterize(svg_text: &str, pixel_ratio: f32) -> Result<RgbaImage> {
    let options = usvg::Options {
        fontdb: FONT_DB.clone(),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(svg_text, &options)
        .map_err(|e| BannerError::Svg(e.to_string()))?;
    let size = tree.size();
    let width = (size.width() * pixel_ratio).ceil() as u32;
    let height = (size.height() * pixel_ratio).ceil() as u32;
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| BannerError::Svg("zero-sized canvas".into()))?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(pixel_ratio, pixel_ratio),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap_to_image(&pixmap))
}

fn pixmap_to_image(pixmap: &tiny_skia::Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let mut img = RgbaImage::new(width, pixmap.height());
    for (i, px) in pixmap.pixels().iter().enumerate() {
        let c = px.demultiply();
        img.put_pixel(
            i as u32 % width,
            i as u32 / width,
            Rgba([c.red(), c.green(), c.blue(), c.alpha()]),
        );
    }
    img
}

/// Crop to the bounding box of content pixels, padded by [`CROP_PAD`] and
/// clamped to the image bounds.
///
/// A pixel is content when its alpha is above zero (`background` None) or
/// when any channel differs from the background color by more than
/// [`BG_TOLERANCE`]. An image with no content pixels is returned
/// unchanged; that is not an error.
pub fn crop_to_content(img: &RgbaImage, background: Option<Rgb>) -> RgbaImage {
    let is_content = |p: &Rgba<u8>| -> bool {
        match background {
            None => p[3] > 0,
            Some(bg) => {
                p[3] > 0
                    && (p[0].abs_diff(bg.r) > BG_TOLERANCE
                        || p[1].abs_diff(bg.g) > BG_TOLERANCE
                        || p[2].abs_diff(bg.b) > BG_TOLERANCE)
            }
        }
    };

    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, p) in img.enumerate_pixels() {
        if !is_content(p) {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    let Some((x0, y0, x1, y1)) = bounds else {
        return img.clone();
    };

    let left = x0.saturating_sub(CROP_PAD);
    let top = y0.saturating_sub(CROP_PAD);
    let right = (x1 + CROP_PAD + 1).min(img.width());
    let bottom = (y1 + CROP_PAD + 1).min(img.height());
    image::imageops::crop_imm(img, left, top, right - left, bottom - top).to_image()
}

fn capture(grid: &[ColoredLine], state: &BannerState, options: &RasterOptions) -> Result<RgbaImage> {
    let svg_text = svg::frozen_frame(grid, state, 0.0, !options.transparent);
    let img = rasterize(&svg_text, options.pixel_ratio)?;
    let background = (!options.transparent).then_some(state.bg_color);
    Ok(crop_to_content(&img, background))
}

fn encode(img: &RgbaImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format)?;
    Ok(buf.into_inner())
}

/// Static PNG of the banner frozen at t=0.
pub fn render_png(
    grid: &[ColoredLine],
    state: &BannerState,
    options: &RasterOptions,
) -> Result<Vec<u8>> {
    encode(&capture(grid, state, options)?, ImageFormat::Png)
}

/// Static (lossless) WebP of the banner frozen at t=0.
pub fn render_webp(
    grid: &[ColoredLine],
    state: &BannerState,
    options: &RasterOptions,
) -> Result<Vec<u8>> {
    encode(&capture(grid, state, options)?, ImageFormat::WebP)
}
