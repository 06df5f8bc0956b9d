//! Animated WebP exporter: samples frozen frames over one cycle of the
//! active continuous animations and feeds them to the webp encoder.

use super::raster::{self, rasterize, RasterOptions};
use super::svg;
use crate::error::{BannerError, Result};
use crate::grid::ColoredLine;
use crate::state::BannerState;
use crate::timing;
use webp_animation::{AnimParams, Encoder, EncoderOptions};

/// Hard cap on sampled frames per cycle.
pub const MAX_FRAMES: usize = 30;
/// Frame rate cap; short cycles get fewer frames rather than faster ones.
pub const MAX_FPS: f64 = 10.0;

/// Encode one looping cycle of the banner's continuous animations
/// (color shift and CRT flicker). When neither is active this delegates
/// to the static WebP exporter instead of emitting a one-frame loop.
///
/// Frames are full-canvas: no per-frame crop, so every frame shares the
/// same dimensions and nothing wobbles.
pub fn render_animated_webp(
    grid: &[ColoredLine],
    state: &BannerState,
    options: &RasterOptions,
) -> Result<Vec<u8>> {
    let shift_cycle = (state.color_shift_speed > 0.0)
        .then(|| timing::color_shift_duration(state.color_shift_speed));
    let flicker_cycle = (state.crt_enabled && state.crt_flicker > 0.0)
        .then(|| timing::flicker_period(state.crt_flicker));

    let Some(cycle) = [shift_cycle, flicker_cycle]
        .into_iter()
        .flatten()
        .fold(None::<f64>, |acc, c| Some(acc.map_or(c, |a| a.max(c))))
    else {
        return raster::render_webp(grid, state, options);
    };

    let frame_count = frame_count_for(cycle);
    let frame_ms = cycle * 1000.0 / frame_count as f64;

    let mut encoder: Option<Encoder> = None;
    for i in 0..frame_count {
        let t = cycle * i as f64 / frame_count as f64;
        let svg_text = svg::frozen_frame(grid, state, t, !options.transparent);
        let frame = rasterize(&svg_text, options.pixel_ratio)?;

        let enc = match &mut encoder {
            Some(enc) => enc,
            None => {
                let params = AnimParams { loop_count: 0 };
                let enc = Encoder::new_with_options(
                    frame.dimensions(),
                    EncoderOptions {
                        anim_params: params,
                        ..EncoderOptions::default()
                    },
                )
                .map_err(|e| BannerError::WebpEncode(format!("{e:?}")))?;
                encoder.insert(enc)
            }
        };
        enc.add_frame(frame.as_raw(), (i as f64 * frame_ms) as i32)
            .map_err(|e| BannerError::WebpEncode(format!("{e:?}")))?;
    }

    let encoder = encoder.ok_or_else(|| BannerError::WebpEncode("no frames sampled".into()))?;
    let data = encoder
        .finalize((frame_count as f64 * frame_ms) as i32)
        .map_err(|e| BannerError::WebpEncode(format!("{e:?}")))?;
    Ok(data.to_vec())
}

/// Frames sampled over a cycle of `cycle_s` seconds: 10 fps, at least 2,
/// at most [`MAX_FRAMES`].
fn frame_count_for(cycle_s: f64) -> usize {
    ((cycle_s * MAX_FPS).ceil() as usize).clamp(2, MAX_FRAMES)
}
