//! SVG exporter. `document` emits the animated banner; `frozen_document`
//! emits the same geometry evaluated at a fixed time `t`, which the raster
//! and animated-WebP exporters consume frame by frame.
//!
//! Group nesting is fixed, outer to inner: flicker, power-loss, blip,
//! shake, pixelation, glow/shadow filter + color-shift, text. Disabled
//! effects contribute no markup at all.

use super::{canvas_size, css, escape_xml, fmt_num, CHAR_WIDTH, LINE_HEIGHT, MARGIN};
use crate::grid::{CellColor, ColoredLine};
use crate::palette;
use crate::state::BannerState;
use crate::timing::{self, Timeline};

const FONT_FAMILY: &str = "'JetBrains Mono', monospace";
const FONT_SIZE: &str = "14";

#[derive(Clone, Copy)]
enum Mode {
    Animated,
    /// Deterministic single frame at `t` seconds.
    Frozen { t: f64, background: bool },
}

/// Animated SVG with embedded CSS keyframes.
pub fn document(grid: &[ColoredLine], state: &BannerState) -> String {
    build(grid, state, Mode::Animated)
}

/// Static SVG evaluated at time `t`: hue rotation becomes an
/// `feColorMatrix` and flicker a literal group opacity.
pub fn frozen_document(grid: &[ColoredLine], state: &BannerState, t: f64) -> String {
    build(grid, state, Mode::Frozen { t, background: true })
}

/// Frozen frame with an optional background rect, for raster capture.
pub(crate) fn frozen_frame(
    grid: &[ColoredLine],
    state: &BannerState,
    t: f64,
    background: bool,
) -> String {
    build(grid, state, Mode::Frozen { t, background })
}

fn build(grid: &[ColoredLine], state: &BannerState, mode: Mode) -> String {
    let (width, height) = canvas_size(grid);
    let has_fx = state.glow_intensity > 0.0 || state.shadow_offset > 0.0;
    let flicker_on = state.crt_enabled && state.crt_flicker > 0.0;

    let mut defs: Vec<String> = Vec::new();
    if has_fx {
        defs.push(fx_filter(
            state.glow_intensity,
            state.shadow_offset,
            &palette::find_or_fallback(&state.palette_id).glow_color().to_string(),
        ));
    }
    if state.crt_enabled {
        defs.push(
            "    <pattern id=\"scan\" patternUnits=\"userSpaceOnUse\" width=\"1\" height=\"2\">\n      <rect width=\"1\" height=\"1\" fill=\"#000\" fill-opacity=\"0.3\"/>\n    </pattern>".to_string(),
        );
        defs.push(
            "    <radialGradient id=\"vig\" cx=\"50%\" cy=\"50%\" r=\"70%\">\n      <stop offset=\"0%\" stop-color=\"#000\" stop-opacity=\"0\"/>\n      <stop offset=\"100%\" stop-color=\"#000\" stop-opacity=\"0.5\"/>\n    </radialGradient>".to_string(),
        );
    }
    if state.pixelation > 0.0 {
        defs.push(px_filter(state.pixelation));
    }
    let radius = if state.crt_enabled && state.crt_curvature > 0.0 {
        state.crt_curvature * 0.12
    } else {
        0.0
    };
    if radius > 0.0 {
        defs.push(format!(
            "    <clipPath id=\"clip\"><rect width=\"{}\" height=\"{}\" rx=\"{r}\" ry=\"{r}\"/></clipPath>",
            fmt_num(width),
            fmt_num(height),
            r = fmt_num(radius)
        ));
    }

    // Frozen color shift: one hue-rotation filter instead of keyframes.
    let frozen_hue = match mode {
        Mode::Frozen { t, .. } if state.color_shift_speed > 0.0 => {
            Some(timing::hue_angle_at(state.color_shift_speed, t))
        }
        _ => None,
    };
    if let Some(deg) = frozen_hue {
        defs.push(format!(
            "    <filter id=\"hue\"><feColorMatrix type=\"hueRotate\" values=\"{}\"/></filter>",
            fmt_num(deg)
        ));
    }

    let timelines: Vec<Timeline> = match mode {
        Mode::Animated => [
            timing::flicker_timeline(state.crt_enabled, state.crt_flicker),
            timing::power_loss_timeline(state.crt_enabled, state.crt_power_loss),
            timing::blip_timeline(state.crt_enabled, state.crt_blip),
            timing::shake_timeline(state.screen_shake),
            timing::color_shift_timeline(state.color_shift_speed),
        ]
        .into_iter()
        .flatten()
        .collect(),
        Mode::Frozen { .. } => Vec::new(),
    };

    let style_block = if timelines.is_empty() {
        String::new()
    } else {
        let mut rules = Vec::new();
        for tl in &timelines {
            rules.push(format!("    {}", css::keyframes_rule(tl)));
            rules.push(format!("    {}", css::class_rule(tl)));
        }
        let names: Vec<&str> = timelines.iter().map(|tl| tl.name).collect();
        rules.push(format!("    {}", css::reduced_motion_rule(&names)));
        format!("  <style>\n{}\n  </style>\n", rules.join("\n"))
    };

    let has = |name: &str| timelines.iter().any(|tl| tl.name == name);

    // Text rows, skipping rows with no visible cells.
    let mut texts: Vec<String> = Vec::new();
    for (row, line) in grid.iter().enumerate() {
        let mut spans = String::new();
        for (col, cell) in line.iter().enumerate() {
            let CellColor::Solid(rgb) = cell.color else {
                continue;
            };
            if cell.ch == ' ' {
                continue;
            }
            let x = col as f64 * CHAR_WIDTH + MARGIN;
            spans.push_str(&format!(
                "<tspan x=\"{}\" fill=\"{rgb}\">{}</tspan>",
                fmt_num(x),
                escape_xml(cell.ch)
            ));
        }
        if spans.is_empty() {
            continue;
        }
        let y = row as f64 * LINE_HEIGHT + MARGIN + LINE_HEIGHT;
        texts.push(format!(
            "    <text y=\"{}\" font-family=\"{FONT_FAMILY}\" font-size=\"{FONT_SIZE}\">{spans}</text>",
            fmt_num(y)
        ));
    }

    // Assemble the wrapper chain inside out.
    let mut block = texts.join("\n");

    let mut inner_attrs = String::new();
    if has_fx {
        inner_attrs.push_str(" filter=\"url(#fx)\"");
    }
    if has("color-shift") {
        inner_attrs.push_str(" class=\"color-shift\"");
    }
    if !inner_attrs.is_empty() {
        block = wrap(&block, &inner_attrs);
    }
    if frozen_hue.is_some() {
        block = wrap(&block, " filter=\"url(#hue)\"");
    }
    if state.pixelation > 0.0 {
        block = wrap(&block, " filter=\"url(#px)\"");
    }
    if has("screen-shake") {
        block = wrap(&block, " class=\"screen-shake\"");
    }
    if has("crt-blip") {
        block = wrap(&block, " class=\"crt-blip\"");
    }
    if has("crt-power-loss") {
        block = wrap(&block, " class=\"crt-power-loss\"");
    }
    match mode {
        Mode::Animated if has("crt-flicker") => {
            block = wrap(&block, " class=\"crt-flicker\"");
        }
        Mode::Frozen { t, .. } if flicker_on => {
            let opacity = timing::flicker_opacity_at(state.crt_flicker, t);
            if opacity < 1.0 {
                block = wrap(&block, &format!(" opacity=\"{}\"", fmt_num(opacity)));
            }
        }
        _ => {}
    }

    let mut overlays = String::new();
    if state.crt_enabled {
        overlays.push_str(&format!(
            "    <rect width=\"{w}\" height=\"{h}\" fill=\"url(#scan)\"/>\n    <rect width=\"{w}\" height=\"{h}\" fill=\"url(#vig)\"/>\n",
            w = fmt_num(width),
            h = fmt_num(height)
        ));
    }

    let defs_block = if defs.is_empty() {
        String::new()
    } else {
        format!("  <defs>\n{}\n  </defs>\n", defs.join("\n"))
    };
    let clip_attr = if radius > 0.0 {
        " clip-path=\"url(#clip)\""
    } else {
        ""
    };
    let background = match mode {
        Mode::Frozen {
            background: false, ..
        } => String::new(),
        _ => format!(
            "    <rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
            state.bg_color
        ),
    };

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {w} {h}\" width=\"{w}\" height=\"{h}\">\n{defs_block}{style_block}  <g{clip_attr}>\n{background}{block}\n{overlays}  </g>\n</svg>\n",
        w = fmt_num(width),
        h = fmt_num(height)
    )
}

fn wrap(block: &str, attrs: &str) -> String {
    format!("    <g{attrs}>\n{block}\n    </g>")
}

/// Combined drop-shadow + glow filter; each half present only when its
/// slider is above zero.
fn fx_filter(glow: f64, shadow: f64, glow_color: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    if shadow > 0.0 {
        parts.push(format!(
            "      <feOffset in=\"SourceGraphic\" dx=\"{s}\" dy=\"{s}\" result=\"off\"/>",
            s = fmt_num(shadow)
        ));
        parts.push("      <feFlood flood-color=\"#000000\" flood-opacity=\"0.8\" result=\"sc\"/>".to_string());
        parts.push("      <feComposite in=\"sc\" in2=\"off\" operator=\"in\" result=\"shadow\"/>".to_string());
    }
    if glow > 0.0 {
        parts.push(format!(
            "      <feGaussianBlur in=\"SourceGraphic\" stdDeviation=\"{}\" result=\"blur\"/>",
            fmt_num(glow * 0.5)
        ));
        parts.push(format!(
            "      <feFlood flood-color=\"{glow_color}\" flood-opacity=\"0.8\" result=\"gc\"/>"
        ));
        parts.push("      <feComposite in=\"gc\" in2=\"blur\" operator=\"in\" result=\"glow\"/>".to_string());
    }
    let mut merge: Vec<&str> = Vec::new();
    if shadow > 0.0 {
        merge.push("        <feMergeNode in=\"shadow\"/>");
    }
    if glow > 0.0 {
        merge.push("        <feMergeNode in=\"glow\"/>");
    }
    merge.push("        <feMergeNode in=\"SourceGraphic\"/>");
    parts.push(format!("      <feMerge>\n{}\n      </feMerge>", merge.join("\n")));
    format!(
        "    <filter id=\"fx\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\">\n{}\n    </filter>",
        parts.join("\n")
    )
}

/// Blur + discrete posterize, a cheap mosaic approximation.
fn px_filter(radius: f64) -> String {
    const TABLE: &str = "0 .1 .2 .3 .4 .5 .6 .7 .8 .9 1";
    format!(
        "    <filter id=\"px\"><feGaussianBlur stdDeviation=\"{}\" in=\"SourceGraphic\" result=\"b\"/><feComponentTransfer in=\"b\"><feFuncR type=\"discrete\" tableValues=\"{TABLE}\"/><feFuncG type=\"discrete\" tableValues=\"{TABLE}\"/><feFuncB type=\"discrete\" tableValues=\"{TABLE}\"/></feComponentTransfer></filter>",
        fmt_num(radius)
    )
}
