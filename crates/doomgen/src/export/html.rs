//! Standalone HTML exporter: a self-contained page with span-per-cell
//! markup, CSS equivalents of the SVG effects and an embedded
//! requestAnimationFrame engine that recomputes the color-shift hue and
//! flicker opacity from wall-clock deltas. The only external reference is
//! the web font stylesheet.

use super::{css, fmt_num, LINE_HEIGHT, MARGIN};
use crate::grid::{CellColor, ColoredLine};
use crate::palette;
use crate::state::BannerState;
use crate::timing::{self, Timeline};

const FONT_URL: &str =
    "https://fonts.googleapis.com/css2?family=JetBrains+Mono&display=swap";

pub fn document(grid: &[ColoredLine], state: &BannerState) -> String {
    let timelines: Vec<Timeline> = [
        timing::flicker_timeline(state.crt_enabled, state.crt_flicker),
        timing::power_loss_timeline(state.crt_enabled, state.crt_power_loss),
        timing::blip_timeline(state.crt_enabled, state.crt_blip),
        timing::shake_timeline(state.screen_shake),
        timing::color_shift_timeline(state.color_shift_speed),
    ]
    .into_iter()
    .flatten()
    .collect();
    let has = |name: &str| timelines.iter().any(|tl| tl.name == name);

    let style = build_style(state, &timelines);
    let rows = build_rows(grid);

    // Same wrapper order as the SVG exporter, divs instead of groups.
    let mut body = format!("<div class=\"banner\">\n{rows}\n</div>");
    for class in [
        "color-shift",
        "screen-shake",
        "crt-blip",
        "crt-power-loss",
        "crt-flicker",
    ] {
        if has(class) {
            body = format!("<div class=\"{class}\">\n{body}\n</div>");
        }
    }

    let script = build_engine(state);

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>doomgen banner</title>\n<link rel=\"stylesheet\" href=\"{FONT_URL}\">\n<style>\n{style}</style>\n</head>\n<body>\n{body}\n{script}</body>\n</html>\n"
    )
}

fn build_style(state: &BannerState, timelines: &[Timeline]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "body {{ margin: 0; min-height: 100vh; display: flex; align-items: center; justify-content: center; background: {}; }}\n",
        state.bg_color
    ));

    let radius = if state.crt_enabled && state.crt_curvature > 0.0 {
        state.crt_curvature * 0.12
    } else {
        0.0
    };
    out.push_str(&format!(
        ".banner {{ position: relative; padding: {}px; background: {}; font-family: 'JetBrains Mono', monospace; font-size: 14px; line-height: {}px; white-space: pre;{}{} }}\n",
        fmt_num(MARGIN),
        state.bg_color,
        fmt_num(LINE_HEIGHT),
        if radius > 0.0 {
            format!(" border-radius: {}px; overflow: hidden;", fmt_num(radius))
        } else {
            String::new()
        },
        text_filters(state)
    ));

    if state.glow_intensity > 0.0 {
        let glow = palette::find_or_fallback(&state.palette_id).glow_color();
        out.push_str(&format!(
            ".banner span {{ text-shadow: 0 0 {}px {glow}; }}\n",
            fmt_num(state.glow_intensity * 0.5)
        ));
    }

    if state.crt_enabled {
        // scanlines and vignette as pseudo-elements over the banner
        out.push_str(".banner::before { content: ''; position: absolute; inset: 0; pointer-events: none; background: repeating-linear-gradient(to bottom, rgba(0,0,0,0.3) 0 1px, transparent 1px 2px); }\n");
        out.push_str(".banner::after { content: ''; position: absolute; inset: 0; pointer-events: none; background: radial-gradient(ellipse at center, transparent 0%, rgba(0,0,0,0.5) 100%); }\n");
    }

    for tl in timelines {
        out.push_str(&css::keyframes_rule(tl));
        out.push('\n');
        out.push_str(&css::class_rule(tl));
        out.push('\n');
    }
    if !timelines.is_empty() {
        let names: Vec<&str> = timelines.iter().map(|tl| tl.name).collect();
        out.push_str(&css::reduced_motion_rule(&names));
        out.push('\n');
    }
    out
}

/// Shadow and pixelation composed into a single `filter:` list for the
/// banner element.
fn text_filters(state: &BannerState) -> String {
    let mut filters = Vec::new();
    if state.shadow_offset > 0.0 {
        let s = fmt_num(state.shadow_offset);
        filters.push(format!("drop-shadow({s}px {s}px 0 rgba(0,0,0,0.8))"));
    }
    if state.pixelation > 0.0 {
        filters.push(format!("blur({}px)", fmt_num(state.pixelation)));
    }
    if filters.is_empty() {
        String::new()
    } else {
        format!(" filter: {};", filters.join(" "))
    }
}

fn build_rows(grid: &[ColoredLine]) -> String {
    grid.iter()
        .map(|line| {
            let mut row = String::from("<div>");
            for cell in line {
                match cell.color {
                    CellColor::Solid(rgb) if cell.ch != ' ' => {
                        row.push_str(&format!(
                            "<span style=\"color:{rgb}\">{}</span>",
                            escape_html(cell.ch)
                        ));
                    }
                    _ => row.push_str(&escape_html(cell.ch)),
                }
            }
            row.push_str("</div>");
            row
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_html(ch: char) -> String {
    match ch {
        '&' => "&amp;".to_string(),
        '<' => "&lt;".to_string(),
        '>' => "&gt;".to_string(),
        c => c.to_string(),
    }
}

/// Wall-clock animation engine for the two continuous effects. Keeps the
/// exported page moving even where CSS animations are suppressed; the
/// formulas mirror the keyframe rules exactly.
fn build_engine(state: &BannerState) -> String {
    let shift_on = state.color_shift_speed > 0.0;
    let flicker_on = state.crt_enabled && state.crt_flicker > 0.0;
    if !shift_on && !flicker_on {
        return String::new();
    }
    let shift_dur = if shift_on {
        timing::color_shift_duration(state.color_shift_speed)
    } else {
        0.0
    };
    let (period, min_opacity) = if flicker_on {
        (
            timing::flicker_period(state.crt_flicker),
            timing::flicker_min_opacity(state.crt_flicker),
        )
    } else {
        (0.0, 1.0)
    };
    format!(
        r#"<script>
(function () {{
  if (window.matchMedia('(prefers-reduced-motion: reduce)').matches) return;
  var shift = document.querySelector('.color-shift');
  var flicker = document.querySelector('.crt-flicker');
  var shiftDur = {shift_dur};
  var period = {period};
  var minOpacity = {min_opacity};
  var start = performance.now();
  function frame(now) {{
    var t = (now - start) / 1000;
    if (shift && shiftDur > 0) {{
      var deg = 360 * ((t / shiftDur) % 1);
      shift.style.filter = 'hue-rotate(' + deg.toFixed(1) + 'deg)';
    }}
    if (flicker && period > 0) {{
      var phase = (t / period) % 1;
      var depth = 1 - Math.abs(phase - 0.5) * 2;
      flicker.style.opacity = (1 - (1 - minOpacity) * depth).toFixed(3);
    }}
    requestAnimationFrame(frame);
  }}
  requestAnimationFrame(frame);
}})();
</script>
"#,
        shift_dur = fmt_num(shift_dur),
        period = fmt_num(period),
        min_opacity = fmt_num(min_opacity)
    )
}
