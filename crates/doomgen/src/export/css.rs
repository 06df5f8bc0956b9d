//! CSS serializer for [`Timeline`]s. The timing model stays declarative;
//! this module is the one place keyframe data becomes `@keyframes` text,
//! shared by the SVG and HTML exporters.

use super::fmt_num;
use crate::timing::{KeyStyle, Timeline};

fn style_decls(style: &KeyStyle) -> String {
    let mut decls = Vec::new();

    let mut transforms = Vec::new();
    if let Some((x, y)) = style.translate {
        transforms.push(format!("translate({}px, {}px)", fmt_num(x), fmt_num(y)));
    }
    if let Some((sx, sy)) = style.scale {
        transforms.push(format!("scale({}, {})", fmt_num(sx), fmt_num(sy)));
    }
    if !transforms.is_empty() {
        decls.push(format!("transform: {};", transforms.join(" ")));
    }

    if let Some(o) = style.opacity {
        decls.push(format!("opacity: {};", fmt_num(o)));
    }

    let mut filters = Vec::new();
    if let Some(b) = style.brightness {
        filters.push(format!("brightness({})", fmt_num(b)));
    }
    if let Some(h) = style.hue {
        filters.push(format!("hue-rotate({}deg)", fmt_num(h)));
    }
    if !filters.is_empty() {
        decls.push(format!("filter: {};", filters.join(" ")));
    }

    decls.join(" ")
}

/// One-line `@keyframes <name>-anim { ... }` rule.
pub fn keyframes_rule(timeline: &Timeline) -> String {
    let frames = timeline
        .keyframes
        .iter()
        .map(|kf| {
            format!(
                "{}% {{ {} }}",
                fmt_num(kf.at * 100.0),
                style_decls(&kf.style)
            )
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!("@keyframes {}-anim {{ {} }}", timeline.name, frames)
}

/// The class rule binding an element to its timeline. All timelines run
/// with linear easing so the triangular/zigzag shapes come out straight.
pub fn class_rule(timeline: &Timeline) -> String {
    format!(
        ".{name} {{ animation: {name}-anim {dur}s linear infinite; }}",
        name = timeline.name,
        dur = fmt_num(timeline.duration_s)
    )
}

/// One shared media rule disabling every declared animation class.
pub fn reduced_motion_rule(names: &[&str]) -> String {
    let selectors = names
        .iter()
        .map(|n| format!(".{n}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "@media (prefers-reduced-motion: reduce) {{ {selectors} {{ animation: none !important; }} }}"
    )
}
