//! Animation-timing model shared by the SVG, HTML and animated-WebP
//! exporters.
//!
//! Every formula here maps one 0-100 slider to duration/amplitude/opacity
//! constants. Exporters must derive their timings from these functions and
//! nothing else, or the live preview and exported files drift apart.
//!
//! Periodic effects are described as declarative [`Timeline`]s, lists of
//! `(time fraction, visual state)` keyframes, and serialized to a concrete
//! animation format (CSS text) by a separate renderer in `export::css`.

/// Seconds for one full 360-degree hue rotation.
pub fn color_shift_duration(speed: f64) -> f64 {
    (10.0 - speed * 0.095).max(0.5)
}

/// Seconds for one CRT flicker pulse.
pub fn flicker_period(intensity: f64) -> f64 {
    (0.2 - intensity * 0.0015).max(0.05)
}

/// Opacity floor the flicker pulse dips to at mid-cycle.
pub fn flicker_min_opacity(intensity: f64) -> f64 {
    1.0 - intensity * 0.003
}

/// Milliseconds of rest between screen-shake bursts.
pub fn shake_interval_ms(intensity: f64) -> f64 {
    (10_000.0 - intensity * 95.0).max(500.0)
}

/// Horizontal shake amplitude in pixels; vertical is half of this.
pub fn shake_amplitude(intensity: f64) -> f64 {
    2.0 + (intensity / 100.0) * 8.0
}

/// Milliseconds of rest between CRT screen-blip bursts.
pub fn blip_interval_ms(intensity: f64) -> f64 {
    (15_000.0 - intensity * 140.0).max(1_000.0)
}

/// Milliseconds of rest between CRT power-loss bursts.
pub fn power_loss_interval_ms(intensity: f64) -> f64 {
    (30_000.0 - intensity * 270.0).max(3_000.0)
}

pub const SHAKE_BURST_MS: f64 = 350.0;
/// Decaying oscillation multipliers played over one shake burst.
pub const SHAKE_PATTERN: [f64; 7] = [1.0, -0.75, 0.6, -0.4, 0.25, -0.1, 0.0];
pub const BLIP_BURST_MS: f64 = 160.0;
pub const POWER_LOSS_BURST_MS: f64 = 1210.0;

/// Hue-rotation angle (degrees) of the color-shift effect at time `t`
/// seconds. Pure function of `t`; used for frozen-frame capture.
pub fn hue_angle_at(speed: f64, t: f64) -> f64 {
    if speed <= 0.0 {
        return 0.0;
    }
    360.0 * (t / color_shift_duration(speed)).rem_euclid(1.0)
}

/// Flicker opacity at time `t` seconds: a symmetric triangular pulse that
/// dips to the minimum at mid-cycle and returns to 1 at cycle boundaries.
/// Not a sine wave.
pub fn flicker_opacity_at(intensity: f64, t: f64) -> f64 {
    if intensity <= 0.0 {
        return 1.0;
    }
    let phase = (t / flicker_period(intensity)).rem_euclid(1.0);
    let depth = 1.0 - (phase - 0.5).abs() * 2.0;
    1.0 - (1.0 - flicker_min_opacity(intensity)) * depth
}

/// Visual state at one keyframe. Absent fields are left to interpolation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KeyStyle {
    /// Translation in pixels.
    pub translate: Option<(f64, f64)>,
    /// Scale factors.
    pub scale: Option<(f64, f64)>,
    pub opacity: Option<f64>,
    /// Brightness filter multiplier.
    pub brightness: Option<f64>,
    /// Hue-rotation in degrees.
    pub hue: Option<f64>,
}

impl KeyStyle {
    fn translate(x: f64, y: f64) -> Self {
        Self {
            translate: Some((x, y)),
            ..Self::default()
        }
    }

    fn hue(deg: f64) -> Self {
        Self {
            hue: Some(deg),
            ..Self::default()
        }
    }

    fn opacity(o: f64) -> Self {
        Self {
            opacity: Some(o),
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    /// Position within the cycle, 0.0..=1.0.
    pub at: f64,
    pub style: KeyStyle,
}

/// A looping animation: keyframes over one cycle of `duration_s` seconds.
/// All timelines interpolate linearly (the flicker triangle and the shake
/// zigzag depend on it).
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    /// Keyframes name / CSS class stem.
    pub name: &'static str,
    pub duration_s: f64,
    pub keyframes: Vec<Keyframe>,
}

fn key(at: f64, style: KeyStyle) -> Keyframe {
    Keyframe { at, style }
}

/// Continuous 360-degree hue rotation. `None` when speed is 0.
pub fn color_shift_timeline(speed: f64) -> Option<Timeline> {
    (speed > 0.0).then(|| Timeline {
        name: "color-shift",
        duration_s: color_shift_duration(speed),
        keyframes: vec![key(0.0, KeyStyle::hue(0.0)), key(1.0, KeyStyle::hue(360.0))],
    })
}

/// Triangular opacity pulse. `None` unless CRT is on and intensity > 0.
pub fn flicker_timeline(crt_enabled: bool, intensity: f64) -> Option<Timeline> {
    (crt_enabled && intensity > 0.0).then(|| Timeline {
        name: "crt-flicker",
        duration_s: flicker_period(intensity),
        keyframes: vec![
            key(0.0, KeyStyle::opacity(1.0)),
            key(0.5, KeyStyle::opacity(flicker_min_opacity(intensity))),
            key(1.0, KeyStyle::opacity(1.0)),
        ],
    })
}

/// Idle rest, then a 350 ms burst of 7 decaying oscillation steps.
pub fn shake_timeline(intensity: f64) -> Option<Timeline> {
    if intensity <= 0.0 {
        return None;
    }
    let idle = shake_interval_ms(intensity);
    let total = idle + SHAKE_BURST_MS;
    let amp = shake_amplitude(intensity);
    let steps = (SHAKE_PATTERN.len() - 1) as f64;

    let mut keyframes = vec![key(0.0, KeyStyle::translate(0.0, 0.0))];
    keyframes.push(key(idle / total, KeyStyle::translate(0.0, 0.0)));
    for (i, m) in SHAKE_PATTERN.iter().enumerate() {
        let at = (idle + SHAKE_BURST_MS * i as f64 / steps) / total;
        keyframes.push(key(at, KeyStyle::translate(amp * m, amp * m * 0.5)));
    }
    Some(Timeline {
        name: "screen-shake",
        duration_s: total / 1000.0,
        keyframes,
    })
}

/// Idle rest, then a 160 ms burst: 4 horizontal jumps with brightness
/// pulses. `None` unless CRT is on and intensity > 0.
pub fn blip_timeline(crt_enabled: bool, intensity: f64) -> Option<Timeline> {
    if !crt_enabled || intensity <= 0.0 {
        return None;
    }
    let idle = blip_interval_ms(intensity);
    let total = idle + BLIP_BURST_MS;
    let rest = KeyStyle {
        translate: Some((0.0, 0.0)),
        brightness: Some(1.0),
        ..KeyStyle::default()
    };
    let burst = |frac: f64, x: f64, brightness: f64| {
        key(
            (idle + BLIP_BURST_MS * frac) / total,
            KeyStyle {
                translate: Some((x, 0.0)),
                brightness: Some(brightness),
                ..KeyStyle::default()
            },
        )
    };
    Some(Timeline {
        name: "crt-blip",
        duration_s: total / 1000.0,
        keyframes: vec![
            key(0.0, rest),
            key(idle / total, rest),
            burst(0.25, -6.0, 1.6),
            burst(0.55, 4.0, 0.7),
            burst(0.8, -2.0, 1.25),
            burst(1.0, 0.0, 1.0),
        ],
    })
}

/// Idle rest, then a 1210 ms burst: horizontal zigzag with vertical squash
/// (6 steps), collapse to near-zero height with 3 brightness pulses, fade
/// to transparent, pause, then a 2-step recovery ramp.
pub fn power_loss_timeline(crt_enabled: bool, intensity: f64) -> Option<Timeline> {
    if !crt_enabled || intensity <= 0.0 {
        return None;
    }
    let idle = power_loss_interval_ms(intensity);
    let total = idle + POWER_LOSS_BURST_MS;
    let full = KeyStyle {
        translate: Some((0.0, 0.0)),
        scale: Some((1.0, 1.0)),
        opacity: Some(1.0),
        brightness: Some(1.0),
        ..KeyStyle::default()
    };
    let burst = |ms: f64, x: f64, sy: f64, opacity: f64, brightness: f64| {
        key(
            (idle + ms) / total,
            KeyStyle {
                translate: Some((x, 0.0)),
                scale: Some((1.0, sy)),
                opacity: Some(opacity),
                brightness: Some(brightness),
                ..KeyStyle::default()
            },
        )
    };
    Some(Timeline {
        name: "crt-power-loss",
        duration_s: total / 1000.0,
        keyframes: vec![
            key(0.0, full),
            key(idle / total, full),
            // zigzag + squash
            burst(70.0, 8.0, 0.92, 1.0, 1.1),
            burst(140.0, -8.0, 0.8, 1.0, 1.0),
            burst(210.0, 6.0, 0.62, 1.0, 1.2),
            burst(280.0, -6.0, 0.45, 1.0, 1.0),
            burst(350.0, 4.0, 0.3, 1.0, 1.3),
            burst(420.0, 0.0, 0.18, 1.0, 1.0),
            // collapse with brightness pulses
            burst(440.0, 0.0, 0.005, 1.0, 2.4),
            burst(480.0, 0.0, 0.005, 1.0, 0.6),
            burst(520.0, 0.0, 0.005, 1.0, 2.0),
            // fade out and hold dark
            burst(620.0, 0.0, 0.005, 0.0, 1.0),
            burst(1060.0, 0.0, 0.005, 0.0, 1.0),
            // recovery ramp
            burst(1135.0, 0.0, 0.6, 1.0, 1.5),
            burst(POWER_LOSS_BURST_MS, 0.0, 1.0, 1.0, 1.0),
        ],
    })
}
