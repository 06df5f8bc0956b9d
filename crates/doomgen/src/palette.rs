//! Static registry of DOOM-themed color palettes.

use crate::color::{self, Rgb};

/// Named gradient: an ordered list of color stops sampled in OKLCH.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub stops: &'static [Rgb],
}

pub static DOOM_PALETTES: &[Palette] = &[
    Palette {
        id: "hellfire",
        label: "Hellfire",
        description: "Hell fire, lava",
        stops: &[
            Rgb::from_hex(0x1a0000),
            Rgb::from_hex(0x8b0000),
            Rgb::from_hex(0xff0000),
            Rgb::from_hex(0xff4500),
            Rgb::from_hex(0xff6600),
            Rgb::from_hex(0xffa500),
            Rgb::from_hex(0xffff00),
        ],
    },
    Palette {
        id: "cyberdemon",
        label: "Cyberdemon",
        description: "Cyberdemon energy",
        stops: &[
            Rgb::from_hex(0x0a0a2e),
            Rgb::from_hex(0x1a1a4e),
            Rgb::from_hex(0x4040ff),
            Rgb::from_hex(0x00ffff),
            Rgb::from_hex(0xffffff),
        ],
    },
    Palette {
        id: "toxic-waste",
        label: "Toxic Waste",
        description: "Radiation barrels",
        stops: &[
            Rgb::from_hex(0x001a00),
            Rgb::from_hex(0x003300),
            Rgb::from_hex(0x006600),
            Rgb::from_hex(0x00cc00),
            Rgb::from_hex(0x00ff00),
            Rgb::from_hex(0x88ff88),
        ],
    },
    Palette {
        id: "cacodemon",
        label: "Cacodemon",
        description: "Cacodemon purple",
        stops: &[
            Rgb::from_hex(0x0a001a),
            Rgb::from_hex(0x1a0033),
            Rgb::from_hex(0x3300ff),
            Rgb::from_hex(0x6600ff),
            Rgb::from_hex(0x9933ff),
            Rgb::from_hex(0xcc66ff),
        ],
    },
    Palette {
        id: "bfg-9000",
        label: "BFG 9000",
        description: "BFG energy blast",
        stops: &[
            Rgb::from_hex(0x001a00),
            Rgb::from_hex(0x00ff00),
            Rgb::from_hex(0x33ff33),
            Rgb::from_hex(0x66ff66),
            Rgb::from_hex(0xccffcc),
            Rgb::from_hex(0xffffff),
        ],
    },
    Palette {
        id: "baron",
        label: "Baron",
        description: "Baron of Hell",
        stops: &[
            Rgb::from_hex(0x1a0a00),
            Rgb::from_hex(0x4d1a00),
            Rgb::from_hex(0x993300),
            Rgb::from_hex(0xcc4400),
            Rgb::from_hex(0xff6600),
            Rgb::from_hex(0xffaa00),
        ],
    },
];

/// Look up a palette by id.
pub fn find(id: &str) -> Option<&'static Palette> {
    DOOM_PALETTES.iter().find(|p| p.id == id)
}

/// Palette used when an id is unknown (first registry entry).
pub fn fallback() -> &'static Palette {
    &DOOM_PALETTES[0]
}

/// Resolve an id, falling back to the default palette.
pub fn find_or_fallback(id: &str) -> &'static Palette {
    find(id).unwrap_or_else(fallback)
}

impl Palette {
    /// Sample the gradient at `t` in [0, 1] (clamped).
    pub fn sample(&self, t: f64) -> Rgb {
        let n = self.stops.len();
        if n == 1 {
            return self.stops[0];
        }
        let scaled = t.clamp(0.0, 1.0) * (n - 1) as f64;
        let i = (scaled.floor() as usize).min(n - 2);
        color::mix(self.stops[i], self.stops[i + 1], scaled - i as f64)
    }

    /// The brightest stop by WCAG luminance; default glow tint.
    pub fn glow_color(&self) -> Rgb {
        self.stops
            .iter()
            .copied()
            .max_by(|a, b| a.luminance().total_cmp(&b.luminance()))
            .unwrap_or(Rgb::new(255, 255, 255))
    }

    /// Maximum OKLCH lightness reachable within the `[start, end]`
    /// sub-range (both in [0, 1]), sampled at 16 points.
    pub fn max_lightness(&self, start: f64, end: f64) -> f64 {
        const SAMPLES: u32 = 16;
        (0..=SAMPLES)
            .map(|i| start + (end - start) * i as f64 / SAMPLES as f64)
            .map(|t| self.sample(t).to_oklch().l)
            .fold(0.0, f64::max)
    }
}
