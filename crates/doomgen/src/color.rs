//! Color math for the gradient pipeline.
//!
//! Palette stops are interpolated in OKLCH rather than raw sRGB so that
//! gradient midpoints keep their saturation. Brightness normalization
//! rewrites the L channel only, which needs the full round trip
//! sRGB -> OKLab -> OKLCH -> sRGB.

use crate::error::{BannerError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Chroma below this is treated as achromatic (hue undefined).
const ACHROMATIC_EPS: f64 = 1e-5;

/// 8-bit sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create from a packed hex value (e.g. `0xff4500`).
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// WCAG relative luminance, 0.0 (black) to 1.0 (white).
    pub fn luminance(self) -> f64 {
        let r = srgb_to_linear(self.r);
        let g = srgb_to_linear(self.g);
        let b = srgb_to_linear(self.b);
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    pub fn to_oklch(self) -> Oklch {
        let (l, a, b) = linear_to_oklab(
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        );
        let c = (a * a + b * b).sqrt();
        let h = if c < ACHROMATIC_EPS {
            0.0
        } else {
            b.atan2(a).to_degrees().rem_euclid(360.0)
        };
        Oklch { l, c, h }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = BannerError;

    /// Accepts `#rgb` and `#rrggbb`.
    fn from_str(s: &str) -> Result<Self> {
        let err = || BannerError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        // byte-range slicing below; multibyte input must not reach it
        if !hex.is_ascii() {
            return Err(err());
        }
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).map_err(|_| err())?;
                let g = u8::from_str_radix(&hex[1..2], 16).map_err(|_| err())?;
                let b = u8::from_str_radix(&hex[2..3], 16).map_err(|_| err())?;
                Ok(Rgb::new(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| err())?;
                let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| err())?;
                let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| err())?;
                Ok(Rgb::new(r, g, b))
            }
            _ => Err(err()),
        }
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// OKLCH color: perceptual lightness, chroma, hue in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oklch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Oklch {
    /// Convert back to sRGB, clamping out-of-gamut channels.
    pub fn to_rgb(self) -> Rgb {
        let hr = self.h.to_radians();
        let (r, g, b) = oklab_to_linear(self.l, self.c * hr.cos(), self.c * hr.sin());
        Rgb::new(linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b))
    }
}

/// Interpolate two sRGB colors in OKLCH with shortest-path hue.
pub fn mix(a: Rgb, b: Rgb, t: f64) -> Rgb {
    // exact at the endpoints; the gamut round trip can be off by one
    if t <= 0.0 {
        return a;
    }
    if t >= 1.0 {
        return b;
    }
    let ca = a.to_oklch();
    let cb = b.to_oklch();
    // Achromatic endpoints adopt the other side's hue so grays do not
    // drag the gradient through an arbitrary hue angle.
    let (ha, hb) = match (ca.c < ACHROMATIC_EPS, cb.c < ACHROMATIC_EPS) {
        (true, false) => (cb.h, cb.h),
        (false, true) => (ca.h, ca.h),
        _ => (ca.h, cb.h),
    };
    let delta = (hb - ha + 540.0).rem_euclid(360.0) - 180.0;
    Oklch {
        l: ca.l + (cb.l - ca.l) * t,
        c: ca.c + (cb.c - ca.c) * t,
        h: (ha + delta * t).rem_euclid(360.0),
    }
    .to_rgb()
}

fn srgb_to_linear(c: u8) -> f64 {
    let c = c as f64 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f64) -> u8 {
    let c = c.clamp(0.0, 1.0);
    let c = if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    };
    (c * 255.0).round() as u8
}

// OKLab transform constants from Ottosson's reference implementation.
fn linear_to_oklab(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let l = (0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b).cbrt();
    let m = (0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b).cbrt();
    let s = (0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b).cbrt();
    (
        0.2104542553 * l + 0.7936177850 * m - 0.0040720468 * s,
        1.9779984951 * l - 2.4285922050 * m + 0.4505937099 * s,
        0.0259040371 * l + 0.7827717662 * m - 0.8086757660 * s,
    )
}

fn oklab_to_linear(l: f64, a: f64, b: f64) -> (f64, f64, f64) {
    let l_ = (l + 0.3963377774 * a + 0.2158037573 * b).powi(3);
    let m_ = (l - 0.1055613458 * a - 0.0638541728 * b).powi(3);
    let s_ = (l - 0.0894841775 * a - 1.2914855480 * b).powi(3);
    (
        4.0767416621 * l_ - 3.3077115913 * m_ + 0.2309699292 * s_,
        -1.2684380046 * l_ + 2.6097574011 * m_ - 0.3413193965 * s_,
        -0.0041960863 * l_ - 0.7034186147 * m_ + 1.7076147010 * s_,
    )
}
