//! The banner state: every user-adjustable slider plus the text, font,
//! layout and palette selections. Exporters and the effects chain read
//! only this value; nothing global.

use crate::color::Rgb;
use crate::colorize::{ColorizeOptions, GradientDirection};
use crate::figlet::LayoutMode;
use serde::{Deserialize, Serialize};

/// The effect parameter bundle + input selections.
///
/// Serialized with camelCase keys inside `.doomgen.json` snapshots.
/// Slider ranges: glow 0-100, shadow 0-6, drip 0-100, distress 0-50,
/// pixelation 0-10, CRT sub-parameters 0-100, shake 0-100,
/// color shift 0-100, palette range 0-100 percent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BannerState {
    pub text: String,
    pub font_id: String,
    pub layout: LayoutMode,
    pub palette_id: String,
    pub gradient_direction: GradientDirection,
    pub palette_start: f64,
    pub palette_end: f64,
    pub normalize_brightness: bool,
    pub glow_intensity: f64,
    pub shadow_offset: f64,
    pub drip_density: f64,
    pub distress_intensity: f64,
    pub pixelation: f64,
    pub crt_enabled: bool,
    pub crt_curvature: f64,
    pub crt_flicker: f64,
    pub crt_blip: f64,
    pub crt_power_loss: f64,
    pub screen_shake: f64,
    pub color_shift_speed: f64,
    pub bg_color: Rgb,
    /// Legacy key from older saves; accepted and round-tripped, drives
    /// nothing.
    pub animations_enabled: bool,
}

impl Default for BannerState {
    fn default() -> Self {
        Self {
            text: "DOOM".to_string(),
            font_id: "Doom".to_string(),
            layout: LayoutMode::default(),
            palette_id: "hellfire".to_string(),
            gradient_direction: GradientDirection::Horizontal,
            palette_start: 0.0,
            palette_end: 100.0,
            normalize_brightness: false,
            glow_intensity: 60.0,
            shadow_offset: 0.0,
            drip_density: 0.0,
            distress_intensity: 0.0,
            pixelation: 0.0,
            crt_enabled: false,
            crt_curvature: 0.0,
            crt_flicker: 0.0,
            crt_blip: 0.0,
            crt_power_loss: 0.0,
            screen_shake: 0.0,
            color_shift_speed: 0.0,
            bg_color: Rgb::from_hex(0x0a0a0a),
            animations_enabled: true,
        }
    }
}

impl BannerState {
    /// Colorizer options derived from this state.
    pub fn colorize_options(&self) -> ColorizeOptions {
        ColorizeOptions {
            direction: self.gradient_direction,
            normalize_brightness: self.normalize_brightness,
            palette_start: self.palette_start,
            palette_end: self.palette_end,
        }
    }

    /// Overwrite only the fields the patch carries; everything else keeps
    /// its current value. This is the snapshot-import merge semantics.
    pub fn apply(&mut self, patch: StatePatch) {
        macro_rules! merge {
            ($($field:ident),+ $(,)?) => {
                $(if let Some(v) = patch.$field { self.$field = v; })+
            };
        }
        merge!(
            text,
            font_id,
            layout,
            palette_id,
            gradient_direction,
            palette_start,
            palette_end,
            normalize_brightness,
            glow_intensity,
            shadow_offset,
            drip_density,
            distress_intensity,
            pixelation,
            crt_enabled,
            crt_curvature,
            crt_flicker,
            crt_blip,
            crt_power_loss,
            screen_shake,
            color_shift_speed,
            bg_color,
            animations_enabled,
        );
    }
}

/// All-optional mirror of [`BannerState`] used when importing snapshots:
/// keys absent from the file stay `None` and leave prior state untouched.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatePatch {
    pub text: Option<String>,
    pub font_id: Option<String>,
    pub layout: Option<LayoutMode>,
    pub palette_id: Option<String>,
    pub gradient_direction: Option<GradientDirection>,
    pub palette_start: Option<f64>,
    pub palette_end: Option<f64>,
    pub normalize_brightness: Option<bool>,
    pub glow_intensity: Option<f64>,
    pub shadow_offset: Option<f64>,
    pub drip_density: Option<f64>,
    pub distress_intensity: Option<f64>,
    pub pixelation: Option<f64>,
    pub crt_enabled: Option<bool>,
    pub crt_curvature: Option<f64>,
    pub crt_flicker: Option<f64>,
    pub crt_blip: Option<f64>,
    pub crt_power_loss: Option<f64>,
    pub screen_shake: Option<f64>,
    pub color_shift_speed: Option<f64>,
    pub bg_color: Option<Rgb>,
    pub animations_enabled: Option<bool>,
}
