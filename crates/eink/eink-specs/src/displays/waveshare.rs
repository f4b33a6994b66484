//! Waveshare e-ink display specifications
//!
//! Waveshare HATs the host supports through its `epd` driver family.

use crate::{ColorMode, DisplaySpec};

/// Waveshare 7.5" V2 (800×480, UC8179, Carta black/white)
pub const WAVESHARE_7_5_V2: DisplaySpec = DisplaySpec {
    name: "Waveshare 7.5\" V2",
    model: "epd7in5_v2",
    width: 800,
    height: 480,
    color_mode: ColorMode::Monochrome,
};

/// Waveshare 7.3" F (800×480, ACeP 7-colour)
pub const WAVESHARE_7_3_F: DisplaySpec = DisplaySpec {
    name: "Waveshare 7.3\" F",
    model: "epd7in3f",
    width: 800,
    height: 480,
    color_mode: ColorMode::SevenColor,
};

/// Waveshare 4.2" V2 (400×300, Carta black/white)
pub const WAVESHARE_4_2_V2: DisplaySpec = DisplaySpec {
    name: "Waveshare 4.2\" V2",
    model: "epd4in2_v2",
    width: 400,
    height: 300,
    color_mode: ColorMode::Monochrome,
};
