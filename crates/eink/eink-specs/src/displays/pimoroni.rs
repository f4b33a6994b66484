//! Pimoroni Inky display specifications
//!
//! Panels supported by the InkyPi host out of the box.

use crate::{ColorMode, DisplaySpec};

/// Inky Impression 7.3" (800×480, AC073TC1A, ACeP 7-colour)
///
/// The default InkyPi panel. Full refresh takes roughly 30 seconds.
pub const INKY_IMPRESSION_7_3: DisplaySpec = DisplaySpec {
    name: "Inky Impression 7.3\"",
    model: "inky_impression_7_3",
    width: 800,
    height: 480,
    color_mode: ColorMode::SevenColor,
};

/// Inky Impression 5.7" (600×448, UC8159, ACeP 7-colour)
pub const INKY_IMPRESSION_5_7: DisplaySpec = DisplaySpec {
    name: "Inky Impression 5.7\"",
    model: "inky_impression_5_7",
    width: 600,
    height: 448,
    color_mode: ColorMode::SevenColor,
};

/// Inky Impression 4" (640×400, UC8159, ACeP 7-colour)
pub const INKY_IMPRESSION_4: DisplaySpec = DisplaySpec {
    name: "Inky Impression 4\"",
    model: "inky_impression_4",
    width: 640,
    height: 400,
    color_mode: ColorMode::SevenColor,
};

/// Inky Impression 13.3" (1600×1200, EL133UF1, Spectra 6)
pub const INKY_IMPRESSION_13_3: DisplaySpec = DisplaySpec {
    name: "Inky Impression 13.3\"",
    model: "inky_impression_13_3",
    width: 1600,
    height: 1200,
    color_mode: ColorMode::Spectra6,
};

/// Inky wHAT (400×300, SSD1683, black/white/red)
pub const INKY_WHAT: DisplaySpec = DisplaySpec {
    name: "Inky wHAT",
    model: "inky_what",
    width: 400,
    height: 300,
    color_mode: ColorMode::BlackWhiteRed,
};

/// Inky pHAT (250×122, SSD1608, black/white/red)
pub const INKY_PHAT: DisplaySpec = DisplaySpec {
    name: "Inky pHAT",
    model: "inky_phat",
    width: 250,
    height: 122,
    color_mode: ColorMode::BlackWhiteRed,
};
