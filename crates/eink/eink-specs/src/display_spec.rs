//! Display specification types
//!
//! Describes the panels the host can drive: pixel geometry, ink capability
//! and native orientation.

/// Complete specification of an e-ink panel as seen by a renderer.
#[derive(Debug, Clone)]
pub struct DisplaySpec {
    /// Display name (e.g., "Inky Impression 7.3\"")
    pub name: &'static str,

    /// Short lookup key used by configuration files and the CLI
    pub model: &'static str,

    /// Width in pixels (native, horizontal orientation)
    pub width: u32,

    /// Height in pixels (native, horizontal orientation)
    pub height: u32,

    /// Inks the panel can show
    pub color_mode: ColorMode,
}

impl DisplaySpec {
    /// Canvas size `(width, height)` for the given orientation.
    ///
    /// Vertical mounting swaps the native axes.
    pub fn resolution(&self, orientation: Orientation) -> (u32, u32) {
        match orientation {
            Orientation::Horizontal => (self.width, self.height),
            Orientation::Vertical => (self.height, self.width),
        }
    }

    /// Whether the panel can show anything other than black and white
    pub fn supports_color(&self) -> bool {
        self.color_mode.supports_color()
    }
}

/// Inks a panel is able to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Black and white only
    Monochrome,
    /// Black, white and red
    BlackWhiteRed,
    /// Seven inks: black, white, green, blue, red, yellow, orange
    SevenColor,
    /// Six inks: black, white, red, yellow, blue, green
    Spectra6,
}

impl ColorMode {
    /// Whether this mode has any ink besides black and white
    pub fn supports_color(self) -> bool {
        !matches!(self, ColorMode::Monochrome)
    }
}

/// How the panel is mounted relative to its native scan direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Native landscape mounting
    #[default]
    Horizontal,
    /// Rotated 90 degrees (portrait)
    Vertical,
}
