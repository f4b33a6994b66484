//! Ink palette for colour and monochrome e-ink panels
//!
//! ACeP panels show seven inks, Spectra 6 panels six, tri-pigment panels
//! three and Carta panels two. Every pixel on a [`Canvas`](crate::Canvas) is
//! one [`InkColor`]; inks a panel cannot show are mapped onto inks it can.

use eink_specs::ColorMode;
use embedded_graphics::pixelcolor::PixelColor;

/// One of the pigments an e-ink panel can show
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum InkColor {
    /// Black pigment
    Black,
    /// White (unpigmented) background
    #[default]
    White,
    /// Green pigment
    Green,
    /// Blue pigment
    Blue,
    /// Red pigment
    Red,
    /// Yellow pigment
    Yellow,
    /// Orange pigment (ACeP only)
    Orange,
}

impl PixelColor for InkColor {
    type Raw = ();
}

impl InkColor {
    /// All inks, in ACeP palette order
    pub const ALL: [InkColor; 7] = [
        InkColor::Black,
        InkColor::White,
        InkColor::Green,
        InkColor::Blue,
        InkColor::Red,
        InkColor::Yellow,
        InkColor::Orange,
    ];

    /// Saturated sRGB value of the ink, as the host's palette quantiser uses it
    pub fn to_rgb(self) -> [u8; 3] {
        match self {
            InkColor::Black => [0, 0, 0],
            InkColor::White => [255, 255, 255],
            InkColor::Green => [0, 255, 0],
            InkColor::Blue => [0, 0, 255],
            InkColor::Red => [255, 0, 0],
            InkColor::Yellow => [255, 255, 0],
            InkColor::Orange => [255, 140, 0],
        }
    }

    /// Lowercase ink name
    pub fn name(self) -> &'static str {
        match self {
            InkColor::Black => "black",
            InkColor::White => "white",
            InkColor::Green => "green",
            InkColor::Blue => "blue",
            InkColor::Red => "red",
            InkColor::Yellow => "yellow",
            InkColor::Orange => "orange",
        }
    }

    /// Whether a panel in `mode` has this pigment
    pub fn is_available_in(self, mode: ColorMode) -> bool {
        match mode {
            ColorMode::Monochrome => matches!(self, InkColor::Black | InkColor::White),
            ColorMode::BlackWhiteRed => {
                matches!(self, InkColor::Black | InkColor::White | InkColor::Red)
            }
            ColorMode::SevenColor => true,
            ColorMode::Spectra6 => !matches!(self, InkColor::Orange),
        }
    }

    /// Map this ink onto one the panel can show.
    ///
    /// Unavailable inks become the nearest available *non-white* ink so that
    /// foreground content never vanishes into the background.
    pub fn for_mode(self, mode: ColorMode) -> InkColor {
        if self.is_available_in(mode) {
            return self;
        }
        let rgb = self.to_rgb();
        InkColor::ALL
            .iter()
            .copied()
            .filter(|ink| *ink != InkColor::White && ink.is_available_in(mode))
            .min_by_key(|ink| distance_sq(ink.to_rgb(), rgb))
            .unwrap_or(InkColor::Black)
    }

    /// Nearest ink to an arbitrary sRGB colour (squared Euclidean distance).
    ///
    /// Ties resolve to the earlier ink in [`InkColor::ALL`].
    pub fn nearest(rgb: [u8; 3]) -> InkColor {
        InkColor::ALL
            .iter()
            .copied()
            .min_by_key(|ink| distance_sq(ink.to_rgb(), rgb))
            .unwrap_or(InkColor::Black)
    }

    /// Parse a `#rrggbb` (or `rrggbb`, or `#rgb`) hex colour and snap it to
    /// the nearest ink. Returns `None` for malformed input.
    pub fn from_hex(hex: &str) -> Option<InkColor> {
        parse_hex_rgb(hex).map(InkColor::nearest)
    }
}

/// Parse `#rrggbb`, `rrggbb`, `#rgb` or `rgb` into an sRGB triple.
pub fn parse_hex_rgb(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.trim().trim_start_matches('#');
    if !digits.is_ascii() {
        return None;
    }
    match digits.len() {
        6 => {
            let r = u8::from_str_radix(digits.get(0..2)?, 16).ok()?;
            let g = u8::from_str_radix(digits.get(2..4)?, 16).ok()?;
            let b = u8::from_str_radix(digits.get(4..6)?, 16).ok()?;
            Some([r, g, b])
        }
        3 => {
            let mut out = [0u8; 3];
            for (slot, idx) in out.iter_mut().zip(0..3) {
                let nibble = u8::from_str_radix(digits.get(idx..idx + 1)?, 16).ok()?;
                *slot = nibble * 17;
            }
            Some(out)
        }
        _ => None,
    }
}

fn distance_sq(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = i32::from(x) - i32::from(y);
            d.unsigned_abs().pow(2)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_values() {
        assert_eq!(InkColor::Black.to_rgb(), [0, 0, 0]);
        assert_eq!(InkColor::White.to_rgb(), [255, 255, 255]);
        assert_eq!(InkColor::Orange.to_rgb(), [255, 140, 0]);
    }

    #[test]
    fn test_default_is_white() {
        assert_eq!(InkColor::default(), InkColor::White);
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(parse_hex_rgb("#323296"), Some([0x32, 0x32, 0x96]));
        assert_eq!(parse_hex_rgb("ffffff"), Some([255, 255, 255]));
        assert_eq!(parse_hex_rgb("#f00"), Some([255, 0, 0]));
        assert_eq!(parse_hex_rgb("#12345"), None);
        assert_eq!(parse_hex_rgb("#gg0000"), None);
        assert_eq!(parse_hex_rgb(""), None);
        assert_eq!(parse_hex_rgb("#ééé"), None);
    }

    #[test]
    fn test_nearest_ink() {
        // The host's default accent is a dark blue
        assert_eq!(InkColor::from_hex("#323296"), Some(InkColor::Blue));
        assert_eq!(InkColor::from_hex("#000000"), Some(InkColor::Black));
        assert_eq!(InkColor::from_hex("#fefefe"), Some(InkColor::White));
        assert_eq!(InkColor::from_hex("#ff8800"), Some(InkColor::Orange));
        assert_eq!(InkColor::from_hex("not a colour"), None);
    }

    #[test]
    fn test_availability() {
        assert!(InkColor::Black.is_available_in(ColorMode::Monochrome));
        assert!(!InkColor::Red.is_available_in(ColorMode::Monochrome));
        assert!(InkColor::Red.is_available_in(ColorMode::BlackWhiteRed));
        assert!(!InkColor::Orange.is_available_in(ColorMode::Spectra6));
        for ink in InkColor::ALL {
            assert!(ink.is_available_in(ColorMode::SevenColor));
        }
    }

    #[test]
    fn test_for_mode_never_maps_foreground_to_white() {
        for mode in [
            ColorMode::Monochrome,
            ColorMode::BlackWhiteRed,
            ColorMode::SevenColor,
            ColorMode::Spectra6,
        ] {
            for ink in InkColor::ALL {
                let mapped = ink.for_mode(mode);
                assert!(mapped.is_available_in(mode));
                if ink != InkColor::White {
                    assert_ne!(mapped, InkColor::White, "{ink:?} in {mode:?}");
                }
            }
        }
    }

    #[test]
    fn test_for_mode_mappings() {
        assert_eq!(InkColor::Blue.for_mode(ColorMode::Monochrome), InkColor::Black);
        assert_eq!(InkColor::Yellow.for_mode(ColorMode::BlackWhiteRed), InkColor::Red);
        assert_eq!(InkColor::Orange.for_mode(ColorMode::Spectra6), InkColor::Yellow);
        assert_eq!(InkColor::Green.for_mode(ColorMode::SevenColor), InkColor::Green);
    }
}
