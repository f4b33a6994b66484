//! Text roles and font resolution
//!
//! Text is drawn with u8g2 bitmap fonts. Each role asks for a pixel height
//! derived from its base size, the font scale and the canvas, and is given
//! the face whose line height comes closest. Every face carries the full
//! Latin-1 set, so accented item names draw correctly.

use embedded_graphics::prelude::*;
use u8g2_fonts::{
    fonts,
    types::{FontColor, VerticalPosition},
    FontRenderer,
};

use crate::config::FontScale;

/// Canvas height the role base sizes are designed for
pub const REFERENCE_HEIGHT: u32 = 480;

/// Lower bound of the canvas factor applied to base sizes
pub const MIN_CANVAS_FACTOR: f32 = 0.5;

const ELLIPSIS: &str = "...";

// Spans the tallest ascender and the deepest descender of a face.
const METRIC_SAMPLE: &str = "Qgjpqy|";

const FIXED_5X7: FontRenderer =
    FontRenderer::new::<fonts::u8g2_font_5x7_tf>().with_ignore_unknown_chars(true);
const FIXED_6X10: FontRenderer =
    FontRenderer::new::<fonts::u8g2_font_6x10_tf>().with_ignore_unknown_chars(true);
const HELV_R08: FontRenderer =
    FontRenderer::new::<fonts::u8g2_font_helvR08_tf>().with_ignore_unknown_chars(true);
const HELV_R10: FontRenderer =
    FontRenderer::new::<fonts::u8g2_font_helvR10_tf>().with_ignore_unknown_chars(true);
const HELV_R12: FontRenderer =
    FontRenderer::new::<fonts::u8g2_font_helvR12_tf>().with_ignore_unknown_chars(true);
const HELV_R14: FontRenderer =
    FontRenderer::new::<fonts::u8g2_font_helvR14_tf>().with_ignore_unknown_chars(true);
const HELV_R18: FontRenderer =
    FontRenderer::new::<fonts::u8g2_font_helvR18_tf>().with_ignore_unknown_chars(true);
const HELV_R24: FontRenderer =
    FontRenderer::new::<fonts::u8g2_font_helvR24_tf>().with_ignore_unknown_chars(true);
const UNIVERSAL_R30: FontRenderer =
    FontRenderer::new::<fonts::u8g2_font_fur30_tf>().with_ignore_unknown_chars(true);
const HELV_B08: FontRenderer =
    FontRenderer::new::<fonts::u8g2_font_helvB08_tf>().with_ignore_unknown_chars(true);
const HELV_B10: FontRenderer =
    FontRenderer::new::<fonts::u8g2_font_helvB10_tf>().with_ignore_unknown_chars(true);
const HELV_B12: FontRenderer =
    FontRenderer::new::<fonts::u8g2_font_helvB12_tf>().with_ignore_unknown_chars(true);
const HELV_B14: FontRenderer =
    FontRenderer::new::<fonts::u8g2_font_helvB14_tf>().with_ignore_unknown_chars(true);
const HELV_B18: FontRenderer =
    FontRenderer::new::<fonts::u8g2_font_helvB18_tf>().with_ignore_unknown_chars(true);
const HELV_B24: FontRenderer =
    FontRenderer::new::<fonts::u8g2_font_helvB24_tf>().with_ignore_unknown_chars(true);
const UNIVERSAL_B30: FontRenderer =
    FontRenderer::new::<fonts::u8g2_font_fub30_tf>().with_ignore_unknown_chars(true);

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// The u8g2 faces considered for text
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FontFace {
    /// Fixed 5×7
    Fixed5x7,
    /// Fixed 6×10
    Fixed6x10,
    /// Helvetica 8 pt
    Helv8,
    /// Helvetica 10 pt
    Helv10,
    /// Helvetica 12 pt
    Helv12,
    /// Helvetica 14 pt
    Helv14,
    /// Helvetica 18 pt
    Helv18,
    /// Helvetica 24 pt
    Helv24,
    /// FreeUniversal 30
    Universal30,
    /// Helvetica bold 8 pt
    HelvBold8,
    /// Helvetica bold 10 pt
    HelvBold10,
    /// Helvetica bold 12 pt
    HelvBold12,
    /// Helvetica bold 14 pt
    HelvBold14,
    /// Helvetica bold 18 pt
    HelvBold18,
    /// Helvetica bold 24 pt
    HelvBold24,
    /// FreeUniversal bold 30
    UniversalBold30,
}

impl FontFace {
    /// Regular faces, smallest first
    pub const REGULAR: [FontFace; 9] = [
        FontFace::Fixed5x7,
        FontFace::Fixed6x10,
        FontFace::Helv8,
        FontFace::Helv10,
        FontFace::Helv12,
        FontFace::Helv14,
        FontFace::Helv18,
        FontFace::Helv24,
        FontFace::Universal30,
    ];

    /// Bold faces, smallest first
    pub const BOLD: [FontFace; 7] = [
        FontFace::HelvBold8,
        FontFace::HelvBold10,
        FontFace::HelvBold12,
        FontFace::HelvBold14,
        FontFace::HelvBold18,
        FontFace::HelvBold24,
        FontFace::UniversalBold30,
    ];

    /// Renderer for this face; unknown glyphs are skipped
    pub fn renderer(self) -> FontRenderer {
        match self {
            FontFace::Fixed5x7 => FIXED_5X7,
            FontFace::Fixed6x10 => FIXED_6X10,
            FontFace::Helv8 => HELV_R08,
            FontFace::Helv10 => HELV_R10,
            FontFace::Helv12 => HELV_R12,
            FontFace::Helv14 => HELV_R14,
            FontFace::Helv18 => HELV_R18,
            FontFace::Helv24 => HELV_R24,
            FontFace::Universal30 => UNIVERSAL_R30,
            FontFace::HelvBold8 => HELV_B08,
            FontFace::HelvBold10 => HELV_B10,
            FontFace::HelvBold12 => HELV_B12,
            FontFace::HelvBold14 => HELV_B14,
            FontFace::HelvBold18 => HELV_B18,
            FontFace::HelvBold24 => HELV_B24,
            FontFace::UniversalBold30 => UNIVERSAL_B30,
        }
    }

    /// Whether this is a bold face
    pub fn is_bold(self) -> bool {
        FontFace::BOLD.contains(&self)
    }

    /// Pixels from the top of a line to the bottom of its deepest descender
    pub fn line_height(self) -> u32 {
        self.renderer()
            .get_rendered_dimensions(METRIC_SAMPLE, Point::zero(), VerticalPosition::Top)
            .ok()
            .and_then(|dims| dims.bounding_box)
            .map_or(1, |bbox| {
                let bottom = bbox.top_left.y.saturating_add(to_i32(bbox.size.height));
                u32::try_from(bottom).unwrap_or(0).max(1)
            })
    }
}

/// Kind of text line on the page
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TextRole {
    /// Page heading
    Title,
    /// Per-day header in the multi-day layout
    DayHeader,
    /// Menu item, date line and overflow indicator
    Item,
    /// Refresh timestamp
    Small,
}

impl TextRole {
    /// All roles, largest first
    pub const ALL: [TextRole; 4] = [
        TextRole::Title,
        TextRole::DayHeader,
        TextRole::Item,
        TextRole::Small,
    ];

    /// Pixel height at the normal scale on a reference-height canvas
    pub fn base_px(self) -> u32 {
        match self {
            TextRole::Title => 36,
            TextRole::DayHeader => 26,
            TextRole::Item => 22,
            TextRole::Small => 14,
        }
    }

    /// Whether the role is drawn with a bold face
    pub fn is_bold(self) -> bool {
        matches!(self, TextRole::Title | TextRole::DayHeader)
    }

    /// Requested pixel height for this role at `scale` on a `canvas`
    pub fn target_px(self, scale: FontScale, canvas: Size) -> u32 {
        let factor = scale.factor() * canvas_factor(canvas);
        // Base sizes are small integers and factors lie in 0.3..=1.6
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let px = (self.base_px() as f32 * factor).round() as u32;
        px.max(1)
    }

    /// Closest available font for this role at `scale` on a `canvas`
    pub fn resolve(self, scale: FontScale, canvas: Size) -> ResolvedFont {
        ResolvedFont::nearest(self.target_px(scale, canvas), self.is_bold())
    }
}

/// How much text shrinks on a canvas shorter than [`REFERENCE_HEIGHT`]
///
/// Taken from the shorter side so portrait and landscape use the same
/// sizes. Never grows text past the base sizes.
pub fn canvas_factor(canvas: Size) -> f32 {
    let shorter = canvas.width.min(canvas.height) as f32;
    (shorter / REFERENCE_HEIGHT as f32).clamp(MIN_CANVAS_FACTOR, 1.0)
}

/// A font face with its measured line height
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ResolvedFont {
    face: FontFace,
    line_height: u32,
}

impl ResolvedFont {
    /// Measure `face`
    pub fn new(face: FontFace) -> Self {
        Self {
            face,
            line_height: face.line_height(),
        }
    }

    /// Face whose line height is closest to `target_px`
    ///
    /// Ties go to the face listed first.
    pub fn nearest(target_px: u32, bold: bool) -> Self {
        let faces: &[FontFace] = if bold { &FontFace::BOLD } else { &FontFace::REGULAR };
        faces
            .iter()
            .map(|&face| Self::new(face))
            .min_by_key(|font| font.line_height.abs_diff(target_px))
            .unwrap_or_else(|| Self::new(FontFace::Helv10))
    }

    /// Font face
    pub fn face(&self) -> FontFace {
        self.face
    }

    /// Rendered line height in pixels
    pub fn line_height(&self) -> u32 {
        self.line_height
    }

    /// Rendered width of `text` in pixels
    pub fn text_width(&self, text: &str) -> u32 {
        if text.is_empty() {
            return 0;
        }
        let Ok(dims) = self.face.renderer().get_rendered_dimensions(
            text,
            Point::zero(),
            VerticalPosition::Top,
        ) else {
            return 0;
        };
        let ink_right = dims
            .bounding_box
            .map_or(0, |bbox| bbox.top_left.x.saturating_add(to_i32(bbox.size.width)));
        u32::try_from(dims.advance.x.max(ink_right)).unwrap_or(0)
    }

    /// Width of an `M`, used for indents and bullet offsets
    pub fn em_width(&self) -> u32 {
        self.text_width("M").max(1)
    }

    /// `text` shortened with `...` so it fits in `max_width` pixels
    ///
    /// Falls back to a bare prefix when not even one character and the
    /// ellipsis fit.
    pub fn fit(&self, text: &str, max_width: u32) -> String {
        if self.text_width(text) <= max_width {
            return text.to_string();
        }
        let cuts: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        for &end in cuts.iter().rev().filter(|&&end| end > 0) {
            let head = text.get(..end).unwrap_or_default().trim_end();
            if head.is_empty() {
                continue;
            }
            let candidate = format!("{head}{ELLIPSIS}");
            if self.text_width(&candidate) <= max_width {
                return candidate;
            }
        }
        cuts.iter()
            .rev()
            .filter_map(|&end| text.get(..end))
            .find(|prefix| self.text_width(prefix) <= max_width)
            .unwrap_or_default()
            .to_string()
    }

    /// Size of the box `text` occupies
    pub fn text_size(&self, text: &str) -> Size {
        Size::new(self.text_width(text), self.line_height)
    }

    /// Draw `text` with its top-left corner at `top_left`
    pub fn draw<D>(
        &self,
        text: &str,
        top_left: Point,
        color: D::Color,
        target: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget,
    {
        let rendered = self.face.renderer().render(
            text,
            top_left,
            VerticalPosition::Top,
            FontColor::Transparent(color),
            target,
        );
        match rendered {
            Ok(_) => Ok(()),
            Err(u8g2_fonts::Error::DisplayError(err)) => Err(err),
            Err(_) => {
                tracing::warn!(text, face = ?self.face, "text could not be drawn");
                Ok(())
            }
        }
    }
}

/// Resolved fonts for every role at one scale
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FontSet {
    /// Page heading
    pub title: ResolvedFont,
    /// Day headers
    pub header: ResolvedFont,
    /// Items, date line and indicator
    pub item: ResolvedFont,
    /// Timestamp
    pub small: ResolvedFont,
}

impl FontSet {
    /// Resolve all roles at `scale` for a `canvas`
    pub fn new(scale: FontScale, canvas: Size) -> Self {
        Self {
            title: TextRole::Title.resolve(scale, canvas),
            header: TextRole::DayHeader.resolve(scale, canvas),
            item: TextRole::Item.resolve(scale, canvas),
            small: TextRole::Small.resolve(scale, canvas),
        }
    }

    /// Font for `role`
    pub fn get(&self, role: TextRole) -> ResolvedFont {
        match role {
            TextRole::Title => self.title,
            TextRole::DayHeader => self.header,
            TextRole::Item => self.item,
            TextRole::Small => self.small,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eink_canvas::{Canvas, InkColor};
    use eink_specs::ColorMode;

    const REFERENCE: Size = Size::new(800, 480);
    const PHAT: Size = Size::new(250, 122);

    #[test]
    fn test_canvas_factor() {
        assert_eq!(canvas_factor(REFERENCE), 1.0);
        assert_eq!(canvas_factor(Size::new(480, 800)), 1.0);
        assert_eq!(canvas_factor(Size::new(1600, 1200)), 1.0);
        assert_eq!(canvas_factor(Size::new(400, 300)), 0.625);
        assert_eq!(canvas_factor(PHAT), MIN_CANVAS_FACTOR);
    }

    #[test]
    fn test_ladders_span_small_and_large_text() {
        for ladder in [&FontFace::REGULAR[..], &FontFace::BOLD[..]] {
            let heights: Vec<u32> = ladder.iter().map(|f| f.line_height()).collect();
            let min = heights.iter().min().copied().unwrap();
            let max = heights.iter().max().copied().unwrap();
            assert!(min <= 12, "smallest face too large: {heights:?}");
            assert!(max >= 30, "largest face too small: {heights:?}");
        }
    }

    #[test]
    fn test_nearest_is_closest_face() {
        for bold in [false, true] {
            let ladder: &[FontFace] = if bold { &FontFace::BOLD } else { &FontFace::REGULAR };
            for target in [4_u32, 9, 14, 20, 22, 26, 36, 58, 90] {
                let chosen = ResolvedFont::nearest(target, bold);
                let diff = chosen.line_height().abs_diff(target);
                for face in ladder {
                    assert!(
                        face.line_height().abs_diff(target) >= diff,
                        "{face:?} is closer to {target} than {:?}",
                        chosen.face()
                    );
                }
            }
        }
    }

    #[test]
    fn test_sizes_grow_with_scale() {
        for role in TextRole::ALL {
            let heights: Vec<u32> = FontScale::ALL
                .iter()
                .map(|s| role.resolve(*s, REFERENCE).line_height())
                .collect();
            assert!(
                heights.windows(2).all(|w| w[0] <= w[1]),
                "{role:?} heights not monotonic: {heights:?}"
            );
            assert!(heights.first() < heights.last());
        }
    }

    #[test]
    fn test_roles_keep_their_order() {
        for scale in FontScale::ALL {
            let fonts = FontSet::new(scale, REFERENCE);
            assert!(fonts.title.line_height() >= fonts.header.line_height());
            assert!(fonts.item.line_height() >= fonts.small.line_height());
        }
    }

    #[test]
    fn test_small_canvas_gets_smaller_fonts() {
        let large = FontSet::new(FontScale::Normal, REFERENCE);
        let small = FontSet::new(FontScale::Normal, PHAT);
        assert_eq!(TextRole::Item.target_px(FontScale::Normal, REFERENCE), 22);
        assert_eq!(TextRole::Item.target_px(FontScale::Normal, PHAT), 11);
        assert!(small.item.line_height() < large.item.line_height());
        assert!(small.title.line_height() < large.title.line_height());
    }

    #[test]
    fn test_bold_roles_use_bold_fonts() {
        for scale in FontScale::ALL {
            assert!(TextRole::Title.resolve(scale, REFERENCE).face().is_bold());
            assert!(TextRole::DayHeader.resolve(scale, REFERENCE).face().is_bold());
            assert!(!TextRole::Item.resolve(scale, REFERENCE).face().is_bold());
            assert!(!TextRole::Small.resolve(scale, REFERENCE).face().is_bold());
        }
    }

    #[test]
    fn test_text_width_is_proportional() {
        let font = ResolvedFont::new(FontFace::Helv14);
        assert_eq!(font.text_width(""), 0);
        assert!(font.text_width("A") > 0);
        assert!(font.text_width("AB") > font.text_width("A"));
        assert!(font.text_width("iiii") < font.text_width("MMMM"));
        assert_eq!(font.text_size("Pizza").height, font.line_height());
    }

    #[test]
    fn test_fit_adds_ellipsis() {
        let font = ResolvedFont::new(FontFace::Helv12);
        assert_eq!(font.fit("Pizza", 500), "Pizza");

        let long = "Bean and Cheese Burrito";
        let full = font.text_width(long);
        for width in (0..full).step_by(3) {
            let fitted = font.fit(long, width);
            assert!(font.text_width(&fitted) <= width, "{fitted:?} wider than {width}");
            assert_ne!(fitted, long);
            if let Some(head) = fitted.strip_suffix("...") {
                assert!(long.starts_with(head));
                assert!(!head.ends_with(' '), "space kept before ellipsis: {fitted:?}");
                assert!(!head.is_empty());
            } else {
                assert!(long.starts_with(&fitted));
            }
        }
        assert_eq!(font.fit(long, 0), "");
    }

    #[test]
    fn test_fit_keeps_multibyte_characters_whole() {
        let font = ResolvedFont::new(FontFace::Helv12);
        let text = "Crème Brûlée à la Française";
        let full = font.text_width(text);
        for width in (0..full).step_by(5) {
            let fitted = font.fit(text, width);
            let head = fitted.strip_suffix("...").unwrap_or(&fitted);
            assert!(text.starts_with(head));
        }
    }

    #[test]
    fn test_latin1_glyphs_are_drawn() {
        let font = ResolvedFont::new(FontFace::Helv14);
        for text in ["ñ", "é", "û"] {
            let mut canvas = Canvas::new(40, 40, ColorMode::Monochrome);
            font.draw(text, Point::zero(), InkColor::Black, &mut canvas).unwrap();
            assert!(canvas.count_ink(InkColor::Black) > 0, "{text} drew nothing");
        }
        assert!(font.text_width("Jalapeño") > font.text_width("Jalapeo"));
    }

    #[test]
    fn test_draw_stays_inside_line_box() {
        for face in FontFace::REGULAR.into_iter().chain(FontFace::BOLD) {
            let font = ResolvedFont::new(face);
            let text = "Qgjpqy Pizza";
            let size = font.text_size(text);
            let mut canvas = Canvas::new(size.width + 20, size.height + 20, ColorMode::Monochrome);
            font.draw(text, Point::zero(), InkColor::Black, &mut canvas).unwrap();
            assert!(canvas.count_ink(InkColor::Black) > 0);
            for y in size.height..size.height + 20 {
                for x in 0..size.width + 20 {
                    assert_eq!(
                        canvas.get_pixel(x, y),
                        Some(InkColor::White),
                        "{face:?} inks ({x}, {y}) below its line box"
                    );
                }
            }
        }
    }
}
