//! Render configuration
//!
//! [`RenderConfig`] is built once per render, usually by
//! [`Settings::to_render_config`](crate::settings::Settings::to_render_config),
//! and never mutated by the renderer.

use eink_canvas::InkColor;
use serde::{Deserialize, Serialize};

use crate::filter::EmptyDayPolicy;

/// Fewest school days a render may show
pub const MIN_DAYS: u8 = 1;
/// Most school days a render may show
pub const MAX_DAYS: u8 = 5;
/// Day count used when the setting is missing or unparseable
pub const DEFAULT_DAYS: u8 = 3;
/// Title used when the setting is missing or blank
pub const DEFAULT_TITLE: &str = "School Lunch Menu";

/// One of the seven discrete text size levels offered by the settings form
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontScale {
    /// 0.6×
    XSmall,
    /// 0.7×
    Smaller,
    /// 0.8×
    Small,
    /// 1.0×
    #[default]
    Normal,
    /// 1.2×
    Large,
    /// 1.4×
    Larger,
    /// 1.6×
    XLarge,
}

impl FontScale {
    /// All levels, smallest first
    pub const ALL: [FontScale; 7] = [
        FontScale::XSmall,
        FontScale::Smaller,
        FontScale::Small,
        FontScale::Normal,
        FontScale::Large,
        FontScale::Larger,
        FontScale::XLarge,
    ];

    /// Multiplier applied to every text role's base size
    pub fn factor(self) -> f32 {
        match self {
            FontScale::XSmall => 0.6,
            FontScale::Smaller => 0.7,
            FontScale::Small => 0.8,
            FontScale::Normal => 1.0,
            FontScale::Large => 1.2,
            FontScale::Larger => 1.4,
            FontScale::XLarge => 1.6,
        }
    }

    /// Next level down, if any
    pub fn smaller(self) -> Option<FontScale> {
        let index = FontScale::ALL.iter().position(|s| *s == self)?;
        index.checked_sub(1).and_then(|i| FontScale::ALL.get(i)).copied()
    }

    /// Name used by the settings form
    pub fn name(self) -> &'static str {
        match self {
            FontScale::XSmall => "x-small",
            FontScale::Smaller => "smaller",
            FontScale::Small => "small",
            FontScale::Normal => "normal",
            FontScale::Large => "large",
            FontScale::Larger => "larger",
            FontScale::XLarge => "x-large",
        }
    }

    /// Parse a settings form name (case-insensitive)
    pub fn from_name(name: &str) -> Option<FontScale> {
        let name = name.trim();
        FontScale::ALL
            .iter()
            .copied()
            .find(|scale| scale.name().eq_ignore_ascii_case(name))
    }
}

/// Inks used for the accent (title, headers, rule), body text and page
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ColorScheme {
    /// Title, day headers and the horizontal rule
    pub primary: InkColor,
    /// Menu items, dates and the timestamp
    pub text: InkColor,
    /// Page background
    pub background: InkColor,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            primary: InkColor::Blue,
            text: InkColor::Black,
            background: InkColor::White,
        }
    }
}

impl ColorScheme {
    /// Collapse the scheme to black and white for monochrome panels
    pub fn for_display(self, is_color_display: bool) -> Self {
        if is_color_display {
            return self;
        }
        let mono = |ink: InkColor| {
            if ink == InkColor::White {
                InkColor::White
            } else {
                InkColor::Black
            }
        };
        let background = mono(self.background);
        let foreground = if background == InkColor::Black {
            InkColor::White
        } else {
            InkColor::Black
        };
        let keep_visible = |ink: InkColor| {
            let ink = mono(ink);
            if ink == background {
                foreground
            } else {
                ink
            }
        };
        Self {
            primary: keep_visible(self.primary),
            text: keep_visible(self.text),
            background,
        }
    }
}

/// Everything a single render needs to know besides the menu data and clock
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    day_count: u8,
    /// Heading drawn at the top of the page
    pub title: String,
    /// Text size level
    pub font_scale: FontScale,
    /// Show the full date (single day) or `MM/DD` suffix (multi day)
    pub show_date: bool,
    /// Draw the "Updated ..." line at the bottom
    pub show_refresh_time: bool,
    /// Menu address entered by the user; only ever logged
    pub menu_url: Option<String>,
    /// Whether the target panel has any ink besides black and white
    pub is_color_display: bool,
    /// What to show when filtering removes every item of a day
    pub empty_day_policy: EmptyDayPolicy,
    /// Inks for accent, text and background
    pub colors: ColorScheme,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            day_count: DEFAULT_DAYS,
            title: DEFAULT_TITLE.to_string(),
            font_scale: FontScale::Normal,
            show_date: true,
            show_refresh_time: true,
            menu_url: None,
            is_color_display: true,
            empty_day_policy: EmptyDayPolicy::default(),
            colors: ColorScheme::default(),
        }
    }
}

impl RenderConfig {
    /// Default configuration (three days, normal text, dates and timestamp on)
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of school days to show, always within `MIN_DAYS..=MAX_DAYS`
    pub fn day_count(&self) -> u8 {
        self.day_count
    }

    /// Set the day count, clamping into `MIN_DAYS..=MAX_DAYS`
    pub fn days(mut self, count: i64) -> Self {
        self.day_count = clamp_days(count);
        self
    }

    /// Set the title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the text size level
    pub fn font_scale(mut self, scale: FontScale) -> Self {
        self.font_scale = scale;
        self
    }

    /// Toggle date display
    pub fn show_date(mut self, show: bool) -> Self {
        self.show_date = show;
        self
    }

    /// Toggle the refresh timestamp
    pub fn show_refresh_time(mut self, show: bool) -> Self {
        self.show_refresh_time = show;
        self
    }

    /// Set the (never fetched) menu URL; blank strings clear it
    pub fn menu_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        let trimmed = url.trim();
        self.menu_url = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Declare whether the target panel shows colour
    pub fn color_display(mut self, is_color: bool) -> Self {
        self.is_color_display = is_color;
        self
    }

    /// Set the policy for days whose items are all filtered away
    pub fn empty_day_policy(mut self, policy: EmptyDayPolicy) -> Self {
        self.empty_day_policy = policy;
        self
    }

    /// Set the colour scheme
    pub fn colors(mut self, colors: ColorScheme) -> Self {
        self.colors = colors;
        self
    }

    /// Colour scheme adjusted for the panel's capability
    pub fn effective_colors(&self) -> ColorScheme {
        self.colors.for_display(self.is_color_display)
    }
}

/// Clamp any integer into `MIN_DAYS..=MAX_DAYS`
pub fn clamp_days(count: i64) -> u8 {
    let clamped = count.clamp(i64::from(MIN_DAYS), i64::from(MAX_DAYS));
    u8::try_from(clamped).unwrap_or(DEFAULT_DAYS)
}
