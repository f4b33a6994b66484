//! Host settings form
//!
//! The host stores the plugin's settings form as a flat JSON object. Values
//! arrive as strings from HTML inputs, but hand-edited files often carry
//! numbers and booleans, so every key accepts all three. Bad values never
//! fail a render: they fall back to defaults with a warning.

use eink_canvas::InkColor;
use serde::Deserialize;

use crate::{
    config::{clamp_days, ColorScheme, FontScale, RenderConfig, DEFAULT_DAYS, DEFAULT_TITLE},
    error::SettingsError,
    filter::EmptyDayPolicy,
};

/// A raw form value
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// JSON boolean
    Flag(bool),
    /// JSON integer
    Int(i64),
    /// JSON float
    Float(f64),
    /// JSON string
    Text(String),
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Flag(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Int(value)
    }
}

impl SettingValue {
    /// Interpret as a boolean; `None` if the value is not recognisable
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Flag(b) => Some(*b),
            SettingValue::Int(n) => Some(*n != 0),
            SettingValue::Float(f) => Some(*f != 0.0),
            SettingValue::Text(s) => {
                let s = s.trim().to_ascii_lowercase();
                match s.as_str() {
                    "1" | "true" | "yes" | "on" => Some(true),
                    "0" | "false" | "no" | "off" | "" => Some(false),
                    _ => None,
                }
            }
        }
    }

    /// Interpret as an integer; floats are rounded
    pub fn as_int(&self) -> Option<i64> {
        match self {
            SettingValue::Int(n) => Some(*n),
            SettingValue::Float(f) if f.is_finite() => {
                // Saturating float to int conversion
                #[allow(clippy::cast_possible_truncation)]
                let n = f.round() as i64;
                Some(n)
            }
            SettingValue::Text(s) => {
                let s = s.trim();
                s.parse::<i64>().ok().or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .and_then(|f| SettingValue::Float(f).as_int())
                })
            }
            SettingValue::Flag(_) | SettingValue::Float(_) => None,
        }
    }

    /// Interpret as text; numbers and booleans are formatted
    pub fn as_text(&self) -> String {
        match self {
            SettingValue::Flag(b) => b.to_string(),
            SettingValue::Int(n) => n.to_string(),
            SettingValue::Float(f) => f.to_string(),
            SettingValue::Text(s) => s.clone(),
        }
    }
}

/// Settings form as stored by the host
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Menu address (never fetched)
    pub menu_url: Option<SettingValue>,
    /// Number of school days
    pub num_days: Option<SettingValue>,
    /// Heading text
    pub custom_title: Option<SettingValue>,
    /// One of the seven size names
    pub font_size: Option<SettingValue>,
    /// Show dates
    pub show_date: Option<SettingValue>,
    /// Show the refresh timestamp
    pub show_timestamp: Option<SettingValue>,
    /// Legacy name for `showTimestamp`
    pub display_refresh_time: Option<SettingValue>,
    /// Accent colour as hex
    pub primary_color: Option<SettingValue>,
    /// Text colour as hex
    pub text_color: Option<SettingValue>,
    /// Background colour as hex
    pub background_color: Option<SettingValue>,
    /// `keep` or `show`
    pub empty_days: Option<SettingValue>,
}

impl Settings {
    /// Parse the host's JSON settings object
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse an already decoded JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self, SettingsError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Set a value by its form key; returns false for unknown keys
    pub fn set(&mut self, key: &str, value: impl Into<SettingValue>) -> bool {
        let slot = match key {
            "menuUrl" => &mut self.menu_url,
            "numDays" => &mut self.num_days,
            "customTitle" => &mut self.custom_title,
            "fontSize" => &mut self.font_size,
            "showDate" => &mut self.show_date,
            "showTimestamp" => &mut self.show_timestamp,
            "displayRefreshTime" => &mut self.display_refresh_time,
            "primaryColor" => &mut self.primary_color,
            "textColor" => &mut self.text_color,
            "backgroundColor" => &mut self.background_color,
            "emptyDays" => &mut self.empty_days,
            _ => return false,
        };
        *slot = Some(value.into());
        true
    }

    /// Validated render configuration for a panel
    pub fn to_render_config(&self, is_color_display: bool) -> RenderConfig {
        let defaults = ColorScheme::default();
        let colors = ColorScheme {
            primary: color_setting("primaryColor", self.primary_color.as_ref(), defaults.primary),
            text: color_setting("textColor", self.text_color.as_ref(), defaults.text),
            background: color_setting(
                "backgroundColor",
                self.background_color.as_ref(),
                defaults.background,
            ),
        };
        let show_refresh_time = self
            .show_timestamp
            .as_ref()
            .or(self.display_refresh_time.as_ref());

        let config = RenderConfig::new()
            .days(self.day_count())
            .title(self.title())
            .font_scale(self.font_scale())
            .show_date(bool_setting("showDate", self.show_date.as_ref(), true))
            .show_refresh_time(bool_setting("showTimestamp", show_refresh_time, true))
            .menu_url(self.menu_url.as_ref().map(SettingValue::as_text).unwrap_or_default())
            .color_display(is_color_display)
            .empty_day_policy(self.empty_day_policy())
            .colors(colors);

        tracing::debug!(
            days = config.day_count(),
            title = %config.title,
            font_scale = config.font_scale.name(),
            show_date = config.show_date,
            show_refresh_time = config.show_refresh_time,
            is_color_display,
            "parsed plugin settings"
        );
        config
    }

    fn day_count(&self) -> i64 {
        let Some(value) = self.num_days.as_ref() else {
            return i64::from(DEFAULT_DAYS);
        };
        match value.as_int() {
            Some(n) => {
                let clamped = clamp_days(n);
                if i64::from(clamped) != n {
                    tracing::warn!(requested = n, used = clamped, "numDays out of range, clamping");
                }
                n
            }
            None => {
                tracing::warn!(
                    value = %value.as_text(),
                    "numDays is not a number, using {DEFAULT_DAYS}"
                );
                i64::from(DEFAULT_DAYS)
            }
        }
    }

    fn title(&self) -> String {
        let title = self
            .custom_title
            .as_ref()
            .map(SettingValue::as_text)
            .unwrap_or_default();
        let title = title.trim();
        if title.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            title.to_string()
        }
    }

    fn font_scale(&self) -> FontScale {
        let Some(value) = self.font_size.as_ref() else {
            return FontScale::default();
        };
        let name = value.as_text();
        FontScale::from_name(&name).unwrap_or_else(|| {
            tracing::warn!(font_size = %name, "unknown fontSize, using normal");
            FontScale::default()
        })
    }

    fn empty_day_policy(&self) -> EmptyDayPolicy {
        let Some(value) = self.empty_days.as_ref() else {
            return EmptyDayPolicy::default();
        };
        match value.as_text().trim().to_ascii_lowercase().as_str() {
            "keep" | "" => EmptyDayPolicy::KeepUnfiltered,
            "show" => EmptyDayPolicy::ShowEmpty,
            other => {
                tracing::warn!(empty_days = other, "unknown emptyDays, keeping unfiltered items");
                EmptyDayPolicy::default()
            }
        }
    }
}

fn bool_setting(key: &str, value: Option<&SettingValue>, default: bool) -> bool {
    let Some(value) = value else {
        return default;
    };
    value.as_bool().unwrap_or_else(|| {
        tracing::warn!(key, value = %value.as_text(), "not a boolean, using {default}");
        default
    })
}

fn color_setting(key: &str, value: Option<&SettingValue>, default: InkColor) -> InkColor {
    let Some(value) = value else {
        return default;
    };
    let text = value.as_text();
    if text.trim().is_empty() {
        return default;
    }
    InkColor::from_hex(&text).unwrap_or_else(|| {
        tracing::warn!(key, value = %text, "malformed colour, using {}", default.name());
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(json: &str) -> RenderConfig {
        Settings::from_json(json).unwrap().to_render_config(true)
    }

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = config("{}");
        assert_eq!(config, RenderConfig::new());
        assert_eq!(config.day_count(), 3);
        assert_eq!(config.title, "School Lunch Menu");
        assert!(config.show_date);
        assert!(config.show_refresh_time);
        assert_eq!(config.menu_url, None);
    }

    #[test]
    fn test_string_values_from_form() {
        let config = config(
            r#"{
                "menuUrl": " https://example.org/menu ",
                "numDays": "5",
                "customTitle": "  Lincoln Elementary  ",
                "fontSize": "large",
                "showDate": "false",
                "showTimestamp": "off",
                "emptyDays": "show"
            }"#,
        );
        assert_eq!(config.menu_url.as_deref(), Some("https://example.org/menu"));
        assert_eq!(config.day_count(), 5);
        assert_eq!(config.title, "Lincoln Elementary");
        assert_eq!(config.font_scale, FontScale::Large);
        assert!(!config.show_date);
        assert!(!config.show_refresh_time);
        assert_eq!(config.empty_day_policy, EmptyDayPolicy::ShowEmpty);
    }

    #[test]
    fn test_native_json_types() {
        let config = config(r#"{"numDays": 2, "showDate": true, "showTimestamp": 0}"#);
        assert_eq!(config.day_count(), 2);
        assert!(config.show_date);
        assert!(!config.show_refresh_time);

        let config = super::Settings::from_json(r#"{"numDays": 4.4}"#)
            .unwrap()
            .to_render_config(true);
        assert_eq!(config.day_count(), 4);
    }

    #[test]
    fn test_num_days_clamped_or_defaulted() {
        assert_eq!(config(r#"{"numDays": "0"}"#).day_count(), 1);
        assert_eq!(config(r#"{"numDays": -3}"#).day_count(), 1);
        assert_eq!(config(r#"{"numDays": "12"}"#).day_count(), 5);
        assert_eq!(config(r#"{"numDays": "three"}"#).day_count(), 3);
        assert_eq!(config(r#"{"numDays": true}"#).day_count(), 3);
    }

    #[test]
    fn test_truthy_strings() {
        for truthy in ["1", "true", "YES", "On", " true "] {
            let json = format!(r#"{{"showDate": "{truthy}"}}"#);
            assert!(config(&json).show_date, "{truthy}");
        }
        for falsy in ["0", "false", "no", "off", ""] {
            let json = format!(r#"{{"showDate": "{falsy}"}}"#);
            assert!(!config(&json).show_date, "{falsy}");
        }
        // Unrecognised words fall back to the default
        assert!(config(r#"{"showDate": "maybe"}"#).show_date);
    }

    #[test]
    fn test_legacy_refresh_time_key() {
        assert!(!config(r#"{"displayRefreshTime": "false"}"#).show_refresh_time);
        // The current key wins when both are present
        let both = config(r#"{"displayRefreshTime": "false", "showTimestamp": "true"}"#);
        assert!(both.show_refresh_time);
    }

    #[test]
    fn test_unknown_font_size_is_normal() {
        assert_eq!(config(r#"{"fontSize": "gigantic"}"#).font_scale, FontScale::Normal);
        assert_eq!(config(r#"{"fontSize": "x-small"}"#).font_scale, FontScale::XSmall);
    }

    #[test]
    fn test_colours() {
        let config = config(
            r##"{"primaryColor": "#ff0000", "textColor": "#0000ff",
                "backgroundColor": "#ffff00"}"##,
        );
        assert_eq!(config.colors.primary, InkColor::Red);
        assert_eq!(config.colors.text, InkColor::Blue);
        assert_eq!(config.colors.background, InkColor::Yellow);

        let defaults = super::Settings::from_json(r#"{"primaryColor": "blueish"}"#)
            .unwrap()
            .to_render_config(true);
        assert_eq!(defaults.colors, ColorScheme::default());
    }

    #[test]
    fn test_monochrome_display_flag() {
        let settings = Settings::from_json("{}").unwrap();
        let config = settings.to_render_config(false);
        assert!(!config.is_color_display);
        assert_eq!(config.effective_colors().primary, InkColor::Black);
    }

    #[test]
    fn test_blank_title_uses_default() {
        assert_eq!(config(r#"{"customTitle": "   "}"#).title, DEFAULT_TITLE);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(SettingsError::Json(_))
        ));
        assert!(Settings::from_json("42").is_err());
        // Objects with nested values are rejected rather than guessed at
        assert!(Settings::from_json(r#"{"numDays": {"value": 2}}"#).is_err());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let settings = Settings::from_json(r#"{"refreshInterval": "60", "numDays": "2"}"#).unwrap();
        assert_eq!(settings.to_render_config(true).day_count(), 2);
    }

    #[test]
    fn test_set_by_key() {
        let mut settings = Settings::default();
        assert!(settings.set("numDays", "1"));
        assert!(settings.set("showDate", false));
        assert!(settings.set("fontSize", "smaller"));
        assert!(!settings.set("bogus", "x"));
        let config = settings.to_render_config(true);
        assert_eq!(config.day_count(), 1);
        assert!(!config.show_date);
        assert_eq!(config.font_scale, FontScale::Smaller);
    }
}
