//! School Lunch Menu
//!
//! Renders a school lunch menu onto an e-ink canvas. Items come from a
//! [`MenuSource`] keyed by date, boilerplate sides are filtered out, and the
//! remaining items are laid out for one day or several upcoming school days.
//!
//! # Pipeline
//!
//! ```text
//! Settings ──► RenderConfig ──► MenuRenderer
//!                                  │ select school days   (calendar)
//!                                  │ collect items        (source)
//!                                  │ drop boilerplate     (filter)
//!                                  │ plan page            (layout, fonts)
//!                                  ▼
//!                           DrawTarget<Color = InkColor>
//! ```
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use eink_canvas::Canvas;
//! use eink_specs::{displays::INKY_IMPRESSION_7_3, Orientation};
//! use school_menu::{layout::ElementKind, MenuRenderer, MockMenuSource, RenderConfig};
//!
//! let now = NaiveDate::from_ymd_opt(2025, 1, 8)
//!     .unwrap()
//!     .and_hms_opt(7, 0, 0)
//!     .unwrap();
//! let mut canvas = Canvas::for_spec(&INKY_IMPRESSION_7_3, Orientation::Horizontal);
//! let renderer = MenuRenderer::new(RenderConfig::new().days(1));
//! let plan = renderer.render(&MockMenuSource::new(), now, &mut canvas).unwrap();
//!
//! assert_eq!(plan.texts(ElementKind::Item), ["Pizza"]);
//! ```

pub mod calendar;
pub mod config;
mod error;
pub mod filter;
pub mod fonts;
pub mod layout;
mod plugin;
mod render;
pub mod settings;
pub mod source;

pub use config::{ColorScheme, FontScale, RenderConfig};
pub use error::{PluginError, SettingsError};
pub use filter::{DenyList, EmptyDayPolicy};
pub use layout::{LayoutKind, LayoutPlan};
pub use plugin::{DeviceConfig, SchoolMenuPlugin};
pub use render::{refresh_timestamp, MenuRenderer};
pub use settings::{SettingValue, Settings};
pub use source::{MenuDay, MenuFetchResult, MenuSource, MockMenuSource, MockReason};
