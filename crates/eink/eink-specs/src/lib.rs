//! E-Ink Display Specifications
//!
//! Specifications for the e-ink panels an InkyPi host can drive: pixel
//! geometry, ink capability and mounting orientation.
//!
//! # Features
//!
//! - **no_std compatible** - No allocation, all specs are `const`
//! - **Display templates** - Pre-configured specs for Pimoroni Inky and Waveshare panels
//!
//! # Example
//!
//! ```
//! use eink_specs::displays::INKY_IMPRESSION_7_3;
//! use eink_specs::Orientation;
//!
//! let spec = INKY_IMPRESSION_7_3;
//! assert_eq!(spec.resolution(Orientation::Vertical), (480, 800));
//! assert!(spec.supports_color());
//! ```
//!
//! # Custom Display Specs
//!
//! ```
//! use eink_specs::{ColorMode, DisplaySpec};
//!
//! const MY_DISPLAY: DisplaySpec = DisplaySpec {
//!     name: "Custom Display",
//!     model: "custom",
//!     width: 320,
//!     height: 240,
//!     color_mode: ColorMode::Monochrome,
//! };
//! ```

#![cfg_attr(not(test), no_std)]

mod display_spec;
pub mod displays;

pub use display_spec::{ColorMode, DisplaySpec, Orientation};
