//! Pre-configured display specifications
//!
//! Panel templates for the Pimoroni and Waveshare displays the host supports.

pub mod pimoroni;
pub mod waveshare;

pub use pimoroni::*;
pub use waveshare::*;

use crate::DisplaySpec;

/// Every built-in panel, Pimoroni first.
pub const ALL: &[&DisplaySpec] = &[
    &INKY_IMPRESSION_7_3,
    &INKY_IMPRESSION_5_7,
    &INKY_IMPRESSION_4,
    &INKY_IMPRESSION_13_3,
    &INKY_WHAT,
    &INKY_PHAT,
    &WAVESHARE_7_5_V2,
    &WAVESHARE_7_3_F,
    &WAVESHARE_4_2_V2,
];

/// Look up a built-in panel by its `model` key (case-insensitive).
pub fn by_model(model: &str) -> Option<&'static DisplaySpec> {
    ALL.iter()
        .copied()
        .find(|spec| spec.model.eq_ignore_ascii_case(model.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_model() {
        let spec = by_model("inky_impression_7_3").unwrap();
        assert_eq!(spec.width, 800);
        assert_eq!(spec.height, 480);

        assert!(by_model(" EPD7IN5_V2 ").is_some());
        assert!(by_model("unknown").is_none());
    }

    #[test]
    fn test_models_are_unique() {
        for (i, a) in ALL.iter().enumerate() {
            for b in ALL.iter().skip(i + 1) {
                assert_ne!(a.model, b.model);
            }
        }
    }

    #[test]
    fn test_all_specs_are_sane() {
        for spec in ALL {
            assert!(spec.width > 0 && spec.height > 0, "{}", spec.name);
            assert!(spec.width >= spec.height, "{} is not landscape", spec.name);
            assert!(!spec.name.is_empty() && !spec.model.is_empty());
        }
    }

    #[test]
    fn test_monochrome_panels() {
        assert!(!WAVESHARE_7_5_V2.supports_color());
        assert!(INKY_IMPRESSION_7_3.supports_color());
    }
}
