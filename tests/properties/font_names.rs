//! Property tests for font weights and Android resource names.

use proptest::prelude::*;

use asset_link::domain::services::font_family::font_resource_id;
use asset_link::domain::services::{normalize_name, round_weight};
use asset_link::infrastructure::font::read_metadata;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 512,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Rounded weights are multiples of 100 in [100, 900].
    #[test]
    fn property_weight_is_a_css_weight(raw in any::<u16>()) {
        let weight = round_weight(raw);
        prop_assert!((100..=900).contains(&weight));
        prop_assert_eq!(weight % 100, 0);
    }

    /// PROPERTY: Rounding never decreases as the raw weight grows.
    #[test]
    fn property_weight_rounding_is_monotonic(a in any::<u16>(), b in any::<u16>()) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(round_weight(low) <= round_weight(high));
    }

    /// PROPERTY: Weights already on the scale are kept, except 500.
    #[test]
    fn property_scale_weights_are_stable(step in 1u16..=9) {
        let weight = step * 100;
        let expected = if weight == 500 { 400 } else { weight };
        prop_assert_eq!(round_weight(weight), expected);
    }

    /// PROPERTY: Normalized names are valid, non-empty resource identifiers.
    #[test]
    fn property_normalized_name_is_a_resource_id(name in "(?s).{0,64}") {
        let id = normalize_name(&name);
        prop_assert!(!id.is_empty());
        prop_assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        prop_assert!(!id.starts_with('_') && !id.ends_with('_'));
        prop_assert!(!id.contains("__"));
        prop_assert_eq!(normalize_name(&id), id.clone());
    }

    /// PROPERTY: A face never shares its resource id with its family document.
    #[test]
    fn property_font_id_differs_from_family(stem in "[A-Za-z0-9 _-]{0,24}", family in "[A-Za-z0-9 ]{0,24}") {
        let family_id = normalize_name(&family);
        prop_assert_ne!(font_resource_id(&stem, &family_id), family_id);
    }

    /// PROPERTY: Reading arbitrary bytes as a font never panics.
    #[test]
    fn property_font_reader_never_panics(data in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = read_metadata(&data);
    }
}
