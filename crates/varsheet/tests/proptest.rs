//! Property-based tests for varsheet using proptest.

use std::collections::HashMap;

use proptest::prelude::*;
use varsheet::{color_to_css, normalize, Collection, Color, ModeDefaults, ModeSelector};

// ============================================================================
// Strategies
// ============================================================================

// Letters without `o`, so no generated segment can contain `-on-`, `color`
// or `-integration-`.
fn segment() -> impl Strategy<Value = String> {
    "[a-np-z]{1,8}"
}

fn path() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..4).prop_map(|parts| parts.join("/"))
}

fn channel() -> impl Strategy<Value = f64> {
    0.0f64..=1.0
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// A single-mode collection yields its only mode whatever the policy says.
    #[test]
    fn single_mode_collection_always_selected(
        name in "[A-Za-z-]{1,16}",
        mode_id in "[a-z0-9:]{1,8}",
        mode_name in "[A-Za-z ]{1,12}",
        override_mode in "[a-z0-9:]{1,8}",
        default_mode in "[A-Za-z ]{1,12}",
        categorical in any::<bool>(),
    ) {
        let collection = Collection::new("c1", name.clone()).mode(mode_id.clone(), mode_name);
        let selector = ModeSelector::new(
            HashMap::from([("c1".to_string(), override_mode)]),
            ModeDefaults::new().with(name.clone(), default_mode),
            if categorical { vec![name] } else { Vec::new() },
        );

        let chosen = selector.select(&collection).mode().map(|m| m.mode_id.clone());
        prop_assert_eq!(chosen, Some(mode_id));
    }

    /// `<prefix>-on-<suffix>` always contracts to `--on-<suffix>`.
    #[test]
    fn on_color_contraction(prefix in path(), suffix in segment()) {
        let name = format!("{}-on-{}", prefix, suffix);
        prop_assert_eq!(normalize(&name), format!("--on-{}", suffix));
    }

    /// Normalized names are prefixed, lower-case and free of separators.
    #[test]
    fn normalized_names_are_identifiers(raw in "[A-Za-z0-9 /&()-]{0,24}") {
        let name = normalize(&raw);
        prop_assert!(name.starts_with("--"));
        prop_assert!(!name.contains(|c: char| c.is_uppercase()));
        prop_assert!(!name.contains(['/', ' ', '&', '(', ')']));
    }

    /// Opaque colors print three 8-bit channels. Channels are built from
    /// known bytes so the expected output does not depend on the scaling.
    #[test]
    fn opaque_color_format(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let unit = |byte: u8| f64::from(byte) / 255.0;
        let css = color_to_css(&Color::rgb(unit(r), unit(g), unit(b))).unwrap();
        prop_assert_eq!(css, format!("rgb({r}, {g}, {b})"));
    }

    /// Translucent colors carry the unscaled alpha as a fourth argument.
    #[test]
    fn translucent_color_format(
        r in channel(),
        g in channel(),
        b in channel(),
        a in 0.0f64..1.0,
    ) {
        let css = color_to_css(&Color::rgba(r, g, b, a)).unwrap();
        let suffix = format!(", {})", a);
        prop_assert!(css.starts_with("rgb("));
        prop_assert!(css.ends_with(&suffix));
        prop_assert_eq!(css.matches(", ").count(), 3);
    }

    /// Every channel lands in 0..=255.
    #[test]
    fn color_channels_in_byte_range(r in channel(), g in channel(), b in channel()) {
        let css = color_to_css(&Color::rgb(r, g, b)).unwrap();
        let inner = css.trim_start_matches("rgb(").trim_end_matches(')');
        for part in inner.split(", ") {
            let value: i64 = part.parse().unwrap();
            prop_assert!((0..=255).contains(&value));
        }
    }
}
