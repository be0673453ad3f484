//! Unit standardization
//!
//! Maps free-text unit tokens onto a small set of canonical keys.

/// Canonical unit keys and the tokens that map onto them
pub const UNIT_GROUPS: &[(&str, &[&str])] = &[
    (
        "box",
        &[
            "box", "boxes", "bx", "carton", "cartons", "pack", "packs", "packet", "packets",
        ],
    ),
    ("unit", &["unit", "units"]),
    ("pcs", &["pcs", "piece", "pieces", "pc"]),
    ("l", &["l", "liter", "liters", "litre", "litres"]),
    ("ml", &["ml", "milliliter", "milliliters"]),
];

/// Standardize a unit token
///
/// The token is trimmed and lower-cased, then looked up (and its singular
/// form, with one trailing `s` removed) in [`UNIT_GROUPS`]. Unknown tokens
/// come back trimmed and lower-cased; the empty string stays empty.
///
/// # Examples
///
/// ```
/// use basket_extractor::standardize_unit;
///
/// assert_eq!(standardize_unit("Boxes"), "box");
/// assert_eq!(standardize_unit(" Litre "), "l");
/// assert_eq!(standardize_unit("kg"), "kg");
/// assert_eq!(standardize_unit(""), "");
/// ```
pub fn standardize_unit(unit: &str) -> String {
    let token = unit.trim().to_lowercase();
    if token.is_empty() {
        return token;
    }

    let singular = token.strip_suffix('s');
    UNIT_GROUPS
        .iter()
        .find(|(_, variants)| {
            variants.contains(&token.as_str()) || singular.is_some_and(|s| variants.contains(&s))
        })
        .map(|(canonical, _)| canonical.to_string())
        .unwrap_or(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_case_and_plural_insensitive() {
        assert_eq!(standardize_unit("Boxes"), "box");
        assert_eq!(standardize_unit("BOX"), "box");
        assert_eq!(standardize_unit("box"), "box");
    }

    #[test]
    fn test_every_synonym_maps_to_its_group() {
        for (canonical, variants) in UNIT_GROUPS {
            for variant in *variants {
                assert_eq!(standardize_unit(variant), *canonical, "variant {}", variant);
                assert_eq!(
                    standardize_unit(&variant.to_uppercase()),
                    *canonical,
                    "variant {}",
                    variant
                );
            }
        }
    }

    #[test]
    fn test_singular_form_lookup() {
        // Not listed, but the singular is
        assert_eq!(standardize_unit("bxs"), "box");
        assert_eq!(standardize_unit("mls"), "ml");
        assert_eq!(standardize_unit("pcs"), "pcs");
    }

    #[test]
    fn test_unknown_tokens_pass_through_normalized() {
        assert_eq!(standardize_unit("kg"), "kg");
        assert_eq!(standardize_unit("  Dozen "), "dozen");
        assert_eq!(standardize_unit("s"), "s");
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(standardize_unit(""), "");
        assert_eq!(standardize_unit("   "), "");
    }

    #[test]
    fn test_canonical_keys_are_fixed_points() {
        for (canonical, _) in UNIT_GROUPS {
            assert_eq!(standardize_unit(canonical), *canonical);
        }
    }

    proptest! {
        #[test]
        fn prop_standardize_is_idempotent(token in "[a-zA-Z ]{0,12}") {
            let once = standardize_unit(&token);
            prop_assert_eq!(standardize_unit(&once), once);
        }
    }
}
