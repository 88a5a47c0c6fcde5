//! Country name standardization for map rendering
//!
//! Scraped display names come from URL slugs and do not always match the
//! location vocabulary the map library recognizes; a name outside that
//! vocabulary renders as a blank country. The alias table below is the
//! single point of extension when a new country fails to appear on the map.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Alias -> canonical pairs. The canonical side matches the map library's
/// "country names" location mode.
const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("Usa", "United States"),
    ("United States Of America", "United States"),
    ("Uk", "United Kingdom"),
    ("Uae", "United Arab Emirates"),
    ("Democratic Republic Of The Congo", "Democratic Republic of the Congo"),
    ("Drc", "Democratic Republic of the Congo"),
    ("Congo", "Republic of the Congo"),
    ("Dpr Korea", "North Korea"),
    ("Republic Of Korea", "South Korea"),
    ("Czech Republic", "Czechia"),
    ("Cote D'ivoire", "Côte d'Ivoire"),
    ("Ivory Coast", "Côte d'Ivoire"),
    ("Burma", "Myanmar"),
    ("Cape Verde", "Cabo Verde"),
    ("East Timor", "Timor-Leste"),
    ("Laos", "Lao PDR"),
    ("Macedonia", "North Macedonia"),
    ("Swaziland", "Eswatini"),
    ("The Bahamas", "Bahamas"),
    ("The Gambia", "Gambia"),
];

static ALIAS_TABLE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| COUNTRY_ALIASES.iter().copied().collect());

/// Map a scraped display name onto the canonical map vocabulary.
///
/// Names without an alias entry pass through unchanged, which keeps the
/// function idempotent on already-canonical names.
pub fn standardize_country_name(name: &str) -> &str {
    ALIAS_TABLE.get(name).copied().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_aliases_map_to_canonical_names() {
        assert_eq!(standardize_country_name("Uae"), "United Arab Emirates");
        assert_eq!(standardize_country_name("Usa"), "United States");
        assert_eq!(standardize_country_name("Drc"), "Democratic Republic of the Congo");
        assert_eq!(standardize_country_name("Laos"), "Lao PDR");
    }

    #[test]
    fn unknown_names_pass_through() {
        assert_eq!(standardize_country_name("Ireland"), "Ireland");
        assert_eq!(standardize_country_name("Papua New Guinea"), "Papua New Guinea");
    }

    #[test]
    fn standardization_is_idempotent() {
        for (alias, _) in COUNTRY_ALIASES {
            let canonical = standardize_country_name(alias);
            assert_eq!(standardize_country_name(canonical), canonical);
        }
    }
}
