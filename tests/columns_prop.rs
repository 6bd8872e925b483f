use csv_cleanse::columns::normalize_name;
use proptest::prelude::*;

fn is_canonical_identifier(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('_')
        && !name.ends_with('_')
        && !name.contains("__")
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

#[test]
fn housing_export_headers_normalize_to_known_names() {
    let pairs = [
        ("Sale Price", "sale_price"),
        ("Owner Name", "owner_name"),
        ("Property Address", "property_address"),
        ("Property City", "property_city"),
        ("Tax District", "tax_district"),
        ("Foundation Type", "foundation_type"),
        ("Land Use", "land_use"),
        ("Acreage", "acreage"),
        ("Sale Date", "sale_date"),
    ];
    for (raw, expected) in pairs {
        assert_eq!(normalize_name(raw), expected);
    }
}

proptest! {
    #[test]
    fn normalized_names_are_canonical_and_stable(
        raw in "[A-Za-z][A-Za-z0-9 _%#()./-]{0,24}"
    ) {
        let once = normalize_name(&raw);
        prop_assert!(
            is_canonical_identifier(&once),
            "'{raw}' normalized to non-canonical '{once}'"
        );
        prop_assert_eq!(normalize_name(&once), once.clone(), "'{}' is not a fixed point", once);
    }
}
