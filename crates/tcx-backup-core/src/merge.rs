//! Domain reconciliation.
//!
//! Merges two independently evolved domain collections into one canonical,
//! order-preserving result.
//!
//! # Merge Rules
//!
//! | Concern | Rule |
//! |---------|------|
//! | Domain order | First encounter in (original ++ backup) order |
//! | Element order | First encounter within the combined domain |
//! | Element value | Last writer wins, so the backup side overrides |
//! | Empty domains | Dropped; they do not round-trip |
//!
//! Re-running the merge on its own output is idempotent, and elements never
//! reorder across backup/restore cycles even when their values change.

use crate::domain::{DomainElement, DomainSet, NamedDomain};
use crate::ordered::OrderedMap;

/// Merge the current document's domains with the backup's domains.
///
/// Both sides accept either a single domain or a sequence (the document
/// format yields a bare object for one-entry collections). The original
/// side is folded first, so for element names present on both sides the
/// original fixes the position and the backup supplies the value.
///
/// Domains carrying zero elements contribute nothing and are omitted from
/// the result.
#[must_use]
pub fn merge_domains(original: DomainSet, backup: DomainSet) -> Vec<NamedDomain> {
    let mut domains: OrderedMap<String, OrderedMap<String, DomainElement>> = OrderedMap::new();

    for domain in original.into_vec().into_iter().chain(backup.into_vec()) {
        // Element-less domains do not round-trip
        if domain.elements.is_empty() {
            continue;
        }

        let slot = domains.get_or_insert_with(domain.name, OrderedMap::new);
        for element in domain.elements {
            slot.insert(element.name.clone(), element);
        }
    }

    let merged: Vec<NamedDomain> = domains
        .into_entries()
        .into_iter()
        .map(|(name, elements)| NamedDomain::new(name, elements.into_values_ordered()))
        .collect();

    tracing::debug!(domains = merged.len(), "Merged domain collections");

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn element(name: &str, fields: serde_json::Value) -> DomainElement {
        let mut full = fields;
        full.as_object_mut()
            .unwrap()
            .insert("name".to_string(), json!(name));
        serde_json::from_value(full).unwrap()
    }

    fn domain(name: &str, elements: Vec<DomainElement>) -> NamedDomain {
        NamedDomain::new(name, elements)
    }

    #[test]
    fn backup_value_wins_original_position_kept() {
        let original = vec![domain("Colors", vec![element("Red", json!({"hex": "F00"}))])];
        let backup = vec![domain(
            "Colors",
            vec![
                element("Red", json!({"hex": "FF0000"})),
                element("Blue", json!({"hex": "00F"})),
            ],
        )];

        let merged = merge_domains(original.into(), backup.into());

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "Colors");
        assert_eq!(merged[0].elements.len(), 2);
        // Red keeps position 0 but takes the backup's value
        assert_eq!(merged[0].elements[0].name, "Red");
        assert_eq!(merged[0].elements[0].fields.get("hex"), Some(&json!("FF0000")));
        // Blue is appended after the original's elements
        assert_eq!(merged[0].elements[1].name, "Blue");
        assert_eq!(merged[0].elements[1].fields.get("hex"), Some(&json!("00F")));
    }

    #[test]
    fn merge_with_empty_backup_is_identity() {
        let original = vec![
            domain(
                "Colors",
                vec![
                    element("Red", json!({"hex": "F00"})),
                    element("Blue", json!({"hex": "00F"})),
                ],
            ),
            domain("Sizes", vec![element("Large", json!({"scale": "2"}))]),
        ];

        let merged = merge_domains(original.clone().into(), DomainSet::Many(Vec::new()));
        assert_eq!(merged, original);
    }

    #[test]
    fn remerge_is_idempotent() {
        let a = vec![domain(
            "Colors",
            vec![element("Red", json!({"hex": "F00"}))],
        )];
        let b = vec![
            domain(
                "Colors",
                vec![
                    element("Red", json!({"hex": "FF0000"})),
                    element("Green", json!({"hex": "0F0"})),
                ],
            ),
            domain("Sizes", vec![element("Small", json!({"scale": "0.5"}))]),
        ];

        let once = merge_domains(a.into(), b.into());
        let twice = merge_domains(once.clone().into(), DomainSet::Many(Vec::new()));
        assert_eq!(once, twice);
    }

    #[test]
    fn domain_names_form_superset() {
        let a = vec![
            domain("Colors", vec![element("Red", json!({}))]),
            domain("Fonts", vec![element("Mono", json!({}))]),
        ];
        let b = vec![
            domain("Sizes", vec![element("Large", json!({}))]),
            domain("Colors", vec![element("Blue", json!({}))]),
        ];

        let merged = merge_domains(a.into(), b.into());
        let names: Vec<&str> = merged.iter().map(|d| d.name.as_str()).collect();

        // First-encounter order: original side first, then new backup names
        assert_eq!(names, vec!["Colors", "Fonts", "Sizes"]);
        assert_eq!(merged[0].elements.len(), 2);
    }

    #[test]
    fn empty_domains_are_dropped() {
        let a = vec![
            domain("Empty", vec![]),
            domain("Colors", vec![element("Red", json!({}))]),
        ];
        let b = vec![domain("AlsoEmpty", vec![])];

        let merged = merge_domains(a.into(), b.into());

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "Colors");
    }

    #[test]
    fn bare_domains_are_normalized() {
        let a = domain("Colors", vec![element("Red", json!({"hex": "F00"}))]);
        let b = domain("Colors", vec![element("Red", json!({"hex": "FF0000"}))]);

        let merged = merge_domains(a.into(), b.into());

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].elements[0].fields.get("hex"), Some(&json!("FF0000")));
    }

    #[test]
    fn element_position_stable_across_cycles() {
        let a = vec![domain(
            "Colors",
            vec![
                element("Red", json!({"hex": "F00"})),
                element("Green", json!({"hex": "0F0"})),
                element("Blue", json!({"hex": "00F"})),
            ],
        )];
        // Backup lists the same names in a different order with new values
        let b = vec![domain(
            "Colors",
            vec![
                element("Blue", json!({"hex": "0000FF"})),
                element("Red", json!({"hex": "FF0000"})),
            ],
        )];

        let merged = merge_domains(a.into(), b.into());
        let names: Vec<&str> = merged[0].elements.iter().map(|e| e.name.as_str()).collect();

        // Order comes from the original side, values from the backup
        assert_eq!(names, vec!["Red", "Green", "Blue"]);
        assert_eq!(merged[0].elements[0].fields.get("hex"), Some(&json!("FF0000")));
        assert_eq!(merged[0].elements[2].fields.get("hex"), Some(&json!("0000FF")));
    }
}
