//! Schema corrections applied after the mapping pass.
//!
//! Some schema.org properties are stored flat on the record but belong to a
//! nested node (`PostalAddress`, `GeoCoordinates`). This pass moves them.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use schemald_shared::Document;

/// A nested group and the flat keys that feed it.
struct GroupRule {
    group: &'static str,
    type_label: &'static str,
    keys: &'static [&'static str],
}

const RULES: &[GroupRule] = &[
    GroupRule {
        group: "address",
        type_label: "PostalAddress",
        keys: &[
            "streetAddress",
            "postalCode",
            "addressLocality",
            "addressRegion",
            "addressCountry",
            "postOfficeBoxNumber",
        ],
    },
    GroupRule {
        group: "geo",
        type_label: "GeoCoordinates",
        keys: &["latitude", "longitude"],
    },
];

fn rule_for(key: &str) -> Option<&'static GroupRule> {
    RULES.iter().find(|rule| rule.keys.contains(&key))
}

/// Move flat address and coordinate keys under their nested groups.
pub fn apply(mut document: Document) -> Document {
    let keys: Vec<String> = document.keys().cloned().collect();

    for key in keys {
        let Some(rule) = rule_for(&key) else {
            continue;
        };
        let Some(value) = document.shift_remove(&key) else {
            continue;
        };

        let group = document
            .entry(rule.group)
            .or_insert_with(|| Value::Object(Map::new()));

        if !group.is_object() {
            warn!(
                group = rule.group,
                "replacing non-object value with nested group"
            );
            *group = Value::Object(Map::new());
        }

        if let Value::Object(group) = group {
            group
                .entry("@type")
                .or_insert_with(|| Value::String(rule.type_label.into()));
            group.insert(key.clone(), value);
        }

        debug!(key = %key, group = rule.group, "regrouped flat property");
    }

    document
}
