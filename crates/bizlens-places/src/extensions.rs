//! One-pass heuristic scan over a raw record's `extensions` list.
//!
//! Each extension is a tagged group of strings (`"amenities"`,
//! `"highlights"`, ...). The amenity-style detections are a declarative
//! table mapping tag group + lowercase keyword to the profile flag it sets,
//! so the rule set stays independently testable instead of being re-derived
//! as ad hoc conditionals per field.

use bizlens_core::BusinessProfile;
use serde_json::Value;

type Apply = fn(&mut BusinessProfile);

/// (tag group, lowercase keyword substring, flag setter).
const KEYWORD_RULES: &[(&str, &str, Apply)] = &[
    ("accessibility", "wheelchair", |p| {
        p.wheelchair_accessible = true;
    }),
    ("amenities", "wi-fi", |p| p.has_wifi = true),
    ("amenities", "parking", |p| p.has_parking = true),
    ("payments", "credit", |p| p.accepts_credit_cards = true),
];

/// Case-sensitive literals inside a nested `service_options` group.
const SERVICE_LITERALS: &[(&str, Apply)] = &[
    ("Takeout", |p| p.offers_takeout = true),
    ("Dine-in", |p| p.offers_dine_in = true),
    ("Delivery", |p| p.offers_delivery = true),
];

/// Applies every extension-derived detection to the profile in one pass.
///
/// Keyword rules only ever set flags (never clear them), so detections OR
/// into whatever explicit fields were already derived. The `highlights` and
/// `offerings` groups are captured verbatim, last group wins.
pub fn scan_extensions(profile: &mut BusinessProfile, extensions: &[Value]) {
    for ext in extensions {
        let Some(groups) = ext.as_object() else {
            continue;
        };

        if let Some(options) = groups.get("service_options").and_then(Value::as_array) {
            for (literal, apply) in SERVICE_LITERALS {
                if options.iter().any(|v| v.as_str() == Some(*literal)) {
                    apply(profile);
                }
            }
        }

        for (group, keyword, apply) in KEYWORD_RULES {
            let matched = groups
                .get(*group)
                .and_then(Value::as_array)
                .is_some_and(|entries| {
                    entries
                        .iter()
                        .filter_map(Value::as_str)
                        .any(|entry| entry.to_lowercase().contains(keyword))
                });
            if matched {
                apply(profile);
            }
        }

        if let Some(highlights) = string_list(groups.get("highlights")) {
            profile.special_features = highlights;
        }
        if let Some(offerings) = string_list(groups.get("offerings")) {
            profile.popular_dishes = offerings;
        }
    }
}

/// The string entries of an array value, or `None` when the key is absent or
/// not an array.
fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    value.and_then(Value::as_array).map(|entries| {
        entries
            .iter()
            .filter_map(Value::as_str)
            .map(ToOwned::to_owned)
            .collect()
    })
}
