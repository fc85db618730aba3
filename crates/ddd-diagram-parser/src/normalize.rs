//! Metadata normalization.
//!
//! Turns the raw attribute bag of one cell into a canonical [`Properties`]
//! map and cleans the cell label down to plain text. The lookup tables are
//! plain statics so they can be inspected and tested on their own.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use ddd_diagram_core::property::{Properties, PropertyValue};

/// Keys that are kept as they are.
pub const KNOWN_KEYS: &[&str] = &[
    "ddd_type",
    "ddd_name",
    "bounded_context",
    "bonded_context",
    "context_key",
    "aggregate",
    "id_type",
    "rails_resource",
    "exposed_as",
    "relation_type",
    "kind",
];

/// Alternative spellings and the canonical key each one maps to.
pub const KEY_ALIASES: &[(&str, &str)] = &[
    ("type", "ddd_type"),
    ("dddtype", "ddd_type"),
    ("name", "ddd_name"),
    ("dddname", "ddd_name"),
    ("context", "bounded_context"),
    ("bc", "bounded_context"),
    ("agg", "aggregate"),
    ("idtype", "id_type"),
    ("id", "id_type"),
    ("relation", "relation_type"),
    ("relationtype", "relation_type"),
    ("rel_type", "relation_type"),
];

/// Words read as `true`, compared case-insensitively.
pub const TRUE_WORDS: &[&str] = &["true", "yes", "1"];

/// Words read as `false`, compared case-insensitively.
pub const FALSE_WORDS: &[&str] = &["false", "no", "0"];

/// Common misspelling of `bounded_context`.
const BOUNDED_CONTEXT_TYPO: &str = "bonded_context";
const BOUNDED_CONTEXT: &str = "bounded_context";

/// Inline markup tags in labels.
static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("markup tag pattern is valid"));

/// Runs of ASCII whitespace.
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\r\n\x0B\x0C]+").expect("whitespace pattern is valid"));

/// Entities decoded in labels, applied in this order.
const LABEL_ENTITIES: &[(&str, &str)] = &[
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
    ("&quot;", "\""),
    ("&nbsp;", " "),
];

/// Result of normalizing one cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedMetadata {
    /// Canonical property map.
    pub properties: Properties,
    /// Cleaned label, empty when the cell had none.
    pub raw_label: String,
}

/// Normalize a raw attribute key.
///
/// # Examples
///
/// ```
/// use ddd_diagram_parser::normalize::normalize_key;
///
/// assert_eq!(normalize_key("  BC "), "bounded_context");
/// assert_eq!(normalize_key("Rails_Resource"), "rails_resource");
/// assert_eq!(normalize_key("Owner"), "owner");
/// ```
pub fn normalize_key(key: &str) -> String {
    let key = key.trim().to_lowercase();
    if KNOWN_KEYS.contains(&key.as_str()) {
        return key;
    }

    KEY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(key)
}

/// Normalize a raw attribute value.
///
/// Returns `None` for a missing value, a [`PropertyValue::Bool`] for the
/// recognized boolean words and trimmed text otherwise.
pub fn normalize_value(raw: Option<&str>) -> Option<PropertyValue> {
    let value = raw?.trim();
    let lowered = value.to_lowercase();

    let normalized = if TRUE_WORDS.contains(&lowered.as_str()) {
        PropertyValue::Bool(true)
    } else if FALSE_WORDS.contains(&lowered.as_str()) {
        PropertyValue::Bool(false)
    } else {
        PropertyValue::Text(value.to_string())
    };
    Some(normalized)
}

/// Reduce a possibly marked-up label to plain text.
///
/// # Examples
///
/// ```
/// use ddd_diagram_parser::normalize::clean_label;
///
/// assert_eq!(clean_label(Some("<b>Order</b><br>Root")), "Order Root");
/// assert_eq!(clean_label(Some("A &amp;&nbsp;B")), "A & B");
/// assert_eq!(clean_label(None), "");
/// ```
pub fn clean_label(label: Option<&str>) -> String {
    let Some(label) = label.filter(|label| !label.is_empty()) else {
        return String::new();
    };

    let mut clean = MARKUP_TAG.replace_all(label, " ").into_owned();
    for (entity, replacement) in LABEL_ENTITIES {
        clean = clean.replace(entity, replacement);
    }

    WHITESPACE_RUN
        .replace_all(&clean, " ")
        .trim_matches(' ')
        .to_string()
}

/// Normalize the attribute bag and label of one cell.
///
/// When two raw keys normalize to the same canonical key the later one wins,
/// keeping the position of the first.
pub fn normalize(attributes: &IndexMap<String, String>, label: Option<&str>) -> NormalizedMetadata {
    let mut properties = Properties::new();
    for (key, value) in attributes {
        if let Some(value) = normalize_value(Some(value)) {
            properties.insert(normalize_key(key), value);
        }
    }

    if !properties.contains_key(BOUNDED_CONTEXT) {
        if let Some(value) = properties.remove(BOUNDED_CONTEXT_TYPO) {
            properties.insert(BOUNDED_CONTEXT, value);
        }
    }

    NormalizedMetadata {
        properties,
        raw_label: clean_label(label),
    }
}
