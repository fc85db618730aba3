//! Normalized property bags.
//!
//! Every node and edge carries an open-ended set of properties read from the
//! diagram. Keys are free-form strings (unknown keys are custom extensions and
//! pass through untouched), while values are restricted to the closed
//! [`PropertyValue`] variant. An absent value is represented by the key not
//! being present at all.

use std::{borrow::Cow, fmt};

use indexmap::IndexMap;
use serde::Serialize;

/// A single normalized property value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// A value spelled as one of the recognized boolean words.
    Bool(bool),
    /// Any other value, trimmed.
    Text(String),
}

impl PropertyValue {
    /// Returns the textual form of the value.
    ///
    /// Booleans render as `true` / `false`.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            PropertyValue::Text(value) => Cow::Borrowed(value),
            PropertyValue::Bool(value) => Cow::Owned(value.to_string()),
        }
    }

    /// Returns `true` for text values that are empty or only whitespace.
    ///
    /// Booleans are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            PropertyValue::Text(value) => value.trim().is_empty(),
            PropertyValue::Bool(_) => false,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(value) => write!(f, "{value}"),
            PropertyValue::Text(value) => write!(f, "{value}"),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

/// An insertion-ordered map of normalized properties.
///
/// # Examples
///
/// ```
/// use ddd_diagram_core::property::{Properties, PropertyValue};
///
/// let mut props = Properties::new();
/// props.insert("bounded_context", "Sales");
/// props.insert("rails_resource", true);
/// props.insert("id_type", "   ");
///
/// assert_eq!(props.text("bounded_context").as_deref(), Some("Sales"));
/// assert_eq!(props.text("rails_resource").as_deref(), Some("true"));
/// assert_eq!(props.text("id_type"), None);
/// assert_eq!(props.get("rails_resource"), Some(&PropertyValue::Bool(true)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Properties(IndexMap<String, PropertyValue>);

impl Properties {
    /// Creates an empty property map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a property, replacing any earlier value for the same key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Removes a property, keeping the order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        self.0.shift_remove(key)
    }

    /// Returns the raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.0.get(key)
    }

    /// Returns the text form of `key` when it is present and not blank.
    ///
    /// This is the "present and non-empty" check every rule relies on.
    pub fn text(&self, key: &str) -> Option<Cow<'_, str>> {
        self.0
            .get(key)
            .filter(|value| !value.is_blank())
            .map(PropertyValue::text)
    }

    /// Returns `true` if `key` is present, even with a blank value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates over key/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Returns the number of properties.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no properties.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Properties
where
    K: Into<String>,
    V: Into<PropertyValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
