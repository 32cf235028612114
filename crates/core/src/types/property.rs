//! Category property value lists.
//!
//! A category property (e.g. "color") carries an ordered list of allowed
//! values. Editing UIs and the CLI work with the values as one
//! comma-separated string; that representation exists only at the boundary —
//! everywhere else the values are an explicit ordered list.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An ordered list of allowed values for a category property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct PropertyValues(Vec<String>);

impl PropertyValues {
    /// Create a value list, dropping empty entries and surrounding whitespace.
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = String>) -> Self {
        Self(
            values
                .into_iter()
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .collect(),
        )
    }

    /// Parse a comma-separated string ("red, green,blue") into a value list.
    #[must_use]
    pub fn parse_csv(s: &str) -> Self {
        Self::new(s.split(',').map(str::to_owned))
    }

    /// Join the values back into the comma-separated editing form.
    #[must_use]
    pub fn to_csv(&self) -> String {
        self.0.join(",")
    }

    /// The values in order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Whether `value` is one of the allowed values.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    /// Number of allowed values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PropertyValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_csv())
    }
}

impl std::str::FromStr for PropertyValues {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_csv(s))
    }
}

impl From<Vec<String>> for PropertyValues {
    fn from(values: Vec<String>) -> Self {
        Self::new(values)
    }
}

impl IntoIterator for PropertyValues {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_trims_and_drops_empties() {
        let values = PropertyValues::parse_csv("red, green ,,blue,");
        assert_eq!(values.as_slice(), ["red", "green", "blue"]);
    }

    #[test]
    fn test_parse_csv_preserves_order() {
        let values = PropertyValues::parse_csv("xl,s,m");
        assert_eq!(values.as_slice(), ["xl", "s", "m"]);
    }

    #[test]
    fn test_csv_roundtrip() {
        let values = PropertyValues::parse_csv("red,green,blue");
        assert_eq!(values.to_csv(), "red,green,blue");
        assert_eq!(PropertyValues::parse_csv(&values.to_csv()), values);
    }

    #[test]
    fn test_contains() {
        let values = PropertyValues::parse_csv("s,m,l");
        assert!(values.contains("m"));
        assert!(!values.contains("xl"));
    }

    #[test]
    fn test_serde_is_a_plain_list() {
        let values = PropertyValues::parse_csv("red,blue");
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"["red","blue"]"#);

        let back: PropertyValues = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }
}
