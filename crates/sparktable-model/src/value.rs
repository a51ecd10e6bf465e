use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell delivered by the host data feed.
///
/// Deserializes from plain JSON scalars (`null`, numbers, strings, booleans) since that is how
/// host data views encode rows.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Number(f64),
    Boolean(bool),
    Text(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Returns the number when this cell can contribute a sparkline point.
    ///
    /// Only finite numbers qualify; NaN and infinities are treated like missing values.
    pub fn as_finite_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    /// Converts this value into a typed key part suitable for grouping.
    pub fn key_part(&self) -> CategoryKeyPart {
        match self {
            CellValue::Null => CategoryKeyPart::Null,
            CellValue::Number(n) => CategoryKeyPart::Number(OrderedFloat(canonical_number(*n))),
            CellValue::Boolean(b) => CategoryKeyPart::Boolean(*b),
            CellValue::Text(s) => CategoryKeyPart::Text(s.clone()),
        }
    }

    /// Display-oriented string for table cells (not a stable serialization).
    pub fn display_string(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Boolean(b) => b.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Null, Into::into)
    }
}

/// `0.0`/`-0.0` collapse to one key, as do all NaN payloads.
fn canonical_number(n: f64) -> f64 {
    if n == 0.0 {
        return 0.0;
    }
    if n.is_nan() {
        return f64::NAN;
    }
    n
}

/// One component of a [`CategoryKey`].
///
/// Values keep their type so `Text("1")` and `Number(1.0)` never collide, and no separator
/// characters are involved in comparing keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum CategoryKeyPart {
    Null,
    Number(OrderedFloat<f64>),
    Boolean(bool),
    Text(String),
}

/// Composite key deciding which raw rows collapse into one logical row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryKey(pub Vec<CategoryKeyPart>);

impl CategoryKey {
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a CellValue>) -> Self {
        Self(values.into_iter().map(CellValue::key_part).collect())
    }

    pub fn parts(&self) -> &[CategoryKeyPart] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_number_rejects_nan_and_infinity() {
        assert_eq!(CellValue::Number(2.5).as_finite_number(), Some(2.5));
        assert_eq!(CellValue::Number(f64::NAN).as_finite_number(), None);
        assert_eq!(CellValue::Number(f64::INFINITY).as_finite_number(), None);
        assert_eq!(CellValue::Text("3".into()).as_finite_number(), None);
        assert_eq!(CellValue::Null.as_finite_number(), None);
    }

    #[test]
    fn key_parts_canonicalize_signed_zero_and_nan() {
        assert_eq!(
            CellValue::Number(-0.0).key_part(),
            CellValue::Number(0.0).key_part()
        );
        assert_eq!(
            CellValue::Number(f64::NAN).key_part(),
            CellValue::Number(-f64::NAN).key_part()
        );
    }

    #[test]
    fn key_parts_keep_types_apart() {
        assert_ne!(
            CellValue::Text("1".into()).key_part(),
            CellValue::Number(1.0).key_part()
        );
        assert_ne!(
            CellValue::Text("null".into()).key_part(),
            CellValue::Null.key_part()
        );
    }
}
