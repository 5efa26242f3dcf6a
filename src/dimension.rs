//! Dimensions, selection criteria and composite group keys.

use crate::column::ColumnValue;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A named axis of a view, optionally carrying a unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Dimension {
    pub fn new(name: impl Into<String>) -> Self {
        Dimension {
            name: name.into(),
            unit: None,
        }
    }

    pub fn with_unit(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Dimension {
            name: name.into(),
            unit: Some(unit.into()),
        }
    }

    /// Axis label: `name` or `name (unit)`.
    pub fn label(&self) -> String {
        match &self.unit {
            Some(unit) => format!("{} ({})", self.name, unit),
            None => self.name.clone(),
        }
    }
}

impl From<&str> for Dimension {
    fn from(name: &str) -> Self {
        Dimension::new(name)
    }
}

impl From<String> for Dimension {
    fn from(name: String) -> Self {
        Dimension::new(name)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// One selection criterion applied to a single dimension.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Keep rows whose value equals this one.
    Exact(ColumnValue),
    /// Keep rows with `start < value < stop`. Both ends are exclusive;
    /// a missing bound is unbounded.
    Range {
        start: Option<f64>,
        stop: Option<f64>,
    },
}

impl Selector {
    pub fn range(start: f64, stop: f64) -> Self {
        Selector::Range {
            start: Some(start),
            stop: Some(stop),
        }
    }

    pub fn matches(&self, value: &ColumnValue) -> bool {
        match self {
            Selector::Exact(expected) => value.loose_eq(expected),
            Selector::Range { start, stop } => match value.to_f64() {
                Some(v) => {
                    start.map_or(true, |lo| lo < v) && stop.map_or(true, |hi| v < hi)
                }
                None => false,
            },
        }
    }
}

macro_rules! exact_selector_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Selector {
                fn from(value: $ty) -> Self {
                    Selector::Exact(value.into())
                }
            }
        )*
    };
}

exact_selector_from!(ColumnValue, i32, i64, f64, bool, &str, String);

/// Composite key made of one value per grouping dimension.
///
/// Ordered with [`ColumnValue::total_cmp`] so groups come out sorted.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct GroupKey(pub Vec<ColumnValue>);

impl GroupKey {
    pub fn empty() -> Self {
        GroupKey(Vec::new())
    }

    pub fn values(&self) -> &[ColumnValue] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V: Into<ColumnValue>> From<Vec<V>> for GroupKey {
    fn from(values: Vec<V>) -> Self {
        GroupKey(values.into_iter().map(Into::into).collect())
    }
}

impl PartialEq for GroupKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GroupKey {}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            match a.total_cmp(b) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        self.0.len().cmp(&other.0.len())
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|v| v.to_string()).collect();
        write!(f, "({})", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_label() {
        assert_eq!(Dimension::new("time").label(), "time");
        assert_eq!(Dimension::with_unit("time", "s").label(), "time (s)");
    }

    #[test]
    fn test_range_excludes_both_endpoints() {
        let sel = Selector::range(1.0, 3.0);
        assert!(!sel.matches(&ColumnValue::Int32(1)));
        assert!(sel.matches(&ColumnValue::Int32(2)));
        assert!(!sel.matches(&ColumnValue::Int32(3)));
        assert!(!sel.matches(&ColumnValue::String("2".to_string())));
    }

    #[test]
    fn test_open_range() {
        let sel = Selector::Range {
            start: None,
            stop: Some(0.0),
        };
        assert!(sel.matches(&ColumnValue::Float64(-5.0)));
        assert!(!sel.matches(&ColumnValue::Float64(0.0)));
    }

    #[test]
    fn test_exact_selector_from_literal() {
        let sel: Selector = "a".into();
        assert!(sel.matches(&ColumnValue::String("a".to_string())));
        let sel: Selector = 2.into();
        assert!(sel.matches(&ColumnValue::Float64(2.0)));
    }

    #[test]
    fn test_group_key_order_and_equality() {
        let a = GroupKey::from(vec![1, 2]);
        let b = GroupKey(vec![ColumnValue::Float64(1.0), ColumnValue::Int64(3)]);
        assert!(a < b);
        assert_eq!(a, GroupKey(vec![ColumnValue::Int64(1), ColumnValue::Int32(2)]));
        assert_eq!(a.to_string(), "(1, 2)");
    }
}
