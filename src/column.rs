/// FrameView Column Implementation
///
/// A Column is an array-like random-access data container indexed by integer.
/// Each Column has a type specifying the type of every value stored, and is
/// immutable once it is part of a frame: transforming operations build new
/// columns instead of editing in place.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Column data types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Int32,
    Int64,
    Float32,
    Float64,
    String,
    Bool,
}

impl ColumnType {
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ColumnType::Int32 | ColumnType::Int64 | ColumnType::Float32 | ColumnType::Float64
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Int32 => "INT32",
            ColumnType::Int64 => "INT64",
            ColumnType::Float32 => "FLOAT32",
            ColumnType::Float64 => "FLOAT64",
            ColumnType::String => "STRING",
            ColumnType::Bool => "BOOL",
        }
    }
}

/// Column value enum to support multiple types
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColumnValue {
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(String),
    Bool(bool),
    Null,
}

impl ColumnValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ColumnValue::Null)
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            ColumnValue::Int32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ColumnValue::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ColumnValue::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            ColumnValue::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ColumnValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric value of any integer or float variant, widened to f64.
    #[inline]
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            ColumnValue::Int32(n) => Some(*n as f64),
            ColumnValue::Int64(n) => Some(*n as f64),
            ColumnValue::Float32(f) => Some(*f as f64),
            ColumnValue::Float64(f) => Some(*f),
            _ => None,
        }
    }

    fn to_i64(&self) -> Option<i64> {
        match self {
            ColumnValue::Int32(n) => Some(*n as i64),
            ColumnValue::Int64(n) => Some(*n),
            _ => None,
        }
    }

    /// Equality that compares numbers by value regardless of width,
    /// so `Int32(1)` matches `Float64(1.0)`.
    pub fn loose_eq(&self, other: &ColumnValue) -> bool {
        if let (Some(a), Some(b)) = (self.to_i64(), other.to_i64()) {
            return a == b;
        }
        match (self.to_f64(), other.to_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            ColumnValue::Bool(_) => 0,
            ColumnValue::Int32(_)
            | ColumnValue::Int64(_)
            | ColumnValue::Float32(_)
            | ColumnValue::Float64(_) => 1,
            ColumnValue::String(_) => 2,
            ColumnValue::Null => 3,
        }
    }

    /// Total order used for grouping and sorting.
    ///
    /// Booleans sort before numbers, numbers before strings, and nulls last.
    /// Numbers compare by value across widths.
    pub fn total_cmp(&self, other: &ColumnValue) -> Ordering {
        match self.rank().cmp(&other.rank()) {
            Ordering::Equal => {}
            ord => return ord,
        }
        match (self, other) {
            (ColumnValue::Bool(a), ColumnValue::Bool(b)) => a.cmp(b),
            (ColumnValue::String(a), ColumnValue::String(b)) => a.cmp(b),
            (ColumnValue::Null, ColumnValue::Null) => Ordering::Equal,
            _ => {
                if let (Some(a), Some(b)) = (self.to_i64(), other.to_i64()) {
                    return a.cmp(&b);
                }
                // Both are numeric here, rank guarantees it
                let a = self.to_f64().unwrap_or(f64::NAN);
                let b = other.to_f64().unwrap_or(f64::NAN);
                a.total_cmp(&b)
            }
        }
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Int32(n) => write!(f, "{}", n),
            ColumnValue::Int64(n) => write!(f, "{}", n),
            ColumnValue::Float32(v) => write!(f, "{}", v),
            ColumnValue::Float64(v) => write!(f, "{}", v),
            ColumnValue::String(s) => write!(f, "{}", s),
            ColumnValue::Bool(b) => write!(f, "{}", b),
            ColumnValue::Null => Ok(()),
        }
    }
}

impl From<i32> for ColumnValue {
    fn from(v: i32) -> Self {
        ColumnValue::Int32(v)
    }
}

impl From<i64> for ColumnValue {
    fn from(v: i64) -> Self {
        ColumnValue::Int64(v)
    }
}

impl From<f64> for ColumnValue {
    fn from(v: f64) -> Self {
        ColumnValue::Float64(v)
    }
}

impl From<bool> for ColumnValue {
    fn from(v: bool) -> Self {
        ColumnValue::Bool(v)
    }
}

impl From<&str> for ColumnValue {
    fn from(v: &str) -> Self {
        ColumnValue::String(v.to_string())
    }
}

impl From<String> for ColumnValue {
    fn from(v: String) -> Self {
        ColumnValue::String(v)
    }
}

/// A named, typed run of values.
/// Handles type checking and nullable values.
#[derive(Clone, PartialEq)]
pub struct Column {
    name: String,
    column_type: ColumnType,
    nullable: bool,
    values: Vec<ColumnValue>,
}

impl Column {
    pub fn new(name: String, column_type: ColumnType, nullable: bool) -> Self {
        Column {
            name,
            column_type,
            nullable,
            values: Vec::new(),
        }
    }

    /// Build a column from existing values, validating every one of them.
    pub fn from_values(
        name: String,
        column_type: ColumnType,
        nullable: bool,
        values: Vec<ColumnValue>,
    ) -> Result<Self, String> {
        let mut col = Column::new(name, column_type, nullable);
        col.values.reserve(values.len());
        for value in values {
            col.append(value)?;
        }
        Ok(col)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Same values under a different name.
    pub fn renamed(&self, name: &str) -> Column {
        Column {
            name: name.to_string(),
            ..self.clone()
        }
    }

    /// Validate value against the column type
    fn validate_value(&self, value: ColumnValue) -> Result<ColumnValue, String> {
        if value.is_null() {
            if !self.nullable {
                return Err(format!("Column '{}' is not nullable", self.name));
            }
            return Ok(ColumnValue::Null);
        }

        match (&value, self.column_type) {
            (ColumnValue::Int32(_), ColumnType::Int32) => Ok(value),
            (ColumnValue::Int64(_), ColumnType::Int64) => Ok(value),
            (ColumnValue::Float32(_), ColumnType::Float32) => Ok(value),
            (ColumnValue::Float64(_), ColumnType::Float64) => Ok(value),
            (ColumnValue::String(_), ColumnType::String) => Ok(value),
            (ColumnValue::Bool(_), ColumnType::Bool) => Ok(value),
            // Widen integers so callers can feed literal i32s into wider columns
            (ColumnValue::Int32(n), ColumnType::Int64) => Ok(ColumnValue::Int64(*n as i64)),
            (ColumnValue::Int32(n), ColumnType::Float64) => Ok(ColumnValue::Float64(*n as f64)),
            (ColumnValue::Int64(n), ColumnType::Float64) => Ok(ColumnValue::Float64(*n as f64)),
            _ => Err(format!(
                "Type mismatch in column '{}': expected {}, got {:?}",
                self.name,
                self.column_type.name(),
                value
            )),
        }
    }

    pub fn append(&mut self, value: ColumnValue) -> Result<(), String> {
        let value = self.validate_value(value)?;
        self.values.push(value);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<&ColumnValue, String> {
        self.values
            .get(index)
            .ok_or_else(|| format!("Index {} out of range [0, {})", index, self.values.len()))
    }

    /// Fast numeric access.
    /// Returns None if the value is null, not a numeric type, or index out of bounds.
    #[inline]
    pub fn get_f64(&self, index: usize) -> Option<f64> {
        self.values.get(index).and_then(ColumnValue::to_f64)
    }

    #[inline]
    pub fn is_null_at(&self, index: usize) -> bool {
        self.nullable && matches!(self.values.get(index), Some(ColumnValue::Null))
    }

    pub fn values(&self) -> &[ColumnValue] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnValue> {
        self.values.iter()
    }

    /// New column holding the values at `indices`, in that order.
    pub fn take(&self, indices: &[usize]) -> Column {
        Column {
            name: self.name.clone(),
            column_type: self.column_type,
            nullable: self.nullable,
            values: indices
                .iter()
                .filter_map(|&i| self.values.get(i).cloned())
                .collect(),
        }
    }

    /// New column of the same name with each value mapped through `f`.
    pub fn map_values<F>(&self, column_type: ColumnType, f: F) -> Result<Column, String>
    where
        F: FnMut(&ColumnValue) -> ColumnValue,
    {
        Column::from_values(
            self.name.clone(),
            column_type,
            self.nullable,
            self.values.iter().map(f).collect(),
        )
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Column {{ name: '{}', type: {:?}, nullable: {}, len: {} }}",
            self.name,
            self.column_type,
            self.nullable,
            self.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_basic() {
        let mut col = Column::new("test".to_string(), ColumnType::Int32, false);
        col.append(ColumnValue::Int32(10)).unwrap();
        col.append(ColumnValue::Int32(20)).unwrap();
        col.append(ColumnValue::Int32(30)).unwrap();

        assert_eq!(col.len(), 3);
        assert_eq!(col.get(0).unwrap().as_i32(), Some(10));
        assert_eq!(col.get(2).unwrap().as_i32(), Some(30));
        assert!(col.get(3).is_err());
    }

    #[test]
    fn test_column_nullable() {
        let mut col = Column::new("test".to_string(), ColumnType::Float64, true);
        col.append(ColumnValue::Float64(1.5)).unwrap();
        col.append(ColumnValue::Null).unwrap();

        assert!(col.is_null_at(1));
        assert_eq!(col.get_f64(0), Some(1.5));
        assert_eq!(col.get_f64(1), None);

        let mut strict = Column::new("strict".to_string(), ColumnType::Int32, false);
        assert!(strict.append(ColumnValue::Null).is_err());
    }

    #[test]
    fn test_column_type_mismatch() {
        let mut col = Column::new("test".to_string(), ColumnType::Bool, false);
        let err = col.append(ColumnValue::String("yes".to_string())).unwrap_err();
        assert!(err.contains("BOOL"));
    }

    #[test]
    fn test_column_widens_integers() {
        let col = Column::from_values(
            "wide".to_string(),
            ColumnType::Float64,
            false,
            vec![ColumnValue::Int32(2), ColumnValue::Int64(3)],
        )
        .unwrap();
        assert_eq!(col.get(0).unwrap(), &ColumnValue::Float64(2.0));
        assert_eq!(col.get(1).unwrap(), &ColumnValue::Float64(3.0));
    }

    #[test]
    fn test_loose_eq_across_widths() {
        assert!(ColumnValue::Int32(1).loose_eq(&ColumnValue::Float64(1.0)));
        assert!(ColumnValue::Int64(7).loose_eq(&ColumnValue::Int32(7)));
        assert!(!ColumnValue::String("1".to_string()).loose_eq(&ColumnValue::Int32(1)));
        assert!(ColumnValue::Null.loose_eq(&ColumnValue::Null));
    }

    #[test]
    fn test_total_cmp_orders_nulls_last() {
        let mut values = vec![
            ColumnValue::Null,
            ColumnValue::String("b".to_string()),
            ColumnValue::Float64(2.5),
            ColumnValue::Int32(1),
            ColumnValue::Bool(true),
        ];
        values.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(
            values,
            vec![
                ColumnValue::Bool(true),
                ColumnValue::Int32(1),
                ColumnValue::Float64(2.5),
                ColumnValue::String("b".to_string()),
                ColumnValue::Null,
            ]
        );
    }

    #[test]
    fn test_take_and_rename() {
        let col = Column::from_values(
            "v".to_string(),
            ColumnType::Int32,
            false,
            vec![1.into(), 2.into(), 3.into()],
        )
        .unwrap();
        let taken = col.take(&[2, 0]).renamed("w");
        assert_eq!(taken.name(), "w");
        assert_eq!(taken.values(), &[ColumnValue::Int32(3), ColumnValue::Int32(1)]);
    }
}
