//! Named frame operations for [`DataFrameView::apply`](crate::DataFrameView::apply).
//!
//! Operations are plain functions registered under a name. Arguments arrive
//! as JSON values so callers can forward them from configuration untouched.

use crate::column::{Column, ColumnType, ColumnValue};
use crate::error::{FrameError, Result};
use crate::frame::DataFrame;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Signature every registered operation implements.
pub type Operation = fn(&DataFrame, &[Value]) -> Result<DataFrame>;

#[derive(Clone, Default)]
pub struct OperationRegistry {
    operations: BTreeMap<String, Operation>,
}

impl std::fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.operations.keys()).finish()
    }
}

impl OperationRegistry {
    /// Registry with no operations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in operations.
    pub fn standard() -> Self {
        let mut registry = OperationRegistry::new();
        let builtins: [(&str, Operation); 9] = [
            ("head", head),
            ("tail", tail),
            ("sort_values", sort_values),
            ("dropna", dropna),
            ("fillna", fillna),
            ("drop", drop),
            ("abs", abs),
            ("cumsum", cumsum),
            ("round", round),
        ];
        for (name, op) in builtins {
            registry.operations.insert(name.to_string(), op);
        }
        registry
    }

    /// Shared instance of [`OperationRegistry::standard`].
    pub fn global() -> &'static OperationRegistry {
        static REGISTRY: OnceLock<OperationRegistry> = OnceLock::new();
        REGISTRY.get_or_init(OperationRegistry::standard)
    }

    /// Add an operation. Names must be non-empty and unique.
    pub fn register(&mut self, name: &str, operation: Operation) -> Result<()> {
        let name = name.trim();
        if name.is_empty() || self.operations.contains_key(name) {
            return Err(FrameError::DuplicateOperation(name.to_string()));
        }
        self.operations.insert(name.to_string(), operation);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    pub fn apply(&self, name: &str, frame: &DataFrame, args: &[Value]) -> Result<DataFrame> {
        let operation = self
            .operations
            .get(name)
            .ok_or_else(|| FrameError::UnsupportedOperation(name.to_string()))?;
        operation(frame, args)
    }
}

// ============================================================================
// Argument helpers
// ============================================================================

fn invalid(operation: &str, message: impl Into<String>) -> FrameError {
    FrameError::InvalidArgument {
        operation: operation.to_string(),
        message: message.into(),
    }
}

fn usize_arg(operation: &str, args: &[Value], index: usize, default: usize) -> Result<usize> {
    match args.get(index) {
        None => Ok(default),
        Some(v) => v
            .as_u64()
            .map(|n| n as usize)
            .ok_or_else(|| invalid(operation, format!("argument {} must be a non-negative integer", index))),
    }
}

fn bool_arg(operation: &str, args: &[Value], index: usize, default: bool) -> Result<bool> {
    match args.get(index) {
        None => Ok(default),
        Some(v) => v
            .as_bool()
            .ok_or_else(|| invalid(operation, format!("argument {} must be a boolean", index))),
    }
}

/// Column names given either as separate string arguments or one array.
fn column_names_arg(operation: &str, args: &[Value]) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for arg in args {
        match arg {
            Value::String(s) => names.push(s.clone()),
            Value::Array(items) => {
                for item in items {
                    let name = item
                        .as_str()
                        .ok_or_else(|| invalid(operation, "column names must be strings"))?;
                    names.push(name.to_string());
                }
            }
            _ => return Err(invalid(operation, "column names must be strings")),
        }
    }
    Ok(names)
}

/// Apply `f` to every numeric column, leaving the others as they are.
fn map_numeric<F>(frame: &DataFrame, mut f: F) -> Result<DataFrame>
where
    F: FnMut(&Column) -> Result<Column>,
{
    let columns = frame
        .columns()
        .iter()
        .map(|c| {
            if c.column_type().is_numeric() {
                f(c)
            } else {
                Ok(c.clone())
            }
        })
        .collect::<Result<Vec<_>>>()?;
    DataFrame::new(columns)
}

// ============================================================================
// Built-in operations
// ============================================================================

/// `head(n = 5)`: first `n` rows.
fn head(frame: &DataFrame, args: &[Value]) -> Result<DataFrame> {
    let n = usize_arg("head", args, 0, 5)?.min(frame.len());
    let indices: Vec<usize> = (0..n).collect();
    Ok(frame.take(&indices))
}

/// `tail(n = 5)`: last `n` rows.
fn tail(frame: &DataFrame, args: &[Value]) -> Result<DataFrame> {
    let n = usize_arg("tail", args, 0, 5)?.min(frame.len());
    let indices: Vec<usize> = (frame.len() - n..frame.len()).collect();
    Ok(frame.take(&indices))
}

/// `sort_values(column, ascending = true)`: stable sort, nulls last.
fn sort_values(frame: &DataFrame, args: &[Value]) -> Result<DataFrame> {
    let name = args
        .first()
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("sort_values", "expected a column name"))?;
    let ascending = bool_arg("sort_values", args, 1, true)?;
    let column = frame.require_column(name)?;

    let mut indices: Vec<usize> = (0..frame.len()).collect();
    let values = column.values();
    indices.sort_by(|&a, &b| {
        let (va, vb) = (&values[a], &values[b]);
        match (va.is_null(), vb.is_null()) {
            (true, true) => std::cmp::Ordering::Equal,
            (true, false) => std::cmp::Ordering::Greater,
            (false, true) => std::cmp::Ordering::Less,
            _ if ascending => va.total_cmp(vb),
            _ => vb.total_cmp(va),
        }
    });
    Ok(frame.take(&indices))
}

/// `dropna()`: rows without any null value.
fn dropna(frame: &DataFrame, _args: &[Value]) -> Result<DataFrame> {
    Ok(frame.filter_rows(|row| frame.columns().iter().all(|c| !c.is_null_at(row))))
}

/// `fillna(value)`: replace nulls in every column whose type accepts `value`.
fn fillna(frame: &DataFrame, args: &[Value]) -> Result<DataFrame> {
    let fill = args
        .first()
        .ok_or_else(|| invalid("fillna", "expected a fill value"))?;

    let columns = frame
        .columns()
        .iter()
        .map(|c| {
            let replacement = match (c.column_type(), fill) {
                (ColumnType::Int32, Value::Number(n)) => n
                    .as_i64()
                    .and_then(|v| i32::try_from(v).ok())
                    .map(ColumnValue::Int32),
                (ColumnType::Int64, Value::Number(n)) => n.as_i64().map(ColumnValue::Int64),
                (ColumnType::Float32, Value::Number(n)) => {
                    n.as_f64().map(|v| ColumnValue::Float32(v as f32))
                }
                (ColumnType::Float64, Value::Number(n)) => n.as_f64().map(ColumnValue::Float64),
                (ColumnType::String, Value::String(s)) => Some(ColumnValue::String(s.clone())),
                (ColumnType::Bool, Value::Bool(b)) => Some(ColumnValue::Bool(*b)),
                _ => None,
            };
            match replacement {
                Some(r) => c
                    .map_values(c.column_type(), |v| if v.is_null() { r.clone() } else { v.clone() })
                    .map_err(|e| invalid("fillna", e)),
                None => Ok(c.clone()),
            }
        })
        .collect::<Result<Vec<_>>>()?;
    DataFrame::new(columns)
}

/// `drop(columns...)`: frame without the named columns.
fn drop(frame: &DataFrame, args: &[Value]) -> Result<DataFrame> {
    let names = column_names_arg("drop", args)?;
    if names.is_empty() {
        return Err(invalid("drop", "expected at least one column name"));
    }
    frame.drop_columns(&names)
}

/// `abs()`: absolute value of every numeric column.
fn abs(frame: &DataFrame, _args: &[Value]) -> Result<DataFrame> {
    map_numeric(frame, |c| {
        c.map_values(c.column_type(), |v| match v {
            ColumnValue::Int32(n) => ColumnValue::Int32(n.wrapping_abs()),
            ColumnValue::Int64(n) => ColumnValue::Int64(n.wrapping_abs()),
            ColumnValue::Float32(f) => ColumnValue::Float32(f.abs()),
            ColumnValue::Float64(f) => ColumnValue::Float64(f.abs()),
            other => other.clone(),
        })
        .map_err(|e| invalid("abs", e))
    })
}

/// `cumsum()`: running sum of every numeric column as FLOAT64. Nulls stay
/// null and do not reset the sum.
fn cumsum(frame: &DataFrame, _args: &[Value]) -> Result<DataFrame> {
    map_numeric(frame, |c| {
        let mut total = 0.0;
        c.map_values(ColumnType::Float64, |v| match v.to_f64() {
            Some(x) => {
                total += x;
                ColumnValue::Float64(total)
            }
            None => ColumnValue::Null,
        })
        .map_err(|e| invalid("cumsum", e))
    })
}

/// `round(decimals = 0)`: round float columns.
fn round(frame: &DataFrame, args: &[Value]) -> Result<DataFrame> {
    let decimals = usize_arg("round", args, 0, 0)?;
    let factor = 10f64.powi(decimals.min(15) as i32);
    map_numeric(frame, |c| {
        c.map_values(c.column_type(), |v| match v {
            ColumnValue::Float64(f) => ColumnValue::Float64((f * factor).round() / factor),
            ColumnValue::Float32(f) => {
                ColumnValue::Float32(((*f as f64 * factor).round() / factor) as f32)
            }
            other => other.clone(),
        })
        .map_err(|e| invalid("round", e))
    })
}
