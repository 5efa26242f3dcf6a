/// FrameView DataFrame Implementation
///
/// A DataFrame is an immutable, rectangular collection of named columns.
/// Every transforming method (take, drop, rename, group) returns new data
/// and leaves the receiver untouched, so frames can be shared freely
/// between views.
///
/// # Examples
///
/// ```
/// use frameview::{ColumnType, ColumnValue, DataFrame};
///
/// let frame = DataFrame::from_rows(
///     &[("id", ColumnType::Int32, false), ("name", ColumnType::String, false)],
///     vec![
///         vec![ColumnValue::Int32(1), ColumnValue::String("Alice".to_string())],
///         vec![ColumnValue::Int32(2), ColumnValue::String("Bob".to_string())],
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(frame.len(), 2);
/// assert_eq!(frame.get_value(1, "name").unwrap().as_string(), Some("Bob"));
/// ```

use crate::column::{Column, ColumnType, ColumnValue};
use crate::dimension::GroupKey;
use crate::error::{FrameError, Result};
use std::collections::BTreeMap;

#[derive(Clone, PartialEq)]
pub struct DataFrame {
    columns: Vec<Column>,
    row_count: usize,
}

impl DataFrame {
    /// Build a frame from columns of equal length.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map_or(0, Column::len);
        if let Some(bad) = columns.iter().find(|c| c.len() != row_count) {
            return Err(FrameError::InvalidData(format!(
                "Column '{}' has {} rows, expected {}",
                bad.name(),
                bad.len(),
                row_count
            )));
        }
        Ok(DataFrame { columns, row_count })
    }

    /// Build a frame from a schema of `(name, type, nullable)` and row-major values.
    pub fn from_rows(
        schema: &[(&str, ColumnType, bool)],
        rows: Vec<Vec<ColumnValue>>,
    ) -> Result<Self> {
        let mut columns: Vec<Column> = schema
            .iter()
            .map(|(name, ty, nullable)| Column::new(name.to_string(), *ty, *nullable))
            .collect();

        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != columns.len() {
                return Err(FrameError::InvalidData(format!(
                    "Row {}: expected {} values, got {}",
                    row_idx,
                    columns.len(),
                    row.len()
                )));
            }
            for (col, value) in columns.iter_mut().zip(row) {
                col.append(value)
                    .map_err(|e| FrameError::InvalidData(format!("Row {}: {}", row_idx, e)))?;
            }
        }

        DataFrame::new(columns)
    }

    pub fn len(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Like [`DataFrame::column`], failing with `UnknownDimension`.
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| FrameError::UnknownDimension(vec![name.to_string()]))
    }

    /// Names from `names` that are not columns of this frame, in request order.
    pub fn missing_columns<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref();
            if self.column(name).is_none() && !missing.iter().any(|m| m == name) {
                missing.push(name.to_string());
            }
        }
        missing
    }

    pub fn get_value(&self, row: usize, column: &str) -> Result<&ColumnValue> {
        self.require_column(column)?
            .get(row)
            .map_err(FrameError::InvalidData)
    }

    // ========================================================================
    // Derived frames
    // ========================================================================

    /// Rows at `indices`, in that order.
    pub fn take(&self, indices: &[usize]) -> DataFrame {
        DataFrame {
            columns: self.columns.iter().map(|c| c.take(indices)).collect(),
            row_count: indices.iter().filter(|&&i| i < self.row_count).count(),
        }
    }

    /// Rows for which `predicate(row_index)` holds, in original order.
    pub fn filter_rows<F>(&self, mut predicate: F) -> DataFrame
    where
        F: FnMut(usize) -> bool,
    {
        let indices: Vec<usize> = (0..self.row_count).filter(|&i| predicate(i)).collect();
        self.take(&indices)
    }

    /// Frame without the named columns. Every name must exist.
    pub fn drop_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<DataFrame> {
        let missing = self.missing_columns(names);
        if !missing.is_empty() {
            return Err(FrameError::UnknownDimension(missing));
        }
        let columns = self
            .columns
            .iter()
            .filter(|c| !names.iter().any(|n| n.as_ref() == c.name()))
            .cloned()
            .collect();
        Ok(DataFrame {
            columns,
            row_count: self.row_count,
        })
    }

    /// Relabel every column positionally.
    pub fn rename_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<DataFrame> {
        if names.len() != self.columns.len() {
            return Err(FrameError::InvalidData(format!(
                "Expected {} column names, got {}",
                self.columns.len(),
                names.len()
            )));
        }
        let columns = self
            .columns
            .iter()
            .zip(names)
            .map(|(c, n)| c.renamed(n.as_ref()))
            .collect();
        Ok(DataFrame {
            columns,
            row_count: self.row_count,
        })
    }

    /// Replace the column sharing `column`'s name, or append it.
    pub fn with_column(&self, column: Column) -> Result<DataFrame> {
        let mut columns = self.columns.clone();
        match self.column_index(column.name()) {
            Some(idx) => columns[idx] = column,
            None => columns.push(column),
        }
        DataFrame::new(columns)
    }

    // ========================================================================
    // Grouping
    // ========================================================================

    /// Group every row by the values of `columns`.
    ///
    /// Groups are sorted by key and rows keep their original order inside a
    /// group. Null values form their own group, sorted last. An empty
    /// `columns` list yields a single group with the empty key.
    pub fn group_rows<S: AsRef<str>>(&self, columns: &[S]) -> Result<Vec<(GroupKey, Vec<usize>)>> {
        let all: Vec<usize> = (0..self.row_count).collect();
        self.group_subset(columns, &all)
    }

    /// Group only the rows listed in `rows`.
    pub fn group_subset<S: AsRef<str>>(
        &self,
        columns: &[S],
        rows: &[usize],
    ) -> Result<Vec<(GroupKey, Vec<usize>)>> {
        let missing = self.missing_columns(columns);
        if !missing.is_empty() {
            return Err(FrameError::UnknownDimension(missing));
        }
        let key_columns: Vec<&Column> = columns
            .iter()
            .filter_map(|n| self.column(n.as_ref()))
            .collect();

        let mut groups: BTreeMap<GroupKey, Vec<usize>> = BTreeMap::new();
        for &row in rows {
            let key = GroupKey(
                key_columns
                    .iter()
                    .map(|c| c.values().get(row).cloned().unwrap_or(ColumnValue::Null))
                    .collect(),
            );
            groups.entry(key).or_default().push(row);
        }

        Ok(groups.into_iter().collect())
    }

    // ========================================================================
    // Aggregation Methods
    // ========================================================================

    /// Sum of all numeric values in a column. NULL values are skipped.
    pub fn sum(&self, column: &str) -> Result<f64> {
        let col = self.require_column(column)?;
        Ok((0..self.row_count).filter_map(|i| col.get_f64(i)).sum())
    }

    /// Average of the numeric values in a column, None if there are none.
    pub fn avg(&self, column: &str) -> Result<Option<f64>> {
        let col = self.require_column(column)?;
        let mut sum = 0.0;
        let mut count = 0;
        for i in 0..self.row_count {
            if let Some(num) = col.get_f64(i) {
                sum += num;
                count += 1;
            }
        }

        if count > 0 {
            Ok(Some(sum / count as f64))
        } else {
            Ok(None)
        }
    }

    pub fn min(&self, column: &str) -> Result<Option<f64>> {
        let col = self.require_column(column)?;
        let mut min_val: Option<f64> = None;
        for i in 0..self.row_count {
            if let Some(num) = col.get_f64(i) {
                min_val = Some(min_val.map_or(num, |m| m.min(num)));
            }
        }
        Ok(min_val)
    }

    pub fn max(&self, column: &str) -> Result<Option<f64>> {
        let col = self.require_column(column)?;
        let mut max_val: Option<f64> = None;
        for i in 0..self.row_count {
            if let Some(num) = col.get_f64(i) {
                max_val = Some(max_val.map_or(num, |m| m.max(num)));
            }
        }
        Ok(max_val)
    }

    // ========================================================================
    // Serialization Methods
    // ========================================================================

    /// Export to CSV with a header row.
    ///
    /// NULL values become empty strings. Strings containing commas, quotes,
    /// or newlines are escaped.
    pub fn to_csv(&self) -> String {
        let mut result = String::new();
        result.push_str(&self.column_names().join(","));
        result.push('\n');

        for row in 0..self.row_count {
            let values: Vec<String> = self
                .columns
                .iter()
                .map(|col| match &col.values()[row] {
                    ColumnValue::String(s)
                        if s.contains(',') || s.contains('"') || s.contains('\n') =>
                    {
                        format!("\"{}\"", s.replace('"', "\"\""))
                    }
                    other => other.to_string(),
                })
                .collect();
            result.push_str(&values.join(","));
            result.push('\n');
        }
        result
    }

    /// Export to a pretty-printed JSON array of row objects.
    pub fn to_json(&self) -> Result<String> {
        let rows: Vec<serde_json::Value> = (0..self.row_count)
            .map(|row| {
                let obj: serde_json::Map<String, serde_json::Value> = self
                    .columns
                    .iter()
                    .map(|col| {
                        let json_val = match &col.values()[row] {
                            ColumnValue::Int32(n) => serde_json::Value::Number((*n).into()),
                            ColumnValue::Int64(n) => serde_json::Value::Number((*n).into()),
                            ColumnValue::Float32(f) => serde_json::Number::from_f64(*f as f64)
                                .map(serde_json::Value::Number)
                                .unwrap_or(serde_json::Value::Null),
                            ColumnValue::Float64(f) => serde_json::Number::from_f64(*f)
                                .map(serde_json::Value::Number)
                                .unwrap_or(serde_json::Value::Null),
                            ColumnValue::String(s) => serde_json::Value::String(s.clone()),
                            ColumnValue::Bool(b) => serde_json::Value::Bool(*b),
                            ColumnValue::Null => serde_json::Value::Null,
                        };
                        (col.name().to_string(), json_val)
                    })
                    .collect();
                serde_json::Value::Object(obj)
            })
            .collect();

        serde_json::to_string_pretty(&rows)
            .map_err(|e| FrameError::InvalidData(format!("JSON serialization error: {}", e)))
    }

    /// Parse a CSV string.
    ///
    /// The first line is the header. Column types are inferred from the first
    /// data row (INT32, INT64, FLOAT64, BOOL, otherwise STRING) and every
    /// column is nullable.
    ///
    /// ```
    /// use frameview::DataFrame;
    ///
    /// let frame = DataFrame::from_csv("id,name,score\n1,Alice,95.5\n2,Bob,87.0").unwrap();
    /// assert_eq!(frame.len(), 2);
    /// assert_eq!(frame.column_names(), vec!["id", "name", "score"]);
    /// ```
    pub fn from_csv(csv: &str) -> Result<DataFrame> {
        let mut all_rows = parse_csv_rows(csv);

        if all_rows.is_empty() {
            return Err(FrameError::InvalidData("CSV is empty".to_string()));
        }

        let column_names = all_rows.remove(0);
        if column_names.iter().all(|n| n.is_empty()) {
            return Err(FrameError::InvalidData("CSV header is empty".to_string()));
        }

        let rows: Vec<Vec<String>> = all_rows
            .into_iter()
            .filter(|row| !row.iter().all(|f| f.is_empty()))
            .collect();

        let types = match rows.first() {
            None => vec![ColumnType::String; column_names.len()],
            Some(first) => {
                if first.len() != column_names.len() {
                    return Err(FrameError::InvalidData(format!(
                        "Column count mismatch: header has {}, but data row has {} values",
                        column_names.len(),
                        first.len()
                    )));
                }
                first.iter().map(|v| infer_type_from_csv_value(v)).collect()
            }
        };

        let mut columns: Vec<Column> = column_names
            .iter()
            .zip(types.iter())
            .map(|(name, ty)| Column::new(name.trim().to_string(), *ty, true))
            .collect();

        for (row_idx, row_values) in rows.iter().enumerate() {
            for (i, col) in columns.iter_mut().enumerate() {
                let raw = row_values.get(i).map(|s| s.as_str()).unwrap_or("");
                let value = parse_csv_value(raw, col.column_type())
                    .map_err(|e| FrameError::InvalidData(format!("Row {}: {}", row_idx, e)))?;
                col.append(value).map_err(FrameError::InvalidData)?;
            }
        }

        DataFrame::new(columns)
    }

    /// Parse a JSON array of row objects.
    ///
    /// Column order follows the keys of the first object; types are inferred
    /// from its values and every column is nullable.
    ///
    /// ```
    /// use frameview::DataFrame;
    ///
    /// let frame = DataFrame::from_json(r#"[{"id": 1, "name": "Alice"}, {"id": 2, "name": "Bob"}]"#).unwrap();
    /// assert_eq!(frame.len(), 2);
    /// ```
    pub fn from_json(json: &str) -> Result<DataFrame> {
        let parsed: Vec<serde_json::Value> = serde_json::from_str(json)
            .map_err(|e| FrameError::InvalidData(format!("JSON parse error: {}", e)))?;

        let first = match parsed.first() {
            Some(value) => value
                .as_object()
                .ok_or_else(|| FrameError::InvalidData("Expected array of objects".to_string()))?,
            None => return Err(FrameError::InvalidData("JSON array is empty".to_string())),
        };

        let mut columns = Vec::with_capacity(first.len());
        for (key, value) in first {
            let col_type = infer_type_from_json(key, value)?;
            columns.push(Column::new(key.clone(), col_type, true));
        }

        for (row_idx, item) in parsed.iter().enumerate() {
            let obj = item.as_object().ok_or_else(|| {
                FrameError::InvalidData(format!("Row {}: expected object", row_idx))
            })?;
            for col in columns.iter_mut() {
                let value = match obj.get(col.name()) {
                    Some(v) => json_to_column_value(v, col.column_type()),
                    None => ColumnValue::Null,
                };
                col.append(value)
                    .map_err(|e| FrameError::InvalidData(format!("Row {}: {}", row_idx, e)))?;
            }
        }

        DataFrame::new(columns)
    }
}

// ============================================================================
// Helper functions for serialization
// ============================================================================

/// Parse a CSV string into rows, handling quoted fields with embedded newlines
fn parse_csv_rows(csv: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut current_row = Vec::new();
    let mut current_field = String::new();
    let mut in_quotes = false;
    let mut chars = csv.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                // Doubled quote inside a quoted field
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current_field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                current_row.push(std::mem::take(&mut current_field));
            }
            '\n' if !in_quotes => {
                current_row.push(std::mem::take(&mut current_field));
                rows.push(std::mem::take(&mut current_row));
            }
            '\r' if !in_quotes => {}
            _ => current_field.push(c),
        }
    }

    if !current_field.is_empty() || !current_row.is_empty() {
        current_row.push(current_field);
        rows.push(current_row);
    }

    rows
}

/// Infer the type of a single CSV value
fn infer_type_from_csv_value(value: &str) -> ColumnType {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return ColumnType::String;
    }

    if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false") {
        return ColumnType::Bool;
    }

    if let Ok(n) = trimmed.parse::<i64>() {
        if n >= i32::MIN as i64 && n <= i32::MAX as i64 {
            return ColumnType::Int32;
        }
        return ColumnType::Int64;
    }

    if trimmed.parse::<f64>().is_ok() {
        return ColumnType::Float64;
    }

    ColumnType::String
}

/// Parse a CSV value into a ColumnValue based on expected type
fn parse_csv_value(value: &str, col_type: ColumnType) -> std::result::Result<ColumnValue, String> {
    let trimmed = value.trim();

    // Empty string → NULL for any type
    if trimmed.is_empty() {
        return Ok(ColumnValue::Null);
    }

    match col_type {
        ColumnType::Int32 => trimmed
            .parse::<i32>()
            .map(ColumnValue::Int32)
            .map_err(|_| format!("Cannot parse '{}' as INT32", trimmed)),
        ColumnType::Int64 => trimmed
            .parse::<i64>()
            .map(ColumnValue::Int64)
            .map_err(|_| format!("Cannot parse '{}' as INT64", trimmed)),
        ColumnType::Float32 => trimmed
            .parse::<f32>()
            .map(ColumnValue::Float32)
            .map_err(|_| format!("Cannot parse '{}' as FLOAT32", trimmed)),
        ColumnType::Float64 => trimmed
            .parse::<f64>()
            .map(ColumnValue::Float64)
            .map_err(|_| format!("Cannot parse '{}' as FLOAT64", trimmed)),
        ColumnType::Bool => {
            if trimmed.eq_ignore_ascii_case("true") {
                Ok(ColumnValue::Bool(true))
            } else if trimmed.eq_ignore_ascii_case("false") {
                Ok(ColumnValue::Bool(false))
            } else {
                Err(format!("Cannot parse '{}' as BOOL", trimmed))
            }
        }
        ColumnType::String => Ok(ColumnValue::String(trimmed.to_string())),
    }
}

fn infer_type_from_json(key: &str, value: &serde_json::Value) -> Result<ColumnType> {
    match value {
        serde_json::Value::Number(n) => Ok(match n.as_i64() {
            Some(v) if v >= i32::MIN as i64 && v <= i32::MAX as i64 => ColumnType::Int32,
            Some(_) => ColumnType::Int64,
            None => ColumnType::Float64,
        }),
        serde_json::Value::String(_) => Ok(ColumnType::String),
        serde_json::Value::Bool(_) => Ok(ColumnType::Bool),
        serde_json::Value::Null => Ok(ColumnType::String),
        _ => Err(FrameError::InvalidData(format!(
            "Unsupported JSON value type for column '{}'",
            key
        ))),
    }
}

/// Convert a JSON value to the column's type. Values that do not fit the
/// column are handed through as-is and rejected by column validation.
fn json_to_column_value(value: &serde_json::Value, col_type: ColumnType) -> ColumnValue {
    match value {
        serde_json::Value::Null => ColumnValue::Null,
        serde_json::Value::Bool(b) => ColumnValue::Bool(*b),
        serde_json::Value::String(s) => ColumnValue::String(s.clone()),
        serde_json::Value::Number(n) => match col_type {
            ColumnType::Float64 | ColumnType::Float32 => {
                ColumnValue::Float64(n.as_f64().unwrap_or(f64::NAN))
            }
            _ => match n.as_i64() {
                Some(v) if v >= i32::MIN as i64 && v <= i32::MAX as i64 => ColumnValue::Int32(v as i32),
                Some(v) => ColumnValue::Int64(v),
                None => ColumnValue::Float64(n.as_f64().unwrap_or(f64::NAN)),
            },
        },
        other => ColumnValue::String(other.to_string()),
    }
}

impl std::fmt::Debug for DataFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DataFrame {{ columns: {:?}, rows: {} }}",
            self.column_names(),
            self.row_count
        )
    }
}
