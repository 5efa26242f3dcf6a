/// Derived views
///
/// A `Table` is the reshaped result of a conversion: one row per composite
/// key of the index dimensions, holding one reduced number per value
/// dimension. An `Element` wraps a table in a chart kind (bars, curve,
/// heatmap, ...) together with the options that kind was created with.

use crate::dimension::{Dimension, GroupKey};
use crate::error::{FrameError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Key-annotated table of reduced values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    index_dimensions: Vec<Dimension>,
    value_dimensions: Vec<Dimension>,
    value: String,
    rows: Vec<(GroupKey, Vec<f64>)>,
    #[serde(skip)]
    positions: BTreeMap<GroupKey, usize>,
}

impl Table {
    pub fn new(
        index_dimensions: Vec<Dimension>,
        value_dimensions: Vec<Dimension>,
        value: impl Into<String>,
    ) -> Self {
        Table {
            index_dimensions,
            value_dimensions,
            value: value.into(),
            rows: Vec::new(),
            positions: BTreeMap::new(),
        }
    }

    /// Insert a row. Keys must have one value per index dimension and rows
    /// one value per value dimension. An existing key is replaced in place.
    pub fn insert(&mut self, key: GroupKey, values: Vec<f64>) -> Result<()> {
        if key.len() != self.index_dimensions.len() {
            return Err(FrameError::DimensionMismatch {
                key_len: key.len(),
                ndims: self.index_dimensions.len(),
            });
        }
        if values.len() != self.value_dimensions.len() {
            return Err(FrameError::InvalidData(format!(
                "Row {} has {} values, table has {} value dimensions",
                key,
                values.len(),
                self.value_dimensions.len()
            )));
        }
        match self.positions.get(&key) {
            Some(&idx) => self.rows[idx].1 = values,
            None => {
                self.positions.insert(key.clone(), self.rows.len());
                self.rows.push((key, values));
            }
        }
        Ok(())
    }

    pub fn index_dimensions(&self) -> &[Dimension] {
        &self.index_dimensions
    }

    pub fn value_dimensions(&self) -> &[Dimension] {
        &self.value_dimensions
    }

    /// Label describing what the table's values are.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, key: &GroupKey) -> Option<&[f64]> {
        self.positions
            .get(key)
            .map(|&idx| self.rows[idx].1.as_slice())
    }

    /// Scalar for `key` in the first value dimension.
    pub fn get_scalar(&self, key: &GroupKey) -> Option<f64> {
        self.get(key).and_then(|v| v.first().copied())
    }

    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.rows.iter().map(|(k, _)| k)
    }

    pub fn rows(&self) -> &[(GroupKey, Vec<f64>)] {
        &self.rows
    }

    /// Values of one value dimension across all rows, in row order.
    pub fn value_column(&self, dimension: &str) -> Option<Vec<f64>> {
        let idx = self
            .value_dimensions
            .iter()
            .position(|d| d.name == dimension)?;
        Some(self.rows.iter().map(|(_, v)| v[idx]).collect())
    }
}

/// Chart kind an element is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Table,
    Bars,
    Curve,
    HeatMap,
    Scatter,
    Points,
    VectorField,
}

impl ElementKind {
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Table => "Table",
            ElementKind::Bars => "Bars",
            ElementKind::Curve => "Curve",
            ElementKind::HeatMap => "HeatMap",
            ElementKind::Scatter => "Scatter",
            ElementKind::Points => "Points",
            ElementKind::VectorField => "VectorField",
        }
    }

    /// Check that a table with `index` index and `value` value dimensions
    /// can be drawn as this kind.
    pub fn validate(&self, index: usize, value: usize) -> Result<()> {
        let requirement = match self {
            ElementKind::Table => None,
            ElementKind::Bars if index < 1 => Some("at least one index dimension"),
            ElementKind::Curve | ElementKind::Scatter if index != 1 => {
                Some("exactly one index dimension")
            }
            ElementKind::HeatMap | ElementKind::Points if index != 2 => {
                Some("exactly two index dimensions")
            }
            ElementKind::VectorField if index != 2 || value < 2 => {
                Some("two index dimensions and at least two value dimensions")
            }
            _ => None,
        };
        match requirement {
            Some(requirement) => Err(FrameError::IncompatibleShape {
                kind: self.name().to_string(),
                requirement: requirement.to_string(),
                index,
                value,
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Options forwarded to the chart kind untouched.
pub type ElementOptions = serde_json::Map<String, serde_json::Value>;

/// A table drawn as a particular chart kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    kind: ElementKind,
    table: Table,
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    options: ElementOptions,
}

impl Element {
    pub fn new(kind: ElementKind, table: Table, options: ElementOptions) -> Result<Self> {
        kind.validate(table.index_dimensions().len(), table.value_dimensions().len())?;
        Ok(Element {
            kind,
            table,
            options,
        })
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn options(&self) -> &ElementOptions {
        &self.options
    }

    pub fn option(&self, name: &str) -> Option<&serde_json::Value> {
        self.options.get(name)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| FrameError::InvalidData(format!("JSON serialization error: {}", e)))
    }
}
