//! Observation matrices and the reduction functions applied to them.
//!
//! A reducer follows the usual array-reduction contract: it receives a
//! matrix and an axis and returns a matrix with that axis collapsed to
//! length one. `Axis::Rows` (axis 0) reduces across stacked observations.

use crate::error::{FrameError, Result};
use std::fmt;
use std::rc::Rc;

/// Dense row-major matrix of f64.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Build from equally long rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != cols) {
            return Err(FrameError::InvalidData(
                "Matrix rows must all have the same length".to_string(),
            ));
        }
        let n_rows = rows.len();
        Ok(Matrix {
            rows: n_rows,
            cols,
            data: rows.into_iter().flatten().collect(),
        })
    }

    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(FrameError::InvalidData(format!(
                "Matrix of shape ({}, {}) needs {} values, got {}",
                rows,
                cols,
                rows * cols,
                data.len()
            )));
        }
        Ok(Matrix { rows, cols, data })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row < self.rows {
            Some(&self.data[row * self.cols..(row + 1) * self.cols])
        } else {
            None
        }
    }

    pub fn column(&self, col: usize) -> Option<Vec<f64>> {
        if col < self.cols {
            Some((0..self.rows).map(|r| self.data[r * self.cols + col]).collect())
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Collapse `axis` by folding each lane through `f`.
    pub fn reduce_lanes<F>(&self, axis: Axis, mut f: F) -> Matrix
    where
        F: FnMut(&[f64]) -> f64,
    {
        match axis {
            Axis::Rows => {
                let data = (0..self.cols)
                    .map(|c| {
                        let lane: Vec<f64> = (0..self.rows)
                            .map(|r| self.data[r * self.cols + c])
                            .collect();
                        f(&lane)
                    })
                    .collect();
                Matrix {
                    rows: 1,
                    cols: self.cols,
                    data,
                }
            }
            Axis::Columns => {
                let data = (0..self.rows)
                    .map(|r| f(&self.data[r * self.cols..(r + 1) * self.cols]))
                    .collect();
                Matrix {
                    rows: self.rows,
                    cols: 1,
                    data,
                }
            }
        }
    }
}

/// Axis along which a reduction collapses a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Axis 0: collapse the rows, one result per column.
    Rows,
    /// Axis 1: collapse the columns, one result per row.
    Columns,
}

type ReduceFn = dyn Fn(&Matrix, Axis) -> Matrix;

/// A named reduction function `(matrix, axis) -> matrix`.
#[derive(Clone)]
pub struct Reducer {
    name: String,
    func: Rc<ReduceFn>,
}

impl Reducer {
    /// Wrap a custom reduction.
    ///
    /// ```
    /// use frameview::{Axis, Matrix, Reducer};
    ///
    /// let range = Reducer::new("range", |m: &Matrix, axis: Axis| {
    ///     m.reduce_lanes(axis, |lane| {
    ///         let lo = lane.iter().cloned().fold(f64::INFINITY, f64::min);
    ///         let hi = lane.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    ///         hi - lo
    ///     })
    /// });
    /// let m = Matrix::from_rows(vec![vec![1.0, 5.0], vec![4.0, 6.0]]).unwrap();
    /// assert_eq!(range.reduce(&m, Axis::Rows).as_slice(), &[3.0, 1.0]);
    /// ```
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Matrix, Axis) -> Matrix + 'static,
    {
        Reducer {
            name: name.into(),
            func: Rc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reduce(&self, matrix: &Matrix, axis: Axis) -> Matrix {
        (self.func)(matrix, axis)
    }

    /// Total of the observations. A NaN observation makes the total NaN.
    pub fn sum() -> Self {
        Reducer::new("sum", |m: &Matrix, axis: Axis| m.reduce_lanes(axis, |lane| lane.iter().sum()))
    }

    /// Arithmetic mean. NaN propagates; an empty lane is NaN.
    pub fn mean() -> Self {
        Reducer::new("mean", |m: &Matrix, axis: Axis| {
            m.reduce_lanes(axis, |lane| {
                if lane.is_empty() {
                    f64::NAN
                } else {
                    lane.iter().sum::<f64>() / lane.len() as f64
                }
            })
        })
    }

    /// Smallest observation. NaN in a lane propagates, as with `sum` and `mean`.
    pub fn min() -> Self {
        Reducer::new("min", |m: &Matrix, axis: Axis| {
            m.reduce_lanes(axis, |lane| extremum(lane, f64::min))
        })
    }

    /// Largest observation. NaN in a lane propagates.
    pub fn max() -> Self {
        Reducer::new("max", |m: &Matrix, axis: Axis| {
            m.reduce_lanes(axis, |lane| extremum(lane, f64::max))
        })
    }

    /// Number of non-NaN observations.
    pub fn count() -> Self {
        Reducer::new("count", |m: &Matrix, axis: Axis| {
            m.reduce_lanes(axis, |lane| lane.iter().filter(|v| !v.is_nan()).count() as f64)
        })
    }

    pub fn first() -> Self {
        Reducer::new("first", |m: &Matrix, axis: Axis| {
            m.reduce_lanes(axis, |lane| lane.first().copied().unwrap_or(f64::NAN))
        })
    }

    pub fn last() -> Self {
        Reducer::new("last", |m: &Matrix, axis: Axis| {
            m.reduce_lanes(axis, |lane| lane.last().copied().unwrap_or(f64::NAN))
        })
    }
}

/// Fold a lane with `pick`, returning NaN for an empty lane or any NaN value.
fn extremum(lane: &[f64], pick: fn(f64, f64) -> f64) -> f64 {
    let mut values = lane.iter().copied();
    let Some(first) = values.next() else {
        return f64::NAN;
    };
    values.fold(first, |acc, v| {
        if acc.is_nan() || v.is_nan() {
            f64::NAN
        } else {
            pick(acc, v)
        }
    })
}

impl fmt::Debug for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reducer({})", self.name)
    }
}
