/// FrameView View Implementation
///
/// A `DataFrameView` wraps an immutable frame and treats its columns as
/// index dimensions. Views are cheap to derive: selecting, slicing, applying
/// an operation or splitting into a container always builds new views that
/// share nothing mutable with their parent.
///
/// # Examples
///
/// ```
/// use frameview::{ColumnType, ColumnValue, DataFrame, DataFrameView, Selector};
///
/// let frame = DataFrame::from_rows(
///     &[("x", ColumnType::Int32, false), ("y", ColumnType::Int32, false)],
///     vec![
///         vec![ColumnValue::Int32(1), ColumnValue::Int32(10)],
///         vec![ColumnValue::Int32(2), ColumnValue::Int32(20)],
///         vec![ColumnValue::Int32(3), ColumnValue::Int32(30)],
///     ],
/// )
/// .unwrap();
/// let view = DataFrameView::new(frame);
///
/// // Positional keys address index dimensions in column order
/// let middle = view.index(&[Selector::range(1.0, 3.0)]).unwrap();
/// assert_eq!(middle.len(), 1);
/// assert_eq!(middle.dimension_values("y").unwrap(), vec![20.0]);
/// ```

use crate::container::{ContainerKind, NdMapping};
use crate::dimension::{Dimension, Selector};
use crate::error::{FrameError, Result};
use crate::frame::DataFrame;
use crate::ops::OperationRegistry;
use crate::options::{PlotType, ViewOptions};
use log::{debug, warn};
use std::cell::OnceCell;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct DataFrameView {
    data: Rc<DataFrame>,
    index_dimensions: Vec<Dimension>,
    options: ViewOptions,
    xlim_cache: OnceCell<Option<(f64, f64)>>,
    ylim_cache: OnceCell<Option<(f64, f64)>>,
}

impl DataFrameView {
    /// Wrap a frame, making every column an index dimension.
    pub fn new(frame: DataFrame) -> Self {
        let index_dimensions = frame.column_names().into_iter().map(Dimension::new).collect();
        DataFrameView::from_parts(Rc::new(frame), index_dimensions, ViewOptions::default())
    }

    /// Wrap a frame with explicit index dimensions and options.
    ///
    /// Each dimension naming an existing column relabels that column in
    /// place. Columns no dimension names keep an empty label, and dimensions
    /// naming no column are ignored. Passing `None` makes every column an
    /// index dimension.
    pub fn with_dimensions(
        frame: DataFrame,
        index_dimensions: Option<Vec<Dimension>>,
        options: ViewOptions,
    ) -> Result<Self> {
        let dims = match index_dimensions {
            None => frame.column_names().into_iter().map(Dimension::new).collect(),
            Some(requested) => {
                let mut dims = vec![Dimension::new(""); frame.num_columns()];
                for dim in requested {
                    if dim.name.is_empty() {
                        return Err(FrameError::InvalidData(
                            "Index dimensions must have a name".to_string(),
                        ));
                    }
                    match frame.column_index(&dim.name) {
                        Some(idx) => dims[idx] = dim,
                        None => warn!("Dimension '{}' matches no column and is ignored", dim.name),
                    }
                }
                dims
            }
        };

        let names: Vec<&str> = dims.iter().map(|d| d.name.as_str()).collect();
        let frame = frame.rename_columns(&names)?;
        Ok(DataFrameView::from_parts(Rc::new(frame), dims, options))
    }

    /// Parse CSV text into a view with every column as an index dimension.
    pub fn from_csv(csv: &str) -> Result<Self> {
        Ok(DataFrameView::new(DataFrame::from_csv(csv)?))
    }

    /// Parse a JSON array of records into a view.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(DataFrameView::new(DataFrame::from_json(json)?))
    }

    fn from_parts(data: Rc<DataFrame>, index_dimensions: Vec<Dimension>, options: ViewOptions) -> Self {
        DataFrameView {
            data,
            index_dimensions,
            options,
            xlim_cache: OnceCell::new(),
            ylim_cache: OnceCell::new(),
        }
    }

    /// New view over `frame` carrying this view's options. Dimensions are
    /// matched to the new columns by name; unknown columns get fresh ones.
    fn clone_with(&self, frame: DataFrame) -> DataFrameView {
        let dims = frame
            .column_names()
            .into_iter()
            .map(|name| {
                self.get_dimension(name)
                    .cloned()
                    .unwrap_or_else(|| Dimension::new(name))
            })
            .collect();
        DataFrameView::from_parts(Rc::new(frame), dims, self.options.clone())
    }

    /// Same data with different options.
    pub fn with_options(&self, options: ViewOptions) -> DataFrameView {
        DataFrameView::from_parts(self.data.clone(), self.index_dimensions.clone(), options)
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Detached copy of the underlying frame.
    pub fn dframe(&self) -> DataFrame {
        self.data.as_ref().clone()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    pub fn index_dimensions(&self) -> &[Dimension] {
        &self.index_dimensions
    }

    /// Frame views carry no value dimensions.
    pub fn value_dimensions(&self) -> &[Dimension] {
        &[]
    }

    pub fn dimension_names(&self) -> Vec<&str> {
        self.index_dimensions.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn ndims(&self) -> usize {
        self.index_dimensions.len()
    }

    pub fn get_dimension(&self, name: &str) -> Option<&Dimension> {
        self.index_dimensions.iter().find(|d| d.name == name)
    }

    pub fn value(&self) -> &str {
        &self.options.value
    }

    pub fn plot_type(&self) -> Option<PlotType> {
        self.options.plot_type
    }

    pub fn xlabel(&self) -> Option<&str> {
        self.options.x.as_deref()
    }

    pub fn ylabel(&self) -> Option<&str> {
        self.options.y.as_deref()
    }

    pub fn x2(&self) -> Option<&str> {
        self.options.x2.as_deref()
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Filter rows by per-dimension criteria, applied left to right.
    ///
    /// Ranges keep values strictly between their bounds; exact criteria keep
    /// equal values. An empty result is a valid zero-row view.
    pub fn select(&self, criteria: &[(&str, Selector)]) -> Result<DataFrameView> {
        let mut positional = Vec::with_capacity(criteria.len());
        let mut missing: Vec<String> = Vec::new();
        for (name, selector) in criteria {
            match self.labelled_position(name) {
                Some(idx) => positional.push((idx, selector)),
                None if !missing.iter().any(|m| m == name) => missing.push(name.to_string()),
                None => {}
            }
        }
        if !missing.is_empty() {
            return Err(FrameError::UnknownDimension(missing));
        }
        Ok(self.select_positions(&positional))
    }

    /// Positional selection: the n-th selector applies to the n-th index
    /// dimension. An empty key returns the view unchanged.
    pub fn index(&self, key: &[Selector]) -> Result<DataFrameView> {
        if key.is_empty() {
            return Ok(self.clone());
        }
        if key.len() > self.ndims() {
            return Err(FrameError::DimensionMismatch {
                key_len: key.len(),
                ndims: self.ndims(),
            });
        }
        let positional: Vec<(usize, &Selector)> = key.iter().enumerate().collect();
        Ok(self.select_positions(&positional))
    }

    /// Column position of a labelled dimension. Unlabelled columns are only
    /// reachable by position.
    fn labelled_position(&self, name: &str) -> Option<usize> {
        if name.is_empty() {
            return None;
        }
        self.data.column_index(name)
    }

    fn select_positions(&self, criteria: &[(usize, &Selector)]) -> DataFrameView {
        let columns = self.data.columns();
        let mut rows: Vec<usize> = (0..self.data.len()).collect();
        for (idx, selector) in criteria {
            let values = columns[*idx].values();
            rows.retain(|&row| selector.matches(&values[row]));
        }
        self.clone_with(self.data.take(&rows))
    }

    /// Numeric values of a column. Nulls come back as NaN.
    pub fn dimension_values(&self, dim: &str) -> Result<Vec<f64>> {
        let column = self
            .labelled_position(dim)
            .map(|idx| &self.data.columns()[idx])
            .ok_or_else(|| FrameError::UnknownDimension(vec![dim.to_string()]))?;
        if !column.column_type().is_numeric() {
            return Err(FrameError::TypeMismatch {
                column: dim.to_string(),
                expected: "numeric".to_string(),
                found: column.column_type().name().to_string(),
            });
        }
        Ok(column
            .iter()
            .map(|v| v.to_f64().unwrap_or(f64::NAN))
            .collect())
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Run a registered frame operation and wrap the result in a new view.
    ///
    /// ```
    /// use frameview::DataFrameView;
    /// use serde_json::json;
    ///
    /// let view = DataFrameView::from_csv("a,b\n3,x\n1,y\n2,z\n").unwrap();
    /// let sorted = view.apply("sort_values", &[json!("a")]).unwrap();
    /// assert_eq!(sorted.dimension_values("a").unwrap(), vec![1.0, 2.0, 3.0]);
    /// assert!(view.apply("pivot", &[]).is_err());
    /// ```
    pub fn apply(&self, name: &str, args: &[serde_json::Value]) -> Result<DataFrameView> {
        self.apply_with(OperationRegistry::global(), name, args)
    }

    /// [`DataFrameView::apply`] against a caller-supplied registry.
    pub fn apply_with(
        &self,
        registry: &OperationRegistry,
        name: &str,
        args: &[serde_json::Value],
    ) -> Result<DataFrameView> {
        let frame = registry.apply(name, &self.data, args)?;
        debug!("Applied '{}': {} -> {} rows", name, self.data.len(), frame.len());
        Ok(self.clone_with(frame))
    }

    // ========================================================================
    // Splitting into containers
    // ========================================================================

    /// Group rows by `dimensions` into a container of child views keyed by
    /// the group values. Children keep only the remaining dimensions.
    pub fn split_dimensions(
        &self,
        dimensions: &[&str],
        kind: ContainerKind,
    ) -> Result<NdMapping<DataFrameView>> {
        let mut invalid: Vec<String> = Vec::new();
        for dim in dimensions {
            if self.labelled_position(dim).is_none() && !invalid.iter().any(|d| d == dim) {
                invalid.push(dim.to_string());
            }
        }
        if !invalid.is_empty() {
            return Err(FrameError::UnknownDimension(invalid));
        }

        let index_dims: Vec<Dimension> = dimensions
            .iter()
            .filter_map(|d| self.get_dimension(d).cloned())
            .collect();
        let mut mapping = NdMapping::new(kind, index_dims);

        let groups = self.data.group_rows(dimensions)?;
        debug!(
            "Splitting {} rows by {:?} into {} {:?} groups",
            self.data.len(),
            dimensions,
            groups.len(),
            kind
        );
        for (key, rows) in groups {
            let child = self.data.take(&rows).drop_columns(dimensions)?;
            mapping.insert(key, self.clone_with(child));
        }
        Ok(mapping)
    }

    /// Split into layers of one overlay.
    pub fn overlay(&self, dimensions: &[&str]) -> Result<NdMapping<DataFrameView>> {
        self.split_dimensions(dimensions, ContainerKind::Overlay)
    }

    /// Split into separate panels laid out `cols` per row.
    pub fn layout(&self, dimensions: &[&str], cols: usize) -> Result<NdMapping<DataFrameView>> {
        Ok(self
            .split_dimensions(dimensions, ContainerKind::GridLayout)?
            .with_cols(cols))
    }

    /// Split into a grid of panels along at most two dimensions.
    pub fn grid(&self, dimensions: &[&str]) -> Result<NdMapping<DataFrameView>> {
        if dimensions.len() > 2 {
            return Err(FrameError::TooManyGridDimensions(dimensions.len()));
        }
        self.split_dimensions(dimensions, ContainerKind::GridLayout)
    }

    /// Split into an animatable map indexed by `dimensions`.
    pub fn viewmap(&self, dimensions: &[&str]) -> Result<NdMapping<DataFrameView>> {
        self.split_dimensions(dimensions, ContainerKind::ViewMap)
    }

    // ========================================================================
    // Axis bounds
    // ========================================================================

    /// Same view with explicit x bounds.
    pub fn with_xlim(&self, lo: f64, hi: f64) -> DataFrameView {
        self.with_options(self.options.clone().xlim(lo, hi))
    }

    /// Same view with explicit y bounds.
    pub fn with_ylim(&self, lo: f64, hi: f64) -> DataFrameView {
        self.with_options(self.options.clone().ylim(lo, hi))
    }

    /// X bounds: the explicit override, else `(min, max)` of the x column,
    /// else None when no x column is configured or it holds no numbers.
    pub fn xlim(&self) -> Result<Option<(f64, f64)>> {
        self.bounds(self.options.xlim, self.options.x.as_deref(), &self.xlim_cache)
    }

    /// Y bounds, resolved like [`DataFrameView::xlim`].
    pub fn ylim(&self) -> Result<Option<(f64, f64)>> {
        self.bounds(self.options.ylim, self.options.y.as_deref(), &self.ylim_cache)
    }

    fn bounds(
        &self,
        explicit: Option<(f64, f64)>,
        column: Option<&str>,
        cache: &OnceCell<Option<(f64, f64)>>,
    ) -> Result<Option<(f64, f64)>> {
        if explicit.is_some() {
            return Ok(explicit);
        }
        let Some(column) = column else {
            return Ok(None);
        };
        if let Some(cached) = cache.get() {
            return Ok(*cached);
        }
        let computed = match (self.data.min(column)?, self.data.max(column)?) {
            (Some(lo), Some(hi)) => Some((lo, hi)),
            _ => None,
        };
        Ok(*cache.get_or_init(|| computed))
    }
}

impl PartialEq for DataFrameView {
    fn eq(&self, other: &Self) -> bool {
        self.index_dimensions == other.index_dimensions
            && self.options == other.options
            && (Rc::ptr_eq(&self.data, &other.data) || self.data == other.data)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::column::{Column, ColumnType, ColumnValue};
    use serde_json::json;

    fn xy() -> DataFrame {
        DataFrame::from_rows(
            &[("x", ColumnType::Int32, false), ("y", ColumnType::Int32, false)],
            vec![
                vec![1.into(), 10.into()],
                vec![2.into(), 20.into()],
                vec![3.into(), 30.into()],
            ],
        )
        .unwrap()
    }

    /// Rows of `frame` as strings, split columns first, sorted.
    pub(crate) fn frame_rows(frame: &DataFrame, split: &[&str]) -> Vec<String> {
        let mut order: Vec<&Column> = split.iter().filter_map(|d| frame.column(d)).collect();
        order.extend(frame.columns().iter().filter(|c| !split.contains(&c.name())));
        let mut rows: Vec<String> = (0..frame.len())
            .map(|r| {
                order
                    .iter()
                    .map(|c| c.values()[r].to_string())
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect();
        rows.sort();
        rows
    }

    /// Rows of every child prefixed with the child's key, sorted.
    pub(crate) fn split_rows(mapping: &NdMapping<DataFrameView>) -> Vec<String> {
        let mut rows = Vec::new();
        for (key, child) in mapping.iter() {
            for r in 0..child.len() {
                let mut cells: Vec<String> = key.values().iter().map(|v| v.to_string()).collect();
                cells.extend(child.data().columns().iter().map(|c| c.values()[r].to_string()));
                rows.push(cells.join("|"));
            }
        }
        rows.sort();
        rows
    }

    fn measurements() -> DataFrame {
        DataFrame::from_rows(
            &[
                ("site", ColumnType::String, false),
                ("day", ColumnType::Int32, false),
                ("temp", ColumnType::Float64, true),
            ],
            vec![
                vec!["north".into(), 1.into(), 10.5.into()],
                vec!["south".into(), 1.into(), 15.0.into()],
                vec!["north".into(), 2.into(), 11.0.into()],
                vec!["south".into(), 2.into(), ColumnValue::Null],
                vec!["east".into(), 3.into(), 9.0.into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_all_columns_become_dimensions() {
        let view = DataFrameView::new(measurements());
        assert_eq!(view.dimension_names(), vec!["site", "day", "temp"]);
        assert_eq!(view.ndims(), 3);
        assert!(view.value_dimensions().is_empty());
        assert_eq!(view.value(), "DFrame");
    }

    #[test]
    fn test_partial_dimensions_leave_empty_labels() {
        let view = DataFrameView::with_dimensions(
            measurements(),
            Some(vec![Dimension::with_unit("temp", "C"), Dimension::new("site"), Dimension::new("ghost")]),
            ViewOptions::default(),
        )
        .unwrap();
        assert_eq!(view.dimension_names(), vec!["site", "", "temp"]);
        assert_eq!(view.data().column_names(), vec!["site", "", "temp"]);
        assert_eq!(view.get_dimension("temp").unwrap().unit.as_deref(), Some("C"));
    }

    #[test]
    fn test_construction_from_bad_source() {
        assert!(matches!(DataFrameView::from_json("42"), Err(FrameError::InvalidData(_))));
        assert!(matches!(DataFrameView::from_csv(""), Err(FrameError::InvalidData(_))));
        assert!(DataFrameView::with_dimensions(xy(), Some(vec![Dimension::new("")]), ViewOptions::default()).is_err());
    }

    #[test]
    fn test_empty_key_is_identity() {
        let view = DataFrameView::new(measurements());
        assert_eq!(view.index(&[]).unwrap(), view);
    }

    #[test]
    fn test_key_longer_than_dimensions() {
        let view = DataFrameView::new(xy());
        let err = view
            .index(&[1.into(), 2.into(), 3.into()])
            .unwrap_err();
        assert_eq!(err, FrameError::DimensionMismatch { key_len: 3, ndims: 2 });
    }

    #[test]
    fn test_positional_index_dispatches_to_select() {
        let view = DataFrameView::new(measurements());
        let north = view.index(&["north".into()]).unwrap();
        assert_eq!(north.len(), 2);

        let north_day2 = view.index(&["north".into(), 2.into()]).unwrap();
        assert_eq!(north_day2.dimension_values("temp").unwrap(), vec![11.0]);
    }

    #[test]
    fn test_range_select_excludes_endpoints() {
        let view = DataFrameView::new(xy());
        let picked = view.select(&[("x", Selector::range(1.0, 3.0))]).unwrap();
        assert_eq!(picked.dimension_values("x").unwrap(), vec![2.0]);

        let none = view.select(&[("x", Selector::range(3.0, 10.0))]).unwrap();
        assert!(none.is_empty());
        assert_eq!(none.dimension_names(), vec!["x", "y"]);
    }

    #[test]
    fn test_select_order_insensitive_on_disjoint_columns() {
        let view = DataFrameView::new(measurements());
        let a = view
            .select(&[("site", "south".into()), ("day", 1.into())])
            .unwrap();
        let b = view
            .select(&[("day", 1.into()), ("site", "south".into())])
            .unwrap();
        assert_eq!(a.dframe(), b.dframe());
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_select_unknown_column() {
        let view = DataFrameView::new(xy());
        assert_eq!(
            view.select(&[("z", 1.into())]).unwrap_err(),
            FrameError::UnknownDimension(vec!["z".to_string()])
        );
    }

    #[test]
    fn test_dframe_is_detached() {
        let view = DataFrameView::new(xy());
        let copy = view.dframe();
        let mutated = copy.drop_columns(&["y"]).unwrap();
        drop(copy);
        assert_eq!(mutated.num_columns(), 1);
        assert_eq!(view.data().num_columns(), 2);
        assert_eq!(view.dimension_values("y").unwrap(), vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_dimension_values() {
        let view = DataFrameView::new(measurements());
        let temps = view.dimension_values("temp").unwrap();
        assert_eq!(temps.len(), 5);
        assert!(temps[3].is_nan());
        assert!(matches!(view.dimension_values("site"), Err(FrameError::TypeMismatch { .. })));
        assert!(matches!(view.dimension_values("wind"), Err(FrameError::UnknownDimension(_))));
    }

    #[test]
    fn test_apply_wraps_result() {
        let view = DataFrameView::new(measurements()).with_options(ViewOptions::new().value("Weather"));
        let head = view.apply("head", &[json!(2)]).unwrap();
        assert_eq!(head.len(), 2);
        assert_eq!(head.value(), "Weather");

        let dropped = view.apply("drop", &[json!("temp")]).unwrap();
        assert_eq!(dropped.dimension_names(), vec!["site", "day"]);

        assert_eq!(
            view.apply("melt", &[]).unwrap_err(),
            FrameError::UnsupportedOperation("melt".to_string())
        );
    }

    #[test]
    fn test_split_partitions_rows() {
        let view = DataFrameView::new(measurements());
        let map = view.viewmap(&["site"]).unwrap();

        assert_eq!(map.kind(), ContainerKind::ViewMap);
        assert_eq!(map.index_dimensions(), &[Dimension::new("site")]);
        let keys: Vec<String> = map.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["(east)", "(north)", "(south)"]);

        assert_eq!(split_rows(&map), frame_rows(view.data(), &["site"]));
        for child in map.values() {
            assert_eq!(child.dimension_names(), vec!["day", "temp"]);
        }
    }

    #[test]
    fn test_unlabelled_columns_resolve_by_position() {
        let frame = DataFrame::from_rows(
            &[
                ("a", ColumnType::Int32, false),
                ("b", ColumnType::Int32, false),
                ("c", ColumnType::Int32, false),
            ],
            vec![
                vec![1.into(), 20.into(), 200.into()],
                vec![1.into(), 200.into(), 20.into()],
                vec![2.into(), 20.into(), 200.into()],
            ],
        )
        .unwrap();
        let view = DataFrameView::with_dimensions(frame, Some(vec![Dimension::new("a")]), ViewOptions::default())
            .unwrap();
        assert_eq!(view.dimension_names(), vec!["a", "", ""]);

        let picked = view.index(&[1.into(), 20.into(), 200.into()]).unwrap();
        assert_eq!(picked.len(), 1);
        assert_eq!(picked.dimension_values("a").unwrap(), vec![1.0]);

        let unlabelled = FrameError::UnknownDimension(vec!["".to_string()]);
        assert_eq!(view.select(&[("", 20.into())]).unwrap_err(), unlabelled);
        assert_eq!(view.overlay(&[""]).unwrap_err(), unlabelled);
        assert_eq!(view.dimension_values("").unwrap_err(), unlabelled);
    }

    #[test]
    fn test_split_by_two_dimensions() {
        let view = DataFrameView::new(measurements());
        let overlay = view.overlay(&["site", "day"]).unwrap();
        assert_eq!(overlay.kind(), ContainerKind::Overlay);
        assert_eq!(overlay.len(), 5);
        for child in overlay.values() {
            assert_eq!(child.len(), 1);
            assert_eq!(child.dimension_names(), vec!["temp"]);
        }
    }

    #[test]
    fn test_split_unknown_dimensions_listed() {
        let view = DataFrameView::new(measurements());
        let err = view.overlay(&["site", "wind", "rain"]).unwrap_err();
        assert_eq!(
            err,
            FrameError::UnknownDimension(vec!["wind".to_string(), "rain".to_string()])
        );
    }

    #[test]
    fn test_layout_and_grid() {
        let view = DataFrameView::new(measurements());
        let layout = view.layout(&["day"], 2).unwrap();
        assert_eq!(layout.kind(), ContainerKind::GridLayout);
        assert_eq!(layout.cols(), Some(2));
        assert_eq!(layout.grid_shape(), Some((2, 2)));

        let grid = view.grid(&["site", "day"]).unwrap();
        assert_eq!(grid.len(), 5);
        assert_eq!(
            view.grid(&["site", "day", "temp"]).unwrap_err(),
            FrameError::TooManyGridDimensions(3)
        );
    }

    #[test]
    fn test_split_without_dimensions_keeps_everything() {
        let view = DataFrameView::new(measurements());
        let layout = view.layout(&[], 4).unwrap();
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.first().unwrap().len(), view.len());
    }

    #[test]
    fn test_xlim_undefined_without_x() {
        let view = DataFrameView::new(xy());
        assert_eq!(view.xlim().unwrap(), None);
        assert_eq!(view.ylim().unwrap(), None);
    }

    #[test]
    fn test_xlim_from_column_and_override() {
        let view = DataFrameView::with_dimensions(xy(), None, ViewOptions::new().x("x").y("y")).unwrap();
        assert_eq!(view.xlim().unwrap(), Some((1.0, 3.0)));
        assert_eq!(view.xlim().unwrap(), Some((1.0, 3.0)));
        assert_eq!(view.ylim().unwrap(), Some((10.0, 30.0)));
        assert_eq!(view.xlabel(), Some("x"));

        let fixed = view.with_xlim(0.0, 5.0);
        assert_eq!(fixed.xlim().unwrap(), Some((0.0, 5.0)));
        assert_eq!(fixed.ylim().unwrap(), Some((10.0, 30.0)));
    }

    #[test]
    fn test_xlim_unknown_column() {
        let view = DataFrameView::new(xy()).with_options(ViewOptions::new().x("time"));
        assert!(view.xlim().is_err());
    }
}
