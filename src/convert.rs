/// FrameView Table Conversion
///
/// Reshapes a frame view into keyed tables and chart elements. Rows are
/// grouped first by the map dimensions (one element per outer group) and
/// then by the view dimensions (one table row per inner group). Each inner
/// group's value columns are stacked into an observation matrix, rows being
/// observations, which a reducer collapses to a single row. Without a
/// reducer the first observation is kept.
///
/// # Examples
///
/// ```
/// use frameview::{ConvertOptions, DataFrameView, GroupKey, Reducer, TableConverter};
///
/// let view = DataFrameView::from_csv("k,v\n1,2\n1,3\n2,9\n").unwrap();
/// let bars = view
///     .bars(ConvertOptions::new(["v"], ["k"]).reduce(Reducer::sum()))
///     .unwrap()
///     .into_element()
///     .unwrap();
/// assert_eq!(bars.table().get_scalar(&GroupKey::from(vec![1i64])), Some(5.0));
/// ```

use crate::container::{ContainerKind, NdMapping};
use crate::dimension::{Dimension, GroupKey};
use crate::element::{Element, ElementKind, ElementOptions, Table};
use crate::error::{FrameError, Result};
use crate::frame::DataFrame;
use crate::reduce::{Axis, Matrix, Reducer};
use crate::view::DataFrameView;
use log::{debug, trace};

/// Parameters of one conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Columns whose reduced values fill the table.
    pub value_dims: Vec<String>,
    /// Columns forming each table row's key.
    pub view_dims: Vec<String>,
    /// Columns splitting the frame into separate elements.
    pub map_dims: Vec<String>,
    pub reduce: Option<Reducer>,
    /// Chart kind of the produced elements; plain tables when unset.
    pub kind: Option<ElementKind>,
    /// Forwarded to every produced element.
    pub kind_options: ElementOptions,
}

impl ConvertOptions {
    pub fn new<V, K>(value_dims: V, view_dims: K) -> Self
    where
        V: IntoIterator,
        V::Item: Into<String>,
        K: IntoIterator,
        K::Item: Into<String>,
    {
        ConvertOptions {
            value_dims: value_dims.into_iter().map(Into::into).collect(),
            view_dims: view_dims.into_iter().map(Into::into).collect(),
            ..ConvertOptions::default()
        }
    }

    pub fn map_dims<M>(mut self, map_dims: M) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
    {
        self.map_dims = map_dims.into_iter().map(Into::into).collect();
        self
    }

    pub fn reduce(mut self, reducer: Reducer) -> Self {
        self.reduce = Some(reducer);
        self
    }

    pub fn kind(mut self, kind: ElementKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn option(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.kind_options.insert(name.into(), value);
        self
    }

    fn referenced_columns(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self
            .map_dims
            .iter()
            .chain(&self.view_dims)
            .chain(&self.value_dims)
        {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
        names
    }
}

/// Result of a conversion: a single element, or a map of elements keyed by
/// the map dimension values.
#[derive(Debug, Clone, PartialEq)]
pub enum Conversion {
    Single(Element),
    Map(NdMapping<Element>),
}

impl Conversion {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Conversion::Single(element) => Some(element),
            Conversion::Map(_) => None,
        }
    }

    pub fn as_map(&self) -> Option<&NdMapping<Element>> {
        match self {
            Conversion::Map(map) => Some(map),
            Conversion::Single(_) => None,
        }
    }

    pub fn into_element(self) -> Option<Element> {
        match self {
            Conversion::Single(element) => Some(element),
            Conversion::Map(_) => None,
        }
    }

    pub fn into_map(self) -> Option<NdMapping<Element>> {
        match self {
            Conversion::Map(map) => Some(map),
            Conversion::Single(_) => None,
        }
    }
}

/// Sources that can be reshaped into tables and chart elements.
pub trait TableConverter {
    /// Frame the conversion reads from.
    fn source(&self) -> &DataFrame;

    /// Dimension metadata for a column name.
    fn dimension(&self, name: &str) -> Dimension;

    /// Label stored on produced tables.
    fn value_label(&self) -> &str;

    fn convert(&self, options: ConvertOptions) -> Result<Conversion> {
        convert_frame(self, options)
    }

    fn table(&self, options: ConvertOptions) -> Result<Conversion> {
        self.convert(options.kind(ElementKind::Table))
    }

    fn bars(&self, options: ConvertOptions) -> Result<Conversion> {
        self.convert(options.kind(ElementKind::Bars))
    }

    fn curve(&self, options: ConvertOptions) -> Result<Conversion> {
        self.convert(options.kind(ElementKind::Curve))
    }

    fn heatmap(&self, options: ConvertOptions) -> Result<Conversion> {
        self.convert(options.kind(ElementKind::HeatMap))
    }

    fn points(&self, options: ConvertOptions) -> Result<Conversion> {
        self.convert(options.kind(ElementKind::Points))
    }

    fn scatter(&self, options: ConvertOptions) -> Result<Conversion> {
        self.convert(options.kind(ElementKind::Scatter))
    }

    fn vectorfield(&self, options: ConvertOptions) -> Result<Conversion> {
        self.convert(options.kind(ElementKind::VectorField))
    }
}

impl TableConverter for DataFrameView {
    fn source(&self) -> &DataFrame {
        self.data()
    }

    fn dimension(&self, name: &str) -> Dimension {
        self.get_dimension(name)
            .cloned()
            .unwrap_or_else(|| Dimension::new(name))
    }

    fn value_label(&self) -> &str {
        self.value()
    }
}

fn convert_frame<C>(source: &C, options: ConvertOptions) -> Result<Conversion>
where
    C: TableConverter + ?Sized,
{
    let frame = source.source();
    let kind = options.kind.unwrap_or(ElementKind::Table);

    let missing = frame.missing_columns(&options.referenced_columns());
    if !missing.is_empty() {
        return Err(FrameError::UnknownDimension(missing));
    }
    kind.validate(options.view_dims.len(), options.value_dims.len())?;

    let value_columns = options
        .value_dims
        .iter()
        .map(|name| {
            let column = frame.require_column(name)?;
            if !column.column_type().is_numeric() {
                return Err(FrameError::TypeMismatch {
                    column: name.clone(),
                    expected: "numeric".to_string(),
                    found: column.column_type().name().to_string(),
                });
            }
            Ok(column)
        })
        .collect::<Result<Vec<_>>>()?;

    let index_dims: Vec<Dimension> = options.view_dims.iter().map(|d| source.dimension(d)).collect();
    let value_dims: Vec<Dimension> = options.value_dims.iter().map(|d| source.dimension(d)).collect();

    let outer_groups = if options.map_dims.is_empty() {
        vec![(GroupKey::empty(), (0..frame.len()).collect::<Vec<usize>>())]
    } else {
        frame.group_rows(&options.map_dims)?
    };

    let mut elements = Vec::with_capacity(outer_groups.len());
    for (outer_key, outer_rows) in outer_groups {
        let mut table = Table::new(index_dims.clone(), value_dims.clone(), source.value_label());

        for (key, rows) in frame.group_subset(&options.view_dims, &outer_rows)? {
            let observations = Matrix::from_vec(
                rows.len(),
                value_columns.len(),
                rows.iter()
                    .flat_map(|&row| {
                        value_columns
                            .iter()
                            .map(move |column| column.get_f64(row).unwrap_or(f64::NAN))
                    })
                    .collect(),
            )?;
            let values = reduce_observations(&observations, options.reduce.as_ref())?;
            trace!("Group {} reduced {} observations to {:?}", key, rows.len(), values);
            table.insert(key, values)?;
        }

        elements.push((outer_key, Element::new(kind, table, options.kind_options.clone())?));
    }

    debug!(
        "Converted {} rows into {} {} element(s) over {:?}",
        frame.len(),
        elements.len(),
        kind,
        options.view_dims
    );

    if options.map_dims.is_empty() {
        return match elements.pop() {
            Some((_, element)) => Ok(Conversion::Single(element)),
            None => Err(FrameError::InvalidData("Conversion produced no element".to_string())),
        };
    }

    let map_index: Vec<Dimension> = options.map_dims.iter().map(|d| source.dimension(d)).collect();
    let mut map = NdMapping::new(ContainerKind::ViewMap, map_index);
    for (key, element) in elements {
        map.insert(key, element);
    }
    Ok(Conversion::Map(map))
}

/// Collapse a group's observations to one value per value dimension.
fn reduce_observations(observations: &Matrix, reducer: Option<&Reducer>) -> Result<Vec<f64>> {
    let (_, n_values) = observations.shape();
    match reducer {
        Some(reducer) => {
            let reduced = reducer.reduce(observations, Axis::Rows);
            if reduced.shape() != (1, n_values) {
                return Err(FrameError::ReductionShape {
                    reducer: reducer.name().to_string(),
                    expected: (1, n_values),
                    got: reduced.shape(),
                });
            }
            Ok(reduced.as_slice().to_vec())
        }
        None => Ok(observations
            .row(0)
            .map(<[f64]>::to_vec)
            .unwrap_or_else(|| vec![f64::NAN; n_values])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{ColumnType, ColumnValue};
    use serde_json::json;

    fn kv() -> DataFrameView {
        DataFrameView::new(
            DataFrame::from_rows(
                &[("k", ColumnType::Int32, false), ("v", ColumnType::Int32, false)],
                vec![
                    vec![1.into(), 5.into()],
                    vec![1.into(), 9.into()],
                    vec![2.into(), 7.into()],
                ],
            )
            .unwrap(),
        )
    }

    fn sales() -> DataFrameView {
        DataFrameView::new(
            DataFrame::from_rows(
                &[
                    ("year", ColumnType::Int32, false),
                    ("region", ColumnType::String, false),
                    ("month", ColumnType::Int32, false),
                    ("units", ColumnType::Int32, true),
                    ("revenue", ColumnType::Float64, false),
                ],
                vec![
                    vec![2023.into(), "east".into(), 1.into(), 10.into(), 100.0.into()],
                    vec![2023.into(), "east".into(), 1.into(), 5.into(), 60.0.into()],
                    vec![2023.into(), "west".into(), 2.into(), 3.into(), 30.0.into()],
                    vec![2024.into(), "east".into(), 1.into(), ColumnValue::Null, 80.0.into()],
                    vec![2024.into(), "west".into(), 2.into(), 8.into(), 75.5.into()],
                ],
            )
            .unwrap(),
        )
    }

    fn key(values: Vec<ColumnValue>) -> GroupKey {
        GroupKey(values)
    }

    #[test]
    fn test_first_observation_without_reducer() {
        let table = kv()
            .table(ConvertOptions::new(["v"], ["k"]))
            .unwrap()
            .into_element()
            .unwrap();
        assert_eq!(table.kind(), ElementKind::Table);
        assert_eq!(table.table().get_scalar(&GroupKey::from(vec![1])), Some(5.0));
        assert_eq!(table.table().get_scalar(&GroupKey::from(vec![2])), Some(7.0));
    }

    #[test]
    fn test_sum_reducer() {
        let table = kv()
            .table(ConvertOptions::new(["v"], ["k"]).reduce(Reducer::sum()))
            .unwrap()
            .into_element()
            .unwrap();
        assert_eq!(table.table().get_scalar(&GroupKey::from(vec![1])), Some(14.0));
        assert_eq!(table.table().len(), 2);
    }

    #[test]
    fn test_rows_cover_every_key_once() {
        let view = sales();
        let element = view
            .heatmap(ConvertOptions::new(["revenue"], ["region", "month"]).reduce(Reducer::sum()))
            .unwrap()
            .into_element()
            .unwrap();
        let keys: Vec<String> = element.table().keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["(east, 1)", "(west, 2)"]);
        assert_eq!(
            element.table().get_scalar(&key(vec!["east".into(), 1.into()])),
            Some(240.0)
        );
    }

    #[test]
    fn test_map_dims_produce_one_element_per_group() {
        let view = sales();
        let map = view
            .bars(
                ConvertOptions::new(["units", "revenue"], ["region"])
                    .map_dims(["year"])
                    .reduce(Reducer::mean()),
            )
            .unwrap()
            .into_map()
            .unwrap();

        assert_eq!(map.kind(), ContainerKind::ViewMap);
        assert_eq!(map.index_dimensions(), &[Dimension::new("year")]);
        assert_eq!(map.len(), 2);

        let y2023 = map.get(&GroupKey::from(vec![2023])).unwrap();
        assert_eq!(y2023.kind(), ElementKind::Bars);
        assert_eq!(y2023.table().get(&GroupKey::from(vec!["east"])), Some(&[7.5, 80.0][..]));

        let y2024 = map.get(&GroupKey::from(vec![2024])).unwrap();
        let east = y2024.table().get(&GroupKey::from(vec!["east"])).unwrap();
        assert!(east[0].is_nan());
        assert_eq!(east[1], 80.0);
    }

    #[test]
    fn test_empty_view_dims_reduce_everything() {
        let element = kv()
            .table(ConvertOptions::new(["v"], Vec::<String>::new()).reduce(Reducer::max()))
            .unwrap()
            .into_element()
            .unwrap();
        assert_eq!(element.table().len(), 1);
        assert_eq!(element.table().get_scalar(&GroupKey::empty()), Some(9.0));
    }

    #[test]
    fn test_many_distinct_keys() {
        let n: i32 = 20_000;
        let frame = DataFrame::from_rows(
            &[("k", ColumnType::Int32, false), ("v", ColumnType::Int32, false)],
            (0..n).rev().map(|i| vec![i.into(), (i * 3).into()]).collect(),
        )
        .unwrap();
        let view = DataFrameView::new(frame);

        let element = view
            .table(ConvertOptions::new(["v"], ["k"]))
            .unwrap()
            .into_element()
            .unwrap();
        assert_eq!(element.table().len(), n as usize);
        assert_eq!(element.table().keys().next(), Some(&GroupKey::from(vec![0])));
        assert_eq!(element.table().get_scalar(&GroupKey::from(vec![n - 1])), Some(((n - 1) * 3) as f64));

        let map = view.viewmap(&["k"]).unwrap();
        assert_eq!(map.len(), n as usize);
        assert_eq!(map.get(&GroupKey::from(vec![42])).map(DataFrameView::len), Some(1));
    }

    #[test]
    fn test_empty_frame_yields_empty_table() {
        let empty = kv().select(&[("k", 99.into())]).unwrap();
        let element = empty
            .curve(ConvertOptions::new(["v"], ["k"]))
            .unwrap()
            .into_element()
            .unwrap();
        assert!(element.table().is_empty());
    }

    #[test]
    fn test_reducer_with_wrong_shape() {
        let total = Reducer::new("total", |m: &Matrix, _axis: Axis| {
            Matrix::from_vec(1, 1, vec![m.as_slice().iter().sum()]).unwrap()
        });
        let err = sales()
            .table(ConvertOptions::new(["units", "revenue"], ["region"]).reduce(total))
            .unwrap_err();
        assert_eq!(
            err,
            FrameError::ReductionShape {
                reducer: "total".to_string(),
                expected: (1, 2),
                got: (1, 1),
            }
        );
    }

    #[test]
    fn test_unknown_and_non_numeric_columns() {
        let view = sales();
        assert_eq!(
            view.table(ConvertOptions::new(["profit"], ["region"])).unwrap_err(),
            FrameError::UnknownDimension(vec!["profit".to_string()])
        );
        assert!(matches!(
            view.table(ConvertOptions::new(["region"], ["year"])),
            Err(FrameError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_kind_shape_checked_before_grouping() {
        let view = sales();
        assert!(matches!(
            view.curve(ConvertOptions::new(["units"], ["region", "month"])),
            Err(FrameError::IncompatibleShape { .. })
        ));
        assert!(matches!(
            view.vectorfield(ConvertOptions::new(["units"], ["region", "month"])),
            Err(FrameError::IncompatibleShape { .. })
        ));
        assert!(view
            .vectorfield(ConvertOptions::new(["units", "revenue"], ["region", "month"]))
            .is_ok());
    }

    #[test]
    fn test_dimension_metadata_and_options_carry_over() {
        let view = DataFrameView::with_dimensions(
            kv().dframe(),
            Some(vec![Dimension::new("k"), Dimension::with_unit("v", "kg")]),
            crate::options::ViewOptions::new().value("Mass"),
        )
        .unwrap();
        let element = view
            .scatter(ConvertOptions::new(["v"], ["k"]).option("color", json!("red")))
            .unwrap()
            .into_element()
            .unwrap();
        assert_eq!(element.table().value(), "Mass");
        assert_eq!(element.table().value_dimensions()[0].label(), "v (kg)");
        assert_eq!(element.option("color"), Some(&json!("red")));
    }

    #[test]
    fn test_points_element() {
        let view = sales();
        let points = view
            .points(ConvertOptions::new(["units"], ["month", "year"]).reduce(Reducer::count()))
            .unwrap();
        let element = points.as_element().unwrap();
        assert_eq!(element.kind(), ElementKind::Points);
        assert_eq!(element.table().get_scalar(&GroupKey::from(vec![1, 2024])), Some(0.0));
        assert!(points.as_map().is_none());
    }
}
