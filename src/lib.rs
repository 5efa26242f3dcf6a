/// FrameView - Dimensioned Views over Columnar Frames
///
/// Wraps a columnar data frame in a view whose columns act as named index
/// dimensions. Views can be sliced by dimension, transformed with named frame
/// operations, split into overlays, layouts and maps, and reshaped into keyed
/// tables and chart elements with optional reduction.

pub mod column;
pub mod container;
pub mod convert;
pub mod dimension;
pub mod element;
pub mod error;
pub mod frame;
pub mod ops;
pub mod options;
pub mod reduce;
pub mod view;

pub use column::{Column, ColumnType, ColumnValue};
pub use container::{ContainerKind, NdMapping, DEFAULT_LAYOUT_COLS};
pub use convert::{Conversion, ConvertOptions, TableConverter};
pub use dimension::{Dimension, GroupKey, Selector};
pub use element::{Element, ElementKind, ElementOptions, Table};
pub use error::{FrameError, Result};
pub use frame::DataFrame;
pub use ops::{Operation, OperationRegistry};
pub use options::{PlotType, ViewOptions, DEFAULT_VALUE_LABEL};
pub use reduce::{Axis, Matrix, Reducer};
pub use view::DataFrameView;
