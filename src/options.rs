/// View configuration
///
/// `ViewOptions` carries the presentation settings of a `DataFrameView`:
/// which columns feed the x/y axes, explicit axis bounds, the plot type a
/// renderer should use and the label describing the view's values. It can
/// be built in code or deserialized from JSON.

use crate::error::{FrameError, Result};
use serde::{Deserialize, Serialize};

/// Renderer plot style for a frame view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotType {
    Plot,
    Boxplot,
    Hist,
    ScatterMatrix,
    AutocorrelationPlot,
}

impl PlotType {
    /// Parse a plot type from a string.
    ///
    /// Accepts: "plot", "boxplot", "hist", "scatter_matrix", "autocorrelation_plot"
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "plot" => Ok(PlotType::Plot),
            "boxplot" => Ok(PlotType::Boxplot),
            "hist" | "histogram" => Ok(PlotType::Hist),
            "scatter_matrix" | "scattermatrix" => Ok(PlotType::ScatterMatrix),
            "autocorrelation_plot" | "autocorrelation" => Ok(PlotType::AutocorrelationPlot),
            _ => Err(FrameError::InvalidArgument {
                operation: "plot_type".to_string(),
                message: format!(
                    "Unknown plot type: '{}'. Use 'plot', 'boxplot', 'hist', \
                     'scatter_matrix' or 'autocorrelation_plot'",
                    s
                ),
            }),
        }
    }
}

/// Label used for a view's values unless configured otherwise.
pub const DEFAULT_VALUE_LABEL: &str = "DFrame";

fn default_value_label() -> String {
    DEFAULT_VALUE_LABEL.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    /// Column visualized along the x-axis.
    pub x: Option<String>,
    /// Column visualized along a second dependent axis.
    pub x2: Option<String>,
    /// Column visualized along the y-axis.
    pub y: Option<String>,
    pub plot_type: Option<PlotType>,
    #[serde(default = "default_value_label")]
    pub value: String,
    /// Explicit x bounds, taking precedence over the data.
    pub xlim: Option<(f64, f64)>,
    /// Explicit y bounds, taking precedence over the data.
    pub ylim: Option<(f64, f64)>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        ViewOptions {
            x: None,
            x2: None,
            y: None,
            plot_type: None,
            value: default_value_label(),
            xlim: None,
            ylim: None,
        }
    }
}

impl ViewOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON object. Missing fields take their defaults.
    ///
    /// ```
    /// use frameview::{PlotType, ViewOptions};
    ///
    /// let opts = ViewOptions::from_json(r#"{"x": "time", "plot_type": "hist"}"#).unwrap();
    /// assert_eq!(opts.x.as_deref(), Some("time"));
    /// assert_eq!(opts.plot_type, Some(PlotType::Hist));
    /// assert_eq!(opts.value, "DFrame");
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| FrameError::InvalidData(format!("Invalid view options: {}", e)))
    }

    pub fn x(mut self, column: impl Into<String>) -> Self {
        self.x = Some(column.into());
        self
    }

    pub fn x2(mut self, column: impl Into<String>) -> Self {
        self.x2 = Some(column.into());
        self
    }

    pub fn y(mut self, column: impl Into<String>) -> Self {
        self.y = Some(column.into());
        self
    }

    pub fn plot_type(mut self, plot_type: PlotType) -> Self {
        self.plot_type = Some(plot_type);
        self
    }

    pub fn value(mut self, label: impl Into<String>) -> Self {
        self.value = label.into();
        self
    }

    pub fn xlim(mut self, lo: f64, hi: f64) -> Self {
        self.xlim = Some((lo, hi));
        self
    }

    pub fn ylim(mut self, lo: f64, hi: f64) -> Self {
        self.ylim = Some((lo, hi));
        self
    }
}
