//! Pixel axis geometry and tick layout.

use crate::error::Result;
use crate::unit::AngularUnit;
use serde::{Deserialize, Serialize};

/// Pixel dimensions, reference pixel and angular increments of an image.
///
/// Increments are signed; right ascension usually decreases with pixel x, so
/// `increment_x` is typically negative. Anything that turns a length into
/// pixels uses the absolute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisGeometry {
    /// Number of pixels along x (columns)
    pub width: usize,
    /// Number of pixels along y (rows)
    pub height: usize,
    /// Reference pixel x coordinate
    pub center_x: f64,
    /// Reference pixel y coordinate
    pub center_y: f64,
    /// Angular size of one pixel along x
    pub increment_x: f64,
    /// Angular size of one pixel along y
    pub increment_y: f64,
    pub unit_x: AngularUnit,
    pub unit_y: AngularUnit,
    /// Axis name from the header, e.g. "Right Ascension"
    #[serde(default)]
    pub name_x: String,
    /// Axis name from the header, e.g. "Declination"
    #[serde(default)]
    pub name_y: String,
}

impl AxisGeometry {
    /// Create an axis geometry with both axes in the same unit and the
    /// reference pixel at the grid midpoint.
    pub fn new(width: usize, height: usize, increment_x: f64, increment_y: f64, unit: AngularUnit) -> Self {
        Self {
            width,
            height,
            center_x: width as f64 / 2.0,
            center_y: height as f64 / 2.0,
            increment_x,
            increment_y,
            unit_x: unit,
            unit_y: unit,
            name_x: String::new(),
            name_y: String::new(),
        }
    }

    /// Set the reference pixel.
    pub fn with_center(mut self, center_x: f64, center_y: f64) -> Self {
        self.center_x = center_x;
        self.center_y = center_y;
        self
    }

    /// Set the axis names.
    pub fn with_names(mut self, name_x: impl Into<String>, name_y: impl Into<String>) -> Self {
        self.name_x = name_x.into();
        self.name_y = name_y.into();
        self
    }

    /// Return a copy with both increments expressed in `unit`.
    pub fn converted_to(&self, unit: AngularUnit) -> Result<Self> {
        let fx = self.unit_x.factor_to(unit)?;
        let fy = self.unit_y.factor_to(unit)?;
        Ok(Self {
            increment_x: self.increment_x * fx,
            increment_y: self.increment_y * fy,
            unit_x: unit,
            unit_y: unit,
            ..self.clone()
        })
    }

    /// Tick positions and labels for both axes.
    pub fn ticks(&self, config: &TickConfig) -> TickLayout {
        TickLayout {
            x: axis_ticks(self.width, self.increment_x, config.x_span, config.precision),
            y: axis_ticks(self.height, self.increment_y, config.y_span, config.precision),
            x_title: axis_title(&self.name_x, self.unit_x),
            y_title: axis_title(&self.name_y, self.unit_y),
        }
    }
}

/// Tick layout options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Extra ticks on each side of the x-axis midpoint
    pub x_span: usize,
    /// Extra ticks on each side of the y-axis midpoint
    pub y_span: usize,
    /// Decimal places in tick labels
    pub precision: usize,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            x_span: 2,
            y_span: 2,
            precision: 3,
        }
    }
}

/// Ticks along a single axis. Positions are in pixels, labels are offsets
/// from the image center in angular units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTicks {
    pub positions: Vec<f64>,
    pub labels: Vec<String>,
}

/// Ticks and titles for both axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickLayout {
    pub x: AxisTicks,
    pub y: AxisTicks,
    pub x_title: String,
    pub y_title: String,
}

/// Ticks at the lower edge and the midpoint, plus `span` evenly spaced ticks
/// on each side of the midpoint.
fn axis_ticks(extent: usize, increment: f64, span: usize, precision: usize) -> AxisTicks {
    let n = extent as f64;
    let mid = n / 2.0;
    let label_start = -mid * increment;
    let label_end = mid * increment;
    let parts = (span + 1) as f64;

    let mut positions = vec![0.0, mid];
    let mut values = vec![label_start, 0.0];
    for i in 1..=span {
        let t = i as f64 / parts;
        positions.push(mid * t);
        values.push(-label_start * t + label_start);
        positions.push((mid - n) * t + n);
        values.push(-label_end * t + label_end);
    }

    let labels = values
        .iter()
        .map(|v| format!("{:.*}", precision, v))
        .collect();

    AxisTicks { positions, labels }
}

fn axis_title(name: &str, unit: AngularUnit) -> String {
    format!("{} [{}]", name, unit.symbol())
}
