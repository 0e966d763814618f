//! Pixel grids and image cubes.

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// A 2-D grid of intensities.
///
/// Row-major with row 0 at the bottom, matching a raster drawn with its
/// origin in the lower-left corner. `get(x, y)` addresses column `x` of row
/// `y`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelGrid {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl PixelGrid {
    /// Create a grid, checking that `data` holds exactly `width * height`
    /// samples.
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> Result<Self> {
        if data.len() != width * height {
            return Err(AnalysisError::ShapeMismatch {
                expected: format!("{} samples ({}x{})", width * height, width, height),
                actual: format!("{} samples", data.len()),
            });
        }
        Ok(Self { data, width, height })
    }

    /// A grid with every sample set to `value`.
    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Sample at column `x`, row `y`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Sample at column `x`, row `y`. Callers guarantee the bounds.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = value;
        }
    }

    /// Iterate `(x, y, value)` in row-major order.
    pub fn iter_pixels(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        let width = self.width;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i % width, i / width, v))
    }

    /// Fail with `ShapeMismatch` unless `other` has the same dimensions.
    pub fn ensure_same_shape(&self, other: &PixelGrid) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(AnalysisError::shape_mismatch(self.shape(), other.shape()));
        }
        Ok(())
    }

    /// Smallest sample, ignoring NaN. `None` for an empty or all-NaN grid.
    pub fn min(&self) -> Option<f32> {
        self.data
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f32| m.min(v))))
    }

    /// Largest sample, ignoring NaN. `None` for an empty or all-NaN grid.
    pub fn max(&self) -> Option<f32> {
        self.data
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f32| m.max(v))))
    }

    /// A new grid with every sample multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            data: self.data.iter().map(|v| v * factor).collect(),
            width: self.width,
            height: self.height,
        }
    }

    /// Pixel-wise `self - other`.
    pub fn difference(&self, other: &PixelGrid) -> Result<Self> {
        self.ensure_same_shape(other)?;
        Ok(Self {
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| a - b)
                .collect(),
            width: self.width,
            height: self.height,
        })
    }

    /// Cut a window of the requested size out of the middle of the grid.
    ///
    /// A size that is `None`, zero or larger than the grid falls back to the
    /// full extent along that axis. The window starts at
    /// `((W - w) / 2, (H - h) / 2)`.
    pub fn crop_centered(&self, width: Option<usize>, height: Option<usize>) -> Self {
        let (w, h) = view_size(self.width, self.height, width, height);
        let left = (self.width - w) / 2;
        let bottom = (self.height - h) / 2;

        let mut data = Vec::with_capacity(w * h);
        for y in bottom..bottom + h {
            let row = y * self.width;
            data.extend_from_slice(&self.data[row + left..row + left + w]);
        }
        Self {
            data,
            width: w,
            height: h,
        }
    }
}

/// Resolve a requested view size against the full image size.
pub fn view_size(
    full_width: usize,
    full_height: usize,
    width: Option<usize>,
    height: Option<usize>,
) -> (usize, usize) {
    let pick = |req: Option<usize>, full: usize| match req {
        Some(n) if n > 0 && n <= full => n,
        _ => full,
    };
    (pick(width, full_width), pick(height, full_height))
}

/// An image cube laid out as (stokes, channel, y, x).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelCube {
    data: Vec<f32>,
    nstokes: usize,
    nchan: usize,
    width: usize,
    height: usize,
}

impl PixelCube {
    /// Create a cube, checking the sample count against the shape.
    pub fn new(
        data: Vec<f32>,
        nstokes: usize,
        nchan: usize,
        width: usize,
        height: usize,
    ) -> Result<Self> {
        let expected = nstokes * nchan * width * height;
        if data.len() != expected {
            return Err(AnalysisError::ShapeMismatch {
                expected: format!(
                    "{} samples ({}x{}x{}x{})",
                    expected, nstokes, nchan, height, width
                ),
                actual: format!("{} samples", data.len()),
            });
        }
        Ok(Self {
            data,
            nstokes,
            nchan,
            width,
            height,
        })
    }

    /// A single-Stokes cube from per-channel planes.
    pub fn from_channels(channels: Vec<PixelGrid>) -> Result<Self> {
        let Some(first) = channels.first() else {
            return Err(AnalysisError::invalid_parameter(
                "channels",
                "a cube needs at least one channel",
            ));
        };
        let (width, height) = first.shape();
        let nchan = channels.len();
        let mut data = Vec::with_capacity(nchan * width * height);
        for plane in &channels {
            first.ensure_same_shape(plane)?;
            data.extend_from_slice(plane.data());
        }
        Self::new(data, 1, nchan, width, height)
    }

    pub fn nstokes(&self) -> usize {
        self.nstokes
    }

    pub fn nchan(&self) -> usize {
        self.nchan
    }

    /// Spatial `(width, height)` of every plane.
    pub fn plane_shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// More than one spectral channel.
    pub fn is_cube(&self) -> bool {
        self.nchan > 1
    }

    /// Extract the plane for one Stokes parameter and channel.
    pub fn plane(&self, stokes: usize, chan: usize) -> Result<PixelGrid> {
        if stokes >= self.nstokes {
            return Err(AnalysisError::invalid_parameter(
                "stokes",
                format!("index {} out of bounds for {} stokes", stokes, self.nstokes),
            ));
        }
        if chan >= self.nchan {
            return Err(AnalysisError::invalid_parameter(
                "chan",
                format!("index {} out of bounds for {} channels", chan, self.nchan),
            ));
        }
        let plane_len = self.width * self.height;
        let start = (stokes * self.nchan + chan) * plane_len;
        PixelGrid::new(
            self.data[start..start + plane_len].to_vec(),
            self.width,
            self.height,
        )
    }

    /// Plane of the first Stokes parameter for `chan`.
    pub fn channel(&self, chan: usize) -> Result<PixelGrid> {
        self.plane(0, chan)
    }
}
