//! The decoded image handed over by an external loader.

use crate::error::{AnalysisError, Result};
use crate::geometry::GridGeometry;
use crate::grid::{view_size, PixelCube, PixelGrid};
use crate::unit::AngularUnit;
use serde::{Deserialize, Serialize};

/// Descriptive header fields carried alongside the pixels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    /// Kind of image, e.g. "Intensity"
    #[serde(default)]
    pub image_type: String,
    /// Brightness unit, e.g. "Jy/beam"
    #[serde(default)]
    pub data_unit: String,
}

/// One 2-D plane of a radio image with its geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadioImage {
    pub name: String,
    pub grid: PixelGrid,
    pub geometry: GridGeometry,
    #[serde(default)]
    pub metadata: ImageMetadata,
}

impl RadioImage {
    /// Create an image, checking that the grid matches the axis dimensions.
    pub fn new(name: impl Into<String>, grid: PixelGrid, geometry: GridGeometry) -> Result<Self> {
        let axes_shape = (geometry.axes.width, geometry.axes.height);
        if grid.shape() != axes_shape {
            return Err(AnalysisError::shape_mismatch(axes_shape, grid.shape()));
        }
        Ok(Self {
            name: name.into(),
            grid,
            geometry,
            metadata: ImageMetadata::default(),
        })
    }

    /// Select one Stokes/channel plane of a cube.
    pub fn from_cube(
        name: impl Into<String>,
        cube: &PixelCube,
        stokes: usize,
        chan: usize,
        geometry: GridGeometry,
    ) -> Result<Self> {
        Self::new(name, cube.plane(stokes, chan)?, geometry)
    }

    /// Decode a JSON dump produced by the loader and validate its shape.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RadioImage = serde_json::from_str(json)?;
        let (width, height) = raw.grid.shape();
        let grid = PixelGrid::new(raw.grid.into_data(), width, height)?;
        let mut image = Self::new(raw.name, grid, raw.geometry)?;
        image.metadata = raw.metadata;
        Ok(image)
    }

    pub fn with_metadata(mut self, metadata: ImageMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Return a copy with axes and beam expressed in `unit`.
    pub fn with_axes_unit(&self, unit: AngularUnit) -> Result<Self> {
        Ok(Self {
            geometry: self.geometry.converted_to(unit)?,
            ..self.clone()
        })
    }

    /// Crop to a centered view; the reference pixel moves with the window.
    pub fn view(&self, width: Option<usize>, height: Option<usize>) -> Self {
        let (full_w, full_h) = self.grid.shape();
        let (w, h) = view_size(full_w, full_h, width, height);
        let left = ((full_w - w) / 2) as f64;
        let bottom = ((full_h - h) / 2) as f64;

        let mut geometry = self.geometry.clone();
        geometry.axes.width = w;
        geometry.axes.height = h;
        geometry.axes.center_x -= left;
        geometry.axes.center_y -= bottom;

        Self {
            name: self.name.clone(),
            grid: self.grid.crop_centered(width, height),
            geometry,
            metadata: self.metadata.clone(),
        }
    }

    /// Pixel-wise difference against another image of the same shape.
    pub fn difference(&self, other: &RadioImage) -> Result<PixelGrid> {
        self.grid.difference(&other.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisGeometry;
    use crate::beam::BeamShape;

    fn geometry(width: usize, height: usize) -> GridGeometry {
        GridGeometry::new(
            AxisGeometry::new(width, height, -0.1, 0.1, AngularUnit::Arcsec),
            Some(BeamShape::new(0.5, 0.4, 10.0, AngularUnit::Arcsec)),
        )
    }

    #[test]
    fn test_new_checks_axes_shape() {
        let grid = PixelGrid::filled(4, 4, 0.0);
        assert!(RadioImage::new("a", grid.clone(), geometry(4, 4)).is_ok());
        assert!(matches!(
            RadioImage::new("a", grid, geometry(5, 4)),
            Err(AnalysisError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_json_round_trip_validates_samples() {
        let image = RadioImage::new("disk", PixelGrid::filled(3, 2, 1.5), geometry(3, 2)).unwrap();
        let json = serde_json::to_string(&image).unwrap();
        let decoded = RadioImage::from_json(&json).unwrap();
        assert_eq!(decoded, image);

        let broken = json.replace("\"width\":3", "\"width\":4");
        assert!(RadioImage::from_json(&broken).is_err());
    }

    #[test]
    fn test_view_moves_reference_pixel() {
        let image = RadioImage::new("a", PixelGrid::filled(10, 8, 0.0), geometry(10, 8)).unwrap();
        let view = image.view(Some(4), Some(4));
        assert_eq!(view.grid.shape(), (4, 4));
        assert_eq!(view.geometry.axes.width, 4);
        assert_eq!(view.geometry.axes.center_x, 5.0 - 3.0);
        assert_eq!(view.geometry.axes.center_y, 4.0 - 2.0);
    }
}
