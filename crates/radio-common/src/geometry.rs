//! Axis geometry combined with the optional beam.

use crate::axis::AxisGeometry;
use crate::beam::{BeamOverlay, BeamShape};
use crate::error::{AnalysisError, Result};
use crate::unit::{self, AngularUnit};
use serde::{Deserialize, Serialize};

/// Convert a beam axis length into pixels along an axis with the given
/// per-pixel increment. Both values must already share a unit.
pub fn beam_size_in_pixels(length: f64, axis_increment: f64) -> f64 {
    length / axis_increment.abs()
}

/// Look up the factor converting `from` into `to` in the fixed unit table.
pub fn convert_unit(from: &str, to: &str) -> Result<f64> {
    unit::conversion_factor(from, to)
}

/// Geometry shared by every profiling and detection routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    pub axes: AxisGeometry,
    #[serde(default)]
    pub beam: Option<BeamShape>,
}

impl GridGeometry {
    pub fn new(axes: AxisGeometry, beam: Option<BeamShape>) -> Self {
        Self { axes, beam }
    }

    /// The beam, or `MissingBeam` naming the operation that needed it.
    pub fn beam(&self, operation: &str) -> Result<&BeamShape> {
        self.beam
            .as_ref()
            .ok_or_else(|| AnalysisError::missing_beam(operation))
    }

    /// Return a copy with axes and beam expressed in `unit`.
    pub fn converted_to(&self, unit: AngularUnit) -> Result<Self> {
        let axes = self.axes.converted_to(unit)?;
        let beam = match &self.beam {
            Some(beam) => Some(beam.converted_to(unit)?),
            None => None,
        };
        Ok(Self { axes, beam })
    }

    /// Beam major and minor axes in pixels.
    ///
    /// The major axis is scaled by the x increment and the minor axis by the
    /// y increment. Axes and beam are brought to arcsec first.
    pub fn beam_pixels(&self, operation: &str) -> Result<(f64, f64)> {
        self.beam(operation)?;
        let arcsec = self.converted_to(AngularUnit::Arcsec)?;
        let beam = arcsec.beam(operation)?;
        Ok((
            beam_size_in_pixels(beam.major, arcsec.axes.increment_x),
            beam_size_in_pixels(beam.minor, arcsec.axes.increment_y),
        ))
    }

    /// Area of the Gaussian beam in pixels, `π·maj·min / (4 ln 2)`.
    pub fn beam_area_pixels(&self, operation: &str) -> Result<f64> {
        let (major, minor) = self.beam_pixels(operation)?;
        Ok(std::f64::consts::PI * major * minor / (4.0 * std::f64::consts::LN_2))
    }

    /// Beam ellipse anchored at one eighth of the image extent from the
    /// lower-left corner.
    pub fn beam_overlay(&self) -> Result<BeamOverlay> {
        let (width, height) = self.beam_pixels("beam overlay")?;
        let position_angle = self.beam("beam overlay")?.position_angle;
        Ok(BeamOverlay {
            center_x: self.axes.width as f64 / 8.0,
            center_y: self.axes.height as f64 / 8.0,
            width,
            height,
            angle: 90.0 + position_angle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(beam: Option<BeamShape>) -> GridGeometry {
        GridGeometry::new(
            AxisGeometry::new(80, 40, -0.1, 0.1, AngularUnit::Arcsec),
            beam,
        )
    }

    #[test]
    fn test_beam_size_uses_absolute_increment() {
        assert!((beam_size_in_pixels(2.0, -0.1) - 20.0).abs() < 1e-9);
        assert!((beam_size_in_pixels(2.0, 0.1) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_beam_pixels() {
        let geo = geometry(Some(BeamShape::new(1.0, 0.5, 0.0, AngularUnit::Arcsec)));
        let (major, minor) = geo.beam_pixels("test").unwrap();
        assert!((major - 10.0).abs() < 1e-9);
        assert!((minor - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_beam_is_explicit() {
        let geo = geometry(None);
        assert!(matches!(
            geo.beam_pixels("radial profile"),
            Err(AnalysisError::MissingBeam(op)) if op == "radial profile"
        ));
        assert!(geo.beam_overlay().is_err());
    }

    #[test]
    fn test_beam_overlay_anchor_and_angle() {
        let geo = geometry(Some(BeamShape::new(1.0, 0.5, 30.0, AngularUnit::Arcsec)));
        let overlay = geo.beam_overlay().unwrap();
        assert_eq!(overlay.center_x, 10.0);
        assert_eq!(overlay.center_y, 5.0);
        assert!((overlay.width - 10.0).abs() < 1e-9);
        assert!((overlay.height - 5.0).abs() < 1e-9);
        assert_eq!(overlay.angle, 120.0);
    }

    #[test]
    fn test_beam_area() {
        let geo = geometry(Some(BeamShape::new(1.0, 1.0, 0.0, AngularUnit::Arcsec)));
        let area = geo.beam_area_pixels("test").unwrap();
        assert!((area - 113.309).abs() < 1e-3);
    }
}
