//! Restoring beam shape and its overlay ellipse.

use crate::error::Result;
use crate::unit::AngularUnit;
use serde::{Deserialize, Serialize};

/// Elliptical restoring beam.
///
/// `major` and `minor` are full widths (FWHM) in `unit`; the position angle
/// is in degrees, measured east of north.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamShape {
    pub major: f64,
    pub minor: f64,
    pub position_angle: f64,
    pub unit: AngularUnit,
}

impl BeamShape {
    pub fn new(major: f64, minor: f64, position_angle: f64, unit: AngularUnit) -> Self {
        Self {
            major,
            minor,
            position_angle,
            unit,
        }
    }

    /// Return a copy with the axis lengths expressed in `unit`.
    pub fn converted_to(&self, unit: AngularUnit) -> Result<Self> {
        let factor = self.unit.factor_to(unit)?;
        Ok(Self {
            major: self.major * factor,
            minor: self.minor * factor,
            position_angle: self.position_angle,
            unit,
        })
    }
}

/// Ellipse describing where and how to draw the beam on a raster.
///
/// Coordinates are pixels; `angle` is in degrees counter-clockwise from +x,
/// so a beam with position angle 0 is drawn with its major axis vertical.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BeamOverlay {
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
    pub angle: f64,
}

impl BeamOverlay {
    /// Pixel offsets of `samples` points along the ellipse outline, for hosts
    /// that draw polylines rather than ellipse primitives.
    pub fn outline(&self, samples: usize) -> Vec<(f64, f64)> {
        let (sin_a, cos_a) = self.angle.to_radians().sin_cos();
        let a = self.width / 2.0;
        let b = self.height / 2.0;
        (0..samples)
            .map(|k| {
                let t = std::f64::consts::TAU * k as f64 / samples as f64;
                let (u, v) = (a * t.cos(), b * t.sin());
                (
                    self.center_x + u * cos_a - v * sin_a,
                    self.center_y + u * sin_a + v * cos_a,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beam_conversion_keeps_angle() {
        let rad = 1.0 / crate::unit::ARCSEC_PER_RAD;
        let beam = BeamShape::new(2.0 * rad, rad, 30.0, AngularUnit::Rad);
        let arcsec = beam.converted_to(AngularUnit::Arcsec).unwrap();
        assert!((arcsec.major - 2.0).abs() < 1e-9);
        assert!((arcsec.minor - 1.0).abs() < 1e-9);
        assert_eq!(arcsec.position_angle, 30.0);
    }

    #[test]
    fn test_outline_vertical_major_axis() {
        let overlay = BeamOverlay {
            center_x: 10.0,
            center_y: 10.0,
            width: 4.0,
            height: 2.0,
            angle: 90.0,
        };
        let points = overlay.outline(4);
        assert_eq!(points.len(), 4);
        // First point lies along the major axis, which is rotated to +y.
        assert!((points[0].0 - 10.0).abs() < 1e-9);
        assert!((points[0].1 - 12.0).abs() < 1e-9);
    }
}
