//! Radial profile extraction.
//!
//! Pixels are deprojected into the disk plane using the inclination and
//! position angle, then binned into annuli whose width is set by the beam:
//!
//! ```text
//! step = ceil(max(beam_major_px, beam_minor_px) * sampling_factor)
//! bins = 0, step, 2*step, ... < min(center_x, center_y)
//! ```
//!
//! Each bin reports the mean and population standard deviation of its
//! samples. Empty bins report `(0, 0)`.

use crate::config::RadialProfileConfig;
use crate::stats::{BinSamples, EmptyBinPolicy};
use radio_common::{AnalysisError, AngularUnit, RadioImage, Result};
use serde::Serialize;
use std::f64::consts::TAU;

/// Azimuth window in the deprojected frame, where angle zero lies along +x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AzimuthWindow {
    pub start: f64,
    pub end: f64,
}

impl AzimuthWindow {
    /// Convert a window measured from north (0° = up) into the frame used by
    /// the deprojection, rotating both ends by 90°.
    pub fn from_north(start: f64, end: f64) -> Self {
        Self {
            start: (start + 90.0).rem_euclid(360.0),
            end: (end + 90.0).rem_euclid(360.0),
        }
    }

    /// Closed-interval membership; a window whose start exceeds its end wraps
    /// through 0°.
    pub fn contains(&self, angle: f64) -> bool {
        if self.start <= self.end {
            self.start <= angle && angle <= self.end
        } else {
            angle >= self.start || angle <= self.end
        }
    }
}

/// Mean intensity per annulus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadialProfile {
    /// Inner edge of each annulus in arcsec
    pub radii: Vec<f64>,
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
    /// Samples collected per annulus
    pub counts: Vec<usize>,
    /// Annulus width in pixels
    pub step_px: usize,
}

impl RadialProfile {
    pub fn len(&self) -> usize {
        self.radii.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }
}

/// Extract the radial profile of `image` around its reference pixel.
///
/// Axes and beam are converted to arcsec on entry. Fails with `MissingBeam`
/// when the image has no beam and with `InvalidParameter` for a sampling
/// factor that yields an empty step or an edge-on inclination.
pub fn radial_profile(image: &RadioImage, config: &RadialProfileConfig) -> Result<RadialProfile> {
    let (beam_major, beam_minor) = image.geometry.beam_pixels("radial profile")?;
    let geometry = image.geometry.converted_to(AngularUnit::Arcsec)?;
    let axes = &geometry.axes;

    if !(0.0..90.0).contains(&config.inclination_deg) {
        return Err(AnalysisError::invalid_parameter(
            "inclination_deg",
            format!("{} is outside [0, 90)", config.inclination_deg),
        ));
    }

    let beam_size = beam_major.max(beam_minor);
    let step = (beam_size * config.sampling_factor).ceil();
    if !(step >= 1.0 && step.is_finite()) {
        return Err(AnalysisError::invalid_parameter(
            "sampling_factor",
            format!(
                "beam of {:.3} px with factor {} gives no usable step",
                beam_size, config.sampling_factor
            ),
        ));
    }
    let step = step as usize;

    let limit = axes.center_x.min(axes.center_y);
    let num_bins = if limit > 0.0 {
        (limit / step as f64).ceil() as usize
    } else {
        0
    };

    let window = config
        .azimuth
        .map(|(start, end)| AzimuthWindow::from_north(start, end));

    let (sin_pa, cos_pa) = (-config.position_angle_deg.to_radians()).sin_cos();
    let cos_inc = config.inclination_deg.to_radians().cos();

    let mut samples = BinSamples::new(num_bins);
    let mut dropped = 0usize;
    for (x, y, value) in image.grid.iter_pixels() {
        let dx = x as f64 - axes.center_x;
        let dy = y as f64 - axes.center_y;

        let x_rot = dx * cos_pa - dy * sin_pa;
        let y_rot = dx * sin_pa + dy * cos_pa;
        let y_deproj = y_rot / cos_inc;

        if let Some(window) = &window {
            let angle = y_deproj.atan2(x_rot).rem_euclid(TAU).to_degrees();
            if !window.contains(angle) {
                continue;
            }
        }

        let r = x_rot.hypot(y_deproj);
        let index = (r / step as f64).floor() as usize;
        if !samples.push(index, value) {
            dropped += 1;
        }
    }

    let reduction = samples.reduce(EmptyBinPolicy::Zero);
    let scale = axes.increment_x.abs();
    let radii = (0..num_bins)
        .map(|i| (i * step) as f64 * scale)
        .collect();

    let empty_bins = samples.empty_bins();
    if empty_bins > 0 && config.azimuth.is_none() {
        tracing::warn!(
            image = %image.name,
            empty_bins,
            step_px = step,
            "radial profile has annuli without samples"
        );
    }
    tracing::debug!(
        image = %image.name,
        bins = num_bins,
        step_px = step,
        empty_bins,
        dropped,
        "radial profile extracted"
    );

    Ok(RadialProfile {
        radii,
        mean: reduction.mean,
        std: reduction.std,
        counts: reduction.counts,
        step_px: step,
    })
}
