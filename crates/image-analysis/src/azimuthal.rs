//! Azimuthal profile along a ring of fixed radius.

use crate::config::AzimuthalProfileConfig;
use crate::stats::{BinSamples, EmptyBinPolicy};
use radio_common::{AnalysisError, AngularUnit, RadioImage, Result};
use serde::Serialize;

/// Smallest accepted sector width, one arcsecond.
pub const MIN_STEP_DEG: f64 = 1.0 / 3600.0;

/// Mean intensity per angular sector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AzimuthalProfile {
    /// Sector centers in degrees east of north, all in `[0, 360)`
    pub angles: Vec<f64>,
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
    /// Samples collected per sector
    pub counts: Vec<usize>,
    /// Sector width in degrees
    pub step_deg: f64,
}

impl AzimuthalProfile {
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }
}

/// Angle bins `0, step, 2*step, ...` strictly below 360°.
pub fn angle_bins(step_deg: f64) -> Vec<f64> {
    let count = (360.0 / step_deg).ceil() as usize;
    (0..count)
        .map(|k| k as f64 * step_deg)
        .take_while(|&a| a < 360.0)
        .collect()
}

/// Index of the bin closest to `angle`; the first of equally close bins wins.
fn nearest_bin(bins: &[f64], angle: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &b) in bins.iter().enumerate() {
        let d = (b - angle).abs();
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

/// Extract the azimuthal profile of `image` on a ring of
/// `config.radius_arcsec` around the grid midpoint.
///
/// The ring is one beam wide. Angles are measured from north (up) through
/// east and each accepted pixel goes to the nearest angle bin. Empty sectors
/// report NaN.
pub fn azimuthal_profile(
    image: &RadioImage,
    config: &AzimuthalProfileConfig,
) -> Result<AzimuthalProfile> {
    let (beam_major, beam_minor) = image.geometry.beam_pixels("azimuthal profile")?;
    let geometry = image.geometry.converted_to(AngularUnit::Arcsec)?;

    let center_x = (image.width() / 2) as f64;
    let center_y = (image.height() / 2) as f64;

    let beam_size = beam_major.max(beam_minor);
    let radius_px = config.radius_arcsec / geometry.axes.increment_x.abs();
    if !(radius_px > 0.0 && radius_px.is_finite()) {
        return Err(AnalysisError::invalid_parameter(
            "radius_arcsec",
            format!("{} does not map to a positive pixel radius", config.radius_arcsec),
        ));
    }

    let step_deg = (beam_size * config.sampling_factor / radius_px).to_degrees();
    if !(step_deg >= MIN_STEP_DEG && step_deg.is_finite()) {
        return Err(AnalysisError::invalid_parameter(
            "sampling_factor",
            format!(
                "angular step {} deg is below the {} deg minimum",
                step_deg, MIN_STEP_DEG
            ),
        ));
    }

    let angles = angle_bins(step_deg);
    let r_min = radius_px - beam_size / 2.0;
    let r_max = radius_px + beam_size / 2.0;

    let mut samples = BinSamples::new(angles.len());
    for (x, y, value) in image.grid.iter_pixels() {
        let dx = x as f64 - center_x;
        let dy = y as f64 - center_y;
        let dist = dx.hypot(dy);
        if dist < r_min || dist > r_max {
            continue;
        }
        let angle = (dy.atan2(dx).to_degrees() - 90.0).rem_euclid(360.0);
        if let Some(index) = nearest_bin(&angles, angle) {
            samples.push(index, value);
        }
    }

    let reduction = samples.reduce(EmptyBinPolicy::Nan);

    tracing::debug!(
        image = %image.name,
        bins = angles.len(),
        step_deg,
        radius_px,
        empty_bins = samples.empty_bins(),
        "azimuthal profile extracted"
    );

    Ok(AzimuthalProfile {
        angles,
        mean: reduction.mean,
        std: reduction.std,
        counts: reduction.counts,
        step_deg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_bins_exact_division() {
        let bins = angle_bins(90.0);
        assert_eq!(bins, vec![0.0, 90.0, 180.0, 270.0]);
    }

    #[test]
    fn test_angle_bins_partial_last_sector() {
        let bins = angle_bins(100.0);
        assert_eq!(bins, vec![0.0, 100.0, 200.0, 300.0]);
        assert!(bins.iter().all(|&a| (0.0..360.0).contains(&a)));
    }

    #[test]
    fn test_nearest_bin_first_minimum_wins() {
        let bins = [0.0, 90.0, 180.0, 270.0];
        assert_eq!(nearest_bin(&bins, 45.0), Some(0));
        assert_eq!(nearest_bin(&bins, 46.0), Some(1));
        assert_eq!(nearest_bin(&bins, 359.0), Some(3));
        assert_eq!(nearest_bin(&[], 10.0), None);
    }
}
