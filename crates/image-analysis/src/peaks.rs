//! Local maximum detection.
//!
//! A pixel is a peak when no sample in its neighborhood is larger. Only
//! centers whose whole neighborhood lies inside the grid are scanned, so
//! reported coordinates always satisfy `half_x <= x < width - half_x` and
//! `half_y <= y < height - half_y`.
//!
//! Plateaus are not collapsed: every co-maximal center reports itself, and a
//! constant grid reports every interior pixel.

use crate::config::{FootprintKind, PeakConfig};
use radio_common::{AnalysisError, GridGeometry, PixelGrid, RadioImage, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Offsets examined around each candidate, plus their bounding half-widths.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighborhood {
    pub half_x: usize,
    pub half_y: usize,
    /// `(dx, dy)` offsets, always including `(0, 0)`
    pub offsets: Vec<(isize, isize)>,
}

impl Neighborhood {
    /// A `cell x cell` square. `cell` must be odd, at least 3 and no larger
    /// than either grid dimension.
    pub fn square(cell: usize, width: usize, height: usize) -> Result<Self> {
        if cell % 2 == 0 || cell < 3 || cell > width || cell > height {
            return Err(AnalysisError::invalid_neighborhood(format!(
                "cell must be an odd integer >= 3, <= width ({}) and <= height ({}), got {}",
                width, height, cell
            )));
        }
        let half = (cell / 2) as isize;
        let offsets = (-half..=half)
            .flat_map(|dy| (-half..=half).map(move |dx| (dx, dy)))
            .collect();
        Ok(Self {
            half_x: cell / 2,
            half_y: cell / 2,
            offsets,
        })
    }

    /// An elliptical footprint shaped like the restoring beam.
    ///
    /// The half-widths are the beam's semi-major axis projected onto x and y
    /// through the position angle, truncated and increased by one. Offsets
    /// inside that box are kept when they fall inside the beam ellipse, whose
    /// major axis points `90° + PA` counter-clockwise from +x.
    pub fn from_beam(geometry: &GridGeometry, width: usize, height: usize) -> Result<Self> {
        let (major, minor) = geometry.beam_pixels("beam-shaped peak neighborhood")?;
        let pa = geometry.beam("beam-shaped peak neighborhood")?.position_angle.to_radians();
        let a = major / 2.0;
        let b = minor / 2.0;
        if !(a > 0.0 && b > 0.0 && a.is_finite() && b.is_finite()) {
            return Err(AnalysisError::invalid_neighborhood(format!(
                "beam of {:.3} x {:.3} px has no usable footprint",
                major, minor
            )));
        }

        let (sin_pa, cos_pa) = pa.sin_cos();
        // Bounded in f64 first; a huge beam must not overflow the casts.
        let half_x = (a * sin_pa).abs().trunc() + 1.0;
        let half_y = (a * cos_pa).abs().trunc() + 1.0;
        let max_half_x = (width.saturating_sub(1) / 2) as f64;
        let max_half_y = (height.saturating_sub(1) / 2) as f64;
        if half_x > max_half_x || half_y > max_half_y {
            return Err(AnalysisError::invalid_neighborhood(format!(
                "beam footprint {}x{} does not fit a {}x{} grid",
                2.0 * half_x + 1.0,
                2.0 * half_y + 1.0,
                width,
                height
            )));
        }
        let half_x = half_x as usize;
        let half_y = half_y as usize;

        // Unit vectors along the major and minor axes.
        let (ux, uy) = (-sin_pa, cos_pa);
        let (vx, vy) = (cos_pa, sin_pa);

        let hx = half_x as isize;
        let hy = half_y as isize;
        let mut offsets = Vec::new();
        for dy in -hy..=hy {
            for dx in -hx..=hx {
                let (fx, fy) = (dx as f64, dy as f64);
                let along = (fx * ux + fy * uy) / a;
                let across = (fx * vx + fy * vy) / b;
                if (dx == 0 && dy == 0) || along * along + across * across <= 1.0 {
                    offsets.push((dx, dy));
                }
            }
        }

        Ok(Self {
            half_x,
            half_y,
            offsets,
        })
    }

    /// Full width and height of the bounding box.
    pub fn extent(&self) -> (usize, usize) {
        (2 * self.half_x + 1, 2 * self.half_y + 1)
    }
}

/// Detected peaks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakReport {
    /// `(x, y)` of each peak in row-major scan order
    pub coordinates: Vec<(usize, usize)>,
    /// Peak value keyed by `(x, y)`, after any normalization
    #[serde(serialize_with = "serialize_peak_values")]
    pub values: BTreeMap<(usize, usize), f32>,
    /// Neighborhood used for the search
    pub footprint: Neighborhood,
    /// Factor the grid was multiplied by before scanning
    pub scale_factor: f32,
}

impl PeakReport {
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        self.values.get(&(x, y)).copied()
    }
}

/// JSON object keys must be strings, so the map is written as a list.
fn serialize_peak_values<S>(
    values: &BTreeMap<(usize, usize), f32>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq;
    let mut seq = serializer.serialize_seq(Some(values.len()))?;
    for (&(x, y), &value) in values {
        seq.serialize_element(&(x, y, value))?;
    }
    seq.end()
}

/// Find local maxima of `grid` in a `cell x cell` square neighborhood.
///
/// When `mask` is given it must match the grid dimensions, and only pixels
/// where the mask is `> 0` can be peaks.
pub fn detect_peaks(grid: &PixelGrid, mask: Option<&PixelGrid>, cell: usize) -> Result<PeakReport> {
    let neighborhood = Neighborhood::square(cell, grid.width(), grid.height())?;
    if let Some(mask) = mask {
        grid.ensure_same_shape(mask)?;
    }
    Ok(scan(grid, mask, neighborhood, 1.0))
}

/// Find local maxima of an image using the configured footprint.
///
/// With `normalize_to_beam_area` the grid is divided by the beam area in
/// pixels first; the reported values and `scale_factor` reflect that.
pub fn detect_image_peaks(
    image: &RadioImage,
    mask: Option<&PixelGrid>,
    config: &PeakConfig,
) -> Result<PeakReport> {
    let (width, height) = image.grid.shape();
    let neighborhood = match config.footprint {
        FootprintKind::Square => Neighborhood::square(config.cell, width, height)?,
        FootprintKind::Beam => Neighborhood::from_beam(&image.geometry, width, height)?,
    };
    if let Some(mask) = mask {
        image.grid.ensure_same_shape(mask)?;
    }

    if config.normalize_to_beam_area {
        let area = image.geometry.beam_area_pixels("beam area normalization")?;
        let factor = (1.0 / area) as f32;
        let scaled = image.grid.scaled(factor);
        return Ok(scan(&scaled, mask, neighborhood, factor));
    }

    Ok(scan(&image.grid, mask, neighborhood, 1.0))
}

fn scan(
    grid: &PixelGrid,
    mask: Option<&PixelGrid>,
    neighborhood: Neighborhood,
    scale_factor: f32,
) -> PeakReport {
    let (width, height) = grid.shape();
    let (hx, hy) = (neighborhood.half_x, neighborhood.half_y);

    let mut coordinates = Vec::new();
    let mut values = BTreeMap::new();
    let mut interior = 0usize;

    for y in hy..height - hy {
        for x in hx..width - hx {
            interior += 1;
            if let Some(mask) = mask {
                if !(mask.at(x, y) > 0.0) {
                    continue;
                }
            }
            let value = grid.at(x, y);
            if is_local_max(grid, x, y, value, &neighborhood.offsets) {
                coordinates.push((x, y));
                values.insert((x, y), value);
            }
        }
    }

    if interior > 1 && coordinates.len() == interior {
        tracing::warn!(
            peaks = interior,
            "every interior pixel is a local maximum; the grid is flat"
        );
    }
    tracing::debug!(
        peaks = coordinates.len(),
        half_x = hx,
        half_y = hy,
        masked = mask.is_some(),
        "peak scan complete"
    );

    PeakReport {
        coordinates,
        values,
        footprint: neighborhood,
        scale_factor,
    }
}

/// No neighbor exceeds `value`. NaN anywhere in the neighborhood, including
/// the center, disqualifies it.
fn is_local_max(grid: &PixelGrid, x: usize, y: usize, value: f32, offsets: &[(isize, isize)]) -> bool {
    if value.is_nan() {
        return false;
    }
    offsets.iter().all(|&(dx, dy)| {
        let nx = (x as isize + dx) as usize;
        let ny = (y as isize + dy) as usize;
        let neighbor = grid.at(nx, ny);
        !neighbor.is_nan() && neighbor <= value
    })
}
