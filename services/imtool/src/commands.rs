//! Subcommand execution.
//!
//! Each command loads its inputs, applies the configured view, runs one
//! analysis and returns the result as JSON for the caller to print.

use anyhow::{Context, Result};
use image_analysis::{
    azimuthal_profile, detect_image_peaks, radial_profile, region_rms, AnalysisConfig,
};
use radio_common::{PixelGrid, RadioImage};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tracing::info;

/// Read a JSON image dump and crop it to the configured view.
pub fn load_image(path: &Path, config: &AnalysisConfig) -> Result<RadioImage> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read image from {:?}", path))?;
    let image = RadioImage::from_json(&content)
        .with_context(|| format!("Failed to decode image from {:?}", path))?;
    info!(
        image = %image.name,
        width = image.width(),
        height = image.height(),
        has_beam = image.geometry.beam.is_some(),
        "Loaded image"
    );
    Ok(image.view(config.view.width, config.view.height))
}

fn load_mask(path: Option<&Path>, config: &AnalysisConfig) -> Result<Option<PixelGrid>> {
    match path {
        Some(path) => Ok(Some(load_image(path, config)?.grid)),
        None => Ok(None),
    }
}

pub fn radial(image: &Path, config: &AnalysisConfig) -> Result<Value> {
    let image = load_image(image, config)?;
    let profile = radial_profile(&image, &config.radial)?;
    info!(bins = profile.len(), step_px = profile.step_px, "Radial profile done");
    Ok(serde_json::to_value(profile)?)
}

pub fn azimuthal(image: &Path, config: &AnalysisConfig) -> Result<Value> {
    let image = load_image(image, config)?;
    let profile = azimuthal_profile(&image, &config.azimuthal)?;
    info!(bins = profile.len(), step_deg = profile.step_deg, "Azimuthal profile done");
    Ok(serde_json::to_value(profile)?)
}

pub fn peaks(image: &Path, mask: Option<&Path>, config: &AnalysisConfig) -> Result<Value> {
    let image = load_image(image, config)?;
    let mask = load_mask(mask, config)?;
    let report = detect_image_peaks(&image, mask.as_ref(), &config.peaks)?;
    info!(peaks = report.len(), "Peak detection done");
    Ok(serde_json::to_value(report)?)
}

pub fn stats(image: &Path, mask: &Path, invert: bool, config: &AnalysisConfig) -> Result<Value> {
    let image = load_image(image, config)?;
    let mask = load_image(mask, config)?;
    let stats = region_rms(&image.grid, &mask.grid, invert)?;
    Ok(serde_json::to_value(stats)?)
}

/// Pixel-wise `image - other`, with its range.
pub fn diff(image: &Path, other: &Path, config: &AnalysisConfig) -> Result<Value> {
    let image = load_image(image, config)?;
    let other = load_image(other, config)?;
    let difference = image.difference(&other)?;
    Ok(json!({
        "width": difference.width(),
        "height": difference.height(),
        "min": difference.min(),
        "max": difference.max(),
        "data": difference.data(),
    }))
}

/// Tick layout in the configured axes unit, plus the beam overlay when the
/// image carries a beam.
pub fn ticks(image: &Path, config: &AnalysisConfig) -> Result<Value> {
    let image = load_image(image, config)?.with_axes_unit(config.axes_unit)?;
    let layout = image.geometry.axes.ticks(&config.ticks);
    let beam = match image.geometry.beam {
        Some(_) => Some(image.geometry.beam_overlay()?),
        None => None,
    };
    Ok(json!({
        "ticks": layout,
        "beam": beam,
    }))
}
