//! Configuration for profiling, peak detection and plot layout.
//!
//! Every option is a named field with a documented default. Values can be
//! deserialized from a config file, overridden from the environment, and
//! checked with `validate()` before use.

use radio_common::{AngularUnit, TickConfig};
use serde::{Deserialize, Serialize};

/// Top-level analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Unit the axes are converted to for tick labels.
    pub axes_unit: AngularUnit,

    /// Centered sub-window to analyze.
    pub view: ViewConfig,

    /// Tick layout for plotting hosts.
    pub ticks: TickConfig,

    /// Radial profile options.
    pub radial: RadialProfileConfig,

    /// Azimuthal profile options.
    pub azimuthal: AzimuthalProfileConfig,

    /// Peak detection options.
    pub peaks: PeakConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            axes_unit: AngularUnit::Arcsec,
            view: ViewConfig::default(),
            ticks: TickConfig::default(),
            radial: RadialProfileConfig::default(),
            azimuthal: AzimuthalProfileConfig::default(),
            peaks: PeakConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration overrides from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Apply overrides from any key/value source. Unparseable values are
    /// ignored and the current setting is kept.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("AXES_UNIT") {
            if let Ok(unit) = val.parse() {
                self.axes_unit = unit;
            }
        }

        if let Some(val) = lookup("VIEW_WIDTH") {
            if let Ok(width) = val.parse() {
                self.view.width = Some(width);
            }
        }

        if let Some(val) = lookup("VIEW_HEIGHT") {
            if let Ok(height) = val.parse() {
                self.view.height = Some(height);
            }
        }

        if let Some(val) = lookup("RADIAL_AZIMUTH") {
            self.radial.azimuth = parse_window(&val);
        }

        if let Some(val) = lookup("RADIAL_SAMPLING_FACTOR") {
            if let Ok(factor) = val.parse() {
                self.radial.sampling_factor = factor;
            }
        }

        if let Some(val) = lookup("RADIAL_INCLINATION_DEG") {
            if let Ok(inc) = val.parse() {
                self.radial.inclination_deg = inc;
            }
        }

        if let Some(val) = lookup("RADIAL_POSITION_ANGLE_DEG") {
            if let Ok(pa) = val.parse() {
                self.radial.position_angle_deg = pa;
            }
        }

        if let Some(val) = lookup("AZIMUTHAL_RADIUS_ARCSEC") {
            if let Ok(radius) = val.parse() {
                self.azimuthal.radius_arcsec = radius;
            }
        }

        if let Some(val) = lookup("AZIMUTHAL_SAMPLING_FACTOR") {
            if let Ok(factor) = val.parse() {
                self.azimuthal.sampling_factor = factor;
            }
        }

        if let Some(val) = lookup("PEAK_CELL") {
            if let Ok(cell) = val.parse() {
                self.peaks.cell = cell;
            }
        }

        if let Some(val) = lookup("PEAK_FOOTPRINT") {
            self.peaks.footprint = FootprintKind::from_str(&val);
        }

        if let Some(val) = lookup("PEAK_NORMALIZE") {
            self.peaks.normalize_to_beam_area = val.to_lowercase() == "true" || val == "1";
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.radial.validate()?;
        self.azimuthal.validate()?;
        self.peaks.validate()?;
        Ok(())
    }
}

/// Parse an azimuth window written as `"start,end"` in degrees. Anything
/// else, including an empty string, means the full circle.
fn parse_window(s: &str) -> Option<(f64, f64)> {
    let (start, end) = s.split_once(',')?;
    Some((start.trim().parse().ok()?, end.trim().parse().ok()?))
}

/// Centered sub-window of the image; `None` keeps the full extent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub width: Option<usize>,
    pub height: Option<usize>,
}

/// Options for the radial profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadialProfileConfig {
    /// Azimuth window `(start, end)` in degrees east of north. `None`
    /// samples the full circle.
    pub azimuth: Option<(f64, f64)>,

    /// Annulus width as a fraction of the beam size.
    pub sampling_factor: f64,

    /// Disk inclination in degrees, 0 = face-on.
    pub inclination_deg: f64,

    /// Disk position angle in degrees east of north.
    pub position_angle_deg: f64,
}

impl Default for RadialProfileConfig {
    fn default() -> Self {
        Self {
            azimuth: None,
            sampling_factor: 0.5,
            inclination_deg: 0.0,
            position_angle_deg: 0.0,
        }
    }
}

impl RadialProfileConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.sampling_factor > 0.0) {
            return Err("radial sampling_factor must be > 0".to_string());
        }

        if !(0.0..90.0).contains(&self.inclination_deg) {
            return Err("radial inclination_deg must be in [0, 90)".to_string());
        }

        Ok(())
    }
}

/// Options for the azimuthal profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AzimuthalProfileConfig {
    /// Radius of the sampled ring in arcsec.
    pub radius_arcsec: f64,

    /// Angular bin width as a fraction of the beam size at that radius.
    pub sampling_factor: f64,
}

impl Default for AzimuthalProfileConfig {
    fn default() -> Self {
        Self {
            radius_arcsec: 1.0,
            sampling_factor: 0.5,
        }
    }
}

impl AzimuthalProfileConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.radius_arcsec > 0.0) {
            return Err("azimuthal radius_arcsec must be > 0".to_string());
        }

        if !(self.sampling_factor > 0.0) {
            return Err("azimuthal sampling_factor must be > 0".to_string());
        }

        Ok(())
    }
}

/// Shape of the neighborhood searched around each candidate peak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FootprintKind {
    /// A `cell x cell` square.
    #[default]
    Square,
    /// The beam ellipse, sized from the restoring beam.
    Beam,
}

impl FootprintKind {
    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "beam" | "ellipse" => Self::Beam,
            _ => Self::Square,
        }
    }
}

/// Options for peak detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeakConfig {
    /// Side of the square neighborhood. Must be odd and at least 3.
    pub cell: usize,

    /// Square or beam-shaped neighborhood.
    pub footprint: FootprintKind,

    /// Divide the grid by the beam area in pixels before scanning.
    pub normalize_to_beam_area: bool,
}

impl Default for PeakConfig {
    fn default() -> Self {
        Self {
            cell: 3,
            footprint: FootprintKind::Square,
            normalize_to_beam_area: false,
        }
    }
}

impl PeakConfig {
    /// Checks that do not depend on the image size. The bounds against the
    /// grid are checked when the neighborhood is built.
    pub fn validate(&self) -> Result<(), String> {
        if self.footprint == FootprintKind::Square && (self.cell < 3 || self.cell % 2 == 0) {
            return Err("peak cell must be an odd integer >= 3".to_string());
        }
        Ok(())
    }
}
