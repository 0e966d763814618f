//! Angular units and the fixed conversion table.

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Arcseconds per radian.
pub const ARCSEC_PER_RAD: f64 = 180.0 * 3600.0 / PI;

/// Angular units that may appear in an image header.
///
/// Only `rad` and `arcsec` take part in conversions; the other variants exist
/// so that headers carrying them parse and then fail explicitly on use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngularUnit {
    Rad,
    Deg,
    Arcmin,
    Arcsec,
}

impl AngularUnit {
    /// Header spelling of the unit.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rad => "rad",
            Self::Deg => "deg",
            Self::Arcmin => "arcmin",
            Self::Arcsec => "arcsec",
        }
    }

    /// Symbol used in axis titles. Radians carry no symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Rad => "",
            Self::Deg => "°",
            Self::Arcmin => "'",
            Self::Arcsec => "\"",
        }
    }

    /// Multiplicative factor that converts a value in `self` into `to`.
    pub fn factor_to(self, to: AngularUnit) -> Result<f64> {
        match (self, to) {
            (Self::Rad, Self::Rad) | (Self::Arcsec, Self::Arcsec) => Ok(1.0),
            (Self::Rad, Self::Arcsec) => Ok(ARCSEC_PER_RAD),
            (Self::Arcsec, Self::Rad) => Ok(1.0 / ARCSEC_PER_RAD),
            (from, to) => Err(AnalysisError::unsupported_unit(from.as_str(), to.as_str())),
        }
    }
}

impl FromStr for AngularUnit {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "rad" => Ok(Self::Rad),
            "deg" => Ok(Self::Deg),
            "arcmin" => Ok(Self::Arcmin),
            "arcsec" => Ok(Self::Arcsec),
            other => Err(AnalysisError::unsupported_unit(other, "?")),
        }
    }
}

impl fmt::Display for AngularUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Look up the factor converting `from` into `to` by header spelling.
///
/// Unknown spellings and pairs outside the table both fail with
/// [`AnalysisError::UnsupportedUnit`] naming the requested pair.
pub fn conversion_factor(from: &str, to: &str) -> Result<f64> {
    let parsed = from
        .parse::<AngularUnit>()
        .and_then(|f| to.parse::<AngularUnit>().map(|t| (f, t)));
    match parsed {
        Ok((f, t)) => f.factor_to(t),
        Err(_) => Err(AnalysisError::unsupported_unit(from, to)),
    }
}
