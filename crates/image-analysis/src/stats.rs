//! Per-bin reductions and region-masked statistics.

use radio_common::{AnalysisError, PixelGrid, Result};
use serde::{Deserialize, Serialize};

/// What a bin with no samples reports.
///
/// The radial and azimuthal profilers historically disagree: radial bins
/// report `(0, 0)` while azimuthal bins report `(NaN, NaN)`. Both behaviours
/// are kept and selected explicitly by each profiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyBinPolicy {
    /// Empty bins report a mean and standard deviation of zero.
    Zero,
    /// Empty bins report NaN for both values.
    Nan,
}

impl EmptyBinPolicy {
    fn value(self) -> f64 {
        match self {
            Self::Zero => 0.0,
            Self::Nan => f64::NAN,
        }
    }
}

/// Samples collected per bin during a single profiling call.
#[derive(Debug, Clone)]
pub struct BinSamples {
    bins: Vec<Vec<f32>>,
}

/// Mean, population standard deviation and sample count per bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinReduction {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
    pub counts: Vec<usize>,
}

impl BinSamples {
    pub fn new(num_bins: usize) -> Self {
        Self {
            bins: vec![Vec::new(); num_bins],
        }
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Add a sample to bin `index`. Returns false, dropping the sample, when
    /// the index is past the last bin.
    pub fn push(&mut self, index: usize, value: f32) -> bool {
        match self.bins.get_mut(index) {
            Some(bin) => {
                bin.push(value);
                true
            }
            None => false,
        }
    }

    /// Number of bins without any sample.
    pub fn empty_bins(&self) -> usize {
        self.bins.iter().filter(|b| b.is_empty()).count()
    }

    /// Reduce every bin to `(mean, std)`.
    pub fn reduce(&self, policy: EmptyBinPolicy) -> BinReduction {
        let mut mean = Vec::with_capacity(self.bins.len());
        let mut std = Vec::with_capacity(self.bins.len());
        let mut counts = Vec::with_capacity(self.bins.len());

        for bin in &self.bins {
            let (m, s) = mean_std(bin).unwrap_or((policy.value(), policy.value()));
            mean.push(m);
            std.push(s);
            counts.push(bin.len());
        }

        BinReduction { mean, std, counts }
    }
}

/// Mean and population standard deviation of `values`, or `None` when empty.
///
/// NaN samples propagate into both results.
pub fn mean_std(values: &[f32]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    let var = values
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    Some((mean, var.sqrt()))
}

/// Result of a region-masked RMS measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionStats {
    /// Weighted root mean square of the image inside the region
    pub rms: f64,
    /// Sum of the normalized mask weights
    pub weight_sum: f64,
}

/// RMS of `data` inside a region mask.
///
/// The mask is rescaled to `[0, 1]` by its own minimum and maximum, and
/// inverted when `invert` is set. The result is
/// `sqrt(Σ (v·m)² / Σ m)`.
pub fn region_rms(data: &PixelGrid, mask: &PixelGrid, invert: bool) -> Result<RegionStats> {
    data.ensure_same_shape(mask)?;

    let (min, max) = match (mask.min(), mask.max()) {
        (Some(min), Some(max)) if max > min => (min as f64, max as f64),
        _ => {
            return Err(AnalysisError::degenerate_mask(
                "mask has no contrast to normalize",
            ))
        }
    };
    let span = max - min;

    let mut weight_sum = 0.0f64;
    let mut square_sum = 0.0f64;
    for (&v, &m) in data.data().iter().zip(mask.data()) {
        let mut w = (m as f64 - min) / span;
        if invert {
            w = 1.0 - w;
        }
        weight_sum += w;
        let weighted = v as f64 * w;
        square_sum += weighted * weighted;
    }

    if !(weight_sum > 0.0) {
        return Err(AnalysisError::degenerate_mask("mask weights sum to zero"));
    }

    let rms = (square_sum / weight_sum).sqrt();
    tracing::debug!(rms, weight_sum, invert, "region rms measured");
    Ok(RegionStats { rms, weight_sum })
}
