//! Profiling and peak detection for radio images.
//!
//! Every entry point takes a [`RadioImage`](radio_common::RadioImage) and a
//! plain options struct, and returns a serializable result record.
//!
//! # Architecture
//!
//! ```text
//! RadioImage + AnalysisConfig
//!      │
//!      ├─► radial_profile()      annuli sized from the beam, deprojected
//!      │
//!      ├─► azimuthal_profile()   one-beam-wide ring, nearest angle bin
//!      │
//!      ├─► detect_image_peaks()  square or beam-shaped neighborhood
//!      │
//!      └─► region_rms()          mask rescaled to [0, 1]
//! ```
//!
//! All work is single-threaded and holds no state between calls.

pub mod azimuthal;
pub mod config;
pub mod peaks;
pub mod radial;
pub mod stats;

pub use azimuthal::{angle_bins, azimuthal_profile, AzimuthalProfile, MIN_STEP_DEG};
pub use config::{
    AnalysisConfig, AzimuthalProfileConfig, FootprintKind, PeakConfig, RadialProfileConfig,
    ViewConfig,
};
pub use peaks::{detect_image_peaks, detect_peaks, Neighborhood, PeakReport};
pub use radial::{radial_profile, AzimuthWindow, RadialProfile};
pub use stats::{mean_std, region_rms, BinReduction, BinSamples, EmptyBinPolicy, RegionStats};
