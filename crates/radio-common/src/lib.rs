//! Common types shared by the radio image analysis workspace.
//!
//! An external loader decodes an image (pixels plus header) into a
//! [`RadioImage`]; everything downstream works on that value object:
//!
//! ```text
//! loader ──► RadioImage { PixelGrid, GridGeometry { AxisGeometry, BeamShape? } }
//!                 │
//!                 ├─► image-analysis: radial / azimuthal profiles, peaks, stats
//!                 └─► plotting host: ticks, beam overlay ellipse
//! ```

pub mod axis;
pub mod beam;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod image;
pub mod unit;

pub use axis::{AxisGeometry, AxisTicks, TickConfig, TickLayout};
pub use beam::{BeamOverlay, BeamShape};
pub use error::{AnalysisError, Result};
pub use geometry::{beam_size_in_pixels, convert_unit, GridGeometry};
pub use grid::{PixelCube, PixelGrid};
pub use image::{ImageMetadata, RadioImage};
pub use unit::AngularUnit;
