//! Common test fixtures for radio image analysis tests.
//!
//! This module provides pre-defined image layouts that represent common
//! scenarios: tiny hand-checkable grids and realistic interferometer maps.

/// Common image layouts for testing.
pub mod image {
    /// Image layout for testing. Increments and beam axes are in arcsec.
    #[derive(Debug, Clone, Copy)]
    pub struct ImageSpec {
        pub width: usize,
        pub height: usize,
        pub increment_x: f64,
        pub increment_y: f64,
        pub beam_major: f64,
        pub beam_minor: f64,
        pub beam_pa: f64,
    }

    impl ImageSpec {
        /// Returns the total number of pixels.
        pub fn size(&self) -> usize {
            self.width * self.height
        }

        /// Beam major and minor axes in pixels.
        pub fn beam_pixels(&self) -> (f64, f64) {
            (
                self.beam_major / self.increment_x.abs(),
                self.beam_minor / self.increment_y.abs(),
            )
        }

        /// Grid midpoint `(width / 2, height / 2)` as floats.
        pub fn center(&self) -> (f64, f64) {
            (self.width as f64 / 2.0, self.height as f64 / 2.0)
        }
    }

    /// 10x10 map with a 2" round beam on 0.1" pixels.
    pub const TINY_10X10: ImageSpec = ImageSpec {
        width: 10,
        height: 10,
        increment_x: 0.1,
        increment_y: 0.1,
        beam_major: 2.0,
        beam_minor: 2.0,
        beam_pa: 0.0,
    };

    /// 64x64 map with a 4-pixel round beam, RA increasing to the left.
    pub const SMALL_64: ImageSpec = ImageSpec {
        width: 64,
        height: 64,
        increment_x: -0.05,
        increment_y: 0.05,
        beam_major: 0.2,
        beam_minor: 0.2,
        beam_pa: 0.0,
    };

    /// Protoplanetary-disk style map with an elongated, rotated beam.
    pub const DISK_128: ImageSpec = ImageSpec {
        width: 128,
        height: 128,
        increment_x: -0.01,
        increment_y: 0.01,
        beam_major: 0.06,
        beam_minor: 0.04,
        beam_pa: 35.0,
    };
}

/// Common azimuth windows, in degrees east of north.
pub mod azimuth {
    /// North-east quadrant
    pub const NORTH_EAST: (f64, f64) = (0.0, 90.0);

    /// Wedge crossing north, exercising the wrap-around membership test
    pub const ACROSS_NORTH: (f64, f64) = (300.0, 60.0);

    /// Southern half
    pub const SOUTH: (f64, f64) = (90.0, 270.0);
}
