//! Test data generators for creating synthetic sky images.
//!
//! These generators create predictable, verifiable pixel patterns that can
//! be used across the test suite. All grids are row-major `Vec<f32>` with
//! row 0 at the bottom of the image.

/// Creates a test grid with predictable values.
///
/// Each cell value is calculated as: `col * 1000 + row`
///
/// This makes it easy to verify that pixels are addressed correctly by
/// checking that grid[row][col] == col * 1000 + row.
///
/// # Example
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(10, 5);
/// assert_eq!(grid.len(), 50); // 10 * 5
/// assert_eq!(grid[0], 0.0);   // col=0, row=0 -> 0*1000 + 0
/// assert_eq!(grid[1], 1000.0); // col=1, row=0 -> 1*1000 + 0
/// assert_eq!(grid[10], 1.0);  // col=0, row=1 -> 0*1000 + 1
/// ```
pub fn create_test_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((col * 1000 + row) as f32);
        }
    }
    data
}

/// Creates a grid filled with a constant value.
///
/// A flat field is the reference case for profile statistics: every
/// non-empty bin must report the constant as its mean and zero scatter.
pub fn create_constant_grid(width: usize, height: usize, value: f32) -> Vec<f32> {
    vec![value; width * height]
}

/// Creates a zero grid with a single bright pixel at `(col, row)`.
pub fn create_spike_grid(width: usize, height: usize, col: usize, row: usize, value: f32) -> Vec<f32> {
    let mut data = vec![0.0f32; width * height];
    if col < width && row < height {
        data[row * width + col] = value;
    }
    data
}

/// Creates a zero grid with point sources at the given `(col, row, value)`
/// positions.
pub fn create_point_sources(width: usize, height: usize, sources: &[(usize, usize, f32)]) -> Vec<f32> {
    let mut data = vec![0.0f32; width * height];
    for &(col, row, value) in sources {
        if col < width && row < height {
            data[row * width + col] = value;
        }
    }
    data
}

/// Creates a circular Gaussian source.
///
/// # Arguments
///
/// * `width` - Number of columns
/// * `height` - Number of rows
/// * `center` - Source position `(x, y)` in pixels
/// * `sigma` - Gaussian width in pixels
/// * `amplitude` - Peak value at the center
pub fn create_gaussian_source(
    width: usize,
    height: usize,
    center: (f64, f64),
    sigma: f64,
    amplitude: f32,
) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    let two_sigma_sq = 2.0 * sigma * sigma;
    for row in 0..height {
        for col in 0..width {
            let dx = col as f64 - center.0;
            let dy = row as f64 - center.1;
            let value = (-(dx * dx + dy * dy) / two_sigma_sq).exp();
            data.push(amplitude * value as f32);
        }
    }
    data
}

/// Creates a grid whose value equals the distance from `center` in pixels.
///
/// Useful for checking radial binning: each annulus collects values close
/// to its own radius.
pub fn create_radial_ramp(width: usize, height: usize, center: (f64, f64)) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let dx = col as f64 - center.0;
            let dy = row as f64 - center.1;
            data.push((dx * dx + dy * dy).sqrt() as f32);
        }
    }
    data
}

/// Creates a grid whose value is the position angle of each pixel around
/// `center`, in degrees east of north: `(atan2(dy, dx) - 90) mod 360`.
pub fn create_azimuth_grid(width: usize, height: usize, center: (f64, f64)) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let dx = col as f64 - center.0;
            let dy = row as f64 - center.1;
            let angle = (dy.atan2(dx).to_degrees() - 90.0).rem_euclid(360.0);
            data.push(angle as f32);
        }
    }
    data
}

/// Creates a grid with NaN values at specified positions.
///
/// # Arguments
///
/// * `width` - Number of columns
/// * `height` - Number of rows
/// * `nan_positions` - List of (col, row) positions that should be NaN
///
/// # Returns
///
/// A `Vec<f32>` with NaN at specified positions, zeros elsewhere.
pub fn create_grid_with_nans(
    width: usize,
    height: usize,
    nan_positions: &[(usize, usize)],
) -> Vec<f32> {
    let mut data = vec![0.0f32; width * height];
    for &(col, row) in nan_positions {
        if col < width && row < height {
            data[row * width + col] = f32::NAN;
        }
    }
    data
}

/// Creates a deterministic noise field in `[-amplitude, amplitude]`.
///
/// Uses a simple hash-based approach for reproducibility.
pub fn create_noise_grid(width: usize, height: usize, amplitude: f32, seed: u32) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let hash = simple_hash(col as u32, row as u32, seed);
            let unit = (hash % 10_001) as f32 / 5_000.0 - 1.0;
            data.push(unit * amplitude);
        }
    }
    data
}

/// Creates a mask that is 1 inside a circle and 0 outside.
pub fn create_circular_mask(width: usize, height: usize, center: (f64, f64), radius: f64) -> Vec<f32> {
    create_radial_ramp(width, height, center)
        .into_iter()
        .map(|r| if (r as f64) <= radius { 1.0 } else { 0.0 })
        .collect()
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}
