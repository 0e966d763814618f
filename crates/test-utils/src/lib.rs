//! Shared test utilities for the radio image analysis workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic sky generators (point sources, disks, rings, flat fields)
//! - Common image geometries used across test suites
//! - Float assertion macros
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{assert_approx_eq, create_spike_grid, fixtures};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if !(diff <= epsilon) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Macro asserting that every element of two float slices agrees within
/// `epsilon`, reporting the first offending index.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_all_approx_eq;
///
/// assert_all_approx_eq!(&[1.0, 2.0], &[1.0001, 2.0], 0.001);
/// ```
#[macro_export]
macro_rules! assert_all_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left = $left;
        let right = $right;
        assert_eq!(left.len(), right.len(), "length mismatch");
        for (i, (l, r)) in left.iter().zip(right.iter()).enumerate() {
            let diff = (*l as f64 - *r as f64).abs();
            if !(diff <= $epsilon as f64) {
                panic!(
                    "assertion failed at index {}: `{:?}` vs `{:?}` (diff {:?})",
                    i, l, r, diff
                );
            }
        }
    }};
}
