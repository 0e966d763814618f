//! Local maximum search over square and beam-shaped neighborhoods.

use image_analysis::{detect_image_peaks, detect_peaks, FootprintKind, Neighborhood, PeakConfig};
use radio_common::{
    AnalysisError, AngularUnit, AxisGeometry, BeamShape, GridGeometry, PixelGrid, RadioImage,
};
use test_utils::image::{ImageSpec, DISK_128, SMALL_64, TINY_10X10};
use test_utils::{
    assert_approx_eq, create_circular_mask, create_constant_grid, create_gaussian_source,
    create_noise_grid, create_point_sources, create_spike_grid,
};

fn grid(data: Vec<f32>, width: usize, height: usize) -> PixelGrid {
    PixelGrid::new(data, width, height).unwrap()
}

fn image_from(spec: &ImageSpec, data: Vec<f32>, with_beam: bool) -> RadioImage {
    let axes = AxisGeometry::new(
        spec.width,
        spec.height,
        spec.increment_x,
        spec.increment_y,
        AngularUnit::Arcsec,
    );
    let beam = with_beam.then(|| {
        BeamShape::new(spec.beam_major, spec.beam_minor, spec.beam_pa, AngularUnit::Arcsec)
    });
    RadioImage::new(
        "peaks",
        grid(data, spec.width, spec.height),
        GridGeometry::new(axes, beam),
    )
    .unwrap()
}

/// Background falling away from `(cx, cy)` with a spike on top, so the spike
/// is the only local maximum.
fn sloped_spikes(width: usize, height: usize, spikes: &[(usize, usize, f32)]) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            data.push(-((x + y) as f32));
        }
    }
    for &(x, y, v) in spikes {
        data[y * width + x] = v;
    }
    data
}

// =============================================================================
// Square Neighborhood
// =============================================================================

#[test]
fn test_single_center_maximum() {
    let data = vec![
        0.0, 0.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 1.0, 1.0, 0.0, //
        0.0, 1.0, 5.0, 1.0, 0.0, //
        0.0, 1.0, 1.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 0.0, 0.0,
    ];
    let report = detect_peaks(&grid(data, 5, 5), None, 3).unwrap();
    assert_eq!(report.coordinates, vec![(2, 2)]);
    assert_eq!(report.get(2, 2), Some(5.0));
}

#[test]
fn test_even_cell_rejected() {
    let g = PixelGrid::filled(5, 5, 0.0);
    assert!(matches!(
        detect_peaks(&g, None, 4),
        Err(AnalysisError::InvalidNeighborhood(_))
    ));
}

#[test]
fn test_cell_larger_than_grid_rejected() {
    let g = PixelGrid::filled(7, 3, 0.0);
    assert!(detect_peaks(&g, None, 3).is_ok());
    assert!(matches!(
        detect_peaks(&g, None, 5),
        Err(AnalysisError::InvalidNeighborhood(_))
    ));
}

#[test]
fn test_spike_on_sloped_background() {
    let data = sloped_spikes(7, 7, &[(3, 3, 100.0)]);
    let report = detect_peaks(&grid(data, 7, 7), None, 3).unwrap();
    assert_eq!(report.coordinates, vec![(3, 3)]);
    assert_eq!(report.values.len(), 1);
    assert_eq!(report.get(3, 3), Some(100.0));
}

#[test]
fn test_spike_on_flat_background() {
    // Ties count as maxima, so every zero-valued center whose window misses
    // the spike is itself a plateau peak. Only the sloped background above
    // yields a single peak. See DESIGN.md, decision 6.
    let data = create_spike_grid(7, 7, 3, 3, 100.0);
    let report = detect_peaks(&grid(data, 7, 7), None, 3).unwrap();
    assert_eq!(report.get(3, 3), Some(100.0));
    for &(x, y) in &report.coordinates {
        if (x, y) == (3, 3) {
            continue;
        }
        assert_eq!(report.get(x, y), Some(0.0));
        assert!(x.abs_diff(3) > 1 || y.abs_diff(3) > 1, "({}, {}) touches the spike", x, y);
    }
}

#[test]
fn test_separated_point_sources() {
    let data = create_point_sources(12, 12, &[(3, 3, 5.0), (8, 7, 9.0)]);
    let report = detect_peaks(&grid(data, 12, 12), None, 3).unwrap();
    assert_eq!(report.get(3, 3), Some(5.0));
    assert_eq!(report.get(8, 7), Some(9.0));
    for &(x, y) in &report.coordinates {
        if (x, y) != (3, 3) && (x, y) != (8, 7) {
            assert_eq!(report.get(x, y), Some(0.0));
        }
    }
}

#[test]
fn test_constant_grid_reports_every_interior_pixel() {
    let report = detect_peaks(&grid(create_constant_grid(6, 5, 1.0), 6, 5), None, 3).unwrap();
    assert_eq!(report.len(), 4 * 3);
}

#[test]
fn test_coordinates_stay_inside_scan_bounds() {
    for &(width, height, cell) in &[(16, 16, 3), (20, 11, 5), (9, 30, 7), (7, 7, 7)] {
        let data = create_noise_grid(width, height, 1.0, 42);
        let report = detect_peaks(&grid(data, width, height), None, cell).unwrap();
        let half = cell / 2;
        for &(x, y) in &report.coordinates {
            assert!(x >= half && x < width - half, "x={} for {}x{} cell {}", x, width, height, cell);
            assert!(y >= half && y < height - half, "y={} for {}x{} cell {}", y, width, height, cell);
        }
    }
}

#[test]
fn test_coordinates_are_unique_and_in_scan_order() {
    let data = create_noise_grid(24, 24, 1.0, 7);
    let report = detect_peaks(&grid(data, 24, 24), None, 3).unwrap();
    assert_eq!(report.coordinates.len(), report.values.len());
    let mut sorted = report.coordinates.clone();
    sorted.sort_by_key(|&(x, y)| (y, x));
    assert_eq!(sorted, report.coordinates);
}

// =============================================================================
// Mask
// =============================================================================

#[test]
fn test_mask_restricts_peaks() {
    let data = sloped_spikes(9, 9, &[(2, 2, 50.0), (6, 6, 80.0)]);
    let g = grid(data, 9, 9);

    let all = detect_peaks(&g, None, 3).unwrap();
    assert_eq!(all.coordinates, vec![(2, 2), (6, 6)]);

    let mask = grid(create_circular_mask(9, 9, (6.0, 6.0), 1.5), 9, 9);
    let masked = detect_peaks(&g, Some(&mask), 3).unwrap();
    assert_eq!(masked.coordinates, vec![(6, 6)]);
    assert_eq!(masked.get(6, 6), Some(80.0));
}

#[test]
fn test_mask_shape_mismatch() {
    let g = PixelGrid::filled(8, 8, 0.0);
    let mask = PixelGrid::filled(8, 7, 1.0);
    assert!(matches!(
        detect_peaks(&g, Some(&mask), 3),
        Err(AnalysisError::ShapeMismatch { .. })
    ));

    // A bad cell is reported before the mask is looked at.
    assert!(matches!(
        detect_peaks(&g, Some(&mask), 2),
        Err(AnalysisError::InvalidNeighborhood(_))
    ));
}

// =============================================================================
// Beam Footprint and Normalization
// =============================================================================

#[test]
fn test_beam_footprint_shape() {
    // 6 x 4 px beam at PA 35°
    let img = image_from(&DISK_128, create_constant_grid(128, 128, 0.0), true);
    let n = Neighborhood::from_beam(&img.geometry, 128, 128).unwrap();

    assert_eq!((n.half_x, n.half_y), (2, 3));
    assert_eq!(n.extent(), (5, 7));
    assert!(n.offsets.contains(&(0, 0)));
    // Along the major axis
    assert!(n.offsets.contains(&(-1, 2)));
    assert!(n.offsets.contains(&(1, -2)));
    // Across it
    assert!(!n.offsets.contains(&(2, 2)));
    assert!(!n.offsets.contains(&(-2, -2)));
    for &(dx, dy) in &n.offsets {
        assert!(dx.unsigned_abs() <= n.half_x && dy.unsigned_abs() <= n.half_y);
    }
}

#[test]
fn test_beam_footprint_finds_source() {
    let data = create_gaussian_source(128, 128, (64.0, 64.0), 3.0, 10.0);
    let img = image_from(&DISK_128, data, true);
    let config = PeakConfig {
        footprint: FootprintKind::Beam,
        ..Default::default()
    };
    let report = detect_image_peaks(&img, None, &config).unwrap();

    assert_eq!(report.footprint.extent(), (5, 7));
    assert_eq!(report.scale_factor, 1.0);
    assert_approx_eq!(report.get(64, 64).unwrap(), 10.0, 1e-6);
    for &(x, y) in &report.coordinates {
        assert!(x >= 2 && x < 126);
        assert!(y >= 3 && y < 125);
    }
}

#[test]
fn test_beam_footprint_too_large() {
    // 20 px beam on a 10 x 10 grid
    let img = image_from(&TINY_10X10, create_constant_grid(10, 10, 0.0), true);
    let config = PeakConfig {
        footprint: FootprintKind::Beam,
        ..Default::default()
    };
    assert!(matches!(
        detect_image_peaks(&img, None, &config),
        Err(AnalysisError::InvalidNeighborhood(_))
    ));
}

#[test]
fn test_beam_footprint_overflowing_pixels() {
    // A 1" beam on 1e-300" pixels is finite in pixels but far beyond any grid.
    let axes = AxisGeometry::new(16, 16, -1e-300, 1e-300, AngularUnit::Arcsec);
    let beam = Some(BeamShape::new(1.0, 1.0, 0.0, AngularUnit::Arcsec));
    let img = RadioImage::new(
        "huge-beam",
        grid(create_constant_grid(16, 16, 0.0), 16, 16),
        GridGeometry::new(axes, beam),
    )
    .unwrap();
    let config = PeakConfig {
        footprint: FootprintKind::Beam,
        ..Default::default()
    };
    assert!(matches!(
        detect_image_peaks(&img, None, &config),
        Err(AnalysisError::InvalidNeighborhood(_))
    ));
}

#[test]
fn test_beam_footprint_requires_beam() {
    let img = image_from(&SMALL_64, create_constant_grid(64, 64, 0.0), false);
    let config = PeakConfig {
        footprint: FootprintKind::Beam,
        ..Default::default()
    };
    assert!(matches!(
        detect_image_peaks(&img, None, &config),
        Err(AnalysisError::MissingBeam(_))
    ));

    let normalize = PeakConfig {
        normalize_to_beam_area: true,
        ..Default::default()
    };
    assert!(matches!(
        detect_image_peaks(&img, None, &normalize),
        Err(AnalysisError::MissingBeam(_))
    ));
}

#[test]
fn test_normalize_to_beam_area() {
    let img = image_from(&SMALL_64, create_spike_grid(64, 64, 32, 32, 100.0), true);
    let config = PeakConfig {
        normalize_to_beam_area: true,
        ..Default::default()
    };
    let report = detect_image_peaks(&img, None, &config).unwrap();

    // 4 x 4 px Gaussian beam
    let area = std::f64::consts::PI * 16.0 / (4.0 * std::f64::consts::LN_2);
    assert_approx_eq!(report.scale_factor, 1.0 / area, 1e-6);
    assert_approx_eq!(report.get(32, 32).unwrap(), 100.0 / area, 1e-4);

    // The caller's grid is untouched.
    assert_eq!(img.grid.at(32, 32), 100.0);
}

#[test]
fn test_image_peaks_square_matches_grid_peaks() {
    let data = sloped_spikes(64, 64, &[(10, 20, 5.0), (40, 40, 9.0)]);
    let img = image_from(&SMALL_64, data, true);
    let report = detect_image_peaks(&img, None, &PeakConfig::default()).unwrap();
    let direct = detect_peaks(&img.grid, None, 3).unwrap();
    assert_eq!(report.coordinates, direct.coordinates);
    assert_eq!(report.coordinates, vec![(10, 20), (40, 40)]);
}

#[test]
fn test_report_serializes_values_as_triples() {
    let data = sloped_spikes(7, 7, &[(3, 3, 100.0)]);
    let report = detect_peaks(&grid(data, 7, 7), None, 3).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["coordinates"], serde_json::json!([[3, 3]]));
    assert_eq!(json["values"], serde_json::json!([[3, 3, 100.0]]));
    assert_eq!(json["footprint"]["half_x"], 1);
}
