use caliop_profile::core::{filter, AltitudeAxis, GeoCoordinate, GridFilter, MeasurementGrid};
use caliop_profile::types::{AltitudeUnit, AxisOrder, ProfileError, SortAxis};
use ndarray::Array2;
use std::cmp::Ordering;

/// 5 positions x 4 altitudes, value = 10 * position index + altitude index
fn reference_grid() -> MeasurementGrid<f64> {
    let matrix = Array2::from_shape_fn((5, 4), |(i, j)| Some((10 * i + j) as f32));
    let altitudes = AltitudeAxis::new(vec![12.0, 8.0, 4.0, 0.0], AltitudeUnit::Kilometers).unwrap();
    MeasurementGrid::new(matrix, vec![-20.0, -10.0, 0.0, 10.0, 20.0], altitudes).unwrap()
}

#[test]
fn test_filter_tropical_box() {
    let _ = env_logger::builder().is_test(true).try_init();

    let filtered = filter(&reference_grid(), (-10.0, 10.0), (0.0, 8.0), SortAxis::Position).unwrap();

    assert_eq!(filtered.axis_order(), AxisOrder::AltitudeMajor);
    assert_eq!(filtered.latitudes(), vec![-10.0, 0.0, 10.0]);
    assert_eq!(filtered.altitudes().values(), &[8.0, 4.0, 0.0]);
    assert_eq!(filtered.altitudes().unit().to_string(), "Km");
    assert_eq!(filtered.dim(), (3, 3));

    // Rows are altitudes 8, 4, 0; columns are latitudes -10, 0, 10
    for (row, altitude_index) in [1usize, 2, 3].iter().enumerate() {
        for (col, position_index) in [1usize, 2, 3].iter().enumerate() {
            let expected = (10 * position_index + altitude_index) as f32;
            assert_eq!(filtered.matrix()[[row, col]], Some(expected));
            assert_eq!(filtered.value_at(col, row), Some(Some(expected)));
        }
    }
}

#[test]
fn test_filter_outside_any_latitude() {
    let filtered = filter(&reference_grid(), (100.0, 200.0), (0.0, 12.0), SortAxis::Position).unwrap();
    assert!(filtered.positions().is_empty());
    assert_eq!(filtered.dim(), (4, 0));
    assert_eq!(filtered.valid_count(), 0);
}

#[test]
fn test_filter_bound_order_independent() {
    let grid = reference_grid();
    let a = filter(&grid, (10.0, -10.0), (12.0, 0.0), SortAxis::Position).unwrap();
    let b = filter(&grid, (-10.0, 10.0), (0.0, 12.0), SortAxis::Position).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_filter_single_point_bounds() {
    let grid = reference_grid();
    let filtered = filter(&grid, (0.0, 0.0), (4.0, 4.0), SortAxis::Position).unwrap();
    assert_eq!(filtered.dim(), (1, 1));
    assert_eq!(filtered.matrix()[[0, 0]], Some(22.0));

    let between = filter(&grid, (1.0, 1.0), (4.0, 4.0), SortAxis::Position).unwrap();
    assert_eq!(between.dim(), (1, 0));
}

#[test]
fn test_filter_sorts_descending_track() {
    // Descending orbit: latitudes arrive north to south
    let matrix = Array2::from_shape_fn((4, 2), |(i, j)| if j == 0 { Some(i as f32) } else { None });
    let positions = vec![
        GeoCoordinate::new(30.0, -60.0),
        GeoCoordinate::new(10.0, -65.0),
        GeoCoordinate::new(-10.0, -70.0),
        GeoCoordinate::new(-30.0, -75.0),
    ];
    let altitudes = AltitudeAxis::new(vec![5.0, 1.0], AltitudeUnit::Kilometers).unwrap();
    let grid = MeasurementGrid::new(matrix, positions, altitudes).unwrap();

    let filtered = GridFilter::new().apply(&grid).unwrap();
    assert_eq!(filtered.latitudes(), vec![-30.0, -10.0, 10.0, 30.0]);
    assert_eq!(filtered.positions()[0].longitude(), -75.0);
    assert_eq!(filtered.matrix().row(0).to_vec(), vec![Some(3.0), Some(2.0), Some(1.0), Some(0.0)]);
    assert_eq!(filtered.matrix().row(1).to_vec(), vec![None; 4]);
}

#[test]
fn test_filter_rejects_nan_bounds() {
    let result = filter(&reference_grid(), (f64::NAN, 10.0), (0.0, 8.0), SortAxis::Position);
    assert!(matches!(result, Err(ProfileError::InvalidBounds(_))));
}

#[test]
fn test_transpose_round_trip() {
    let grid = reference_grid();
    assert_eq!(grid.transpose().transpose(), grid);
}

#[test]
fn test_sort_by_altitude_twice() {
    let grid = reference_grid();
    let once = grid.sorted_by(SortAxis::Altitude);
    assert_eq!(once.sorted_by(SortAxis::Altitude), once);
    assert_eq!(once.altitudes().values(), &[0.0, 4.0, 8.0, 12.0]);
    assert_eq!(once.value_at(4, 0), Some(Some(43.0)));
}

#[test]
fn test_same_latitude_coordinates() {
    let east = GeoCoordinate::new(5.0, 100.0);
    let west = GeoCoordinate::new(5.0, 99.0);

    assert_ne!(east, west);
    assert_eq!(east.cmp_latitude(&west), Ordering::Equal);
    assert_eq!(east.as_number(), west.as_number());
    assert!(west < east);
}

#[test]
fn test_duplicate_latitude_rows_both_selected() {
    let matrix = Array2::from_shape_fn((3, 1), |(i, _)| Some(i as f32));
    let positions = vec![
        GeoCoordinate::new(5.0, 100.0),
        GeoCoordinate::new(5.0, 99.0),
        GeoCoordinate::new(6.0, 98.0),
    ];
    let altitudes = AltitudeAxis::new(vec![1.0], AltitudeUnit::Kilometers).unwrap();
    let grid = MeasurementGrid::new(matrix, positions, altitudes).unwrap();

    let filtered = filter(&grid, (5.0, 5.0), (0.0, 12.0), SortAxis::Position).unwrap();
    assert_eq!(filtered.positions().len(), 2);
    // Composite key puts the western sample first
    assert_eq!(filtered.positions()[0].longitude(), 99.0);
    assert_eq!(filtered.matrix().row(0).to_vec(), vec![Some(1.0), Some(0.0)]);
}

#[test]
fn test_dateline_crossing_sorts_by_key() {
    // Nearby latitudes on either side of the dateline: the longitude term wins
    let matrix = Array2::from_shape_fn((2, 1), |(i, _)| Some(i as f32));
    let positions = vec![GeoCoordinate::new(10.0, 179.9), GeoCoordinate::new(10.2, -179.9)];
    let altitudes = AltitudeAxis::new(vec![1.0], AltitudeUnit::Kilometers).unwrap();
    let grid = MeasurementGrid::new(matrix, positions, altitudes).unwrap();

    let filtered = filter(&grid, (-90.0, 90.0), (0.0, 12.0), SortAxis::Position).unwrap();
    assert_eq!(filtered.latitudes(), vec![10.2, 10.0]);
    assert_eq!(filtered.matrix().row(0).to_vec(), vec![Some(1.0), Some(0.0)]);
}
