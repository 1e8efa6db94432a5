//! Integration tests: write index and climatology files, then read them back.

use std::path::Path;

use approx::assert_relative_eq;
use dedi_io::{
    GridCoords, INDEX_VAR, IoError, ReaderConfig, WriterConfig, read_flux, read_grid,
    write_climatology, write_index,
};
use ndarray::Array3;
use netcdf::AttributeValue;

fn grid() -> GridCoords {
    GridCoords::new(vec![0.0, 0.25, 0.5], vec![10.0, 9.75]).expect("valid grid")
}

fn string_attr(var: &netcdf::Variable<'_>, name: &str) -> String {
    match var.attribute_value(name).expect("attribute present").expect("readable") {
        AttributeValue::Str(s) => s,
        other => panic!("expected string attribute, got {other:?}"),
    }
}

fn assert_no_part_files(dir: &Path) {
    let leftovers: Vec<_> = std::fs::read_dir(dir)
        .expect("read dir")
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().ends_with(".part"))
        .collect();
    assert!(leftovers.is_empty(), "partial files left: {leftovers:?}");
}

#[test]
fn index_round_trip_non_leap() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("ERA5_DEDI_global_2019_daily.nc");

    let mut index = Array3::from_shape_fn((365, 2, 3), |(t, j, i)| {
        t as f64 * 0.01 - (j * 3 + i) as f64
    });
    index[[10, 1, 2]] = f64::NAN;

    write_index(&path, 2019, index.view(), &grid(), &WriterConfig::default()).unwrap();
    assert!(path.exists());
    assert_no_part_files(dir.path());

    let back = read_flux(&path, INDEX_VAR).unwrap();
    assert_eq!(back.dim(), (365, 2, 3));
    assert!(back[[10, 1, 2]].is_nan());
    assert_relative_eq!(back[[200, 0, 1]], index[[200, 0, 1]], epsilon = 1e-5);

    let g = read_grid(&path, &ReaderConfig::default()).unwrap();
    assert_eq!(g, grid());

    let file = netcdf::open(&path).unwrap();
    let time = file.variable("time").unwrap();
    let offsets = time.get_values::<i32, _>(..).unwrap();
    assert_eq!(offsets.len(), 365);
    assert_eq!(offsets[0], 0);
    assert_eq!(offsets[364], 364);
    assert_eq!(string_attr(&time, "units"), "days since 2019-01-01");

    let dedi = file.variable(INDEX_VAR).unwrap();
    assert_eq!(string_attr(&dedi, "units"), "-");
    assert_eq!(
        string_attr(&dedi, "long_name"),
        "Daily Evapotranspiration Deficit Index"
    );
    let dims: Vec<String> = dedi.dimensions().iter().map(|d| d.name()).collect();
    assert_eq!(dims, ["time", "latitude", "longitude"]);
}

#[test]
fn index_leap_year_has_366_steps() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dedi_2020.nc");
    let index = Array3::<f64>::zeros((366, 2, 3));

    write_index(
        &path,
        2020,
        index.view(),
        &grid(),
        &WriterConfig::default().with_deflate_level(None),
    )
    .unwrap();

    let file = netcdf::open(&path).unwrap();
    let time = file.variable("time").unwrap();
    assert_eq!(time.len(), 366);
    assert_eq!(string_attr(&time, "units"), "days since 2020-01-01");
}

#[test]
fn wrong_day_count_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dedi_2019.nc");
    let index = Array3::<f64>::zeros((366, 2, 3));

    let err = write_index(&path, 2019, index.view(), &grid(), &WriterConfig::default())
        .unwrap_err();
    assert!(matches!(
        err,
        IoError::DimensionMismatch {
            expected: 365,
            got: 366,
            ..
        }
    ));
    assert!(!path.exists());
    assert_no_part_files(dir.path());
}

#[test]
fn grid_mismatch_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dedi_2019.nc");
    let index = Array3::<f64>::zeros((365, 3, 3));

    let err = write_index(&path, 2019, index.view(), &grid(), &WriterConfig::default())
        .unwrap_err();
    match err {
        IoError::DimensionMismatch { name, .. } => assert_eq!(name, "latitude"),
        other => panic!("expected DimensionMismatch, got {other:?}"),
    }
}

#[test]
fn missing_output_directory_is_a_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("dedi_2019.nc");
    let index = Array3::<f64>::zeros((365, 2, 3));

    let err = write_index(&path, 2019, index.view(), &grid(), &WriterConfig::default())
        .unwrap_err();
    match err {
        IoError::Write { path: p, reason } => {
            assert_eq!(p, path);
            assert!(reason.contains("does not exist"));
        }
        other => panic!("expected Write error, got {other:?}"),
    }
}

#[test]
fn existing_file_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dedi_2019.nc");

    let first = Array3::<f64>::from_elem((365, 2, 3), 1.0);
    let second = Array3::<f64>::from_elem((365, 2, 3), -2.0);
    write_index(&path, 2019, first.view(), &grid(), &WriterConfig::default()).unwrap();
    write_index(&path, 2019, second.view(), &grid(), &WriterConfig::default()).unwrap();

    let back = read_flux(&path, INDEX_VAR).unwrap();
    assert!(back.iter().all(|&v| v == -2.0));
}

#[test]
fn climatology_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ERA5_DEDI_climatology.nc");

    let mean = Array3::from_shape_fn((366, 2, 3), |(d, _, _)| d as f64);
    let mut sd = Array3::from_elem((366, 2, 3), 0.5);
    sd[[59, 0, 0]] = f64::NAN;

    write_climatology(&path, mean.view(), sd.view(), &grid(), &WriterConfig::default())
        .unwrap();

    let file = netcdf::open(&path).unwrap();
    let slots = file
        .variable("dayofyear")
        .unwrap()
        .get_values::<i32, _>(..)
        .unwrap();
    assert_eq!(slots.first(), Some(&1));
    assert_eq!(slots.last(), Some(&366));

    let mean_back = read_flux(&path, "mean").unwrap();
    let sd_back = read_flux(&path, "std").unwrap();
    assert_relative_eq!(mean_back[[365, 1, 2]], 365.0, epsilon = 1e-4);
    assert!(sd_back[[59, 0, 0]].is_nan());
    assert_relative_eq!(sd_back[[59, 0, 1]], 0.5);
}

#[test]
fn climatology_requires_366_slots() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clim.nc");
    let mean = Array3::<f64>::zeros((365, 2, 3));

    let err = write_climatology(&path, mean.view(), mean.view(), &grid(), &WriterConfig::default())
        .unwrap_err();
    assert!(matches!(err, IoError::DimensionMismatch { expected: 366, .. }));
    assert!(!path.exists());
}
