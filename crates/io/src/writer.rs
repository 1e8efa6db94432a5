//! High-level NetCDF writer configuration and orchestration.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::Utc;
use dedi_calendar::{ALIGNED_DAYS, day_offsets, days_in_year, time_units};
use ndarray::{ArrayView3, Axis};
use tracing::{debug, warn};

use crate::error::IoError;
use crate::grid::GridCoords;
use crate::validate::ValidationCollector;

/// Name of the index variable in output files.
pub const INDEX_VAR: &str = "DEDI";

/// Long name attached to the index variable.
pub const INDEX_LONG_NAME: &str = "Daily Evapotranspiration Deficit Index";

/// Configuration for writing index and climatology files.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Deflate level 1..=9 for data variables, or `None` for no compression.
    deflate_level: Option<i32>,
    /// Value of the global `title` attribute.
    title: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            deflate_level: Some(4),
            title: "ERA5 Daily Evapotranspiration Deficit Index".into(),
        }
    }
}

impl WriterConfig {
    /// Sets the deflate level, or disables compression with `None`.
    pub fn with_deflate_level(mut self, level: Option<i32>) -> Self {
        self.deflate_level = level;
        self
    }

    /// Sets the global `title` attribute.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the deflate level is outside 1..=9.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut c = ValidationCollector::new();
        if let Some(level) = self.deflate_level {
            c.check(!(1..=9).contains(&level), || {
                format!("deflate_level must be 1..=9, got {level}")
            });
        }
        c.finish()
    }
}

/// Write one year of the index to `path`.
///
/// The file holds `longitude`, `latitude` and an unlimited `time` dimension,
/// the matching coordinate variables, and `DEDI(time, latitude, longitude)`
/// as `f32`. Time values are day offsets since 1 January of `year`.
///
/// The file is assembled under a `.part` name next to `path` and renamed into
/// place only once complete, so a failure never leaves a truncated file.
///
/// # Errors
///
/// Returns [`IoError::DimensionMismatch`] if `index` does not have
/// `days_in_year(year)` time steps or its spatial axes differ from `grid`,
/// and [`IoError::Write`] or [`IoError::Netcdf`] if the file cannot be written.
pub fn write_index(
    path: &Path,
    year: i32,
    index: ArrayView3<'_, f64>,
    grid: &GridCoords,
    config: &WriterConfig,
) -> Result<(), IoError> {
    config.validate()?;
    let (nt, ny, nx) = index.dim();
    check_dim("time", days_in_year(year), nt)?;
    check_dim("latitude", grid.n_lat(), ny)?;
    check_dim("longitude", grid.n_lon(), nx)?;

    write_atomically(path, |file| {
        file.add_dimension("longitude", nx)?;
        file.add_dimension("latitude", ny)?;
        file.add_unlimited_dimension("time")?;
        put_grid(file, grid)?;

        {
            let mut var = file.add_variable::<i32>("time", &["time"])?;
            var.put_attribute("units", time_units(year).as_str())?;
            var.put_attribute("long_name", "time")?;
            var.put_attribute("calendar", "proleptic_gregorian")?;
            for (t, offset) in day_offsets(year).into_iter().enumerate() {
                var.put_value(offset, [t])?;
            }
        }

        {
            let mut var =
                file.add_variable::<f32>(INDEX_VAR, &["time", "latitude", "longitude"])?;
            if let Some(level) = config.deflate_level {
                var.set_compression(level, true)?;
            }
            var.put_attribute("units", "-")?;
            var.put_attribute("long_name", INDEX_LONG_NAME)?;
            for (t, layer) in index.axis_iter(Axis(0)).enumerate() {
                let values: Vec<f32> = layer.iter().map(|&v| v as f32).collect();
                var.put_values(&values, (t, .., ..))?;
            }
        }

        put_global_attributes(file, &config.title)
    })?;

    debug!(path = %path.display(), year, n_days = nt, "index file written");
    Ok(())
}

/// Write the day-of-year climatology (mean and standard deviation) to `path`.
///
/// Both fields are `(dayofyear, latitude, longitude)` with 366 slots; slot
/// 60 holds 29 February. Written with the same `.part`-then-rename
/// discipline as [`write_index`].
///
/// # Errors
///
/// Returns [`IoError::DimensionMismatch`] if either field is not
/// `366 x n_lat x n_lon`, and [`IoError::Write`] or [`IoError::Netcdf`] if the
/// file cannot be written.
pub fn write_climatology(
    path: &Path,
    mean: ArrayView3<'_, f64>,
    sd: ArrayView3<'_, f64>,
    grid: &GridCoords,
    config: &WriterConfig,
) -> Result<(), IoError> {
    config.validate()?;
    for field in [&mean, &sd] {
        let (nd, ny, nx) = field.dim();
        check_dim("dayofyear", ALIGNED_DAYS, nd)?;
        check_dim("latitude", grid.n_lat(), ny)?;
        check_dim("longitude", grid.n_lon(), nx)?;
    }

    write_atomically(path, |file| {
        file.add_dimension("longitude", grid.n_lon())?;
        file.add_dimension("latitude", grid.n_lat())?;
        file.add_dimension("dayofyear", ALIGNED_DAYS)?;
        put_grid(file, grid)?;

        {
            let slots: Vec<i32> = (1..=ALIGNED_DAYS as i32).collect();
            let mut var = file.add_variable::<i32>("dayofyear", &["dayofyear"])?;
            var.put_attribute("long_name", "day of year on a 366-day calendar")?;
            var.put_attribute("units", "1")?;
            var.put_values(&slots, ..)?;
        }

        for (name, long_name, field) in [
            ("mean", "climatological mean of AET minus PET", &mean),
            ("std", "climatological sample standard deviation of AET minus PET", &sd),
        ] {
            let mut var = file.add_variable::<f32>(name, &["dayofyear", "latitude", "longitude"])?;
            if let Some(level) = config.deflate_level {
                var.set_compression(level, true)?;
            }
            var.put_attribute("units", "mm")?;
            var.put_attribute("long_name", long_name)?;
            let values: Vec<f32> = field.iter().map(|&v| v as f32).collect();
            var.put_values(&values, ..)?;
        }

        put_global_attributes(file, &config.title)
    })?;

    debug!(path = %path.display(), "climatology file written");
    Ok(())
}

fn check_dim(name: &str, expected: usize, got: usize) -> Result<(), IoError> {
    if expected != got {
        return Err(IoError::DimensionMismatch {
            name: name.to_string(),
            expected,
            got,
        });
    }
    Ok(())
}

fn put_grid(file: &mut netcdf::FileMut, grid: &GridCoords) -> Result<(), IoError> {
    {
        let mut var = file.add_variable::<f32>("longitude", &["longitude"])?;
        var.put_attribute("units", "degrees_east")?;
        var.put_attribute("long_name", "longitude")?;
        var.put_values(grid.lons(), ..)?;
    }
    {
        let mut var = file.add_variable::<f32>("latitude", &["latitude"])?;
        var.put_attribute("units", "degrees_north")?;
        var.put_attribute("long_name", "latitude")?;
        var.put_values(grid.lats(), ..)?;
    }
    Ok(())
}

fn put_global_attributes(file: &mut netcdf::FileMut, title: &str) -> Result<(), IoError> {
    file.add_attribute("title", title)?;
    file.add_attribute("Conventions", "CF-1.8")?;
    let history = format!(
        "{}: created by dedi {}",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        env!("CARGO_PKG_VERSION")
    );
    file.add_attribute("history", history.as_str())?;
    Ok(())
}

/// Sibling path used while a file is being assembled.
fn part_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".part");
    PathBuf::from(name)
}

/// Create `path` via `build`, renaming into place only on success.
fn write_atomically<F>(path: &Path, build: F) -> Result<(), IoError>
where
    F: FnOnce(&mut netcdf::FileMut) -> Result<(), IoError>,
{
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty())
        && !dir.is_dir()
    {
        return Err(IoError::Write {
            path: path.to_path_buf(),
            reason: format!("output directory {} does not exist", dir.display()),
        });
    }

    publish(path, |part| {
        let mut file = netcdf::create(part)?;
        build(&mut file)?;
        // HDF5 flushes buffered data on close, so a full disk surfaces here.
        file.close()?;
        Ok(())
    })
}

/// Run `write` against the `.part` sibling of `path`, then rename it into
/// place. Any failure, including one from `write` after it has created the
/// file, removes the partial file and leaves `path` untouched.
fn publish<W>(path: &Path, write: W) -> Result<(), IoError>
where
    W: FnOnce(&Path) -> Result<(), IoError>,
{
    let part = part_path(path);
    let result = write(&part).and_then(|()| {
        std::fs::rename(&part, path).map_err(|e| IoError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    });

    if result.is_err()
        && part.exists()
        && let Err(e) = std::fs::remove_file(&part)
    {
        warn!(path = %part.display(), error = %e, "failed to remove partial file");
    }
    result
}
