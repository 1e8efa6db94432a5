//! High-level NetCDF reader configuration and orchestration.

use std::path::Path;

use ndarray::Array3;
use tracing::debug;

use crate::error::IoError;
use crate::grid::GridCoords;
use crate::netcdf_read;

/// Configuration for reading ERA5 evapotranspiration fields.
///
/// Use the builder methods (`with_*`) to customise variable names and
/// coordinate aliases. The [`Default`] implementation supplies the ERA5
/// short names: `e` for evaporation and `pev` for potential evaporation.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// NetCDF variable name for actual evapotranspiration.
    aet_var: String,
    /// NetCDF variable name for potential evapotranspiration.
    pet_var: String,
    /// Aliases to try when looking up longitude coordinates.
    lon_aliases: Vec<String>,
    /// Aliases to try when looking up latitude coordinates.
    lat_aliases: Vec<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            aet_var: "e".into(),
            pet_var: "pev".into(),
            lon_aliases: vec!["longitude".into(), "lon".into()],
            lat_aliases: vec!["latitude".into(), "lat".into()],
        }
    }
}

impl ReaderConfig {
    /// Set the actual-evapotranspiration variable name.
    pub fn with_aet_var(mut self, name: impl Into<String>) -> Self {
        self.aet_var = name.into();
        self
    }

    /// Set the potential-evapotranspiration variable name.
    pub fn with_pet_var(mut self, name: impl Into<String>) -> Self {
        self.pet_var = name.into();
        self
    }

    /// Actual-evapotranspiration variable name.
    pub fn aet_var(&self) -> &str {
        &self.aet_var
    }

    /// Potential-evapotranspiration variable name.
    pub fn pet_var(&self) -> &str {
        &self.pet_var
    }
}

/// Read the longitude and latitude axes of a gridded file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] or [`IoError::Netcdf`] if the file cannot
/// be opened, [`IoError::MissingVariable`] if no coordinate alias matches,
/// and [`IoError::Validation`] if either axis is empty.
pub fn read_grid(path: &Path, config: &ReaderConfig) -> Result<GridCoords, IoError> {
    let file = netcdf_read::open_file(path)?;

    let lon_aliases: Vec<&str> = config.lon_aliases.iter().map(String::as_str).collect();
    let lat_aliases: Vec<&str> = config.lat_aliases.iter().map(String::as_str).collect();

    let lons = netcdf_read::read_1d_f32(&file, &lon_aliases, path)?;
    let lats = netcdf_read::read_1d_f32(&file, &lat_aliases, path)?;
    debug!(
        path = %path.display(),
        n_lon = lons.len(),
        n_lat = lats.len(),
        "read grid coordinates"
    );

    GridCoords::new(lons, lats)
}

/// Read a `(time, lat, lon)` flux variable in native units.
///
/// Packed values are unpacked and fill values become NaN; see
/// `netcdf_read::read_3d_f64`.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] or [`IoError::Netcdf`] if the file cannot
/// be opened or read, [`IoError::MissingVariable`] if `var_name` is absent,
/// and [`IoError::DimensionMismatch`] if the variable is not 3-D.
pub fn read_flux(path: &Path, var_name: &str) -> Result<Array3<f64>, IoError> {
    let file = netcdf_read::open_file(path)?;
    let data = netcdf_read::read_3d_f64(&file, var_name, path)?;
    debug!(
        path = %path.display(),
        var = var_name,
        shape = ?data.shape(),
        "read flux field"
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_names_are_era5() {
        let cfg = ReaderConfig::default();
        assert_eq!(cfg.aet_var(), "e");
        assert_eq!(cfg.pet_var(), "pev");
        assert_eq!(cfg.lon_aliases[0], "longitude");
        assert_eq!(cfg.lat_aliases[0], "latitude");
    }

    #[test]
    fn builder_methods() {
        let cfg = ReaderConfig::default()
            .with_aet_var("aet")
            .with_pet_var("pet");
        assert_eq!(cfg.aet_var(), "aet");
        assert_eq!(cfg.pet_var(), "pet");
    }

    #[test]
    fn missing_file_is_reported() {
        let err = read_flux(Path::new("/nonexistent/era5_1979.nc"), "e").unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }
}
