//! Year-keyed file naming for inputs and outputs.

use std::path::{Path, PathBuf};

use crate::error::IoError;
use crate::validate::ValidationCollector;

/// Placeholder replaced by the four-digit year in file-name templates.
pub const YEAR_PLACEHOLDER: &str = "{year}";

/// Resolves the per-year input and output file paths.
///
/// Each path is a pure function of the year: directory joined with a
/// template in which [`YEAR_PLACEHOLDER`] is replaced by the zero-padded year.
/// The templates set by [`FileLayout::new`] match the ERA5 daily file names.
#[derive(Debug, Clone)]
pub struct FileLayout {
    aet_dir: PathBuf,
    pet_dir: PathBuf,
    output_dir: PathBuf,
    aet_template: String,
    pet_template: String,
    output_template: String,
    climatology_file: String,
}

impl FileLayout {
    /// Create a layout over the three directories with the ERA5 file names.
    pub fn new(
        aet_dir: impl Into<PathBuf>,
        pet_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            aet_dir: aet_dir.into(),
            pet_dir: pet_dir.into(),
            output_dir: output_dir.into(),
            aet_template: "era5_daily_actual_evaporation_{year}.nc".into(),
            pet_template: "era5_daily_potential_evaporation_{year}.nc".into(),
            output_template: "ERA5_DEDI_global_{year}_daily.nc".into(),
            climatology_file: "ERA5_DEDI_climatology.nc".into(),
        }
    }

    /// Set the actual-evapotranspiration file-name template.
    pub fn with_aet_template(mut self, template: impl Into<String>) -> Self {
        self.aet_template = template.into();
        self
    }

    /// Set the potential-evapotranspiration file-name template.
    pub fn with_pet_template(mut self, template: impl Into<String>) -> Self {
        self.pet_template = template.into();
        self
    }

    /// Set the index output file-name template.
    pub fn with_output_template(mut self, template: impl Into<String>) -> Self {
        self.output_template = template.into();
        self
    }

    /// Set the climatology output file name (placed in the output directory).
    pub fn with_climatology_file(mut self, name: impl Into<String>) -> Self {
        self.climatology_file = name.into();
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Check that every per-year template contains [`YEAR_PLACEHOLDER`].
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing each template without a
    /// placeholder, since such a template would map every year to one file.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut c = ValidationCollector::new();
        for (kind, template) in [
            ("aet", &self.aet_template),
            ("pet", &self.pet_template),
            ("output", &self.output_template),
        ] {
            c.check(!template.contains(YEAR_PLACEHOLDER), || {
                format!("{kind} template '{template}' lacks {YEAR_PLACEHOLDER}")
            });
        }
        c.finish()
    }

    /// Path of the actual-evapotranspiration file for `year`.
    pub fn aet_path(&self, year: i32) -> PathBuf {
        self.aet_dir.join(render(&self.aet_template, year))
    }

    /// Path of the potential-evapotranspiration file for `year`.
    pub fn pet_path(&self, year: i32) -> PathBuf {
        self.pet_dir.join(render(&self.pet_template, year))
    }

    /// Path of the index output file for `year`.
    pub fn output_path(&self, year: i32) -> PathBuf {
        self.output_dir.join(render(&self.output_template, year))
    }

    /// Path of the climatology output file.
    pub fn climatology_path(&self) -> PathBuf {
        self.output_dir.join(&self.climatology_file)
    }

    /// Directory receiving the output files.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

fn render(template: &str, year: i32) -> String {
    template.replace(YEAR_PLACEHOLDER, &format!("{year:04}"))
}
